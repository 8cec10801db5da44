//! Budgie CLI - Personal finance chatbot
//!
//! Usage:
//!   budgie                                   Start web server on 127.0.0.1:7860
//!   budgie serve --port 8080                 Start web server on another port
//!   budgie ask "How do I start saving?"      One-shot chat
//!   budgie budget -n alice -i 3000 -e 2000   Budget summary
//!   budgie spending --file spending.csv      Spending insights
//!   budgie tips -u Professional -t investing Financial tips

mod cli;
mod commands;


use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use budgie_core::Settings;
use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;

    match cli.command {
        None => commands::cmd_serve(settings, None, None, None).await,
        Some(Commands::Serve {
            port,
            host,
            static_dir,
        }) => commands::cmd_serve(settings, host, port, static_dir.as_deref()).await,
        Some(Commands::Ask {
            message,
            user_type,
            max_tokens,
        }) => commands::cmd_ask(&settings, &message, user_type, max_tokens).await,
        Some(Commands::Budget {
            name,
            user_type,
            income,
            expenses,
            age,
            goals,
        }) => commands::cmd_budget(budgie_core::NewProfile {
            name,
            age,
            user_type,
            income,
            expenses,
            goals,
        }),
        Some(Commands::Spending { file, name }) => commands::cmd_spending(&file, &name),
        Some(Commands::Tips { user_type, topic }) => commands::cmd_tips(&user_type, &topic),
        Some(Commands::FetchModel) => commands::cmd_fetch_model(&settings).await,
        Some(Commands::Status) => commands::cmd_status(&settings, cli.config.as_deref()).await,
    }
}
