//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use budgie_core::UserType;
use clap::{Parser, Subcommand};

/// Budgie - Personal finance chatbot with budgeting and spending insights
#[derive(Parser)]
#[command(name = "budgie")]
#[command(about = "Local personal finance assistant", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file (defaults to ~/.local/share/budgie/config.toml, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run (starts the web server when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Port to listen on (default from settings: 7860)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (default from settings: 127.0.0.1)
        #[arg(long)]
        host: Option<String>,

        /// Directory of static files served for unmatched paths
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Ask the financial assistant a question
    Ask {
        /// Your question
        message: String,

        /// User type: Student or Professional
        #[arg(short, long, default_value = "Student")]
        user_type: UserType,

        /// Maximum tokens to generate (default from settings: 150)
        #[arg(long)]
        max_tokens: Option<u32>,
    },

    /// Print a budget summary for a one-off profile
    Budget {
        /// Your name
        #[arg(short, long)]
        name: String,

        /// User type: Student or Professional
        #[arg(short, long, default_value = "Student")]
        user_type: UserType,

        /// Monthly income
        #[arg(short, long)]
        income: f64,

        /// Monthly expenses
        #[arg(short, long)]
        expenses: f64,

        /// Age
        #[arg(long, default_value = "25")]
        age: i32,

        /// Financial goals
        #[arg(long, default_value = "")]
        goals: String,
    },

    /// Analyze a `Category,Amount` spending file
    Spending {
        /// File with one `Category,Amount` row per line
        #[arg(short, long)]
        file: PathBuf,

        /// Name shown in the report
        #[arg(short, long, default_value = "you")]
        name: String,
    },

    /// Show financial tips
    Tips {
        /// User type: Student or Professional
        #[arg(short, long, default_value = "Student")]
        user_type: String,

        /// Topic: Budgeting or Investing
        #[arg(short, long, default_value = "Budgeting")]
        topic: String,
    },

    /// Download the model file if it is missing
    FetchModel,

    /// Show settings and AI backend status
    Status,
}
