//! One-shot chat command

use anyhow::Result;
use budgie_core::{Advisor, Settings, UserType, APOLOGY};

pub async fn cmd_ask(
    settings: &Settings,
    message: &str,
    user_type: UserType,
    max_tokens: Option<u32>,
) -> Result<()> {
    let advisor = Advisor::from_settings(&settings.ai);
    let max_tokens = max_tokens.unwrap_or(settings.ai.max_tokens);

    let reply = advisor.reply(message, user_type, max_tokens).await;
    println!("{}", reply);

    if reply == APOLOGY {
        println!();
        println!("   Run 'budgie status' to check the AI backend.");
    }

    Ok(())
}
