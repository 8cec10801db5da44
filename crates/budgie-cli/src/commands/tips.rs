//! Financial tips command

use anyhow::Result;
use budgie_core::tips;

pub fn cmd_tips(user_type: &str, topic: &str) -> Result<()> {
    println!("{}", tips::tips(user_type, topic));
    Ok(())
}
