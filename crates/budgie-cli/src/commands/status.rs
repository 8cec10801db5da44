//! Status command implementation

use std::path::Path;

use anyhow::Result;
use budgie_core::{config::default_config_path, AIBackend, AIClient, Settings};

pub async fn cmd_status(settings: &Settings, config: Option<&Path>) -> Result<()> {
    println!();
    println!("📊 Budgie Status");
    println!("   ─────────────────────────────────────────────────────────────");

    // Settings source
    match config {
        Some(path) => println!("   Settings: {}", path.display()),
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => println!("   Settings: {}", path.display()),
            None => println!("   Settings: (built-in defaults)"),
        },
    }
    println!(
        "   Server: http://{}:{}",
        settings.server.host, settings.server.port
    );

    // AI backend
    let client = AIClient::from_settings(&settings.ai);
    println!();
    println!("   AI backend: {}", client.backend_name());
    println!("   Host: {}", client.host());
    println!("   Model: {}", client.model());
    println!(
        "   Max tokens: {} (timeout {}s)",
        settings.ai.max_tokens, settings.ai.timeout_secs
    );
    if client.health_check().await {
        println!("   ✅ Connected");
    } else {
        println!("   ❌ Not responding (chat replies will apologize)");
    }

    // Model file
    let artifact = &settings.artifact;
    println!();
    if artifact.path.exists() {
        println!("   Model file: {} ✅", artifact.path.display());
    } else if artifact.auto_download {
        println!(
            "   Model file: {} (missing, downloads on serve)",
            artifact.path.display()
        );
    } else {
        println!(
            "   Model file: {} (missing, run 'budgie fetch-model')",
            artifact.path.display()
        );
    }

    println!();
    Ok(())
}
