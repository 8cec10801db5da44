//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};
use budgie_core::Settings;

pub async fn cmd_serve(
    mut settings: Settings,
    host: Option<String>,
    port: Option<u16>,
    static_dir: Option<&Path>,
) -> Result<()> {
    if let Some(host) = host {
        settings.server.host = host;
    }
    if let Some(port) = port {
        settings.server.port = port;
    }

    println!("🚀 Starting Budgie web server...");
    println!(
        "   Listening: http://{}:{}",
        settings.server.host, settings.server.port
    );
    println!(
        "   AI backend: {} {} (model: {})",
        settings.ai.backend, settings.ai.host, settings.ai.model
    );
    if settings.artifact.auto_download {
        println!("   Model file: {}", settings.artifact.path.display());
    }
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    println!();

    let static_dir = match static_dir {
        Some(dir) => Some(
            dir.to_str()
                .with_context(|| format!("Static dir is not valid UTF-8: {}", dir.display()))?,
        ),
        None => None,
    };

    budgie_server::serve(settings, static_dir).await
}
