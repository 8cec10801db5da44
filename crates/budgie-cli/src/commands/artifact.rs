//! Model file download command

use anyhow::{Context, Result};
use budgie_core::{ensure_model_artifact, ArtifactStatus, Settings};

pub async fn cmd_fetch_model(settings: &Settings) -> Result<()> {
    let artifact = &settings.artifact;

    println!("📦 Model file: {}", artifact.path.display());

    let status = ensure_model_artifact(artifact)
        .await
        .with_context(|| format!("Failed to download model from {}", artifact.url))?;

    match status {
        ArtifactStatus::AlreadyPresent => println!("✅ Already present, nothing to do."),
        ArtifactStatus::Downloaded { bytes } => {
            println!("✅ Model downloaded ({:.1} MB)", bytes as f64 / 1_048_576.0)
        }
    }

    Ok(())
}
