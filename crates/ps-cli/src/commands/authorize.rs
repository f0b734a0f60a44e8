//! Authorize command for the workout sync service.

use std::io::Write;

use anyhow::{Context, Result};

use ps_sync::WorkoutSync;

use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let client = config.sync_client()?.ok_or_else(|| {
        anyhow::anyhow!("workout sync is not configured (set PADEL_SYNC_ENDPOINT or config.toml)")
    })?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to initialize tokio runtime")?;
    runtime
        .block_on(client.request_authorization())
        .context("workout sync authorization failed")?;

    writeln!(writer, "Workout sync authorized.")?;
    Ok(())
}
