//! Shared helpers for integration tests
//!
//! Tests run against a scratch SQLite database file; the context code
//! path is identical to the MySQL deployment apart from the DSN.

use anyhow::Result;
use fleet_registry::{AppConfig, FleetContext};
use tempfile::TempDir;

/// Initializes test logging once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Configuration pointing at a fresh database file under `dir`.
pub fn test_config(dir: &TempDir) -> Result<AppConfig> {
    let dsn = format!("sqlite://{}/fleet.db?mode=rwc", dir.path().display());
    let yaml = format!("ConnectionStrings:\n  MySql: \"{dsn}\"\n");
    Ok(AppConfig::from_yaml(&yaml)?)
}

/// Opens a migrated context on a fresh database.
pub async fn migrated_context() -> Result<(FleetContext, TempDir)> {
    init_tracing();
    let dir = TempDir::new()?;
    let config = test_config(&dir)?;
    let ctx = FleetContext::connect(&config).await?;
    ctx.migrate().await?;
    Ok((ctx, dir))
}
