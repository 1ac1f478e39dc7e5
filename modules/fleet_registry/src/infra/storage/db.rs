//! Database connection bootstrap

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;
use crate::contract::error::StoreError;

use super::retry;

/// Opens a connection pool using the configured DSN and retry policy.
///
/// A missing connection string is a configuration error raised before any
/// network activity; transient connect failures go through the retry
/// policy.
pub async fn connect(
    config: &AppConfig,
    cancel: &CancellationToken,
) -> Result<DatabaseConnection, StoreError> {
    let dsn = config.connection_string()?;

    let mut options = ConnectOptions::new(dsn);
    options
        .max_connections(config.database.max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(config.is_development());

    if config.is_development() {
        tracing::warn!("statement logging enabled; parameter values will appear in logs");
    }

    let conn = retry::with_retry(&config.database, cancel, || {
        let options = options.clone();
        async move { Database::connect(options).await }
    })
    .await?;

    tracing::info!("database connection established");
    Ok(conn)
}
