//! Bounded retry for transient database failures
//!
//! Only momentary connectivity errors are retried; constraint violations
//! and other terminal errors surface immediately through [`classify`].

use std::future::Future;
use std::time::Duration;

use sea_orm::{DbErr, SqlErr};
use tokio_util::sync::CancellationToken;

use crate::config::DatabaseConfig;
use crate::contract::error::StoreError;

/// Whether an error is a momentary connectivity failure worth retrying.
pub fn is_transient(err: &DbErr) -> bool {
    matches!(err, DbErr::Conn(_) | DbErr::ConnectionAcquire(_))
}

/// Maps a terminal database error onto the store error taxonomy.
pub fn classify(err: DbErr) -> StoreError {
    if let Some(SqlErr::UniqueConstraintViolation(message)) = err.sql_err() {
        return StoreError::UniqueViolation(message);
    }
    let text = err.to_string();
    if text.to_ascii_lowercase().contains("check constraint") {
        return StoreError::CheckViolation(text);
    }
    StoreError::Database(err)
}

/// Runs an operation, retrying transient failures with increasing delay.
///
/// The delay doubles per attempt and is capped by the configured maximum.
/// Cancellation is honored both during an attempt and while waiting
/// between attempts.
pub async fn with_retry<T, F, Fut>(
    policy: &DatabaseConfig,
    cancel: &CancellationToken,
    mut operation: F,
) -> Result<T, StoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    let mut attempt: u32 = 0;
    loop {
        if cancel.is_cancelled() {
            return Err(StoreError::Cancelled);
        }
        attempt += 1;
        let outcome = tokio::select! {
            _ = cancel.cancelled() => return Err(StoreError::Cancelled),
            outcome = operation() => outcome,
        };
        match outcome {
            Ok(value) => return Ok(value),
            Err(err) if is_transient(&err) => {
                if attempt > policy.max_retries {
                    return Err(StoreError::TransientExhausted {
                        attempts: attempt,
                        source: err,
                    });
                }
                let delay = backoff_delay(attempt, policy.max_retry_delay);
                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "transient database failure, retrying"
                );
                tokio::select! {
                    _ = cancel.cancelled() => return Err(StoreError::Cancelled),
                    _ = tokio::time::sleep(delay) => {}
                }
            }
            Err(err) => return Err(classify(err)),
        }
    }
}

fn backoff_delay(attempt: u32, cap: Duration) -> Duration {
    let exponent = attempt.saturating_sub(1).min(16);
    Duration::from_secs(1u64 << exponent).min(cap)
}

#[cfg(test)]
mod tests {
    use sea_orm::RuntimeErr;

    use super::*;

    fn transient() -> DbErr {
        DbErr::Conn(RuntimeErr::Internal("connection refused".to_owned()))
    }

    #[test]
    fn only_connectivity_errors_are_transient() {
        assert!(is_transient(&transient()));
        assert!(is_transient(&DbErr::ConnectionAcquire(
            sea_orm::ConnAcquireErr::Timeout
        )));
        assert!(!is_transient(&DbErr::Custom("boom".to_owned())));
    }

    #[test]
    fn check_constraint_messages_classify_as_check_violations() {
        let err = DbErr::Custom("CHECK constraint failed: Veiculos".to_owned());
        assert!(matches!(classify(err), StoreError::CheckViolation(_)));

        let err = DbErr::Custom("Check constraint 'veiculos_chk_1' is violated.".to_owned());
        assert!(matches!(classify(err), StoreError::CheckViolation(_)));
    }

    #[test]
    fn other_errors_pass_through_unclassified() {
        let err = DbErr::Custom("boom".to_owned());
        assert!(matches!(classify(err), StoreError::Database(_)));
    }

    #[test]
    fn backoff_doubles_up_to_the_cap() {
        let cap = Duration::from_secs(5);
        assert_eq!(backoff_delay(1, cap), Duration::from_secs(1));
        assert_eq!(backoff_delay(2, cap), Duration::from_secs(2));
        assert_eq!(backoff_delay(3, cap), Duration::from_secs(4));
        assert_eq!(backoff_delay(4, cap), Duration::from_secs(5));
        assert_eq!(backoff_delay(10, cap), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failures_are_retried_until_success() {
        let policy = DatabaseConfig::default();
        let cancel = CancellationToken::new();
        let mut calls = 0u32;

        let result = with_retry(&policy, &cancel, || {
            calls += 1;
            let outcome = if calls < 3 { Err(transient()) } else { Ok(calls) };
            async move { outcome }
        })
        .await
        .unwrap();

        assert_eq!(result, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn the_retry_budget_is_a_hard_ceiling() {
        let policy = DatabaseConfig::default();
        let cancel = CancellationToken::new();
        let mut calls = 0u32;

        let err = with_retry(&policy, &cancel, || {
            calls += 1;
            async { Err::<(), _>(transient()) }
        })
        .await
        .unwrap_err();

        // Initial attempt plus three retries.
        assert_eq!(calls, 4);
        assert!(matches!(
            err,
            StoreError::TransientExhausted { attempts: 4, .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn non_transient_errors_are_never_retried() {
        let policy = DatabaseConfig::default();
        let cancel = CancellationToken::new();
        let mut calls = 0u32;

        let err = with_retry(&policy, &cancel, || {
            calls += 1;
            async { Err::<(), _>(DbErr::Custom("boom".to_owned())) }
        })
        .await
        .unwrap_err();

        assert_eq!(calls, 1);
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn a_cancelled_token_short_circuits_the_wait() {
        let policy = DatabaseConfig::default();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = with_retry(&policy, &cancel, || async { Ok::<_, DbErr>(1) })
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Cancelled));
    }
}
