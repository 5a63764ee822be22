//! Deadline enforcement for external calls.

use std::future::Future;
use std::time::Duration;

use crate::error::ChatError;

/// Race `fut` against `deadline`.
///
/// Completes with the operation's own result if it settles first; otherwise
/// fails with [`ChatError::Timeout`] carrying `message`. The losing future is
/// dropped, which aborts an in-flight HTTP request rather than letting it run
/// to completion in the background. A failure inside `fut` propagates as soon
/// as it happens.
pub async fn with_timeout<F, T>(fut: F, deadline: Duration, message: &str) -> Result<T, ChatError>
where
    F: Future<Output = Result<T, ChatError>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_elapsed) => Err(ChatError::Timeout {
            message: message.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[tokio::test]
    async fn fast_operation_wins_the_race() {
        let result = with_timeout(
            async { Ok::<_, ChatError>(42) },
            Duration::from_millis(100),
            "too slow",
        )
        .await;
        assert_eq!(result.ok(), Some(42));
    }

    #[tokio::test]
    async fn slow_operation_yields_the_supplied_message() {
        let result = with_timeout(
            async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok::<_, ChatError>(42)
            },
            Duration::from_millis(10),
            "Timed out waiting for the chat API",
        )
        .await;
        match result {
            Err(ChatError::Timeout { message }) => {
                assert_eq!(message, "Timed out waiting for the chat API");
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn inner_failure_propagates_before_the_deadline() {
        let result: Result<u32, _> = with_timeout(
            async {
                Err(ChatError::Api {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: "boom".to_string(),
                })
            },
            Duration::from_secs(5),
            "unused",
        )
        .await;
        match result {
            Err(ChatError::Api { status, .. }) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }
}
