pub mod interface;
pub mod simulated;

use std::future::Future;
use std::time::Duration;

use interface::SubmissionError;

/// Awaits a gateway call, failing with `TimedOut` once `timeout` elapses.
/// `None` waits indefinitely.
pub async fn with_timeout<T, F>(call: F, timeout: Option<Duration>) -> Result<T, SubmissionError>
where
    F: Future<Output = Result<T, SubmissionError>>,
{
    match timeout {
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => Err(SubmissionError::TimedOut(limit)),
        },
        None => call.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_timeout_elapses_before_slow_call() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, SubmissionError>(())
        };

        let result = with_timeout(slow, Some(Duration::from_secs(1))).await;
        assert_eq!(result, Err(SubmissionError::TimedOut(Duration::from_secs(1))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_timeout_waits_for_result() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, SubmissionError>(42)
        };

        assert_eq!(with_timeout(slow, None).await, Ok(42));
    }
}
