use std::future::Future;
use std::time::{Duration, Instant};

use crate::error::{Result, SmokeError};

/// Bounded condition poller associated with a browser session.
///
/// Polls until the condition holds or the timeout elapses, then fails with
/// a [`SmokeError::Timeout`] naming the condition.
#[derive(Debug, Clone, Copy)]
pub struct WaitPolicy {
	timeout: Duration,
	interval: Duration,
}

impl WaitPolicy {
	pub fn new(timeout: Duration, interval: Duration) -> Self {
		Self { timeout, interval }
	}

	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	pub fn interval(&self) -> Duration {
		self.interval
	}

	/// Polls `probe` until it reports true.
	///
	/// Errors from the probe itself propagate immediately; only an expired
	/// deadline produces a timeout.
	pub async fn until<F, Fut>(&self, condition: &str, mut probe: F) -> Result<()>
	where
		F: FnMut() -> Fut,
		Fut: Future<Output = Result<bool>>,
	{
		let deadline = Instant::now() + self.timeout;
		loop {
			if probe().await? {
				return Ok(());
			}
			if Instant::now() >= deadline {
				return Err(self.timed_out(condition));
			}
			tokio::time::sleep(self.interval).await;
		}
	}

	pub(crate) fn timed_out(&self, condition: &str) -> SmokeError {
		SmokeError::Timeout {
			ms: self.timeout.as_millis() as u64,
			condition: condition.to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	#[tokio::test]
	async fn until_returns_once_condition_holds() {
		let policy = WaitPolicy::new(Duration::from_secs(1), Duration::from_millis(1));
		let calls = Cell::new(0u32);

		policy
			.until("third poll", || {
				let calls = &calls;
				async move {
					calls.set(calls.get() + 1);
					Ok(calls.get() >= 3)
				}
			})
			.await
			.unwrap();

		assert_eq!(calls.get(), 3);
	}

	#[tokio::test]
	async fn until_times_out_and_names_the_condition() {
		let policy = WaitPolicy::new(Duration::from_millis(30), Duration::from_millis(5));

		let err = policy
			.until("page title to contain \"сказки\"", || async { Ok(false) })
			.await
			.unwrap_err();

		match err {
			SmokeError::Timeout { ms, condition } => {
				assert_eq!(ms, 30);
				assert!(condition.contains("сказки"));
			}
			other => panic!("expected timeout, got {other:?}"),
		}
	}

	#[tokio::test]
	async fn until_propagates_probe_errors() {
		let policy = WaitPolicy::new(Duration::from_secs(1), Duration::from_millis(1));

		let err = policy
			.until("never reached", || async {
				Err(SmokeError::SessionStart("probe broke".to_string()))
			})
			.await
			.unwrap_err();

		assert!(matches!(err, SmokeError::SessionStart(_)));
	}
}
