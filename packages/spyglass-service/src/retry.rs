use serde_json::Value;
use time::OffsetDateTime;
use tokio::sync::watch;
use tracing::{info, warn};

use spyglass_domain::RawHit;

use crate::{Error, Result, SpyglassService};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
	Success,
	CapacityError,
	OtherError,
}

/// One backend call in the retry sequence. Immutable once recorded; the
/// sequence for a request forms the diagnostic audit trail on the response.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SearchAttempt {
	pub attempt_number: u32,
	pub indices: Vec<String>,
	pub outcome: AttemptOutcome,
	#[serde(with = "crate::time_serde")]
	pub at: OffsetDateTime,
}

impl SpyglassService {
	/// Repeats the backend call, shrinking the index pattern on capacity
	/// errors while keeping priority entries at the front, until success,
	/// attempt exhaustion, or a non-retryable error. No time-based backoff:
	/// only the pattern size changes between attempts.
	pub(crate) async fn execute_with_retry(
		&self,
		mut pattern: Vec<String>,
		body: &Value,
		cancel: Option<&watch::Receiver<bool>>,
	) -> Result<(Vec<RawHit>, Vec<SearchAttempt>)> {
		let mut attempts: Vec<SearchAttempt> = Vec::new();

		loop {
			if cancelled(cancel) {
				return Err(Error::Cancelled);
			}

			let attempt_number = attempts.len() as u32;

			if attempt_number >= self.cfg.retry.max_attempts {
				return Err(Error::ExhaustedRetries { attempts: attempt_number });
			}

			let result = self.providers.backend.search(&self.cfg.backend, &pattern, body).await;

			match result {
				Ok(hits) => {
					attempts.push(record(attempt_number, &pattern, AttemptOutcome::Success));
					info!(
						attempt = attempt_number,
						indices = pattern.len(),
						hits = hits.len(),
						"Backend query succeeded."
					);

					return Ok((hits, attempts));
				},
				Err(err) if err.is_capacity() => {
					attempts.push(record(attempt_number, &pattern, AttemptOutcome::CapacityError));

					// A single index should never exceed backend capacity; if
					// it does, there is nothing left to shrink.
					if pattern.len() <= 1 {
						return Err(Error::SearchFailed {
							message: format!("Capacity error on a single-index pattern: {err}"),
						});
					}

					let kept = shrink_len(pattern.len(), self.cfg.retry.reduction_factor);

					warn!(
						attempt = attempt_number,
						from = pattern.len(),
						to = kept,
						"Backend capacity error; shrinking the index pattern."
					);
					pattern.truncate(kept);
				},
				Err(err) => {
					attempts.push(record(attempt_number, &pattern, AttemptOutcome::OtherError));

					return Err(Error::SearchFailed { message: err.to_string() });
				},
			}
		}
	}
}

/// Entries kept after a capacity shrink. Truncation keeps the front of the
/// pattern, so priority-bucket indices are always dropped last; the result
/// is strictly smaller than `len` and never empty.
pub fn shrink_len(len: usize, reduction_factor: f64) -> usize {
	let kept = ((len as f64) * reduction_factor).ceil() as usize;

	kept.clamp(1, len.saturating_sub(1).max(1))
}

fn record(attempt_number: u32, pattern: &[String], outcome: AttemptOutcome) -> SearchAttempt {
	SearchAttempt {
		attempt_number,
		indices: pattern.to_vec(),
		outcome,
		at: OffsetDateTime::now_utc(),
	}
}

fn cancelled(cancel: Option<&watch::Receiver<bool>>) -> bool {
	cancel.map(|rx| *rx.borrow()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn shrink_is_strictly_decreasing() {
		let mut len = 50;

		while len > 1 {
			let next = shrink_len(len, 0.5);

			assert!(next < len);
			assert!(next >= 1);
			len = next;
		}
	}

	#[test]
	fn shrink_follows_reduction_factor() {
		assert_eq!(shrink_len(50, 0.5), 25);
		assert_eq!(shrink_len(25, 0.5), 13);
		assert_eq!(shrink_len(13, 0.5), 7);
		assert_eq!(shrink_len(2, 0.5), 1);
	}

	#[test]
	fn shrink_never_returns_zero() {
		assert_eq!(shrink_len(1, 0.5), 1);
		assert_eq!(shrink_len(2, 0.01), 1);
	}
}
