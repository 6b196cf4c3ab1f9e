//! Delay computation between retry attempts.

use std::time::Duration;

use rand::Rng;

use crate::config::BackoffPolicy;

/// Calculate the delay to wait before the given attempt.
///
/// `attempt` is the number of the upcoming attempt; the loop's first
/// invocation is attempt 1 and incurs no delay.
pub fn delay_before_attempt(
    policy: BackoffPolicy,
    attempt: u32,
    base_ms: u64,
    max_ms: u64,
) -> Duration {
    if attempt <= 1 {
        return Duration::from_millis(0);
    }

    match policy {
        BackoffPolicy::Fixed => Duration::from_millis(base_ms),
        BackoffPolicy::Exponential => {
            let exponential_base = 2u64.saturating_pow(attempt - 2);
            let delay_ms = base_ms.saturating_mul(exponential_base);
            let capped_delay = delay_ms.min(max_ms);

            // Jitter (0 to 10% of the delay) to avoid synchronized retries
            let jitter_range = capped_delay / 10;
            let jitter = if jitter_range > 0 {
                rand::thread_rng().gen_range(0..jitter_range)
            } else {
                0
            };

            Duration::from_millis(capped_delay + jitter)
        }
    }
}
