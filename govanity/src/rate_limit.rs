//! GitHub API rate limit reporting.
//!
//! Owner scans cost one request per owner plus one per repository whose
//! primary language is not Go. Unauthenticated clients only get 60 requests
//! an hour, so the remaining quota is reported up front. Nothing here waits
//! or retries.

use octocrab::Octocrab;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Remaining requests below which a warning is logged.
const LOW_REMAINING_THRESHOLD: u32 = 10;

/// Rate limit information for the core API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,
    /// Unix timestamp when the rate limit resets.
    pub reset: u64,
    /// Total requests allowed per window.
    pub limit: u32,
}

impl RateLimitInfo {
    /// Returns true if the remaining quota is nearly exhausted.
    #[must_use]
    pub fn is_low(&self) -> bool {
        self.remaining < LOW_REMAINING_THRESHOLD
    }
}

/// Checks the current rate limit status for the core API.
///
/// # Errors
///
/// Returns an error if the rate limit API call fails.
pub async fn check_core_rate_limit(octocrab: &Octocrab) -> Result<RateLimitInfo, octocrab::Error> {
    let rate_limit = octocrab.ratelimit().get().await?;
    let core = &rate_limit.resources.core;

    Ok(RateLimitInfo {
        remaining: core.remaining as u32,
        reset: core.reset,
        limit: core.limit as u32,
    })
}

/// Logs the remaining core API quota.
///
/// Failures to fetch the quota are only logged at debug level; the run
/// carries on either way.
pub async fn report_core_rate_limit(
    octocrab: &Octocrab,
    authenticated: bool,
    cancel: &CancellationToken,
) {
    let result = tokio::select! {
        biased;
        () = cancel.cancelled() => return,
        result = check_core_rate_limit(octocrab) => result,
    };

    match result {
        Ok(info) => log_rate_limit(&info, authenticated),
        Err(e) => debug!(error = %e, "Failed to check rate limit"),
    }
}

fn log_rate_limit(info: &RateLimitInfo, authenticated: bool) {
    if !info.is_low() {
        info!(
            remaining = info.remaining,
            limit = info.limit,
            "GitHub API quota"
        );
        return;
    }

    if authenticated {
        warn!(
            remaining = info.remaining,
            reset = info.reset,
            "GitHub API quota nearly exhausted, owner scans may fail"
        );
    } else {
        warn!(
            remaining = info.remaining,
            reset = info.reset,
            "GitHub API quota nearly exhausted, provide a token to raise the limit"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_low_quota() {
        let info = RateLimitInfo {
            remaining: 3,
            reset: 1234567890,
            limit: 60,
        };
        assert!(info.is_low());
    }

    #[test]
    fn plenty_of_quota_is_not_low() {
        let info = RateLimitInfo {
            remaining: 4999,
            reset: 1234567890,
            limit: 5000,
        };
        assert!(!info.is_low());
    }
}
