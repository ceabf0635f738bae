//! Retry with exponential backoff for mapping calls.
//!
//! Transient failures (network errors, rate limiting, 5xx) are retried up to
//! a fixed number of attempts. Sleeping goes through a [`Sleeper`] so tests
//! can run the loop without real delays.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tracing::warn;

use crate::domain::{GeoPoint, RouteInfo};

use super::error::MapsError;
use super::service::MappingService;

/// Retry strategy for mapping calls.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts per call, including the first (must be >= 1).
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_backoff: Duration,
    /// Upper bound on any single delay.
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay before retry number `retry` (1-based), doubling each time.
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(2),
        }
    }
}

/// Something that can wait.
#[allow(async_fn_in_trait)]
pub trait Sleeper {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Records requested delays instead of sleeping.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays requested so far, in order.
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().map(|d| d.clone()).unwrap_or_default()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        if let Ok(mut delays) = self.delays.lock() {
            delays.push(duration);
        }
    }
}

/// Run `call` until it succeeds, fails permanently, or attempts run out.
pub async fn with_retry<T, F, Fut, S>(
    policy: &RetryPolicy,
    sleeper: &S,
    operation: &str,
    mut call: F,
) -> Result<T, MapsError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, MapsError>>,
    S: Sleeper,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < max_attempts => {
                let delay = policy.backoff(attempt);
                warn!(
                    operation,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "transient mapping failure, retrying"
                );
                sleeper.sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// A mapping service whose calls are retried according to a policy.
#[derive(Debug, Clone)]
pub struct RetryingMaps<M, S = TokioSleeper> {
    inner: M,
    policy: RetryPolicy,
    sleeper: S,
}

impl<M: MappingService> RetryingMaps<M, TokioSleeper> {
    /// Wrap `inner`, sleeping on the tokio timer between attempts.
    pub fn new(inner: M, policy: RetryPolicy) -> Self {
        Self::with_sleeper(inner, policy, TokioSleeper)
    }
}

impl<M: MappingService, S: Sleeper> RetryingMaps<M, S> {
    /// Wrap `inner` with a custom sleeper.
    pub fn with_sleeper(inner: M, policy: RetryPolicy, sleeper: S) -> Self {
        Self {
            inner,
            policy,
            sleeper,
        }
    }

    /// The wrapped service.
    pub fn inner(&self) -> &M {
        &self.inner
    }

    /// The sleeper used between attempts.
    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }
}

impl<M: MappingService, S: Sleeper> MappingService for RetryingMaps<M, S> {
    async fn geocode(&self, text: &str) -> Result<Option<GeoPoint>, MapsError> {
        with_retry(&self.policy, &self.sleeper, "geocode", || {
            self.inner.geocode(text)
        })
        .await
    }

    async fn nearby_places(
        &self,
        center: &GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<GeoPoint>, MapsError> {
        with_retry(&self.policy, &self.sleeper, "nearby_places", || {
            self.inner.nearby_places(center, radius_km)
        })
        .await
    }

    async fn route(&self, from: &GeoPoint, to: &GeoPoint) -> Result<Option<RouteInfo>, MapsError> {
        with_retry(&self.policy, &self.sleeper, "route", || {
            self.inner.route(from, to)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::MockMapsClient;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn mock() -> MockMapsClient {
        MockMapsClient::new("data/mock_places.json").unwrap()
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_millis(250));
        assert_eq!(policy.backoff(2), Duration::from_millis(500));
        assert_eq!(policy.backoff(3), Duration::from_secs(1));
        assert_eq!(policy.backoff(4), Duration::from_secs(2));
        assert_eq!(policy.backoff(10), Duration::from_secs(2));
        assert_eq!(policy.backoff(40), Duration::from_secs(2));
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let policy = RetryPolicy::default();
        let sleeper = RecordingSleeper::new();
        let calls = AtomicU32::new(0);

        let result = with_retry(&policy, &sleeper, "test", || async {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                Err(MapsError::RateLimited)
            } else {
                Ok(n)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            sleeper.delays(),
            vec![Duration::from_millis(250), Duration::from_millis(500)]
        );
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let policy = RetryPolicy::default();
        let sleeper = RecordingSleeper::new();
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = with_retry(&policy, &sleeper, "test", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(MapsError::Api {
                status: 503,
                message: "unavailable".into(),
            })
        })
        .await;

        assert!(matches!(result, Err(MapsError::Api { status: 503, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(sleeper.delays().len(), 2);
    }

    #[tokio::test]
    async fn permanent_errors_are_not_retried() {
        let policy = RetryPolicy::default();
        let sleeper = RecordingSleeper::new();
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = with_retry(&policy, &sleeper, "test", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(MapsError::Unauthorized)
        })
        .await;

        assert!(matches!(result, Err(MapsError::Unauthorized)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(sleeper.delays().is_empty());
    }

    #[tokio::test]
    async fn no_retry_policy_makes_one_attempt() {
        let sleeper = RecordingSleeper::new();
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = with_retry(&RetryPolicy::none(), &sleeper, "test", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(MapsError::RateLimited)
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn wrapper_retries_mock_failures() {
        let maps = RetryingMaps::with_sleeper(mock(), RetryPolicy::default(), RecordingSleeper::new());
        maps.inner().fail_next(2);

        let ams = maps.geocode("Amsterdam").await.unwrap();
        assert!(ams.is_some());
        assert_eq!(maps.inner().geocode_calls(), 3);
        assert_eq!(maps.sleeper().delays().len(), 2);
    }

    #[tokio::test]
    async fn wrapper_surfaces_exhausted_failures() {
        let maps = RetryingMaps::with_sleeper(mock(), RetryPolicy::default(), RecordingSleeper::new());
        let ams = maps.geocode("Amsterdam").await.unwrap().unwrap();
        maps.inner().fail_next(5);

        let result = maps.route(&ams, &ams).await;
        assert!(result.is_err());
        assert_eq!(maps.inner().call_count(), 4);
    }
}
