use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

use crate::error::{Result, SearchError};

/// Token bucket limiter for NCBI E-utilities
///
/// NCBI allows 3 requests per second without an API key and 10 with one;
/// exceeding that can get the caller's IP blocked.
///
/// ```
/// use citesearch_client::rate_limit::RateLimiter;
///
/// let limiter = RateLimiter::new(3.0);
/// let shared = limiter.clone(); // clones share one bucket
/// ```
#[derive(Clone)]
pub struct RateLimiter {
    bucket: Arc<Mutex<TokenBucket>>,
}

struct TokenBucket {
    tokens: f64,
    capacity: f64,
    refill_rate: f64,
    last_refill: Instant,
}

impl TokenBucket {
    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.refill_rate).min(self.capacity);
        self.last_refill = now;
    }

    /// Take a token, or report how long until one is available
    fn try_take(&mut self) -> Option<Duration> {
        self.refill();
        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            None
        } else {
            let deficit = 1.0 - self.tokens;
            Some(Duration::from_secs_f64(deficit / self.refill_rate))
        }
    }
}

impl RateLimiter {
    /// Create a limiter allowing `rate` requests per second (capacity at least one)
    pub fn new(rate: f64) -> Self {
        let capacity = rate.max(1.0);
        Self {
            bucket: Arc::new(Mutex::new(TokenBucket {
                tokens: capacity,
                capacity,
                refill_rate: rate,
                last_refill: Instant::now(),
            })),
        }
    }

    /// Wait until a token is available and consume it
    #[instrument(skip(self))]
    pub async fn acquire(&self) -> Result<()> {
        let wait = self.bucket.lock().await.try_take();

        let Some(wait) = wait else {
            debug!("Token acquired immediately");
            return Ok(());
        };

        debug!(wait_ms = wait.as_millis(), "Sleeping to respect rate limit");
        sleep(wait).await;

        match self.bucket.lock().await.try_take() {
            None => Ok(()),
            Some(_) => {
                warn!("No token available after waiting");
                Err(SearchError::RateLimitExceeded)
            }
        }
    }

    /// Whether a token could be taken right now, without consuming it
    pub async fn check_available(&self) -> bool {
        let mut bucket = self.bucket.lock().await;
        bucket.refill();
        bucket.tokens >= 1.0
    }

    pub async fn rate(&self) -> f64 {
        self.bucket.lock().await.refill_rate
    }
}
