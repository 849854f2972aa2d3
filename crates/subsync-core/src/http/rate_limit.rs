//! Shared request budget for all hosting-API calls

use crate::error::{Error, Result};
use parking_lot::Mutex;
use tokio::sync::{Semaphore, SemaphorePermit};
use tokio::time::{Duration, Instant};

/// Caps in-flight requests and spaces out request starts.
///
/// Every request acquires a permit before it is sent and holds it until the
/// response body has been read. Start slots are reserved under a short lock
/// and awaited outside it, so waiters queue up in reservation order.
pub struct RateLimiter {
    permits: Semaphore,
    min_interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a limiter allowing `max_in_flight` concurrent requests
    pub fn new(max_in_flight: usize, min_interval: Duration) -> Self {
        Self {
            permits: Semaphore::new(max_in_flight.max(1)),
            min_interval,
            next_slot: Mutex::new(None),
        }
    }

    /// Wait for a permit and for this request's start slot
    pub async fn acquire(&self) -> Result<SemaphorePermit<'_>> {
        let permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| Error::Runtime(format!("Rate limiter closed: {}", e)))?;

        if !self.min_interval.is_zero() {
            let slot = self.reserve_slot();
            tokio::time::sleep_until(slot).await;
        }

        Ok(permit)
    }

    /// Permits currently free
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    fn reserve_slot(&self) -> Instant {
        let now = Instant::now();
        let mut next = self.next_slot.lock();
        let slot = match *next {
            Some(reserved) if reserved > now => reserved,
            _ => now,
        };
        *next = Some(slot + self.min_interval);
        slot
    }
}
