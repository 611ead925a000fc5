use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

/// Politeness gate for outbound article requests.
///
/// A request may start no earlier than `delay` after the previous one
/// started and no earlier than `delay` after the previous one completed.
/// The gate is shared, so the spacing holds across all workers.
#[derive(Debug)]
pub struct Throttle {
    delay: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_slot: Mutex::new(None),
        }
    }

    /// Waits for the gate, runs `request`, then pushes the gate past its completion.
    pub async fn run<F, T>(&self, request: F) -> T
    where
        F: Future<Output = T>,
    {
        self.acquire().await;
        let output = request.await;
        self.release().await;
        output
    }

    async fn acquire(&self) {
        let mut slot = self.next_slot.lock().await;
        if let Some(at) = *slot {
            sleep_until(at).await;
        }
        *slot = Some(Instant::now() + self.delay);
    }

    async fn release(&self) {
        let mut slot = self.next_slot.lock().await;
        let after_completion = Instant::now() + self.delay;
        *slot = Some(match *slot {
            Some(at) if at > after_completion => at,
            _ => after_completion,
        });
    }
}
