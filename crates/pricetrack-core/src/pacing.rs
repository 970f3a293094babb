//! Randomized human-like pacing between page actions.

use std::time::Duration;

use parking_lot::Mutex;
use pricetrack_browser::{BrowserError, BrowserPage};
use pricetrack_config::PacingConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

/// Draws delays and pointer targets from a shared RNG.
pub struct Pacer {
    rng: Mutex<StdRng>,
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new()
    }
}

impl Pacer {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Deterministic sequence, for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Uniform value in `[min, max]`; `min` when the range is empty.
    fn between<T>(&self, min: T, max: T) -> T
    where
        T: rand::distr::uniform::SampleUniform + PartialOrd + Copy,
    {
        if max <= min {
            return min;
        }
        self.rng.lock().random_range(min..=max)
    }

    /// Sleep for a random duration in `[min_ms, max_ms]`.
    pub async fn pause(&self, min_ms: u64, max_ms: u64) {
        let ms = self.between(min_ms, max_ms);
        if ms > 0 {
            trace!("Pausing {} ms", ms);
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }

    /// Settle, then move the pointer around and scroll the page.
    pub async fn interact(
        &self,
        page: &dyn BrowserPage,
        pacing: &PacingConfig,
    ) -> Result<(), BrowserError> {
        self.pause(pacing.settle_min_ms, pacing.settle_max_ms).await;

        for _ in 0..pacing.mouse_moves {
            let x = self.between(pacing.mouse_x_min, pacing.mouse_x_max);
            let y = self.between(pacing.mouse_y_min, pacing.mouse_y_max);
            let steps = self.between(pacing.move_steps_min, pacing.move_steps_max);
            page.mouse_move(f64::from(x), f64::from(y), steps).await?;
            self.pause(pacing.move_pause_min_ms, pacing.move_pause_max_ms)
                .await;
        }

        for _ in 0..pacing.scrolls {
            let delta = self.between(pacing.scroll_min_px, pacing.scroll_max_px);
            page.mouse_wheel(0.0, f64::from(delta)).await?;
            self.pause(pacing.scroll_pause_min_ms, pacing.scroll_pause_max_ms)
                .await;
        }

        Ok(())
    }
}
