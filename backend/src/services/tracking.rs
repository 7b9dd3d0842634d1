//! Random source for the synthetic yield series
//!
//! The only effectful piece of rendering: everything else is a pure function
//! of session state and reference data.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::{tracking_series, Granularity, YieldSample};

/// Shared random number generator for tracking renders
pub struct SeriesSource {
    rng: Mutex<StdRng>,
}

impl SeriesSource {
    /// Seeded source when a seed is configured, entropy otherwise
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => {
                tracing::info!(seed, "Tracking series seeded from configuration");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Run `f` with exclusive access to the generator.
    /// Must not be called across an `.await`.
    pub fn draw<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        // A panic mid-draw leaves the generator usable
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut *rng)
    }

    /// Fresh samples for one granularity
    pub fn series(&self, granularity: Granularity) -> Vec<YieldSample> {
        self.draw(|rng| tracking_series(granularity, rng))
    }
}
