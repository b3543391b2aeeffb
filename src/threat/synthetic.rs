use super::classifier::ConjunctionEvent;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Stochastic generator producing plausible conjunction events when no
/// authoritative data is available, so the triage pipeline stays exercised.
///
/// The randomness source is injected so runs are reproducible in tests.
#[derive(Debug)]
pub struct SyntheticGenerator<R: Rng> {
    rng: R,
    /// Per-check probability that an event is emitted at all.
    acceptance: f64,
}

impl SyntheticGenerator<StdRng> {
    /// Creates a generator seeded from the operating system.
    pub fn new(acceptance: f64) -> Self {
        Self::with_rng(acceptance, StdRng::from_os_rng())
    }

    /// Creates a deterministic generator from a fixed seed.
    pub fn seeded(acceptance: f64, seed: u64) -> Self {
        Self::with_rng(acceptance, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SyntheticGenerator<R> {
    pub fn with_rng(acceptance: f64, rng: R) -> Self { Self { rng, acceptance } }

    /// Rolls one detection check for the given object.
    ///
    /// With the configured acceptance probability, emits an event with a
    /// miss distance of 50-1050 m, a time-to-event of 1-25 h and a
    /// probability derived from the miss distance, clamped to [0.1, 0.9].
    /// Events are tagged as simulated for downstream provenance.
    pub fn check(&mut self, object_id: u64) -> Option<ConjunctionEvent> {
        if self.acceptance <= 0.0 || !self.rng.random_bool(self.acceptance) {
            return None;
        }
        let miss_distance_m: f64 = self.rng.random_range(50.0..1050.0);
        let time_to_event = self.rng.random_range(3600.0..90_000.0);
        let probability = (1000.0 / miss_distance_m).clamp(0.1, 0.9);
        Some(ConjunctionEvent {
            object_id,
            other_object: None,
            time_to_event,
            miss_distance_m,
            probability,
            simulated: true,
        })
    }
}
