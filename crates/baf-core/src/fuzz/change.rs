//! Value changes on existing keys.
//!
//! For `how_many` in 1..=n (n = number of original keys), four trials each
//! overwrite `how_many` keys of a fresh copy with generated values. Keys are
//! drawn uniformly *with replacement* from the original key set, so a trial
//! may touch fewer than `how_many` distinct keys. The key set of every
//! variant equals the original key set.

use rand::{Rng, RngCore};
use serde_json::{Map, Value};
use tracing::debug;

use super::{PayloadGenerator, Strategy, Variant};

/// Independent trials per changed-key count.
pub const TRIALS_PER_COUNT: usize = 4;

/// Number of change variants for `key_count` keys (4n).
pub fn change_variant_count(key_count: usize) -> usize {
    key_count.saturating_mul(TRIALS_PER_COUNT)
}

/// Lazy iterator over change variants.
pub struct ChangeVariants<'a> {
    original: &'a Map<String, Value>,
    keys: Vec<&'a String>,
    generator: &'a mut dyn PayloadGenerator,
    rng: &'a mut dyn RngCore,
    how_many: usize,
    trial: usize,
    iteration: usize,
}

impl<'a> ChangeVariants<'a> {
    pub fn new(
        original: &'a Map<String, Value>,
        generator: &'a mut dyn PayloadGenerator,
        rng: &'a mut dyn RngCore,
    ) -> Self {
        Self {
            original,
            keys: original.keys().collect(),
            generator,
            rng,
            how_many: 1,
            trial: 1,
            iteration: 0,
        }
    }
}

impl Iterator for ChangeVariants<'_> {
    type Item = Variant;

    fn next(&mut self) -> Option<Variant> {
        if self.how_many > self.keys.len() {
            return None;
        }

        let mut payload = self.original.clone();
        for n in 0..self.how_many {
            let key = self.keys[self.rng.gen_range(0..self.keys.len())];
            let value = self.generator.generate_random_payload(None);
            debug!(item = n, key = %key, "Changing item in the payload");
            payload.insert(key.clone(), value);
        }

        self.iteration += 1;
        let variant = Variant {
            strategy: Strategy::Change,
            iteration: self.iteration,
            payload: Value::Object(payload),
        };

        self.trial += 1;
        if self.trial > TRIALS_PER_COUNT {
            self.trial = 1;
            self.how_many += 1;
        }

        Some(variant)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = change_variant_count(self.keys.len()) - self.iteration;
        (remaining, Some(remaining))
    }
}
