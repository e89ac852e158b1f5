//! Addition of random items.
//!
//! For `how_many` in 1..=3, three independent trials each insert `how_many`
//! generated entries into a fresh copy of the payload: nine variants whatever
//! the payload size. Every new key is checked against the copy as it stands,
//! including keys added earlier in the same trial.

use serde_json::{Map, Value};
use tracing::debug;

use super::{PayloadGenerator, Strategy, Variant};

/// Largest number of keys added in one trial.
pub const MAX_ADDED_ITEMS: usize = 3;

/// Independent trials per added-key count.
pub const TRIALS_PER_COUNT: usize = 3;

/// Total number of addition variants.
pub const ADDITION_VARIANT_COUNT: usize = MAX_ADDED_ITEMS * TRIALS_PER_COUNT;

/// Lazy iterator over addition variants.
pub struct AdditionVariants<'a> {
    original: &'a Map<String, Value>,
    generator: &'a mut dyn PayloadGenerator,
    how_many: usize,
    trial: usize,
    iteration: usize,
}

impl<'a> AdditionVariants<'a> {
    pub fn new(original: &'a Map<String, Value>, generator: &'a mut dyn PayloadGenerator) -> Self {
        Self {
            original,
            generator,
            how_many: 1,
            trial: 1,
            iteration: 0,
        }
    }
}

impl Iterator for AdditionVariants<'_> {
    type Item = Variant;

    fn next(&mut self) -> Option<Variant> {
        if self.how_many > MAX_ADDED_ITEMS {
            return None;
        }

        let mut payload = self.original.clone();
        for n in 0..self.how_many {
            let key = self.generator.generate_random_key_for_dict(&payload);
            let value = self.generator.generate_random_payload(None);
            debug!(item = n, key = %key, "Adding item into the payload");
            payload.insert(key, value);
        }

        self.iteration += 1;
        let variant = Variant {
            strategy: Strategy::Add,
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
        let remaining = ADDITION_VARIANT_COUNT - self.iteration;
        (remaining, Some(remaining))
    }
}
