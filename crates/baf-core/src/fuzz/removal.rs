//! Power-set removal.
//!
//! With `n` keys captured in payload order, the strategy walks every boolean
//! tuple of length `n` in the lexicographic order of the Cartesian product
//! `{true, false}ⁿ` (true first), skipping the final all-false tuple. For each
//! tuple it emits a copy of the payload with every flagged key deleted, so the
//! sequence has exactly 2ⁿ − 1 variants and starts with the empty object.
//!
//! The sequence is exponential in `n`; it is produced lazily and never capped.

use serde_json::{Map, Value};
use tracing::debug;

use super::{Strategy, Variant};

/// Lazy iterator over removal variants.
pub struct RemovalVariants<'a> {
    original: &'a Map<String, Value>,
    /// `true` = delete the key at this position.
    flags: Vec<bool>,
    iteration: usize,
    done: bool,
}

impl<'a> RemovalVariants<'a> {
    pub fn new(original: &'a Map<String, Value>) -> Self {
        Self {
            original,
            flags: vec![true; original.len()],
            iteration: 0,
            done: false,
        }
    }

    /// Step to the next tuple: the rightmost `true` becomes `false` and
    /// everything after it resets to `true`.
    fn advance(&mut self) {
        match self.flags.iter().rposition(|&f| f) {
            Some(pos) => {
                self.flags[pos] = false;
                for flag in &mut self.flags[pos + 1..] {
                    *flag = true;
                }
            }
            None => self.done = true,
        }
    }
}

impl Iterator for RemovalVariants<'_> {
    type Item = Variant;

    fn next(&mut self) -> Option<Variant> {
        // The all-false tuple removes nothing and is excluded.
        if self.done || self.flags.iter().all(|&f| !f) {
            self.done = true;
            return None;
        }

        let payload: Map<String, Value> = self
            .original
            .iter()
            .zip(&self.flags)
            .filter(|(_, remove)| !**remove)
            .map(|((key, value), _)| (key.clone(), value.clone()))
            .collect();

        self.iteration += 1;
        debug!(
            iteration = self.iteration,
            removed = self.original.len() - payload.len(),
            "Removing items from payload"
        );

        self.advance();

        Some(Variant {
            strategy: Strategy::Remove,
            iteration: self.iteration,
            payload: Value::Object(payload),
        })
    }
}

/// Number of removal variants for `key_count` keys (2ⁿ − 1), saturating.
pub fn removal_variant_count(key_count: usize) -> u128 {
    if key_count >= 128 {
        u128::MAX
    } else {
        (1u128 << key_count) - 1
    }
}
