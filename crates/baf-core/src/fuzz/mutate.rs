//! Pluggable payload mutators.
//!
//! The mutate strategy has no built-in transformation: a default
//! [`MutatorRegistry`] is empty and yields zero variants. Embedders register
//! [`PayloadMutator`]s to extend it; their variants run in registration order.

use rand::RngCore;
use serde_json::Value;
use tracing::debug;

use super::{Strategy, Variant};

/// A custom transformation of the original payload.
///
/// Mutators receive the original by shared reference and must return owned
/// variants; they may accept any JSON root, not only objects.
pub trait PayloadMutator {
    fn name(&self) -> &str;

    fn mutate(&self, original: &Value, rng: &mut dyn RngCore) -> Vec<Value>;
}

#[derive(Default)]
pub struct MutatorRegistry {
    mutators: Vec<Box<dyn PayloadMutator>>,
}

impl MutatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, mutator: Box<dyn PayloadMutator>) {
        self.mutators.push(mutator);
    }

    pub fn len(&self) -> usize {
        self.mutators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutators.is_empty()
    }

    /// Collect the variants of every registered mutator, in registration order.
    pub fn variants(&self, original: &Value, rng: &mut dyn RngCore) -> Vec<Variant> {
        let mut out = Vec::new();
        for mutator in &self.mutators {
            let produced = mutator.mutate(original, rng);
            debug!(mutator = mutator.name(), count = produced.len(), "Mutated payload");
            out.extend(produced);
        }
        out.into_iter()
            .enumerate()
            .map(|(i, payload)| Variant {
                strategy: Strategy::Mutate,
                iteration: i + 1,
                payload,
            })
            .collect()
    }
}

impl std::fmt::Debug for MutatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.mutators.iter().map(|m| m.name()))
            .finish()
    }
}
