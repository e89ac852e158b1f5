//! Payload mutation engine.
//!
//! Each strategy turns one original payload into a finite, ordered sequence of
//! [`Variant`]s. Every variant is built from its own deep copy of the original;
//! the original is only ever borrowed immutably.
//!
//! # Strategies
//!
//! - [`removal`]: power-set removal, one variant per non-empty subset of keys (2ⁿ − 1)
//! - [`addition`]: 1, 2 or 3 new non-colliding keys, three trials each (9)
//! - [`change`]: overwrite `how_many` randomly chosen keys, four trials per count (4n)
//! - [`mutate`]: registry of pluggable mutators, empty by default (0)
//!
//! Random keys and values come from a [`PayloadGenerator`]; key selection in
//! the change strategy draws from an injected `RngCore`, so a seeded source
//! makes every variant reproducible.

pub mod addition;
pub mod change;
pub mod mutate;
pub mod removal;
pub mod value_gen;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use addition::AdditionVariants;
pub use change::ChangeVariants;
pub use mutate::{MutatorRegistry, PayloadMutator};
pub use removal::RemovalVariants;
pub use value_gen::RandomPayloadGenerator;

/// Structural kinds of JSON values the generator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Float,
    String,
    List,
    Dict,
}

impl ValueKind {
    pub const ALL: [ValueKind; 7] = [
        ValueKind::Null,
        ValueKind::Bool,
        ValueKind::Integer,
        ValueKind::Float,
        ValueKind::String,
        ValueKind::List,
        ValueKind::Dict,
    ];

    pub fn is_container(&self) -> bool {
        matches!(self, ValueKind::List | ValueKind::Dict)
    }
}

/// Source of random keys and values for the addition and change strategies.
pub trait PayloadGenerator {
    /// A key that collides with none of the keys already in `existing`.
    fn generate_random_key_for_dict(&mut self, existing: &Map<String, Value>) -> String;

    /// A fresh random value, optionally restricted to the given kinds.
    fn generate_random_payload(&mut self, restrict_types: Option<&[ValueKind]>) -> Value;
}

/// Mutation strategy selected by a test flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Remove,
    Add,
    Change,
    Mutate,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Remove => "remove",
            Strategy::Add => "add",
            Strategy::Change => "change",
            Strategy::Mutate => "mutate",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mutated, independent copy of the original payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub strategy: Strategy,
    /// 1-based position in the strategy's sequence.
    pub iteration: usize,
    pub payload: Value,
}
