//! Random JSON value generation bounded by a [`FuzzerSetting`].
//!
//! Integers and floats use a boundary-heavy distribution (~40% exact
//! boundaries, the rest uniform). Strings come from the setting's alphabet,
//! optionally mixed with SQL or Gremlin injection strings. Lists and
//! dictionaries nest up to the setting's "Iteration deep" level.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Number, Value};

use baf_types::FuzzerSetting;

use super::{PayloadGenerator, ValueKind};

/// Alphabet used when a setting leaves a character set empty.
const FALLBACK_CHARACTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Random key attempts before a colliding key gets extended instead.
const MAX_KEY_ATTEMPTS: usize = 64;

/// Chance that an enabled injection list supplies a string value.
const INJECTION_PROBABILITY: f64 = 0.25;

/// Chance that an enabled NaN/Inf token replaces a float.
const NON_FINITE_PROBABILITY: f64 = 0.1;

/// Random payload generator driven by one fuzzer setting.
pub struct RandomPayloadGenerator {
    rng: StdRng,
    setting: FuzzerSetting,
    key_chars: Vec<char>,
    string_chars: Vec<char>,
}

impl RandomPayloadGenerator {
    /// Create a new generator with the given setting and seed.
    pub fn new(setting: FuzzerSetting, seed: u64) -> Self {
        let rng = StdRng::seed_from_u64(seed);
        let key_chars = alphabet(&setting.dict_characters);
        let string_chars = alphabet(&setting.string_characters);
        Self {
            rng,
            setting,
            key_chars,
            string_chars,
        }
    }

    fn generate_value(&mut self, kinds: &[ValueKind], depth: usize) -> Value {
        let at_depth_limit = depth >= self.setting.iteration_deep;
        let allowed: Vec<ValueKind> = kinds
            .iter()
            .copied()
            .filter(|k| !(at_depth_limit && k.is_container()))
            .collect();

        let Some(&kind) = allowed.choose(&mut self.rng) else {
            // Only containers were requested and the depth limit is reached.
            return match kinds.first() {
                Some(ValueKind::List) => Value::Array(Vec::new()),
                Some(ValueKind::Dict) => Value::Object(Map::new()),
                _ => Value::Null,
            };
        };

        match kind {
            ValueKind::Null => Value::Null,
            ValueKind::Bool => Value::Bool(self.rng.gen_bool(0.5)),
            ValueKind::Integer => Value::Number(self.gen_integer().into()),
            ValueKind::Float => self.gen_float(),
            ValueKind::String => Value::String(self.gen_string()),
            ValueKind::List => self.gen_list(depth),
            ValueKind::Dict => self.gen_dict(depth),
        }
    }

    // ---- Scalars ----

    fn gen_integer(&mut self) -> i64 {
        if self.rng.gen_bool(0.4) {
            I64_BOUNDARIES[self.rng.gen_range(0..I64_BOUNDARIES.len())]
        } else {
            self.rng.gen()
        }
    }

    fn gen_float(&mut self) -> Value {
        let mut tokens: Vec<&str> = Vec::new();
        if self.setting.allow_nan {
            tokens.push("NaN");
        }
        if self.setting.allow_inf {
            tokens.extend(["Infinity", "-Infinity"]);
        }
        if !tokens.is_empty() && self.rng.gen_bool(NON_FINITE_PROBABILITY) {
            // JSON has no literal for non-finite numbers.
            let token = tokens[self.rng.gen_range(0..tokens.len())];
            return Value::String(token.to_string());
        }

        let value = if self.rng.gen_bool(0.4) {
            F64_BOUNDARIES[self.rng.gen_range(0..F64_BOUNDARIES.len())]
        } else {
            self.rng.gen_range(-1.0e6..1.0e6)
        };
        Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }

    fn gen_string(&mut self) -> String {
        let mut pools: Vec<&'static [&'static str]> = Vec::new();
        if self.setting.sql_injection {
            pools.push(&SQL_INJECTION_STRINGS);
        }
        if self.setting.gremlin_injection {
            pools.push(&GREMLIN_INJECTION_STRINGS);
        }
        if !pools.is_empty() && self.rng.gen_bool(INJECTION_PROBABILITY) {
            let pool = pools[self.rng.gen_range(0..pools.len())];
            return pool[self.rng.gen_range(0..pool.len())].to_string();
        }

        let len = self.gen_len(self.setting.string_min_length, self.setting.string_max_length);
        (0..len)
            .map(|_| self.string_chars[self.rng.gen_range(0..self.string_chars.len())])
            .collect()
    }

    fn gen_key(&mut self) -> String {
        let len = self.gen_len(
            self.setting.dict_key_min_length,
            self.setting.dict_key_max_length,
        );
        // Zero-length keys are legal JSON but collide trivially; keep at least one char.
        (0..len.max(1))
            .map(|_| self.key_chars[self.rng.gen_range(0..self.key_chars.len())])
            .collect()
    }

    // ---- Containers ----

    fn gen_list(&mut self, depth: usize) -> Value {
        let len = self.gen_len(self.setting.list_min_length, self.setting.list_max_length);
        let items = (0..len)
            .map(|_| self.generate_value(&ValueKind::ALL, depth + 1))
            .collect();
        Value::Array(items)
    }

    fn gen_dict(&mut self, depth: usize) -> Value {
        let len = self.gen_len(self.setting.dict_min_length, self.setting.dict_max_length);
        let mut map = Map::new();
        for _ in 0..len {
            let key = self.generate_random_key_for_dict(&map);
            let value = self.generate_value(&ValueKind::ALL, depth + 1);
            map.insert(key, value);
        }
        Value::Object(map)
    }

    /// Length in `[min, max]`; swapped bounds are tolerated.
    fn gen_len(&mut self, min: usize, max: usize) -> usize {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.rng.gen_range(lo..=hi)
    }
}

impl PayloadGenerator for RandomPayloadGenerator {
    fn generate_random_key_for_dict(&mut self, existing: &Map<String, Value>) -> String {
        let mut key = self.gen_key();
        for _ in 0..MAX_KEY_ATTEMPTS {
            if !existing.contains_key(&key) {
                return key;
            }
            key = self.gen_key();
        }
        // Key space of the configured length is (nearly) exhausted: grow the key.
        while existing.contains_key(&key) {
            key.push(self.key_chars[self.rng.gen_range(0..self.key_chars.len())]);
        }
        key
    }

    fn generate_random_payload(&mut self, restrict_types: Option<&[ValueKind]>) -> Value {
        let kinds: &[ValueKind] = match restrict_types {
            Some(kinds) if !kinds.is_empty() => kinds,
            _ => &ValueKind::ALL,
        };
        self.generate_value(kinds, 0)
    }
}

fn alphabet(characters: &str) -> Vec<char> {
    let chars: Vec<char> = characters.chars().collect();
    if chars.is_empty() {
        FALLBACK_CHARACTERS.chars().collect()
    } else {
        chars
    }
}

// ---- Boundary value tables ----

const I64_BOUNDARIES: [i64; 13] = [
    0,
    1,
    -1,
    127,
    -128,
    255,
    65_535,
    2_147_483_647,  // i32::MAX
    -2_147_483_648, // i32::MIN
    4_294_967_295,  // u32::MAX
    9_007_199_254_740_993, // 2^53 + 1, first integer a double cannot hold
    i64::MAX,
    i64::MIN,
];

const F64_BOUNDARIES: [f64; 8] = [
    0.0,
    -0.0,
    1.0,
    -1.0,
    f64::EPSILON,
    f64::MIN_POSITIVE,
    f64::MAX,
    f64::MIN,
];

const SQL_INJECTION_STRINGS: [&str; 6] = [
    "' OR '1'='1",
    "' OR 1=1 --",
    "'; DROP TABLE users; --",
    "\" OR \"\"=\"",
    "1; SELECT * FROM information_schema.tables",
    "admin'--",
];

const GREMLIN_INJECTION_STRINGS: [&str; 5] = [
    "g.V().drop()",
    "g.V().hasLabel('user').values('password')",
    "').drop().iterate();//",
    "g.E().count()",
    "1).sideEffect{ 'id'.execute() }",
];
