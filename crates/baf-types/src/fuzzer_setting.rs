//! Named bounds for random payload generation.

use serde::{Deserialize, Serialize};

use crate::serde_helpers::{lenient_usize, yes_no};

/// Immutable bundle of generation bounds, looked up by exact name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzerSetting {
    #[serde(rename = "Name")]
    pub name: String,

    /// Maximum nesting depth of generated lists and dictionaries.
    #[serde(rename = "Iteration deep", deserialize_with = "lenient_usize")]
    pub iteration_deep: usize,

    #[serde(rename = "List min length", deserialize_with = "lenient_usize")]
    pub list_min_length: usize,

    #[serde(rename = "List max length", deserialize_with = "lenient_usize")]
    pub list_max_length: usize,

    #[serde(rename = "Dictionary min length", deserialize_with = "lenient_usize")]
    pub dict_min_length: usize,

    #[serde(rename = "Dictionary max length", deserialize_with = "lenient_usize")]
    pub dict_max_length: usize,

    #[serde(rename = "Min dictionary key length", deserialize_with = "lenient_usize")]
    pub dict_key_min_length: usize,

    #[serde(rename = "Max dictionary key length", deserialize_with = "lenient_usize")]
    pub dict_key_max_length: usize,

    #[serde(rename = "Min string length", deserialize_with = "lenient_usize")]
    pub string_min_length: usize,

    #[serde(rename = "Max string length", deserialize_with = "lenient_usize")]
    pub string_max_length: usize,

    /// Alphabet for generated dictionary keys.
    #[serde(rename = "Dictionary characters")]
    pub dict_characters: String,

    /// Alphabet for generated string values.
    #[serde(rename = "String characters")]
    pub string_characters: String,

    #[serde(rename = "Allow NaN", deserialize_with = "yes_no")]
    pub allow_nan: bool,

    #[serde(rename = "Allow Inf", deserialize_with = "yes_no")]
    pub allow_inf: bool,

    #[serde(rename = "SQL injection strings", deserialize_with = "yes_no")]
    pub sql_injection: bool,

    #[serde(rename = "Gremlin injection strings", deserialize_with = "yes_no")]
    pub gremlin_injection: bool,
}

impl Default for FuzzerSetting {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            iteration_deep: 2,
            list_min_length: 0,
            list_max_length: 5,
            dict_min_length: 0,
            dict_max_length: 5,
            dict_key_min_length: 1,
            dict_key_max_length: 10,
            string_min_length: 0,
            string_max_length: 20,
            dict_characters: "abcdefghijklmnopqrstuvwxyz_".to_string(),
            string_characters: "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 "
                .to_string(),
            allow_nan: false,
            allow_inf: false,
            sql_injection: false,
            gremlin_injection: false,
        }
    }
}

/// Find a fuzzer setting by exact name.
pub fn find_fuzzer_setting<'a>(
    settings: &'a [FuzzerSetting],
    name: &str,
) -> Option<&'a FuzzerSetting> {
    settings.iter().find(|s| s.name == name)
}
