//! Lenient field decoders for test and fuzzer-setting files.
//!
//! Definition files are often exported from spreadsheets, so flags show up as
//! `"Yes"`/`"No"` and numbers as quoted strings. These helpers accept both the
//! typed and the textual form.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberRepr {
    Number(u64),
    Text(String),
}

/// Parse a yes/no style flag. Unknown words are rejected rather than read as `false`.
pub fn parse_flag(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "yes" | "y" | "true" | "1" | "on" | "enabled" => Some(true),
        "no" | "n" | "false" | "0" | "off" | "disabled" | "" => Some(false),
        _ => None,
    }
}

/// Deserialize a boolean given either as `true`/`false` or as a yes/no string.
pub fn yes_no<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match FlagRepr::deserialize(deserializer)? {
        FlagRepr::Bool(b) => Ok(b),
        FlagRepr::Text(s) => {
            parse_flag(&s).ok_or_else(|| de::Error::custom(format!("expected yes/no, got '{s}'")))
        }
    }
}

/// Deserialize an unsigned number given either natively or as a decimal string.
pub fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberRepr::deserialize(deserializer)? {
        NumberRepr::Number(n) => Ok(n),
        NumberRepr::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected a number, got '{s}'"))),
    }
}

pub fn lenient_usize<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let n = lenient_u64(deserializer)?;
    usize::try_from(n).map_err(|_| de::Error::custom(format!("{n} does not fit in usize")))
}

pub fn lenient_u16<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let n = lenient_u64(deserializer)?;
    u16::try_from(n).map_err(|_| de::Error::custom(format!("{n} is not a valid status code")))
}

/// Treat empty strings as absent, so a blank "Fuzzer setting" cell means "no setting".
pub fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
