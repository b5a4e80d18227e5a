// Lenient field decoding: canonical documents written by older collectors
// sometimes carry numbers as strings ("12.5") and `null` for missing readings.
// `null` always decodes to the field's default.

use serde::de::Error;
use serde::{Deserialize, Deserializer};

use super::system::unknown;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Null(()),
    Number(serde_json::Number),
    Text(String),
}

/// Finite floats only; `NaN` and infinities would re-encode as `null`.
pub(crate) fn f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Null(()) => return Ok(0.0),
        NumberOrText::Number(n) => n.as_f64(),
        NumberOrText::Text(s) => match s.trim().parse::<f64>() {
            Ok(v) => Some(v),
            Err(_) => return Err(D::Error::custom(format!("expected a number, got {s:?}"))),
        },
    };
    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(D::Error::custom("expected a finite number")),
    }
}

/// Integer counters; floats are truncated, negatives rejected.
pub(crate) fn u64_lenient<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Null(()) => return Ok(0),
        NumberOrText::Number(n) => match n.as_u64() {
            Some(v) => return Ok(v),
            None => n.as_f64(),
        },
        NumberOrText::Text(s) => {
            let s = s.trim();
            if let Ok(v) = s.parse::<u64>() {
                return Ok(v);
            }
            s.parse::<f64>().ok()
        }
    };
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => Ok(v as u64),
        _ => Err(D::Error::custom("expected a non-negative integer")),
    }
}

pub(crate) fn u32_lenient<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = u64_lenient(deserializer)?;
    u32::try_from(value).map_err(|_| D::Error::custom(format!("{value} does not fit in u32")))
}

/// Text fields whose fallback is the `"unknown"` sentinel.
pub(crate) fn text_or_unknown<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(unknown))
}

/// Any other field: `null` becomes `T::default()`.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
