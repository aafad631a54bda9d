//! Lenient numeric deserializers
//!
//! Clients send ids and quantities either as JSON numbers or as strings
//! holding digits (`"2"`). Both forms are accepted.

use serde::{Deserialize, Deserializer, de::Error};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    String(String),
}

impl NumberOrString {
    fn into_u64<E: Error>(self) -> Result<u64, E> {
        match self {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::String(s) => s
                .trim()
                .parse::<u64>()
                .map_err(|_| E::custom(format!("expected an unsigned integer, got {s:?}"))),
        }
    }
}

/// Deserialize a `u64` from a number or a numeric string
pub fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    NumberOrString::deserialize(deserializer)?.into_u64()
}

/// Deserialize an optional `u32` from a number, a numeric string, or null
pub fn lenient_opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => {
            let n: u64 = raw.into_u64()?;
            u32::try_from(n)
                .map(Some)
                .map_err(|_| D::Error::custom(format!("value {n} is out of range")))
        }
    }
}
