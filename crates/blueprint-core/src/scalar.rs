//! Lenient scalar decoding shared by the model's `Deserialize` impls.
//!
//! Schema authors write `version: 1.0` and `is: 100` as often as the quoted
//! forms, so text attributes accept any scalar and render it as text. A key
//! written with no value (`null`) decodes the same as an absent key.
//!
//! Rendering a resolved number cannot recover how it was written (`1.50`
//! renders as `1.5`). The YAML decoder in `blueprint-schema` restores source
//! text before deserializing, so this path only renders numbers from other
//! sources such as JSON.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::UInt(n) => n.to_string(),
            // Debug keeps the fractional part: 1.0 stays "1.0".
            Self::Float(f) => format!("{f:?}"),
        }
    }
}

/// Decode any scalar (or null) as text.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(Scalar::into_text)
        .unwrap_or_default())
}

/// Decode `T`, treating null as `T::default()`.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
