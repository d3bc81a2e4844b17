//! Serde helpers for sparse change-sets.
//!
//! A nullable column needs three states in an update payload: absent (keep the
//! stored value), `null` (clear it) and a value (replace it). Those map onto
//! `Option<Option<T>>` when the field is declared with
//! `#[serde(default, deserialize_with = "patch::present")]`.

use serde::{Deserialize, Deserializer};

/// Marks a field as present, wrapping whatever it holds (including `null`).
pub fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
