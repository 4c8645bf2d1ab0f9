//! Field presence for partial updates.
//!
//! A plain `Option<T>` cannot tell "the caller did not mention this field"
//! apart from "the caller sent null". `Patch<T>` keeps the three cases apart.
//!
//! With serde, put `#[serde(default)]` on the field: a missing key becomes
//! [`Patch::Absent`], `null` becomes [`Patch::Null`], anything else is parsed
//! as `T` into [`Patch::Set`].

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Patch<T> {
    /// Not supplied: leave the current value unchanged.
    #[default]
    Absent,
    /// Explicitly null: clear the value, where the field allows it.
    Null,
    /// Replace the current value.
    Set(T),
}

impl<T> Patch<T> {
    /// `None` when absent, otherwise the value to store (`Some(None)` clears).
    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Patch::Absent => None,
            Patch::Null => Some(None),
            Patch::Set(v) => Some(Some(v)),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Set(v),
            None => Patch::Null,
        })
    }
}
