//! Partial-update field type.

use serde::{Deserialize, Deserializer};

/// One field of a partial update: either left as stored or set to a value.
///
/// Deserialize with `#[serde(default)]` on the field: an absent key is
/// [`Patch::Unchanged`], a present key is [`Patch::Set`]. Empty strings and
/// zero are ordinary values. Use `Patch<Option<T>>` for nullable columns so
/// that an explicit `null` clears the column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Unchanged,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Unchanged
    }
}

impl<T> Patch<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Self::Unchanged => Patch::Unchanged,
            Self::Set(value) => Patch::Set(f(value)),
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
        T::deserialize(deserializer).map(Self::Set)
    }
}
