//! Tri-state field updates.
//!
//! Update payloads distinguish a field that is absent from one that is sent as
//! `null`. Fields of type [`Patch`] must carry `#[serde(default)]` so that a
//! missing key deserializes to [`Patch::Unchanged`]; an explicit `null`
//! becomes [`Patch::Clear`] and any other value [`Patch::Set`].

use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Deserializer};

use crate::errors::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Unchanged,
    Clear,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Unchanged
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Set(v),
            None => Patch::Clear,
        })
    }
}

impl<T> Patch<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Patch::Unchanged)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Patch::Unchanged => Patch::Unchanged,
            Patch::Clear => Patch::Clear,
            Patch::Set(v) => Patch::Set(f(v)),
        }
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(v) => Some(v),
            _ => None,
        }
    }

    /// For non-nullable columns: `Clear` is rejected.
    pub fn into_required(self, field: &str) -> Result<Option<T>, ServiceError> {
        match self {
            Patch::Unchanged => Ok(None),
            Patch::Clear => Err(ServiceError::Validation(format!("{field} cannot be null"))),
            Patch::Set(v) => Ok(Some(v)),
        }
    }

    /// For nullable columns: `Some(None)` means store NULL.
    pub fn into_optional(self) -> Option<Option<T>> {
        match self {
            Patch::Unchanged => None,
            Patch::Clear => Some(None),
            Patch::Set(v) => Some(Some(v)),
        }
    }
}

impl<T> Patch<T>
where
    T: Into<sea_orm::Value>,
{
    /// Writes a required value into an active model column.
    pub fn apply_required(self, field: &str, target: &mut ActiveValue<T>) -> Result<(), ServiceError> {
        if let Some(v) = self.into_required(field)? {
            *target = Set(v);
        }
        Ok(())
    }
}

impl<T> Patch<T>
where
    Option<T>: Into<sea_orm::Value>,
{
    pub fn apply_optional(self, target: &mut ActiveValue<Option<T>>) {
        if let Some(v) = self.into_optional() {
            *target = Set(v);
        }
    }
}
