//! Typed key-value scratch space for a single user.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use thiserror::Error;

/// A named session slot holding values of type `T`.
pub struct SessionKey<T> {
    name: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> SessionKey<T> {
    /// Declares a key.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _value: PhantomData,
        }
    }

    /// Returns the slot name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for SessionKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SessionKey<T> {}

impl<T> fmt::Debug for SessionKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionKey").field(&self.name).finish()
    }
}

/// Errors raised while reading or writing session values.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A value could not be stored.
    #[error("cannot encode session value `{key}`: {source}")]
    Encode {
        /// Slot name.
        key: &'static str,
        /// Serializer error.
        source: serde_json::Error,
    },
    /// A stored value no longer matches the key's type.
    #[error("cannot decode session value `{key}`: {source}")]
    Decode {
        /// Slot name.
        key: &'static str,
        /// Deserializer error.
        source: serde_json::Error,
    },
    /// The registry lock was poisoned by a panicking holder.
    #[error("session registry is unavailable: {0}")]
    Unavailable(String),
}

/// Scratch values of one user's current conversation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionData {
    values: BTreeMap<&'static str, Value>,
}

impl SessionData {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Decode`] when the stored value does not match
    /// the key's type.
    pub fn get<T: DeserializeOwned>(&self, key: SessionKey<T>) -> Result<Option<T>, SessionError> {
        self.values
            .get(key.name)
            .map(|value| {
                T::deserialize(value).map_err(|source| SessionError::Decode {
                    key: key.name,
                    source,
                })
            })
            .transpose()
    }

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Encode`] when the value cannot be serialized.
    pub fn set<T: Serialize>(&mut self, key: SessionKey<T>, value: &T) -> Result<(), SessionError> {
        let encoded = serde_json::to_value(value).map_err(|source| SessionError::Encode {
            key: key.name,
            source,
        })?;
        self.values.insert(key.name, encoded);
        Ok(())
    }

    /// Removes the value under `key`, returning whether one was present.
    pub fn remove<T>(&mut self, key: SessionKey<T>) -> bool {
        self.values.remove(key.name).is_some()
    }

    /// Returns `true` when a value is stored under `key`.
    #[must_use]
    pub fn contains<T>(&self, key: SessionKey<T>) -> bool {
        self.values.contains_key(key.name)
    }

    /// Drops every value.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Returns `true` when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
