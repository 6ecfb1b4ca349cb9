//! TOML entry decoding (feature `toml`)
//!
//! [`Entry<T>`] reads the value at a dotted key out of a parsed
//! [`toml::Table`] and deserializes it as `T`. Numeric segments index into
//! arrays, so `servers.1.port` is the `port` of the second `[[servers]]`.
//!
//! ```rust
//! use sluice::codec::toml::Entry;
//! use sluice::codec::{Decoder, DecoderExt};
//! use sluice::refined::Port;
//!
//! let doc: toml::Table = r#"
//! [[servers]]
//! port = 8080
//!
//! [[servers]]
//! port = 0
//! "#
//! .parse()
//! .unwrap();
//!
//! let first = Entry::<u16>::new("servers.0.port").refined::<Port>();
//! assert_eq!(*first.decode(&doc).unwrap(), 8080);
//!
//! let second = Entry::<u16>::new("servers.1.port").refined::<Port>();
//! assert_eq!(
//!     second.decode(&doc).unwrap_err().to_string(),
//!     "servers[1].port: invalid Port: Predicate failed: (0 in [1, 65535])."
//! );
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::marker::PhantomData;

use ::toml::{Table, Value};
use serde::de::DeserializeOwned;

use super::{Decoder, RefinementFailure};
use crate::error::{FieldPath, PathSegment, ValidationError};

/// TOML entry decoding failure.
#[derive(Debug)]
pub enum TomlError {
    /// Nothing at the key
    Missing {
        /// Requested dotted key
        key: String,
    },
    /// The value at the key has the wrong shape
    Type {
        /// Requested dotted key
        key: String,
        /// Underlying deserialization error
        source: ::toml::de::Error,
    },
    /// The value decoded but was rejected by a refinement
    Refinement(ValidationError),
}

impl fmt::Display for TomlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TomlError::Missing { key } => write!(f, "{}: missing", key),
            TomlError::Type { key, source } => write!(f, "{}: {}", key, source),
            TomlError::Refinement(err) => write!(f, "{}", err),
        }
    }
}

impl StdError for TomlError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            TomlError::Missing { .. } => None,
            TomlError::Type { source, .. } => Some(source),
            TomlError::Refinement(err) => Some(err),
        }
    }
}

impl RefinementFailure for TomlError {
    fn from_refinement(error: ValidationError) -> Self {
        TomlError::Refinement(error)
    }
}

/// Decodes the value at a dotted key.
pub struct Entry<T> {
    key: String,
    _value: PhantomData<fn() -> T>,
}

impl<T> Entry<T> {
    /// Decoder for the value at `key`, e.g. `database.pool.max`.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            _value: PhantomData,
        }
    }

    /// The dotted key this entry reads.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<T> fmt::Debug for Entry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Entry").field(&self.key).finish()
    }
}

impl<T> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self::new(self.key.clone())
    }
}

impl<T: DeserializeOwned> Decoder<Table> for Entry<T> {
    type Value = T;
    type Error = TomlError;

    fn decode(&self, document: &Table) -> Result<T, TomlError> {
        let value = lookup(document, &self.key).ok_or_else(|| TomlError::Missing {
            key: self.key.clone(),
        })?;
        value.clone().try_into::<T>().map_err(|source| TomlError::Type {
            key: self.key.clone(),
            source,
        })
    }

    fn path(&self) -> Option<FieldPath> {
        key_path(&self.key)
    }
}

fn lookup<'a>(table: &'a Table, key: &str) -> Option<&'a Value> {
    let mut segments = key.split('.');
    let mut current = table.get(segments.next()?)?;
    for segment in segments {
        current = match current {
            Value::Table(table) => table.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// `servers.1.port` → `servers[1].port`
fn key_path(key: &str) -> Option<FieldPath> {
    let mut path: Option<FieldPath> = None;
    for segment in key.split('.').filter(|s| !s.is_empty()) {
        let segment = match segment.parse::<usize>() {
            Ok(index) => PathSegment::Index(index),
            Err(_) => PathSegment::Field(segment.to_string()),
        };
        path = Some(match path {
            Some(path) => path.child(segment),
            None => FieldPath::root(segment),
        });
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::DecoderExt;
    use crate::refined::{NonEmptyText, Percent};

    const DOC: &str = r#"
title = "ledger"

[owner]
name = ""
load = 130

[[replicas]]
host = "a.internal"

[[replicas]]
host = "b.internal"
"#;

    fn doc() -> Table {
        DOC.parse().unwrap()
    }

    #[test]
    fn test_entry_decodes_value() {
        let doc = doc();
        assert_eq!(Entry::<String>::new("title").decode(&doc).unwrap(), "ledger");
        assert_eq!(Entry::<i64>::new("owner.load").decode(&doc).unwrap(), 130);
        assert_eq!(
            Entry::<String>::new("replicas.1.host").decode(&doc).unwrap(),
            "b.internal"
        );
    }

    #[test]
    fn test_missing_and_type_errors() {
        let doc = doc();

        let missing = Entry::<String>::new("owner.email").decode(&doc).unwrap_err();
        assert!(matches!(missing, TomlError::Missing { ref key } if key == "owner.email"));
        assert_eq!(missing.to_string(), "owner.email: missing");

        assert!(matches!(
            Entry::<String>::new("replicas.7.host").decode(&doc),
            Err(TomlError::Missing { .. })
        ));
        assert!(matches!(
            Entry::<String>::new("title.inner").decode(&doc),
            Err(TomlError::Missing { .. })
        ));

        let wrong = Entry::<i32>::new("title").decode(&doc).unwrap_err();
        assert!(matches!(wrong, TomlError::Type { .. }));
        assert!(wrong.source().is_some());
    }

    #[test]
    fn test_refined_entry_places_error() {
        let doc = doc();

        let name = Entry::<String>::new("owner.name").refined::<NonEmptyText>();
        match name.decode(&doc).unwrap_err() {
            TomlError::Refinement(err) => {
                assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("owner.name"));
            }
            other => panic!("unexpected {:?}", other),
        }

        let load = Entry::<i32>::new("owner.load").refined::<Percent>();
        assert_eq!(
            load.decode(&doc).unwrap_err().to_string(),
            "owner.load: invalid Percent: Predicate failed: (130 in [0, 100])."
        );
    }

    #[test]
    fn test_key_path() {
        assert!(key_path("").is_none());
        assert_eq!(
            key_path("replicas.0.host").map(|p| p.to_string()).as_deref(),
            Some("replicas[0].host")
        );
    }
}
