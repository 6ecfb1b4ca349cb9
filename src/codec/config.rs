//! `key = value` text configuration
//!
//! One entry per line. Blank lines and lines starting with `#` are skipped;
//! surrounding whitespace and matching quotes around values are stripped.
//!
//! ```rust
//! use sluice::codec::config::{Config, Key};
//! use sluice::codec::{Decoder, DecoderExt};
//! use sluice::refined::{NonEmptyText, Port};
//!
//! let config: Config = r#"
//! ## service
//! name = "ledger"
//! port = 0
//! "#
//! .parse()
//! .unwrap();
//!
//! let name = Key::<String>::new("name").refined::<NonEmptyText>();
//! assert_eq!(name.decode(&config).unwrap().get(), "ledger");
//!
//! let port = Key::<u16>::new("port").refined::<Port>();
//! assert!(port.decode(&config).is_err());
//! ```

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use super::{Decoder, RefinementFailure};
use crate::error::{FieldPath, ValidationError};

/// Configuration decoding failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A non-comment line without `=`
    Syntax {
        /// 1-based line number
        line: usize,
        /// The offending line, trimmed
        content: String,
    },
    /// The same key appeared twice
    DuplicateKey {
        /// Repeated key
        key: String,
        /// 1-based line of the repetition
        line: usize,
    },
    /// A required key is absent
    MissingKey {
        /// Requested key
        key: String,
    },
    /// The value did not parse as the base type
    InvalidValue {
        /// Key being decoded
        key: String,
        /// Raw text
        value: String,
        /// Parser message
        message: String,
    },
    /// The value parsed but was rejected by a refinement
    Refinement(ValidationError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Syntax { line, content } => {
                write!(f, "line {}: expected `key = value`, got {:?}", line, content)
            }
            ConfigError::DuplicateKey { key, line } => {
                write!(f, "line {}: duplicate key {}", line, key)
            }
            ConfigError::MissingKey { key } => write!(f, "{}: missing", key),
            ConfigError::InvalidValue {
                key,
                value,
                message,
            } => write!(f, "{}: cannot parse {:?}: {}", key, value, message),
            ConfigError::Refinement(err) => write!(f, "{}", err),
        }
    }
}

impl StdError for ConfigError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ConfigError::Refinement(err) => Some(err),
            _ => None,
        }
    }
}

impl RefinementFailure for ConfigError {
    fn from_refinement(error: ValidationError) -> Self {
        ConfigError::Refinement(error)
    }
}

/// A parsed `key = value` document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    entries: BTreeMap<String, String>,
}

impl Config {
    /// Parse a document.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut entries = BTreeMap::new();

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| ConfigError::Syntax {
                line: index + 1,
                content: line.to_string(),
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(ConfigError::Syntax {
                    line: index + 1,
                    content: line.to_string(),
                });
            }

            if entries.insert(key.to_string(), unquote(value.trim()).to_string()).is_some() {
                return Err(ConfigError::DuplicateKey {
                    key: key.to_string(),
                    line: index + 1,
                });
            }
        }

        Ok(Self { entries })
    }

    /// Raw value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Config::parse(s)
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Decodes the value of one key through `FromStr`.
pub struct Key<T> {
    key: String,
    _value: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    /// Decoder for `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            _value: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Key").field(&self.key).finish()
    }
}

impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        Self::new(self.key.clone())
    }
}

impl<T> Decoder<Config> for Key<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    type Value = T;
    type Error = ConfigError;

    fn decode(&self, config: &Config) -> Result<T, ConfigError> {
        let raw = config.get(&self.key).ok_or_else(|| ConfigError::MissingKey {
            key: self.key.clone(),
        })?;
        raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: self.key.clone(),
            value: raw.to_string(),
            message: e.to_string(),
        })
    }

    fn path(&self) -> Option<FieldPath> {
        Some(FieldPath::root(self.key.as_str()))
    }
}
