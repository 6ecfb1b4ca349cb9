//! JSON field decoding (feature `json`)
//!
//! [`Field<T>`] reads the value at a JSON pointer (RFC 6901) out of a
//! [`serde_json::Value`] and deserializes it as `T`. Refinement failures are
//! placed at the pointer, converted to a dotted path.
//!
//! ```rust
//! use serde_json::json;
//! use sluice::codec::json::Field;
//! use sluice::codec::{Decoder, DecoderExt};
//! use sluice::refined::Positive;
//!
//! let doc = json!({ "order": { "lines": [ { "qty": 0 } ] } });
//!
//! let qty = Field::<i32>::new("/order/lines/0/qty").refined::<Positive>();
//! let err = qty.decode(&doc).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "order.lines[0].qty: invalid Positive: Predicate failed: (0 > 0)."
//! );
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{Decoder, RefinementFailure};
use crate::error::{FieldPath, PathSegment, ValidationError};

/// JSON field decoding failure.
#[derive(Debug)]
pub enum JsonError {
    /// Nothing at the pointer
    Missing {
        /// Requested pointer
        pointer: String,
    },
    /// The value at the pointer has the wrong shape
    Type {
        /// Requested pointer
        pointer: String,
        /// Underlying deserialization error
        source: serde_json::Error,
    },
    /// The value decoded but was rejected by a refinement
    Refinement(ValidationError),
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonError::Missing { pointer } => write!(f, "{}: missing", pointer),
            JsonError::Type { pointer, source } => write!(f, "{}: {}", pointer, source),
            JsonError::Refinement(err) => write!(f, "{}", err),
        }
    }
}

impl StdError for JsonError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            JsonError::Missing { .. } => None,
            JsonError::Type { source, .. } => Some(source),
            JsonError::Refinement(err) => Some(err),
        }
    }
}

impl RefinementFailure for JsonError {
    fn from_refinement(error: ValidationError) -> Self {
        JsonError::Refinement(error)
    }
}

/// Decodes the value at a JSON pointer.
pub struct Field<T> {
    pointer: String,
    _value: PhantomData<fn() -> T>,
}

impl<T> Field<T> {
    /// Decoder for the value at `pointer`, e.g. `/address/zip`.
    ///
    /// The empty pointer selects the whole document.
    pub fn new(pointer: impl Into<String>) -> Self {
        Self {
            pointer: pointer.into(),
            _value: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Field").field(&self.pointer).finish()
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        Self::new(self.pointer.clone())
    }
}

impl<T: DeserializeOwned> Decoder<Value> for Field<T> {
    type Value = T;
    type Error = JsonError;

    fn decode(&self, document: &Value) -> Result<T, JsonError> {
        let value = document
            .pointer(&self.pointer)
            .ok_or_else(|| JsonError::Missing {
                pointer: self.pointer.clone(),
            })?;
        T::deserialize(value).map_err(|source| JsonError::Type {
            pointer: self.pointer.clone(),
            source,
        })
    }

    fn path(&self) -> Option<FieldPath> {
        pointer_path(&self.pointer)
    }
}

/// `/a/0/b~1c` → `a[0].b/c`
fn pointer_path(pointer: &str) -> Option<FieldPath> {
    let mut path: Option<FieldPath> = None;
    for token in pointer.split('/').skip(1) {
        let token = token.replace("~1", "/").replace("~0", "~");
        let segment = match token.parse::<usize>() {
            Ok(index) => PathSegment::Index(index),
            Err(_) => PathSegment::Field(token),
        };
        path = Some(match path {
            Some(path) => path.child(segment),
            None => FieldPath::root(segment),
        });
    }
    path
}
