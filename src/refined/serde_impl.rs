//! Serde support for refined types (feature `serde`)
//!
//! Serialization writes the inner value unchanged. Deserialization decodes
//! the base value, then runs the refinement's rule; a rejected value
//! becomes `D::Error::custom`, so formats such as `serde_json` add their
//! own position information.
//!
//! ```rust,ignore
//! use serde::Deserialize;
//! use sluice::refined::{NonEmptyString, PosInt};
//!
//! #[derive(Deserialize)]
//! struct User {
//!     name: NonEmptyString,
//!     age: PosInt<i32>,
//! }
//!
//! let bad: Result<User, _> = serde_json::from_str(r#"{"name": "", "age": 25}"#);
//! assert!(bad.is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Refined, Refinement};

impl<T, P> Serialize for Refined<T, P>
where
    T: Serialize + 'static,
    P: Refinement<T>,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.get().serialize(serializer)
    }
}

impl<'de, T, P> Deserialize<'de> for Refined<T, P>
where
    T: Deserialize<'de> + fmt::Debug + 'static,
    P: Refinement<T>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = T::deserialize(deserializer)?;
        Refined::new(value).map_err(|err| {
            #[cfg(feature = "tracing")]
            tracing::debug!(refinement = P::name(), error = %err, "deserialized value rejected");
            serde::de::Error::custom(err)
        })
    }
}
