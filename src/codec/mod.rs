//! Codec adapters: lift base-type decoders to refined types
//!
//! A host codec exposes a [`Decoder`] for base values. Wrapping it with
//! [`DecoderExt::refined`] yields a decoder for `Refined<T, P>` that decodes
//! the raw value, checks the rule and, on rejection, hands the
//! [`ValidationError`] to the host's error type through
//! [`RefinementFailure`]. Callers see one failure channel.
//!
//! Hosts provided here:
//! - [`config`]: `key = value` text, with [`config::Key`]
//! - [`json`] (feature `json`): values at a JSON pointer, with `json::Field`
//! - [`toml`] (feature `toml`): values at a dotted key, with `toml::Entry`
//! - serde (feature `serde`): `Refined<T, P>` implements `Deserialize`
//!   directly
//!
//! ```rust
//! use sluice::codec::config::{Config, Key};
//! use sluice::codec::{Decoder, DecoderExt};
//! use sluice::refined::{Percent, PortNumber};
//!
//! let config: Config = "port = 8080\nratio = 250\n".parse().unwrap();
//!
//! let port = Key::<u16>::new("port").refined::<sluice::refined::Port>();
//! let port: PortNumber<u16> = port.decode(&config).unwrap();
//! assert_eq!(*port, 8080);
//!
//! let ratio = Key::<i32>::new("ratio").refined::<Percent>();
//! let err = ratio.decode(&config).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "ratio: invalid Percent: Predicate failed: (250 in [0, 100])."
//! );
//! ```

pub mod config;
#[cfg(feature = "json")]
pub mod json;
#[cfg(feature = "toml")]
pub mod toml;

use std::fmt;
use std::marker::PhantomData;

use crate::error::{FieldPath, ValidationError};
use crate::refined::{Refined, Refinement};
use crate::registry::Validator;

/// A base-type decoder supplied by a host codec.
pub trait Decoder<I: ?Sized> {
    /// Decoded value
    type Value;
    /// Host error type
    type Error;

    /// Decode a value from `input`.
    fn decode(&self, input: &I) -> Result<Self::Value, Self::Error>;

    /// Where in the input this decoder reads, if it knows.
    ///
    /// Used to place refinement failures.
    fn path(&self) -> Option<FieldPath> {
        None
    }
}

/// Host error types that can carry a refinement failure.
pub trait RefinementFailure {
    /// Wrap a rejected value.
    fn from_refinement(error: ValidationError) -> Self;
}

impl RefinementFailure for ValidationError {
    fn from_refinement(error: ValidationError) -> Self {
        error
    }
}

/// Adapter methods for every [`Decoder`].
pub trait DecoderExt<I: ?Sized>: Decoder<I> + Sized {
    /// Decode a `Refined<Self::Value, P>` instead of the raw value.
    fn refined<P>(self) -> Refining<Self, P>
    where
        Self::Value: 'static,
        P: Refinement<Self::Value>,
    {
        Refining {
            decoder: self,
            _refinement: PhantomData,
        }
    }

    /// Check decoded values with a registry-provided validator.
    fn validated(self, validator: Validator<Self::Value>) -> Validating<Self, Self::Value> {
        Validating {
            decoder: self,
            validator,
        }
    }

    /// Report failures at `path` instead of the decoder's own position.
    fn at(self, path: FieldPath) -> At<Self> {
        At {
            decoder: self,
            path,
        }
    }
}

impl<I: ?Sized, D: Decoder<I>> DecoderExt<I> for D {}

fn place(error: ValidationError, path: Option<FieldPath>) -> ValidationError {
    match path {
        Some(path) => error.with_path(path),
        None => error,
    }
}

/// Decoder for `Refined<D::Value, P>`. See [`DecoderExt::refined`].
pub struct Refining<D, P> {
    decoder: D,
    _refinement: PhantomData<fn() -> P>,
}

impl<I, D, P> Decoder<I> for Refining<D, P>
where
    I: ?Sized,
    D: Decoder<I>,
    D::Value: fmt::Debug + 'static,
    D::Error: RefinementFailure,
    P: Refinement<D::Value>,
{
    type Value = Refined<D::Value, P>;
    type Error = D::Error;

    fn decode(&self, input: &I) -> Result<Self::Value, Self::Error> {
        let raw = self.decoder.decode(input)?;
        Refined::new(raw).map_err(|error| {
            let error = place(error, self.decoder.path());
            #[cfg(feature = "tracing")]
            tracing::debug!(refinement = P::name(), error = %error, "decoded value rejected");
            D::Error::from_refinement(error)
        })
    }

    fn path(&self) -> Option<FieldPath> {
        self.decoder.path()
    }
}

impl<D: fmt::Debug, P> fmt::Debug for Refining<D, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Refining")
            .field("decoder", &self.decoder)
            .field("refinement", &std::any::type_name::<P>())
            .finish()
    }
}

/// Decoder checking values with a [`Validator`]. See [`DecoderExt::validated`].
#[derive(Debug)]
pub struct Validating<D, T> {
    decoder: D,
    validator: Validator<T>,
}

impl<I, D, T> Decoder<I> for Validating<D, T>
where
    I: ?Sized,
    D: Decoder<I, Value = T>,
    D::Error: RefinementFailure,
    T: fmt::Debug,
{
    type Value = T;
    type Error = D::Error;

    fn decode(&self, input: &I) -> Result<T, Self::Error> {
        let raw = self.decoder.decode(input)?;
        match self.validator.check(&raw) {
            Ok(()) => Ok(raw),
            Err(failure) => {
                let error = place(self.validator.reject(failure, &raw), self.decoder.path());
                #[cfg(feature = "tracing")]
                tracing::debug!(validator = self.validator.name(), error = %error, "decoded value rejected");
                Err(D::Error::from_refinement(error))
            }
        }
    }

    fn path(&self) -> Option<FieldPath> {
        self.decoder.path()
    }
}

/// Decoder with an overridden position. See [`DecoderExt::at`].
#[derive(Debug, Clone)]
pub struct At<D> {
    decoder: D,
    path: FieldPath,
}

impl<I: ?Sized, D: Decoder<I>> Decoder<I> for At<D> {
    type Value = D::Value;
    type Error = D::Error;

    fn decode(&self, input: &I) -> Result<D::Value, D::Error> {
        self.decoder.decode(input)
    }

    fn path(&self) -> Option<FieldPath> {
        Some(self.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::prelude::*;
    use crate::refined::{NonEmptyText, Positive};

    /// Reads the whole input as-is.
    #[derive(Debug)]
    struct Text;

    impl Decoder<str> for Text {
        type Value = String;
        type Error = ValidationError;

        fn decode(&self, input: &str) -> Result<String, ValidationError> {
            Ok(input.to_string())
        }
    }

    #[derive(Debug)]
    struct Number;

    impl Decoder<str> for Number {
        type Value = i64;
        type Error = String;

        fn decode(&self, input: &str) -> Result<i64, String> {
            input.trim().parse::<i64>().map_err(|e| e.to_string())
        }

        fn path(&self) -> Option<FieldPath> {
            Some(FieldPath::root("n"))
        }
    }

    impl RefinementFailure for String {
        fn from_refinement(error: ValidationError) -> Self {
            error.to_string()
        }
    }

    #[test]
    fn test_refined_success_and_failure() {
        let decoder = Text.refined::<NonEmptyText>();
        assert_eq!(decoder.decode("abc").unwrap().get(), "abc");

        let err = decoder.decode("").unwrap_err();
        assert_eq!(err.refinement(), Some("NonEmptyText"));
        assert!(err.path().is_none());
    }

    #[test]
    fn test_base_failure_passes_through() {
        let decoder = Number.refined::<Positive>();
        assert_eq!(decoder.decode("x").unwrap_err(), "invalid digit found in string");
    }

    #[test]
    fn test_refinement_failure_uses_decoder_path() {
        let decoder = Number.refined::<Positive>();
        assert_eq!(*decoder.decode("7").unwrap(), 7);
        assert_eq!(
            decoder.decode("-7").unwrap_err(),
            "n: invalid Positive: Predicate failed: (-7 > 0)."
        );
    }

    #[test]
    fn test_at_overrides_path() {
        let decoder = Text.at(FieldPath::root("user").child("name")).refined::<NonEmptyText>();
        let err = decoder.decode("").unwrap_err();
        assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("user.name"));
    }

    #[test]
    fn test_validated_uses_validator_name() {
        let digits = Validator::new("Digits", forall(digit()));
        let decoder = Text.validated(digits);
        assert_eq!(decoder.decode("0042").unwrap(), "0042");

        let err = decoder.decode("4x").unwrap_err();
        assert_eq!(err.refinement(), Some("Digits"));
        assert_eq!(
            err.to_string(),
            "invalid Digits: Predicate failed at index 1: Predicate failed: isDigit('x')."
        );
    }
}
