//! Accumulating validation for refined types
//!
//! [`Refined::validate`] and [`Refined::validate_field`] return a
//! [`Validation`] so several fields can be checked together with
//! [`Validation::all`], collecting every failure instead of stopping at the
//! first.
//!
//! ```rust
//! use sluice::refined::{NonEmptyString, PosInt};
//! use sluice::Validation;
//!
//! struct User {
//!     name: NonEmptyString,
//!     age: PosInt<i32>,
//! }
//!
//! let result = Validation::all((
//!     NonEmptyString::validate_field(String::new(), "name"),
//!     PosInt::<i32>::validate_field(-5, "age"),
//! ))
//! .map(|(name, age)| User { name, age });
//!
//! let errors = result.into_result().err().unwrap();
//! assert_eq!(errors.len(), 2);
//! assert!(errors.to_string().starts_with("name: invalid NonEmptyText: "));
//! ```

use std::fmt;

use super::{Refined, Refinement};
use crate::error::{FieldPath, PathSegment, ValidationErrors};
use crate::Validation;

impl<T: fmt::Debug + 'static, P: Refinement<T>> Refined<T, P> {
    /// Check `value`, as a [`Validation`] ready for accumulation.
    pub fn validate(value: T) -> Validation<Self, ValidationErrors> {
        Validation::from_result(Self::new(value).map_err(ValidationErrors::single))
    }

    /// Check `value` as the named field of an enclosing entity.
    ///
    /// The error displays as `<field>: invalid <Refinement>: <message>`.
    pub fn validate_field(
        value: T,
        field: impl Into<PathSegment>,
    ) -> Validation<Self, ValidationErrors> {
        let path = FieldPath::root(field);
        Validation::from_result(
            Self::new(value).map_err(|e| ValidationErrors::single(e.with_path(path))),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::refined::{NonEmptyString, Percentage, PosInt};
    use crate::Validation;

    #[test]
    fn test_validate_success() {
        let v = PosInt::<i32>::validate(42);
        assert!(v.is_success());
    }

    #[test]
    fn test_validate_field_labels_error() {
        let v = Percentage::<i32>::validate_field(-3, "score");
        let errors = v.into_result().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.to_string(),
            "score: invalid Percent: Predicate failed: (-3 in [0, 100])."
        );
    }

    #[test]
    fn test_all_collects_every_field() {
        let result = Validation::all((
            NonEmptyString::validate_field(String::new(), "name"),
            PosInt::<i32>::validate_field(-1, "age"),
            Percentage::<i32>::validate_field(50, "score"),
        ));
        let errors = result.into_result().unwrap_err();
        let paths: Vec<String> = errors
            .iter()
            .map(|e| e.path().map(ToString::to_string).unwrap_or_default())
            .collect();
        assert_eq!(paths, vec!["name", "age"]);
    }

    #[test]
    fn test_nested_entity_prefix() {
        let errors = PosInt::<i32>::validate_field(0, "zip")
            .into_result()
            .unwrap_err()
            .within("address");
        assert_eq!(
            errors.to_string(),
            "address.zip: invalid Positive: Predicate failed: (0 > 0)."
        );
    }
}
