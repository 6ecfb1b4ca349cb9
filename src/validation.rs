//! Validation type for accumulating errors
//!
//! `Validation` looks like `Result`, but combining two failed validations
//! keeps *both* errors (through [`Semigroup`]) instead of stopping at the
//! first. That is what lets a composite entity report every bad field in one
//! pass.
//!
//! # Examples
//!
//! ```
//! use sluice::Validation;
//!
//! let v1 = Validation::<i32, _>::failure(vec!["account number too short"]);
//! let v2 = Validation::<i32, _>::failure(vec!["score must be positive"]);
//!
//! assert_eq!(
//!     v1.and(v2),
//!     Validation::Failure(vec!["account number too short", "score must be positive"])
//! );
//! ```
//!
//! Tuples of validations combine in declaration order:
//!
//! ```
//! use sluice::{Validation, validation::ValidateAll};
//!
//! let result = (
//!     Validation::<_, Vec<&str>>::success(1),
//!     Validation::<_, Vec<&str>>::success("two"),
//!     Validation::<_, Vec<&str>>::success(3.0),
//! ).validate_all();
//!
//! assert_eq!(result, Validation::Success((1, "two", 3.0)));
//! ```

use crate::Semigroup;

/// A validation that either succeeds with a value or fails with accumulated errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation<T, E> {
    /// Successful validation with a value
    Success(T),
    /// Failed validation with accumulated errors
    Failure(E),
}

impl<T, E> Validation<T, E> {
    /// Create a successful validation
    #[inline]
    pub fn success(value: T) -> Self {
        Validation::Success(value)
    }

    /// Create a failed validation
    #[inline]
    pub fn failure(error: E) -> Self {
        Validation::Failure(error)
    }

    /// Create a validation from a `Result`
    ///
    /// ```
    /// use sluice::Validation;
    ///
    /// let v = Validation::from_result(Err::<i32, _>("bad"));
    /// assert_eq!(v, Validation::Failure("bad"));
    /// ```
    #[inline]
    pub fn from_result(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Validation::Success(value),
            Err(error) => Validation::Failure(error),
        }
    }

    /// Convert this validation into a `Result`
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Validation::Success(value) => Ok(value),
            Validation::Failure(error) => Err(error),
        }
    }

    /// Check if this validation is successful
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Validation::Success(_))
    }

    /// Check if this validation failed
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Validation::Failure(_))
    }

    /// Borrow the error, if any
    #[inline]
    pub fn errors(&self) -> Option<&E> {
        match self {
            Validation::Success(_) => None,
            Validation::Failure(error) => Some(error),
        }
    }

    /// Transform the success value if present
    ///
    /// This is where a composite constructor is applied once every field
    /// has been validated:
    ///
    /// ```
    /// use sluice::Validation;
    ///
    /// struct Point { x: i32, y: i32 }
    ///
    /// let p = Validation::<_, Vec<&str>>::success((1, 2)).map(|(x, y)| Point { x, y });
    /// assert!(p.is_success());
    /// ```
    #[inline]
    pub fn map<U, F>(self, f: F) -> Validation<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Validation::Success(value) => Validation::Success(f(value)),
            Validation::Failure(error) => Validation::Failure(error),
        }
    }

    /// Transform the error value if present
    #[inline]
    pub fn map_err<E2, F>(self, f: F) -> Validation<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Validation::Success(value) => Validation::Success(value),
            Validation::Failure(error) => Validation::Failure(f(error)),
        }
    }

    /// Chain a dependent validation.
    ///
    /// `f` only runs on success, so this is the one combinator that does
    /// short-circuit. Use it for checks that need an earlier value, never for
    /// independent fields.
    #[inline]
    pub fn and_then<U, F>(self, f: F) -> Validation<U, E>
    where
        F: FnOnce(T) -> Validation<U, E>,
    {
        match self {
            Validation::Success(value) => f(value),
            Validation::Failure(error) => Validation::Failure(error),
        }
    }
}

impl<T, E: Semigroup> Validation<T, E> {
    /// Combine all validations in a tuple (arity 1 to 12)
    ///
    /// Every element is inspected; errors are combined in tuple order.
    ///
    /// ```
    /// use sluice::Validation;
    ///
    /// let result = Validation::all((
    ///     Validation::<i32, _>::failure(vec!["first"]),
    ///     Validation::<&str, _>::failure(vec!["second"]),
    /// ));
    /// assert_eq!(result, Validation::Failure(vec!["first", "second"]));
    /// ```
    pub fn all<V>(validations: V) -> Self
    where
        V: ValidateAll<E, Output = T>,
    {
        validations.validate_all()
    }

    /// Combine two validations, accumulating errors
    ///
    /// Both sides are always inspected; when both fail the errors are
    /// combined left then right.
    pub fn and<U>(self, other: Validation<U, E>) -> Validation<(T, U), E> {
        match (self, other) {
            (Validation::Success(a), Validation::Success(b)) => Validation::Success((a, b)),
            (Validation::Failure(e1), Validation::Failure(e2)) => {
                Validation::Failure(e1.combine(e2))
            }
            (Validation::Failure(e), _) | (_, Validation::Failure(e)) => Validation::Failure(e),
        }
    }

    /// Combine a homogeneous list of validations
    ///
    /// ```
    /// use sluice::Validation;
    ///
    /// let result = Validation::all_vec(vec![
    ///     Validation::<i32, _>::failure(vec!["a"]),
    ///     Validation::success(2),
    ///     Validation::failure(vec!["b"]),
    /// ]);
    /// assert_eq!(result, Validation::Failure(vec!["a", "b"]));
    /// ```
    pub fn all_vec<I>(validations: I) -> Validation<Vec<T>, E>
    where
        I: IntoIterator<Item = Validation<T, E>>,
    {
        let mut successes = Vec::new();
        let mut errors: Option<E> = None;

        for validation in validations {
            match validation {
                Validation::Success(value) => successes.push(value),
                Validation::Failure(error) => errors = Some(accumulate(errors, error)),
            }
        }

        match errors {
            Some(error) => Validation::Failure(error),
            None => Validation::Success(successes),
        }
    }
}

#[inline]
fn accumulate<E: Semigroup>(acc: Option<E>, error: E) -> E {
    match acc {
        Some(acc) => acc.combine(error),
        None => error,
    }
}

/// Combine a tuple of validations, accumulating every error
pub trait ValidateAll<E: Semigroup> {
    /// The tuple of success values
    type Output;

    /// Combine all validations, accumulating errors in tuple order
    fn validate_all(self) -> Validation<Self::Output, E>;
}

macro_rules! impl_validate_all {
    ($($T:ident),+) => {
        impl<E: Semigroup, $($T),+> ValidateAll<E> for ($(Validation<$T, E>,)+) {
            type Output = ($($T,)+);

            #[allow(non_snake_case)]
            fn validate_all(self) -> Validation<Self::Output, E> {
                let ($($T,)+) = self;
                let mut errors: Option<E> = None;
                $(
                    let $T = match $T {
                        Validation::Success(value) => Some(value),
                        Validation::Failure(error) => {
                            errors = Some(accumulate(errors.take(), error));
                            None
                        }
                    };
                )+
                match errors {
                    Some(error) => Validation::Failure(error),
                    None => match ($($T,)+) {
                        ($(Some($T),)+) => Validation::Success(($($T,)+)),
                        _ => unreachable!("no error recorded, so every element succeeded"),
                    },
                }
            }
        }
    };
}

impl_validate_all!(T1);
impl_validate_all!(T1, T2);
impl_validate_all!(T1, T2, T3);
impl_validate_all!(T1, T2, T3, T4);
impl_validate_all!(T1, T2, T3, T4, T5);
impl_validate_all!(T1, T2, T3, T4, T5, T6);
impl_validate_all!(T1, T2, T3, T4, T5, T6, T7);
impl_validate_all!(T1, T2, T3, T4, T5, T6, T7, T8);
impl_validate_all!(T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_validate_all!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_validate_all!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
impl_validate_all!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result_round_trip() {
        assert_eq!(Validation::from_result(Ok::<_, ()>(1)).into_result(), Ok(1));
        assert_eq!(Validation::<i32, _>::from_result(Err("e")).into_result(), Err("e"));
    }

    #[test]
    fn test_and_success() {
        let v = Validation::<_, Vec<&str>>::success(1).and(Validation::success("x"));
        assert_eq!(v, Validation::Success((1, "x")));
    }

    #[test]
    fn test_and_keeps_single_failure() {
        let v = Validation::<i32, _>::success(1).and(Validation::<i32, _>::failure(vec!["right"]));
        assert_eq!(v, Validation::Failure(vec!["right"]));
    }

    #[test]
    fn test_and_accumulates_left_then_right() {
        let v = Validation::<i32, _>::failure(vec!["left"]).and(Validation::<i32, _>::failure(vec!["right"]));
        assert_eq!(v, Validation::Failure(vec!["left", "right"]));
    }

    #[test]
    fn test_and_then_short_circuits() {
        let mut called = false;
        let v = Validation::<i32, _>::failure(vec!["e"]).and_then(|x| {
            called = true;
            Validation::success(x + 1)
        });
        assert!(v.is_failure());
        assert!(!called);
    }

    #[test]
    fn test_all_vec_success_keeps_order() {
        let v = Validation::all_vec(vec![
            Validation::<_, Vec<&str>>::success(1),
            Validation::success(2),
            Validation::success(3),
        ]);
        assert_eq!(v, Validation::Success(vec![1, 2, 3]));
    }

    #[test]
    fn test_all_vec_empty_is_success() {
        let v = Validation::<i32, Vec<&str>>::all_vec(Vec::new());
        assert_eq!(v, Validation::Success(vec![]));
    }

    #[test]
    fn test_tuple_all_collects_every_failure() {
        let v = Validation::<(i32, i32, i32, i32), Vec<&str>>::all((
            Validation::failure(vec!["a"]),
            Validation::success(2),
            Validation::failure(vec!["c"]),
            Validation::failure(vec!["d"]),
        ));
        assert_eq!(v, Validation::Failure(vec!["a", "c", "d"]));
    }

    #[test]
    fn test_tuple_all_single() {
        let v = (Validation::<_, Vec<&str>>::success(7),).validate_all();
        assert_eq!(v, Validation::Success((7,)));
    }

    #[test]
    fn test_tuple_all_twelve() {
        let s = Validation::<u8, Vec<&str>>::success;
        let v = (s(1), s(2), s(3), s(4), s(5), s(6), s(7), s(8), s(9), s(10), s(11), s(12))
            .validate_all();
        assert_eq!(v, Validation::Success((1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12)));
    }

    #[test]
    fn test_errors_accessor() {
        assert_eq!(Validation::<i32, &str>::failure("e").errors(), Some(&"e"));
        assert_eq!(Validation::<i32, &str>::success(1).errors(), None);
    }
}
