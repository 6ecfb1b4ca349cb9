//! Testing utilities
//!
//! Assertion macros for [`Validation`](crate::Validation) and refined
//! types, plus `proptest` support behind the `proptest` feature.
//!
//! ```rust
//! use sluice::refined::PosInt;
//! use sluice::{assert_failure, assert_refines, assert_rejects, assert_success, Validation};
//!
//! assert_success!(Validation::<_, Vec<String>>::success(42));
//! assert_failure!(Validation::<i32, _>::failure(vec!["error".to_string()]));
//!
//! let n = assert_refines!(PosInt<i32>, 5);
//! assert_eq!(*n, 5);
//!
//! let err = assert_rejects!(PosInt<i32>, 0);
//! assert_eq!(err.refinement(), Some("Positive"));
//! ```

/// Assert that a validation succeeds.
///
/// Panics with the errors if the validation is a `Failure`.
#[macro_export]
macro_rules! assert_success {
    ($validation:expr) => {
        match $validation {
            $crate::Validation::Success(_) => {}
            $crate::Validation::Failure(e) => {
                panic!("Expected Success, got Failure: {:?}", e);
            }
        }
    };
}

/// Assert that a validation fails.
///
/// Panics with the value if the validation is a `Success`.
#[macro_export]
macro_rules! assert_failure {
    ($validation:expr) => {
        match $validation {
            $crate::Validation::Failure(_) => {}
            $crate::Validation::Success(v) => {
                panic!("Expected Failure, got Success: {:?}", v);
            }
        }
    };
}

/// Assert that a validation fails with specific errors.
///
/// ```rust
/// use sluice::{Validation, assert_validation_errors};
///
/// let val = Validation::<i32, _>::failure(vec!["error1", "error2"]);
/// assert_validation_errors!(val, vec!["error1", "error2"]);
/// ```
#[macro_export]
macro_rules! assert_validation_errors {
    ($validation:expr, $expected:expr) => {
        match $validation {
            $crate::Validation::Failure(errors) => {
                assert_eq!(errors, $expected);
            }
            $crate::Validation::Success(v) => {
                panic!(
                    "Expected Failure with errors {:?}, got Success: {:?}",
                    $expected, v
                );
            }
        }
    };
}

/// Assert that a raw value refines to the given `Refined` type, yielding it.
#[macro_export]
macro_rules! assert_refines {
    ($refined:ty, $value:expr) => {
        match <$refined>::new($value) {
            Ok(refined) => refined,
            Err(e) => panic!("Expected value to refine, got: {}", e),
        }
    };
}

/// Assert that a raw value is rejected by the given `Refined` type, yielding
/// the [`ValidationError`](crate::ValidationError).
#[macro_export]
macro_rules! assert_rejects {
    ($refined:ty, $value:expr) => {
        match <$refined>::new($value) {
            Err(e) => e,
            Ok(refined) => panic!("Expected rejection, got: {:?}", refined),
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
use crate::{Refined, Refinement, Validation};

/// Failures are drawn three times as often as successes.
#[cfg(feature = "proptest")]
impl<T, E> Arbitrary for Validation<T, E>
where
    T: Arbitrary + 'static,
    E: Arbitrary + 'static,
{
    type Parameters = (T::Parameters, E::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with((value, errors): Self::Parameters) -> Self::Strategy {
        let success = any_with::<T>(value).prop_map(Validation::Success);
        let failure = any_with::<E>(errors).prop_map(Validation::Failure);
        prop_oneof![1 => success, 3 => failure].boxed()
    }
}

/// Strategy producing only values that refine to `Refined<T, P>`.
///
/// Raw values the rule rejects are filtered out, so the base strategy
/// should mostly hit the accepted range.
///
/// ```rust,ignore
/// use proptest::prelude::*;
/// use sluice::refined::Percentage;
/// use sluice::testing::refined;
///
/// proptest! {
///     #[test]
///     fn percent_in_range(p in refined::<i32, _, _>(-10..110)) {
///         let p: Percentage<i32> = p;
///         prop_assert!((0..=100).contains(p.get()));
///     }
/// }
/// ```
#[cfg(feature = "proptest")]
pub fn refined<T, P, S>(base: S) -> impl Strategy<Value = Refined<T, P>>
where
    S: Strategy<Value = T>,
    T: std::fmt::Debug + 'static,
    P: Refinement<T>,
{
    base.prop_filter_map("rejected by refinement", |raw| Refined::new(raw).ok())
}
