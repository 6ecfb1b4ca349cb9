//! Predicates: named, composable boolean tests with failure descriptions
//!
//! A [`Predicate<T>`] answers two questions about a value: does it hold
//! ([`evaluate`](Predicate::evaluate)), and if not, why
//! ([`describe`](Predicate::describe)). Every family here takes its bounds
//! at construction time, so new refinements never need changes to the
//! combinator engine in [`crate::rule`].
//!
//! Families:
//! - [`number`]: `gt`, `ge`, `lt`, `le`, `eq`, intervals, `divisible`, `non_nan`
//! - [`string`]: prefixes/suffixes, regex, trimmed, parseable ints/floats, IPv4, email
//! - [`collection`]: size bounds and `forall`/`exists` over strings and sequences
//! - [`char`]: character classes for use inside `forall`/`exists`
//!
//! # Example
//!
//! ```rust
//! use sluice::predicate::prelude::*;
//!
//! let p = gt(0);
//! assert!(p.evaluate(&5));
//! assert_eq!(p.describe(&-3), "Predicate failed: (-3 > 0).");
//!
//! let digits = forall(digit());
//! assert!(digits.evaluate("00000042"));
//! assert!(!digits.evaluate("0000004x"));
//! ```

pub mod char;
pub mod collection;
pub mod number;
pub mod string;

pub mod prelude;

use std::fmt;

use crate::rule::into_rule;

/// A named boolean test over values of type `T`.
///
/// Implementations must be pure: the same value always gives the same
/// answer, and evaluation has no side effects.
pub trait Predicate<T: ?Sized>: Send + Sync {
    /// Check if the value satisfies this predicate.
    fn evaluate(&self, value: &T) -> bool;

    /// Failure message for a rejected value.
    ///
    /// Only called after `evaluate` returned `false`.
    fn describe(&self, value: &T) -> String;

    /// Structural name, e.g. `Greater(0)`, used when rendering composite
    /// and negated rules.
    fn name(&self) -> String;
}

/// Ad-hoc predicate built from a closure. See [`from_fn`].
#[derive(Clone)]
pub struct FnPredicate<F> {
    name: String,
    f: F,
}

impl<F> fmt::Debug for FnPredicate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPredicate").field("name", &self.name).finish()
    }
}

impl<T, F> Predicate<T> for FnPredicate<F>
where
    T: fmt::Debug + ?Sized,
    F: Fn(&T) -> bool + Send + Sync,
{
    #[inline]
    fn evaluate(&self, value: &T) -> bool {
        (self.f)(value)
    }

    fn describe(&self, value: &T) -> String {
        format!("Predicate {} failed for {:?}.", self.name, value)
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

/// Build a predicate from a name and a closure.
///
/// ```rust
/// use sluice::predicate::{from_fn, Predicate};
///
/// let even = from_fn("Even", |n: &i32| n % 2 == 0);
/// assert!(even.evaluate(&4));
/// assert_eq!(even.describe(&3), "Predicate Even failed for 3.");
/// ```
pub fn from_fn<T, F>(name: impl Into<String>, f: F) -> FnPredicate<F>
where
    T: ?Sized,
    F: Fn(&T) -> bool + Send + Sync,
{
    FnPredicate {
        name: name.into(),
        f,
    }
}

into_rule!([F] FnPredicate<F>);
