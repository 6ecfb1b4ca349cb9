//! Semigroup trait for combining accumulated errors
//!
//! A Semigroup is a type with an associative binary operation. [`Validation`]
//! uses it to merge the failures of independent checks instead of keeping
//! only the first one.
//!
//! ```text
//! a.combine(b).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! # Examples
//!
//! ```
//! use sluice::Semigroup;
//!
//! let v1 = vec!["account number too short"];
//! let v2 = vec!["email has no @"];
//! assert_eq!(v1.combine(v2), vec!["account number too short", "email has no @"]);
//! ```
//!
//! [`Validation`]: crate::Validation

/// A type that supports an associative binary operation
///
/// # Laws
///
/// ```text
/// a.combine(b).combine(c) == a.combine(b.combine(c))
/// ```
///
/// `combine` takes both sides by value; clone first if the originals are
/// still needed.
pub trait Semigroup: Sized {
    /// Combine this value with another value associatively
    fn combine(self, other: Self) -> Self;
}

impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}
