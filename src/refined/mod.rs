//! Refined types: values that carry proof of a rule
//!
//! "Parse, don't validate": check raw data once at the boundary and let the
//! type carry the guarantee from then on.
//!
//! A refinement is a zero-sized marker type implementing [`Refinement<T>`]:
//! a semantic name plus a [`Rule<T>`](crate::Rule) built once and shared for
//! the process lifetime. Declare one with [`refinement!`](crate::refinement):
//!
//! ```rust
//! use sluice::predicate::prelude::*;
//! use sluice::{refinement, Refined};
//!
//! refinement! {
//!     /// Eight ASCII digits
//!     pub AccountNumber: String => Rule::leaf(size(8)).and(forall(digit()))
//! }
//!
//! type Account = Refined<String, AccountNumber>;
//!
//! let ok = Account::new("00000042".to_string()).unwrap();
//! assert_eq!(ok.get(), "00000042");
//!
//! let err = Account::new("42".to_string()).unwrap_err();
//! assert_eq!(err.refinement(), Some("AccountNumber"));
//! assert!(err.to_string().starts_with("invalid AccountNumber: "));
//! ```
//!
//! Ready-made refinements are exported from here too, e.g. [`PosInt`],
//! [`NonEmptyString`] and [`Percentage`].

mod aliases;
#[cfg(feature = "serde")]
mod serde_impl;
mod validation;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

pub use aliases::*;

use crate::error::ValidationError;
use crate::rule::Rule;

/// Type-level marker naming a rule over `T`.
///
/// Usually declared through [`refinement!`](crate::refinement), which builds
/// the rule lazily on first use. Manual impls must return the same rule on
/// every call.
pub trait Refinement<T>: 'static {
    /// Semantic name used to label failures, e.g. `AccountNumber`.
    fn name() -> &'static str;

    /// The rule every refined value satisfies.
    fn rule() -> &'static Rule<T>;
}

/// Declare refinement marker types.
///
/// `vis Name: Base1, Base2 => rule_expr` creates a unit struct `Name` and
/// implements [`Refinement<Base>`](crate::refined::Refinement) for each
/// base type. The rule expression is evaluated once per base type, so
/// generic predicates such as `positive()` pick up each base in turn. Any
/// predicate or [`Rule`](crate::Rule) is accepted.
///
/// ```rust
/// use sluice::predicate::prelude::*;
/// use sluice::{refinement, Refined};
///
/// refinement! {
///     /// Strictly positive even number
///     pub PositiveEven: i32, i64 => Rule::leaf(positive()).and(divisible(2))
/// }
///
/// assert!(Refined::<i32, PositiveEven>::new(4).is_ok());
/// assert!(Refined::<i64, PositiveEven>::new(3).is_err());
/// ```
#[macro_export]
macro_rules! refinement {
    ($($(#[$meta:meta])* $vis:vis $name:ident : $($base:ty),+ => $rule:expr);+ $(;)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            $vis struct $name;

            $(
                impl $crate::refined::Refinement<$base> for $name {
                    fn name() -> &'static str {
                        stringify!($name)
                    }

                    fn rule() -> &'static $crate::Rule<$base> {
                        static RULE: $crate::__private::OnceCell<$crate::Rule<$base>> =
                            $crate::__private::OnceCell::new();
                        RULE.get_or_init(|| $crate::Rule::from($rule))
                    }
                }
            )+
        )+
    };
}

/// A value of type `T` known to satisfy refinement `P`.
///
/// The field is private. The checked constructor is [`Refined::new`];
/// [`Refined::new_unchecked`] exists for data that was already validated.
/// No mutable access is handed out, so the guarantee holds for the
/// lifetime of the value.
///
/// `Refined<T, P>` has the same layout as `T`.
pub struct Refined<T, P: Refinement<T>> {
    value: T,
    _refinement: PhantomData<P>,
}

impl<T: 'static, P: Refinement<T>> Refined<T, P> {
    /// Check `value` against `P`'s rule.
    ///
    /// The error is labelled with `P::name()`.
    ///
    /// ```rust
    /// use sluice::refined::PosInt;
    ///
    /// assert!(PosInt::<i32>::new(42).is_ok());
    ///
    /// let err = PosInt::<i32>::new(-3).unwrap_err();
    /// assert_eq!(err.to_string(), "invalid Positive: Predicate failed: (-3 > 0).");
    /// ```
    pub fn new(value: T) -> Result<Self, ValidationError>
    where
        T: fmt::Debug,
    {
        match P::rule().check(&value) {
            Ok(()) => Ok(Self {
                value,
                _refinement: PhantomData,
            }),
            Err(failure) => {
                Err(ValidationError::new(failure, format!("{:?}", value)).with_refinement(P::name()))
            }
        }
    }

    /// Wrap `value` without checking it.
    ///
    /// Not unsafe in the memory sense, but nothing downstream re-checks:
    /// the caller guarantees the rule holds. Meant for values read back
    /// from trusted storage, or produced by code that preserves the rule.
    ///
    /// ```rust
    /// use sluice::refined::PosInt;
    ///
    /// // Trusted input only: this one is wrong and nobody notices.
    /// let n = PosInt::<i32>::new_unchecked(-1);
    /// assert_eq!(n.into_inner(), -1);
    /// ```
    #[inline]
    pub fn new_unchecked(value: T) -> Self {
        #[cfg(feature = "tracing")]
        tracing::trace!(refinement = P::name(), "refined value created without check");
        Self {
            value,
            _refinement: PhantomData,
        }
    }

    /// Borrow the inner value.
    #[inline]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Consume the wrapper, returning the inner value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Transform the inner value and check the result again.
    ///
    /// ```rust
    /// use sluice::refined::Percentage;
    ///
    /// let half = Percentage::<i32>::new(50).unwrap();
    /// assert!(half.clone().try_map(|p| p + 50).is_ok());
    /// assert!(half.try_map(|p| p * 3).is_err());
    /// ```
    pub fn try_map<F>(self, f: F) -> Result<Self, ValidationError>
    where
        T: fmt::Debug,
        F: FnOnce(T) -> T,
    {
        Self::new(f(self.value))
    }

    /// Whether `value` would be accepted, without constructing anything.
    pub fn is_valid(value: &T) -> bool {
        P::rule().evaluate(value)
    }
}

impl<T: fmt::Debug, P: Refinement<T>> fmt::Debug for Refined<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Refined")
            .field("value", &self.value)
            .field("refinement", &P::name())
            .finish()
    }
}

impl<T: Clone, P: Refinement<T>> Clone for Refined<T, P> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _refinement: PhantomData,
        }
    }
}

impl<T: Copy, P: Refinement<T>> Copy for Refined<T, P> {}

impl<T: PartialEq, P: Refinement<T>> PartialEq for Refined<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq, P: Refinement<T>> Eq for Refined<T, P> {}

impl<T: PartialOrd, P: Refinement<T>> PartialOrd for Refined<T, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<T: Ord, P: Refinement<T>> Ord for Refined<T, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T: Hash, P: Refinement<T>> Hash for Refined<T, P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T, P: Refinement<T>> AsRef<T> for Refined<T, P> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

impl<T, P: Refinement<T>> std::ops::Deref for Refined<T, P> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: fmt::Display, P: Refinement<T>> fmt::Display for Refined<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}
