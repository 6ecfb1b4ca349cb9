//! Numeric predicates
//!
//! Comparisons take their bound at construction time: `gt(0)`, `le(100)`,
//! `closed(1, 65_535)`. `positive()`/`negative()` compare against
//! `Default::default()`, which is zero for every primitive number.

use std::fmt;
use std::ops::{Bound, Rem};

use super::Predicate;
use crate::rule::into_rule;

macro_rules! comparison {
    ($(#[$meta:meta])* $name:ident, $ctor:ident, $op:tt) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq)]
        pub struct $name<N>(pub N);

        impl<N> Predicate<N> for $name<N>
        where
            N: PartialOrd + fmt::Debug + Send + Sync,
        {
            #[inline]
            fn evaluate(&self, value: &N) -> bool {
                *value $op self.0
            }

            fn describe(&self, value: &N) -> String {
                format!("Predicate failed: ({:?} {} {:?}).", value, stringify!($op), self.0)
            }

            fn name(&self) -> String {
                format!("{}({:?})", stringify!($name), self.0)
            }
        }

        #[doc = concat!("Create a [`", stringify!($name), "`] predicate.")]
        pub fn $ctor<N>(bound: N) -> $name<N>
        where
            N: PartialOrd + fmt::Debug + Send + Sync,
        {
            $name(bound)
        }

        into_rule!([N] $name<N>);
    };
}

comparison!(
    /// Value must be strictly greater than the bound.
    Greater, gt, >
);
comparison!(
    /// Value must be greater than or equal to the bound.
    GreaterEqual, ge, >=
);
comparison!(
    /// Value must be strictly less than the bound.
    Less, lt, <
);
comparison!(
    /// Value must be less than or equal to the bound.
    LessEqual, le, <=
);

/// Value must equal the given constant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Equal<N>(pub N);

impl<N> Predicate<N> for Equal<N>
where
    N: PartialEq + fmt::Debug + Send + Sync,
{
    #[inline]
    fn evaluate(&self, value: &N) -> bool {
        *value == self.0
    }

    fn describe(&self, value: &N) -> String {
        format!("Predicate failed: ({:?} == {:?}).", value, self.0)
    }

    fn name(&self) -> String {
        format!("Equal({:?})", self.0)
    }
}

/// Create an [`Equal`] predicate.
pub fn eq<N: PartialEq + fmt::Debug + Send + Sync>(value: N) -> Equal<N> {
    Equal(value)
}

into_rule!([N] Equal<N>);

/// Value > 0.
pub fn positive<N>() -> Greater<N>
where
    N: PartialOrd + Default + fmt::Debug + Send + Sync,
{
    Greater(N::default())
}

/// Value < 0.
pub fn negative<N>() -> Less<N>
where
    N: PartialOrd + Default + fmt::Debug + Send + Sync,
{
    Less(N::default())
}

/// Value >= 0.
pub fn non_negative<N>() -> GreaterEqual<N>
where
    N: PartialOrd + Default + fmt::Debug + Send + Sync,
{
    GreaterEqual(N::default())
}

/// Value <= 0.
pub fn non_positive<N>() -> LessEqual<N>
where
    N: PartialOrd + Default + fmt::Debug + Send + Sync,
{
    LessEqual(N::default())
}

/// Value must fall inside an interval; each end may be open, closed or unbounded.
///
/// ```rust
/// use sluice::predicate::prelude::*;
///
/// let pct = closed(0, 100);
/// assert!(pct.evaluate(&0));
/// assert!(pct.evaluate(&100));
/// assert!(!pct.evaluate(&101));
///
/// let unit = open(0.0, 1.0);
/// assert!(!unit.evaluate(&0.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval<N> {
    lower: Bound<N>,
    upper: Bound<N>,
}

impl<N> Interval<N> {
    /// Interval with explicit bounds.
    pub fn new(lower: Bound<N>, upper: Bound<N>) -> Self {
        Self { lower, upper }
    }
}

impl<N: fmt::Debug> fmt::Display for Interval<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.lower {
            Bound::Included(l) => write!(f, "[{:?}, ", l)?,
            Bound::Excluded(l) => write!(f, "({:?}, ", l)?,
            Bound::Unbounded => f.write_str("(.., ")?,
        }
        match &self.upper {
            Bound::Included(u) => write!(f, "{:?}]", u),
            Bound::Excluded(u) => write!(f, "{:?})", u),
            Bound::Unbounded => f.write_str("..)"),
        }
    }
}

impl<N> Predicate<N> for Interval<N>
where
    N: PartialOrd + fmt::Debug + Send + Sync,
{
    fn evaluate(&self, value: &N) -> bool {
        let above = match &self.lower {
            Bound::Included(l) => value >= l,
            Bound::Excluded(l) => value > l,
            Bound::Unbounded => true,
        };
        let below = match &self.upper {
            Bound::Included(u) => value <= u,
            Bound::Excluded(u) => value < u,
            Bound::Unbounded => true,
        };
        above && below
    }

    fn describe(&self, value: &N) -> String {
        format!("Predicate failed: ({:?} in {}).", value, self)
    }

    fn name(&self) -> String {
        format!("Interval{}", self)
    }
}

into_rule!([N] Interval<N>);

/// `[min, max]`
pub fn closed<N>(min: N, max: N) -> Interval<N> {
    Interval::new(Bound::Included(min), Bound::Included(max))
}

/// `(min, max)`
pub fn open<N>(min: N, max: N) -> Interval<N> {
    Interval::new(Bound::Excluded(min), Bound::Excluded(max))
}

/// `(min, max]`
pub fn open_closed<N>(min: N, max: N) -> Interval<N> {
    Interval::new(Bound::Excluded(min), Bound::Included(max))
}

/// `[min, max)`
pub fn closed_open<N>(min: N, max: N) -> Interval<N> {
    Interval::new(Bound::Included(min), Bound::Excluded(max))
}

/// Value must be an exact multiple of the divisor.
///
/// A zero divisor rejects everything rather than panicking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Divisible<N>(pub N);

impl<N> Predicate<N> for Divisible<N>
where
    N: Rem<Output = N> + PartialEq + Default + Copy + fmt::Debug + Send + Sync,
{
    fn evaluate(&self, value: &N) -> bool {
        self.0 != N::default() && *value % self.0 == N::default()
    }

    fn describe(&self, value: &N) -> String {
        format!("Predicate failed: ({:?} % {:?} == 0).", value, self.0)
    }

    fn name(&self) -> String {
        format!("Divisible({:?})", self.0)
    }
}

/// Create a [`Divisible`] predicate.
pub fn divisible<N>(divisor: N) -> Divisible<N> {
    Divisible(divisor)
}

into_rule!([N] Divisible<N>);

/// Floating point value must not be NaN.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NonNaN;

impl Predicate<f64> for NonNaN {
    fn evaluate(&self, value: &f64) -> bool {
        !value.is_nan()
    }

    fn describe(&self, value: &f64) -> String {
        format!("Predicate failed: ({:?} is not NaN).", value)
    }

    fn name(&self) -> String {
        "NonNaN".to_string()
    }
}

impl Predicate<f32> for NonNaN {
    fn evaluate(&self, value: &f32) -> bool {
        !value.is_nan()
    }

    fn describe(&self, value: &f32) -> String {
        format!("Predicate failed: ({:?} is not NaN).", value)
    }

    fn name(&self) -> String {
        "NonNaN".to_string()
    }
}

/// Create a [`NonNaN`] predicate.
pub fn non_nan() -> NonNaN {
    NonNaN
}

into_rule!([] NonNaN);
