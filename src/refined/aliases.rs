//! Ready-made refinements
//!
//! ```rust
//! use sluice::refined::{NonEmptyString, Percentage, PortNumber, PosInt};
//!
//! let name = NonEmptyString::new("Alice".to_string()).unwrap();
//! let age = PosInt::<u32>::new(25).unwrap();
//! let score = Percentage::<i32>::new(100).unwrap();
//! let port = PortNumber::<u16>::new(8080).unwrap();
//!
//! assert!(PortNumber::<u16>::new(0).is_err());
//! ```

use super::Refined;
use crate::predicate::prelude::*;
use crate::refinement;

refinement! {
    /// Not empty (counted in chars)
    pub NonEmptyText: String => non_empty();

    /// No leading or trailing whitespace
    pub TrimmedText: String => trimmed();

    /// `> 0`
    pub Positive: i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64 => positive();

    /// `< 0`
    pub Negative: i8, i16, i32, i64, isize, f32, f64 => negative();

    /// `>= 0`
    pub NonNegative: i8, i16, i32, i64, isize, f32, f64 => non_negative();

    /// `<= 0`
    pub NonPositive: i8, i16, i32, i64, isize, f32, f64 => non_positive();

    /// `[0, 100]`
    pub Percent: i32, i64, u8, u32, u64, f32, f64 => closed(0 as _, 100 as _);

    /// TCP/UDP port, `[1, 65535]`
    pub Port: u16, i32, u32 => closed(1 as _, 65_535 as _)
}

/// A string with at least one character.
pub type NonEmptyString = Refined<String, NonEmptyText>;

/// A string with no surrounding whitespace.
pub type TrimmedString = Refined<String, TrimmedText>;

/// A number strictly greater than zero.
pub type PosInt<T> = Refined<T, Positive>;

/// A number strictly less than zero.
pub type NegInt<T> = Refined<T, Negative>;

/// A number greater than or equal to zero.
pub type NonNegInt<T> = Refined<T, NonNegative>;

/// A number less than or equal to zero.
pub type NonPosInt<T> = Refined<T, NonPositive>;

/// A number in `[0, 100]`.
pub type Percentage<T> = Refined<T, Percent>;

/// A port number in `[1, 65535]`.
pub type PortNumber<T> = Refined<T, Port>;
