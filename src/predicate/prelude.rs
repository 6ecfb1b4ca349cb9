//! Predicate prelude for convenient imports
//!
//! ```rust
//! use sluice::predicate::prelude::*;
//!
//! let age = Rule::leaf(ge(0)).and(le(150));
//! assert!(age.evaluate(&25));
//! assert!(age.check(&200).is_err());
//! ```

pub use super::{from_fn, FnPredicate, Predicate};
pub use crate::rule::Rule;

pub use super::char::{digit, letter, letter_or_digit, lower_case, upper_case, whitespace};
pub use super::collection::{
    empty, exists, forall, max_size, min_size, non_empty, size, Elements, HasSize,
};
pub use super::number::{
    closed, closed_open, divisible, eq, ge, gt, le, lt, negative, non_nan, non_negative,
    non_positive, open, open_closed, positive, Interval,
};
pub use super::string::{
    contains, email, ends_with, ipv4, matches_regex, starts_with, trimmed, valid_float, valid_int,
};
