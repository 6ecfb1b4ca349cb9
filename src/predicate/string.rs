//! String predicates
//!
//! Every predicate here accepts anything that is `AsRef<str>`, so the same
//! value works for `str`, `String` and `Box<str>` rules.
//!
//! Size-based checks (`non_empty`, `max_size`, ...) live in
//! [`collection`](super::collection) because they apply to sequences too.

use std::fmt;
use std::net::Ipv4Addr;

use once_cell::sync::Lazy;
use regex::Regex;

use super::Predicate;
use crate::rule::into_rule;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$")
        .expect("email pattern is valid")
});

macro_rules! affix {
    ($(#[$meta:meta])* $name:ident, $ctor:ident, $method:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name(pub String);

        impl<S: AsRef<str> + ?Sized> Predicate<S> for $name {
            #[inline]
            fn evaluate(&self, value: &S) -> bool {
                value.as_ref().$method(self.0.as_str())
            }

            fn describe(&self, value: &S) -> String {
                format!("Predicate failed: {:?}.{}({:?}).", value.as_ref(), stringify!($method), self.0)
            }

            fn name(&self) -> String {
                format!("{}({:?})", stringify!($name), self.0)
            }
        }

        #[doc = concat!("Create a [`", stringify!($name), "`] predicate.")]
        pub fn $ctor(pattern: impl Into<String>) -> $name {
            $name(pattern.into())
        }

        into_rule!([] $name);
    };
}

affix!(
    /// String must start with the prefix.
    StartsWith, starts_with, starts_with
);
affix!(
    /// String must end with the suffix, e.g. a mail domain.
    EndsWith, ends_with, ends_with
);
affix!(
    /// String must contain the substring.
    Contains, contains, contains
);

/// String must match a regular expression in full.
///
/// The pattern is anchored on both ends, so `\d{8}` accepts exactly eight
/// digits and nothing around them.
///
/// ```rust
/// use sluice::predicate::prelude::*;
///
/// let eight_digits = matches_regex(r"\d{8}").unwrap();
/// assert!(eight_digits.evaluate("00000042"));
/// assert!(!eight_digits.evaluate("x00000042"));
/// ```
#[derive(Clone)]
pub struct MatchesRegex {
    source: String,
    regex: Regex,
}

impl MatchesRegex {
    /// Compile `pattern`, anchored to the whole input.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{})$", pattern))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as written by the caller.
    pub fn pattern(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for MatchesRegex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MatchesRegex").field(&self.source).finish()
    }
}

impl<S: AsRef<str> + ?Sized> Predicate<S> for MatchesRegex {
    fn evaluate(&self, value: &S) -> bool {
        self.regex.is_match(value.as_ref())
    }

    fn describe(&self, value: &S) -> String {
        format!("Predicate failed: {:?}.matches({:?}).", value.as_ref(), self.source)
    }

    fn name(&self) -> String {
        format!("MatchesRegex({:?})", self.source)
    }
}

/// Create a [`MatchesRegex`] predicate.
pub fn matches_regex(pattern: &str) -> Result<MatchesRegex, regex::Error> {
    MatchesRegex::new(pattern)
}

into_rule!([] MatchesRegex);

macro_rules! string_check {
    ($(#[$meta:meta])* $name:ident, $ctor:ident, $what:literal, |$s:ident| $body:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $name;

        impl<S: AsRef<str> + ?Sized> Predicate<S> for $name {
            fn evaluate(&self, value: &S) -> bool {
                let $s = value.as_ref();
                $body
            }

            fn describe(&self, value: &S) -> String {
                format!("Predicate failed: {:?} is not {}.", value.as_ref(), $what)
            }

            fn name(&self) -> String {
                stringify!($name).to_string()
            }
        }

        #[doc = concat!("Create a [`", stringify!($name), "`] predicate.")]
        pub fn $ctor() -> $name {
            $name
        }

        into_rule!([] $name);
    };
}

string_check!(
    /// No leading or trailing whitespace.
    Trimmed, trimmed, "trimmed", |s| s.trim() == s
);
string_check!(
    /// Parses as a signed 64-bit integer.
    ValidInt, valid_int, "a valid integer", |s| s.parse::<i64>().is_ok()
);
string_check!(
    /// Parses as a 64-bit float.
    ValidFloat, valid_float, "a valid float", |s| s.parse::<f64>().is_ok()
);
string_check!(
    /// Dotted-quad IPv4 address.
    Ipv4, ipv4, "a valid IPv4 address", |s| s.parse::<Ipv4Addr>().is_ok()
);
string_check!(
    /// Plausible e-mail address: local part, `@`, dotted domain.
    Email, email, "a valid email address", |s| EMAIL_REGEX.is_match(s)
);
