//! Character class predicates
//!
//! Mostly useful inside [`forall`](super::collection::forall) and
//! [`exists`](super::collection::exists) over strings.

use super::Predicate;
use crate::rule::into_rule;

macro_rules! char_class {
    ($(#[$meta:meta])* $name:ident, $ctor:ident, $label:literal, $test:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $name;

        impl Predicate<char> for $name {
            #[inline]
            fn evaluate(&self, value: &char) -> bool {
                let test: fn(&char) -> bool = $test;
                test(value)
            }

            fn describe(&self, value: &char) -> String {
                format!("Predicate failed: {}({:?}).", $label, value)
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

char_class!(
    /// ASCII digit `0-9`.
    Digit, digit, "isDigit", |c| c.is_ascii_digit()
);
char_class!(
    /// Alphabetic character.
    Letter, letter, "isLetter", |c| c.is_alphabetic()
);
char_class!(
    /// Alphabetic or numeric character.
    LetterOrDigit, letter_or_digit, "isLetterOrDigit", |c| c.is_alphanumeric()
);
char_class!(
    /// Whitespace character.
    Whitespace, whitespace, "isWhitespace", |c| c.is_whitespace()
);
char_class!(
    /// Uppercase character.
    UpperCase, upper_case, "isUpperCase", |c| c.is_uppercase()
);
char_class!(
    /// Lowercase character.
    LowerCase, lower_case, "isLowerCase", |c| c.is_lowercase()
);
