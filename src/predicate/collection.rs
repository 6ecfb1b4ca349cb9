//! Size and element predicates
//!
//! Size checks work on anything implementing [`HasSize`]: strings count
//! `char`s, collections count elements. `forall`/`exists` work on anything
//! implementing [`Elements`]: strings yield `char`s, sequences yield items.
//!
//! ```rust
//! use sluice::predicate::prelude::*;
//!
//! assert!(max_size(5).evaluate("héllo"));
//! assert!(non_empty().evaluate(&vec![1]));
//! assert!(forall(gt(0)).evaluate(&vec![1, 2, 3]));
//! assert!(exists(upper_case()).evaluate("abC"));
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;

use super::Predicate;
use crate::rule::into_rule;

/// Values with a notion of size.
pub trait HasSize {
    /// Number of characters or elements.
    fn size(&self) -> usize;
}

impl HasSize for str {
    fn size(&self) -> usize {
        self.chars().count()
    }
}

impl HasSize for String {
    fn size(&self) -> usize {
        self.as_str().size()
    }
}

impl<T> HasSize for [T] {
    fn size(&self) -> usize {
        self.len()
    }
}

impl<T> HasSize for Vec<T> {
    fn size(&self) -> usize {
        self.len()
    }
}

impl<T> HasSize for VecDeque<T> {
    fn size(&self) -> usize {
        self.len()
    }
}

impl<T, S> HasSize for HashSet<T, S> {
    fn size(&self) -> usize {
        self.len()
    }
}

impl<T> HasSize for BTreeSet<T> {
    fn size(&self) -> usize {
        self.len()
    }
}

impl<K, V, S> HasSize for HashMap<K, V, S> {
    fn size(&self) -> usize {
        self.len()
    }
}

impl<K, V> HasSize for BTreeMap<K, V> {
    fn size(&self) -> usize {
        self.len()
    }
}

/// Values whose elements can be visited in order.
pub trait Elements {
    /// Element type
    type Item: ?Sized;

    /// Visit elements with their index until `f` returns `Some`.
    fn find_indexed<R, F>(&self, f: F) -> Option<R>
    where
        F: FnMut(usize, &Self::Item) -> Option<R>;
}

impl Elements for str {
    type Item = char;

    fn find_indexed<R, F>(&self, mut f: F) -> Option<R>
    where
        F: FnMut(usize, &char) -> Option<R>,
    {
        self.chars().enumerate().find_map(|(i, c)| f(i, &c))
    }
}

impl Elements for String {
    type Item = char;

    fn find_indexed<R, F>(&self, f: F) -> Option<R>
    where
        F: FnMut(usize, &char) -> Option<R>,
    {
        self.as_str().find_indexed(f)
    }
}

impl<T> Elements for [T] {
    type Item = T;

    fn find_indexed<R, F>(&self, mut f: F) -> Option<R>
    where
        F: FnMut(usize, &T) -> Option<R>,
    {
        self.iter().enumerate().find_map(|(i, x)| f(i, x))
    }
}

impl<T> Elements for Vec<T> {
    type Item = T;

    fn find_indexed<R, F>(&self, f: F) -> Option<R>
    where
        F: FnMut(usize, &T) -> Option<R>,
    {
        self.as_slice().find_indexed(f)
    }
}

impl<T> Elements for VecDeque<T> {
    type Item = T;

    fn find_indexed<R, F>(&self, mut f: F) -> Option<R>
    where
        F: FnMut(usize, &T) -> Option<R>,
    {
        self.iter().enumerate().find_map(|(i, x)| f(i, x))
    }
}

impl<T> Elements for BTreeSet<T> {
    type Item = T;

    fn find_indexed<R, F>(&self, mut f: F) -> Option<R>
    where
        F: FnMut(usize, &T) -> Option<R>,
    {
        self.iter().enumerate().find_map(|(i, x)| f(i, x))
    }
}

/// Value must have no elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Empty;

impl<C: HasSize + fmt::Debug + ?Sized> Predicate<C> for Empty {
    fn evaluate(&self, value: &C) -> bool {
        value.size() == 0
    }

    fn describe(&self, value: &C) -> String {
        format!("Predicate failed: isEmpty({:?}).", value)
    }

    fn name(&self) -> String {
        "Empty".to_string()
    }
}

/// Create an [`Empty`] predicate.
pub fn empty() -> Empty {
    Empty
}

into_rule!([] Empty);

/// Value must have at least one element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NonEmpty;

impl<C: HasSize + fmt::Debug + ?Sized> Predicate<C> for NonEmpty {
    fn evaluate(&self, value: &C) -> bool {
        value.size() > 0
    }

    fn describe(&self, value: &C) -> String {
        format!("Predicate isEmpty({:?}) did not fail.", value)
    }

    fn name(&self) -> String {
        "NonEmpty".to_string()
    }
}

/// Create a [`NonEmpty`] predicate.
pub fn non_empty() -> NonEmpty {
    NonEmpty
}

into_rule!([] NonEmpty);

macro_rules! size_bound {
    ($(#[$meta:meta])* $name:ident, $ctor:ident, $op:tt) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct $name(pub usize);

        impl<C: HasSize + fmt::Debug + ?Sized> Predicate<C> for $name {
            fn evaluate(&self, value: &C) -> bool {
                value.size() $op self.0
            }

            fn describe(&self, value: &C) -> String {
                format!(
                    "Predicate taking size({:?}) = {} failed: Predicate failed: ({} {} {}).",
                    value,
                    value.size(),
                    value.size(),
                    stringify!($op),
                    self.0
                )
            }

            fn name(&self) -> String {
                format!("{}({})", stringify!($name), self.0)
            }
        }

        #[doc = concat!("Create a [`", stringify!($name), "`] predicate.")]
        pub fn $ctor(bound: usize) -> $name {
            $name(bound)
        }

        into_rule!([] $name);
    };
}

size_bound!(
    /// At least `n` characters or elements.
    MinSize, min_size, >=
);
size_bound!(
    /// At most `n` characters or elements.
    MaxSize, max_size, <=
);
size_bound!(
    /// Exactly `n` characters or elements.
    Size, size, ==
);

/// Every element must satisfy the inner predicate.
///
/// The failure names the first offending index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Forall<P>(pub P);

impl<C, P> Predicate<C> for Forall<P>
where
    C: Elements + fmt::Debug + ?Sized,
    P: Predicate<C::Item>,
{
    fn evaluate(&self, value: &C) -> bool {
        value
            .find_indexed(|_, item| (!self.0.evaluate(item)).then_some(()))
            .is_none()
    }

    fn describe(&self, value: &C) -> String {
        value
            .find_indexed(|i, item| {
                (!self.0.evaluate(item)).then(|| format!("Predicate failed at index {}: {}", i, self.0.describe(item)))
            })
            .unwrap_or_else(|| format!("Predicate {} did not fail for {:?}.", self.0.name(), value))
    }

    fn name(&self) -> String {
        format!("Forall({})", self.0.name())
    }
}

/// Create a [`Forall`] predicate.
pub fn forall<P>(predicate: P) -> Forall<P> {
    Forall(predicate)
}

into_rule!([P] Forall<P>);

/// At least one element must satisfy the inner predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exists<P>(pub P);

impl<C, P> Predicate<C> for Exists<P>
where
    C: Elements + fmt::Debug + ?Sized,
    P: Predicate<C::Item>,
{
    fn evaluate(&self, value: &C) -> bool {
        value
            .find_indexed(|_, item| self.0.evaluate(item).then_some(()))
            .is_some()
    }

    fn describe(&self, value: &C) -> String {
        format!("Predicate failed: no element of {:?} satisfies {}.", value, self.0.name())
    }

    fn name(&self) -> String {
        format!("Exists({})", self.0.name())
    }
}

/// Create an [`Exists`] predicate.
pub fn exists<P>(predicate: P) -> Exists<P> {
    Exists(predicate)
}

into_rule!([P] Exists<P>);
