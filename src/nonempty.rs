//! Non-empty vector used for accumulated failures
//!
//! A failed validation always carries at least one error. `NonEmptyVec<T>`
//! encodes that in the type so callers never have to handle an "empty
//! failure" case.
//!
//! # Examples
//!
//! ```
//! use sluice::NonEmptyVec;
//!
//! let nev = NonEmptyVec::new("too short", vec!["not a digit"]);
//! assert_eq!(nev.head(), &"too short");
//! assert_eq!(nev.len(), 2);
//! ```

use crate::Semigroup;

/// A vector guaranteed to contain at least one element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyVec<T> {
    head: T,
    tail: Vec<T>,
}

impl<T> NonEmptyVec<T> {
    /// Create a non-empty vector from a first element and the rest.
    pub fn new(head: T, tail: Vec<T>) -> Self {
        Self { head, tail }
    }

    /// Create a non-empty vector holding exactly one element.
    ///
    /// ```
    /// use sluice::NonEmptyVec;
    ///
    /// let nev = NonEmptyVec::singleton(42);
    /// assert_eq!(nev.len(), 1);
    /// ```
    pub fn singleton(value: T) -> Self {
        Self::new(value, Vec::new())
    }

    /// Try to build a non-empty vector from a `Vec`.
    ///
    /// Returns `None` when the vector is empty.
    ///
    /// ```
    /// use sluice::NonEmptyVec;
    ///
    /// assert!(NonEmptyVec::from_vec(vec![1, 2]).is_some());
    /// assert!(NonEmptyVec::from_vec(Vec::<i32>::new()).is_none());
    /// ```
    pub fn from_vec(vec: Vec<T>) -> Option<Self> {
        let mut iter = vec.into_iter();
        let head = iter.next()?;
        Some(Self::new(head, iter.collect()))
    }

    /// The first element.
    pub fn head(&self) -> &T {
        &self.head
    }

    /// Number of elements, always at least 1.
    pub fn len(&self) -> usize {
        1 + self.tail.len()
    }

    /// Always `false`; present for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Apply `f` to every element, preserving order.
    pub fn map<U, F>(self, mut f: F) -> NonEmptyVec<U>
    where
        F: FnMut(T) -> U,
    {
        let head = f(self.head);
        NonEmptyVec::new(head, self.tail.into_iter().map(f).collect())
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        std::iter::once(&self.head).chain(self.tail.iter())
    }
}

// Concatenation, left elements first.
impl<T> Semigroup for NonEmptyVec<T> {
    fn combine(mut self, other: Self) -> Self {
        self.tail.push(other.head);
        self.tail.extend(other.tail);
        self
    }
}

impl<T> IntoIterator for NonEmptyVec<T> {
    type Item = T;
    type IntoIter = std::iter::Chain<std::iter::Once<T>, std::vec::IntoIter<T>>;

    fn into_iter(self) -> Self::IntoIter {
        std::iter::once(self.head).chain(self.tail)
    }
}
