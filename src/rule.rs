//! Composable rules over predicates
//!
//! A [`Rule<T>`] is a tree: leaves are predicates, inner nodes are
//! negation, binary `And`/`Or`, and variadic `AllOf`/`AnyOf`. Rules are
//! plain values, so they can be cloned, stored in a
//! [`Registry`](crate::Registry), and shared across threads.
//!
//! Evaluation is pure. `And` and `AllOf` stop at the first failing child,
//! `Or` and `AnyOf` stop at the first passing one.
//!
//! # Example
//!
//! ```rust
//! use sluice::predicate::prelude::*;
//!
//! let percentage = Rule::leaf(ge(0)).and(le(100));
//! assert!(percentage.evaluate(&42));
//!
//! let err = percentage.check(&101).unwrap_err();
//! assert_eq!(err.to_string(), "Predicate failed: (101 <= 100).");
//! assert_eq!(percentage.to_string(), "(GreaterEqual(0) && LessEqual(100))");
//!
//! let outside = !percentage;
//! assert!(outside.evaluate(&-1));
//! ```

use std::fmt;
use std::ops;
use std::sync::Arc;

use crate::error::{Combinator, Failure};
use crate::predicate::Predicate;

/// `From<Predicate> for Rule<_>` for a predicate type.
///
/// Written per type rather than as a blanket impl so that `Rule<T>` keeps
/// the reflexive `From<Rule<T>>`.
macro_rules! into_rule {
    ([$($generic:ident),*] $ty:ty) => {
        impl<Subject: ?Sized, $($generic),*> From<$ty> for $crate::rule::Rule<Subject>
        where
            $ty: $crate::predicate::Predicate<Subject> + 'static,
        {
            fn from(predicate: $ty) -> Self {
                $crate::rule::Rule::leaf(predicate)
            }
        }
    };
}

pub(crate) use into_rule;

/// A predicate tree over values of type `T`.
pub enum Rule<T: ?Sized> {
    /// A single predicate
    Leaf(Arc<dyn Predicate<T>>),
    /// Holds iff the inner rule fails
    Not(Box<Rule<T>>),
    /// Holds iff both sides hold
    And(Box<Rule<T>>, Box<Rule<T>>),
    /// Holds iff at least one side holds
    Or(Box<Rule<T>>, Box<Rule<T>>),
    /// Holds iff every rule holds; vacuously true when empty
    AllOf(Vec<Rule<T>>),
    /// Holds iff some rule holds; false when empty
    AnyOf(Vec<Rule<T>>),
}

impl<T: ?Sized> Rule<T> {
    /// Wrap a single predicate.
    pub fn leaf<P>(predicate: P) -> Self
    where
        P: Predicate<T> + 'static,
    {
        Rule::Leaf(Arc::new(predicate))
    }

    /// Both `self` and `other` must hold.
    pub fn and(self, other: impl Into<Rule<T>>) -> Self {
        Rule::And(Box::new(self), Box::new(other.into()))
    }

    /// At least one of `self` and `other` must hold.
    pub fn or(self, other: impl Into<Rule<T>>) -> Self {
        Rule::Or(Box::new(self), Box::new(other.into()))
    }

    /// Every rule must hold.
    ///
    /// ```rust
    /// use sluice::predicate::prelude::*;
    ///
    /// let username = Rule::<str>::all_of([
    ///     Rule::leaf(non_empty()),
    ///     Rule::leaf(max_size(20)),
    ///     Rule::leaf(forall(letter_or_digit())),
    /// ]);
    /// assert!(username.evaluate("Cloud42"));
    /// assert!(!username.evaluate("!*Invalid"));
    /// ```
    pub fn all_of<I>(rules: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Rule<T>>,
    {
        Rule::AllOf(rules.into_iter().map(Into::into).collect())
    }

    /// At least one rule must hold.
    pub fn any_of<I>(rules: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Rule<T>>,
    {
        Rule::AnyOf(rules.into_iter().map(Into::into).collect())
    }

    /// Check if the value satisfies this rule.
    pub fn evaluate(&self, value: &T) -> bool {
        match self {
            Rule::Leaf(p) => p.evaluate(value),
            Rule::Not(inner) => !inner.evaluate(value),
            Rule::And(left, right) => left.evaluate(value) && right.evaluate(value),
            Rule::Or(left, right) => left.evaluate(value) || right.evaluate(value),
            Rule::AllOf(rules) => rules.iter().all(|r| r.evaluate(value)),
            Rule::AnyOf(rules) => rules.iter().any(|r| r.evaluate(value)),
        }
    }

    /// Check the value, describing why it was rejected.
    ///
    /// `And`/`AllOf` report only the first failing child. `Or` reports both
    /// sides and `AnyOf` reports every alternative.
    pub fn check(&self, value: &T) -> Result<(), Failure> {
        match self {
            Rule::Leaf(p) => {
                if p.evaluate(value) {
                    Ok(())
                } else {
                    Err(Failure::predicate(p.name(), p.describe(value)))
                }
            }
            Rule::Not(inner) => {
                if inner.evaluate(value) {
                    Err(Failure::predicate(
                        self.to_string(),
                        format!("Predicate {} did not fail.", inner),
                    ))
                } else {
                    Ok(())
                }
            }
            Rule::And(left, right) => left
                .check(value)
                .and_then(|()| right.check(value))
                .map_err(|cause| Failure::composite(Combinator::And, self.to_string(), vec![cause])),
            Rule::Or(left, right) => {
                let left = match left.check(value) {
                    Ok(()) => return Ok(()),
                    Err(failure) => failure,
                };
                let right = match right.check(value) {
                    Ok(()) => return Ok(()),
                    Err(failure) => failure,
                };
                Err(Failure::composite(
                    Combinator::Or,
                    self.to_string(),
                    vec![left, right],
                ))
            }
            Rule::AllOf(rules) => rules
                .iter()
                .try_for_each(|r| r.check(value))
                .map_err(|cause| {
                    Failure::composite(Combinator::AllOf, self.to_string(), vec![cause])
                }),
            Rule::AnyOf(rules) => {
                let mut causes = Vec::with_capacity(rules.len());
                for rule in rules {
                    match rule.check(value) {
                        Ok(()) => return Ok(()),
                        Err(failure) => causes.push(failure),
                    }
                }
                Err(Failure::composite(
                    Combinator::AnyOf,
                    self.to_string(),
                    causes,
                ))
            }
        }
    }
}

/// Negate a predicate or rule.
///
/// ```rust
/// use sluice::predicate::prelude::*;
/// use sluice::rule::not;
///
/// let not_admin = not(eq("admin".to_string()));
/// assert!(not_admin.evaluate(&"guest".to_string()));
/// ```
pub fn not<T: ?Sized>(rule: impl Into<Rule<T>>) -> Rule<T> {
    Rule::Not(Box::new(rule.into()))
}

impl<T: ?Sized> Clone for Rule<T> {
    fn clone(&self) -> Self {
        match self {
            Rule::Leaf(p) => Rule::Leaf(Arc::clone(p)),
            Rule::Not(inner) => Rule::Not(inner.clone()),
            Rule::And(left, right) => Rule::And(left.clone(), right.clone()),
            Rule::Or(left, right) => Rule::Or(left.clone(), right.clone()),
            Rule::AllOf(rules) => Rule::AllOf(rules.clone()),
            Rule::AnyOf(rules) => Rule::AnyOf(rules.clone()),
        }
    }
}

fn write_list<T: ?Sized>(f: &mut fmt::Formatter<'_>, label: &str, rules: &[Rule<T>]) -> fmt::Result {
    write!(f, "{}(", label)?;
    for (i, rule) in rules.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", rule)?;
    }
    f.write_str(")")
}

impl<T: ?Sized> fmt::Display for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Leaf(p) => f.write_str(&p.name()),
            Rule::Not(inner) => write!(f, "!{}", inner),
            Rule::And(left, right) => write!(f, "({} && {})", left, right),
            Rule::Or(left, right) => write!(f, "({} || {})", left, right),
            Rule::AllOf(rules) => write_list(f, "AllOf", rules),
            Rule::AnyOf(rules) => write_list(f, "AnyOf", rules),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule({})", self)
    }
}

impl<T: ?Sized> Predicate<T> for Rule<T> {
    fn evaluate(&self, value: &T) -> bool {
        Rule::evaluate(self, value)
    }

    fn describe(&self, value: &T) -> String {
        match self.check(value) {
            Err(failure) => failure.to_string(),
            Ok(()) => format!("Rule {} holds.", self),
        }
    }

    fn name(&self) -> String {
        self.to_string()
    }
}

impl<T: ?Sized> ops::Not for Rule<T> {
    type Output = Rule<T>;

    fn not(self) -> Rule<T> {
        Rule::Not(Box::new(self))
    }
}

impl<T: ?Sized, R: Into<Rule<T>>> ops::BitAnd<R> for Rule<T> {
    type Output = Rule<T>;

    fn bitand(self, rhs: R) -> Rule<T> {
        self.and(rhs)
    }
}

impl<T: ?Sized, R: Into<Rule<T>>> ops::BitOr<R> for Rule<T> {
    type Output = Rule<T>;

    fn bitor(self, rhs: R) -> Rule<T> {
        self.or(rhs)
    }
}
