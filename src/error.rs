//! Structured validation failures
//!
//! Failures are values, never panics. They nest the way the checks nest:
//!
//! - [`PredicateFailure`]: one predicate rejected a value.
//! - [`CompositeFailure`]: an `And`/`Or`/`AllOf`/`AnyOf` node failed, carrying
//!   the sub-failure(s) it chose to report.
//! - [`ValidationError`]: a failure bound to the rejected value, and
//!   optionally to a field path and the refinement's semantic name.
//! - [`ValidationErrors`]: the non-empty, ordered list produced by
//!   accumulating validation across a whole entity.
//!
//! `Display` output is meant for developer logs. Mapping it to end-user text
//! is up to the application.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use crate::{NonEmptyVec, Semigroup};

/// One segment of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Named field, e.g. `email`
    Field(String),
    /// Position in a sequence
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Field(name)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Location of a value inside a larger structure, rendered as `address.lines[2]`.
///
/// ```
/// use sluice::error::FieldPath;
///
/// let path = FieldPath::root("address").child("lines").child(2usize);
/// assert_eq!(path.to_string(), "address.lines[2]");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// A path with a single segment.
    pub fn root(segment: impl Into<PathSegment>) -> Self {
        Self {
            segments: vec![segment.into()],
        }
    }

    /// Append a segment.
    pub fn child(mut self, segment: impl Into<PathSegment>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Prepend a segment, used when a nested entity is validated inside a parent.
    pub fn prefixed(mut self, segment: impl Into<PathSegment>) -> Self {
        self.segments.insert(0, segment.into());
        self
    }

    /// The segments, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Whether the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// A single predicate rejected a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateFailure {
    /// Structural name of the predicate, e.g. `Greater(0)`
    pub predicate: String,
    /// Rendered failure message
    pub message: String,
}

impl fmt::Display for PredicateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// The combinator whose resolution failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Both sides had to hold
    And,
    /// At least one side had to hold
    Or,
    /// Every rule in a sequence had to hold
    AllOf,
    /// At least one rule in a sequence had to hold
    AnyOf,
}

/// A composite rule failed.
///
/// `And` and `AllOf` carry exactly one cause (the first failing rule).
/// `Or` carries both sides and `AnyOf` carries every alternative, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeFailure {
    /// Which combinator failed
    pub combinator: Combinator,
    /// Structural rendering of the failing rule
    pub rule: String,
    /// Reported sub-failures
    pub causes: Vec<Failure>,
}

impl fmt::Display for CompositeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.combinator, self.causes.as_slice()) {
            (Combinator::And | Combinator::AllOf, [cause, ..]) => write!(f, "{}", cause),
            (Combinator::Or, [left, right]) => write!(
                f,
                "Both predicates of {} failed. Left: {} Right: {}",
                self.rule, left, right
            ),
            (_, causes) => {
                write!(f, "All predicates of {} failed: ", self.rule)?;
                for (i, cause) in causes.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{}", cause)?;
                }
                Ok(())
            }
        }
    }
}

/// Why a rule rejected a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// A leaf predicate (or a negation) failed
    Predicate(PredicateFailure),
    /// A combinator failed
    Composite(CompositeFailure),
}

impl Failure {
    pub(crate) fn predicate(predicate: String, message: String) -> Self {
        Failure::Predicate(PredicateFailure { predicate, message })
    }

    pub(crate) fn composite(combinator: Combinator, rule: String, causes: Vec<Failure>) -> Self {
        Failure::Composite(CompositeFailure {
            combinator,
            rule,
            causes,
        })
    }

    /// The leaf failures reachable from this failure, in report order.
    ///
    /// Handy for mapping causes to end-user messages.
    pub fn leaves(&self) -> Vec<&PredicateFailure> {
        match self {
            Failure::Predicate(p) => vec![p],
            Failure::Composite(c) => c.causes.iter().flat_map(Failure::leaves).collect(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Predicate(p) => p.fmt(f),
            Failure::Composite(c) => c.fmt(f),
        }
    }
}

impl StdError for Failure {}

/// A value was rejected by a rule.
///
/// Displays as `[<path>: ][invalid <Refinement>: ]<failure>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    path: Option<FieldPath>,
    refinement: Option<Cow<'static, str>>,
    failure: Failure,
    value: String,
}

impl ValidationError {
    /// Create an error for a rejected value with no label or path.
    pub fn new(failure: Failure, value: impl Into<String>) -> Self {
        Self {
            path: None,
            refinement: None,
            failure,
            value: value.into(),
        }
    }

    /// Label the error with the refinement's semantic name.
    pub fn with_refinement(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.refinement = Some(name.into());
        self
    }

    /// Attach a field path, replacing any existing one.
    pub fn with_path(mut self, path: FieldPath) -> Self {
        self.path = Some(path);
        self
    }

    /// Prefix the path with an enclosing segment.
    pub fn within(mut self, segment: impl Into<PathSegment>) -> Self {
        self.path = Some(match self.path.take() {
            Some(path) => path.prefixed(segment),
            None => FieldPath::root(segment),
        });
        self
    }

    /// Field path, if the error was produced for a named field.
    pub fn path(&self) -> Option<&FieldPath> {
        self.path.as_ref()
    }

    /// Semantic name of the refinement that failed.
    pub fn refinement(&self) -> Option<&str> {
        self.refinement.as_deref()
    }

    /// The structured failure.
    pub fn failure(&self) -> &Failure {
        &self.failure
    }

    /// `{:?}` rendering of the rejected value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "{}: ", path)?;
        }
        if let Some(name) = &self.refinement {
            write!(f, "invalid {}: ", name)?;
        }
        write!(f, "{}", self.failure)
    }
}

impl StdError for ValidationError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.failure)
    }
}

/// Every failure collected while validating an entity, in check order.
///
/// Never empty and never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(NonEmptyVec<ValidationError>);

impl ValidationErrors {
    /// Wrap a single error.
    pub fn single(error: ValidationError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Build from a list; `None` when the list is empty.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Number of errors, at least 1.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The error of the first failing check.
    pub fn first(&self) -> &ValidationError {
        self.0.head()
    }

    /// Iterate in check order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Prefix every error's path, used for nested entities.
    pub fn within(self, segment: impl Into<PathSegment>) -> Self {
        let segment = segment.into();
        Self(self.0.map(|e| e.within(segment.clone())))
    }

    /// The underlying non-empty list.
    pub fn into_inner(self) -> NonEmptyVec<ValidationError> {
        self.0
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self::single(error)
    }
}

impl Semigroup for ValidationErrors {
    fn combine(self, other: Self) -> Self {
        Self(self.0.combine(other.0))
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = <NonEmptyVec<ValidationError> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl StdError for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(message: &str) -> Failure {
        Failure::predicate("P".to_string(), message.to_string())
    }

    #[test]
    fn test_path_display() {
        let path = FieldPath::root("user").child("emails").child(0usize);
        assert_eq!(path.to_string(), "user.emails[0]");
        assert_eq!(FieldPath::root(3usize).to_string(), "[3]");
    }

    #[test]
    fn test_validation_error_display_layers() {
        let bare = ValidationError::new(leaf("too short"), "\"58\"");
        assert_eq!(bare.to_string(), "too short");

        let labelled = bare.clone().with_refinement("AccountNumber");
        assert_eq!(labelled.to_string(), "invalid AccountNumber: too short");

        let placed = labelled.within("accountNumber");
        assert_eq!(placed.to_string(), "accountNumber: invalid AccountNumber: too short");
        assert_eq!(placed.value(), "\"58\"");
    }

    #[test]
    fn test_within_prefixes_existing_path() {
        let err = ValidationError::new(leaf("x"), "1")
            .with_path(FieldPath::root("zip"))
            .within("address");
        assert_eq!(err.path().unwrap().to_string(), "address.zip");
    }

    #[test]
    fn test_or_failure_reports_both_sides() {
        let failure = Failure::composite(
            Combinator::Or,
            "(A || B)".to_string(),
            vec![leaf("a failed"), leaf("b failed")],
        );
        assert_eq!(
            failure.to_string(),
            "Both predicates of (A || B) failed. Left: a failed Right: b failed"
        );
    }

    #[test]
    fn test_and_failure_reports_single_cause() {
        let failure = Failure::composite(Combinator::And, "(A && B)".to_string(), vec![leaf("a failed")]);
        assert_eq!(failure.to_string(), "a failed");
    }

    #[test]
    fn test_any_of_concatenates() {
        let failure = Failure::composite(
            Combinator::AnyOf,
            "AnyOf(A, B, C)".to_string(),
            vec![leaf("a"), leaf("b"), leaf("c")],
        );
        assert_eq!(failure.to_string(), "All predicates of AnyOf(A, B, C) failed: a; b; c");
        assert_eq!(failure.leaves().len(), 3);
    }

    #[test]
    fn test_errors_combine_and_display() {
        let a = ValidationErrors::single(ValidationError::new(leaf("a"), "1"));
        let b = ValidationErrors::single(ValidationError::new(leaf("b"), "2"));
        let all = a.combine(b);
        assert_eq!(all.len(), 2);
        assert_eq!(all.first().to_string(), "a");
        assert_eq!(all.to_string(), "a\nb");
    }

    #[test]
    fn test_errors_source_chain() {
        let err = ValidationError::new(leaf("a"), "1");
        assert!(StdError::source(&err).is_some());
    }
}
