//! Named rules registered at startup
//!
//! A [`Registry`] maps a semantic name such as `"PosInt"` to a rule over one
//! base type. Lookups are explicit and typed: asking for a name under the
//! wrong base type is an error, never a silent miss.
//!
//! Build the registry once, then share it by reference (it is `Send + Sync`
//! and never mutated after startup in normal use).
//!
//! ```rust
//! use sluice::predicate::prelude::*;
//! use sluice::Registry;
//!
//! let mut registry = Registry::with_defaults();
//! registry
//!     .register::<String>("AccountNumber", Rule::leaf(size(8)).and(forall(digit())))
//!     .unwrap();
//!
//! let account = registry.validator::<String>("AccountNumber").unwrap();
//! assert!(account.check(&"00000042".to_string()).is_ok());
//!
//! let pos = registry.validator::<i32>("PosInt").unwrap();
//! assert!(pos.check(&-1).is_err());
//!
//! assert!(registry.validator::<i64>("AccountNumber").is_err());
//! ```

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::error::{Failure, PathSegment, ValidationError, ValidationErrors};
use crate::predicate::prelude::*;
use crate::Validation;

/// Registry lookup or registration failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The name is already registered
    Duplicate {
        /// Rejected name
        name: String,
    },
    /// No rule is registered under the name
    NotFound {
        /// Requested name
        name: String,
    },
    /// The name exists, but for another base type
    TypeMismatch {
        /// Requested name
        name: String,
        /// Base type the rule was registered for
        registered: &'static str,
        /// Base type the caller asked for
        requested: &'static str,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Duplicate { name } => {
                write!(f, "refinement {} is already registered", name)
            }
            RegistryError::NotFound { name } => write!(f, "no refinement named {}", name),
            RegistryError::TypeMismatch {
                name,
                registered,
                requested,
            } => write!(
                f,
                "refinement {} validates {}, not {}",
                name, registered, requested
            ),
        }
    }
}

impl StdError for RegistryError {}

/// A named rule over `T`, handed out by [`Registry::validator`].
///
/// Cheap to clone; clones share the rule.
pub struct Validator<T: ?Sized> {
    name: Arc<str>,
    rule: Arc<Rule<T>>,
}

impl<T: ?Sized> Validator<T> {
    /// Pair a name with a rule outside any registry.
    pub fn new(name: impl Into<Arc<str>>, rule: impl Into<Rule<T>>) -> Self {
        Self {
            name: name.into(),
            rule: Arc::new(rule.into()),
        }
    }

    /// Registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The underlying rule.
    pub fn rule(&self) -> &Rule<T> {
        &self.rule
    }

    /// Check a value against the rule.
    pub fn check(&self, value: &T) -> Result<(), Failure> {
        self.rule.check(value)
    }
}

impl<T: fmt::Debug> Validator<T> {
    /// Check `value`, labelling any error with the registered name.
    pub fn validate(&self, value: T) -> Validation<T, ValidationErrors> {
        match self.rule.check(&value) {
            Ok(()) => Validation::Success(value),
            Err(failure) => Validation::Failure(ValidationErrors::single(self.reject(failure, &value))),
        }
    }

    /// Like [`validate`](Self::validate), for a named field of an entity.
    pub fn validate_field(
        &self,
        value: T,
        field: impl Into<PathSegment>,
    ) -> Validation<T, ValidationErrors> {
        self.validate(value).map_err(|errors| errors.within(field))
    }

    pub(crate) fn reject(&self, failure: Failure, value: &T) -> ValidationError {
        ValidationError::new(failure, format!("{:?}", value)).with_refinement(self.name.to_string())
    }
}

impl<T: ?Sized> Clone for Validator<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            rule: Arc::clone(&self.rule),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("name", &self.name)
            .field("rule", &format_args!("{}", self.rule))
            .finish()
    }
}

struct Entry {
    type_id: TypeId,
    type_name: &'static str,
    validator: Box<dyn Any + Send + Sync>,
}

/// Semantic name → typed rule.
#[derive(Default)]
pub struct Registry {
    entries: HashMap<String, Entry>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the common refinements:
    ///
    /// | name | base types |
    /// |------|------------|
    /// | `NonEmptyString`, `TrimmedString`, `Email`, `Ipv4` | `String` |
    /// | `PosInt`, `NegInt`, `NonNegInt`, `NonPosInt` | `i32`, `i64` (registered as `PosInt`, `PosInt64`, ...) |
    /// | `Percentage` | `i32` |
    /// | `PortNumber` | `u16` |
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let defaults: [(&str, Rule<String>); 4] = [
            ("NonEmptyString", non_empty().into()),
            ("TrimmedString", trimmed().into()),
            ("Email", email().into()),
            ("Ipv4", ipv4().into()),
        ];
        for (name, rule) in defaults {
            registry.insert(name, rule);
        }

        registry.insert::<i32>("PosInt", positive().into());
        registry.insert::<i32>("NegInt", negative().into());
        registry.insert::<i32>("NonNegInt", non_negative().into());
        registry.insert::<i32>("NonPosInt", non_positive().into());
        registry.insert::<i64>("PosInt64", positive().into());
        registry.insert::<i64>("NegInt64", negative().into());
        registry.insert::<i64>("NonNegInt64", non_negative().into());
        registry.insert::<i64>("NonPosInt64", non_positive().into());
        registry.insert::<i32>("Percentage", closed(0, 100).into());
        registry.insert::<u16>("PortNumber", closed(1, u16::MAX).into());
        registry
    }

    fn insert<T: ?Sized + 'static>(&mut self, name: &str, rule: Rule<T>) {
        self.entries.insert(
            name.to_string(),
            Entry {
                type_id: TypeId::of::<T>(),
                type_name: type_name::<T>(),
                validator: Box::new(Validator::new(name, rule)),
            },
        );
    }

    /// Register `rule` under `name` for base type `T`.
    ///
    /// Names are unique across base types.
    pub fn register<T: ?Sized + 'static>(
        &mut self,
        name: impl Into<String>,
        rule: impl Into<Rule<T>>,
    ) -> Result<&mut Self, RegistryError> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            #[cfg(feature = "tracing")]
            tracing::debug!(name = %name, "duplicate refinement registration rejected");
            return Err(RegistryError::Duplicate { name });
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(name = %name, base = type_name::<T>(), "refinement registered");
        self.insert(&name, rule.into());
        Ok(self)
    }

    /// Look up the validator registered under `name` for base type `T`.
    pub fn validator<T: ?Sized + 'static>(&self, name: &str) -> Result<Validator<T>, RegistryError> {
        let entry = self.entries.get(name).ok_or_else(|| {
            #[cfg(feature = "tracing")]
            tracing::debug!(name, "refinement lookup failed: unknown name");
            RegistryError::NotFound {
                name: name.to_string(),
            }
        })?;

        match entry.validator.downcast_ref::<Validator<T>>() {
            Some(validator) if entry.type_id == TypeId::of::<T>() => Ok(validator.clone()),
            _ => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    name,
                    registered = entry.type_name,
                    requested = type_name::<T>(),
                    "refinement lookup failed: base type mismatch"
                );
                Err(RegistryError::TypeMismatch {
                    name: name.to_string(),
                    registered: entry.type_name,
                    requested: type_name::<T>(),
                })
            }
        }
    }

    /// Whether any rule is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for name in self.names() {
            if let Some(entry) = self.entries.get(name) {
                map.entry(&name, &entry.type_name);
            }
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_registered() {
        let registry = Registry::with_defaults();
        assert!(registry.contains("NonEmptyString"));
        assert!(registry.contains("PosInt"));
        assert!(registry.contains("Percentage"));
        assert!(!registry.contains("AccountNumber"));
        assert_eq!(registry.len(), registry.names().len());
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());
        registry
            .register::<i32>("Even", from_fn("Even", |n: &i32| n % 2 == 0))
            .unwrap()
            .register::<i32>("Small", lt(10))
            .unwrap();

        let even = registry.validator::<i32>("Even").unwrap();
        assert_eq!(even.name(), "Even");
        assert!(even.check(&4).is_ok());
        assert!(even.check(&3).is_err());
        assert_eq!(registry.names(), vec!["Even", "Small"]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = Registry::with_defaults();
        let err = registry.register::<i32>("PosInt", gt(0)).unwrap_err();
        assert_eq!(
            err,
            RegistryError::Duplicate {
                name: "PosInt".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_name() {
        let registry = Registry::new();
        let err = registry.validator::<i32>("Nope").unwrap_err();
        assert_eq!(err.to_string(), "no refinement named Nope");
    }

    #[test]
    fn test_type_mismatch() {
        let registry = Registry::with_defaults();
        let err = registry.validator::<String>("PosInt").unwrap_err();
        assert!(matches!(
            err,
            RegistryError::TypeMismatch { ref name, registered: "i32", .. } if name == "PosInt"
        ));
        assert!(err.to_string().starts_with("refinement PosInt validates i32, not "));
    }

    #[test]
    fn test_unsized_base() {
        let mut registry = Registry::new();
        registry.register::<str>("Digits", forall(digit())).unwrap();
        let digits = registry.validator::<str>("Digits").unwrap();
        assert!(digits.check("0042").is_ok());
        assert!(registry.validator::<String>("Digits").is_err());
    }

    #[test]
    fn test_validate_labels_with_name() {
        let registry = Registry::with_defaults();
        let pct = registry.validator::<i32>("Percentage").unwrap();

        assert_eq!(pct.validate(100).into_result().unwrap(), 100);

        let errors = pct.validate_field(-3, "score").into_result().unwrap_err();
        assert_eq!(
            errors.to_string(),
            "score: invalid Percentage: Predicate failed: (-3 in [0, 100])."
        );
    }

    #[test]
    fn test_registry_is_send_and_sync() {
        fn assert_send_sync<X: Send + Sync>() {}
        assert_send_sync::<Registry>();
        assert_send_sync::<Validator<str>>();
    }
}
