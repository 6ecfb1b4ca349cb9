//! # Sluice
//!
//! Refinement types for Rust: check raw data once at the boundary, then
//! carry the guarantee in the type.
//!
//! - [`predicate`]: named boolean tests with failure descriptions
//!   (`gt(0)`, `max_size(20)`, `forall(digit())`, `email()`, ...)
//! - [`Rule`]: composition with `Not`, `And`, `Or`, `AllOf`, `AnyOf`
//! - [`Refined<T, P>`]: a `T` known to satisfy refinement `P`, declared
//!   with [`refinement!`]
//! - [`Validation`]: accumulate every field failure of an entity
//! - [`Registry`]: refinements looked up by name at runtime
//! - [`codec`]: lift base decoders (text config, JSON, serde) to refined
//!   types
//!
//! ## Quick Example
//!
//! ```rust
//! use sluice::predicate::prelude::*;
//! use sluice::refined::Percentage;
//! use sluice::{refinement, Refined, Validation};
//!
//! refinement! {
//!     pub AccountNumber: String => Rule::leaf(size(8)).and(forall(digit()));
//!     pub Username: String => Rule::<String>::all_of([
//!         Rule::leaf(non_empty()),
//!         Rule::leaf(max_size(20)),
//!         Rule::leaf(forall(letter_or_digit())),
//!     ]);
//! }
//!
//! #[derive(Debug)]
//! struct Account {
//!     number: Refined<String, AccountNumber>,
//!     owner: Refined<String, Username>,
//!     score: Percentage<i32>,
//! }
//!
//! fn account(number: &str, owner: &str, score: i32) -> Validation<Account, sluice::ValidationErrors> {
//!     Validation::all((
//!         Refined::<_, AccountNumber>::validate_field(number.to_string(), "number"),
//!         Refined::<_, Username>::validate_field(owner.to_string(), "owner"),
//!         Percentage::validate_field(score, "score"),
//!     ))
//!     .map(|(number, owner, score)| Account { number, owner, score })
//! }
//!
//! assert!(account("00000042", "Cloud", 100).is_success());
//!
//! let errors = account("58", "!*Invalid", -3).into_result().unwrap_err();
//! assert_eq!(errors.len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod codec;
pub mod error;
pub mod nonempty;
pub mod predicate;
pub mod refined;
pub mod registry;
pub mod rule;
pub mod semigroup;
pub mod testing;
pub mod validation;

// Re-exports
pub use error::{Failure, FieldPath, ValidationError, ValidationErrors};
pub use nonempty::NonEmptyVec;
pub use refined::{Refined, Refinement};
pub use registry::{Registry, RegistryError, Validator};
pub use rule::Rule;
pub use semigroup::Semigroup;
pub use validation::Validation;

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::OnceCell;
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::codec::{Decoder, DecoderExt, RefinementFailure};
    pub use crate::error::{Failure, FieldPath, ValidationError, ValidationErrors};
    pub use crate::predicate::prelude::*;
    pub use crate::refined::{Refined, Refinement};
    pub use crate::registry::{Registry, Validator};
    pub use crate::semigroup::Semigroup;
    pub use crate::validation::Validation;
    pub use crate::refinement;
}
