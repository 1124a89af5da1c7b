//! Target validator tree derivation
//!
//! Maps the source schema tree onto the target system's structurally poorer
//! validator tree. The mapping runs once per schema at registration time;
//! the produced validators are immutable thereafter.
//!
//! # Design Principles
//!
//! - Two-pass derivation: synthesize bases everywhere, then reapply
//!   modifiers top-down (a field's optionality is a property of its
//!   position in the tree, not of its base type)
//! - Codec-governed positions synthesize from the codec's wire schema
//! - Unrepresentable nodes fall back to `any`; strict derivation is
//!   opt-in and reports the offending path

mod derive;
mod errors;
mod synthesize;
mod types;

pub use derive::{derive_fields, derive_validator, derive_validator_strict};
pub use errors::UnsupportedSchemaError;
pub use synthesize::synthesize;
pub use types::{ObjectField, Validator};
