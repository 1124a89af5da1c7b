//! Document value trees
//!
//! Two representations of the same document:
//! - wire: `serde_json::Value`, what the storage boundary persists and transports
//! - runtime: [`RuntimeValue`], what handler code operates on (rich values
//!   such as dates and document references instead of their wire encodings)

mod value;

pub use value::RuntimeValue;
