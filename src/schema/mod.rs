//! Source schema description tree
//!
//! Application code describes data once with a composable tree of
//! [`SchemaNode`]s. The tree is built at startup, treated as immutable, and
//! shared by reference from every call site: validator derivation, document
//! transcoding, and hook resolution all read the same node graph.
//!
//! # Design Principles
//!
//! - One tagged variant per node kind; consumers dispatch with exhaustive
//!   matches, so adding a kind is a compile-time-checked change
//! - Modifier nodes (optional, nullable, default) each wrap exactly one
//!   inner node and may appear in any order
//! - Codec nodes pair a wire-side schema with a runtime-side schema

mod analyzer;
mod node;

pub use analyzer::{analyze, Analyzed};
pub use node::{FieldMap, LazySchema, SchemaNode, SchemaRef};
