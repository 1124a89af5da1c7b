//! Collection schema registry and trial-parse resolution
//!
//! Collections are registered once at startup; registration order is
//! significant because trial-parse resolution accepts the first schema
//! whose wire shape parses the document. Uniqueness of wire shapes is not
//! validated.

use std::collections::HashMap;

use serde_json::Value;

use crate::schema::SchemaRef;

use super::errors::{TranscodeError, TranscodeResult};
use super::transcoder::validate_wire;

/// Registered collection-name → schema mapping, in registration order.
#[derive(Debug, Default)]
pub struct SchemaMap {
    entries: Vec<(String, SchemaRef)>,
    index: HashMap<String, usize>,
}

impl SchemaMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a collection schema. Duplicate names are rejected.
    pub fn register(
        &mut self,
        collection: impl Into<String>,
        schema: SchemaRef,
    ) -> TranscodeResult<()> {
        let collection = collection.into();
        if self.index.contains_key(&collection) {
            return Err(TranscodeError::AlreadyRegistered(collection));
        }
        self.index.insert(collection.clone(), self.entries.len());
        self.entries.push((collection, schema));
        Ok(())
    }

    /// Builder-style registration for startup code.
    pub fn with(mut self, collection: impl Into<String>, schema: SchemaRef) -> TranscodeResult<Self> {
        self.register(collection, schema)?;
        Ok(self)
    }

    pub fn get(&self, collection: &str) -> Option<&SchemaRef> {
        self.index
            .get(collection)
            .map(|&position| &self.entries[position].1)
    }

    /// Looks up a collection schema, failing with `UnknownCollection`.
    pub fn require(&self, collection: &str) -> TranscodeResult<&SchemaRef> {
        self.get(collection)
            .ok_or_else(|| TranscodeError::UnknownCollection(collection.to_string()))
    }

    /// Iterates collections in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaRef)> {
        self.entries.iter().map(|(name, schema)| (name.as_str(), schema))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves which registered schema an untyped wire document belongs
    /// to, by trying each candidate's wire shape in registration order.
    ///
    /// Heuristic: when two registered schemas can both parse the document,
    /// the first registered wins; no uniqueness check is made.
    pub fn find_by_trial_parse(&self, wire: &Value) -> Option<(&str, &SchemaRef)> {
        self.entries
            .iter()
            .find(|(_, schema)| validate_wire(schema, wire).is_ok())
            .map(|(name, schema)| (name.as_str(), schema))
    }
}
