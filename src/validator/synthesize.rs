//! Validator synthesizer
//!
//! Produces the target validator for an already-unwrapped base node,
//! recursing into children for containers and choices and consulting the
//! codec detector for codec-governed positions. Total: unrepresentable
//! input falls back to the `any` validator, never an error.

use std::collections::HashSet;

use serde_json::Value;

use crate::codec::find_codec;
use crate::schema::{SchemaNode, SchemaRef};

use super::types::{ObjectField, Validator};

/// Synthesizes the base validator for a schema node.
///
/// Container children are synthesized without their field modifiers; the
/// modifier reapplier layers those on afterwards, so nested optionality is
/// applied exactly once.
pub fn synthesize(node: &SchemaRef) -> Validator {
    synthesize_guarded(node, &mut HashSet::new())
}

pub(crate) fn synthesize_guarded(node: &SchemaRef, seen: &mut HashSet<usize>) -> Validator {
    match &**node {
        SchemaNode::String => Validator::String,
        SchemaNode::Number => Validator::Float64,
        SchemaNode::Int | SchemaNode::BigInt => Validator::Int64,
        SchemaNode::Boolean => Validator::Boolean,
        // Same representation the date codec uses for its wire side.
        SchemaNode::Date => Validator::Float64,
        SchemaNode::Null => Validator::Null,
        SchemaNode::Any => Validator::Any,

        // The synthesizer contract is "base nodes only"; a modifier that
        // still reaches it contributes nothing beyond its inner node.
        SchemaNode::Optional(inner) | SchemaNode::Nullable(inner) => {
            synthesize_guarded(inner, seen)
        }
        SchemaNode::WithDefault(inner, _) => synthesize_guarded(inner, seen),

        SchemaNode::Object(fields) => Validator::Object(
            fields
                .iter()
                .map(|(name, field)| ObjectField::new(name, synthesize_guarded(field, seen)))
                .collect(),
        ),
        SchemaNode::Array(element) => {
            Validator::Array(Box::new(synthesize_guarded(element, seen)))
        }
        SchemaNode::Record { keys, values } => Validator::Record {
            keys: Box::new(synthesize_guarded(keys, seen)),
            values: Box::new(synthesize_guarded(values, seen)),
        },
        // The target has no tuple shape; the nearest is an array admitting
        // each member shape.
        SchemaNode::Tuple(members) => Validator::Array(Box::new(Validator::union(
            members
                .iter()
                .map(|m| synthesize_guarded(m, seen))
                .collect(),
        ))),

        SchemaNode::Union(alternatives) => Validator::union(
            alternatives
                .iter()
                .map(|alt| synthesize_guarded(alt, seen))
                .collect(),
        ),
        SchemaNode::DiscriminatedUnion { variants, .. } => Validator::union(
            variants
                .iter()
                .map(|v| synthesize_guarded(v, seen))
                .collect(),
        ),
        SchemaNode::Enum(values) => {
            Validator::union(values.iter().map(literal_validator).collect())
        }
        SchemaNode::Literal(value) => literal_validator(value),

        SchemaNode::Codec(_) | SchemaNode::CodecName(_) => match find_codec(node) {
            Some(codec) => synthesize_guarded(codec.wire_schema(), seen),
            None => Validator::Any,
        },
        SchemaNode::Brand { inner, .. } => match find_codec(node) {
            Some(codec) => synthesize_guarded(codec.wire_schema(), seen),
            None => synthesize_guarded(inner, seen),
        },

        SchemaNode::Transform { .. } | SchemaNode::Intersection(_) => Validator::Any,
        SchemaNode::Lazy(lazy) => {
            let identity = lazy.identity();
            if !seen.insert(identity) {
                return Validator::Any;
            }
            let validator = match lazy.resolve() {
                Some(resolved) => synthesize_guarded(&resolved, seen),
                None => Validator::Any,
            };
            seen.remove(&identity);
            validator
        }
    }
}

/// Literal validator for one exact value, or `any` when the value has no
/// faithful target representation.
fn literal_validator(value: &Value) -> Validator {
    match value {
        Value::Null => Validator::Null,
        Value::Bool(_) | Value::Number(_) | Value::String(_) => Validator::Literal(value.clone()),
        Value::Array(_) | Value::Object(_) => Validator::Any,
    }
}
