//! Modifier reapplier, the externally-visible derivation entry point
//!
//! Derivation is two-pass: the synthesizer produces bases everywhere, then
//! this pass rebuilds object/array children recursively and layers the
//! normalized modifiers back on top-down. Container synthesis intentionally
//! does not apply modifiers to descendants, so nested optional/nullable
//! fields must be rebuilt here, at every depth, before the parent's own
//! optionality is applied.

use crate::schema::{analyze, FieldMap, SchemaNode, SchemaRef};

use super::errors::UnsupportedSchemaError;
use super::synthesize::synthesize;
use super::types::{ObjectField, Validator};

/// Derives the target validator for a full (possibly modifier-wrapped)
/// schema node.
///
/// Total: unrepresentable nodes fall back to the `any` validator. Use
/// [`derive_validator_strict`] to reject them instead.
pub fn derive_validator(node: &SchemaRef) -> Validator {
    let analyzed = analyze(node);

    let mut validator = match &*analyzed.base {
        SchemaNode::Object(fields) => Validator::Object(derive_fields(fields)),
        SchemaNode::Array(element) => Validator::Array(Box::new(derive_validator(element))),
        _ => synthesize(&analyzed.base),
    };

    if analyzed.nullable {
        validator = Validator::nullable(validator);
    }
    match analyzed.default {
        Some(default) => validator = Validator::optional_with_default(validator, default),
        None if analyzed.optional => validator = Validator::optional(validator),
        None => {}
    }

    validator
}

/// Derives a validator field list from an object field map.
///
/// This is the schema-registration surface: a plain field-name → schema
/// mapping in, the corresponding field-name → validator mapping out, with
/// default-value side metadata attached.
pub fn derive_fields(fields: &FieldMap) -> Vec<ObjectField> {
    fields
        .iter()
        .map(|(name, field)| ObjectField::new(name, derive_validator(field)))
        .collect()
}

/// Strict derivation: fails with a path-qualified error on the first node
/// that has no faithful target representation, instead of falling back to
/// `any`.
pub fn derive_validator_strict(node: &SchemaRef) -> Result<Validator, UnsupportedSchemaError> {
    check_representable(node, "$")?;
    Ok(derive_validator(node))
}

fn check_representable(node: &SchemaRef, path: &str) -> Result<(), UnsupportedSchemaError> {
    match &**node {
        SchemaNode::String
        | SchemaNode::Number
        | SchemaNode::Int
        | SchemaNode::BigInt
        | SchemaNode::Boolean
        | SchemaNode::Date
        | SchemaNode::Null
        | SchemaNode::Any => Ok(()),

        SchemaNode::Optional(inner)
        | SchemaNode::Nullable(inner)
        | SchemaNode::WithDefault(inner, _) => check_representable(inner, path),

        SchemaNode::Object(fields) => {
            for (name, field) in fields.iter() {
                check_representable(field, &format!("{}.{}", path, name))?;
            }
            Ok(())
        }
        SchemaNode::Array(element) => check_representable(element, &format!("{}[]", path)),
        SchemaNode::Record { keys, values } => {
            check_representable(keys, &format!("{}<keys>", path))?;
            check_representable(values, &format!("{}<values>", path))
        }
        SchemaNode::Tuple(members) => {
            for (i, member) in members.iter().enumerate() {
                check_representable(member, &format!("{}[{}]", path, i))?;
            }
            Ok(())
        }

        SchemaNode::Union(alternatives) => {
            for (i, alt) in alternatives.iter().enumerate() {
                check_representable(alt, &format!("{}|{}", path, i))?;
            }
            Ok(())
        }
        SchemaNode::DiscriminatedUnion { variants, .. } => {
            for (i, variant) in variants.iter().enumerate() {
                check_representable(variant, &format!("{}|{}", path, i))?;
            }
            Ok(())
        }
        SchemaNode::Enum(_) => Ok(()),
        SchemaNode::Literal(value) => match value {
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => Err(
                UnsupportedSchemaError::new(path, node.kind_name()),
            ),
            _ => Ok(()),
        },

        SchemaNode::Codec(_) | SchemaNode::CodecName(_) | SchemaNode::Brand { .. } => {
            match crate::codec::find_codec(node) {
                Some(codec) => check_representable(codec.wire_schema(), path),
                None if crate::codec::is_codec_like(node) => {
                    Err(UnsupportedSchemaError::new(path, node.kind_name()))
                }
                None => match &**node {
                    SchemaNode::Brand { inner, .. } => check_representable(inner, path),
                    _ => Err(UnsupportedSchemaError::new(path, node.kind_name())),
                },
            }
        }

        SchemaNode::Transform { .. } | SchemaNode::Intersection(_) => {
            Err(UnsupportedSchemaError::new(path, node.kind_name()))
        }
        SchemaNode::Lazy(lazy) => match lazy.resolve() {
            // Strictness stops at the reference: the referent is checked
            // when it is registered itself, and chasing it here would not
            // terminate on self-referential schemas.
            Some(_) => Ok(()),
            None => Err(UnsupportedSchemaError::new(path, node.kind_name())),
        },
    }
}
