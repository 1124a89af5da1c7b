//! Schema-parametrized document transcoding
//!
//! Every operation is two-phase: validate the document against the expected
//! shape (collecting every path-qualified issue), then walk the schema and
//! document together applying codec transforms in document position.
//! Unknown object keys pass through canonically in both directions, which
//! is what makes the wire round-trip law hold for storage-assigned fields.

use serde_json::Value;

use crate::codec::{date_codec, find_codec};
use crate::document::RuntimeValue;
use crate::schema::{analyze, SchemaNode, SchemaRef};

use super::errors::{Issue, TranscodeError, TranscodeResult, ValidationError};

/// Validates a wire document against a schema's wire-side shape.
///
/// The wire-side shape is derived transitively from codec wire schemas.
pub fn validate_wire(schema: &SchemaRef, wire: &Value) -> Result<(), ValidationError> {
    let mut issues = Vec::new();
    check_wire(schema, wire, "$", &mut issues);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(issues))
    }
}

/// Decodes a wire document into its runtime form.
///
/// Validates first; a non-conforming document fails with the full issue
/// list before any transform runs.
pub fn decode(schema: &SchemaRef, wire: &Value) -> TranscodeResult<RuntimeValue> {
    validate_wire(schema, wire)?;
    decode_value(schema, wire, "$")
}

/// Encodes a runtime document into its wire form.
///
/// Validates the runtime shape, applies every codec's encode transform,
/// then strips every key bound to the explicit absent marker. Explicit
/// nulls and never-set keys are preserved as-is.
pub fn encode(schema: &SchemaRef, runtime: &RuntimeValue) -> TranscodeResult<Value> {
    let mut issues = Vec::new();
    check_runtime(schema, runtime, "$", &mut issues);
    if !issues.is_empty() {
        return Err(ValidationError::new(issues).into());
    }
    encode_value(schema, runtime, "$")
}

/// Encodes a partial runtime document (a patch).
///
/// For object schemas, encodes only the fields present in the partial
/// input, each against its own sub-schema; absent required fields are never
/// demanded. Fields unknown to the schema pass through unencoded. For
/// non-object schemas the whole value is encoded against the full schema.
pub fn encode_partial(schema: &SchemaRef, partial: &RuntimeValue) -> TranscodeResult<Value> {
    let analyzed = analyze(schema);
    let (fields, map) = match (&*analyzed.base, partial.as_object()) {
        (SchemaNode::Object(fields), Some(map)) => (fields, map),
        _ => return encode(schema, partial),
    };

    let mut issues = Vec::new();
    for (name, value) in map {
        if value.is_absent() {
            continue;
        }
        if let Some(field) = fields.get(name) {
            check_runtime(field, value, &format!("$.{}", name), &mut issues);
        }
    }
    if !issues.is_empty() {
        return Err(ValidationError::new(issues).into());
    }

    let mut out = serde_json::Map::new();
    for (name, value) in map {
        if value.is_absent() {
            continue;
        }
        let encoded = match fields.get(name) {
            Some(field) => encode_value(field, value, &format!("$.{}", name))?,
            None => value.to_wire(),
        };
        out.insert(name.clone(), encoded);
    }
    Ok(Value::Object(out))
}

// ---------------------------------------------------------------------------
// Wire-side shape checking
// ---------------------------------------------------------------------------

fn check_wire(schema: &SchemaRef, wire: &Value, path: &str, issues: &mut Vec<Issue>) {
    let analyzed = analyze(schema);
    if analyzed.nullable && wire.is_null() {
        return;
    }
    check_wire_base(&analyzed.base, wire, path, issues);
}

fn check_wire_base(base: &SchemaRef, wire: &Value, path: &str, issues: &mut Vec<Issue>) {
    match &**base {
        SchemaNode::String => {
            if !wire.is_string() {
                issues.push(Issue::type_mismatch(path, "string", json_kind_name(wire)));
            }
        }
        SchemaNode::Number => {
            if !wire.is_number() {
                issues.push(Issue::type_mismatch(path, "number", json_kind_name(wire)));
            }
        }
        SchemaNode::Int | SchemaNode::BigInt => {
            if wire.as_i64().is_none() {
                issues.push(Issue::type_mismatch(path, "int", json_kind_name(wire)));
            }
        }
        SchemaNode::Boolean => {
            if !wire.is_boolean() {
                issues.push(Issue::type_mismatch(path, "boolean", json_kind_name(wire)));
            }
        }
        SchemaNode::Date => {
            if !wire.is_number() {
                issues.push(Issue::type_mismatch(
                    path,
                    "millisecond timestamp",
                    json_kind_name(wire),
                ));
            }
        }
        SchemaNode::Null => {
            if !wire.is_null() {
                issues.push(Issue::type_mismatch(path, "null", json_kind_name(wire)));
            }
        }
        SchemaNode::Any => {}

        SchemaNode::Literal(expected) => {
            if wire != expected {
                issues.push(Issue::type_mismatch(
                    path,
                    format!("literal {}", expected),
                    json_kind_name(wire),
                ));
            }
        }
        SchemaNode::Enum(values) => {
            if !values.contains(wire) {
                issues.push(Issue::type_mismatch(
                    path,
                    "one of the enum values",
                    json_kind_name(wire),
                ));
            }
        }

        SchemaNode::Object(fields) => {
            let Some(obj) = wire.as_object() else {
                issues.push(Issue::type_mismatch(path, "object", json_kind_name(wire)));
                return;
            };
            for (name, field) in fields.iter() {
                let field_path = format!("{}.{}", path, name);
                match obj.get(name) {
                    Some(value) => check_wire(field, value, &field_path, issues),
                    None => {
                        if !analyze(field).behaves_optional() {
                            issues.push(Issue::missing_field(field_path));
                        }
                    }
                }
            }
            // Keys the schema does not declare pass through unchecked.
        }
        SchemaNode::Array(element) => {
            let Some(items) = wire.as_array() else {
                issues.push(Issue::type_mismatch(path, "array", json_kind_name(wire)));
                return;
            };
            for (i, item) in items.iter().enumerate() {
                check_wire(element, item, &format!("{}[{}]", path, i), issues);
            }
        }
        SchemaNode::Record { values, .. } => {
            let Some(obj) = wire.as_object() else {
                issues.push(Issue::type_mismatch(path, "object", json_kind_name(wire)));
                return;
            };
            for (key, value) in obj {
                check_wire(values, value, &format!("{}.{}", path, key), issues);
            }
        }
        SchemaNode::Tuple(members) => {
            let Some(items) = wire.as_array() else {
                issues.push(Issue::type_mismatch(path, "array", json_kind_name(wire)));
                return;
            };
            if items.len() != members.len() {
                issues.push(Issue::new(
                    path,
                    format!("tuple of {} elements", members.len()),
                    format!("{} elements", items.len()),
                ));
                return;
            }
            for (i, (member, item)) in members.iter().zip(items).enumerate() {
                check_wire(member, item, &format!("{}[{}]", path, i), issues);
            }
        }

        SchemaNode::Union(alternatives) => {
            let matched = alternatives.iter().any(|alt| wire_conforms(alt, wire));
            if !matched {
                issues.push(Issue::type_mismatch(
                    path,
                    "a union alternative",
                    json_kind_name(wire),
                ));
            }
        }
        SchemaNode::DiscriminatedUnion { tag, variants } => {
            let Some(obj) = wire.as_object() else {
                issues.push(Issue::type_mismatch(path, "object", json_kind_name(wire)));
                return;
            };
            let Some(tag_value) = obj.get(tag) else {
                issues.push(Issue::missing_field(format!("{}.{}", path, tag)));
                return;
            };
            match find_variant(variants, tag, tag_value) {
                Some(variant) => check_wire(variant, wire, path, issues),
                None => issues.push(Issue::type_mismatch(
                    format!("{}.{}", path, tag),
                    "a known discriminant",
                    tag_value.to_string(),
                )),
            }
        }

        SchemaNode::Codec(_) | SchemaNode::CodecName(_) | SchemaNode::Brand { .. } => {
            match find_codec(base) {
                Some(codec) => check_wire(codec.wire_schema(), wire, path, issues),
                None => {
                    if let SchemaNode::Brand { inner, .. } = &**base {
                        check_wire(inner, wire, path, issues);
                    }
                    // Unresolvable codec claims are unrepresentable:
                    // the value passes through unchecked.
                }
            }
        }

        SchemaNode::Transform { .. } | SchemaNode::Intersection(_) => {}
        SchemaNode::Lazy(lazy) => {
            if let Some(resolved) = lazy.resolve() {
                check_wire(&resolved, wire, path, issues);
            }
        }

        // analyze() already unwrapped modifiers.
        SchemaNode::Optional(inner)
        | SchemaNode::Nullable(inner)
        | SchemaNode::WithDefault(inner, _) => check_wire(inner, wire, path, issues),
    }
}

fn wire_conforms(schema: &SchemaRef, wire: &Value) -> bool {
    let mut scratch = Vec::new();
    check_wire(schema, wire, "$", &mut scratch);
    scratch.is_empty()
}

// ---------------------------------------------------------------------------
// Runtime-side shape checking
// ---------------------------------------------------------------------------

fn check_runtime(schema: &SchemaRef, runtime: &RuntimeValue, path: &str, issues: &mut Vec<Issue>) {
    let analyzed = analyze(schema);
    if analyzed.nullable && runtime.is_null() {
        return;
    }
    check_runtime_base(&analyzed.base, runtime, path, issues);
}

fn check_runtime_base(
    base: &SchemaRef,
    runtime: &RuntimeValue,
    path: &str,
    issues: &mut Vec<Issue>,
) {
    match &**base {
        SchemaNode::String => {
            if !matches!(runtime, RuntimeValue::String(_)) {
                issues.push(Issue::type_mismatch(path, "string", runtime.kind_name()));
            }
        }
        SchemaNode::Number => {
            if !matches!(runtime, RuntimeValue::Int(_) | RuntimeValue::Float(_)) {
                issues.push(Issue::type_mismatch(path, "number", runtime.kind_name()));
            }
        }
        SchemaNode::Int | SchemaNode::BigInt => {
            if !matches!(runtime, RuntimeValue::Int(_)) {
                issues.push(Issue::type_mismatch(path, "int", runtime.kind_name()));
            }
        }
        SchemaNode::Boolean => {
            if !matches!(runtime, RuntimeValue::Bool(_)) {
                issues.push(Issue::type_mismatch(path, "boolean", runtime.kind_name()));
            }
        }
        SchemaNode::Date => {
            if !matches!(runtime, RuntimeValue::DateTime(_)) {
                issues.push(Issue::type_mismatch(path, "datetime", runtime.kind_name()));
            }
        }
        SchemaNode::Null => {
            if !runtime.is_null() {
                issues.push(Issue::type_mismatch(path, "null", runtime.kind_name()));
            }
        }
        SchemaNode::Any => {}

        SchemaNode::Literal(expected) => {
            if RuntimeValue::from_wire(expected) != *runtime {
                issues.push(Issue::type_mismatch(
                    path,
                    format!("literal {}", expected),
                    runtime.kind_name(),
                ));
            }
        }
        SchemaNode::Enum(values) => {
            let matched = values
                .iter()
                .any(|v| RuntimeValue::from_wire(v) == *runtime);
            if !matched {
                issues.push(Issue::type_mismatch(
                    path,
                    "one of the enum values",
                    runtime.kind_name(),
                ));
            }
        }

        SchemaNode::Object(fields) => {
            let Some(map) = runtime.as_object() else {
                issues.push(Issue::type_mismatch(path, "object", runtime.kind_name()));
                return;
            };
            for (name, field) in fields.iter() {
                let field_path = format!("{}.{}", path, name);
                match map.get(name) {
                    // A key bound to the absent marker counts as missing:
                    // encode strips it before the wire boundary sees it.
                    Some(value) if !value.is_absent() => {
                        check_runtime(field, value, &field_path, issues)
                    }
                    _ => {
                        if !analyze(field).behaves_optional() {
                            issues.push(Issue::missing_field(field_path));
                        }
                    }
                }
            }
        }
        SchemaNode::Array(element) => {
            let RuntimeValue::Array(items) = runtime else {
                issues.push(Issue::type_mismatch(path, "array", runtime.kind_name()));
                return;
            };
            for (i, item) in items.iter().enumerate() {
                check_runtime(element, item, &format!("{}[{}]", path, i), issues);
            }
        }
        SchemaNode::Record { values, .. } => {
            let Some(map) = runtime.as_object() else {
                issues.push(Issue::type_mismatch(path, "object", runtime.kind_name()));
                return;
            };
            for (key, value) in map {
                if !value.is_absent() {
                    check_runtime(values, value, &format!("{}.{}", path, key), issues);
                }
            }
        }
        SchemaNode::Tuple(members) => {
            let RuntimeValue::Array(items) = runtime else {
                issues.push(Issue::type_mismatch(path, "array", runtime.kind_name()));
                return;
            };
            if items.len() != members.len() {
                issues.push(Issue::new(
                    path,
                    format!("tuple of {} elements", members.len()),
                    format!("{} elements", items.len()),
                ));
                return;
            }
            for (i, (member, item)) in members.iter().zip(items).enumerate() {
                check_runtime(member, item, &format!("{}[{}]", path, i), issues);
            }
        }

        SchemaNode::Union(alternatives) => {
            let matched = alternatives
                .iter()
                .any(|alt| runtime_conforms(alt, runtime));
            if !matched {
                issues.push(Issue::type_mismatch(
                    path,
                    "a union alternative",
                    runtime.kind_name(),
                ));
            }
        }
        SchemaNode::DiscriminatedUnion { tag, variants } => {
            let Some(map) = runtime.as_object() else {
                issues.push(Issue::type_mismatch(path, "object", runtime.kind_name()));
                return;
            };
            let Some(tag_value) = map.get(tag) else {
                issues.push(Issue::missing_field(format!("{}.{}", path, tag)));
                return;
            };
            let variant = variants.iter().find(|v| {
                variant_discriminant(v, tag)
                    .map(|d| RuntimeValue::from_wire(&d) == *tag_value)
                    .unwrap_or(false)
            });
            match variant {
                Some(variant) => check_runtime(variant, runtime, path, issues),
                None => issues.push(Issue::type_mismatch(
                    format!("{}.{}", path, tag),
                    "a known discriminant",
                    tag_value.kind_name(),
                )),
            }
        }

        // Runtime documents hold the codec's runtime-side shape.
        SchemaNode::Codec(_) | SchemaNode::CodecName(_) | SchemaNode::Brand { .. } => {
            match find_codec(base) {
                Some(codec) => check_runtime(codec.runtime_schema(), runtime, path, issues),
                None => {
                    if let SchemaNode::Brand { inner, .. } = &**base {
                        check_runtime(inner, runtime, path, issues);
                    }
                }
            }
        }

        SchemaNode::Transform { .. } | SchemaNode::Intersection(_) => {}
        SchemaNode::Lazy(lazy) => {
            if let Some(resolved) = lazy.resolve() {
                check_runtime(&resolved, runtime, path, issues);
            }
        }

        SchemaNode::Optional(inner)
        | SchemaNode::Nullable(inner)
        | SchemaNode::WithDefault(inner, _) => check_runtime(inner, runtime, path, issues),
    }
}

fn runtime_conforms(schema: &SchemaRef, runtime: &RuntimeValue) -> bool {
    let mut scratch = Vec::new();
    check_runtime(schema, runtime, "$", &mut scratch);
    scratch.is_empty()
}

// ---------------------------------------------------------------------------
// Decode transform
// ---------------------------------------------------------------------------

fn decode_value(schema: &SchemaRef, wire: &Value, path: &str) -> TranscodeResult<RuntimeValue> {
    let analyzed = analyze(schema);
    if analyzed.nullable && wire.is_null() {
        return Ok(RuntimeValue::Null);
    }
    decode_base(&analyzed.base, wire, path)
}

fn decode_base(base: &SchemaRef, wire: &Value, path: &str) -> TranscodeResult<RuntimeValue> {
    // Codec-governed positions: take the wire value through any nested
    // codecs first, then apply this codec's decode transform.
    if let Some(codec) = find_codec(base) {
        let intermediate = decode_value(codec.wire_schema(), wire, path)?;
        return codec
            .decode(&intermediate)
            .map_err(|e| codec_error(codec.name(), path, e));
    }

    match &**base {
        SchemaNode::Date => {
            let codec = date_codec();
            codec
                .decode(&RuntimeValue::from_wire(wire))
                .map_err(|e| codec_error(codec.name(), path, e))
        }

        SchemaNode::Object(fields) => {
            let Some(obj) = wire.as_object() else {
                return Err(mismatch(path, "object", json_kind_name(wire)));
            };
            let mut out = std::collections::BTreeMap::new();
            for (key, value) in obj {
                let decoded = match fields.get(key) {
                    Some(field) => decode_value(field, value, &format!("{}.{}", path, key))?,
                    None => RuntimeValue::from_wire(value),
                };
                out.insert(key.clone(), decoded);
            }
            Ok(RuntimeValue::Object(out))
        }
        SchemaNode::Array(element) => {
            let Some(items) = wire.as_array() else {
                return Err(mismatch(path, "array", json_kind_name(wire)));
            };
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                out.push(decode_value(element, item, &format!("{}[{}]", path, i))?);
            }
            Ok(RuntimeValue::Array(out))
        }
        SchemaNode::Record { values, .. } => {
            let Some(obj) = wire.as_object() else {
                return Err(mismatch(path, "object", json_kind_name(wire)));
            };
            let mut out = std::collections::BTreeMap::new();
            for (key, value) in obj {
                out.insert(
                    key.clone(),
                    decode_value(values, value, &format!("{}.{}", path, key))?,
                );
            }
            Ok(RuntimeValue::Object(out))
        }
        SchemaNode::Tuple(members) => {
            let Some(items) = wire.as_array() else {
                return Err(mismatch(path, "array", json_kind_name(wire)));
            };
            let mut out = Vec::with_capacity(items.len());
            for (i, (member, item)) in members.iter().zip(items).enumerate() {
                out.push(decode_value(member, item, &format!("{}[{}]", path, i))?);
            }
            Ok(RuntimeValue::Array(out))
        }

        SchemaNode::Union(alternatives) => {
            match alternatives.iter().find(|alt| wire_conforms(alt, wire)) {
                Some(alt) => decode_value(alt, wire, path),
                None => Err(mismatch(path, "a union alternative", json_kind_name(wire))),
            }
        }
        SchemaNode::DiscriminatedUnion { tag, variants } => {
            let tag_value = wire
                .get(tag)
                .ok_or_else(|| mismatch(path, "tagged object", json_kind_name(wire)))?;
            match find_variant(variants, tag, tag_value) {
                Some(variant) => decode_value(variant, wire, path),
                None => Err(mismatch(path, "a known discriminant", json_kind_name(wire))),
            }
        }

        SchemaNode::Brand { inner, .. } => decode_value(inner, wire, path),
        SchemaNode::Lazy(lazy) => match lazy.resolve() {
            Some(resolved) => decode_value(&resolved, wire, path),
            None => Ok(RuntimeValue::from_wire(wire)),
        },

        SchemaNode::Optional(inner)
        | SchemaNode::Nullable(inner)
        | SchemaNode::WithDefault(inner, _) => decode_value(inner, wire, path),

        // Plain primitives, literals, enums, and unrepresentable nodes
        // convert canonically.
        _ => Ok(RuntimeValue::from_wire(wire)),
    }
}

// ---------------------------------------------------------------------------
// Encode transform
// ---------------------------------------------------------------------------

fn encode_value(schema: &SchemaRef, runtime: &RuntimeValue, path: &str) -> TranscodeResult<Value> {
    let analyzed = analyze(schema);
    if analyzed.nullable && runtime.is_null() {
        return Ok(Value::Null);
    }
    encode_base(&analyzed.base, runtime, path)
}

fn encode_base(base: &SchemaRef, runtime: &RuntimeValue, path: &str) -> TranscodeResult<Value> {
    // Codec-governed positions: apply this codec's encode transform, then
    // take the intermediate through any nested codecs of the wire schema.
    if let Some(codec) = find_codec(base) {
        let intermediate = codec
            .encode(runtime)
            .map_err(|e| codec_error(codec.name(), path, e))?;
        return encode_value(codec.wire_schema(), &intermediate, path);
    }

    match &**base {
        SchemaNode::Date => {
            let codec = date_codec();
            let encoded = codec
                .encode(runtime)
                .map_err(|e| codec_error(codec.name(), path, e))?;
            Ok(encoded.to_wire())
        }

        SchemaNode::Object(fields) => {
            let Some(map) = runtime.as_object() else {
                return Err(mismatch(path, "object", runtime.kind_name()));
            };
            let mut out = serde_json::Map::new();
            for (key, value) in map {
                if value.is_absent() {
                    continue;
                }
                let encoded = match fields.get(key) {
                    Some(field) => encode_value(field, value, &format!("{}.{}", path, key))?,
                    None => value.to_wire(),
                };
                out.insert(key.clone(), encoded);
            }
            Ok(Value::Object(out))
        }
        SchemaNode::Array(element) => {
            let RuntimeValue::Array(items) = runtime else {
                return Err(mismatch(path, "array", runtime.kind_name()));
            };
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                out.push(encode_value(element, item, &format!("{}[{}]", path, i))?);
            }
            Ok(Value::Array(out))
        }
        SchemaNode::Record { values, .. } => {
            let Some(map) = runtime.as_object() else {
                return Err(mismatch(path, "object", runtime.kind_name()));
            };
            let mut out = serde_json::Map::new();
            for (key, value) in map {
                if value.is_absent() {
                    continue;
                }
                out.insert(
                    key.clone(),
                    encode_value(values, value, &format!("{}.{}", path, key))?,
                );
            }
            Ok(Value::Object(out))
        }
        SchemaNode::Tuple(members) => {
            let RuntimeValue::Array(items) = runtime else {
                return Err(mismatch(path, "array", runtime.kind_name()));
            };
            let mut out = Vec::with_capacity(items.len());
            for (i, (member, item)) in members.iter().zip(items).enumerate() {
                out.push(encode_value(member, item, &format!("{}[{}]", path, i))?);
            }
            Ok(Value::Array(out))
        }

        SchemaNode::Union(alternatives) => {
            match alternatives
                .iter()
                .find(|alt| runtime_conforms(alt, runtime))
            {
                Some(alt) => encode_value(alt, runtime, path),
                None => Err(mismatch(path, "a union alternative", runtime.kind_name())),
            }
        }
        SchemaNode::DiscriminatedUnion { tag, variants } => {
            let tag_value = runtime
                .get(tag)
                .ok_or_else(|| mismatch(path, "tagged object", runtime.kind_name()))?;
            let variant = variants.iter().find(|v| {
                variant_discriminant(v, tag)
                    .map(|d| RuntimeValue::from_wire(&d) == *tag_value)
                    .unwrap_or(false)
            });
            match variant {
                Some(variant) => encode_value(variant, runtime, path),
                None => Err(mismatch(path, "a known discriminant", runtime.kind_name())),
            }
        }

        SchemaNode::Brand { inner, .. } => encode_value(inner, runtime, path),
        SchemaNode::Lazy(lazy) => match lazy.resolve() {
            Some(resolved) => encode_value(&resolved, runtime, path),
            None => Ok(runtime.to_wire()),
        },

        SchemaNode::Optional(inner)
        | SchemaNode::Nullable(inner)
        | SchemaNode::WithDefault(inner, _) => encode_value(inner, runtime, path),

        _ => Ok(runtime.to_wire()),
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Finds the variant of a discriminated union matching a wire tag value.
fn find_variant<'a>(
    variants: &'a [SchemaRef],
    tag: &str,
    tag_value: &Value,
) -> Option<&'a SchemaRef> {
    variants
        .iter()
        .find(|v| variant_discriminant(v, tag).as_ref() == Some(tag_value))
}

/// Extracts the literal discriminant a variant declares for the tag field.
fn variant_discriminant(variant: &SchemaRef, tag: &str) -> Option<Value> {
    let base = analyze(variant).base;
    if let SchemaNode::Object(fields) = &*base {
        let field = fields.get(tag)?;
        if let SchemaNode::Literal(value) = &*analyze(field).base {
            return Some(value.clone());
        }
    }
    None
}

fn json_kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.as_i64().is_some() {
                "int"
            } else {
                "number"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(path: &str, expected: &str, actual: &str) -> TranscodeError {
    ValidationError::single(Issue::type_mismatch(path, expected, actual)).into()
}

fn codec_error(name: &str, path: &str, err: crate::codec::CodecError) -> TranscodeError {
    TranscodeError::Codec {
        name: name.to_string(),
        path: path.to_string(),
        message: err.to_string(),
    }
}
