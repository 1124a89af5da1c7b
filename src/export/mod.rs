//! Schema export for third-party consumers
//!
//! Walks the schema tree and emits a structurally analogous JSON-Schema-like
//! description. Codec and branded nodes are substituted with
//! externally-meaningful primitive + format annotations, so consumers with
//! no knowledge of the codec mechanism can still validate and prompt
//! against the shape.

use std::collections::HashSet;

use serde_json::{json, Map, Value};

use crate::codec::{find_codec, DOC_REF_PREFIX};
use crate::schema::{analyze, SchemaNode, SchemaRef};

/// Exports a schema tree as a JSON-Schema-like value.
pub fn export_schema(schema: &SchemaRef) -> Value {
    export_node(schema, &mut HashSet::new())
}

fn export_node(schema: &SchemaRef, seen: &mut HashSet<usize>) -> Value {
    let analyzed = analyze(schema);
    let mut exported = export_base(&analyzed.base, seen);

    if analyzed.nullable {
        exported = json!({ "anyOf": [exported, { "type": "null" }] });
    }
    if let Some(default) = analyzed.default {
        if let Some(obj) = exported.as_object_mut() {
            obj.insert("default".to_string(), default);
        }
    }
    exported
}

fn export_base(base: &SchemaRef, seen: &mut HashSet<usize>) -> Value {
    // Codec-governed positions export as their wire shape plus a format
    // annotation carrying the codec name.
    if let Some(codec) = find_codec(base) {
        let mut exported = export_node(codec.wire_schema(), seen);
        annotate_format(&mut exported, codec.name());
        return exported;
    }

    match &**base {
        SchemaNode::String => json!({ "type": "string" }),
        SchemaNode::Number => json!({ "type": "number" }),
        SchemaNode::Int => json!({ "type": "integer" }),
        SchemaNode::BigInt => json!({ "type": "integer", "format": "int64" }),
        SchemaNode::Boolean => json!({ "type": "boolean" }),
        SchemaNode::Date => json!({ "type": "number", "format": "timestamp-ms" }),
        SchemaNode::Null => json!({ "type": "null" }),
        SchemaNode::Any => json!({}),

        SchemaNode::Object(fields) => {
            let mut properties = Map::new();
            let mut required = Vec::new();
            for (name, field) in fields.iter() {
                properties.insert(name.to_string(), export_node(field, seen));
                if !analyze(field).behaves_optional() {
                    required.push(Value::String(name.to_string()));
                }
            }
            let mut exported = Map::new();
            exported.insert("type".to_string(), json!("object"));
            exported.insert("properties".to_string(), Value::Object(properties));
            if !required.is_empty() {
                exported.insert("required".to_string(), Value::Array(required));
            }
            Value::Object(exported)
        }
        SchemaNode::Array(element) => {
            json!({ "type": "array", "items": export_node(element, seen) })
        }
        SchemaNode::Record { values, .. } => {
            json!({ "type": "object", "additionalProperties": export_node(values, seen) })
        }
        SchemaNode::Tuple(members) => {
            let items: Vec<Value> = members.iter().map(|m| export_node(m, seen)).collect();
            json!({
                "type": "array",
                "prefixItems": items,
                "minItems": members.len(),
                "maxItems": members.len()
            })
        }

        SchemaNode::Union(alternatives) => {
            let any_of: Vec<Value> = alternatives.iter().map(|a| export_node(a, seen)).collect();
            json!({ "anyOf": any_of })
        }
        SchemaNode::DiscriminatedUnion { variants, .. } => {
            let any_of: Vec<Value> = variants.iter().map(|v| export_node(v, seen)).collect();
            json!({ "anyOf": any_of })
        }
        SchemaNode::Enum(values) => json!({ "enum": values }),
        SchemaNode::Literal(value) => json!({ "const": value }),

        // A plain brand is a format annotation over its inner shape.
        SchemaNode::Brand { name, inner } => {
            let mut exported = export_node(inner, seen);
            annotate_format(&mut exported, name);
            exported
        }
        // Unresolvable codec claims export as unconstrained.
        SchemaNode::Codec(_) | SchemaNode::CodecName(_) => json!({}),

        SchemaNode::Transform { inner } => export_node(inner, seen),
        SchemaNode::Intersection(parts) => {
            let all_of: Vec<Value> = parts.iter().map(|p| export_node(p, seen)).collect();
            json!({ "allOf": all_of })
        }
        SchemaNode::Lazy(lazy) => {
            let identity = lazy.identity();
            if !seen.insert(identity) {
                return json!({});
            }
            let exported = match lazy.resolve() {
                Some(resolved) => export_node(&resolved, seen),
                None => json!({}),
            };
            seen.remove(&identity);
            exported
        }

        // analyze() already unwrapped modifiers.
        SchemaNode::Optional(inner)
        | SchemaNode::Nullable(inner)
        | SchemaNode::WithDefault(inner, _) => export_node(inner, seen),
    }
}

/// Attaches a `format` annotation, translating the built-in
/// document-reference family to its external `doc-id:<collection>` name.
fn annotate_format(exported: &mut Value, name: &str) {
    let format = match name.strip_prefix(DOC_REF_PREFIX) {
        Some(collection) => format!("doc-id:{}", collection),
        None => name.to_string(),
    };
    if let Some(obj) = exported.as_object_mut() {
        obj.insert("format".to_string(), Value::String(format));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{date_codec, doc_ref_codec};
    use crate::schema::FieldMap;

    #[test]
    fn test_object_export_with_required_and_optional() {
        let schema = SchemaNode::object(
            FieldMap::new()
                .with("name", SchemaNode::string())
                .with("nickname", SchemaNode::optional(SchemaNode::string())),
        );

        let exported = export_schema(&schema);
        assert_eq!(exported["type"], json!("object"));
        assert_eq!(exported["properties"]["name"], json!({ "type": "string" }));
        assert_eq!(exported["required"], json!(["name"]));
    }

    #[test]
    fn test_date_codec_exports_with_format() {
        let exported = export_schema(&SchemaNode::codec(date_codec()));
        assert_eq!(exported["type"], json!("number"));
        assert_eq!(exported["format"], json!("date"));
    }

    #[test]
    fn test_doc_ref_exports_domain_id_format() {
        let exported = export_schema(&SchemaNode::codec(doc_ref_codec("users")));
        assert_eq!(exported, json!({ "type": "string", "format": "doc-id:users" }));
    }

    #[test]
    fn test_brand_exports_inner_with_format() {
        let exported = export_schema(&SchemaNode::brand("session-token", SchemaNode::string()));
        assert_eq!(
            exported,
            json!({ "type": "string", "format": "session-token" })
        );
    }

    #[test]
    fn test_nullable_exports_any_of_with_null() {
        let exported = export_schema(&SchemaNode::nullable(SchemaNode::int()));
        assert_eq!(
            exported,
            json!({ "anyOf": [{ "type": "integer" }, { "type": "null" }] })
        );
    }

    #[test]
    fn test_default_exports_annotation() {
        let exported = export_schema(&SchemaNode::with_default(SchemaNode::int(), json!(5)));
        assert_eq!(exported, json!({ "type": "integer", "default": 5 }));
    }

    #[test]
    fn test_enum_and_literal_export() {
        assert_eq!(
            export_schema(&SchemaNode::enumeration(vec![json!("a"), json!("b")])),
            json!({ "enum": ["a", "b"] })
        );
        assert_eq!(
            export_schema(&SchemaNode::literal(json!(3))),
            json!({ "const": 3 })
        );
    }

    #[test]
    fn test_self_referential_lazy_export_terminates() {
        let cell: std::sync::Arc<std::sync::OnceLock<SchemaRef>> =
            std::sync::Arc::new(std::sync::OnceLock::new());
        let resolver_cell = cell.clone();
        let node = SchemaNode::object(
            FieldMap::new().with("next", SchemaNode::optional(SchemaNode::lazy(move || {
                resolver_cell.get().cloned()
            }))),
        );
        cell.set(node.clone()).ok();

        let exported = export_schema(&node);
        assert_eq!(exported["type"], json!("object"));
        // The cycle bottoms out in an unconstrained node.
        assert_eq!(exported["properties"]["next"]["properties"]["next"], json!({}));
    }
}
