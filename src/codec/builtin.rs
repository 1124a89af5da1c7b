//! Built-in codecs
//!
//! Pre-registered transforms for common cases, so ordinary schema authors
//! never construct a codec by hand.

use std::sync::Arc;

use crate::document::RuntimeValue;
use crate::schema::SchemaNode;

use super::types::{Codec, CodecError};

/// Name of the built-in date codec.
pub const DATE_CODEC: &str = "date";

/// Name prefix of the built-in document-reference codec family.
pub const DOC_REF_PREFIX: &str = "doc-ref:";

/// Date codec: millisecond timestamp on the wire, rich date value at
/// runtime.
pub fn date_codec() -> Arc<Codec> {
    Codec::new(
        DATE_CODEC,
        SchemaNode::number(),
        SchemaNode::date(),
        Arc::new(|wire| {
            let millis = match wire {
                RuntimeValue::Int(i) => *i,
                RuntimeValue::Float(f) => *f as i64,
                other => {
                    return Err(CodecError::new(format!(
                        "expected millisecond timestamp, got {}",
                        other.kind_name()
                    )))
                }
            };
            RuntimeValue::from_timestamp_millis(millis)
                .ok_or_else(|| CodecError::new(format!("timestamp out of range: {}", millis)))
        }),
        Arc::new(|runtime| match runtime {
            RuntimeValue::DateTime(dt) => Ok(RuntimeValue::Int(dt.timestamp_millis())),
            other => Err(CodecError::new(format!(
                "expected datetime, got {}",
                other.kind_name()
            ))),
        }),
    )
}

/// Document-reference codec for one collection: branded id string on the
/// wire, [`RuntimeValue::DocRef`] at runtime.
///
/// The runtime schema is `any`: the reference is an opaque rich value the
/// target system never sees.
pub fn doc_ref_codec(collection: impl Into<String>) -> Arc<Codec> {
    let collection = collection.into();
    let decode_collection = collection.clone();
    let encode_collection = collection.clone();
    Codec::new(
        format!("{}{}", DOC_REF_PREFIX, collection),
        SchemaNode::string(),
        SchemaNode::any(),
        Arc::new(move |wire| match wire {
            RuntimeValue::String(key) => Ok(RuntimeValue::DocRef {
                collection: decode_collection.clone(),
                key: key.clone(),
            }),
            other => Err(CodecError::new(format!(
                "expected id string, got {}",
                other.kind_name()
            ))),
        }),
        Arc::new(move |runtime| match runtime {
            RuntimeValue::DocRef { collection, key } if *collection == encode_collection => {
                Ok(RuntimeValue::String(key.clone()))
            }
            RuntimeValue::DocRef { collection, .. } => Err(CodecError::new(format!(
                "reference into '{}' where '{}' expected",
                collection, encode_collection
            ))),
            other => Err(CodecError::new(format!(
                "expected document reference, got {}",
                other.kind_name()
            ))),
        }),
    )
}
