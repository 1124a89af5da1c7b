//! Codec type definitions

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::document::RuntimeValue;
use crate::schema::SchemaRef;

/// A codec transform failed on a value it does not accept.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct CodecError {
    message: String,
}

impl CodecError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Decode transform: wire-shaped value → runtime value.
///
/// The input has already been taken through any nested codecs of the wire
/// schema, so the transform sees the wire shape one level deep.
pub type DecodeFn = Arc<dyn Fn(&RuntimeValue) -> Result<RuntimeValue, CodecError> + Send + Sync>;

/// Encode transform: runtime value → wire-shaped value. Inverse of decode on
/// well-formed domains.
pub type EncodeFn = Arc<dyn Fn(&RuntimeValue) -> Result<RuntimeValue, CodecError> + Send + Sync>;

/// A wire-schema/runtime-schema pair plus inverse transforms.
///
/// Invariant: `decode(encode(x)) == x` for any `x` accepted by the runtime
/// schema, and `encode(decode(y)) == y` for any `y` accepted by the wire
/// schema.
#[derive(Clone)]
pub struct Codec {
    name: String,
    wire: SchemaRef,
    runtime: SchemaRef,
    decode: DecodeFn,
    encode: EncodeFn,
}

impl Codec {
    pub fn new(
        name: impl Into<String>,
        wire: SchemaRef,
        runtime: SchemaRef,
        decode: DecodeFn,
        encode: EncodeFn,
    ) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            wire,
            runtime,
            decode,
            encode,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wire-side schema; drives validator synthesis and wire validation.
    pub fn wire_schema(&self) -> &SchemaRef {
        &self.wire
    }

    /// Runtime-side schema; drives runtime-document validation.
    pub fn runtime_schema(&self) -> &SchemaRef {
        &self.runtime
    }

    /// Applies the decode transform.
    pub fn decode(&self, wire: &RuntimeValue) -> Result<RuntimeValue, CodecError> {
        (self.decode)(wire)
    }

    /// Applies the encode transform.
    pub fn encode(&self, runtime: &RuntimeValue) -> Result<RuntimeValue, CodecError> {
        (self.encode)(runtime)
    }
}

// The transform closures are opaque; show the name and schema kinds only.
impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("name", &self.name)
            .field("wire", &self.wire.kind_name())
            .field("runtime", &self.runtime.kind_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaNode;

    fn upper_lower() -> Arc<Codec> {
        Codec::new(
            "upper-lower",
            SchemaNode::string(),
            SchemaNode::string(),
            Arc::new(|wire| match wire {
                RuntimeValue::String(s) => Ok(RuntimeValue::String(s.to_uppercase())),
                other => Err(CodecError::new(format!(
                    "expected string, got {}",
                    other.kind_name()
                ))),
            }),
            Arc::new(|runtime| match runtime {
                RuntimeValue::String(s) => Ok(RuntimeValue::String(s.to_lowercase())),
                other => Err(CodecError::new(format!(
                    "expected string, got {}",
                    other.kind_name()
                ))),
            }),
        )
    }

    #[test]
    fn test_transform_pair() {
        let codec = upper_lower();
        let decoded = codec.decode(&RuntimeValue::string("ca")).unwrap();
        assert_eq!(decoded, RuntimeValue::string("CA"));

        let encoded = codec.encode(&decoded).unwrap();
        assert_eq!(encoded, RuntimeValue::string("ca"));
    }

    #[test]
    fn test_transform_rejects_wrong_kind() {
        let codec = upper_lower();
        assert!(codec.decode(&RuntimeValue::Int(3)).is_err());
    }
}
