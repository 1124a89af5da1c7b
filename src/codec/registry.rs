//! Codec registry and detection
//!
//! Detection must see through type-branding, so a user-defined codec wrapped
//! in an application-level brand helper is still recognized. A node that
//! claims codec shape but has no resolvable wire schema fails closed: it is
//! treated as unrepresentable, never as a different primitive.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::schema::SchemaNode;

use super::builtin::{date_codec, doc_ref_codec, DATE_CODEC, DOC_REF_PREFIX};
use super::types::{Codec, CodecError};

static GLOBAL: OnceLock<CodecRegistry> = OnceLock::new();

/// Named codec registry.
///
/// Populated once at startup; registration happens-before any request
/// processing, so concurrent reads are safe without locking.
#[derive(Debug)]
pub struct CodecRegistry {
    codecs: HashMap<String, Arc<Codec>>,
}

impl CodecRegistry {
    /// Creates a registry holding only the built-in codecs.
    pub fn new() -> Self {
        let mut registry = Self {
            codecs: HashMap::new(),
        };
        registry.codecs.insert(DATE_CODEC.into(), date_codec());
        registry
    }

    /// Registers a codec under its name. Duplicate names are rejected.
    pub fn register(&mut self, codec: Arc<Codec>) -> Result<(), CodecError> {
        let name = codec.name().to_string();
        if self.codecs.contains_key(&name) {
            return Err(CodecError::new(format!(
                "codec already registered: {}",
                name
            )));
        }
        self.codecs.insert(name, codec);
        Ok(())
    }

    /// Looks up a codec by name.
    ///
    /// `doc-ref:<collection>` names resolve to the built-in
    /// document-reference codec for that collection without prior
    /// registration.
    pub fn get(&self, name: &str) -> Option<Arc<Codec>> {
        if let Some(codec) = self.codecs.get(name) {
            return Some(codec.clone());
        }
        name.strip_prefix(DOC_REF_PREFIX).map(doc_ref_codec)
    }

    /// Installs this registry as the process-wide one.
    ///
    /// Must happen at startup before any schema is synthesized or any
    /// document transcoded. Fails if a registry was already installed.
    pub fn install(self) -> Result<(), CodecError> {
        GLOBAL
            .set(self)
            .map_err(|_| CodecError::new("codec registry already installed"))
    }

    /// The process-wide registry; built-ins only unless [`install`] ran.
    ///
    /// [`install`]: CodecRegistry::install
    pub fn global() -> &'static CodecRegistry {
        GLOBAL.get_or_init(CodecRegistry::new)
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves the codec governing a node, if any.
///
/// Sees through brand chains; named references resolve against the
/// process-wide registry. `None` for unresolvable names; the caller treats
/// those as unrepresentable.
pub fn find_codec(node: &SchemaNode) -> Option<Arc<Codec>> {
    match node {
        SchemaNode::Codec(codec) => Some(codec.clone()),
        SchemaNode::CodecName(name) => CodecRegistry::global().get(name),
        SchemaNode::Brand { inner, .. } => find_codec(inner),
        _ => None,
    }
}

/// True when the node claims codec shape, whether or not the claim resolves.
pub fn is_codec_like(node: &SchemaNode) -> bool {
    match node {
        SchemaNode::Codec(_) | SchemaNode::CodecName(_) => true,
        SchemaNode::Brand { inner, .. } => is_codec_like(inner),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::RuntimeValue;

    #[test]
    fn test_builtin_date_resolves() {
        let registry = CodecRegistry::new();
        let codec = registry.get("date").unwrap();
        assert_eq!(codec.name(), "date");
    }

    #[test]
    fn test_doc_ref_family_resolves_without_registration() {
        let registry = CodecRegistry::new();
        let codec = registry.get("doc-ref:users").unwrap();
        assert_eq!(codec.name(), "doc-ref:users");
    }

    #[test]
    fn test_unknown_name_does_not_resolve() {
        let registry = CodecRegistry::new();
        assert!(registry.get("no-such-codec").is_none());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = CodecRegistry::new();
        assert!(registry.register(date_codec()).is_err());
    }

    #[test]
    fn test_detection_sees_through_brand_chains() {
        let node = SchemaNode::brand(
            "session-token",
            SchemaNode::brand("inner", SchemaNode::codec(date_codec())),
        );
        let codec = find_codec(&node).unwrap();
        assert_eq!(codec.name(), "date");
        assert!(is_codec_like(&node));
    }

    #[test]
    fn test_plain_brand_is_not_codec_like() {
        let node = SchemaNode::brand("user-id", SchemaNode::string());
        assert!(find_codec(&node).is_none());
        assert!(!is_codec_like(&node));
    }

    #[test]
    fn test_unresolvable_name_fails_closed() {
        let node = SchemaNode::codec_name("ghost");
        assert!(find_codec(&node).is_none());
        assert!(is_codec_like(&node));
    }

    #[test]
    fn test_named_date_codec_transforms() {
        let node = SchemaNode::codec_name("date");
        let codec = find_codec(&node).unwrap();
        let decoded = codec.decode(&RuntimeValue::Int(0)).unwrap();
        assert!(matches!(decoded, RuntimeValue::DateTime(_)));
    }
}
