//! Schema node definitions
//!
//! Node kinds:
//! - primitive: string, number, int, big-int, boolean, date, null, any
//! - modifier: optional, nullable, default-valued (each wraps one node)
//! - container: object, array, record, tuple
//! - choice: union, discriminated union, enum, literal
//! - codec: inline codec, named codec reference, brand wrapper
//! - unrepresentable: free-form transform, lazy reference, intersection

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::codec::Codec;

/// Shared, immutable reference to a schema node.
///
/// Nodes are referenced by identity from many call sites; cloning a
/// `SchemaRef` never copies the subtree.
pub type SchemaRef = Arc<SchemaNode>;

/// A node in the composable schema description tree.
#[derive(Debug, Clone)]
pub enum SchemaNode {
    // Primitives
    /// UTF-8 string
    String,
    /// 64-bit floating point
    Number,
    /// 64-bit signed integer
    Int,
    /// Big integer; wire-encoded as int64
    BigInt,
    /// Boolean
    Boolean,
    /// Date/time instant; wire-encoded as a millisecond timestamp
    Date,
    /// Exactly null
    Null,
    /// Any value; no constraint
    Any,

    // Modifiers
    /// Field may be omitted entirely
    Optional(SchemaRef),
    /// Value may be an explicit null
    Nullable(SchemaRef),
    /// Field carries a default value (wire-side encoding)
    WithDefault(SchemaRef, Value),

    // Containers
    /// Object with an ordered field map
    Object(FieldMap),
    /// Homogeneous array
    Array(SchemaRef),
    /// String-keyed map with uniform value schema
    Record { keys: SchemaRef, values: SchemaRef },
    /// Fixed-length heterogeneous array
    Tuple(Vec<SchemaRef>),

    // Choices
    /// Ordered list of alternatives
    Union(Vec<SchemaRef>),
    /// Alternatives keyed by a literal discriminant field
    DiscriminatedUnion { tag: String, variants: Vec<SchemaRef> },
    /// Closed set of literal values
    Enum(Vec<Value>),
    /// One exact value
    Literal(Value),

    // Codecs
    /// Inline wire/runtime transform pair
    Codec(Arc<Codec>),
    /// Codec resolved by name through the process-wide registry.
    /// Resolution failure is treated as unrepresentable, never as a
    /// different primitive.
    CodecName(String),
    /// Type-branding wrapper; detection sees through brand chains
    Brand { name: String, inner: SchemaRef },

    // Unrepresentable
    /// Free-form one-way transform over an inner schema
    Transform { inner: SchemaRef },
    /// Deferred self/forward reference, resolved at use time
    Lazy(LazySchema),
    /// Intersection of alternatives
    Intersection(Vec<SchemaRef>),
}

impl SchemaNode {
    /// Returns the kind name for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SchemaNode::String => "string",
            SchemaNode::Number => "number",
            SchemaNode::Int => "int",
            SchemaNode::BigInt => "bigint",
            SchemaNode::Boolean => "boolean",
            SchemaNode::Date => "date",
            SchemaNode::Null => "null",
            SchemaNode::Any => "any",
            SchemaNode::Optional(_) => "optional",
            SchemaNode::Nullable(_) => "nullable",
            SchemaNode::WithDefault(..) => "default",
            SchemaNode::Object(_) => "object",
            SchemaNode::Array(_) => "array",
            SchemaNode::Record { .. } => "record",
            SchemaNode::Tuple(_) => "tuple",
            SchemaNode::Union(_) => "union",
            SchemaNode::DiscriminatedUnion { .. } => "discriminated-union",
            SchemaNode::Enum(_) => "enum",
            SchemaNode::Literal(_) => "literal",
            SchemaNode::Codec(_) => "codec",
            SchemaNode::CodecName(_) => "codec-name",
            SchemaNode::Brand { .. } => "brand",
            SchemaNode::Transform { .. } => "transform",
            SchemaNode::Lazy(_) => "lazy",
            SchemaNode::Intersection(_) => "intersection",
        }
    }

    /// True for modifier kinds (optional, nullable, default).
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            SchemaNode::Optional(_) | SchemaNode::Nullable(_) | SchemaNode::WithDefault(..)
        )
    }

    // Constructor helpers. Schema trees are built once at startup, so every
    // helper returns a shared `SchemaRef`.

    pub fn string() -> SchemaRef {
        Arc::new(SchemaNode::String)
    }

    pub fn number() -> SchemaRef {
        Arc::new(SchemaNode::Number)
    }

    pub fn int() -> SchemaRef {
        Arc::new(SchemaNode::Int)
    }

    pub fn bigint() -> SchemaRef {
        Arc::new(SchemaNode::BigInt)
    }

    pub fn boolean() -> SchemaRef {
        Arc::new(SchemaNode::Boolean)
    }

    pub fn date() -> SchemaRef {
        Arc::new(SchemaNode::Date)
    }

    pub fn null() -> SchemaRef {
        Arc::new(SchemaNode::Null)
    }

    pub fn any() -> SchemaRef {
        Arc::new(SchemaNode::Any)
    }

    pub fn optional(inner: SchemaRef) -> SchemaRef {
        Arc::new(SchemaNode::Optional(inner))
    }

    pub fn nullable(inner: SchemaRef) -> SchemaRef {
        Arc::new(SchemaNode::Nullable(inner))
    }

    pub fn with_default(inner: SchemaRef, default: Value) -> SchemaRef {
        Arc::new(SchemaNode::WithDefault(inner, default))
    }

    pub fn object(fields: FieldMap) -> SchemaRef {
        Arc::new(SchemaNode::Object(fields))
    }

    pub fn array(element: SchemaRef) -> SchemaRef {
        Arc::new(SchemaNode::Array(element))
    }

    pub fn record(keys: SchemaRef, values: SchemaRef) -> SchemaRef {
        Arc::new(SchemaNode::Record { keys, values })
    }

    pub fn tuple(members: Vec<SchemaRef>) -> SchemaRef {
        Arc::new(SchemaNode::Tuple(members))
    }

    pub fn union(alternatives: Vec<SchemaRef>) -> SchemaRef {
        Arc::new(SchemaNode::Union(alternatives))
    }

    pub fn discriminated_union(tag: impl Into<String>, variants: Vec<SchemaRef>) -> SchemaRef {
        Arc::new(SchemaNode::DiscriminatedUnion {
            tag: tag.into(),
            variants,
        })
    }

    pub fn enumeration(values: Vec<Value>) -> SchemaRef {
        Arc::new(SchemaNode::Enum(values))
    }

    pub fn literal(value: Value) -> SchemaRef {
        Arc::new(SchemaNode::Literal(value))
    }

    pub fn codec(codec: Arc<Codec>) -> SchemaRef {
        Arc::new(SchemaNode::Codec(codec))
    }

    pub fn codec_name(name: impl Into<String>) -> SchemaRef {
        Arc::new(SchemaNode::CodecName(name.into()))
    }

    pub fn brand(name: impl Into<String>, inner: SchemaRef) -> SchemaRef {
        Arc::new(SchemaNode::Brand {
            name: name.into(),
            inner,
        })
    }

    pub fn transform(inner: SchemaRef) -> SchemaRef {
        Arc::new(SchemaNode::Transform { inner })
    }

    pub fn lazy(resolve: impl Fn() -> Option<SchemaRef> + Send + Sync + 'static) -> SchemaRef {
        Arc::new(SchemaNode::Lazy(LazySchema::new(resolve)))
    }

    pub fn intersection(parts: Vec<SchemaRef>) -> SchemaRef {
        Arc::new(SchemaNode::Intersection(parts))
    }
}

/// Insertion-ordered field-name → schema mapping for object nodes.
///
/// Field order mirrors authoring order; lookups are by name. Object schemas
/// are small, so lookup is a linear scan.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    entries: Vec<(String, SchemaRef)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing any existing field of the same name in place.
    pub fn with(mut self, name: impl Into<String>, schema: SchemaRef) -> Self {
        self.insert(name, schema);
        self
    }

    /// Inserts a field, replacing any existing field of the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, schema: SchemaRef) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = schema;
        } else {
            self.entries.push((name, schema));
        }
    }

    pub fn get(&self, name: &str) -> Option<&SchemaRef> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaRef)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, SchemaRef)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (String, SchemaRef)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (name, schema) in iter {
            map.insert(name, schema);
        }
        map
    }
}

/// Deferred schema reference, resolved through a getter at use time.
///
/// Consumers guard against infinite recursion with a seen-set keyed by the
/// getter's pointer identity and fall back to `any` when resolution fails.
#[derive(Clone)]
pub struct LazySchema {
    resolve: Arc<dyn Fn() -> Option<SchemaRef> + Send + Sync>,
}

impl LazySchema {
    pub fn new(resolve: impl Fn() -> Option<SchemaRef> + Send + Sync + 'static) -> Self {
        Self {
            resolve: Arc::new(resolve),
        }
    }

    /// Invokes the getter. `None` means resolution failed.
    pub fn resolve(&self) -> Option<SchemaRef> {
        (self.resolve)()
    }

    /// Stable identity of the getter, used as a seen-set key.
    pub fn identity(&self) -> usize {
        Arc::as_ptr(&self.resolve) as *const () as usize
    }
}

impl fmt::Debug for LazySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazySchema")
            .field("identity", &self.identity())
            .finish()
    }
}
