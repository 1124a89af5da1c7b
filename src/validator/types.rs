//! Validator node definitions
//!
//! The target system's validator tree has no native codec concept and no
//! native default-value concept: defaults ride along as side metadata on the
//! optional wrapper, and codec-governed positions appear as their wire
//! shape.

use serde_json::Value;

/// A node in the target validator tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    String,
    Float64,
    Int64,
    Boolean,
    Null,
    Any,
    /// Exactly one value
    Literal(Value),
    Array(Box<Validator>),
    /// Field list mirrors the schema's field order
    Object(Vec<ObjectField>),
    Record {
        keys: Box<Validator>,
        values: Box<Validator>,
    },
    Union(Vec<Validator>),
    /// Optional wrapper. `default` is side metadata: the target system has
    /// no structural default concept.
    Optional {
        value: Box<Validator>,
        default: Option<Value>,
    },
}

/// One field of an object validator.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectField {
    pub name: String,
    pub validator: Validator,
}

impl ObjectField {
    pub fn new(name: impl Into<String>, validator: Validator) -> Self {
        Self {
            name: name.into(),
            validator,
        }
    }
}

impl Validator {
    /// Wraps a validator in the optional wrapper. Idempotent: an already
    /// optional validator is returned unchanged.
    pub fn optional(validator: Validator) -> Validator {
        match validator {
            optional @ Validator::Optional { .. } => optional,
            value => Validator::Optional {
                value: Box::new(value),
                default: None,
            },
        }
    }

    /// Wraps a validator in the optional wrapper and attaches a default
    /// value. An existing default is kept.
    pub fn optional_with_default(validator: Validator, default: Value) -> Validator {
        match validator {
            Validator::Optional {
                value,
                default: existing,
            } => Validator::Optional {
                value,
                default: existing.or(Some(default)),
            },
            value => Validator::Optional {
                value: Box::new(value),
                default: Some(default),
            },
        }
    }

    /// Wraps a validator in a union with the null validator. A validator
    /// that already admits null is returned unchanged.
    pub fn nullable(validator: Validator) -> Validator {
        match validator {
            Validator::Null => Validator::Null,
            Validator::Union(mut alternatives) => {
                if !alternatives.contains(&Validator::Null) {
                    alternatives.push(Validator::Null);
                }
                Validator::Union(alternatives)
            }
            other => Validator::Union(vec![other, Validator::Null]),
        }
    }

    /// Builds a union, collapsing the degenerate cases: zero alternatives
    /// is `any`, one alternative is that alternative.
    pub fn union(mut alternatives: Vec<Validator>) -> Validator {
        match alternatives.len() {
            0 => Validator::Any,
            1 => alternatives.remove(0),
            _ => Validator::Union(alternatives),
        }
    }

    /// Returns the attached default value, if any.
    pub fn default_value(&self) -> Option<&Value> {
        match self {
            Validator::Optional { default, .. } => default.as_ref(),
            _ => None,
        }
    }

    /// True for the optional wrapper.
    pub fn is_optional(&self) -> bool {
        matches!(self, Validator::Optional { .. })
    }

    /// Returns the kind name for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Validator::String => "string",
            Validator::Float64 => "float64",
            Validator::Int64 => "int64",
            Validator::Boolean => "boolean",
            Validator::Null => "null",
            Validator::Any => "any",
            Validator::Literal(_) => "literal",
            Validator::Array(_) => "array",
            Validator::Object(_) => "object",
            Validator::Record { .. } => "record",
            Validator::Union(_) => "union",
            Validator::Optional { .. } => "optional",
        }
    }
}
