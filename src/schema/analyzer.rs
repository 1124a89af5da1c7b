//! Schema node analyzer
//!
//! Inspects one schema node and normalizes its modifier chain into a
//! `{optional, nullable, default}` descriptor plus the unwrapped base node.
//! Side-effect free; never mutates the input graph.

use serde_json::Value;

use super::node::{SchemaNode, SchemaRef};

/// Normalized modifier descriptor produced by [`analyze`].
#[derive(Debug, Clone)]
pub struct Analyzed {
    /// The unwrapped, non-modifier base node.
    pub base: SchemaRef,
    /// An optional modifier appeared somewhere in the chain.
    pub optional: bool,
    /// A nullable modifier appeared, or a union alternative was the null
    /// literal.
    pub nullable: bool,
    /// The default value, if a default modifier appeared. The outermost
    /// default wins when several are stacked.
    pub default: Option<Value>,
}

impl Analyzed {
    /// True when the field must behave as optional to the target system
    /// (either explicitly optional or default-valued).
    pub fn behaves_optional(&self) -> bool {
        self.optional || self.default.is_some()
    }
}

/// Unwraps modifier kinds in whatever order they appear, accumulating flags
/// until a non-modifier node is reached.
///
/// A choice node whose alternatives include an explicit null folds into
/// `nullable`: the null alternative is removed and a single remaining
/// alternative collapses to itself. Unwrapping is order-insensitive:
/// nullable-then-optional and optional-then-nullable produce identical
/// flags.
pub fn analyze(node: &SchemaRef) -> Analyzed {
    let mut optional = false;
    let mut nullable = false;
    let mut default = None;
    let mut current = node.clone();

    loop {
        match &*current {
            SchemaNode::Optional(inner) => {
                optional = true;
                current = inner.clone();
            }
            SchemaNode::Nullable(inner) => {
                nullable = true;
                current = inner.clone();
            }
            SchemaNode::WithDefault(inner, value) => {
                if default.is_none() {
                    default = Some(value.clone());
                }
                current = inner.clone();
            }
            SchemaNode::Union(alternatives) if union_has_null(alternatives) => {
                nullable = true;
                let remaining: Vec<SchemaRef> = alternatives
                    .iter()
                    .filter(|alt| !is_null_alternative(alt))
                    .cloned()
                    .collect();
                current = match remaining.len() {
                    0 => SchemaNode::null(),
                    1 => remaining[0].clone(),
                    _ => SchemaNode::union(remaining),
                };
                // A single remaining alternative may itself be a modifier;
                // keep unwrapping.
                if matches!(&*current, SchemaNode::Null) {
                    break;
                }
            }
            _ => break,
        }
    }

    Analyzed {
        base: current,
        optional,
        nullable,
        default,
    }
}

fn union_has_null(alternatives: &[SchemaRef]) -> bool {
    alternatives.iter().any(|alt| is_null_alternative(alt))
}

fn is_null_alternative(node: &SchemaNode) -> bool {
    matches!(node, SchemaNode::Null) || matches!(node, SchemaNode::Literal(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_node_has_no_flags() {
        let analyzed = analyze(&SchemaNode::string());
        assert!(!analyzed.optional);
        assert!(!analyzed.nullable);
        assert!(analyzed.default.is_none());
        assert!(matches!(&*analyzed.base, SchemaNode::String));
    }

    #[test]
    fn test_modifier_order_is_insensitive() {
        let a = analyze(&SchemaNode::optional(SchemaNode::nullable(
            SchemaNode::int(),
        )));
        let b = analyze(&SchemaNode::nullable(SchemaNode::optional(
            SchemaNode::int(),
        )));

        assert!(a.optional && a.nullable);
        assert!(b.optional && b.nullable);
        assert!(matches!(&*a.base, SchemaNode::Int));
        assert!(matches!(&*b.base, SchemaNode::Int));
    }

    #[test]
    fn test_default_marks_behaves_optional() {
        let analyzed = analyze(&SchemaNode::with_default(SchemaNode::int(), json!(7)));
        assert!(!analyzed.optional);
        assert!(analyzed.behaves_optional());
        assert_eq!(analyzed.default, Some(json!(7)));
    }

    #[test]
    fn test_outermost_default_wins() {
        let inner = SchemaNode::with_default(SchemaNode::int(), json!(1));
        let analyzed = analyze(&SchemaNode::with_default(inner, json!(2)));
        assert_eq!(analyzed.default, Some(json!(2)));
    }

    #[test]
    fn test_union_with_null_folds_into_nullable() {
        let schema = SchemaNode::union(vec![SchemaNode::string(), SchemaNode::null()]);
        let analyzed = analyze(&schema);
        assert!(analyzed.nullable);
        assert!(matches!(&*analyzed.base, SchemaNode::String));
    }

    #[test]
    fn test_union_with_null_keeps_other_alternatives() {
        let schema = SchemaNode::union(vec![
            SchemaNode::string(),
            SchemaNode::null(),
            SchemaNode::int(),
        ]);
        let analyzed = analyze(&schema);
        assert!(analyzed.nullable);
        match &*analyzed.base {
            SchemaNode::Union(alts) => assert_eq!(alts.len(), 2),
            other => panic!("expected union base, got {}", other.kind_name()),
        }
    }

    #[test]
    fn test_union_of_only_null_collapses_to_null() {
        let schema = SchemaNode::union(vec![SchemaNode::null()]);
        let analyzed = analyze(&schema);
        assert!(analyzed.nullable);
        assert!(matches!(&*analyzed.base, SchemaNode::Null));
    }

    #[test]
    fn test_modifier_behind_folded_union_is_unwrapped() {
        let schema = SchemaNode::union(vec![
            SchemaNode::optional(SchemaNode::boolean()),
            SchemaNode::null(),
        ]);
        let analyzed = analyze(&schema);
        assert!(analyzed.nullable);
        assert!(analyzed.optional);
        assert!(matches!(&*analyzed.base, SchemaNode::Boolean));
    }

    #[test]
    fn test_analyzer_does_not_mutate_input() {
        let schema = SchemaNode::optional(SchemaNode::string());
        let _ = analyze(&schema);
        assert!(matches!(&*schema, SchemaNode::Optional(_)));
    }
}
