//! Heuristic expression typing.
//!
//! `infer_expression_type` looks at the shape of a single expression and
//! never fails: anything it does not recognise is `any`.

mod kind;

pub use kind::Kind;

use crate::ast::{AstNode, AstNodeKind, LiteralValue};

pub fn infer_expression_type(node: Option<&AstNode>) -> Kind {
    let Some(node) = node else {
        return Kind::Any;
    };

    match &node.kind {
        AstNodeKind::Literal { value, .. } => infer_literal(value),
        AstNodeKind::ArrayExpression { elements } => match elements.first() {
            // A hole is an absent element.
            Some(first) => Kind::array_of(infer_expression_type(first.as_ref())),
            None => Kind::array_of(Kind::Any),
        },
        AstNodeKind::ObjectExpression { properties } => {
            let mut entries: Vec<(String, Kind)> = Vec::new();
            for (name, kind) in properties.iter().filter_map(infer_property) {
                // A repeated key keeps its first position and its last type.
                match entries.iter_mut().find(|(existing, _)| *existing == name) {
                    Some(entry) => entry.1 = kind,
                    None => entries.push((name, kind)),
                }
            }
            Kind::Object(entries)
        }
        AstNodeKind::BinaryExpression { operator, .. } if operator.is_arithmetic() => Kind::Number,
        _ => Kind::Any,
    }
}

fn infer_literal(value: &LiteralValue) -> Kind {
    match value {
        LiteralValue::Number(_) => Kind::Number,
        LiteralValue::String(_) => Kind::String,
        LiteralValue::Boolean(_) => Kind::Boolean,
        LiteralValue::Null => Kind::Null,
        LiteralValue::Regex { .. } | LiteralValue::BigInt(_) => Kind::Any,
    }
}

/// Key and type of one object literal entry. Spreads and computed keys that
/// are not literals have no static name and are left out.
fn infer_property(property: &AstNode) -> Option<(String, Kind)> {
    let AstNodeKind::Property { key, value, computed, .. } = &property.kind else {
        return None;
    };
    let name = match &key.kind {
        AstNodeKind::Identifier { name } if !computed => name.clone(),
        AstNodeKind::Literal { value: LiteralValue::String(s), .. } => s.clone(),
        AstNodeKind::Literal { value: LiteralValue::Number(n), .. } => n.to_string(),
        _ => return None,
    };
    Some((name, infer_expression_type(Some(value))))
}

/// True when some element of an array literal infers to a different type
/// than the first one.
pub fn is_heterogeneous_array(node: &AstNode) -> bool {
    let AstNodeKind::ArrayExpression { elements } = &node.kind else {
        return false;
    };
    let mut kinds = elements.iter().map(|e| infer_expression_type(e.as_ref()));
    match kinds.next() {
        Some(first) => kinds.any(|k| k != first),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOperator, PropertyKind, UnaryOperator};

    fn node(kind: AstNodeKind) -> AstNode {
        AstNode::new(kind, None, None)
    }

    fn literal(value: LiteralValue) -> AstNode {
        node(AstNodeKind::Literal { value, raw: String::new() })
    }

    fn ident(name: &str) -> AstNode {
        node(AstNodeKind::Identifier { name: name.into() })
    }

    #[test]
    fn primitive_literals() {
        assert_eq!(infer_expression_type(Some(&literal(LiteralValue::Number(1.0)))), Kind::Number);
        assert_eq!(infer_expression_type(Some(&literal(LiteralValue::String("a".into())))), Kind::String);
        assert_eq!(infer_expression_type(Some(&literal(LiteralValue::Boolean(false)))), Kind::Boolean);
        assert_eq!(infer_expression_type(Some(&literal(LiteralValue::Null))), Kind::Null);
        let regex = LiteralValue::Regex { pattern: "a".into(), flags: "g".into() };
        assert_eq!(infer_expression_type(Some(&literal(regex))), Kind::Any);
    }

    #[test]
    fn absent_and_unknown_shapes_are_any() {
        assert_eq!(infer_expression_type(None), Kind::Any);
        assert_eq!(infer_expression_type(Some(&ident("x"))), Kind::Any);
        let call = node(AstNodeKind::CallExpression {
            callee: Box::new(ident("f")),
            arguments: vec![],
            optional: false,
        });
        assert_eq!(infer_expression_type(Some(&call)), Kind::Any);
        let negated = node(AstNodeKind::UnaryExpression {
            operator: UnaryOperator::Minus,
            prefix: true,
            argument: Box::new(literal(LiteralValue::Number(1.0))),
        });
        assert_eq!(infer_expression_type(Some(&negated)), Kind::Any);
    }

    #[test]
    fn arrays_use_the_first_element() {
        let empty = node(AstNodeKind::ArrayExpression { elements: vec![] });
        assert_eq!(infer_expression_type(Some(&empty)).to_string(), "any[]");

        let mixed = node(AstNodeKind::ArrayExpression {
            elements: vec![
                Some(literal(LiteralValue::Number(1.0))),
                Some(literal(LiteralValue::String("a".into()))),
            ],
        });
        assert_eq!(infer_expression_type(Some(&mixed)).to_string(), "number[]");
        assert!(is_heterogeneous_array(&mixed));

        let hole = node(AstNodeKind::ArrayExpression { elements: vec![None] });
        assert_eq!(infer_expression_type(Some(&hole)).to_string(), "any[]");
    }

    #[test]
    fn objects_recurse_in_order() {
        let inner = node(AstNodeKind::ObjectExpression {
            properties: vec![property(ident("c"), literal(LiteralValue::Boolean(true)))],
        });
        let outer = node(AstNodeKind::ObjectExpression {
            properties: vec![
                property(ident("b"), literal(LiteralValue::String("x".into()))),
                property(literal(LiteralValue::String("a".into())), literal(LiteralValue::Number(1.0))),
                property(ident("n"), inner),
                node(AstNodeKind::SpreadElement { argument: Box::new(ident("rest")) }),
            ],
        });
        assert_eq!(
            infer_expression_type(Some(&outer)).to_string(),
            "{ b: string; a: number; n: { c: boolean } }"
        );
    }

    #[test]
    fn repeated_keys_collapse_into_one_entry() {
        let obj = node(AstNodeKind::ObjectExpression {
            properties: vec![
                property(ident("a"), literal(LiteralValue::Number(1.0))),
                property(ident("b"), literal(LiteralValue::Null)),
                property(ident("a"), literal(LiteralValue::String("x".into()))),
            ],
        });
        assert_eq!(infer_expression_type(Some(&obj)).to_string(), "{ a: string; b: null }");
    }

    #[test]
    fn arithmetic_is_number_regardless_of_operands() {
        for operator in [BinaryOperator::Add, BinaryOperator::Sub, BinaryOperator::Mul, BinaryOperator::Div, BinaryOperator::Mod] {
            let expr = node(AstNodeKind::BinaryExpression {
                operator,
                left: Box::new(ident("a")),
                right: Box::new(literal(LiteralValue::String("s".into()))),
            });
            assert_eq!(infer_expression_type(Some(&expr)), Kind::Number);
        }
        let cmp = node(AstNodeKind::BinaryExpression {
            operator: BinaryOperator::Lt,
            left: Box::new(ident("a")),
            right: Box::new(ident("b")),
        });
        assert_eq!(infer_expression_type(Some(&cmp)), Kind::Any);
    }

    fn property(key: AstNode, value: AstNode) -> AstNode {
        node(AstNodeKind::Property {
            key: Box::new(key),
            value: Box::new(value),
            kind: PropertyKind::Init,
            method: false,
            shorthand: false,
            computed: false,
        })
    }
}
