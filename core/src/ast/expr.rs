//! file: core/src/ast/expr.rs
//! description: expression builders.
//!
//! Every `parse_*` function takes a pair produced by `RulesParser` and
//! returns the matching `AstNode`. `parse_expression_rule` accepts a pair of
//! any expression-level rule, so callers never need to know which
//! precedence level the grammar stopped at.
//!
use crate::{
    ast::{
        AstNode, AstNodeKind, BinaryOperator, LiteralValue, LogicalOperator, ParseResult, PropertyKind,
        Rule, UnaryOperator, UpdateOperator, err::unexpected, func, rules, rules::Pair,
    },
    script,
};

pub(crate) fn parse_expression_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    match pair.as_rule() {
        Rule::expression => parse_sequence_rule(pair, script),
        Rule::assignment_expression => parse_assignment_expression_rule(pair, script),
        Rule::arrow_function => func::parse_arrow_function_rule(pair, script),
        Rule::conditional_expression => parse_conditional_expression_rule(pair, script),
        Rule::logical_or_expression
        | Rule::logical_and_expression
        | Rule::bitwise_or_expression
        | Rule::bitwise_xor_expression
        | Rule::bitwise_and_expression
        | Rule::equality_expression
        | Rule::relational_expression
        | Rule::shift_expression
        | Rule::additive_expression
        | Rule::multiplicative_expression => parse_binary_chain_rule(pair, script),
        Rule::unary_expression => parse_unary_expression_rule(pair, script),
        Rule::postfix_expression => parse_postfix_expression_rule(pair, script),
        Rule::new_expression => parse_new_expression_rule(pair, script),
        Rule::parenthesized_expression => {
            let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
            let expr_pair = rules::fetch_next_pair(&mut inner, &location, &span)?;
            parse_expression_rule(expr_pair, script)
        }
        Rule::spread_element => {
            let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
            let arg_pair = rules::fetch_next_pair(&mut inner, &location, &span)?;
            let argument = parse_expression_rule(arg_pair, script)?;
            Ok(AstNode::new(
                AstNodeKind::SpreadElement { argument: Box::new(argument) },
                location,
                span,
            ))
        }
        Rule::function_expression => func::parse_function_rule(pair, script, false),
        Rule::class_expression => func::parse_class_rule(pair, script, false),
        Rule::array_literal => parse_array_literal_rule(pair, script),
        Rule::object_literal => parse_object_literal_rule(pair, script),
        Rule::this_expression => Ok(leaf(AstNodeKind::ThisExpression, &pair, script)),
        Rule::super_expression => Ok(leaf(AstNodeKind::Super, &pair, script)),
        Rule::identifier | Rule::property_identifier => parse_identifier_rule(pair, script),
        Rule::private_identifier => parse_private_identifier_rule(pair, script),
        Rule::import_call => parse_import_call_rule(pair, script),
        Rule::meta_property => parse_meta_property_rule(pair, script),
        Rule::number
        | Rule::bigint
        | Rule::string
        | Rule::boolean
        | Rule::null
        | Rule::regex
        | Rule::template_literal => parse_literal_rule(pair, script),
        other => Err(unexpected(
            format!("Unexpected expression type: {:?}", other),
            "typeify.expr.parse_expression_rule",
            rules::get_location_from_pair(&pair, script),
            rules::get_span_from_pair(&pair, script),
        )),
    }
}

fn leaf(kind: AstNodeKind, pair: &Pair, script: &script::Script) -> AstNode {
    AstNode::new(
        kind,
        rules::get_location_from_pair(pair, script),
        rules::get_span_from_pair(pair, script),
    )
}

fn parse_sequence_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (inner, location, span) = rules::get_data_from_rule(&pair, script);
    let mut expressions = inner
        .map(|p| parse_expression_rule(p, script))
        .collect::<ParseResult<Vec<AstNode>>>()?;

    if expressions.len() == 1 {
        if let Some(only) = expressions.pop() {
            return Ok(only);
        }
    }
    if expressions.is_empty() {
        return Err(unexpected(
            "Empty expression.",
            "typeify.expr.parse_sequence_rule",
            location,
            span,
        ));
    }
    Ok(AstNode::new(AstNodeKind::SequenceExpression { expressions }, location, span))
}

fn parse_assignment_expression_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let target_pair = rules::fetch_next_pair(&mut inner, &location, &span)?;
    let target = parse_expression_rule(target_pair, script)?;

    let Some(op_pair) = inner.next() else {
        return Ok(target);
    };
    let value_pair = rules::fetch_next_pair(&mut inner, &location, &span)?;
    let value = parse_expression_rule(value_pair, script)?;

    Ok(AstNode::new(
        AstNodeKind::AssignmentExpression {
            operator: op_pair.as_str().to_string(),
            left: Box::new(target),
            right: Box::new(value),
        },
        location,
        span,
    ))
}

fn parse_conditional_expression_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let test_pair = rules::fetch_next_pair(&mut inner, &location, &span)?;
    let test = parse_expression_rule(test_pair, script)?;

    let Some(consequent_pair) = inner.next() else {
        return Ok(test);
    };
    let alternate_pair = rules::fetch_next_pair(&mut inner, &location, &span)?;

    Ok(AstNode::new(
        AstNodeKind::ConditionalExpression {
            test: Box::new(test),
            consequent: Box::new(parse_expression_rule(consequent_pair, script)?),
            alternate: Box::new(parse_expression_rule(alternate_pair, script)?),
        },
        location,
        span,
    ))
}

/// Left-associative `operand (op operand)*` chains shared by every binary
/// precedence level.
fn parse_binary_chain_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);

    let left_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    let mut node = parse_expression_rule(left_pair, script)?;

    while let Some(op_pair) = inner_pairs.next() {
        let Some(right_pair) = inner_pairs.next() else {
            return Err(unexpected(
                format!("Missing right-hand operand for operator '{}'.", op_pair.as_str()),
                "typeify.expr.parse_binary_chain_rule",
                rules::get_location_from_pair(&op_pair, script),
                rules::get_span_from_pair(&op_pair, script),
            ));
        };
        let right = parse_expression_rule(right_pair, script)?;

        let symbol = op_pair.as_str();
        let node_location = node.location.clone();
        let node_span = rules::join_spans(node.get_span(), right.get_span());
        let kind = if let Some(op) = LogicalOperator::from_symbol(symbol) {
            AstNodeKind::LogicalExpression {
                operator: op,
                left: Box::new(node),
                right: Box::new(right),
            }
        } else if let Some(op) = BinaryOperator::from_symbol(symbol) {
            AstNodeKind::BinaryExpression {
                operator: op,
                left: Box::new(node),
                right: Box::new(right),
            }
        } else {
            return Err(unexpected(
                format!("Invalid binary operator '{}'.", symbol),
                "typeify.expr.parse_binary_chain_rule",
                rules::get_location_from_pair(&op_pair, script),
                rules::get_span_from_pair(&op_pair, script),
            ));
        };
        node = AstNode::new(kind, node_location, node_span);
    }

    Ok(node)
}

fn parse_unary_expression_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let next_rule = rules::fetch_next_pair(&mut inner, &location, &span)?;
    if next_rule.as_rule() != Rule::unary_op {
        return parse_expression_rule(next_rule, script);
    }

    let operand_pair = rules::fetch_next_pair(&mut inner, &location, &span)?;
    let argument = Box::new(parse_expression_rule(operand_pair, script)?);

    let kind = match next_rule.as_str() {
        "++" => AstNodeKind::UpdateExpression { operator: UpdateOperator::Inc, prefix: true, argument },
        "--" => AstNodeKind::UpdateExpression { operator: UpdateOperator::Dec, prefix: true, argument },
        "await" => AstNodeKind::AwaitExpression { argument },
        "yield" => AstNodeKind::YieldExpression { argument: Some(argument) },
        symbol => {
            let operator = match symbol {
                "+" => UnaryOperator::Plus,
                "-" => UnaryOperator::Minus,
                "!" => UnaryOperator::Not,
                "~" => UnaryOperator::BitNot,
                "typeof" => UnaryOperator::TypeOf,
                "void" => UnaryOperator::Void,
                "delete" => UnaryOperator::Delete,
                _ => {
                    return Err(unexpected(
                        format!("Invalid unary operator '{}'.", symbol),
                        "typeify.expr.parse_unary_expression_rule",
                        location,
                        span,
                    ));
                }
            };
            AstNodeKind::UnaryExpression { operator, prefix: true, argument }
        }
    };

    Ok(AstNode::new(kind, location, span))
}

pub(crate) fn parse_postfix_expression_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let head = rules::fetch_next_pair(&mut inner, &location, &span)?;
    let mut node = parse_expression_rule(head, script)?;

    for op_pair in inner {
        match op_pair.as_rule() {
            Rule::postfix_op => {
                let mut op_inner = op_pair.clone().into_inner();
                let access = rules::fetch_next_pair(&mut op_inner, &location, &span)?;
                node = apply_access(node, access, script)?;
            }
            Rule::update_suffix => {
                let operator = if op_pair.as_str() == "++" {
                    UpdateOperator::Inc
                } else {
                    UpdateOperator::Dec
                };
                let node_location = node.location.clone();
                let op_span = rules::get_span_from_pair(&op_pair, script);
                let node_span = rules::join_spans(node.get_span(), op_span.as_ref());
                node = AstNode::new(
                    AstNodeKind::UpdateExpression { operator, prefix: false, argument: Box::new(node) },
                    node_location,
                    node_span,
                );
            }
            other => {
                return Err(unexpected(
                    format!("Unsupported postfix operator: {:?}", other),
                    "typeify.expr.parse_postfix_expression_rule",
                    rules::get_location_from_pair(&op_pair, script),
                    rules::get_span_from_pair(&op_pair, script),
                ));
            }
        }
    }

    Ok(node)
}

/// Wrap `object` in the call or member access described by `access`.
fn apply_access(object: AstNode, access: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let optional = access.as_str().starts_with("?.");
    let node_location = object.location.clone();
    let access_span = rules::get_span_from_pair(&access, script);
    let node_span = rules::join_spans(object.get_span(), access_span.as_ref());

    let kind = match access.as_rule() {
        Rule::call_arguments => AstNodeKind::CallExpression {
            callee: Box::new(object),
            arguments: parse_arguments_rule(access, script)?,
            optional,
        },
        Rule::member_access => {
            let (mut inner, location, span) = rules::get_data_from_rule(&access, script);
            let property_pair = rules::fetch_next_pair(&mut inner, &location, &span)?;
            AstNodeKind::MemberExpression {
                object: Box::new(object),
                property: Box::new(parse_expression_rule(property_pair, script)?),
                computed: false,
                optional,
            }
        }
        Rule::computed_access => {
            let (mut inner, location, span) = rules::get_data_from_rule(&access, script);
            let property_pair = rules::fetch_next_pair(&mut inner, &location, &span)?;
            AstNodeKind::MemberExpression {
                object: Box::new(object),
                property: Box::new(parse_expression_rule(property_pair, script)?),
                computed: true,
                optional,
            }
        }
        other => {
            return Err(unexpected(
                format!("Unsupported member access: {:?}", other),
                "typeify.expr.apply_access",
                access_span.as_ref().map(|s| s.start.clone()),
                access_span,
            ));
        }
    };

    Ok(AstNode::new(kind, node_location, node_span))
}

fn parse_arguments_rule(pair: Pair, script: &script::Script) -> ParseResult<Vec<AstNode>> {
    pair.into_inner()
        .map(|arg| parse_expression_rule(arg, script))
        .collect()
}

fn parse_new_expression_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let target_pair = rules::fetch_next_pair(&mut inner, &location, &span)?;

    let (mut target_inner, target_location, target_span) = rules::get_data_from_rule(&target_pair, script);
    let head = rules::fetch_next_pair(&mut target_inner, &target_location, &target_span)?;
    let mut callee = parse_expression_rule(head, script)?;
    for access in target_inner {
        callee = apply_access(callee, access, script)?;
    }

    let arguments = match inner.next() {
        Some(args) => parse_arguments_rule(args, script)?,
        None => Vec::new(),
    };

    Ok(AstNode::new(
        AstNodeKind::NewExpression { callee: Box::new(callee), arguments },
        location,
        span,
    ))
}

fn parse_array_literal_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (inner, location, span) = rules::get_data_from_rule(&pair, script);
    let mut elements = Vec::new();
    for item in inner {
        let element = match item.into_inner().next() {
            Some(expr_pair) => Some(parse_expression_rule(expr_pair, script)?),
            None => None,
        };
        elements.push(element);
    }
    // `[a,]` has one element: a trailing comma does not open a hole.
    if elements.len() > 1 && matches!(elements.last(), Some(None)) {
        elements.pop();
    }
    Ok(AstNode::new(AstNodeKind::ArrayExpression { elements }, location, span))
}

fn parse_object_literal_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (inner, location, span) = rules::get_data_from_rule(&pair, script);
    let properties = inner
        .map(|member| match member.as_rule() {
            Rule::property => parse_property_rule(member, script),
            _ => parse_expression_rule(member, script),
        })
        .collect::<ParseResult<Vec<AstNode>>>()?;
    Ok(AstNode::new(AstNodeKind::ObjectExpression { properties }, location, span))
}

fn parse_property_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let first = rules::fetch_next_pair(&mut inner, &location, &span)?;

    let kind = match first.as_rule() {
        Rule::method_property => {
            let method = func::parse_method_property_rule(first, script)?;
            AstNodeKind::Property {
                key: Box::new(method.key),
                value: Box::new(method.value),
                kind: method.kind,
                method: method.kind == PropertyKind::Init,
                shorthand: false,
                computed: method.computed,
            }
        }
        Rule::shorthand_property => {
            let mut shorthand = first.into_inner();
            let ident_pair = rules::fetch_next_pair(&mut shorthand, &location, &span)?;
            let key = parse_identifier_rule(ident_pair, script)?;
            AstNodeKind::Property {
                key: Box::new(key.clone()),
                value: Box::new(key),
                kind: PropertyKind::Init,
                method: false,
                shorthand: true,
                computed: false,
            }
        }
        _ => {
            let (key, computed) = parse_property_key_rule(first, script)?;
            let value_pair = rules::fetch_next_pair(&mut inner, &location, &span)?;
            AstNodeKind::Property {
                key: Box::new(key),
                value: Box::new(parse_expression_rule(value_pair, script)?),
                kind: PropertyKind::Init,
                method: false,
                shorthand: false,
                computed,
            }
        }
    };

    Ok(AstNode::new(kind, location, span))
}

/// Parse a `property_key` or `computed_key` pair. The flag tells whether the
/// key was computed (`[expr]`).
pub(crate) fn parse_property_key_rule(pair: Pair, script: &script::Script) -> ParseResult<(AstNode, bool)> {
    if pair.as_rule() == Rule::private_identifier {
        return Ok((parse_private_identifier_rule(pair, script)?, false));
    }
    let computed = pair.as_rule() == Rule::computed_key;
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let key_pair = rules::fetch_next_pair(&mut inner, &location, &span)?;
    Ok((parse_expression_rule(key_pair, script)?, computed))
}

pub(crate) fn parse_identifier_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (_, location, span) = rules::get_data_from_rule(&pair, script);
    Ok(AstNode::new(
        AstNodeKind::Identifier {
            name: pair.as_str().to_string(),
        },
        location,
        span,
    ))
}

fn parse_private_identifier_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (_, location, span) = rules::get_data_from_rule(&pair, script);
    let text = pair.as_str();
    Ok(AstNode::new(
        AstNodeKind::PrivateIdentifier {
            name: text.strip_prefix('#').unwrap_or(text).to_string(),
        },
        location,
        span,
    ))
}

/// `import(source)` or `import(source, options)`.
fn parse_import_call_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let source = parse_expression_rule(rules::fetch_next_pair(&mut inner, &location, &span)?, script)?;
    let options = inner
        .next()
        .map(|p| parse_expression_rule(p, script).map(Box::new))
        .transpose()?;
    Ok(AstNode::new(
        AstNodeKind::ImportExpression {
            source: Box::new(source),
            options,
        },
        location,
        span,
    ))
}

fn parse_meta_property_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let meta = parse_identifier_rule(rules::fetch_next_pair(&mut inner, &location, &span)?, script)?;
    let property = parse_identifier_rule(rules::fetch_next_pair(&mut inner, &location, &span)?, script)?;
    Ok(AstNode::new(
        AstNodeKind::MetaProperty {
            meta: Box::new(meta),
            property: Box::new(property),
        },
        location,
        span,
    ))
}

pub(crate) fn parse_literal_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (_, location, span) = rules::get_data_from_rule(&pair, script);
    let raw = pair.as_str();

    let value = match pair.as_rule() {
        Rule::number => match parse_number(raw) {
            Some(value) => LiteralValue::Number(value),
            None => {
                return Err(unexpected(
                    format!("Invalid number format '{}'.", raw),
                    "typeify.expr.parse_literal_rule",
                    location,
                    span,
                ));
            }
        },
        Rule::bigint => LiteralValue::BigInt(raw.trim_end_matches('n').to_string()),
        Rule::string => LiteralValue::String(unescape(&raw[1..raw.len() - 1])),
        Rule::boolean => LiteralValue::Boolean(raw == "true"),
        Rule::null => LiteralValue::Null,
        Rule::regex => {
            let close = raw.rfind('/').unwrap_or(0);
            LiteralValue::Regex {
                pattern: raw[1..close.max(1)].to_string(),
                flags: raw[close + 1..].to_string(),
            }
        }
        Rule::template_literal => {
            return Ok(AstNode::new(
                AstNodeKind::TemplateLiteral {
                    raw: raw[1..raw.len() - 1].to_string(),
                },
                location,
                span,
            ));
        }
        other => {
            return Err(unexpected(
                format!("Unexpected literal type: {:?}", other),
                "typeify.expr.parse_literal_rule",
                location,
                span,
            ));
        }
    };

    Ok(AstNode::new(
        AstNodeKind::Literal {
            value,
            raw: raw.to_string(),
        },
        location,
        span,
    ))
}

fn parse_number(raw: &str) -> Option<f64> {
    let digits: String = raw.chars().filter(|c| *c != '_').collect();
    let radix = match digits.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    match radix {
        Some(radix) => u64::from_str_radix(&digits[2..], radix).ok().map(|v| v as f64),
        None => digits.parse::<f64>().ok(),
    }
}

/// Decode the escape sequences of a string literal body.
fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            break;
        };
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            // line continuation
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                push_code_point(&mut out, &hex, "\\x");
            }
            'u' => {
                let hex: String = if chars.peek() == Some(&'{') {
                    chars.next();
                    chars.by_ref().take_while(|c| *c != '}').collect()
                } else {
                    chars.by_ref().take(4).collect()
                };
                push_code_point(&mut out, &hex, "\\u");
            }
            other => out.push(other),
        }
    }
    out
}

fn push_code_point(out: &mut String, hex: &str, prefix: &str) {
    match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
        Some(c) => out.push(c),
        None => {
            out.push_str(prefix);
            out.push_str(hex);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_in_every_radix() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("1_000.5"), Some(1000.5));
        assert_eq!(parse_number("0xff"), Some(255.0));
        assert_eq!(parse_number("0b101"), Some(5.0));
        assert_eq!(parse_number("0o17"), Some(15.0));
        assert_eq!(parse_number(".5e1"), Some(5.0));
    }

    #[test]
    fn string_escapes_are_decoded() {
        assert_eq!(unescape(r"a\nb"), "a\nb");
        assert_eq!(unescape(r"\x41B\u{43}"), "ABC");
        assert_eq!(unescape(r#"it\'s \"q\""#), "it's \"q\"");
        assert_eq!(unescape("line\\\ncontinued"), "linecontinued");
    }
}
