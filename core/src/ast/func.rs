//! file: core/src/ast/func.rs
//! description: functions, parameters, binding patterns and classes.
//!
use crate::{
    ast::{
        AstNode, AstNodeKind, FunctionBody, MethodKind, ParseResult, PropertyKind, Rule, err::unexpected,
        expr, rules, rules::Pair, stmt,
    },
    script,
};

/// Shared builder for `function_declaration` and `function_expression`.
pub(crate) fn parse_function_rule(
    pair: Pair,
    script: &script::Script,
    is_declaration: bool,
) -> ParseResult<AstNode> {
    let (inner, location, span) = rules::get_data_from_rule(&pair, script);

    let mut is_async = false;
    let mut generator = false;
    let mut id = None;
    let mut params = Vec::new();
    let mut body = None;

    for part in inner {
        match part.as_rule() {
            Rule::async_modifier => is_async = true,
            Rule::generator_marker => generator = true,
            Rule::identifier => id = Some(Box::new(expr::parse_identifier_rule(part, script)?)),
            Rule::parameter_list => params = parse_parameter_list_rule(part, script)?,
            Rule::function_body => body = Some(parse_function_body_rule(part, script)?),
            other => {
                return Err(unexpected(
                    format!("Unexpected function part: {:?}", other),
                    "typeify.ast.func.parse_function_rule",
                    rules::get_location_from_pair(&part, script),
                    rules::get_span_from_pair(&part, script),
                ));
            }
        }
    }

    let Some(body) = body else {
        return Err(unexpected(
            "Function without a body.",
            "typeify.ast.func.parse_function_rule",
            location,
            span,
        ));
    };

    let kind = if is_declaration {
        AstNodeKind::FunctionDeclaration { id, params, body, generator, is_async }
    } else {
        AstNodeKind::FunctionExpression { id, params, body, generator, is_async }
    };
    Ok(AstNode::new(kind, location, span))
}

pub(crate) fn parse_function_body_rule(pair: Pair, script: &script::Script) -> ParseResult<FunctionBody> {
    let (inner, _, span) = rules::get_data_from_rule(&pair, script);
    let body = inner
        .map(|p| stmt::parse_statement_rule(p, script))
        .collect::<ParseResult<Vec<AstNode>>>()?;
    Ok(FunctionBody { body, span })
}

pub(crate) fn parse_parameter_list_rule(pair: Pair, script: &script::Script) -> ParseResult<Vec<AstNode>> {
    pair.into_inner()
        .map(|param| match param.as_rule() {
            Rule::rest_element => parse_rest_element_rule(param, script),
            _ => parse_binding_element_rule(param, script),
        })
        .collect()
}

/// `identifier`, `object_pattern` or `array_pattern`.
pub(crate) fn parse_binding_target_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    match pair.as_rule() {
        Rule::identifier => expr::parse_identifier_rule(pair, script),
        Rule::object_pattern => parse_object_pattern_rule(pair, script),
        Rule::array_pattern => parse_array_pattern_rule(pair, script),
        other => Err(unexpected(
            format!("Unexpected binding target: {:?}", other),
            "typeify.ast.func.parse_binding_target_rule",
            rules::get_location_from_pair(&pair, script),
            rules::get_span_from_pair(&pair, script),
        )),
    }
}

fn parse_binding_element_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let target = parse_binding_target_rule(rules::fetch_next_pair(&mut inner, &location, &span)?, script)?;

    match inner.next() {
        Some(default_pair) => {
            let right = expr::parse_expression_rule(default_pair, script)?;
            Ok(AstNode::new(
                AstNodeKind::AssignmentPattern {
                    left: Box::new(target),
                    right: Box::new(right),
                },
                location,
                span,
            ))
        }
        None => Ok(target),
    }
}

fn parse_rest_element_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let argument = parse_binding_target_rule(rules::fetch_next_pair(&mut inner, &location, &span)?, script)?;
    Ok(AstNode::new(
        AstNodeKind::RestElement { argument: Box::new(argument) },
        location,
        span,
    ))
}

fn parse_object_pattern_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (inner, location, span) = rules::get_data_from_rule(&pair, script);

    let mut properties = Vec::new();
    for property in inner {
        let (mut prop_inner, prop_location, prop_span) = rules::get_data_from_rule(&property, script);
        let first = rules::fetch_next_pair(&mut prop_inner, &prop_location, &prop_span)?;

        let node = match first.as_rule() {
            Rule::rest_element => parse_rest_element_rule(first, script)?,
            Rule::binding_element => {
                // `{ a }` or `{ a = 1 }`: the key is the bound name.
                let value = parse_binding_element_rule(first, script)?;
                let key = match &value.kind {
                    AstNodeKind::AssignmentPattern { left, .. } => left.as_ref().clone(),
                    _ => value.clone(),
                };
                AstNode::new(
                    AstNodeKind::Property {
                        key: Box::new(key),
                        value: Box::new(value),
                        kind: PropertyKind::Init,
                        method: false,
                        shorthand: true,
                        computed: false,
                    },
                    prop_location,
                    prop_span,
                )
            }
            _ => {
                let (key, computed) = expr::parse_property_key_rule(first, script)?;
                let value_pair = rules::fetch_next_pair(&mut prop_inner, &prop_location, &prop_span)?;
                AstNode::new(
                    AstNodeKind::Property {
                        key: Box::new(key),
                        value: Box::new(parse_binding_element_rule(value_pair, script)?),
                        kind: PropertyKind::Init,
                        method: false,
                        shorthand: false,
                        computed,
                    },
                    prop_location,
                    prop_span,
                )
            }
        };
        properties.push(node);
    }

    Ok(AstNode::new(AstNodeKind::ObjectPattern { properties }, location, span))
}

fn parse_array_pattern_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (inner, location, span) = rules::get_data_from_rule(&pair, script);

    let mut elements = Vec::new();
    for item in inner {
        let element = match item.into_inner().next() {
            Some(p) if p.as_rule() == Rule::rest_element => Some(parse_rest_element_rule(p, script)?),
            Some(p) => Some(parse_binding_element_rule(p, script)?),
            None => None,
        };
        elements.push(element);
    }
    if elements.len() > 1 && matches!(elements.last(), Some(None)) {
        elements.pop();
    }

    Ok(AstNode::new(AstNodeKind::ArrayPattern { elements }, location, span))
}

pub(crate) fn parse_arrow_function_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (inner, location, span) = rules::get_data_from_rule(&pair, script);

    let mut is_async = false;
    let mut params = Vec::new();
    let mut body = None;
    let mut expression = false;

    for part in inner {
        match part.as_rule() {
            Rule::async_modifier => is_async = true,
            Rule::arrow_parameters => {
                for param in part.into_inner() {
                    match param.as_rule() {
                        Rule::identifier => params.push(expr::parse_identifier_rule(param, script)?),
                        _ => params = parse_parameter_list_rule(param, script)?,
                    }
                }
            }
            Rule::function_body => {
                let block = parse_function_body_rule(part, script)?;
                let block_span = block.span.clone();
                let block_location = block_span.as_ref().map(|s| s.start.clone());
                body = Some(AstNode::new(
                    AstNodeKind::BlockStatement { body: block.body },
                    block_location,
                    block_span,
                ));
            }
            _ => {
                expression = true;
                body = Some(expr::parse_expression_rule(part, script)?);
            }
        }
    }

    let Some(body) = body else {
        return Err(unexpected(
            "Arrow function without a body.",
            "typeify.ast.func.parse_arrow_function_rule",
            location,
            span,
        ));
    };

    Ok(AstNode::new(
        AstNodeKind::ArrowFunctionExpression {
            params,
            body: Box::new(body),
            expression,
            is_async,
        },
        location,
        span,
    ))
}

/// A method of an object literal or a class body.
pub(crate) struct Method {
    pub key: AstNode,
    pub computed: bool,
    /// `Init` for a plain method, `Get`/`Set` for accessors.
    pub kind: PropertyKind,
    /// The `FunctionExpression` holding the method.
    pub value: AstNode,
}

pub(crate) fn parse_method_property_rule(pair: Pair, script: &script::Script) -> ParseResult<Method> {
    let (inner, location, span) = rules::get_data_from_rule(&pair, script);

    let mut kind = PropertyKind::Init;
    let mut is_async = false;
    let mut generator = false;
    let mut key = None;
    let mut params = Vec::new();
    let mut body = None;
    let mut value_span = None;

    for part in inner {
        match part.as_rule() {
            Rule::accessor_kind => kind = PropertyKind::from_accessor(part.as_str()).unwrap_or(kind),
            Rule::async_modifier => is_async = true,
            Rule::generator_marker => generator = true,
            Rule::computed_key | Rule::property_key | Rule::private_identifier => {
                key = Some(expr::parse_property_key_rule(part, script)?);
            }
            Rule::parameter_list => params = parse_parameter_list_rule(part, script)?,
            Rule::function_body => {
                let block = parse_function_body_rule(part, script)?;
                value_span = rules::join_spans(
                    key.as_ref().and_then(|(k, _)| k.get_span()),
                    block.span.as_ref(),
                );
                body = Some(block);
            }
            other => {
                return Err(unexpected(
                    format!("Unexpected method part: {:?}", other),
                    "typeify.ast.func.parse_method_property_rule",
                    rules::get_location_from_pair(&part, script),
                    rules::get_span_from_pair(&part, script),
                ));
            }
        }
    }

    let (Some((key, computed)), Some(body)) = (key, body) else {
        return Err(unexpected(
            "Method without a key or a body.",
            "typeify.ast.func.parse_method_property_rule",
            location,
            span,
        ));
    };

    let value = AstNode::new(
        AstNodeKind::FunctionExpression {
            id: None,
            params,
            body,
            generator,
            is_async,
        },
        value_span.as_ref().map(|s| s.start.clone()).or(location),
        value_span.or(span),
    );
    Ok(Method { key, computed, kind, value })
}

/// Shared builder for `class_declaration` and `class_expression`.
pub(crate) fn parse_class_rule(
    pair: Pair,
    script: &script::Script,
    is_declaration: bool,
) -> ParseResult<AstNode> {
    let (inner, location, span) = rules::get_data_from_rule(&pair, script);

    let mut id = None;
    let mut super_class = None;
    let mut body = None;

    for part in inner {
        match part.as_rule() {
            Rule::identifier => id = Some(Box::new(expr::parse_identifier_rule(part, script)?)),
            Rule::class_heritage => {
                let (mut heritage, h_location, h_span) = rules::get_data_from_rule(&part, script);
                let parent = rules::fetch_next_pair(&mut heritage, &h_location, &h_span)?;
                super_class = Some(Box::new(expr::parse_expression_rule(parent, script)?));
            }
            _ => body = Some(Box::new(parse_class_body_rule(part, script)?)),
        }
    }

    let Some(body) = body else {
        return Err(unexpected(
            "Class without a body.",
            "typeify.ast.func.parse_class_rule",
            location,
            span,
        ));
    };

    let kind = if is_declaration {
        AstNodeKind::ClassDeclaration { id, super_class, body }
    } else {
        AstNodeKind::ClassExpression { id, super_class, body }
    };
    Ok(AstNode::new(kind, location, span))
}

fn parse_class_body_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (inner, location, span) = rules::get_data_from_rule(&pair, script);
    let body = inner
        .map(|member| parse_class_member_rule(member, script))
        .collect::<ParseResult<Vec<AstNode>>>()?;
    Ok(AstNode::new(AstNodeKind::ClassBody { body }, location, span))
}

fn parse_class_member_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let mut member = rules::fetch_next_pair(&mut inner, &location, &span)?;
    let is_static = member.as_rule() == Rule::static_modifier;
    if is_static {
        member = rules::fetch_next_pair(&mut inner, &location, &span)?;
    }

    let kind = match member.as_rule() {
        Rule::method_property => {
            let method = parse_method_property_rule(member, script)?;
            let kind = match method.kind {
                PropertyKind::Get => MethodKind::Get,
                PropertyKind::Set => MethodKind::Set,
                PropertyKind::Init
                    if !method.computed && !is_static && method.key.identifier_name() == Some("constructor") =>
                {
                    MethodKind::Constructor
                }
                PropertyKind::Init => MethodKind::Method,
            };
            AstNodeKind::MethodDefinition {
                key: Box::new(method.key),
                value: Box::new(method.value),
                kind,
                computed: method.computed,
                is_static,
            }
        }
        _ => {
            let (mut field, f_location, f_span) = rules::get_data_from_rule(&member, script);
            let key_pair = rules::fetch_next_pair(&mut field, &f_location, &f_span)?;
            let (key, computed) = expr::parse_property_key_rule(key_pair, script)?;
            let value = field
                .next()
                .map(|p| expr::parse_expression_rule(p, script).map(Box::new))
                .transpose()?;
            AstNodeKind::PropertyDefinition {
                key: Box::new(key),
                value,
                computed,
                is_static,
            }
        }
    };

    Ok(AstNode::new(kind, location, span))
}
