//! file: core/src/ast/stmt.rs
//! description: statement and module-item builders.
//!
use crate::{
    ast::{
        AstNode, AstNodeKind, DeclarationKind, ParseResult, Rule, err::unexpected, expr, func,
        rules, rules::Pair,
    },
    script,
};

pub(crate) fn parse_program_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);

    let mut body = Vec::new();
    for inner_pair in inner_pairs {
        match inner_pair.as_rule() {
            Rule::EOI => {}
            _ => body.push(parse_statement_rule(inner_pair, script)?),
        }
    }

    Ok(AstNode::new(
        AstNodeKind::Program {
            body,
            source_type: "module",
        },
        location,
        span,
    ))
}

pub(crate) fn parse_statement_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    match pair.as_rule() {
        Rule::import_declaration => parse_import_declaration_rule(pair, script),
        Rule::export_declaration => parse_export_declaration_rule(pair, script),
        Rule::variable_declaration | Rule::for_declaration => {
            parse_variable_declaration_rule(pair, script)
        }
        Rule::function_declaration => func::parse_function_rule(pair, script, true),
        Rule::class_declaration => func::parse_class_rule(pair, script, true),
        Rule::return_statement => parse_return_statement_rule(pair, script),
        Rule::if_statement => parse_if_statement_rule(pair, script),
        Rule::for_statement => parse_for_statement_rule(pair, script),
        Rule::while_statement => parse_while_statement_rule(pair, script),
        Rule::do_while_statement => parse_do_while_statement_rule(pair, script),
        Rule::try_statement => parse_try_statement_rule(pair, script),
        Rule::switch_statement => parse_switch_statement_rule(pair, script),
        Rule::break_statement | Rule::continue_statement => parse_jump_statement_rule(pair, script),
        Rule::labeled_statement => parse_labeled_statement_rule(pair, script),
        Rule::empty_statement => Ok(bare(AstNodeKind::EmptyStatement, &pair, script)),
        Rule::throw_statement => {
            let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
            let arg_pair = rules::fetch_next_pair(&mut inner, &location, &span)?;
            let argument = expr::parse_expression_rule(arg_pair, script)?;
            Ok(AstNode::new(
                AstNodeKind::ThrowStatement { argument: Box::new(argument) },
                location,
                span,
            ))
        }
        Rule::block => parse_block_rule(pair, script),
        Rule::expression_statement => {
            let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
            let expr_pair = rules::fetch_next_pair(&mut inner, &location, &span)?;
            let expression = expr::parse_expression_rule(expr_pair, script)?;
            Ok(AstNode::new(
                AstNodeKind::ExpressionStatement { expression: Box::new(expression) },
                location,
                span,
            ))
        }
        other => Err(unexpected(
            format!("Unexpected statement type: {:?}", other),
            "typeify.ast.stmt.parse_statement_rule",
            rules::get_location_from_pair(&pair, script),
            rules::get_span_from_pair(&pair, script),
        )),
    }
}

fn bare(kind: AstNodeKind, pair: &Pair, script: &script::Script) -> AstNode {
    AstNode::new(
        kind,
        rules::get_location_from_pair(pair, script),
        rules::get_span_from_pair(pair, script),
    )
}

fn boxed_statement(pair: Pair, script: &script::Script) -> ParseResult<Box<AstNode>> {
    parse_statement_rule(pair, script).map(Box::new)
}

fn boxed_expression(pair: Pair, script: &script::Script) -> ParseResult<Box<AstNode>> {
    expr::parse_expression_rule(pair, script).map(Box::new)
}

pub(crate) fn parse_block_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (inner, location, span) = rules::get_data_from_rule(&pair, script);
    let body = inner
        .map(|p| parse_statement_rule(p, script))
        .collect::<ParseResult<Vec<AstNode>>>()?;
    Ok(AstNode::new(AstNodeKind::BlockStatement { body }, location, span))
}

fn parse_variable_declaration_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let kind_pair = rules::fetch_next_pair(&mut inner, &location, &span)?;
    let Some(kind) = DeclarationKind::from_keyword(kind_pair.as_str()) else {
        return Err(unexpected(
            format!("Unknown declaration keyword '{}'.", kind_pair.as_str()),
            "typeify.ast.stmt.parse_variable_declaration_rule",
            location,
            span,
        ));
    };

    let declarations = inner
        .map(|declarator| parse_variable_declarator_rule(declarator, script))
        .collect::<ParseResult<Vec<AstNode>>>()?;

    Ok(AstNode::new(
        AstNodeKind::VariableDeclaration { kind, declarations },
        location,
        span,
    ))
}

fn parse_variable_declarator_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let target_pair = rules::fetch_next_pair(&mut inner, &location, &span)?;
    let id = func::parse_binding_target_rule(target_pair, script)?;
    let init = inner.next().map(|p| boxed_expression(p, script)).transpose()?;

    Ok(AstNode::new(
        AstNodeKind::VariableDeclarator { id: Box::new(id), init },
        location,
        span,
    ))
}

fn parse_return_statement_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let argument = inner.next().map(|p| boxed_expression(p, script)).transpose()?;
    Ok(AstNode::new(AstNodeKind::ReturnStatement { argument }, location, span))
}

fn parse_if_statement_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let test = boxed_expression(rules::fetch_next_pair(&mut inner, &location, &span)?, script)?;
    let consequent = boxed_statement(rules::fetch_next_pair(&mut inner, &location, &span)?, script)?;
    let alternate = inner.next().map(|p| boxed_statement(p, script)).transpose()?;

    Ok(AstNode::new(
        AstNodeKind::IfStatement { test, consequent, alternate },
        location,
        span,
    ))
}

fn parse_while_statement_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let test = boxed_expression(rules::fetch_next_pair(&mut inner, &location, &span)?, script)?;
    let body = boxed_statement(rules::fetch_next_pair(&mut inner, &location, &span)?, script)?;
    Ok(AstNode::new(AstNodeKind::WhileStatement { test, body }, location, span))
}

fn parse_do_while_statement_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let body = boxed_statement(rules::fetch_next_pair(&mut inner, &location, &span)?, script)?;
    let test = boxed_expression(rules::fetch_next_pair(&mut inner, &location, &span)?, script)?;
    Ok(AstNode::new(AstNodeKind::DoWhileStatement { body, test }, location, span))
}

fn parse_for_statement_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let mut head = rules::fetch_next_pair(&mut inner, &location, &span)?;
    let is_await = head.as_rule() == Rule::await_marker;
    if is_await {
        head = rules::fetch_next_pair(&mut inner, &location, &span)?;
    }
    let body = boxed_statement(rules::fetch_next_pair(&mut inner, &location, &span)?, script)?;

    let kind = match head.as_rule() {
        Rule::for_in_of_head => {
            let (mut head_inner, head_location, head_span) = rules::get_data_from_rule(&head, script);
            let left_pair = rules::fetch_next_pair(&mut head_inner, &head_location, &head_span)?;
            let left = match left_pair.as_rule() {
                Rule::for_declaration => parse_variable_declaration_rule(left_pair, script)?,
                _ => expr::parse_postfix_expression_rule(left_pair, script)?,
            };
            let of_in = rules::fetch_next_pair(&mut head_inner, &head_location, &head_span)?;
            let right = boxed_expression(
                rules::fetch_next_pair(&mut head_inner, &head_location, &head_span)?,
                script,
            )?;
            if of_in.as_str() == "of" {
                AstNodeKind::ForOfStatement { left: Box::new(left), right, body, is_await }
            } else {
                AstNodeKind::ForInStatement { left: Box::new(left), right, body }
            }
        }
        _ => {
            let (mut init, mut test, mut update) = (None, None, None);
            for part in head.into_inner() {
                let rule = part.as_rule();
                let mut part_inner = part.into_inner();
                let Some(value_pair) = part_inner.next() else {
                    continue;
                };
                let value = match value_pair.as_rule() {
                    Rule::for_declaration => Box::new(parse_variable_declaration_rule(value_pair, script)?),
                    _ => boxed_expression(value_pair, script)?,
                };
                match rule {
                    Rule::for_init => init = Some(value),
                    Rule::for_test => test = Some(value),
                    _ => update = Some(value),
                }
            }
            AstNodeKind::ForStatement { init, test, update, body }
        }
    };

    Ok(AstNode::new(kind, location, span))
}

/// `break` or `continue`, with an optional label.
fn parse_jump_statement_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let rule = pair.as_rule();
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let label = match inner.next() {
        Some(label_pair) => Some(Box::new(expr::parse_identifier_rule(label_pair, script)?)),
        None => None,
    };
    let kind = match rule {
        Rule::break_statement => AstNodeKind::BreakStatement { label },
        _ => AstNodeKind::ContinueStatement { label },
    };
    Ok(AstNode::new(kind, location, span))
}

fn parse_labeled_statement_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let label = expr::parse_identifier_rule(rules::fetch_next_pair(&mut inner, &location, &span)?, script)?;
    let body = boxed_statement(rules::fetch_next_pair(&mut inner, &location, &span)?, script)?;
    Ok(AstNode::new(
        AstNodeKind::LabeledStatement {
            label: Box::new(label),
            body,
        },
        location,
        span,
    ))
}

fn parse_try_statement_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let block = Box::new(parse_block_rule(
        rules::fetch_next_pair(&mut inner, &location, &span)?,
        script,
    )?);

    let mut handler = None;
    let mut finalizer = None;
    for clause in inner {
        match clause.as_rule() {
            Rule::catch_clause => {
                let (clause_inner, clause_location, clause_span) = rules::get_data_from_rule(&clause, script);
                let mut param = None;
                let mut body = None;
                for part in clause_inner {
                    match part.as_rule() {
                        Rule::block => body = Some(Box::new(parse_block_rule(part, script)?)),
                        _ => param = Some(Box::new(func::parse_binding_target_rule(part, script)?)),
                    }
                }
                let Some(body) = body else {
                    return Err(unexpected(
                        "Catch clause without a body.",
                        "typeify.ast.stmt.parse_try_statement_rule",
                        clause_location,
                        clause_span,
                    ));
                };
                handler = Some(Box::new(AstNode::new(
                    AstNodeKind::CatchClause { param, body },
                    clause_location,
                    clause_span,
                )));
            }
            _ => {
                let (mut finally_inner, finally_location, finally_span) = rules::get_data_from_rule(&clause, script);
                let block_pair = rules::fetch_next_pair(&mut finally_inner, &finally_location, &finally_span)?;
                finalizer = Some(Box::new(parse_block_rule(block_pair, script)?));
            }
        }
    }

    Ok(AstNode::new(
        AstNodeKind::TryStatement { block, handler, finalizer },
        location,
        span,
    ))
}

fn parse_switch_statement_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let discriminant = boxed_expression(rules::fetch_next_pair(&mut inner, &location, &span)?, script)?;

    let mut cases = Vec::new();
    for case in inner {
        let (case_inner, case_location, case_span) = rules::get_data_from_rule(&case, script);
        let mut test = None;
        let mut consequent = Vec::new();
        for part in case_inner {
            match part.as_rule() {
                Rule::expression => test = Some(boxed_expression(part, script)?),
                _ => consequent.push(parse_statement_rule(part, script)?),
            }
        }
        cases.push(AstNode::new(
            AstNodeKind::SwitchCase { test, consequent },
            case_location,
            case_span,
        ));
    }

    Ok(AstNode::new(
        AstNodeKind::SwitchStatement { discriminant, cases },
        location,
        span,
    ))
}

fn parse_import_declaration_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (inner, location, span) = rules::get_data_from_rule(&pair, script);

    let mut specifiers = Vec::new();
    let mut source = None;
    for part in inner {
        match part.as_rule() {
            Rule::import_clause => {
                for clause in part.into_inner() {
                    match clause.as_rule() {
                        Rule::identifier => {
                            let local = expr::parse_identifier_rule(clause.clone(), script)?;
                            specifiers.push(AstNode::new(
                                AstNodeKind::ImportDefaultSpecifier { local: Box::new(local) },
                                rules::get_location_from_pair(&clause, script),
                                rules::get_span_from_pair(&clause, script),
                            ));
                        }
                        Rule::namespace_import => {
                            let (mut ns_inner, ns_location, ns_span) = rules::get_data_from_rule(&clause, script);
                            let ident = rules::fetch_next_pair(&mut ns_inner, &ns_location, &ns_span)?;
                            let local = expr::parse_identifier_rule(ident, script)?;
                            specifiers.push(AstNode::new(
                                AstNodeKind::ImportNamespaceSpecifier { local: Box::new(local) },
                                ns_location,
                                ns_span,
                            ));
                        }
                        _ => {
                            for specifier in clause.into_inner() {
                                specifiers.push(parse_import_specifier_rule(specifier, script)?);
                            }
                        }
                    }
                }
            }
            _ => source = Some(Box::new(expr::parse_literal_rule(part, script)?)),
        }
    }

    let Some(source) = source else {
        return Err(unexpected(
            "Import declaration without a module source.",
            "typeify.ast.stmt.parse_import_declaration_rule",
            location,
            span,
        ));
    };

    Ok(AstNode::new(
        AstNodeKind::ImportDeclaration { specifiers, source },
        location,
        span,
    ))
}

fn parse_import_specifier_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let imported = expr::parse_identifier_rule(rules::fetch_next_pair(&mut inner, &location, &span)?, script)?;
    let local = match inner.next() {
        Some(alias) => expr::parse_identifier_rule(alias, script)?,
        None => imported.clone(),
    };
    Ok(AstNode::new(
        AstNodeKind::ImportSpecifier {
            imported: Box::new(imported),
            local: Box::new(local),
        },
        location,
        span,
    ))
}

fn parse_export_declaration_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let item = rules::fetch_next_pair(&mut inner, &location, &span)?;

    let kind = match item.as_rule() {
        Rule::export_default => {
            let (mut default_inner, default_location, default_span) = rules::get_data_from_rule(&item, script);
            let declaration_pair = rules::fetch_next_pair(&mut default_inner, &default_location, &default_span)?;
            let declaration = match declaration_pair.as_rule() {
                Rule::function_declaration | Rule::class_declaration => {
                    parse_statement_rule(declaration_pair, script)?
                }
                _ => expr::parse_expression_rule(declaration_pair, script)?,
            };
            AstNodeKind::ExportDefaultDeclaration { declaration: Box::new(declaration) }
        }
        Rule::export_list => {
            let mut specifiers = Vec::new();
            let mut source = None;
            for part in item.into_inner() {
                match part.as_rule() {
                    Rule::export_specifier => specifiers.push(parse_export_specifier_rule(part, script)?),
                    _ => source = Some(Box::new(expr::parse_literal_rule(part, script)?)),
                }
            }
            AstNodeKind::ExportNamedDeclaration { declaration: None, specifiers, source }
        }
        Rule::export_all => {
            let mut exported = None;
            let mut source = None;
            for part in item.into_inner() {
                match part.as_rule() {
                    Rule::property_identifier => {
                        exported = Some(Box::new(expr::parse_identifier_rule(part, script)?))
                    }
                    _ => source = Some(Box::new(expr::parse_literal_rule(part, script)?)),
                }
            }
            let source = source.ok_or_else(|| {
                unexpected(
                    "Expected a module source after `export *`.",
                    "typeify.ast.stmt.parse_export_declaration_rule",
                    location.clone(),
                    span.clone(),
                )
            })?;
            AstNodeKind::ExportAllDeclaration { exported, source }
        }
        _ => AstNodeKind::ExportNamedDeclaration {
            declaration: Some(boxed_statement(item, script)?),
            specifiers: Vec::new(),
            source: None,
        },
    };

    Ok(AstNode::new(kind, location, span))
}

fn parse_export_specifier_rule(pair: Pair, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner, location, span) = rules::get_data_from_rule(&pair, script);
    let local = expr::parse_identifier_rule(rules::fetch_next_pair(&mut inner, &location, &span)?, script)?;
    let exported = match inner.next() {
        Some(alias) => expr::parse_identifier_rule(alias, script)?,
        None => local.clone(),
    };
    Ok(AstNode::new(
        AstNodeKind::ExportSpecifier {
            local: Box::new(local),
            exported: Box::new(exported),
        },
        location,
        span,
    ))
}
