//! file: core/src/ast/mod.rs
//! description: JavaScript syntax tree and the pest-backed parser producing it.
//!
//! `generate_ast_from_source` is the only entry point the rest of the crate
//! uses; everything else in this module builds `AstNode`s from pest pairs.
//!
pub mod err;
mod expr;
mod func;
pub mod kind;
pub mod node;
pub mod rules;
mod stmt;

use pest::Parser;

pub use crate::error::TypeifyErrorExt;
pub use kind::{
    AstNodeKind, BinaryOperator, DeclarationKind, FunctionBody, LiteralValue, LogicalOperator,
    MethodKind, PropertyKind, UnaryOperator, UpdateOperator,
};
pub use node::AstNode;
pub use rules::{Rule, RulesParser};

pub(crate) type ParseResult<T> = Result<T, Box<dyn TypeifyErrorExt>>;

/// Deepest bracket nesting accepted. Parsing and every tree walk recurse once
/// per level, so this bounds their stack use.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parse the script into a `Program` node.
pub fn generate_ast_from_source(script: &crate::script::Script) -> ParseResult<AstNode> {
    check_nesting_depth(script)?;
    let mut pairs = RulesParser::parse(Rule::program, &script.content).map_err(
        |e| -> Box<dyn TypeifyErrorExt> { Box::new(err::SyntaxError::from_pest(e, script)) },
    )?;
    let program = rules::fetch_next_pair(&mut pairs, &None, &None)?;
    stmt::parse_program_rule(program, script)
}

fn check_nesting_depth(script: &crate::script::Script) -> ParseResult<()> {
    let Some(offset) = rules::find_excess_nesting(&script.content, MAX_NESTING_DEPTH) else {
        return Ok(());
    };
    let location = rules::location_at(offset, script);
    let end = rules::location_at(offset + 1, script);
    Err(Box::new(err::SyntaxError::with(
        crate::error::Level::Error,
        format!(
            "Nesting too deep at {}: more than {} levels of brackets.",
            location, MAX_NESTING_DEPTH
        ),
        "typeify.ast.check_nesting_depth".into(),
        Some(location.clone()),
        Some(crate::location::Span::new(location, end)),
    )))
}
