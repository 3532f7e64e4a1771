use log::{debug, info, warn};

use super::err::Diagnostic;
use super::symbol::{FunctionInfo, Parameter, VariableInfo};
use super::table::DeclarationTable;
use crate::analyzers::inference::{Kind, infer_expression_type, is_heterogeneous_array};
use crate::ast::{AstNode, AstNodeKind, DeclarationKind, FunctionBody, LiteralValue, UnaryOperator};
use crate::error::Level;
use crate::script::Script;

/// Depth-first, pre-order walk recording declarations into a table.
pub struct Collector<'s> {
    script: &'s Script,
    tbl: DeclarationTable,
}

impl<'s> Collector<'s> {
    pub fn new(script: &'s Script) -> Self {
        Collector {
            script,
            tbl: DeclarationTable::new(),
        }
    }

    pub fn collect(mut self, program: &AstNode) -> DeclarationTable {
        self.visit(program);
        debug!(
            "collected {} variables and {} functions from {}",
            self.tbl.variables().len(),
            self.tbl.functions().len(),
            self.script.name
        );
        self.tbl
    }

    fn visit(&mut self, node: &AstNode) {
        match &node.kind {
            AstNodeKind::VariableDeclaration { kind, declarations } => {
                for declarator in declarations {
                    self.record_variable(*kind, declarator);
                }
            }
            AstNodeKind::FunctionDeclaration {
                id,
                params,
                body,
                generator,
                is_async,
            } => {
                let name = id
                    .as_ref()
                    .and_then(|id| id.identifier_name())
                    .unwrap_or(FunctionInfo::ANONYMOUS);
                self.record_function(node, name, params, body, *generator || *is_async);
            }
            _ => {}
        }

        for child in node.children() {
            self.visit(child);
        }
    }

    fn record_variable(&mut self, kind: DeclarationKind, declarator: &AstNode) {
        let AstNodeKind::VariableDeclarator { id, init } = &declarator.kind else {
            return;
        };
        let init = init.as_deref();
        let script = self.script;
        let source = script.content.as_str();

        let Some(name) = id.identifier_name() else {
            let pattern = id.source_text(source).unwrap_or("pattern");
            self.diagnose(
                Level::Warning,
                format!("Skipping destructured declaration '{}'.", pattern),
                "typeify.analyzers.declarations.record_variable",
                declarator,
            );
            return;
        };

        if self.tbl.variable_exists(name) {
            debug!("'{}' is already declared; keeping the first declaration", name);
            return;
        }

        let ty = infer_expression_type(init);
        if let Some(array) = init.filter(|n| is_heterogeneous_array(n)) {
            self.diagnose(
                Level::Warning,
                format!("Array literal assigned to '{}' mixes element types; typed as {}.", name, ty),
                "typeify.analyzers.declarations.record_variable",
                array,
            );
        }

        let value = init
            .filter(|n| is_literal_initializer(n))
            .and_then(|n| n.source_text(source))
            .map(str::to_string);

        if kind == DeclarationKind::Const && value.is_none() {
            let (message, node) = match init {
                Some(init) => (
                    format!("Constant '{}' has a non-literal initializer; its value is not emitted.", name),
                    init,
                ),
                None => (
                    format!("Constant '{}' has no initializer; it is emitted without a value.", name),
                    declarator,
                ),
            };
            self.diagnose(
                Level::Warning,
                message,
                "typeify.analyzers.declarations.record_variable",
                node,
            );
        }

        self.tbl.insert_variable(VariableInfo {
            name: name.to_string(),
            kind,
            ty,
            value,
            location: declarator.location.clone(),
        });
    }

    fn record_function(
        &mut self,
        node: &AstNode,
        name: &str,
        params: &[AstNode],
        body: &FunctionBody,
        is_async_or_generator: bool,
    ) {
        let parameters = params.iter().map(|p| self.parameter(p)).collect();

        let content_range = body.content_range();
        if content_range.is_none() {
            self.diagnose(
                Level::Info,
                format!("Function '{}' has an empty body.", name),
                "typeify.analyzers.declarations.record_function",
                node,
            );
        }

        let return_type = if is_async_or_generator {
            Kind::Any
        } else {
            first_return_type(body)
        };

        self.tbl.push_function(FunctionInfo {
            name: name.to_string(),
            parameters,
            content_range,
            return_type,
            location: node.location.clone(),
        });
    }

    fn parameter(&self, param: &AstNode) -> Parameter {
        match &param.kind {
            AstNodeKind::Identifier { name } => Parameter::new(name.clone()),
            // Defaults do not feed inference.
            AstNodeKind::AssignmentPattern { left, .. } => self.parameter(left),
            AstNodeKind::RestElement { argument } => Parameter::rest(self.parameter(argument).name),
            _ => Parameter::new(
                param
                    .source_text(&self.script.content)
                    .unwrap_or("arg")
                    .to_string(),
            ),
        }
    }

    fn diagnose(&mut self, level: Level, message: String, issuer: &str, node: &AstNode) {
        match level {
            Level::Info => info!("{}", message),
            _ => warn!("{}", message),
        }
        self.tbl.push_diagnostic(Diagnostic::with(
            level,
            message,
            issuer.to_string(),
            node.location.clone(),
            node.span.clone(),
        ));
    }
}

/// Type of the first `return` among the body's top-level statements;
/// returns nested in blocks or branches are not looked at.
fn first_return_type(body: &FunctionBody) -> Kind {
    body.statements()
        .iter()
        .find_map(|stmt| match &stmt.kind {
            AstNodeKind::ReturnStatement { argument } => Some(infer_expression_type(argument.as_deref())),
            _ => None,
        })
        .unwrap_or(Kind::Void)
}

fn is_literal_initializer(node: &AstNode) -> bool {
    match &node.kind {
        AstNodeKind::Literal { .. }
        | AstNodeKind::ArrayExpression { .. }
        | AstNodeKind::ObjectExpression { .. }
        | AstNodeKind::TemplateLiteral { .. } => true,
        AstNodeKind::UnaryExpression {
            operator: UnaryOperator::Minus | UnaryOperator::Plus,
            argument,
            ..
        } => matches!(
            argument.kind,
            AstNodeKind::Literal {
                value: LiteralValue::Number(_),
                ..
            }
        ),
        _ => false,
    }
}
