//! file: core/src/ast/kind.rs
//! description: AST node kind definitions and operator enums.
//!
//! Variant names mirror the ESTree `type` labels so the tree can be dumped
//! as JSON and read by tools that expect the standard node schema. Each
//! variant carries its children explicitly; there is no untyped field bag.
//!
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use super::node::AstNode;
use crate::location::Span;

/// Operators of `BinaryExpression` nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "===")]
    StrictEq,
    #[serde(rename = "!==")]
    StrictNe,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<<")]
    Shl,
    #[serde(rename = ">>")]
    Shr,
    #[serde(rename = ">>>")]
    UShr,
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Mod,
    #[serde(rename = "**")]
    Exp,
    #[serde(rename = "|")]
    BitOr,
    #[serde(rename = "^")]
    BitXor,
    #[serde(rename = "&")]
    BitAnd,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "instanceof")]
    InstanceOf,
}

impl BinaryOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "==" => BinaryOperator::Eq,
            "!=" => BinaryOperator::Ne,
            "===" => BinaryOperator::StrictEq,
            "!==" => BinaryOperator::StrictNe,
            "<" => BinaryOperator::Lt,
            "<=" => BinaryOperator::Le,
            ">" => BinaryOperator::Gt,
            ">=" => BinaryOperator::Ge,
            "<<" => BinaryOperator::Shl,
            ">>" => BinaryOperator::Shr,
            ">>>" => BinaryOperator::UShr,
            "+" => BinaryOperator::Add,
            "-" => BinaryOperator::Sub,
            "*" => BinaryOperator::Mul,
            "/" => BinaryOperator::Div,
            "%" => BinaryOperator::Mod,
            "**" => BinaryOperator::Exp,
            "|" => BinaryOperator::BitOr,
            "^" => BinaryOperator::BitXor,
            "&" => BinaryOperator::BitAnd,
            "in" => BinaryOperator::In,
            "instanceof" => BinaryOperator::InstanceOf,
            _ => return None,
        };
        Some(op)
    }

    /// `+ - * / %`, the operators whose result is typed as a number.
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Add
                | BinaryOperator::Sub
                | BinaryOperator::Mul
                | BinaryOperator::Div
                | BinaryOperator::Mod
        )
    }
}

/// Operators of `LogicalExpression` nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogicalOperator {
    #[serde(rename = "||")]
    Or,
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "??")]
    Nullish,
}

impl LogicalOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "||" => Some(LogicalOperator::Or),
            "&&" => Some(LogicalOperator::And),
            "??" => Some(LogicalOperator::Nullish),
            _ => None,
        }
    }
}

/// Operators of `UnaryExpression` nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOperator {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "!")]
    Not,
    #[serde(rename = "~")]
    BitNot,
    #[serde(rename = "typeof")]
    TypeOf,
    #[serde(rename = "void")]
    Void,
    #[serde(rename = "delete")]
    Delete,
}

/// Operators of `UpdateExpression` nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpdateOperator {
    #[serde(rename = "++")]
    Inc,
    #[serde(rename = "--")]
    Dec,
}

/// Keyword of a `VariableDeclaration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Var,
    Let,
    Const,
}

impl DeclarationKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "var" => Some(DeclarationKind::Var),
            "let" => Some(DeclarationKind::Let),
            "const" => Some(DeclarationKind::Const),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Var => "var",
            DeclarationKind::Let => "let",
            DeclarationKind::Const => "const",
        }
    }
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `kind` of a class `MethodDefinition`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

/// `kind` of an object-literal `Property`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Init,
    Get,
    Set,
}

impl PropertyKind {
    pub fn from_accessor(keyword: &str) -> Option<Self> {
        match keyword {
            "get" => Some(PropertyKind::Get),
            "set" => Some(PropertyKind::Set),
            _ => None,
        }
    }
}

/// Runtime value carried by a `Literal` node.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Number(f64),
    String(String),
    Boolean(bool),
    Null,
    Regex { pattern: String, flags: String },
    BigInt(String),
}

/// Largest magnitude below which every integral `f64` is exact.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Emits the `value` entry of an ESTree `Literal`, plus `regex` or `bigint`
/// for the kinds JSON has no value for.
impl Serialize for LiteralValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            LiteralValue::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                map.serialize_entry("value", &(*n as i64))?
            }
            LiteralValue::Number(n) => map.serialize_entry("value", n)?,
            LiteralValue::String(s) => map.serialize_entry("value", s)?,
            LiteralValue::Boolean(b) => map.serialize_entry("value", b)?,
            LiteralValue::Null => map.serialize_entry("value", &())?,
            LiteralValue::Regex { pattern, flags } => {
                map.serialize_entry("value", &serde_json::Map::new())?;
                map.serialize_entry("regex", &serde_json::json!({ "pattern": pattern, "flags": flags }))?;
            }
            LiteralValue::BigInt(digits) => {
                map.serialize_entry("value", &())?;
                map.serialize_entry("bigint", digits)?;
            }
        }
        map.end()
    }
}

/// Statement list of a function. Kept as its own struct so a function's
/// body is always a block; it serializes as a `BlockStatement`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "BlockStatement")]
pub struct FunctionBody {
    pub body: Vec<AstNode>,
    #[serde(flatten)]
    pub span: Option<Span>,
}

impl FunctionBody {
    pub fn statements(&self) -> &[AstNode] {
        &self.body
    }

    /// Byte range from the start of the first statement to the end of the
    /// last one; `None` for an empty body.
    pub fn content_range(&self) -> Option<std::ops::Range<usize>> {
        let first = self.body.first()?.get_span()?;
        let last = self.body.last()?.get_span()?;
        Some(first.start.offset..last.end.offset)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum AstNodeKind {
    Program {
        body: Vec<AstNode>,
        #[serde(rename = "sourceType")]
        source_type: &'static str,
    },

    // Declarations
    VariableDeclaration {
        kind: DeclarationKind,
        declarations: Vec<AstNode>,
    },
    VariableDeclarator {
        id: Box<AstNode>,
        init: Option<Box<AstNode>>,
    },
    FunctionDeclaration {
        id: Option<Box<AstNode>>,
        params: Vec<AstNode>,
        body: FunctionBody,
        generator: bool,
        #[serde(rename = "async")]
        is_async: bool,
    },
    ClassDeclaration {
        id: Option<Box<AstNode>>,
        #[serde(rename = "superClass")]
        super_class: Option<Box<AstNode>>,
        body: Box<AstNode>,
    },
    ClassBody {
        body: Vec<AstNode>,
    },
    MethodDefinition {
        key: Box<AstNode>,
        value: Box<AstNode>,
        kind: MethodKind,
        computed: bool,
        #[serde(rename = "static")]
        is_static: bool,
    },
    PropertyDefinition {
        key: Box<AstNode>,
        value: Option<Box<AstNode>>,
        computed: bool,
        #[serde(rename = "static")]
        is_static: bool,
    },
    ImportDeclaration {
        specifiers: Vec<AstNode>,
        source: Box<AstNode>,
    },
    ImportSpecifier {
        imported: Box<AstNode>,
        local: Box<AstNode>,
    },
    ImportDefaultSpecifier {
        local: Box<AstNode>,
    },
    ImportNamespaceSpecifier {
        local: Box<AstNode>,
    },
    ExportNamedDeclaration {
        declaration: Option<Box<AstNode>>,
        specifiers: Vec<AstNode>,
        source: Option<Box<AstNode>>,
    },
    ExportSpecifier {
        local: Box<AstNode>,
        exported: Box<AstNode>,
    },
    ExportDefaultDeclaration {
        declaration: Box<AstNode>,
    },
    ExportAllDeclaration {
        exported: Option<Box<AstNode>>,
        source: Box<AstNode>,
    },

    // Statements
    ExpressionStatement {
        expression: Box<AstNode>,
    },
    BlockStatement {
        body: Vec<AstNode>,
    },
    EmptyStatement,
    ReturnStatement {
        argument: Option<Box<AstNode>>,
    },
    IfStatement {
        test: Box<AstNode>,
        consequent: Box<AstNode>,
        alternate: Option<Box<AstNode>>,
    },
    WhileStatement {
        test: Box<AstNode>,
        body: Box<AstNode>,
    },
    DoWhileStatement {
        body: Box<AstNode>,
        test: Box<AstNode>,
    },
    ForStatement {
        init: Option<Box<AstNode>>,
        test: Option<Box<AstNode>>,
        update: Option<Box<AstNode>>,
        body: Box<AstNode>,
    },
    ForInStatement {
        left: Box<AstNode>,
        right: Box<AstNode>,
        body: Box<AstNode>,
    },
    ForOfStatement {
        left: Box<AstNode>,
        right: Box<AstNode>,
        body: Box<AstNode>,
        #[serde(rename = "await")]
        is_await: bool,
    },
    BreakStatement {
        label: Option<Box<AstNode>>,
    },
    ContinueStatement {
        label: Option<Box<AstNode>>,
    },
    LabeledStatement {
        label: Box<AstNode>,
        body: Box<AstNode>,
    },
    ThrowStatement {
        argument: Box<AstNode>,
    },
    TryStatement {
        block: Box<AstNode>,
        handler: Option<Box<AstNode>>,
        finalizer: Option<Box<AstNode>>,
    },
    CatchClause {
        param: Option<Box<AstNode>>,
        body: Box<AstNode>,
    },
    SwitchStatement {
        discriminant: Box<AstNode>,
        cases: Vec<AstNode>,
    },
    SwitchCase {
        test: Option<Box<AstNode>>,
        consequent: Vec<AstNode>,
    },

    // Expressions
    Identifier {
        name: String,
    },
    /// `#name` of a class member; `name` excludes the `#`.
    PrivateIdentifier {
        name: String,
    },
    Literal {
        #[serde(flatten)]
        value: LiteralValue,
        raw: String,
    },
    TemplateLiteral {
        raw: String,
    },
    ThisExpression,
    Super,
    ArrayExpression {
        elements: Vec<Option<AstNode>>,
    },
    ObjectExpression {
        properties: Vec<AstNode>,
    },
    Property {
        key: Box<AstNode>,
        value: Box<AstNode>,
        kind: PropertyKind,
        method: bool,
        shorthand: bool,
        computed: bool,
    },
    SpreadElement {
        argument: Box<AstNode>,
    },
    FunctionExpression {
        id: Option<Box<AstNode>>,
        params: Vec<AstNode>,
        body: FunctionBody,
        generator: bool,
        #[serde(rename = "async")]
        is_async: bool,
    },
    ArrowFunctionExpression {
        params: Vec<AstNode>,
        body: Box<AstNode>,
        expression: bool,
        #[serde(rename = "async")]
        is_async: bool,
    },
    ClassExpression {
        id: Option<Box<AstNode>>,
        #[serde(rename = "superClass")]
        super_class: Option<Box<AstNode>>,
        body: Box<AstNode>,
    },
    UnaryExpression {
        operator: UnaryOperator,
        prefix: bool,
        argument: Box<AstNode>,
    },
    UpdateExpression {
        operator: UpdateOperator,
        prefix: bool,
        argument: Box<AstNode>,
    },
    AwaitExpression {
        argument: Box<AstNode>,
    },
    YieldExpression {
        argument: Option<Box<AstNode>>,
    },
    BinaryExpression {
        operator: BinaryOperator,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },
    LogicalExpression {
        operator: LogicalOperator,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },
    AssignmentExpression {
        operator: String,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },
    ConditionalExpression {
        test: Box<AstNode>,
        consequent: Box<AstNode>,
        alternate: Box<AstNode>,
    },
    CallExpression {
        callee: Box<AstNode>,
        arguments: Vec<AstNode>,
        optional: bool,
    },
    NewExpression {
        callee: Box<AstNode>,
        arguments: Vec<AstNode>,
    },
    MemberExpression {
        object: Box<AstNode>,
        property: Box<AstNode>,
        computed: bool,
        optional: bool,
    },
    SequenceExpression {
        expressions: Vec<AstNode>,
    },
    ImportExpression {
        source: Box<AstNode>,
        options: Option<Box<AstNode>>,
    },
    /// `new.target` or `import.meta`.
    MetaProperty {
        meta: Box<AstNode>,
        property: Box<AstNode>,
    },

    // Patterns
    ObjectPattern {
        properties: Vec<AstNode>,
    },
    ArrayPattern {
        elements: Vec<Option<AstNode>>,
    },
    RestElement {
        argument: Box<AstNode>,
    },
    AssignmentPattern {
        left: Box<AstNode>,
        right: Box<AstNode>,
    },
}

impl AstNodeKind {
    /// The ESTree `type` label of this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            AstNodeKind::Program { .. } => "Program",
            AstNodeKind::VariableDeclaration { .. } => "VariableDeclaration",
            AstNodeKind::VariableDeclarator { .. } => "VariableDeclarator",
            AstNodeKind::FunctionDeclaration { .. } => "FunctionDeclaration",
            AstNodeKind::ClassDeclaration { .. } => "ClassDeclaration",
            AstNodeKind::ClassBody { .. } => "ClassBody",
            AstNodeKind::MethodDefinition { .. } => "MethodDefinition",
            AstNodeKind::PropertyDefinition { .. } => "PropertyDefinition",
            AstNodeKind::ImportDeclaration { .. } => "ImportDeclaration",
            AstNodeKind::ImportSpecifier { .. } => "ImportSpecifier",
            AstNodeKind::ImportDefaultSpecifier { .. } => "ImportDefaultSpecifier",
            AstNodeKind::ImportNamespaceSpecifier { .. } => "ImportNamespaceSpecifier",
            AstNodeKind::ExportNamedDeclaration { .. } => "ExportNamedDeclaration",
            AstNodeKind::ExportSpecifier { .. } => "ExportSpecifier",
            AstNodeKind::ExportDefaultDeclaration { .. } => "ExportDefaultDeclaration",
            AstNodeKind::ExportAllDeclaration { .. } => "ExportAllDeclaration",
            AstNodeKind::ExpressionStatement { .. } => "ExpressionStatement",
            AstNodeKind::BlockStatement { .. } => "BlockStatement",
            AstNodeKind::EmptyStatement => "EmptyStatement",
            AstNodeKind::ReturnStatement { .. } => "ReturnStatement",
            AstNodeKind::IfStatement { .. } => "IfStatement",
            AstNodeKind::WhileStatement { .. } => "WhileStatement",
            AstNodeKind::DoWhileStatement { .. } => "DoWhileStatement",
            AstNodeKind::ForStatement { .. } => "ForStatement",
            AstNodeKind::ForInStatement { .. } => "ForInStatement",
            AstNodeKind::ForOfStatement { .. } => "ForOfStatement",
            AstNodeKind::BreakStatement { .. } => "BreakStatement",
            AstNodeKind::ContinueStatement { .. } => "ContinueStatement",
            AstNodeKind::LabeledStatement { .. } => "LabeledStatement",
            AstNodeKind::ThrowStatement { .. } => "ThrowStatement",
            AstNodeKind::TryStatement { .. } => "TryStatement",
            AstNodeKind::CatchClause { .. } => "CatchClause",
            AstNodeKind::SwitchStatement { .. } => "SwitchStatement",
            AstNodeKind::SwitchCase { .. } => "SwitchCase",
            AstNodeKind::Identifier { .. } => "Identifier",
            AstNodeKind::PrivateIdentifier { .. } => "PrivateIdentifier",
            AstNodeKind::Literal { .. } => "Literal",
            AstNodeKind::TemplateLiteral { .. } => "TemplateLiteral",
            AstNodeKind::ThisExpression => "ThisExpression",
            AstNodeKind::Super => "Super",
            AstNodeKind::ArrayExpression { .. } => "ArrayExpression",
            AstNodeKind::ObjectExpression { .. } => "ObjectExpression",
            AstNodeKind::Property { .. } => "Property",
            AstNodeKind::SpreadElement { .. } => "SpreadElement",
            AstNodeKind::FunctionExpression { .. } => "FunctionExpression",
            AstNodeKind::ArrowFunctionExpression { .. } => "ArrowFunctionExpression",
            AstNodeKind::ClassExpression { .. } => "ClassExpression",
            AstNodeKind::UnaryExpression { .. } => "UnaryExpression",
            AstNodeKind::UpdateExpression { .. } => "UpdateExpression",
            AstNodeKind::AwaitExpression { .. } => "AwaitExpression",
            AstNodeKind::YieldExpression { .. } => "YieldExpression",
            AstNodeKind::BinaryExpression { .. } => "BinaryExpression",
            AstNodeKind::LogicalExpression { .. } => "LogicalExpression",
            AstNodeKind::AssignmentExpression { .. } => "AssignmentExpression",
            AstNodeKind::ConditionalExpression { .. } => "ConditionalExpression",
            AstNodeKind::CallExpression { .. } => "CallExpression",
            AstNodeKind::NewExpression { .. } => "NewExpression",
            AstNodeKind::MemberExpression { .. } => "MemberExpression",
            AstNodeKind::SequenceExpression { .. } => "SequenceExpression",
            AstNodeKind::ImportExpression { .. } => "ImportExpression",
            AstNodeKind::MetaProperty { .. } => "MetaProperty",
            AstNodeKind::ObjectPattern { .. } => "ObjectPattern",
            AstNodeKind::ArrayPattern { .. } => "ArrayPattern",
            AstNodeKind::RestElement { .. } => "RestElement",
            AstNodeKind::AssignmentPattern { .. } => "AssignmentPattern",
        }
    }

    /// Direct child nodes in source order. Positions are metadata on the
    /// node itself and never show up here.
    pub fn children(&self) -> Vec<&AstNode> {
        fn push<'a>(out: &mut Vec<&'a AstNode>, node: &'a AstNode) {
            out.push(node);
        }
        fn push_opt<'a>(out: &mut Vec<&'a AstNode>, node: &'a Option<Box<AstNode>>) {
            if let Some(node) = node {
                out.push(node);
            }
        }

        let mut out = Vec::new();
        match self {
            AstNodeKind::Program { body, .. }
            | AstNodeKind::BlockStatement { body }
            | AstNodeKind::ClassBody { body } => out.extend(body.iter()),
            AstNodeKind::VariableDeclaration { declarations, .. } => out.extend(declarations.iter()),
            AstNodeKind::VariableDeclarator { id, init } => {
                push(&mut out, id);
                push_opt(&mut out, init);
            }
            AstNodeKind::FunctionDeclaration { id, params, body, .. }
            | AstNodeKind::FunctionExpression { id, params, body, .. } => {
                push_opt(&mut out, id);
                out.extend(params.iter());
                out.extend(body.body.iter());
            }
            AstNodeKind::ArrowFunctionExpression { params, body, .. } => {
                out.extend(params.iter());
                push(&mut out, body);
            }
            AstNodeKind::ClassDeclaration { id, super_class, body }
            | AstNodeKind::ClassExpression { id, super_class, body } => {
                push_opt(&mut out, id);
                push_opt(&mut out, super_class);
                push(&mut out, body);
            }
            AstNodeKind::MethodDefinition { key, value, .. } => {
                push(&mut out, key);
                push(&mut out, value);
            }
            AstNodeKind::PropertyDefinition { key, value, .. } => {
                push(&mut out, key);
                push_opt(&mut out, value);
            }
            AstNodeKind::ImportDeclaration { specifiers, source } => {
                out.extend(specifiers.iter());
                push(&mut out, source);
            }
            AstNodeKind::ImportSpecifier { imported, local } => {
                push(&mut out, imported);
                push(&mut out, local);
            }
            AstNodeKind::ImportDefaultSpecifier { local }
            | AstNodeKind::ImportNamespaceSpecifier { local } => push(&mut out, local),
            AstNodeKind::ExportNamedDeclaration { declaration, specifiers, source } => {
                push_opt(&mut out, declaration);
                out.extend(specifiers.iter());
                push_opt(&mut out, source);
            }
            AstNodeKind::ExportSpecifier { local, exported } => {
                push(&mut out, local);
                push(&mut out, exported);
            }
            AstNodeKind::ExportDefaultDeclaration { declaration } => push(&mut out, declaration),
            AstNodeKind::ExportAllDeclaration { exported, source } => {
                push_opt(&mut out, exported);
                push(&mut out, source);
            }
            AstNodeKind::ExpressionStatement { expression } => push(&mut out, expression),
            AstNodeKind::ReturnStatement { argument } | AstNodeKind::YieldExpression { argument } => {
                push_opt(&mut out, argument)
            }
            AstNodeKind::BreakStatement { label } | AstNodeKind::ContinueStatement { label } => {
                push_opt(&mut out, label)
            }
            AstNodeKind::LabeledStatement { label, body } => {
                push(&mut out, label);
                push(&mut out, body);
            }
            AstNodeKind::IfStatement { test, consequent, alternate } => {
                push(&mut out, test);
                push(&mut out, consequent);
                push_opt(&mut out, alternate);
            }
            AstNodeKind::WhileStatement { test, body } => {
                push(&mut out, test);
                push(&mut out, body);
            }
            AstNodeKind::DoWhileStatement { body, test } => {
                push(&mut out, body);
                push(&mut out, test);
            }
            AstNodeKind::ForStatement { init, test, update, body } => {
                push_opt(&mut out, init);
                push_opt(&mut out, test);
                push_opt(&mut out, update);
                push(&mut out, body);
            }
            AstNodeKind::ForInStatement { left, right, body }
            | AstNodeKind::ForOfStatement { left, right, body, .. } => {
                push(&mut out, left);
                push(&mut out, right);
                push(&mut out, body);
            }
            AstNodeKind::ThrowStatement { argument }
            | AstNodeKind::SpreadElement { argument }
            | AstNodeKind::UnaryExpression { argument, .. }
            | AstNodeKind::UpdateExpression { argument, .. }
            | AstNodeKind::AwaitExpression { argument }
            | AstNodeKind::RestElement { argument } => push(&mut out, argument),
            AstNodeKind::TryStatement { block, handler, finalizer } => {
                push(&mut out, block);
                push_opt(&mut out, handler);
                push_opt(&mut out, finalizer);
            }
            AstNodeKind::CatchClause { param, body } => {
                push_opt(&mut out, param);
                push(&mut out, body);
            }
            AstNodeKind::SwitchStatement { discriminant, cases } => {
                push(&mut out, discriminant);
                out.extend(cases.iter());
            }
            AstNodeKind::SwitchCase { test, consequent } => {
                push_opt(&mut out, test);
                out.extend(consequent.iter());
            }
            AstNodeKind::ArrayExpression { elements } | AstNodeKind::ArrayPattern { elements } => {
                out.extend(elements.iter().flatten());
            }
            AstNodeKind::ObjectExpression { properties } | AstNodeKind::ObjectPattern { properties } => {
                out.extend(properties.iter());
            }
            AstNodeKind::Property { key, value, .. } => {
                push(&mut out, key);
                push(&mut out, value);
            }
            AstNodeKind::BinaryExpression { left, right, .. }
            | AstNodeKind::LogicalExpression { left, right, .. }
            | AstNodeKind::AssignmentExpression { left, right, .. }
            | AstNodeKind::AssignmentPattern { left, right } => {
                push(&mut out, left);
                push(&mut out, right);
            }
            AstNodeKind::ConditionalExpression { test, consequent, alternate } => {
                push(&mut out, test);
                push(&mut out, consequent);
                push(&mut out, alternate);
            }
            AstNodeKind::CallExpression { callee, arguments, .. }
            | AstNodeKind::NewExpression { callee, arguments } => {
                push(&mut out, callee);
                out.extend(arguments.iter());
            }
            AstNodeKind::MemberExpression { object, property, .. } => {
                push(&mut out, object);
                push(&mut out, property);
            }
            AstNodeKind::SequenceExpression { expressions } => out.extend(expressions.iter()),
            AstNodeKind::ImportExpression { source, options } => {
                push(&mut out, source);
                push_opt(&mut out, options);
            }
            AstNodeKind::MetaProperty { meta, property } => {
                push(&mut out, meta);
                push(&mut out, property);
            }
            AstNodeKind::EmptyStatement
            | AstNodeKind::Identifier { .. }
            | AstNodeKind::PrivateIdentifier { .. }
            | AstNodeKind::Literal { .. }
            | AstNodeKind::TemplateLiteral { .. }
            | AstNodeKind::ThisExpression
            | AstNodeKind::Super => {}
        }
        out
    }
}

impl std::fmt::Display for AstNodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())
    }
}
