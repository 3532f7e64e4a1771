use std::fmt;
use std::ops::Range;

use crate::analyzers::inference::Kind;
use crate::ast::DeclarationKind;
use crate::location::Location;

/// A variable recorded on its first declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableInfo {
    pub name: String,
    pub kind: DeclarationKind,
    pub ty: Kind,
    /// Source text of a literal initializer.
    pub value: Option<String>,
    pub location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: Kind,
    pub rest: bool,
}

impl Parameter {
    pub fn new(name: String) -> Self {
        Parameter {
            name,
            ty: Kind::Any,
            rest: false,
        }
    }

    pub fn rest(name: String) -> Self {
        Parameter {
            name,
            ty: Kind::array_of(Kind::Any),
            rest: true,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rest {
            write!(f, "...")?;
        }
        write!(f, "{}: {}", self.name, self.ty)
    }
}

/// A function declaration in traversal order.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionInfo {
    pub name: String,
    pub parameters: Vec<Parameter>,
    /// Byte range of the body's statements; `None` for an empty body.
    pub content_range: Option<Range<usize>>,
    pub return_type: Kind,
    pub location: Option<Location>,
}

impl FunctionInfo {
    pub const ANONYMOUS: &'static str = "anonymous";

    /// Body text from the first statement to the end of the last one.
    pub fn body_text<'a>(&self, source: &'a str) -> Option<&'a str> {
        self.content_range.clone().and_then(|range| source.get(range))
    }
}
