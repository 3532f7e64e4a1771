use serde::Serialize;

use crate::location;

use super::kind::AstNodeKind;

#[derive(Clone, PartialEq, Serialize)]
pub struct AstNode {
    #[serde(flatten)]
    pub kind: AstNodeKind,
    #[serde(skip)]
    pub location: Option<location::Location>,
    #[serde(flatten)]
    pub span: Option<location::Span>,
}

impl AstNode {
    pub fn new(
        node_type: AstNodeKind,
        location: Option<location::Location>,
        span: Option<location::Span>,
    ) -> Self {
        AstNode {
            kind: node_type,
            location,
            span,
        }
    }

    pub fn get_kind(&self) -> &AstNodeKind {
        &self.kind
    }
    pub fn get_location(&self) -> Option<&location::Location> {
        self.location.as_ref()
    }
    pub fn get_span(&self) -> Option<&location::Span> {
        self.span.as_ref()
    }

    /// Source text covered by this node.
    pub fn source_text<'a>(&self, source: &'a str) -> Option<&'a str> {
        self.span.as_ref().and_then(|span| span.slice(source))
    }

    /// Name of an `Identifier` node.
    pub fn identifier_name(&self) -> Option<&str> {
        match &self.kind {
            AstNodeKind::Identifier { name } => Some(name),
            _ => None,
        }
    }

    pub fn children(&self) -> Vec<&AstNode> {
        self.kind.children()
    }
}

use std::fmt;

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn fmt_tree(f: &mut fmt::Formatter<'_>, node: &AstNode, indent: usize) -> fmt::Result {
            for _ in 0..indent {
                write!(f, "  ")?;
            }
            write!(f, "{}", node.kind.type_name())?;
            match &node.kind {
                AstNodeKind::Identifier { name } => write!(f, " {}", name)?,
                AstNodeKind::Literal { raw, .. } => write!(f, " {}", raw)?,
                _ => {}
            }
            if let Some(span) = &node.span {
                write!(f, " [{}..{})", span.start.offset, span.end.offset)?;
            }
            writeln!(f)?;
            for child in node.children() {
                fmt_tree(f, child, indent + 1)?;
            }
            Ok(())
        }

        fmt_tree(f, self, 0)
    }
}

impl fmt::Debug for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Delegate to Display so both "{}" and "{:?}" are pretty
        write!(f, "{}", self)
    }
}
