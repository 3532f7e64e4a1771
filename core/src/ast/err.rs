use crate::error::{Level, TypeifyErrorExt};
use crate::location::{Location, Span};

#[derive(Debug, Clone)]
pub struct SyntaxError {
    level: Level,
    message: String,
    issuer: String,
    location: Option<Location>,
    span: Option<Span>,
}

impl SyntaxError {
    pub fn with(level: Level, message: String, issuer: String, location: Option<Location>, span: Option<Span>) -> Self {
        SyntaxError {
            level,
            message,
            issuer,
            location,
            span,
        }
    }

    /// Wrap a pest failure with the file, line and column it points at.
    pub fn from_pest(error: pest::error::Error<super::Rule>, script: &crate::script::Script) -> Self {
        let (line, column) = match error.line_col {
            pest::error::LineColLocation::Pos(pos) => pos,
            pest::error::LineColLocation::Span(start, _) => start,
        };
        let offset = match error.location {
            pest::error::InputLocation::Pos(pos) => pos,
            pest::error::InputLocation::Span((start, _)) => start,
        };
        let location = Location::new(script.name.clone(), line, column, offset);
        SyntaxError::with(
            Level::Error,
            format!("Failed to parse {}: {}", script.name, error.variant.message()),
            "typeify.ast.generate_ast_from_source".into(),
            Some(location.clone()),
            Some(Span::new(location.clone(), location)),
        )
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(loc) = &self.location {
            write!(f, "{} (at {}:{}:{})", self.message, loc.file, loc.line, loc.column)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for SyntaxError {}

impl TypeifyErrorExt for SyntaxError {
    fn level(&self) -> Level {
        self.level
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn issuer(&self) -> String {
        self.issuer.clone()
    }

    fn span(&self) -> Option<Span> {
        self.span.clone()
    }

    fn location(&self) -> Option<Location> {
        self.location.clone()
    }
}

/// Shorthand for the error every builder returns when a pair does not have
/// the shape the grammar promises.
pub(crate) fn unexpected(
    message: impl Into<String>,
    issuer: &str,
    location: Option<Location>,
    span: Option<Span>,
) -> Box<dyn TypeifyErrorExt> {
    Box::new(SyntaxError::with(Level::Error, message.into(), issuer.into(), location, span))
}
