//! Renders a declaration table as typed source.

mod format;

use std::fmt;

pub use format::{ExternalFormatter, Formatter, FormatterError};

use crate::analyzers::declarations::{DeclarationTable, FunctionInfo, VariableInfo};
use crate::error::TypeifyErrorExt;
use crate::script::Script;

/// Typed source for one script: a header naming the input, one line per
/// variable, then one definition per function.
pub struct TypedSource<'a> {
    script: &'a Script,
    table: &'a DeclarationTable,
}

impl<'a> TypedSource<'a> {
    pub fn new(script: &'a Script, table: &'a DeclarationTable) -> Self {
        TypedSource { script, table }
    }

    fn write_variable(f: &mut fmt::Formatter<'_>, variable: &VariableInfo) -> fmt::Result {
        write!(f, "{} {}: {}", variable.kind, variable.name, variable.ty)?;
        if let Some(value) = &variable.value {
            write!(f, " = {}", value)?;
        }
        writeln!(f, ";")
    }

    fn write_function(&self, f: &mut fmt::Formatter<'_>, function: &FunctionInfo) -> fmt::Result {
        write!(f, "function {}(", function.name)?;
        for (i, param) in function.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, "): {} ", function.return_type)?;
        match function.body_text(&self.script.content) {
            Some(body) => writeln!(f, "{{\n{}\n}}", body),
            None => writeln!(f, "{{}}"),
        }
    }
}

impl fmt::Display for TypedSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// Generated by typeify from {}", self.script.name)?;
        for variable in self.table.variables() {
            Self::write_variable(f, variable)?;
        }
        for function in self.table.functions() {
            writeln!(f)?;
            self.write_function(f, function)?;
        }
        Ok(())
    }
}

/// Render the table and, when a formatter is given, pass the text through it.
pub fn emit_typed_source(
    script: &Script,
    table: &DeclarationTable,
    formatter: Option<&dyn Formatter>,
) -> Result<String, Box<dyn TypeifyErrorExt>> {
    let text = TypedSource::new(script, table).to_string();
    match formatter {
        Some(formatter) => formatter
            .format(&text)
            .map_err(|e| -> Box<dyn TypeifyErrorExt> { Box::new(e) }),
        None => Ok(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::declarations::{Parameter, VariableInfo};
    use crate::analyzers::inference::Kind;
    use crate::ast::DeclarationKind;

    struct Upper;

    impl Formatter for Upper {
        fn format(&self, text: &str) -> Result<String, FormatterError> {
            Ok(text.to_uppercase())
        }
    }

    fn sample() -> (Script, DeclarationTable) {
        let script = Script::from_source("demo.js", "function f(a) { return 1; }");
        let mut table = DeclarationTable::new();
        table.insert_variable(VariableInfo {
            name: "x".into(),
            kind: DeclarationKind::Const,
            ty: Kind::Number,
            value: Some("5".into()),
            location: None,
        });
        table.insert_variable(VariableInfo {
            name: "y".into(),
            kind: DeclarationKind::Let,
            ty: Kind::Any,
            value: None,
            location: None,
        });
        table.push_function(FunctionInfo {
            name: "f".into(),
            parameters: vec![Parameter::new("a".into()), Parameter::rest("rest".into())],
            content_range: Some(16..25),
            return_type: Kind::Number,
            location: None,
        });
        table.push_function(FunctionInfo {
            name: "g".into(),
            parameters: vec![],
            content_range: None,
            return_type: Kind::Void,
            location: None,
        });
        (script, table)
    }

    #[test]
    fn renders_variables_then_functions() {
        let (script, table) = sample();
        let text = emit_typed_source(&script, &table, None).unwrap();
        assert_eq!(
            text,
            "// Generated by typeify from demo.js\n\
             const x: number = 5;\n\
             let y: any;\n\
             \n\
             function f(a: any, ...rest: any[]): number {\n\
             return 1;\n\
             }\n\
             \n\
             function g(): void {}\n"
        );
    }

    #[test]
    fn formatter_sees_the_rendered_text() {
        let (script, table) = sample();
        let text = emit_typed_source(&script, &table, Some(&Upper)).unwrap();
        assert!(text.starts_with("// GENERATED BY TYPEIFY FROM DEMO.JS"));
    }
}
