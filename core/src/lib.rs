pub mod analyzers;
pub mod ast;
pub mod config;
pub mod driver;
pub mod emitter;
pub mod error;
pub mod location;
pub mod script;

pub use analyzers::{
    Kind, collect_declarations, infer_expression_type,
    declarations::{DeclarationTable, Diagnostic, FunctionInfo, Parameter, VariableInfo},
};
pub use ast::{AstNode, AstNodeKind, RulesParser, generate_ast_from_source};
pub use config::{FormatterConfig, Mode, TypeifyOptions};
pub use driver::{Summary, dump_ast, typeify, typeify_script};
pub use emitter::{ExternalFormatter, Formatter, FormatterError, emit_typed_source};
pub use error::{Level, OutputError, PipelineError, TypeifyErrorExt};
pub use location::{Location, Span};
pub use script::{MissingScriptError, Script};

pub fn generate_error_report<E: TypeifyErrorExt + ?Sized>(error: &E) -> String {
    let level = error.level();
    let location = match error.location() {
        Some(loc) => loc.to_string(),
        None => "unknown location".to_string(),
    };
    let message = error.message();

    format!("TYPEIFY | {} | {} | {}", level, location, message)
}
