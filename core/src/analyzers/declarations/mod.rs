use crate::ast::AstNode;
use crate::script::Script;

mod collector;
mod err;
mod symbol;
mod table;

pub use err::Diagnostic;
pub use symbol::{FunctionInfo, Parameter, VariableInfo};
pub use table::DeclarationTable;

/// Walk the whole tree and record every variable and function declaration.
/// Findings that do not stop the run are returned on the table.
pub fn collect_declarations(program: &AstNode, script: &Script) -> DeclarationTable {
    collector::Collector::new(script).collect(program)
}
