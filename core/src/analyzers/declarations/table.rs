use std::collections::HashMap;

use super::err::Diagnostic;
use super::symbol::{FunctionInfo, VariableInfo};

/// Variables and functions discovered in one script.
#[derive(Debug, Clone, Default)]
pub struct DeclarationTable {
    variables: Vec<VariableInfo>,
    index: HashMap<String, usize>,
    functions: Vec<FunctionInfo>,
    diagnostics: Vec<Diagnostic>,
}

impl DeclarationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// ------- Variable Helpers -------

    /// Insert unless a variable with the same name is already recorded.
    /// Returns whether the variable was inserted.
    pub fn insert_variable(&mut self, variable: VariableInfo) -> bool {
        if self.index.contains_key(&variable.name) {
            return false;
        }
        self.index.insert(variable.name.clone(), self.variables.len());
        self.variables.push(variable);
        true
    }

    pub fn lookup_variable(&self, name: &str) -> Option<&VariableInfo> {
        self.index.get(name).map(|&i| &self.variables[i])
    }

    pub fn variable_exists(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn variables(&self) -> &[VariableInfo] {
        &self.variables
    }

    /// ------- Function Helpers -------

    pub fn push_function(&mut self, function: FunctionInfo) {
        self.functions.push(function);
    }

    pub fn functions(&self) -> &[FunctionInfo] {
        &self.functions
    }

    /// ------- Diagnostic Helpers -------

    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::inference::Kind;
    use crate::ast::DeclarationKind;

    fn var(name: &str, kind: DeclarationKind, ty: Kind) -> VariableInfo {
        VariableInfo {
            name: name.into(),
            kind,
            ty,
            value: None,
            location: None,
        }
    }

    #[test]
    fn first_declaration_wins() {
        let mut table = DeclarationTable::new();
        assert!(table.insert_variable(var("a", DeclarationKind::Let, Kind::Number)));
        assert!(table.insert_variable(var("b", DeclarationKind::Var, Kind::Any)));
        assert!(!table.insert_variable(var("a", DeclarationKind::Const, Kind::String)));

        assert_eq!(table.variables().len(), 2);
        let a = table.lookup_variable("a").unwrap();
        assert_eq!(a.kind, DeclarationKind::Let);
        assert_eq!(a.ty, Kind::Number);
        assert_eq!(table.variables()[1].name, "b");
    }
}
