/// cli/src/output.rs
/// description: console styling for diagnostics and the declaration
/// listing printed by `--list`.

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use console::Style;
use typeify_core::{DeclarationTable, Level, TypeifyErrorExt, generate_error_report};

/// Styles for different output elements
pub struct FormatStyle {
    pub title: Style,
    pub info: Style,
    pub warning: Style,
    pub error: Style,
    pub success: Style,
}

impl Default for FormatStyle {
    fn default() -> Self {
        FormatStyle {
            title: Style::new().bold().underlined(),
            info: Style::new().cyan(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            success: Style::new().green().bold(),
        }
    }
}

impl FormatStyle {
    pub fn for_level(&self, level: Level) -> &Style {
        match level {
            Level::Info => &self.info,
            Level::Warning => &self.warning,
            Level::Error | Level::Critical => &self.error,
        }
    }

    /// One styled report line for an error or diagnostic.
    pub fn report(&self, error: &dyn TypeifyErrorExt) -> String {
        self.for_level(error.level())
            .apply_to(generate_error_report(error))
            .to_string()
    }
}

/// Table of every recorded declaration and its inferred type.
pub fn declarations_table(table: &DeclarationTable) -> Table {
    let mut out = Table::new();
    out.load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Declaration", "Name", "Type", "Location"]);

    for variable in table.variables() {
        out.add_row(vec![
            variable.kind.to_string(),
            variable.name.clone(),
            variable.ty.to_string(),
            location_cell(variable.location.as_ref()),
        ]);
    }
    for function in table.functions() {
        let params = function
            .parameters
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        out.add_row(vec![
            "function".to_string(),
            function.name.clone(),
            format!("({}) => {}", params, function.return_type),
            location_cell(function.location.as_ref()),
        ]);
    }
    out
}

/// Table of the collector's diagnostics; `None` when there are none.
pub fn diagnostics_table(table: &DeclarationTable) -> Option<Table> {
    if table.diagnostics().is_empty() {
        return None;
    }
    let mut out = Table::new();
    out.load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Level", "Location", "Message"]);
    for diagnostic in table.diagnostics() {
        out.add_row(vec![
            diagnostic.level().to_string(),
            location_cell(diagnostic.location().as_ref()),
            diagnostic.message(),
        ]);
    }
    Some(out)
}

fn location_cell(location: Option<&typeify_core::Location>) -> String {
    location
        .map(|l| format!("{}:{}", l.line, l.column))
        .unwrap_or_default()
}
