use std::path::PathBuf;

/// Program used when no formatter is named explicitly.
pub const DEFAULT_FORMATTER: &str = "prettier";

/// What a run writes to the output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    TypedSource,
    /// The parsed tree as JSON.
    DumpAst,
}

/// External formatter invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl FormatterConfig {
    /// `prettier` is told to parse TypeScript; any other program gets no
    /// arguments and must read stdin and write stdout.
    pub fn for_program(program: &str) -> Self {
        let args = if program == DEFAULT_FORMATTER {
            vec!["--parser".to_string(), "typescript".to_string()]
        } else {
            Vec::new()
        };
        FormatterConfig {
            program: program.to_string(),
            args,
        }
    }
}

impl Default for FormatterConfig {
    fn default() -> Self {
        FormatterConfig::for_program(DEFAULT_FORMATTER)
    }
}

/// Options for one run of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeifyOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub mode: Mode,
    /// `None` disables the formatting pass.
    pub formatter: Option<FormatterConfig>,
}

impl TypeifyOptions {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        TypeifyOptions {
            input: input.into(),
            output: output.into(),
            mode: Mode::default(),
            formatter: Some(FormatterConfig::default()),
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_formatter(mut self, formatter: Option<FormatterConfig>) -> Self {
        self.formatter = formatter;
        self
    }
}
