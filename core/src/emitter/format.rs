//! External pretty-printer for generated source.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::config::FormatterConfig;
use crate::error::{Level, TypeifyErrorExt};

/// A pass over the final text.
pub trait Formatter {
    fn format(&self, text: &str) -> Result<String, FormatterError>;
}

/// Formatter program found on `PATH` that reads source on stdin and writes
/// the formatted text to stdout.
#[derive(Debug, Clone)]
pub struct ExternalFormatter {
    program: String,
    path: PathBuf,
    args: Vec<String>,
}

impl ExternalFormatter {
    /// Resolve the configured program on `PATH`.
    pub fn locate(config: &FormatterConfig) -> Result<Self, FormatterError> {
        let path = which::which(&config.program).map_err(|e| FormatterError::Unavailable {
            program: config.program.clone(),
            reason: e.to_string(),
        })?;
        log::debug!("using formatter {} at {}", config.program, path.display());
        Ok(ExternalFormatter {
            program: config.program.clone(),
            path,
            args: config.args.clone(),
        })
    }

    fn failed(&self, reason: impl Into<String>) -> FormatterError {
        FormatterError::Failed {
            program: self.program.clone(),
            reason: reason.into(),
        }
    }
}

impl Formatter for ExternalFormatter {
    fn format(&self, text: &str) -> Result<String, FormatterError> {
        let mut child = Command::new(&self.path)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.failed(e.to_string()))?;

        let Some(mut stdin) = child.stdin.take() else {
            return Err(self.failed("stdin is not available"));
        };
        // Written from another thread so a full stdout pipe cannot block us.
        let input = text.to_string();
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output().map_err(|e| self.failed(e.to_string()))?;
        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(self.failed(e.to_string())),
            Err(_) => return Err(self.failed("stdin writer panicked")),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let first = stderr.lines().next().unwrap_or("").trim();
            return Err(self.failed(format!("exited with {}: {}", output.status, first)));
        }

        String::from_utf8(output.stdout).map_err(|e| self.failed(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatterError {
    /// The program is not on `PATH`.
    Unavailable { program: String, reason: String },
    /// The program ran but did not produce formatted output.
    Failed { program: String, reason: String },
}

impl std::fmt::Display for FormatterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatterError::Unavailable { program, reason } => {
                write!(f, "Formatter '{}' could not be loaded: {}", program, reason)
            }
            FormatterError::Failed { program, reason } => {
                write!(f, "Formatter '{}' failed: {}", program, reason)
            }
        }
    }
}

impl std::error::Error for FormatterError {}

impl TypeifyErrorExt for FormatterError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        self.to_string()
    }

    fn issuer(&self) -> String {
        match self {
            FormatterError::Unavailable { .. } => "typeify.emitter.format.locate".to_string(),
            FormatterError::Failed { .. } => "typeify.emitter.format".to_string(),
        }
    }

    fn span(&self) -> Option<crate::location::Span> {
        None
    }

    fn location(&self) -> Option<crate::location::Location> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_unavailable() {
        let config = FormatterConfig::for_program("typeify-no-such-formatter-xyz");
        let err = ExternalFormatter::locate(&config).unwrap_err();
        assert!(matches!(err, FormatterError::Unavailable { .. }));
        assert!(err.to_string().contains("typeify-no-such-formatter-xyz"));
    }

    #[cfg(unix)]
    #[test]
    fn pipes_text_through_the_program() {
        let config = FormatterConfig::for_program("cat");
        let Ok(formatter) = ExternalFormatter::locate(&config) else {
            return;
        };
        let text = "let a: number = 1;\n";
        assert_eq!(formatter.format(text).unwrap(), text);
    }

    #[cfg(unix)]
    #[test]
    fn failing_program_is_reported() {
        let config = FormatterConfig::for_program("false");
        let Ok(formatter) = ExternalFormatter::locate(&config) else {
            return;
        };
        let err = formatter.format("x").unwrap_err();
        assert!(matches!(err, FormatterError::Failed { .. }));
    }
}
