//! End-to-end runs: read the input, transform it, write the output.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::analyzers::declarations::{DeclarationTable, collect_declarations};
use crate::ast::{AstNode, generate_ast_from_source};
use crate::config::{Mode, TypeifyOptions};
use crate::emitter::{ExternalFormatter, Formatter, emit_typed_source};
use crate::error::{OutputError, PipelineError, TypeifyErrorExt};
use crate::script::Script;

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct Summary {
    pub output: PathBuf,
    pub mode: Mode,
    pub table: DeclarationTable,
}

impl Summary {
    pub fn variable_count(&self) -> usize {
        self.table.variables().len()
    }

    pub fn function_count(&self) -> usize {
        self.table.functions().len()
    }
}

/// Stack of the thread that parses and walks the tree. Together with
/// `MAX_NESTING_DEPTH` it keeps recursion inside the stack.
const PIPELINE_STACK_SIZE: usize = 128 * 1024 * 1024;

/// Run `work` on a thread with a stack sized for the deepest accepted tree.
/// The tree must be built and dropped inside `work`.
fn on_pipeline_thread<T, F>(work: F) -> Result<T, Box<dyn TypeifyErrorExt>>
where
    T: Send,
    F: FnOnce() -> Result<T, Box<dyn TypeifyErrorExt>> + Send,
{
    std::thread::scope(|scope| {
        let handle = std::thread::Builder::new()
            .name("typeify-pipeline".into())
            .stack_size(PIPELINE_STACK_SIZE)
            .spawn_scoped(scope, work)
            .map_err(|e| -> Box<dyn TypeifyErrorExt> {
                Box::new(PipelineError {
                    reason: format!("cannot start the parser thread: {}", e),
                })
            })?;
        handle.join().map_err(|_| -> Box<dyn TypeifyErrorExt> {
            Box::new(PipelineError {
                reason: "the parser thread panicked".to_string(),
            })
        })?
    })
}

/// Parse and collect on the pipeline thread; with `dump` set, the tree is
/// also serialized there.
fn analyze(script: &Script, dump: bool) -> Result<(DeclarationTable, Option<String>), Box<dyn TypeifyErrorExt>> {
    on_pipeline_thread(|| {
        let ast = generate_ast_from_source(script)?;
        let table = collect_declarations(&ast, script);
        let json = if dump { Some(serialize_tree(&ast, &script.path)?) } else { None };
        Ok((table, json))
    })
}

/// Typed source for an in-memory script, with the declarations it was
/// rendered from.
pub fn typeify_script(
    script: &Script,
    formatter: Option<&dyn Formatter>,
) -> Result<(String, DeclarationTable), Box<dyn TypeifyErrorExt>> {
    let (table, _) = analyze(script, false)?;
    let text = emit_typed_source(script, &table, formatter)?;
    Ok((text, table))
}

/// The parsed tree of `script` as pretty-printed JSON.
pub fn dump_ast(script: &Script) -> Result<String, Box<dyn TypeifyErrorExt>> {
    on_pipeline_thread(|| {
        let ast = generate_ast_from_source(script)?;
        serialize_tree(&ast, &script.path)
    })
}

fn serialize_tree(ast: &AstNode, path: &Path) -> Result<String, Box<dyn TypeifyErrorExt>> {
    serde_json::to_string_pretty(ast).map_err(|e| -> Box<dyn TypeifyErrorExt> {
        Box::new(OutputError {
            path: path.to_path_buf(),
            reason: format!("cannot serialize syntax tree: {}", e),
        })
    })
}

fn write_output(path: &Path, text: &str) -> Result<(), Box<dyn TypeifyErrorExt>> {
    std::fs::write(path, text).map_err(|e| -> Box<dyn TypeifyErrorExt> {
        Box::new(OutputError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    })?;
    debug!("wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}

/// Run the whole pipeline described by `options`.
pub fn typeify(options: &TypeifyOptions) -> Result<Summary, Box<dyn TypeifyErrorExt>> {
    let script = Script::new(options.input.clone())?;

    // A missing formatter is reported before any work is done.
    let formatter = match (&options.mode, &options.formatter) {
        (Mode::TypedSource, Some(config)) => Some(
            ExternalFormatter::locate(config).map_err(|e| -> Box<dyn TypeifyErrorExt> { Box::new(e) })?,
        ),
        _ => None,
    };

    info!("typeify {} -> {}", script.path.display(), options.output.display());
    if script.is_empty() {
        warn!("{} contains no code", script.name);
    }
    let (table, json) = analyze(&script, options.mode == Mode::DumpAst)?;

    let text = match json {
        Some(json) => json,
        None => emit_typed_source(
            &script,
            &table,
            formatter.as_ref().map(|f| f as &dyn Formatter),
        )?,
    };
    write_output(&options.output, &text)?;

    Ok(Summary {
        output: options.output.clone(),
        mode: options.mode,
        table,
    })
}
