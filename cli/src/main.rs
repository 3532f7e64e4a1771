use clap::{Arg, ArgAction, ArgMatches, Command, error::ErrorKind};
use typeify_core::{FormatterConfig, Mode, TypeifyOptions, config::DEFAULT_FORMATTER, typeify};

mod output;

use output::FormatStyle;

fn main() {
    let cli = Command::new("typeify")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Annotate JavaScript declarations with inferred TypeScript types");

    let cli = setup_cli(cli);
    let matches = match cli.try_get_matches() {
        Ok(matches) => matches,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            std::process::exit(0);
        }
        Err(e) => {
            let style = FormatStyle::default();
            eprintln!(
                "{}",
                style.error.apply_to(format!(
                    "TYPEIFY | ERROR | usage | {}; usage: typeify <INPUT> <OUTPUT> [--no-format]",
                    e.kind()
                ))
            );
            std::process::exit(1);
        }
    };

    init_logging(matches.get_flag("verbose"));
    std::process::exit(dispatch(&matches));
}

/// Sets up the CLI arguments.
fn setup_cli(cli: Command) -> Command {
    cli.arg(
        Arg::new("input")
            .help("The JavaScript file to annotate")
            .required(true)
            .value_name("INPUT")
            .index(1),
    )
    .arg(
        Arg::new("output")
            .help("Where to write the result")
            .required(true)
            .value_name("OUTPUT")
            .index(2),
    )
    .arg(
        Arg::new("no-format")
            .help("Skip the external formatter pass")
            .long("no-format")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("dump-ast")
            .help("Write the parsed syntax tree as JSON instead of typed source")
            .long("dump-ast")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("formatter")
            .help("Formatter program reading stdin and writing stdout")
            .long("formatter")
            .value_parser(clap::value_parser!(String))
            .value_name("PROGRAM")
            .default_value(DEFAULT_FORMATTER),
    )
    .arg(
        Arg::new("list")
            .help("Print every discovered declaration with its inferred type")
            .short('l')
            .long("list")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("verbose")
            .help("Enable debug logging")
            .short('v')
            .long("verbose")
            .action(ArgAction::SetTrue),
    )
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    if let Err(e) = simple_logger::SimpleLogger::new().with_level(level).init() {
        eprintln!("logging is unavailable: {}", e);
    }
}

fn options_from_matches(matches: &ArgMatches) -> Option<TypeifyOptions> {
    let input = matches.get_one::<String>("input")?;
    let output = matches.get_one::<String>("output")?;

    let mode = if matches.get_flag("dump-ast") {
        Mode::DumpAst
    } else {
        Mode::TypedSource
    };
    let formatter = if matches.get_flag("no-format") {
        None
    } else {
        matches
            .get_one::<String>("formatter")
            .map(|program| FormatterConfig::for_program(program))
    };

    Some(
        TypeifyOptions::new(input, output)
            .with_mode(mode)
            .with_formatter(formatter),
    )
}

/// Runs the pipeline and returns the process exit code.
fn dispatch(matches: &ArgMatches) -> i32 {
    let style = FormatStyle::default();
    let Some(options) = options_from_matches(matches) else {
        eprintln!("{}", style.error.apply_to("TYPEIFY | ERROR | usage | missing <INPUT> or <OUTPUT>"));
        return 1;
    };

    let summary = match typeify(&options) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("{}", style.report(e.as_ref()));
            return 1;
        }
    };

    if matches.get_flag("list") {
        println!("{}", style.title.apply_to("Declarations"));
        println!("{}", output::declarations_table(&summary.table));
        if let Some(diagnostics) = output::diagnostics_table(&summary.table) {
            println!("{}", style.title.apply_to("Diagnostics"));
            println!("{}", diagnostics);
        }
    }

    println!(
        "{}",
        style
            .success
            .apply_to(format!("Output written to {}", summary.output.display()))
    );
    println!(
        "Discovered {} variables and {} functions.",
        summary.variable_count(),
        summary.function_count()
    );
    0
}
