//! meowc-drv - command-line driver for the meowc compiler.
//!
//! Orchestrates the pipeline (lex -> parse -> analyze -> generate) over a
//! single source file and prints every accumulated diagnostic from a
//! failing phase. On success, the generated TAC is written only if asked
//! for, via `-o`/`--output` or `--tac-only`; with neither flag (and no
//! `--ast`) a clean compile produces no output at all.

mod error;

pub use error::DriverError;

use clap::Parser as ClapParser;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// A cat-themed three-address-code compiler.
#[derive(Debug, ClapParser)]
#[command(name = "meowc", version, about)]
pub struct Cli {
    /// Path to a MeowScript source file.
    pub source: PathBuf,

    /// Print phase-by-phase progress to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Write the generated TAC to this path instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the generated TAC to stdout, with no phase banners even under
    /// `--verbose`. With no `-o`/`--tac-only`/`--ast` flag, a successful run
    /// produces no requested artifact and prints nothing (spec §7: "only
    /// requested artifacts are produced").
    #[arg(long)]
    pub tac_only: bool,

    /// Print the parsed AST and stop before semantic analysis.
    #[arg(long)]
    pub ast: bool,
}

/// Parses arguments from the process environment and runs the compiler.
/// Intended to be called directly from `main`.
pub fn main() -> Result<(), DriverError> {
    let cli = Cli::parse();
    run(&cli)
}

/// Runs the full pipeline over `cli.source`. Returns
/// [`DriverError::CompilationFailed`] if any phase reports a diagnostic;
/// by that point every diagnostic has already been printed to stderr.
pub fn run(cli: &Cli) -> Result<(), DriverError> {
    init_tracing(cli.verbose);

    let source = fs::read_to_string(&cli.source).map_err(|e| DriverError::Read(cli.source.clone(), e))?;

    if cli.verbose && !cli.tac_only {
        info!("lexing {}", cli.source.display());
    }
    let tokens = match meowc_lex::tokenize(&source) {
        Ok(tokens) => tokens,
        Err(e) => return fail(e),
    };

    if cli.verbose && !cli.tac_only {
        info!("parsing {} tokens", tokens.len());
    }
    let program = match meowc_par::parse(tokens) {
        Ok(program) => program,
        Err(e) => return fail(e),
    };

    if cli.ast {
        println!("{program:#?}");
        return Ok(());
    }

    if cli.verbose && !cli.tac_only {
        info!("running semantic analysis");
    }
    if let Err(e) = meowc_sem::analyze(&program) {
        return fail(e);
    }

    if cli.verbose && !cli.tac_only {
        info!("generating three-address code");
    }
    let instructions = meowc_ir::generate(&program);
    let rendered = instructions.iter().map(|i| i.to_string()).collect::<Vec<_>>().join("\n");

    match &cli.output {
        Some(path) => {
            fs::write(path, rendered + "\n").map_err(|e| DriverError::Write(path.clone(), e))?;
        }
        None if cli.tac_only => println!("{rendered}"),
        None => {}
    }

    Ok(())
}

fn fail(err: meowc_util::CompileError) -> Result<(), DriverError> {
    for diag in err.diagnostics() {
        eprintln!("{diag}");
    }
    Err(DriverError::CompilationFailed)
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}
