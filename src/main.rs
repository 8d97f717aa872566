use std::{
    fs,
    io::{self, BufWriter},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use mikroc::{
    error::{Diagnostics, abort_fatal},
    interpreter::{context::Context, evaluator::core::Evaluator, parser::core::parse_program},
};

/// mikroc runs programs written in a small C-like language of 32-bit
/// integers.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Only parse the program and report syntax errors, without running it.
    #[arg(short, long)]
    check: bool,

    /// The program to run.
    file: Option<PathBuf>,
}

/// Installs a stderr log subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=mikroc=debug`.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)
                                                        .with_target(true)
                                                        .with_level(true))
                                      .with(EnvFilter::from_default_env())
                                      .init();
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let Some(path) = args.file else {
        eprintln!("Please provide the name of a program file.");
        return ExitCode::FAILURE;
    };

    let source = match fs::read_to_string(&path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Failed to open the file '{}': {e}", path.display());
            return ExitCode::FAILURE;
        },
    };

    let mut context = Context::new();
    let mut diagnostics = Diagnostics::new();
    let parsed = parse_program(&source, &mut context, &mut diagnostics);

    for message in diagnostics.messages() {
        eprintln!("{message}");
    }

    let root = match parsed {
        Ok(root) => root,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("\nParse error.");
            return ExitCode::SUCCESS;
        },
    };

    if args.check {
        return ExitCode::SUCCESS;
    }

    let stdout = io::stdout();
    let mut evaluator = Evaluator::new(&mut context, io::stdin().lock(), BufWriter::new(stdout.lock()));
    if let Err(e) = evaluator.run(root.as_ref()) {
        abort_fatal(&e);
    }

    ExitCode::SUCCESS
}
