use std::{
    error::Error,
    fs, io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use let_lang::{interpreter::Interpreter, playground, repl};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// let-lang runs a tiny scripting language with `let` bindings, arithmetic,
/// blocks and `print`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Log filter, e.g. `debug` or `let_lang=trace`.
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Execute a script file, printing to stdout.
    Run { path: PathBuf },

    /// Serve the HTTP playground.
    Serve {
        #[arg(long, env = "LET_LANG_HOST", default_value = "127.0.0.1")]
        host: String,

        #[arg(short, long, env = "LET_LANG_PORT", default_value_t = 8080)]
        port: u16,
    },
}

fn init_logging(filter: Option<&str>) {
    let filter = filter
        .and_then(|filter| EnvFilter::try_new(filter).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn run_file(path: &Path) -> Result<ExitCode, Box<dyn Error + Send + Sync>> {
    let source = fs::read_to_string(path)
        .map_err(|err| format!("failed to read '{}': {}", path.display(), err))?;

    let mut interpreter = Interpreter::new();
    match interpreter.interpret_to_stdout(&source) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            eprintln!("Error: {}", err);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn main() -> Result<ExitCode, Box<dyn Error + Send + Sync>> {
    let args = Args::parse();
    init_logging(args.log_level.as_deref());

    match args.command {
        None => {
            let mut interpreter = Interpreter::new();
            repl::run(&mut interpreter, io::stdin().lock(), io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Run { path }) => run_file(&path),
        Some(Command::Serve { host, port }) => {
            playground::serve(&playground::ServeConfig { host, port })?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
