//! Tabula Shell Binary
//!
//! Interactive command loop over a Tabula session.

use std::io::{self, BufRead, Write};

use clap::Parser;
use tabula::shell::{format_outcome, parse_command, OutputFormat};
use tabula::{Config, LoadMode, Outcome, Session};
use tracing_subscriber::{fmt, EnvFilter};

/// Tabula Shell
#[derive(Parser, Debug)]
#[command(name = "tabula-shell")]
#[command(about = "Interactive shell for the Tabula record store")]
#[command(version)]
struct Args {
    /// Database file loaded at startup and used by a bare `save`
    #[arg(short, long)]
    db: Option<String>,

    /// Fail on malformed lines instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Save the database file on exit
    #[arg(short, long)]
    autosave: bool,

    /// Query output format (tab or json)
    #[arg(short, long, default_value = "tab")]
    format: OutputFormat,
}

const PROMPT: &str = "> ";

fn main() {
    // Initialize tracing/logging (stderr, so query output stays clean)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,tabula=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("Tabula Shell v{}", tabula::VERSION);

    // Build config from args
    let mut builder = Config::builder()
        .autosave(args.autosave)
        .load_mode(if args.strict { LoadMode::Strict } else { LoadMode::Lenient });
    if let Some(db) = &args.db {
        builder = builder.data_file(db);
    }
    let config = builder.build();

    let mut session = match Session::open(config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&mut session, args.format) {
        tracing::error!("Shell error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = session.close() {
        tracing::error!("Failed to close database: {}", e);
        std::process::exit(1);
    }
}

/// Read commands until `exit` or end of input
fn run(session: &mut Session, format: OutputFormat) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        write!(stdout, "{}", PROMPT)?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(stdout, "Error: {}", e)?;
                continue;
            }
        };

        match session.execute(command) {
            Ok(Outcome::Exit) => return Ok(()),
            Ok(outcome) => writeln!(stdout, "{}", format_outcome(&outcome, format))?,
            Err(e) => writeln!(stdout, "Error: {}", e)?,
        }
    }
}
