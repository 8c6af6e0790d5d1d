//! Tabula CLI
//!
//! Runs one command against a database file.

use clap::{Parser, Subcommand};
use tabula::shell::{format_outcome, parse_command, Command, OutputFormat};
use tabula::{Config, LoadMode, Session, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// Tabula CLI
#[derive(Parser, Debug)]
#[command(name = "tabula-cli")]
#[command(about = "One-shot commands against a Tabula database file")]
struct Args {
    /// Database file
    #[arg(short, long)]
    db: String,

    /// Fail on malformed lines instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Query output format (tab or json)
    #[arg(short, long, default_value = "tab")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute a shell command, saving the file if it changed anything
    Exec {
        /// The command, e.g. `insert Employees ID:1 Name:John`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// List tables
    Tables,

    /// Show the columns of a table
    Describe {
        /// The table to describe
        table: String,
    },

    /// Validate the file strictly and print what it contains
    Check,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> tabula::Result<()> {
    let command = match args.command {
        Commands::Check => return check(&args.db),
        Commands::Exec { command } => match parse_command(&command.join(" "))? {
            Some(command) => command,
            None => return Ok(()),
        },
        Commands::Tables => Command::Tables,
        Commands::Describe { table } => Command::Describe { table },
    };

    let config = Config::builder()
        .data_file(&args.db)
        .load_mode(if args.strict { LoadMode::Strict } else { LoadMode::Lenient })
        .build();
    let mut session = Session::open(config)?;

    let mutates = command.mutates();
    let outcome = session.execute(command)?;
    let rendered = format_outcome(&outcome, args.format);
    if !rendered.is_empty() {
        println!("{}", rendered);
    }

    if mutates {
        session.save()?;
    }
    Ok(())
}

/// Strict load without touching the file
fn check(db: &str) -> tabula::Result<()> {
    let report = Store::new().load_with_mode(db, LoadMode::Strict)?;
    println!("{}: {} tables, {} rows", db, report.tables, report.rows);
    Ok(())
}
