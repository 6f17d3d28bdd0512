use bootcs_schema::cli::validate::ValidateArgs;
use bootcs_schema::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-tool")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validate bootcs course and stage configurations", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate course.yml and every stage against the bundled schemas
    Validate {
        /// Course directory (default: current directory)
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Also report passing per-file checks
        #[arg(short, long)]
        verbose: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Generate README documentation from course/stages
    Generate {
        /// Course directory (default: current directory)
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Output file path (default: <dir>/README.md)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print to stdout instead of writing the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(bootcs_schema::cli::exit_code(&e));
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Validate { dir, verbose, json } => {
            bootcs_schema::cli::validate::run(&dir, ValidateArgs { verbose, json })?;
        }

        Commands::Generate {
            dir,
            output,
            dry_run,
        } => {
            bootcs_schema::cli::generate::run(&dir, output.as_deref(), dry_run)?;
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "schema-tool", &mut io::stdout());
        }
    }

    Ok(())
}
