use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use specwatch::cli::check::CheckArgs;
use specwatch::{Result, VersionPick};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "specwatch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Monitors a vendor API specification and changelog for updates", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one monitoring pass and write the change report
    Check {
        /// Installation root holding openapi.json and the changelog cache
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Report output path (default: monitor-results.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Per-request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// How to pick the latest version among changelog matches
        #[arg(long, value_enum, default_value = "first")]
        version_pick: VersionPick,

        /// Print the raw result JSON instead of the summary
        #[arg(short, long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create tokio runtime");

    if let Err(e) = runtime.block_on(run_async(cli)) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

async fn run_async(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Check {
            root,
            output,
            timeout,
            version_pick,
            json,
        } => {
            specwatch::cli::check::run(CheckArgs {
                root,
                output,
                timeout_secs: timeout,
                version_pick,
                json,
            })
            .await?;
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "specwatch", &mut io::stdout());
        }
    }

    Ok(())
}
