use clap::{Parser, Subcommand};
use lerna_changelog::config::{Configuration, ResolveOptions};
use lerna_changelog::core::ChangelogResult;
use lerna_changelog::GitHostApi;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit status for a failed issue or user lookup
const LOOKUP_FAILURE: u8 = 2;

#[derive(Parser)]
#[command(name = "lerna-changelog")]
#[command(about = "Inspect changelog configuration and hosting-provider metadata")]
#[command(version)]
struct Cli {
    /// Project root containing package.json or lerna.json
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Derive the next version from the manifest's "version" field
    #[arg(long, global = true)]
    next_version_from_metadata: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved configuration
    Config,
    /// Fetch an issue or pull request
    Issue {
        /// Issue number
        id: String,
    },
    /// Fetch a user
    User {
        /// User login
        login: String,
    },
    /// Print the base URL of the repository's issue list
    IssueUrl,
}

fn print_json<T: Serialize>(value: &T) -> ChangelogResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> ChangelogResult<()> {
    let options = ResolveOptions {
        next_version_from_metadata: cli.next_version_from_metadata,
    };
    let config = Configuration::from_path_with_options(&cli.root, &options)?;

    match cli.command {
        Commands::Config => print_json(&config),
        Commands::IssueUrl => {
            let api = GitHostApi::new(&config)?;
            println!("{}", api.issue_page_url());
            Ok(())
        }
        Commands::Issue { id } => {
            let api = GitHostApi::new(&config)?;
            print_json(&api.issue_data(&id).await?)
        }
        Commands::User { login } => {
            let api = GitHostApi::new(&config)?;
            print_json(&api.user_data(&login).await?)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_configuration() => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
        // Lookup failures are distinguishable so scripts can skip the item
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(LOOKUP_FAILURE)
        }
    }
}
