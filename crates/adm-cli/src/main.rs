//! Admiral CLI
//!
//! Manages container hosts and group placement policies of an Admiral
//! orchestration service:
//! - `host add|rm|enable|disable|update|ls`
//! - `policy add|rm|update|ls`
//! - `config show|path|init|get|set`

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adm_core::config::ConfigOverrides;
use adm_core::ClientConfig;
use admiral::api::AdmiralClient;
use admiral::commands::config::ConfigAction;
use admiral::commands::host::HostCommand;
use admiral::commands::policy::PolicyCommand;
use admiral::commands::{self, Reply};
use admiral::output::{print_error, print_success};

#[derive(Parser)]
#[command(name = "admiral")]
#[command(author, version, about = "Manage container hosts and placement policies")]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Service URL (overrides config file and ADMIRAL_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Auth token (overrides config file and ADMIRAL_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Accept invalid TLS certificates from the service
    #[arg(long, global = true)]
    insecure: bool,

    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage container hosts
    Host {
        #[command(subcommand)]
        command: HostCommand,
    },

    /// Manage group placement policies
    Policy {
        #[command(subcommand)]
        command: PolicyCommand,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let overrides = ConfigOverrides {
        url: cli.url,
        token: cli.token,
        insecure: cli.insecure,
    };
    let config_path = cli.config;

    let reply = match cli.command {
        Commands::Config { action } => {
            return commands::config::handle(config_path.as_deref(), &overrides, action);
        }
        Commands::Host { command } => {
            let client = connect(config_path.as_deref(), &overrides)?;
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            commands::host::handle(&client, command, &mut input).await?
        }
        Commands::Policy { command } => {
            let client = connect(config_path.as_deref(), &overrides)?;
            commands::policy::handle(&client, command).await?
        }
    };

    match reply {
        Reply::Done(message) => print_success(&message),
        Reply::Listing(listing) => println!("{}", listing),
    }
    Ok(())
}

fn connect(config_path: Option<&std::path::Path>, overrides: &ConfigOverrides) -> Result<AdmiralClient> {
    let config = ClientConfig::load(config_path, overrides)?;
    tracing::debug!(url = %config.url, "Using orchestration service");
    Ok(AdmiralClient::new(&config)?)
}
