//! Space Onboard - client onboarding against a hosted collaboration API
//!
//! Uploads a local file into the space of a client user, creating the user
//! and the space first when they do not exist yet.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use space_onboard::{Config, HttpFoyerClient, SpaceOnboarding, WorkflowSettings};

#[derive(Parser, Debug)]
#[command(name = "space_onboard")]
#[command(about = "Upload a file into a client's space, creating the client and space if needed", long_about = None)]
struct Cli {
    #[arg(help = "Client first name")]
    first_name: String,

    #[arg(help = "Client last name")]
    last_name: String,

    #[arg(help = "Client email address, used to find an existing user")]
    email: String,

    #[arg(help = "Local file to upload")]
    file: PathBuf,

    #[arg(long, default_value = ".secrets", help = "Env file with FOYER_EXAMPLE_URL and FOYER_EXAMPLE_KEY")]
    secrets: PathBuf,
}

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load the secrets file into the environment, if present
/// 3. Load configuration from environment variables
/// 4. Build the HTTP client and workflow context
/// 5. Run the onboarding workflow and print the uploaded file record
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "space_onboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match dotenvy::from_path(&cli.secrets) {
        Ok(()) => info!("Loaded secrets from {}", cli.secrets.display()),
        Err(err) if err.not_found() => {
            warn!("No secrets file at {}, using process environment", cli.secrets.display())
        }
        Err(err) => {
            return Err(err).with_context(|| format!("reading {}", cli.secrets.display()))
        }
    }

    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config);

    let client = HttpFoyerClient::from_config(&config)?;
    let workflow = SpaceOnboarding::new(client, WorkflowSettings::from_config(&config));

    let file = workflow
        .add_file_to_client_space(&cli.first_name, &cli.last_name, &cli.email, &cli.file)
        .await
        .with_context(|| format!("onboarding {}", cli.email))?;

    println!("{}", serde_json::to_string_pretty(&file)?);
    Ok(())
}
