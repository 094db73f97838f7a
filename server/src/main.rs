use clap::{Args, Parser, Subcommand};
use dataset::Tournament;
use server::{ServerConfig, ServerResult};
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "worldcup")]
#[command(about = "Read-only GraphQL API over a World Cup tournament dataset")]
struct Cli {
    /// TOML file with server settings; flags below override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Default)]
struct Overrides {
    /// Address to bind
    #[arg(long, env = "WORLDCUP_BIND", global = true)]
    bind: Option<IpAddr>,
    /// Port to listen on
    #[arg(short, long, env = "WORLDCUP_PORT", global = true)]
    port: Option<u16>,
    /// Path to the tournament JSON document
    #[arg(short, long, env = "WORLDCUP_DATA", global = true)]
    data: Option<PathBuf>,
    /// Disable the GraphiQL explorer
    #[arg(long, global = true)]
    no_graphiql: bool,
    /// Disable schema introspection queries
    #[arg(long, global = true)]
    no_introspection: bool,
    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,
    /// Maximum query depth
    #[arg(long, global = true)]
    max_depth: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the GraphQL endpoint (default)
    Serve,
    /// Load and validate the dataset, then print a summary
    Check,
    /// Print the GraphQL schema definition
    Schema,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,dataset=debug,schema=info,server=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match resolve_config(cli.config.as_deref(), cli.overrides) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            if let Err(e) = server::serve(config).await {
                error!("Server failed: {}", e);
                return Err(e.into());
            }
        }
        Commands::Check => {
            check_dataset(&config)?;
        }
        Commands::Schema => {
            println!("{}", schema::sdl());
        }
    }

    Ok(())
}

fn resolve_config(file: Option<&Path>, overrides: Overrides) -> ServerResult<ServerConfig> {
    let mut config = match file {
        Some(path) => {
            info!("Reading configuration from {}", path.display());
            ServerConfig::from_toml_file(path)?
        }
        None => ServerConfig::default(),
    };

    if let Some(bind) = overrides.bind {
        config = config.with_bind_address(bind);
    }
    if let Some(port) = overrides.port {
        config = config.with_port(port);
    }
    if let Some(data) = overrides.data {
        config = config.with_dataset_path(data);
    }
    if overrides.no_graphiql {
        config = config.with_graphiql(false);
    }
    if overrides.no_introspection {
        config = config.with_introspection(false);
    }
    if let Some(timeout) = overrides.timeout {
        config = config.with_request_timeout(Duration::from_secs(timeout));
    }
    if let Some(depth) = overrides.max_depth {
        config = config.with_max_query_depth(depth);
    }

    config.validated()
}

fn check_dataset(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Checking {}...", config.dataset_path.display());

    match Tournament::load(&config.dataset_path) {
        Ok(tournament) => {
            println!("✓ Dataset is valid: {}", tournament.summary());
            Ok(())
        }
        Err(e) => {
            println!("✗ Dataset is invalid: {}", e);
            error!("Dataset check failed: {}", e);
            Err(e.into())
        }
    }
}
