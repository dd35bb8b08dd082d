// src/main.rs
use anyhow::{Context, Result};
use clap::Parser;
use page_reachability::{
    config::{self, Config, TargetSelection, TargetSpec},
    ReachabilityChecker, Runner,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Check that pages answer with the expected HTTP status.
#[derive(Parser, Debug)]
#[command(name = "page-reachability", version)]
struct Cli {
    /// URL of the home page to check
    #[arg(long, value_name = "URL")]
    home: Option<String>,

    /// Extra target as NAME=URL or URL; may be repeated
    #[arg(long = "target", value_name = "NAME=URL")]
    targets: Vec<TargetSpec>,

    /// YAML or JSON file with check settings and named targets
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Only check these environments from the config file
    #[arg(long = "env", value_name = "NAME")]
    envs: Vec<String>,

    /// Status every target must answer with
    #[arg(long)]
    expected_status: Option<u16>,

    /// Maximum wait per check, in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialise logging: {:#}", e);
        return ExitCode::from(2);
    }

    match run(Cli::parse()).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("page_reachability=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();
    Ok(())
}

async fn run(cli: Cli) -> Result<u8> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            config::load_config(path).await?
        }
        None => Config::default(),
    };

    if let Some(timeout_secs) = cli.timeout_secs {
        config.check.timeout_secs = timeout_secs;
        config.check.connect_timeout_secs = config.check.connect_timeout_secs.min(timeout_secs);
    }
    config.validate()?;

    let selection = TargetSelection {
        home: cli.home,
        targets: cli.targets,
        envs: cli.envs,
        expected_status: cli.expected_status,
    };
    let requests = selection.resolve(&config)?;

    let checker =
        ReachabilityChecker::new(&config.check).context("Failed to create HTTP client")?;
    let summary = Runner::new(checker).run(requests).await;

    for result in summary.results() {
        println!("{}", result);
    }

    Ok(summary.exit_code())
}
