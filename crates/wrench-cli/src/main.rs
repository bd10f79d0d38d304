//! Wrench CLI - Web-searching troubleshooting assistant for PyAnsys.

use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wrench_cli::{commands, repl};
use wrench_cli::{Cli, Command, Config, Formatter};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config: explicit path must exist, the default may be absent.
    let mut config = match &cli.config {
        Some(path) => {
            let path = Path::new(path);
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            Config::load_from(path)?
        }
        None => Config::load().unwrap_or_else(|_| {
            let cfg = Config::default();
            cfg.save().ok();
            cfg
        }),
    };
    config.apply_overrides(&cli);

    let formatter = Formatter::new(config.settings.color);
    let pipeline = commands::build_pipeline(&config)?;

    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&pipeline, &formatter).await?;
        }
        Some(Command::Ask(args)) => {
            commands::execute_ask(&args.question_text(), &pipeline, &formatter).await?;
        }
    }

    Ok(())
}
