use anyhow::Result;
use clap::Parser;

use augur::app::AugurApp;
use augur::cli::{Cli, Commands};
use augur::config::TomlConfigProvider;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbosity = cli.verbosity();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(verbosity.log_filter()),
    )
    .init();

    let mut config_provider = TomlConfigProvider::new();
    if let Some(path) = cli.config.clone() {
        config_provider = config_provider.with_config_file(path);
    }

    let app = AugurApp::new(config_provider)
        .with_verbosity(verbosity)
        .with_format(cli.format)
        .with_scenario(cli.scenario.clone());

    match cli.command {
        Commands::Detect(args) => app.detect(args)?,
        Commands::Scan(args) => app.scan(args).await?,
        Commands::Issues(args) => app.issues(args)?,
        Commands::SetStatus(args) => app.set_status(args)?,
        Commands::Recommend(args) => app.recommend(args)?,
        Commands::History(args) => app.history(args)?,
    }

    Ok(())
}
