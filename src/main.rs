use clap::Parser;

use fillwatch::cli::{check, run, CheckCommand, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => run::execute(&args).await?,
        Commands::Check(CheckCommand::Config(arg)) => check::execute_config(&arg.config)?,
        Commands::Check(CheckCommand::Connection(arg)) => {
            check::execute_connection(&arg.config).await?;
        }
        Commands::Check(CheckCommand::Telegram(arg)) => {
            check::execute_telegram(&arg.config).await?;
        }
    }

    Ok(())
}
