//! Handler for the `run` command.

use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

use crate::cli::RunArgs;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::App;

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let mut config = Config::read(&args.config)?;

    // Apply CLI overrides
    if let Some(ref level) = args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.format = "json".to_string();
    }
    if args.dry_run {
        config.dry_run = true;
    }
    config.validate()?;

    config.init_logging();
    info!(config = %args.config.display(), "fillwatch starting");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let app = App::run_with_shutdown(config, shutdown_rx);
    tokio::pin!(app);

    tokio::select! {
        result = &mut app => {
            if let Err(e) = result {
                error!(error = %e, "Fatal error");
                return Err(e);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
            app.await?;
        }
    }

    Ok(())
}
