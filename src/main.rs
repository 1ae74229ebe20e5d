use divar_notifier::infrastructure::bootstrap;
use divar_notifier::infrastructure::config::Config;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".into());
    let config = match Config::load(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.init_logging();
    info!("divar-notifier starting");

    tokio::select! {
        result = bootstrap::run(config) => {
            if let Err(e) = result {
                error!(error = %e, "Fatal error");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("divar-notifier stopped");
}
