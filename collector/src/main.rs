use clap::Parser;
use log::error;

use collector::CollectorConfig;

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = CollectorConfig::parse();
    if let Err(e) = collector::run(config).await {
        error!("{}", e);
        std::process::exit(1);
    }
}
