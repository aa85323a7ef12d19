use std::sync::Arc;
use std::time::Duration;

use phyphox_rs::ports::PhyphoxPort;
use phyphox_rs::{run_mock_service, run_service, AcquisitionConfig, AcquisitionService};

const DEFAULT_URL: &str = "http://localhost:8080";

async fn watch<C: PhyphoxPort + 'static>(phyphox: Arc<AcquisitionService<C>>) {
    for _ in 0..10 {
        tokio::time::sleep(Duration::from_secs(1)).await;
        match phyphox.latest() {
            Some(snapshot) => println!("{}", snapshot),
            None => println!("No data yet"),
        }
    }
    phyphox.stop().await;
}

// Polls the phone at URL_PHYPHOX, or a synthetic device with `--mock`, for ten seconds.
#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AcquisitionConfig::default();
    if std::env::args().any(|arg| arg == "--mock") {
        let phyphox = run_mock_service(100, true, 1000, config).unwrap();
        watch(phyphox).await;
    } else {
        let url = std::env::var("URL_PHYPHOX").unwrap_or_else(|_| DEFAULT_URL.to_string());
        let phyphox = run_service(&url, Duration::from_secs(2), 1000, config).unwrap();
        watch(phyphox).await;
    }
}
