use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod models;
mod services;
mod utils;

use api::orfr::SpotPriceClient;
use config::Config;
use services::dashboard_service::DashboardPoller;
use services::poll_service;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("goldspot=debug".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap()))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("🪙 Starting goldspot {}...", env!("CARGO_PKG_VERSION"));
    info!("  XAU spot price in XOF/oz, refreshed on a fixed interval");

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    let client = match SpotPriceClient::new(&config.api_url, config.proxy_url.as_deref(), config.http_timeout) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create spot price client: {}", e);
            return;
        }
    };

    info!("Polling {} every {}s", client.request_url(), config.poll_interval.as_secs());
    info!("Chart output: {}", config.chart_path);

    let poll_interval = config.poll_interval;
    let mut poller = DashboardPoller::new(client, config);

    // Single Ctrl-C future for the whole run, so a signal sent mid-cycle is kept
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    poll_service::poll_until_shutdown(poll_interval, shutdown, &mut poller).await;
}
