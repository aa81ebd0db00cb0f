// src/main.rs
mod config;
mod keeper;
mod maps;
mod models;
mod poller;
mod report;
mod storage;
mod utils;

use env_logger::Env;
use log::info;

use crate::config::Config;
use crate::keeper::KeeperClient;
use crate::poller::Poller;
use crate::storage::reports::ReportStore;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger only once at the start
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    dotenv::dotenv().ok();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    let client = match KeeperClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to build HTTP client: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    let store = ReportStore::new(config.report_root.clone(), config.server_name.clone());

    println!("Calling {}", config.keeper_base_url);
    println!("Saving battle reports in {}", store.day_root().display());
    info!(
        "polling server {} ({}) every {}s",
        config.server_name, config.server_uuid, config.poll_interval_secs
    );

    Poller::new(config, client, store).run().await;
    Ok(())
}
