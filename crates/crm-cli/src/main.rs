//! Agency CRM command line
//!
//! Every command signs in by phone number first and then acts as that user,
//! so the same role rules apply as on the dashboard.

mod commands;

use anyhow::Result;
use clap::Parser;
use crm_core::config::AppConfig;
use crm_core::types::today;
use crm_store::seed::seed_snapshot;
use crm_store::{open_storage, AppStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    init_tracing();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from env: {}, using defaults", e);
        AppConfig::default()
    });

    let cli = Cli::parse();

    let storage = open_storage(&config.storage)?;
    tracing::debug!(backend = ?config.storage.backend, "storage opened");
    let store = AppStore::new(seed_snapshot(today()), storage)
        .with_commission_rate(config.policy.default_commission_rate);

    commands::run(cli, store, &config).await
}

const DEFAULT_FILTER: &str = "info,crm_store=debug,crm_services=debug";

/// Filter from `RUST_LOG`, which may come from `.env`
fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
