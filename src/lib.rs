pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::{Metric, Strategy, WindowToken};
use crate::providers::fund_api::FundApiProvider;
use crate::store::KeyValueStore;
use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    List {
        search: Option<String>,
    },
    Detail {
        id: u64,
        window: Option<String>,
    },
    Simulate {
        id: u64,
        strategy: Option<String>,
        amount: Option<f64>,
        window: Option<String>,
    },
    Chart {
        id: u64,
        metric: String,
        window: Option<String>,
    },
}

fn open_store(config: &AppConfig) -> KeyValueStore {
    match config.default_data_path() {
        Ok(data_path) => KeyValueStore::open(&data_path),
        Err(e) => {
            warn!("No data directory available ({e}). Using memory cache");
            KeyValueStore::in_memory()
        }
    }
}

/// An omitted window uses the configured default; an unrecognized one is one year.
fn resolve_window(token: Option<&str>, configured: WindowToken) -> WindowToken {
    token.map_or(configured, WindowToken::parse_or_default)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fundscope starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = open_store(&config);
    let provider = FundApiProvider::new(config.api_base_url(), &store, config.cache_ttl())?;
    let defaults = &config.defaults;
    let now = Utc::now();

    match command {
        AppCommand::List { search } => {
            cli::list::run(&provider, search.as_deref(), &config.risk).await
        }
        AppCommand::Detail { id, window } => {
            let window = resolve_window(window.as_deref(), defaults.window);
            cli::detail::run(&provider, id, window, &config.risk, now).await
        }
        AppCommand::Simulate {
            id,
            strategy,
            amount,
            window,
        } => {
            let strategy = match strategy {
                Some(s) => s.parse::<Strategy>()?,
                None => defaults.strategy,
            };
            let amount = amount.unwrap_or(defaults.amount);
            let window = resolve_window(window.as_deref(), defaults.window);
            cli::simulate::run(&provider, id, strategy, amount, window, now).await
        }
        AppCommand::Chart { id, metric, window } => {
            let metric = metric.parse::<Metric>()?;
            let window = resolve_window(window.as_deref(), defaults.window);
            cli::chart::run(&provider, id, metric, window, now).await
        }
    }
}
