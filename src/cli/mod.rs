pub mod chart;
pub mod detail;
pub mod list;
pub mod setup;
pub mod simulate;
pub mod ui;

use crate::core::{FundProvider, FundRecord, HistoryPoint};
use anyhow::{Context, Result};
use futures::future::try_join;
use tracing::debug;

/// Fetches a fund's snapshot and history concurrently behind a spinner.
pub async fn fetch_fund_with_history(
    provider: &dyn FundProvider,
    id: u64,
) -> Result<(FundRecord, Vec<HistoryPoint>)> {
    let spinner = ui::new_spinner(&format!("Fetching fund {id}..."));
    let result = try_join(provider.fetch_fund(id), provider.fetch_history(id))
        .await
        .with_context(|| format!("Failed to load fund {id}"));
    spinner.finish_and_clear();

    let (fund, history) = result?;
    debug!(
        "Loaded fund {} ({}) with {} history points",
        fund.id,
        fund.name,
        history.len()
    );
    Ok((fund, history))
}
