use super::ui;
use crate::core::{FundProvider, Metric, Series, WindowToken, filter_by_window, project_series};
use anyhow::Result;
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Table};
use tracing::info;

pub fn display_series(series: &Series) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Date"), ui::header_cell(series.label)]);
    for (label, value) in series.labels.iter().zip(&series.values) {
        table.add_row(vec![Cell::new(label), ui::number_cell(*value)]);
    }
    table
}

/// Lowest, highest and latest value of a series.
pub fn series_range(series: &Series) -> Option<(f64, f64, f64)> {
    let latest = *series.values.last()?;
    let (min, max) = series
        .values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    Some((min, max, latest))
}

pub async fn run(
    provider: &dyn FundProvider,
    id: u64,
    metric: Metric,
    window: WindowToken,
    now: DateTime<Utc>,
) -> Result<()> {
    info!("Charting {metric} of fund {id} over {window}");
    let (fund, history) = super::fetch_fund_with_history(provider, id).await?;
    let series = project_series(&filter_by_window(&history, window, now), metric);

    println!(
        "\n{}",
        ui::style_text(
            &format!("{} · {} over {window}", fund.name, series.label),
            ui::StyleType::Title
        )
    );
    match series_range(&series) {
        Some((min, max, latest)) => {
            println!("{}", display_series(&series));
            println!(
                "{}",
                ui::style_text(
                    &format!("Low {min:.2} · High {max:.2} · Latest {latest:.2}"),
                    ui::StyleType::Subtle
                )
            );
        }
        None => println!(
            "{}",
            ui::style_text("No history in this window.", ui::StyleType::Subtle)
        ),
    }
    Ok(())
}
