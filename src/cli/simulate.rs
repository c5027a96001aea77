use super::ui;
use crate::core::{FundProvider, SimulationResult, Strategy, WindowToken, simulate};
use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Table};
use tracing::info;

/// Total cash put in by the strategy over the simulated points.
pub fn amount_invested(result: &SimulationResult, strategy: Strategy, amount: f64) -> f64 {
    match strategy {
        Strategy::Lumpsum if result.is_empty() => 0.0,
        Strategy::Lumpsum => amount,
        Strategy::Sip => amount * result.points.len() as f64,
    }
}

pub fn display_simulation(result: &SimulationResult, strategy: Strategy) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell(&format!("{strategy} Value")),
    ]);
    for point in &result.points {
        table.add_row(vec![Cell::new(&point.label), ui::number_cell(point.value)]);
    }
    table
}

pub async fn run(
    provider: &dyn FundProvider,
    id: u64,
    strategy: Strategy,
    amount: f64,
    window: WindowToken,
    now: DateTime<Utc>,
) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        bail!("Investment amount must be a positive number, got {amount}");
    }
    info!("Simulating {strategy} of {amount} in fund {id} over {window}");

    let (fund, history) = super::fetch_fund_with_history(provider, id).await?;
    let result = simulate(&history, strategy, amount, window, now);

    println!(
        "\n{}",
        ui::style_text(
            &format!("{} · {strategy} of {amount:.2} over {window}", fund.name),
            ui::StyleType::Title
        )
    );
    if result.is_empty() {
        println!(
            "{}",
            ui::style_text("No history in this window.", ui::StyleType::Subtle)
        );
    } else {
        println!("{}", display_simulation(&result, strategy));
    }

    let invested = amount_invested(&result, strategy, amount);
    println!(
        "{} {:.2}",
        ui::style_text("Invested:", ui::StyleType::TotalLabel),
        invested
    );
    println!(
        "{} {}",
        ui::style_text("Final value:", ui::StyleType::TotalLabel),
        ui::style_text(
            &format!("{:.2}", result.final_value),
            ui::StyleType::TotalValue
        )
    );
    Ok(())
}
