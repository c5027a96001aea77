use super::ui;
use crate::core::catalog::search_funds;
use crate::core::numeric::numeric_or_default;
use crate::core::risk::SharpeBadge;
use crate::core::{FundProvider, FundRecord, RiskLevel, RiskModel, cap_label};
use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use tracing::info;

pub fn display_funds(funds: &[&FundRecord], model: &RiskModel) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("ID"),
        ui::header_cell("Fund"),
        ui::header_cell("AMC"),
        ui::header_cell("Market Cap"),
        ui::header_cell("NAV"),
        ui::header_cell("AUM"),
        ui::header_cell("Sharpe"),
        ui::header_cell("CAGR"),
        ui::header_cell("Size"),
        ui::header_cell("Risk"),
    ]);

    for fund in funds {
        let level = RiskLevel::from_score(model.score(fund));
        let sharpe = SharpeBadge::from_ratio(fund.sharpe_ratio);
        let sharpe_text = fund.sharpe_ratio.map_or("N/A".to_string(), |s| format!("{s:.2}"));
        let market_cap = fund
            .market_cap
            .as_deref()
            .filter(|m| !m.is_empty())
            .map_or_else(|| "NFO".to_string(), str::to_uppercase);
        table.add_row(vec![
            Cell::new(fund.id),
            Cell::new(&fund.name),
            Cell::new(fund.amc_name.as_deref().unwrap_or("")),
            Cell::new(market_cap),
            ui::format_optional_cell(fund.nav, |v| format!("{v:.2}")),
            ui::format_optional_cell(fund.aum, |v| format!("{v:.2}")),
            ui::badge_cell(&sharpe_text, sharpe.color()),
            ui::format_optional_cell(fund.cagr, |v| format!("{v:.1}%")),
            Cell::new(cap_label(numeric_or_default(fund.equity_size, 0.0)).to_string()),
            ui::badge_cell(level.label(), level.color()),
        ]);
    }
    table
}

pub async fn run(
    provider: &dyn FundProvider,
    search: Option<&str>,
    model: &RiskModel,
) -> Result<()> {
    info!("Listing funds");
    let spinner = ui::new_spinner("Fetching funds...");
    let funds = provider.list_funds().await;
    spinner.finish_and_clear();
    let funds = funds.context("Failed to load fund list")?;

    let matches = search_funds(&funds, search.unwrap_or(""));
    if matches.is_empty() {
        println!("No funds found.");
        return Ok(());
    }
    println!("{}", display_funds(&matches, model));
    println!(
        "{}",
        ui::style_text(
            &format!("{} of {} funds", matches.len(), funds.len()),
            ui::StyleType::Subtle
        )
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_funds() {
        let funds = vec![
            FundRecord {
                id: 11,
                name: "Steady Large Cap".to_string(),
                market_cap: Some("large".to_string()),
                equity_size: Some(25000.0),
                std_deviation: Some(2.0),
                sharpe_ratio: Some(3.0),
                sortino_ratio: Some(3.0),
                cagr: Some(14.5),
                ..Default::default()
            },
            FundRecord {
                id: 12,
                name: "New Fund Offer".to_string(),
                ..Default::default()
            },
        ];
        let refs: Vec<_> = funds.iter().collect();
        let rendered = ui::render_unwrapped(display_funds(&refs, &RiskModel::default()));

        assert!(rendered.contains("Steady Large Cap"));
        assert!(rendered.contains("LARGE"));
        assert!(rendered.contains("large-cap"));
        // 0.4*0.1 + 0.1*0.1 = 5
        assert!(rendered.contains("LOW"));
        assert!(rendered.contains("NFO"));
        assert!(rendered.contains("small-cap"));
        assert!(rendered.contains("MODERATELY HIGH"));
        assert!(rendered.contains("Sharpe"));
        assert!(rendered.contains("3.00"));
        assert!(rendered.contains("CAGR"));
        assert!(rendered.contains("14.5%"));
        assert!(rendered.contains("N/A"));
    }
}
