use super::ui;
use crate::core::numeric::numeric_or_default;
use crate::core::risk::{RatioGrade, StdDevRisk};
use crate::core::{
    CapSize, FundProvider, FundRecord, HistoryPoint, RiskLevel, RiskModel, Series, WindowToken,
    cap_label, combined_series, filter_by_window,
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Table};
use tracing::info;

/// Everything the detail view shows for one fund.
pub struct FundDetail {
    pub fund: FundRecord,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub cap: CapSize,
    pub window: WindowToken,
    pub series: Vec<Series>,
}

impl FundDetail {
    pub fn build(
        fund: FundRecord,
        history: &[HistoryPoint],
        window: WindowToken,
        model: &RiskModel,
        now: DateTime<Utc>,
    ) -> Self {
        let risk_score = model.score(&fund);
        let windowed = filter_by_window(history, window, now);
        Self {
            risk_level: RiskLevel::from_score(risk_score),
            cap: cap_label(numeric_or_default(fund.equity_size, 0.0)),
            series: combined_series(&windowed),
            risk_score,
            window,
            fund,
        }
    }

    pub fn metrics_table(&self) -> Table {
        let fund = &self.fund;
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Metric"),
            ui::header_cell("Value"),
            ui::header_cell("Grade"),
        ]);

        let plain = |label: &str, value: Option<f64>| {
            vec![
                Cell::new(label),
                ui::format_optional_cell(value, |v| format!("{v:.2}")),
                Cell::new(""),
            ]
        };

        table.add_row(vec![
            Cell::new("Equity Size"),
            ui::format_optional_cell(fund.equity_size, |v| format!("{v:.2}")),
            Cell::new(self.cap.to_string()),
        ]);

        let std_risk = StdDevRisk::from_std_deviation(numeric_or_default(fund.std_deviation, 0.0));
        table.add_row(vec![
            Cell::new("Std Deviation"),
            ui::format_optional_cell(fund.std_deviation, |v| format!("{v:.2}")),
            ui::badge_cell(std_risk.label(), std_risk.color()),
        ]);

        for (label, ratio) in [
            ("Sharpe Ratio", fund.sharpe_ratio),
            ("Sortino Ratio", fund.sortino_ratio),
        ] {
            let grade = RatioGrade::from_ratio(numeric_or_default(ratio, 0.0));
            table.add_row(vec![
                Cell::new(label),
                ui::format_optional_cell(ratio, |v| format!("{v:.2}")),
                ui::badge_cell(grade.label(), grade.color()),
            ]);
        }

        table.add_row(vec![
            Cell::new("Risk Score"),
            ui::number_cell(self.risk_score),
            ui::badge_cell(self.risk_level.label(), self.risk_level.color()),
        ]);
        table.add_row(plain("NAV", fund.nav));
        table.add_row(plain("AUM", fund.aum));
        table.add_row(plain("CAGR (%)", fund.cagr));
        table.add_row(plain("Expense Ratio (%)", fund.expense_ratio));
        table.add_row(plain("Beta", fund.beta));
        table.add_row(plain("Alpha", fund.alpha));
        table.add_row(plain("R-Squared", fund.r_squared));
        table
    }

    pub fn series_table(&self) -> Table {
        let mut table = ui::new_styled_table();
        let mut header = vec![ui::header_cell("Date")];
        header.extend(self.series.iter().map(|s| ui::header_cell(s.label)));
        table.set_header(header);

        let dates = self.series.first().map_or(&[][..], |s| s.labels.as_slice());
        for (i, date) in dates.iter().enumerate() {
            let mut row = vec![Cell::new(date)];
            row.extend(self.series.iter().map(|s| ui::number_cell(s.values[i])));
            table.add_row(row);
        }
        table
    }
}

pub async fn run(
    provider: &dyn FundProvider,
    id: u64,
    window: WindowToken,
    model: &RiskModel,
    now: DateTime<Utc>,
) -> Result<()> {
    info!("Showing fund {id} over {window}");
    let (fund, history) = super::fetch_fund_with_history(provider, id).await?;
    let detail = FundDetail::build(fund, &history, window, model, now);

    let fund = &detail.fund;
    println!("\n{}", ui::style_text(&fund.name, ui::StyleType::Title));
    let subtitle = [
        fund.amc_name.as_deref(),
        fund.market_cap.as_deref(),
        fund.primary_badge.as_deref(),
        fund.lock_in_period.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" · ");
    if !subtitle.is_empty() {
        println!("{}", ui::style_text(&subtitle, ui::StyleType::Subtle));
    }

    println!("{}", detail.metrics_table());

    ui::print_separator();
    println!(
        "History ({}): NAV and AUM on the primary axis, Std Deviation on the secondary axis",
        detail.window
    );
    if detail.series.iter().all(Series::is_empty) {
        println!(
            "{}",
            ui::style_text("No history in this window.", ui::StyleType::Subtle)
        );
    } else {
        println!("{}", detail.series_table());
    }
    Ok(())
}
