//! Replays fund history under lumpsum and SIP investment strategies

use crate::core::error::{EngineError, EngineResult};
use crate::core::fund::HistoryPoint;
use crate::core::numeric::numeric_or_default;
use crate::core::window::{WindowToken, filter_by_window, monthly_downsample};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Lumpsum,
    Sip,
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Strategy::Lumpsum => "Lumpsum",
                Strategy::Sip => "SIP",
            }
        )
    }
}

impl FromStr for Strategy {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "lumpsum" => Ok(Strategy::Lumpsum),
            "sip" => Ok(Strategy::Sip),
            _ => Err(EngineError::InvalidArgument(format!(
                "unknown investment strategy: {s}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationPoint {
    pub date: NaiveDate,
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub points: Vec<SimulationPoint>,
    pub final_value: f64,
}

impl SimulationResult {
    fn from_points(points: Vec<SimulationPoint>) -> Self {
        let final_value = points.last().map_or(0.0, |p| p.value);
        Self {
            points,
            final_value,
        }
    }

    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.label.clone()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Display format for simulation labels, e.g. `05-Jan-2024`.
pub fn format_label(date: NaiveDate) -> String {
    date.format("%d-%b-%Y").to_string()
}

/// Buys `amount` worth of units at the first point's NAV and tracks their value.
pub fn lumpsum(history: &[HistoryPoint], amount: f64) -> SimulationResult {
    let Some(first) = history.first() else {
        return SimulationResult::from_points(Vec::new());
    };
    let units = amount / numeric_or_default(first.nav, 1.0);

    let points = history
        .iter()
        .map(|h| SimulationPoint {
            date: h.history_date,
            label: format_label(h.history_date),
            value: units * numeric_or_default(h.nav, 0.0),
        })
        .collect();
    SimulationResult::from_points(points)
}

/// Invests `amount` once per calendar month at that month's first NAV.
pub fn sip(history: &[HistoryPoint], amount: f64) -> SimulationResult {
    let mut total_units = 0.0;
    let points = monthly_downsample(history)
        .into_iter()
        .map(|h| {
            let nav = numeric_or_default(h.nav, 1.0);
            total_units += amount / nav;
            SimulationPoint {
                date: h.history_date,
                label: format_label(h.history_date),
                value: total_units * nav,
            }
        })
        .collect();
    SimulationResult::from_points(points)
}

/// Narrows `history` to `window` and replays it under `strategy`.
pub fn simulate(
    history: &[HistoryPoint],
    strategy: Strategy,
    amount: f64,
    window: WindowToken,
    now: DateTime<Utc>,
) -> SimulationResult {
    let windowed = filter_by_window(history, window, now);
    let result = match strategy {
        Strategy::Lumpsum => lumpsum(&windowed, amount),
        Strategy::Sip => sip(&windowed, amount),
    };
    debug!(
        "Simulated {strategy} of {amount} over {window}: {} points, final value {}",
        result.points.len(),
        result.final_value
    );
    result
}
