//! Fund snapshot and history types, and the data provider abstraction

use crate::core::numeric::lenient_f64;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};

/// One fund's current snapshot as served by the fund API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundRecord {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amc_name: Option<String>,
    #[serde(default)]
    pub primary_badge: Option<String>,
    #[serde(default)]
    pub market_cap: Option<String>,
    #[serde(default)]
    pub lock_in_period: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub nav: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub aum: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub equity_size: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub std_deviation: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sharpe_ratio: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sortino_ratio: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cagr: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub high_return: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub low_return: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub beta: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub alpha: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub r_squared: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub expense_ratio: Option<f64>,
}

/// One dated observation of a fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    #[serde(deserialize_with = "calendar_date")]
    pub history_date: NaiveDate,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub nav: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub aum: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub std_deviation: Option<f64>,
}

impl HistoryPoint {
    pub fn new(history_date: NaiveDate, nav: f64) -> Self {
        Self {
            history_date,
            nav: Some(nav),
            aum: None,
            std_deviation: None,
        }
    }
}

/// Accepts `YYYY-MM-DD` or a full timestamp and keeps only the date part.
fn calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let date_part = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| D::Error::custom(format!("invalid history date '{raw}': {e}")))
}

#[async_trait]
pub trait FundProvider: Send + Sync {
    async fn list_funds(&self) -> Result<Vec<FundRecord>>;
    async fn fetch_fund(&self, id: u64) -> Result<FundRecord>;
    async fn fetch_history(&self, id: u64) -> Result<Vec<HistoryPoint>>;
}
