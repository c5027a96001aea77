//! Trailing time windows over fund history

use crate::core::error::{EngineError, EngineResult};
use crate::core::fund::HistoryPoint;
use chrono::{DateTime, Datelike, Months, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;
use std::str::FromStr;
use tracing::debug;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub enum WindowToken {
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[default]
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "3y")]
    ThreeYears,
    #[serde(rename = "5y")]
    FiveYears,
}

impl Display for WindowToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                WindowToken::OneMonth => "1m",
                WindowToken::ThreeMonths => "3m",
                WindowToken::OneYear => "1y",
                WindowToken::ThreeYears => "3y",
                WindowToken::FiveYears => "5y",
            }
        )
    }
}

impl FromStr for WindowToken {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "1m" => Ok(WindowToken::OneMonth),
            "3m" => Ok(WindowToken::ThreeMonths),
            "1y" => Ok(WindowToken::OneYear),
            "3y" => Ok(WindowToken::ThreeYears),
            "5y" => Ok(WindowToken::FiveYears),
            _ => Err(EngineError::InvalidArgument(format!(
                "unknown window token: {s}"
            ))),
        }
    }
}

impl WindowToken {
    pub const ALL: [WindowToken; 5] = [
        WindowToken::OneMonth,
        WindowToken::ThreeMonths,
        WindowToken::OneYear,
        WindowToken::ThreeYears,
        WindowToken::FiveYears,
    ];

    /// Parses a token, falling back to the one year window for anything
    /// unrecognised.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_else(|e| {
            debug!("{e}; falling back to {}", WindowToken::default());
            WindowToken::default()
        })
    }

    /// Length of the window in calendar months.
    pub fn months(&self) -> u32 {
        match self {
            WindowToken::OneMonth => 1,
            WindowToken::ThreeMonths => 3,
            WindowToken::OneYear => 12,
            WindowToken::ThreeYears => 36,
            WindowToken::FiveYears => 60,
        }
    }

    /// Start of the window ending at `now`. Calendar arithmetic clamps to the
    /// last day of a shorter month, so 31 March minus one month is 29 or 28
    /// February.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_months(Months::new(self.months()))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Keeps the points dated strictly after the window's cutoff, sorted by date.
pub fn filter_by_window(
    history: &[HistoryPoint],
    token: WindowToken,
    now: DateTime<Utc>,
) -> Vec<HistoryPoint> {
    let cutoff = token.cutoff(now);
    let mut filtered: Vec<HistoryPoint> = history
        .iter()
        .filter(|h| h.history_date.and_time(NaiveTime::MIN).and_utc() > cutoff)
        .cloned()
        .collect();
    filtered.sort_by_key(|h| h.history_date);
    debug!(
        "Window {token} (cutoff {cutoff}) kept {} of {} points",
        filtered.len(),
        history.len()
    );
    filtered
}

/// One point per calendar month, the first one seen in input order.
pub fn monthly_downsample(history: &[HistoryPoint]) -> Vec<HistoryPoint> {
    let mut seen = HashSet::new();
    history
        .iter()
        .filter(|h| seen.insert((h.history_date.year(), h.history_date.month())))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn point(y: i32, m: u32, d: u32, nav: f64) -> HistoryPoint {
        HistoryPoint::new(date(y, m, d), nav)
    }

    fn midnight(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_window_token_parsing() {
        assert_eq!("1m".parse::<WindowToken>(), Ok(WindowToken::OneMonth));
        assert_eq!("3M".parse::<WindowToken>(), Ok(WindowToken::ThreeMonths));
        assert_eq!("5y".parse::<WindowToken>(), Ok(WindowToken::FiveYears));
        assert!(matches!(
            "10y".parse::<WindowToken>(),
            Err(EngineError::InvalidArgument(_))
        ));
        assert_eq!(WindowToken::parse_or_default("10y"), WindowToken::OneYear);
        assert_eq!(WindowToken::parse_or_default(""), WindowToken::OneYear);
        assert_eq!(WindowToken::parse_or_default("3y"), WindowToken::ThreeYears);
        for token in WindowToken::ALL {
            assert_eq!(token.to_string().parse::<WindowToken>(), Ok(token));
        }
    }

    #[test]
    fn test_cutoff_uses_calendar_arithmetic() {
        let now = midnight(2024, 3, 31);
        assert_eq!(WindowToken::OneMonth.cutoff(now), midnight(2024, 2, 29));
        assert_eq!(WindowToken::ThreeMonths.cutoff(now), midnight(2023, 12, 31));
        assert_eq!(WindowToken::OneYear.cutoff(now), midnight(2023, 3, 31));
        assert_eq!(WindowToken::FiveYears.cutoff(now), midnight(2019, 3, 31));

        let leap = midnight(2024, 2, 29);
        assert_eq!(WindowToken::OneYear.cutoff(leap), midnight(2023, 2, 28));
    }

    #[test]
    fn test_filter_by_window_sorts_and_filters() {
        let now = midnight(2024, 6, 15);
        let history = vec![
            point(2024, 6, 1, 12.0),
            point(2023, 1, 1, 8.0),
            point(2024, 1, 10, 10.0),
            point(2023, 9, 1, 9.0),
        ];

        let filtered = filter_by_window(&history, WindowToken::OneYear, now);
        let dates: Vec<_> = filtered.iter().map(|h| h.history_date).collect();
        assert_eq!(
            dates,
            vec![date(2023, 9, 1), date(2024, 1, 10), date(2024, 6, 1)]
        );

        let filtered = filter_by_window(&history, WindowToken::ThreeMonths, now);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].nav, Some(12.0));
    }

    #[test]
    fn test_filter_by_window_excludes_cutoff_boundary() {
        let now = midnight(2024, 6, 15);
        let history = vec![point(2024, 5, 15, 1.0), point(2024, 5, 16, 2.0)];

        let filtered = filter_by_window(&history, WindowToken::OneMonth, now);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].history_date, date(2024, 5, 16));
    }

    #[test]
    fn test_filter_by_window_time_of_day() {
        // A point dated on the cutoff day sits at midnight, which is before a
        // cutoff carrying the reference time of day.
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap();
        let history = vec![point(2024, 5, 15, 1.0), point(2024, 5, 16, 2.0)];

        let filtered = filter_by_window(&history, WindowToken::OneMonth, now);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].history_date, date(2024, 5, 16));
    }

    #[test]
    fn test_filter_by_window_is_subsequence() {
        let now = midnight(2024, 12, 31);
        let history: Vec<_> = (1..=12).rev().map(|m| point(2024, m, 5, m as f64)).collect();

        let filtered = filter_by_window(&history, WindowToken::FiveYears, now);
        assert_eq!(filtered.len(), history.len());
        assert!(
            filtered
                .windows(2)
                .all(|w| w[0].history_date < w[1].history_date)
        );
        assert!(filtered.iter().all(|p| history.contains(p)));
    }

    #[test]
    fn test_filter_by_window_empty() {
        let filtered = filter_by_window(&[], WindowToken::OneYear, midnight(2024, 1, 1));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_monthly_downsample_keeps_first_seen() {
        let history = vec![
            point(2024, 1, 3, 10.0),
            point(2024, 1, 20, 11.0),
            point(2024, 2, 1, 12.0),
            point(2024, 2, 28, 13.0),
            point(2025, 1, 2, 14.0),
        ];

        let monthly = monthly_downsample(&history);
        let navs: Vec<_> = monthly.iter().map(|h| h.nav.unwrap()).collect();
        assert_eq!(navs, vec![10.0, 12.0, 14.0]);
    }

    #[test]
    fn test_monthly_downsample_follows_input_order() {
        let history = vec![
            point(2024, 3, 10, 3.0),
            point(2024, 1, 10, 1.0),
            point(2024, 3, 1, 30.0),
            point(2024, 1, 1, 10.0),
        ];

        let monthly = monthly_downsample(&history);
        let navs: Vec<_> = monthly.iter().map(|h| h.nav.unwrap()).collect();
        assert_eq!(navs, vec![3.0, 1.0]);
    }

    #[test]
    fn test_monthly_downsample_empty() {
        assert!(monthly_downsample(&[]).is_empty());
    }
}
