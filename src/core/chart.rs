//! Reshapes windowed history into per-metric chart series

use crate::core::error::{EngineError, EngineResult};
use crate::core::fund::HistoryPoint;
use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Metric {
    Nav,
    Aum,
    StdDeviation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Axis {
    Primary,
    Secondary,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Nav, Metric::Aum, Metric::StdDeviation];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Nav => "NAV",
            Metric::Aum => "AUM",
            Metric::StdDeviation => "Std Deviation",
        }
    }

    /// Axis the metric is plotted on in the combined chart.
    pub fn axis(&self) -> Axis {
        match self {
            Metric::Nav | Metric::Aum => Axis::Primary,
            Metric::StdDeviation => Axis::Secondary,
        }
    }

    pub fn value_of(&self, point: &HistoryPoint) -> Option<f64> {
        match self {
            Metric::Nav => point.nav,
            Metric::Aum => point.aum,
            Metric::StdDeviation => point.std_deviation,
        }
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Metric::Nav => "nav",
                Metric::Aum => "aum",
                Metric::StdDeviation => "std_deviation",
            }
        )
    }
}

impl FromStr for Metric {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        match s {
            "nav" => Ok(Metric::Nav),
            "aum" => Ok(Metric::Aum),
            "std_deviation" => Ok(Metric::StdDeviation),
            _ => Err(EngineError::InvalidArgument(format!("unknown metric: {s}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub metric: Metric,
    pub label: &'static str,
    pub axis: Axis,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn date_labels(history: &[HistoryPoint]) -> Vec<String> {
    history
        .iter()
        .map(|h| h.history_date.format("%Y-%m-%d").to_string())
        .collect()
}

fn build_series(history: &[HistoryPoint], metric: Metric, axis: Axis) -> Series {
    Series {
        metric,
        label: metric.label(),
        axis,
        labels: date_labels(history),
        values: history
            .iter()
            .map(|h| metric.value_of(h).unwrap_or(0.0))
            .collect(),
    }
}

/// A single metric on the primary axis.
pub fn project_series(history: &[HistoryPoint], metric: Metric) -> Series {
    build_series(history, metric, Axis::Primary)
}

/// Same as [`project_series`] but takes the metric by name.
pub fn project_series_by_name(
    history: &[HistoryPoint],
    metric: &str,
) -> EngineResult<Series> {
    Ok(project_series(history, metric.parse()?))
}

/// NAV and AUM on the primary axis, standard deviation on the secondary one.
pub fn combined_series(history: &[HistoryPoint]) -> Vec<Series> {
    Metric::ALL
        .iter()
        .map(|metric| build_series(history, *metric, metric.axis()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn history() -> Vec<HistoryPoint> {
        vec![
            HistoryPoint {
                history_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                nav: Some(10.0),
                aum: Some(500.0),
                std_deviation: Some(4.5),
            },
            HistoryPoint {
                history_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                nav: Some(10.5),
                aum: None,
                std_deviation: Some(4.7),
            },
        ]
    }

    #[test]
    fn test_project_series() {
        let series = project_series(&history(), Metric::Aum);

        assert_eq!(series.label, "AUM");
        assert_eq!(series.axis, Axis::Primary);
        assert_eq!(series.labels, vec!["2024-01-01", "2024-01-02"]);
        assert_eq!(series.values, vec![500.0, 0.0]);
    }

    #[test]
    fn test_project_series_by_name() {
        let series = project_series_by_name(&history(), "std_deviation").unwrap();
        assert_eq!(series.metric, Metric::StdDeviation);
        assert_eq!(series.values, vec![4.5, 4.7]);

        let err = project_series_by_name(&history(), "beta").unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidArgument("unknown metric: beta".to_string())
        );
    }

    #[test]
    fn test_combined_series_axes() {
        let input = history();
        let series = combined_series(&input);

        assert_eq!(series.len(), 3);
        let axes: Vec<_> = series.iter().map(|s| s.axis).collect();
        assert_eq!(axes, vec![Axis::Primary, Axis::Primary, Axis::Secondary]);
        for s in &series {
            assert_eq!(s.len(), input.len());
            assert_eq!(s.labels[1], "2024-01-02");
        }
        assert_eq!(series[0].values, vec![10.0, 10.5]);
    }

    #[test]
    fn test_empty_history() {
        assert!(project_series(&[], Metric::Nav).is_empty());
        assert!(combined_series(&[]).iter().all(Series::is_empty));
    }
}
