//! Risk scoring and the display grades derived from fund metrics.
//!
//! The score blends volatility, risk-adjusted returns and fund size into a
//! single number in `[0, 100]`. Every threshold lives in an ordered table so
//! the bands can be tuned from configuration without touching the logic.

use crate::core::fund::FundRecord;
use crate::core::numeric::numeric_or_default;
use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Weights of the four sub-scores. They are expected to sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskWeights {
    pub std_deviation: f64,
    pub sharpe: f64,
    pub sortino: f64,
    pub equity_size: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            std_deviation: 0.40,
            sharpe: 0.25,
            sortino: 0.25,
            equity_size: 0.10,
        }
    }
}

impl RiskWeights {
    pub fn total(&self) -> f64 {
        self.std_deviation + self.sharpe + self.sortino + self.equity_size
    }
}

/// An `(upper_bound, risk)` row: equity sizes below `upper_bound` carry `risk`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquitySizeTier {
    pub below: f64,
    pub risk: f64,
}

const WEIGHT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskModel {
    /// Standard deviation at which volatility risk saturates.
    pub std_deviation_ceiling: f64,
    /// Sharpe and Sortino ratios at or above this carry no risk.
    pub ratio_ceiling: f64,
    /// Ascending by `below`; the first matching tier wins.
    pub equity_size_tiers: Vec<EquitySizeTier>,
    /// Risk for funds larger than every tier.
    pub large_fund_risk: f64,
    pub weights: RiskWeights,
}

impl Default for RiskModel {
    fn default() -> Self {
        Self {
            std_deviation_ceiling: 20.0,
            ratio_ceiling: 3.0,
            equity_size_tiers: vec![
                EquitySizeTier {
                    below: 1000.0,
                    risk: 0.8,
                },
                EquitySizeTier {
                    below: 10000.0,
                    risk: 0.4,
                },
            ],
            large_fund_risk: 0.1,
            weights: RiskWeights::default(),
        }
    }
}

impl RiskModel {
    /// Risk score in `[0, 100]`. Missing or non-numeric metrics count as zero.
    pub fn score(&self, fund: &FundRecord) -> f64 {
        let std_dev = numeric_or_default(fund.std_deviation, 0.0);
        let sharpe = numeric_or_default(fund.sharpe_ratio, 0.0);
        let sortino = numeric_or_default(fund.sortino_ratio, 0.0);
        let equity_size = numeric_or_default(fund.equity_size, 0.0);

        let norm_std_dev = (std_dev / self.std_deviation_ceiling).min(1.0);
        let norm_sharpe = self.normalize_ratio(sharpe);
        let norm_sortino = self.normalize_ratio(sortino);
        let size_risk = self.equity_size_risk(equity_size);

        let w = &self.weights;
        let score = 100.0
            * (w.std_deviation * norm_std_dev
                + w.sharpe * norm_sharpe
                + w.sortino * norm_sortino
                + w.equity_size * size_risk);

        // f64::max drops a NaN operand, so NaN collapses to 0
        score.max(0.0).min(100.0)
    }

    fn normalize_ratio(&self, ratio: f64) -> f64 {
        ((self.ratio_ceiling - ratio) / self.ratio_ceiling)
            .max(0.0)
            .min(1.0)
    }

    /// Rejects models whose weights do not sum to one, whose tiers are not
    /// strictly ascending, or whose ceilings or risks are out of range.
    pub fn validate(&self) -> Result<()> {
        for (name, ceiling) in [
            ("std_deviation_ceiling", self.std_deviation_ceiling),
            ("ratio_ceiling", self.ratio_ceiling),
        ] {
            ensure!(
                ceiling.is_finite() && ceiling > 0.0,
                "{name} must be positive and finite, got {ceiling}"
            );
        }

        let w = &self.weights;
        for (name, weight) in [
            ("std_deviation", w.std_deviation),
            ("sharpe", w.sharpe),
            ("sortino", w.sortino),
            ("equity_size", w.equity_size),
        ] {
            ensure!(
                weight.is_finite() && weight >= 0.0,
                "weight {name} must be a non-negative number, got {weight}"
            );
        }
        let total = w.total();
        ensure!(
            (total - 1.0).abs() <= WEIGHT_TOLERANCE,
            "weights must sum to 1, got {total}"
        );

        for pair in self.equity_size_tiers.windows(2) {
            ensure!(
                pair[0].below < pair[1].below,
                "equity_size_tiers must be strictly ascending by `below`, got {} before {}",
                pair[0].below,
                pair[1].below
            );
        }
        let risks = self
            .equity_size_tiers
            .iter()
            .map(|tier| tier.risk)
            .chain([self.large_fund_risk]);
        for risk in risks {
            ensure!(
                (0.0..=1.0).contains(&risk),
                "equity size risk must be within [0, 1], got {risk}"
            );
        }
        Ok(())
    }

    pub fn equity_size_risk(&self, equity_size: f64) -> f64 {
        self.equity_size_tiers
            .iter()
            .find(|tier| equity_size < tier.below)
            .map_or(self.large_fund_risk, |tier| tier.risk)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    Low,
    Moderate,
    ModeratelyHigh,
    High,
    VeryHigh,
}

/// Inclusive upper bounds; scores above the last row are `VeryHigh`.
const RISK_LEVEL_BANDS: [(f64, RiskLevel); 4] = [
    (20.0, RiskLevel::Low),
    (40.0, RiskLevel::Moderate),
    (60.0, RiskLevel::ModeratelyHigh),
    (80.0, RiskLevel::High),
];

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        RISK_LEVEL_BANDS
            .iter()
            .find(|(upper, _)| score <= *upper)
            .map_or(RiskLevel::VeryHigh, |(_, level)| *level)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::ModeratelyHigh => "MODERATELY HIGH",
            RiskLevel::High => "HIGH",
            RiskLevel::VeryHigh => "VERY HIGH",
        }
    }

    /// Foreground and background colors as hex strings.
    pub fn colors(&self) -> (&'static str, &'static str) {
        match self {
            RiskLevel::Low => ("#22c55e", "#dcfce7"),
            RiskLevel::Moderate => ("#eab308", "#fef3c7"),
            RiskLevel::ModeratelyHigh => ("#f97316", "#fed7aa"),
            RiskLevel::High => ("#ef4444", "#fecaca"),
            RiskLevel::VeryHigh => ("#dc2626", "#fecaca"),
        }
    }

    pub fn color(&self) -> &'static str {
        self.colors().0
    }
}

impl Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapSize {
    Small,
    Mid,
    Large,
}

/// Inclusive lower bounds, largest first.
const CAP_SIZE_BANDS: [(f64, CapSize); 2] = [(10000.0, CapSize::Large), (1000.0, CapSize::Mid)];

pub fn cap_label(equity_size: f64) -> CapSize {
    CAP_SIZE_BANDS
        .iter()
        .find(|(lower, _)| equity_size >= *lower)
        .map_or(CapSize::Small, |(_, cap)| *cap)
}

impl Display for CapSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CapSize::Small => "small-cap",
                CapSize::Mid => "mid-cap",
                CapSize::Large => "large-cap",
            }
        )
    }
}

/// Volatility badge shown next to the standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StdDevRisk {
    Low,
    Medium,
    High,
}

/// Exclusive upper bounds.
const STD_DEV_BANDS: [(f64, StdDevRisk); 2] = [(5.0, StdDevRisk::Low), (15.0, StdDevRisk::Medium)];

impl StdDevRisk {
    pub fn from_std_deviation(std_deviation: f64) -> Self {
        STD_DEV_BANDS
            .iter()
            .find(|(upper, _)| std_deviation < *upper)
            .map_or(StdDevRisk::High, |(_, risk)| *risk)
    }

    pub fn label(&self) -> &'static str {
        match self {
            StdDevRisk::Low => "Low Risk",
            StdDevRisk::Medium => "Medium Risk",
            StdDevRisk::High => "High Risk",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            StdDevRisk::Low => "#28a745",
            StdDevRisk::Medium => "#ffc107",
            StdDevRisk::High => "#dc3545",
        }
    }
}

/// Grade for a risk-adjusted return ratio (Sharpe or Sortino).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatioGrade {
    Good,
    Fair,
    Poor,
}

impl RatioGrade {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 2.0 {
            RatioGrade::Good
        } else if ratio >= 1.0 {
            RatioGrade::Fair
        } else {
            RatioGrade::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RatioGrade::Good => "Good",
            RatioGrade::Fair => "Fair",
            RatioGrade::Poor => "Poor",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RatioGrade::Good => "#28a745",
            RatioGrade::Fair => "#ffc107",
            RatioGrade::Poor => "#dc3545",
        }
    }
}

/// Sharpe badge on the fund list: above 1 is good, within 0.2 of 1 is
/// borderline, anything else (missing included) is weak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SharpeBadge {
    Strong,
    Borderline,
    Weak,
}

impl SharpeBadge {
    pub fn from_ratio(ratio: Option<f64>) -> Self {
        match ratio {
            Some(s) if s > 1.0 => SharpeBadge::Strong,
            Some(s) if (s - 1.0).abs() <= 0.2 => SharpeBadge::Borderline,
            _ => SharpeBadge::Weak,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            SharpeBadge::Strong => "#28a745",
            SharpeBadge::Borderline => "#ffc107",
            SharpeBadge::Weak => "#dc3545",
        }
    }
}
