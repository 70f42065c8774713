//! SBTi trajectory analysis.
//!
//! Anchors an Absolute Contraction Approach target path at the base year,
//! fits the historical emissions trend, and estimates the probability of
//! meeting the horizon-year target. Sparse or missing history degrades to
//! an invalid fit and a zero probability rather than an error.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::monte_carlo::achievement_probability;
use super::regression::{fit_log_linear, LogLinearFit};
use crate::error::CarbonAnalyticsError;
use crate::types::{CompanyEmissionsRecord, EmissionsHistoryRow, ScopeSelection};
use crate::CarbonAnalyticsResult;

fn default_base_year() -> i32 {
    2021
}

fn default_reduction_rate() -> f64 {
    0.042
}

fn default_horizon_year() -> i32 {
    2030
}

fn default_trials() -> u32 {
    10_000
}

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

/// Parameters of the science-based target model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SbtiConfig {
    /// Base year anchoring the target path.
    #[serde(default = "default_base_year")]
    pub base_year: i32,
    /// Absolute Contraction Approach annual reduction (1.5C-aligned).
    #[serde(default = "default_reduction_rate")]
    pub annual_reduction_rate: f64,
    #[serde(default = "default_horizon_year")]
    pub horizon_year: i32,
    /// Monte Carlo paths behind the achievement probability.
    #[serde(default = "default_trials")]
    pub trials: u32,
    /// Fixed seed for reproducible simulation; entropy when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SbtiConfig {
    fn default() -> Self {
        SbtiConfig {
            base_year: default_base_year(),
            annual_reduction_rate: default_reduction_rate(),
            horizon_year: default_horizon_year(),
            trials: default_trials(),
            seed: None,
        }
    }
}

/// One year on the trajectory chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub year: i32,
    /// Recorded emissions; absent for years without a history row.
    pub actual: Option<i64>,
    /// Trend forecast; suppressed before the last recorded year so the line
    /// continues from the actuals.
    pub forecast: Option<i64>,
    /// Target-path level, floored at zero.
    pub sbti: i64,
    pub is_history: bool,
}

/// Full output of the trajectory analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SbtiAnalysis {
    pub base_year: i32,
    pub base_emission: f64,
    pub latest_data_year: i32,
    /// Scope 3 is selected and at least one history row reports it.
    pub has_scope3: bool,
    /// Allowed emissions at the latest data year under the target path.
    pub target_emission_now: f64,
    /// Current-period emissions from the company record, which may
    /// legitimately differ from the last history row.
    pub actual_emission_now: f64,
    /// Reduction achieved vs the base year, percent.
    pub actual_reduction_pct: f64,
    /// Reduction the target path requires by the latest data year, percent.
    pub target_reduction_pct: f64,
    /// round(actual - target); positive means behind the path.
    pub gap: i64,
    pub is_ahead: bool,
    pub regression: LogLinearFit,
    /// Fitted annual change, percent. Negative is a reduction.
    pub implied_annual_rate_pct: f64,
    /// Fitted rate minus the required rate; positive means reducing too
    /// slowly.
    pub speed_gap_pct: f64,
    pub required_acceleration_pct: f64,
    /// Allowed emissions at the horizon year, floored at zero.
    pub sbti_target_horizon: f64,
    /// Monte Carlo estimate, percent. Zero when the fit is invalid.
    pub achievement_probability: u32,
    pub trajectory: Vec<TrajectoryPoint>,
}

// ---------------------------------------------------------------------------
// Core calculation
// ---------------------------------------------------------------------------

/// Run the full trajectory analysis for one company.
pub fn run_sbti_analysis(
    company: &CompanyEmissionsRecord,
    history: &[EmissionsHistoryRow],
    scopes: ScopeSelection,
    config: &SbtiConfig,
) -> CarbonAnalyticsResult<SbtiAnalysis> {
    validate_sbti_input(history, config)?;

    let mut rows: Vec<EmissionsHistoryRow> = history.to_vec();
    rows.sort_by_key(|r| r.year);

    let has_scope3 = scopes.s3 && rows.iter().any(|r| r.scope3 > 0.0);

    // Base-year emissions anchor the whole target path: the base-year row
    // when present, else the earliest row, else the current-period record.
    let (base_emission, latest_data_year) = match (rows.first(), rows.last()) {
        (Some(first), Some(last)) => {
            let base = rows
                .iter()
                .find(|r| r.year == config.base_year)
                .unwrap_or(first);
            (base.scoped_total(&scopes), last.year)
        }
        _ => (
            company.scoped_total_f64(&scopes),
            chrono::Utc::now().year(),
        ),
    };

    let years_elapsed = f64::from(latest_data_year - config.base_year);
    let target_emission_now =
        (base_emission * (1.0 - config.annual_reduction_rate * years_elapsed)).max(0.0);

    let actual_emission_now = company.scoped_total_f64(&scopes);
    let actual_reduction_pct = if base_emission > 0.0 {
        (base_emission - actual_emission_now) / base_emission * 100.0
    } else {
        0.0
    };
    let target_reduction_pct = config.annual_reduction_rate * years_elapsed * 100.0;
    let gap = (actual_emission_now - target_emission_now).round() as i64;
    let is_ahead = gap <= 0;

    let points: Vec<(i32, f64)> = rows
        .iter()
        .map(|r| (r.year, r.scoped_total(&scopes)))
        .collect();
    let regression = fit_log_linear(&points, -config.annual_reduction_rate);

    let implied_annual_rate_pct = regression.implied_annual_rate() * 100.0;
    let speed_gap_pct = implied_annual_rate_pct + config.annual_reduction_rate * 100.0;
    let required_acceleration_pct = speed_gap_pct.max(0.0);

    let horizon_span = f64::from(config.horizon_year - config.base_year);
    let sbti_target_horizon =
        (base_emission * (1.0 - config.annual_reduction_rate * horizon_span)).max(0.0);

    let achievement = achievement_probability(
        &regression,
        sbti_target_horizon,
        config.horizon_year,
        config.trials,
        config.seed,
    );

    let mut trajectory =
        Vec::with_capacity((config.horizon_year - config.base_year + 1).max(0) as usize);
    for year in config.base_year..=config.horizon_year {
        let span = f64::from(year - config.base_year);
        let sbti_val = (base_emission * (1.0 - config.annual_reduction_rate * span)).max(0.0);
        let actual = rows
            .iter()
            .find(|r| r.year == year)
            .map(|r| r.scoped_total(&scopes).round() as i64);
        // The forecast line starts at the last actual point so the chart
        // joins continuously.
        let forecast = if regression.n > 0 && year >= latest_data_year {
            Some(regression.level_at(year).round() as i64)
        } else {
            None
        };
        trajectory.push(TrajectoryPoint {
            year,
            actual,
            forecast,
            sbti: sbti_val.round() as i64,
            is_history: year <= latest_data_year,
        });
    }

    Ok(SbtiAnalysis {
        base_year: config.base_year,
        base_emission,
        latest_data_year,
        has_scope3,
        target_emission_now,
        actual_emission_now,
        actual_reduction_pct,
        target_reduction_pct,
        gap,
        is_ahead,
        regression,
        implied_annual_rate_pct,
        speed_gap_pct,
        required_acceleration_pct,
        sbti_target_horizon,
        achievement_probability: achievement,
        trajectory,
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_sbti_input(
    history: &[EmissionsHistoryRow],
    config: &SbtiConfig,
) -> CarbonAnalyticsResult<()> {
    if config.horizon_year < config.base_year {
        return Err(CarbonAnalyticsError::InvalidInput {
            field: "horizon_year".into(),
            reason: "Horizon year cannot precede the base year".into(),
        });
    }
    if !(0.0..=1.0).contains(&config.annual_reduction_rate) {
        return Err(CarbonAnalyticsError::InvalidInput {
            field: "annual_reduction_rate".into(),
            reason: "Annual reduction rate must be between 0 and 1".into(),
        });
    }
    for row in history {
        if row.scope1 < 0.0 || row.scope2 < 0.0 || row.scope3 < 0.0 {
            return Err(CarbonAnalyticsError::InvalidInput {
                field: format!("history[{}]", row.year),
                reason: "Scope emissions cannot be negative".into(),
            });
        }
    }
    let mut years: Vec<i32> = history.iter().map(|r| r.year).collect();
    years.sort_unstable();
    if years.windows(2).any(|w| w[0] == w[1]) {
        return Err(CarbonAnalyticsError::InvalidInput {
            field: "history".into(),
            reason: "At most one row per year".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
