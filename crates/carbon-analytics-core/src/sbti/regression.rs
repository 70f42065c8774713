//! Log-linear emissions trend fitting.
//!
//! Fits `log(E_t) = alpha + beta * t` by ordinary least squares over the
//! positive-emission history points. A single point anchors a fixed-slope
//! line instead (no confidence interval obtainable); zero points leave the
//! fit invalid with zeroed coefficients.
//!
//! Statistics run in `f64`, like the Monte Carlo layer they feed.

use serde::{Deserialize, Serialize};

/// OLS fit of log-emissions on calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogLinearFit {
    /// True only when two or more positive points were available.
    pub valid: bool,
    /// Number of points used.
    pub n: usize,
    pub alpha: f64,
    pub beta: f64,
    pub mean_year: f64,
    /// Sum of squared year deviations.
    pub s_tt: f64,
    /// Residual standard deviation; 0 unless n > 2.
    pub residual_std_dev: f64,
    /// Standard error of the slope.
    pub se_beta: f64,
}

impl LogLinearFit {
    /// The no-data fit: invalid, all coefficients zero.
    pub fn invalid() -> Self {
        LogLinearFit {
            valid: false,
            n: 0,
            alpha: 0.0,
            beta: 0.0,
            mean_year: 0.0,
            s_tt: 0.0,
            residual_std_dev: 0.0,
            se_beta: 0.0,
        }
    }

    /// Fitted emissions level at `year`.
    pub fn level_at(&self, year: i32) -> f64 {
        (self.alpha + self.beta * f64::from(year)).exp()
    }

    /// Proportional annual change implied by the log-slope.
    pub fn implied_annual_rate(&self) -> f64 {
        self.beta.exp() - 1.0
    }
}

/// Fit the trend over `(year, emissions)` points, ignoring non-positive
/// emissions.
///
/// `fallback_slope` is the log-slope used when exactly one usable point
/// exists: the line is anchored at that point and the fit flagged invalid.
pub fn fit_log_linear(points: &[(i32, f64)], fallback_slope: f64) -> LogLinearFit {
    let pts: Vec<(f64, f64)> = points
        .iter()
        .filter(|&&(_, e)| e > 0.0)
        .map(|&(y, e)| (f64::from(y), e.ln()))
        .collect();

    match pts.len() {
        0 => LogLinearFit::invalid(),
        1 => {
            let (t0, y0) = pts[0];
            LogLinearFit {
                valid: false,
                n: 1,
                alpha: y0 - fallback_slope * t0,
                beta: fallback_slope,
                mean_year: t0,
                s_tt: 0.0,
                residual_std_dev: 0.0,
                se_beta: 0.0,
            }
        }
        n => {
            let nf = n as f64;
            let mean_t = pts.iter().map(|&(t, _)| t).sum::<f64>() / nf;
            let mean_y = pts.iter().map(|&(_, y)| y).sum::<f64>() / nf;
            let s_tt: f64 = pts.iter().map(|&(t, _)| (t - mean_t).powi(2)).sum();
            let s_ty: f64 = pts
                .iter()
                .map(|&(t, y)| (t - mean_t) * (y - mean_y))
                .sum();
            let beta = if s_tt > 0.0 { s_ty / s_tt } else { 0.0 };
            let alpha = mean_y - beta * mean_t;
            let ssr: f64 = pts
                .iter()
                .map(|&(t, y)| (y - (alpha + beta * t)).powi(2))
                .sum();
            let residual_std_dev = if n > 2 { (ssr / (nf - 2.0)).sqrt() } else { 0.0 };
            let se_beta = if s_tt > 0.0 {
                (residual_std_dev.powi(2) / s_tt).sqrt()
            } else {
                0.0
            };
            LogLinearFit {
                valid: true,
                n,
                alpha,
                beta,
                mean_year: mean_t,
                s_tt,
                residual_std_dev,
                se_beta,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Perfectly exponential series: emissions = 1000 * 0.958^(year - 2021).
    fn exponential_history() -> Vec<(i32, f64)> {
        (2021..=2025)
            .map(|y| (y, 1000.0 * 0.958_f64.powi(y - 2021)))
            .collect()
    }

    #[test]
    fn test_exact_exponential_recovers_slope() {
        let fit = fit_log_linear(&exponential_history(), -0.042);
        assert!(fit.valid);
        assert_eq!(fit.n, 5);
        assert!((fit.beta - 0.958_f64.ln()).abs() < 1e-6, "beta={}", fit.beta);
        // No residual spread on an exact fit.
        assert!(fit.residual_std_dev < 1e-9);
        assert!(fit.se_beta < 1e-9);
    }

    #[test]
    fn test_level_at_reproduces_inputs() {
        let fit = fit_log_linear(&exponential_history(), -0.042);
        for (year, emissions) in exponential_history() {
            assert!((fit.level_at(year) - emissions).abs() < 1e-6);
        }
    }

    #[test]
    fn test_implied_annual_rate() {
        let fit = fit_log_linear(&exponential_history(), -0.042);
        // exp(ln(0.958)) - 1 = -0.042
        assert!((fit.implied_annual_rate() - (0.958 - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_single_point_anchored_fallback() {
        let fit = fit_log_linear(&[(2023, 150_000.0)], -0.042);
        assert!(!fit.valid);
        assert_eq!(fit.n, 1);
        assert_eq!(fit.beta, -0.042);
        // Line passes through the anchor and declines at the fixed rate.
        assert!((fit.level_at(2023) - 150_000.0).abs() < 1e-6);
        assert!(fit.level_at(2024) < 150_000.0);
    }

    #[test]
    fn test_empty_history_invalid() {
        let fit = fit_log_linear(&[], -0.042);
        assert!(!fit.valid);
        assert_eq!(fit.n, 0);
        assert_eq!(fit.beta, 0.0);
        assert_eq!(fit.alpha, 0.0);
    }

    #[test]
    fn test_non_positive_points_filtered() {
        let fit = fit_log_linear(&[(2021, 0.0), (2022, -5.0), (2023, 120_000.0)], -0.042);
        // Only the 2023 point survives; anchored fallback applies.
        assert!(!fit.valid);
        assert_eq!(fit.n, 1);
        assert_eq!(fit.mean_year, 2023.0);
    }

    #[test]
    fn test_two_points_exact_line_no_spread() {
        let fit = fit_log_linear(&[(2021, 100_000.0), (2024, 80_000.0)], -0.042);
        assert!(fit.valid);
        assert_eq!(fit.n, 2);
        // n == 2 leaves no residual degrees of freedom.
        assert_eq!(fit.residual_std_dev, 0.0);
        assert_eq!(fit.se_beta, 0.0);
        assert!((fit.level_at(2021) - 100_000.0).abs() < 1e-6);
        assert!((fit.level_at(2024) - 80_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_noisy_fit_has_positive_spread() {
        let points = vec![
            (2020, 210_000.0),
            (2021, 200_000.0),
            (2022, 185_000.0),
            (2023, 190_000.0),
            (2024, 170_000.0),
        ];
        let fit = fit_log_linear(&points, -0.042);
        assert!(fit.valid);
        assert!(fit.beta < 0.0);
        assert!(fit.residual_std_dev > 0.0);
        assert!(fit.se_beta > 0.0);
    }
}
