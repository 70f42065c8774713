//! Green capex investment appraisal.
//!
//! Weighs a decarbonization investment against the carbon-cost liability it
//! avoids plus the energy savings it unlocks: discounted break-even curve,
//! NPV, ROI, and interpolated payback period.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CarbonAnalyticsError;
use crate::types::{Money, Rate, Tonnes};
use crate::CarbonAnalyticsResult;

fn default_horizon_years() -> u32 {
    10
}

fn default_energy_cost_ratio() -> Rate {
    dec!(0.05)
}

/// Input for the green investment appraisal.
///
/// Monetary fields share one currency unit; the output stays in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreenInvestmentInput {
    /// Annual revenue.
    pub revenue: Money,
    /// Current annual emissions (tonnes).
    pub total_emissions: Tonnes,
    /// Upfront green capex.
    pub investment: Money,
    /// Carbon price per tonne used for the liability estimate.
    pub carbon_price: Money,
    /// Energy-cost saving unlocked by the investment (percent).
    pub energy_savings_pct: Decimal,
    /// Discount rate (percent).
    pub discount_rate_pct: Decimal,
    /// Years of carbon liability counted against the investment.
    pub timeline_years: u32,
    /// Years of the discounted break-even curve.
    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32,
    /// Energy cost as a share of revenue.
    #[serde(default = "default_energy_cost_ratio")]
    pub energy_cost_ratio: Rate,
}

/// One year on the break-even curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenPoint {
    pub year: u32,
    pub investment: Money,
    /// Discounted savings accumulated through this year, whole units.
    pub cumulative_savings: Money,
}

/// Output of the appraisal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreenInvestmentOutput {
    /// Annual carbon cost avoided: emissions times carbon price.
    pub annual_carbon_risk: Money,
    /// Carbon liability over the timeline.
    pub total_risk_liability: Money,
    pub annual_energy_savings: Money,
    /// Energy savings plus avoided carbon cost.
    pub annual_total_benefit: Money,
    pub npv: Money,
    pub roi_pct: Decimal,
    /// Interpolated payback in years; `None` when the investment does not
    /// pay back within the horizon.
    pub payback_years: Option<Decimal>,
    pub is_favorable: bool,
    pub break_even_curve: Vec<BreakEvenPoint>,
}

/// Appraise a green capex program against its carbon and energy benefits.
pub fn appraise_green_investment(
    input: &GreenInvestmentInput,
) -> CarbonAnalyticsResult<GreenInvestmentOutput> {
    validate_investment_input(input)?;

    let annual_carbon_risk = input.total_emissions * input.carbon_price;
    let total_risk_liability = annual_carbon_risk * Decimal::from(input.timeline_years);

    let estimated_energy_cost = input.revenue * input.energy_cost_ratio;
    let annual_energy_savings = estimated_energy_cost * input.energy_savings_pct / dec!(100);
    let annual_total_benefit = annual_energy_savings + annual_carbon_risk;

    let growth = Decimal::ONE + input.discount_rate_pct / dec!(100);

    let mut npv = -input.investment;
    let mut cumulative = Decimal::ZERO;
    let mut payback_years: Option<Decimal> = None;
    let mut break_even_curve = Vec::with_capacity(input.horizon_years as usize + 1);

    for year in 0..=input.horizon_years {
        if year > 0 {
            let discount_factor = growth.powi(i64::from(year));
            let savings = if discount_factor > Decimal::ZERO {
                annual_total_benefit / discount_factor
            } else {
                Decimal::ZERO
            };
            let previous = cumulative;
            cumulative += savings;
            npv += savings;

            if payback_years.is_none() && cumulative >= input.investment && savings > Decimal::ZERO
            {
                let remaining = input.investment - previous;
                payback_years = Some(Decimal::from(year - 1) + remaining / savings);
            }
        }
        break_even_curve.push(BreakEvenPoint {
            year,
            investment: input.investment,
            cumulative_savings: cumulative
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        });
    }

    let roi_pct = if input.investment > Decimal::ZERO {
        (cumulative - input.investment) / input.investment * dec!(100)
    } else {
        Decimal::ZERO
    };

    Ok(GreenInvestmentOutput {
        annual_carbon_risk,
        total_risk_liability,
        annual_energy_savings,
        annual_total_benefit,
        npv,
        roi_pct,
        payback_years,
        is_favorable: npv > Decimal::ZERO,
        break_even_curve,
    })
}

fn validate_investment_input(input: &GreenInvestmentInput) -> CarbonAnalyticsResult<()> {
    if input.total_emissions < Decimal::ZERO {
        return Err(CarbonAnalyticsError::InvalidInput {
            field: "total_emissions".into(),
            reason: "Emissions cannot be negative".into(),
        });
    }
    if input.investment < Decimal::ZERO {
        return Err(CarbonAnalyticsError::InvalidInput {
            field: "investment".into(),
            reason: "Investment cannot be negative".into(),
        });
    }
    if input.carbon_price < Decimal::ZERO {
        return Err(CarbonAnalyticsError::InvalidInput {
            field: "carbon_price".into(),
            reason: "Carbon price cannot be negative".into(),
        });
    }
    if input.revenue < Decimal::ZERO {
        return Err(CarbonAnalyticsError::InvalidInput {
            field: "revenue".into(),
            reason: "Revenue cannot be negative".into(),
        });
    }
    if input.discount_rate_pct <= dec!(-100) {
        return Err(CarbonAnalyticsError::InvalidInput {
            field: "discount_rate_pct".into(),
            reason: "Discount rate must exceed -100%".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn base_input() -> GreenInvestmentInput {
        GreenInvestmentInput {
            revenue: dec!(167_301),
            total_emissions: dec!(250_684),
            investment: dec!(7_621),
            carbon_price: dec!(0.00045), // 45,000 KRW/t in 100M-won units
            energy_savings_pct: dec!(12.5),
            discount_rate_pct: dec!(4.2),
            timeline_years: 5,
            horizon_years: 10,
            energy_cost_ratio: dec!(0.05),
        }
    }

    #[test]
    fn test_benefit_components() {
        let out = appraise_green_investment(&base_input()).unwrap();
        // 250,684t * 0.00045 = 112.8078
        assert_eq!(out.annual_carbon_risk, dec!(112.80780));
        assert_eq!(out.total_risk_liability, dec!(564.03900));
        // 167,301 * 0.05 * 0.125 = 1,045.63125
        assert_eq!(out.annual_energy_savings, dec!(1045.63125));
        assert_eq!(
            out.annual_total_benefit,
            out.annual_energy_savings + out.annual_carbon_risk
        );
    }

    #[test]
    fn test_break_even_curve_shape() {
        let out = appraise_green_investment(&base_input()).unwrap();
        assert_eq!(out.break_even_curve.len(), 11); // Y0..Y10
        assert_eq!(out.break_even_curve[0].cumulative_savings, Decimal::ZERO);
        for pair in out.break_even_curve.windows(2) {
            assert!(pair[1].cumulative_savings >= pair[0].cumulative_savings);
        }
    }

    #[test]
    fn test_payback_interpolation() {
        let out = appraise_green_investment(&base_input()).unwrap();
        // Benefit ~1,158/yr against 7,621 invested: payback lands in year 7-8.
        let payback = out.payback_years.unwrap();
        assert!(payback > dec!(6.5), "payback={payback}");
        assert!(payback < dec!(8.0), "payback={payback}");
        assert!(out.is_favorable);
        assert!(out.npv > Decimal::ZERO);
        assert!(out.roi_pct > Decimal::ZERO);
    }

    #[test]
    fn test_no_payback_within_horizon() {
        let mut input = base_input();
        input.investment = dec!(50_000);
        let out = appraise_green_investment(&input).unwrap();
        assert_eq!(out.payback_years, None);
        assert!(!out.is_favorable);
        assert!(out.npv < Decimal::ZERO);
        assert!(out.roi_pct < Decimal::ZERO);
    }

    #[test]
    fn test_zero_benefit_never_pays_back() {
        let mut input = base_input();
        input.total_emissions = Decimal::ZERO;
        input.energy_savings_pct = Decimal::ZERO;
        let out = appraise_green_investment(&input).unwrap();
        assert_eq!(out.annual_total_benefit, Decimal::ZERO);
        assert_eq!(out.payback_years, None);
        assert_eq!(out.npv, -dec!(7_621));
    }

    #[test]
    fn test_discounting_reduces_later_savings() {
        let out = appraise_green_investment(&base_input()).unwrap();
        let y1 = out.break_even_curve[1].cumulative_savings;
        let y2 = out.break_even_curve[2].cumulative_savings - y1;
        // The year-2 increment is smaller after rounding noise.
        assert!(y2 <= y1);
    }

    #[test]
    fn test_zero_investment_roi_guarded() {
        let mut input = base_input();
        input.investment = Decimal::ZERO;
        let out = appraise_green_investment(&input).unwrap();
        assert_eq!(out.roi_pct, Decimal::ZERO);
        // Payback is immediate in year 1 once any savings accrue.
        assert!(out.payback_years.is_some());
    }

    #[test]
    fn test_negative_inputs_rejected() {
        let mut input = base_input();
        input.carbon_price = dec!(-1);
        assert!(appraise_green_investment(&input).is_err());
    }
}
