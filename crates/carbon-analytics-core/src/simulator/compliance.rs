//! ETS compliance-cost simulation.
//!
//! Covers:
//! 1. **Net exposure** -- scenario-adjusted emissions minus adjusted free
//!    allocation minus the reductions realized this year.
//! 2. **Compliance cost** -- exposure priced under low/base/high and the
//!    currently selected price.
//! 3. **Abatement cost** -- spend on the levers realizable this year.
//! 4. **Profit impact** -- total carbon cost against estimated operating profit.
//! 5. **Effective carbon price** -- blended cost per tonne handled.
//! 6. **Strategy comparison** -- abatement-first vs buy-all vs apply-all.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::scenarios::{
    default_reduction_options, AllocationScenario, PriceScenario, PriceScenarioTable,
    ReductionOption,
};
use super::strategy::{compare_strategies, StrategyDetail};
use crate::error::CarbonAnalyticsError;
use crate::types::{CompanyEmissionsRecord, Money, Rate, Tonnes};
use crate::CarbonAnalyticsResult;

fn default_free_allocation_rate() -> Rate {
    dec!(0.9)
}

fn default_operating_margin() -> Rate {
    dec!(0.08)
}

fn default_price_scenario() -> PriceScenario {
    PriceScenario::Base
}

fn default_allocation_scenario() -> AllocationScenario {
    AllocationScenario::Maintain
}

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

/// Scenario levers for one simulation run.
///
/// Everything the dashboard lets the user toggle, captured as one immutable
/// configuration value so the engine stays free of ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtsScenarioConfig {
    #[serde(default = "default_price_scenario")]
    pub price_scenario: PriceScenario,
    /// Required when `price_scenario` is `Custom` (KRW/t).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_price: Option<Money>,
    #[serde(default = "default_allocation_scenario")]
    pub allocation_scenario: AllocationScenario,
    /// Percentage shift applied to baseline scope 1+2 emissions. The UI
    /// suggests [-50, 50]; the engine accepts any value.
    #[serde(default)]
    pub emission_change_pct: Decimal,
    #[serde(default)]
    pub price_table: PriceScenarioTable,
    /// Share of `base_emissions` granted as free allocation.
    #[serde(default = "default_free_allocation_rate")]
    pub free_allocation_rate: Rate,
    /// Assumed operating margin behind the profit-impact figure.
    #[serde(default = "default_operating_margin")]
    pub operating_margin: Rate,
    #[serde(default = "default_reduction_options")]
    pub reduction_options: Vec<ReductionOption>,
}

impl Default for EtsScenarioConfig {
    fn default() -> Self {
        EtsScenarioConfig {
            price_scenario: default_price_scenario(),
            custom_price: None,
            allocation_scenario: default_allocation_scenario(),
            emission_change_pct: Decimal::ZERO,
            price_table: PriceScenarioTable::default(),
            free_allocation_rate: default_free_allocation_rate(),
            operating_margin: default_operating_margin(),
            reduction_options: default_reduction_options(),
        }
    }
}

impl EtsScenarioConfig {
    /// Per-tonne price implied by the selected scenario.
    pub fn resolve_price(&self) -> CarbonAnalyticsResult<Money> {
        match self.price_scenario {
            PriceScenario::Low => Ok(self.price_table.low),
            PriceScenario::Base => Ok(self.price_table.base),
            PriceScenario::High => Ok(self.price_table.high),
            PriceScenario::Custom => {
                self.custom_price
                    .ok_or_else(|| CarbonAnalyticsError::InvalidInput {
                        field: "custom_price".into(),
                        reason: "Custom price scenario selected without a price".into(),
                    })
            }
        }
    }
}

/// Full output bundle of the ETS simulator.
///
/// Derived data only; recomputed from scratch on every input change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Scope 1+2 emissions after the change scenario (whole tonnes).
    pub adjusted_emissions: Tonnes,
    /// Free allocation after the policy scenario (whole tonnes).
    pub adjusted_allocation: Tonnes,
    /// Enabled reductions landing this compliance year.
    pub this_year_reduction: Tonnes,
    /// Enabled reductions landing next year; excluded from this year's exposure.
    pub next_year_reduction: Tonnes,
    /// Tonnes that must be purchased. Never negative; surplus is not banked.
    pub net_exposure: Tonnes,
    pub compliance_cost_low: Money,
    pub compliance_cost_base: Money,
    pub compliance_cost_high: Money,
    /// Compliance cost at the selected scenario price.
    pub compliance_cost_current: Money,
    pub total_abatement_cost: Money,
    /// Compliance cost at the current price plus abatement cost.
    pub total_carbon_cost: Money,
    /// Revenue times the assumed operating margin.
    pub operating_profit: Money,
    /// Total carbon cost as a percentage of operating profit.
    pub profit_impact_pct: Decimal,
    /// Tonnes abatable this year below the current permit price, across the
    /// whole catalog.
    pub economic_abatement_potential: Tonnes,
    /// Blended cost per tonne handled via allocation, abatement, or purchase.
    pub effective_carbon_price: Money,
    pub strategies: Vec<StrategyDetail>,
    pub optimal_strategy_index: usize,
}

// ---------------------------------------------------------------------------
// Core calculation
// ---------------------------------------------------------------------------

/// Round to whole tonnes the way the dashboard does (half away from zero).
fn round_tonnes(x: Decimal) -> Decimal {
    x.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Run the multi-step compliance-cost simulation.
pub fn run_ets_simulation(
    company: &CompanyEmissionsRecord,
    config: &EtsScenarioConfig,
) -> CarbonAnalyticsResult<SimulationResult> {
    validate_simulation_input(company, config)?;

    let current_price = config.resolve_price()?;
    let unit = dec!(100_000_000);

    // Step 1: emission growth/contraction scenario
    let adjusted_emissions = round_tonnes(
        company.scope12() * (Decimal::ONE + config.emission_change_pct / dec!(100)),
    );

    // Step 2: free allocation under the policy scenario
    let adjusted_allocation = round_tonnes(
        company.base_emissions
            * config.free_allocation_rate
            * config.allocation_scenario.factor(),
    );

    // Step 3: realized reductions, split by the year they land. Next-year
    // levers contribute no cost this period.
    let mut this_year_reduction = Decimal::ZERO;
    let mut next_year_reduction = Decimal::ZERO;
    let mut total_abatement_cost = Decimal::ZERO;
    for opt in config.reduction_options.iter().filter(|o| o.enabled) {
        if opt.this_year_applicable {
            this_year_reduction += opt.annual_reduction;
            total_abatement_cost += opt.cost;
        } else {
            next_year_reduction += opt.annual_reduction;
        }
    }

    // Step 4: exposure floors at zero; excess coverage is not banked
    let net_exposure =
        (adjusted_emissions - adjusted_allocation - this_year_reduction).max(Decimal::ZERO);

    // Step 5: compliance cost per price scenario, scaled to 100M-won
    let compliance_cost_low = net_exposure * config.price_table.low / unit;
    let compliance_cost_base = net_exposure * config.price_table.base / unit;
    let compliance_cost_high = net_exposure * config.price_table.high / unit;
    let compliance_cost_current = net_exposure * current_price / unit;

    // Steps 6-7
    let total_carbon_cost = compliance_cost_current + total_abatement_cost;

    // Step 8: profit impact vs estimated operating profit
    let operating_profit = company.revenue * config.operating_margin;
    let profit_impact_pct = if operating_profit > Decimal::ZERO {
        total_carbon_cost / operating_profit * dec!(100)
    } else {
        Decimal::ZERO
    };

    // Step 9: levers cheaper than permits, across the full catalog
    let economic_abatement_potential: Tonnes = config
        .reduction_options
        .iter()
        .filter(|o| o.this_year_applicable && o.mac < current_price)
        .map(|o| o.annual_reduction)
        .sum();

    // Step 10: blended cost per tonne handled
    let handled = adjusted_allocation + this_year_reduction + net_exposure;
    let effective_carbon_price = if handled > Decimal::ZERO {
        total_carbon_cost * unit / handled
    } else {
        Decimal::ZERO
    };

    // Strategies compare alternative procurement choices from a common
    // baseline that ignores the reduction toggles.
    let base_net_exposure = (adjusted_emissions - adjusted_allocation).max(Decimal::ZERO);
    let (strategies, optimal_strategy_index) =
        compare_strategies(base_net_exposure, current_price, &config.reduction_options);

    Ok(SimulationResult {
        adjusted_emissions,
        adjusted_allocation,
        this_year_reduction,
        next_year_reduction,
        net_exposure,
        compliance_cost_low,
        compliance_cost_base,
        compliance_cost_high,
        compliance_cost_current,
        total_abatement_cost,
        total_carbon_cost,
        operating_profit,
        profit_impact_pct,
        economic_abatement_potential,
        effective_carbon_price,
        strategies,
        optimal_strategy_index,
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_simulation_input(
    company: &CompanyEmissionsRecord,
    config: &EtsScenarioConfig,
) -> CarbonAnalyticsResult<()> {
    if company.scope1 < Decimal::ZERO {
        return Err(CarbonAnalyticsError::InvalidInput {
            field: "scope1".into(),
            reason: "Scope 1 emissions cannot be negative".into(),
        });
    }
    if company.scope2 < Decimal::ZERO {
        return Err(CarbonAnalyticsError::InvalidInput {
            field: "scope2".into(),
            reason: "Scope 2 emissions cannot be negative".into(),
        });
    }
    if company.base_emissions < Decimal::ZERO {
        return Err(CarbonAnalyticsError::InvalidInput {
            field: "base_emissions".into(),
            reason: "Base emissions cannot be negative".into(),
        });
    }
    if company.revenue < Decimal::ZERO {
        return Err(CarbonAnalyticsError::InvalidInput {
            field: "revenue".into(),
            reason: "Revenue cannot be negative".into(),
        });
    }
    if config.price_table.low < Decimal::ZERO
        || config.price_table.base < Decimal::ZERO
        || config.price_table.high < Decimal::ZERO
    {
        return Err(CarbonAnalyticsError::InvalidInput {
            field: "price_table".into(),
            reason: "Scenario prices cannot be negative".into(),
        });
    }
    if let Some(price) = config.custom_price {
        if price < Decimal::ZERO {
            return Err(CarbonAnalyticsError::InvalidInput {
                field: "custom_price".into(),
                reason: "Custom price cannot be negative".into(),
            });
        }
    }
    if config.free_allocation_rate < Decimal::ZERO || config.free_allocation_rate > Decimal::ONE {
        return Err(CarbonAnalyticsError::InvalidInput {
            field: "free_allocation_rate".into(),
            reason: "Free allocation rate must be between 0 and 1".into(),
        });
    }
    if config.operating_margin < Decimal::ZERO || config.operating_margin > Decimal::ONE {
        return Err(CarbonAnalyticsError::InvalidInput {
            field: "operating_margin".into(),
            reason: "Operating margin must be between 0 and 1".into(),
        });
    }
    for opt in &config.reduction_options {
        if opt.annual_reduction < Decimal::ZERO {
            return Err(CarbonAnalyticsError::InvalidInput {
                field: format!("reduction_options[{}].annual_reduction", opt.id),
                reason: "Annual reduction cannot be negative".into(),
            });
        }
        if opt.cost < Decimal::ZERO {
            return Err(CarbonAnalyticsError::InvalidInput {
                field: format!("reduction_options[{}].cost", opt.id),
                reason: "Option cost cannot be negative".into(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
