//! Procurement strategy comparison.
//!
//! Three fixed strategies are priced from a common baseline exposure that
//! ignores the user's reduction toggles: the strategies ARE the choice of
//! whether and how much to abate.
//!
//! - **A (abatement-first)** -- exercise every this-year lever priced below
//!   the market, buy the rest.
//! - **B (buy-all)** -- no abatement, buy the full exposure.
//! - **C (apply-all)** -- exercise every this-year lever regardless of
//!   economics, buy the rest.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::scenarios::ReductionOption;
use crate::types::{Money, Tonnes};

/// One priced procurement strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyDetail {
    /// Single-letter tag: "A", "B", "C".
    pub name: String,
    pub label: String,
    pub compliance_cost: Money,
    pub abatement_cost: Money,
    pub total_cost: Money,
    pub applied_reductions: Vec<String>,
    pub purchase_volume: Tonnes,
    /// One-line account of the computation, regenerable from the numeric fields.
    pub explanation: String,
}

/// Price the three fixed strategies against `base_net_exposure` and return
/// them with the index of the cheapest (first wins ties).
pub fn compare_strategies(
    base_net_exposure: Tonnes,
    current_price: Money,
    options: &[ReductionOption],
) -> (Vec<StrategyDetail>, usize) {
    let this_year: Vec<&ReductionOption> = options
        .iter()
        .filter(|o| o.this_year_applicable)
        .collect();
    let economic: Vec<&ReductionOption> = this_year
        .iter()
        .copied()
        .filter(|o| o.mac < current_price)
        .collect();

    let strategies = vec![
        build_strategy("A", "abatement-first", base_net_exposure, current_price, &economic),
        build_strategy("B", "buy-all", base_net_exposure, current_price, &[]),
        build_strategy("C", "apply-all", base_net_exposure, current_price, &this_year),
    ];

    // Iterator::min_by keeps the first of equal elements, which gives the
    // required earliest-index tie-break.
    let optimal = strategies
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.total_cost.cmp(&b.total_cost))
        .map(|(i, _)| i)
        .unwrap_or(0);

    (strategies, optimal)
}

fn build_strategy(
    name: &str,
    label: &str,
    base_net_exposure: Tonnes,
    current_price: Money,
    applied: &[&ReductionOption],
) -> StrategyDetail {
    let reduced: Tonnes = applied.iter().map(|o| o.annual_reduction).sum();
    let abatement_cost: Money = applied.iter().map(|o| o.cost).sum();
    let purchase_volume = (base_net_exposure - reduced).max(Decimal::ZERO);
    let compliance_cost = purchase_volume * current_price / dec!(100_000_000);
    let total_cost = compliance_cost + abatement_cost;

    let explanation = if applied.is_empty() {
        format!("no reductions applied -> full {purchase_volume}t purchased")
    } else {
        let parts = applied
            .iter()
            .map(|o| format!("{} ({}t)", o.name, o.annual_reduction))
            .collect::<Vec<_>>()
            .join(" + ");
        format!("{parts} -> remaining {purchase_volume}t purchased")
    };

    StrategyDetail {
        name: name.into(),
        label: label.into(),
        compliance_cost,
        abatement_cost,
        total_cost,
        applied_reductions: applied.iter().map(|o| o.name.clone()).collect(),
        purchase_volume,
        explanation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::scenarios::default_reduction_options;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strategy_a_applies_only_economic_options() {
        // At 15,000/t the energy (8,000) and process (12,000) levers beat
        // the market; fuel (22,000) does not.
        let (strategies, _) =
            compare_strategies(dec!(30_000), dec!(15_000), &default_reduction_options());
        let a = &strategies[0];
        assert_eq!(
            a.applied_reductions,
            vec!["Energy efficiency upgrade", "Process optimisation"]
        );
        // 30,000 - 5,000 - 2,000 = 23,000 purchased
        assert_eq!(a.purchase_volume, dec!(23_000));
        // 23,000 * 15,000 / 1e8 = 3.45; + 0.4 + 0.24 abatement
        assert_eq!(a.compliance_cost, dec!(3.45));
        assert_eq!(a.abatement_cost, dec!(0.64));
        assert_eq!(a.total_cost, dec!(4.09));
    }

    #[test]
    fn test_strategy_b_buys_everything() {
        let (strategies, _) =
            compare_strategies(dec!(30_000), dec!(15_000), &default_reduction_options());
        let b = &strategies[1];
        assert!(b.applied_reductions.is_empty());
        assert_eq!(b.purchase_volume, dec!(30_000));
        assert_eq!(b.abatement_cost, Decimal::ZERO);
        assert_eq!(b.total_cost, dec!(4.5)); // 30,000 * 15,000 / 1e8
    }

    #[test]
    fn test_strategy_c_applies_all_this_year_options() {
        let (strategies, _) =
            compare_strategies(dec!(30_000), dec!(15_000), &default_reduction_options());
        let c = &strategies[2];
        // Renewable power is next-year only and never appears.
        assert_eq!(c.applied_reductions.len(), 3);
        assert_eq!(c.purchase_volume, dec!(20_000)); // 30,000 - 10,000
        assert_eq!(c.abatement_cost, dec!(1.3)); // 0.4 + 0.24 + 0.66
        assert_eq!(c.total_cost, dec!(4.3)); // 3.0 + 1.3
    }

    #[test]
    fn test_optimal_is_cheapest() {
        let (strategies, optimal) =
            compare_strategies(dec!(30_000), dec!(15_000), &default_reduction_options());
        let min = strategies
            .iter()
            .map(|s| s.total_cost)
            .min()
            .unwrap();
        assert_eq!(strategies[optimal].total_cost, min);
        assert_eq!(optimal, 0); // A at 4.09 beats C at 4.3 and B at 4.5
    }

    #[test]
    fn test_tie_breaks_to_earliest_index() {
        // No options at all: A, B, and C collapse to identical buy-only plans.
        let (strategies, optimal) = compare_strategies(dec!(10_000), dec!(15_000), &[]);
        assert_eq!(strategies[0].total_cost, strategies[1].total_cost);
        assert_eq!(strategies[1].total_cost, strategies[2].total_cost);
        assert_eq!(optimal, 0);
    }

    #[test]
    fn test_purchase_volume_never_negative() {
        // Reductions exceeding the exposure floor the purchase at zero.
        let (strategies, _) =
            compare_strategies(dec!(4_000), dec!(40_000), &default_reduction_options());
        for s in &strategies {
            assert!(s.purchase_volume >= Decimal::ZERO);
        }
        // C applies 10,000t against a 4,000t exposure.
        assert_eq!(strategies[2].purchase_volume, Decimal::ZERO);
    }

    #[test]
    fn test_explanation_reflects_numbers() {
        let (strategies, _) =
            compare_strategies(dec!(30_000), dec!(15_000), &default_reduction_options());
        assert!(strategies[0].explanation.contains("remaining 23000t purchased"));
        assert!(strategies[0].explanation.contains("Energy efficiency upgrade (5000t)"));
        assert!(strategies[1].explanation.contains("full 30000t purchased"));
    }

    #[test]
    fn test_zero_exposure_all_strategies_cost_only_abatement() {
        let (strategies, optimal) =
            compare_strategies(Decimal::ZERO, dec!(15_000), &default_reduction_options());
        assert_eq!(strategies[1].total_cost, Decimal::ZERO);
        // Buying nothing is optimal when there is nothing to cover.
        assert_eq!(optimal, 1);
    }
}
