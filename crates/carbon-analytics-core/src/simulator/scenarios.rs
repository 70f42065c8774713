//! Scenario tables for the ETS compliance simulator.
//!
//! Price scenarios, free-allocation policy shifts, the abatement-lever
//! catalog, and auction parameters are deployment configuration: loaded
//! once and passed read-only into the engine. Defaults mirror the K-ETS
//! reference deployment.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Tonnes};

/// Named ETS price points selectable in a simulation.
///
/// The set is closed: an out-of-catalog scenario is unrepresentable, so the
/// engine never has to handle an unknown key at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceScenario {
    Low,
    Base,
    High,
    Custom,
}

/// Per-tonne prices (KRW) behind the named scenarios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceScenarioTable {
    pub low: Money,
    pub base: Money,
    pub high: Money,
}

impl Default for PriceScenarioTable {
    fn default() -> Self {
        PriceScenarioTable {
            low: dec!(10_000),
            base: dec!(15_000),
            high: dec!(25_000),
        }
    }
}

/// Free-allocation policy shifts applied on top of the allocation baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationScenario {
    /// Current allocation level carried forward.
    Maintain,
    /// 10% cut, anticipating a larger auctioned share.
    Decrease10,
    /// 30% cut under strong regulatory tightening.
    Decrease30,
    /// Free allocation abolished outright.
    Abolished,
}

impl AllocationScenario {
    /// Multiplier applied to the free-allocation baseline.
    pub fn factor(&self) -> Decimal {
        match self {
            AllocationScenario::Maintain => Decimal::ONE,
            AllocationScenario::Decrease10 => dec!(0.9),
            AllocationScenario::Decrease30 => dec!(0.7),
            AllocationScenario::Abolished => Decimal::ZERO,
        }
    }
}

/// A named abatement lever.
///
/// Seeded from the catalog below and mutated only through the `enabled`
/// toggle; the economics of a lever never change at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReductionOption {
    pub id: String,
    pub name: String,
    /// Tonnes removed per year when the lever is exercised.
    pub annual_reduction: Tonnes,
    /// Annualized cost of exercising the lever (100M-won).
    pub cost: Money,
    /// Marginal abatement cost (KRW per tonne). Independent of `enabled`.
    pub mac: Money,
    /// Months from decision to realized reduction.
    pub lead_time_months: u32,
    /// Whether this lever counts toward realized reductions.
    #[serde(default)]
    pub enabled: bool,
    /// Realizable within the current compliance year (lead time <= 12 months).
    pub this_year_applicable: bool,
}

/// The default four-lever abatement catalog.
pub fn default_reduction_options() -> Vec<ReductionOption> {
    vec![
        ReductionOption {
            id: "energy".into(),
            name: "Energy efficiency upgrade".into(),
            annual_reduction: dec!(5_000),
            cost: dec!(0.4),
            mac: dec!(8_000),
            lead_time_months: 6,
            enabled: false,
            this_year_applicable: true,
        },
        ReductionOption {
            id: "process".into(),
            name: "Process optimisation".into(),
            annual_reduction: dec!(2_000),
            cost: dec!(0.24),
            mac: dec!(12_000),
            lead_time_months: 9,
            enabled: false,
            this_year_applicable: true,
        },
        ReductionOption {
            id: "fuel".into(),
            name: "Fuel switching".into(),
            annual_reduction: dec!(3_000),
            cost: dec!(0.66),
            mac: dec!(22_000),
            lead_time_months: 12,
            enabled: false,
            this_year_applicable: true,
        },
        ReductionOption {
            id: "renewable".into(),
            name: "Renewable power procurement".into(),
            annual_reduction: dec!(8_000),
            cost: dec!(2.8),
            mac: dec!(35_000),
            lead_time_months: 18,
            enabled: false,
            this_year_applicable: false,
        },
    ]
}

/// Auction participation parameters for the procurement mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionParams {
    /// Auction clearing price as a fraction of the market price.
    pub discount_rate: Decimal,
    /// Regulatory cap on the auctioned share (percent).
    pub max_auction_pct: Decimal,
}

impl Default for AuctionParams {
    fn default() -> Self {
        AuctionParams {
            discount_rate: dec!(0.85),
            max_auction_pct: dec!(30),
        }
    }
}
