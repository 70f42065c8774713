use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monetary values in 100M-won units unless a field says otherwise.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Emission masses in tonnes CO2e.
pub type Tonnes = Decimal;

/// Which GHG Protocol scopes an analysis includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeSelection {
    pub s1: bool,
    pub s2: bool,
    pub s3: bool,
}

impl Default for ScopeSelection {
    /// Scope 3 starts excluded; most reporters lack usable value-chain data.
    fn default() -> Self {
        ScopeSelection {
            s1: true,
            s2: true,
            s3: false,
        }
    }
}

/// One company's current-period emissions and financials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyEmissionsRecord {
    pub id: u32,
    pub name: String,
    /// Scope 1 direct emissions (tCO2e).
    pub scope1: Tonnes,
    /// Scope 2 purchased-energy emissions (tCO2e).
    pub scope2: Tonnes,
    /// Scope 3 value-chain emissions (tCO2e).
    pub scope3: Tonnes,
    /// Annual revenue (100M-won).
    pub revenue: Money,
    /// Anchor for the free-allocation calculation. A missing value zeroes
    /// the allocation in the simulator.
    #[serde(default)]
    pub base_emissions: Tonnes,
    /// Physical output; 0 when the company does not report volume.
    #[serde(default)]
    pub production: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbon_intensity_scope1: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbon_intensity_scope2: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbon_intensity_scope3: Option<Decimal>,
}

impl CompanyEmissionsRecord {
    /// Regulated scope 1 + 2 total.
    pub fn scope12(&self) -> Tonnes {
        self.scope1 + self.scope2
    }

    /// Total across the selected scopes.
    pub fn scoped_total(&self, scopes: &ScopeSelection) -> Tonnes {
        let mut total = Decimal::ZERO;
        if scopes.s1 {
            total += self.scope1;
        }
        if scopes.s2 {
            total += self.scope2;
        }
        if scopes.s3 {
            total += self.scope3;
        }
        total
    }

    /// Selected-scope total as f64, for the statistical engine.
    pub fn scoped_total_f64(&self, scopes: &ScopeSelection) -> f64 {
        self.scoped_total(scopes).to_f64().unwrap_or(0.0)
    }
}

/// One (year, scope1..3) observation from the emissions history store.
///
/// At most one row per year. Rows are loaded once per company and treated
/// as immutable for the duration of an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionsHistoryRow {
    pub year: i32,
    pub scope1: f64,
    pub scope2: f64,
    pub scope3: f64,
}

impl EmissionsHistoryRow {
    /// Total across the selected scopes.
    pub fn scoped_total(&self, scopes: &ScopeSelection) -> f64 {
        let mut total = 0.0;
        if scopes.s1 {
            total += self.scope1;
        }
        if scopes.s2 {
            total += self.scope2;
        }
        if scopes.s3 {
            total += self.scope3;
        }
        total
    }
}
