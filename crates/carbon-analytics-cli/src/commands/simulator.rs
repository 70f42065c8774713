use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use carbon_analytics_core::simulator::compliance::{self, EtsScenarioConfig};
use carbon_analytics_core::simulator::procurement::{self, ProcurementInput};
use carbon_analytics_core::simulator::scenarios::PriceScenario;
use carbon_analytics_core::types::CompanyEmissionsRecord;

use crate::input;

#[derive(Args)]
pub struct SimulateArgs {
    /// JSON input: { "company": {...}, "config": {...} }
    #[arg(long)]
    pub input: Option<String>,

    /// Override the scenario with a custom ETS price (KRW/t)
    #[arg(long)]
    pub price: Option<Decimal>,
}

#[derive(Args)]
pub struct ProcurementArgs {
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Deserialize)]
struct SimulatePayload {
    company: CompanyEmissionsRecord,
    #[serde(default)]
    config: EtsScenarioConfig,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut payload: SimulatePayload = input::read(args.input.as_deref())?;
    if let Some(price) = args.price {
        payload.config.price_scenario = PriceScenario::Custom;
        payload.config.custom_price = Some(price);
    }
    let result = compliance::run_ets_simulation(&payload.company, &payload.config)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_procurement(args: ProcurementArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input_data: ProcurementInput = input::read(args.input.as_deref())?;
    let result = procurement::compute_procurement_mix(&input_data)?;
    Ok(serde_json::to_value(result)?)
}
