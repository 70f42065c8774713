use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use carbon_analytics_core::sbti::analysis::{self, SbtiConfig};
use carbon_analytics_core::types::{CompanyEmissionsRecord, EmissionsHistoryRow, ScopeSelection};

use crate::input;

#[derive(Args)]
pub struct SbtiArgs {
    /// JSON input: { "company": {...}, "history": [...], "scopes": {...}, "config": {...} }
    #[arg(long)]
    pub input: Option<String>,

    /// Fixed RNG seed for a reproducible simulation
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Deserialize)]
struct SbtiPayload {
    company: CompanyEmissionsRecord,
    #[serde(default)]
    history: Vec<EmissionsHistoryRow>,
    #[serde(default)]
    scopes: ScopeSelection,
    #[serde(default)]
    config: SbtiConfig,
}

pub fn run_sbti(args: SbtiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut payload: SbtiPayload = input::read(args.input.as_deref())?;
    if args.seed.is_some() {
        payload.config.seed = args.seed;
    }
    let result = analysis::run_sbti_analysis(
        &payload.company,
        &payload.history,
        payload.scopes,
        &payload.config,
    )?;
    Ok(serde_json::to_value(result)?)
}
