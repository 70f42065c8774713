use clap::Args;
use serde_json::Value;

use carbon_analytics_core::benchmarking::intensity::{self, PeerIntensityInput};

use crate::input;

#[derive(Args)]
pub struct IntensityArgs {
    /// JSON input: { "companies": [...], "basis": "revenue", "thresholds": {...}, "subject_id": 1 }
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_intensity(args: IntensityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input_data: PeerIntensityInput = input::read(args.input.as_deref())?;
    let result = intensity::rank_peers(&input_data)?;
    Ok(serde_json::to_value(result)?)
}
