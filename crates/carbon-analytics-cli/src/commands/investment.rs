use clap::Args;
use serde_json::Value;

use carbon_analytics_core::investment::green_investment::{self, GreenInvestmentInput};

use crate::input;

#[derive(Args)]
pub struct InvestmentArgs {
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_investment(args: InvestmentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input_data: GreenInvestmentInput = input::read(args.input.as_deref())?;
    let result = green_investment::appraise_green_investment(&input_data)?;
    Ok(serde_json::to_value(result)?)
}
