use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use carbon_analytics_core::benchmarking::intensity::PeerIntensityInput;
use carbon_analytics_core::investment::green_investment::GreenInvestmentInput;
use carbon_analytics_core::sbti::analysis::SbtiConfig;
use carbon_analytics_core::simulator::compliance::EtsScenarioConfig;
use carbon_analytics_core::simulator::procurement::ProcurementInput;
use carbon_analytics_core::types::{CompanyEmissionsRecord, EmissionsHistoryRow, ScopeSelection};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct SimulatePayload {
    company: CompanyEmissionsRecord,
    #[serde(default)]
    config: EtsScenarioConfig,
}

#[napi]
pub fn run_ets_simulation(input_json: String) -> NapiResult<String> {
    let payload: SimulatePayload = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = carbon_analytics_core::simulator::compliance::run_ets_simulation(
        &payload.company,
        &payload.config,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn procurement_mix(input_json: String) -> NapiResult<String> {
    let input: ProcurementInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = carbon_analytics_core::simulator::procurement::compute_procurement_mix(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// SBTi
// ---------------------------------------------------------------------------

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

#[napi]
pub fn run_sbti_analysis(input_json: String) -> NapiResult<String> {
    let payload: SbtiPayload = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = carbon_analytics_core::sbti::analysis::run_sbti_analysis(
        &payload.company,
        &payload.history,
        payload.scopes,
        &payload.config,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Benchmarking
// ---------------------------------------------------------------------------

#[napi]
pub fn peer_intensity(input_json: String) -> NapiResult<String> {
    let input: PeerIntensityInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = carbon_analytics_core::benchmarking::intensity::rank_peers(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Investment
// ---------------------------------------------------------------------------

#[napi]
pub fn green_investment(input_json: String) -> NapiResult<String> {
    let input: GreenInvestmentInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = carbon_analytics_core::investment::green_investment::appraise_green_investment(
        &input,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
