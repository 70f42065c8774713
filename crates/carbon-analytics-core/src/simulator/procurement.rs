//! Allowance procurement mix.
//!
//! Splits the adjusted emission volume into free-allocation, auction, and
//! market shares and prices the blend. Auction volume clears at a discount
//! to the market price and is capped by regulation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::scenarios::AuctionParams;
use crate::error::CarbonAnalyticsError;
use crate::types::{Money, Tonnes};
use crate::CarbonAnalyticsResult;

/// Input for the procurement-mix calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcurementInput {
    /// Scenario-adjusted emission volume (tonnes).
    pub adjusted_emissions: Tonnes,
    /// Scenario-adjusted free allocation (tonnes).
    pub adjusted_allocation: Tonnes,
    /// Current market price (KRW/t).
    pub market_price: Money,
    pub auction_enabled: bool,
    /// Desired auctioned share of the total volume (percent).
    #[serde(default)]
    pub auction_target_pct: Decimal,
    #[serde(default)]
    pub auction: AuctionParams,
}

/// Shares of each procurement channel and the resulting blended price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcurementMix {
    /// Share covered by free allocation (percent, capped at 100).
    pub free_allocation_pct: Decimal,
    pub auction_pct: Decimal,
    pub market_pct: Decimal,
    /// Auction clearing price (KRW/t).
    pub auction_price: Money,
    /// Volume-weighted price across the three channels (KRW/t).
    pub effective_price: Money,
}

/// Compute the procurement split and blended effective price.
pub fn compute_procurement_mix(input: &ProcurementInput) -> CarbonAnalyticsResult<ProcurementMix> {
    if input.adjusted_emissions < Decimal::ZERO || input.adjusted_allocation < Decimal::ZERO {
        return Err(CarbonAnalyticsError::InvalidInput {
            field: "adjusted_emissions".into(),
            reason: "Volumes cannot be negative".into(),
        });
    }
    if input.market_price < Decimal::ZERO {
        return Err(CarbonAnalyticsError::InvalidInput {
            field: "market_price".into(),
            reason: "Market price cannot be negative".into(),
        });
    }
    if input.auction_target_pct < Decimal::ZERO {
        return Err(CarbonAnalyticsError::InvalidInput {
            field: "auction_target_pct".into(),
            reason: "Auction share cannot be negative".into(),
        });
    }

    let hundred = dec!(100);
    let free_allocation_pct = if input.adjusted_emissions > Decimal::ZERO {
        (input.adjusted_allocation / input.adjusted_emissions * hundred).min(hundred)
    } else {
        Decimal::ZERO
    };

    let remaining_pct = hundred - free_allocation_pct;
    let auction_pct = if input.auction_enabled {
        remaining_pct.min(input.auction_target_pct.min(input.auction.max_auction_pct))
    } else {
        Decimal::ZERO
    };
    let market_pct = (remaining_pct - auction_pct).max(Decimal::ZERO);

    let auction_price = input.market_price * input.auction.discount_rate;
    // Free allocation contributes at zero cost.
    let effective_price =
        auction_pct / hundred * auction_price + market_pct / hundred * input.market_price;

    Ok(ProcurementMix {
        free_allocation_pct,
        auction_pct,
        market_pct,
        auction_price,
        effective_price,
    })
}
