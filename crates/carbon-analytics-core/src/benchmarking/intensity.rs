//! Peer carbon-intensity benchmarking.
//!
//! Ranks companies by emissions intensity on a revenue or production basis
//! and positions each against industry thresholds. Lower intensity is
//! better throughout.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CarbonAnalyticsError;
use crate::types::{CompanyEmissionsRecord, ScopeSelection};
use crate::CarbonAnalyticsResult;

/// Denominator of the intensity figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityBasis {
    /// tCO2e per 100M-won of revenue.
    Revenue,
    /// tCO2e per 1,000 units of output.
    Production,
}

/// Industry reference levels for the chosen basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkThresholds {
    /// Intensity at the 10th percentile of the industry (best decile).
    pub top10: Decimal,
    pub median: Decimal,
}

/// Band relative to the industry thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkBand {
    TopDecile,
    AboveMedian,
    BelowMedian,
}

/// Input for the peer ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerIntensityInput {
    pub companies: Vec<CompanyEmissionsRecord>,
    #[serde(default)]
    pub scopes: ScopeSelection,
    pub basis: IntensityBasis,
    pub thresholds: BenchmarkThresholds,
    /// The company being positioned.
    pub subject_id: u32,
}

/// One company's position in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerIntensityRow {
    pub id: u32,
    pub name: String,
    pub intensity: Decimal,
    pub band: BenchmarkBand,
}

/// Output of the peer ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerIntensityOutput {
    /// Ascending by intensity (best performer first).
    pub ranking: Vec<PeerIntensityRow>,
    /// 1-based rank of the subject company.
    pub subject_rank: usize,
    pub subject_intensity: Decimal,
    pub subject_band: BenchmarkBand,
}

/// Emissions intensity of one company on the chosen basis. A zero
/// denominator yields zero rather than an error.
pub fn intensity_of(
    company: &CompanyEmissionsRecord,
    scopes: &ScopeSelection,
    basis: IntensityBasis,
) -> Decimal {
    let total = company.scoped_total(scopes);
    match basis {
        IntensityBasis::Revenue => {
            if company.revenue > Decimal::ZERO {
                total / company.revenue
            } else {
                Decimal::ZERO
            }
        }
        IntensityBasis::Production => {
            if company.production > Decimal::ZERO {
                total / company.production * dec!(1_000)
            } else {
                Decimal::ZERO
            }
        }
    }
}

fn band_of(intensity: Decimal, thresholds: &BenchmarkThresholds) -> BenchmarkBand {
    if intensity <= thresholds.top10 {
        BenchmarkBand::TopDecile
    } else if intensity <= thresholds.median {
        BenchmarkBand::AboveMedian
    } else {
        BenchmarkBand::BelowMedian
    }
}

/// Rank the peer group by intensity and position the subject company.
pub fn rank_peers(input: &PeerIntensityInput) -> CarbonAnalyticsResult<PeerIntensityOutput> {
    if input.companies.is_empty() {
        return Err(CarbonAnalyticsError::InsufficientData(
            "At least one company is required".into(),
        ));
    }
    for company in &input.companies {
        if company.scope1 < Decimal::ZERO
            || company.scope2 < Decimal::ZERO
            || company.scope3 < Decimal::ZERO
        {
            return Err(CarbonAnalyticsError::InvalidInput {
                field: format!("companies[{}]", company.id),
                reason: "Scope emissions cannot be negative".into(),
            });
        }
    }

    let mut ranking: Vec<PeerIntensityRow> = input
        .companies
        .iter()
        .map(|c| {
            let intensity = intensity_of(c, &input.scopes, input.basis);
            PeerIntensityRow {
                id: c.id,
                name: c.name.clone(),
                intensity,
                band: band_of(intensity, &input.thresholds),
            }
        })
        .collect();
    ranking.sort_by(|a, b| a.intensity.cmp(&b.intensity));

    let position = ranking
        .iter()
        .position(|r| r.id == input.subject_id)
        .ok_or_else(|| CarbonAnalyticsError::InvalidInput {
            field: "subject_id".into(),
            reason: format!("Company {} is not in the peer group", input.subject_id),
        })?;

    let subject = ranking[position].clone();
    Ok(PeerIntensityOutput {
        ranking,
        subject_rank: position + 1,
        subject_intensity: subject.intensity,
        subject_band: subject.band,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn company(id: u32, name: &str, s12: i64, revenue: i64, production: i64) -> CompanyEmissionsRecord {
        CompanyEmissionsRecord {
            id,
            name: name.into(),
            scope1: Decimal::from(s12 / 2),
            scope2: Decimal::from(s12 - s12 / 2),
            scope3: dec!(50_000),
            revenue: Decimal::from(revenue),
            base_emissions: Decimal::ZERO,
            production: Decimal::from(production),
            carbon_intensity_scope1: None,
            carbon_intensity_scope2: None,
            carbon_intensity_scope3: None,
        }
    }

    fn base_input() -> PeerIntensityInput {
        PeerIntensityInput {
            companies: vec![
                company(1, "Alpha", 120_000, 5_000, 1_000_000),
                company(2, "Bravo", 90_000, 4_200, 800_000),
                company(3, "Charlie", 60_000, 4_000, 900_000),
            ],
            scopes: ScopeSelection::default(),
            basis: IntensityBasis::Revenue,
            thresholds: BenchmarkThresholds {
                top10: dec!(16),
                median: dec!(22),
            },
            subject_id: 1,
        }
    }

    #[test]
    fn test_revenue_intensity() {
        let c = company(1, "Alpha", 120_000, 5_000, 1_000_000);
        let i = intensity_of(&c, &ScopeSelection::default(), IntensityBasis::Revenue);
        assert_eq!(i, dec!(24)); // 120,000 / 5,000
    }

    #[test]
    fn test_production_intensity_scaled_per_thousand() {
        let c = company(1, "Alpha", 120_000, 5_000, 1_000_000);
        let i = intensity_of(&c, &ScopeSelection::default(), IntensityBasis::Production);
        assert_eq!(i, dec!(120)); // 120,000 / 1,000,000 * 1,000
    }

    #[test]
    fn test_zero_denominator_yields_zero() {
        let c = company(1, "Alpha", 120_000, 0, 0);
        assert_eq!(
            intensity_of(&c, &ScopeSelection::default(), IntensityBasis::Revenue),
            Decimal::ZERO
        );
        assert_eq!(
            intensity_of(&c, &ScopeSelection::default(), IntensityBasis::Production),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_ranking_ascends() {
        let out = rank_peers(&base_input()).unwrap();
        // Charlie 15, Bravo ~21.4, Alpha 24
        assert_eq!(out.ranking[0].name, "Charlie");
        assert_eq!(out.ranking[2].name, "Alpha");
        for pair in out.ranking.windows(2) {
            assert!(pair[0].intensity <= pair[1].intensity);
        }
    }

    #[test]
    fn test_subject_position_and_band() {
        let out = rank_peers(&base_input()).unwrap();
        assert_eq!(out.subject_rank, 3);
        assert_eq!(out.subject_intensity, dec!(24));
        assert_eq!(out.subject_band, BenchmarkBand::BelowMedian);
    }

    #[test]
    fn test_bands_against_thresholds() {
        let out = rank_peers(&base_input()).unwrap();
        assert_eq!(out.ranking[0].band, BenchmarkBand::TopDecile); // 15 <= 16
        assert_eq!(out.ranking[1].band, BenchmarkBand::AboveMedian); // 21.4 <= 22
        assert_eq!(out.ranking[2].band, BenchmarkBand::BelowMedian);
    }

    #[test]
    fn test_scope3_changes_the_ordering_inputs() {
        let mut input = base_input();
        input.scopes = ScopeSelection {
            s1: true,
            s2: true,
            s3: true,
        };
        let out = rank_peers(&input).unwrap();
        // Every company carries 50,000t of scope 3 here, so intensities rise.
        assert!(out.subject_intensity > dec!(24));
    }

    #[test]
    fn test_unknown_subject_rejected() {
        let mut input = base_input();
        input.subject_id = 99;
        assert!(rank_peers(&input).is_err());
    }

    #[test]
    fn test_empty_peer_group_rejected() {
        let mut input = base_input();
        input.companies.clear();
        assert!(rank_peers(&input).is_err());
    }
}
