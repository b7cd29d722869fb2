use super::round_dp;
use crate::model::{canonical_district, RawVegetation};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 14-day NDVI movement bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NdviTrend {
    #[serde(rename = "Improving Rapidly")]
    ImprovingRapidly,
    Improving,
    Stable,
    Declining,
    #[serde(rename = "Declining Rapidly")]
    DecliningRapidly,
}

impl fmt::Display for NdviTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NdviTrend::ImprovingRapidly => write!(f, "Improving Rapidly"),
            NdviTrend::Improving => write!(f, "Improving"),
            NdviTrend::Stable => write!(f, "Stable"),
            NdviTrend::Declining => write!(f, "Declining"),
            NdviTrend::DecliningRapidly => write!(f, "Declining Rapidly"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoilMoistureStatus {
    #[serde(rename = "Dry - Irrigation Needed")]
    DryIrrigationNeeded,
    #[serde(rename = "Somewhat Dry")]
    SomewhatDry,
    Adequate,
    #[serde(rename = "Very Moist")]
    VeryMoist,
}

impl fmt::Display for SoilMoistureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoilMoistureStatus::DryIrrigationNeeded => write!(f, "Dry - Irrigation Needed"),
            SoilMoistureStatus::SomewhatDry => write!(f, "Somewhat Dry"),
            SoilMoistureStatus::Adequate => write!(f, "Adequate"),
            SoilMoistureStatus::VeryMoist => write!(f, "Very Moist"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlantingRecommendation {
    #[serde(rename = "Ready for Planting")]
    ReadyForPlanting,
    Acceptable,
    #[serde(rename = "Wait for Better Conditions")]
    WaitForBetterConditions,
}

impl fmt::Display for PlantingRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlantingRecommendation::ReadyForPlanting => write!(f, "Ready for Planting"),
            PlantingRecommendation::Acceptable => write!(f, "Acceptable"),
            PlantingRecommendation::WaitForBetterConditions => {
                write!(f, "Wait for Better Conditions")
            }
        }
    }
}

/// Cleaned, enriched vegetation record for one district observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedVegetation {
    pub district: String,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub ndvi: Decimal,
    pub ndvi_14days_ago: Decimal,
    pub ndvi_change: Decimal,
    pub vegetation_health: String,
    pub soil_moisture_pct: Decimal,
    pub satellite_source: String,
    pub ndvi_trend: NdviTrend,
    pub soil_moisture_status: SoilMoistureStatus,
    pub planting_readiness_score: Decimal,
    pub planting_recommendation: PlantingRecommendation,
    pub observed_at: DateTime<Utc>,
    pub loaded_at: DateTime<Utc>,
}

pub fn ndvi_trend(change: Decimal) -> NdviTrend {
    if change > Decimal::new(1, 1) {
        NdviTrend::ImprovingRapidly
    } else if change > Decimal::new(3, 2) {
        NdviTrend::Improving
    } else if change > Decimal::new(-3, 2) {
        NdviTrend::Stable
    } else if change > Decimal::new(-1, 1) {
        NdviTrend::Declining
    } else {
        NdviTrend::DecliningRapidly
    }
}

pub fn soil_moisture_status(moisture_pct: Decimal) -> SoilMoistureStatus {
    if moisture_pct < Decimal::from(20) {
        SoilMoistureStatus::DryIrrigationNeeded
    } else if moisture_pct < Decimal::from(30) {
        SoilMoistureStatus::SomewhatDry
    } else if moisture_pct < Decimal::from(40) {
        SoilMoistureStatus::Adequate
    } else {
        SoilMoistureStatus::VeryMoist
    }
}

/// Composite 0-ish..100-ish readiness indicator: NDVI weighted 50x,
/// moisture 1.5x, rounded to 1 decimal.
pub fn planting_readiness_score(ndvi: Decimal, moisture_pct: Decimal) -> Decimal {
    round_dp(ndvi * Decimal::from(50) + moisture_pct * Decimal::new(15, 1), 1)
}

pub fn planting_recommendation(ndvi: Decimal, moisture_pct: Decimal) -> PlantingRecommendation {
    if ndvi > Decimal::new(6, 1) && moisture_pct > Decimal::from(30) {
        PlantingRecommendation::ReadyForPlanting
    } else if ndvi > Decimal::new(4, 1) && moisture_pct > Decimal::from(25) {
        PlantingRecommendation::Acceptable
    } else {
        PlantingRecommendation::WaitForBetterConditions
    }
}

/// Fallback health label derived from NDVI, used when the satellite
/// provider did not supply one.
pub fn health_label(ndvi: Decimal) -> &'static str {
    if ndvi < Decimal::new(2, 1) {
        "Bare/Very Poor"
    } else if ndvi < Decimal::new(5, 1) {
        "Sparse"
    } else if ndvi < Decimal::new(7, 1) {
        "Moderate"
    } else {
        "Dense/Healthy"
    }
}

/// Normalize one raw vegetation record, or drop it.
///
/// Rejects records with no NDVI, an NDVI outside [-1, 1], no usable
/// district name, or missing history/moisture fields.
pub fn normalize_vegetation(raw: &RawVegetation) -> Option<NormalizedVegetation> {
    let district = canonical_district(raw.district.as_deref())?;
    let ndvi = raw
        .ndvi_value
        .filter(|v| *v >= Decimal::from(-1) && *v <= Decimal::ONE)?;
    let ndvi = round_dp(ndvi, 3);
    let ndvi_14days_ago = round_dp(raw.ndvi_14days_ago?, 3);
    let ndvi_change = round_dp(raw.ndvi_change?, 3);
    let soil_moisture_pct = round_dp(raw.soil_moisture_pct?, 1);

    let vegetation_health = match raw.vegetation_health.as_deref().map(str::trim) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => health_label(ndvi).to_string(),
    };

    Some(NormalizedVegetation {
        district,
        latitude: round_dp(raw.latitude, 4),
        longitude: round_dp(raw.longitude, 4),
        ndvi,
        ndvi_14days_ago,
        ndvi_change,
        vegetation_health,
        soil_moisture_pct,
        satellite_source: raw.satellite_source.clone(),
        ndvi_trend: ndvi_trend(ndvi_change),
        soil_moisture_status: soil_moisture_status(soil_moisture_pct),
        planting_readiness_score: planting_readiness_score(ndvi, soil_moisture_pct),
        planting_recommendation: planting_recommendation(ndvi, soil_moisture_pct),
        observed_at: raw.observed_at,
        loaded_at: raw.loaded_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn raw(ndvi: Option<Decimal>, moisture: Decimal) -> RawVegetation {
        RawVegetation {
            district: Some("Gulu".into()),
            latitude: dec!(2.77472),
            longitude: dec!(32.29889),
            ndvi_value: ndvi,
            ndvi_14days_ago: Some(dec!(0.6123)),
            ndvi_change: Some(dec!(0.0377)),
            vegetation_health: None,
            soil_moisture_pct: Some(moisture),
            satellite_source: "Sentinel-2".into(),
            observed_at: Utc.with_ymd_and_hms(2024, 3, 10, 6, 0, 0).unwrap(),
            loaded_at: Utc.with_ymd_and_hms(2024, 3, 10, 6, 5, 0).unwrap(),
        }
    }

    #[test]
    fn test_ndvi_trend_boundaries() {
        assert_eq!(ndvi_trend(dec!(0.11)), NdviTrend::ImprovingRapidly);
        assert_eq!(ndvi_trend(dec!(0.1)), NdviTrend::Improving);
        assert_eq!(ndvi_trend(dec!(0.03)), NdviTrend::Stable);
        assert_eq!(ndvi_trend(dec!(-0.03)), NdviTrend::Declining);
        assert_eq!(ndvi_trend(dec!(-0.1)), NdviTrend::DecliningRapidly);
    }

    #[test]
    fn test_soil_moisture_status_boundaries() {
        assert_eq!(soil_moisture_status(dec!(19.9)), SoilMoistureStatus::DryIrrigationNeeded);
        assert_eq!(soil_moisture_status(dec!(20)), SoilMoistureStatus::SomewhatDry);
        assert_eq!(soil_moisture_status(dec!(30)), SoilMoistureStatus::Adequate);
        assert_eq!(soil_moisture_status(dec!(40)), SoilMoistureStatus::VeryMoist);
    }

    #[test]
    fn test_planting_readiness_formula() {
        // 0.65 * 50 + 40 * 1.5 = 92.5
        assert_eq!(planting_readiness_score(dec!(0.65), dec!(40)), dec!(92.5));
    }

    #[test]
    fn test_planting_recommendation_tiers() {
        assert_eq!(
            planting_recommendation(dec!(0.65), dec!(31)),
            PlantingRecommendation::ReadyForPlanting
        );
        assert_eq!(
            planting_recommendation(dec!(0.45), dec!(26)),
            PlantingRecommendation::Acceptable
        );
        // NDVI high enough for Ready but moisture only meets the second tier
        assert_eq!(
            planting_recommendation(dec!(0.65), dec!(28)),
            PlantingRecommendation::Acceptable
        );
        assert_eq!(
            planting_recommendation(dec!(0.3), dec!(50)),
            PlantingRecommendation::WaitForBetterConditions
        );
    }

    #[test]
    fn test_rejects_ndvi_out_of_range() {
        assert!(normalize_vegetation(&raw(Some(dec!(1.5)), dec!(30))).is_none());
        assert!(normalize_vegetation(&raw(Some(dec!(-1.01)), dec!(30))).is_none());
        assert!(normalize_vegetation(&raw(None, dec!(30))).is_none());
    }

    #[test]
    fn test_rejects_missing_history_or_moisture() {
        let mut record = raw(Some(dec!(0.6)), dec!(30));
        record.soil_moisture_pct = None;
        assert!(normalize_vegetation(&record).is_none());

        let mut record = raw(Some(dec!(0.6)), dec!(30));
        record.ndvi_change = None;
        assert!(normalize_vegetation(&record).is_none());

        let mut record = raw(Some(dec!(0.6)), dec!(30));
        record.ndvi_14days_ago = None;
        assert!(normalize_vegetation(&record).is_none());
    }

    #[test]
    fn test_accepts_ndvi_at_range_edges() {
        assert!(normalize_vegetation(&raw(Some(dec!(1)), dec!(30))).is_some());
        assert!(normalize_vegetation(&raw(Some(dec!(-1)), dec!(30))).is_some());
    }

    #[test]
    fn test_health_label_derived_when_missing() {
        let record = normalize_vegetation(&raw(Some(dec!(0.65)), dec!(30))).unwrap();
        assert_eq!(record.vegetation_health, "Moderate");
        let record = normalize_vegetation(&raw(Some(dec!(0.15)), dec!(30))).unwrap();
        assert_eq!(record.vegetation_health, "Bare/Very Poor");
    }

    #[test]
    fn test_health_label_passthrough_when_present() {
        let mut input = raw(Some(dec!(0.65)), dec!(30));
        input.vegetation_health = Some("Dense/Healthy".into());
        let record = normalize_vegetation(&input).unwrap();
        assert_eq!(record.vegetation_health, "Dense/Healthy");
    }

    #[test]
    fn test_rounding() {
        let mut input = raw(Some(dec!(0.65449)), dec!(33.46));
        input.ndvi_change = Some(dec!(0.03066));
        let record = normalize_vegetation(&input).unwrap();
        assert_eq!(record.ndvi, dec!(0.654));
        assert_eq!(record.ndvi_change, dec!(0.031));
        assert_eq!(record.soil_moisture_pct, dec!(33.5));
        // trend uses the rounded change: 0.031 > 0.03 -> Improving
        assert_eq!(record.ndvi_trend, NdviTrend::Improving);
    }
}
