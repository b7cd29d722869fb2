use crate::normalize::{PriceTrend, RainfallCategory};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Four-tier classification of the overall recommendation score.
/// Boundaries are inclusive at the lower bound of each tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecommendationCategory {
    #[serde(rename = "Highly Recommended")]
    HighlyRecommended,
    Recommended,
    Acceptable,
    #[serde(rename = "Not Recommended")]
    NotRecommended,
}

impl RecommendationCategory {
    pub fn from_score(overall: Decimal) -> Self {
        if overall >= Decimal::new(75, 1) {
            RecommendationCategory::HighlyRecommended
        } else if overall >= Decimal::from(6) {
            RecommendationCategory::Recommended
        } else if overall >= Decimal::from(4) {
            RecommendationCategory::Acceptable
        } else {
            RecommendationCategory::NotRecommended
        }
    }

    /// Parse a human label, e.g. for a CLI filter. Case-insensitive.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "highly recommended" => Some(RecommendationCategory::HighlyRecommended),
            "recommended" => Some(RecommendationCategory::Recommended),
            "acceptable" => Some(RecommendationCategory::Acceptable),
            "not recommended" => Some(RecommendationCategory::NotRecommended),
            _ => None,
        }
    }
}

impl fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationCategory::HighlyRecommended => write!(f, "Highly Recommended"),
            RecommendationCategory::Recommended => write!(f, "Recommended"),
            RecommendationCategory::Acceptable => write!(f, "Acceptable"),
            RecommendationCategory::NotRecommended => write!(f, "Not Recommended"),
        }
    }
}

/// One ranked recommendation row: the crop, its sub-scores, and the
/// snapshot fields a reader needs to see why it scored the way it did.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropRecommendation {
    pub district: String,
    pub crop: String,
    /// Weather fit, 0-10.
    pub weather_score: Decimal,
    /// Vegetation/soil fit, 0-10.
    pub vegetation_score: Decimal,
    /// Market opportunity, 0-10.
    pub market_score: Decimal,
    /// round(weather*0.4 + vegetation*0.35 + market*0.25, 1).
    pub overall_score: Decimal,
    pub category: RecommendationCategory,
    /// 1-based position within the district, best overall score first.
    pub rank: u32,
    pub temperature: Decimal,
    pub rainfall_category: RainfallCategory,
    /// Absent when the district has no vegetation snapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vegetation_health: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil_moisture_pct: Option<Decimal>,
    pub price_per_kg: Decimal,
    pub price_trend: PriceTrend,
    /// Human-readable account of how each sub-score was reached.
    pub reason: String,
    pub generated_at: DateTime<Utc>,
}
