use crate::error::ShambaError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One raw weather observation as delivered by the ingestion layer.
///
/// Fields mirror the loader output 1:1; no cleaning happens here. Nullable
/// upstream fields are `Option` and validated by the normalizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawWeather {
    #[serde(default)]
    pub district: Option<String>,
    pub latitude: Decimal,
    pub longitude: Decimal,
    #[serde(default)]
    pub temperature: Option<Decimal>,
    pub humidity: Decimal,
    pub pressure: Decimal,
    pub weather_condition: String,
    #[serde(default)]
    pub weather_description: Option<String>,
    pub wind_speed: Decimal,
    pub clouds: i32,
    /// Rain in the last hour (mm). Absent means no rain was reported.
    #[serde(default)]
    pub rainfall: Option<Decimal>,
    pub observed_at: DateTime<Utc>,
    pub loaded_at: DateTime<Utc>,
}

/// One raw market price observation for a (district, crop) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPrice {
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub crop: Option<String>,
    #[serde(default)]
    pub price_per_kg: Option<Decimal>,
    #[serde(default)]
    pub price_7days_ago: Option<Decimal>,
    pub price_change_pct: Decimal,
    pub market_source: String,
    pub observed_at: DateTime<Utc>,
    pub loaded_at: DateTime<Utc>,
}

/// One raw vegetation (NDVI) observation for a district.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawVegetation {
    #[serde(default)]
    pub district: Option<String>,
    pub latitude: Decimal,
    pub longitude: Decimal,
    #[serde(default)]
    pub ndvi_value: Option<Decimal>,
    #[serde(default)]
    pub ndvi_14days_ago: Option<Decimal>,
    #[serde(default)]
    pub ndvi_change: Option<Decimal>,
    /// Health label from the satellite provider, if present. When absent the
    /// normalizer derives one from the NDVI value.
    #[serde(default)]
    pub vegetation_health: Option<String>,
    #[serde(default)]
    pub soil_moisture_pct: Option<Decimal>,
    pub satellite_source: String,
    pub observed_at: DateTime<Utc>,
    pub loaded_at: DateTime<Utc>,
}

/// Full raw input for one pipeline run: everything the loaders have written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDataset {
    #[serde(default)]
    pub weather: Vec<RawWeather>,
    #[serde(default)]
    pub prices: Vec<RawPrice>,
    #[serde(default)]
    pub vegetation: Vec<RawVegetation>,
}

impl RawDataset {
    pub fn is_empty(&self) -> bool {
        self.weather.is_empty() && self.prices.is_empty() && self.vegetation.is_empty()
    }
}

/// Load a raw dataset from a JSON file.
pub fn load_dataset(path: &Path) -> Result<RawDataset, ShambaError> {
    let bytes = std::fs::read(path).map_err(|e| ShambaError::DatasetLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_slice(&bytes).map_err(|e| ShambaError::DatasetLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Canonicalize a district name: trim and upper-case.
///
/// Returns `None` for a missing or blank name, which the normalizers treat
/// as a validation failure.
pub fn canonical_district(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_uppercase())
}
