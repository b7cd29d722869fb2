use super::round_dp;
use crate::model::{canonical_district, RawWeather};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rainfall bucket over the last-hour reading (mm).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RainfallCategory {
    #[serde(rename = "No Rain")]
    NoRain,
    #[serde(rename = "Light Rain")]
    LightRain,
    #[serde(rename = "Moderate Rain")]
    ModerateRain,
    #[serde(rename = "Heavy Rain")]
    HeavyRain,
}

impl fmt::Display for RainfallCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RainfallCategory::NoRain => write!(f, "No Rain"),
            RainfallCategory::LightRain => write!(f, "Light Rain"),
            RainfallCategory::ModerateRain => write!(f, "Moderate Rain"),
            RainfallCategory::HeavyRain => write!(f, "Heavy Rain"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HumidityCategory {
    Dry,
    Comfortable,
    Humid,
    #[serde(rename = "Very Humid")]
    VeryHumid,
}

impl fmt::Display for HumidityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HumidityCategory::Dry => write!(f, "Dry"),
            HumidityCategory::Comfortable => write!(f, "Comfortable"),
            HumidityCategory::Humid => write!(f, "Humid"),
            HumidityCategory::VeryHumid => write!(f, "Very Humid"),
        }
    }
}

/// Cleaned, enriched weather record for one district observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedWeather {
    pub district: String,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub temperature: Decimal,
    pub humidity: Decimal,
    pub pressure: Decimal,
    pub wind_speed: Decimal,
    pub clouds: i32,
    pub rainfall: Decimal,
    pub weather_condition: String,
    pub rainfall_category: RainfallCategory,
    pub humidity_category: HumidityCategory,
    pub heat_index: Decimal,
    pub observed_at: DateTime<Utc>,
    pub loaded_at: DateTime<Utc>,
}

/// Classify last-hour rainfall into a category.
///
/// The ladder is exhaustive: every value (including a negative sensor
/// glitch) lands in exactly one bucket.
pub fn rainfall_category(rainfall: Decimal) -> RainfallCategory {
    if rainfall > Decimal::from(10) {
        RainfallCategory::HeavyRain
    } else if rainfall > Decimal::new(25, 1) {
        RainfallCategory::ModerateRain
    } else if rainfall > Decimal::ZERO {
        RainfallCategory::LightRain
    } else {
        RainfallCategory::NoRain
    }
}

pub fn humidity_category(humidity: Decimal) -> HumidityCategory {
    if humidity > Decimal::from(80) {
        HumidityCategory::VeryHumid
    } else if humidity > Decimal::from(60) {
        HumidityCategory::Humid
    } else if humidity > Decimal::from(40) {
        HumidityCategory::Comfortable
    } else {
        HumidityCategory::Dry
    }
}

/// Simplified heat index: humidity only matters once both temperature and
/// humidity are above the comfort thresholds.
pub fn heat_index(temperature: Decimal, humidity: Decimal) -> Decimal {
    if temperature <= Decimal::from(27) || humidity <= Decimal::from(40) {
        temperature
    } else {
        round_dp(temperature + Decimal::new(5, 2) * humidity, 1)
    }
}

/// Normalize one raw weather record, or drop it.
///
/// Rejects records with no temperature or no usable district name.
/// Absent rainfall defaults to 0.
pub fn normalize_weather(raw: &RawWeather) -> Option<NormalizedWeather> {
    let district = canonical_district(raw.district.as_deref())?;
    let temperature = round_dp(raw.temperature?, 1);
    let humidity = round_dp(raw.humidity, 1);
    let rainfall = round_dp(raw.rainfall.unwrap_or(Decimal::ZERO), 1);

    Some(NormalizedWeather {
        district,
        latitude: round_dp(raw.latitude, 4),
        longitude: round_dp(raw.longitude, 4),
        temperature,
        humidity,
        pressure: round_dp(raw.pressure, 1),
        wind_speed: round_dp(raw.wind_speed, 1),
        clouds: raw.clouds,
        rainfall,
        weather_condition: raw.weather_condition.clone(),
        rainfall_category: rainfall_category(rainfall),
        humidity_category: humidity_category(humidity),
        heat_index: heat_index(temperature, humidity),
        observed_at: raw.observed_at,
        loaded_at: raw.loaded_at,
    })
}
