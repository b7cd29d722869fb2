pub mod price;
pub mod vegetation;
pub mod weather;

pub use price::{NormalizedPrice, PriceTrend, SellingAdvice};
pub use vegetation::{NdviTrend, NormalizedVegetation, PlantingRecommendation, SoilMoistureStatus};
pub use weather::{HumidityCategory, NormalizedWeather, RainfallCategory};

use crate::model::RawDataset;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Round half away from zero, matching SQL ROUND semantics of the
/// warehouse layer this pipeline feeds.
pub(crate) fn round_dp(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Per-signal counts of raw records excluded by validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedCounts {
    pub weather: usize,
    pub prices: usize,
    pub vegetation: usize,
}

impl DroppedCounts {
    pub fn total(&self) -> usize {
        self.weather + self.prices + self.vegetation
    }
}

/// Output of the normalization stage: cleaned records per signal plus
/// drop accounting. Dropped rows are never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizeOutcome {
    pub weather: Vec<NormalizedWeather>,
    pub prices: Vec<NormalizedPrice>,
    pub vegetation: Vec<NormalizedVegetation>,
    pub dropped: DroppedCounts,
}

/// Run all three per-signal normalizers over a raw dataset.
///
/// The signals are independent; each record maps to zero or one normalized
/// record. Order within each signal is preserved (the latest-snapshot
/// tie-break relies on input order as its final key).
pub fn normalize_dataset(raw: &RawDataset) -> NormalizeOutcome {
    let mut outcome = NormalizeOutcome::default();

    for record in &raw.weather {
        match weather::normalize_weather(record) {
            Some(normalized) => outcome.weather.push(normalized),
            None => {
                outcome.dropped.weather += 1;
                tracing::debug!(district = ?record.district, "dropped invalid weather record");
            }
        }
    }

    for record in &raw.prices {
        match price::normalize_price(record) {
            Some(normalized) => outcome.prices.push(normalized),
            None => {
                outcome.dropped.prices += 1;
                tracing::debug!(
                    district = ?record.district,
                    crop = ?record.crop,
                    "dropped invalid price record"
                );
            }
        }
    }

    for record in &raw.vegetation {
        match vegetation::normalize_vegetation(record) {
            Some(normalized) => outcome.vegetation.push(normalized),
            None => {
                outcome.dropped.vegetation += 1;
                tracing::debug!(district = ?record.district, "dropped invalid vegetation record");
            }
        }
    }

    outcome
}
