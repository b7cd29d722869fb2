pub mod error;
pub mod model;
pub mod normalize;
pub mod score;
pub mod snapshot;

use chrono::{DateTime, Utc};
use model::RawDataset;
use normalize::DroppedCounts;
use score::CropRecommendation;
use serde::{Deserialize, Serialize};

/// Number of distinct latest snapshots that fed the scorer, per signal.
/// Keys are districts for weather and vegetation, (district, crop) pairs
/// for prices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotCounts {
    pub weather: usize,
    pub vegetation: usize,
    pub prices: usize,
}

/// Output of one full pipeline run: the ranked recommendation table plus
/// drop and snapshot accounting. Regenerated wholesale on every run; a new
/// run's table replaces the previous one entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRun {
    pub recommendations: Vec<CropRecommendation>,
    pub dropped: DroppedCounts,
    pub snapshots: SnapshotCounts,
    pub generated_at: DateTime<Utc>,
}

impl PipelineRun {
    /// Districts present in the output, in stable (alphabetical) order.
    pub fn districts(&self) -> Vec<&str> {
        let mut districts: Vec<&str> = self
            .recommendations
            .iter()
            .map(|r| r.district.as_str())
            .collect();
        districts.sort_unstable();
        districts.dedup();
        districts
    }
}

/// Main API entry point: run the whole batch pipeline over a raw dataset.
///
/// normalize -> select latest -> score, single-threaded, no suspension
/// points, no shared state. Pure given its inputs: rerunning over the same
/// raw data with the same `generated_at` produces identical output.
pub fn run_pipeline(dataset: &RawDataset, generated_at: DateTime<Utc>) -> PipelineRun {
    let normalized = normalize::normalize_dataset(dataset);
    tracing::info!(
        weather = normalized.weather.len(),
        prices = normalized.prices.len(),
        vegetation = normalized.vegetation.len(),
        dropped = normalized.dropped.total(),
        "normalized raw dataset"
    );

    let weather = snapshot::latest_weather(&normalized.weather);
    let vegetation = snapshot::latest_vegetation(&normalized.vegetation);
    let prices = snapshot::latest_prices(&normalized.prices);
    let snapshots = SnapshotCounts {
        weather: weather.len(),
        vegetation: vegetation.len(),
        prices: prices.len(),
    };

    let recommendations = score::recommend(&weather, &vegetation, &prices, generated_at);
    tracing::info!(
        rows = recommendations.len(),
        districts = snapshots.weather,
        "scored crop recommendations"
    );

    PipelineRun {
        recommendations,
        dropped: normalized.dropped,
        snapshots,
        generated_at,
    }
}
