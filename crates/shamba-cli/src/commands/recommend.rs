use chrono::Utc;
use shamba_core::error::ShambaError;
use shamba_core::model;
use shamba_core::score::{CropRecommendation, RecommendationCategory};
use std::path::PathBuf;

use crate::output;

pub fn run(
    dataset_path: PathBuf,
    district: Option<String>,
    category: Option<String>,
    output_format: &str,
    out: Option<PathBuf>,
    verbose: bool,
) -> Result<(), ShambaError> {
    let dataset = model::load_dataset(&dataset_path)?;
    let run = shamba_core::run_pipeline(&dataset, Utc::now());

    // Filters mirror how the dashboard queries the table.
    let district_filter = district.map(|d| d.trim().to_uppercase());
    let category_filter = match category {
        Some(label) => Some(
            RecommendationCategory::parse(&label)
                .ok_or(ShambaError::UnknownCategory(label))?,
        ),
        None => None,
    };

    let rows: Vec<&CropRecommendation> = run
        .recommendations
        .iter()
        .filter(|r| district_filter.as_deref().is_none_or(|d| r.district == d))
        .filter(|r| category_filter.is_none_or(|c| r.category == c))
        .collect();

    if let Some(path) = &out {
        std::fs::write(path, serde_json::to_string_pretty(&run)?)?;
    }

    match output_format {
        "json" => output::json::print(&rows)?,
        _ => output::table::print_recommendations(&rows, &run.dropped, verbose),
    }

    Ok(())
}
