use shamba_core::error::ShambaError;
use shamba_core::model;
use shamba_core::normalize;
use std::path::PathBuf;

use crate::output;

pub fn run(dataset_path: PathBuf, output_format: &str, out: Option<PathBuf>) -> Result<(), ShambaError> {
    let dataset = model::load_dataset(&dataset_path)?;
    let outcome = normalize::normalize_dataset(&dataset);

    if let Some(path) = &out {
        std::fs::write(path, serde_json::to_string_pretty(&outcome)?)?;
    }

    match output_format {
        "json" => output::json::print(&outcome)?,
        _ => output::table::print_normalized(&outcome),
    }

    Ok(())
}
