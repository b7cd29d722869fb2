use shamba_core::normalize::{DroppedCounts, NormalizeOutcome};
use shamba_core::score::CropRecommendation;

/// Print recommendations grouped by district, best crop first.
pub fn print_recommendations(rows: &[&CropRecommendation], dropped: &DroppedCounts, verbose: bool) {
    if rows.is_empty() {
        println!("No recommendations (no district has both weather and price data).");
        print_dropped(dropped);
        return;
    }

    let max_crop = rows.iter().map(|r| r.crop.len()).max().unwrap_or(10).max(4);

    let mut current_district: Option<&str> = None;
    for row in rows {
        if current_district != Some(row.district.as_str()) {
            if current_district.is_some() {
                println!();
            }
            println!("=== {} ===\n", row.district);
            println!(
                "  #   {:<width$}  Overall  Category            W    V    M",
                "Crop",
                width = max_crop
            );
            current_district = Some(row.district.as_str());
        }

        println!(
            "  {:<3} {:<width$}  {:<7}  {:<18}  {:<4} {:<4} {}",
            row.rank,
            row.crop,
            row.overall_score,
            row.category.to_string(),
            row.weather_score,
            row.vegetation_score,
            row.market_score,
            width = max_crop
        );

        let conditions = match (&row.vegetation_health, row.soil_moisture_pct) {
            (Some(health), Some(moisture)) => format!(
                "temp {}C | {} | {} | moisture {}% | price {} ({})",
                row.temperature,
                row.rainfall_category,
                health,
                moisture,
                row.price_per_kg,
                row.price_trend
            ),
            _ => format!(
                "temp {}C | {} | no vegetation data | price {} ({})",
                row.temperature, row.rainfall_category, row.price_per_kg, row.price_trend
            ),
        };
        println!("      {conditions}");

        if verbose {
            println!("      {}", row.reason);
        }
    }

    println!();
    print_dropped(dropped);
}

fn print_dropped(dropped: &DroppedCounts) {
    if dropped.total() > 0 {
        println!(
            "{} raw record(s) dropped by validation (weather {}, prices {}, vegetation {}).",
            dropped.total(),
            dropped.weather,
            dropped.prices,
            dropped.vegetation
        );
    }
}

/// Print a summary of the normalization stage.
pub fn print_normalized(outcome: &NormalizeOutcome) {
    println!(
        "Weather:    {} record(s) kept, {} dropped",
        outcome.weather.len(),
        outcome.dropped.weather
    );
    println!(
        "Prices:     {} record(s) kept, {} dropped",
        outcome.prices.len(),
        outcome.dropped.prices
    );
    println!(
        "Vegetation: {} record(s) kept, {} dropped",
        outcome.vegetation.len(),
        outcome.dropped.vegetation
    );

    if !outcome.weather.is_empty() {
        println!("\nWeather:");
        for r in &outcome.weather {
            println!(
                "  {}  temp {}C  {}  {}  heat index {}  @ {}",
                r.district, r.temperature, r.rainfall_category, r.humidity_category, r.heat_index, r.observed_at
            );
        }
    }

    if !outcome.prices.is_empty() {
        println!("\nPrices:");
        for r in &outcome.prices {
            println!(
                "  {}  {}  {} ({}, {})  @ {}",
                r.district, r.crop, r.price_per_kg, r.price_trend, r.selling_advice, r.observed_at
            );
        }
    }

    if !outcome.vegetation.is_empty() {
        println!("\nVegetation:");
        for r in &outcome.vegetation {
            println!(
                "  {}  NDVI {} ({})  moisture {}% ({})  {}  @ {}",
                r.district,
                r.ndvi,
                r.ndvi_trend,
                r.soil_moisture_pct,
                r.soil_moisture_status,
                r.planting_recommendation,
                r.observed_at
            );
        }
    }
}
