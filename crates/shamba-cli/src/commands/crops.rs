use shamba_core::error::ShambaError;
use shamba_core::score::rules::{self, CropMatcher, CropWeatherRule};

pub fn list() -> Result<(), ShambaError> {
    println!("Crops with dedicated weather ladders:\n");
    for rule in rules::weather_rules() {
        let match_note = match rule.matcher {
            CropMatcher::Exact(_) => "exact name",
            CropMatcher::Contains(_) => "name contains",
        };
        println!(
            "  {:<14} {} tier(s), fallback {}  ({})",
            rule.matcher.label(),
            rule.tiers.len(),
            rule.fallback,
            match_note
        );
    }
    println!(
        "\nAny other crop receives the default weather score {}.",
        rules::DEFAULT_WEATHER_SCORE
    );
    let (w, v, m) = rules::weights();
    println!("Overall score = weather x {w} + vegetation x {v} + market x {m}, rounded to 1 decimal.");
    Ok(())
}

pub fn explain(crop: &str) -> Result<(), ShambaError> {
    let rule = rules::weather_rules()
        .iter()
        .find(|r| r.matcher.matches(crop))
        .ok_or_else(|| ShambaError::UnknownCrop(crop.to_string()))?;

    print_weather_ladder(crop, rule);

    println!("Vegetation score (crop-independent, from the district's latest NDVI snapshot):");
    for band in rules::vegetation_tiers() {
        println!(
            "  NDVI > {} and soil moisture > {}%  -> {}",
            band.min_ndvi, band.min_moisture, band.score
        );
    }
    println!("  otherwise (including no snapshot)  -> 3\n");

    println!("Market score (from the 7-day price change):");
    for band in rules::market_tiers() {
        println!("  change > {:>3}%  -> {}", band.min_change_pct, band.score);
    }
    println!("  otherwise      -> 2\n");

    let (w, v, m) = rules::weights();
    println!("Overall = round(weather x {w} + vegetation x {v} + market x {m}, 1)");
    println!("Category: >= 7.5 Highly Recommended, >= 6.0 Recommended, >= 4.0 Acceptable, else Not Recommended.");
    Ok(())
}

fn print_weather_ladder(crop: &str, rule: &CropWeatherRule) {
    match rule.matcher {
        CropMatcher::Exact(name) => println!("Weather ladder for {name}:"),
        CropMatcher::Contains(fragment) => {
            println!("Weather ladder for '{crop}' (matched: name contains \"{fragment}\"):")
        }
    }
    for band in &rule.tiers {
        match band.min_rainfall {
            Some(min) => println!(
                "  temp {}-{} and rainfall > {}mm  -> {}",
                band.temp_min, band.temp_max, min, band.score
            ),
            None => println!("  temp {}-{}  -> {}", band.temp_min, band.temp_max, band.score),
        }
    }
    println!("  otherwise  -> {}\n", rule.fallback);
}
