use super::outcome::{CropRecommendation, RecommendationCategory};
use super::rules;
use crate::normalize::{NormalizedPrice, NormalizedVegetation, NormalizedWeather};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Rank candidate crops for every district with current price data.
///
/// Join semantics: weather is required (a district missing a weather
/// snapshot yields no rows), vegetation is optional (absence is scored
/// through the same tier ladder on failing sentinel values). One output row
/// per (district, crop) pair in the price snapshots.
///
/// Within a district, rows are ordered by overall score descending and get
/// unique sequential ranks; equal scores are ordered by crop name ascending
/// so the ranking is deterministic.
pub fn recommend(
    weather: &BTreeMap<String, &NormalizedWeather>,
    vegetation: &BTreeMap<String, &NormalizedVegetation>,
    prices: &BTreeMap<(String, String), &NormalizedPrice>,
    generated_at: DateTime<Utc>,
) -> Vec<CropRecommendation> {
    // Prices arrive keyed by (district, crop); regroup per district.
    let mut by_district: BTreeMap<&str, Vec<&NormalizedPrice>> = BTreeMap::new();
    for price in prices.values() {
        by_district.entry(price.district.as_str()).or_default().push(price);
    }

    let mut recommendations = Vec::new();

    for (district, district_prices) in by_district {
        let Some(weather_snapshot) = weather.get(district) else {
            tracing::debug!(district, "no weather snapshot, skipping district");
            continue;
        };
        let vegetation_snapshot = vegetation.get(district).copied();

        let mut rows: Vec<CropRecommendation> = district_prices
            .iter()
            .map(|price| {
                score_pair(weather_snapshot, vegetation_snapshot, price, generated_at)
            })
            .collect();

        // Overall score descending, crop name as the deterministic tie-break.
        rows.sort_by(|a, b| {
            b.overall_score
                .cmp(&a.overall_score)
                .then_with(|| a.crop.cmp(&b.crop))
        });
        for (idx, row) in rows.iter_mut().enumerate() {
            row.rank = (idx + 1) as u32;
        }

        recommendations.extend(rows);
    }

    recommendations
}

fn score_pair(
    weather: &NormalizedWeather,
    vegetation: Option<&NormalizedVegetation>,
    price: &NormalizedPrice,
    generated_at: DateTime<Utc>,
) -> CropRecommendation {
    let (weather_score, weather_reason) =
        rules::weather_score(&price.crop, weather.temperature, weather.rainfall);

    // Missing vegetation degrades to the lowest tier via sentinel inputs
    // rather than a special-cased branch.
    let (ndvi, moisture) = match vegetation {
        Some(v) => (v.ndvi, v.soil_moisture_pct),
        None => (Decimal::ZERO, Decimal::ZERO),
    };
    let (vegetation_score, vegetation_reason) = rules::vegetation_score(ndvi, moisture);
    let vegetation_reason = match vegetation {
        Some(_) => vegetation_reason,
        None => format!("no vegetation snapshot -> {vegetation_score}"),
    };

    let (market_score, market_reason) = rules::market_score(price.price_change_pct);

    let overall = rules::overall_score(weather_score, vegetation_score, market_score);

    CropRecommendation {
        district: price.district.clone(),
        crop: price.crop.clone(),
        weather_score,
        vegetation_score,
        market_score,
        overall_score: overall,
        category: RecommendationCategory::from_score(overall),
        rank: 0, // assigned after sorting
        temperature: weather.temperature,
        rainfall_category: weather.rainfall_category,
        vegetation_health: vegetation.map(|v| v.vegetation_health.clone()),
        soil_moisture_pct: vegetation.map(|v| v.soil_moisture_pct),
        price_per_kg: price.price_per_kg,
        price_trend: price.price_trend,
        reason: format!("weather: {weather_reason}; vegetation: {vegetation_reason}; market: {market_reason}"),
        generated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawPrice, RawVegetation, RawWeather};
    use crate::normalize::{normalize_dataset, price, vegetation, weather};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn ts(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, hour, 0, 0).unwrap()
    }

    fn weather_snapshot(district: &str, temp: Decimal, rainfall: Decimal) -> NormalizedWeather {
        weather::normalize_weather(&RawWeather {
            district: Some(district.into()),
            latitude: dec!(1.0820),
            longitude: dec!(34.1754),
            temperature: Some(temp),
            humidity: dec!(55),
            pressure: dec!(1010),
            weather_condition: "Rain".into(),
            weather_description: None,
            wind_speed: dec!(2),
            clouds: 60,
            rainfall: Some(rainfall),
            observed_at: ts(6),
            loaded_at: ts(7),
        })
        .unwrap()
    }

    fn vegetation_snapshot(district: &str, ndvi: Decimal, moisture: Decimal) -> NormalizedVegetation {
        vegetation::normalize_vegetation(&RawVegetation {
            district: Some(district.into()),
            latitude: dec!(1.0820),
            longitude: dec!(34.1754),
            ndvi_value: Some(ndvi),
            ndvi_14days_ago: Some(ndvi),
            ndvi_change: Some(dec!(0)),
            vegetation_health: None,
            soil_moisture_pct: Some(moisture),
            satellite_source: "Sentinel-2".into(),
            observed_at: ts(6),
            loaded_at: ts(7),
        })
        .unwrap()
    }

    fn price_snapshot(district: &str, crop: &str, change_pct: Decimal) -> NormalizedPrice {
        price::normalize_price(&RawPrice {
            district: Some(district.into()),
            crop: Some(crop.into()),
            price_per_kg: Some(dec!(1200)),
            price_7days_ago: Some(dec!(1100)),
            price_change_pct: change_pct,
            market_source: "test".into(),
            observed_at: ts(6),
            loaded_at: ts(7),
        })
        .unwrap()
    }

    fn maps<'a>(
        weather: &'a [NormalizedWeather],
        vegetation: &'a [NormalizedVegetation],
        prices: &'a [NormalizedPrice],
    ) -> (
        BTreeMap<String, &'a NormalizedWeather>,
        BTreeMap<String, &'a NormalizedVegetation>,
        BTreeMap<(String, String), &'a NormalizedPrice>,
    ) {
        (
            crate::snapshot::latest_weather(weather),
            crate::snapshot::latest_vegetation(vegetation),
            crate::snapshot::latest_prices(prices),
        )
    }

    #[test]
    fn test_mbale_maize_scenario() {
        // temp 26 / rain 3 -> weather 8; NDVI 0.75 / moisture 40 -> vegetation 9;
        // change 12% -> market 9; overall = round(3.2 + 3.15 + 2.25, 1) = 8.6
        let w = vec![weather_snapshot("Mbale", dec!(26), dec!(3))];
        let v = vec![vegetation_snapshot("Mbale", dec!(0.75), dec!(40))];
        let p = vec![price_snapshot("Mbale", "Maize", dec!(12))];
        let (wm, vm, pm) = maps(&w, &v, &p);

        let rows = recommend(&wm, &vm, &pm, ts(8));
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.weather_score, dec!(8));
        assert_eq!(row.vegetation_score, dec!(9));
        assert_eq!(row.market_score, dec!(9));
        assert_eq!(row.overall_score, dec!(8.6));
        assert_eq!(row.category, RecommendationCategory::HighlyRecommended);
        assert_eq!(row.rank, 1);
    }

    #[test]
    fn test_vegetation_second_tier() {
        // NDVI 0.65 misses the top tier's 0.7 bound; 0.65 > 0.5 and 40 > 25 -> 7
        let w = vec![weather_snapshot("Mbale", dec!(26), dec!(3))];
        let v = vec![vegetation_snapshot("Mbale", dec!(0.65), dec!(40))];
        let p = vec![price_snapshot("Mbale", "Maize", dec!(12))];
        let (wm, vm, pm) = maps(&w, &v, &p);

        let rows = recommend(&wm, &vm, &pm, ts(8));
        assert_eq!(rows[0].vegetation_score, dec!(7));
    }

    #[test]
    fn test_missing_vegetation_scores_lowest_tier() {
        let w = vec![weather_snapshot("Gulu", dec!(26), dec!(3))];
        let p = vec![
            price_snapshot("Gulu", "Maize", dec!(1)),
            price_snapshot("Gulu", "Coffee", dec!(1)),
        ];
        let (wm, vm, pm) = maps(&w, &[], &p);

        let rows = recommend(&wm, &vm, &pm, ts(8));
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.vegetation_score == dec!(3)));
        assert!(rows.iter().all(|r| r.vegetation_health.is_none()));
        assert!(rows.iter().all(|r| r.soil_moisture_pct.is_none()));
    }

    #[test]
    fn test_district_without_weather_produces_no_rows() {
        let p = vec![price_snapshot("Gulu", "Maize", dec!(1))];
        let (wm, vm, pm) = maps(&[], &[], &p);
        assert!(recommend(&wm, &vm, &pm, ts(8)).is_empty());
    }

    #[test]
    fn test_district_without_prices_produces_no_rows() {
        let w = vec![weather_snapshot("Gulu", dec!(26), dec!(3))];
        let (wm, vm, pm) = maps(&w, &[], &[]);
        assert!(recommend(&wm, &vm, &pm, ts(8)).is_empty());
    }

    #[test]
    fn test_ranks_are_sequential_and_scores_non_increasing() {
        let w = vec![weather_snapshot("Mbale", dec!(26), dec!(3))];
        let v = vec![vegetation_snapshot("Mbale", dec!(0.75), dec!(40))];
        let p = vec![
            price_snapshot("Mbale", "Maize", dec!(12)),
            price_snapshot("Mbale", "Coffee", dec!(-8)),
            price_snapshot("Mbale", "Cassava", dec!(2)),
            price_snapshot("Mbale", "Quinoa", dec!(0)),
        ];
        let (wm, vm, pm) = maps(&w, &v, &p);

        let rows = recommend(&wm, &vm, &pm, ts(8));
        assert_eq!(rows.len(), 4);
        let mut ranks: Vec<u32> = rows.iter().map(|r| r.rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        for pair in rows.windows(2) {
            assert!(pair[0].overall_score >= pair[1].overall_score);
            assert!(pair[0].rank < pair[1].rank);
        }
    }

    #[test]
    fn test_equal_scores_ranked_by_crop_name() {
        let w = vec![weather_snapshot("Mbale", dec!(40), dec!(0))];
        // Two unknown crops with identical market change: identical scores.
        let p = vec![
            price_snapshot("Mbale", "Millet", dec!(1)),
            price_snapshot("Mbale", "Barley", dec!(1)),
        ];
        let (wm, vm, pm) = maps(&w, &[], &p);

        let rows = recommend(&wm, &vm, &pm, ts(8));
        assert_eq!(rows[0].crop, "Barley");
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[1].crop, "Millet");
        assert_eq!(rows[1].rank, 2);
        assert_eq!(rows[0].overall_score, rows[1].overall_score);
    }

    #[test]
    fn test_overall_equals_weighted_combination() {
        let w = vec![weather_snapshot("Mbale", dec!(26), dec!(3))];
        let v = vec![vegetation_snapshot("Mbale", dec!(0.75), dec!(40))];
        let p = vec![
            price_snapshot("Mbale", "Maize", dec!(12)),
            price_snapshot("Mbale", "Beans", dec!(-12)),
        ];
        let (wm, vm, pm) = maps(&w, &v, &p);

        for row in recommend(&wm, &vm, &pm, ts(8)) {
            assert_eq!(
                row.overall_score,
                rules::overall_score(row.weather_score, row.vegetation_score, row.market_score)
            );
            assert!(row.overall_score >= Decimal::ZERO && row.overall_score <= dec!(10));
        }
    }

    #[test]
    fn test_end_to_end_normalize_then_recommend() {
        let dataset = crate::model::RawDataset {
            weather: vec![RawWeather {
                district: Some("  mbale ".into()),
                latitude: dec!(1.0820),
                longitude: dec!(34.1754),
                temperature: Some(dec!(26)),
                humidity: dec!(55),
                pressure: dec!(1010),
                weather_condition: "Rain".into(),
                weather_description: None,
                wind_speed: dec!(2),
                clouds: 60,
                rainfall: Some(dec!(3)),
                observed_at: ts(6),
                loaded_at: ts(7),
            }],
            prices: vec![RawPrice {
                district: Some("MBALE".into()),
                crop: Some("Maize".into()),
                price_per_kg: Some(dec!(1200)),
                price_7days_ago: Some(dec!(1070)),
                price_change_pct: dec!(12),
                market_source: "test".into(),
                observed_at: ts(6),
                loaded_at: ts(7),
            }],
            vegetation: vec![],
        };

        let normalized = normalize_dataset(&dataset);
        let wm = crate::snapshot::latest_weather(&normalized.weather);
        let vm = crate::snapshot::latest_vegetation(&normalized.vegetation);
        let pm = crate::snapshot::latest_prices(&normalized.prices);
        let rows = recommend(&wm, &vm, &pm, ts(8));

        // district names canonicalize to the same key, so the join holds
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].district, "MBALE");
        assert_eq!(rows[0].weather_score, dec!(8));
    }
}
