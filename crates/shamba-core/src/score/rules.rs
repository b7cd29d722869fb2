//! Fixed business rule tables for crop suitability.
//!
//! Rules are data, not control flow: each crop maps to an ordered ladder of
//! scoring tiers, first match wins, with a per-crop fallback. Crops without
//! a dedicated rule receive a neutral default. The constants here are the
//! agronomy baseline for Ugandan staple crops and are not runtime
//! configurable.

use super::round_dp;
use rust_decimal::Decimal;
use std::sync::LazyLock;

/// How a rule claims a crop name.
///
/// Matching is case- and whitespace-sensitive except for `Contains`, which
/// does a literal substring check (still case-sensitive). A crop name that
/// misses every matcher falls through to [`DEFAULT_WEATHER_SCORE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropMatcher {
    Exact(&'static str),
    Contains(&'static str),
}

impl CropMatcher {
    pub fn matches(&self, crop: &str) -> bool {
        match self {
            CropMatcher::Exact(name) => crop == *name,
            CropMatcher::Contains(fragment) => crop.contains(fragment),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CropMatcher::Exact(name) => name,
            CropMatcher::Contains(fragment) => fragment,
        }
    }
}

/// One band of a crop's weather ladder: an inclusive temperature range and
/// an optional strict rainfall minimum.
#[derive(Debug, Clone)]
pub struct WeatherTier {
    pub temp_min: Decimal,
    pub temp_max: Decimal,
    pub min_rainfall: Option<Decimal>,
    pub score: Decimal,
}

impl WeatherTier {
    fn applies(&self, temperature: Decimal, rainfall: Decimal) -> bool {
        temperature >= self.temp_min
            && temperature <= self.temp_max
            && self.min_rainfall.is_none_or(|min| rainfall > min)
    }
}

/// Weather suitability ladder for one crop.
#[derive(Debug, Clone)]
pub struct CropWeatherRule {
    pub matcher: CropMatcher,
    pub tiers: Vec<WeatherTier>,
    pub fallback: Decimal,
}

fn tier(temp_min: i64, temp_max: i64, min_rainfall: Option<Decimal>, score: i64) -> WeatherTier {
    WeatherTier {
        temp_min: Decimal::from(temp_min),
        temp_max: Decimal::from(temp_max),
        min_rainfall,
        score: Decimal::from(score),
    }
}

static WEATHER_RULES: LazyLock<Vec<CropWeatherRule>> = LazyLock::new(|| {
    vec![
        CropWeatherRule {
            matcher: CropMatcher::Exact("Maize"),
            tiers: vec![
                tier(18, 30, Some(Decimal::ONE), 8),
                tier(15, 35, None, 6),
            ],
            fallback: Decimal::from(3),
        },
        CropWeatherRule {
            matcher: CropMatcher::Exact("Beans"),
            tiers: vec![
                tier(16, 28, Some(Decimal::new(5, 1)), 8),
                tier(14, 32, None, 5),
            ],
            fallback: Decimal::from(3),
        },
        CropWeatherRule {
            matcher: CropMatcher::Exact("Cassava"),
            tiers: vec![tier(20, 35, None, 7)],
            fallback: Decimal::from(4),
        },
        CropWeatherRule {
            matcher: CropMatcher::Exact("Sweet Potato"),
            tiers: vec![tier(20, 30, Some(Decimal::ZERO), 7)],
            fallback: Decimal::from(4),
        },
        CropWeatherRule {
            matcher: CropMatcher::Exact("Coffee"),
            tiers: vec![
                tier(18, 24, Some(Decimal::TWO), 9),
                tier(15, 28, None, 6),
            ],
            fallback: Decimal::from(3),
        },
        CropWeatherRule {
            matcher: CropMatcher::Contains("Banana"),
            tiers: vec![tier(20, 30, Some(Decimal::ONE), 8)],
            fallback: Decimal::from(5),
        },
    ]
});

/// Score for crops with no dedicated rule.
pub const DEFAULT_WEATHER_SCORE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// The built-in per-crop weather ladders, in match order.
pub fn weather_rules() -> &'static [CropWeatherRule] {
    &WEATHER_RULES
}

/// Look up the weather suitability score (0-10) for a crop under the given
/// latest conditions. Returns the score and a human-readable reason.
pub fn weather_score(crop: &str, temperature: Decimal, rainfall: Decimal) -> (Decimal, String) {
    for rule in weather_rules() {
        if !rule.matcher.matches(crop) {
            continue;
        }
        for band in &rule.tiers {
            if band.applies(temperature, rainfall) {
                let rain_part = match band.min_rainfall {
                    Some(min) => format!(" and rainfall {rainfall} > {min}mm"),
                    None => String::new(),
                };
                let reason = format!(
                    "{}: temp {} within {}-{}{} -> {}",
                    rule.matcher.label(),
                    temperature,
                    band.temp_min,
                    band.temp_max,
                    rain_part,
                    band.score
                );
                return (band.score, reason);
            }
        }
        let reason = format!(
            "{}: temp {} outside all suitable bands -> {}",
            rule.matcher.label(),
            temperature,
            rule.fallback
        );
        return (rule.fallback, reason);
    }
    (
        DEFAULT_WEATHER_SCORE,
        format!("no rule for '{crop}' -> default {DEFAULT_WEATHER_SCORE}"),
    )
}

/// One band of the crop-independent vegetation ladder: strict minima on
/// both NDVI and soil moisture.
#[derive(Debug, Clone, Copy)]
pub struct VegetationTier {
    pub min_ndvi: Decimal,
    pub min_moisture: Decimal,
    pub score: Decimal,
}

static VEGETATION_TIERS: LazyLock<Vec<VegetationTier>> = LazyLock::new(|| {
    vec![
        VegetationTier {
            min_ndvi: Decimal::new(7, 1),
            min_moisture: Decimal::from(35),
            score: Decimal::from(9),
        },
        VegetationTier {
            min_ndvi: Decimal::new(5, 1),
            min_moisture: Decimal::from(25),
            score: Decimal::from(7),
        },
        VegetationTier {
            min_ndvi: Decimal::new(3, 1),
            min_moisture: Decimal::from(20),
            score: Decimal::from(5),
        },
    ]
});

const VEGETATION_FLOOR: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

pub fn vegetation_tiers() -> &'static [VegetationTier] {
    &VEGETATION_TIERS
}

/// Vegetation suitability score (0-10) from a district's latest NDVI and
/// soil moisture. A district with no vegetation snapshot is evaluated
/// through the same ladder on failing sentinel values (0, 0) and lands on
/// the floor.
pub fn vegetation_score(ndvi: Decimal, soil_moisture_pct: Decimal) -> (Decimal, String) {
    for band in vegetation_tiers() {
        if ndvi > band.min_ndvi && soil_moisture_pct > band.min_moisture {
            let reason = format!(
                "NDVI {} > {} and moisture {}% > {}% -> {}",
                ndvi, band.min_ndvi, soil_moisture_pct, band.min_moisture, band.score
            );
            return (band.score, reason);
        }
    }
    (
        VEGETATION_FLOOR,
        format!("NDVI {ndvi} / moisture {soil_moisture_pct}% below all tiers -> {VEGETATION_FLOOR}"),
    )
}

/// One band of the market ladder: a strict lower bound on the 7-day
/// percent change.
#[derive(Debug, Clone, Copy)]
pub struct MarketTier {
    pub min_change_pct: Decimal,
    pub score: Decimal,
}

static MARKET_TIERS: LazyLock<Vec<MarketTier>> = LazyLock::new(|| {
    vec![
        MarketTier { min_change_pct: Decimal::from(10), score: Decimal::from(9) },
        MarketTier { min_change_pct: Decimal::from(5), score: Decimal::from(8) },
        MarketTier { min_change_pct: Decimal::ZERO, score: Decimal::from(6) },
        MarketTier { min_change_pct: Decimal::from(-5), score: Decimal::from(4) },
    ]
});

const MARKET_FLOOR: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

pub fn market_tiers() -> &'static [MarketTier] {
    &MARKET_TIERS
}

/// Market opportunity score (0-10) from the 7-day price change percent.
pub fn market_score(change_pct: Decimal) -> (Decimal, String) {
    for band in market_tiers() {
        if change_pct > band.min_change_pct {
            let reason = format!(
                "price change {}% > {}% -> {}",
                change_pct, band.min_change_pct, band.score
            );
            return (band.score, reason);
        }
    }
    (
        MARKET_FLOOR,
        format!("price change {change_pct}% at or below -5% -> {MARKET_FLOOR}"),
    )
}

/// Fixed sub-score weights: weather 0.40, vegetation 0.35, market 0.25.
pub fn weights() -> (Decimal, Decimal, Decimal) {
    (Decimal::new(4, 1), Decimal::new(35, 2), Decimal::new(25, 2))
}

/// Weighted combination of the three sub-scores, rounded to 1 decimal
/// (half away from zero).
pub fn overall_score(weather: Decimal, vegetation: Decimal, market: Decimal) -> Decimal {
    let (w, v, m) = weights();
    round_dp(weather * w + vegetation * v + market * m, 1)
}
