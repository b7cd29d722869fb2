use super::round_dp;
use crate::model::{canonical_district, RawPrice};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 7-day price movement bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceTrend {
    #[serde(rename = "Rising Fast")]
    RisingFast,
    Rising,
    Stable,
    Falling,
    #[serde(rename = "Falling Fast")]
    FallingFast,
}

impl fmt::Display for PriceTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceTrend::RisingFast => write!(f, "Rising Fast"),
            PriceTrend::Rising => write!(f, "Rising"),
            PriceTrend::Stable => write!(f, "Stable"),
            PriceTrend::Falling => write!(f, "Falling"),
            PriceTrend::FallingFast => write!(f, "Falling Fast"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SellingAdvice {
    #[serde(rename = "Good Selling Opportunity")]
    GoodSellingOpportunity,
    #[serde(rename = "Wait to Sell")]
    WaitToSell,
    Neutral,
}

impl fmt::Display for SellingAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SellingAdvice::GoodSellingOpportunity => write!(f, "Good Selling Opportunity"),
            SellingAdvice::WaitToSell => write!(f, "Wait to Sell"),
            SellingAdvice::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Cleaned, enriched market price record for one (district, crop) observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedPrice {
    pub district: String,
    pub crop: String,
    pub price_per_kg: Decimal,
    pub price_7days_ago: Decimal,
    pub price_change_pct: Decimal,
    pub market_source: String,
    pub price_trend: PriceTrend,
    pub selling_advice: SellingAdvice,
    /// Signed difference between current and 7-days-ago price, in currency units.
    pub price_delta: Decimal,
    /// Magnitude of the 7-day percent change.
    pub volatility: Decimal,
    pub observed_at: DateTime<Utc>,
    pub loaded_at: DateTime<Utc>,
}

pub fn price_trend(change_pct: Decimal) -> PriceTrend {
    if change_pct > Decimal::from(10) {
        PriceTrend::RisingFast
    } else if change_pct > Decimal::from(3) {
        PriceTrend::Rising
    } else if change_pct > Decimal::from(-3) {
        PriceTrend::Stable
    } else if change_pct > Decimal::from(-10) {
        PriceTrend::Falling
    } else {
        PriceTrend::FallingFast
    }
}

pub fn selling_advice(change_pct: Decimal) -> SellingAdvice {
    if change_pct > Decimal::from(5) {
        SellingAdvice::GoodSellingOpportunity
    } else if change_pct < Decimal::from(-5) {
        SellingAdvice::WaitToSell
    } else {
        SellingAdvice::Neutral
    }
}

/// Normalize one raw price record, or drop it.
///
/// Rejects records with a missing or non-positive price, a missing 7-day
/// history price, or no usable district or crop name. Crop names are
/// trimmed but otherwise preserved; rule matching downstream is
/// case-sensitive.
pub fn normalize_price(raw: &RawPrice) -> Option<NormalizedPrice> {
    let district = canonical_district(raw.district.as_deref())?;
    let crop = raw.crop.as_deref().map(str::trim).filter(|c| !c.is_empty())?;
    let price = raw.price_per_kg.filter(|p| *p > Decimal::ZERO)?;

    let price_per_kg = round_dp(price, 2);
    let price_7days_ago = round_dp(raw.price_7days_ago?, 2);
    let price_change_pct = round_dp(raw.price_change_pct, 2);

    Some(NormalizedPrice {
        district,
        crop: crop.to_string(),
        price_per_kg,
        price_7days_ago,
        price_change_pct,
        market_source: raw.market_source.clone(),
        price_trend: price_trend(price_change_pct),
        selling_advice: selling_advice(price_change_pct),
        price_delta: round_dp(price_per_kg - price_7days_ago, 2),
        volatility: price_change_pct.abs(),
        observed_at: raw.observed_at,
        loaded_at: raw.loaded_at,
    })
}
