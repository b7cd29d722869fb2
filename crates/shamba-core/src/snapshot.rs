//! Latest-observation selection.
//!
//! Each scoring run looks at exactly one record per key: the one with the
//! greatest `observed_at`. Ties are broken by greater `loaded_at`; if both
//! timestamps are equal the first record in input order wins. The full
//! normalized history stays available upstream; nothing here is persisted.

use crate::normalize::{NormalizedPrice, NormalizedVegetation, NormalizedWeather};
use chrono::{DateTime, Utc};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

fn select_latest<'a, T, K: Ord>(
    records: &'a [T],
    key: impl Fn(&T) -> K,
    stamps: impl Fn(&T) -> (DateTime<Utc>, DateTime<Utc>),
) -> BTreeMap<K, &'a T> {
    let mut latest: BTreeMap<K, &'a T> = BTreeMap::new();
    for record in records {
        match latest.entry(key(record)) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(mut slot) => {
                // Strict comparison keeps the earlier input record on a full tie.
                if stamps(record) > stamps(slot.get()) {
                    slot.insert(record);
                }
            }
        }
    }
    latest
}

/// Latest weather snapshot per district.
pub fn latest_weather(records: &[NormalizedWeather]) -> BTreeMap<String, &NormalizedWeather> {
    select_latest(records, |r| r.district.clone(), |r| (r.observed_at, r.loaded_at))
}

/// Latest vegetation snapshot per district.
pub fn latest_vegetation(
    records: &[NormalizedVegetation],
) -> BTreeMap<String, &NormalizedVegetation> {
    select_latest(records, |r| r.district.clone(), |r| (r.observed_at, r.loaded_at))
}

/// Latest price snapshot per (district, crop) pair.
pub fn latest_prices(records: &[NormalizedPrice]) -> BTreeMap<(String, String), &NormalizedPrice> {
    select_latest(
        records,
        |r| (r.district.clone(), r.crop.clone()),
        |r| (r.observed_at, r.loaded_at),
    )
}
