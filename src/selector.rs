/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use chrono::{DateTime, Utc};
use log::debug;
use std::collections::{HashMap, HashSet};

use crate::error::WeatherError;
use crate::observation::{ObservationStore, RawObservation};

/// Observations of one batch indexed by (time, location).
struct Grouping {
    times: Vec<DateTime<Utc>>,
    locations: Vec<String>,
    stores: HashMap<(DateTime<Utc>, usize), ObservationStore>,
}

impl Grouping {
    fn build(raws: &[RawObservation]) -> Grouping {
        let mut times = Vec::new();
        let mut seen_times = HashSet::new();
        let mut locations: Vec<String> = Vec::new();
        let mut location_index: HashMap<&str, usize> = HashMap::new();
        let mut stores = HashMap::new();

        for obs in raws {
            if seen_times.insert(obs.time) {
                times.push(obs.time);
            }

            let location = *location_index
                .entry(obs.location.as_str())
                .or_insert_with(|| {
                    locations.push(obs.location.to_owned());
                    locations.len() - 1
                });

            stores
                .entry((obs.time, location))
                .or_insert_with(ObservationStore::new)
                .insert(&obs.parameter, obs.value);
        }

        // Most recent first
        times.sort_by(|a, b| b.cmp(a));

        Grouping {
            times,
            locations,
            stores,
        }
    }

    fn keys(&self) -> impl Iterator<Item = (DateTime<Utc>, usize)> + '_ {
        self.times.iter().flat_map(move |t| {
            (0..self.locations.len())
                .map(move |l| (*t, l))
                .filter(move |k| self.stores.contains_key(k))
        })
    }
}

/// Picks the snapshot to report from a batch of observations.
///
/// Groups are visited from the most recent time to the oldest and, within a
/// time, in the order the stations first appeared in the batch. Every group
/// with at least one of `measures` present replaces the previous pick, so the
/// last qualifying group in that order is returned.
pub fn select(
    raws: &[RawObservation],
    measures: &[&str],
) -> Result<ObservationStore, WeatherError> {
    let mut grouping = Grouping::build(raws);

    let mut selected = None;
    for key in grouping.keys() {
        let missing = grouping.stores[&key].missing_count(measures);
        if missing < measures.len() {
            selected = Some(key);
        }
    }

    match selected.and_then(|key| {
        debug!(
            "Selected observations at {} from {}",
            key.0, grouping.locations[key.1]
        );
        grouping.stores.remove(&key)
    }) {
        Some(store) => Ok(store),
        None => {
            debug!("No usable observations among {} records", raws.len());
            Err(WeatherError::NoDataFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const HELSINKI: &str = "60.17523 24.94459";
    const KUMPULA: &str = "60.20307 24.96130";

    fn raw(minute: u32, location: &str, parameter: &str, value: f64) -> RawObservation {
        RawObservation {
            time: Utc.with_ymd_and_hms(2024, 1, 15, 12, minute, 0).unwrap(),
            location: location.to_owned(),
            parameter: parameter.to_owned(),
            value,
        }
    }

    #[test]
    fn empty_batch() {
        assert_eq!(select(&[], &["t2m"]), Err(WeatherError::NoDataFound));
    }

    #[test]
    fn all_missing() {
        let raws = vec![
            raw(0, HELSINKI, "t2m", f64::NAN),
            raw(10, HELSINKI, "t2m", f64::NAN),
            raw(10, KUMPULA, "rh", 80.0),
        ];
        assert_eq!(select(&raws, &["t2m"]), Err(WeatherError::NoDataFound));
    }

    #[test]
    fn no_tracked_measures() {
        let raws = vec![raw(0, HELSINKI, "t2m", 1.0)];
        assert_eq!(select(&raws, &[]), Err(WeatherError::NoDataFound));
    }

    #[test]
    fn single_group() {
        let raws = vec![
            raw(10, HELSINKI, "t2m", -1.3),
            raw(10, HELSINKI, "rh", 96.0),
            raw(10, HELSINKI, "ws_10min", f64::NAN),
        ];
        let store = select(&raws, &["t2m", "rh", "ws_10min"]).unwrap();
        assert_eq!(store.get("t2m"), Some(-1.3));
        assert_eq!(store.get("rh"), Some(96.0));
        assert_eq!(store.get("ws_10min"), None);
    }

    #[test]
    fn last_write_wins() {
        let raws = vec![
            raw(10, HELSINKI, "t2m", 1.0),
            raw(10, HELSINKI, "t2m", 2.0),
        ];
        let store = select(&raws, &["t2m"]).unwrap();
        assert_eq!(store.get("t2m"), Some(2.0));
    }

    #[test]
    fn oldest_qualifying_time_is_kept() {
        // The scan keeps overwriting, so the older complete snapshot wins
        // over the newer one.
        let raws = vec![
            raw(20, HELSINKI, "t2m", 3.0),
            raw(0, HELSINKI, "t2m", 1.0),
            raw(10, HELSINKI, "t2m", 2.0),
        ];
        let store = select(&raws, &["t2m"]).unwrap();
        assert_eq!(store.get("t2m"), Some(1.0));
    }

    #[test]
    fn empty_older_snapshot_is_skipped() {
        let raws = vec![
            raw(0, HELSINKI, "t2m", f64::NAN),
            raw(0, HELSINKI, "rh", f64::NAN),
            raw(10, HELSINKI, "t2m", 2.0),
            raw(10, HELSINKI, "rh", f64::NAN),
        ];
        let store = select(&raws, &["t2m", "rh"]).unwrap();
        assert_eq!(store.get("t2m"), Some(2.0));
    }

    #[test]
    fn later_station_within_time_wins() {
        let raws = vec![
            raw(10, HELSINKI, "t2m", 1.0),
            raw(10, KUMPULA, "t2m", 5.0),
            raw(0, KUMPULA, "rh", f64::NAN),
            raw(0, HELSINKI, "t2m", f64::NAN),
        ];
        let store = select(&raws, &["t2m", "rh"]).unwrap();
        assert_eq!(store.get("t2m"), Some(5.0));
    }

    #[test]
    fn station_order_follows_first_appearance() {
        // Kumpula appears first in the batch, so Helsinki is visited last.
        let raws = vec![
            raw(0, KUMPULA, "rh", f64::NAN),
            raw(10, HELSINKI, "t2m", 1.0),
            raw(10, KUMPULA, "t2m", 5.0),
        ];
        let store = select(&raws, &["t2m"]).unwrap();
        assert_eq!(store.get("t2m"), Some(1.0));
    }

    #[test]
    fn many_stations() {
        let stations: Vec<String> = (0..50).map(|i| format!("60.{:02} 24.00", i)).collect();
        let mut raws = Vec::new();
        for minute in &[0, 10, 20] {
            for (i, station) in stations.iter().enumerate() {
                raws.push(raw(*minute, station, "t2m", i as f64));
                raws.push(raw(*minute, station, "rh", f64::NAN));
            }
        }
        // The last station now appears first in the batch
        raws.reverse();

        let store = select(&raws, &["t2m", "rh"]).unwrap();
        assert_eq!(store.get("t2m"), Some(0.0));
        assert_eq!(store.get("rh"), None);
    }

    #[test]
    fn result_is_never_empty() {
        let raws = vec![
            raw(0, HELSINKI, "t2m", f64::NAN),
            raw(10, KUMPULA, "snow_aws", 12.0),
            raw(20, HELSINKI, "rh", f64::NAN),
        ];
        let measures = ["t2m", "rh", "snow_aws"];
        let store = select(&raws, &measures).unwrap();
        assert!(store.missing_count(&measures) < measures.len());
        assert_eq!(store.get("snow_aws"), Some(12.0));
    }
}
