/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use chrono::{DateTime, Utc};
use std::collections::HashMap;

/*  Parameters:
name        label               measure
t2m         Air Temperature     degC
ws_10min    Wind Speed          m/s
wg_10min    Gust Speed          m/s
wd_10min    Wind Direction      degrees
rh          Relative humidity   %
r_1h        Precipitation amt   mm
ri_10min    Precip. intensity   mm/h
snow_aws    Snow depth          cm
            -1 = no snow, 0 = snow in vicinity
n_man       Cloud cover         1/8
td          Dew-point temp.     degC
glob_u      Global radiation    W/m2
*/
pub const TEMPERATURE: &str = "t2m";
pub const WIND_SPEED: &str = "ws_10min";
pub const GUST_SPEED: &str = "wg_10min";
pub const WIND_DIRECTION: &str = "wd_10min";
pub const HUMIDITY: &str = "rh";
pub const RAIN_AMOUNT: &str = "r_1h";
pub const RAIN_INTENSITY: &str = "ri_10min";
pub const SNOW_DEPTH: &str = "snow_aws";
pub const CLOUD_COVER: &str = "n_man";
pub const DEW_POINT: &str = "td";
pub const RADIATION: &str = "glob_u";

/// Measures requested from FMI, in query order.
pub const MEASURES: [&str; 11] = [
    TEMPERATURE,
    WIND_SPEED,
    GUST_SPEED,
    WIND_DIRECTION,
    HUMIDITY,
    RAIN_AMOUNT,
    RAIN_INTENSITY,
    SNOW_DEPTH,
    CLOUD_COVER,
    DEW_POINT,
    RADIATION,
];

/// One measured value from one station at one point of time.
#[derive(Debug, Clone, PartialEq)]
pub struct RawObservation {
    pub time: DateTime<Utc>,
    pub location: String,
    pub parameter: String,
    pub value: f64,
}

/// Snapshot of measures for a single place and time.
///
/// FMI reports unmeasured parameters as `NaN`, so a `NaN` value and a
/// parameter that is not present at all are both treated as missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationStore {
    values: HashMap<String, f64>,
}

impl ObservationStore {
    pub fn new() -> ObservationStore {
        ObservationStore::default()
    }

    pub(crate) fn insert(&mut self, parameter: &str, value: f64) {
        self.values.insert(parameter.to_owned(), value);
    }

    pub fn get(&self, parameter: &str) -> Option<f64> {
        match self.values.get(parameter) {
            Some(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    pub fn is_present(&self, parameter: &str) -> bool {
        self.get(parameter).is_some()
    }

    pub fn missing_count(&self, measures: &[&str]) -> usize {
        measures.iter().filter(|m| !self.is_present(m)).count()
    }
}

impl<'a> std::iter::FromIterator<(&'a str, f64)> for ObservationStore {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        let mut store = ObservationStore::new();
        for (parameter, value) in iter {
            store.insert(parameter, value);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_is_missing() {
        let store: ObservationStore = [(TEMPERATURE, 1.5), (HUMIDITY, f64::NAN)]
            .iter()
            .copied()
            .collect();

        assert_eq!(store.get(TEMPERATURE), Some(1.5));
        assert_eq!(store.get(HUMIDITY), None);
        assert_eq!(store.get(SNOW_DEPTH), None);
        assert!(store.is_present(TEMPERATURE));
        assert!(!store.is_present(HUMIDITY));
    }

    #[test]
    fn missing_count() {
        let store: ObservationStore = [(TEMPERATURE, -3.0), (WIND_SPEED, f64::NAN)]
            .iter()
            .copied()
            .collect();

        assert_eq!(store.missing_count(&[TEMPERATURE]), 0);
        assert_eq!(store.missing_count(&[TEMPERATURE, WIND_SPEED, HUMIDITY]), 2);
        assert_eq!(store.missing_count(&MEASURES), MEASURES.len() - 1);
        assert_eq!(ObservationStore::new().missing_count(&MEASURES), MEASURES.len());
    }
}
