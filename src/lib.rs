/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Latest weather observations from the Finnish Meteorological Institute's
//! open data service, described in Finnish.

#[macro_use]
extern crate lazy_static;

pub mod classify;
pub mod config;
pub mod error;
pub mod fmi;
pub mod metrics;
pub mod observation;
pub mod render;
pub mod selector;

mod http_client;

pub use config::{load_config, ConfigError, FmiConfig};
pub use error::WeatherError;
pub use fmi::weather;
pub use observation::{ObservationStore, RawObservation};
