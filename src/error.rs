/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use thiserror::Error;

/// Terminal failures of a single weather query. The messages are shown to
/// users as is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WeatherError {
    #[error("paikkaa ei syötetty")]
    EmptyPlace,
    #[error("säähavaintoja ei saatu haettua")]
    FetchFailed,
    #[error("virhe luettaessa havaintoja")]
    ReadFailed,
    #[error("säähavaintopaikkaa ei löytynyt")]
    PlaceNotFound,
    #[error("virhe parsittaessa havaintoja")]
    ParseFailed,
    #[error("säähavaintoja ei löytynyt")]
    NoDataFound,
}
