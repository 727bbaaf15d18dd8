/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::classify::{cloud_cover, humidex_scale, wind_chill_scale, wind_speed};
use crate::error::WeatherError;
use crate::metrics::{feels_like, humidex, wind_chill_fmi};
use crate::observation::{
    ObservationStore, CLOUD_COVER, DEW_POINT, GUST_SPEED, HUMIDITY, RADIATION, RAIN_AMOUNT,
    RAIN_INTENSITY, SNOW_DEPTH, TEMPERATURE, WIND_DIRECTION, WIND_SPEED,
};

/// Appends at most one fragment of the summary.
type FieldRenderer = fn(&mut String, &ObservationStore);

const FIELDS: [FieldRenderer; 6] = [
    render_temperature,
    render_cloud_cover,
    render_wind,
    render_humidity,
    render_rain,
    render_snow,
];

fn render_temperature(msg: &mut String, obs: &ObservationStore) {
    let t = match obs.get(TEMPERATURE) {
        Some(t) => t,
        None => {
            msg.push_str("lämpötilatiedot puuttuvat");
            return;
        }
    };

    msg.push_str(&format!("lämpötila {:.1}°C", t));

    let feels = match (obs.get(WIND_SPEED), obs.get(HUMIDITY)) {
        (Some(ws), Some(rh)) => Some(feels_like(t, ws, rh, obs.get(RADIATION))),
        _ => None,
    };

    let qualifier = match (obs.get(DEW_POINT), obs.get(WIND_SPEED)) {
        (Some(td), _) if t > 20.0 => humidex_scale(humidex(t, td)),
        (_, Some(ws)) if t <= 10.0 => wind_chill_scale(wind_chill_fmi(t, ws)),
        _ => None,
    };

    match (qualifier, feels) {
        (Some(q), Some(f)) => msg.push_str(&format!(" ({}, tuntuu kuin {:.1}°C)", q, f)),
        (Some(q), None) => msg.push_str(&format!(" ({})", q)),
        (None, Some(f)) => msg.push_str(&format!(" (tuntuu kuin {:.1}°C)", f)),
        (None, None) => {}
    }
}

fn render_cloud_cover(msg: &mut String, obs: &ObservationStore) {
    if let Some(cover) = obs.get(CLOUD_COVER).and_then(cloud_cover) {
        msg.push_str(&format!(", {}", cover));
    }
}

fn render_wind(msg: &mut String, obs: &ObservationStore) {
    if let Some(ws) = obs.get(WIND_SPEED) {
        let wd = obs.get(WIND_DIRECTION).unwrap_or(f64::NAN);
        msg.push_str(&format!(", {} {:.1} m/s", wind_speed(ws, wd), ws));

        if let Some(wg) = obs.get(GUST_SPEED) {
            msg.push_str(&format!(" ({:.1} m/s)", wg));
        }
    }
}

fn render_humidity(msg: &mut String, obs: &ObservationStore) {
    if let Some(rh) = obs.get(HUMIDITY) {
        msg.push_str(&format!(", ilmankosteus {:.0}%", rh));
    }
}

fn render_rain(msg: &mut String, obs: &ObservationStore) {
    if let Some(r) = obs.get(RAIN_AMOUNT).filter(|r| *r >= 0.0) {
        msg.push_str(&format!(", sateen määrä {:.1} mm", r));

        if let Some(ri) = obs.get(RAIN_INTENSITY) {
            msg.push_str(&format!(" ({:.1} mm/h)", ri));
        }
    }
}

fn render_snow(msg: &mut String, obs: &ObservationStore) {
    // Negative depth means there is no reading
    if let Some(snow) = obs.get(SNOW_DEPTH).filter(|s| *s >= 0.0) {
        msg.push_str(&format!(", lumen syvyys {:.0} cm", snow));
    }
}

/// Lower-cases `place` and capitalizes each word, "HELSINKI" -> "Helsinki",
/// "pohjois-haaga" -> "Pohjois-Haaga".
fn title_case(place: &str) -> String {
    let mut titled = String::with_capacity(place.len());
    let mut word_start = true;

    for c in place.chars() {
        if word_start {
            titled.extend(c.to_uppercase());
        } else {
            titled.extend(c.to_lowercase());
        }
        word_start = c.is_whitespace() || c == '-';
    }

    titled
}

/// Writes the weather summary of `place` from a selected snapshot.
pub fn render(place: &str, obs: &ObservationStore) -> Result<String, WeatherError> {
    if place.is_empty() {
        return Err(WeatherError::EmptyPlace);
    }

    let mut msg = format!(
        "Viimeisimmät säähavainnot paikassa {}: ",
        title_case(place)
    );

    for field in FIELDS.iter() {
        field(&mut msg, obs);
    }

    Ok(msg)
}
