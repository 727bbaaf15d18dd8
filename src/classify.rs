/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Textual classifications of measured and derived values.
//!
//! Every scale is a table of buckets in ascending order. A value falls into
//! the first bucket whose bound admits it; a value that no bucket admits, or
//! that fails the scale's domain check, has no classification.

#[derive(Debug, Clone, Copy)]
enum Bound {
    Below(f64),
    UpTo(f64),
    Exactly(f64),
    Unbounded,
}

impl Bound {
    fn admits(self, value: f64) -> bool {
        match self {
            Bound::Below(limit) => value < limit,
            Bound::UpTo(limit) => value <= limit,
            Bound::Exactly(limit) => value == limit,
            Bound::Unbounded => !value.is_nan(),
        }
    }
}

type Scale<T> = [(Bound, T)];

fn classify<T: Copy>(scale: &Scale<T>, value: f64) -> Option<T> {
    scale
        .iter()
        .find(|(bound, _)| bound.admits(value))
        .map(|(_, label)| *label)
}

// https://ilmatieteenlaitos.fi/tuulet
const WIND_DIRECTIONS: [(Bound, &str); 9] = [
    (Bound::UpTo(22.5), "pohjois"),
    (Bound::Below(67.5), "koillis"),
    (Bound::UpTo(112.5), "itä"),
    (Bound::Below(157.5), "kaakkois"),
    (Bound::UpTo(202.5), "etelä"),
    (Bound::Below(247.5), "lounais"),
    (Bound::UpTo(292.5), "länsi"),
    (Bound::Below(337.5), "luoteis"),
    (Bound::UpTo(360.0), "pohjois"),
];

#[derive(Debug, Clone, Copy)]
enum WindClass {
    Calm(&'static str),
    Directional(&'static str),
}

const WIND_SPEEDS: [(Bound, WindClass); 7] = [
    (Bound::Below(1.0), WindClass::Calm("tyyntä")),
    (Bound::UpTo(4.0), WindClass::Directional("heikkoa")),
    (Bound::UpTo(8.0), WindClass::Directional("kohtalaista")),
    (Bound::UpTo(14.0), WindClass::Directional("navakkaa")),
    (Bound::UpTo(21.0), WindClass::Directional("kovaa")),
    (Bound::Below(33.0), WindClass::Calm("myrskyä")),
    (Bound::Unbounded, WindClass::Calm("hirmumyrskyä")),
];

// https://ilmatieteenlaitos.fi/pilvisyys
const CLOUD_COVERS: [(Bound, &str); 6] = [
    (Bound::UpTo(1.0), "selkeää"),
    (Bound::UpTo(3.0), "melko selkeää"),
    (Bound::UpTo(5.0), "puolipilvistä"),
    (Bound::UpTo(7.0), "melko pilvistä"),
    (Bound::UpTo(8.0), "pilvistä"),
    (Bound::Exactly(9.0), "taivas ei näy"),
];

// https://web.archive.org/web/20150319113439/http://ilmatieteenlaitos.fi/tietoa-helteen-tukaluudesta
const HUMIDEX_SCALE: [(Bound, &str); 5] = [
    (Bound::UpTo(26.0), "mukava"),
    (Bound::UpTo(30.0), "lämmin"),
    (Bound::UpTo(34.0), "kuuma"),
    (Bound::UpTo(40.0), "tukala"),
    (Bound::Unbounded, "erittäin tukala"),
];

// https://fi.wikipedia.org/wiki/Pakkasen_purevuus
const WIND_CHILL_SCALE: [(Bound, &str); 3] = [
    (Bound::UpTo(-60.0), "suuri paleltumisvaara"),
    (Bound::UpTo(-35.0), "paleltumisvaara"),
    (Bound::UpTo(-25.0), "erittäin kylmä"),
];

/// Compass direction prefix for wind direction `d` in degrees (0-360),
/// e.g. "lounais" for 225.
pub fn wind_direction(d: f64) -> Option<&'static str> {
    if !(0.0..=360.0).contains(&d) {
        return None;
    }
    classify(&WIND_DIRECTIONS, d)
}

/// Describes wind speed `s` (m/s) blowing from direction `d` (degrees).
/// Returns an empty string for negative or unknown speeds.
pub fn wind_speed(s: f64, d: f64) -> String {
    if s.is_nan() || s < 0.0 {
        return String::new();
    }

    match classify(&WIND_SPEEDS, s) {
        Some(WindClass::Calm(label)) => label.to_owned(),
        Some(WindClass::Directional(strength)) => format!(
            "{} {}tuulta",
            strength,
            wind_direction(d).unwrap_or_default()
        ),
        None => String::new(),
    }
}

/// Cloud cover `d` in eighths of the sky, 9 meaning the sky is not visible.
pub fn cloud_cover(d: f64) -> Option<&'static str> {
    if !(0.0..=9.0).contains(&d) {
        return None;
    }
    classify(&CLOUD_COVERS, d)
}

pub fn humidex_scale(h: f64) -> Option<&'static str> {
    if h.is_nan() || h < 20.0 {
        return None;
    }
    classify(&HUMIDEX_SCALE, h)
}

pub fn wind_chill_scale(w: f64) -> Option<&'static str> {
    if w.is_nan() || w > -25.0 {
        return None;
    }
    classify(&WIND_CHILL_SCALE, w)
}
