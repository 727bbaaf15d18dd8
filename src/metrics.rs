/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Comfort indices derived from temperature, humidity, wind and radiation.

/// Humidity index for air temperature `t` (°C) and dew point `td` (°C).
/// Only meaningful above 20°C.
///
/// https://en.wikipedia.org/wiki/Humidex
pub fn humidex(t: f64, td: f64) -> f64 {
    t + 5.0 / 9.0 * (6.11 * (5417.7530 * (1.0 / 273.16 - 1.0 / (273.15 + td))).exp() - 10.0)
}

/// Canadian wind chill for temperatures at or below 10°C, wind `v` in m/s.
///
/// https://fi.wikipedia.org/wiki/Pakkasen_purevuus#Uusi_kaava
pub fn wind_chill(t: f64, v: f64) -> f64 {
    13.12 + 0.6215 * t - 13.956 * v.powf(0.16) + 0.4867 * t * v.powf(0.16)
}

/// FMI's wind chill. Below 5 km/h the index is blended linearly towards the
/// air temperature.
///
/// https://github.com/fmidev/smartmet-library-newbase/blob/0da9473163883089c35a4c7267ba4c8a8bb3e14f/newbase/NFmiMetMath.cpp#L380
pub fn wind_chill_fmi(t: f64, v: f64) -> f64 {
    let kmh = v * 3.6;

    if kmh < 5.0 {
        return t + (-1.59 + 0.1345 * t) / 5.0 * kmh;
    }

    // The exponent takes the speed in m/s
    13.12 + 0.6215 * t - 11.37 * v.powf(0.16) + 0.3965 * t * v.powf(0.16)
}

/// Summer simmer index, relative humidity `rh` in percent.
///
/// http://www.summersimmer.com/home.htm
pub fn summer_simmer(t: f64, rh: f64) -> f64 {
    const SIMMER_LIMIT: f64 = 14.5;
    const RH_REF: f64 = 50.0 / 100.0;

    if t <= SIMMER_LIMIT {
        return t;
    }

    let r = rh / 100.0;

    (1.8 * t - 0.55 * (1.0 - r) * (1.8 * t - 26.0) - 0.55 * (1.0 - RH_REF) * 26.0)
        / (1.8 * (1.0 - 0.55 * (1.0 - RH_REF)))
}

/// FMI's "tuntuu kuin" temperature combining wind chill, summer simmer and,
/// when available, global radiation `rad` (W/m²).
///
/// https://tietopyynto.fi/tietopyynto/ilmatieteen-laitoksen-kayttama-tuntuu-kuin-laskentakaava/
pub fn feels_like(t: f64, v: f64, rh: f64, rad: Option<f64>) -> f64 {
    const A: f64 = 15.0;
    const T0: f64 = 37.0;
    const ABSORPTION: f64 = 0.07;

    let chill = A + (1.0 - A / T0) * t + A / T0 * (v + 1.0).powf(0.16) * (t - T0);
    let heat = summer_simmer(t, rh);

    let mut feels = t + (chill - t) + (heat - t);

    if let Some(rad) = rad.filter(|r| !r.is_nan()) {
        feels += 0.7 * ABSORPTION * rad / (v + 10.0) - 0.25;
    }

    feels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(got: f64, want: f64) {
        assert!(
            (got - want).abs() < 0.0001,
            "got {}, wanted {}",
            got,
            want
        );
    }

    #[test]
    fn humidex_values() {
        assert_close(humidex(30.0, 15.0), 33.96940099074554);
        assert_close(humidex(30.0, 25.0), 42.33964388030867);
        assert_close(humidex(22.9, 15.0), 26.86940099074554);
    }

    #[test]
    fn wind_chill_values() {
        assert_close(wind_chill(-20.0, 1.389), -24.278786);
        assert_close(wind_chill(-20.0, 8.333), -32.567782);
        assert_close(wind_chill(9.0, 4.0), 6.759861);
    }

    #[test]
    fn wind_chill_fmi_values() {
        assert_close(wind_chill_fmi(0.0, 0.0), 0.0);
        assert_close(wind_chill_fmi(10.0, 0.0), 10.0);
        // 1 m/s is 3.6 km/h, below the blending limit
        assert_close(wind_chill_fmi(0.0, 1.0), -1.1448);
        assert_close(wind_chill_fmi(0.0, 5.0), -1.5894239550074207);
        assert_close(wind_chill_fmi(-5.0, 5.0), -7.261693787092048);
        assert_close(wind_chill_fmi(-22.9, 15.0), -32.652570722109374);
    }

    #[test]
    fn summer_simmer_values() {
        assert_close(summer_simmer(10.0, 50.0), 10.0);
        assert_close(summer_simmer(14.5, 50.0), 14.5);
        assert_close(summer_simmer(20.0, 50.0), 20.0);
        assert_close(summer_simmer(20.0, 90.0), 21.685823754789276);
    }

    #[test]
    fn feels_like_without_radiation() {
        assert_close(feels_like(0.0, 0.0, 50.0, None), 0.0);
        assert_close(feels_like(10.0, 0.0, 50.0, None), 10.0);
        assert_close(feels_like(0.0, 5.0, 50.0, None), -4.979998860306697);
        assert_close(feels_like(-5.0, 5.0, 50.0, None), -10.652971679267061);
        assert_close(feels_like(25.0, 5.0, 50.0, None), 23.384865234495123);
        assert_close(feels_like(25.0, 5.0, 90.0, None), 26.58793036859474);
        assert_close(feels_like(0.0, 5.0, 50.0, Some(f64::NAN)), -4.979998860306697);
    }

    #[test]
    fn feels_like_with_radiation() {
        assert_close(feels_like(0.0, 0.0, 50.0, Some(0.0)), -0.25);
        assert_close(feels_like(10.0, 0.0, 50.0, Some(50.0)), 9.995);
        assert_close(feels_like(0.0, 5.0, 50.0, Some(800.0)), -2.6166655269733634);
        assert_close(feels_like(25.0, 5.0, 50.0, Some(425.0)), 24.523198567828455);
    }
}
