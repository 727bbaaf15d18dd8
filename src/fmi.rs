/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use chrono::prelude::*;
use chrono::Duration;
use log::{debug, info, warn};

use crate::config::FmiConfig;
use crate::error::WeatherError;
use crate::http_client::HTTP_CLIENT;
use crate::observation::{ObservationStore, RawObservation, MEASURES};
use crate::render::render;
use crate::selector::select;

const STORED_QUERY: &str = "fmi::observations::weather::simple";

// There should be data every 10 mins
const TIMESTEP_MINUTES: i64 = 10;

#[derive(Debug)]
pub struct FeatureCollection {
    pub matched: u32,
    pub returned: u32,
    pub observations: Vec<RawObservation>,
}

/// The latest complete 10 minute period before `now`.
fn query_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let step = TIMESTEP_MINUTES * 60;
    let end = now
        - Duration::seconds(now.timestamp().rem_euclid(step))
        - Duration::nanoseconds(i64::from(now.timestamp_subsec_nanos()));
    let start = end - Duration::minutes(TIMESTEP_MINUTES);

    (start, end)
}

async fn get_xml(place: &str, config: &FmiConfig) -> Result<String, WeatherError> {
    let (start, end) = query_window(Utc::now());
    let starttime = start.to_rfc3339_opts(SecondsFormat::Secs, true);
    let endtime = end.to_rfc3339_opts(SecondsFormat::Secs, true);
    let maxlocations = config.maxlocations.to_string();
    let parameters = MEASURES.join(",");
    let timestep = TIMESTEP_MINUTES.to_string();

    debug!("Requesting {} from {} to {}", place, starttime, endtime);

    let response = HTTP_CLIENT
        .get(&config.baseurl)
        .query(&[
            ("service", "WFS"),
            ("version", "2.0.0"),
            ("request", "getFeature"),
            ("storedquery_id", STORED_QUERY),
            ("place", place),
            ("maxlocations", &maxlocations),
            ("parameters", &parameters),
            ("timestep", &timestep),
            ("starttime", &starttime),
            ("endtime", &endtime),
        ])
        .send()
        .await
        .map_err(|e| {
            warn!("Request to {} failed: {}", config.baseurl, e);
            WeatherError::FetchFailed
        })?;

    let status = response.status();
    let xml = response.text().await.map_err(|e| {
        warn!("Error reading response: {}", e);
        WeatherError::ReadFailed
    })?;

    // FMI answers 400 OperationParsingFailed for unknown places
    if status != reqwest::StatusCode::OK {
        info!("FMI answered {} for {}", status, place);
        return Err(WeatherError::PlaceNotFound);
    }

    Ok(xml)
}

fn child_text(element: &xmltree::Element, path: &[&str]) -> Option<String> {
    let mut e = element;
    for name in path {
        e = e.get_child(*name)?;
    }

    Some(e.get_text()?.trim().to_owned())
}

fn parse_count(root: &xmltree::Element, attribute: &str) -> Result<u32, WeatherError> {
    match root.attributes.get(attribute) {
        Some(v) => v.trim().parse().map_err(|_| WeatherError::ParseFailed),
        None => Ok(0),
    }
}

fn parse_element(element: &xmltree::Element) -> Result<RawObservation, WeatherError> {
    let location = child_text(element, &["Location", "Point", "pos"]).unwrap_or_default();

    let time = child_text(element, &["Time"])
        .and_then(|t| DateTime::parse_from_rfc3339(&t).ok())
        .ok_or(WeatherError::ParseFailed)?
        .with_timezone(&Utc);

    let parameter = child_text(element, &["ParameterName"]).ok_or(WeatherError::ParseFailed)?;

    // Unmeasured values come as "NaN", which parses as f64::NAN
    let value = child_text(element, &["ParameterValue"])
        .and_then(|v| v.parse::<f64>().ok())
        .ok_or(WeatherError::ParseFailed)?;

    Ok(RawObservation {
        time,
        location,
        parameter,
        value,
    })
}

pub fn parse_feature_collection(xml: &str) -> Result<FeatureCollection, WeatherError> {
    let root = xmltree::Element::parse(xml.as_bytes()).map_err(|e| {
        warn!("Error parsing xml: {}", e);
        WeatherError::ParseFailed
    })?;

    let matched = parse_count(&root, "numberMatched")?;
    let returned = parse_count(&root, "numberReturned")?;

    let mut observations = Vec::new();
    for c in &root.children {
        if let xmltree::XMLNode::Element(member) = c {
            if member.name != "member" {
                continue;
            }
            if let Some(element) = member.get_child("BsWfsElement") {
                observations.push(parse_element(element)?);
            }
        }
    }

    debug!(
        "Parsed {} observations ({} matched, {} returned)",
        observations.len(),
        matched,
        returned
    );

    Ok(FeatureCollection {
        matched,
        returned,
        observations,
    })
}

/// Picks the snapshot to report from an FMI response.
pub fn observations_from_xml(xml: &str) -> Result<ObservationStore, WeatherError> {
    let collection = parse_feature_collection(xml)?;
    if collection.matched == 0 || collection.returned == 0 {
        return Err(WeatherError::NoDataFound);
    }

    select(&collection.observations, &MEASURES)
}

/// Fetches the latest observations for `place` and describes them in Finnish.
pub async fn weather(place: &str, config: &FmiConfig) -> Result<String, WeatherError> {
    if place.is_empty() {
        return Err(WeatherError::EmptyPlace);
    }

    info!("Fetching observations for {}", place);

    let xml = get_xml(place, config).await?;
    let observations = observations_from_xml(&xml)?;

    render(place, &observations)
}
