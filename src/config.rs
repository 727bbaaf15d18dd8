/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use log::info;
use std::fs::File;
use std::io::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use yaml_rust::yaml::{Yaml, YamlLoader};

pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

const DEFAULT_BASEURL: &str = "https://opendata.fmi.fi/wfs";
const DEFAULT_MAXLOCATIONS: i64 = 2;
const DEFAULT_PLACE: &str = "Helsinki";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error when reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error when parsing configuration: {0}")]
    Yaml(#[from] yaml_rust::ScanError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FmiConfig {
    /// WFS endpoint
    pub baseurl: String,
    /// Number of stations FMI may answer with
    pub maxlocations: i64,
    /// Used when no place is given
    pub place: String,
}

impl Default for FmiConfig {
    fn default() -> Self {
        FmiConfig {
            baseurl: DEFAULT_BASEURL.to_owned(),
            maxlocations: DEFAULT_MAXLOCATIONS,
            place: DEFAULT_PLACE.to_owned(),
        }
    }
}

impl FmiConfig {
    pub fn from_yaml(config: &Yaml) -> FmiConfig {
        let fmi = &config["fmi"];
        let defaults = FmiConfig::default();

        FmiConfig {
            baseurl: fmi["baseurl"]
                .as_str()
                .map(|s| s.to_owned())
                .unwrap_or(defaults.baseurl),
            maxlocations: fmi["maxlocations"]
                .as_i64()
                .filter(|m| *m > 0)
                .unwrap_or(defaults.maxlocations),
            place: fmi["place"]
                .as_str()
                .map(|s| s.to_owned())
                .unwrap_or(defaults.place),
        }
    }

    pub fn from_yaml_str(s: &str) -> Result<FmiConfig, ConfigError> {
        let docs = YamlLoader::load_from_str(s)?;

        Ok(match docs.first() {
            Some(doc) => FmiConfig::from_yaml(doc),
            None => FmiConfig::default(),
        })
    }
}

fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let mut file = File::open(path)?;
    let mut s = String::new();
    file.read_to_string(&mut s)?;

    Ok(s)
}

/// Reads configuration from `path`, or from `config.yml` in the working
/// directory when no path is given. Only an explicitly given file has to
/// exist.
pub fn load_config(path: Option<&Path>) -> Result<FmiConfig, ConfigError> {
    let (path, required) = match path {
        Some(p) => (p, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };

    match read_config_file(path) {
        Ok(s) => {
            let config = FmiConfig::from_yaml_str(&s)?;
            info!("Successfully read {}", path.display());
            Ok(config)
        }
        Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
            info!("No {} found, using defaults", path.display());
            Ok(FmiConfig::default())
        }
        Err(e) => Err(ConfigError::Read {
            path: path.to_owned(),
            source: e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = FmiConfig::from_yaml_str("").unwrap();
        assert_eq!(config, FmiConfig::default());
        assert_eq!(config.baseurl, "https://opendata.fmi.fi/wfs");
        assert_eq!(config.maxlocations, 2);
        assert_eq!(config.place, "Helsinki");
    }

    #[test]
    fn fmi_section() {
        let config = FmiConfig::from_yaml_str(
            "fmi:\n  baseurl: \"http://localhost:8080/wfs\"\n  maxlocations: 1\n  place: Tampere\n",
        )
        .unwrap();
        assert_eq!(config.baseurl, "http://localhost:8080/wfs");
        assert_eq!(config.maxlocations, 1);
        assert_eq!(config.place, "Tampere");
    }

    #[test]
    fn partial_section() {
        let config = FmiConfig::from_yaml_str("fmi:\n  maxlocations: 0\n  place: Oulu\n").unwrap();
        assert_eq!(config.baseurl, "https://opendata.fmi.fi/wfs");
        assert_eq!(config.maxlocations, 2);
        assert_eq!(config.place, "Oulu");
    }

    #[test]
    fn invalid_yaml() {
        assert!(FmiConfig::from_yaml_str("fmi: [unclosed").is_err());
    }

    #[test]
    fn missing_explicit_file() {
        let path = Path::new("/nonexistent/fmi-saa/config.yml");
        assert!(matches!(
            load_config(Some(path)),
            Err(ConfigError::Read { .. })
        ));
    }
}
