use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::parameters::{InvalidInput, NetworkConfig, PriceSchedule, SelfCollectionCap};

#[derive(Error, Debug)]
pub enum NetworkYamlError {
    #[error("failed to read network yaml file {path}: {source}")]
    ReadFile { path: PathBuf, source: io::Error },
    #[error("failed to parse network yaml file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("invalid network config in {path}: {source}")]
    Invalid { path: PathBuf, source: InvalidInput },
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct NetworkRecord {
    min_deliveries: Option<u32>,
    max_deliveries: Option<u32>,
    home_probability: Option<f64>,
    pickup_probability: Option<f64>,
    price_threshold: Option<u32>,
    price_below: Option<f64>,
    price_above: Option<f64>,
    self_collection_cap: Option<CapRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum CapRecord {
    HomeBound,
    Uncapped,
}

/// Loads a network description; keys missing from the file keep their
/// default value.
pub fn load_network_from_yaml_file<P: AsRef<Path>>(
    path: P,
) -> Result<NetworkConfig, NetworkYamlError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| NetworkYamlError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    deserialize_network_from_yaml_str(&contents, path)
}

fn deserialize_network_from_yaml_str(
    input: &str,
    origin_path: &Path,
) -> Result<NetworkConfig, NetworkYamlError> {
    // An empty document means "all defaults".
    let record: NetworkRecord = if input.trim().is_empty() {
        NetworkRecord::default()
    } else {
        serde_yaml::from_str(input).map_err(|source| NetworkYamlError::Parse {
            path: origin_path.to_path_buf(),
            source,
        })?
    };

    let defaults = NetworkConfig::default();
    let network = NetworkConfig {
        min_deliveries: record.min_deliveries.unwrap_or(defaults.min_deliveries),
        max_deliveries: record.max_deliveries.unwrap_or(defaults.max_deliveries),
        home_probability: record.home_probability.unwrap_or(defaults.home_probability),
        pickup_probability: record
            .pickup_probability
            .unwrap_or(defaults.pickup_probability),
        price_schedule: PriceSchedule {
            threshold: record
                .price_threshold
                .unwrap_or(defaults.price_schedule.threshold),
            rate_below: record
                .price_below
                .unwrap_or(defaults.price_schedule.rate_below),
            rate_above: record
                .price_above
                .unwrap_or(defaults.price_schedule.rate_above),
        },
        self_collection_cap: match record.self_collection_cap {
            Some(CapRecord::HomeBound) => SelfCollectionCap::HomeBound,
            Some(CapRecord::Uncapped) => SelfCollectionCap::Uncapped,
            None => defaults.self_collection_cap,
        },
    };

    network
        .validate()
        .map_err(|source| NetworkYamlError::Invalid {
            path: origin_path.to_path_buf(),
            source,
        })?;
    Ok(network)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<NetworkConfig, NetworkYamlError> {
        deserialize_network_from_yaml_str(input, Path::new("network.yaml"))
    }

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(parse("").unwrap(), NetworkConfig::default());
    }

    #[test]
    fn partial_document_overrides_only_given_keys() {
        let network = parse(
            "max_deliveries: 80\npickup_probability: 0.5\nprice_above: 3.5\nself_collection_cap: uncapped\n",
        )
        .unwrap();

        assert_eq!(network.min_deliveries, 10);
        assert_eq!(network.max_deliveries, 80);
        assert_eq!(network.pickup_probability, 0.5);
        assert_eq!(network.home_probability, 0.5);
        assert_eq!(network.price_schedule.threshold, 10);
        assert_eq!(network.price_schedule.rate_above, 3.5);
        assert_eq!(network.self_collection_cap, SelfCollectionCap::Uncapped);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse("lockers: 12\n").unwrap_err();
        assert!(matches!(err, NetworkYamlError::Parse { .. }));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = parse("home_probability: 1.5\n").unwrap_err();
        match err {
            NetworkYamlError::Invalid { source, .. } => {
                assert_eq!(source.parameter, "home_probability")
            }
            other => panic!("expected invalid config, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_network_from_yaml_file("does/not/exist.yaml").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.yaml"));
    }
}
