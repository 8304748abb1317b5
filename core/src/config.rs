use aws_config::{BehaviorVersion, Region, SdkConfig};
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub const DEFAULT_RESULTS: usize = 8;

pub const ENV_ORDER_EVENTS_STREAM: &str = "order_events_stream";
pub const ENV_RESTAURANTS_TABLE: &str = "restaurants_table";
pub const ENV_DEFAULT_RESULTS: &str = "defaultResults";
pub const ENV_AWS_REGION: &str = "AWS_REGION";
pub const ENV_AWS_ENDPOINT_URL: &str = "AWS_ENDPOINT_URL";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AppConfig {
    /// Kinesis stream receiving `order_placed` events.
    #[serde(default)]
    pub order_events_stream: Option<String>,
    /// DynamoDB table holding the restaurant catalogue.
    #[serde(default)]
    pub restaurants_table: Option<String>,
    /// Scan limit for listing and search.
    #[serde(default = "default_results")]
    pub default_results: usize,
    #[serde(default)]
    pub aws: AwsOptions,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct AwsOptions {
    pub region: Option<String>,
    /// Override for LocalStack and similar emulators.
    pub endpoint_url: Option<String>,
}

fn default_results() -> usize {
    DEFAULT_RESULTS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            order_events_stream: None,
            restaurants_table: None,
            default_results: DEFAULT_RESULTS,
            aws: AwsOptions::default(),
        }
    }
}

pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let config = match config_path {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env(),
    };
    config.validate()?;
    Ok(config)
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            origin: path.to_string(),
            error: Box::new(e),
        })?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            origin: path.to_string(),
            error: Box::new(e),
        })
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup. Blank values
    /// count as unset and an unparsable `defaultResults` falls back to the
    /// default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            order_events_stream: non_blank(ENV_ORDER_EVENTS_STREAM),
            restaurants_table: non_blank(ENV_RESTAURANTS_TABLE),
            default_results: non_blank(ENV_DEFAULT_RESULTS)
                .and_then(|value| value.trim().parse::<usize>().ok())
                .filter(|count| *count > 0)
                .unwrap_or(DEFAULT_RESULTS),
            aws: AwsOptions {
                region: non_blank(ENV_AWS_REGION),
                endpoint_url: non_blank(ENV_AWS_ENDPOINT_URL),
            },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_results == 0 {
            return Err(ConfigError::Invalid {
                message: "default_results must be greater than zero".to_string(),
            });
        }
        if matches!(&self.order_events_stream, Some(name) if name.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                message: "order_events_stream cannot be blank".to_string(),
            });
        }
        if matches!(&self.restaurants_table, Some(name) if name.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                message: "restaurants_table cannot be blank".to_string(),
            });
        }
        Ok(())
    }

    pub fn require_stream(&self) -> Result<&str, ConfigError> {
        self.order_events_stream
            .as_deref()
            .ok_or_else(|| ConfigError::MissingField {
                field: ENV_ORDER_EVENTS_STREAM.to_string(),
            })
    }

    pub fn require_table(&self) -> Result<&str, ConfigError> {
        self.restaurants_table
            .as_deref()
            .ok_or_else(|| ConfigError::MissingField {
                field: ENV_RESTAURANTS_TABLE.to_string(),
            })
    }
}

impl AwsOptions {
    /// Resolves the shared SDK configuration, applying region and endpoint
    /// overrides on top of the default provider chain.
    pub async fn load_sdk_config(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }

        if let Some(endpoint_url) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        loader.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("order_events_stream", "order-events"),
            ("restaurants_table", "restaurants"),
            ("defaultResults", "3"),
            ("AWS_REGION", "ap-southeast-1"),
            ("AWS_ENDPOINT_URL", "http://localhost:4566"),
        ]));

        assert_eq!(config.order_events_stream.as_deref(), Some("order-events"));
        assert_eq!(config.restaurants_table.as_deref(), Some("restaurants"));
        assert_eq!(config.default_results, 3);
        assert_eq!(config.aws.region.as_deref(), Some("ap-southeast-1"));
        assert_eq!(
            config.aws.endpoint_url.as_deref(),
            Some("http://localhost:4566")
        );
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.default_results, 8);
    }

    #[test]
    fn test_unparsable_default_results_falls_back() {
        for raw in ["eight", "", "-1", "0"] {
            let config = AppConfig::from_lookup(lookup_from(&[("defaultResults", raw)]));
            assert_eq!(config.default_results, DEFAULT_RESULTS, "input {raw:?}");
        }
    }

    #[test]
    fn test_blank_stream_name_is_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[("order_events_stream", "  ")]));
        assert!(config.order_events_stream.is_none());
    }

    #[test]
    fn test_require_stream_missing() {
        let config = AppConfig::default();
        let err = config.require_stream().unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { ref field } if field == "order_events_stream"));
    }

    #[test]
    fn test_require_table_present() {
        let config = AppConfig {
            restaurants_table: Some("restaurants".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(config.require_table().unwrap(), "restaurants");
    }

    #[test]
    fn test_validate_rejects_zero_results() {
        let config = AppConfig {
            default_results: 0,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_validate_rejects_blank_table() {
        let config = AppConfig {
            restaurants_table: Some(" ".to_string()),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_yaml_file() {
        let yaml = r#"
order_events_stream: order-events
restaurants_table: restaurants
default_results: 5
aws:
  region: ap-southeast-1
"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = load_config(file.path().to_str()).unwrap();
        assert_eq!(config.order_events_stream.as_deref(), Some("order-events"));
        assert_eq!(config.restaurants_table.as_deref(), Some("restaurants"));
        assert_eq!(config.default_results, 5);
        assert_eq!(config.aws.region.as_deref(), Some("ap-southeast-1"));
        assert!(config.aws.endpoint_url.is_none());
    }

    #[test]
    fn test_config_from_yaml_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"order_events_stream: order-events\n").unwrap();

        let config = AppConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.default_results, DEFAULT_RESULTS);
        assert!(config.restaurants_table.is_none());
    }

    #[test]
    fn test_config_from_missing_file() {
        let err = AppConfig::from_file("/nonexistent/config.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::LoadFailed { ref origin, .. } if origin == "/nonexistent/config.yaml"));
    }
}
