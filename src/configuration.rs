//! Configuration management for the asset exporter.
//!
//! The configuration is a small YAML file carrying the platform instance
//! URL and the operator credentials. It is resolved from an explicit
//! `--config` path, the `VMEXPORT_CONFIG_DIR` environment variable, or
//! the platform configuration directory, in that order.

use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;
use url::Url;

pub const DEFAULT_APPLICATION_ID: &str = "vmexport";
pub const DEFAULT_CONFIGURATION_FILE_NAME: &str = "config.yml";
pub const CONFIG_DIR_ENVIRONMENT_VARIABLE: &str = "VMEXPORT_CONFIG_DIR";

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to resolve the configuration directory")]
    FailedToFindConfigurationDirectory,
    #[error("failed to load configuration data, because of: {cause:?}")]
    FailedToLoadData { cause: Box<dyn std::error::Error> },
    #[error("missing value for property {name:?}")]
    MissingRequiredPropertyValue { name: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    instance_url: Url,
    username: String,
    password: String,
}

impl Configuration {
    pub fn new(instance_url: Url, username: String, password: String) -> Configuration {
        Configuration {
            instance_url,
            username,
            password,
        }
    }

    pub fn instance_url(&self) -> &Url {
        &self.instance_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn get_default_configuration_file_path() -> Result<PathBuf, ConfigurationError> {
        if let Ok(config_dir_str) = std::env::var(CONFIG_DIR_ENVIRONMENT_VARIABLE) {
            let mut config_path = PathBuf::from(config_dir_str);
            config_path.push(DEFAULT_CONFIGURATION_FILE_NAME);
            return Ok(config_path);
        }

        match dirs::config_dir() {
            Some(configuration_directory) => {
                let mut default_config_file_path = configuration_directory;
                default_config_file_path.push(DEFAULT_APPLICATION_ID);
                default_config_file_path.push(DEFAULT_CONFIGURATION_FILE_NAME);
                Ok(default_config_file_path)
            }
            None => Err(ConfigurationError::FailedToFindConfigurationDirectory),
        }
    }

    pub fn load_default() -> Result<Configuration, ConfigurationError> {
        let default_file_path = Configuration::get_default_configuration_file_path()?;
        debug!("Loading configuration from {:?}...", default_file_path);
        Configuration::load_from_file(default_file_path)
    }

    pub fn load_from_file(path: PathBuf) -> Result<Configuration, ConfigurationError> {
        let contents = fs::read_to_string(path).map_err(|cause| {
            ConfigurationError::FailedToLoadData {
                cause: Box::new(cause),
            }
        })?;
        let configuration: Configuration = serde_yaml::from_str(&contents).map_err(|cause| {
            ConfigurationError::FailedToLoadData {
                cause: Box::new(cause),
            }
        })?;
        configuration.validate()?;
        Ok(configuration)
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        if self.username.is_empty() {
            return Err(ConfigurationError::MissingRequiredPropertyValue {
                name: "username".to_string(),
            });
        }
        if self.password.is_empty() {
            return Err(ConfigurationError::MissingRequiredPropertyValue {
                name: "password".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_a_complete_yaml_configuration() {
        let configuration: Configuration = serde_yaml::from_str(
            "instance_url: https://instance.example.com\nusername: operator\npassword: hunter2\n",
        )
        .unwrap();
        assert_eq!(
            configuration.instance_url().as_str(),
            "https://instance.example.com/"
        );
        assert_eq!(configuration.username(), "operator");
        assert_eq!(configuration.password(), "hunter2");
    }

    #[test]
    fn blank_credentials_fail_validation() {
        let configuration = Configuration::new(
            Url::parse("https://instance.example.com").unwrap(),
            String::new(),
            "hunter2".to_string(),
        );
        assert!(matches!(
            configuration.validate(),
            Err(ConfigurationError::MissingRequiredPropertyValue { .. })
        ));
    }
}
