/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub bank: BankConfig,
}

#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct BankConfig {
    pub n_elevators: u8,
    pub n_floors: u8,
    pub tick_period_ms: u64,
    pub door_open_ms: u64,
}

impl Default for BankConfig {
    fn default() -> BankConfig {
        BankConfig {
            n_elevators: 5,
            n_floors: 20,
            tick_period_ms: 1000,
            door_open_ms: 2000,
        }
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config_str = fs::read_to_string(path)?;
    Ok(toml::from_str(&config_str)?)
}

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_defaults_apply_to_missing_keys() {
        let config: Config = toml::from_str("[bank]\nn_floors = 8\n").unwrap();

        assert_eq!(config.bank.n_floors, 8);
        assert_eq!(config.bank.n_elevators, 5);
        assert_eq!(config.bank.tick_period_ms, 1000);
        assert_eq!(config.bank.door_open_ms, 2000);
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.bank.n_elevators, 5);
        assert_eq!(config.bank.n_floors, 20);
    }
}
