//! varlab Configuration Layer
//!
//! Serde-backed run settings for the varlab Value-at-Risk library.
//!
//! # Features
//!
//! - **Simulation Configuration**: Horizon, scenario count, time grid, compounding
//!   mode, seed and draw recording, with `quick` / `standard` / `fine` presets
//! - **Risk Configuration**: Confidence levels, holding period, histogram
//!   size and PSD tolerance
//! - **Loading**: JSON and TOML documents, validated on load
//!
//! # Example
//!
//! ```rust
//! use varlab_config::{from_toml_str, SimulationConfig, Validate};
//!
//! let config: SimulationConfig = from_toml_str(
//!     r#"
//!     name = "desk"
//!     time_horizon = 10
//!     scenario_count = 2000
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.intra_period_steps, 1);
//! assert!(config.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod risk;
pub mod simulation;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use risk::RiskConfig;
pub use simulation::SimulationConfig;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Parses and validates a configuration from JSON.
pub fn from_json_str<T>(json: &str) -> ConfigResult<T>
where
    T: DeserializeOwned + Validate,
{
    let config: T = serde_json::from_str(json)?;
    config.validate_or_error()?;
    Ok(config)
}

/// Parses and validates a configuration from TOML.
pub fn from_toml_str<T>(text: &str) -> ConfigResult<T>
where
    T: DeserializeOwned + Validate,
{
    let config: T = toml::from_str(text)?;
    config.validate_or_error()?;
    Ok(config)
}

/// Serializes a configuration as pretty-printed JSON.
pub fn to_json_string<T: Serialize>(config: &T) -> ConfigResult<String> {
    Ok(serde_json::to_string_pretty(config)?)
}

/// Serializes a configuration as TOML.
pub fn to_toml_string<T: Serialize>(config: &T) -> ConfigResult<String> {
    Ok(toml::to_string(config)?)
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
    pub use crate::risk::RiskConfig;
    pub use crate::simulation::SimulationConfig;
    pub use crate::{from_json_str, from_toml_str, to_json_string, to_toml_string};
}

#[cfg(test)]
mod tests {
    use super::*;
    use varlab_core::ReturnType;

    #[test]
    fn test_json_round_trip() {
        let config = SimulationConfig::fine()
            .with_return_type(ReturnType::Classic)
            .with_seed(42);
        let json = to_json_string(&config).unwrap();
        assert!(json.contains("\"classic\""));
        let back: SimulationConfig = from_json_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_json_keeps_every_bit_of_a_level() {
        let level = 0.989_649_720_884_595_5_f64;
        let config = SimulationConfig::quick().with_confidence_levels(vec![level]);
        let back: SimulationConfig = from_json_str(&to_json_string(&config).unwrap()).unwrap();
        assert_eq!(back.confidence_levels[0].to_bits(), level.to_bits());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = RiskConfig::standard().with_delta_time(10.0);
        let text = to_toml_string(&config).unwrap();
        let back: RiskConfig = from_toml_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: RiskConfig = from_json_str(r#"{"name": "desk"}"#).unwrap();
        assert_eq!(config.delta_time, 1.0);
        assert!(config.parallel);
    }

    #[test]
    fn test_invalid_document_is_rejected() {
        let result: ConfigResult<SimulationConfig> =
            from_json_str(r#"{"name": "x", "scenario_count": 0}"#);
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "scenario_count"
        ));

        let result: ConfigResult<SimulationConfig> = from_json_str("{not json");
        assert!(matches!(result, Err(ConfigError::Deserialization(_))));
    }
}
