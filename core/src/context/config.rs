//! Parser configuration
//!
//! Re-exports the shared types from xivdps-types and adds persistence for
//! `ParserConfig`.

pub use xivdps_types::{DamageModelConfig, ParserConfig};

use super::error::ConfigError;

const APP_NAME: &str = "xivdps";
const CONFIG_NAME: &str = "parser";

/// Extension trait for ParserConfig persistence and validation
pub trait ParserConfigExt: Sized {
    /// Load the stored config, falling back to defaults if it is missing or unreadable.
    fn load() -> Self;
    fn try_load() -> Result<Self, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn validate(&self) -> Result<(), ConfigError>;
}

impl ParserConfigExt for ParserConfig {
    fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "Using default parser configuration");
                ParserConfig::default()
            }
        }
    }

    fn try_load() -> Result<Self, ConfigError> {
        let config: ParserConfig = confy::load(APP_NAME, CONFIG_NAME)?;
        config.validate()?;
        Ok(config)
    }

    fn save(&self) -> Result<(), ConfigError> {
        self.validate()?;
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.invalid_field() {
            Some((field, reason)) => Err(ConfigError::Invalid { field, reason }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ParserConfig::default().validate().is_ok());
    }

    #[test]
    fn non_positive_multiplier_is_rejected() {
        let mut config = ParserConfig::default();
        config.damage_model.crit_multiplier = -1.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "damage_model.crit_multiplier",
                ..
            }
        ));
    }
}
