//! Combat configuration loader.

use std::path::Path;

use game_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat tunables from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads the tunables shipped with the crate (`data/config.toml`).
    pub fn embedded() -> LoadResult<CombatConfig> {
        Self::from_toml_str(include_str!("../../data/config.toml"))
    }

    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their [`CombatConfig`] defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        let finite = [
            ("variance_spread", config.variance_spread),
            ("atb_threshold", config.atb_threshold),
            ("atb_scale", config.atb_scale),
            ("heal_threshold", config.heal_threshold),
        ];
        if let Some((key, value)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            anyhow::bail!("{key} must be a finite number, got {value}");
        }
        if config.atb_threshold <= 0.0 {
            anyhow::bail!("atb_threshold must be positive, got {}", config.atb_threshold);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_matches_defaults() {
        assert_eq!(ConfigLoader::embedded().expect("parse"), CombatConfig::default());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::from_toml_str("variance_spread = 0.1\nuses_per_rank = 5\n")
            .expect("parse");
        assert_eq!(config.variance_spread, 0.1);
        assert_eq!(config.uses_per_rank, 5);
        assert_eq!(config.min_damage, CombatConfig::DEFAULT_MIN_DAMAGE);
    }

    #[test]
    fn non_positive_threshold_is_rejected() {
        assert!(ConfigLoader::from_toml_str("atb_threshold = 0.0").is_err());
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert!(ConfigLoader::from_toml_str("atb_scale = nan").is_err());
        assert!(ConfigLoader::from_toml_str("atb_threshold = inf").is_err());
        assert!(ConfigLoader::from_toml_str("variance_spread = -inf").is_err());
    }
}
