//! Configuration module
//!
//! Declares weight tables and chances in TOML (or JSON) so game data can
//! live outside the code, and turns them into samplers.
//!
//! ```toml
//! [[tables]]
//! name = "loot"
//! weights = [1.0, 2.0, 3.0, 4.0]
//!
//! [[chances]]
//! name = "crit"
//! probability = 0.25
//! ```

pub mod toml;
pub mod validator;

use crate::distribution::{normalize_weights, ControlledRandom, WeightedDistribution};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete sampler configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Weighted pick tables
    #[serde(default)]
    pub tables: Vec<WeightTableConfig>,
    /// Single success chances
    #[serde(default)]
    pub chances: Vec<ChanceConfig>,
}

/// One weighted table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTableConfig {
    /// Unique name
    pub name: String,
    /// Weight per item, in item order
    pub weights: Vec<f32>,
    /// Rescale weights into the supported range before use
    #[serde(default)]
    pub normalize: bool,
}

/// One success chance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChanceConfig {
    /// Unique name
    pub name: String,
    /// Target success probability (0.0-1.0)
    pub probability: f32,
}

impl Config {
    /// Parse and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let config = self::toml::parse_config_file(path)?;
        validator::validate_config(&config)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Look up a table by name
    pub fn table(&self, name: &str) -> Option<&WeightTableConfig> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Look up a chance by name
    pub fn chance(&self, name: &str) -> Option<&ChanceConfig> {
        self.chances.iter().find(|c| c.name == name)
    }
}

impl WeightTableConfig {
    /// Effective weights: normalized if requested, otherwise as written
    pub fn effective_weights(&self) -> Result<Vec<f32>> {
        if self.normalize {
            normalize_weights(&self.weights)
                .with_context(|| format!("Failed to normalize table '{}'", self.name))
        } else {
            Ok(self.weights.clone())
        }
    }

    /// Build the distribution described by this table
    ///
    /// The result is not initialized; call
    /// [`WeightedDistribution::initialize_randomness`] before picking.
    pub fn build(&self) -> Result<WeightedDistribution> {
        validator::validate_weight_table(self)?;

        let weights = self.effective_weights()?;
        let mut dist = WeightedDistribution::with_capacity(weights.len());
        for (i, &weight) in weights.iter().enumerate() {
            dist.try_add_weight(weight)
                .with_context(|| format!("table '{}' weight {}", self.name, i))?;
        }
        Ok(dist)
    }
}

impl ChanceConfig {
    /// Build the generator described by this chance
    pub fn build(&self) -> Result<ControlledRandom> {
        validator::validate_chance(self)?;
        Ok(ControlledRandom::new(self.probability))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;
    use std::io::Write;

    const SAMPLE: &str = r#"
[[tables]]
name = "loot"
weights = [1.0, 2.0, 3.0, 4.0]

[[tables]]
name = "spawns"
weights = [0.000001, 0.000004]
normalize = true

[[chances]]
name = "crit"
probability = 0.25
"#;

    #[test]
    fn test_build_from_config() {
        let config = super::toml::parse_toml_string(SAMPLE).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);

        let mut loot = config.table("loot").unwrap().build().unwrap();
        assert_eq!(loot.num_weights(), 4);
        loot.initialize_randomness(&mut rng);
        let mut counts = [0usize; 4];
        for _ in 0..10_000 {
            counts[loot.pick_random(&mut rng)] += 1;
        }
        assert!(counts[3] > 3900 && counts[3] < 4100, "counts: {:?}", counts);

        let spawns = config.table("spawns").unwrap().build().unwrap();
        assert_eq!(spawns.num_weights(), 2);

        let crit = config.chance("crit").unwrap().build().unwrap();
        assert_eq!(crit.bucket(), 25);

        assert!(config.table("missing").is_none());
        assert!(config.chance("missing").is_none());
    }

    #[test]
    fn test_build_rejects_out_of_range_without_normalize() {
        let table = WeightTableConfig {
            name: "bad".to_string(),
            weights: vec![1.0, 50_000.0],
            normalize: false,
        };
        assert!(table.build().is_err());

        let table = WeightTableConfig {
            normalize: true,
            ..table
        };
        assert!(table.build().is_ok());
    }

    #[test]
    fn test_load_validates() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "{}", SAMPLE).unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.tables.len(), 2);
        assert_eq!(config.chances.len(), 1);

        let mut bad = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(bad, "[[chances]]\nname = \"crit\"\nprobability = 1.5").unwrap();
        let err = Config::load(bad.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("probability"));
    }
}
