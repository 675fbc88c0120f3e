//! Configuration validation

use super::*;
use crate::distribution::{MAX_WEIGHT, MIN_WEIGHT};
use anyhow::Result;
use std::collections::HashSet;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_names(config)?;

    for table in &config.tables {
        validate_weight_table(table)?;
    }
    for chance in &config.chances {
        validate_chance(chance)?;
    }

    Ok(())
}

/// Names must be non-empty and unique across tables and chances
fn validate_names(config: &Config) -> Result<()> {
    let mut seen = HashSet::new();
    let names = config
        .tables
        .iter()
        .map(|t| t.name.as_str())
        .chain(config.chances.iter().map(|c| c.name.as_str()));

    for name in names {
        if name.trim().is_empty() {
            anyhow::bail!("table and chance names must not be empty");
        }
        if !seen.insert(name) {
            anyhow::bail!("duplicate name '{}'", name);
        }
    }

    Ok(())
}

/// Validate one weight table
pub fn validate_weight_table(table: &WeightTableConfig) -> Result<()> {
    if table.weights.is_empty() {
        anyhow::bail!("table '{}' has no weights", table.name);
    }

    for (i, &weight) in table.weights.iter().enumerate() {
        if !weight.is_finite() || weight <= 0.0 {
            anyhow::bail!(
                "table '{}' weight {} is {}, must be a finite positive number",
                table.name,
                i,
                weight
            );
        }
        if !table.normalize && !(MIN_WEIGHT..=MAX_WEIGHT).contains(&weight) {
            anyhow::bail!(
                "table '{}' weight {} is {}, must be between {} and {} (or set normalize = true)",
                table.name,
                i,
                weight,
                MIN_WEIGHT,
                MAX_WEIGHT
            );
        }
    }

    if table.normalize {
        let normalized = normalize_weights(&table.weights)
            .with_context(|| format!("table '{}' cannot be normalized", table.name))?;
        if normalized != table.weights {
            eprintln!(
                "Warning: table '{}' weights rescaled to fit [{}, {}]",
                table.name, MIN_WEIGHT, MAX_WEIGHT
            );
        }
    }

    if table.weights.len() == 1 {
        eprintln!(
            "Warning: table '{}' has a single weight, every pick returns item 0",
            table.name
        );
    }

    Ok(())
}

/// Validate one chance
pub fn validate_chance(chance: &ChanceConfig) -> Result<()> {
    if !chance.probability.is_finite() || !(0.0..=1.0).contains(&chance.probability) {
        anyhow::bail!(
            "chance '{}' probability must be between 0.0 and 1.0, got {}",
            chance.name,
            chance.probability
        );
    }

    Ok(())
}
