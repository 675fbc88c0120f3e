//! controlled-random - Streak-free randomness for games and simulations
//!
//! Plain random draws are independent, which is exactly what makes them
//! feel unfair: a 25% crit can miss ten times in a row, and a common loot
//! item can drop back to back while a rare one never shows up. The samplers
//! in this crate converge to the requested odds like ordinary draws do, but
//! keep short-run behavior close to the long-run average.
//!
//! # Architecture
//!
//! - **Weighted picks**: [`WeightedDistribution`] schedules items by due time
//!   on a binary heap with wrapping fixed-point arithmetic
//! - **Single chances**: [`ControlledRandom`] uses a calibrated decay table
//! - **Heap helpers**: in-place sift-down for a heap whose root changed
//! - **Configuration**: TOML/JSON declared tables and chances
//!
//! Samplers hold no generator of their own; every call borrows any
//! `rand::Rng` supplied by the caller.

pub mod config;
pub mod distribution;
pub mod util;

// Re-export commonly used types
pub use config::Config;
pub use distribution::{ControlledRandom, WeightError, WeightedDistribution};

/// Result type used throughout controlled-random
pub type Result<T> = anyhow::Result<T>;
