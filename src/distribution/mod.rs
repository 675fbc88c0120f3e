//! Controlled randomness samplers
//!
//! This module provides samplers that converge to a requested distribution
//! faster than independent draws and avoid the long streaks and droughts
//! that independent draws produce. They are meant for games and simulations
//! where "fair feeling" randomness matters more than independence.
//!
//! # Samplers
//!
//! - **WeightedDistribution**: picks one of N weighted items. Every item has
//!   a scheduled "due time" spaced by the inverse of its weight and jittered
//!   by a uniform draw; the most overdue item is always picked.
//! - **ControlledRandom**: a single success/failure chance whose odds shrink
//!   after every failure-free stretch and reset on success, driven by a
//!   calibrated table of decay constants.
//!
//! # Randomness Source
//!
//! Samplers never own a random number generator. Every sampling call takes
//! `&mut R` where `R: rand::Rng`, so seeding, thread affinity and
//! reproducibility stay with the caller.
//!
//! # Example
//!
//! ```
//! use controlled_random::distribution::{ControlledRandom, WeightedDistribution};
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//!
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
//!
//! let mut loot = WeightedDistribution::from_weights(&[1.0, 2.0, 3.0, 4.0]);
//! loot.initialize_randomness(&mut rng);
//! let item = loot.pick_random(&mut rng);
//! assert!(item < 4);
//!
//! let mut crit = ControlledRandom::new(0.25);
//! let _hit = crit.random_success(&mut rng);
//! ```

use thiserror::Error;

pub mod controlled;
pub mod weighted;

pub use controlled::ControlledRandom;
pub use weighted::{normalize_weights, WeightedDistribution, MAX_WEIGHT, MIN_WEIGHT};

/// Errors reported by the checked weight APIs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightError {
    /// Weight lies outside the supported fixed-point range
    #[error("weight {weight} outside supported range [{min}, {max}]", min = MIN_WEIGHT, max = MAX_WEIGHT)]
    OutOfRange { weight: f32 },

    /// Weight is NaN, infinite, zero or negative
    #[error("weight {weight} is not a finite positive number")]
    NotFinite { weight: f32 },

    /// No weights were supplied
    #[error("no weights supplied")]
    Empty,

    /// Largest and smallest weights are too far apart to share one table
    #[error(
        "weight ratio {ratio} exceeds the supported maximum of {max}",
        max = MAX_WEIGHT / MIN_WEIGHT
    )]
    RatioTooLarge { ratio: f32 },
}
