//! Weighted distribution with smoothed picks
//!
//! This module provides a weighted picker that matches the requested weight
//! ratios over many picks while avoiding the repeats and droughts of
//! independent sampling.
//!
//! # Algorithm
//!
//! Picking is treated as scheduling. Every item has a "due time" and an
//! average interval of `1 / weight`. A pick returns the item that is most
//! overdue, then pushes its due time forward by a uniform draw from
//! `[0, interval]`. The expected spacing between picks of an item is
//! proportional to `1 / weight`, so long-run frequencies match the weights,
//! while short-run behavior is bounded by the explicit schedule.
//!
//! Items live in a binary heap ordered by due time, so a pick is O(log N):
//! only the root changes and [`heap_top_updated_by`] restores the order.
//!
//! # Fixed Point
//!
//! Due times are `u32` values scaled by 2^20 and are allowed to wrap. Two
//! due times are never compared directly; both are first offset by the due
//! time of the item just picked, and the offsets are compared. This stays
//! correct as long as no live delta exceeds a quarter of the `u32` range,
//! which is what the [`MIN_WEIGHT`]..=[`MAX_WEIGHT`] bound guarantees.
//!
//! # Example
//!
//! ```
//! use controlled_random::distribution::WeightedDistribution;
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//!
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
//! let mut dist = WeightedDistribution::from_weights(&[1.0, 2.0, 3.0, 4.0]);
//! dist.initialize_randomness(&mut rng);
//!
//! let mut counts = [0u32; 4];
//! for _ in 0..1000 {
//!     counts[dist.pick_random(&mut rng)] += 1;
//! }
//! assert!(counts[3] > counts[0]);
//! ```

use super::WeightError;
use crate::util::heap::{heap_top_updated_by, make_heap_by};
use rand::Rng;

/// Smallest supported weight
///
/// Chosen so the largest interval drawn in `pick_random` is
/// `u32::MAX / 4`, which leaves room for wrapping comparisons.
pub const MIN_WEIGHT: f32 = 1.0 / 1024.0;

/// Largest supported weight
///
/// At this weight the interval draw is `[0, 102]`. Larger weights would
/// collapse into the same few integer ranges and stop telling 1%
/// differences apart. Only ratios between weights matter, so if you hit
/// either limit, shift your weights toward the other end of the range
/// (see [`normalize_weights`]).
pub const MAX_WEIGHT: f32 = 10240.0;

/// Fixed-point scale applied to `1 / weight`
const FIXED_POINT_MULTIPLIER: f32 = 1024.0 * 1024.0;

/// Scheduling record for one registered item
#[derive(Debug, Clone, Copy)]
struct Weight {
    /// Due time, fixed point, wrapping
    next_event_time: u32,

    /// `round(2^20 / weight)`
    average_time_between_events: u32,

    /// Index as registered by the caller
    original_index: usize,
}

impl Weight {
    fn new(weight: f32, original_index: usize) -> Self {
        let average_time_between_events = round_positive((1.0 / weight) * FIXED_POINT_MULTIPLIER);
        Self {
            // Placeholder until initialize_randomness runs
            next_event_time: average_time_between_events,
            average_time_between_events,
            original_index,
        }
    }
}

#[inline]
fn round_positive(value: f32) -> u32 {
    (value + 0.5) as u32
}

/// Heap comparator: `l` is "less" than `r` when `l` is due later than `r`,
/// measured from `reference_point`. The root is therefore the earliest due.
#[inline]
fn due_later(reference_point: u32) -> impl Fn(&Weight, &Weight) -> bool {
    move |l: &Weight, r: &Weight| {
        l.next_event_time.wrapping_sub(reference_point)
            > r.next_event_time.wrapping_sub(reference_point)
    }
}

/// Weighted picker with bounded spacing between picks of each item
///
/// # Lifecycle
///
/// 1. Register every item with [`add_weight`](Self::add_weight).
/// 2. Call [`initialize_randomness`](Self::initialize_randomness) exactly once.
/// 3. Call [`pick_random`](Self::pick_random) as often as needed.
///
/// Skipping step 2 is not rejected, but the first picks are then a fixed,
/// non-random sequence determined by registration order alone. Adding
/// weights after step 2 is not supported.
///
/// Not synchronized; own one instance per logical caller.
#[derive(Debug, Clone, Default)]
pub struct WeightedDistribution {
    weights: Vec<Weight>,
}

impl WeightedDistribution {
    /// Create an empty distribution
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty distribution with room for `capacity` items
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            weights: Vec::with_capacity(capacity),
        }
    }

    /// Create a distribution from a list of weights
    ///
    /// Item `i` of the result corresponds to `weights[i]`.
    ///
    /// # Panics
    ///
    /// Panics if any weight is outside [`MIN_WEIGHT`]..=[`MAX_WEIGHT`].
    pub fn from_weights(weights: &[f32]) -> Self {
        weights.iter().copied().collect()
    }

    /// Register one item with the given weight
    ///
    /// The new item's index is the number of items registered before it.
    ///
    /// # Panics
    ///
    /// Panics if `weight` is outside [`MIN_WEIGHT`]..=[`MAX_WEIGHT`] or NaN.
    /// Out-of-range weights are a caller bug; use
    /// [`try_add_weight`](Self::try_add_weight) for untrusted input.
    pub fn add_weight(&mut self, weight: f32) {
        assert!(
            weight >= MIN_WEIGHT && weight <= MAX_WEIGHT,
            "Weight must be in range [{}, {}], got {}",
            MIN_WEIGHT,
            MAX_WEIGHT,
            weight
        );
        let index = self.weights.len();
        self.weights.push(Weight::new(weight, index));
    }

    /// Register one item, reporting invalid weights instead of panicking
    pub fn try_add_weight(&mut self, weight: f32) -> Result<(), WeightError> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(WeightError::NotFinite { weight });
        }
        if weight < MIN_WEIGHT || weight > MAX_WEIGHT {
            return Err(WeightError::OutOfRange { weight });
        }
        self.add_weight(weight);
        Ok(())
    }

    /// Number of registered items
    pub fn num_weights(&self) -> usize {
        self.weights.len()
    }

    /// Returns true if no items are registered
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Randomize every item's first due time and build the heap
    ///
    /// Must be called once after all items are registered and before the
    /// first [`pick_random`](Self::pick_random). Each item's due time is
    /// drawn uniformly from `[0, interval]`, so items start at independent
    /// phases instead of in registration order.
    pub fn initialize_randomness<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for weight in &mut self.weights {
            weight.next_event_time = rng.gen_range(0..=weight.average_time_between_events);
        }
        make_heap_by(&mut self.weights, due_later(0));
    }

    /// Pick the next item and return its registration index
    ///
    /// Returns the most overdue item, then reschedules it by a uniform draw
    /// from `[0, interval]`. Due time arithmetic wraps on purpose.
    ///
    /// # Panics
    ///
    /// Panics if no items are registered (`num_weights() == 0`).
    pub fn pick_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let picked = &mut self.weights[0];
        let result = picked.original_index;
        let reference_point = picked.next_event_time;
        let to_add = rng.gen_range(0..=picked.average_time_between_events);
        picked.next_event_time = picked.next_event_time.wrapping_add(to_add);

        heap_top_updated_by(&mut self.weights, due_later(reference_point));
        result
    }
}

impl FromIterator<f32> for WeightedDistribution {
    fn from_iter<I: IntoIterator<Item = f32>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut dist = Self::with_capacity(iter.size_hint().0);
        for weight in iter {
            dist.add_weight(weight);
        }
        dist
    }
}

/// Rescale weights into the supported range, preserving their ratios
///
/// The smallest weight maps to [`MIN_WEIGHT`], which gives the largest
/// fixed-point intervals and therefore the finest resolution between
/// similar weights.
///
/// Fails if `weights` is empty, contains a value that is not a finite
/// positive number, or if `max / min` exceeds `MAX_WEIGHT / MIN_WEIGHT`.
pub fn normalize_weights(weights: &[f32]) -> Result<Vec<f32>, WeightError> {
    if weights.is_empty() {
        return Err(WeightError::Empty);
    }

    let mut min = f32::INFINITY;
    let mut max = 0.0f32;
    for &weight in weights {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(WeightError::NotFinite { weight });
        }
        min = min.min(weight);
        max = max.max(weight);
    }

    let ratio = max / min;
    if ratio > MAX_WEIGHT / MIN_WEIGHT {
        return Err(WeightError::RatioTooLarge { ratio });
    }

    Ok(weights
        .iter()
        .map(|&weight| (weight / min * MIN_WEIGHT).clamp(MIN_WEIGHT, MAX_WEIGHT))
        .collect())
}
