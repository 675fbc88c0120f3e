//! Single-chance controlled random
//!
//! `ControlledRandom` answers "did it succeed?" for one target probability.
//! Over many calls the success rate converges to the target, like a plain
//! Bernoulli draw, but long failure streaks are much rarer: every failure
//! shrinks an internal threshold, which raises the odds of success on the
//! next call, and a success resets it.
//!
//! # Calibration
//!
//! Each call multiplies `state` by a decay constant and fails if a uniform
//! draw lands at or below `state`. The constant that yields a given
//! long-run success rate has no closed form, so the table below stores one
//! constant per whole percent. The values were found by a per-bucket binary
//! search over the constant against a Monte Carlo estimate of the resulting
//! success rate. Regenerate the table the same way if a finer bucket size
//! is needed; do not try to fit a formula to it.

use rand::Rng;

/// Number of probability buckets, one per whole percent including 0% and 100%
pub const NUM_BUCKETS: usize = 101;

/// Decay constant per bucket. Bucket 0 never succeeds, bucket 100 always does.
const CONSTANT_TO_MULTIPLY: [f32; NUM_BUCKETS] = [
    1.0,
    0.999842823, 0.999372184, 0.99858737, 0.997489989, 0.996079504, // 5%
    0.994353354, 0.992320299, 0.989976823, 0.987323165, 0.984358072, // 10%
    0.98108995, 0.977510273, 0.973632514, 0.969447076, 0.964966297, // 15%
    0.960183799, 0.955135703, 0.949759007, 0.94411546, 0.93817538, // 20%
    0.931944132, 0.925439596, 0.918646991, 0.91158092, 0.904245615, // 25%
    0.896643937, 0.888772905, 0.880638301, 0.872264326, 0.863632858, // 30%
    0.854712844, 0.845594227, 0.836190343, 0.826578021, 0.816753447, // 35%
    0.806658566, 0.796402514, 0.785905063, 0.775190175, 0.764275074, // 40%
    0.753200769, 0.741862416, 0.730398834, 0.71871227, 0.706894219, // 45%
    0.694856822, 0.68264246, 0.670327544, 0.657848954, 0.645235062, // 50%
    0.6324597, 0.619563162, 0.606526911, 0.593426645, 0.580169916, // 55%
    0.566839218, 0.553292334, 0.539853752, 0.526208699, 0.512536764, // 60%
    0.498813927, 0.485045046, 0.471181333, 0.457302243, 0.443413943, // 65%
    0.429503262, 0.415506482, 0.401567012, 0.38765198, 0.373695225, // 70%
    0.359745115, 0.345868856, 0.331981093, 0.31815201, 0.304365695, // 75%
    0.290644556, 0.277024776, 0.263462812, 0.249986023, 0.236542806, // 80%
    0.223382816, 0.210130796, 0.197115764, 0.184175551, 0.171426639, // 85%
    0.158810839, 0.146292359, 0.133954003, 0.121768393, 0.109754287, // 90%
    0.0979399607, 0.0863209665, 0.0748278722, 0.0635780841, 0.0524956733, // 95%
    0.0415893458, 0.0308760721, 0.0203953665, 0.0100950971, // 99%
    -1.0,
];

/// Success/failure generator with reduced streakiness
///
/// Holds one scalar of state; cheap to create one per entity.
#[derive(Debug, Clone)]
pub struct ControlledRandom {
    state: f32,
    index: usize,
}

impl ControlledRandom {
    /// Create a generator for the given success probability
    ///
    /// `odds <= 0` (and NaN) never succeeds, `odds >= 1` always succeeds.
    /// Anything in between is rounded to the nearest whole percent and
    /// clamped to 1%..=99%.
    pub fn new(odds: f32) -> Self {
        let index = if odds.is_nan() || odds <= 0.0 {
            0
        } else if odds >= 1.0 {
            NUM_BUCKETS - 1
        } else {
            ((odds * 100.0 + 0.5) as usize).clamp(1, NUM_BUCKETS - 2)
        };
        Self { state: 1.0, index }
    }

    /// Bucket index in `0..=100` selected for the requested odds
    pub fn bucket(&self) -> usize {
        self.index
    }

    /// Success probability this generator converges to
    pub fn target_probability(&self) -> f32 {
        self.index as f32 / 100.0
    }

    /// Forget any failure streak, as if freshly constructed
    pub fn reset(&mut self) {
        self.state = 1.0;
    }

    /// Roll once
    pub fn random_success<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        self.state *= CONSTANT_TO_MULTIPLY[self.index];
        if rng.gen::<f32>() <= self.state {
            return false;
        }
        self.state = 1.0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn longest_failure_streak(mut roll: impl FnMut() -> bool, num_trials: usize) -> usize {
        let mut longest = 0;
        let mut current = 0;
        for _ in 0..num_trials {
            if roll() {
                current = 0;
            } else {
                current += 1;
                longest = longest.max(current);
            }
        }
        longest
    }

    #[test]
    fn test_controlled_random_buckets() {
        assert_eq!(ControlledRandom::new(0.0).bucket(), 0);
        assert_eq!(ControlledRandom::new(-0.5).bucket(), 0);
        assert_eq!(ControlledRandom::new(f32::NAN).bucket(), 0);
        assert_eq!(ControlledRandom::new(1.0).bucket(), 100);
        assert_eq!(ControlledRandom::new(7.0).bucket(), 100);
        assert_eq!(ControlledRandom::new(0.25).bucket(), 25);
        assert_eq!(ControlledRandom::new(0.254).bucket(), 25);
        assert_eq!(ControlledRandom::new(0.256).bucket(), 26);

        // Tiny but nonzero odds still get a chance, near-certain odds can still fail
        assert_eq!(ControlledRandom::new(0.001).bucket(), 1);
        assert_eq!(ControlledRandom::new(0.999).bucket(), 99);
    }

    #[test]
    fn test_controlled_random_target_probability() {
        assert_eq!(ControlledRandom::new(0.0).target_probability(), 0.0);
        assert_eq!(ControlledRandom::new(1.0).target_probability(), 1.0);
        assert!((ControlledRandom::new(0.42).target_probability() - 0.42).abs() < 1e-6);
    }

    #[test]
    fn test_controlled_random_table_is_monotonic() {
        for i in 1..NUM_BUCKETS - 1 {
            assert!(
                CONSTANT_TO_MULTIPLY[i] < CONSTANT_TO_MULTIPLY[i - 1],
                "Decay constant for {}% not below {}%",
                i,
                i - 1
            );
            assert!(CONSTANT_TO_MULTIPLY[i] > 0.0);
        }
        assert!(CONSTANT_TO_MULTIPLY[NUM_BUCKETS - 1] < 0.0);
    }

    #[test]
    fn test_controlled_random_never() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let mut never = ControlledRandom::new(0.0);
        assert!((0..10_000).all(|_| !never.random_success(&mut rng)));
    }

    #[test]
    fn test_controlled_random_always() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let mut always = ControlledRandom::new(1.0);
        assert!((0..10_000).all(|_| always.random_success(&mut rng)));
    }

    #[test]
    fn test_controlled_random_converges() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let num_runs = 100_000;

        for percent in 0..=100 {
            let odds = percent as f32 / 100.0;
            let mut controlled = ControlledRandom::new(odds);
            assert_eq!(controlled.bucket(), percent);

            let num_success = (0..num_runs)
                .filter(|_| controlled.random_success(&mut rng))
                .count();
            let rate = num_success as f32 / num_runs as f32;
            assert!(
                (rate - odds).abs() <= 0.01,
                "Target {} observed {} over {} runs",
                odds,
                rate,
                num_runs
            );
        }
    }

    #[test]
    fn test_controlled_random_shorter_failure_streaks() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(8);
        let num_trials = 100_000;

        let mut controlled = ControlledRandom::new(0.5);
        let controlled_streak =
            longest_failure_streak(|| controlled.random_success(&mut rng), num_trials);
        let naive_streak = longest_failure_streak(|| rng.gen_bool(0.5), num_trials);

        assert!(
            controlled_streak <= 10,
            "Controlled failure streak {} too long",
            controlled_streak
        );
        assert!(controlled_streak < naive_streak);
    }

    #[test]
    fn test_controlled_random_reset() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let mut controlled = ControlledRandom::new(0.1);
        for _ in 0..5 {
            controlled.random_success(&mut rng);
        }
        controlled.reset();
        assert_eq!(controlled.state, 1.0);
    }
}
