//! Safety scores for route alternatives.
//!
//! There is no safety data source behind these numbers: the baseline is a
//! uniform draw. It is seeded from the route id, so the same route always
//! gets the same baseline and re-estimating does not reshuffle scores.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::RouteId;

use super::config::EstimatorConfig;

/// Maximum safety score.
pub const MAX_SAFETY_SCORE: u8 = 100;

/// Deterministic per-route safety scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetyScorer {
    min: u8,
    max_exclusive: u8,
    bonus: u8,
}

impl SafetyScorer {
    /// Build a scorer from estimator configuration.
    ///
    /// An empty or inverted range collapses to its lower bound.
    pub fn new(config: &EstimatorConfig) -> Self {
        let min = config.baseline_score_min.min(MAX_SAFETY_SCORE);
        let max_exclusive = config
            .baseline_score_max
            .min(MAX_SAFETY_SCORE + 1)
            .max(min + 1);
        Self {
            min,
            max_exclusive,
            bonus: config.safety_score_bonus,
        }
    }

    /// Baseline score for a route, uniform in `[min, max)`.
    pub fn baseline(&self, route: RouteId) -> u8 {
        let mut rng = ChaCha8Rng::seed_from_u64(route.0);
        rng.gen_range(self.min..self.max_exclusive)
    }

    /// Final score, boosted and capped when safety mode is on.
    pub fn score(&self, route: RouteId, safety_mode: bool) -> u8 {
        let baseline = self.baseline(route);
        if safety_mode {
            baseline.saturating_add(self.bonus).min(MAX_SAFETY_SCORE)
        } else {
            baseline
        }
    }
}

impl Default for SafetyScorer {
    fn default() -> Self {
        Self::new(&EstimatorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_is_stable_per_route() {
        let scorer = SafetyScorer::default();
        let id = RouteId(42);
        assert_eq!(scorer.baseline(id), scorer.baseline(id));
    }

    #[test]
    fn baseline_in_default_range() {
        let scorer = SafetyScorer::default();
        for seed in 0..500 {
            let score = scorer.baseline(RouteId(seed));
            assert!((70..100).contains(&score), "score {score} out of range");
        }
    }

    #[test]
    fn baseline_varies_between_routes() {
        let scorer = SafetyScorer::default();
        let distinct: std::collections::HashSet<u8> =
            (0..200).map(|seed| scorer.baseline(RouteId(seed))).collect();
        assert!(distinct.len() > 10);
    }

    #[test]
    fn safety_mode_adds_bonus_capped() {
        let scorer = SafetyScorer::default();
        for seed in 0..200 {
            let id = RouteId(seed);
            let base = scorer.baseline(id);
            let boosted = scorer.score(id, true);
            assert_eq!(boosted, (base + 10).min(100));
            assert_eq!(scorer.score(id, false), base);
        }
    }

    #[test]
    fn degenerate_range_collapses() {
        let config = EstimatorConfig {
            baseline_score_min: 90,
            baseline_score_max: 80,
            ..Default::default()
        };
        let scorer = SafetyScorer::new(&config);
        assert_eq!(scorer.baseline(RouteId(7)), 90);
    }
}
