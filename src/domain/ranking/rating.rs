//! Elo rating model.
//!
//! Pure pairwise update with a fixed K-factor. Scores are unbounded reals;
//! the winner gains what the loser loses (within floating rounding).

use serde::{Deserialize, Serialize};

/// Score every item starts a session with.
pub const INITIAL_SCORE: f64 = 1500.0;

/// Fixed K-factor. Not adaptive.
pub const K_FACTOR: f64 = 32.0;

/// Per-item rating state within one session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub score: f64,
    pub wins: u32,
    pub losses: u32,
}

impl Rating {
    /// Starting rating: 1500 points, no results.
    pub fn initial() -> Self {
        Self {
            score: INITIAL_SCORE,
            wins: 0,
            losses: 0,
        }
    }

    /// Records a win at the given post-update score.
    pub fn record_win(&mut self, new_score: f64) {
        self.score = new_score;
        self.wins += 1;
    }

    /// Records a loss at the given post-update score.
    pub fn record_loss(&mut self, new_score: f64) {
        self.score = new_score;
        self.losses += 1;
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self::initial()
    }
}

/// Probability the higher-context side wins under the logistic model.
pub fn expected_score(winner_score: f64, loser_score: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((loser_score - winner_score) / 400.0))
}

/// Computes post-matchup scores for a decided pairing.
///
/// Returns `(new_winner_score, new_loser_score)`. The winner's score never
/// decreases and the loser's never increases; no clamping is applied.
pub fn elo_update(winner_score: f64, loser_score: f64, k: f64) -> (f64, f64) {
    let expected_winner = expected_score(winner_score, loser_score);
    let expected_loser = 1.0 - expected_winner;

    let new_winner_score = winner_score + k * (1.0 - expected_winner);
    let new_loser_score = loser_score + k * (0.0 - expected_loser);

    (new_winner_score, new_loser_score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn equal_scores_split_sixteen_points() {
        let (w, l) = elo_update(1500.0, 1500.0, K_FACTOR);
        assert_eq!(w, 1516.0);
        assert_eq!(l, 1484.0);
    }

    #[test]
    fn expected_score_is_half_for_equal_inputs() {
        assert!((expected_score(1500.0, 1500.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn favorite_gains_less_than_underdog() {
        let (fav_win, _) = elo_update(1700.0, 1300.0, K_FACTOR);
        let (dog_win, _) = elo_update(1300.0, 1700.0, K_FACTOR);
        assert!(fav_win - 1700.0 < dog_win - 1300.0);
    }

    #[test]
    fn rating_initial_state() {
        let r = Rating::initial();
        assert_eq!(r.score, INITIAL_SCORE);
        assert_eq!(r.wins, 0);
        assert_eq!(r.losses, 0);
    }

    #[test]
    fn rating_records_results() {
        let mut r = Rating::initial();
        r.record_win(1516.0);
        assert_eq!(r.score, 1516.0);
        assert_eq!(r.wins, 1);

        r.record_loss(1500.3);
        assert_eq!(r.score, 1500.3);
        assert_eq!(r.losses, 1);
    }

    proptest! {
        #[test]
        fn winner_never_loses_points(w in 0.0f64..4000.0, l in 0.0f64..4000.0) {
            let (new_w, new_l) = elo_update(w, l, K_FACTOR);
            prop_assert!(new_w >= w);
            prop_assert!(new_l <= l);
        }

        #[test]
        fn update_is_zero_sum(w in 0.0f64..4000.0, l in 0.0f64..4000.0) {
            let (new_w, new_l) = elo_update(w, l, K_FACTOR);
            prop_assert!(((new_w + new_l) - (w + l)).abs() < 1e-9);
        }

        #[test]
        fn expected_scores_sum_to_one(a in 0.0f64..4000.0, b in 0.0f64..4000.0) {
            let sum = expected_score(a, b) + expected_score(b, a);
            prop_assert!((sum - 1.0).abs() < 1e-12);
        }
    }
}
