//! Which totals darts can actually make.

use once_cell::sync::Lazy;

use crate::domain::rules::{DARTS_PER_TURN, MAX_TURN_SCORE};

/// Every distinct score a single dart can make: miss, singles, doubles,
/// trebles, outer and inner bull.
pub fn single_dart_scores() -> Vec<u16> {
    let mut scores: Vec<u16> = vec![0, 25, 50];
    for n in 1..=20u16 {
        scores.extend([n, n * 2, n * 3]);
    }
    scores.sort_unstable();
    scores.dedup();
    scores
}

static REACHABLE_TURN_SCORES: Lazy<[bool; MAX_TURN_SCORE as usize + 1]> = Lazy::new(|| {
    let singles = single_dart_scores();
    let mut reachable = [false; MAX_TURN_SCORE as usize + 1];
    reachable[0] = true;
    for _ in 0..DARTS_PER_TURN {
        let mut next = reachable;
        for (total, _) in reachable.iter().enumerate().filter(|(_, r)| **r) {
            for &s in &singles {
                let t = total + s as usize;
                if t < next.len() {
                    next[t] = true;
                }
            }
        }
        reachable = next;
    }
    reachable
});

/// Whether three darts (or fewer) can total `score`.
pub fn is_reachable_turn_score(score: u16) -> bool {
    REACHABLE_TURN_SCORES
        .get(score as usize)
        .copied()
        .unwrap_or(false)
}
