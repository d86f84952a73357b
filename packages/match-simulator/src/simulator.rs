//! In-memory X01 simulator.
//!
//! Seeded bots throw each visit dart by dart, and the resulting totals are fed
//! through the real engine exactly as a scorer would key them in, dart-count
//! prompts included.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use scorekeeper::domain::rules::DARTS_PER_TURN;
use scorekeeper::domain::{CheckoutKind, MatchStatus, Seat, X01Summary};
use scorekeeper::{PlayerProfile, X01Config, X01Match};
use tracing::debug;

use crate::types::SkillLevel;

/// Hard stop for a match that never finishes.
const MAX_VISITS: u32 = 20_000;

/// Doubles a bot tries to leave itself, best first.
const SETUP_DOUBLES: [u16; 6] = [40, 32, 16, 8, 4, 2];

/// Clockwise segment order, used to pick where a stray single lands.
const BOARD_ORDER: [u16; 20] = [
    20, 1, 18, 4, 13, 6, 10, 15, 2, 17, 3, 19, 7, 16, 8, 11, 14, 9, 12, 5,
];

/// Outcome of one three-dart visit, as a scorer would see it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Visit {
    pub score: u16,
    pub darts: u8,
    /// Darts aimed at a finishing double.
    pub darts_at_double: u8,
    pub finished: bool,
    pub bust: bool,
}

#[derive(Debug, Clone)]
pub struct Bot {
    pub profile: PlayerProfile,
    pub skill: SkillLevel,
}

impl Bot {
    pub fn new(seat: Seat, skill: SkillLevel) -> Self {
        Self {
            profile: PlayerProfile::new(
                format!("bot-{seat}"),
                format!("{skill:?} bot {}", seat + 1),
                "",
            ),
            skill,
        }
    }

    pub fn throw_visit<R: Rng>(&self, remaining: u16, rng: &mut R) -> Visit {
        let mut left = remaining;
        let mut visit = Visit::default();

        for _ in 0..DARTS_PER_TURN {
            visit.darts += 1;
            let scored = if is_double_out(left) {
                visit.darts_at_double += 1;
                self.at_double(left, rng)
            } else if let Some(target) = setup_target(left) {
                self.at_single(target, left, rng)
            } else {
                self.at_treble(rng)
            };
            visit.score += scored;

            if scored == left {
                visit.finished = true;
                break;
            }
            if scored > left || left - scored == 1 {
                visit.bust = true;
                break;
            }
            left -= scored;
        }
        visit
    }

    /// Returns `left` only when the double is hit.
    fn at_double<R: Rng>(&self, left: u16, rng: &mut R) -> u16 {
        if rng.random_bool(self.skill.double_rate()) {
            return left;
        }
        if rng.random_bool(0.5) {
            if left == 50 {
                25
            } else {
                left / 2
            }
        } else {
            0
        }
    }

    fn at_single<R: Rng>(&self, target: u16, left: u16, rng: &mut R) -> u16 {
        if rng.random_bool(self.skill.single_rate()) {
            return target;
        }
        let stray = neighbour(target, rng.random_bool(0.5));
        // A stray single cannot finish a leg.
        if stray == left {
            0
        } else {
            stray
        }
    }

    fn at_treble<R: Rng>(&self, rng: &mut R) -> u16 {
        if rng.random_bool(self.skill.treble_rate()) {
            60
        } else if rng.random_bool(0.7) {
            20
        } else {
            neighbour(20, rng.random_bool(0.5))
        }
    }
}

fn is_double_out(left: u16) -> bool {
    left == 50 || (left <= 40 && left % 2 == 0)
}

fn setup_target(left: u16) -> Option<u16> {
    SETUP_DOUBLES
        .iter()
        .map(|&d| left.checked_sub(d))
        .find_map(|rest| rest.filter(|r| (1..=20).contains(r)))
}

fn neighbour(segment: u16, clockwise: bool) -> u16 {
    let idx = BOARD_ORDER
        .iter()
        .position(|&s| s == segment)
        .unwrap_or(0);
    let next = if clockwise {
        (idx + 1) % BOARD_ORDER.len()
    } else {
        (idx + BOARD_ORDER.len() - 1) % BOARD_ORDER.len()
    };
    BOARD_ORDER[next]
}

/// Result of simulating a complete match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub winner: Seat,
    pub visits: u32,
    pub summary: X01Summary,
}

/// In-memory match simulator.
pub struct Simulator {
    rng: ChaCha8Rng,
    config: X01Config,
    bots: Vec<Bot>,
}

impl Simulator {
    pub fn new(seed: u64, config: X01Config, bots: Vec<Bot>) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
            bots,
        }
    }

    pub fn simulate_match(mut self) -> Result<MatchResult, Box<dyn std::error::Error>> {
        let roster = self.bots.iter().map(|b| b.profile.clone()).collect();
        let mut game = X01Match::new(self.config, roster)?;
        let mut visits = 0u32;

        while !game.is_complete() {
            if matches!(
                game.status(),
                MatchStatus::LegComplete | MatchStatus::SetComplete
            ) {
                game.start_next_leg()?;
                continue;
            }
            if visits >= MAX_VISITS {
                return Err(format!("match still running after {MAX_VISITS} visits").into());
            }

            let seat = game.active().ok_or("no active seat in a running match")?;
            let remaining = game
                .player(seat)
                .map(|p| p.remaining)
                .ok_or("active seat out of range")?;
            let visit = self.bots[seat].throw_visit(remaining, &mut self.rng);

            game.submit_score(visit.score)?;
            if let Some(pending) = game.pending() {
                match pending.kind {
                    CheckoutKind::Checkout => {
                        game.confirm_checkout(visit.darts, visit.darts_at_double)?
                    }
                    CheckoutKind::Attempt => game.confirm_darts_used(visit.darts_at_double)?,
                };
            }
            visits += 1;
        }

        let winner = game.winner().ok_or("finished match without a winner")?;
        debug!(winner, visits, "Match simulated");
        Ok(MatchResult {
            winner,
            visits,
            summary: game.summary(),
        })
    }
}
