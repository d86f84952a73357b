//! Derived X01 statistics.
//!
//! Two paths produce the same [`PlayerStats`]: [`PlayerStats::from_ledger`]
//! folds a full ledger in one pass, and [`StatsAccumulator`] is updated turn
//! by turn as the engine commits. Both reduce to the same integer sums before
//! any division, so they agree exactly.

use serde::{Deserialize, Serialize};

use crate::domain::ledger::{Turn, TurnLedger};

/// Turns counted by the first-nine average.
pub const FIRST_NINE_TURNS: usize = 3;

/// Three-dart average for `score` over `darts`.
pub fn three_dart_average(score: u32, darts: u32) -> f64 {
    if darts == 0 {
        return 0.0;
    }
    (score as f64 * 3.0) / darts as f64
}

/// Cumulative high-visit counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Escalation {
    pub sixty_plus: u32,
    pub eighty_plus: u32,
    pub ton_plus: u32,
    pub one_eighties: u32,
}

impl Escalation {
    fn record(&mut self, counted: u16) {
        if counted >= 60 {
            self.sixty_plus += 1;
        }
        if counted >= 80 {
            self.eighty_plus += 1;
        }
        if counted >= 100 {
            self.ton_plus += 1;
        }
        if counted == 180 {
            self.one_eighties += 1;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Current leg three-dart average.
    pub leg_average: f64,
    /// Whole-match three-dart average.
    pub match_average: f64,
    /// First three visits of the current leg, `None` before the first visit.
    pub first_nine_average: Option<f64>,
    /// First three visits of every leg played so far.
    pub match_first_nine_average: Option<f64>,
    /// Best average over completed legs, including a leg just won.
    pub best_leg_average: Option<f64>,
    /// Successful checkouts per dart at a double, as a percentage. A checkout
    /// confirmed without a darts-at-double count is logged as one dart.
    pub checkout_percentage: Option<f64>,
    pub successful_checkouts: u32,
    pub checkout_attempts: u32,
    pub darts_thrown: u32,
    pub leg_darts: u32,
    pub busts: u32,
    pub escalation: Escalation,
}

impl PlayerStats {
    /// Single-pass fold over a ledger.
    pub fn from_ledger(ledger: &TurnLedger) -> Self {
        let current = ledger.current_leg();

        let (match_score, match_darts) = sums(ledger.turns());
        let (leg_score, leg_darts) = sums(current.iter());

        let mut f9_score = 0u32;
        let mut f9_darts = 0u32;
        for leg in ledger.legs() {
            let (s, d) = sums(leg.iter().take(FIRST_NINE_TURNS));
            f9_score += s;
            f9_darts += d;
        }
        let (leg_f9_score, leg_f9_darts) = sums(current.iter().take(FIRST_NINE_TURNS));

        let mut best_leg_average = None;
        for leg in ledger.legs() {
            let (mut s, mut d) = (0u32, 0u32);
            for t in leg {
                s += t.counted as u32;
                d += t.darts as u32;
                if t.checkout.is_some_and(|c| c.success) {
                    best_leg_average = best_of(best_leg_average, three_dart_average(s, d));
                }
            }
        }
        for leg in ledger.completed_legs().iter().filter(|leg| !leg.is_empty()) {
            let (s, d) = sums(leg.iter());
            best_leg_average = best_of(best_leg_average, three_dart_average(s, d));
        }

        let mut successful = 0u32;
        let mut attempts = 0u32;
        let mut busts = 0u32;
        let mut escalation = Escalation::default();
        for t in ledger.turns() {
            if let Some(c) = t.checkout {
                attempts += c.darts_at_double as u32;
                if c.success {
                    successful += 1;
                }
            }
            if t.bust {
                busts += 1;
            }
            escalation.record(t.counted);
        }

        Self {
            leg_average: three_dart_average(leg_score, leg_darts),
            match_average: three_dart_average(match_score, match_darts),
            first_nine_average: (leg_f9_darts > 0)
                .then(|| three_dart_average(leg_f9_score, leg_f9_darts)),
            match_first_nine_average: (f9_darts > 0)
                .then(|| three_dart_average(f9_score, f9_darts)),
            best_leg_average,
            checkout_percentage: checkout_percentage(successful, attempts),
            successful_checkouts: successful,
            checkout_attempts: attempts,
            darts_thrown: match_darts,
            leg_darts,
            busts,
            escalation,
        }
    }
}

fn sums<'a>(turns: impl Iterator<Item = &'a Turn>) -> (u32, u32) {
    turns.fold((0, 0), |(s, d), t| (s + t.counted as u32, d + t.darts as u32))
}

fn best_of(best: Option<f64>, avg: f64) -> Option<f64> {
    match best {
        Some(b) if b >= avg => Some(b),
        _ => Some(avg),
    }
}

fn checkout_percentage(successful: u32, attempts: u32) -> Option<f64> {
    (attempts > 0).then(|| successful as f64 * 100.0 / attempts as f64)
}

/// Incremental counterpart of [`PlayerStats::from_ledger`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsAccumulator {
    match_score: u32,
    match_darts: u32,
    leg_score: u32,
    leg_darts: u32,
    leg_turns: usize,
    leg_f9_score: u32,
    leg_f9_darts: u32,
    f9_score: u32,
    f9_darts: u32,
    best_leg_average: Option<f64>,
    successful: u32,
    attempts: u32,
    busts: u32,
    escalation: Escalation,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from scratch, e.g. after an undo.
    pub fn replay(ledger: &TurnLedger) -> Self {
        let mut acc = Self::new();
        for leg in ledger.completed_legs() {
            for t in leg {
                acc.record(t);
            }
            acc.close_leg();
        }
        for t in ledger.current_leg() {
            acc.record(t);
        }
        acc
    }

    pub fn record(&mut self, turn: &Turn) {
        let counted = turn.counted as u32;
        let darts = turn.darts as u32;

        self.match_score += counted;
        self.match_darts += darts;
        self.leg_score += counted;
        self.leg_darts += darts;

        if self.leg_turns < FIRST_NINE_TURNS {
            self.leg_f9_score += counted;
            self.leg_f9_darts += darts;
            self.f9_score += counted;
            self.f9_darts += darts;
        }
        self.leg_turns += 1;

        if let Some(c) = turn.checkout {
            self.attempts += c.darts_at_double as u32;
            if c.success {
                self.successful += 1;
                // A won leg counts toward the best leg before it is closed.
                self.best_leg_average = best_of(
                    self.best_leg_average,
                    three_dart_average(self.leg_score, self.leg_darts),
                );
            }
        }
        if turn.bust {
            self.busts += 1;
        }
        self.escalation.record(turn.counted);
    }

    pub fn close_leg(&mut self) {
        if self.leg_turns > 0 {
            self.best_leg_average = best_of(
                self.best_leg_average,
                three_dart_average(self.leg_score, self.leg_darts),
            );
        }
        self.leg_score = 0;
        self.leg_darts = 0;
        self.leg_turns = 0;
        self.leg_f9_score = 0;
        self.leg_f9_darts = 0;
    }

    pub fn snapshot(&self) -> PlayerStats {
        PlayerStats {
            leg_average: three_dart_average(self.leg_score, self.leg_darts),
            match_average: three_dart_average(self.match_score, self.match_darts),
            first_nine_average: (self.leg_f9_darts > 0)
                .then(|| three_dart_average(self.leg_f9_score, self.leg_f9_darts)),
            match_first_nine_average: (self.f9_darts > 0)
                .then(|| three_dart_average(self.f9_score, self.f9_darts)),
            best_leg_average: self.best_leg_average,
            checkout_percentage: checkout_percentage(self.successful, self.attempts),
            successful_checkouts: self.successful,
            checkout_attempts: self.attempts,
            darts_thrown: self.match_darts,
            leg_darts: self.leg_darts,
            busts: self.busts,
            escalation: self.escalation,
        }
    }
}
