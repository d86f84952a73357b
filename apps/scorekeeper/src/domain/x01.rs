//! X01 match engine: count-down scoring over legs and sets.
//!
//! The engine is a plain value. Every operation either applies completely and
//! returns an [`X01Event`], or returns a [`DomainError`] and leaves the match
//! untouched. Busts are events, not errors.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{LegStarter, X01Config};
use crate::domain::checkout::{checkout_type, CheckoutType};
use crate::domain::keypad::ScoreInput;
use crate::domain::ledger::{Turn, TurnLedger};
use crate::domain::roster::{validate_roster, PlayerProfile};
use crate::domain::rules::{max_score_for_darts, DARTS_PER_TURN, MAX_TURN_SCORE};
use crate::domain::snapshot::{X01PlayerSnapshot, X01Summary};
use crate::domain::state::{
    next_seat, nth_from, require_active, require_in_progress, MatchStatus, Seat,
};
use crate::domain::stats::{PlayerStats, StatsAccumulator};
use crate::domain::throws::is_reachable_turn_score;
use crate::errors::domain::{DomainError, ValidationKind};

/// Why the engine is waiting for a dart count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutKind {
    /// The visit reached exactly zero; the count is darts used.
    Checkout,
    /// The player was on a finish and missed; the count is darts at a double.
    Attempt,
}

/// A visit held back until the thrower reports darts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCheckout {
    pub seat: Seat,
    pub score: u16,
    pub remaining_before: u16,
    pub kind: CheckoutKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "pending", rename_all = "snake_case")]
pub enum TurnPhase {
    #[default]
    Idle,
    AwaitingDartCount(PendingCheckout),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct X01Player {
    pub profile: PlayerProfile,
    pub remaining: u16,
    pub legs_won: u16,
    pub set_legs_won: u8,
    pub sets_won: u8,
    pub ledger: TurnLedger,
    stats: StatsAccumulator,
}

impl X01Player {
    fn new(profile: PlayerProfile, start: u16) -> Self {
        Self {
            profile,
            remaining: start,
            legs_won: 0,
            set_legs_won: 0,
            sets_won: 0,
            ledger: TurnLedger::new(),
            stats: StatsAccumulator::new(),
        }
    }

    pub fn stats(&self) -> PlayerStats {
        self.stats.snapshot()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct UndoEntry {
    seat: Seat,
    remaining_before: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum X01Transition {
    Committed {
        seat: Seat,
        score: u16,
        remaining: u16,
    },
    Bust {
        seat: Seat,
        score: u16,
        remaining: u16,
    },
    CheckoutPending {
        seat: Seat,
        score: u16,
        kind: CheckoutKind,
    },
    CheckoutCancelled {
        seat: Seat,
        score: u16,
    },
    Undone {
        seat: Seat,
        score: u16,
        remaining: u16,
    },
    LegComplete {
        winner: Seat,
        leg_no: u16,
        summary: X01Summary,
    },
    SetComplete {
        winner: Seat,
        set_no: u16,
        summary: X01Summary,
    },
    GameComplete {
        winner: Seat,
        summary: X01Summary,
    },
    LegStarted {
        leg_no: u16,
        set_no: u16,
        starter: Seat,
    },
}

/// Outbound event: what happened plus every player's updated snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct X01Event {
    pub transition: X01Transition,
    pub players: Vec<X01PlayerSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct X01Match {
    config: X01Config,
    players: Vec<X01Player>,
    active: Option<Seat>,
    status: MatchStatus,
    phase: TurnPhase,
    /// 1-based, counted over the whole match.
    leg_no: u16,
    /// 1-based.
    set_no: u16,
    leg_starter: Seat,
    undo: Vec<UndoEntry>,
    winner: Option<Seat>,
}

impl X01Match {
    /// Start a match; seat 0 throws first.
    pub fn new(config: X01Config, roster: Vec<PlayerProfile>) -> Result<Self, DomainError> {
        config.validate()?;
        validate_roster(&roster)?;
        let start = config.start_score.points();
        let players = roster
            .into_iter()
            .map(|p| X01Player::new(p, start))
            .collect::<Vec<_>>();
        info!(
            players = players.len(),
            start_score = start,
            legs_to_win = config.legs_to_win,
            sets_to_win = config.sets_to_win,
            "X01 match created"
        );
        Ok(Self {
            config,
            players,
            active: Some(0),
            status: MatchStatus::InProgress,
            phase: TurnPhase::Idle,
            leg_no: 1,
            set_no: 1,
            leg_starter: 0,
            undo: Vec::new(),
            winner: None,
        })
    }

    pub fn config(&self) -> &X01Config {
        &self.config
    }

    pub fn players(&self) -> &[X01Player] {
        &self.players
    }

    pub fn player(&self, seat: Seat) -> Option<&X01Player> {
        self.players.get(seat)
    }

    pub fn active(&self) -> Option<Seat> {
        self.active
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn pending(&self) -> Option<PendingCheckout> {
        match self.phase {
            TurnPhase::AwaitingDartCount(p) => Some(p),
            TurnPhase::Idle => None,
        }
    }

    pub fn leg_no(&self) -> u16 {
        self.leg_no
    }

    pub fn set_no(&self) -> u16 {
        self.set_no
    }

    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    pub fn is_complete(&self) -> bool {
        self.status == MatchStatus::GameComplete
    }

    /// Finish classification of the active player's remaining score.
    pub fn checkout_hint(&self) -> Option<CheckoutType> {
        self.active
            .and_then(|seat| self.players.get(seat))
            .map(|p| checkout_type(p.remaining))
    }

    pub fn can_undo(&self) -> bool {
        self.pending().is_some()
            || (self.status == MatchStatus::InProgress && !self.undo.is_empty())
    }

    /// Submit the value built on a keypad, clearing it on success.
    pub fn submit_input(&mut self, input: &mut ScoreInput) -> Result<X01Event, DomainError> {
        let raw = input.value().ok_or_else(|| {
            DomainError::validation(ValidationKind::InvalidScore, "No score entered")
        })?;
        let event = self.submit_score(raw)?;
        input.clear();
        Ok(event)
    }

    /// Score one visit for the active player.
    pub fn submit_score(&mut self, raw: u16) -> Result<X01Event, DomainError> {
        require_in_progress(self.status, "submit_score")?;
        if let Some(p) = self.pending() {
            return Err(DomainError::validation(
                ValidationKind::CheckoutPending,
                format!("Dart count for the visit of {} is still pending", p.score),
            ));
        }
        validate_turn_score(raw)?;
        let seat = require_active(self.active, "submit_score")?;

        let remaining = self.players[seat].remaining;
        let on_finish = checkout_type(remaining).is_finishable();
        let after = remaining as i32 - raw as i32;

        if after < 0 || after == 1 || (after == 0 && !on_finish) {
            self.record_turn(seat, Turn::bust(raw), remaining);
            self.active = Some(next_seat(seat, self.players.len()));
            debug!(seat, score = raw, remaining, "Bust");
            return Ok(self.event(X01Transition::Bust {
                seat,
                score: raw,
                remaining,
            }));
        }

        if after == 0 || on_finish {
            let kind = if after == 0 {
                CheckoutKind::Checkout
            } else {
                CheckoutKind::Attempt
            };
            self.phase = TurnPhase::AwaitingDartCount(PendingCheckout {
                seat,
                score: raw,
                remaining_before: remaining,
                kind,
            });
            debug!(seat, score = raw, ?kind, "Awaiting dart count");
            return Ok(self.event(X01Transition::CheckoutPending {
                seat,
                score: raw,
                kind,
            }));
        }

        let remaining = after as u16;
        self.record_turn(seat, Turn::scored(raw), remaining);
        self.active = Some(next_seat(seat, self.players.len()));
        debug!(seat, score = raw, remaining, "Visit committed");
        Ok(self.event(X01Transition::Committed {
            seat,
            score: raw,
            remaining,
        }))
    }

    /// Answer the pending dart-count prompt.
    ///
    /// For a checkout, `count` is darts used (1–3, at least the fewest darts
    /// the finish needs) and one dart at a double is logged; use
    /// [`Self::confirm_checkout`] to report missed doubles too. For a missed
    /// attempt it is darts thrown at a double (0–3).
    pub fn confirm_darts_used(&mut self, count: u8) -> Result<X01Event, DomainError> {
        let pending = self.pending().ok_or_else(|| {
            DomainError::validation(
                ValidationKind::NoPendingCheckout,
                "No dart count is pending",
            )
        })?;

        match pending.kind {
            CheckoutKind::Checkout => self.finish_checkout(pending, count, 1),
            CheckoutKind::Attempt => {
                if count > DARTS_PER_TURN {
                    return Err(DomainError::validation(
                        ValidationKind::InvalidDartCount,
                        format!("At most {DARTS_PER_TURN} darts can be thrown at a double"),
                    ));
                }
                self.phase = TurnPhase::Idle;
                let remaining = pending.remaining_before - pending.score;
                self.record_turn(
                    pending.seat,
                    Turn::missed_checkout(pending.score, count),
                    remaining,
                );
                self.active = Some(next_seat(pending.seat, self.players.len()));
                debug!(
                    seat = pending.seat,
                    score = pending.score,
                    darts_at_double = count,
                    "Missed checkout recorded"
                );
                Ok(self.event(X01Transition::Committed {
                    seat: pending.seat,
                    score: pending.score,
                    remaining,
                }))
            }
        }
    }

    /// Answer a checkout prompt with both darts used and darts thrown at a
    /// double, so doubles missed on the way out count against checkout %.
    pub fn confirm_checkout(
        &mut self,
        darts_used: u8,
        darts_at_double: u8,
    ) -> Result<X01Event, DomainError> {
        let pending = self.pending().ok_or_else(|| {
            DomainError::validation(
                ValidationKind::NoPendingCheckout,
                "No dart count is pending",
            )
        })?;
        if pending.kind != CheckoutKind::Checkout {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "confirm_checkout: the pending visit did not finish the leg",
            ));
        }
        self.finish_checkout(pending, darts_used, darts_at_double)
    }

    fn finish_checkout(
        &mut self,
        pending: PendingCheckout,
        count: u8,
        darts_at_double: u8,
    ) -> Result<X01Event, DomainError> {
        let min = checkout_type(pending.remaining_before)
            .min_darts()
            .unwrap_or(DARTS_PER_TURN);
        if count == 0
            || count > DARTS_PER_TURN
            || count < min
            || pending.score > max_score_for_darts(count)
        {
            return Err(DomainError::validation(
                ValidationKind::InvalidDartCount,
                format!(
                    "{} cannot be checked out with {count} dart(s) (needs {min}..=3)",
                    pending.score
                ),
            ));
        }
        if darts_at_double == 0 || darts_at_double > count {
            return Err(DomainError::validation(
                ValidationKind::InvalidDartCount,
                format!("Darts at a double must be 1..={count}, got {darts_at_double}"),
            ));
        }
        self.phase = TurnPhase::Idle;
        self.record_turn(
            pending.seat,
            Turn::checkout_at_double(pending.score, count, darts_at_double),
            0,
        );
        Ok(self.complete_leg(pending.seat))
    }

    /// Revert the pending prompt, or the last committed visit of this leg.
    pub fn undo(&mut self) -> Result<X01Event, DomainError> {
        if let Some(p) = self.pending() {
            self.phase = TurnPhase::Idle;
            debug!(seat = p.seat, score = p.score, "Pending checkout cancelled");
            return Ok(self.event(X01Transition::CheckoutCancelled {
                seat: p.seat,
                score: p.score,
            }));
        }
        require_in_progress(self.status, "undo")?;

        let entry = *self.undo.last().ok_or_else(|| {
            DomainError::validation(
                ValidationKind::NothingToUndo,
                "Nothing to undo in this leg",
            )
        })?;
        let player = &mut self.players[entry.seat];
        let turn = player.ledger.pop_current().ok_or_else(|| {
            DomainError::validation_other("Invariant violated: undo entry without a recorded turn")
        })?;
        self.undo.pop();
        player.remaining = entry.remaining_before;
        player.stats = StatsAccumulator::replay(&player.ledger);
        self.active = Some(entry.seat);

        debug!(seat = entry.seat, score = turn.score, "Visit undone");
        Ok(self.event(X01Transition::Undone {
            seat: entry.seat,
            score: turn.score,
            remaining: entry.remaining_before,
        }))
    }

    /// Leave `LegComplete`/`SetComplete` and open the next leg.
    pub fn start_next_leg(&mut self) -> Result<X01Event, DomainError> {
        let finished_set = match self.status {
            MatchStatus::LegComplete => false,
            MatchStatus::SetComplete => true,
            other => {
                return Err(DomainError::validation(
                    ValidationKind::PhaseMismatch,
                    format!("start_next_leg: match is {other:?}"),
                ))
            }
        };
        let last_thrower = require_active(self.active, "start_next_leg")?;
        let start = self.config.start_score.points();
        let n = self.players.len();

        for p in &mut self.players {
            p.ledger.close_leg();
            p.stats.close_leg();
            p.remaining = start;
            if finished_set {
                p.set_legs_won = 0;
            }
        }
        self.leg_no += 1;
        if finished_set {
            self.set_no += 1;
        }
        self.leg_starter = match self.config.leg_starter {
            LegStarter::Continue => next_seat(last_thrower, n),
            LegStarter::Rotate => nth_from(0, usize::from(self.leg_no - 1), n),
        };
        self.undo.clear();
        self.active = Some(self.leg_starter);
        self.status = MatchStatus::InProgress;

        info!(
            leg_no = self.leg_no,
            set_no = self.set_no,
            starter = self.leg_starter,
            "Leg started"
        );
        Ok(self.event(X01Transition::LegStarted {
            leg_no: self.leg_no,
            set_no: self.set_no,
            starter: self.leg_starter,
        }))
    }

    pub fn snapshots(&self) -> Vec<X01PlayerSnapshot> {
        self.players
            .iter()
            .enumerate()
            .map(|(seat, p)| X01PlayerSnapshot {
                seat,
                profile: p.profile.clone(),
                remaining: p.remaining,
                legs_won: p.legs_won,
                set_legs_won: p.set_legs_won,
                sets_won: p.sets_won,
                is_active: self.active == Some(seat),
                checkout: checkout_type(p.remaining),
                stats: p.stats(),
            })
            .collect()
    }

    /// Statistics snapshot; `winner` defaults to the match winner.
    pub fn summary(&self) -> X01Summary {
        self.summary_for(self.winner)
    }

    fn summary_for(&self, winner: Option<Seat>) -> X01Summary {
        X01Summary {
            leg_no: self.leg_no,
            set_no: self.set_no,
            winner: winner
                .and_then(|s| self.players.get(s))
                .map(|p| p.profile.clone()),
            players: self.snapshots(),
        }
    }

    fn event(&self, transition: X01Transition) -> X01Event {
        X01Event {
            transition,
            players: self.snapshots(),
        }
    }

    fn record_turn(&mut self, seat: Seat, turn: Turn, remaining: u16) {
        let player = &mut self.players[seat];
        self.undo.push(UndoEntry {
            seat,
            remaining_before: player.remaining,
        });
        player.remaining = remaining;
        player.stats.record(&turn);
        player.ledger.push(turn);
    }

    /// Credit a leg to `winner` and cascade set and match completion.
    fn complete_leg(&mut self, winner: Seat) -> X01Event {
        let legs_to_win = self.config.legs_to_win;
        let sets_to_win = self.config.sets_to_win;
        self.undo.clear();

        let player = &mut self.players[winner];
        player.legs_won += 1;
        player.set_legs_won += 1;
        let set_won = player.set_legs_won >= legs_to_win;
        if set_won {
            player.sets_won += 1;
        }
        let match_won = set_won && player.sets_won >= sets_to_win;

        if match_won {
            self.status = MatchStatus::GameComplete;
            self.winner = Some(winner);
            self.active = None;
            // The final leg stays open so `summary()` keeps matching this event.
            let summary = self.summary_for(Some(winner));
            info!(winner, leg_no = self.leg_no, set_no = self.set_no, "Game complete");
            return self.event(X01Transition::GameComplete { winner, summary });
        }

        let summary = self.summary_for(Some(winner));
        if set_won {
            self.status = MatchStatus::SetComplete;
            info!(winner, set_no = self.set_no, "Set complete");
            let set_no = self.set_no;
            self.event(X01Transition::SetComplete {
                winner,
                set_no,
                summary,
            })
        } else {
            self.status = MatchStatus::LegComplete;
            info!(winner, leg_no = self.leg_no, "Leg complete");
            let leg_no = self.leg_no;
            self.event(X01Transition::LegComplete {
                winner,
                leg_no,
                summary,
            })
        }
    }
}

fn validate_turn_score(raw: u16) -> Result<(), DomainError> {
    if raw > MAX_TURN_SCORE {
        return Err(DomainError::validation(
            ValidationKind::InvalidScore,
            format!("{raw} is above the {MAX_TURN_SCORE} maximum"),
        ));
    }
    if !is_reachable_turn_score(raw) {
        return Err(DomainError::validation(
            ValidationKind::InvalidScore,
            format!("{raw} cannot be scored with three darts"),
        ));
    }
    Ok(())
}
