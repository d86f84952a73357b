//! Cricket match engine: marks over 20 down to 15 plus Bull.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{CricketConfig, CricketMode};
use crate::domain::roster::{validate_roster, PlayerProfile};
use crate::domain::rules::{cricket_index, CRICKET_NUMBERS, MAX_MARKS_PER_TURN};
use crate::domain::snapshot::{CricketPlayerSnapshot, CricketSummary, NumberMarks, Pace};
use crate::domain::state::{next_seat, require_active, require_in_progress, MatchStatus, Seat};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CricketPlayer {
    pub profile: PlayerProfile,
    /// Indexed like `CRICKET_NUMBERS`; each entry is capped at the threshold.
    pub marks: [u8; 7],
    pub points: u32,
    /// Every mark ever recorded, excess included.
    pub total_marks: u32,
    pub turns: u32,
}

impl CricketPlayer {
    fn new(profile: PlayerProfile) -> Self {
        Self {
            profile,
            marks: [0; 7],
            points: 0,
            total_marks: 0,
            turns: 0,
        }
    }

    pub fn has_closed(&self, index: usize, required: u8) -> bool {
        self.marks.get(index).is_some_and(|m| *m >= required)
    }

    pub fn has_closed_all(&self, required: u8) -> bool {
        self.marks.iter().all(|m| *m >= required)
    }
}

/// Outcome of one `record_marks` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarksApplied {
    pub number: u8,
    pub marks: u8,
    pub newly_closed: bool,
    pub points: u32,
}

/// The number and hit count being built up before a turn is committed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSelection {
    pub number: Option<u8>,
    pub marks: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CricketTransition {
    MarksApplied {
        seat: Seat,
        applied: MarksApplied,
    },
    SelectionChanged {
        seat: Seat,
        selection: TurnSelection,
    },
    TurnCommitted {
        seat: Seat,
        applied: Option<MarksApplied>,
        pace: Pace,
    },
    GameComplete {
        winner: Seat,
        closed_by: Seat,
        applied: Option<MarksApplied>,
        summary: CricketSummary,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CricketEvent {
    pub transition: CricketTransition,
    pub players: Vec<CricketPlayerSnapshot>,
}

impl CricketEvent {
    /// Marks applied by the operation that produced this event, if any.
    pub fn applied(&self) -> Option<&MarksApplied> {
        match &self.transition {
            CricketTransition::MarksApplied { applied, .. } => Some(applied),
            CricketTransition::TurnCommitted { applied, .. }
            | CricketTransition::GameComplete { applied, .. } => applied.as_ref(),
            CricketTransition::SelectionChanged { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CricketMatch {
    config: CricketConfig,
    players: Vec<CricketPlayer>,
    active: Option<Seat>,
    status: MatchStatus,
    selection: TurnSelection,
    winner: Option<Seat>,
}

impl CricketMatch {
    pub fn new(config: CricketConfig, roster: Vec<PlayerProfile>) -> Result<Self, DomainError> {
        config.validate()?;
        validate_roster(&roster)?;
        let players = roster.into_iter().map(CricketPlayer::new).collect::<Vec<_>>();
        info!(
            players = players.len(),
            mode = ?config.mode,
            marks_required = config.marks_required,
            "Cricket match created"
        );
        Ok(Self {
            config,
            players,
            active: Some(0),
            status: MatchStatus::InProgress,
            selection: TurnSelection::default(),
            winner: None,
        })
    }

    pub fn config(&self) -> &CricketConfig {
        &self.config
    }

    pub fn players(&self) -> &[CricketPlayer] {
        &self.players
    }

    pub fn active(&self) -> Option<Seat> {
        self.active
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn selection(&self) -> TurnSelection {
        self.selection
    }

    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    pub fn is_complete(&self) -> bool {
        self.status == MatchStatus::GameComplete
    }

    /// First number, in board order, that `seat` has not closed.
    pub fn next_required_number(&self, seat: Seat) -> Option<u8> {
        let player = self.players.get(seat)?;
        let required = self.config.marks_required;
        CRICKET_NUMBERS
            .iter()
            .zip(player.marks.iter())
            .find(|(_, marks)| **marks < required)
            .map(|(number, _)| *number)
    }

    /// Numbers the active player may select this turn.
    pub fn available_numbers(&self) -> Vec<u8> {
        let Some(seat) = self.active else {
            return Vec::new();
        };
        match self.config.mode {
            CricketMode::Route => self.next_required_number(seat).into_iter().collect(),
            CricketMode::Cricket => {
                let required = self.config.marks_required;
                CRICKET_NUMBERS
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| !self.players[seat].has_closed(*i, required))
                    .map(|(_, n)| *n)
                    .collect()
            }
        }
    }

    /// Add marks on `number` for the active player. Completes the game when
    /// this closes the player's last number.
    pub fn record_marks(&mut self, number: u8, marks: u8) -> Result<CricketEvent, DomainError> {
        require_in_progress(self.status, "record_marks")?;
        let seat = require_active(self.active, "record_marks")?;
        let applied = self.apply_marks(seat, number, marks)?;

        if self.players[seat].has_closed_all(self.config.marks_required) {
            return Ok(self.complete(seat, Some(applied)));
        }
        Ok(self.event(CricketTransition::MarksApplied { seat, applied }))
    }

    pub fn select_number(&mut self, number: u8) -> Result<CricketEvent, DomainError> {
        require_in_progress(self.status, "select_number")?;
        let seat = require_active(self.active, "select_number")?;
        if cricket_index(number).is_none() {
            return Err(invalid_number(number));
        }
        if !self.available_numbers().contains(&number) {
            return Err(DomainError::validation(
                ValidationKind::NumberNotAvailable,
                format!("{number} is not available to seat {seat}"),
            ));
        }
        if self.selection.number != Some(number) {
            self.selection = TurnSelection {
                number: Some(number),
                marks: 0,
            };
        }
        Ok(self.selection_event(seat))
    }

    pub fn add_mark(&mut self) -> Result<CricketEvent, DomainError> {
        require_in_progress(self.status, "add_mark")?;
        let seat = require_active(self.active, "add_mark")?;
        if self.selection.number.is_none() {
            return Err(DomainError::validation(
                ValidationKind::InvalidMarks,
                "Select a number before adding marks",
            ));
        }
        if self.selection.marks >= MAX_MARKS_PER_TURN {
            return Err(DomainError::validation(
                ValidationKind::InvalidMarks,
                format!("At most {MAX_MARKS_PER_TURN} marks fit in one turn"),
            ));
        }
        self.selection.marks += 1;
        Ok(self.selection_event(seat))
    }

    pub fn remove_mark(&mut self) -> Result<CricketEvent, DomainError> {
        require_in_progress(self.status, "remove_mark")?;
        let seat = require_active(self.active, "remove_mark")?;
        if self.selection.marks == 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidMarks,
                "No marks to remove",
            ));
        }
        self.selection.marks -= 1;
        Ok(self.selection_event(seat))
    }

    /// Apply the selection, close the turn and pass to the next player.
    pub fn commit_turn(&mut self) -> Result<CricketEvent, DomainError> {
        require_in_progress(self.status, "commit_turn")?;
        let seat = require_active(self.active, "commit_turn")?;

        let applied = match self.selection {
            TurnSelection {
                number: Some(number),
                marks,
            } if marks > 0 => Some(self.apply_marks(seat, number, marks)?),
            _ => None,
        };
        self.selection = TurnSelection::default();
        self.players[seat].turns += 1;

        if self.players[seat].has_closed_all(self.config.marks_required) {
            return Ok(self.complete(seat, applied));
        }

        let pace = self.pace_for(seat);
        self.active = Some(next_seat(seat, self.players.len()));
        debug!(
            seat,
            marks_per_turn = pace.marks_per_turn,
            marks_difference = pace.marks_difference,
            "Cricket turn committed"
        );
        Ok(self.event(CricketTransition::TurnCommitted {
            seat,
            applied,
            pace,
        }))
    }

    /// Marks pace of `seat` against the mean of everyone else.
    pub fn pace_for(&self, seat: Seat) -> Pace {
        let Some(player) = self.players.get(seat) else {
            return Pace::default();
        };
        let total = player.total_marks;
        let estimated_turns = (total / 3).max(1);
        let others = self
            .players
            .iter()
            .enumerate()
            .filter(|(s, _)| *s != seat)
            .map(|(_, p)| f64::from(p.total_marks))
            .collect::<Vec<_>>();
        let marks_difference = if others.is_empty() {
            0.0
        } else {
            f64::from(total) - others.iter().sum::<f64>() / others.len() as f64
        };
        Pace {
            marks_per_turn: f64::from(total) / f64::from(estimated_turns),
            marks_difference,
        }
    }

    pub fn snapshots(&self) -> Vec<CricketPlayerSnapshot> {
        let required = self.config.marks_required;
        self.players
            .iter()
            .enumerate()
            .map(|(seat, p)| CricketPlayerSnapshot {
                seat,
                profile: p.profile.clone(),
                marks: CRICKET_NUMBERS
                    .iter()
                    .zip(p.marks.iter())
                    .map(|(number, marks)| NumberMarks {
                        number: *number,
                        marks: *marks,
                        closed: *marks >= required,
                    })
                    .collect(),
                points: p.points,
                total_marks: p.total_marks,
                turns: p.turns,
                closed_all: p.has_closed_all(required),
                is_active: self.active == Some(seat),
                pace: self.pace_for(seat),
            })
            .collect()
    }

    pub fn summary(&self) -> CricketSummary {
        CricketSummary {
            winner: self
                .winner
                .and_then(|s| self.players.get(s))
                .map(|p| p.profile.clone()),
            players: self.snapshots(),
        }
    }

    fn apply_marks(
        &mut self,
        seat: Seat,
        number: u8,
        marks: u8,
    ) -> Result<MarksApplied, DomainError> {
        let index = cricket_index(number).ok_or_else(|| invalid_number(number))?;
        if marks == 0 || marks > MAX_MARKS_PER_TURN {
            return Err(DomainError::validation(
                ValidationKind::InvalidMarks,
                format!("{marks} marks is outside 1..={MAX_MARKS_PER_TURN}"),
            ));
        }
        if self.config.mode == CricketMode::Route
            && self.next_required_number(seat) != Some(number)
        {
            return Err(DomainError::validation(
                ValidationKind::NumberNotAvailable,
                format!("{number} is not the next number on seat {seat}'s route"),
            ));
        }

        let required = self.config.marks_required;
        let opponent_open = self
            .players
            .iter()
            .enumerate()
            .any(|(s, p)| s != seat && !p.has_closed(index, required));

        let player = &mut self.players[seat];
        let before = player.marks[index];
        let counted = marks.min(required.saturating_sub(before));
        let excess = marks - counted;
        player.marks[index] = before + counted;
        player.total_marks += u32::from(marks);

        let points = match self.config.mode {
            CricketMode::Cricket if opponent_open => u32::from(excess) * u32::from(number),
            _ => 0,
        };
        player.points += points;
        let newly_closed = before < required && player.marks[index] >= required;

        debug!(seat, number, marks, points, newly_closed, "Marks applied");
        Ok(MarksApplied {
            number,
            marks,
            newly_closed,
            points,
        })
    }

    /// Highest points wins; the closing player takes ties, then the lowest seat.
    fn complete(&mut self, closed_by: Seat, applied: Option<MarksApplied>) -> CricketEvent {
        let winner = self
            .players
            .iter()
            .enumerate()
            .max_by(|(a, pa), (b, pb)| {
                pa.points
                    .cmp(&pb.points)
                    .then_with(|| (*a == closed_by).cmp(&(*b == closed_by)))
                    .then_with(|| b.cmp(a))
            })
            .map(|(seat, _)| seat)
            .unwrap_or(closed_by);

        self.status = MatchStatus::GameComplete;
        self.active = None;
        self.winner = Some(winner);
        self.selection = TurnSelection::default();
        info!(winner, closed_by, "Cricket game complete");

        let summary = self.summary();
        self.event(CricketTransition::GameComplete {
            winner,
            closed_by,
            applied,
            summary,
        })
    }

    fn selection_event(&self, seat: Seat) -> CricketEvent {
        self.event(CricketTransition::SelectionChanged {
            seat,
            selection: self.selection,
        })
    }

    fn event(&self, transition: CricketTransition) -> CricketEvent {
        CricketEvent {
            transition,
            players: self.snapshots(),
        }
    }
}

fn invalid_number(number: u8) -> DomainError {
    DomainError::validation(
        ValidationKind::InvalidNumber,
        format!("{number} is not a cricket number"),
    )
}
