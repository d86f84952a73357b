// Proptest generators for domain types.
// Scores are drawn from the reachable set directly rather than filtered.

use proptest::prelude::*;

use crate::config::{CricketMode, LegStarter, StartScore};
use crate::domain::ledger::{Turn, TurnLedger};
use crate::domain::rules::{CRICKET_NUMBERS, MAX_TURN_SCORE};
use crate::domain::throws::is_reachable_turn_score;

/// A score three darts can make.
pub fn turn_score() -> impl Strategy<Value = u16> {
    let reachable: Vec<u16> = (0..=MAX_TURN_SCORE)
        .filter(|s| is_reachable_turn_score(*s))
        .collect();
    prop::sample::select(reachable)
}

/// Any raw keypad value, legal or not.
pub fn raw_score() -> impl Strategy<Value = u16> {
    prop_oneof![
        8 => turn_score(),
        1 => 0u16..=250,
    ]
}

pub fn start_score() -> impl Strategy<Value = StartScore> {
    prop::sample::select(StartScore::ALL.to_vec())
}

pub fn leg_starter() -> impl Strategy<Value = LegStarter> {
    prop_oneof![Just(LegStarter::Continue), Just(LegStarter::Rotate)]
}

pub fn turn() -> impl Strategy<Value = Turn> {
    prop_oneof![
        6 => turn_score().prop_map(Turn::scored),
        1 => turn_score().prop_map(Turn::bust),
        1 => (turn_score(), 1u8..=3).prop_map(|(s, d)| Turn::checkout(s, d)),
        2 => (turn_score(), 0u8..=3).prop_map(|(s, d)| Turn::missed_checkout(s, d)),
    ]
}

/// A ledger with 0..4 completed legs and an open current leg.
pub fn ledger() -> impl Strategy<Value = TurnLedger> {
    prop::collection::vec(prop::collection::vec(turn(), 0..8), 1..5).prop_map(|legs| {
        let mut ledger = TurnLedger::new();
        let last = legs.len() - 1;
        for (i, leg) in legs.into_iter().enumerate() {
            for t in leg {
                ledger.push(t);
            }
            if i < last {
                ledger.close_leg();
            }
        }
        ledger
    })
}

#[derive(Debug, Clone, Copy)]
pub enum X01Action {
    Submit(u16),
    Confirm(u8),
    Undo,
    NextLeg,
}

pub fn x01_action() -> impl Strategy<Value = X01Action> {
    prop_oneof![
        10 => raw_score().prop_map(X01Action::Submit),
        5 => (0u8..=4).prop_map(X01Action::Confirm),
        1 => Just(X01Action::Undo),
        2 => Just(X01Action::NextLeg),
    ]
}

pub fn cricket_mode() -> impl Strategy<Value = CricketMode> {
    prop_oneof![Just(CricketMode::Cricket), Just(CricketMode::Route)]
}

/// Mostly board numbers, occasionally something off the board.
pub fn cricket_number() -> impl Strategy<Value = u8> {
    prop_oneof![
        9 => prop::sample::select(CRICKET_NUMBERS.to_vec()),
        1 => any::<u8>(),
    ]
}

#[derive(Debug, Clone, Copy)]
pub enum CricketAction {
    Record(u8, u8),
    Select(u8),
    AddMark,
    RemoveMark,
    Commit,
}

pub fn cricket_action() -> impl Strategy<Value = CricketAction> {
    prop_oneof![
        4 => (cricket_number(), 0u8..=10).prop_map(|(n, m)| CricketAction::Record(n, m)),
        2 => cricket_number().prop_map(CricketAction::Select),
        3 => Just(CricketAction::AddMark),
        1 => Just(CricketAction::RemoveMark),
        3 => Just(CricketAction::Commit),
    ]
}
