use crate::config::{LegStarter, StartScore, X01Config};
use crate::domain::checkout::CheckoutType;
use crate::domain::keypad::ScoreInput;
use crate::domain::ledger::CheckoutRecord;
use crate::domain::state::MatchStatus;
use crate::domain::test_state_helpers::{kind_of, roster, submit_all, x01};
use crate::domain::x01::{CheckoutKind, TurnPhase, X01Match, X01Transition};
use crate::errors::domain::ValidationKind;

#[test]
fn three_visits_to_a_leg_in_a_longer_match() {
    let mut m = x01(StartScore::S501, 3, 1, 1);

    let events = submit_all(&mut m, &[180, 180]);
    assert_eq!(
        events[0].transition,
        X01Transition::Committed {
            seat: 0,
            score: 180,
            remaining: 321
        }
    );
    assert_eq!(m.players()[0].remaining, 141);

    let pending = m.submit_score(141).unwrap();
    assert_eq!(
        pending.transition,
        X01Transition::CheckoutPending {
            seat: 0,
            score: 141,
            kind: CheckoutKind::Checkout
        }
    );
    // Nothing is applied until the dart count comes back.
    assert_eq!(m.players()[0].remaining, 141);

    let done = m.confirm_darts_used(3).unwrap();
    match done.transition {
        X01Transition::LegComplete {
            winner,
            leg_no,
            summary,
        } => {
            assert_eq!(winner, 0);
            assert_eq!(leg_no, 1);
            assert_eq!(summary.players[0].stats.leg_average, 167.0);
            assert_eq!(summary.winner.map(|p| p.id), Some("p0".to_string()));
        }
        other => panic!("expected LegComplete, got {other:?}"),
    }
    assert_eq!(m.status(), MatchStatus::LegComplete);
    assert_eq!(m.players()[0].legs_won, 1);
    assert_eq!(m.players()[0].remaining, 0);
}

#[test]
fn single_leg_match_completes_the_game() {
    let mut m = x01(StartScore::S501, 1, 1, 1);
    submit_all(&mut m, &[180, 180, 141]);
    let done = m.confirm_darts_used(3).unwrap();

    match &done.transition {
        X01Transition::GameComplete { winner, summary } => {
            assert_eq!(*winner, 0);
            assert_eq!(summary.players[0].stats.match_average, 167.0);
            assert_eq!(summary.players[0].stats.leg_average, 167.0);
        }
        other => panic!("expected GameComplete, got {other:?}"),
    }
    assert!(m.is_complete());
    assert_eq!(m.active(), None);
    assert_eq!(m.winner(), Some(0));
    assert_eq!(m.players()[0].stats().best_leg_average, Some(167.0));
    assert_eq!(m.players()[0].sets_won, 1);
    assert_eq!(m.players()[0].stats().escalation.one_eighties, 2);
}

#[test]
fn leaving_one_is_a_bust() {
    let mut m = x01(StartScore::S101, 1, 1, 2);
    let ev = m.submit_score(100).unwrap();

    assert_eq!(
        ev.transition,
        X01Transition::Bust {
            seat: 0,
            score: 100,
            remaining: 101
        }
    );
    assert_eq!(m.players()[0].remaining, 101);
    assert_eq!(m.active(), Some(1));
    let last = m.players()[0].ledger.last().copied().unwrap();
    assert!(last.bust);
    assert_eq!(last.counted, 0);
    assert_eq!(last.darts, 3);
    assert_eq!(m.players()[0].stats().busts, 1);
}

#[test]
fn scoring_past_zero_is_a_bust() {
    let mut m = x01(StartScore::S101, 1, 1, 1);
    let ev = m.submit_score(140).unwrap();
    assert!(matches!(ev.transition, X01Transition::Bust { remaining: 101, .. }));
    assert_eq!(m.phase(), TurnPhase::Idle);
}

#[test]
fn zero_from_an_unfinishable_score_is_a_bust() {
    let mut m = x01(StartScore::S301, 1, 1, 1);
    submit_all(&mut m, &[130]);
    assert_eq!(m.players()[0].remaining, 171);
    assert_eq!(m.checkout_hint(), Some(CheckoutType::None));

    let ev = m.submit_score(171).unwrap();
    assert!(matches!(ev.transition, X01Transition::Bust { remaining: 171, .. }));
    assert_eq!(m.status(), MatchStatus::InProgress);
}

#[test]
fn missed_finish_asks_for_darts_at_double() {
    let mut m = x01(StartScore::S101, 1, 1, 1);
    let ev = m.submit_score(60).unwrap();
    assert_eq!(
        ev.transition,
        X01Transition::CheckoutPending {
            seat: 0,
            score: 60,
            kind: CheckoutKind::Attempt
        }
    );
    assert_eq!(m.active(), Some(0));

    let ev = m.confirm_darts_used(2).unwrap();
    assert_eq!(
        ev.transition,
        X01Transition::Committed {
            seat: 0,
            score: 60,
            remaining: 41
        }
    );
    let last = m.players()[0].ledger.last().copied().unwrap();
    assert_eq!(last.darts, 3);
    assert_eq!(
        last.checkout,
        Some(CheckoutRecord {
            darts_at_double: 2,
            success: false
        })
    );
    let stats = m.players()[0].stats();
    assert_eq!(stats.checkout_attempts, 2);
    assert_eq!(stats.checkout_percentage, Some(0.0));
}

#[test]
fn checkout_percentage_counts_every_dart_at_double() {
    let mut m = x01(StartScore::S101, 1, 1, 1);
    m.submit_score(60).unwrap();
    m.confirm_darts_used(2).unwrap();
    m.submit_score(41).unwrap();

    // 41 needs two darts.
    assert_eq!(
        kind_of(m.confirm_darts_used(1)),
        ValidationKind::InvalidDartCount
    );
    m.confirm_darts_used(2).unwrap();

    let stats = m.players()[0].stats();
    assert_eq!(stats.successful_checkouts, 1);
    assert_eq!(stats.checkout_attempts, 3);
    let pct = stats.checkout_percentage.unwrap();
    assert!((pct - 100.0 / 3.0).abs() < 1e-9);
}

#[test]
fn dart_counts_outside_the_range_are_rejected() {
    let mut m = x01(StartScore::S101, 1, 1, 1);
    m.submit_score(101).unwrap();
    assert_eq!(kind_of(m.confirm_darts_used(0)), ValidationKind::InvalidDartCount);
    assert_eq!(kind_of(m.confirm_darts_used(4)), ValidationKind::InvalidDartCount);
    assert!(m.pending().is_some());

    let mut m = x01(StartScore::S101, 1, 1, 1);
    m.submit_score(20).unwrap();
    assert_eq!(kind_of(m.confirm_darts_used(4)), ValidationKind::InvalidDartCount);
    assert!(m.confirm_darts_used(0).is_ok());
}

#[test]
fn pending_prompt_blocks_new_scores() {
    let mut m = x01(StartScore::S101, 1, 1, 2);
    m.submit_score(101).unwrap();
    let before = m.clone();

    assert_eq!(kind_of(m.submit_score(20)), ValidationKind::CheckoutPending);
    assert_eq!(m, before);
}

#[test]
fn confirm_without_prompt_is_rejected() {
    let mut m = x01(StartScore::S501, 1, 1, 1);
    assert_eq!(
        kind_of(m.confirm_darts_used(3)),
        ValidationKind::NoPendingCheckout
    );
}

#[test]
fn illegal_scores_are_rejected_without_changes() {
    let mut m = x01(StartScore::S501, 1, 1, 2);
    let before = m.clone();
    for raw in [181, 200, 179, 163] {
        assert_eq!(kind_of(m.submit_score(raw)), ValidationKind::InvalidScore);
    }
    assert_eq!(m, before);
}

#[test]
fn undo_walks_back_across_players() {
    let mut m = x01(StartScore::S501, 1, 1, 2);
    let start = m.clone();
    submit_all(&mut m, &[60, 45]);

    let ev = m.undo().unwrap();
    assert_eq!(
        ev.transition,
        X01Transition::Undone {
            seat: 1,
            score: 45,
            remaining: 501
        }
    );
    assert_eq!(m.active(), Some(1));

    m.undo().unwrap();
    assert_eq!(m, start);
    assert_eq!(kind_of(m.undo()), ValidationKind::NothingToUndo);
}

#[test]
fn undo_cancels_a_pending_prompt() {
    let mut m = x01(StartScore::S101, 1, 1, 1);
    let before = m.clone();
    m.submit_score(101).unwrap();

    let ev = m.undo().unwrap();
    assert_eq!(
        ev.transition,
        X01Transition::CheckoutCancelled {
            seat: 0,
            score: 101
        }
    );
    assert_eq!(m, before);
}

#[test]
fn undo_reverts_a_bust() {
    let mut m = x01(StartScore::S101, 1, 1, 2);
    let before = m.clone();
    m.submit_score(100).unwrap();
    m.undo().unwrap();
    assert_eq!(m, before);
    assert_eq!(m.players()[0].stats().busts, 0);
}

#[test]
fn closed_leg_cannot_be_undone() {
    let mut m = x01(StartScore::S101, 2, 1, 2);
    m.submit_score(101).unwrap();
    m.confirm_darts_used(2).unwrap();

    assert!(!m.can_undo());
    assert_eq!(kind_of(m.undo()), ValidationKind::PhaseMismatch);
    assert_eq!(kind_of(m.submit_score(60)), ValidationKind::PhaseMismatch);
}

#[test]
fn legs_and_match_progress_with_continuing_starter() {
    let mut m = x01(StartScore::S101, 2, 1, 2);

    m.submit_score(101).unwrap();
    m.confirm_darts_used(2).unwrap();
    assert_eq!(m.active(), Some(0));

    let ev = m.start_next_leg().unwrap();
    assert_eq!(
        ev.transition,
        X01Transition::LegStarted {
            leg_no: 2,
            set_no: 1,
            starter: 1
        }
    );
    assert!(m.players().iter().all(|p| p.remaining == 101));
    assert_eq!(m.players()[0].ledger.completed_legs().len(), 1);

    m.submit_score(101).unwrap();
    let ev = m.confirm_darts_used(2).unwrap();
    assert!(matches!(ev.transition, X01Transition::LegComplete { winner: 1, leg_no: 2, .. }));

    let ev = m.start_next_leg().unwrap();
    assert!(matches!(ev.transition, X01Transition::LegStarted { starter: 0, .. }));

    m.submit_score(101).unwrap();
    let ev = m.confirm_darts_used(2).unwrap();
    assert!(matches!(ev.transition, X01Transition::GameComplete { winner: 0, .. }));
    assert_eq!(m.players()[0].legs_won, 2);
    assert_eq!(m.players()[1].legs_won, 1);
    assert_eq!(m.players()[0].sets_won, 1);
}

#[test]
fn set_completion_resets_set_legs_on_the_next_leg() {
    let mut m = x01(StartScore::S101, 1, 2, 2);
    m.submit_score(101).unwrap();
    let ev = m.confirm_darts_used(2).unwrap();

    match &ev.transition {
        X01Transition::SetComplete { winner, set_no, .. } => {
            assert_eq!((*winner, *set_no), (0, 1));
        }
        other => panic!("expected SetComplete, got {other:?}"),
    }
    assert_eq!(ev.players[0].set_legs_won, 1);
    assert_eq!(ev.players[0].sets_won, 1);

    m.start_next_leg().unwrap();
    assert_eq!((m.leg_no(), m.set_no()), (2, 2));
    assert!(m.players().iter().all(|p| p.set_legs_won == 0));
    assert_eq!(m.players()[0].sets_won, 1);
}

#[test]
fn rotate_starter_follows_leg_number() {
    let play_to_second_seat_win = |starter: LegStarter| {
        let config = X01Config::new(StartScore::S101, 3, 1).with_leg_starter(starter);
        let mut m = X01Match::new(config, roster(3)).unwrap();
        m.submit_score(20).unwrap();
        m.confirm_darts_used(0).unwrap();
        m.submit_score(101).unwrap();
        m.confirm_darts_used(2).unwrap();
        m.start_next_leg().unwrap();
        m.active()
    };

    assert_eq!(play_to_second_seat_win(LegStarter::Continue), Some(2));
    assert_eq!(play_to_second_seat_win(LegStarter::Rotate), Some(1));
}

#[test]
fn next_leg_requires_a_finished_leg() {
    let mut m = x01(StartScore::S501, 2, 1, 2);
    assert_eq!(kind_of(m.start_next_leg()), ValidationKind::PhaseMismatch);
}

#[test]
fn invalid_setup_is_rejected() {
    let bad_legs = X01Match::new(X01Config::new(StartScore::S501, 0, 1), roster(2));
    assert_eq!(kind_of(bad_legs), ValidationKind::InvalidConfig);

    let empty = X01Match::new(X01Config::default(), Vec::new());
    assert_eq!(kind_of(empty), ValidationKind::EmptyRoster);
}

#[test]
fn keypad_entry_submits_and_clears() {
    let mut m = x01(StartScore::S501, 1, 1, 1);
    let mut input = ScoreInput::new();
    input.press(6).unwrap();
    input.press(0).unwrap();

    m.submit_input(&mut input).unwrap();
    assert!(input.is_empty());
    assert_eq!(m.players()[0].remaining, 441);

    assert_eq!(kind_of(m.submit_input(&mut input)), ValidationKind::InvalidScore);
}

#[test]
fn events_carry_snapshots_and_serialize_with_type_tags() {
    let mut m = x01(StartScore::S501, 1, 1, 2);
    let ev = m.submit_score(100).unwrap();

    assert_eq!(ev.players.len(), 2);
    assert!(!ev.players[0].is_active);
    assert!(ev.players[1].is_active);
    assert_eq!(ev.players[0].remaining, 401);

    let json = serde_json::to_value(&ev).unwrap();
    assert_eq!(json["transition"]["type"], "committed");
    assert_eq!(json["players"][0]["checkout"], "none");
}

#[test]
fn pending_prompt_survives_serialization() {
    let mut m = x01(StartScore::S101, 1, 1, 2);
    m.submit_score(101).unwrap();

    let json = serde_json::to_string(&m).unwrap();
    let mut restored: X01Match = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, m);
    assert!(matches!(
        restored.confirm_darts_used(2).unwrap().transition,
        X01Transition::GameComplete { winner: 0, .. }
    ));
}

#[test]
fn won_leg_counts_toward_best_leg_in_completion_events() {
    let mut m = x01(StartScore::S501, 2, 1, 1);
    submit_all(&mut m, &[180, 180, 141]);
    match m.confirm_darts_used(3).unwrap().transition {
        X01Transition::LegComplete { summary, .. } => {
            assert_eq!(summary.players[0].stats.best_leg_average, Some(167.0));
        }
        other => panic!("expected LegComplete, got {other:?}"),
    }

    m.start_next_leg().unwrap();
    submit_all(&mut m, &[180, 180, 141]);
    let summary = match m.confirm_darts_used(3).unwrap().transition {
        X01Transition::GameComplete { summary, .. } => summary,
        other => panic!("expected GameComplete, got {other:?}"),
    };
    let stats = &summary.players[0].stats;
    assert_eq!(stats.best_leg_average, Some(167.0));
    assert_eq!(stats.leg_average, 167.0);

    // Reading the finished match gives the same numbers as the event.
    assert_eq!(m.summary(), summary);
}

#[test]
fn confirm_checkout_counts_missed_doubles() {
    let mut m = x01(StartScore::S101, 1, 1, 1);
    m.submit_score(61).unwrap();
    m.confirm_darts_used(2).unwrap();
    m.submit_score(40).unwrap();

    assert_eq!(kind_of(m.confirm_checkout(3, 0)), ValidationKind::InvalidDartCount);
    assert_eq!(kind_of(m.confirm_checkout(2, 3)), ValidationKind::InvalidDartCount);
    assert!(m.pending().is_some());

    let done = m.confirm_checkout(3, 3).unwrap();
    assert!(matches!(done.transition, X01Transition::GameComplete { .. }));

    let stats = m.players()[0].stats();
    assert_eq!(stats.successful_checkouts, 1);
    assert_eq!(stats.checkout_attempts, 5);
    assert_eq!(stats.checkout_percentage, Some(20.0));
    assert_eq!(
        m.players()[0].ledger.last().and_then(|t| t.checkout),
        Some(CheckoutRecord {
            darts_at_double: 3,
            success: true
        })
    );
}

#[test]
fn confirm_checkout_only_answers_a_finishing_visit() {
    let mut m = x01(StartScore::S101, 1, 1, 1);
    m.submit_score(61).unwrap();
    assert_eq!(kind_of(m.confirm_checkout(3, 1)), ValidationKind::PhaseMismatch);
    assert_eq!(m.players()[0].remaining, 101);

    m.undo().unwrap();
    assert_eq!(kind_of(m.confirm_checkout(3, 1)), ValidationKind::NoPendingCheckout);
}
