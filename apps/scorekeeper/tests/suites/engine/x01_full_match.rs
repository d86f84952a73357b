use scorekeeper::domain::x01::X01Transition;
use scorekeeper::{MatchStatus, StartScore, X01Config, X01Match};

use crate::common::roster;

fn visit(m: &mut X01Match, score: u16) -> X01Transition {
    m.submit_score(score)
        .unwrap_or_else(|e| panic!("{score} rejected: {e}"))
        .transition
}

fn confirm(m: &mut X01Match, darts: u8) -> X01Transition {
    m.confirm_darts_used(darts)
        .unwrap_or_else(|e| panic!("{darts} darts rejected: {e}"))
        .transition
}

#[test]
fn best_of_three_legs_of_301() {
    let mut m = X01Match::new(X01Config::new(StartScore::S301, 2, 1), roster(2)).unwrap();

    // Leg 1: seat 0 starts and takes it out on 161.
    visit(&mut m, 140);
    visit(&mut m, 100);
    assert!(matches!(visit(&mut m, 161), X01Transition::CheckoutPending { .. }));
    assert!(matches!(
        confirm(&mut m, 3),
        X01Transition::LegComplete { winner: 0, leg_no: 1, .. }
    ));

    // Leg 2: seat 1 starts and finishes 121.
    assert!(matches!(
        m.start_next_leg().unwrap().transition,
        X01Transition::LegStarted { starter: 1, leg_no: 2, .. }
    ));
    visit(&mut m, 180);
    visit(&mut m, 60);
    visit(&mut m, 121);
    assert!(matches!(
        confirm(&mut m, 3),
        X01Transition::LegComplete { winner: 1, leg_no: 2, .. }
    ));

    // Leg 3: seat 0 misses once at a double, then finishes 40.
    m.start_next_leg().unwrap();
    assert_eq!(m.active(), Some(0));
    visit(&mut m, 180);
    visit(&mut m, 26);
    visit(&mut m, 81);
    assert!(matches!(
        confirm(&mut m, 1),
        X01Transition::Committed { remaining: 40, .. }
    ));
    visit(&mut m, 60);
    visit(&mut m, 40);
    let done = confirm(&mut m, 1);

    let summary = match done {
        X01Transition::GameComplete { winner: 0, summary } => summary,
        other => panic!("expected seat 0 to win, got {other:?}"),
    };
    assert_eq!(m.status(), MatchStatus::GameComplete);
    assert_eq!(summary.leg_no, 3);

    let p0 = &summary.players[0];
    assert_eq!(p0.legs_won, 2);
    assert_eq!(p0.sets_won, 1);
    assert_eq!(p0.stats.darts_thrown, 16);
    assert_eq!(p0.stats.match_average, 124.125);
    assert_eq!(p0.stats.best_leg_average, Some(150.5));
    assert_eq!(p0.stats.successful_checkouts, 2);
    assert_eq!(p0.stats.checkout_attempts, 3);
    assert_eq!(p0.stats.escalation.one_eighties, 1);
    assert_eq!(p0.stats.escalation.ton_plus, 3);

    let p1 = &summary.players[1];
    assert_eq!(p1.legs_won, 1);
    assert_eq!(p1.stats.best_leg_average, Some(150.5));
}

#[test]
fn completion_event_serializes_with_winner_profile() {
    let players = roster(1);
    let name = players[0].name.clone();
    let mut m = X01Match::new(X01Config::new(StartScore::S101, 1, 1), players).unwrap();
    m.submit_score(101).unwrap();
    let event = m.confirm_darts_used(2).unwrap();

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["transition"]["type"], "game_complete");
    assert_eq!(json["transition"]["summary"]["winner"]["name"], name.as_str());
    assert_eq!(json["players"][0]["remaining"], 0);
    assert_eq!(json["players"][0]["is_active"], false);
}
