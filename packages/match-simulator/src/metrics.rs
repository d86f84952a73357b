//! Per-match metrics written by the simulator.

use scorekeeper::domain::X01PlayerSnapshot;
use scorekeeper::X01Config;
use serde::Serialize;

use crate::simulator::MatchResult;
use crate::types::SkillLevel;

/// Complete match metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct MatchMetrics {
    pub match_id: u32,
    pub seed: u64,
    pub timestamp: String,
    pub config: MatchConfig,
    pub result: ResultMetrics,
    pub players: Vec<PlayerMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchConfig {
    pub x01: X01Config,
    pub skills: Vec<SkillLevel>,
    pub total_matches: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultMetrics {
    pub winner: usize,
    pub winner_name: String,
    pub legs_played: u16,
    pub visits: u32,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerMetrics {
    pub seat: usize,
    pub name: String,
    pub skill: SkillLevel,
    pub legs_won: u16,
    pub sets_won: u8,
    pub match_average: f64,
    pub first_nine_average: Option<f64>,
    pub best_leg_average: Option<f64>,
    pub checkout_percentage: Option<f64>,
    pub one_eighties: u32,
    pub ton_plus: u32,
    pub busts: u32,
    pub darts_thrown: u32,
}

impl PlayerMetrics {
    fn from_snapshot(snapshot: &X01PlayerSnapshot, skill: SkillLevel) -> Self {
        let stats = &snapshot.stats;
        Self {
            seat: snapshot.seat,
            name: snapshot.profile.name.clone(),
            skill,
            legs_won: snapshot.legs_won,
            sets_won: snapshot.sets_won,
            match_average: stats.match_average,
            first_nine_average: stats.match_first_nine_average,
            best_leg_average: stats.best_leg_average,
            checkout_percentage: stats.checkout_percentage,
            one_eighties: stats.escalation.one_eighties,
            ton_plus: stats.escalation.ton_plus,
            busts: stats.busts,
            darts_thrown: stats.darts_thrown,
        }
    }
}

pub fn build_match_metrics(
    match_id: u32,
    seed: u64,
    config: MatchConfig,
    result: &MatchResult,
    duration_ms: f64,
) -> MatchMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let players: Vec<PlayerMetrics> = result
        .summary
        .players
        .iter()
        .map(|p| {
            let skill = config
                .skills
                .get(p.seat)
                .copied()
                .unwrap_or(SkillLevel::Club);
            PlayerMetrics::from_snapshot(p, skill)
        })
        .collect();

    let winner_name = players
        .get(result.winner)
        .map(|p| p.name.clone())
        .unwrap_or_default();
    let legs_played = players.iter().map(|p| p.legs_won).sum();

    MatchMetrics {
        match_id,
        seed,
        timestamp,
        config,
        result: ResultMetrics {
            winner: result.winner,
            winner_name,
            legs_played,
            visits: result.visits,
            duration_ms,
        },
        players,
    }
}

/// CSV header for a run with `players` seats.
pub fn csv_header(players: usize) -> Vec<String> {
    let mut header: Vec<String> = ["match_id", "seed", "winner", "winner_name", "legs_played"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    for seat in 0..players {
        header.push(format!("seat{seat}_average"));
        header.push(format!("seat{seat}_checkout_pct"));
        header.push(format!("seat{seat}_180s"));
    }
    header
}

impl MatchMetrics {
    /// One summary row, aligned with [`csv_header`].
    pub fn csv_record(&self) -> Vec<String> {
        let mut row = vec![
            self.match_id.to_string(),
            self.seed.to_string(),
            self.result.winner.to_string(),
            self.result.winner_name.clone(),
            self.result.legs_played.to_string(),
        ];
        for p in &self.players {
            row.push(format!("{:.2}", p.match_average));
            row.push(
                p.checkout_percentage
                    .map(|pct| format!("{pct:.2}"))
                    .unwrap_or_default(),
            );
            row.push(p.one_eighties.to_string());
        }
        row
    }
}
