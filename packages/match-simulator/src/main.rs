//! Match simulator CLI: play seeded bot-vs-bot X01 matches through the engine.
//!
//! Useful for exercising the engine and statistics end to end, and for
//! comparing skill levels over many matches.

mod metrics;
mod output;
mod simulator;
mod types;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use metrics::{build_match_metrics, MatchConfig};
use output::OutputWriter;
use scorekeeper::config::env::x01_from_env;
use scorekeeper::{StartScore, X01Config};
use simulator::{Bot, MatchResult, Simulator};
use tracing::{info, warn};
use types::{OutputFormat, SkillLevel};

#[derive(Parser)]
#[command(name = "match-simulator")]
#[command(about = "Seeded bot-vs-bot X01 simulator")]
struct Args {
    /// Number of matches to simulate
    #[arg(short, long, default_value = "1")]
    matches: u32,

    /// Number of players per match
    #[arg(short, long, default_value = "2")]
    players: usize,

    /// Skill levels, comma separated, assigned to seats in turn
    #[arg(long, value_delimiter = ',', default_value = "club")]
    skills: Vec<SkillLevel>,

    /// Starting score (defaults to DARTS_START_SCORE or 501)
    #[arg(long)]
    start_score: Option<u16>,

    /// Legs per set (defaults to DARTS_LEGS or 1)
    #[arg(long)]
    legs: Option<u8>,

    /// Sets per match (defaults to DARTS_SETS or 1)
    #[arg(long)]
    sets: Option<u8>,

    /// Base seed; match `n` uses `seed + n`
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: PathBuf,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress the detailed output file
    #[arg(long)]
    compress: bool,
}

fn match_config(args: &Args) -> Result<X01Config, Box<dyn std::error::Error>> {
    let mut config = x01_from_env()?;
    if let Some(start) = args.start_score {
        config.start_score = StartScore::try_from(start)?;
    }
    if let Some(legs) = args.legs {
        config.legs_to_win = legs;
    }
    if let Some(sets) = args.sets {
        config.sets_to_win = sets;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Silent by default, only warnings and errors
    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match_config(&args)?;
    let skills: Vec<SkillLevel> = (0..args.players)
        .map(|seat| {
            args.skills
                .get(seat % args.skills.len().max(1))
                .copied()
                .unwrap_or(SkillLevel::Club)
        })
        .collect();
    if args.show_output {
        info!(
            matches = args.matches,
            start_score = %config.start_score,
            legs = config.legs_to_win,
            sets = config.sets_to_win,
            skills = ?skills,
            "Starting match simulator"
        );
    }

    let bots: Vec<Bot> = skills
        .iter()
        .enumerate()
        .map(|(seat, &skill)| Bot::new(seat, skill))
        .collect();
    let mut output_writer =
        OutputWriter::new(&args.output_dir, args.output_format, args.compress, bots.len())?;

    let base_seed = args.seed.unwrap_or_else(rand::random);
    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for match_no in 1..=args.matches {
        let match_start = Instant::now();
        let seed = base_seed.wrapping_add(u64::from(match_no));

        match Simulator::new(seed, config, bots.clone()).simulate_match() {
            Ok(result) => {
                let duration_ms = match_start.elapsed().as_secs_f64() * 1000.0;
                let metrics = build_match_metrics(
                    match_no,
                    seed,
                    MatchConfig {
                        x01: config,
                        skills: skills.clone(),
                        total_matches: args.matches,
                    },
                    &result,
                    duration_ms,
                );
                if let Err(e) = output_writer.write_match(&metrics) {
                    warn!("Failed to write metrics for match {}: {}", match_no, e);
                }
                if args.verbose {
                    info!("Match {} completed: winner=seat {}", match_no, result.winner);
                }
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!("Match {} failed: {}", match_no, e);
            }
        }
    }

    let elapsed = start.elapsed();
    let (detail_path, csv_path) = output_writer.output_paths();
    let (detail_path, csv_path) = (detail_path.to_path_buf(), csv_path.to_path_buf());
    output_writer.finish()?;

    if args.show_output {
        info!("Detailed results written to: {}", detail_path.display());
        info!("Summary CSV written to: {}", csv_path.display());
        print_summary(&results, &skills, errors, elapsed, args.matches);
    }

    Ok(())
}

fn print_summary(
    results: &[MatchResult],
    skills: &[SkillLevel],
    errors: u32,
    elapsed: std::time::Duration,
    total: u32,
) {
    println!("\n=== Simulation Summary ===");
    println!("Matches completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    println!("Total time: {:?}", elapsed);
    if results.is_empty() {
        return;
    }
    println!(
        "Average time per match: {:?}",
        elapsed / results.len() as u32
    );

    let seats = skills.len();
    let mut wins = vec![0u32; seats];
    let mut averages = vec![0f64; seats];
    let mut one_eighties = vec![0u32; seats];
    for result in results {
        if let Some(w) = wins.get_mut(result.winner) {
            *w += 1;
        }
        for p in &result.summary.players {
            averages[p.seat] += p.stats.match_average;
            one_eighties[p.seat] += p.stats.escalation.one_eighties;
        }
    }

    println!("\n=== Results by Seat ===");
    for seat in 0..seats {
        let avg = averages[seat] / results.len() as f64;
        let win_rate = (wins[seat] as f64 / results.len() as f64) * 100.0;
        println!(
            "Seat {} ({:?}): avg={:.1}, 180s={}, wins={} ({:.1}%)",
            seat, skills[seat], avg, one_eighties[seat], wins[seat], win_rate
        );
    }
}
