//! Replay a scripted darts match and print each engine event as a JSON line.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use scorekeeper::replay::{load_script, run_script};
use scorekeeper::telemetry::init_tracing;
use scorekeeper::AppError;
use tracing::error;

#[derive(Parser)]
#[command(name = "scorekeeper")]
#[command(about = "Replay a scripted X01 or Cricket match")]
struct Args {
    /// JSON script with roster, game and actions
    #[arg(long)]
    script: PathBuf,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> Result<(), AppError> {
    let script = load_script(&args.script)?;
    let lines = run_script(&script)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for line in &lines {
        serde_json::to_writer(&mut out, line)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, code = %err.code(), "Replay failed");
            if let Ok(body) = serde_json::to_string(&err.body()) {
                println!("{body}");
            }
            ExitCode::FAILURE
        }
    }
}
