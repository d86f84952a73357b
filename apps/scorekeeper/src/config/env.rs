use std::env;
use std::str::FromStr;

use crate::config::match_config::{CricketConfig, CricketMode, LegStarter, StartScore, X01Config};
use crate::error::AppError;

/// X01 defaults from environment variables.
///
/// - `DARTS_START_SCORE` (default 501)
/// - `DARTS_LEGS` legs per set (default 1)
/// - `DARTS_SETS` sets per match (default 1)
/// - `DARTS_LEG_STARTER` `continue` | `rotate` (default `continue`)
pub fn x01_from_env() -> Result<X01Config, AppError> {
    let start: u16 = var_or("DARTS_START_SCORE", 501)?;
    let start_score =
        StartScore::try_from(start).map_err(|e| AppError::config(format!("DARTS_START_SCORE: {e}")))?;
    let legs_to_win = var_or("DARTS_LEGS", 1u8)?;
    let sets_to_win = var_or("DARTS_SETS", 1u8)?;
    let leg_starter = match env::var("DARTS_LEG_STARTER")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "" | "continue" => LegStarter::Continue,
        "rotate" => LegStarter::Rotate,
        other => {
            return Err(AppError::config(format!(
                "DARTS_LEG_STARTER must be 'continue' or 'rotate', got '{other}'"
            )))
        }
    };

    let config = X01Config {
        start_score,
        legs_to_win,
        sets_to_win,
        leg_starter,
    };
    config
        .validate()
        .map_err(|e| AppError::config(e.to_string()))?;
    Ok(config)
}

/// Cricket defaults from environment variables.
///
/// - `DARTS_CRICKET_MODE` `cricket` | `route` (default `cricket`)
/// - `DARTS_MARKS_REQUIRED` 2..=5 (default 3)
pub fn cricket_from_env() -> Result<CricketConfig, AppError> {
    let mode = match env::var("DARTS_CRICKET_MODE") {
        Ok(raw) => CricketMode::from_str(&raw)
            .map_err(|e| AppError::config(format!("DARTS_CRICKET_MODE: {e}")))?,
        Err(_) => CricketMode::Cricket,
    };
    let marks_required = var_or("DARTS_MARKS_REQUIRED", 3u8)?;
    let config = CricketConfig {
        mode,
        marks_required,
    };
    config
        .validate()
        .map_err(|e| AppError::config(e.to_string()))?;
    Ok(config)
}

/// Parse an optional environment variable, falling back to `default` when unset.
fn var_or<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| {
            AppError::config(format!(
                "Environment variable '{name}' has an invalid value: '{raw}'"
            ))
        }),
        Err(_) => Ok(default),
    }
}
