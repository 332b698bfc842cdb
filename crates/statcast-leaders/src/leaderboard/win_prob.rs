// Win probability swings and per-game summaries.
//
// Statcast reports the change in the *home* team's win expectancy as a
// fraction. Leaderboards rank by its magnitude only; the sign is carried
// through for display.

use crate::events::{InningHalf, Pitch};
use crate::leaderboard::{sort_by_key, Ranking, SortOrder};
use chrono::NaiveDate;
use serde::Serialize;

fn swing_magnitude(p: &Pitch) -> Option<f64> {
    p.row.delta_home_win_prob.map(|d| d.abs() * 100.0)
}

/// Plate-appearance-ending pitches, biggest swing first.
fn ranked_swings(pitches: &[Pitch], require_delta: bool) -> Vec<&Pitch> {
    let mut ranked: Vec<&Pitch> = pitches
        .iter()
        .filter(|p| p.has_event())
        .filter(|p| !require_delta || p.row.delta_home_win_prob.is_some())
        .collect();
    sort_by_key(&mut ranked, SortOrder::Descending, |p| swing_magnitude(p));
    ranked
}

// ---------------------------------------------------------------------------
// Day / season board
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinProbEntry {
    pub batter_name: String,
    pub batter_team: String,
    pub events: Option<String>,
    /// Absolute change in home win probability, in percentage points.
    pub delta_home_win_pct: Option<f64>,
    pub pitcher_name: String,
    pub pitcher_team: String,
    pub release_speed: Option<f64>,
    pub pitch_type: Option<String>,
    pub game_date: NaiveDate,
}

/// Largest win probability swings. Always ranked by magnitude, largest
/// first; `ranking.bottom` has no effect.
pub fn win_prob(pitches: &[Pitch], ranking: &Ranking) -> Vec<WinProbEntry> {
    ranking
        .take(ranked_swings(pitches, false))
        .into_iter()
        .map(|p| WinProbEntry {
            batter_name: p.batter_name.clone(),
            batter_team: p.batter_team.clone(),
            events: p.row.events.clone(),
            delta_home_win_pct: swing_magnitude(p),
            pitcher_name: p.pitcher_name.clone(),
            pitcher_team: p.pitcher_team.clone(),
            release_speed: p.row.release_speed,
            pitch_type: p.row.pitch_type.clone(),
            game_date: p.row.game_date,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Single game board, batter perspective
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameWinProbEntry {
    pub batter_name: String,
    pub batter_team: String,
    pub home_team: String,
    pub batter_home: bool,
    /// Signed change in home win probability, in percentage points.
    pub home_win_pct: f64,
    /// Display form of `batter_win_pct`: `+12.3`, `-4.0`, `0.0`.
    pub batter_win_label: String,
    /// Change for the batter's team, rounded to one decimal.
    pub batter_win_pct: f64,
    pub events: Option<String>,
    pub pitcher_name: String,
    pub pitcher_team: String,
    pub release_speed: Option<f64>,
    pub pitch_type: Option<String>,
    pub game_date: NaiveDate,
    pub inning: u8,
    pub inning_half: InningHalf,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub post_home_score: Option<u32>,
    pub post_away_score: Option<u32>,
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0 + 0.0
}

/// Positive swings get a leading `+`.
fn signed_label(pct: f64) -> String {
    if pct > 0.0 {
        format!("+{pct:.1}")
    } else {
        format!("{pct:.1}")
    }
}

/// Largest swings seen from the batting team's side. Intended for a
/// single game's pitches but works on any table.
pub fn game_win_prob(pitches: &[Pitch], ranking: &Ranking) -> Vec<GameWinProbEntry> {
    ranking
        .take(ranked_swings(pitches, true))
        .into_iter()
        .filter_map(|p| {
            let home_win_pct = p.row.delta_home_win_prob? * 100.0;
            let batter_home = p.batter_is_home();
            let rounded = round_tenth(home_win_pct);
            let batter_win_pct = if batter_home { rounded } else { -rounded + 0.0 };
            Some(GameWinProbEntry {
                batter_name: p.batter_name.clone(),
                batter_team: p.batter_team.clone(),
                home_team: p.row.home_team.clone(),
                batter_home,
                home_win_pct,
                batter_win_label: signed_label(batter_win_pct),
                batter_win_pct,
                events: p.row.events.clone(),
                pitcher_name: p.pitcher_name.clone(),
                pitcher_team: p.pitcher_team.clone(),
                release_speed: p.row.release_speed,
                pitch_type: p.row.pitch_type.clone(),
                game_date: p.row.game_date,
                inning: p.row.inning,
                inning_half: p.row.inning_half,
                home_score: p.row.home_score,
                away_score: p.row.away_score,
                post_home_score: p.row.post_home_score,
                post_away_score: p.row.post_away_score,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Game summaries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub game_pk: u64,
    pub game_date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_final: u32,
    pub away_final: u32,
    /// Team code of the winner. The home team wins only when strictly ahead.
    pub winner: String,
}

/// One summary per game, in order of first appearance. Final scores are
/// the largest post-pitch score recorded for each side.
pub fn game_summaries(pitches: &[Pitch]) -> Vec<GameSummary> {
    let mut games: Vec<GameSummary> = Vec::new();
    for p in pitches {
        let idx = match games.iter().position(|g| g.game_pk == p.row.game_pk) {
            Some(idx) => idx,
            None => {
                games.push(GameSummary {
                    game_pk: p.row.game_pk,
                    game_date: p.row.game_date,
                    home_team: p.row.home_team.clone(),
                    away_team: p.row.away_team.clone(),
                    home_final: 0,
                    away_final: 0,
                    winner: String::new(),
                });
                games.len() - 1
            }
        };
        let game = &mut games[idx];
        if let Some(s) = p.row.post_home_score {
            game.home_final = game.home_final.max(s);
        }
        if let Some(s) = p.row.post_away_score {
            game.away_final = game.away_final.max(s);
        }
    }

    for game in &mut games {
        game.winner = if game.home_final > game.away_final {
            game.home_team.clone()
        } else {
            game.away_team.clone()
        };
    }
    games
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
