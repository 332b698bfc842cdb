// Home run distance and launch angle extremes.

use crate::events::Pitch;
use crate::leaderboard::{sort_by_key, Ranking};
use chrono::NaiveDate;
use serde::Serialize;

/// Whether the play text describes an inside-the-park home run.
pub fn is_inside_the_park(p: &Pitch) -> bool {
    let text = p.row.description_text.to_lowercase();
    text.contains("inside-the-park") || text.contains("inside the park")
}

// ---------------------------------------------------------------------------
// Distance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HomerDistanceQuery {
    pub ranking: Ranking,
    pub exclude_inside_the_park: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomerDistanceEntry {
    pub batter_name: String,
    pub batter_team: String,
    pub hit_distance: Option<f64>,
    pub launch_angle: Option<f64>,
    pub pitcher_name: String,
    pub pitcher_team: String,
    pub release_speed: Option<f64>,
    pub pitch_type: Option<String>,
    pub game_date: NaiveDate,
}

/// Longest (or with `bottom`, shortest) home runs. Homers the tracker
/// failed to measure sort after every measured one.
pub fn homer_distance(pitches: &[Pitch], query: &HomerDistanceQuery) -> Vec<HomerDistanceEntry> {
    let mut ranked: Vec<&Pitch> = pitches
        .iter()
        .filter(|p| p.is_home_run())
        .filter(|p| !query.exclude_inside_the_park || !is_inside_the_park(p))
        .collect();
    sort_by_key(&mut ranked, query.ranking.order(), |p| p.row.hit_distance);

    query
        .ranking
        .take(ranked)
        .into_iter()
        .map(|p| HomerDistanceEntry {
            batter_name: p.batter_name.clone(),
            batter_team: p.batter_team.clone(),
            hit_distance: p.row.hit_distance,
            launch_angle: p.row.launch_angle,
            pitcher_name: p.pitcher_name.clone(),
            pitcher_team: p.pitcher_team.clone(),
            release_speed: p.row.release_speed,
            pitch_type: p.row.pitch_type.clone(),
            game_date: p.row.game_date,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Launch angle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomerLaunchAngleEntry {
    pub batter_name: String,
    pub batter_team: String,
    pub launch_angle: Option<f64>,
    pub hit_distance: Option<f64>,
    pub launch_speed: Option<f64>,
    pub pitcher_name: String,
    pub pitcher_team: String,
    pub game_date: NaiveDate,
}

/// Steepest (or with `bottom`, flattest) over-the-fence home runs. Like
/// [`homer_distance`], unmeasured homers sort after every measured one.
pub fn homer_launch_angle(pitches: &[Pitch], ranking: &Ranking) -> Vec<HomerLaunchAngleEntry> {
    let mut ranked: Vec<&Pitch> = pitches
        .iter()
        .filter(|p| p.is_home_run() && !is_inside_the_park(p))
        .collect();
    sort_by_key(&mut ranked, ranking.order(), |p| p.row.launch_angle);

    ranking
        .take(ranked)
        .into_iter()
        .map(|p| HomerLaunchAngleEntry {
            batter_name: p.batter_name.clone(),
            batter_team: p.batter_team.clone(),
            launch_angle: p.row.launch_angle,
            hit_distance: p.row.hit_distance,
            launch_speed: p.row.launch_speed,
            pitcher_name: p.pitcher_name.clone(),
            pitcher_team: p.pitcher_team.clone(),
            game_date: p.row.game_date,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
