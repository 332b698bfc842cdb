// Plate location extremes: wild pitches, and where homers were hit and
// swings were missed.
//
// plate_x is measured from the catcher's view, so a left-handed batter's
// outside edge is positive plate_x and a right-handed batter's is negative.

use crate::events::{Pitch, Stand};
use crate::leaderboard::{matches_pitch_type, sort_by_key, Axis, Ranking, SortOrder, DEFAULT_N};
use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Wild pitches
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationQuery {
    pub ranking: Ranking,
    pub axis: Axis,
    pub pitch_type: Option<String>,
}

/// `location` is the coordinate on the ranked axis (`plate_x` or
/// `plate_z`), `cross_location` the other one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationEntry {
    pub pitcher_name: String,
    pub pitcher_team: String,
    pub location: f64,
    pub release_speed: Option<f64>,
    pub cross_location: f64,
    pub pitch_type: Option<String>,
    pub description: String,
    pub batter_name: String,
    pub batter_team: String,
    pub game_date: NaiveDate,
}

/// Pitches that crossed the plate furthest from the middle.
///
/// Vertical mode sorts by `plate_z` (highest first, lowest with `bottom`).
/// Horizontal mode always sorts by distance from the center line, widest
/// first, whatever `bottom` says.
pub fn wild_pitch(pitches: &[Pitch], query: &LocationQuery) -> Vec<LocationEntry> {
    let mut ranked: Vec<&Pitch> = pitches
        .iter()
        .filter(|p| p.row.plate_x.is_some() && p.row.plate_z.is_some())
        .filter(|p| matches_pitch_type(p, query.pitch_type.as_deref()))
        .collect();
    match query.axis {
        Axis::Vertical => sort_by_key(&mut ranked, query.ranking.order(), |p| p.row.plate_z),
        Axis::Horizontal => sort_by_key(&mut ranked, SortOrder::Descending, |p| {
            p.row.plate_x.map(f64::abs)
        }),
    }

    query
        .ranking
        .take(ranked)
        .into_iter()
        .filter_map(|p| {
            let (x, z) = (p.row.plate_x?, p.row.plate_z?);
            let (location, cross_location) = match query.axis {
                Axis::Horizontal => (x, z),
                Axis::Vertical => (z, x),
            };
            Some(LocationEntry {
                pitcher_name: p.pitcher_name.clone(),
                pitcher_team: p.pitcher_team.clone(),
                location,
                release_speed: p.row.release_speed,
                cross_location,
                pitch_type: p.row.pitch_type.clone(),
                description: p.row.description.clone(),
                batter_name: p.batter_name.clone(),
                batter_team: p.batter_team.clone(),
                game_date: p.row.game_date,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Plate-discipline zones
// ---------------------------------------------------------------------------

/// Region of the plate, relative to the batter for inside/outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    #[default]
    High,
    Low,
    Inside,
    Outside,
}

impl Zone {
    /// Multiplier that makes plate_x positive toward this side of the
    /// plate for a batter of the given handedness.
    fn side_sign(self, stand: Stand) -> f64 {
        match (self, stand) {
            (Zone::Outside, Stand::L) | (Zone::Inside, Stand::R) => 1.0,
            _ => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneQuery {
    pub n: usize,
    pub zone: Zone,
}

impl Default for ZoneQuery {
    fn default() -> Self {
        ZoneQuery {
            n: DEFAULT_N,
            zone: Zone::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneEntry {
    pub batter_name: String,
    pub batter_team: String,
    pub stand: Stand,
    pub launch_angle: Option<f64>,
    pub hit_distance: Option<f64>,
    pub plate_z: Option<f64>,
    pub plate_x: Option<f64>,
    pub pitcher_name: String,
    pub pitcher_team: String,
    pub game_date: NaiveDate,
    pub description: String,
    pub balls: u8,
    pub strikes: u8,
    pub inning: u8,
}

impl ZoneEntry {
    fn from_pitch(p: &Pitch) -> Self {
        ZoneEntry {
            batter_name: p.batter_name.clone(),
            batter_team: p.batter_team.clone(),
            stand: p.row.stand,
            launch_angle: p.row.launch_angle,
            hit_distance: p.row.hit_distance,
            plate_z: p.row.plate_z,
            plate_x: p.row.plate_x,
            pitcher_name: p.pitcher_name.clone(),
            pitcher_team: p.pitcher_team.clone(),
            game_date: p.row.game_date,
            description: p.row.description.clone(),
            balls: p.row.balls,
            strikes: p.row.strikes,
            inning: p.row.inning,
        }
    }
}

/// Rank `rows` toward one region of the plate.
///
/// Inside/outside is computed per handedness: each batter side keeps its
/// own `n` most extreme pitches on the requested side of the plate, then
/// the two lists are merged and re-ranked by distance from the center line.
fn zone_extremes<'a>(rows: Vec<&'a Pitch>, query: &ZoneQuery) -> Vec<&'a Pitch> {
    let mut ranked = match query.zone {
        Zone::High | Zone::Low => {
            let order = if query.zone == Zone::High {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            };
            let mut measured: Vec<&Pitch> = rows
                .into_iter()
                .filter(|p| p.row.plate_z.is_some())
                .collect();
            sort_by_key(&mut measured, order, |p| p.row.plate_z);
            measured
        }
        Zone::Inside | Zone::Outside => {
            let mut merged: Vec<&Pitch> = Vec::new();
            for stand in [Stand::L, Stand::R] {
                let sign = query.zone.side_sign(stand);
                let toward = |p: &Pitch| p.row.plate_x.map(|x| sign * x);
                let mut side: Vec<&Pitch> = rows
                    .iter()
                    .copied()
                    .filter(|p| p.row.stand == stand)
                    .filter(|&p| toward(p).is_some_and(|v| v > 0.0))
                    .collect();
                sort_by_key(&mut side, SortOrder::Descending, |p| toward(*p));
                side.truncate(query.n);
                merged.extend(side);
            }
            sort_by_key(&mut merged, SortOrder::Descending, |p| {
                p.row.plate_x.map(f64::abs)
            });
            merged
        }
    };
    ranked.truncate(query.n);
    ranked
}

fn is_swing_and_miss(p: &Pitch) -> bool {
    matches!(
        p.row.description.as_str(),
        "swinging_strike" | "swinging_strike_blocked"
    )
}

/// Home runs hit off pitches furthest toward a region of the plate.
pub fn homer_zone(pitches: &[Pitch], query: &ZoneQuery) -> Vec<ZoneEntry> {
    let homers: Vec<&Pitch> = pitches.iter().filter(|p| p.is_home_run()).collect();
    zone_extremes(homers, query)
        .into_iter()
        .map(ZoneEntry::from_pitch)
        .collect()
}

/// Swings and misses at pitches furthest toward a region of the plate.
pub fn swing_zone(pitches: &[Pitch], query: &ZoneQuery) -> Vec<ZoneEntry> {
    let swings: Vec<&Pitch> = pitches.iter().filter(|p| is_swing_and_miss(p)).collect();
    zone_extremes(swings, query)
        .into_iter()
        .map(ZoneEntry::from_pitch)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
