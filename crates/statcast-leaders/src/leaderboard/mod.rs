// Leaderboard query engine.
//
// Every query is a pure read over the cleaned pitch table:
// filter -> stable sort -> slice -> project. Projections are plain structs
// whose field order is the column order downstream formatters index into,
// so fields must not be reordered.

pub mod counts;
pub mod homers;
pub mod location;
pub mod movement;
pub mod velocity;
pub mod win_prob;

use crate::events::Pitch;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

pub use counts::{AtBatLengthEntry, OutcomeSet, PitchCountEntry, PitchCountQuery, PitchesSeenQuery};
pub use homers::{HomerDistanceEntry, HomerDistanceQuery, HomerLaunchAngleEntry};
pub use location::{LocationEntry, LocationQuery, Zone, ZoneEntry, ZoneQuery};
pub use movement::{MovementEntry, MovementQuery, SpinRateEntry, SpinRateQuery};
pub use velocity::{LaunchSpeedEntry, LaunchSpeedQuery, PitchSpeedEntry, PitchSpeedQuery};
pub use win_prob::{GameSummary, GameWinProbEntry, WinProbEntry};

/// Rows returned when a caller does not ask for a specific count.
pub const DEFAULT_N: usize = 5;

// ---------------------------------------------------------------------------
// Shared query controls
// ---------------------------------------------------------------------------

/// Result size and direction shared by the ranking queries.
///
/// `n` caps the result (never padded), `bottom` flips "highest first" to
/// "lowest first", and `all_data` lifts the cap entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ranking {
    pub n: usize,
    pub bottom: bool,
    pub all_data: bool,
}

impl Default for Ranking {
    fn default() -> Self {
        Ranking {
            n: DEFAULT_N,
            bottom: false,
            all_data: false,
        }
    }
}

impl Ranking {
    /// Highest `n` values.
    pub fn top(n: usize) -> Self {
        Ranking {
            n,
            ..Ranking::default()
        }
    }

    /// Lowest `n` values.
    pub fn bottom(n: usize) -> Self {
        Ranking {
            n,
            bottom: true,
            all_data: false,
        }
    }

    /// Same direction, no row cap.
    pub fn everything(self) -> Self {
        Ranking {
            all_data: true,
            ..self
        }
    }

    pub(crate) fn order(&self) -> SortOrder {
        if self.bottom {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }

    pub(crate) fn take<T>(&self, mut rows: Vec<T>) -> Vec<T> {
        if !self.all_data {
            rows.truncate(self.n);
        }
        rows
    }
}

/// Axis selector for movement and location queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SortOrder {
    Ascending,
    Descending,
}

// ---------------------------------------------------------------------------
// Sorting helpers
// ---------------------------------------------------------------------------

/// NaN is treated as missing and `-0.0` as `0.0`, so keys form a total order.
fn sort_key(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan()).map(|v| v + 0.0)
}

/// Stable sort on an optional float key. Rows without a key go last in
/// either direction; ties keep their input order.
pub(crate) fn sort_by_key<T, F>(rows: &mut [T], order: SortOrder, key: F)
where
    F: Fn(&T) -> Option<f64>,
{
    rows.sort_by(|a, b| match (sort_key(key(a)), sort_key(key(b))) {
        (Some(x), Some(y)) => match order {
            SortOrder::Ascending => x.total_cmp(&y),
            SortOrder::Descending => y.total_cmp(&x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Keep every row whose value equals its group's extreme (max for
/// `Descending`, min for `Ascending`). Ties at the extreme all survive.
pub(crate) fn keep_group_extremes<'a, K, G, V>(
    rows: Vec<&'a Pitch>,
    group: G,
    value: V,
    order: SortOrder,
) -> Vec<&'a Pitch>
where
    K: Eq + Hash,
    G: Fn(&'a Pitch) -> K,
    V: Fn(&Pitch) -> Option<f64>,
{
    let mut extremes: HashMap<K, f64> = HashMap::new();
    for &p in &rows {
        let Some(v) = sort_key(value(p)) else {
            continue;
        };
        extremes
            .entry(group(p))
            .and_modify(|best| {
                *best = match order {
                    SortOrder::Ascending => best.min(v),
                    SortOrder::Descending => best.max(v),
                }
            })
            .or_insert(v);
    }

    rows.into_iter()
        .filter(|&p| match sort_key(value(p)) {
            Some(v) => extremes.get(&group(p)) == Some(&v),
            None => false,
        })
        .collect()
}

/// Restrict to one pitch type when a filter is set.
pub(crate) fn matches_pitch_type(p: &Pitch, pitch_type: Option<&str>) -> bool {
    match pitch_type {
        Some(wanted) => p.pitch_type() == Some(wanted),
        None => true,
    }
}

// ---------------------------------------------------------------------------
// Query manifest types
// ---------------------------------------------------------------------------

/// One leaderboard request: a query family plus its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    PitchSpeed(PitchSpeedQuery),
    LaunchSpeed(LaunchSpeedQuery),
    HomerDistance(HomerDistanceQuery),
    HomerLaunchAngle(Ranking),
    WinProb(Ranking),
    GameWinProb(Ranking),
    LongestAtBats(Ranking),
    PitchesSeen(PitchesSeenQuery),
    PitchCounts(PitchCountQuery),
    SpinRate(SpinRateQuery),
    Movement(MovementQuery),
    WildPitch(LocationQuery),
    HomerZone(ZoneQuery),
    SwingZone(ZoneQuery),
}

impl Query {
    /// Run the query against a cleaned pitch table.
    pub fn run(&self, pitches: &[Pitch]) -> Leaderboard {
        match self {
            Query::PitchSpeed(q) => Leaderboard::PitchSpeed(velocity::pitch_speed(pitches, q)),
            Query::LaunchSpeed(q) => Leaderboard::LaunchSpeed(velocity::launch_speed(pitches, q)),
            Query::HomerDistance(q) => {
                Leaderboard::HomerDistance(homers::homer_distance(pitches, q))
            }
            Query::HomerLaunchAngle(r) => {
                Leaderboard::HomerLaunchAngle(homers::homer_launch_angle(pitches, r))
            }
            Query::WinProb(r) => Leaderboard::WinProb(win_prob::win_prob(pitches, r)),
            Query::GameWinProb(r) => Leaderboard::GameWinProb(win_prob::game_win_prob(pitches, r)),
            Query::LongestAtBats(r) => {
                Leaderboard::AtBatLength(counts::longest_at_bats(pitches, r))
            }
            Query::PitchesSeen(q) => Leaderboard::PitchCount(counts::pitches_seen(pitches, q)),
            Query::PitchCounts(q) => Leaderboard::PitchCount(counts::pitch_counts(pitches, q)),
            Query::SpinRate(q) => Leaderboard::SpinRate(movement::spin_rate(pitches, q)),
            Query::Movement(q) => Leaderboard::Movement(movement::pitch_movement(pitches, q)),
            Query::WildPitch(q) => Leaderboard::Location(location::wild_pitch(pitches, q)),
            Query::HomerZone(q) => Leaderboard::Zone(location::homer_zone(pitches, q)),
            Query::SwingZone(q) => Leaderboard::Zone(location::swing_zone(pitches, q)),
        }
    }
}

/// Ranked rows produced by a [`Query`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum Leaderboard {
    PitchSpeed(Vec<PitchSpeedEntry>),
    LaunchSpeed(Vec<LaunchSpeedEntry>),
    HomerDistance(Vec<HomerDistanceEntry>),
    HomerLaunchAngle(Vec<HomerLaunchAngleEntry>),
    WinProb(Vec<WinProbEntry>),
    GameWinProb(Vec<GameWinProbEntry>),
    AtBatLength(Vec<AtBatLengthEntry>),
    PitchCount(Vec<PitchCountEntry>),
    SpinRate(Vec<SpinRateEntry>),
    Movement(Vec<MovementEntry>),
    Location(Vec<LocationEntry>),
    Zone(Vec<ZoneEntry>),
}

impl Leaderboard {
    pub fn len(&self) -> usize {
        match self {
            Leaderboard::PitchSpeed(v) => v.len(),
            Leaderboard::LaunchSpeed(v) => v.len(),
            Leaderboard::HomerDistance(v) => v.len(),
            Leaderboard::HomerLaunchAngle(v) => v.len(),
            Leaderboard::WinProb(v) => v.len(),
            Leaderboard::GameWinProb(v) => v.len(),
            Leaderboard::AtBatLength(v) => v.len(),
            Leaderboard::PitchCount(v) => v.len(),
            Leaderboard::SpinRate(v) => v.len(),
            Leaderboard::Movement(v) => v.len(),
            Leaderboard::Location(v) => v.len(),
            Leaderboard::Zone(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
