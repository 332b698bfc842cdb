// Pitch-count leaderboards: longest plate appearances, pitches seen by
// batters, and outcome counts for pitchers.
//
// Counts are always ranked highest first. Equal counts keep the order of
// their group keys.

use crate::events::Pitch;
use crate::leaderboard::Ranking;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Outcome recorded for a plate appearance that never logged an event.
pub const LEFT_FOR_INJURY: &str = "left for injury";

/// Count rows per key, then rank by count descending. The stable sort
/// leaves equal counts in key order.
fn rank_groups<K: Ord>(keys: impl Iterator<Item = K>) -> Vec<(K, usize)> {
    let mut groups: BTreeMap<K, usize> = BTreeMap::new();
    for key in keys {
        *groups.entry(key).or_insert(0) += 1;
    }
    let mut ranked: Vec<(K, usize)> = groups.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

// ---------------------------------------------------------------------------
// Longest plate appearances
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AtBatLengthEntry {
    pub batter_name: String,
    pub batter_team: String,
    pub inning: u8,
    pub outs_when_up: u8,
    pub game_pk: u64,
    pub pitches: usize,
    pub events: String,
}

type AtBatKey<'a> = (&'a str, &'a str, u8, u8, u64);

fn at_bat_key(p: &Pitch) -> AtBatKey<'_> {
    (
        p.batter_name.as_str(),
        p.batter_team.as_str(),
        p.row.inning,
        p.row.outs_when_up,
        p.row.game_pk,
    )
}

/// Plate appearances with the most pitches. A plate appearance is the
/// pitches sharing batter, team, inning, outs and game; its outcome is the
/// first recorded event among them, or [`LEFT_FOR_INJURY`].
pub fn longest_at_bats(pitches: &[Pitch], ranking: &Ranking) -> Vec<AtBatLengthEntry> {
    let ranked = ranking.take(rank_groups(pitches.iter().map(at_bat_key)));

    ranked
        .into_iter()
        .map(|(key, count)| {
            let (batter_name, batter_team, inning, outs_when_up, game_pk) = key;
            let events = pitches
                .iter()
                .filter(|p| at_bat_key(p) == key)
                .find_map(|p| p.event())
                .unwrap_or(LEFT_FOR_INJURY)
                .to_string();
            AtBatLengthEntry {
                batter_name: batter_name.to_string(),
                batter_team: batter_team.to_string(),
                inning,
                outs_when_up,
                game_pk,
                pitches: count,
                events,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Grouped counts
// ---------------------------------------------------------------------------

/// One row of a grouped count: a player (and optionally a pitch type)
/// with the number of matching pitches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PitchCountEntry {
    pub name: String,
    pub team: String,
    pub pitch_type: Option<String>,
    pub count: usize,
}

/// Group by player, optionally splitting by pitch type. A player's team is
/// the first one seen for them, so a player traded mid-window stays one
/// group. In pitch-type mode rows with no pitch type are left out.
fn grouped_counts<'a, F>(
    rows: impl Iterator<Item = &'a Pitch>,
    by_pitch_type: bool,
    ranking: &Ranking,
    player: F,
) -> Vec<PitchCountEntry>
where
    F: Fn(&'a Pitch) -> (&'a str, &'a str),
{
    let mut teams: HashMap<&'a str, &'a str> = HashMap::new();
    let keys = rows.filter_map(|p| {
        let (name, team) = player(p);
        teams.entry(name).or_insert(team);
        if by_pitch_type {
            p.pitch_type().map(|pt| (name, Some(pt)))
        } else {
            Some((name, None))
        }
    });
    let ranked = ranking.take(rank_groups(keys));

    ranked
        .into_iter()
        .map(|((name, pitch_type), count)| PitchCountEntry {
            name: name.to_string(),
            team: teams.get(name).copied().unwrap_or_default().to_string(),
            pitch_type: pitch_type.map(String::from),
            count,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PitchesSeenQuery {
    pub ranking: Ranking,
    pub by_pitch_type: bool,
}

/// Batters who saw the most pitches.
pub fn pitches_seen(pitches: &[Pitch], query: &PitchesSeenQuery) -> Vec<PitchCountEntry> {
    grouped_counts(pitches.iter(), query.by_pitch_type, &query.ranking, |p| {
        (p.batter_name.as_str(), p.batter_team.as_str())
    })
}

/// Named groups of pitch descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutcomeSet {
    /// Every kind of strike, including balls put in play.
    Every,
    #[default]
    Swinging,
    Fouls,
    Contact,
    InPlay,
    Balls,
    Custom(Vec<String>),
}

impl OutcomeSet {
    pub fn descriptions(&self) -> Vec<&str> {
        match self {
            OutcomeSet::Every => vec![
                "swinging_strike",
                "foul_tip",
                "swinging_strike_blocked",
                "called_strike",
                "foul",
                "hit_into_play",
                "foul_bunt",
            ],
            OutcomeSet::Swinging => vec![
                "swinging_strike",
                "foul_tip",
                "swinging_strike_blocked",
                "swinging_pitchout",
            ],
            OutcomeSet::Fouls => vec!["foul", "foul_bunt"],
            OutcomeSet::Contact => vec!["foul", "foul_bunt", "hit_into_play"],
            OutcomeSet::InPlay => vec!["hit_into_play"],
            OutcomeSet::Balls => vec!["ball", "blocked_ball", "hit_by_pitch"],
            OutcomeSet::Custom(list) => list.iter().map(String::as_str).collect(),
        }
    }

    pub fn contains(&self, description: &str) -> bool {
        self.descriptions().contains(&description)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PitchCountQuery {
    pub ranking: Ranking,
    pub outcomes: OutcomeSet,
    pub by_pitch_type: bool,
    /// Count every pitch thrown, ignoring `outcomes`.
    pub total: bool,
}

/// Pitchers (or pitcher and pitch type pairs) with the most pitches in the
/// outcome set.
pub fn pitch_counts(pitches: &[Pitch], query: &PitchCountQuery) -> Vec<PitchCountEntry> {
    let wanted = query.outcomes.descriptions();
    let rows = pitches
        .iter()
        .filter(|p| query.total || wanted.contains(&p.row.description.as_str()));
    grouped_counts(rows, query.by_pitch_type, &query.ranking, |p| {
        (p.pitcher_name.as_str(), p.pitcher_team.as_str())
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
