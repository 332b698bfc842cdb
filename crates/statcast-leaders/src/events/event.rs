// Statcast pitch rows and the enriched pitch record the leaderboards read.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Small enums
// ---------------------------------------------------------------------------

/// Which half of the inning a pitch was thrown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InningHalf {
    #[serde(rename = "Top")]
    Top,
    #[serde(rename = "Bot", alias = "Bottom")]
    Bottom,
}

impl InningHalf {
    /// Statcast spelling of the inning half.
    pub fn label(&self) -> &'static str {
        match self {
            InningHalf::Top => "Top",
            InningHalf::Bottom => "Bot",
        }
    }
}

impl fmt::Display for InningHalf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Side of the plate the batter stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stand {
    L,
    R,
}

// ---------------------------------------------------------------------------
// Raw row
// ---------------------------------------------------------------------------

/// One pitch exactly as it appears in a statcast export.
///
/// Field names follow the statcast CSV headers where they are
/// self-explanatory; the few cryptic ones are renamed. Measurements are
/// nullable because statcast leaves cells blank whenever tracking failed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatcastRow {
    pub game_pk: u64,
    pub game_date: NaiveDate,
    pub inning: u8,
    #[serde(rename = "inning_topbot")]
    pub inning_half: InningHalf,
    pub batter: u32,
    pub pitcher: u32,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub pitch_type: Option<String>,
    pub description: String,
    /// Plate-appearance outcome; only present on the last pitch of a PA.
    #[serde(default)]
    pub events: Option<String>,
    #[serde(default)]
    pub release_speed: Option<f64>,
    #[serde(default)]
    pub release_spin_rate: Option<f64>,
    #[serde(default)]
    pub release_pos_x: Option<f64>,
    #[serde(default)]
    pub release_pos_y: Option<f64>,
    #[serde(default)]
    pub launch_speed: Option<f64>,
    #[serde(default)]
    pub launch_angle: Option<f64>,
    #[serde(default, rename = "hit_distance_sc")]
    pub hit_distance: Option<f64>,
    #[serde(default)]
    pub plate_x: Option<f64>,
    #[serde(default)]
    pub plate_z: Option<f64>,
    #[serde(default)]
    pub pfx_x: Option<f64>,
    #[serde(default)]
    pub pfx_z: Option<f64>,
    #[serde(default, rename = "delta_home_win_exp")]
    pub delta_home_win_prob: Option<f64>,
    pub stand: Stand,
    pub balls: u8,
    pub strikes: u8,
    pub outs_when_up: u8,
    /// Free-text play description (`des`).
    #[serde(default, rename = "des")]
    pub description_text: String,
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
    #[serde(default)]
    pub post_home_score: Option<u32>,
    #[serde(default)]
    pub post_away_score: Option<u32>,
}

// ---------------------------------------------------------------------------
// Enriched pitch
// ---------------------------------------------------------------------------

/// A statcast row plus the identity columns derived during cleaning.
///
/// Built only by [`crate::events::identity::enrich`]; `batter_team` and
/// `pitcher_team` are always the two distinct teams of the game.
#[derive(Debug, Clone, PartialEq)]
pub struct Pitch {
    pub row: StatcastRow,
    pub batter_name: String,
    pub pitcher_name: String,
    pub batter_team: String,
    pub pitcher_team: String,
}

impl Pitch {
    /// Plate-appearance outcome, if this pitch ended one.
    pub fn event(&self) -> Option<&str> {
        self.row.events.as_deref()
    }

    pub fn has_event(&self) -> bool {
        self.row.events.is_some()
    }

    pub fn is_home_run(&self) -> bool {
        self.event() == Some("home_run")
    }

    pub fn pitch_type(&self) -> Option<&str> {
        self.row.pitch_type.as_deref()
    }

    /// Whether the batter belongs to the home team.
    pub fn batter_is_home(&self) -> bool {
        self.batter_team == self.row.home_team
    }
}

// ---------------------------------------------------------------------------
// Test helpers shared by the engine's unit tests
// ---------------------------------------------------------------------------


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn inning_half_labels() {
        assert_eq!(InningHalf::Top.label(), "Top");
        assert_eq!(InningHalf::Bottom.to_string(), "Bot");
    }

    #[test]
    fn home_run_and_event_accessors() {
        let p = pitch_with(|r| r.events = Some("home_run".into()));
        assert!(p.has_event());
        assert!(p.is_home_run());

        let q = pitch(row());
        assert!(!q.has_event());
        assert!(!q.is_home_run());
        assert_eq!(q.pitch_type(), Some("FF"));
    }

    #[test]
    fn batter_is_home_in_bottom_half() {
        let p = pitch(row());
        assert!(p.batter_is_home());
        let q = pitch_with(|r| r.inning_half = InningHalf::Top);
        assert!(!q.batter_is_home());
    }
}
