// Spin rate and pitch movement extremes.

use crate::events::Pitch;
use crate::leaderboard::{matches_pitch_type, sort_by_key, Axis, Ranking};
use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Spin rate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpinRateQuery {
    pub ranking: Ranking,
    pub pitch_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpinRateEntry {
    pub pitcher_name: String,
    pub pitcher_team: String,
    /// Revolutions per minute, truncated to a whole number.
    pub release_spin_rate: i32,
    pub pitch_type: Option<String>,
    /// Pitch outcome with underscores replaced by spaces.
    pub description: String,
    pub batter_name: String,
    pub batter_team: String,
    pub game_date: NaiveDate,
}

pub fn spin_rate(pitches: &[Pitch], query: &SpinRateQuery) -> Vec<SpinRateEntry> {
    let mut ranked: Vec<&Pitch> = pitches
        .iter()
        .filter(|p| p.row.release_spin_rate.is_some())
        .filter(|p| matches_pitch_type(p, query.pitch_type.as_deref()))
        .collect();
    sort_by_key(&mut ranked, query.ranking.order(), |p| p.row.release_spin_rate);

    query
        .ranking
        .take(ranked)
        .into_iter()
        .filter_map(|p| {
            Some(SpinRateEntry {
                pitcher_name: p.pitcher_name.clone(),
                pitcher_team: p.pitcher_team.clone(),
                release_spin_rate: p.row.release_spin_rate? as i32,
                pitch_type: p.row.pitch_type.clone(),
                description: p.row.description.replace('_', " "),
                batter_name: p.batter_name.clone(),
                batter_team: p.batter_team.clone(),
                game_date: p.row.game_date,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Movement
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovementQuery {
    pub ranking: Ranking,
    pub axis: Axis,
    pub pitch_type: Option<String>,
}

/// `movement` is the signed break on the ranked axis (`pfx_x` or `pfx_z`),
/// `cross_movement` the break on the other one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovementEntry {
    pub pitcher_name: String,
    pub pitcher_team: String,
    pub movement: f64,
    pub release_spin_rate: f64,
    pub cross_movement: f64,
    pub pitch_type: Option<String>,
    pub description: String,
    pub batter_name: String,
    pub batter_team: String,
    pub game_date: NaiveDate,
}

/// Pitches with the most (or with `bottom`, least) break, by magnitude.
/// Only pitches with both break components and a spin rate qualify.
pub fn pitch_movement(pitches: &[Pitch], query: &MovementQuery) -> Vec<MovementEntry> {
    let split = |p: &Pitch| -> Option<(f64, f64)> {
        let (x, z) = (p.row.pfx_x?, p.row.pfx_z?);
        match query.axis {
            Axis::Horizontal => Some((x, z)),
            Axis::Vertical => Some((z, x)),
        }
    };

    let mut ranked: Vec<&Pitch> = pitches
        .iter()
        .filter(|&p| split(p).is_some() && p.row.release_spin_rate.is_some())
        .filter(|p| matches_pitch_type(p, query.pitch_type.as_deref()))
        .collect();
    sort_by_key(&mut ranked, query.ranking.order(), |p| {
        split(*p).map(|(on, _)| on.abs())
    });

    query
        .ranking
        .take(ranked)
        .into_iter()
        .filter_map(|p| {
            let (movement, cross_movement) = split(p)?;
            Some(MovementEntry {
                pitcher_name: p.pitcher_name.clone(),
                pitcher_team: p.pitcher_team.clone(),
                movement,
                release_spin_rate: p.row.release_spin_rate?,
                cross_movement,
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
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event::testing::pitch_with;

    fn spun(spin: Option<f64>, pitch_type: &str) -> Pitch {
        pitch_with(|r| {
            r.release_spin_rate = spin;
            r.pitch_type = Some(pitch_type.into());
            r.description = "swinging_strike_blocked".into();
        })
    }

    fn broke(x: Option<f64>, z: Option<f64>, spin: Option<f64>) -> Pitch {
        pitch_with(|r| {
            r.pfx_x = x;
            r.pfx_z = z;
            r.release_spin_rate = spin;
        })
    }

    // -- spin_rate --

    #[test]
    fn spin_rate_truncates_and_cleans_description() {
        let out = spin_rate(&[spun(Some(3401.9), "FF")], &SpinRateQuery::default());
        assert_eq!(out[0].release_spin_rate, 3401);
        assert_eq!(out[0].description, "swinging strike blocked");
    }

    #[test]
    fn spin_rate_pitch_type_filter() {
        let table = vec![
            spun(Some(2900.0), "CU"),
            spun(Some(3100.0), "SL"),
            spun(None, "CU"),
            spun(Some(2500.0), "CU"),
        ];
        let q = SpinRateQuery {
            ranking: Ranking::top(5),
            pitch_type: Some("CU".into()),
        };
        let spins: Vec<i32> = spin_rate(&table, &q)
            .iter()
            .map(|e| e.release_spin_rate)
            .collect();
        assert_eq!(spins, vec![2900, 2500]);

        let low = SpinRateQuery {
            ranking: Ranking::bottom(1),
            pitch_type: None,
        };
        assert_eq!(spin_rate(&table, &low)[0].release_spin_rate, 2500);
    }

    // -- pitch_movement --

    #[test]
    fn horizontal_ranks_by_magnitude() {
        let table = vec![
            broke(Some(1.2), Some(0.3), Some(2200.0)),
            broke(Some(-1.9), Some(0.1), Some(2400.0)),
            broke(Some(1.5), Some(1.6), None),
        ];
        let out = pitch_movement(&table, &MovementQuery::default());
        let moves: Vec<f64> = out.iter().map(|e| e.movement).collect();
        assert_eq!(moves, vec![-1.9, 1.2]);
        assert_eq!(out[0].cross_movement, 0.1);
    }

    #[test]
    fn vertical_axis_and_bottom() {
        let table = vec![
            broke(Some(0.2), Some(-1.4), Some(2000.0)),
            broke(Some(0.4), Some(0.05), Some(2100.0)),
            broke(None, Some(2.0), Some(2100.0)),
        ];
        let q = MovementQuery {
            ranking: Ranking::bottom(5),
            axis: Axis::Vertical,
            pitch_type: None,
        };
        let out = pitch_movement(&table, &q);
        let moves: Vec<f64> = out.iter().map(|e| e.movement).collect();
        assert_eq!(moves, vec![0.05, -1.4]);
        assert_eq!(out[1].cross_movement, 0.2);
    }

    #[test]
    fn movement_pitch_type_filter_can_empty_the_board() {
        let table = vec![broke(Some(1.0), Some(1.0), Some(2000.0))];
        let q = MovementQuery {
            pitch_type: Some("KN".into()),
            ..Default::default()
        };
        assert!(pitch_movement(&table, &q).is_empty());
    }
}
