// Pitch velocity and exit velocity extremes.

use crate::events::Pitch;
use crate::leaderboard::{keep_group_extremes, sort_by_key, Ranking};
use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Pitch speed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PitchSpeedQuery {
    pub ranking: Ranking,
    /// Only pitches that ended a plate appearance.
    pub only_events: bool,
    /// Only each pitcher's personal fastest (or slowest) pitch. A pitcher
    /// who hit that speed more than once keeps every such pitch.
    pub unique: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchSpeedEntry {
    pub pitcher_name: String,
    pub pitcher_team: String,
    pub release_speed: f64,
    pub launch_angle: Option<f64>,
    pub events: Option<String>,
    pub description: String,
    pub pitch_type: Option<String>,
    pub batter_name: String,
    pub batter_team: String,
    pub game_date: NaiveDate,
}

impl PitchSpeedEntry {
    fn from_pitch(p: &Pitch, release_speed: f64) -> Self {
        PitchSpeedEntry {
            pitcher_name: p.pitcher_name.clone(),
            pitcher_team: p.pitcher_team.clone(),
            release_speed,
            launch_angle: p.row.launch_angle,
            events: p.row.events.clone(),
            description: p.row.description.clone(),
            pitch_type: p.row.pitch_type.clone(),
            batter_name: p.batter_name.clone(),
            batter_team: p.batter_team.clone(),
            game_date: p.row.game_date,
        }
    }
}

/// Fastest (or with `bottom`, slowest) pitches.
pub fn pitch_speed(pitches: &[Pitch], query: &PitchSpeedQuery) -> Vec<PitchSpeedEntry> {
    let order = query.ranking.order();
    let mut ranked: Vec<&Pitch> = pitches
        .iter()
        .filter(|p| p.row.release_speed.is_some())
        .filter(|p| !query.only_events || p.has_event())
        .collect();
    sort_by_key(&mut ranked, order, |p| p.row.release_speed);

    if query.unique {
        ranked = keep_group_extremes(
            ranked,
            |p| p.pitcher_name.as_str(),
            |p| p.row.release_speed,
            order,
        );
    }

    query
        .ranking
        .take(ranked)
        .into_iter()
        .filter_map(|p| p.row.release_speed.map(|v| PitchSpeedEntry::from_pitch(p, v)))
        .collect()
}

// ---------------------------------------------------------------------------
// Exit velocity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchSpeedQuery {
    pub ranking: Ranking,
    pub only_events: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchSpeedEntry {
    pub batter_name: String,
    pub batter_team: String,
    pub launch_speed: f64,
    pub launch_angle: Option<f64>,
    pub events: Option<String>,
    pub description: String,
    pub pitch_type: Option<String>,
    pub pitcher_name: String,
    pub pitcher_team: String,
    pub game_date: NaiveDate,
}

/// Hardest (or with `bottom`, softest) batted balls.
pub fn launch_speed(pitches: &[Pitch], query: &LaunchSpeedQuery) -> Vec<LaunchSpeedEntry> {
    let mut ranked: Vec<&Pitch> = pitches
        .iter()
        .filter(|p| p.row.launch_speed.is_some())
        .filter(|p| !query.only_events || p.has_event())
        .collect();
    sort_by_key(&mut ranked, query.ranking.order(), |p| p.row.launch_speed);

    query
        .ranking
        .take(ranked)
        .into_iter()
        .filter_map(|p| {
            let launch_speed = p.row.launch_speed?;
            Some(LaunchSpeedEntry {
                batter_name: p.batter_name.clone(),
                batter_team: p.batter_team.clone(),
                launch_speed,
                launch_angle: p.row.launch_angle,
                events: p.row.events.clone(),
                description: p.row.description.clone(),
                pitch_type: p.row.pitch_type.clone(),
                pitcher_name: p.pitcher_name.clone(),
                pitcher_team: p.pitcher_team.clone(),
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

    fn thrown(pitcher: u32, speed: Option<f64>, event: Option<&str>) -> Pitch {
        pitch_with(|r| {
            r.pitcher = pitcher;
            r.release_speed = speed;
            r.events = event.map(String::from);
        })
    }

    fn speeds(rows: &[PitchSpeedEntry]) -> Vec<f64> {
        rows.iter().map(|e| e.release_speed).collect()
    }

    #[test]
    fn fastest_excludes_nulls() {
        let table = vec![
            thrown(1, Some(95.2), None),
            thrown(1, None, None),
            thrown(2, Some(101.4), None),
        ];
        let q = PitchSpeedQuery {
            ranking: Ranking::top(2),
            ..Default::default()
        };
        assert_eq!(speeds(&pitch_speed(&table, &q)), vec![101.4, 95.2]);
    }

    #[test]
    fn slowest_with_bottom() {
        let table = vec![
            thrown(1, Some(95.2), None),
            thrown(2, Some(71.0), None),
            thrown(3, Some(84.5), None),
        ];
        let q = PitchSpeedQuery {
            ranking: Ranking::bottom(2),
            ..Default::default()
        };
        assert_eq!(speeds(&pitch_speed(&table, &q)), vec![71.0, 84.5]);
    }

    #[test]
    fn result_length_is_min_of_n_and_matches() {
        let table: Vec<Pitch> = (0..4)
            .map(|i| thrown(i, Some(90.0 + i as f64), None))
            .collect();
        for n in 0..7 {
            let q = PitchSpeedQuery {
                ranking: Ranking::top(n),
                ..Default::default()
            };
            assert_eq!(pitch_speed(&table, &q).len(), n.min(4));
        }
    }

    #[test]
    fn all_data_returns_every_match_sorted() {
        let table: Vec<Pitch> = (0..8)
            .map(|i| thrown(i, Some(90.0 + i as f64), None))
            .collect();
        let q = PitchSpeedQuery {
            ranking: Ranking::top(2).everything(),
            ..Default::default()
        };
        let out = pitch_speed(&table, &q);
        assert_eq!(out.len(), 8);
        assert_eq!(out[0].release_speed, 97.0);
        assert_eq!(out[7].release_speed, 90.0);
    }

    #[test]
    fn only_events_filters_mid_at_bat_pitches() {
        let table = vec![
            thrown(1, Some(102.0), None),
            thrown(2, Some(99.0), Some("strikeout")),
        ];
        let q = PitchSpeedQuery {
            only_events: true,
            ..Default::default()
        };
        let out = pitch_speed(&table, &q);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].events.as_deref(), Some("strikeout"));
    }

    #[test]
    fn ties_keep_input_order() {
        let mut a = thrown(1, Some(98.0), None);
        a.batter_name = "first".into();
        let mut b = thrown(2, Some(98.0), None);
        b.batter_name = "second".into();
        let out = pitch_speed(&[a, b], &PitchSpeedQuery::default());
        assert_eq!(out[0].batter_name, "first");
        assert_eq!(out[1].batter_name, "second");
    }

    #[test]
    fn unique_keeps_personal_extreme_ties() {
        let table = vec![
            thrown(1, Some(100.1), None),
            thrown(1, Some(100.1), None),
            thrown(1, Some(99.0), None),
            thrown(2, Some(99.5), None),
            thrown(2, Some(98.0), None),
        ];
        let q = PitchSpeedQuery {
            unique: true,
            ..Default::default()
        };
        let out = pitch_speed(&table, &q);
        assert_eq!(speeds(&out), vec![100.1, 100.1, 99.5]);
        assert_eq!(out[2].pitcher_name, "Pitcher 2");
    }

    #[test]
    fn unique_bottom_uses_personal_minimum() {
        let table = vec![
            thrown(1, Some(80.0), None),
            thrown(1, Some(95.0), None),
            thrown(2, Some(70.0), None),
        ];
        let q = PitchSpeedQuery {
            ranking: Ranking::bottom(5),
            unique: true,
            ..Default::default()
        };
        assert_eq!(speeds(&pitch_speed(&table, &q)), vec![70.0, 80.0]);
    }

    #[test]
    fn projection_column_order() {
        let p = pitch_with(|r| {
            r.release_speed = Some(97.3);
            r.events = Some("field_out".into());
        });
        let out = pitch_speed(&[p], &PitchSpeedQuery::default());
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.serialize(&out[0]).unwrap();
        let text = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        assert!(text.starts_with(
            "pitcher_name,pitcher_team,release_speed,launch_angle,events,description,pitch_type,batter_name,batter_team,game_date"
        ));
    }

    #[test]
    fn exit_velocity_event_only() {
        let table = vec![
            pitch_with(|r| r.launch_speed = Some(118.0)),
            pitch_with(|r| {
                r.launch_speed = Some(110.0);
                r.events = Some("double".into());
            }),
            pitch_with(|r| {
                r.launch_speed = Some(40.0);
                r.events = Some("field_out".into());
            }),
        ];
        let high = launch_speed(
            &table,
            &LaunchSpeedQuery {
                ranking: Ranking::top(5),
                only_events: true,
            },
        );
        let values: Vec<f64> = high.iter().map(|e| e.launch_speed).collect();
        assert_eq!(values, vec![110.0, 40.0]);

        let low = launch_speed(
            &table,
            &LaunchSpeedQuery {
                ranking: Ranking::bottom(1),
                only_events: false,
            },
        );
        assert_eq!(low[0].launch_speed, 40.0);
    }

    #[test]
    fn exit_velocity_empty_table() {
        assert!(launch_speed(&[], &LaunchSpeedQuery::default()).is_empty());
    }
}
