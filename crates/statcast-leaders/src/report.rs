// Report assembly: which leaderboards make up each report, over which
// slice of the pitch table.
//
// A report is a fixed manifest of (section id, title, query) entries run
// in order against the cleaned table, plus per-game boards for playoffs.

use crate::config::{SeriesLabel, TeamDirectory};
use crate::events::Pitch;
use crate::leaderboard::win_prob::game_summaries;
use crate::leaderboard::{
    Axis, GameSummary, HomerDistanceQuery, LaunchSpeedQuery, Leaderboard, LocationQuery,
    MovementQuery, OutcomeSet, PitchCountQuery, PitchSpeedQuery, PitchesSeenQuery, Query,
    Ranking, SpinRateQuery, Zone, ZoneQuery,
};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// Report kinds and windows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Regular-season daily recap.
    Daily,
    /// Daily recap plus one board per playoff game.
    Playoffs,
    /// Full-season leaders across every query family.
    Season,
}

/// Slice of the pitch table a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportWindow {
    Day(NaiveDate),
    Season(i32),
    Game(u64),
}

impl ReportWindow {
    /// The day before `today`, which is what the morning report covers.
    pub fn yesterday(today: NaiveDate) -> Self {
        ReportWindow::Day(today - Duration::days(1))
    }

    pub fn contains(&self, p: &Pitch) -> bool {
        match *self {
            ReportWindow::Day(date) => p.row.game_date == date,
            ReportWindow::Season(year) => p.row.game_date.year() == year,
            ReportWindow::Game(game_pk) => p.row.game_pk == game_pk,
        }
    }

    /// Pitches inside the window, in table order.
    pub fn select(&self, pitches: &[Pitch]) -> Vec<Pitch> {
        pitches.iter().filter(|p| self.contains(p)).cloned().collect()
    }

    /// Short date label used in report headers (`6/1/24`, `2024`, `game 717465`).
    pub fn label(&self) -> String {
        match *self {
            ReportWindow::Day(date) => {
                format!("{}/{}/{:02}", date.month(), date.day(), date.year() % 100)
            }
            ReportWindow::Season(year) => year.to_string(),
            ReportWindow::Game(game_pk) => format!("game {game_pk}"),
        }
    }
}

impl fmt::Display for ReportWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

// ---------------------------------------------------------------------------
// Manifests
// ---------------------------------------------------------------------------

/// One named leaderboard in a report.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub query: Query,
}

fn entry(id: &'static str, title: &'static str, query: Query) -> ManifestEntry {
    ManifestEntry { id, title, query }
}

/// The fixed list of leaderboards for a report kind, each asking for `n` rows.
pub fn manifest(kind: ReportKind, n: usize) -> Vec<ManifestEntry> {
    let top = Ranking::top(n);
    let low = Ranking::bottom(n);
    match kind {
        ReportKind::Daily => vec![
            entry(
                "homer_distance_high",
                "Longest Homers",
                Query::HomerDistance(HomerDistanceQuery {
                    ranking: top,
                    exclude_inside_the_park: false,
                }),
            ),
            entry(
                "homer_distance_low",
                "Shortest Homers",
                Query::HomerDistance(HomerDistanceQuery {
                    ranking: low,
                    exclude_inside_the_park: false,
                }),
            ),
            entry(
                "pitch_speed_high",
                "Fastest Pitches",
                Query::PitchSpeed(PitchSpeedQuery {
                    ranking: top,
                    ..Default::default()
                }),
            ),
            entry(
                "pitch_speed_low",
                "Slowest Pitches",
                Query::PitchSpeed(PitchSpeedQuery {
                    ranking: low,
                    ..Default::default()
                }),
            ),
            entry(
                "launch_speed_high",
                "Hardest Hit Balls",
                Query::LaunchSpeed(LaunchSpeedQuery {
                    ranking: top,
                    only_events: true,
                }),
            ),
            entry(
                "launch_speed_low",
                "Softest Hit Balls",
                Query::LaunchSpeed(LaunchSpeedQuery {
                    ranking: low,
                    only_events: true,
                }),
            ),
            entry("longest_at_bats", "Longest At-Bats", Query::LongestAtBats(top)),
            entry(
                "win_prob",
                "Largest Changes in Win Probability",
                Query::WinProb(top),
            ),
        ],
        ReportKind::Playoffs => vec![
            entry(
                "homer_distance_high",
                "Longest Homers",
                Query::HomerDistance(HomerDistanceQuery {
                    ranking: top,
                    exclude_inside_the_park: false,
                }),
            ),
            entry(
                "pitch_speed_high",
                "Fastest Pitches",
                Query::PitchSpeed(PitchSpeedQuery {
                    ranking: top,
                    ..Default::default()
                }),
            ),
            entry(
                "launch_speed_high",
                "Hardest Hit Balls",
                Query::LaunchSpeed(LaunchSpeedQuery {
                    ranking: top,
                    only_events: true,
                }),
            ),
            entry("longest_at_bats", "Longest At-Bats", Query::LongestAtBats(top)),
            entry(
                "win_prob",
                "Largest Changes in Win Probability",
                Query::WinProb(top),
            ),
        ],
        ReportKind::Season => season_manifest(n),
    }
}

fn season_manifest(n: usize) -> Vec<ManifestEntry> {
    let top = Ranking::top(n);
    let low = Ranking::bottom(n);
    let zone = |zone| ZoneQuery { n, zone };
    vec![
        entry(
            "pitch_speed_high",
            "Fastest Pitches",
            Query::PitchSpeed(PitchSpeedQuery {
                ranking: top,
                only_events: false,
                unique: true,
            }),
        ),
        entry(
            "pitch_speed_low",
            "Slowest Pitches",
            Query::PitchSpeed(PitchSpeedQuery {
                ranking: low,
                only_events: false,
                unique: true,
            }),
        ),
        entry(
            "launch_speed_high",
            "Hardest Hit Balls",
            Query::LaunchSpeed(LaunchSpeedQuery {
                ranking: top,
                only_events: true,
            }),
        ),
        entry(
            "launch_speed_low",
            "Softest Hit Balls",
            Query::LaunchSpeed(LaunchSpeedQuery {
                ranking: low,
                only_events: true,
            }),
        ),
        entry(
            "homer_distance_high",
            "Longest Homers",
            Query::HomerDistance(HomerDistanceQuery {
                ranking: top,
                exclude_inside_the_park: false,
            }),
        ),
        entry(
            "homer_distance_low",
            "Shortest Homers",
            Query::HomerDistance(HomerDistanceQuery {
                ranking: low,
                exclude_inside_the_park: true,
            }),
        ),
        entry(
            "homer_launch_angle_high",
            "Highest Launch Angle Homers",
            Query::HomerLaunchAngle(top),
        ),
        entry(
            "homer_launch_angle_low",
            "Lowest Launch Angle Homers",
            Query::HomerLaunchAngle(low),
        ),
        entry(
            "win_prob",
            "Largest Changes in Win Probability",
            Query::WinProb(top),
        ),
        entry("longest_at_bats", "Longest At-Bats", Query::LongestAtBats(top)),
        entry(
            "pitches_seen",
            "Most Pitches Seen",
            Query::PitchesSeen(PitchesSeenQuery {
                ranking: top,
                by_pitch_type: false,
            }),
        ),
        entry(
            "swinging_strikes",
            "Most Swinging Strikes",
            Query::PitchCounts(PitchCountQuery {
                ranking: top,
                outcomes: OutcomeSet::Swinging,
                by_pitch_type: false,
                total: false,
            }),
        ),
        entry(
            "swinging_strikes_by_pitch",
            "Most Swinging Strikes by Pitch",
            Query::PitchCounts(PitchCountQuery {
                ranking: top,
                outcomes: OutcomeSet::Swinging,
                by_pitch_type: true,
                total: false,
            }),
        ),
        entry(
            "pitches_thrown",
            "Most Pitches Thrown",
            Query::PitchCounts(PitchCountQuery {
                ranking: top,
                outcomes: OutcomeSet::default(),
                by_pitch_type: false,
                total: true,
            }),
        ),
        entry(
            "spin_rate_high",
            "Highest Spin Rate",
            Query::SpinRate(SpinRateQuery {
                ranking: top,
                pitch_type: None,
            }),
        ),
        entry(
            "spin_rate_low",
            "Lowest Spin Rate",
            Query::SpinRate(SpinRateQuery {
                ranking: low,
                pitch_type: None,
            }),
        ),
        entry(
            "movement_horizontal",
            "Most Horizontal Movement",
            Query::Movement(MovementQuery {
                ranking: top,
                axis: Axis::Horizontal,
                pitch_type: None,
            }),
        ),
        entry(
            "movement_vertical",
            "Most Vertical Movement",
            Query::Movement(MovementQuery {
                ranking: top,
                axis: Axis::Vertical,
                pitch_type: None,
            }),
        ),
        entry(
            "wild_pitch_horizontal",
            "Widest Pitches",
            Query::WildPitch(LocationQuery {
                ranking: top,
                axis: Axis::Horizontal,
                pitch_type: None,
            }),
        ),
        entry(
            "wild_pitch_high",
            "Highest Pitches",
            Query::WildPitch(LocationQuery {
                ranking: top,
                axis: Axis::Vertical,
                pitch_type: None,
            }),
        ),
        entry(
            "wild_pitch_low",
            "Lowest Pitches",
            Query::WildPitch(LocationQuery {
                ranking: low,
                axis: Axis::Vertical,
                pitch_type: None,
            }),
        ),
        entry("homer_zone_high", "Highest Pitches Homered", Query::HomerZone(zone(Zone::High))),
        entry("homer_zone_low", "Lowest Pitches Homered", Query::HomerZone(zone(Zone::Low))),
        entry(
            "homer_zone_inside",
            "Most Inside Pitches Homered",
            Query::HomerZone(zone(Zone::Inside)),
        ),
        entry(
            "homer_zone_outside",
            "Most Outside Pitches Homered",
            Query::HomerZone(zone(Zone::Outside)),
        ),
        entry("swing_zone_high", "Highest Whiffs", Query::SwingZone(zone(Zone::High))),
        entry("swing_zone_low", "Lowest Whiffs", Query::SwingZone(zone(Zone::Low))),
        entry(
            "swing_zone_inside",
            "Most Inside Whiffs",
            Query::SwingZone(zone(Zone::Inside)),
        ),
        entry(
            "swing_zone_outside",
            "Most Outside Whiffs",
            Query::SwingZone(zone(Zone::Outside)),
        ),
    ]
}

// ---------------------------------------------------------------------------
// Assembled report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub board: Leaderboard,
}

/// One playoff game: final score, series tag and its win probability board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameReport {
    pub summary: GameSummary,
    pub home_name: String,
    pub away_name: String,
    pub winner_name: String,
    pub series: Option<SeriesLabel>,
    pub board: Leaderboard,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub kind: ReportKind,
    pub window: String,
    pub pitches: usize,
    pub sections: Vec<Section>,
    pub games: Vec<GameReport>,
}

/// Settings the assembler needs beyond the pitch table.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub default_n: usize,
    pub display_n: usize,
    pub teams: &'a TeamDirectory,
}

/// Run a report's manifest over the pitches inside `window`.
///
/// Short boards are kept as-is; formatters must cope with fewer than
/// `display_n` rows.
pub fn assemble(
    kind: ReportKind,
    window: ReportWindow,
    pitches: &[Pitch],
    ctx: &ReportContext<'_>,
) -> Report {
    let selected = window.select(pitches);
    info!(
        "Assembling {:?} report for {} over {} pitches",
        kind,
        window,
        selected.len()
    );

    let sections: Vec<Section> = manifest(kind, ctx.default_n)
        .into_iter()
        .map(|e| {
            let board = e.query.run(&selected);
            if board.len() < ctx.display_n {
                warn!(
                    "Section '{}' has {} rows, fewer than the {} displayed",
                    e.id,
                    board.len(),
                    ctx.display_n
                );
            }
            Section {
                id: e.id.to_string(),
                title: e.title.to_string(),
                board,
            }
        })
        .collect();

    let games = match kind {
        ReportKind::Playoffs => game_reports(&selected, ctx),
        ReportKind::Daily | ReportKind::Season => Vec::new(),
    };

    Report {
        kind,
        window: window.label(),
        pitches: selected.len(),
        sections,
        games,
    }
}

/// One [`GameReport`] per game in `pitches`, in order of first appearance.
pub fn game_reports(pitches: &[Pitch], ctx: &ReportContext<'_>) -> Vec<GameReport> {
    game_summaries(pitches)
        .into_iter()
        .map(|summary| {
            let game = ReportWindow::Game(summary.game_pk).select(pitches);
            let board = Query::GameWinProb(Ranking::top(ctx.default_n)).run(&game);
            let series = ctx.teams.series_for(&summary.home_team).cloned();
            if series.is_none() {
                warn!("No series label configured for home team {}", summary.home_team);
            }
            GameReport {
                home_name: ctx.teams.display_name(&summary.home_team).to_string(),
                away_name: ctx.teams.display_name(&summary.away_team).to_string(),
                winner_name: ctx.teams.display_name(&summary.winner).to_string(),
                series,
                board,
                summary,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
