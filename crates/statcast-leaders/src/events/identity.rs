// Identity enrichment: player names and batting/fielding teams.

use crate::events::event::{InningHalf, Pitch, StatcastRow};
use crate::events::registry::{resolve_name, NameResolver, UNKNOWN_PLAYER};
use tracing::{debug, warn};

/// Split a game's two teams into `(batting, fielding)` for an inning half.
///
/// The visitors bat in the top of the inning, the home team in the bottom.
pub fn derive_teams<'a>(
    half: InningHalf,
    home_team: &'a str,
    away_team: &'a str,
) -> (&'a str, &'a str) {
    match half {
        InningHalf::Top => (away_team, home_team),
        InningHalf::Bottom => (home_team, away_team),
    }
}

/// Attach names and teams to every row, in order.
///
/// Unresolvable players get [`UNKNOWN_PLAYER`]; this never fails.
pub fn enrich<R: NameResolver + ?Sized>(rows: Vec<StatcastRow>, resolver: &R) -> Vec<Pitch> {
    let mut misses = 0usize;
    let pitches: Vec<Pitch> = rows
        .into_iter()
        .map(|row| {
            let batter_name = resolve_name(row.batter, resolver);
            let pitcher_name = resolve_name(row.pitcher, resolver);
            if batter_name == UNKNOWN_PLAYER {
                debug!("no registry name for batter {}", row.batter);
                misses += 1;
            }
            if pitcher_name == UNKNOWN_PLAYER {
                debug!("no registry name for pitcher {}", row.pitcher);
                misses += 1;
            }
            let (batting, fielding) = derive_teams(row.inning_half, &row.home_team, &row.away_team);
            let batter_team = batting.to_string();
            let pitcher_team = fielding.to_string();
            Pitch {
                row,
                batter_name,
                pitcher_name,
                batter_team,
                pitcher_team,
            }
        })
        .collect();

    if misses > 0 {
        warn!("{} player lookups fell back to '{}'", misses, UNKNOWN_PLAYER);
    }
    pitches
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
