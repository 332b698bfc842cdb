// Duplicate pitch removal.
//
// Enrichment can emit the same physical pitch more than once (the statcast
// feed occasionally repeats rows). Two rows are the same pitch when they
// agree on pitcher, release speed, release point, description and spin.

use crate::events::event::Pitch;
use std::collections::HashSet;
use tracing::info;

/// Hashable identity of a physical pitch.
#[derive(Debug, PartialEq, Eq, Hash)]
struct PitchKey<'a> {
    pitcher_name: &'a str,
    release_speed: Option<u64>,
    release_pos_x: Option<u64>,
    release_pos_y: Option<u64>,
    description: &'a str,
    release_spin_rate: Option<u64>,
}

/// Bit pattern for float equality: `-0.0` matches `0.0` and every NaN
/// matches every other NaN.
fn float_bits(value: Option<f64>) -> Option<u64> {
    value.map(|v| {
        if v.is_nan() {
            f64::NAN.to_bits()
        } else {
            (v + 0.0).to_bits()
        }
    })
}

impl<'a> PitchKey<'a> {
    fn of(p: &'a Pitch) -> Self {
        PitchKey {
            pitcher_name: &p.pitcher_name,
            release_speed: float_bits(p.row.release_speed),
            release_pos_x: float_bits(p.row.release_pos_x),
            release_pos_y: float_bits(p.row.release_pos_y),
            description: &p.row.description,
            release_spin_rate: float_bits(p.row.release_spin_rate),
        }
    }
}

/// Keep the first row of every distinct pitch key, preserving order.
pub fn dedupe(pitches: Vec<Pitch>) -> Vec<Pitch> {
    let keep: Vec<bool> = {
        let mut seen = HashSet::with_capacity(pitches.len());
        pitches.iter().map(|p| seen.insert(PitchKey::of(p))).collect()
    };

    let before = pitches.len();
    let kept: Vec<Pitch> = pitches
        .into_iter()
        .zip(keep)
        .filter_map(|(p, keep)| keep.then_some(p))
        .collect();

    let dropped = before - kept.len();
    if dropped > 0 {
        info!("Dropped {} duplicate pitch rows", dropped);
    }
    kept
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
