// Event table: statcast ingestion, identity enrichment and deduplication.

pub mod dedupe;
pub mod event;
pub mod identity;
pub mod ingest;
pub mod registry;

pub use event::{InningHalf, Pitch, Stand, StatcastRow};
pub use registry::{NameRegistry, NameResolver};

/// Enrich raw rows and drop duplicate pitches. Every leaderboard query
/// expects its input to have gone through this.
pub fn clean<R: NameResolver + ?Sized>(rows: Vec<StatcastRow>, resolver: &R) -> Vec<Pitch> {
    dedupe::dedupe(identity::enrich(rows, resolver))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event::testing::row;

    #[test]
    fn clean_enriches_then_dedupes() {
        let mut reg = NameRegistry::new();
        reg.insert(200, "Gerrit", "Cole");

        let mut a = row();
        a.release_speed = Some(99.1);
        let b = a.clone();
        let mut c = a.clone();
        c.pitcher = 300;

        let out = clean(vec![a, b, c], &reg);
        // a and b collapse; c has an unresolved pitcher, so a different key
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].pitcher_name, "Gerrit Cole");
        assert_eq!(out[1].pitcher_name, "Unknown");
    }
}
