// Player name registry (Chadwick register export) and name resolution.

use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Display name used when a player id is not in the registry. Debuting
/// players can take a week or more to show up in the register.
pub const UNKNOWN_PLAYER: &str = "Unknown";

/// Players whose last MLB season is at or before this year are dropped when
/// the registry is loaded.
pub const DEFAULT_MIN_LAST_PLAYED: i32 = 1990;

// ---------------------------------------------------------------------------
// Resolver seam
// ---------------------------------------------------------------------------

/// Anything that can turn an MLBAM player id into a display name.
pub trait NameResolver {
    /// `"{first} {last}"` for a known player, `None` otherwise.
    fn display_name(&self, player_id: u32) -> Option<String>;
}

/// Resolve a player id, degrading to [`UNKNOWN_PLAYER`] on a miss.
pub fn resolve_name<R: NameResolver + ?Sized>(player_id: u32, resolver: &R) -> String {
    resolver
        .display_name(player_id)
        .unwrap_or_else(|| UNKNOWN_PLAYER.to_string())
}

impl NameResolver for HashMap<u32, String> {
    fn display_name(&self, player_id: u32) -> Option<String> {
        self.get(&player_id).cloned()
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
struct PlayerName {
    first: String,
    last: String,
}

/// In-memory id → name table.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    names: HashMap<u32, PlayerName>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a player's name.
    pub fn insert(&mut self, player_id: u32, first: impl Into<String>, last: impl Into<String>) {
        self.names.insert(
            player_id,
            PlayerName {
                first: first.into(),
                last: last.into(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl NameResolver for NameRegistry {
    fn display_name(&self, player_id: u32) -> Option<String> {
        self.names
            .get(&player_id)
            .map(|n| format!("{} {}", n.first, n.last))
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Register CSV row. The real export carries dozens of other id columns;
/// they are ignored.
#[derive(Debug, Deserialize)]
struct RawRegisterRow {
    #[serde(default)]
    key_mlbam: Option<u32>,
    #[serde(default)]
    name_first: Option<String>,
    #[serde(default)]
    name_last: Option<String>,
    #[serde(default)]
    mlb_played_last: Option<i32>,
}

/// Rows dropped while reading the register, by reason.
#[derive(Debug, Default, PartialEq, Eq)]
struct Skipped {
    keyless: usize,
    retired: usize,
}

fn read_registry<R: Read>(
    rdr: R,
    min_last_played: i32,
) -> Result<(NameRegistry, Skipped), csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut registry = NameRegistry::new();
    let mut skipped = Skipped::default();

    for result in reader.deserialize::<RawRegisterRow>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed register row: {}", e);
                continue;
            }
        };

        let Some(id) = raw.key_mlbam else {
            skipped.keyless += 1;
            continue;
        };

        if !raw.mlb_played_last.is_some_and(|year| year > min_last_played) {
            skipped.retired += 1;
            continue;
        }

        let first = raw.name_first.unwrap_or_default().trim().to_string();
        let last = raw.name_last.unwrap_or_default().trim().to_string();
        if first.is_empty() && last.is_empty() {
            warn!("skipping register entry {}: no name", id);
            continue;
        }

        if registry.names.contains_key(&id) {
            warn!("duplicate register entry for {}, using latest value", id);
        }
        registry.insert(id, first, last);
    }

    if skipped.keyless > 0 {
        warn!("skipped {} register entries with no MLBAM id", skipped.keyless);
    }
    if skipped.retired > 0 {
        info!(
            "Dropped {} register entries last active in or before {}",
            skipped.retired, min_last_played
        );
    }
    Ok((registry, skipped))
}

/// Load the player register from disk, keeping only players whose last MLB
/// season is after `min_last_played`.
pub fn load_registry(path: &Path, min_last_played: i32) -> Result<NameRegistry, RegistryError> {
    let file = std::fs::File::open(path).map_err(|e| RegistryError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let (registry, _) = read_registry(file, min_last_played).map_err(|e| RegistryError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    info!("Loaded {} player names from {}", registry.len(), path.display());
    Ok(registry)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_player() {
        let mut reg = NameRegistry::new();
        reg.insert(592450, "Aaron", "Judge");
        assert_eq!(resolve_name(592450, &reg), "Aaron Judge");
    }

    #[test]
    fn miss_degrades_to_unknown() {
        let reg = NameRegistry::new();
        assert_eq!(resolve_name(1, &reg), UNKNOWN_PLAYER);
    }

    #[test]
    fn hashmap_resolver() {
        let mut names = HashMap::new();
        names.insert(7u32, "Shohei Ohtani".to_string());
        assert_eq!(resolve_name(7, &names), "Shohei Ohtani");
        assert_eq!(resolve_name(8, &names), "Unknown");
    }

    #[test]
    fn register_csv_filters_by_last_played() {
        let csv_data = "\
key_person,key_mlbam,name_last,name_first,mlb_played_first,mlb_played_last
a1,592450,Judge,Aaron,2016,2024
a2,121347,Ruth,Babe,1914,1935
a3,110001,Boggs,Wade,1982,1990
a4,,Nobody,Minor,,";

        let (reg, skipped) = read_registry(csv_data.as_bytes(), DEFAULT_MIN_LAST_PLAYED).unwrap();
        assert_eq!(reg.len(), 1);
        assert_eq!(
            skipped,
            Skipped {
                keyless: 1,
                retired: 2
            }
        );
        assert_eq!(reg.display_name(592450).as_deref(), Some("Aaron Judge"));
        assert!(reg.display_name(121347).is_none());
        // Cutoff is exclusive
        assert!(reg.display_name(110001).is_none());
    }

    #[test]
    fn register_missing_last_played_is_dropped() {
        let csv_data = "\
key_mlbam,name_last,name_first,mlb_played_last
999,Prospect,Top,";

        let (reg, _) = read_registry(csv_data.as_bytes(), DEFAULT_MIN_LAST_PLAYED).unwrap();
        assert!(reg.is_empty());
    }

    #[test]
    fn register_names_trimmed_and_malformed_rows_skipped() {
        let csv_data = "\
key_mlbam,name_last,name_first,mlb_played_last
660271,  Ohtani , Shohei ,2024
not_an_id,Bad,Row,2024
605141,Betts,Mookie,2024";

        let (reg, _) = read_registry(csv_data.as_bytes(), DEFAULT_MIN_LAST_PLAYED).unwrap();
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.display_name(660271).as_deref(), Some("Shohei Ohtani"));
        assert_eq!(reg.display_name(605141).as_deref(), Some("Mookie Betts"));
    }

    #[test]
    fn register_duplicate_uses_latest() {
        let csv_data = "\
key_mlbam,name_last,name_first,mlb_played_last
1,Smith,Will,2023
1,Smith,William,2024";

        let (reg, _) = read_registry(csv_data.as_bytes(), DEFAULT_MIN_LAST_PLAYED).unwrap();
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.display_name(1).as_deref(), Some("William Smith"));
    }

    #[test]
    fn keyless_rows_are_counted_not_loaded() {
        let csv_data = "\
key_mlbam,name_last,name_first,mlb_played_last
,Ghost,Casper,2024
660271,Ohtani,Shohei,2024
,Blank,Row,2023";

        let (reg, skipped) = read_registry(csv_data.as_bytes(), DEFAULT_MIN_LAST_PLAYED).unwrap();
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.display_name(660271).as_deref(), Some("Shohei Ohtani"));
        assert_eq!(skipped.keyless, 2);
        assert_eq!(skipped.retired, 0);
    }

    #[test]
    fn missing_register_file_is_io_error() {
        let err = load_registry(Path::new("/nonexistent/register.csv"), 1990).unwrap_err();
        assert!(matches!(err, RegistryError::Io { .. }));
    }
}
