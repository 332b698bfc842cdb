// Report pipeline orchestration.
//
// Loads the configured statcast export and player register, cleans the
// table once, then hands it to the report assembler.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use crate::config::Config;
use crate::events::{self, ingest, registry, Pitch};
use crate::report::{self, Report, ReportContext, ReportKind, ReportWindow};

/// Resolve a configured data path against `base_dir` unless it is absolute.
fn data_path(base_dir: &Path, configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Load, enrich and deduplicate the configured pitch table.
pub fn load_table(config: &Config, base_dir: &Path) -> anyhow::Result<Vec<Pitch>> {
    let events_path = data_path(base_dir, &config.data_paths.events);
    let rows = ingest::load_events(&events_path).context("failed to load statcast events")?;

    let registry_path = data_path(base_dir, &config.data_paths.registry);
    let names = registry::load_registry(&registry_path, config.registry.min_last_played)
        .context("failed to load player register")?;
    info!("Registry holds {} players", names.len());

    let pitches = events::clean(rows, &names);
    info!("Cleaned table holds {} pitches", pitches.len());
    Ok(pitches)
}

/// Build one report from the configured data files.
pub fn run(
    config: &Config,
    base_dir: &Path,
    kind: ReportKind,
    window: ReportWindow,
) -> anyhow::Result<Report> {
    let pitches = load_table(config, base_dir)?;
    let ctx = ReportContext {
        default_n: config.report.default_n,
        display_n: config.report.display_n,
        teams: &config.teams,
    };
    Ok(report::assemble(kind, window, &pitches, &ctx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_resolve_against_base_dir() {
        let base = Path::new("/srv/leaders");
        assert_eq!(
            data_path(base, "data/statcast.csv"),
            PathBuf::from("/srv/leaders/data/statcast.csv")
        );
        assert_eq!(
            data_path(base, "/tmp/statcast.csv"),
            PathBuf::from("/tmp/statcast.csv")
        );
    }
}
