// Configuration loading and parsing (leaders.toml, teams.toml).

use crate::leaderboard::DEFAULT_N;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub data_paths: DataPaths,
    pub registry: RegistrySettings,
    pub report: ReportSettings,
    pub teams: TeamDirectory,
}

// ---------------------------------------------------------------------------
// leaders.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire leaders.toml file.
#[derive(Debug, Clone, Deserialize)]
struct LeadersFile {
    data_paths: DataPaths,
    #[serde(default)]
    registry: RegistrySettings,
    #[serde(default)]
    report: ReportSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    /// Statcast pitch-by-pitch CSV.
    pub events: String,
    /// Player register CSV (`key_mlbam`, `name_first`, `name_last`, `mlb_played_last`).
    pub registry: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrySettings {
    /// Players whose last MLB season is not after this year are ignored.
    pub min_last_played: i32,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        RegistrySettings {
            min_last_played: crate::events::registry::DEFAULT_MIN_LAST_PLAYED,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReportSettings {
    /// Rows requested from each leaderboard.
    pub default_n: usize,
    /// Rows the downstream formatter reads from each leaderboard.
    pub display_n: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            default_n: DEFAULT_N,
            display_n: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// teams.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub name: String,
    pub handle: String,
    pub hashtag: String,
}

/// Playoff series and game label for a matchup, keyed by home team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesLabel {
    pub series: String,
    pub game: String,
}

/// Immutable team lookup table loaded once at startup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamDirectory {
    #[serde(default)]
    pub teams: BTreeMap<String, TeamInfo>,
    #[serde(default)]
    pub series: BTreeMap<String, SeriesLabel>,
}

impl TeamDirectory {
    pub fn team(&self, code: &str) -> Option<&TeamInfo> {
        self.teams.get(code)
    }

    /// Team nickname, or the code itself for teams missing from the table.
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.team(code).map(|t| t.name.as_str()).unwrap_or(code)
    }

    pub fn series_for(&self, home_team: &str) -> Option<&SeriesLabel> {
        self.series.get(home_team)
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/leaders.toml` and
/// `config/teams.toml`, both relative to `base_dir`.
///
/// Does not copy defaults; `load_config()` does that first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- leaders.toml (required) ---
    let leaders_path = config_dir.join("leaders.toml");
    let leaders_text = read_file(&leaders_path)?;
    let leaders: LeadersFile =
        toml::from_str(&leaders_text).map_err(|e| ConfigError::ParseError {
            path: leaders_path.clone(),
            source: e,
        })?;

    // --- teams.toml (required) ---
    let teams_path = config_dir.join("teams.toml");
    let teams_text = read_file(&teams_path)?;
    let teams: TeamDirectory =
        toml::from_str(&teams_text).map_err(|e| ConfigError::ParseError {
            path: teams_path.clone(),
            source: e,
        })?;

    let config = Config {
        data_paths: leaders.data_paths,
        registry: leaders.registry,
        report: leaders.report,
        teams,
    };

    validate(&config)?;

    Ok(config)
}

/// Files `load_config_from` reads from `config/`.
const CONFIG_FILES: [&str; 2] = ["leaders.toml", "teams.toml"];

fn copy_error(message: String) -> ConfigError {
    ConfigError::DefaultsCopyError { message }
}

/// Copy each config file that `config/` lacks from `defaults/`. Files
/// already in `config/` are never overwritten. Returns the files copied.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.is_dir() {
        if config_dir.is_dir() {
            return Ok(vec![]);
        }
        return Err(copy_error(format!(
            "neither defaults/ nor config/ directory found in {}",
            base_dir.display()
        )));
    }

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| copy_error(format!("failed to create {}: {e}", config_dir.display())))?;

    let mut copied = Vec::new();
    for name in CONFIG_FILES {
        let source = defaults_dir.join(name);
        let target = config_dir.join(name);
        if target.exists() || !source.is_file() {
            continue;
        }
        std::fs::copy(&source, &target)
            .map_err(|e| copy_error(format!("failed to copy {}: {e}", source.display())))?;
        copied.push(target);
    }
    Ok(copied)
}

/// Load config relative to the current working directory, copying
/// defaults first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let paths: &[(&str, &str)] = &[
        ("data_paths.events", &config.data_paths.events),
        ("data_paths.registry", &config.data_paths.registry),
    ];
    for (name, val) in paths {
        if val.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    let report = &config.report;
    if report.default_n == 0 {
        return Err(ConfigError::ValidationError {
            field: "report.default_n".into(),
            message: "must be greater than 0".into(),
        });
    }
    if report.display_n > report.default_n {
        return Err(ConfigError::ValidationError {
            field: "report.display_n".into(),
            message: format!(
                "must be <= report.default_n ({}), got {}",
                report.default_n, report.display_n
            ),
        });
    }

    for (code, team) in &config.teams.teams {
        if team.handle.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: format!("teams.{code}.handle"),
                message: "must not be empty".into(),
            });
        }
        if team.hashtag.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: format!("teams.{code}.hashtag"),
                message: "must not be empty".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn crate_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    }

    /// Fresh temp dir with `config/` holding copies of the shipped defaults.
    fn scratch(name: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let config_dir = tmp.join("config");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&config_dir).unwrap();
        let root = crate_root();
        for file in ["leaders.toml", "teams.toml"] {
            fs::copy(root.join("defaults").join(file), config_dir.join(file)).unwrap();
        }
        tmp
    }

    fn rewrite(tmp: &Path, file: &str, from: &str, to: &str) {
        let path = tmp.join("config").join(file);
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains(from), "{file} should contain {from:?}");
        fs::write(&path, text.replace(from, to)).unwrap();
    }

    fn validation_field(err: ConfigError) -> String {
        match err {
            ConfigError::ValidationError { field, .. } => field,
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn load_shipped_defaults() {
        let tmp = scratch("leaders_config_defaults");
        let config = load_config_from(&tmp).expect("defaults should load");

        assert_eq!(config.data_paths.events, "data/statcast.csv");
        assert_eq!(config.data_paths.registry, "data/register.csv");
        assert_eq!(config.registry.min_last_played, 1990);
        assert_eq!(config.report.default_n, 5);
        assert_eq!(config.report.display_n, 3);

        assert_eq!(config.teams.teams.len(), 30);
        let nyy = config.teams.team("NYY").unwrap();
        assert_eq!(nyy.name, "Yankees");
        assert_eq!(nyy.handle, "@Yankees");
        assert_eq!(nyy.hashtag, "#RepBX");
        assert_eq!(config.teams.display_name("ARI"), "DBacks");
        assert_eq!(config.teams.display_name("XXX"), "XXX");

        let ws = config.teams.series_for("PHI").unwrap();
        assert_eq!(ws.series, "WS");
        assert_eq!(ws.game, "GAME6");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn optional_sections_fall_back_to_defaults() {
        let tmp = std::env::temp_dir().join("leaders_config_minimal");
        let config_dir = tmp.join("config");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("leaders.toml"),
            "[data_paths]\nevents = \"a.csv\"\nregistry = \"b.csv\"\n",
        )
        .unwrap();
        fs::write(config_dir.join("teams.toml"), "").unwrap();

        let config = load_config_from(&tmp).expect("minimal config should load");
        assert_eq!(config.report.default_n, DEFAULT_N);
        assert_eq!(config.registry.min_last_played, 1990);
        assert!(config.teams.teams.is_empty());
        assert!(config.teams.series_for("NYY").is_none());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_default_n() {
        let tmp = scratch("leaders_config_zero_n");
        rewrite(&tmp, "leaders.toml", "default_n = 5", "default_n = 0");
        let err = load_config_from(&tmp).unwrap_err();
        assert_eq!(validation_field(err), "report.default_n");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_display_n_above_default_n() {
        let tmp = scratch("leaders_config_display_n");
        rewrite(&tmp, "leaders.toml", "display_n = 3", "display_n = 9");
        let err = load_config_from(&tmp).unwrap_err();
        assert_eq!(validation_field(err), "report.display_n");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_events_path() {
        let tmp = scratch("leaders_config_empty_path");
        rewrite(
            &tmp,
            "leaders.toml",
            "events = \"data/statcast.csv\"",
            "events = \"\"",
        );
        let err = load_config_from(&tmp).unwrap_err();
        assert_eq!(validation_field(err), "data_paths.events");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_hashtag() {
        let tmp = scratch("leaders_config_empty_hashtag");
        rewrite(&tmp, "teams.toml", "hashtag = \"#RepBX\"", "hashtag = \"\"");
        let err = load_config_from(&tmp).unwrap_err();
        assert_eq!(validation_field(err), "teams.NYY.hashtag");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_teams_toml() {
        let tmp = scratch("leaders_config_missing_teams");
        fs::remove_file(tmp.join("config/teams.toml")).unwrap();
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::FileNotFound { path } => assert!(path.ends_with("teams.toml")),
            other => panic!("expected FileNotFound, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_names_the_file() {
        let tmp = scratch("leaders_config_parse_error");
        fs::write(tmp.join("config/leaders.toml"), "[data_paths\n").unwrap();
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with("leaders.toml")),
            other => panic!("expected ParseError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_only_missing() {
        let tmp = std::env::temp_dir().join("leaders_config_ensure");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("defaults/leaders.toml"), "default").unwrap();
        fs::write(tmp.join("defaults/teams.toml"), "default").unwrap();
        fs::write(tmp.join("config/teams.toml"), "edited").unwrap();

        let copied = ensure_config_files(&tmp).unwrap();
        assert_eq!(copied, vec![tmp.join("config/leaders.toml")]);
        assert_eq!(
            fs::read_to_string(tmp.join("config/teams.toml")).unwrap(),
            "edited"
        );

        assert!(ensure_config_files(&tmp).unwrap().is_empty());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_ignores_unknown_defaults() {
        let tmp = std::env::temp_dir().join("leaders_config_unknown_defaults");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::write(tmp.join("defaults/teams.toml"), "default").unwrap();
        fs::write(tmp.join("defaults/notes.txt"), "scratch").unwrap();

        let copied = ensure_config_files(&tmp).unwrap();
        assert_eq!(copied, vec![tmp.join("config/teams.toml")]);
        assert!(!tmp.join("config/notes.txt").exists());
        assert!(!tmp.join("config/leaders.toml").exists());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_without_any_dirs_fails() {
        let tmp = std::env::temp_dir().join("leaders_config_no_dirs");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        assert!(matches!(
            ensure_config_files(&tmp),
            Err(ConfigError::DefaultsCopyError { .. })
        ));
        let _ = fs::remove_dir_all(&tmp);
    }
}
