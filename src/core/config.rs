//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.cubetimer/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! Bad individual values never stop the timer: they fall back to their
//! default with a warning in the log.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::input::Key;
use crate::core::timer::{DEFAULT_HOLD_DURATION, TimerConfig};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CubetimerConfig {
    #[serde(default)]
    pub timer: TimerSection,
    #[serde(default)]
    pub display: DisplaySection,
    #[serde(default)]
    pub history: HistorySection,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TimerSection {
    pub use_inspection: Option<bool>,
    pub inspection_hotkey: Option<String>,
    pub timer_hotkey: Option<String>,
    pub hold_duration_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplaySection {
    pub show_cube: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HistorySection {
    pub persist: Option<bool>,
}

/// Values from CLI flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub use_inspection: Option<bool>,
    pub hold_duration_ms: Option<u64>,
    pub persist_history: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TIMER_HOTKEY: Key = Key::Space;
pub const DEFAULT_INSPECTION_HOTKEY: Key = Key::Char('i');
/// Longest accepted hold. Anything above is treated as a typo.
pub const MAX_HOLD_DURATION_MS: u64 = 5_000;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub timer: TimerConfig,
    pub show_cube: bool,
    pub persist_history: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            show_cube: true,
            persist_history: true,
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.cubetimer/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".cubetimer"))
}

/// Returns the path to `~/.cubetimer/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.cubetimer/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `CubetimerConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<CubetimerConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(CubetimerConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(CubetimerConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<CubetimerConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: CubetimerConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# cubetimer configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [timer]
# use_inspection = false       # WCA 15 second inspection (CUBETIMER_INSPECTION)
# inspection_hotkey = "KeyI"   # starts / cancels inspection (CUBETIMER_INSPECTION_KEY)
# timer_hotkey = "Space"       # hold to arm, release to start, press to stop (CUBETIMER_TIMER_KEY)
# hold_duration_ms = 550       # how long to hold before the timer is ready (CUBETIMER_HOLD_MS)

# [display]
# show_cube = true             # draw the scrambled cube net

# [history]
# persist = true               # keep solves in ~/.cubetimer/solves.json
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &CubetimerConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |name| std::env::var(name).ok())
}

/// `resolve` with an injectable environment lookup.
pub fn resolve_with_env(
    config: &CubetimerConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Inspection: CLI → env → config → default
    let use_inspection = cli
        .use_inspection
        .or_else(|| env("CUBETIMER_INSPECTION").and_then(|v| parse_bool(&v)))
        .or(config.timer.use_inspection)
        .unwrap_or(false);

    // Hold duration: CLI → env → config → default
    let hold_ms = cli
        .hold_duration_ms
        .or_else(|| env("CUBETIMER_HOLD_MS").and_then(|v| v.trim().parse().ok()))
        .or(config.timer.hold_duration_ms);
    let hold_duration = match hold_ms {
        Some(ms) if ms <= MAX_HOLD_DURATION_MS => Duration::from_millis(ms),
        Some(ms) => {
            warn!(
                "Hold duration {}ms exceeds {}ms, using default",
                ms, MAX_HOLD_DURATION_MS
            );
            DEFAULT_HOLD_DURATION
        }
        None => DEFAULT_HOLD_DURATION,
    };

    // Hotkeys: env → config → default
    let timer_hotkey = resolve_key(
        env("CUBETIMER_TIMER_KEY").or_else(|| config.timer.timer_hotkey.clone()),
        DEFAULT_TIMER_HOTKEY,
    );
    let mut inspection_hotkey = resolve_key(
        env("CUBETIMER_INSPECTION_KEY").or_else(|| config.timer.inspection_hotkey.clone()),
        DEFAULT_INSPECTION_HOTKEY,
    );
    if inspection_hotkey == timer_hotkey {
        let fallback = [DEFAULT_INSPECTION_HOTKEY, Key::Enter]
            .into_iter()
            .find(|k| *k != timer_hotkey)
            .unwrap_or(Key::Enter);
        warn!(
            "Inspection hotkey {} collides with timer hotkey, using {}",
            inspection_hotkey, fallback
        );
        inspection_hotkey = fallback;
    }

    let persist_history = cli
        .persist_history
        .or(config.history.persist)
        .unwrap_or(true);

    ResolvedConfig {
        timer: TimerConfig {
            use_inspection,
            inspection_hotkey,
            timer_hotkey,
            hold_duration,
        },
        show_cube: config.display.show_cube.unwrap_or(true),
        persist_history,
    }
}

fn resolve_key(raw: Option<String>, default: Key) -> Key {
    match raw.map(|raw| raw.parse::<Key>()) {
        // Esc quits the app, so it can never reach the timer.
        Some(Ok(Key::Escape)) => {
            warn!("Escape is reserved for quitting, using {}", default);
            default
        }
        Some(Ok(key)) => key,
        Some(Err(e)) => {
            warn!("{}, using {}", e, default);
            default
        }
        None => default,
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = CubetimerConfig::default();
        assert!(config.timer.use_inspection.is_none());
        assert!(config.timer.timer_hotkey.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&CubetimerConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved, ResolvedConfig::default());
        assert!(!resolved.timer.use_inspection);
        assert_eq!(resolved.timer.timer_hotkey, Key::Space);
        assert_eq!(resolved.timer.inspection_hotkey, Key::Char('i'));
        assert_eq!(resolved.timer.hold_duration, Duration::from_millis(550));
    }

    #[test]
    fn test_toml_values_override_defaults() {
        let toml_str = r#"
[timer]
use_inspection = true
inspection_hotkey = "KeyQ"
timer_hotkey = "Enter"
hold_duration_ms = 300

[display]
show_cube = false

[history]
persist = false
"#;
        let config: CubetimerConfig = toml::from_str(toml_str).unwrap();
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert!(resolved.timer.use_inspection);
        assert_eq!(resolved.timer.inspection_hotkey, Key::Char('q'));
        assert_eq!(resolved.timer.timer_hotkey, Key::Enter);
        assert_eq!(resolved.timer.hold_duration, Duration::from_millis(300));
        assert!(!resolved.show_cube);
        assert!(!resolved.persist_history);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[timer]
hold_duration_ms = 400
"#;
        let config: CubetimerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.timer.hold_duration_ms, Some(400));
        assert!(config.timer.use_inspection.is_none());
        assert!(config.display.show_cube.is_none());
    }

    #[test]
    fn test_env_overrides_file_and_cli_overrides_env() {
        let config = CubetimerConfig {
            timer: TimerSection {
                use_inspection: Some(false),
                hold_duration_ms: Some(300),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |name: &str| match name {
            "CUBETIMER_INSPECTION" => Some("yes".to_string()),
            "CUBETIMER_HOLD_MS" => Some("450".to_string()),
            _ => None,
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert!(resolved.timer.use_inspection);
        assert_eq!(resolved.timer.hold_duration, Duration::from_millis(450));

        let cli = CliOverrides {
            use_inspection: Some(false),
            hold_duration_ms: Some(200),
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert!(!resolved.timer.use_inspection);
        assert_eq!(resolved.timer.hold_duration, Duration::from_millis(200));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = CubetimerConfig {
            timer: TimerSection {
                timer_hotkey: Some("NotAKey".to_string()),
                hold_duration_ms: Some(60_000),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |name: &str| match name {
            "CUBETIMER_INSPECTION" => Some("maybe".to_string()),
            _ => None,
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.timer.timer_hotkey, Key::Space);
        assert_eq!(resolved.timer.hold_duration, DEFAULT_HOLD_DURATION);
        assert!(!resolved.timer.use_inspection);
    }

    #[test]
    fn test_escape_hotkey_is_rejected() {
        let config = CubetimerConfig {
            timer: TimerSection {
                timer_hotkey: Some("Escape".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |name: &str| match name {
            "CUBETIMER_INSPECTION_KEY" => Some("Esc".to_string()),
            _ => None,
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.timer.timer_hotkey, DEFAULT_TIMER_HOTKEY);
        assert_eq!(resolved.timer.inspection_hotkey, DEFAULT_INSPECTION_HOTKEY);
    }

    #[test]
    fn test_colliding_hotkeys_are_separated() {
        let config = CubetimerConfig {
            timer: TimerSection {
                timer_hotkey: Some("KeyI".to_string()),
                inspection_hotkey: Some("i".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.timer.timer_hotkey, Key::Char('i'));
        assert_eq!(resolved.timer.inspection_hotkey, Key::Enter);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("cubetimer-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[timer]\nhold_duration_ms = \"slow\"\n").unwrap();

        let result = load_config_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
        let _ = fs::remove_dir_all(&dir);
    }
}
