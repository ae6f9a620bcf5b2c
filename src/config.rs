/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory, the CWD, or
/// `~/.local/share/majlis-games`. Missing files or keys fall back to
/// defaults; a broken file is reported and ignored.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::HubError;

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub general: GeneralConfig,
    pub sound: SoundConfig,
    pub games: GamesConfig,
    pub gamepad: GamepadConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeneralConfig {
    pub tick_rate_ms: u64,
    /// Game key to open at start. `None` starts at the menu.
    pub start_game: Option<String>,
    /// `None` disables logging.
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SoundConfig {
    pub volume: f32, // 0.0 ..= 1.0
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GamesConfig {
    pub quiz_rounds: usize,
    pub memory_reveal_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GamepadConfig {
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
    pub mute: Vec<String>,
}

/// Result of a config search. `problems` are reported once logging is up.
#[derive(Debug)]
pub struct Loaded {
    pub config: GameConfig,
    pub source: Option<PathBuf>,
    pub problems: Vec<HubError>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    sound: TomlSound,
    #[serde(default)]
    games: TomlGames,
    #[serde(default)]
    gamepad: TomlGamepad,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default)]
    start_game: String,
    #[serde(default = "default_log_file")]
    log_file: String,
}

#[derive(Deserialize, Debug)]
struct TomlSound {
    #[serde(default = "default_volume")]
    volume: f32,
}

#[derive(Deserialize, Debug)]
struct TomlGames {
    #[serde(default = "default_quiz_rounds")]
    quiz_rounds: usize,
    #[serde(default = "default_reveal")]
    memory_reveal_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_confirm")]
    confirm: Vec<String>,
    #[serde(default = "default_cancel")]
    cancel: Vec<String>,
    #[serde(default = "default_mute")]
    mute: Vec<String>,
}

// ── Defaults ──

fn default_tick_rate() -> u64 { 50 }
fn default_log_file() -> String { "majlis-games.log".into() }
fn default_volume() -> f32 { 0.6 }
fn default_quiz_rounds() -> usize { 10 }
fn default_reveal() -> u64 { 900 }   // long enough for slow readers

fn default_confirm() -> Vec<String> { vec!["A".into(), "Start".into()] }
fn default_cancel() -> Vec<String> { vec!["B".into(), "Select".into()] }
fn default_mute() -> Vec<String> { vec!["Y".into()] }

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            tick_rate_ms: default_tick_rate(),
            start_game: String::new(),
            log_file: default_log_file(),
        }
    }
}

impl Default for TomlSound {
    fn default() -> Self {
        TomlSound { volume: default_volume() }
    }
}

impl Default for TomlGames {
    fn default() -> Self {
        TomlGames {
            quiz_rounds: default_quiz_rounds(),
            memory_reveal_ms: default_reveal(),
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            confirm: default_confirm(),
            cancel: default_cancel(),
            mute: default_mute(),
        }
    }
}

impl Default for GamesConfig {
    fn default() -> Self {
        GameConfig::from(TomlConfig::default()).games
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from(TomlConfig::default())
    }
}

impl From<TomlConfig> for GameConfig {
    fn from(t: TomlConfig) -> Self {
        let start_game = Some(t.general.start_game.trim().to_string()).filter(|s| !s.is_empty());
        let log_file = Some(t.general.log_file.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        GameConfig {
            general: GeneralConfig {
                tick_rate_ms: t.general.tick_rate_ms.clamp(10, 500),
                start_game,
                log_file,
            },
            sound: SoundConfig { volume: t.sound.volume.clamp(0.0, 1.0) },
            games: GamesConfig {
                quiz_rounds: t.games.quiz_rounds.max(1),
                memory_reveal_ms: t.games.memory_reveal_ms,
            },
            gamepad: GamepadConfig {
                confirm: t.gamepad.confirm,
                cancel: t.gamepad.cancel,
                mute: t.gamepad.mute,
            },
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Search the candidate directories for `config.toml`.
    pub fn load() -> Loaded {
        let dirs = candidate_dirs();
        let mut problems = Vec::new();
        for dir in &dirs {
            let path = dir.join("config.toml");
            if !path.exists() {
                continue;
            }
            match read_file(&path) {
                Ok(config) => return Loaded { config, source: Some(path), problems },
                Err(e @ HubError::Config { .. }) => {
                    // A broken file wins over later candidates; use defaults.
                    problems.push(e);
                    return Loaded { config: GameConfig::default(), source: None, problems };
                }
                Err(e) => problems.push(e),
            }
        }
        Loaded { config: GameConfig::default(), source: None, problems }
    }

    /// Parse config text. Unknown keys are ignored.
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(GameConfig::from)
    }
}

fn read_file(path: &Path) -> Result<GameConfig, HubError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| HubError::Io { path: path.to_path_buf(), source })?;
    GameConfig::parse(&text).map_err(|source| HubError::Config { path: path.to_path_buf(), source })
}

/// Candidate directories to search: exe dir + CWD + XDG data (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. XDG data home (~/.local/share/majlis-games)
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/majlis-games");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}
