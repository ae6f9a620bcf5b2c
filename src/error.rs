/// Error taxonomy for the hub.
///
/// Only `Terminal` ends the program. Everything else is recovered where it
/// happens: navigation falls back to the menu, playback failures are
/// dropped, config problems fall back to defaults.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::game::ScreenState;

#[derive(Debug, Error)]
pub enum HubError {
    #[error("invalid transition `{op}` on screen {screen:?}")]
    InvalidTransition { op: &'static str, screen: ScreenState },

    #[error("unknown game `{0}`")]
    UnknownGame(String),

    #[error("sound playback failed: {0}")]
    Playback(String),

    #[error("config error in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}
