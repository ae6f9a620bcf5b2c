/// Game identifiers, difficulty levels and screens.
/// Closed sets; all per-variant metadata lives in the catalog.

use std::fmt;
use std::str::FromStr;

use crate::error::HubError;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GameId {
    Memory,
    Reaction,
    WordScramble,
    MathChallenge,
    StroopTest,
    FindTheOdd,
    WordPuzzle,
    PatternRecognition,
    VisualSearch,
}

impl GameId {
    pub const ALL: [GameId; 9] = [
        GameId::Memory,
        GameId::Reaction,
        GameId::WordScramble,
        GameId::MathChallenge,
        GameId::StroopTest,
        GameId::FindTheOdd,
        GameId::WordPuzzle,
        GameId::PatternRecognition,
        GameId::VisualSearch,
    ];

    /// Stable key used in `config.toml`.
    pub fn key(self) -> &'static str {
        match self {
            GameId::Memory => "memory",
            GameId::Reaction => "reaction",
            GameId::WordScramble => "wordScramble",
            GameId::MathChallenge => "mathChallenge",
            GameId::StroopTest => "stroopTest",
            GameId::FindTheOdd => "findTheOdd",
            GameId::WordPuzzle => "wordPuzzle",
            GameId::PatternRecognition => "patternRecognition",
            GameId::VisualSearch => "visualSearch",
        }
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for GameId {
    type Err = HubError;

    /// Keys match case-insensitively so `WordScramble` and `wordscramble` both work.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        GameId::ALL
            .iter()
            .copied()
            .find(|id| id.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| HubError::UnknownGame(wanted.to_string()))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "سهل",
            Difficulty::Medium => "متوسط",
            Difficulty::Hard => "صعب",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }
}

/// Top-level screens. Exactly one is active.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScreenState {
    Menu,
    DifficultySelect,
    Playing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_parse_back() {
        for id in GameId::ALL {
            assert_eq!(id.key().parse::<GameId>().unwrap(), id);
        }
        assert_eq!("  WORDSCRAMBLE ".parse::<GameId>().unwrap(), GameId::WordScramble);
    }

    #[test]
    fn unknown_key_is_rejected() {
        match "chess".parse::<GameId>() {
            Err(HubError::UnknownGame(key)) => assert_eq!(key, "chess"),
            other => panic!("expected UnknownGame, got {other:?}"),
        }
    }

    #[test]
    fn medium_is_the_default_difficulty() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
        assert_eq!(Difficulty::ALL[Difficulty::Hard.index()], Difficulty::Hard);
    }
}
