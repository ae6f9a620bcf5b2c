/// Session: read-only snapshot of navigation state.

use crate::domain::catalog::GameCatalog;
use crate::domain::game::{Difficulty, GameId, ScreenState};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Session {
    pub screen: ScreenState,
    pub selected_game: Option<GameId>,
    pub selected_difficulty: Option<Difficulty>,
    pub muted: bool,
}

impl Session {
    pub const INITIAL: Session = Session {
        screen: ScreenState::Menu,
        selected_game: None,
        selected_difficulty: None,
        muted: false,
    };

    /// Check the screen / selection invariants against the catalog.
    pub fn is_consistent(&self, catalog: &GameCatalog) -> bool {
        let needs_difficulty = self
            .selected_game
            .map(|id| catalog.lookup(id).requires_difficulty)
            .unwrap_or(false);

        if self.selected_difficulty.is_some() && !needs_difficulty {
            return false;
        }

        match self.screen {
            ScreenState::Menu => self.selected_game.is_none(),
            ScreenState::DifficultySelect => {
                self.selected_game.is_some()
                    && needs_difficulty
                    && self.selected_difficulty.is_none()
            }
            ScreenState::Playing => {
                self.selected_game.is_some()
                    && (!needs_difficulty || self.selected_difficulty.is_some())
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::INITIAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_is_consistent() {
        assert!(Session::INITIAL.is_consistent(&GameCatalog));
    }

    #[test]
    fn menu_with_a_game_is_torn() {
        let s = Session { selected_game: Some(GameId::Reaction), ..Session::INITIAL };
        assert!(!s.is_consistent(&GameCatalog));
    }

    #[test]
    fn memory_needs_difficulty_to_play() {
        let picking = Session {
            screen: ScreenState::DifficultySelect,
            selected_game: Some(GameId::Memory),
            ..Session::INITIAL
        };
        assert!(picking.is_consistent(&GameCatalog));

        let playing_without = Session { screen: ScreenState::Playing, ..picking };
        assert!(!playing_without.is_consistent(&GameCatalog));

        let playing = Session { selected_difficulty: Some(Difficulty::Hard), ..playing_without };
        assert!(playing.is_consistent(&GameCatalog));
    }

    #[test]
    fn difficulty_on_plain_game_is_torn() {
        let s = Session {
            screen: ScreenState::Playing,
            selected_game: Some(GameId::MathChallenge),
            selected_difficulty: Some(Difficulty::Easy),
            muted: false,
        };
        assert!(!s.is_consistent(&GameCatalog));
    }
}
