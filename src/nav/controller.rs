/// Navigation state machine: Menu → (DifficultySelect) → Playing → Menu.
///
/// Every operation is total. A call whose precondition does not hold is
/// logged and recovered by falling back to the menu, so the session is
/// never left torn. Sound cues are the only side effect besides the state.

use crate::domain::catalog::GameCatalog;
use crate::domain::game::{Difficulty, GameId, ScreenState};
use crate::error::HubError;
use crate::nav::session::Session;
use crate::nav::sound::{Cue, SoundController};

pub struct NavigationController {
    catalog: GameCatalog,
    sound: SoundController,
    screen: ScreenState,
    selected_game: Option<GameId>,
    selected_difficulty: Option<Difficulty>,
}

impl NavigationController {
    pub fn new(sound: SoundController) -> Self {
        NavigationController {
            catalog: GameCatalog,
            sound,
            screen: ScreenState::Menu,
            selected_game: None,
            selected_difficulty: None,
        }
    }

    pub fn session(&self) -> Session {
        Session {
            screen: self.screen,
            selected_game: self.selected_game,
            selected_difficulty: self.selected_difficulty,
            muted: self.sound.is_muted(),
        }
    }

    pub fn screen(&self) -> ScreenState {
        self.screen
    }

    pub fn catalog(&self) -> &GameCatalog {
        &self.catalog
    }

    pub fn sound(&self) -> &SoundController {
        &self.sound
    }

    pub fn is_muted(&self) -> bool {
        self.sound.is_muted()
    }

    /// Title of the selected game, for the difficulty screen heading.
    pub fn selected_title(&self) -> Option<&'static str> {
        self.selected_game.map(|id| self.catalog.lookup(id).title)
    }

    // ── Transitions ──

    pub fn select_game(&mut self, id: GameId) {
        if self.screen != ScreenState::Menu {
            self.recover(HubError::InvalidTransition { op: "select_game", screen: self.screen });
            return;
        }

        self.sound.play(Cue::Start);
        self.selected_game = Some(id);
        self.screen = if self.catalog.lookup(id).requires_difficulty {
            ScreenState::DifficultySelect
        } else {
            ScreenState::Playing
        };
        tracing::debug!(game = %id, screen = ?self.screen, "game selected");
        self.check();
    }

    pub fn select_difficulty(&mut self, level: Difficulty) {
        if self.screen != ScreenState::DifficultySelect || self.selected_game.is_none() {
            self.recover(HubError::InvalidTransition {
                op: "select_difficulty",
                screen: self.screen,
            });
            return;
        }

        self.sound.play(Cue::Click);
        self.selected_difficulty = Some(level);
        self.screen = ScreenState::Playing;
        tracing::debug!(difficulty = ?level, "difficulty selected");
        self.check();
    }

    /// Return to the menu from anywhere. At the menu it only replays `click`.
    pub fn back_to_menu(&mut self) {
        self.sound.play(Cue::Click);
        self.screen = ScreenState::Menu;
        self.selected_game = None;
        self.selected_difficulty = None;
        tracing::debug!("back to menu");
        self.check();
    }

    /// Header title click: back to the menu, silent when already there.
    pub fn handle_title_activation(&mut self) {
        if self.screen != ScreenState::Menu {
            self.back_to_menu();
        }
    }

    pub fn toggle_mute(&mut self) {
        self.sound.toggle_mute();
    }

    /// Fail-soft path for transitions and launches that cannot proceed.
    pub fn recover(&mut self, err: HubError) {
        tracing::warn!(error = %err, "recovering to menu");
        self.back_to_menu();
    }

    fn check(&self) {
        debug_assert!(
            self.session().is_consistent(&self.catalog),
            "torn session: {:?}",
            self.session()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::sound::testing::{recording, RecordingBackend};

    fn fresh() -> (NavigationController, RecordingBackend) {
        let (sound, rec) = recording();
        (NavigationController::new(sound), rec)
    }

    #[test]
    fn select_game_branches_on_catalog_flag() {
        for id in GameId::ALL {
            let (mut nav, _) = fresh();
            nav.select_game(id);
            let expected = if GameCatalog.lookup(id).requires_difficulty {
                ScreenState::DifficultySelect
            } else {
                ScreenState::Playing
            };
            assert_eq!(nav.screen(), expected, "{id}");
            assert_eq!(nav.session().selected_game, Some(id));
        }
    }

    #[test]
    fn back_to_menu_always_resets() {
        for id in GameId::ALL {
            let (mut nav, _) = fresh();
            nav.select_game(id);
            if nav.screen() == ScreenState::DifficultySelect {
                nav.select_difficulty(Difficulty::Easy);
            }
            nav.back_to_menu();
            assert_eq!(nav.session(), Session::INITIAL);
        }

        let (mut nav, _) = fresh();
        nav.select_game(GameId::Memory);
        nav.back_to_menu();
        assert_eq!(nav.session(), Session::INITIAL);
    }

    #[test]
    fn toggle_mute_leaves_navigation_alone() {
        let (mut nav, _) = fresh();
        nav.select_game(GameId::Memory);
        let before = nav.session();
        nav.toggle_mute();
        let after = nav.session();
        assert_eq!(after.screen, before.screen);
        assert_eq!(after.selected_game, before.selected_game);
        assert_eq!(after.selected_difficulty, before.selected_difficulty);
        assert!(after.muted);
    }

    #[test]
    fn title_activation_on_menu_is_a_strict_noop() {
        let (mut nav, rec) = fresh();
        nav.handle_title_activation();
        nav.handle_title_activation();
        assert_eq!(nav.session(), Session::INITIAL);
        assert!(rec.take().is_empty());
    }

    #[test]
    fn title_activation_while_playing_goes_home() {
        let (mut nav, rec) = fresh();
        nav.select_game(GameId::StroopTest);
        rec.take();
        nav.handle_title_activation();
        assert_eq!(nav.session(), Session::INITIAL);
        assert_eq!(rec.take(), vec![Cue::Click]);
    }

    #[test]
    fn memory_round_trip_returns_to_initial() {
        let (mut nav, _) = fresh();
        nav.select_game(GameId::Memory);
        nav.select_difficulty(Difficulty::Hard);
        nav.back_to_menu();
        assert_eq!(nav.session(), Session::INITIAL);
    }

    #[test]
    fn scenario_reaction_launch_and_back() {
        let (mut nav, rec) = fresh();
        assert_eq!(nav.session(), Session::INITIAL);

        nav.select_game(GameId::Reaction);
        assert_eq!(
            nav.session(),
            Session {
                screen: ScreenState::Playing,
                selected_game: Some(GameId::Reaction),
                selected_difficulty: None,
                muted: false,
            }
        );
        assert_eq!(rec.take(), vec![Cue::Start]);

        nav.back_to_menu();
        assert_eq!(nav.session(), Session::INITIAL);
        assert_eq!(rec.take(), vec![Cue::Click]);
    }

    #[test]
    fn scenario_memory_with_difficulty() {
        let (mut nav, rec) = fresh();
        nav.select_game(GameId::Memory);
        assert_eq!(
            nav.session(),
            Session {
                screen: ScreenState::DifficultySelect,
                selected_game: Some(GameId::Memory),
                selected_difficulty: None,
                muted: false,
            }
        );
        assert_eq!(nav.selected_title(), Some("لعبة الذاكرة"));

        nav.select_difficulty(Difficulty::Easy);
        assert_eq!(
            nav.session(),
            Session {
                screen: ScreenState::Playing,
                selected_game: Some(GameId::Memory),
                selected_difficulty: Some(Difficulty::Easy),
                muted: false,
            }
        );
        assert_eq!(rec.take(), vec![Cue::Start, Cue::Click]);
    }

    #[test]
    fn scenario_muted_launch_is_silent() {
        let (mut nav, rec) = fresh();
        nav.toggle_mute();
        nav.select_game(GameId::MathChallenge);
        let s = nav.session();
        assert_eq!(s.screen, ScreenState::Playing);
        assert_eq!(s.selected_game, Some(GameId::MathChallenge));
        assert!(s.muted);
        assert!(rec.take().is_empty());
    }

    #[test]
    fn difficulty_without_game_falls_back_to_menu() {
        let (mut nav, rec) = fresh();
        nav.select_difficulty(Difficulty::Medium);
        assert_eq!(nav.session(), Session::INITIAL);
        assert_eq!(rec.take(), vec![Cue::Click]);
    }

    #[test]
    fn difficulty_while_playing_falls_back_to_menu() {
        let (mut nav, _) = fresh();
        nav.select_game(GameId::Reaction);
        nav.select_difficulty(Difficulty::Hard);
        assert_eq!(nav.session(), Session::INITIAL);
    }

    #[test]
    fn select_game_off_menu_falls_back_to_menu() {
        let (mut nav, rec) = fresh();
        nav.select_game(GameId::Memory);
        rec.take();
        nav.select_game(GameId::Reaction);
        assert_eq!(nav.session(), Session::INITIAL);
        assert_eq!(rec.take(), vec![Cue::Click]);
    }

    #[test]
    fn back_to_menu_at_menu_keeps_state() {
        let (mut nav, rec) = fresh();
        nav.back_to_menu();
        assert_eq!(nav.session(), Session::INITIAL);
        assert_eq!(rec.take(), vec![Cue::Click]);
    }
}
