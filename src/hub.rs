/// Hub: routes each `Action` to the transition of the current screen.
///
/// Owns the navigation controller, the game host and the two presentation
/// cursors (menu card, difficulty option). Games only see actions while
/// the screen is Playing.

use std::time::Instant;

use crate::config::GamesConfig;
use crate::domain::game::{Difficulty, GameId, ScreenState};
use crate::error::HubError;
use crate::games::board::GridCursor;
use crate::nav::controller::NavigationController;
use crate::nav::event::Action;
use crate::nav::host::GameHost;
use crate::nav::sound::SoundController;
use crate::ui::canvas::{Area, Canvas};

pub const MENU_COLUMNS: usize = 3;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Hub {
    nav: NavigationController,
    host: GameHost,
    menu: GridCursor,
    difficulty: Difficulty,
}

impl Hub {
    pub fn new(sound: SoundController, games: GamesConfig) -> Self {
        Self::with_host(sound, GameHost::new(games))
    }

    pub(crate) fn with_host(sound: SoundController, host: GameHost) -> Self {
        let nav = NavigationController::new(sound);
        let count = nav.catalog().len();
        Hub {
            menu: GridCursor::new(MENU_COLUMNS, count.div_ceil(MENU_COLUMNS)),
            nav,
            host,
            difficulty: Difficulty::default(),
        }
    }

    pub fn nav(&self) -> &NavigationController {
        &self.nav
    }

    #[cfg(test)]
    pub fn host(&self) -> &GameHost {
        &self.host
    }

    /// Index of the highlighted card in catalog order.
    pub fn menu_cursor(&self) -> usize {
        self.menu.index
    }

    pub fn difficulty_cursor(&self) -> Difficulty {
        self.difficulty
    }

    /// Match the menu cursor to the number of card columns on screen.
    pub fn set_menu_columns(&mut self, cols: usize) {
        let cols = cols.max(1);
        if cols == self.menu.cols {
            return;
        }
        let count = self.nav.catalog().len();
        let index = self.menu.index;
        self.menu = GridCursor::new(cols, count.div_ceil(cols));
        self.menu.index = index;
    }

    /// Open a game by key, as if picked from the menu.
    pub fn start_at(&mut self, key: &str) -> Result<(), HubError> {
        let id: GameId = key.parse()?;
        if let Some(pos) = self.nav.catalog().all().iter().position(|e| e.id == id) {
            self.menu.index = pos;
        }
        self.open(id);
        Ok(())
    }

    pub fn handle(&mut self, action: Action, now: Instant) -> Flow {
        match action {
            Action::Mute => {
                self.nav.toggle_mute();
                self.host.sync(&mut self.nav);
                return Flow::Continue;
            }
            Action::Home => {
                self.nav.handle_title_activation();
                self.host.sync(&mut self.nav);
                return Flow::Continue;
            }
            _ => {}
        }

        match self.nav.screen() {
            ScreenState::Menu => return self.on_menu(action),
            ScreenState::DifficultySelect => self.on_difficulty(action),
            ScreenState::Playing => self.host.on_action(action, now, &mut self.nav),
        }
        self.host.sync(&mut self.nav);
        Flow::Continue
    }

    /// Advance the active game's timers.
    pub fn tick(&mut self, now: Instant) {
        self.host.tick(now, &mut self.nav);
    }

    pub fn compose_game(&self, canvas: &mut Canvas, area: Area, now: Instant) {
        self.host.compose(canvas, area, now);
    }

    fn on_menu(&mut self, action: Action) -> Flow {
        let count = self.nav.catalog().len();
        match action {
            Action::Quit => return Flow::Quit,
            Action::Confirm => {
                let id = self.nav.catalog().all()[self.menu.index.min(count - 1)].id;
                self.open(id);
            }
            other => {
                if let Some(i) = other.pick_index() {
                    if let Some(entry) = self.nav.catalog().all().get(i) {
                        self.menu.index = i;
                        self.open(entry.id);
                    }
                } else if self.menu.step(other) {
                    self.menu.index = self.menu.index.min(count - 1);
                }
            }
        }
        Flow::Continue
    }

    fn on_difficulty(&mut self, action: Action) {
        let idx = self.difficulty.index();
        match action {
            Action::Up | Action::Left => {
                self.difficulty = Difficulty::ALL[idx.saturating_sub(1)];
            }
            Action::Down | Action::Right => {
                self.difficulty = Difficulty::ALL[(idx + 1).min(Difficulty::ALL.len() - 1)];
            }
            Action::Confirm => self.nav.select_difficulty(self.difficulty),
            Action::Back => self.nav.back_to_menu(),
            other => {
                if let Some(level) = other.pick_index().and_then(|i| Difficulty::ALL.get(i)) {
                    self.difficulty = *level;
                    self.nav.select_difficulty(*level);
                }
            }
        }
    }

    fn open(&mut self, id: GameId) {
        self.nav.select_game(id);
        if self.nav.screen() == ScreenState::DifficultySelect {
            self.difficulty = Difficulty::default();
        }
        self.host.sync(&mut self.nav);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::session::Session;
    use crate::nav::sound::testing::{recording, RecordingBackend};
    use crate::nav::sound::Cue;

    fn hub() -> (Hub, RecordingBackend) {
        let (sound, rec) = recording();
        let host = GameHost::with_seed(GamesConfig::default(), 3);
        (Hub::with_host(sound, host), rec)
    }

    #[test]
    fn menu_cursor_moves_in_the_grid() {
        let (mut h, _) = hub();
        let now = Instant::now();
        h.handle(Action::Right, now);
        h.handle(Action::Down, now);
        assert_eq!(h.menu_cursor(), 4);
        for _ in 0..5 {
            h.handle(Action::Right, now);
            h.handle(Action::Down, now);
        }
        assert_eq!(h.menu_cursor(), 8);
        h.handle(Action::Up, now);
        assert_eq!(h.menu_cursor(), 5);
    }

    #[test]
    fn confirm_on_memory_opens_difficulty() {
        let (mut h, rec) = hub();
        let now = Instant::now();
        h.handle(Action::Confirm, now);
        assert_eq!(h.nav().screen(), ScreenState::DifficultySelect);
        assert_eq!(h.difficulty_cursor(), Difficulty::Medium);
        assert_eq!(rec.take(), vec![Cue::Start]);

        h.handle(Action::Down, now);
        h.handle(Action::Confirm, now);
        let s = h.nav().session();
        assert_eq!(s.screen, ScreenState::Playing);
        assert_eq!(s.selected_difficulty, Some(Difficulty::Hard));
        assert_eq!(h.host().active_game(), Some(GameId::Memory));
        assert_eq!(rec.take(), vec![Cue::Click]);
    }

    #[test]
    fn digit_picks_a_game_directly() {
        let (mut h, _) = hub();
        h.handle(Action::Pick(2), Instant::now());
        assert_eq!(h.nav().session().selected_game, Some(GameId::Reaction));
        assert_eq!(h.host().active_game(), Some(GameId::Reaction));
        assert_eq!(h.menu_cursor(), 1);
    }

    #[test]
    fn back_from_difficulty_returns_to_menu() {
        let (mut h, _) = hub();
        let now = Instant::now();
        h.handle(Action::Pick(1), now);
        h.handle(Action::Back, now);
        assert_eq!(h.nav().session(), Session::INITIAL);
    }

    #[test]
    fn digits_on_difficulty_screen_pick_a_level() {
        let (mut h, _) = hub();
        let now = Instant::now();
        h.handle(Action::Pick(1), now);
        h.handle(Action::Pick(1), now);
        assert_eq!(h.nav().session().selected_difficulty, Some(Difficulty::Easy));
    }

    #[test]
    fn quit_only_from_menu() {
        let (mut h, _) = hub();
        let now = Instant::now();
        assert_eq!(h.handle(Action::Quit, now), Flow::Quit);
        h.handle(Action::Pick(2), now);
        assert_eq!(h.handle(Action::Quit, now), Flow::Continue);
        assert_eq!(h.nav().screen(), ScreenState::Playing);
    }

    #[test]
    fn back_at_menu_does_nothing() {
        let (mut h, rec) = hub();
        assert_eq!(h.handle(Action::Back, Instant::now()), Flow::Continue);
        assert_eq!(h.nav().session(), Session::INITIAL);
        assert!(rec.take().is_empty());
    }

    #[test]
    fn home_leaves_a_game() {
        let (mut h, rec) = hub();
        let now = Instant::now();
        h.handle(Action::Pick(4), now);
        rec.take();
        h.handle(Action::Home, now);
        assert_eq!(h.nav().session(), Session::INITIAL);
        assert_eq!(h.host().active_game(), None);
        assert_eq!(rec.take(), vec![Cue::Click]);
    }

    #[test]
    fn mute_silences_and_persists_across_navigation() {
        let (mut h, rec) = hub();
        let now = Instant::now();
        h.handle(Action::Mute, now);
        h.handle(Action::Pick(3), now);
        h.handle(Action::Back, now);
        assert!(h.nav().is_muted());
        assert!(rec.take().is_empty());

        h.handle(Action::Mute, now);
        h.handle(Action::Pick(3), now);
        assert_eq!(rec.take(), vec![Cue::Start]);
    }

    #[test]
    fn start_at_opens_a_game_by_key() {
        let (mut h, _) = hub();
        h.start_at("visualSearch").unwrap();
        assert_eq!(h.host().active_game(), Some(GameId::VisualSearch));
        assert_eq!(h.menu_cursor(), 8);

        let (mut h, _) = hub();
        assert!(matches!(h.start_at("chess"), Err(HubError::UnknownGame(_))));
        assert_eq!(h.nav().session(), Session::INITIAL);
    }

    #[test]
    fn single_column_menu_moves_by_one() {
        let (mut h, _) = hub();
        h.set_menu_columns(1);
        let now = Instant::now();
        h.handle(Action::Down, now);
        h.handle(Action::Down, now);
        assert_eq!(h.menu_cursor(), 2);
        h.handle(Action::Right, now);
        assert_eq!(h.menu_cursor(), 2);
    }
}
