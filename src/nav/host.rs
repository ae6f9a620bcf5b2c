/// Game host: picks the collaborator for a Playing session and wires its
/// exit back into navigation.
///
/// ## Contract
///   - `LaunchProps` is handed to the game at construction.
///   - The game calls `props.on_back_to_menu.fire()` when the player leaves;
///     the host sees it after the event and calls `back_to_menu()`.
///   - The current mute flag is pushed into the game every frame through
///     `set_muted`; games gate their own cues on it.
///   - Any session that leaves Playing drops the game.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use crate::config::GamesConfig;
use crate::domain::game::{Difficulty, GameId, ScreenState};
use crate::error::HubError;
use crate::games;
use crate::nav::controller::NavigationController;
use crate::nav::event::Action;
use crate::nav::session::Session;
use crate::nav::sound::Cue;
use crate::ui::canvas::{Area, Canvas};

/// Exit signal shared between a game and its host.
#[derive(Clone, Debug, Default)]
pub struct BackToMenu {
    requested: Rc<Cell<bool>>,
}

impl BackToMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called by the game when the player exits.
    pub fn fire(&self) {
        self.requested.set(true);
    }

    /// Consume a pending request.
    pub fn take(&self) -> bool {
        self.requested.replace(false)
    }
}

#[derive(Clone, Debug)]
pub struct LaunchProps {
    pub on_back_to_menu: BackToMenu,
    pub is_muted: bool,
    /// Only set for games whose catalog entry requires it.
    pub difficulty: Option<Difficulty>,
}

/// Uniform capability surface of every game.
pub trait MiniGame {
    /// Apply one user action. Cues to play go into `cues`.
    fn on_action(&mut self, action: Action, now: Instant, cues: &mut Vec<Cue>);

    /// Advance the game's own timers.
    fn tick(&mut self, _now: Instant, _cues: &mut Vec<Cue>) {}

    /// Re-propagated mute snapshot.
    fn set_muted(&mut self, muted: bool);

    /// Draw into `area` of the canvas.
    fn compose(&self, canvas: &mut Canvas, area: Area, now: Instant);
}

struct ActiveGame {
    id: GameId,
    game: Box<dyn MiniGame>,
    exit: BackToMenu,
}

pub struct GameHost {
    settings: GamesConfig,
    seed: Option<u64>,
    active: Option<ActiveGame>,
    cues: Vec<Cue>,
}

impl GameHost {
    pub fn new(settings: GamesConfig) -> Self {
        GameHost { settings, seed: None, active: None, cues: Vec::with_capacity(4) }
    }

    /// Deterministic games (tests).
    #[cfg(test)]
    pub fn with_seed(settings: GamesConfig, seed: u64) -> Self {
        GameHost { seed: Some(seed), ..Self::new(settings) }
    }

    #[cfg(test)]
    pub fn active_game(&self) -> Option<GameId> {
        self.active.as_ref().map(|a| a.id)
    }

    /// Build the collaborator for a Playing session.
    pub fn launch(
        &self,
        session: &Session,
        exit: BackToMenu,
    ) -> Result<Box<dyn MiniGame>, HubError> {
        if session.screen != ScreenState::Playing {
            return Err(HubError::InvalidTransition { op: "launch", screen: session.screen });
        }
        let Some(id) = session.selected_game else {
            return Err(HubError::UnknownGame("<none>".to_string()));
        };

        let props = LaunchProps {
            on_back_to_menu: exit,
            is_muted: session.muted,
            difficulty: session.selected_difficulty,
        };
        let rng = match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let s = &self.settings;

        let game: Box<dyn MiniGame> = match id {
            GameId::Memory => Box::new(games::memory::MemoryGame::new(props, rng, s.memory_reveal_ms)),
            GameId::Reaction => Box::new(games::reaction::ReactionGame::new(props, rng)),
            GameId::WordScramble => Box::new(games::word_scramble::new(props, rng, s.quiz_rounds)),
            GameId::MathChallenge => Box::new(games::math_challenge::new(props, rng, s.quiz_rounds)),
            GameId::StroopTest => Box::new(games::stroop::new(props, rng, s.quiz_rounds)),
            GameId::FindTheOdd => Box::new(games::find_the_odd::new(props, rng)),
            GameId::WordPuzzle => Box::new(games::word_puzzle::new(props, rng, s.quiz_rounds)),
            GameId::PatternRecognition => Box::new(games::pattern::new(props, rng, s.quiz_rounds)),
            GameId::VisualSearch => Box::new(games::visual_search::new(props, rng)),
        };
        tracing::info!(game = %id, difficulty = ?session.selected_difficulty, "game launched");
        Ok(game)
    }

    /// Bring the active game in line with the session: launch, tear down,
    /// or refresh its mute snapshot.
    pub fn sync(&mut self, nav: &mut NavigationController) {
        let session = nav.session();

        if session.screen != ScreenState::Playing {
            if let Some(old) = self.active.take() {
                tracing::debug!(game = %old.id, "game torn down");
            }
            return;
        }

        let stale = match (&self.active, session.selected_game) {
            (Some(active), Some(id)) => active.id != id,
            _ => true,
        };
        if stale {
            self.active = None;
            let exit = BackToMenu::new();
            match self.launch(&session, exit.clone()) {
                Ok(game) => {
                    // `launch` only succeeds with a selected game.
                    if let Some(id) = session.selected_game {
                        self.active = Some(ActiveGame { id, game, exit });
                    }
                }
                Err(e) => {
                    nav.recover(e);
                    return;
                }
            }
        }

        if let Some(active) = &mut self.active {
            active.game.set_muted(session.muted);
        }
    }

    pub fn on_action(&mut self, action: Action, now: Instant, nav: &mut NavigationController) {
        self.sync(nav);
        if let Some(active) = &mut self.active {
            active.game.on_action(action, now, &mut self.cues);
        }
        self.settle(nav);
    }

    pub fn tick(&mut self, now: Instant, nav: &mut NavigationController) {
        self.sync(nav);
        if let Some(active) = &mut self.active {
            active.game.tick(now, &mut self.cues);
        }
        self.settle(nav);
    }

    pub fn compose(&self, canvas: &mut Canvas, area: Area, now: Instant) {
        if let Some(active) = &self.active {
            active.game.compose(canvas, area, now);
        }
    }

    /// Play queued cues and honour an exit request.
    fn settle(&mut self, nav: &mut NavigationController) {
        for cue in self.cues.drain(..) {
            nav.sound().play(cue);
        }
        let exit_requested = self.active.as_ref().map(|a| a.exit.take()).unwrap_or(false);
        if exit_requested {
            nav.back_to_menu();
            self.sync(nav);
        }
    }
}
