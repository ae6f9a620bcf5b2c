/// Gamepad input using gilrs.
///
/// Button mapping comes from the `[gamepad]` config section.
/// Default mapping:
///   D-pad / Left Stick    →  Up / Down / Left / Right
///   A / Start             →  Confirm
///   B / Select            →  Back
///   Y                     →  Mute
///
/// Everything is edge-triggered: one press, one action.

#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, Gilrs};

use crate::config::GamepadConfig;
use crate::nav::event::Action;

#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
const STICK_DEADZONE: f32 = 0.5;

/// Logical button identifiers (one per physical button).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Btn {
    A,       // South
    B,       // East
    X,       // West
    Y,       // North
    L1,
    R1,
    Start,
    Select,
}

impl Btn {
    fn from_name(s: &str) -> Option<Btn> {
        match s.trim().to_uppercase().as_str() {
            "A" | "SOUTH"  => Some(Btn::A),
            "B" | "EAST"   => Some(Btn::B),
            "X" | "WEST"   => Some(Btn::X),
            "Y" | "NORTH"  => Some(Btn::Y),
            "L1" | "LB" | "LEFTTRIGGER"  => Some(Btn::L1),
            "R1" | "RB" | "RIGHTTRIGGER" => Some(Btn::R1),
            "START" => Some(Btn::Start),
            "SELECT" | "BACK" => Some(Btn::Select),
            _ => None,
        }
    }

    #[cfg(feature = "gamepad")]
    fn from_gilrs(btn: Button) -> Option<Btn> {
        match btn {
            Button::South     => Some(Btn::A),
            Button::East      => Some(Btn::B),
            Button::West      => Some(Btn::X),
            Button::North     => Some(Btn::Y),
            Button::LeftTrigger  => Some(Btn::L1),
            Button::RightTrigger => Some(Btn::R1),
            Button::Start     => Some(Btn::Start),
            Button::Select    => Some(Btn::Select),
            _ => None,
        }
    }
}

/// Action-to-button mapping (loaded from config).
#[derive(Clone, Debug, PartialEq)]
struct ActionMap {
    confirm: Vec<Btn>,
    cancel: Vec<Btn>,
    mute: Vec<Btn>,
}

impl Default for ActionMap {
    fn default() -> Self {
        ActionMap {
            confirm: vec![Btn::A, Btn::Start],
            cancel:  vec![Btn::B, Btn::Select],
            mute:    vec![Btn::Y],
        }
    }
}

impl ActionMap {
    /// Unknown names are skipped; an empty result keeps the default.
    fn from_config(cfg: &GamepadConfig) -> Self {
        fn parse_list(names: &[String], fallback: Vec<Btn>) -> Vec<Btn> {
            let parsed: Vec<Btn> = names.iter().filter_map(|s| Btn::from_name(s)).collect();
            if parsed.is_empty() { fallback } else { parsed }
        }
        let d = ActionMap::default();
        ActionMap {
            confirm: parse_list(&cfg.confirm, d.confirm),
            cancel: parse_list(&cfg.cancel, d.cancel),
            mute: parse_list(&cfg.mute, d.mute),
        }
    }

    /// Confirm wins over cancel wins over mute if a button is in several lists.
    fn action_for(&self, btn: Btn) -> Option<Action> {
        if self.confirm.contains(&btn) {
            Some(Action::Confirm)
        } else if self.cancel.contains(&btn) {
            Some(Action::Back)
        } else if self.mute.contains(&btn) {
            Some(Action::Mute)
        } else {
            None
        }
    }
}

/// Digital direction derived from an analogue stick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum StickDir {
    Centre,
    Dir(Action),
}

fn stick_dir(x: f32, y: f32) -> StickDir {
    if x.abs() < STICK_DEADZONE && y.abs() < STICK_DEADZONE {
        return StickDir::Centre;
    }
    let action = if x.abs() >= y.abs() {
        if x < 0.0 { Action::Left } else { Action::Right }
    } else if y > 0.0 {
        Action::Up
    } else {
        Action::Down
    };
    StickDir::Dir(action)
}

pub struct GamepadState {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,

    stick_x: f32,
    stick_y: f32,
    stick: StickDir,

    action_map: ActionMap,

    /// Actions decoded by the last `update`.
    pub actions: Vec<Action>,
}

impl GamepadState {
    pub fn new() -> Self {
        #[cfg(feature = "gamepad")]
        let gilrs_opt = match Gilrs::new() {
            Ok(g) => Some(g),
            Err(e) => {
                tracing::info!(error = %e, "gamepad support unavailable");
                None
            }
        };

        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs: gilrs_opt,
            stick_x: 0.0,
            stick_y: 0.0,
            stick: StickDir::Centre,
            action_map: ActionMap::default(),
            actions: Vec::with_capacity(4),
        }
    }

    /// Load button mapping from config.
    pub fn load_button_config(&mut self, cfg: &GamepadConfig) {
        self.action_map = ActionMap::from_config(cfg);
    }

    pub fn update(&mut self) {
        self.actions.clear();

        #[cfg(feature = "gamepad")]
        self.poll_gilrs();
    }

    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self) {
        let gilrs = match &mut self.gilrs {
            Some(g) => g,
            None => return,
        };

        let events: Vec<_> = std::iter::from_fn(|| gilrs.next_event()).collect();

        for event in events {
            match event.event {
                EventType::ButtonPressed(btn, _) => self.press(btn),
                EventType::AxisChanged(axis, value, _) => {
                    match axis {
                        Axis::LeftStickX => self.stick_x = value,
                        Axis::LeftStickY => self.stick_y = value,
                        _ => {}
                    }
                    self.update_stick();
                }
                EventType::Connected => tracing::info!("gamepad connected"),
                EventType::Disconnected => {
                    self.release_stick();
                    tracing::info!("gamepad disconnected");
                }
                _ => {}
            }
        }
    }

    #[cfg(feature = "gamepad")]
    fn press(&mut self, gilrs_btn: Button) {
        // D-pad is not part of the configurable map
        let action = match gilrs_btn {
            Button::DPadUp    => Some(Action::Up),
            Button::DPadDown  => Some(Action::Down),
            Button::DPadLeft  => Some(Action::Left),
            Button::DPadRight => Some(Action::Right),
            other => Btn::from_gilrs(other).and_then(|b| self.action_map.action_for(b)),
        };
        if let Some(action) = action {
            self.actions.push(action);
        }
    }

    /// Emit a direction when the stick leaves the centre or changes direction.
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn update_stick(&mut self) {
        let dir = stick_dir(self.stick_x, self.stick_y);
        if dir != self.stick {
            if let StickDir::Dir(action) = dir {
                self.actions.push(action);
            }
            self.stick = dir;
        }
    }

    /// Forget the stick position so a reconnected pad starts centred.
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn release_stick(&mut self) {
        self.stick_x = 0.0;
        self.stick_y = 0.0;
        self.stick = StickDir::Centre;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detached() -> GamepadState {
        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs: None,
            stick_x: 0.0,
            stick_y: 0.0,
            stick: StickDir::Centre,
            action_map: ActionMap::default(),
            actions: Vec::new(),
        }
    }

    #[test]
    fn default_mapping() {
        let map = ActionMap::default();
        assert_eq!(map.action_for(Btn::A), Some(Action::Confirm));
        assert_eq!(map.action_for(Btn::Select), Some(Action::Back));
        assert_eq!(map.action_for(Btn::Y), Some(Action::Mute));
        assert_eq!(map.action_for(Btn::L1), None);
    }

    #[test]
    fn config_overrides_and_falls_back() {
        let cfg = GamepadConfig {
            confirm: vec!["x".into()],
            cancel: vec!["bogus".into()],
            mute: vec![],
        };
        let map = ActionMap::from_config(&cfg);
        assert_eq!(map.confirm, vec![Btn::X]);
        assert_eq!(map.cancel, ActionMap::default().cancel);
        assert_eq!(map.mute, vec![Btn::Y]);
    }

    #[test]
    fn stick_fires_once_per_push() {
        let mut pad = detached();
        pad.stick_x = 0.9;
        pad.update_stick();
        pad.stick_x = 0.95;
        pad.update_stick();
        assert_eq!(pad.actions, vec![Action::Right]);

        pad.stick_x = 0.1;
        pad.update_stick();
        pad.stick_y = -0.8;
        pad.update_stick();
        assert_eq!(pad.actions, vec![Action::Right, Action::Down]);
    }

    #[test]
    fn release_recentres_the_stick() {
        let mut pad = detached();
        pad.stick_x = 0.9;
        pad.update_stick();
        pad.release_stick();
        assert_eq!(pad.stick, StickDir::Centre);

        pad.actions.clear();
        pad.stick_x = 0.9;
        pad.update_stick();
        assert_eq!(pad.actions, vec![Action::Right]);
    }

    #[test]
    fn deadzone_is_centre() {
        assert_eq!(stick_dir(0.2, -0.3), StickDir::Centre);
        assert_eq!(stick_dir(-0.7, 0.2), StickDir::Dir(Action::Left));
        assert_eq!(stick_dir(0.1, 0.9), StickDir::Dir(Action::Up));
    }
}
