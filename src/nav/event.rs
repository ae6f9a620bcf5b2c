/// Normalised user intents.
/// Keyboard, mouse and gamepad input all reduce to these before reaching
/// the hub; games only ever see `Action`s.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Back,
    /// Digit key 1-9: pick the n-th option directly (1-based).
    Pick(u8),
    Mute,
    /// Header title activation.
    Home,
    Quit,
}

impl Action {
    /// Zero-based option index for `Pick`.
    pub fn pick_index(self) -> Option<usize> {
        match self {
            Action::Pick(n) if n >= 1 => Some(n as usize - 1),
            _ => None,
        }
    }
}
