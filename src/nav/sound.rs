/// Mute policy and cue dispatch.
///
/// `SoundController` is the single owner of the mute flag. It forwards cues
/// to an opaque `CueBackend` and drops them while muted. Backend failures
/// are logged and swallowed: navigation never depends on audio.

use std::fmt;

use crate::error::HubError;

/// Named, fire-and-forget audio feedback.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Cue {
    /// Launching a game from the menu.
    Start,
    /// Confirming a difficulty, going back to the menu.
    Click,
    Flip,
    Correct,
    Wrong,
    Win,
    /// Reaction game: the signal to press.
    Go,
}

impl Cue {
    pub const ALL: [Cue; 7] = [
        Cue::Start, Cue::Click, Cue::Flip, Cue::Correct, Cue::Wrong, Cue::Win, Cue::Go,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Cue::Start => "start",
            Cue::Click => "click",
            Cue::Flip => "flip",
            Cue::Correct => "correct",
            Cue::Wrong => "wrong",
            Cue::Win => "win",
            Cue::Go => "go",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Playback mechanism. Must not block the caller.
pub trait CueBackend {
    fn play(&self, cue: Cue) -> Result<(), HubError>;
}

/// Used when no audio device is available.
pub struct SilentBackend;

impl CueBackend for SilentBackend {
    fn play(&self, _cue: Cue) -> Result<(), HubError> {
        Ok(())
    }
}

pub struct SoundController {
    muted: bool,
    backend: Box<dyn CueBackend>,
}

impl SoundController {
    pub fn new(backend: Box<dyn CueBackend>) -> Self {
        SoundController { muted: false, backend }
    }

    pub fn silent() -> Self {
        Self::new(Box::new(SilentBackend))
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        tracing::debug!(muted = self.muted, "mute toggled");
    }

    pub fn play(&self, cue: Cue) {
        if self.muted {
            return;
        }
        if let Err(e) = self.backend.play(cue) {
            tracing::debug!(%cue, error = %e, "cue dropped");
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Backend that records every cue it is asked to play.
    #[derive(Clone, Default)]
    pub struct RecordingBackend {
        pub played: Rc<RefCell<Vec<Cue>>>,
    }

    impl RecordingBackend {
        pub fn take(&self) -> Vec<Cue> {
            std::mem::take(&mut *self.played.borrow_mut())
        }
    }

    impl CueBackend for RecordingBackend {
        fn play(&self, cue: Cue) -> Result<(), HubError> {
            self.played.borrow_mut().push(cue);
            Ok(())
        }
    }

    pub struct FailingBackend;

    impl CueBackend for FailingBackend {
        fn play(&self, cue: Cue) -> Result<(), HubError> {
            Err(HubError::Playback(format!("no device for {cue}")))
        }
    }

    pub fn recording() -> (SoundController, RecordingBackend) {
        let rec = RecordingBackend::default();
        (SoundController::new(Box::new(rec.clone())), rec)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn starts_unmuted_and_plays() {
        let (sound, rec) = recording();
        assert!(!sound.is_muted());
        sound.play(Cue::Start);
        assert_eq!(rec.take(), vec![Cue::Start]);
    }

    #[test]
    fn muted_drops_cues() {
        let (mut sound, rec) = recording();
        sound.toggle_mute();
        sound.play(Cue::Click);
        sound.play(Cue::Win);
        assert!(rec.take().is_empty());

        sound.toggle_mute();
        sound.play(Cue::Click);
        assert_eq!(rec.take(), vec![Cue::Click]);
    }

    #[test]
    fn playback_failure_is_swallowed() {
        let sound = SoundController::new(Box::new(FailingBackend));
        sound.play(Cue::Start);
        sound.play(Cue::Click);
    }

    #[test]
    fn cue_names() {
        assert_eq!(Cue::Start.to_string(), "start");
        assert_eq!(Cue::Click.name(), "click");
    }
}
