/// Reaction time: wait for the signal, then press as fast as possible.

use std::time::{Duration, Instant};

use crossterm::style::Color;

use super::{compose_heading, compose_hint, push_cue};
use crate::nav::event::Action;
use crate::nav::host::{LaunchProps, MiniGame};
use crate::nav::sound::Cue;
use crate::ui::canvas::{palette, Area, Canvas};

/// Random wait before the signal, in milliseconds.
const WAIT_MS: std::ops::RangeInclusive<u64> = 1500..=4000;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ReactionPhase {
    Idle,
    Waiting { go_at: Instant },
    Go { since: Instant },
    TooSoon,
    Result { ms: u128 },
}

pub struct ReactionGame {
    props: LaunchProps,
    rng: fastrand::Rng,
    phase: ReactionPhase,
    best_ms: Option<u128>,
}

impl ReactionGame {
    pub fn new(props: LaunchProps, rng: fastrand::Rng) -> Self {
        ReactionGame { props, rng, phase: ReactionPhase::Idle, best_ms: None }
    }

    #[cfg(test)]
    pub fn phase(&self) -> ReactionPhase {
        self.phase
    }

    #[cfg(test)]
    pub fn best_ms(&self) -> Option<u128> {
        self.best_ms
    }

    fn arm(&mut self, now: Instant) {
        let wait = Duration::from_millis(self.rng.u64(WAIT_MS));
        self.phase = ReactionPhase::Waiting { go_at: now + wait };
    }
}

impl MiniGame for ReactionGame {
    fn on_action(&mut self, action: Action, now: Instant, cues: &mut Vec<Cue>) {
        match action {
            Action::Back => {
                self.props.on_back_to_menu.fire();
                return;
            }
            Action::Confirm => {}
            _ => return,
        }
        match self.phase {
            ReactionPhase::Idle | ReactionPhase::TooSoon | ReactionPhase::Result { .. } => {
                self.arm(now);
            }
            ReactionPhase::Waiting { .. } => {
                self.phase = ReactionPhase::TooSoon;
                push_cue(self.props.is_muted, cues, Cue::Wrong);
            }
            ReactionPhase::Go { since } => {
                let ms = now.saturating_duration_since(since).as_millis();
                self.best_ms = Some(self.best_ms.map_or(ms, |b| b.min(ms)));
                self.phase = ReactionPhase::Result { ms };
                push_cue(self.props.is_muted, cues, Cue::Correct);
            }
        }
    }

    fn tick(&mut self, now: Instant, cues: &mut Vec<Cue>) {
        if let ReactionPhase::Waiting { go_at } = self.phase {
            if now >= go_at {
                // The panel turns green on this tick, so time from here.
                self.phase = ReactionPhase::Go { since: now };
                push_cue(self.props.is_muted, cues, Cue::Go);
            }
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.props.is_muted = muted;
    }

    fn compose(&self, canvas: &mut Canvas, area: Area, _now: Instant) {
        let status = match self.best_ms {
            Some(ms) => format!("أفضل وقت: {} مللي ثانية", ms),
            None => String::new(),
        };
        let top = compose_heading(canvas, area, "سرعة الاستجابة", &status);

        let (msg, panel) = match self.phase {
            ReactionPhase::Idle => ("اضغط Enter للبدء".to_string(), palette::CARD_BG),
            ReactionPhase::Waiting { .. } => ("انتظر اللون الأخضر...".to_string(), Color::Rgb { r: 150, g: 40, b: 40 }),
            ReactionPhase::Go { .. } => ("الآن! اضغط Enter".to_string(), Color::Rgb { r: 30, g: 140, b: 50 }),
            ReactionPhase::TooSoon => ("مبكر جداً! اضغط Enter للمحاولة مجدداً".to_string(), palette::CARD_BG),
            ReactionPhase::Result { ms } => (format!("وقتك: {} مللي ثانية ⚡", ms), palette::CARD_BG),
        };
        let height = area.h.saturating_sub(6).clamp(1, 7);
        let width = area.w.saturating_sub(8).min(50);
        let panel_area = Area::new(area.center_x(width), top + 1, width, height);
        canvas.fill(panel_area, panel);
        canvas.put_centered(panel_area, panel_area.y + height / 2, &msg, palette::TEXT, panel);

        if matches!(self.phase, ReactionPhase::Result { .. } | ReactionPhase::TooSoon) {
            compose_hint(canvas, area, "Enter لمحاولة أخرى   Esc للعودة");
        } else {
            compose_hint(canvas, area, "Enter للضغط   Esc للعودة");
        }
    }
}
