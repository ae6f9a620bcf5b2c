/// Memory: match pairs of face-down cards.
///
/// Two face-up cards that differ stay visible for `reveal_ms`, then turn
/// back over; input is ignored until they do. One move = one pair turned.

use std::time::{Duration, Instant};

use crossterm::style::Color;

use super::board::GridCursor;
use super::{compose_heading, compose_hint, push_cue, HINT_AGAIN};
use crate::domain::game::Difficulty;
use crate::nav::event::Action;
use crate::nav::host::{LaunchProps, MiniGame};
use crate::nav::sound::Cue;
use crate::ui::canvas::{palette, Area, Canvas};

const FACES: [&str; 8] = ["🌹", "🍎", "🐪", "🌴", "☕", "🌙", "⭐", "🐟"];
const COLS: usize = 4;
const HIDDEN: &str = "❓";
const HINT_MEMORY: &str = "الأسهم للتحرك   Enter لقلب البطاقة   Esc للعودة";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub id: usize,
    pub value: &'static str,
    pub is_flipped: bool,
    pub is_matched: bool,
}

pub fn card_count(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy => 8,
        Difficulty::Medium => 12,
        Difficulty::Hard => 16,
    }
}

pub struct MemoryGame {
    props: LaunchProps,
    rng: fastrand::Rng,
    difficulty: Difficulty,
    reveal: Duration,
    cards: Vec<Card>,
    cursor: GridCursor,
    first: Option<usize>,
    /// Mismatched pair waiting to turn back over.
    pending: Option<(usize, usize, Instant)>,
    moves: u32,
    won: bool,
}

impl MemoryGame {
    pub fn new(props: LaunchProps, rng: fastrand::Rng, reveal_ms: u64) -> Self {
        let difficulty = props.difficulty.unwrap_or_default();
        let mut game = MemoryGame {
            props,
            rng,
            difficulty,
            reveal: Duration::from_millis(reveal_ms),
            cards: Vec::new(),
            cursor: GridCursor::new(COLS, 1),
            first: None,
            pending: None,
            moves: 0,
            won: false,
        };
        game.deal();
        game
    }

    fn deal(&mut self) {
        let pairs = card_count(self.difficulty) / 2;
        let mut values: Vec<&'static str> = FACES[..pairs].iter().flat_map(|v| [*v, *v]).collect();
        self.rng.shuffle(&mut values);
        self.cards = values
            .into_iter()
            .enumerate()
            .map(|(id, value)| Card { id, value, is_flipped: false, is_matched: false })
            .collect();
        self.cursor = GridCursor::new(COLS, self.cards.len().div_ceil(COLS));
        self.first = None;
        self.pending = None;
        self.moves = 0;
        self.won = false;
    }

    #[cfg(test)]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[cfg(test)]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[cfg(test)]
    pub fn is_won(&self) -> bool {
        self.won
    }

    #[cfg(test)]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn flip(&mut self, index: usize, now: Instant, cues: &mut Vec<Cue>) {
        if self.pending.is_some() {
            return;
        }
        let Some(card) = self.cards.get_mut(index) else {
            return;
        };
        if card.is_flipped || card.is_matched {
            return;
        }
        card.is_flipped = true;
        push_cue(self.props.is_muted, cues, Cue::Flip);

        let Some(first) = self.first.take() else {
            self.first = Some(index);
            return;
        };
        self.moves += 1;
        if self.cards[first].value == self.cards[index].value {
            for i in [first, index] {
                self.cards[i].is_matched = true;
            }
            push_cue(self.props.is_muted, cues, Cue::Correct);
            if self.cards.iter().all(|c| c.is_matched) {
                self.won = true;
                push_cue(self.props.is_muted, cues, Cue::Win);
                tracing::debug!(moves = self.moves, "memory solved");
            }
        } else {
            self.pending = Some((first, index, now + self.reveal));
        }
    }
}

impl MiniGame for MemoryGame {
    fn on_action(&mut self, action: Action, now: Instant, cues: &mut Vec<Cue>) {
        if action == Action::Back {
            self.props.on_back_to_menu.fire();
            return;
        }
        if self.won {
            if action == Action::Confirm {
                self.deal();
            }
            return;
        }
        if self.cursor.step(action) {
            return;
        }
        if action == Action::Confirm {
            self.flip(self.cursor.index, now, cues);
        }
    }

    fn tick(&mut self, now: Instant, _cues: &mut Vec<Cue>) {
        if let Some((a, b, hide_at)) = self.pending {
            if now >= hide_at {
                self.cards[a].is_flipped = false;
                self.cards[b].is_flipped = false;
                self.pending = None;
            }
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.props.is_muted = muted;
    }

    fn compose(&self, canvas: &mut Canvas, area: Area, _now: Instant) {
        let status = format!("المستوى: {}    الحركات: {}", self.difficulty.label(), self.moves);
        let top = compose_heading(canvas, area, "لعبة الذاكرة", &status);

        let (card_w, card_h) = (6, 3);
        let left = area.center_x(COLS * (card_w + 1));
        for (i, card) in self.cards.iter().enumerate() {
            let x = left + (i % COLS) * (card_w + 1);
            let y = top + (i / COLS) * (card_h + 1);
            if y + card_h >= area.bottom() {
                break;
            }
            let bg = if card.is_matched {
                Color::Rgb { r: 30, g: 90, b: 40 }
            } else if i == self.cursor.index && !self.won {
                palette::CURSOR_BG
            } else {
                palette::CARD_BG
            };
            canvas.fill(Area::new(x, y, card_w, card_h), bg);
            let face = if card.is_flipped || card.is_matched { card.value } else { HIDDEN };
            canvas.put_str(x + 2, y + 1, face, palette::TEXT, bg);
        }

        if self.won {
            let rows = self.cards.len().div_ceil(COLS);
            let below = top + rows * (card_h + 1);
            let msg = format!("رائع! أنهيت اللعبة في {} حركة 🎉", self.moves);
            canvas.put_centered(area, below, &msg, palette::GOOD, Color::Reset);
            compose_hint(canvas, area, HINT_AGAIN);
        } else {
            compose_hint(canvas, area, HINT_MEMORY);
        }
    }
}
