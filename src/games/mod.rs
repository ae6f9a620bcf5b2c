/// Game collaborators.
///
/// Each game is autonomous: it owns its state and timers and talks back to
/// the hub only through `LaunchProps::on_back_to_menu` and the cue list.
///
/// Families:
///   - `quiz`: N rounds of four-option questions (word scramble, math,
///               Stroop, word puzzle, pattern recognition)
///   - `board`: pick one cell in an emoji grid (find the odd, visual search)
///   - `memory`, `reaction`: standalone

pub mod board;
pub mod find_the_odd;
pub mod math_challenge;
pub mod memory;
pub mod pattern;
pub mod quiz;
pub mod reaction;
pub mod stroop;
pub mod visual_search;
pub mod word_puzzle;
pub mod word_scramble;

use crossterm::style::Color;

use crate::nav::sound::Cue;
use crate::ui::canvas::{palette, Area, Canvas};

/// How long right/wrong feedback stays before the next round.
pub const FEEDBACK_MS: u64 = 1200;

pub const MSG_CORRECT: &str = "أحسنت! إجابة صحيحة ✅";
pub const MSG_WRONG: &str = "ليست هذه، حاول مرة أخرى ❌";
pub const HINT_CHOICE: &str = "↑↓ أو الأرقام للاختيار   Enter للتأكيد   Esc للعودة";
pub const HINT_AGAIN: &str = "Enter للعب مرة أخرى   Esc للعودة إلى القائمة";

/// Queue a cue unless the player muted sound.
pub(crate) fn push_cue(muted: bool, cues: &mut Vec<Cue>, cue: Cue) {
    if !muted {
        cues.push(cue);
    }
}

/// Title + status line. Returns the first free row below them.
pub(crate) fn compose_heading(canvas: &mut Canvas, area: Area, title: &str, status: &str) -> usize {
    canvas.put_centered(area, area.y, title, palette::ACCENT, Color::Reset);
    if !status.is_empty() {
        canvas.put_centered(area, area.y + 1, status, palette::DIM, Color::Reset);
    }
    area.y + 3
}

/// Key help on the last row of the area.
pub(crate) fn compose_hint(canvas: &mut Canvas, area: Area, hint: &str) {
    if area.h > 0 {
        canvas.put_centered(area, area.bottom() - 1, hint, palette::HINT, Color::Reset);
    }
}

/// Row of option buttons, one per line, cursor highlighted.
pub(crate) fn compose_options(
    canvas: &mut Canvas,
    area: Area,
    top: usize,
    options: &[String],
    cursor: usize,
    marks: &dyn Fn(usize) -> Option<Color>,
) -> usize {
    let width = options
        .iter()
        .map(|o| crate::ui::canvas::text_width(o))
        .max()
        .unwrap_or(0)
        + 8;
    let left = area.center_x(width);
    for (i, option) in options.iter().enumerate() {
        let row = top + i * 2;
        if row >= area.bottom().saturating_sub(1) {
            break;
        }
        let bg = if i == cursor { palette::CURSOR_BG } else { palette::CARD_BG };
        let fg = marks(i).unwrap_or(palette::TEXT);
        canvas.fill(Area::new(left, row, width, 1), bg);
        let label = format!(" {}  {}", i + 1, option);
        canvas.put_str(left + 1, row, &label, fg, bg);
        if i == cursor {
            canvas.put_str(left + width.saturating_sub(2), row, "◀", palette::ACCENT, bg);
        }
    }
    top + options.len() * 2
}
