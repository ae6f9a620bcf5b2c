/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Compose the next frame into the `front` canvas
///   2. Compare each cell with the `back` canvas (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// Composition is split from output: `compose_frame` only touches a
/// `Canvas`, so every screen can be checked without a terminal.

use std::io::{self, BufWriter, Write};
use std::time::Instant;

use crossterm::{
    cursor::{self, MoveTo},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::game::{Difficulty, ScreenState};
use crate::hub::{Hub, MENU_COLUMNS};
use crate::nav::event::Action;
use crate::ui::canvas::{clip, palette, text_width, Area, Canvas, Cell};

const APP_TITLE: &str = "🧠 ألعاب العقل";
const FOOTER: &str = "صُنع بحب لكبارنا الأعزاء ❤️";
const MENU_HEADING: &str = "اختر لعبة لتبدأ";
const DIFFICULTY_HEADING: &str = "اختر مستوى الصعوبة";
const BADGE_ON: &str = " 🔊 ";
const BADGE_OFF: &str = " 🔇 ";
const MENU_HINT: &str = "الأسهم للتنقل   Enter للبدء   M كتم الصوت   Q للخروج";
const DIFFICULTY_HINT: &str = "↑↓ للاختيار   Enter للتأكيد   Esc للعودة";

/// Narrower than this, the menu collapses to one column.
const WIDE_MENU_MIN: usize = 72;
const CARD_H: usize = 4;

// ── Layout: where things are for a given terminal size ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Layout {
    pub width: usize,
    pub height: usize,
    pub title: Area,
    pub mute_badge: Area,
    pub main: Area,
    pub footer_row: usize,
    pub menu_cols: usize,
}

impl Layout {
    pub fn for_size(width: usize, height: usize) -> Self {
        let title_w = text_width(APP_TITLE) + 2;
        let badge_w = text_width(BADGE_ON);
        Layout {
            width,
            height,
            title: Area::new(1, 0, title_w, 1),
            mute_badge: Area::new(width.saturating_sub(badge_w + 1), 0, badge_w, 1),
            // Header, blank row, main, blank row, footer.
            main: Area::new(1, 2, width.saturating_sub(2), height.saturating_sub(4)),
            footer_row: height.saturating_sub(1),
            menu_cols: if width >= WIDE_MENU_MIN { MENU_COLUMNS } else { 1 },
        }
    }

    /// Mouse click on the header.
    pub fn header_hit(&self, col: u16, row: u16) -> Option<Action> {
        let (x, y) = (col as usize, row as usize);
        if self.mute_badge.contains(x, y) {
            Some(Action::Mute)
        } else if self.title.contains(x, y) {
            Some(Action::Home)
        } else {
            None
        }
    }
}

// ── Compose: build a frame ──

pub fn compose_frame(canvas: &mut Canvas, layout: &Layout, hub: &Hub, now: Instant) {
    compose_header(canvas, layout, hub.nav().is_muted());
    match hub.nav().screen() {
        ScreenState::Menu => compose_menu(canvas, layout, hub),
        ScreenState::DifficultySelect => compose_difficulty(canvas, layout, hub),
        ScreenState::Playing => hub.compose_game(canvas, layout.main, now),
    }
    if layout.footer_row > layout.main.y {
        canvas.put_centered(canvas.full(), layout.footer_row, FOOTER, palette::DIM, Color::Reset);
    }
}

fn compose_header(canvas: &mut Canvas, layout: &Layout, muted: bool) {
    canvas.fill(Area::new(0, 0, layout.width, 1), palette::HEADER_BG);
    canvas.put_str(layout.title.x + 1, 0, APP_TITLE, palette::TEXT, palette::HEADER_BG);
    let badge = if muted { BADGE_OFF } else { BADGE_ON };
    canvas.put_str(layout.mute_badge.x, 0, badge, palette::TEXT, palette::CARD_BG);
}

fn compose_menu(canvas: &mut Canvas, layout: &Layout, hub: &Hub) {
    let area = layout.main;
    canvas.put_centered(area, area.y, MENU_HEADING, palette::ACCENT, Color::Reset);

    let entries = hub.nav().catalog().all();
    let cols = layout.menu_cols;
    let gap = 2;
    let card_w = ((area.w.saturating_sub(gap * (cols - 1))) / cols).min(36);
    let grid_w = card_w * cols + gap * (cols - 1);
    let left = area.center_x(grid_w);
    let top = area.y + 2;

    // Scroll so the cursor's row is visible on short terminals.
    let hint_rows = 2;
    let visible_rows = (area.bottom().saturating_sub(top + hint_rows) / (CARD_H + 1)).max(1);
    let cursor_row = hub.menu_cursor() / cols;
    let first_row = cursor_row.saturating_sub(visible_rows - 1);

    for (i, entry) in entries.iter().enumerate() {
        let row = i / cols;
        if row < first_row || row >= first_row + visible_rows {
            continue;
        }
        let x = left + (i % cols) * (card_w + gap);
        let y = top + (row - first_row) * (CARD_H + 1);
        let selected = i == hub.menu_cursor();
        let bg = if selected { palette::CURSOR_BG } else { palette::CARD_BG };
        let inner = card_w.saturating_sub(4);

        canvas.fill(Area::new(x, y, card_w, CARD_H), bg);
        let heading = format!("{}  {}  {}", i + 1, entry.icon, entry.title);
        canvas.put_str(x + 2, y + 1, clip(&heading, inner), palette::ACCENT, bg);
        canvas.put_str(x + 2, y + 2, clip(entry.description, inner), palette::TEXT, bg);
    }

    if area.h > 0 {
        canvas.put_centered(area, area.bottom() - 1, MENU_HINT, palette::HINT, Color::Reset);
    }
}

fn compose_difficulty(canvas: &mut Canvas, layout: &Layout, hub: &Hub) {
    let area = layout.main;
    let title = hub.nav().selected_title().unwrap_or("");
    canvas.put_centered(area, area.y, title, palette::ACCENT, Color::Reset);
    canvas.put_centered(area, area.y + 2, DIFFICULTY_HEADING, palette::TEXT, Color::Reset);

    let width = 24;
    let left = area.center_x(width);
    for (i, level) in Difficulty::ALL.iter().enumerate() {
        let y = area.y + 4 + i * 2;
        if y >= area.bottom().saturating_sub(1) {
            break;
        }
        let selected = *level == hub.difficulty_cursor();
        let bg = if selected { palette::CURSOR_BG } else { palette::CARD_BG };
        canvas.fill(Area::new(left, y, width, 1), bg);
        canvas.put_str(left + 2, y, &format!("{}  {}", i + 1, level.label()), palette::TEXT, bg);
        if selected {
            canvas.put_str(left + width - 2, y, "◀", palette::ACCENT, bg);
        }
    }

    if area.h > 0 {
        canvas.put_centered(area, area.bottom() - 1, DIFFICULTY_HINT, palette::HINT, Color::Reset);
    }
}

// ── Renderer: terminal output ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: Canvas,
    back: Canvas,
    layout: Layout,
    last_screen: Option<ScreenState>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: Canvas::new(0, 0),
            back: Canvas::new(0, 0),
            layout: Layout::for_size(0, 0),
            last_screen: None,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            SetBackgroundColor(palette::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.resize(tw as usize, th as usize);
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    fn resize(&mut self, w: usize, h: usize) {
        self.front.resize(w, h);
        self.back.resize(w, h);
        self.layout = Layout::for_size(w, h);
        // Force full repaint: back ≠ front for every cell.
        self.back.invalidate();
    }

    pub fn render(&mut self, hub: &Hub, now: Instant) -> io::Result<()> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.layout.width || th as usize != self.layout.height {
            self.resize(tw as usize, th as usize);
            queue!(self.writer, SetBackgroundColor(palette::BASE_BG), Clear(ClearType::All))?;
        }

        // Screen change: clear for a clean transition
        let screen = hub.nav().screen();
        if self.last_screen != Some(screen) {
            self.back.invalidate();
            queue!(self.writer, SetBackgroundColor(palette::BASE_BG), Clear(ClearType::All))?;
            self.last_screen = Some(screen);
        }

        self.front.clear();
        compose_frame(&mut self.front, &self.layout, hub, now);

        self.flush_diff()?;

        // Swap: current front becomes next back
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = palette::TEXT;
        let mut last_bg = palette::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        // Explicit base colours; ResetColor would fall back to the terminal default.
        queue!(self.writer, SetForegroundColor(last_fg), SetBackgroundColor(last_bg))?;

        for y in 0..self.front.height() {
            let mut x = 0;
            while x < self.front.width() {
                let cell: Cell = self.front.get(x, y);
                let prev = self.back.get(x, y);

                // Right half of a wide glyph is drawn with its left half
                if cell.cont {
                    if cell != prev {
                        need_move = true;
                    }
                    x += 1;
                    continue;
                }

                let cont_changed = cell.wide
                    && x + 1 < self.front.width()
                    && self.front.get(x + 1, y) != self.back.get(x + 1, y);

                if cell == prev && !cont_changed {
                    need_move = true;
                    x += 1;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }

                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }

                queue!(self.writer, Print(cell.as_str()))?;

                if cell.wide {
                    last_x = x + 1;
                    x += 2;
                } else {
                    last_x = x;
                    x += 1;
                }
                last_y = y;
            }
        }

        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GamesConfig;
    use crate::domain::game::GameId;
    use crate::nav::sound::SoundController;

    fn hub() -> Hub {
        Hub::new(SoundController::silent(), GamesConfig::default())
    }

    fn frame(hub: &Hub, w: usize, h: usize) -> (Canvas, Layout) {
        let layout = Layout::for_size(w, h);
        let mut canvas = Canvas::new(w, h);
        compose_frame(&mut canvas, &layout, hub, Instant::now());
        (canvas, layout)
    }

    fn screen_text(canvas: &Canvas) -> String {
        (0..canvas.height()).map(|y| canvas.row_text(y)).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn header_hits() {
        let l = Layout::for_size(100, 30);
        assert_eq!(l.header_hit(3, 0), Some(Action::Home));
        assert_eq!(l.header_hit(98, 0), Some(Action::Mute));
        assert_eq!(l.header_hit(50, 0), None);
        assert_eq!(l.header_hit(3, 5), None);
    }

    #[test]
    fn narrow_terminal_uses_one_column() {
        assert_eq!(Layout::for_size(120, 40).menu_cols, MENU_COLUMNS);
        assert_eq!(Layout::for_size(50, 40).menu_cols, 1);
    }

    #[test]
    fn menu_shows_heading_footer_and_cards() {
        let h = hub();
        let (c, _) = frame(&h, 120, 40);
        let text = screen_text(&c);
        assert!(text.contains(MENU_HEADING));
        assert!(text.contains("لعبة الذاكرة"));
        assert!(text.contains("البحث البصري"));
        assert!(c.row_text(39).contains("صُنع بحب"));
        assert!(c.row_text(0).contains("🔊"));
    }

    #[test]
    fn short_terminal_scrolls_to_cursor() {
        let mut h = hub();
        h.set_menu_columns(1);
        for _ in 0..8 {
            h.handle(Action::Down, Instant::now());
        }
        let (c, _) = frame(&h, 60, 20);
        let text = screen_text(&c);
        assert!(text.contains("البحث البصري"));
        assert!(!text.contains("لعبة الذاكرة"));
    }

    #[test]
    fn muted_badge() {
        let mut h = hub();
        h.handle(Action::Mute, Instant::now());
        let (c, _) = frame(&h, 100, 30);
        assert!(c.row_text(0).contains("🔇"));
    }

    #[test]
    fn difficulty_screen_lists_levels() {
        let mut h = hub();
        h.handle(Action::Pick(1), Instant::now());
        let (c, _) = frame(&h, 100, 30);
        let text = screen_text(&c);
        assert!(text.contains(DIFFICULTY_HEADING));
        for level in Difficulty::ALL {
            assert!(text.contains(level.label()));
        }
    }

    #[test]
    fn playing_screen_is_drawn_by_the_game() {
        let mut h = hub();
        h.start_at(GameId::Reaction.key()).unwrap();
        let (c, _) = frame(&h, 100, 30);
        assert!(screen_text(&c).contains("سرعة الاستجابة"));
    }
}
