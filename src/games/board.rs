/// Emoji grid games: move a cursor over the board and pick one cell.
///
/// A `BoardSource` deals one board per round; exactly one cell is the
/// target. Wrong picks cost nothing but a `wrong` cue; the round ends on
/// the target. Time per game is measured from the first board.

use std::time::{Duration, Instant};

use crossterm::style::Color;

use super::{compose_heading, compose_hint, push_cue, FEEDBACK_MS, HINT_AGAIN, MSG_CORRECT, MSG_WRONG};
use crate::nav::event::Action;
use crate::nav::host::{LaunchProps, MiniGame};
use crate::nav::sound::Cue;
use crate::ui::canvas::{palette, Area, Canvas};

pub const BOARD_ROUNDS: usize = 8;
const HINT_BOARD: &str = "الأسهم للتحرك   Enter للاختيار   Esc للعودة";

#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    pub cols: usize,
    pub rows: usize,
    pub cells: Vec<&'static str>,
    pub target: usize,
    /// Shown above the grid (e.g. the symbol to find).
    pub banner: Option<String>,
}

pub trait BoardSource {
    fn title(&self) -> &'static str;
    fn instruction(&self) -> &'static str;
    fn next_board(&mut self, rng: &mut fastrand::Rng, round: usize) -> Board;
}

/// Cursor over a cols×rows grid. Moves clamp at the edges.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GridCursor {
    pub cols: usize,
    pub rows: usize,
    pub index: usize,
}

impl GridCursor {
    pub fn new(cols: usize, rows: usize) -> Self {
        GridCursor { cols: cols.max(1), rows: rows.max(1), index: 0 }
    }

    pub fn len(&self) -> usize {
        self.cols * self.rows
    }

    /// Apply a direction. Returns false for non-movement actions.
    pub fn step(&mut self, action: Action) -> bool {
        let (x, y) = (self.index % self.cols, self.index / self.cols);
        let (nx, ny) = match action {
            Action::Left => (x.saturating_sub(1), y),
            Action::Right => ((x + 1).min(self.cols - 1), y),
            Action::Up => (x, y.saturating_sub(1)),
            Action::Down => (x, (y + 1).min(self.rows - 1)),
            _ => return false,
        };
        self.index = (ny * self.cols + nx).min(self.len() - 1);
        true
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BoardPhase {
    Searching,
    Feedback { correct: bool, until: Instant },
    Finished { elapsed: Duration },
}

pub struct BoardGame<S: BoardSource> {
    source: S,
    props: LaunchProps,
    rng: fastrand::Rng,
    rounds: usize,
    round: usize,
    misses: usize,
    board: Board,
    cursor: GridCursor,
    started: Option<Instant>,
    phase: BoardPhase,
}

impl<S: BoardSource> BoardGame<S> {
    pub fn new(mut source: S, props: LaunchProps, mut rng: fastrand::Rng, rounds: usize) -> Self {
        let board = source.next_board(&mut rng, 0);
        let cursor = GridCursor::new(board.cols, board.rows);
        BoardGame {
            source,
            props,
            rng,
            rounds: rounds.max(1),
            round: 0,
            misses: 0,
            board,
            cursor,
            started: None,
            phase: BoardPhase::Searching,
        }
    }

    #[cfg(test)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn phase(&self) -> BoardPhase {
        self.phase
    }

    #[cfg(test)]
    pub fn round(&self) -> usize {
        self.round
    }

    #[cfg(test)]
    pub fn misses(&self) -> usize {
        self.misses
    }

    fn deal(&mut self) {
        self.board = self.source.next_board(&mut self.rng, self.round);
        self.cursor = GridCursor::new(self.board.cols, self.board.rows);
    }

    fn pick(&mut self, index: usize, now: Instant, cues: &mut Vec<Cue>) {
        let correct = index == self.board.target;
        if correct {
            push_cue(self.props.is_muted, cues, Cue::Correct);
        } else {
            self.misses += 1;
            push_cue(self.props.is_muted, cues, Cue::Wrong);
        }
        let until = now + Duration::from_millis(FEEDBACK_MS);
        self.phase = BoardPhase::Feedback { correct, until };
    }

    fn advance(&mut self, now: Instant, cues: &mut Vec<Cue>) {
        let BoardPhase::Feedback { correct, .. } = self.phase else {
            return;
        };
        if !correct {
            self.phase = BoardPhase::Searching;
            return;
        }
        self.round += 1;
        if self.round >= self.rounds {
            let elapsed = self.started.map(|t| now.saturating_duration_since(t)).unwrap_or_default();
            self.phase = BoardPhase::Finished { elapsed };
            push_cue(self.props.is_muted, cues, Cue::Win);
        } else {
            self.deal();
            self.phase = BoardPhase::Searching;
        }
    }

    fn restart(&mut self) {
        self.round = 0;
        self.misses = 0;
        self.started = None;
        self.deal();
        self.phase = BoardPhase::Searching;
    }
}

impl<S: BoardSource> MiniGame for BoardGame<S> {
    fn on_action(&mut self, action: Action, now: Instant, cues: &mut Vec<Cue>) {
        if action == Action::Back {
            self.props.on_back_to_menu.fire();
            return;
        }
        match self.phase {
            BoardPhase::Searching => {
                self.started.get_or_insert(now);
                if self.cursor.step(action) {
                    return;
                }
                if action == Action::Confirm {
                    self.pick(self.cursor.index, now, cues);
                }
            }
            BoardPhase::Feedback { .. } => {
                if action == Action::Confirm {
                    self.advance(now, cues);
                }
            }
            BoardPhase::Finished { .. } => {
                if action == Action::Confirm {
                    self.restart();
                }
            }
        }
    }

    fn tick(&mut self, now: Instant, cues: &mut Vec<Cue>) {
        if let BoardPhase::Feedback { until, .. } = self.phase {
            if now >= until {
                self.advance(now, cues);
            }
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.props.is_muted = muted;
    }

    fn compose(&self, canvas: &mut Canvas, area: Area, now: Instant) {
        if let BoardPhase::Finished { elapsed } = self.phase {
            let top = compose_heading(canvas, area, self.source.title(), "");
            canvas.put_centered(area, top + 1, "أنهيت كل الجولات! 🎉", palette::ACCENT, Color::Reset);
            let time = format!("الوقت: {} ثانية    الأخطاء: {}", elapsed.as_secs(), self.misses);
            canvas.put_centered(area, top + 3, &time, palette::TEXT, Color::Reset);
            compose_hint(canvas, area, HINT_AGAIN);
            return;
        }

        let secs = self.started.map(|t| now.saturating_duration_since(t).as_secs()).unwrap_or(0);
        let status = format!("الجولة {} من {}    الوقت: {} ث", self.round + 1, self.rounds, secs);
        let mut row = compose_heading(canvas, area, self.source.title(), &status);
        canvas.put_centered(area, row, self.source.instruction(), palette::DIM, Color::Reset);
        row += 1;
        if let Some(banner) = &self.board.banner {
            row += 1;
            canvas.put_centered(area, row, banner, palette::ACCENT, Color::Reset);
        }
        row += 2;

        // Each cell: " XX " (4 columns), one blank row between rows.
        let cell_w = 4;
        let grid_w = self.board.cols * cell_w;
        let left = area.center_x(grid_w);
        let feedback = match self.phase {
            BoardPhase::Feedback { correct, .. } => Some(correct),
            _ => None,
        };
        for (i, symbol) in self.board.cells.iter().enumerate() {
            let (cx, cy) = (i % self.board.cols, i / self.board.cols);
            let x = left + cx * cell_w;
            let y = row + cy * 2;
            if y + 1 >= area.bottom() {
                break;
            }
            let bg = match (i == self.cursor.index, feedback) {
                (true, Some(true)) => Color::Rgb { r: 30, g: 110, b: 40 },
                (true, Some(false)) => Color::Rgb { r: 130, g: 40, b: 40 },
                (true, None) => palette::CURSOR_BG,
                _ => palette::CARD_BG,
            };
            canvas.fill(Area::new(x, y, cell_w - 1, 1), bg);
            canvas.put_str(x, y, symbol, palette::TEXT, bg);
        }

        let below = row + self.board.rows * 2;
        if let Some(correct) = feedback {
            let (msg, fg) = if correct { (MSG_CORRECT, palette::GOOD) } else { (MSG_WRONG, palette::BAD) };
            canvas.put_centered(area, below, msg, fg, Color::Reset);
        }
        compose_hint(canvas, area, HINT_BOARD);
    }
}

/// Index of the target as (col, row) moves from the top-left corner.
#[cfg(test)]
pub(crate) fn walk_to(cursor_cols: usize, target: usize) -> Vec<Action> {
    let (tx, ty) = (target % cursor_cols, target / cursor_cols);
    let mut path = vec![Action::Right; tx];
    path.extend(std::iter::repeat(Action::Down).take(ty));
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::quiz::testing::props;

    struct Corner;

    impl BoardSource for Corner {
        fn title(&self) -> &'static str { "corner" }
        fn instruction(&self) -> &'static str { "" }
        fn next_board(&mut self, _rng: &mut fastrand::Rng, _round: usize) -> Board {
            Board { cols: 3, rows: 2, cells: vec!["a"; 6], target: 5, banner: None }
        }
    }

    fn game(rounds: usize) -> BoardGame<Corner> {
        let (p, _) = props();
        BoardGame::new(Corner, p, fastrand::Rng::with_seed(1), rounds)
    }

    #[test]
    fn cursor_clamps_at_edges() {
        let mut c = GridCursor::new(3, 2);
        assert!(c.step(Action::Left));
        assert!(c.step(Action::Up));
        assert_eq!(c.index, 0);
        for _ in 0..5 {
            c.step(Action::Right);
            c.step(Action::Down);
        }
        assert_eq!(c.index, 5);
        assert!(!c.step(Action::Confirm));
    }

    #[test]
    fn wrong_pick_counts_a_miss() {
        let mut g = game(2);
        let now = Instant::now();
        let mut cues = Vec::new();
        g.on_action(Action::Confirm, now, &mut cues);
        assert_eq!(g.misses(), 1);
        assert_eq!(cues, vec![Cue::Wrong]);
        g.tick(now + Duration::from_millis(FEEDBACK_MS), &mut cues);
        assert_eq!(g.phase(), BoardPhase::Searching);
        assert_eq!(g.round(), 0);
    }

    #[test]
    fn finds_target_and_finishes() {
        let mut g = game(2);
        let start = Instant::now();
        let mut cues = Vec::new();
        for r in 0..2 {
            let now = start + Duration::from_secs(r * 3);
            for a in walk_to(3, g.board().target) {
                g.on_action(a, now, &mut cues);
            }
            g.on_action(Action::Confirm, now, &mut cues);
            g.on_action(Action::Confirm, now, &mut cues);
        }
        match g.phase() {
            BoardPhase::Finished { elapsed } => assert_eq!(elapsed, Duration::from_secs(3)),
            other => panic!("not finished: {other:?}"),
        }
        assert_eq!(cues, vec![Cue::Correct, Cue::Correct, Cue::Win]);

        g.on_action(Action::Confirm, start, &mut cues);
        assert_eq!(g.phase(), BoardPhase::Searching);
        assert_eq!(g.round(), 0);
    }
}
