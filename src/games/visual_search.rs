/// Visual search: the target emoji is shown above a crowded grid; find it.

use super::board::{Board, BoardGame, BoardSource, BOARD_ROUNDS};
use crate::nav::host::LaunchProps;

const POOL: &[&str] = &[
    "🍎", "🍌", "🍇", "🍓", "🍒", "🍍", "🥝", "🍋", "🍉", "🥕", "🌽", "🍄", "🌸", "🌙", "⭐",
    "🐟", "🐢", "🦋", "🐝", "🎈",
];

pub struct VisualSearch;

pub fn new(props: LaunchProps, rng: fastrand::Rng) -> BoardGame<VisualSearch> {
    BoardGame::new(VisualSearch, props, rng, BOARD_ROUNDS)
}

fn dims(round: usize) -> (usize, usize) {
    ((4 + round / 3).min(6), (3 + round / 4).min(4))
}

impl BoardSource for VisualSearch {
    fn title(&self) -> &'static str {
        "البحث البصري"
    }

    fn instruction(&self) -> &'static str {
        "ابحث عن الرمز المطلوب بأسرع ما يمكن"
    }

    fn next_board(&mut self, rng: &mut fastrand::Rng, round: usize) -> Board {
        let target_symbol = POOL[rng.usize(..POOL.len())];
        let others: Vec<&'static str> = POOL.iter().copied().filter(|s| *s != target_symbol).collect();
        let (cols, rows) = dims(round);
        let target = rng.usize(..cols * rows);
        let cells = (0..cols * rows)
            .map(|i| if i == target { target_symbol } else { others[rng.usize(..others.len())] })
            .collect();
        Board {
            cols,
            rows,
            cells,
            target,
            banner: Some(format!("ابحث عن: {}", target_symbol)),
        }
    }
}
