/// Find the odd one out: every cell shows the same emoji except one that
/// looks almost alike. The grid grows every two rounds.

use super::board::{Board, BoardGame, BoardSource, BOARD_ROUNDS};
use crate::nav::host::LaunchProps;

/// (common, odd) look-alikes.
const PAIRS: &[(&str, &str)] = &[
    ("🍎", "🍅"),
    ("😀", "😃"),
    ("🌕", "🌝"),
    ("🐱", "🐯"),
    ("🌲", "🌳"),
    ("🔵", "🟣"),
    ("⭐", "🌟"),
    ("🍊", "🍑"),
    ("🐶", "🐺"),
    ("🌻", "🌼"),
    ("🚗", "🚕"),
    ("🙂", "🙃"),
];

const MAX_SIDE: usize = 5;

pub struct FindTheOdd;

pub fn new(props: LaunchProps, rng: fastrand::Rng) -> BoardGame<FindTheOdd> {
    BoardGame::new(FindTheOdd, props, rng, BOARD_ROUNDS)
}

/// Side length of the square grid for a 0-based round.
fn side(round: usize) -> usize {
    (3 + round / 2).min(MAX_SIDE)
}

impl BoardSource for FindTheOdd {
    fn title(&self) -> &'static str {
        "العثور على المختلف"
    }

    fn instruction(&self) -> &'static str {
        "ابحث عن الرمز المختلف عن البقية"
    }

    fn next_board(&mut self, rng: &mut fastrand::Rng, round: usize) -> Board {
        let (common, odd) = PAIRS[rng.usize(..PAIRS.len())];
        let n = side(round);
        let target = rng.usize(..n * n);
        let cells = (0..n * n).map(|i| if i == target { odd } else { common }).collect();
        Board { cols: n, rows: n, cells, target, banner: None }
    }
}
