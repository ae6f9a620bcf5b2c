/// Stroop test: a colour name printed in a different ink. Pick the ink.

use crossterm::style::Color;

use super::quiz::{Question, QuestionSource, QuizGame};
use crate::nav::host::LaunchProps;

const COLOURS: [(&str, Color); 4] = [
    ("أحمر", Color::Rgb { r: 235, g: 60, b: 50 }),
    ("أزرق", Color::Rgb { r: 70, g: 130, b: 255 }),
    ("أخضر", Color::Rgb { r: 60, g: 200, b: 80 }),
    ("أصفر", Color::Rgb { r: 250, g: 220, b: 40 }),
];

pub struct Stroop;

pub fn new(props: LaunchProps, rng: fastrand::Rng, rounds: usize) -> QuizGame<Stroop> {
    QuizGame::new(Stroop, props, rng, rounds)
}

impl QuestionSource for Stroop {
    fn title(&self) -> &'static str {
        "اختبار ستروب"
    }

    fn instruction(&self) -> &'static str {
        "ما هو لون الحبر؟ (وليس الكلمة المكتوبة)"
    }

    fn next_question(&mut self, rng: &mut fastrand::Rng, _round: usize) -> Question {
        let word = rng.usize(..COLOURS.len());
        // Ink always conflicts with the word.
        let ink = (word + rng.usize(1..COLOURS.len())) % COLOURS.len();
        Question {
            prompt: COLOURS[word].0.to_string(),
            ink: Some(COLOURS[ink].1),
            options: COLOURS.iter().map(|(name, _)| name.to_string()).collect(),
            answer: ink,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::quiz::testing::{play_through, props};
    use crate::games::quiz::QuizPhase;

    #[test]
    fn ink_never_matches_the_word() {
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..100 {
            let q = Stroop.next_question(&mut rng, 0);
            let word_idx = COLOURS.iter().position(|(n, _)| *n == q.prompt).unwrap();
            assert_ne!(word_idx, q.answer);
            assert_eq!(q.ink, Some(COLOURS[q.answer].1));
        }
    }

    #[test]
    fn full_game() {
        let (p, _) = props();
        let mut g = new(p, fastrand::Rng::with_seed(6), 4);
        play_through(&mut g, 4);
        assert_eq!(g.phase(), QuizPhase::Finished);
    }
}
