/// Pattern recognition: what comes next in the sequence?
///
/// Two kinds alternate at random:
///   - repeating symbol cycles of length 2 or 3 (🔴 🔵 🔴 🔵 …)
///   - arithmetic number sequences (3, 7, 11, 15, …)

use super::quiz::{shuffled_options, Question, QuestionSource, QuizGame};
use crate::nav::host::LaunchProps;

const SYMBOLS: [&str; 8] = ["🔴", "🔵", "🟢", "🟡", "⭐", "🌙", "🍎", "🌸"];

pub struct PatternRecognition;

pub fn new(props: LaunchProps, rng: fastrand::Rng, rounds: usize) -> QuizGame<PatternRecognition> {
    QuizGame::new(PatternRecognition, props, rng, rounds)
}

fn symbol_question(rng: &mut fastrand::Rng, round: usize) -> Question {
    let period = if round < 3 { 2 } else { rng.usize(2..=3) };
    let mut pool = SYMBOLS.to_vec();
    rng.shuffle(&mut pool);
    let cycle: Vec<&str> = pool[..period].to_vec();

    let shown = period * 2 + rng.usize(0..period);
    let seq: Vec<&str> = (0..shown).map(|i| cycle[i % period]).collect();
    let next = cycle[shown % period];

    let wrong = pool.iter().filter(|s| **s != next).take(3).map(|s| s.to_string()).collect();
    let (options, answer) = shuffled_options(rng, next.to_string(), wrong);
    Question { prompt: format!("{}  ❓", seq.join(" ")), ink: None, options, answer }
}

fn number_question(rng: &mut fastrand::Rng, round: usize) -> Question {
    let start = rng.i64(1..=10);
    let step = rng.i64(2..=(3 + round as i64).min(9));
    let seq: Vec<String> = (0..4).map(|i| (start + step * i).to_string()).collect();
    let next = start + step * 4;

    let wrong = [next + 1, next - 1, next + step]
        .iter()
        .map(|v| v.to_string())
        .collect();
    let (options, answer) = shuffled_options(rng, next.to_string(), wrong);
    Question { prompt: format!("{} ، ؟", seq.join(" ، ")), ink: None, options, answer }
}

impl QuestionSource for PatternRecognition {
    fn title(&self) -> &'static str {
        "التعرف على الأنماط"
    }

    fn instruction(&self) -> &'static str {
        "ما الذي يأتي بعد ذلك؟"
    }

    fn next_question(&mut self, rng: &mut fastrand::Rng, round: usize) -> Question {
        if rng.bool() {
            symbol_question(rng, round)
        } else {
            number_question(rng, round)
        }
    }
}
