/// Mental arithmetic. Operands grow with the round number; subtraction
/// never goes negative.

use super::quiz::{shuffled_options, Question, QuestionSource, QuizGame};
use crate::nav::host::LaunchProps;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Op {
    Add,
    Sub,
    Mul,
}

impl Op {
    fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "−",
            Op::Mul => "×",
        }
    }
}

pub struct MathChallenge;

pub fn new(props: LaunchProps, rng: fastrand::Rng, rounds: usize) -> QuizGame<MathChallenge> {
    QuizGame::new(MathChallenge, props, rng, rounds)
}

/// (a, op, b, result) for a round.
fn problem(rng: &mut fastrand::Rng, round: usize) -> (u32, Op, u32, u32) {
    let step = round as u32;
    let op = match rng.u8(0..3) {
        0 => Op::Add,
        1 => Op::Sub,
        _ => Op::Mul,
    };
    match op {
        Op::Add => {
            let hi = 10 + step * 5;
            let (a, b) = (rng.u32(1..=hi), rng.u32(1..=hi));
            (a, op, b, a + b)
        }
        Op::Sub => {
            let hi = 10 + step * 5;
            let (x, y) = (rng.u32(1..=hi), rng.u32(1..=hi));
            let (a, b) = if x >= y { (x, y) } else { (y, x) };
            (a, op, b, a - b)
        }
        Op::Mul => {
            let hi = 5 + step.min(5);
            let (a, b) = (rng.u32(2..=hi), rng.u32(2..=9));
            (a, op, b, a * b)
        }
    }
}

/// Three distinct wrong answers close to `result`, never negative.
fn distractors(rng: &mut fastrand::Rng, result: u32) -> Vec<u32> {
    let offsets: [i64; 8] = [-10, -2, -1, 1, 2, 3, 5, 10];
    let mut picks: Vec<u32> = Vec::with_capacity(3);
    let mut order = offsets.to_vec();
    rng.shuffle(&mut order);
    for off in order {
        let v = result as i64 + off;
        if v < 0 {
            continue;
        }
        let v = v as u32;
        if v != result && !picks.contains(&v) {
            picks.push(v);
        }
        if picks.len() == 3 {
            break;
        }
    }
    // Small results can exhaust the negative offsets.
    let mut extra = result + 4;
    while picks.len() < 3 {
        if !picks.contains(&extra) {
            picks.push(extra);
        }
        extra += 1;
    }
    picks
}

impl QuestionSource for MathChallenge {
    fn title(&self) -> &'static str {
        "تحدي الحساب"
    }

    fn instruction(&self) -> &'static str {
        "احسب الناتج واختر الإجابة الصحيحة"
    }

    fn next_question(&mut self, rng: &mut fastrand::Rng, round: usize) -> Question {
        let (a, op, b, result) = problem(rng, round);
        let wrong = distractors(rng, result).into_iter().map(|v| v.to_string()).collect();
        let (options, answer) = shuffled_options(rng, result.to_string(), wrong);
        Question {
            prompt: format!("{} {} {} = ؟", a, op.symbol(), b),
            ink: None,
            options,
            answer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::quiz::testing::{play_through, props};
    use crate::games::quiz::QuizPhase;

    #[test]
    fn problems_are_correct_and_non_negative() {
        let mut rng = fastrand::Rng::with_seed(42);
        for round in 0..200 {
            let (a, op, b, r) = problem(&mut rng, round % 10);
            let expected = match op {
                Op::Add => a + b,
                Op::Sub => a.checked_sub(b).expect("negative subtraction"),
                Op::Mul => a * b,
            };
            assert_eq!(r, expected);
        }
    }

    #[test]
    fn distractors_are_distinct_and_wrong() {
        let mut rng = fastrand::Rng::with_seed(1);
        for result in [0, 1, 2, 7, 50, 81] {
            let d = distractors(&mut rng, result);
            assert_eq!(d.len(), 3);
            assert!(!d.contains(&result));
            let mut u = d.clone();
            u.sort_unstable();
            u.dedup();
            assert_eq!(u.len(), 3);
        }
    }

    #[test]
    fn prompt_answer_matches_option() {
        let mut rng = fastrand::Rng::with_seed(8);
        let q = MathChallenge.next_question(&mut rng, 0);
        assert!(q.prompt.ends_with("= ؟"));
        assert!(q.options[q.answer].parse::<u32>().is_ok());
    }

    #[test]
    fn full_game() {
        let (p, _) = props();
        let mut g = new(p, fastrand::Rng::with_seed(4), 10);
        play_through(&mut g, 10);
        assert_eq!(g.phase(), QuizPhase::Finished);
        assert_eq!(g.score(), 10);
    }
}
