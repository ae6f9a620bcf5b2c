/// Word scramble: the letters of a word are shuffled; pick the word.

use super::quiz::{shuffled_options, Question, QuestionSource, QuizGame};
use crate::nav::host::LaunchProps;

const WORDS: &[&str] = &[
    "كتاب", "مدرسة", "شمس", "قمر", "بحر", "شجرة", "سيارة", "قلم",
    "بيت", "حديقة", "نافذة", "طائرة", "مفتاح", "برتقال", "قهوة", "صديق",
    "مسجد", "سوق", "جبل", "نهر", "وردة", "خبز", "ساعة", "هاتف",
];

pub struct WordScramble {
    recent: Vec<&'static str>,
}

pub fn new(props: LaunchProps, rng: fastrand::Rng, rounds: usize) -> QuizGame<WordScramble> {
    QuizGame::new(WordScramble { recent: Vec::new() }, props, rng, rounds)
}

/// Shuffle letters until the order differs from the word, spaced for reading.
pub fn scramble(rng: &mut fastrand::Rng, word: &str) -> String {
    let original: Vec<char> = word.chars().collect();
    let mut letters = original.clone();
    let distinct = {
        let mut d = original.clone();
        d.sort_unstable();
        d.dedup();
        d.len()
    };
    if distinct > 1 {
        while letters == original {
            rng.shuffle(&mut letters);
        }
    }
    letters.iter().map(char::to_string).collect::<Vec<_>>().join(" ")
}

impl QuestionSource for WordScramble {
    fn title(&self) -> &'static str {
        "تخمين الكلمات"
    }

    fn instruction(&self) -> &'static str {
        "رتّب الحروف: ما هي الكلمة؟"
    }

    fn next_question(&mut self, rng: &mut fastrand::Rng, _round: usize) -> Question {
        let fresh: Vec<&'static str> =
            WORDS.iter().copied().filter(|w| !self.recent.contains(w)).collect();
        let word = fresh[rng.usize(..fresh.len())];
        self.recent.push(word);
        if self.recent.len() > WORDS.len() / 2 {
            self.recent.remove(0);
        }

        let mut others: Vec<&'static str> = WORDS.iter().copied().filter(|w| *w != word).collect();
        rng.shuffle(&mut others);
        let distractors = others.into_iter().take(3).map(String::from).collect();
        let (options, answer) = shuffled_options(rng, word.to_string(), distractors);

        Question { prompt: scramble(rng, word), ink: None, options, answer }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::quiz::testing::{play_through, props};
    use crate::games::quiz::QuizPhase;

    #[test]
    fn scramble_keeps_letters_and_changes_order() {
        let mut rng = fastrand::Rng::with_seed(11);
        for word in WORDS {
            let s = scramble(&mut rng, word);
            let joined: String = s.split(' ').collect();
            assert_ne!(joined, *word);
            let mut a: Vec<char> = joined.chars().collect();
            let mut b: Vec<char> = word.chars().collect();
            a.sort_unstable();
            b.sort_unstable();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn answer_is_the_scrambled_word() {
        let mut src = WordScramble { recent: Vec::new() };
        let mut rng = fastrand::Rng::with_seed(5);
        for round in 0..20 {
            let q = src.next_question(&mut rng, round);
            let joined: String = q.prompt.split(' ').collect();
            let mut a: Vec<char> = joined.chars().collect();
            let mut b: Vec<char> = q.options[q.answer].chars().collect();
            a.sort_unstable();
            b.sort_unstable();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn no_immediate_repeats() {
        let mut src = WordScramble { recent: Vec::new() };
        let mut rng = fastrand::Rng::with_seed(9);
        let mut last = String::new();
        for round in 0..30 {
            let q = src.next_question(&mut rng, round);
            let word = q.options[q.answer].clone();
            assert_ne!(word, last);
            last = word;
        }
    }

    #[test]
    fn full_game() {
        let (p, _) = props();
        let mut g = new(p, fastrand::Rng::with_seed(2), 5);
        play_through(&mut g, 5);
        assert_eq!(g.phase(), QuizPhase::Finished);
        assert_eq!(g.score(), 5);
    }
}
