/// Riddles with four answers. Riddles are dealt from a shuffled deck so
/// none repeats until all have been asked.

use super::quiz::{shuffled_options, Question, QuestionSource, QuizGame};
use crate::nav::host::LaunchProps;

struct Riddle {
    clue: &'static str,
    answer: &'static str,
    wrong: [&'static str; 3],
}

const RIDDLES: &[Riddle] = &[
    Riddle { clue: "له أسنان ولا يعض، فما هو؟", answer: "المشط", wrong: ["المفتاح", "القلم", "الكرسي"] },
    Riddle { clue: "كلما أخذت منه كبر، فما هو؟", answer: "الحفرة", wrong: ["البحر", "الكتاب", "الظل"] },
    Riddle { clue: "يمشي بلا أرجل ويبكي بلا عيون", answer: "السحاب", wrong: ["النهر", "الريح", "الساعة"] },
    Riddle { clue: "بيت بلا أبواب ولا نوافذ", answer: "البيضة", wrong: ["الخيمة", "الصندوق", "الكهف"] },
    Riddle { clue: "له عين واحدة ولا يرى", answer: "الإبرة", wrong: ["الكاميرا", "المرآة", "القمر"] },
    Riddle { clue: "يكتب ولا يقرأ", answer: "القلم", wrong: ["الدفتر", "الحاسوب", "المعلم"] },
    Riddle { clue: "شيء كلما زاد نقص", answer: "العمر", wrong: ["المال", "الماء", "الطعام"] },
    Riddle { clue: "له رقبة وليس له رأس", answer: "الزجاجة", wrong: ["القميص", "الزرافة", "الشمعة"] },
    Riddle { clue: "يسمع بلا أذن ويتكلم بلا لسان", answer: "الهاتف", wrong: ["الكتاب", "الجدار", "الباب"] },
    Riddle { clue: "يجري ولا يمشي، له فم ولا يتكلم", answer: "النهر", wrong: ["السمك", "الريح", "القطار"] },
    Riddle { clue: "له أوراق وليس بشجرة", answer: "الكتاب", wrong: ["الوردة", "النخلة", "الصحن"] },
    Riddle { clue: "يحملك وتحمله، ويقيك الحر والبرد", answer: "الحذاء", wrong: ["المظلة", "الكرسي", "السرير"] },
];

pub struct WordPuzzle {
    deck: Vec<usize>,
}

pub fn new(props: LaunchProps, rng: fastrand::Rng, rounds: usize) -> QuizGame<WordPuzzle> {
    QuizGame::new(WordPuzzle { deck: Vec::new() }, props, rng, rounds)
}

impl QuestionSource for WordPuzzle {
    fn title(&self) -> &'static str {
        "ألغاز الكلمات"
    }

    fn instruction(&self) -> &'static str {
        "فكّر جيداً واختر الجواب"
    }

    fn next_question(&mut self, rng: &mut fastrand::Rng, _round: usize) -> Question {
        if self.deck.is_empty() {
            self.deck = (0..RIDDLES.len()).collect();
            rng.shuffle(&mut self.deck);
        }
        let idx = self.deck.pop().unwrap_or(0);
        let riddle = &RIDDLES[idx];
        let wrong = riddle.wrong.iter().map(|w| w.to_string()).collect();
        let (options, answer) = shuffled_options(rng, riddle.answer.to_string(), wrong);
        Question { prompt: riddle.clue.to_string(), ink: None, options, answer }
    }
}
