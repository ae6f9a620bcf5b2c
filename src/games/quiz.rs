/// Round engine shared by the four-option games.
///
/// A `QuestionSource` produces questions; `QuizGame` runs the rounds:
///   Asking → (answer) → Feedback → next round … → Finished
///
/// A wrong answer shows feedback and asks the same question again, so each
/// round ends on the right answer. Only first-try answers score.

use std::time::{Duration, Instant};

use crossterm::style::Color;

use super::{
    compose_heading, compose_hint, compose_options, push_cue, FEEDBACK_MS, HINT_AGAIN,
    HINT_CHOICE, MSG_CORRECT, MSG_WRONG,
};
use crate::nav::event::Action;
use crate::nav::host::{LaunchProps, MiniGame};
use crate::nav::sound::Cue;
use crate::ui::canvas::{palette, Area, Canvas};

#[derive(Clone, Debug, PartialEq)]
pub struct Question {
    /// Main prompt, drawn large and centred.
    pub prompt: String,
    /// Ink for the prompt (Stroop). `None` uses the default text colour.
    pub ink: Option<Color>,
    pub options: Vec<String>,
    pub answer: usize,
}

pub trait QuestionSource {
    fn title(&self) -> &'static str;
    /// One-line instruction shown above the prompt.
    fn instruction(&self) -> &'static str;
    /// `round` is 0-based; sources may scale difficulty with it.
    fn next_question(&mut self, rng: &mut fastrand::Rng, round: usize) -> Question;
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum QuizPhase {
    Asking,
    Feedback { chosen: usize, correct: bool, until: Instant },
    Finished,
}

pub struct QuizGame<S: QuestionSource> {
    source: S,
    props: LaunchProps,
    rng: fastrand::Rng,
    rounds: usize,
    round: usize,
    score: usize,
    missed_this_round: bool,
    cursor: usize,
    question: Question,
    phase: QuizPhase,
}

impl<S: QuestionSource> QuizGame<S> {
    pub fn new(mut source: S, props: LaunchProps, mut rng: fastrand::Rng, rounds: usize) -> Self {
        let rounds = rounds.max(1);
        let question = source.next_question(&mut rng, 0);
        QuizGame {
            source,
            props,
            rng,
            rounds,
            round: 0,
            score: 0,
            missed_this_round: false,
            cursor: 0,
            question,
            phase: QuizPhase::Asking,
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[cfg(test)]
    pub fn score(&self) -> usize {
        self.score
    }

    #[cfg(test)]
    pub fn round(&self) -> usize {
        self.round
    }

    #[cfg(test)]
    pub fn question(&self) -> &Question {
        &self.question
    }

    fn restart(&mut self) {
        self.round = 0;
        self.score = 0;
        self.missed_this_round = false;
        self.cursor = 0;
        self.question = self.source.next_question(&mut self.rng, 0);
        self.phase = QuizPhase::Asking;
    }

    fn answer(&mut self, chosen: usize, now: Instant, cues: &mut Vec<Cue>) {
        if chosen >= self.question.options.len() {
            return;
        }
        self.cursor = chosen;
        let correct = chosen == self.question.answer;
        if correct {
            if !self.missed_this_round {
                self.score += 1;
            }
            push_cue(self.props.is_muted, cues, Cue::Correct);
        } else {
            self.missed_this_round = true;
            push_cue(self.props.is_muted, cues, Cue::Wrong);
        }
        let until = now + Duration::from_millis(FEEDBACK_MS);
        self.phase = QuizPhase::Feedback { chosen, correct, until };
    }

    /// Leave the feedback screen.
    fn advance(&mut self, cues: &mut Vec<Cue>) {
        let QuizPhase::Feedback { correct, .. } = self.phase else {
            return;
        };
        if !correct {
            self.phase = QuizPhase::Asking;
            return;
        }

        self.round += 1;
        self.missed_this_round = false;
        self.cursor = 0;
        if self.round >= self.rounds {
            self.phase = QuizPhase::Finished;
            push_cue(self.props.is_muted, cues, Cue::Win);
        } else {
            self.question = self.source.next_question(&mut self.rng, self.round);
            self.phase = QuizPhase::Asking;
        }
    }
}

impl<S: QuestionSource> MiniGame for QuizGame<S> {
    fn on_action(&mut self, action: Action, now: Instant, cues: &mut Vec<Cue>) {
        if action == Action::Back {
            self.props.on_back_to_menu.fire();
            return;
        }

        match self.phase {
            QuizPhase::Asking => {
                let n = self.question.options.len();
                match action {
                    Action::Up | Action::Left => self.cursor = (self.cursor + n - 1) % n,
                    Action::Down | Action::Right => self.cursor = (self.cursor + 1) % n,
                    Action::Confirm => self.answer(self.cursor, now, cues),
                    other => {
                        if let Some(idx) = other.pick_index() {
                            self.answer(idx, now, cues);
                        }
                    }
                }
            }
            QuizPhase::Feedback { .. } => {
                if action == Action::Confirm {
                    self.advance(cues);
                }
            }
            QuizPhase::Finished => {
                if action == Action::Confirm {
                    self.restart();
                }
            }
        }
    }

    fn tick(&mut self, now: Instant, cues: &mut Vec<Cue>) {
        if let QuizPhase::Feedback { until, .. } = self.phase {
            if now >= until {
                self.advance(cues);
            }
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.props.is_muted = muted;
    }

    fn compose(&self, canvas: &mut Canvas, area: Area, _now: Instant) {
        if self.phase == QuizPhase::Finished {
            let top = compose_heading(canvas, area, self.source.title(), "");
            canvas.put_centered(area, top + 1, "انتهت اللعبة! 🎉", palette::ACCENT, Color::Reset);
            let result = format!("نتيجتك {} من {}", self.score, self.rounds);
            canvas.put_centered(area, top + 3, &result, palette::TEXT, Color::Reset);
            compose_hint(canvas, area, HINT_AGAIN);
            return;
        }

        let status = format!(
            "السؤال {} من {}    النقاط: {}",
            self.round + 1,
            self.rounds,
            self.score
        );
        let mut row = compose_heading(canvas, area, self.source.title(), &status);
        canvas.put_centered(area, row, self.source.instruction(), palette::DIM, Color::Reset);
        row += 2;
        let ink = self.question.ink.unwrap_or(palette::TEXT);
        canvas.put_centered(area, row, &self.question.prompt, ink, Color::Reset);
        row += 2;

        let feedback = match self.phase {
            QuizPhase::Feedback { chosen, correct, .. } => Some((chosen, correct)),
            _ => None,
        };
        let marks = |i: usize| match feedback {
            Some((chosen, true)) if i == chosen => Some(palette::GOOD),
            Some((chosen, false)) if i == chosen => Some(palette::BAD),
            _ => None,
        };
        row = compose_options(canvas, area, row, &self.question.options, self.cursor, &marks);

        if let Some((_, correct)) = feedback {
            let (msg, fg) = if correct { (MSG_CORRECT, palette::GOOD) } else { (MSG_WRONG, palette::BAD) };
            canvas.put_centered(area, row + 1, msg, fg, Color::Reset);
        }
        compose_hint(canvas, area, HINT_CHOICE);
    }
}

/// Shuffle `correct` in among `distractors`. Returns (options, answer index).
pub fn shuffled_options(
    rng: &mut fastrand::Rng,
    correct: String,
    distractors: Vec<String>,
) -> (Vec<String>, usize) {
    let mut options = distractors;
    options.push(correct.clone());
    rng.shuffle(&mut options);
    let answer = options.iter().position(|o| *o == correct).unwrap_or(0);
    (options, answer)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::nav::host::BackToMenu;

    /// Always asks "2": options 1..4, answer index 1.
    pub struct Fixed;

    impl QuestionSource for Fixed {
        fn title(&self) -> &'static str { "fixed" }
        fn instruction(&self) -> &'static str { "" }
        fn next_question(&mut self, _rng: &mut fastrand::Rng, _round: usize) -> Question {
            Question {
                prompt: "2".into(),
                ink: None,
                options: vec!["1".into(), "2".into(), "3".into(), "4".into()],
                answer: 1,
            }
        }
    }

    pub fn props() -> (LaunchProps, BackToMenu) {
        let exit = BackToMenu::new();
        let props = LaunchProps { on_back_to_menu: exit.clone(), is_muted: false, difficulty: None };
        (props, exit)
    }

    /// Answer every remaining round correctly and assert the question stays valid.
    pub fn play_through<S: QuestionSource>(game: &mut QuizGame<S>, rounds: usize) {
        let mut now = Instant::now();
        let mut cues = Vec::new();
        for _ in 0..rounds {
            let q = game.question().clone();
            assert!(q.answer < q.options.len());
            assert_eq!(q.options.len(), 4, "options: {:?}", q.options);
            let mut unique = q.options.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), 4, "duplicate options: {:?}", q.options);
            game.on_action(Action::Pick(q.answer as u8 + 1), now, &mut cues);
            now += Duration::from_millis(FEEDBACK_MS + 1);
            game.tick(now, &mut cues);
        }
    }
}
