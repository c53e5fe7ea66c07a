//! Quiz session state machine.
//!
//! Holds the current question and drives the two-stage submit protocol:
//! a first-stage action answer, then — when the tag encodes a numeric
//! threshold and the first stage was correct — a follow-up sizing answer.
//! At most one follow-up is outstanding at any time, and it is dropped
//! unconditionally whenever a new question starts.

use log::debug;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::range::judge::{Judge, Verdict};
use crate::range::table::RangeTable;

use super::followup::{maybe_create_followup, FollowupContext, FOLLOWUP_CHOICES, FOLLOWUP_PROMPT};
use super::generator::{Difficulty, Kind, Question, QuestionGenerator};

/// Engine lifecycle errors. User-input problems are not errors: they come
/// back as rejected-input [`SubmitOutcome`]s that leave state unchanged.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A question was requested before any difficulty was selected.
    #[error("difficulty is not set")]
    DifficultyNotSet,
}

/// Observable engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No difficulty selected, no question in flight.
    Idle,
    /// A question is posed and waiting for its first-stage answer.
    AwaitingFirstAnswer,
    /// The first stage was correct and a sizing follow-up is pending.
    AwaitingFollowupAnswer,
    /// The question is fully graded.
    Resolved,
}

/// What the caller should show after a submit.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    /// Message for the user.
    pub text: String,
    /// Final correctness; `None` while grading is not finished
    /// (follow-up just opened, or input was rejected).
    pub is_correct: Option<bool>,
    /// Numeric choices to offer, when a follow-up is (still) pending.
    pub followup_choices: Option<Vec<f64>>,
    /// Prompt for the follow-up round.
    pub followup_prompt: Option<String>,
    /// The stage-1 verdict, kept available through the follow-up round so
    /// the range popup can always render.
    pub verdict: Option<Verdict>,
}

impl SubmitOutcome {
    fn rejected(text: String, verdict: Option<Verdict>) -> Self {
        Self {
            text,
            is_correct: None,
            followup_choices: None,
            followup_prompt: None,
            verdict,
        }
    }
}

/// Per-session quiz driver. Sessions are independent: each one owns its
/// engine, while the range table is shared by reference.
pub struct QuestionEngine<'a> {
    table: &'a RangeTable,
    generator: QuestionGenerator,
    rng: StdRng,
    difficulty: Option<Difficulty>,
    question: Option<Question>,
    pending_followup: Option<FollowupContext>,
    last_verdict: Option<Verdict>,
}

impl<'a> QuestionEngine<'a> {
    /// Create an engine over a loaded table with an explicit RNG.
    pub fn new(table: &'a RangeTable, generator: QuestionGenerator, rng: StdRng) -> Self {
        Self {
            table,
            generator,
            rng,
            difficulty: None,
            question: None,
            pending_followup: None,
            last_verdict: None,
        }
    }

    /// Current state, derived from what is in flight.
    pub fn state(&self) -> EngineState {
        if self.pending_followup.is_some() {
            EngineState::AwaitingFollowupAnswer
        } else if self.question.is_some() {
            if self.last_verdict.is_some() {
                EngineState::Resolved
            } else {
                EngineState::AwaitingFirstAnswer
            }
        } else {
            EngineState::Idle
        }
    }

    /// The question currently posed, if any.
    pub fn current_question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    /// Select a difficulty and pose the first question.
    pub fn start(&mut self, difficulty: Difficulty) -> Question {
        self.difficulty = Some(difficulty);
        self.pending_followup = None;
        self.last_verdict = None;
        self.next_question_inner()
    }

    /// Pose a fresh question. Any pending follow-up is dropped, never
    /// resumed later.
    pub fn new_question(&mut self) -> Result<Question, EngineError> {
        if self.difficulty.is_none() {
            return Err(EngineError::DifficultyNotSet);
        }
        self.pending_followup = None;
        self.last_verdict = None;
        Ok(self.next_question_inner())
    }

    fn next_question_inner(&mut self) -> Question {
        // difficulty checked by callers
        let difficulty = self.difficulty.unwrap_or(Difficulty::Beginner);
        let q = self.generator.generate(&mut self.rng, difficulty);
        debug!(
            "new question kind={:?} pos={} hand={}",
            q.kind, q.position, q.hand_key
        );
        self.question = Some(q.clone());
        q
    }

    /// Submit an answer for the current stage.
    pub fn submit(&mut self, user_action: &str) -> SubmitOutcome {
        let ua_raw = user_action.trim().to_ascii_uppercase();

        if self.pending_followup.is_some() {
            return self.grade_followup(&ua_raw);
        }
        self.grade_first_stage(&ua_raw)
    }

    fn grade_followup(&mut self, ua_raw: &str) -> SubmitOutcome {
        // checked by the caller
        let Some(followup) = self.pending_followup.clone() else {
            return SubmitOutcome::rejected("no follow-up pending".to_string(), None);
        };

        let chosen: f64 = match ua_raw.parse() {
            Ok(v) => v,
            Err(_) => {
                debug!("follow-up parse failure input={:?}", ua_raw);
                // Not a state change: the follow-up stays pending
                return SubmitOutcome {
                    text: format!(
                        "Pick a numeric option (2 / 2.25 / 2.5 / 3). Input={}",
                        ua_raw
                    ),
                    is_correct: None,
                    followup_choices: Some(FOLLOWUP_CHOICES.to_vec()),
                    followup_prompt: Some(FOLLOWUP_PROMPT.to_string()),
                    verdict: self.last_verdict.clone(),
                };
            }
        };

        let expected = followup.expected_max_bb;
        let ok = (chosen - expected).abs() < 1e-9;
        debug!(
            "follow-up graded chosen={} expected={} ok={}",
            chosen, expected, ok
        );

        // A follow-up ends on any answer, correct or not
        self.pending_followup = None;

        let text = if ok {
            format!("Correct: call up to {}BB (tag: {})", expected, followup.source_tag)
        } else {
            format!(
                "Incorrect: the answer is {}BB (you said {}BB, tag: {})",
                expected, chosen, followup.source_tag
            )
        };

        SubmitOutcome {
            text,
            is_correct: Some(ok),
            followup_choices: None,
            followup_prompt: None,
            verdict: self.last_verdict.clone(),
        }
    }

    fn grade_first_stage(&mut self, ua_raw: &str) -> SubmitOutcome {
        let Some(question) = self.question.clone() else {
            return SubmitOutcome::rejected(
                "Select a difficulty first (Beginner / Intermediate / Advanced)".to_string(),
                None,
            );
        };

        if !question.kind.allowed_actions().contains(&ua_raw) {
            return SubmitOutcome::rejected(format!("Invalid action: {}", ua_raw), None);
        }

        let judge = Judge::new(self.table);
        let verdict = match question.kind {
            Kind::Or => judge.judge_or(
                &question.position,
                &question.hand_key,
                ua_raw,
                question.loose_player_exists,
            ),
            Kind::OrSb => judge.judge_or_sb(&question.hand_key, ua_raw),
            Kind::ThreeBet => judge.judge_3bet(&question.position, &question.hand_key, ua_raw),
            Kind::Rol => judge.judge_rol(
                &question.position,
                &question.hand_key,
                ua_raw,
                question.loose_player_exists,
            ),
        };

        if !verdict.correct {
            debug!("incorrect answer debug={:?}", verdict.debug);
        }

        self.last_verdict = Some(verdict.clone());

        self.pending_followup = maybe_create_followup(
            question.kind,
            &verdict.debug.tag,
            verdict.expected.action,
            &question.hand_key,
            verdict.correct,
        );

        if self.pending_followup.is_some() {
            return SubmitOutcome {
                text: format!("Correct ({}). {}", verdict.action, FOLLOWUP_PROMPT),
                is_correct: None,
                followup_choices: Some(FOLLOWUP_CHOICES.to_vec()),
                followup_prompt: Some(FOLLOWUP_PROMPT.to_string()),
                verdict: Some(verdict),
            };
        }

        let text = if verdict.correct {
            "Correct!".to_string()
        } else {
            format!("Incorrect... {}", verdict.reason)
        };

        SubmitOutcome {
            text,
            is_correct: Some(verdict.correct),
            followup_choices: None,
            followup_prompt: None,
            verdict: Some(verdict),
        }
    }
}
