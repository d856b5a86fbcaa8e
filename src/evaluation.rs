// src/evaluation.rs

use std::fmt;

use crate::models::evaluation::Evaluation;
use crate::models::resource::Resource;

/// Progress of one evaluation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    InProgress,
    Submitted { passed: bool },
}

/// Errors surfaced while answering or submitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The resource carries no evaluation block.
    NoEvaluation,
    /// The operation does not apply to this evaluation type.
    WrongKind,
    /// The session already reached a final verdict.
    AlreadySubmitted,
    /// Retry is only available after a failed quiz.
    RetryUnavailable,
    QuestionOutOfRange(usize),
    OptionOutOfRange { question: usize, option: usize },
    /// Submit attempted with unanswered questions; indices are user-visible.
    Unanswered(Vec<usize>),
    /// Activity/project hand-ins need a non-blank description.
    BlankDescription,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NoEvaluation => write!(f, "no evaluation available for this resource"),
            SessionError::WrongKind => write!(f, "operation does not apply to this evaluation type"),
            SessionError::AlreadySubmitted => write!(f, "evaluation already submitted"),
            SessionError::RetryUnavailable => write!(f, "retry is only available after a failed attempt"),
            SessionError::QuestionOutOfRange(q) => write!(f, "question {} does not exist", q + 1),
            SessionError::OptionOutOfRange { question, option } => {
                write!(f, "option {} does not exist on question {}", option + 1, question + 1)
            }
            SessionError::Unanswered(indices) => {
                write!(f, "{} question(s) unanswered", indices.len())
            }
            SessionError::BlankDescription => write!(f, "please describe your work"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Per-question entry in a quiz outcome, as shown on the results screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionResult {
    pub prompt: String,
    pub selected: usize,
    pub correct: usize,
    pub is_correct: bool,
}

/// Result of a graded quiz submission.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizOutcome {
    pub correct_count: usize,
    pub total_questions: usize,
    /// Unrounded percentage; the pass decision uses this value.
    pub score: f64,
    pub passing_score: u32,
    pub passed: bool,
    pub detail: Vec<QuestionResult>,
}

impl QuizOutcome {
    /// Rounded for display only.
    pub fn display_score(&self) -> u32 {
        self.score.round() as u32
    }
}

/// Tracks a user's attempt at one resource's evaluation.
///
/// Completing a session writes nothing back to the store; reopening a
/// resource's evaluation starts a fresh session.
#[derive(Debug, Clone)]
pub struct EvaluationSession {
    evaluation: Evaluation,
    answers: Vec<Option<usize>>,
    phase: SessionPhase,
}

impl EvaluationSession {
    /// Starts a session for the given evaluation block.
    pub fn new(evaluation: Evaluation) -> Result<Self, SessionError> {
        if evaluation.is_none() {
            return Err(SessionError::NoEvaluation);
        }
        let question_count = match &evaluation {
            Evaluation::Quiz { questions, .. } => questions.len(),
            _ => 0,
        };
        Ok(Self {
            evaluation,
            answers: vec![None; question_count],
            phase: SessionPhase::NotStarted,
        })
    }

    pub fn for_resource(resource: &Resource) -> Result<Self, SessionError> {
        Self::new(resource.evaluation.clone())
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    /// Records a quiz answer. The first recorded answer moves the session out
    /// of `NotStarted`.
    pub fn record_answer(&mut self, question: usize, option: usize) -> Result<(), SessionError> {
        let Evaluation::Quiz { questions, .. } = &self.evaluation else {
            return Err(SessionError::WrongKind);
        };
        if matches!(self.phase, SessionPhase::Submitted { .. }) {
            return Err(SessionError::AlreadySubmitted);
        }
        let Some(q) = questions.get(question) else {
            return Err(SessionError::QuestionOutOfRange(question));
        };
        if option >= q.options.len() {
            return Err(SessionError::OptionOutOfRange { question, option });
        }

        self.answers[question] = Some(option);
        if self.phase == SessionPhase::NotStarted {
            self.phase = SessionPhase::InProgress;
        }
        Ok(())
    }

    /// Immediate feedback for one recorded answer: `Some(true)` when the
    /// selected option is the correct one, `None` when nothing is recorded.
    pub fn check_answer(&self, question: usize) -> Option<bool> {
        let Evaluation::Quiz { questions, .. } = &self.evaluation else {
            return None;
        };
        let selected = self.answers.get(question).copied().flatten()?;
        Some(selected == questions.get(question)?.correct_option)
    }

    /// Grades the quiz.
    ///
    /// Every question must have a recorded answer; otherwise the session stays
    /// in progress and the unanswered indices are reported. The pass decision
    /// compares the unrounded percentage against the passing score. A failing
    /// submit clears the recorded answers; `retry` reopens the session with
    /// the same questions in the same order.
    pub fn submit_quiz(&mut self) -> Result<QuizOutcome, SessionError> {
        let Evaluation::Quiz {
            questions,
            passing_score,
        } = &self.evaluation
        else {
            return Err(SessionError::WrongKind);
        };
        if matches!(self.phase, SessionPhase::Submitted { .. }) {
            return Err(SessionError::AlreadySubmitted);
        }

        let unanswered: Vec<usize> = self
            .answers
            .iter()
            .enumerate()
            .filter(|(_, answer)| answer.is_none())
            .map(|(index, _)| index)
            .collect();
        if !unanswered.is_empty() {
            return Err(SessionError::Unanswered(unanswered));
        }

        let mut detail = Vec::with_capacity(questions.len());
        for (question, answer) in questions.iter().zip(&self.answers) {
            if let Some(selected) = *answer {
                detail.push(QuestionResult {
                    prompt: question.prompt.clone(),
                    selected,
                    correct: question.correct_option,
                    is_correct: selected == question.correct_option,
                });
            }
        }

        let correct_count = detail.iter().filter(|d| d.is_correct).count();
        let total_questions = questions.len();
        let score = if total_questions == 0 {
            0.0
        } else {
            (correct_count as f64 / total_questions as f64) * 100.0
        };
        let passed = score >= f64::from(*passing_score);

        let outcome = QuizOutcome {
            correct_count,
            total_questions,
            score,
            passing_score: *passing_score,
            passed,
            detail,
        };

        self.phase = SessionPhase::Submitted { passed };
        if !passed {
            self.answers = vec![None; total_questions];
        }
        Ok(outcome)
    }

    /// Reopens a failed quiz for another attempt, preserving the question set
    /// and order.
    pub fn retry(&mut self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Submitted { passed: false } => {
                self.answers = vec![None; self.answers.len()];
                self.phase = SessionPhase::InProgress;
                Ok(())
            }
            _ => Err(SessionError::RetryUnavailable),
        }
    }

    /// Activity/project hand-in: a free-text description. There is no
    /// automatic grading; acceptance means handed off for human review.
    pub fn submit_description(&mut self, description: &str) -> Result<(), SessionError> {
        match &self.evaluation {
            Evaluation::Activity { .. } | Evaluation::Project { .. } => {
                if matches!(self.phase, SessionPhase::Submitted { .. }) {
                    return Err(SessionError::AlreadySubmitted);
                }
                if description.trim().is_empty() {
                    return Err(SessionError::BlankDescription);
                }
                self.phase = SessionPhase::Submitted { passed: true };
                Ok(())
            }
            _ => Err(SessionError::WrongKind),
        }
    }
}
