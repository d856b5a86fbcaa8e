// src/models/evaluation.rs

use serde::{Deserialize, Serialize};

/// One multiple-choice quiz question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    #[serde(rename = "pregunta")]
    pub prompt: String,

    /// Answer options, at least two for a well-formed question.
    #[serde(rename = "opciones")]
    pub options: Vec<String>,

    /// Index into `options`.
    #[serde(rename = "respuesta_correcta")]
    pub correct_option: usize,
}

impl QuizQuestion {
    /// A freshly added question: empty prompt, four empty options, first
    /// option marked correct.
    pub fn blank() -> Self {
        Self {
            prompt: String::new(),
            options: vec![String::new(); 4],
            correct_option: 0,
        }
    }

    /// Structural problems that make the question unusable for grading.
    pub fn structural_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.prompt.trim().is_empty() {
            errors.push("question prompt is required".to_string());
        }
        let filled_options = self.options.iter().filter(|o| !o.trim().is_empty()).count();
        if filled_options < 2 {
            errors.push("at least 2 answer options are required".to_string());
        }
        if self.correct_option >= self.options.len() {
            errors.push("correct answer index is out of range".to_string());
        }
        errors
    }
}

/// Evaluation block attached to a resource.
///
/// Tagged union over the wire field `tipo`; adding a new evaluation type is a
/// compile-time-checked extension point for every consumer that matches on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo")]
pub enum Evaluation {
    #[default]
    #[serde(rename = "ninguna")]
    None,

    #[serde(rename = "cuestionario")]
    Quiz {
        #[serde(rename = "preguntas")]
        questions: Vec<QuizQuestion>,
        /// Integer percent required to pass.
        #[serde(rename = "puntaje_aprobacion")]
        passing_score: u32,
    },

    #[serde(rename = "actividad")]
    Activity {
        #[serde(rename = "descripcion")]
        description: String,
        #[serde(rename = "puntaje_aprobacion")]
        passing_score: u32,
    },

    #[serde(rename = "proyecto")]
    Project {
        #[serde(rename = "descripcion")]
        description: String,
        #[serde(rename = "puntaje_aprobacion")]
        passing_score: u32,
        #[serde(rename = "requisitos", default)]
        requirements: Vec<String>,
    },
}

impl Evaluation {
    pub fn is_none(&self) -> bool {
        matches!(self, Evaluation::None)
    }

    /// Wire tag, also used as the display label.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Evaluation::None => "ninguna",
            Evaluation::Quiz { .. } => "cuestionario",
            Evaluation::Activity { .. } => "actividad",
            Evaluation::Project { .. } => "proyecto",
        }
    }

    pub fn passing_score(&self) -> Option<u32> {
        match self {
            Evaluation::None => None,
            Evaluation::Quiz { passing_score, .. }
            | Evaluation::Activity { passing_score, .. }
            | Evaluation::Project { passing_score, .. } => Some(*passing_score),
        }
    }
}
