// src/models/submission.rs

use std::fmt;

use validator::{Validate, ValidationError};

use crate::config::DEFAULT_PASSING_SCORE;
use crate::models::resource::ContentType;

/// Evaluation variant selected on the submission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvaluationKind {
    #[default]
    None,
    Quiz,
    Activity,
    Project,
}

/// Metadata for a file chosen in the upload form. The crate never touches the
/// file contents; only name, MIME type and size matter for validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    pub mime: String,
    pub size: u64,
}

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Outcome of a draft validation pass: field-level messages plus form-level
/// ones, mirroring how the form surfaces them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub field_errors: Vec<FieldError>,
    pub global_errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty() && self.global_errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.field_errors.len() + self.global_errors.len()
    }

    pub(crate) fn field(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub(crate) fn global(&mut self, message: impl Into<String>) {
        self.global_errors.push(message.into());
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self
            .field_errors
            .iter()
            .map(|e| e.message.as_str())
            .chain(self.global_errors.iter().map(String::as_str))
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Raw form input for a new resource. Interactive lists (competencies,
/// materials, requirements, quiz questions) and the selected file live on the
/// form controller, not here.
#[derive(Debug, Clone, Default, Validate)]
pub struct ResourceDraft {
    #[validate(custom(function = validate_not_blank))]
    pub title: String,
    #[validate(custom(function = validate_not_blank))]
    pub author: String,
    #[validate(custom(function = validate_not_blank))]
    pub faculty: String,
    pub program: String,
    #[validate(custom(function = validate_not_blank))]
    pub level: String,
    #[validate(custom(function = validate_not_blank))]
    pub objective_description: String,
    #[validate(custom(function = validate_not_blank))]
    pub student_guide: String,
    #[validate(custom(function = validate_not_blank))]
    pub duration: String,

    /// Required in both validation tiers; `None` until the user picks one.
    pub content_kind: Option<ContentType>,
    pub content_url: String,
    pub content_format: String,
    pub thumbnail: String,
    pub embed_markup: String,

    pub teacher_guide: String,
    pub estimated_time: String,
    /// Comma-separated, split like tags.
    pub prerequisites_input: String,
    /// Comma-separated.
    pub tags_input: String,

    pub featured: bool,
    pub public: bool,

    pub evaluation_kind: EvaluationKind,
    pub evaluation_description: String,
    pub passing_score_input: String,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Splits comma-separated input: trim, drop empties, dedup preserving first
/// occurrence order.
pub fn parse_tag_list(input: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for raw in input.split(',') {
        let tag = raw.trim();
        if tag.is_empty() || seen.iter().any(|s| s == tag) {
            continue;
        }
        seen.push(tag.to_string());
    }
    seen
}

/// Passing score from the form input. Unparsable or zero values fall back to
/// the default.
pub fn parse_passing_score(input: &str) -> u32 {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|score| *score > 0)
        .unwrap_or(DEFAULT_PASSING_SCORE)
}
