// src/submission.rs

use std::sync::Arc;

use chrono::Local;
use validator::Validate;

use crate::config::MAX_UPLOAD_BYTES;
use crate::error::AppError;
use crate::models::evaluation::{Evaluation, QuizQuestion};
use crate::models::resource::{
    Content, ContentType, Implementation, Objective, Resource, Usage,
};
use crate::models::submission::{
    EvaluationKind, FileMeta, ResourceDraft, ValidationReport, parse_passing_score,
    parse_tag_list,
};
use crate::session::{SessionSlots, UpdateNotifier};
use crate::store::LocalCache;
use crate::utils::html::clean_embed_markup;
use crate::utils::id::generate_resource_id;

/// MIME types accepted for uploaded files.
const ALLOWED_MIME_TYPES: [&str; 8] = [
    "video/mp4",
    "application/pdf",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "image/jpeg",
    "image/png",
];

/// Submission form controller.
///
/// Holds the interactive lists (competencies, materials, project
/// requirements, quiz questions) and the selected file while the user fills
/// the draft, validates in two tiers (preview vs. publish), and appends the
/// assembled resource to the local submission cache.
pub struct SubmissionForm {
    cache: LocalCache,
    notifier: UpdateNotifier,
    session: Arc<SessionSlots>,
    competencies: Vec<String>,
    materials: Vec<String>,
    requirements: Vec<String>,
    questions: Vec<QuizQuestion>,
    selected_file: Option<FileMeta>,
}

impl SubmissionForm {
    pub fn new(cache: LocalCache, notifier: UpdateNotifier, session: Arc<SessionSlots>) -> Self {
        Self {
            cache,
            notifier,
            session,
            competencies: Vec::new(),
            materials: Vec::new(),
            requirements: Vec::new(),
            questions: Vec::new(),
            selected_file: None,
        }
    }

    pub fn competencies(&self) -> &[String] {
        &self.competencies
    }

    pub fn materials(&self) -> &[String] {
        &self.materials
    }

    pub fn requirements(&self) -> &[String] {
        &self.requirements
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn selected_file(&self) -> Option<&FileMeta> {
        self.selected_file.as_ref()
    }

    fn add_unique(list: &mut Vec<String>, value: &str, what: &str) -> Result<(), AppError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(AppError::Validation(format!("{what} must not be blank")));
        }
        if list.iter().any(|existing| existing == value) {
            return Err(AppError::Conflict(format!("this {what} was already added")));
        }
        list.push(value.to_string());
        Ok(())
    }

    fn remove_at(list: &mut Vec<String>, index: usize) {
        if index < list.len() {
            list.remove(index);
        }
    }

    /// Duplicates are rejected with an inline error, not silently ignored.
    pub fn add_competency(&mut self, value: &str) -> Result<(), AppError> {
        Self::add_unique(&mut self.competencies, value, "competency")
    }

    pub fn remove_competency(&mut self, index: usize) {
        Self::remove_at(&mut self.competencies, index);
    }

    pub fn add_material(&mut self, value: &str) -> Result<(), AppError> {
        Self::add_unique(&mut self.materials, value, "material")
    }

    pub fn remove_material(&mut self, index: usize) {
        Self::remove_at(&mut self.materials, index);
    }

    pub fn add_requirement(&mut self, value: &str) -> Result<(), AppError> {
        Self::add_unique(&mut self.requirements, value, "requirement")
    }

    pub fn remove_requirement(&mut self, index: usize) {
        Self::remove_at(&mut self.requirements, index);
    }

    /// New questions start blank with four options; returns the index.
    pub fn add_question(&mut self) -> usize {
        self.questions.push(QuizQuestion::blank());
        self.questions.len() - 1
    }

    pub fn remove_question(&mut self, index: usize) {
        if index < self.questions.len() {
            self.questions.remove(index);
        }
    }

    pub fn set_question_prompt(&mut self, index: usize, prompt: &str) -> Result<(), AppError> {
        let question = self.question_mut(index)?;
        question.prompt = prompt.to_string();
        Ok(())
    }

    pub fn set_question_option(
        &mut self,
        index: usize,
        option: usize,
        text: &str,
    ) -> Result<(), AppError> {
        let question = self.question_mut(index)?;
        let Some(slot) = question.options.get_mut(option) else {
            return Err(AppError::NotFound(format!(
                "question {} has no option {}",
                index + 1,
                option + 1
            )));
        };
        *slot = text.to_string();
        Ok(())
    }

    pub fn set_correct_option(&mut self, index: usize, option: usize) -> Result<(), AppError> {
        let question = self.question_mut(index)?;
        if option >= question.options.len() {
            return Err(AppError::NotFound(format!(
                "question {} has no option {}",
                index + 1,
                option + 1
            )));
        }
        question.correct_option = option;
        Ok(())
    }

    fn question_mut(&mut self, index: usize) -> Result<&mut QuizQuestion, AppError> {
        self.questions
            .get_mut(index)
            .ok_or_else(|| AppError::NotFound(format!("question {} does not exist", index + 1)))
    }

    /// Validates and records a chosen file. A rejected file produces a single
    /// form-level error and leaves the current selection untouched.
    pub fn attach_file(&mut self, file: FileMeta) -> Result<(), AppError> {
        if !ALLOWED_MIME_TYPES.contains(&file.mime.as_str()) {
            return Err(AppError::Validation(
                "File type not allowed. Use MP4, PDF, PPT, DOC, JPG or PNG.".to_string(),
            ));
        }
        if file.size > MAX_UPLOAD_BYTES {
            return Err(AppError::Validation(
                "File is too large. Maximum size: 100MB.".to_string(),
            ));
        }
        self.selected_file = Some(file);
        Ok(())
    }

    pub fn clear_file(&mut self) {
        self.selected_file = None;
    }

    /// Two-tier validation.
    ///
    /// Preview keeps the relaxed rules (1+ competency, 1+ tag, no content
    /// URL/file requirement); publish requires 2+ competencies, 2+ tags and
    /// either a content URL or a selected file.
    pub fn validate(&self, draft: &ResourceDraft, for_preview: bool) -> ValidationReport {
        let mut report = ValidationReport::default();

        if let Err(errors) = draft.validate() {
            for field in errors.field_errors().keys() {
                let name: &str = field.as_ref();
                report.field(name, format!("{name} is required"));
            }
        }
        if draft.content_kind.is_none() {
            report.field("content_kind", "content type is required");
        }

        if self.competencies.is_empty() {
            report.global("add at least 1 competency");
        } else if !for_preview && self.competencies.len() < 2 {
            report.global("add at least 2 competencies to publish");
        }

        if !for_preview {
            let has_url = !draft.content_url.trim().is_empty();
            let has_file = self.selected_file.is_some();
            if !has_url && !has_file {
                report.field("content_url", "provide a content URL or upload a file");
            }
        }
        if let Err(message) = validate_content_url(&draft.content_url) {
            report.field("content_url", message);
        }

        let tags = parse_tag_list(&draft.tags_input);
        if tags.is_empty() {
            report.field("tags", "tags are required");
        } else if !for_preview && tags.len() < 2 {
            report.field("tags", "add at least 2 tags to publish");
        }

        if !for_preview && draft.evaluation_kind == EvaluationKind::Quiz {
            if self.questions.is_empty() {
                report.global("add at least one quiz question");
            }
            for (index, question) in self.questions.iter().enumerate() {
                for message in question.structural_errors() {
                    report.global(format!("question {}: {message}", index + 1));
                }
            }
        }
        if !for_preview
            && matches!(
                draft.evaluation_kind,
                EvaluationKind::Activity | EvaluationKind::Project
            )
            && draft.evaluation_description.trim().is_empty()
        {
            report.field("evaluation_description", "describe the evaluation activity");
        }

        report
    }

    /// Builds the resource from a draft plus the interactive lists: fresh id,
    /// today's date, zeroed usage counters, tags parsed from the
    /// comma-separated input.
    pub fn assemble(&self, draft: &ResourceDraft) -> Result<Resource, AppError> {
        let Some(kind) = draft.content_kind else {
            return Err(AppError::Validation("content type is required".to_string()));
        };

        let embed_markup = if kind == ContentType::EmbeddedSlide {
            let markup = draft.embed_markup.trim();
            (!markup.is_empty()).then(|| clean_embed_markup(markup))
        } else {
            None
        };

        Ok(Resource {
            id: generate_resource_id(),
            title: draft.title.trim().to_string(),
            faculty: draft.faculty.trim().to_string(),
            program: draft.program.trim().to_string(),
            level: draft.level.trim().to_string(),
            author: draft.author.trim().to_string(),
            created_date: Local::now().date_naive(),
            objective: Objective {
                description: draft.objective_description.trim().to_string(),
                competencies: self.competencies.clone(),
            },
            content: Content {
                kind,
                url: draft.content_url.trim().to_string(),
                duration: draft.duration.trim().to_string(),
                format: opt_string(&draft.content_format),
                thumbnail: opt_string(&draft.thumbnail),
                embed_markup,
            },
            implementation: Implementation {
                teacher_guide: opt_string(&draft.teacher_guide),
                student_guide: draft.student_guide.trim().to_string(),
                estimated_time: draft.estimated_time.trim().to_string(),
                required_materials: self.materials.clone(),
                prerequisites: parse_tag_list(&draft.prerequisites_input),
            },
            evaluation: self.assemble_evaluation(draft),
            usage: Usage {
                views: 0,
                rating: 0.0,
                downloads: 0,
                tags: parse_tag_list(&draft.tags_input),
                featured: draft.featured,
                public: draft.public,
            },
        })
    }

    fn assemble_evaluation(&self, draft: &ResourceDraft) -> Evaluation {
        let passing_score = parse_passing_score(&draft.passing_score_input);
        match draft.evaluation_kind {
            EvaluationKind::None => Evaluation::None,
            EvaluationKind::Quiz => Evaluation::Quiz {
                questions: self.questions.clone(),
                passing_score,
            },
            EvaluationKind::Activity => Evaluation::Activity {
                description: draft.evaluation_description.trim().to_string(),
                passing_score,
            },
            EvaluationKind::Project => Evaluation::Project {
                description: draft.evaluation_description.trim().to_string(),
                passing_score,
                requirements: self.requirements.clone(),
            },
        }
    }

    /// Relaxed validation plus assembly, for the preview modal.
    pub fn preview(&self, draft: &ResourceDraft) -> Result<Resource, AppError> {
        let report = self.validate(draft, true);
        if !report.is_valid() {
            return Err(AppError::Validation(report.to_string()));
        }
        self.assemble(draft)
    }

    /// Validates strictly, assembles, appends to the local cache and notifies
    /// listeners. Returns the stored resource.
    pub async fn submit(&self, draft: &ResourceDraft) -> Result<Resource, AppError> {
        let report = self.validate(draft, false);
        if !report.is_valid() {
            return Err(AppError::Validation(report.to_string()));
        }

        let resource = self.assemble(draft)?;
        let total = self.cache.append(&resource).await?;
        tracing::info!("resource {} stored, {total} submitted in total", resource.id);

        self.notifier.resources_updated();
        self.session.stamp_last_update();
        Ok(resource)
    }
}

fn opt_string(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn validate_content_url(input: &str) -> Result<(), String> {
    let trimmed = input.trim();
    // relative asset paths are accepted as-is
    if trimmed.is_empty() || !trimmed.contains("://") {
        return Ok(());
    }
    url::Url::parse(trimmed)
        .map(|_| ())
        .map_err(|_| "content URL is not valid".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_competency_is_rejected_with_an_error() {
        let mut form = test_form();
        form.add_competency("POO básica").unwrap();
        let err = form.add_competency(" POO básica ").unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(form.competencies().len(), 1);
    }

    #[test]
    fn blank_list_entries_are_rejected() {
        let mut form = test_form();
        assert!(matches!(
            form.add_material("   ").unwrap_err(),
            AppError::Validation(_)
        ));
    }

    #[test]
    fn new_questions_start_blank_with_four_options() {
        let mut form = test_form();
        let index = form.add_question();
        assert_eq!(index, 0);
        assert_eq!(form.questions()[0].options.len(), 4);
        assert_eq!(form.questions()[0].correct_option, 0);
    }

    #[test]
    fn correct_option_must_exist() {
        let mut form = test_form();
        form.add_question();
        assert!(form.set_correct_option(0, 3).is_ok());
        assert!(matches!(
            form.set_correct_option(0, 4).unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[test]
    fn disallowed_mime_type_is_rejected() {
        let mut form = test_form();
        let err = form
            .attach_file(FileMeta {
                name: "virus.exe".to_string(),
                mime: "application/x-msdownload".to_string(),
                size: 1024,
            })
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(form.selected_file().is_none());
    }

    #[test]
    fn oversized_file_is_rejected_and_selection_stays_unset() {
        let mut form = test_form();
        let err = form
            .attach_file(FileMeta {
                name: "lecture.mp4".to_string(),
                mime: "video/mp4".to_string(),
                size: 101 * 1024 * 1024,
            })
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(form.selected_file().is_none());
    }

    #[test]
    fn file_at_the_size_limit_is_accepted() {
        let mut form = test_form();
        form.attach_file(FileMeta {
            name: "apuntes.pdf".to_string(),
            mime: "application/pdf".to_string(),
            size: MAX_UPLOAD_BYTES,
        })
        .unwrap();
        assert!(form.selected_file().is_some());
    }

    #[test]
    fn rejected_file_does_not_replace_a_previous_selection() {
        let mut form = test_form();
        form.attach_file(FileMeta {
            name: "apuntes.pdf".to_string(),
            mime: "application/pdf".to_string(),
            size: 1024,
        })
        .unwrap();

        let _ = form.attach_file(FileMeta {
            name: "too-big.mp4".to_string(),
            mime: "video/mp4".to_string(),
            size: MAX_UPLOAD_BYTES + 1,
        });
        assert_eq!(form.selected_file().map(|f| f.name.as_str()), Some("apuntes.pdf"));
    }

    fn test_form() -> SubmissionForm {
        SubmissionForm::new(
            LocalCache::new(std::path::Path::new("target/test-data")),
            UpdateNotifier::new(),
            Arc::new(SessionSlots::new()),
        )
    }
}
