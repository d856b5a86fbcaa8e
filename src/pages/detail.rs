// src/pages/detail.rs

use std::fmt::Write as _;
use std::sync::Arc;

use crate::models::evaluation::Evaluation;
use crate::models::resource::{ContentType, Resource};
use crate::pages::Redirect;
use crate::session::SessionSlots;
use crate::store::ResourceStore;

/// Emitted when the hand-off slot is empty or unreadable: a user-visible
/// message plus a delayed redirect back to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingSelection {
    pub message: String,
    pub redirect: Redirect,
}

/// The resource as shown on the detail page, after the view bump.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub resource: Resource,
    pub views: u64,
}

/// Detail page controller: consumes the resource handed off by the catalog
/// and renders the multi-step view.
pub struct DetailPage {
    store: Arc<ResourceStore>,
    session: Arc<SessionSlots>,
}

impl DetailPage {
    pub fn new(store: Arc<ResourceStore>, session: Arc<SessionSlots>) -> Self {
        Self { store, session }
    }

    /// Reads the hand-off slot and bumps the view counter. The counter update
    /// is in-memory only and resets on the next load.
    pub fn open(&self) -> Result<DetailView, MissingSelection> {
        let Some(resource) = self.session.selection() else {
            return Err(MissingSelection {
                message: "No resource selected.".to_string(),
                redirect: Redirect {
                    target: "recursos.html".to_string(),
                    delay_ms: 2000,
                },
            });
        };

        let views = self
            .store
            .increment_views(&resource.id)
            .unwrap_or(resource.usage.views);
        Ok(DetailView { resource, views })
    }
}

impl DetailView {
    /// The four presentation steps in display order: objective, content,
    /// implementation, evaluation.
    pub fn render_steps(&self) -> Vec<String> {
        vec![
            self.render_objective(),
            self.render_content(),
            self.render_implementation(),
            self.render_evaluation(),
        ]
    }

    fn render_objective(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Learning objective");
        let _ = writeln!(out, "{}", self.resource.objective.description);
        for competency in &self.resource.objective.competencies {
            let _ = writeln!(out, "- {competency}");
        }
        out
    }

    fn render_content(&self) -> String {
        let content = &self.resource.content;
        let mut out = String::new();
        let _ = writeln!(out, "Content: {}", content.kind.label());
        let _ = writeln!(out, "Duration: {}", self.resource.formatted_duration());
        let _ = writeln!(
            out,
            "Format: {}",
            content.format.as_deref().unwrap_or("Not specified")
        );
        match (content.kind, content.embed_markup.as_deref()) {
            (ContentType::EmbeddedSlide, Some(markup)) => {
                let _ = writeln!(out, "{markup}");
            }
            _ => {
                let _ = writeln!(out, "{}", content.url);
            }
        }
        out
    }

    fn render_implementation(&self) -> String {
        let implementation = &self.resource.implementation;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Teacher guide: {}",
            implementation.teacher_guide.as_deref().unwrap_or("Not available")
        );
        let _ = writeln!(out, "Student guide: {}", implementation.student_guide);
        let _ = writeln!(out, "Estimated time: {}", implementation.estimated_time);
        for material in &implementation.required_materials {
            let _ = writeln!(out, "- {material}");
        }
        if !implementation.prerequisites.is_empty() {
            let _ = writeln!(
                out,
                "Prerequisites: {}",
                implementation.prerequisites.join(", ")
            );
        }
        out
    }

    fn render_evaluation(&self) -> String {
        match &self.resource.evaluation {
            Evaluation::None => {
                "No evaluation available for this material.".to_string()
            }
            other => format!(
                "Evaluation: {} (passing score {}%)",
                other.kind_label(),
                other.passing_score().unwrap_or_default()
            ),
        }
    }
}
