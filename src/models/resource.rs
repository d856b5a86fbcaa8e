// src/models/resource.rs

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::evaluation::Evaluation;

/// One catalog entry describing a learning asset and its pedagogical metadata.
///
/// Field names map onto the localized wire names used by the seed file and the
/// submission cache. Records are constructed either from seed data (read-only)
/// or by the submission form; after that only the view counter changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "facultad")]
    pub faculty: String,
    #[serde(rename = "programa", default)]
    pub program: String,
    #[serde(rename = "nivel")]
    pub level: String,
    #[serde(rename = "autor")]
    pub author: String,
    #[serde(rename = "fecha_creacion")]
    pub created_date: NaiveDate,
    #[serde(rename = "objetivo")]
    pub objective: Objective,
    #[serde(rename = "contenido")]
    pub content: Content,
    #[serde(rename = "implementacion")]
    pub implementation: Implementation,
    #[serde(rename = "evaluacion", default)]
    pub evaluation: Evaluation,
    #[serde(rename = "metadata")]
    pub usage: Usage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    #[serde(rename = "descripcion")]
    pub description: String,
    /// Ordered, non-empty for a valid submission.
    #[serde(rename = "competencias")]
    pub competencies: Vec<String>,
}

/// Kind of content behind a resource. Unknown wire tags collapse into `Other`
/// instead of poisoning the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "pdf")]
    Pdf,
    #[serde(rename = "infografia")]
    Infographic,
    #[serde(rename = "genially")]
    EmbeddedSlide,
    #[serde(rename = "enlace")]
    Link,
    #[serde(rename = "documento")]
    Document,
    #[serde(rename = "simulacion")]
    Simulation,
    #[serde(rename = "presentacion")]
    Presentation,
    #[serde(rename = "otro")]
    #[serde(other)]
    Other,
}

impl ContentType {
    /// Wire tag, also used as the badge label.
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Video => "video",
            ContentType::Pdf => "pdf",
            ContentType::Infographic => "infografia",
            ContentType::EmbeddedSlide => "genially",
            ContentType::Link => "enlace",
            ContentType::Document => "documento",
            ContentType::Simulation => "simulacion",
            ContentType::Presentation => "presentacion",
            ContentType::Other => "otro",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(rename = "tipo")]
    pub kind: ContentType,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "duracion", default)]
    pub duration: String,
    #[serde(rename = "formato", default)]
    pub format: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Only meaningful for embedded slides; sanitized before storage.
    #[serde(rename = "iframe", default, skip_serializing_if = "Option::is_none")]
    pub embed_markup: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Implementation {
    #[serde(rename = "guia_docente", default)]
    pub teacher_guide: Option<String>,
    #[serde(rename = "guia_estudiante")]
    pub student_guide: String,
    #[serde(rename = "tiempo_estimado", default)]
    pub estimated_time: String,
    #[serde(rename = "materiales_necesarios", default)]
    pub required_materials: Vec<String>,
    #[serde(rename = "prerrequisitos", default)]
    pub prerequisites: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(rename = "visitas", default)]
    pub views: u64,
    #[serde(rename = "valoracion", default)]
    pub rating: f32,
    #[serde(rename = "descargas", default)]
    pub downloads: u64,
    #[serde(rename = "etiquetas", default)]
    pub tags: Vec<String>,
    #[serde(rename = "destacado", default)]
    pub featured: bool,
    /// Seed records without the flag count as public.
    #[serde(rename = "publico", default = "default_public")]
    pub public: bool,
}

fn default_public() -> bool {
    true
}

impl Resource {
    /// Created within the last 30 days.
    pub fn is_recent(&self) -> bool {
        let cutoff = Local::now().date_naive() - Days::new(30);
        self.created_date > cutoff
    }

    pub fn has_evaluation(&self) -> bool {
        !self.evaluation.is_none()
    }

    /// Case-insensitive match against title, objective description or any tag.
    /// `term` must already be lowercased.
    pub fn matches_search(&self, term: &str) -> bool {
        self.title.to_lowercase().contains(term)
            || self.objective.description.to_lowercase().contains(term)
            || self
                .usage
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(term))
    }

    /// Human-readable duration: `"15:30"` becomes `"15 min 30 sec"`, an empty
    /// value becomes `"Variable duration"`.
    pub fn formatted_duration(&self) -> String {
        let duration = self.content.duration.trim();
        if duration.is_empty() {
            return "Variable duration".to_string();
        }
        match duration.split_once(':') {
            Some((minutes, seconds)) => format!("{minutes} min {seconds} sec"),
            None => duration.to_string(),
        }
    }
}

/// Lenient batch parse for untrusted record lists (seed file, local cache).
///
/// Malformed entries are dropped with a warning instead of failing the whole
/// batch, so one broken record never empties the catalog.
pub fn resources_from_value(value: &serde_json::Value, origin: &str) -> Vec<Resource> {
    let Some(items) = value.as_array() else {
        tracing::warn!("{origin}: expected a JSON array of resources");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<Resource>(item.clone()) {
            Ok(resource) => Some(resource),
            Err(err) => {
                tracing::warn!("{origin}: discarding malformed resource: {err}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "id": "REC-001",
            "titulo": "Introducción a la Programación en Java",
            "facultad": "Ingeniería",
            "programa": "Ingeniería de Sistemas",
            "nivel": "Pregrado",
            "autor": "Prof. Carlos Mendoza",
            "fecha_creacion": "2024-01-15",
            "objetivo": {
                "descripcion": "Comprender los fundamentos de la POO",
                "competencias": ["Variables", "POO básica"]
            },
            "contenido": {
                "tipo": "video",
                "url": "assets/videos/java-intro.mp4",
                "duracion": "15:30",
                "formato": "MP4",
                "thumbnail": "assets/images/java-thumb.jpg"
            },
            "implementacion": {
                "guia_docente": "Usar en las primeras semanas del curso.",
                "guia_estudiante": "Ver el video completo.",
                "tiempo_estimado": "2 horas",
                "materiales_necesarios": ["Computador", "JDK 11+"],
                "prerrequisitos": ["Informática básica"]
            },
            "evaluacion": { "tipo": "ninguna" },
            "metadata": {
                "visitas": 150,
                "valoracion": 4.5,
                "descargas": 89,
                "etiquetas": ["programación", "java"],
                "destacado": true
            }
        })
    }

    #[test]
    fn parses_localized_wire_names() {
        let resource: Resource = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(resource.title, "Introducción a la Programación en Java");
        assert_eq!(resource.content.kind, ContentType::Video);
        assert_eq!(resource.usage.views, 150);
        assert!(resource.usage.featured);
        // `publico` absent in older records: defaults to public
        assert!(resource.usage.public);
    }

    #[test]
    fn unknown_content_type_becomes_other() {
        let mut json = sample_json();
        json["contenido"]["tipo"] = serde_json::json!("webinar");
        let resource: Resource = serde_json::from_value(json).unwrap();
        assert_eq!(resource.content.kind, ContentType::Other);
    }

    #[test]
    fn malformed_entries_are_quarantined() {
        let batch = serde_json::json!([
            sample_json(),
            { "id": "broken", "titulo": 42 },
        ]);
        let resources = resources_from_value(&batch, "test");
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].id, "REC-001");
    }

    #[test]
    fn non_array_input_yields_nothing() {
        let resources = resources_from_value(&serde_json::json!({"recursos": []}), "test");
        assert!(resources.is_empty());
    }

    #[test]
    fn duration_formats_for_display() {
        let mut resource: Resource = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(resource.formatted_duration(), "15 min 30 sec");

        resource.content.duration = "25 minutos".to_string();
        assert_eq!(resource.formatted_duration(), "25 minutos");

        resource.content.duration = String::new();
        assert_eq!(resource.formatted_duration(), "Variable duration");
    }

    #[test]
    fn recency_window_is_thirty_days() {
        let mut resource: Resource = serde_json::from_value(sample_json()).unwrap();
        assert!(!resource.is_recent()); // seed date is long past

        resource.created_date = Local::now().date_naive();
        assert!(resource.is_recent());

        resource.created_date = Local::now().date_naive() - Days::new(31);
        assert!(!resource.is_recent());
    }

    #[test]
    fn evaluation_presence_is_visible() {
        let mut resource: Resource = serde_json::from_value(sample_json()).unwrap();
        assert!(!resource.has_evaluation());

        resource.evaluation = crate::models::evaluation::Evaluation::Activity {
            description: "Esquema".to_string(),
            passing_score: 80,
        };
        assert!(resource.has_evaluation());
        assert_eq!(resource.evaluation.kind_label(), "actividad");
        assert_eq!(resource.evaluation.passing_score(), Some(80));
    }

    #[test]
    fn search_matches_title_description_and_tags() {
        let resource: Resource = serde_json::from_value(sample_json()).unwrap();
        assert!(resource.matches_search("java"));
        assert!(resource.matches_search("poo"));
        assert!(resource.matches_search("programación"));
        assert!(!resource.matches_search("anatomía"));
    }
}
