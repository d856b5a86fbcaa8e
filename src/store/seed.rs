// src/store/seed.rs

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::AppError;
use crate::models::evaluation::{Evaluation, QuizQuestion};
use crate::models::resource::{
    Content, ContentType, Implementation, Objective, Resource, Usage, resources_from_value,
};

/// Source of the read-only baseline resource list.
#[async_trait]
pub trait SeedSource: Send + Sync {
    /// Fetches the raw seed document (JSON text).
    async fn fetch(&self) -> Result<String, AppError>;
}

/// Best-effort GET of the static seed file.
#[derive(Debug, Clone)]
pub struct HttpSeedSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SeedSource for HttpSeedSource {
    async fn fetch(&self) -> Result<String, AppError> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Parses a seed document: a top-level `recursos` array of resource records.
/// Malformed entries are quarantined by the record parse boundary.
pub fn parse_seed(raw: &str) -> Result<Vec<Resource>, AppError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|err| AppError::SeedLoad(err.to_string()))?;
    let Some(items) = value.get("recursos") else {
        return Err(AppError::SeedLoad(
            "seed document has no `recursos` array".to_string(),
        ));
    };
    Ok(resources_from_value(items, "seed"))
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Built-in baseline used when the seed file cannot be fetched or parsed, so
/// the catalog is never empty on first load.
pub fn builtin_seed() -> Vec<Resource> {
    vec![
        Resource {
            id: "REC-001".to_string(),
            title: "Introducción a la Programación en Java".to_string(),
            faculty: "Ingeniería".to_string(),
            program: "Ingeniería de Sistemas".to_string(),
            level: "Pregrado".to_string(),
            author: "Prof. Carlos Mendoza".to_string(),
            created_date: date(2024, 1, 15),
            objective: Objective {
                description: "Comprender los fundamentos de la programación orientada a \
                              objetos usando Java como lenguaje de programación"
                    .to_string(),
                competencies: vec![
                    "Variables y tipos de datos".to_string(),
                    "Estructuras de control".to_string(),
                    "POO básica".to_string(),
                    "Métodos y clases".to_string(),
                ],
            },
            content: Content {
                kind: ContentType::Video,
                url: "assets/videos/java-intro.mp4".to_string(),
                duration: "15:30".to_string(),
                format: Some("MP4".to_string()),
                thumbnail: Some("assets/images/java-thumb.jpg".to_string()),
                embed_markup: None,
            },
            implementation: Implementation {
                teacher_guide: Some(
                    "Este recurso puede utilizarse en las primeras semanas del curso de \
                     Programación I. Se recomienda complementar con ejercicios prácticos \
                     en clase."
                        .to_string(),
                ),
                student_guide: "Ver el video completo y luego realizar los ejercicios \
                                propuestos en la plataforma. Duración estimada: 2 horas."
                    .to_string(),
                estimated_time: "2 horas".to_string(),
                required_materials: vec![
                    "Computador".to_string(),
                    "JDK 11+".to_string(),
                    "IDE (Eclipse o IntelliJ)".to_string(),
                ],
                prerequisites: vec!["Conocimientos básicos de informática".to_string()],
            },
            evaluation: Evaluation::Quiz {
                questions: vec![QuizQuestion {
                    prompt: "¿Qué es una clase en Java?".to_string(),
                    options: vec![
                        "Un tipo de dato primitivo".to_string(),
                        "Una plantilla para crear objetos".to_string(),
                        "Un método especial".to_string(),
                        "Una variable global".to_string(),
                    ],
                    correct_option: 1,
                }],
                passing_score: 70,
            },
            usage: Usage {
                views: 150,
                rating: 4.5,
                downloads: 89,
                tags: vec![
                    "programación".to_string(),
                    "java".to_string(),
                    "poo".to_string(),
                    "ingeniería".to_string(),
                ],
                featured: true,
                public: true,
            },
        },
        Resource {
            id: "REC-002".to_string(),
            title: "Anatomía del Sistema Cardiovascular".to_string(),
            faculty: "Ciencias de la Salud".to_string(),
            program: "Enfermería".to_string(),
            level: "Pregrado".to_string(),
            author: "Dra. María Rodríguez".to_string(),
            created_date: date(2024, 1, 10),
            objective: Objective {
                description: "Identificar las estructuras y funciones del sistema \
                              cardiovascular humano"
                    .to_string(),
                competencies: vec![
                    "Anatomía cardíaca".to_string(),
                    "Vasos sanguíneos".to_string(),
                    "Fisiología cardiovascular".to_string(),
                    "Sistema de conducción".to_string(),
                ],
            },
            content: Content {
                kind: ContentType::Infographic,
                url: "assets/docs/cardiovascular-infografia.pdf".to_string(),
                duration: "25 minutos".to_string(),
                format: Some("PDF".to_string()),
                thumbnail: Some("assets/images/cardio-thumb.jpg".to_string()),
                embed_markup: None,
            },
            implementation: Implementation {
                teacher_guide: Some(
                    "Utilizar como material de apoyo en clases de anatomía. Puede \
                     proyectarse y explicarse sección por sección."
                        .to_string(),
                ),
                student_guide: "Estudiar la infografía y realizar el esquema propuesto. \
                                Repasar antes del examen práctico."
                    .to_string(),
                estimated_time: "45 minutos".to_string(),
                required_materials: vec![
                    "Tablet o computador".to_string(),
                    "Software para PDF".to_string(),
                ],
                prerequisites: vec!["Conocimientos básicos de biología".to_string()],
            },
            evaluation: Evaluation::Activity {
                description: "Crear un esquema del sistema cardiovascular identificando \
                              al menos 10 estructuras principales"
                    .to_string(),
                passing_score: 80,
            },
            usage: Usage {
                views: 203,
                rating: 4.8,
                downloads: 145,
                tags: vec![
                    "anatomía".to_string(),
                    "cardiovascular".to_string(),
                    "enfermería".to_string(),
                    "salud".to_string(),
                ],
                featured: true,
                public: true,
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_seed_is_never_empty() {
        let seed = builtin_seed();
        assert_eq!(seed.len(), 2);
        assert!(seed.iter().all(|r| !r.objective.competencies.is_empty()));
        assert!(seed.iter().all(|r| !r.usage.tags.is_empty()));
    }

    #[test]
    fn parse_seed_reads_recursos_array() {
        let raw = r#"{ "recursos": [] }"#;
        assert!(parse_seed(raw).unwrap().is_empty());
    }

    #[test]
    fn parse_seed_rejects_missing_array() {
        assert!(parse_seed("{}").is_err());
        assert!(parse_seed("not json").is_err());
    }

    #[test]
    fn builtin_seed_survives_serde_round_trip() {
        let seed = builtin_seed();
        let json = serde_json::to_value(&seed).unwrap();
        let back = resources_from_value(&json, "round trip");
        assert_eq!(back, seed);
    }
}
