// src/store/mod.rs

pub mod local_cache;
pub mod seed;

pub use local_cache::LocalCache;
pub use seed::{HttpSeedSource, SeedSource, builtin_seed, parse_seed};

use std::sync::PoisonError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::resource::{ContentType, Resource};

/// Maps a short faculty filter code to its canonical display name. Unknown
/// codes match nothing.
pub fn faculty_display_name(code: &str) -> Option<&'static str> {
    match code {
        "ingenieria" => Some("Ingeniería"),
        "salud" => Some("Ciencias de la Salud"),
        "educacion" => Some("Educación"),
        _ => None,
    }
}

/// Active catalog filters. Every present predicate must match (AND).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveFilters {
    pub faculty_code: Option<String>,
    pub content_kind: Option<ContentType>,
    pub level: Option<String>,
    pub search: String,
}

impl ActiveFilters {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Applies all active predicates with AND semantics. Pure over the input:
/// never mutates it, preserves input order.
pub fn filter_resources(resources: &[Resource], filters: &ActiveFilters) -> Vec<Resource> {
    let term = filters.search.trim().to_lowercase();
    let faculty = filters
        .faculty_code
        .as_deref()
        .map(|code| faculty_display_name(code));

    resources
        .iter()
        .filter(|r| term.is_empty() || r.matches_search(&term))
        .filter(|r| match faculty {
            None => true,
            Some(Some(name)) => r.faculty == name,
            Some(None) => false,
        })
        .filter(|r| filters.content_kind.is_none_or(|kind| r.content.kind == kind))
        .filter(|r| filters.level.as_deref().is_none_or(|level| r.level == level))
        .cloned()
        .collect()
}

/// Loads resource records from the local submission cache and the seed file,
/// merges them with local-submission priority, and answers catalog queries.
pub struct ResourceStore {
    cache: LocalCache,
    seed: Box<dyn SeedSource>,
    resources: RwLock<Vec<Resource>>,
    load_generation: AtomicU64,
}

impl ResourceStore {
    pub fn new(cache: LocalCache, seed: Box<dyn SeedSource>) -> Self {
        Self {
            cache,
            seed,
            resources: RwLock::new(Vec::new()),
            load_generation: AtomicU64::new(0),
        }
    }

    /// Loads local submissions first, then seed data, and replaces the
    /// in-memory list. Never fails: seed problems fall back to the built-in
    /// list, cache problems to an empty list. Ids are not deduplicated across
    /// sources. When loads overlap, only the latest call commits its result.
    pub async fn load(&self) -> Vec<Resource> {
        let token = self.load_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let submitted = self.cache.read().await;
        let seeded = match self.seed.fetch().await.and_then(|raw| parse_seed(&raw)) {
            Ok(seeded) => seeded,
            Err(err) => {
                tracing::warn!("seed data unavailable, using built-in list: {err}");
                builtin_seed()
            }
        };

        tracing::info!(
            "loaded {} resources ({} submitted + {} seed)",
            submitted.len() + seeded.len(),
            submitted.len(),
            seeded.len()
        );

        let mut merged = Vec::with_capacity(submitted.len() + seeded.len());
        merged.extend(submitted);
        merged.extend(seeded);

        if self.load_generation.load(Ordering::SeqCst) == token {
            *self.write_lock() = merged;
        } else {
            tracing::debug!("discarding stale load result");
        }
        self.snapshot()
    }

    /// Current merged list, in load order.
    pub fn snapshot(&self) -> Vec<Resource> {
        self.read_lock().clone()
    }

    pub fn len(&self) -> usize {
        self.read_lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_lock().is_empty()
    }

    pub fn filtered(&self, filters: &ActiveFilters) -> Vec<Resource> {
        filter_resources(&self.read_lock(), filters)
    }

    pub fn featured(&self) -> Vec<Resource> {
        self.read_lock()
            .iter()
            .filter(|r| r.usage.featured)
            .cloned()
            .collect()
    }

    pub fn by_faculty(&self, code: &str) -> Vec<Resource> {
        self.filtered(&ActiveFilters {
            faculty_code: Some(code.to_string()),
            ..ActiveFilters::default()
        })
    }

    pub fn by_type(&self, kind: ContentType) -> Vec<Resource> {
        self.filtered(&ActiveFilters {
            content_kind: Some(kind),
            ..ActiveFilters::default()
        })
    }

    pub fn by_level(&self, level: &str) -> Vec<Resource> {
        self.filtered(&ActiveFilters {
            level: Some(level.to_string()),
            ..ActiveFilters::default()
        })
    }

    /// Case-insensitive search; an empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<Resource> {
        self.filtered(&ActiveFilters {
            search: term.to_string(),
            ..ActiveFilters::default()
        })
    }

    pub fn find_by_id(&self, id: &str) -> Option<Resource> {
        self.read_lock().iter().find(|r| r.id == id).cloned()
    }

    /// Bumps the view counter for a resource. In-memory only: the updated
    /// count is not written back to the seed file or the submission cache and
    /// resets on the next load.
    pub fn increment_views(&self, id: &str) -> Option<u64> {
        let mut resources = self.write_lock();
        let resource = resources.iter_mut().find(|r| r.id == id)?;
        resource.usage.views += 1;
        tracing::debug!("view count for {} is now {}", id, resource.usage.views);
        Some(resource.usage.views)
    }

    fn read_lock(&self) -> RwLockReadGuard<'_, Vec<Resource>> {
        self.resources.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, Vec<Resource>> {
        self.resources.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Resource> {
        builtin_seed()
    }

    #[test]
    fn faculty_codes_map_to_display_names() {
        assert_eq!(faculty_display_name("ingenieria"), Some("Ingeniería"));
        assert_eq!(faculty_display_name("salud"), Some("Ciencias de la Salud"));
        assert_eq!(faculty_display_name("educacion"), Some("Educación"));
        assert_eq!(faculty_display_name("derecho"), None);
    }

    #[test]
    fn unknown_faculty_code_matches_nothing() {
        let filters = ActiveFilters {
            faculty_code: Some("derecho".to_string()),
            ..ActiveFilters::default()
        };
        assert!(filter_resources(&sample(), &filters).is_empty());
    }

    #[test]
    fn faculty_filter_uses_display_name() {
        let filters = ActiveFilters {
            faculty_code: Some("salud".to_string()),
            ..ActiveFilters::default()
        };
        let result = filter_resources(&sample(), &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "REC-002");
    }

    #[test]
    fn type_and_level_filters_match_exactly() {
        let filters = ActiveFilters {
            content_kind: Some(ContentType::Video),
            level: Some("Pregrado".to_string()),
            ..ActiveFilters::default()
        };
        let result = filter_resources(&sample(), &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "REC-001");
    }

    #[test]
    fn search_is_case_insensitive() {
        let upper = filter_resources(
            &sample(),
            &ActiveFilters {
                search: "JAVA".to_string(),
                ..ActiveFilters::default()
            },
        );
        let lower = filter_resources(
            &sample(),
            &ActiveFilters {
                search: "java".to_string(),
                ..ActiveFilters::default()
            },
        );
        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 1);
    }

    #[test]
    fn empty_search_matches_everything() {
        let result = filter_resources(
            &sample(),
            &ActiveFilters {
                search: "   ".to_string(),
                ..ActiveFilters::default()
            },
        );
        assert_eq!(result.len(), sample().len());
    }

    #[test]
    fn filtering_is_idempotent_and_order_preserving() {
        let filters = ActiveFilters {
            level: Some("Pregrado".to_string()),
            ..ActiveFilters::default()
        };
        let once = filter_resources(&sample(), &filters);
        let twice = filter_resources(&once, &filters);
        assert_eq!(once, twice);

        let ids: Vec<&str> = once.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["REC-001", "REC-002"]);
    }

    #[test]
    fn combined_filters_use_and_semantics() {
        // "salud" faculty AND video type: nothing matches both
        let filters = ActiveFilters {
            faculty_code: Some("salud".to_string()),
            content_kind: Some(ContentType::Video),
            ..ActiveFilters::default()
        };
        assert!(filter_resources(&sample(), &filters).is_empty());
    }
}
