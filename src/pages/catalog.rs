// src/pages/catalog.rs

use std::fmt::Write as _;
use std::sync::Arc;

use crate::error::AppError;
use crate::models::resource::{ContentType, Resource};
use crate::pages::Redirect;
use crate::session::{SessionSlots, UpdateMessage};
use crate::store::{ActiveFilters, ResourceStore};

/// Catalog page controller.
///
/// Re-queries the store and re-renders the full result list on every filter
/// or search change; no incremental diffing.
pub struct CatalogPage {
    store: Arc<ResourceStore>,
    session: Arc<SessionSlots>,
    filters: ActiveFilters,
}

impl CatalogPage {
    pub fn new(store: Arc<ResourceStore>, session: Arc<SessionSlots>) -> Self {
        Self {
            store,
            session,
            filters: ActiveFilters::default(),
        }
    }

    /// Initial load. Interactions arriving before this settles operate on an
    /// empty list.
    pub async fn init(&self) -> Vec<Resource> {
        self.store.load().await
    }

    pub fn filters(&self) -> &ActiveFilters {
        &self.filters
    }

    pub fn set_search(&mut self, term: &str) -> Vec<Resource> {
        self.filters.search = term.to_string();
        self.visible()
    }

    pub fn set_faculty(&mut self, code: Option<&str>) -> Vec<Resource> {
        self.filters.faculty_code = code.map(str::to_string);
        self.visible()
    }

    pub fn set_content_kind(&mut self, kind: Option<ContentType>) -> Vec<Resource> {
        self.filters.content_kind = kind;
        self.visible()
    }

    pub fn set_level(&mut self, level: Option<&str>) -> Vec<Resource> {
        self.filters.level = level.map(str::to_string);
        self.visible()
    }

    pub fn clear_filters(&mut self) -> Vec<Resource> {
        self.filters.clear();
        self.visible()
    }

    /// Current result set under the active filters.
    pub fn visible(&self) -> Vec<Resource> {
        self.store.filtered(&self.filters)
    }

    /// Counter line shown under the filter bar.
    pub fn result_counter(count: usize) -> String {
        if count == 1 {
            "1 resource found".to_string()
        } else {
            format!("{count} resources found")
        }
    }

    /// Full re-render of the result list as text cards.
    pub fn render(&self) -> String {
        let resources = self.visible();
        if resources.is_empty() {
            return "No resources found. Try other search terms or filters.".to_string();
        }

        let mut out = String::new();
        for resource in &resources {
            let _ = writeln!(
                out,
                "[{}] {} — {} · {} · {} · {} views",
                resource.content.kind.label(),
                resource.title,
                resource.faculty,
                resource.author,
                resource.formatted_duration(),
                resource.usage.views,
            );
        }
        out.push_str(&Self::result_counter(resources.len()));
        out
    }

    /// Stores the selection in the hand-off slot and redirects to the detail
    /// page.
    pub fn open_resource(&self, id: &str) -> Result<Redirect, AppError> {
        let resource = self
            .store
            .find_by_id(id)
            .ok_or_else(|| AppError::NotFound(format!("resource {id} not found")))?;
        self.session.set_selection(&resource)?;
        Ok(Redirect {
            target: format!("recurso-detalle.html?id={id}"),
            delay_ms: 0,
        })
    }

    /// Advisory refresh on a broadcast notification.
    pub async fn handle_update(&self, message: UpdateMessage) -> Vec<Resource> {
        match message {
            UpdateMessage::ResourcesUpdated => self.store.load().await,
        }
    }

    /// Reloads once when the tab regains focus after a recent submission.
    pub async fn handle_focus(&self) -> Option<Vec<Resource>> {
        self.session.take_last_update()?;
        Some(self.store.load().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_pluralizes() {
        assert_eq!(CatalogPage::result_counter(0), "0 resources found");
        assert_eq!(CatalogPage::result_counter(1), "1 resource found");
        assert_eq!(CatalogPage::result_counter(7), "7 resources found");
    }
}
