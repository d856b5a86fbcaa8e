// src/state.rs

use std::sync::Arc;

use crate::config::Config;
use crate::pages::{CatalogPage, DetailPage};
use crate::session::{SessionSlots, UpdateNotifier};
use crate::store::{HttpSeedSource, LocalCache, ResourceStore, SeedSource};
use crate::submission::SubmissionForm;

/// Shared services, constructed once at page start and handed to the page
/// controllers explicitly. No ambient globals.
#[derive(Clone)]
pub struct AppServices {
    pub store: Arc<ResourceStore>,
    pub session: Arc<SessionSlots>,
    pub notifier: UpdateNotifier,
    pub config: Config,
}

impl AppServices {
    pub fn from_config(config: Config) -> Self {
        let seed = HttpSeedSource::new(config.seed_url.clone());
        Self::with_seed_source(config, Box::new(seed))
    }

    /// Same wiring with an injected seed source (tests, alternate transports).
    pub fn with_seed_source(config: Config, seed: Box<dyn SeedSource>) -> Self {
        let cache = LocalCache::new(&config.data_dir);
        let store = Arc::new(ResourceStore::new(cache, seed));
        Self {
            store,
            session: Arc::new(SessionSlots::new()),
            notifier: UpdateNotifier::new(),
            config,
        }
    }

    pub fn catalog_page(&self) -> CatalogPage {
        CatalogPage::new(self.store.clone(), self.session.clone())
    }

    pub fn detail_page(&self) -> DetailPage {
        DetailPage::new(self.store.clone(), self.session.clone())
    }

    pub fn submission_form(&self) -> SubmissionForm {
        SubmissionForm::new(
            LocalCache::new(&self.config.data_dir),
            self.notifier.clone(),
            self.session.clone(),
        )
    }
}
