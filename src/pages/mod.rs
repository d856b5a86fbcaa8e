// src/pages/mod.rs

pub mod catalog;
pub mod detail;

pub use catalog::CatalogPage;
pub use detail::{DetailPage, DetailView, MissingSelection};

/// Navigation signal handed back to the host shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub target: String,
    /// Milliseconds to wait before navigating; zero means immediately.
    pub delay_ms: u64,
}
