// src/config.rs

use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Persistent slot holding the user-submitted resource list.
pub const LOCAL_CACHE_KEY: &str = "recursos_uniajc";

/// Tab-scoped slot carrying the resource selected on the catalog page.
pub const SELECTION_SLOT_KEY: &str = "recursoSeleccionado";

/// Tab-scoped slot stamped after a successful submission.
pub const LAST_UPDATE_SLOT_KEY: &str = "ultimaActualizacion";

/// Passing score applied when a draft omits one or provides garbage.
pub const DEFAULT_PASSING_SCORE: u32 = 70;

/// Upload size cap: 100 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub seed_url: String,
    pub data_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let seed_url = env::var("EDUCA_SEED_URL")
            .unwrap_or_else(|_| "http://localhost:8080/data/recursos.json".to_string());

        let data_dir = env::var("EDUCA_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            seed_url,
            data_dir,
            rust_log,
        }
    }
}
