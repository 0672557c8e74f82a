pub mod achievement;
pub mod config;
pub mod fish;
pub mod task;
pub mod user;

use dopamine_core::{Config, StorageBackend, Stores};

/// Open the entity stores the configured backend points at.
pub fn open_stores() -> Result<Stores, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let stores = match config.storage.backend {
        StorageBackend::Memory => Stores::in_memory(),
        StorageBackend::Json => Stores::open_json(&config.store_dir()?)?,
    };
    Ok(stores)
}
