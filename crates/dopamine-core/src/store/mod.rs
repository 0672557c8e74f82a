//! Entity storage.
//!
//! A small key-value abstraction over whole entities: load by id, save,
//! and a closure-based `update` that runs the read-modify-write cycle
//! under the store lock so two concurrent events on the same entity
//! cannot both read the same prior state. Two backends exist:
//! an in-memory map ([`MemoryStore`]) and a file-backed JSON store
//! ([`JsonStore`]).
//!
//! Each store owns its own [`IdSequence`]; there is no process-wide
//! counter state.

mod json;
mod memory;

pub use json::JsonStore;
pub use memory::MemoryStore;

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Local};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;
use crate::model::{Achievement, Fish, Task, User};

/// A storable entity with a store-assigned numeric id.
pub trait EntityRecord:
    Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Entity kind name, used in error messages.
    const KIND: &'static str;

    /// Plural kind name, used for store file names.
    const PLURAL: &'static str;

    /// Current id; 0 means not yet assigned.
    fn id(&self) -> u64;

    /// Called by the store on insert with the assigned id and
    /// creation instant.
    fn assign(&mut self, id: u64, created_at: DateTime<Local>);
}

/// Monotonic id generator owned by a store.
#[derive(Debug, Default)]
pub struct IdSequence(AtomicU64);

impl IdSequence {
    /// A sequence whose first id is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// A sequence continuing after `last`, e.g. the highest id found
    /// in a reopened store file.
    pub fn starting_after(last: u64) -> Self {
        Self(AtomicU64::new(last))
    }

    /// Next id in the sequence.
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Storage contract the services program against.
pub trait Store<T: EntityRecord>: Send + Sync {
    /// Load an entity by id.
    fn get(&self, id: u64) -> Result<Option<T>, StoreError>;

    /// All entities, ordered by id.
    fn all(&self) -> Result<Vec<T>, StoreError>;

    /// Assign an id and creation timestamp, persist, and return the
    /// stored form.
    fn insert(&self, entity: T) -> Result<T, StoreError>;

    /// Persist an already-identified entity, replacing the stored
    /// form. Round-trips all fields unchanged except those the caller
    /// modified.
    fn save(&self, entity: T) -> Result<T, StoreError>;

    /// Remove an entity; returns whether it existed.
    fn delete(&self, id: u64) -> Result<bool, StoreError>;

    /// Atomic read-modify-write: run `f` on the stored entity under
    /// the store lock and persist the result. Returns the updated
    /// entity, or `None` if the id is unknown.
    fn update(&self, id: u64, f: &mut dyn FnMut(&mut T)) -> Result<Option<T>, StoreError>;
}

/// The full set of entity stores the services operate over.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn Store<User>>,
    pub tasks: Arc<dyn Store<Task>>,
    pub achievements: Arc<dyn Store<Achievement>>,
    pub fishes: Arc<dyn Store<Fish>>,
}

impl Stores {
    /// All-in-memory stores, mainly for tests and ephemeral runs.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemoryStore::<User>::new()),
            tasks: Arc::new(MemoryStore::<Task>::new()),
            achievements: Arc::new(MemoryStore::<Achievement>::new()),
            fishes: Arc::new(MemoryStore::<Fish>::new()),
        }
    }

    /// File-backed JSON stores under `dir`, one file per entity kind.
    pub fn open_json(dir: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            users: Arc::new(JsonStore::<User>::open(dir)?),
            tasks: Arc::new(JsonStore::<Task>::open(dir)?),
            achievements: Arc::new(JsonStore::<Achievement>::open(dir)?),
            fishes: Arc::new(JsonStore::<Fish>::open(dir)?),
        })
    }
}
