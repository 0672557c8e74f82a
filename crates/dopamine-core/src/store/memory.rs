//! In-memory entity store.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Local;

use super::{EntityRecord, IdSequence, Store};
use crate::error::StoreError;

/// Map-backed store with an owned id sequence. The map lock doubles as
/// the read-modify-write serialization point for [`Store::update`].
pub struct MemoryStore<T> {
    entities: Mutex<HashMap<u64, T>>,
    seq: IdSequence,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            entities: Mutex::new(HashMap::new()),
            seq: IdSequence::new(),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: EntityRecord> Store<T> for MemoryStore<T> {
    fn get(&self, id: u64) -> Result<Option<T>, StoreError> {
        let entities = self.entities.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entities.get(&id).cloned())
    }

    fn all(&self) -> Result<Vec<T>, StoreError> {
        let entities = self.entities.lock().map_err(|_| StoreError::Poisoned)?;
        let mut items: Vec<T> = entities.values().cloned().collect();
        items.sort_by_key(EntityRecord::id);
        Ok(items)
    }

    fn insert(&self, mut entity: T) -> Result<T, StoreError> {
        let mut entities = self.entities.lock().map_err(|_| StoreError::Poisoned)?;
        entity.assign(self.seq.next(), Local::now());
        entities.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    fn save(&self, entity: T) -> Result<T, StoreError> {
        let mut entities = self.entities.lock().map_err(|_| StoreError::Poisoned)?;
        entities.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    fn delete(&self, id: u64) -> Result<bool, StoreError> {
        let mut entities = self.entities.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entities.remove(&id).is_some())
    }

    fn update(&self, id: u64, f: &mut dyn FnMut(&mut T)) -> Result<Option<T>, StoreError> {
        let mut entities = self.entities.lock().map_err(|_| StoreError::Poisoned)?;
        match entities.get_mut(&id) {
            Some(entity) => {
                f(entity);
                Ok(Some(entity.clone()))
            }
            None => Ok(None),
        }
    }
}
