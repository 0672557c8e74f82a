//! File-backed JSON entity store.
//!
//! One file per entity kind (`users.json`, `fishes.json`, ...) holding
//! a JSON array of entities. The whole file is rewritten after each
//! mutation; the in-memory map is the source of truth between writes.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Local;

use super::{EntityRecord, IdSequence, Store};
use crate::error::StoreError;

/// JSON-file store for one entity kind.
pub struct JsonStore<T> {
    path: PathBuf,
    entities: Mutex<HashMap<u64, T>>,
    seq: IdSequence,
}

impl<T: EntityRecord> JsonStore<T> {
    /// Open (or create) the store file for `T` under `dir`.
    ///
    /// The id sequence resumes after the highest id found in the file,
    /// so reopening never reissues an id.
    pub fn open(dir: &std::path::Path) -> Result<Self, StoreError> {
        fs::create_dir_all(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(format!("{}.json", T::PLURAL));

        let entities: HashMap<u64, T> = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            let items: Vec<T> =
                serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
            items.into_iter().map(|e| (e.id(), e)).collect()
        } else {
            HashMap::new()
        };

        let last_id = entities.keys().copied().max().unwrap_or(0);
        Ok(Self {
            path,
            entities: Mutex::new(entities),
            seq: IdSequence::starting_after(last_id),
        })
    }

    /// Write the full entity set back to disk. Caller holds the lock.
    fn persist(&self, entities: &HashMap<u64, T>) -> Result<(), StoreError> {
        let mut items: Vec<&T> = entities.values().collect();
        items.sort_by_key(|e| e.id());
        let raw = serde_json::to_string_pretty(&items)?;
        fs::write(&self.path, raw).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl<T: EntityRecord> Store<T> for JsonStore<T> {
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
        self.persist(&entities)?;
        Ok(entity)
    }

    fn save(&self, entity: T) -> Result<T, StoreError> {
        let mut entities = self.entities.lock().map_err(|_| StoreError::Poisoned)?;
        entities.insert(entity.id(), entity.clone());
        self.persist(&entities)?;
        Ok(entity)
    }

    fn delete(&self, id: u64) -> Result<bool, StoreError> {
        let mut entities = self.entities.lock().map_err(|_| StoreError::Poisoned)?;
        let existed = entities.remove(&id).is_some();
        if existed {
            self.persist(&entities)?;
        }
        Ok(existed)
    }

    fn update(&self, id: u64, f: &mut dyn FnMut(&mut T)) -> Result<Option<T>, StoreError> {
        let mut entities = self.entities.lock().map_err(|_| StoreError::Poisoned)?;
        match entities.get_mut(&id) {
            Some(entity) => {
                f(entity);
                let updated = entity.clone();
                self.persist(&entities)?;
                Ok(Some(updated))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Fish, User};
    use chrono::TimeZone;

    #[test]
    fn round_trips_entities_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonStore<Fish> = JsonStore::open(dir.path()).unwrap();

        let mut fish = Fish::new(1, "Bubbles", "goldfish");
        fish.vitality.last_fed =
            Some(chrono::Local.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap());
        fish.progression.xp = 7;
        let fish = store.insert(fish).unwrap();

        // Reopen from disk and compare every field.
        let reopened: JsonStore<Fish> = JsonStore::open(dir.path()).unwrap();
        let loaded = reopened.get(fish.id).unwrap().unwrap();
        assert_eq!(loaded, fish);
    }

    #[test]
    fn sequence_resumes_after_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store: JsonStore<User> = JsonStore::open(dir.path()).unwrap();
            store.insert(User::new("a", None)).unwrap();
            store.insert(User::new("b", None)).unwrap();
        }
        let store: JsonStore<User> = JsonStore::open(dir.path()).unwrap();
        let c = store.insert(User::new("c", None)).unwrap();
        assert_eq!(c.id, 3);
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonStore<User> = JsonStore::open(dir.path()).unwrap();
        assert!(store.all().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("users.json"), "not json").unwrap();

        let result: Result<JsonStore<User>, _> = JsonStore::open(dir.path());
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn update_persists_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonStore<User> = JsonStore::open(dir.path()).unwrap();
        let user = store.insert(User::new("a", None)).unwrap();

        store
            .update(user.id, &mut |u: &mut User| {
                u.engagement.login_streak = 4;
            })
            .unwrap();

        let reopened: JsonStore<User> = JsonStore::open(dir.path()).unwrap();
        assert_eq!(
            reopened.get(user.id).unwrap().unwrap().engagement.login_streak,
            4
        );
    }
}
