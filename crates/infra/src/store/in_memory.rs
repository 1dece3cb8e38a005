use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use super::{Record, RecordStore, StoreError};

/// In-memory store for tests/dev.
#[derive(Debug)]
pub struct InMemoryRecordStore<T> {
    inner: RwLock<HashMap<Uuid, T>>,
}

impl<T> InMemoryRecordStore<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> Default for InMemoryRecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl<T: Record> RecordStore<T> for InMemoryRecordStore<T> {
    async fn get(&self, key: Uuid) -> Result<Option<T>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned(T::COLLECTION))?;
        Ok(map.get(&key).cloned())
    }

    async fn list(&self) -> Result<Vec<T>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned(T::COLLECTION))?;
        let mut items: Vec<(Uuid, T)> = map.iter().map(|(k, v)| (*k, v.clone())).collect();
        items.sort_by_key(|(k, _)| *k);
        Ok(items.into_iter().map(|(_, v)| v).collect())
    }

    async fn put(&self, record: &T) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned(T::COLLECTION))?;
        map.insert(record.key(), record.clone());
        Ok(())
    }

    async fn remove(&self, key: Uuid) -> Result<bool, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned(T::COLLECTION))?;
        Ok(map.remove(&key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workforce_organization::{Department, NewDepartment};

    fn dept(name: &str) -> Department {
        Department::create(NewDepartment {
            name: name.to_string(),
            location: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn put_get_remove() {
        let store = InMemoryRecordStore::<Department>::new();
        let d = dept("Finance");
        store.put(&d).await.unwrap();

        assert_eq!(store.get(d.key()).await.unwrap(), Some(d.clone()));
        assert!(store.remove(d.key()).await.unwrap());
        assert!(!store.remove(d.key()).await.unwrap());
        assert_eq!(store.get(d.key()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_is_in_creation_order() {
        let store = InMemoryRecordStore::<Department>::new();
        let a = dept("A");
        let b = dept("B");
        let c = dept("C");
        store.put(&c).await.unwrap();
        store.put(&a).await.unwrap();
        store.put(&b).await.unwrap();

        let names: Vec<String> = store.list().await.unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn put_replaces_existing() {
        let store = InMemoryRecordStore::<Department>::new();
        let mut d = dept("Ops");
        store.put(&d).await.unwrap();
        d.name = "Operations".to_string();
        store.put(&d).await.unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Operations");
    }
}
