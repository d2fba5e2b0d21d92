//! In-memory collection used by the async tests.

use super::{CollectionRepository, SingletonRepository};
use crate::error::{ConsoleError, Result};
use crate::models::Entity;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub(crate) struct MemoryCollection<T> {
    items: Mutex<Vec<T>>,
    next_id: Mutex<i64>,
    batch_reorder: bool,
    /// Mutating calls after this many succeed fail with a request error.
    fail_after: Mutex<Option<usize>>,
    pub(crate) list_calls: AtomicUsize,
    pub(crate) update_calls: AtomicUsize,
    pub(crate) reorder_calls: AtomicUsize,
    pub(crate) create_calls: AtomicUsize,
    mutations: AtomicUsize,
}

impl<T: Entity> MemoryCollection<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        let next_id = items.iter().filter_map(Entity::id).max().unwrap_or(0) + 1;
        MemoryCollection {
            items: Mutex::new(items),
            next_id: Mutex::new(next_id),
            batch_reorder: false,
            fail_after: Mutex::new(None),
            list_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            reorder_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            mutations: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_batch_reorder(mut self) -> Self {
        self.batch_reorder = true;
        self
    }

    pub(crate) fn fail_after(&self, successful_mutations: usize) {
        self.mutations.store(0, Ordering::SeqCst);
        *self.fail_after.lock().unwrap() = Some(successful_mutations);
    }

    pub(crate) fn recover(&self) {
        *self.fail_after.lock().unwrap() = None;
    }

    pub(crate) fn snapshot(&self) -> Vec<T> {
        self.items.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
            + self.reorder_calls.load(Ordering::SeqCst)
            + self.create_calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<()> {
        let done = self.mutations.fetch_add(1, Ordering::SeqCst);
        match *self.fail_after.lock().unwrap() {
            Some(limit) if done >= limit => Err(ConsoleError::Request("Server error".to_string())),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<T: Entity> CollectionRepository<T> for MemoryCollection<T> {
    async fn list_all(&self) -> Result<Vec<T>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.snapshot())
    }

    async fn get_one(&self, id: i64) -> Result<T> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|item| item.id() == Some(id))
            .cloned()
            .ok_or_else(|| ConsoleError::NotFound(format!("entity {}", id)))
    }

    async fn create(&self, entity: &T) -> Result<T> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        let mut next_id = self.next_id.lock().unwrap();
        let mut created = entity.clone();
        created.set_id(*next_id);
        *next_id += 1;
        self.items.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, patch: &T::Patch) -> Result<T> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|item| item.id() == Some(id))
            .ok_or_else(|| ConsoleError::NotFound(format!("entity {}", id)))?;
        item.apply_patch(patch);
        Ok(item.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.check_failure()?;
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|item| item.id() != Some(id));
        if items.len() == before {
            return Err(ConsoleError::NotFound(format!("entity {}", id)));
        }
        Ok(())
    }

    fn supports_reorder(&self) -> bool {
        self.batch_reorder
    }

    async fn reorder(&self, ids: &[i64]) -> Result<()> {
        self.reorder_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        let mut items = self.items.lock().unwrap();
        items.sort_by_key(|item| {
            item.id()
                .and_then(|id| ids.iter().position(|candidate| *candidate == id))
                .unwrap_or(usize::MAX)
        });
        Ok(())
    }
}

pub(crate) struct MemorySingleton<T> {
    value: Mutex<T>,
    pub(crate) store_calls: AtomicUsize,
}

impl<T: Clone> MemorySingleton<T> {
    pub(crate) fn new(value: T) -> Self {
        MemorySingleton {
            value: Mutex::new(value),
            store_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn current(&self) -> T {
        self.value.lock().unwrap().clone()
    }
}

#[async_trait]
impl<T> SingletonRepository<T> for MemorySingleton<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn fetch(&self) -> Result<T> {
        Ok(self.current())
    }

    async fn store(&self, value: &T) -> Result<T> {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
        *self.value.lock().unwrap() = value.clone();
        Ok(value.clone())
    }
}
