//! Drag-and-drop ordering of sibling entities with explicit save/discard.
//!
//! The engine keeps the working order next to the last persisted one. It is
//! `Dirty` exactly when the two id sequences differ.

use crate::error::{ConsoleError, Result};
use crate::models::Sortable;
use crate::repository::CollectionRepository;
use tracing::{debug, info, warn};

/// Where a dragged item lands relative to the drop target. Dropping onto
/// the target places it right after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPosition {
    Before,
    On,
    After,
}

impl DropPosition {
    /// Maps the sign of a drag offset: negative is above the target.
    pub fn from_offset(offset: i32) -> Self {
        match offset {
            o if o < 0 => DropPosition::Before,
            0 => DropPosition::On,
            _ => DropPosition::After,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderState {
    Clean,
    Dirty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistStrategy {
    /// One call carrying every id in order.
    Batch,
    /// One update per entity with its 0-based index as `sortOrder`.
    PerEntity,
}

/// A save in flight. Produced by [`OrderingEngine::begin_save`] and handed
/// back to [`OrderingEngine::finish_save`] with the outcome.
#[derive(Debug, Clone)]
pub struct SavePlan<T> {
    generation: u64,
    strategy: PersistStrategy,
    entities: Vec<T>,
}

impl<T: Sortable> SavePlan<T> {
    pub fn strategy(&self) -> PersistStrategy {
        self.strategy
    }

    pub fn ids(&self) -> Vec<i64> {
        self.entities.iter().filter_map(|entity| entity.id()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct OrderingEngine<T> {
    items: Vec<T>,
    persisted: Vec<T>,
    /// Bumped whenever the list is replaced from the server.
    generation: u64,
    pending_save: Option<u64>,
}

impl<T: Sortable> Default for OrderingEngine<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sortable> OrderingEngine<T> {
    pub fn new() -> Self {
        OrderingEngine {
            items: Vec::new(),
            persisted: Vec::new(),
            generation: 0,
            pending_save: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn ids(&self) -> Vec<i64> {
        self.items.iter().filter_map(|item| item.id()).collect()
    }

    pub fn persisted_ids(&self) -> Vec<i64> {
        self.persisted.iter().filter_map(|item| item.id()).collect()
    }

    pub fn state(&self) -> OrderState {
        if self.ids() == self.persisted_ids() {
            OrderState::Clean
        } else {
            OrderState::Dirty
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.state() == OrderState::Dirty
    }

    pub fn is_saving(&self) -> bool {
        self.pending_save.is_some()
    }

    /// Fetches the collection and resets to its stored order.
    pub async fn load<R>(&mut self, repo: &R) -> Result<()>
    where
        R: CollectionRepository<T> + ?Sized,
    {
        let items = repo.list_all().await?;
        self.replace(items);
        Ok(())
    }

    /// Adopts `items` as the persisted order: entities without an id are
    /// dropped, the rest sorted by `sort_order` with ties kept in input order.
    pub fn replace(&mut self, items: Vec<T>) {
        let mut items: Vec<T> = items.into_iter().filter(|item| item.id().is_some()).collect();
        items.sort_by_key(|item| item.sort_order());
        debug!("Ordering {} entities", items.len());

        self.persisted = items.clone();
        self.items = items;
        self.generation += 1;
        self.pending_save = None;
    }

    fn index_of(&self, id: i64) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.id() == Some(id))
            .ok_or_else(|| ConsoleError::NotFound(format!("entity {} is not in this list", id)))
    }

    /// Moves `dragged` next to `target`. The other items keep their
    /// relative order.
    pub fn move_item(&mut self, dragged: i64, target: i64, position: DropPosition) -> Result<()> {
        let from = self.index_of(dragged)?;
        let to = self.index_of(target)?;
        if from == to {
            return Ok(());
        }

        let item = self.items.remove(from);
        let target_index = if to > from { to - 1 } else { to };
        let insert_at = match position {
            DropPosition::Before => target_index,
            DropPosition::On | DropPosition::After => target_index + 1,
        };
        self.items.insert(insert_at, item);
        Ok(())
    }

    /// Moves `dragged` to an absolute index of the list without it.
    pub fn move_to_index(&mut self, dragged: i64, index: usize) -> Result<()> {
        let from = self.index_of(dragged)?;
        let item = self.items.remove(from);
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        Ok(())
    }

    /// Restores the last persisted order.
    pub fn discard(&mut self) {
        self.items = self.persisted.clone();
    }

    /// Snapshots the working order for persistence. `Ok(None)` means there
    /// is nothing to save; a second save while one is pending is refused.
    pub fn begin_save(&mut self, strategy: PersistStrategy) -> Result<Option<SavePlan<T>>> {
        if self.pending_save.is_some() {
            return Err(ConsoleError::Busy);
        }
        if !self.is_dirty() {
            return Ok(None);
        }

        let entities = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let mut entity = item.clone();
                entity.set_sort_order(index as i32);
                entity
            })
            .collect();
        self.pending_save = Some(self.generation);
        Ok(Some(SavePlan {
            generation: self.generation,
            strategy,
            entities,
        }))
    }

    /// Writes a plan through the repository. Per-entity updates run one
    /// after another and stop at the first failure, so a failure can leave
    /// the stored order partially updated.
    pub async fn persist<R>(plan: &SavePlan<T>, repo: &R) -> Result<()>
    where
        R: CollectionRepository<T> + ?Sized,
    {
        match plan.strategy {
            PersistStrategy::Batch => repo.reorder(&plan.ids()).await,
            PersistStrategy::PerEntity => {
                for entity in &plan.entities {
                    if let Some(id) = entity.id() {
                        repo.update(id, &T::sort_patch(entity.sort_order())).await?;
                    }
                }
                Ok(())
            }
        }
    }

    /// Applies the outcome of a plan. Results for a list that has since been
    /// reloaded are dropped.
    pub fn finish_save(&mut self, plan: SavePlan<T>, outcome: Result<()>) -> Result<()> {
        if plan.generation != self.generation {
            debug!("Ignoring the result of a save for a list that was reloaded");
            return outcome;
        }
        self.pending_save = None;

        if let Err(e) = outcome {
            warn!("Saving the new order failed: {}", e);
            return Err(e);
        }

        let saved_ids = plan.ids();
        if self.ids() == saved_ids {
            self.items = plan.entities.clone();
        }
        self.persisted = plan.entities;
        info!("Saved order of {} entities", saved_ids.len());
        Ok(())
    }

    /// Persists the working order. Returns `false` when it was already
    /// clean and no request was made.
    pub async fn save<R>(&mut self, repo: &R) -> Result<bool>
    where
        R: CollectionRepository<T> + ?Sized,
    {
        let strategy = if repo.supports_reorder() {
            PersistStrategy::Batch
        } else {
            PersistStrategy::PerEntity
        };
        let Some(plan) = self.begin_save(strategy)? else {
            return Ok(false);
        };
        let outcome = Self::persist(&plan, repo).await;
        self.finish_save(plan, outcome)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AboutSection, AboutSectionType, HomeSection, HomeSectionType};
    use crate::repository::memory::MemoryCollection;
    use std::sync::atomic::Ordering;

    fn home(id: i64, sort_order: i32) -> HomeSection {
        HomeSection {
            id: Some(id),
            kind: HomeSectionType::Features.into(),
            title: format!("Section {}", id),
            description: String::new(),
            content: "[]".to_string(),
            sort_order,
            enabled: true,
            create_time: None,
            update_time: None,
        }
    }

    fn about(id: i64, sort_order: i32) -> AboutSection {
        AboutSection {
            id: Some(id),
            kind: AboutSectionType::Custom.into(),
            title: format!("Block {}", id),
            description: String::new(),
            content: "{}".to_string(),
            sort_order,
            enabled: true,
            create_time: None,
            update_time: None,
        }
    }

    fn engine_with(ids: &[i64]) -> OrderingEngine<HomeSection> {
        let mut engine = OrderingEngine::new();
        engine.replace(ids.iter().enumerate().map(|(i, id)| home(*id, i as i32)).collect());
        engine
    }

    #[test]
    fn test_move_after_and_before() {
        let mut engine = engine_with(&[1, 2, 3]);
        engine.move_item(1, 2, DropPosition::After).unwrap();
        assert_eq!(engine.ids(), vec![2, 1, 3]);

        let mut engine = engine_with(&[1, 2, 3]);
        engine.move_item(3, 1, DropPosition::Before).unwrap();
        assert_eq!(engine.ids(), vec![3, 1, 2]);
    }

    #[test]
    fn test_drop_on_target_places_after_it() {
        let mut engine = engine_with(&[1, 2, 3, 4]);
        engine.move_item(4, 2, DropPosition::On).unwrap();
        assert_eq!(engine.ids(), vec![1, 2, 4, 3]);
        assert_eq!(DropPosition::from_offset(-1), DropPosition::Before);
        assert_eq!(DropPosition::from_offset(0), DropPosition::On);
    }

    #[test]
    fn test_move_to_index() {
        let mut engine = engine_with(&[1, 2, 3, 4]);
        engine.move_to_index(1, 2).unwrap();
        assert_eq!(engine.ids(), vec![2, 3, 1, 4]);
        engine.move_to_index(4, 99).unwrap();
        assert_eq!(engine.ids(), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_move_then_discard_restores_order() {
        let mut engine = engine_with(&[1, 2, 3]);
        engine.move_item(3, 1, DropPosition::Before).unwrap();
        assert_eq!(engine.state(), OrderState::Dirty);

        engine.discard();
        assert_eq!(engine.ids(), vec![1, 2, 3]);
        assert_eq!(engine.state(), OrderState::Clean);
    }

    #[test]
    fn test_moving_back_is_clean() {
        let mut engine = engine_with(&[1, 2, 3]);
        engine.move_item(1, 2, DropPosition::After).unwrap();
        engine.move_item(1, 2, DropPosition::Before).unwrap();
        assert_eq!(engine.state(), OrderState::Clean);
    }

    #[test]
    fn test_unknown_id_is_rejected() {
        let mut engine = engine_with(&[1, 2]);
        assert!(matches!(
            engine.move_item(9, 1, DropPosition::Before),
            Err(ConsoleError::NotFound(_))
        ));
        assert_eq!(engine.ids(), vec![1, 2]);
    }

    #[test]
    fn test_replace_sorts_stably_and_drops_unsaved() {
        let mut unsaved = home(0, 0);
        unsaved.id = None;
        let mut engine = OrderingEngine::new();
        engine.replace(vec![home(1, 2), home(2, 1), home(3, 2), unsaved, home(4, 0)]);

        assert_eq!(engine.ids(), vec![4, 2, 1, 3]);
        assert_eq!(engine.state(), OrderState::Clean);
    }

    #[tokio::test]
    async fn test_clean_save_makes_no_calls() {
        let repo = MemoryCollection::new(vec![home(1, 0), home(2, 1)]);
        let mut engine = OrderingEngine::new();
        engine.load(&repo).await.unwrap();

        assert!(!engine.save(&repo).await.unwrap());
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_per_entity_save_writes_indices() {
        let repo = MemoryCollection::new(vec![home(1, 0), home(2, 1), home(3, 2)]);
        let mut engine = OrderingEngine::new();
        engine.load(&repo).await.unwrap();

        engine.move_item(3, 1, DropPosition::Before).unwrap();
        assert!(engine.save(&repo).await.unwrap());

        assert_eq!(repo.update_calls.load(Ordering::SeqCst), 3);
        assert_eq!(engine.state(), OrderState::Clean);
        let stored: Vec<(i64, i32)> = repo
            .snapshot()
            .iter()
            .map(|s| (s.id.unwrap(), s.sort_order))
            .collect();
        assert_eq!(stored, vec![(1, 1), (2, 2), (3, 0)]);
        assert_eq!(engine.items()[0].sort_order, 0);
    }

    #[tokio::test]
    async fn test_batch_save_sends_ids() {
        let repo = MemoryCollection::new(vec![about(1, 0), about(2, 1), about(3, 2)]).with_batch_reorder();
        let mut engine = OrderingEngine::new();
        engine.load(&repo).await.unwrap();

        engine.move_item(1, 3, DropPosition::After).unwrap();
        engine.save(&repo).await.unwrap();

        assert_eq!(repo.reorder_calls.load(Ordering::SeqCst), 1);
        assert_eq!(repo.update_calls.load(Ordering::SeqCst), 0);
        let stored: Vec<i64> = repo.snapshot().iter().filter_map(|s| s.id).collect();
        assert_eq!(stored, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn test_failed_save_stays_dirty() {
        let repo = MemoryCollection::new(vec![home(1, 0), home(2, 1), home(3, 2)]);
        let mut engine = OrderingEngine::new();
        engine.load(&repo).await.unwrap();
        engine.move_item(1, 3, DropPosition::After).unwrap();

        repo.fail_after(1);
        assert!(engine.save(&repo).await.is_err());
        assert_eq!(engine.state(), OrderState::Dirty);
        assert_eq!(engine.ids(), vec![2, 3, 1]);
        assert!(!engine.is_saving());

        // Only the first update landed; a reload shows the partial state.
        repo.recover();
        engine.load(&repo).await.unwrap();
        assert_eq!(engine.state(), OrderState::Clean);
        assert_eq!(repo.list_calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_second_save_while_pending_is_busy() {
        let mut engine = engine_with(&[1, 2]);
        engine.move_item(2, 1, DropPosition::Before).unwrap();

        let plan = engine.begin_save(PersistStrategy::Batch).unwrap().unwrap();
        assert!(engine.is_saving());
        assert!(matches!(engine.begin_save(PersistStrategy::Batch), Err(ConsoleError::Busy)));

        engine.finish_save(plan, Ok(())).unwrap();
        assert_eq!(engine.state(), OrderState::Clean);
        assert_eq!(engine.persisted_ids(), vec![2, 1]);
    }

    #[test]
    fn test_stale_save_result_is_ignored() {
        let mut engine = engine_with(&[1, 2, 3]);
        engine.move_item(3, 1, DropPosition::Before).unwrap();
        let plan = engine.begin_save(PersistStrategy::PerEntity).unwrap().unwrap();

        engine.replace(vec![home(1, 0), home(2, 1), home(3, 2)]);
        engine.finish_save(plan, Ok(())).unwrap();

        assert_eq!(engine.persisted_ids(), vec![1, 2, 3]);
        assert_eq!(engine.state(), OrderState::Clean);
    }
}
