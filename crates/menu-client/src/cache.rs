//! Flat item cache
//!
//! Holds the items fetched so far for the selected menu, keyed by id. The
//! cache is owned by the item store and reset at menu-switch boundaries; each
//! reset starts a new generation so completions issued earlier can be told
//! apart.

use std::collections::{HashMap, HashSet};

use tracing::debug;
use uuid::Uuid;

use menu_core::domain::Item;
use menu_core::tree::{build_tree, merge_items, subtree_ids, TreeNode};

#[derive(Debug, Clone, Default)]
pub struct ItemCache {
    items: Vec<Item>,
    /// id -> position in `items`
    index: HashMap<Uuid, usize>,
    generation: u64,
}

impl ItemCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &Uuid) -> Option<&Item> {
        self.index.get(id).map(|&pos| &self.items[pos])
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.index.contains_key(id)
    }

    pub fn ids(&self) -> Vec<Uuid> {
        self.items.iter().map(|i| i.id).collect()
    }

    /// Direct children of `id` currently known
    pub fn children_of(&self, id: &Uuid) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|i| i.parent_id.as_ref() == Some(id))
            .collect()
    }

    /// Merge a fetched batch; incoming records win on shared ids.
    pub fn merge(&mut self, incoming: &[Item]) {
        self.items = merge_items(&self.items, incoming);
        self.reindex();
        debug!("Merged {} items, cache holds {}", incoming.len(), self.items.len());
    }

    pub fn insert(&mut self, item: Item) {
        self.merge(std::slice::from_ref(&item));
    }

    /// Replace a known item. Unknown ids are ignored.
    pub fn replace(&mut self, item: Item) -> bool {
        match self.index.get(&item.id) {
            Some(&pos) => {
                self.items[pos] = item;
                true
            }
            None => false,
        }
    }

    /// Drop `id` and everything cached below it. Returns the removed ids.
    pub fn remove_subtree(&mut self, id: &Uuid) -> HashSet<Uuid> {
        let doomed = subtree_ids(&self.items, *id);
        self.items.retain(|i| !doomed.contains(&i.id));
        self.reindex();
        debug!("Removed {} cached items under {}", doomed.len(), id);
        doomed
    }

    /// Empty the cache and start a new generation.
    pub fn reset(&mut self) {
        self.items.clear();
        self.index.clear();
        self.generation += 1;
        debug!("Item cache reset, generation {}", self.generation);
    }

    pub fn tree(&self) -> Vec<TreeNode> {
        build_tree(&self.items)
    }

    fn reindex(&mut self) {
        self.index = self
            .items
            .iter()
            .enumerate()
            .map(|(pos, item)| (item.id, pos))
            .collect();
    }
}
