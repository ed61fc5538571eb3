//! Tree assembly over flat item lists
//!
//! Items arrive flat, each pointing at its parent by id. These helpers turn a
//! flat list into a forest, merge freshly fetched batches into an existing
//! list, and collect the subtree below an id.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Item;

/// A node of the assembled tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub key: Uuid,
    pub title: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Number of nodes in this subtree, including `self`
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }

    pub fn find(&self, key: &Uuid) -> Option<&TreeNode> {
        if &self.key == key {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(key))
    }
}

/// Build a forest from a flat list.
///
/// Items without a parent become roots. Everything else hangs under the item
/// whose id equals its parent id; items whose parent is absent are dropped.
/// Duplicate ids collapse to the last occurrence. Siblings keep input order.
pub fn build_tree(items: &[Item]) -> Vec<TreeNode> {
    let items = merge_items(&[], items);

    let mut children: HashMap<Uuid, Vec<&Item>> = HashMap::new();
    let mut roots = Vec::new();

    for item in &items {
        match item.parent_id {
            Some(parent_id) => children.entry(parent_id).or_default().push(item),
            None => roots.push(item),
        }
    }

    roots
        .into_iter()
        .map(|root| attach(root, &children))
        .collect()
}

// Parent links are unique per id after dedup, so a walk from a root can never revisit a node.
fn attach(item: &Item, children: &HashMap<Uuid, Vec<&Item>>) -> TreeNode {
    TreeNode {
        key: item.id,
        title: item.name.clone(),
        children: children
            .get(&item.id)
            .map(|kids| kids.iter().map(|kid| attach(kid, children)).collect())
            .unwrap_or_default(),
    }
}

/// Merge `incoming` into `existing`, overwriting by id.
///
/// Existing ids keep their position with the incoming value; new ids are
/// appended in incoming order.
pub fn merge_items(existing: &[Item], incoming: &[Item]) -> Vec<Item> {
    let mut merged: Vec<Item> = Vec::with_capacity(existing.len() + incoming.len());
    let mut index: HashMap<Uuid, usize> = HashMap::with_capacity(merged.capacity());

    for item in existing.iter().chain(incoming) {
        match index.get(&item.id) {
            Some(&pos) => merged[pos] = item.clone(),
            None => {
                index.insert(item.id, merged.len());
                merged.push(item.clone());
            }
        }
    }

    merged
}

/// Ids of `root_id` and every item below it.
pub fn subtree_ids(items: &[Item], root_id: Uuid) -> HashSet<Uuid> {
    let mut children: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for item in items {
        if let Some(parent_id) = item.parent_id {
            children.entry(parent_id).or_default().push(item.id);
        }
    }

    let mut found = HashSet::from([root_id]);
    let mut stack = vec![root_id];
    while let Some(id) = stack.pop() {
        for &child in children.get(&id).into_iter().flatten() {
            if found.insert(child) {
                stack.push(child);
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(id: u128, parent: Option<u128>, name: &str) -> Item {
        Item {
            id: Uuid::from_u128(id),
            name: name.to_string(),
            depth: 0,
            parent_id: parent.map(Uuid::from_u128),
            menu_id: Uuid::nil(),
            created_at: Utc::now(),
            modified_at: None,
        }
    }

    fn keys(nodes: &[TreeNode]) -> Vec<Uuid> {
        nodes.iter().map(|n| n.key).collect()
    }

    #[test]
    fn test_build_one_root_with_two_children() {
        let items = vec![item(1, None, "a"), item(2, Some(1), "b"), item(3, Some(1), "c")];
        let tree = build_tree(&items);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].key, Uuid::from_u128(1));
        assert_eq!(keys(&tree[0].children), vec![Uuid::from_u128(2), Uuid::from_u128(3)]);
        assert!(tree[0].children.iter().all(|c| c.children.is_empty()));
    }

    #[test]
    fn test_build_places_every_reachable_item_once() {
        let items = vec![
            item(4, Some(2), "d"),
            item(1, None, "a"),
            item(2, Some(1), "b"),
            item(5, None, "e"),
            item(6, Some(5), "f"),
        ];
        let tree = build_tree(&items);

        assert_eq!(keys(&tree), vec![Uuid::from_u128(1), Uuid::from_u128(5)]);
        assert_eq!(tree.iter().map(TreeNode::size).sum::<usize>(), items.len());
        let b = tree[0].find(&Uuid::from_u128(2)).unwrap();
        assert_eq!(keys(&b.children), vec![Uuid::from_u128(4)]);
    }

    #[test]
    fn test_build_drops_orphans_and_cycles() {
        let items = vec![
            item(1, None, "root"),
            item(2, Some(99), "orphan"),
            item(3, Some(3), "self"),
            item(4, Some(5), "cycle-a"),
            item(5, Some(4), "cycle-b"),
        ];
        let tree = build_tree(&items);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].size(), 1);
    }

    #[test]
    fn test_build_duplicate_ids_use_last_value() {
        let items = vec![item(1, None, "old"), item(1, None, "new")];
        let tree = build_tree(&items);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].title, "new");
    }

    #[test]
    fn test_build_empty() {
        assert!(build_tree(&[]).is_empty());
    }

    #[test]
    fn test_merge_prefers_incoming() {
        let existing = vec![item(1, None, "a"), item(2, Some(1), "b")];
        let incoming = vec![item(2, Some(1), "b2"), item(3, Some(1), "c")];
        let merged = merge_items(&existing, &incoming);

        let names: Vec<_> = merged.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b2", "c"]);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let items = vec![item(1, None, "a"), item(2, Some(1), "b")];
        assert_eq!(merge_items(&items, &items), items);
    }

    #[test]
    fn test_subtree_ids_walks_all_levels() {
        let items = vec![
            item(1, None, "a"),
            item(2, Some(1), "b"),
            item(5, Some(2), "e"),
            item(7, Some(5), "g"),
            item(3, Some(1), "c"),
        ];
        let ids = subtree_ids(&items, Uuid::from_u128(2));
        assert_eq!(
            ids,
            HashSet::from([Uuid::from_u128(2), Uuid::from_u128(5), Uuid::from_u128(7)])
        );
    }
}
