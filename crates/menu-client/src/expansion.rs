//! Lazy expansion
//!
//! Decides what to fetch when a node is opened. The query asks for the node's
//! children and, one level further, the children of the node's already cached
//! children, so the tree can tell which of them are expandable. Everything
//! already cached is excluded.

use tracing::debug;
use uuid::Uuid;

use crate::cache::ItemCache;
use crate::query::ItemQuery;

/// Query for the level below `node_id`, or `None` when the node is not cached.
pub fn next_level(cache: &ItemCache, node_id: &Uuid, menu_id: Uuid) -> Option<ItemQuery> {
    let node = cache.get(node_id)?;

    let mut parent_ids: Vec<Uuid> = cache.children_of(node_id).iter().map(|i| i.id).collect();
    parent_ids.push(node.id);

    debug!(
        "Next level of {} (depth {}): {} parents, {} excluded",
        node.id,
        node.depth,
        parent_ids.len(),
        cache.len()
    );

    Some(ItemQuery {
        menu_id: Some(menu_id),
        parent_ids,
        depth: Some(node.depth + 1),
        exclude_ids: cache.ids(),
    })
}

/// Query for every item of the menu not cached yet.
pub fn everything(cache: &ItemCache, menu_id: Uuid) -> ItemQuery {
    ItemQuery {
        menu_id: Some(menu_id),
        exclude_ids: cache.ids(),
        ..ItemQuery::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    use menu_core::domain::Item;

    const CREATED_AT: DateTime<Utc> = DateTime::<Utc>::UNIX_EPOCH;

    fn item(id: u128, parent: Option<u128>, depth: i32) -> Item {
        Item {
            id: Uuid::from_u128(id),
            name: format!("item-{}", id),
            depth,
            parent_id: parent.map(Uuid::from_u128),
            menu_id: Uuid::from_u128(100),
            created_at: CREATED_AT,
            modified_at: None,
        }
    }

    #[test]
    fn test_next_level_looks_one_level_ahead() {
        let mut cache = ItemCache::new();
        cache.merge(&[item(1, None, 0), item(2, Some(1), 1), item(3, Some(1), 1), item(4, None, 0)]);

        let menu_id = Uuid::from_u128(100);
        let query = next_level(&cache, &Uuid::from_u128(1), menu_id).unwrap();

        assert_eq!(query.menu_id, Some(menu_id));
        assert_eq!(
            query.parent_ids,
            vec![Uuid::from_u128(2), Uuid::from_u128(3), Uuid::from_u128(1)]
        );
        assert_eq!(query.depth, Some(1));
        assert_eq!(query.exclude_ids, cache.ids());
    }

    #[test]
    fn test_next_level_without_cached_children() {
        let mut cache = ItemCache::new();
        cache.merge(&[item(1, None, 0), item(2, Some(1), 1)]);

        let query = next_level(&cache, &Uuid::from_u128(2), Uuid::from_u128(100)).unwrap();
        assert_eq!(query.parent_ids, vec![Uuid::from_u128(2)]);
        assert_eq!(query.depth, Some(2));
    }

    #[test]
    fn test_next_level_unknown_node() {
        let cache = ItemCache::new();
        assert!(next_level(&cache, &Uuid::from_u128(1), Uuid::from_u128(100)).is_none());
    }

    #[test]
    fn test_everything_excludes_cached() {
        let mut cache = ItemCache::new();
        cache.merge(&[item(1, None, 0)]);

        let query = everything(&cache, Uuid::from_u128(100));
        assert!(query.parent_ids.is_empty());
        assert_eq!(query.depth, None);
        assert_eq!(query.exclude_ids, vec![Uuid::from_u128(1)]);
    }
}
