//! Request-state stores
//!
//! `ItemStore` owns the item slots and the flat item cache; `MenuStore` owns
//! the menu slots. Each request is started with `begin_*` and finished with
//! `complete_*`, which records the outcome in the slot and applies the cache
//! effect of a confirmed response.

use tracing::debug;

use menu_core::domain::{Item, Menu, MenuDetail};

use crate::cache::ItemCache;
use crate::error::{ClientError, ErrorPayload};
use crate::state::{ApiState, Applied, Ticket};

/// Record `result` in `slot`. Errors are handed back after being stored.
fn record<T: Default>(
    slot: &mut ApiState<T>,
    seq: u64,
    result: Result<T, ClientError>,
) -> Result<Applied, ClientError> {
    let current = match result {
        Ok(payload) => slot.fulfill(seq, payload),
        Err(err) => {
            slot.reject(seq, ErrorPayload::from(&err));
            return Err(err);
        }
    };

    if current {
        Ok(Applied::Current)
    } else {
        Ok(Applied::Superseded)
    }
}

#[derive(Debug, Default)]
pub struct ItemStore {
    create_item: ApiState<Option<Item>>,
    edit_item: ApiState<Option<Item>>,
    delete_item: ApiState<Option<Item>>,
    items: ApiState<Vec<Item>>,
    item: ApiState<Option<Item>>,
    cache: ItemCache,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache(&self) -> &ItemCache {
        &self.cache
    }

    pub fn generation(&self) -> u64 {
        self.cache.generation()
    }

    pub fn create_item(&self) -> &ApiState<Option<Item>> {
        &self.create_item
    }

    pub fn edit_item(&self) -> &ApiState<Option<Item>> {
        &self.edit_item
    }

    pub fn delete_item(&self) -> &ApiState<Option<Item>> {
        &self.delete_item
    }

    pub fn items(&self) -> &ApiState<Vec<Item>> {
        &self.items
    }

    pub fn item(&self) -> &ApiState<Option<Item>> {
        &self.item
    }

    fn ticket(&self, seq: u64) -> Ticket {
        Ticket {
            generation: self.cache.generation(),
            seq,
        }
    }

    fn is_stale(&self, ticket: Ticket) -> bool {
        if ticket.generation != self.cache.generation() {
            debug!(
                "Dropping completion from generation {} (current {})",
                ticket.generation,
                self.cache.generation()
            );
            return true;
        }
        false
    }

    pub fn begin_create(&mut self) -> Ticket {
        let seq = self.create_item.begin();
        self.ticket(seq)
    }

    pub fn begin_edit(&mut self) -> Ticket {
        let seq = self.edit_item.begin();
        self.ticket(seq)
    }

    pub fn begin_delete(&mut self) -> Ticket {
        let seq = self.delete_item.begin();
        self.ticket(seq)
    }

    pub fn begin_items(&mut self) -> Ticket {
        let seq = self.items.begin();
        self.ticket(seq)
    }

    pub fn begin_item(&mut self) -> Ticket {
        let seq = self.item.begin();
        self.ticket(seq)
    }

    /// A created item is appended to the cache.
    pub fn complete_create(
        &mut self,
        ticket: Ticket,
        result: Result<Item, ClientError>,
    ) -> Result<Applied, ClientError> {
        if self.is_stale(ticket) {
            return Ok(Applied::Stale);
        }
        if let Ok(item) = &result {
            self.cache.insert(item.clone());
        }
        record(&mut self.create_item, ticket.seq, result.map(Some))
    }

    /// An edited item replaces its cached copy.
    pub fn complete_edit(
        &mut self,
        ticket: Ticket,
        result: Result<Item, ClientError>,
    ) -> Result<Applied, ClientError> {
        if self.is_stale(ticket) {
            return Ok(Applied::Stale);
        }
        if let Ok(item) = &result {
            self.cache.replace(item.clone());
        }
        record(&mut self.edit_item, ticket.seq, result.map(Some))
    }

    /// A deleted item takes its cached subtree with it.
    pub fn complete_delete(
        &mut self,
        ticket: Ticket,
        result: Result<Item, ClientError>,
    ) -> Result<Applied, ClientError> {
        if self.is_stale(ticket) {
            return Ok(Applied::Stale);
        }
        if let Ok(item) = &result {
            self.cache.remove_subtree(&item.id);
        }
        record(&mut self.delete_item, ticket.seq, result.map(Some))
    }

    /// A fetched batch is merged into the cache.
    pub fn complete_items(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<Item>, ClientError>,
    ) -> Result<Applied, ClientError> {
        if self.is_stale(ticket) {
            return Ok(Applied::Stale);
        }
        if let Ok(items) = &result {
            self.cache.merge(items);
        }
        record(&mut self.items, ticket.seq, result)
    }

    /// A fetched item refreshes its cached copy; unknown items stay out of the cache.
    pub fn complete_item(
        &mut self,
        ticket: Ticket,
        result: Result<Item, ClientError>,
    ) -> Result<Applied, ClientError> {
        if self.is_stale(ticket) {
            return Ok(Applied::Stale);
        }
        if let Ok(item) = &result {
            self.cache.replace(item.clone());
        }
        record(&mut self.item, ticket.seq, result.map(Some))
    }

    /// Merge items obtained elsewhere (e.g. a menu's root items).
    pub fn update_cached(&mut self, generation: u64, items: &[Item]) -> Applied {
        if generation != self.cache.generation() {
            return Applied::Stale;
        }
        self.cache.merge(items);
        Applied::Current
    }

    /// Empty the cache and every slot. Completions started before are dropped.
    pub fn reset(&mut self) {
        self.cache.reset();
        self.create_item.reset();
        self.edit_item.reset();
        self.delete_item.reset();
        self.items.reset();
        self.item.reset();
    }
}

#[derive(Debug, Default)]
pub struct MenuStore {
    create_menu: ApiState<Option<Menu>>,
    edit_menu: ApiState<Option<Menu>>,
    delete_menu: ApiState<Option<Menu>>,
    menus: ApiState<Vec<Menu>>,
    menu: ApiState<Option<MenuDetail>>,
}

impl MenuStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_menu(&self) -> &ApiState<Option<Menu>> {
        &self.create_menu
    }

    pub fn edit_menu(&self) -> &ApiState<Option<Menu>> {
        &self.edit_menu
    }

    pub fn delete_menu(&self) -> &ApiState<Option<Menu>> {
        &self.delete_menu
    }

    pub fn menus(&self) -> &ApiState<Vec<Menu>> {
        &self.menus
    }

    pub fn menu(&self) -> &ApiState<Option<MenuDetail>> {
        &self.menu
    }

    pub fn begin_create(&mut self) -> u64 {
        self.create_menu.begin()
    }

    pub fn begin_edit(&mut self) -> u64 {
        self.edit_menu.begin()
    }

    pub fn begin_delete(&mut self) -> u64 {
        self.delete_menu.begin()
    }

    pub fn begin_menus(&mut self) -> u64 {
        self.menus.begin()
    }

    pub fn begin_menu(&mut self) -> u64 {
        self.menu.begin()
    }

    pub fn complete_create(&mut self, seq: u64, result: Result<Menu, ClientError>) -> Result<Applied, ClientError> {
        record(&mut self.create_menu, seq, result.map(Some))
    }

    pub fn complete_edit(&mut self, seq: u64, result: Result<Menu, ClientError>) -> Result<Applied, ClientError> {
        record(&mut self.edit_menu, seq, result.map(Some))
    }

    pub fn complete_delete(&mut self, seq: u64, result: Result<Menu, ClientError>) -> Result<Applied, ClientError> {
        record(&mut self.delete_menu, seq, result.map(Some))
    }

    pub fn complete_menus(&mut self, seq: u64, result: Result<Vec<Menu>, ClientError>) -> Result<Applied, ClientError> {
        record(&mut self.menus, seq, result)
    }

    pub fn complete_menu(
        &mut self,
        seq: u64,
        result: Result<MenuDetail, ClientError>,
    ) -> Result<Applied, ClientError> {
        record(&mut self.menu, seq, result.map(Some))
    }

    pub fn clear_menu(&mut self) {
        self.menu.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    use uuid::Uuid;

    const CREATED_AT: DateTime<Utc> = DateTime::<Utc>::UNIX_EPOCH;

    fn item(id: u128, parent: Option<u128>, depth: i32) -> Item {
        Item {
            id: Uuid::from_u128(id),
            name: format!("item-{}", id),
            depth,
            parent_id: parent.map(Uuid::from_u128),
            menu_id: Uuid::nil(),
            created_at: CREATED_AT,
            modified_at: None,
        }
    }

    fn not_found() -> ClientError {
        ClientError::Api {
            status: 404,
            code: "NOT_FOUND".to_string(),
            message: "Item not found".to_string(),
        }
    }

    #[test]
    fn test_items_merge_into_cache() {
        let mut store = ItemStore::new();
        let ticket = store.begin_items();
        assert!(store.items().loading);

        let applied = store
            .complete_items(ticket, Ok(vec![item(1, None, 0), item(2, Some(1), 1)]))
            .unwrap();
        assert_eq!(applied, Applied::Current);
        assert!(store.items().successful);
        assert_eq!(store.cache().len(), 2);
    }

    #[test]
    fn test_create_appends_and_edit_replaces() {
        let mut store = ItemStore::new();
        let ticket = store.begin_create();
        store.complete_create(ticket, Ok(item(1, None, 0))).unwrap();
        assert_eq!(store.create_item().payload, Some(item(1, None, 0)));

        let mut renamed = item(1, None, 0);
        renamed.name = "renamed".to_string();
        let ticket = store.begin_edit();
        store.complete_edit(ticket, Ok(renamed)).unwrap();

        assert_eq!(store.cache().len(), 1);
        assert_eq!(store.cache().get(&Uuid::from_u128(1)).unwrap().name, "renamed");
    }

    #[test]
    fn test_delete_purges_subtree() {
        let mut store = ItemStore::new();
        store.update_cached(store.generation(), &[item(1, None, 0), item(2, Some(1), 1), item(5, Some(2), 2)]);

        let ticket = store.begin_delete();
        store.complete_delete(ticket, Ok(item(2, Some(1), 1))).unwrap();
        assert_eq!(store.cache().ids(), vec![Uuid::from_u128(1)]);
    }

    #[test]
    fn test_error_is_recorded_and_returned() {
        let mut store = ItemStore::new();
        store.update_cached(store.generation(), &[item(1, None, 0)]);

        let ticket = store.begin_delete();
        let result = store.complete_delete(ticket, Err(not_found()));
        assert!(matches!(result, Err(ClientError::Api { status: 404, .. })));

        let slot = store.delete_item();
        assert!(!slot.loading);
        assert!(!slot.successful);
        assert_eq!(slot.error.as_ref().unwrap().code.as_deref(), Some("NOT_FOUND"));
        assert_eq!(store.cache().len(), 1);
    }

    #[test]
    fn test_superseded_fetch_still_feeds_cache() {
        let mut store = ItemStore::new();
        let first = store.begin_items();
        let second = store.begin_items();

        let applied = store.complete_items(second, Ok(vec![item(1, None, 0)])).unwrap();
        assert_eq!(applied, Applied::Current);
        let applied = store.complete_items(first, Ok(vec![item(2, Some(1), 1)])).unwrap();
        assert_eq!(applied, Applied::Superseded);

        assert_eq!(store.items().payload, vec![item(1, None, 0)]);
        assert_eq!(store.cache().len(), 2);
    }

    #[test]
    fn test_completion_after_reset_is_dropped() {
        let mut store = ItemStore::new();
        let ticket = store.begin_items();
        store.reset();

        let applied = store.complete_items(ticket, Ok(vec![item(1, None, 0)])).unwrap();
        assert_eq!(applied, Applied::Stale);
        assert!(store.cache().is_empty());
        assert!(!store.items().loading);

        let applied = store.complete_items(ticket, Err(not_found())).unwrap();
        assert_eq!(applied, Applied::Stale);
        assert!(store.items().error.is_none());
    }

    #[test]
    fn test_single_item_refreshes_cached_copy_only() {
        let mut store = ItemStore::new();
        store.update_cached(store.generation(), &[item(1, None, 0)]);

        let mut renamed = item(1, None, 0);
        renamed.name = "renamed".to_string();
        let ticket = store.begin_item();
        assert_eq!(store.complete_item(ticket, Ok(renamed.clone())).unwrap(), Applied::Current);
        assert_eq!(store.item().payload, Some(renamed));
        assert_eq!(store.cache().get(&Uuid::from_u128(1)).unwrap().name, "renamed");

        let ticket = store.begin_item();
        store.complete_item(ticket, Ok(item(9, None, 0))).unwrap();
        assert_eq!(store.item().payload, Some(item(9, None, 0)));
        assert!(!store.cache().contains(&Uuid::from_u128(9)));
    }

    #[test]
    fn test_menu_slots() {
        let mut store = MenuStore::new();
        let menu = Menu::new("Main".to_string()).unwrap();

        let seq = store.begin_menus();
        store.complete_menus(seq, Ok(vec![menu.clone()])).unwrap();
        assert_eq!(store.menus().payload, vec![menu.clone()]);

        let seq = store.begin_menu();
        store
            .complete_menu(seq, Ok(MenuDetail { menu: menu.clone(), items: vec![] }))
            .unwrap();
        assert_eq!(store.menu().payload.as_ref().unwrap().menu, menu);

        store.clear_menu();
        assert!(store.menu().payload.is_none());
    }
}
