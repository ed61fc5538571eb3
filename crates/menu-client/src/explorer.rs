//! Menu explorer session
//!
//! Drives the item tree of one selected menu: selecting a menu, expanding
//! and collapsing nodes, editing items through drafts, and menu CRUD. State
//! lives behind a `parking_lot::Mutex` that is only held between awaits,
//! so fetches can overlap and each completion is applied on its own.

use std::collections::HashSet;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use menu_core::domain::{Item, Menu};
use menu_core::tree::TreeNode;

use crate::api::{CreateItem, MenuApiClient};
use crate::error::ClientError;
use crate::expansion;
use crate::query::ItemQuery;
use crate::state::{Applied, Ticket};
use crate::store::{ItemStore, MenuStore};

/// Form model for editing an existing item or creating a child
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    /// `None` for an item not saved yet
    pub id: Option<Uuid>,
    pub name: String,
    pub depth: i32,
    pub parent_id: Option<Uuid>,
    pub menu_id: Uuid,
    pub parent_name: Option<String>,
}

impl ItemDraft {
    fn edit(item: &Item, parent: Option<&Item>) -> Self {
        Self {
            id: Some(item.id),
            name: item.name.clone(),
            depth: item.depth,
            parent_id: item.parent_id,
            menu_id: item.menu_id,
            parent_name: parent.map(|p| p.name.clone()),
        }
    }

    fn child_of(parent: &Item) -> Self {
        Self {
            id: None,
            name: String::new(),
            depth: parent.depth + 1,
            parent_id: Some(parent.id),
            menu_id: parent.menu_id,
            parent_name: Some(parent.name.clone()),
        }
    }

    /// Root-level draft for an empty or flat menu
    pub fn root(menu_id: Uuid) -> Self {
        Self {
            id: None,
            name: String::new(),
            depth: 0,
            parent_id: None,
            menu_id,
            parent_name: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Default)]
struct ExplorerState {
    menus: MenuStore,
    items: ItemStore,
    selected_menu: Option<Uuid>,
    selected_item: Option<Uuid>,
    expanded: HashSet<Uuid>,
}

impl ExplorerState {
    /// Forget expansion and selection of items no longer cached.
    fn prune(&mut self) {
        let cache = self.items.cache();
        self.expanded.retain(|id| cache.contains(id));
        if let Some(id) = self.selected_item {
            if !cache.contains(&id) {
                self.selected_item = None;
            }
        }
    }
}

pub struct MenuExplorer {
    api: MenuApiClient,
    state: Mutex<ExplorerState>,
}

impl MenuExplorer {
    pub fn new(api: MenuApiClient) -> Self {
        Self {
            api,
            state: Mutex::new(ExplorerState::default()),
        }
    }

    // ==================== Menus ====================

    pub async fn load_menus(&self) -> Result<Applied, ClientError> {
        let seq = self.state.lock().menus.begin_menus();
        let result = self.api.list_menus().await;
        self.state.lock().menus.complete_menus(seq, result)
    }

    /// Switch to `menu_id`: the item cache starts over and the menu's root
    /// items are loaded into it.
    pub async fn select_menu(&self, menu_id: Uuid) -> Result<Applied, ClientError> {
        let ticket = {
            let mut state = self.state.lock();
            state.items.reset();
            state.expanded.clear();
            state.selected_item = None;
            state.selected_menu = Some(menu_id);
            Ticket {
                generation: state.items.generation(),
                seq: state.menus.begin_menu(),
            }
        };
        info!("Selected menu {}", menu_id);

        let result = self.api.get_menu(&menu_id).await;

        let mut state = self.state.lock();
        if ticket.generation != state.items.generation() {
            debug!("Discarding menu {} loaded after a menu switch", menu_id);
            return Ok(Applied::Stale);
        }

        let roots = result.as_ref().map(|detail| detail.items.clone()).ok();
        let applied = state.menus.complete_menu(ticket.seq, result)?;
        if let Some(roots) = roots {
            state.items.update_cached(ticket.generation, &roots);
        }
        Ok(applied)
    }

    pub async fn create_menu(&self, name: &str) -> Result<Applied, ClientError> {
        let seq = self.state.lock().menus.begin_create();
        let result = self.api.create_menu(name).await;
        let applied = self.state.lock().menus.complete_create(seq, result)?;
        self.load_menus().await?;
        Ok(applied)
    }

    pub async fn edit_menu(&self, menu_id: Uuid, name: &str) -> Result<Applied, ClientError> {
        let seq = self.state.lock().menus.begin_edit();
        let result = self.api.update_menu(&menu_id, name).await;
        let applied = self.state.lock().menus.complete_edit(seq, result)?;
        self.load_menus().await?;
        Ok(applied)
    }

    /// Deleting the selected menu also clears the tree.
    pub async fn delete_menu(&self, menu_id: Uuid) -> Result<Applied, ClientError> {
        let seq = self.state.lock().menus.begin_delete();
        let result = self.api.delete_menu(&menu_id).await;
        let applied = {
            let mut state = self.state.lock();
            let applied = state.menus.complete_delete(seq, result)?;
            if state.selected_menu == Some(menu_id) {
                state.selected_menu = None;
                state.selected_item = None;
                state.expanded.clear();
                state.items.reset();
                state.menus.clear_menu();
            }
            applied
        };
        self.load_menus().await?;
        Ok(applied)
    }

    // ==================== Tree ====================

    /// Fetch the level below `node_id` and mark it expanded.
    ///
    /// Returns `None` when nothing was fetched (no menu selected or the node
    /// is not cached); the node is then left collapsed.
    pub async fn expand(&self, node_id: Uuid) -> Result<Option<Applied>, ClientError> {
        let request = {
            let mut state = self.state.lock();
            let query = state
                .selected_menu
                .and_then(|menu_id| expansion::next_level(state.items.cache(), &node_id, menu_id));
            query.map(|query| {
                state.expanded.insert(node_id);
                (query, state.items.begin_items())
            })
        };

        match request {
            Some((query, ticket)) => self.fetch_items(query, ticket).await.map(Some),
            None => {
                warn!("Cannot expand {}: not in the loaded tree", node_id);
                Ok(None)
            }
        }
    }

    pub fn collapse(&self, node_id: &Uuid) {
        self.state.lock().expanded.remove(node_id);
    }

    pub fn collapse_all(&self) {
        self.state.lock().expanded.clear();
    }

    /// Load the rest of the selected menu and expand every node.
    pub async fn expand_all(&self) -> Result<Option<Applied>, ClientError> {
        let request = {
            let mut state = self.state.lock();
            let query = state
                .selected_menu
                .map(|menu_id| expansion::everything(state.items.cache(), menu_id));
            query.map(|query| (query, state.items.begin_items()))
        };
        let Some((query, ticket)) = request else {
            return Ok(None);
        };

        let applied = self.fetch_items(query, ticket).await?;
        if applied != Applied::Stale {
            let mut state = self.state.lock();
            let ids = state.items.cache().ids();
            state.expanded.extend(ids);
        }
        Ok(Some(applied))
    }

    /// Select an item for editing. The level below it is fetched as on expand.
    pub async fn select_item(&self, item_id: Uuid) -> Result<Option<ItemDraft>, ClientError> {
        let (draft, request) = {
            let mut state = self.state.lock();
            let Some(item) = state.items.cache().get(&item_id).cloned() else {
                return Ok(None);
            };
            state.selected_item = Some(item_id);

            let cache = state.items.cache();
            let parent = item.parent_id.and_then(|id| cache.get(&id));
            let draft = ItemDraft::edit(&item, parent);
            let query = state
                .selected_menu
                .and_then(|menu_id| expansion::next_level(cache, &item_id, menu_id));
            let request = query.map(|query| (query, state.items.begin_items()));
            (draft, request)
        };

        if let Some((query, ticket)) = request {
            self.fetch_items(query, ticket).await?;
        }
        Ok(Some(draft))
    }

    pub fn clear_selection(&self) {
        self.state.lock().selected_item = None;
    }

    /// Draft for a new child under `parent_id`, if cached.
    pub fn add_child_draft(&self, parent_id: &Uuid) -> Option<ItemDraft> {
        let state = self.state.lock();
        state.items.cache().get(parent_id).map(ItemDraft::child_of)
    }

    /// Create or rename, depending on whether the draft has an id.
    pub async fn save(&self, draft: &ItemDraft) -> Result<Applied, ClientError> {
        match draft.id {
            Some(id) => {
                let ticket = self.state.lock().items.begin_edit();
                let result = self.api.update_item(&id, &draft.name).await;
                self.state.lock().items.complete_edit(ticket, result)
            }
            None => {
                let body = CreateItem {
                    name: draft.name.clone(),
                    depth: draft.depth,
                    menu_id: draft.menu_id,
                    parent_id: draft.parent_id,
                };
                let ticket = self.state.lock().items.begin_create();
                let result = self.api.create_item(&body).await;
                self.state.lock().items.complete_create(ticket, result)
            }
        }
    }

    pub async fn delete_item(&self, item_id: Uuid) -> Result<Applied, ClientError> {
        let ticket = self.state.lock().items.begin_delete();
        let result = self.api.delete_item(&item_id).await;

        let mut state = self.state.lock();
        let applied = state.items.complete_delete(ticket, result)?;
        state.prune();
        Ok(applied)
    }

    /// Load one item into the `item` slot, refreshing its cached copy.
    pub async fn load_item(&self, item_id: Uuid) -> Result<Applied, ClientError> {
        let ticket = self.state.lock().items.begin_item();
        let result = self.api.get_item(&item_id).await;
        self.state.lock().items.complete_item(ticket, result)
    }

    /// `ticket` must come from the same critical section that built `query`.
    async fn fetch_items(&self, query: ItemQuery, ticket: Ticket) -> Result<Applied, ClientError> {
        let result = self.api.list_items(&query).await;
        self.state.lock().items.complete_items(ticket, result)
    }

    // ==================== Views ====================

    pub fn tree(&self) -> Vec<TreeNode> {
        self.state.lock().items.cache().tree()
    }

    pub fn selected_menu(&self) -> Option<Uuid> {
        self.state.lock().selected_menu
    }

    pub fn selected_item(&self) -> Option<Uuid> {
        self.state.lock().selected_item
    }

    pub fn is_expanded(&self, id: &Uuid) -> bool {
        self.state.lock().expanded.contains(id)
    }

    pub fn expanded(&self) -> HashSet<Uuid> {
        self.state.lock().expanded.clone()
    }

    pub fn menus(&self) -> Vec<Menu> {
        self.state.lock().menus.menus().payload.clone()
    }

    pub fn cached_items(&self) -> Vec<Item> {
        self.state.lock().items.cache().items().to_vec()
    }

    /// Read the item store under the lock.
    pub fn with_items<R>(&self, f: impl FnOnce(&ItemStore) -> R) -> R {
        f(&self.state.lock().items)
    }

    /// Read the menu store under the lock.
    pub fn with_menus<R>(&self, f: impl FnOnce(&MenuStore) -> R) -> R {
        f(&self.state.lock().menus)
    }
}
