// ============================================================================
// Menu Core - Item Entity
// File: crates/menu-core/src/domain/item.rs
// Description: Node in a menu's item hierarchy
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use menu_shared::constants::ROOT_DEPTH;

/// Item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,

    #[validate(length(min = 1, max = 255, message = "Item name must be between 1 and 255 characters"))]
    pub name: String,

    /// Distance from the root item (root = 0)
    #[validate(range(min = 0, message = "Depth must not be negative"))]
    pub depth: i32,

    pub parent_id: Option<Uuid>,
    pub menu_id: Uuid,

    // Audit fields
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub modified_at: Option<DateTime<Utc>>,
}

/// Input for creating an item
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub depth: i32,
    pub menu_id: Uuid,
    pub parent_id: Option<Uuid>,
}

impl Item {
    pub fn new(new_item: NewItem) -> Result<Self, validator::ValidationErrors> {
        let item = Self {
            id: Uuid::new_v4(),
            name: new_item.name.trim().to_string(),
            depth: new_item.depth,
            parent_id: new_item.parent_id,
            menu_id: new_item.menu_id,
            created_at: Utc::now(),
            modified_at: None,
        };

        item.validate()?;
        Ok(item)
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none() && self.depth == ROOT_DEPTH
    }

    /// Rename in place. The item is left untouched when the new name is invalid.
    pub fn rename(&mut self, name: &str) -> Result<(), validator::ValidationErrors> {
        let mut renamed = self.clone();
        renamed.name = name.trim().to_string();
        renamed.validate()?;

        self.name = renamed.name;
        self.modified_at = Some(Utc::now());
        Ok(())
    }
}

/// Filter for listing items. Empty lists and `None` mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    pub menu_id: Option<Uuid>,
    pub parent_ids: Vec<Uuid>,
    /// Only items at this depth or deeper
    pub min_depth: Option<i32>,
    pub exclude_ids: Vec<Uuid>,
}

impl ItemFilter {
    pub fn for_menu(menu_id: Uuid) -> Self {
        Self {
            menu_id: Some(menu_id),
            ..Self::default()
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        if let Some(menu_id) = self.menu_id {
            if item.menu_id != menu_id {
                return false;
            }
        }

        if !self.parent_ids.is_empty() {
            match item.parent_id {
                Some(parent_id) if self.parent_ids.contains(&parent_id) => {}
                _ => return false,
            }
        }

        if let Some(min_depth) = self.min_depth {
            if item.depth < min_depth {
                return false;
            }
        }

        !self.exclude_ids.contains(&item.id)
    }
}
