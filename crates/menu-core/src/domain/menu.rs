// ============================================================================
// Menu Core - Menu Entity
// File: crates/menu-core/src/domain/menu.rs
// Description: Top-level named container owning a tree of items
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::item::Item;

/// Menu entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: Uuid,

    #[validate(length(min = 1, max = 255, message = "Menu name must be between 1 and 255 characters"))]
    pub name: String,

    // Audit fields
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Menu {
    pub fn new(name: String) -> Result<Self, validator::ValidationErrors> {
        let menu = Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            created_at: Utc::now(),
            modified_at: None,
        };

        menu.validate()?;
        Ok(menu)
    }

    /// Rename in place. The menu is left untouched when the new name is invalid.
    pub fn rename(&mut self, name: &str) -> Result<(), validator::ValidationErrors> {
        let mut renamed = self.clone();
        renamed.name = name.trim().to_string();
        renamed.validate()?;

        self.name = renamed.name;
        self.modified_at = Some(Utc::now());
        Ok(())
    }
}

/// A menu together with (at least) its root-level items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuDetail {
    #[serde(flatten)]
    pub menu: Menu,
    pub items: Vec<Item>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_menu_trims_name() {
        let menu = Menu::new("  Main navigation ".to_string()).unwrap();
        assert_eq!(menu.name, "Main navigation");
        assert!(menu.modified_at.is_none());
    }

    #[test]
    fn test_create_menu_rejects_blank_name() {
        assert!(Menu::new("   ".to_string()).is_err());
        assert!(Menu::new("x".repeat(256)).is_err());
    }

    #[test]
    fn test_rename_keeps_old_name_on_error() {
        let mut menu = Menu::new("Footer".to_string()).unwrap();
        assert!(menu.rename("").is_err());
        assert_eq!(menu.name, "Footer");

        menu.rename("Sidebar").unwrap();
        assert_eq!(menu.name, "Sidebar");
        assert!(menu.modified_at.is_some());
    }

    #[test]
    fn test_detail_serializes_flat() {
        let menu = Menu::new("Footer".to_string()).unwrap();
        let detail = MenuDetail { menu: menu.clone(), items: vec![] };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["id"], serde_json::json!(menu.id));
        assert_eq!(json["name"], "Footer");
        assert!(json["items"].as_array().unwrap().is_empty());
    }
}
