//! `GET /item` query parameters

use uuid::Uuid;

use menu_shared::utils::join_ids;

/// Filter sent to `GET /item`. Empty lists and `None` are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemQuery {
    pub menu_id: Option<Uuid>,
    pub parent_ids: Vec<Uuid>,
    /// Backend returns items at this depth or deeper
    pub depth: Option<i32>,
    pub exclude_ids: Vec<Uuid>,
}

impl ItemQuery {
    /// `?key=value&...`, or an empty string when no parameter is set.
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();

        if let Some(menu_id) = self.menu_id {
            pairs.push(format!("menuId={}", menu_id));
        }
        if !self.parent_ids.is_empty() {
            pairs.push(format!("parentIds={}", join_ids(&self.parent_ids)));
        }
        if let Some(depth) = self.depth {
            pairs.push(format!("depth={}", depth));
        }
        if !self.exclude_ids.is_empty() {
            pairs.push(format!("excludeIds={}", join_ids(&self.exclude_ids)));
        }

        if pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", pairs.join("&"))
        }
    }
}
