use serde::Deserialize;
use validator::Validate;

/// Create menu payload
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMenuRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,
}

/// Edit menu payload
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMenuRequest {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: Option<String>,
}
