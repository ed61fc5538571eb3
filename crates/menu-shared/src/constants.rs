//! Application-wide constants

pub const ROOT_DEPTH: i32 = 0;
pub const LIST_SEPARATOR: char = ',';
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_FILE_PREFIX: &str = "menu-admin";
