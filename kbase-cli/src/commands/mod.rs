pub mod catalog;
pub mod config_cmd;
pub mod import;
pub mod list;
pub mod output;
pub mod sort_keys;
