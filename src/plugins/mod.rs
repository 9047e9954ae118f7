//! Plugin discovery: ordered search over candidate install directories,
//! with scoped augmentation of the process-wide search list.
pub mod locator;
pub mod manifest;
pub mod search_path;

pub use locator::{import_plugin, locate, ImportError, Plugin, PluginError, Resolved};
pub use manifest::Manifest;
pub use search_path::SearchPathGuard;
