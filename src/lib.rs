//! Library root for labrc
//!
//! The settings file is a single-process resource: nothing here locks it,
//! so concurrent writers from several labrc processes can lose updates.
pub mod models;

pub mod commands;
pub mod filter;
pub mod plugins;
pub mod settings;

// Convenience re-exports
pub use plugins::{import_plugin, locate, Plugin, PluginError};
pub use settings::{settings_path, SettingsError, SettingsStore};
