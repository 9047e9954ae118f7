use std::path::PathBuf;

use crate::plugins::{locate, PluginError};
use crate::settings::{SettingsError, SettingsStore, PLUGINS};

/// Ordered search directories from the [plugins] section, `~` expanded.
pub fn search_dirs(store: &SettingsStore) -> Vec<PathBuf> {
    store
        .options(PLUGINS)
        .unwrap_or_default()
        .iter()
        .map(|p| PathBuf::from(shellexpand::tilde(p).into_owned()))
        .collect()
}

pub fn paths_list(store: &SettingsStore) {
    let dirs = store.options(PLUGINS).unwrap_or_default();
    if dirs.is_empty() {
        println!("No plugin search paths configured.");
        return;
    }
    for d in dirs {
        println!("{d}");
    }
}

pub fn paths_add(store: &mut SettingsStore, dir: &str) -> Result<(), SettingsError> {
    if store.has_option(PLUGINS, dir)? {
        println!("{dir} is already on the search path.");
        return Ok(());
    }
    store.set(PLUGINS, dir, None);
    store.save()?;
    println!("Added {dir}.");
    Ok(())
}

pub fn paths_del(store: &mut SettingsStore, dir: &str) -> Result<(), SettingsError> {
    if !store.has_option(PLUGINS, dir)? {
        println!("{dir} is not on the search path.");
        return Ok(());
    }
    store.remove(PLUGINS, dir)?;
    store.save()?;
    println!("Removed {dir}.");
    Ok(())
}

/// Try to import `name` from the configured search paths.
pub fn locate_plugin(store: &SettingsStore, name: &str) -> Result<(), PluginError> {
    let dirs = search_dirs(store);
    if dirs.is_empty() {
        println!("No plugin search paths configured. Add one with: labrc plugin paths add <dir>");
        return Ok(());
    }

    let plugin = locate(name, &dirs)?;
    println!("Found '{}' at {}", plugin.name, plugin.root.display());
    if let Some(version) = &plugin.manifest.version {
        println!("  version: {version}");
    }
    if let Some(desc) = &plugin.manifest.description {
        println!("  {desc}");
    }
    if let Some(entry) = &plugin.entry {
        println!("  entry: {}", entry.display());
    }
    if !plugin.manifest.requires.is_empty() {
        println!("  requires: {}", plugin.manifest.requires.join(", "));
    }
    Ok(())
}
