use inquire::Confirm;

use crate::settings::{SettingsError, SettingsStore, RECENT};

/// Record `path` in the recent-file list. Re-adding an existing path
/// moves it to the end (the list reads oldest to newest).
pub fn recent_add(store: &mut SettingsStore, path: &str) -> Result<(), SettingsError> {
    store.remove(RECENT, path)?;
    store.set(RECENT, path, None);
    store.save()?;
    println!("Recorded {path}.");
    Ok(())
}

pub fn recent_list(store: &SettingsStore) {
    let files = store.options(RECENT).unwrap_or_default();
    if files.is_empty() {
        println!("No recent files.");
        return;
    }
    for f in files {
        println!("{f}");
    }
}

pub fn recent_clear(store: &mut SettingsStore) -> Result<(), SettingsError> {
    let confirmed = Confirm::new("Clear the recent file list?")
        .with_default(false)
        .prompt()
        .unwrap_or(false);
    if !confirmed {
        println!("Aborted.");
        return Ok(());
    }
    store.purge(RECENT)?;
    store.save()?;
    println!("Cleared.");
    Ok(())
}
