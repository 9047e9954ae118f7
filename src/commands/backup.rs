use chrono::Local;
use prettytable::{row, Table};

use crate::models::value_to_string;
use crate::settings::{SettingsError, SettingsStore, BACKUPS};

/// Record a backup location stamped with the current local time.
pub fn backup_add(store: &mut SettingsStore, path: &str) -> Result<(), SettingsError> {
    let stamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    store.set(BACKUPS, path, Some(&stamp));
    store.save()?;
    println!("Recorded backup {path} ({stamp}).");
    Ok(())
}

pub fn backup_list(store: &SettingsStore) {
    let section = match store.section(BACKUPS) {
        Ok(s) => s,
        Err(e) => {
            println!("{e}");
            return;
        }
    };
    if section.is_empty() {
        println!("No backups recorded.");
        return;
    }

    let mut table = Table::new();
    table.add_row(row!["Backup", "Recorded"]);
    for entry in &section.entries {
        table.add_row(row![entry.key, value_to_string(&entry.value)]);
    }
    table.printstd();
}
