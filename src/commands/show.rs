use prettytable::{row, Table};

use crate::filter::filter_entries;
use crate::models::value_to_string;
use crate::settings::SettingsStore;

pub fn show_settings(store: &SettingsStore, filter: Option<String>) {
    let rows = filter_entries(store, filter.as_deref().unwrap_or(""));
    if rows.is_empty() {
        println!("No settings match your filter.");
        return;
    }

    let mut table = Table::new();
    table.add_row(row!["Section", "Key", "Value"]);
    for (section, entry) in rows {
        table.add_row(row![section, entry.key, value_to_string(&entry.value)]);
    }
    table.printstd();
}
