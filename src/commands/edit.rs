use inquire::{Confirm, Select, Text};

use crate::settings::{SettingsError, SettingsStore};

pub fn get_value(store: &SettingsStore, section: &str, key: &str) {
    match store.get(section, key) {
        Ok(Some(v)) => println!("{v}"),
        Ok(None) if store.has_option(section, key).unwrap_or(false) => println!("(flag)"),
        Ok(None) => println!("'{key}' is not set in [{section}]."),
        Err(e) => println!("{e}"),
    }
}

pub fn set_value(
    store: &mut SettingsStore,
    section: &str,
    key: &str,
    value: Option<&str>,
) -> Result<(), SettingsError> {
    store.set(section, key, value);
    store.save()?;
    match value {
        Some(_) => println!("Set [{section}] {key}."),
        None => println!("Set flag [{section}] {key}."),
    }
    Ok(())
}

pub fn unset_value(
    store: &mut SettingsStore,
    section: &str,
    key: &str,
) -> Result<(), SettingsError> {
    store.remove(section, key)?;
    store.save()?;
    println!("Removed {key} from [{section}].");
    Ok(())
}

pub fn purge_section(store: &mut SettingsStore, section: &str) -> Result<(), SettingsError> {
    // Fail on a bogus section name before prompting.
    store.section(section)?;
    let confirmed = Confirm::new(&format!("Remove every option from [{section}]?"))
        .with_default(false)
        .prompt()
        .unwrap_or(false);
    if !confirmed {
        println!("Aborted.");
        return Ok(());
    }
    store.purge(section)?;
    store.save()?;
    println!("Purged [{section}].");
    Ok(())
}

/// Interactive walk: pick a section, pick or enter a key, enter a value.
pub fn edit(store: &mut SettingsStore) -> Result<(), SettingsError> {
    let names: Vec<String> = store.sections().iter().map(|s| s.name.clone()).collect();
    let Ok(section) = Select::new("Section:", names).prompt() else { return Ok(()); };

    let mut keys: Vec<String> = store
        .options(&section)?
        .iter()
        .map(|k| k.to_string())
        .collect();
    keys.insert(0, "<new key>".to_string());
    let Ok(choice) = Select::new("Key:", keys).prompt() else { return Ok(()); };

    let key = if choice == "<new key>" {
        let Ok(k) = Text::new("Key (case is preserved):").prompt() else { return Ok(()); };
        let k = k.trim().to_string();
        if k.is_empty() { return Ok(()); }
        k
    } else {
        choice
    };

    let current = store.get(&section, &key)?.unwrap_or("").to_string();
    let Ok(value) = Text::new("Value (leave empty for a bare flag):")
        .with_initial_value(&current)
        .prompt()
    else {
        return Ok(());
    };
    let value = value.trim();
    store.set(&section, &key, if value.is_empty() { None } else { Some(value) });
    store.save()?;
    println!("Saved [{section}] {key}.");
    Ok(())
}
