use crate::models::OptionEntry;
use crate::settings::SettingsStore;

/// Simple match insensible à la casse, avec support du '*' (wildcard).
/// Matching is display-only; it never affects the store's exact-case keys.
pub fn wildcard_match(pat: &str, text: &str) -> bool {
    let pat = pat.to_lowercase();
    let text = text.to_lowercase();
    if pat == "*" {
        return true;
    }
    if !pat.contains('*') {
        return text.contains(&pat);
    }

    let parts: Vec<&str> = pat.split('*').collect();
    // contains-in-order, anchored at whichever end has no '*'
    let mut idx = 0usize;
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            continue;
        }
        match text[idx..].find(part) {
            Some(found) => idx += found + part.len(),
            None => return false,
        }
        if i == 0 && !pat.starts_with('*') && idx != part.len() {
            return false;
        }
    }
    if !pat.ends_with('*') {
        if let Some(last) = parts.iter().rfind(|s| !s.is_empty()) {
            if !text.ends_with(last) {
                return false;
            }
        }
    }
    true
}

/// Parse un filtre de type "section:plug* key:path value:2024*"
/// Clés supportées : section, key, value. Valeurs avec '*' autorisé.
/// Bare tokens filter on keys. Value patterns never match bare flags.
pub fn filter_entries<'a>(
    store: &'a SettingsStore,
    filter: &str,
) -> Vec<(&'a str, &'a OptionEntry)> {
    let mut section_pats: Vec<&str> = Vec::new();
    let mut key_pats: Vec<&str> = Vec::new();
    let mut value_pats: Vec<&str> = Vec::new();

    for tok in filter.split_whitespace() {
        if let Some(rest) = tok.strip_prefix("section:") { section_pats.push(rest); continue; }
        if let Some(rest) = tok.strip_prefix("key:") { key_pats.push(rest); continue; }
        if let Some(rest) = tok.strip_prefix("value:") { value_pats.push(rest); continue; }
        key_pats.push(tok);
    }

    let mut rows = Vec::new();
    for section in store.sections() {
        if !section_pats.iter().all(|p| wildcard_match(p, &section.name)) {
            continue;
        }
        for entry in &section.entries {
            let key_ok = key_pats.iter().all(|p| wildcard_match(p, &entry.key));
            let value_ok = value_pats.iter().all(|p| {
                entry.value.as_deref().map(|v| wildcard_match(p, v)).unwrap_or(false)
            });
            if key_ok && value_ok {
                rows.push((section.name.as_str(), entry));
            }
        }
    }
    rows
}
