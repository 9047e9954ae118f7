/// Une option dans une section : clé + valeur facultative.
///
/// `value: None` is a bare flag (written without `=`), which is not the
/// same thing as `Some("")` (written as `key = `).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    /// Option key, case preserved exactly as written
    pub key: String,
    /// Option value; `None` for valueless flags
    pub value: Option<String>,
}

/// Section nommée du fichier de settings (équivalent d'une stanza INI).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    /// Entries in insertion order; keys are unique within the section
    pub entries: Vec<OptionEntry>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Section { name: name.into(), entries: Vec::new() }
    }

    /// Exact-case lookup. `foo` never matches `Foo`.
    pub fn get(&self, key: &str) -> Option<&OptionEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn has_option(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or overwrite in place (existing keys keep their position).
    pub fn set(&mut self, key: &str, value: Option<&str>) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.value = value.map(str::to_string);
        } else {
            self.entries.push(OptionEntry {
                key: key.to_string(),
                value: value.map(str::to_string),
            });
        }
    }

    /// Returns true if the key was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.key != key);
        self.entries.len() != before
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Convertit `Option<String>` en string d’affichage (flags -> vide).
pub fn value_to_string(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}
