use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use thiserror::Error;

use super::path::ensure_settings_dir;
use crate::models::Section;

pub const RECENT: &str = "recent";
pub const BACKUPS: &str = "backups";
pub const PLUGINS: &str = "plugins";

const REQUIRED_SECTIONS: [&str; 3] = [RECENT, BACKUPS, PLUGINS];

/// Pre-split legacy form of the recent-file list, migrated away on load.
const LEGACY_RECENT_KEY: &str = "recentFiles";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("no such section [{0}]")]
    SectionNotFound(String),

    #[error("failed to write settings file {}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SettingsError {
    fn persist(path: &Path, source: io::Error) -> Self {
        SettingsError::Persist { path: path.to_path_buf(), source }
    }
}

/// In-memory settings table backed by a line-delimited `key = value` file.
///
/// Unlike a stock INI parser, option keys keep their exact case and `=` is
/// the only key/value delimiter (`:` is just part of the key). Sections
/// `recent`, `backups` and `plugins` always exist after `open`.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    sections: Vec<Section>,
}

impl SettingsStore {
    /// Load the settings file at `path`. A missing or unreadable file is
    /// not an error: the store just starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let mut store = SettingsStore { path, sections: Vec::new() };

        if store.path.exists() {
            match fs::read_to_string(&store.path) {
                Ok(text) => store.parse(&text),
                Err(e) => warn!(
                    "cannot read {}: {e}; starting with empty settings",
                    store.path.display()
                ),
            }
        }

        for name in REQUIRED_SECTIONS {
            store.index_or_insert(name);
        }

        if store.has_option(RECENT, LEGACY_RECENT_KEY)? {
            store.fix_recent()?;
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Result<&Section, SettingsError> {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| SettingsError::SectionNotFound(name.to_string()))
    }

    fn section_mut(&mut self, name: &str) -> Result<&mut Section, SettingsError> {
        self.sections
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| SettingsError::SectionNotFound(name.to_string()))
    }

    fn index_or_insert(&mut self, name: &str) -> usize {
        if let Some(idx) = self.sections.iter().position(|s| s.name == name) {
            return idx;
        }
        self.sections.push(Section::new(name));
        self.sections.len() - 1
    }

    /// Option keys of `section`, in insertion order.
    pub fn options(&self, section: &str) -> Result<Vec<&str>, SettingsError> {
        Ok(self.section(section)?.keys().collect())
    }

    pub fn has_option(&self, section: &str, key: &str) -> Result<bool, SettingsError> {
        Ok(self.section(section)?.has_option(key))
    }

    /// Value of `key` in `section`. `Ok(None)` covers both a missing key
    /// and a valueless flag; only a missing section is an error.
    pub fn get(&self, section: &str, key: &str) -> Result<Option<&str>, SettingsError> {
        Ok(self.section(section)?.get(key).and_then(|e| e.value.as_deref()))
    }

    /// Insert or overwrite `key`, creating `section` on demand.
    /// `value: None` stores a bare flag.
    pub fn set(&mut self, section: &str, key: &str, value: Option<&str>) {
        let idx = self.index_or_insert(section);
        self.sections[idx].set(key, value);
    }

    /// Remove `key` from `section`; missing keys are a no-op.
    pub fn remove(&mut self, section: &str, key: &str) -> Result<(), SettingsError> {
        self.section_mut(section)?.remove(key);
        Ok(())
    }

    /// Drop every option of `section`, keeping the section itself.
    pub fn purge(&mut self, section: &str) -> Result<(), SettingsError> {
        self.section_mut(section)?.entries.clear();
        Ok(())
    }

    fn parse(&mut self, text: &str) {
        let mut current: Option<usize> = None;

        for (lineno, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let name = line[1..line.len() - 1].trim();
                if name.is_empty() {
                    warn!("settings line {}: empty section header, skipping", lineno + 1);
                    continue;
                }
                current = Some(self.index_or_insert(name));
                continue;
            }

            // '=' is the only delimiter; a line without one is a bare flag.
            let (key, value) = match line.split_once('=') {
                Some((k, v)) => (k.trim(), Some(v.trim())),
                None => (line, None),
            };
            if key.is_empty() {
                warn!("settings line {}: no option key, skipping", lineno + 1);
                continue;
            }
            let Some(idx) = current else {
                warn!(
                    "settings line {}: option before any [section], skipping",
                    lineno + 1
                );
                continue;
            };
            // Duplicate keys: last one wins.
            self.sections[idx].set(key, value);
        }
    }

    /// Backward compatibility fix: explode the legacy comma-separated
    /// `recentFiles` value into one bare key per path, then persist.
    fn fix_recent(&mut self) -> Result<(), SettingsError> {
        let legacy = self.get(RECENT, LEGACY_RECENT_KEY)?.map(str::to_string);
        if let Some(list) = legacy {
            for path in list.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                self.set(RECENT, path, None);
            }
        }
        self.remove(RECENT, LEGACY_RECENT_KEY)?;
        self.save()
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            out.push('[');
            out.push_str(&section.name);
            out.push_str("]\n");
            for entry in &section.entries {
                match &entry.value {
                    Some(v) => {
                        out.push_str(&entry.key);
                        out.push_str(" = ");
                        out.push_str(v);
                    }
                    None => out.push_str(&entry.key),
                }
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }

    /// Serialize all sections back to the settings file.
    /// The in-memory store stays valid even when this fails.
    pub fn save(&self) -> Result<(), SettingsError> {
        ensure_settings_dir(&self.path).map_err(|e| SettingsError::persist(&self.path, e))?;
        let text = self.render();

        // Write to a temp file and then rename (best-effort cross-platform)
        let tmp = self.path.with_extension("ini.tmp");
        fs::write(&tmp, &text).map_err(|e| SettingsError::persist(&tmp, e))?;
        let _ = fs::remove_file(&self.path);
        if let Err(e) = fs::rename(&tmp, &self.path) {
            warn!("could not move {} into place: {e}", tmp.display());
            // fallback direct write
            fs::write(&self.path, &text).map_err(|e| SettingsError::persist(&self.path, e))?;
            let _ = fs::remove_file(&tmp);
        }
        Ok(())
    }
}
