//! Couche settings : chemins + parsing/sauvegarde du fichier (lecture/écriture + migration).
pub mod path;
pub mod store;

pub use path::{ensure_settings_dir, settings_path};
pub use store::{SettingsError, SettingsStore, BACKUPS, PLUGINS, RECENT};
