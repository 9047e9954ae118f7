use serde::Deserialize;

/// `plugin.toml` metadata at the root of an installed plugin. A directory
/// on the search path without this file is just an empty stand-in.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    /// Relative path of the entry point; must exist when declared.
    pub entry: Option<String>,
    /// Names of other plugins this one needs at load time.
    #[serde(default)]
    pub requires: Vec<String>,
}
