use std::fs;
use std::io;
use std::path::PathBuf;

use log::debug;
use thiserror::Error;

use super::manifest::Manifest;
use super::search_path::{self, SearchPathGuard};

pub const MANIFEST_FILE: &str = "plugin.toml";

/// Handle on a successfully imported plugin.
#[derive(Debug, Clone)]
pub struct Plugin {
    pub name: String,
    /// Installation directory the plugin resolved to
    pub root: PathBuf,
    /// Absolute entry point, when the manifest declares one
    pub entry: Option<PathBuf>,
    pub manifest: Manifest,
}

/// One import attempt, classified.
#[derive(Debug)]
pub enum Resolved {
    /// A real installed plugin, manifest and all
    Concrete(Plugin),
    /// A directory with the right name but no manifest in it
    Namespace(PathBuf),
}

#[derive(Debug, Error)]
pub enum ImportError {
    /// Carries the name that could not be resolved, which is not
    /// necessarily the plugin the caller asked for (see `requires`).
    #[error("no plugin named '{0}' on the search path")]
    NotFound(String),

    #[error("unreadable manifest {}", path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid manifest {}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("declared entry point {} does not exist", path.display())]
    MissingEntry { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("no plugin named '{0}' found in any search path")]
    NotFound(String),

    #[error("plugin '{name}' is installed but failed to load")]
    Load {
        name: String,
        #[source]
        source: ImportError,
    },
}

/// Resolve `name` against the current process search list.
///
/// A bare directory only counts as a namespace stand-in; the first
/// manifest-backed installation wins. Requirements resolve in the same
/// scope, so a plugin can depend on a sibling from the same directory.
pub fn import_plugin(name: &str) -> Result<Resolved, ImportError> {
    let mut visited = vec![name.to_string()];
    resolve(name, &mut visited)
}

fn resolve(name: &str, visited: &mut Vec<String>) -> Result<Resolved, ImportError> {
    let mut placeholder: Option<PathBuf> = None;

    for dir in search_path::snapshot() {
        let root = dir.join(name);
        if !root.is_dir() {
            continue;
        }
        let manifest_path = root.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            // Bare directory: remember it, keep looking for the real thing.
            placeholder.get_or_insert(root);
            continue;
        }

        let text = fs::read_to_string(&manifest_path).map_err(|e| ImportError::ManifestRead {
            path: manifest_path.clone(),
            source: e,
        })?;
        let manifest: Manifest = toml::from_str(&text).map_err(|e| ImportError::ManifestParse {
            path: manifest_path,
            source: e,
        })?;

        let entry = match manifest.entry.as_deref() {
            Some(rel) => {
                let entry = root.join(rel);
                if !entry.is_file() {
                    return Err(ImportError::MissingEntry { path: entry });
                }
                Some(entry)
            }
            None => None,
        };

        for req in &manifest.requires {
            if visited.iter().any(|v| v == req) {
                continue;
            }
            visited.push(req.clone());
            match resolve(req, visited)? {
                Resolved::Concrete(_) => {}
                // An empty stand-in cannot satisfy a requirement.
                Resolved::Namespace(_) => return Err(ImportError::NotFound(req.clone())),
            }
        }

        return Ok(Resolved::Concrete(Plugin {
            name: name.to_string(),
            root,
            entry,
            manifest,
        }));
    }

    if let Some(root) = placeholder {
        return Ok(Resolved::Namespace(root));
    }
    Err(ImportError::NotFound(name.to_string()))
}

/// Search `dirs` in order for an importable plugin named `name`.
///
/// Each candidate directory is scoped onto the process search list for
/// the duration of its attempt and removed again before the next one, on
/// success and on error alike. A namespace stand-in or the absence of
/// `name` itself moves the search along; any other failure means the
/// plugin exists but is broken, and aborts it.
pub fn locate(name: &str, dirs: &[PathBuf]) -> Result<Plugin, PluginError> {
    for dir in dirs {
        let _scope = SearchPathGuard::push(dir.clone());
        match import_plugin(name) {
            Ok(Resolved::Concrete(plugin)) => return Ok(plugin),
            Ok(Resolved::Namespace(root)) => {
                debug!(
                    "{name}: only a bare directory at {}, trying next path",
                    root.display()
                );
            }
            Err(ImportError::NotFound(missing)) if missing == name => {}
            Err(source) => {
                return Err(PluginError::Load {
                    name: name.to_string(),
                    source,
                })
            }
        }
    }
    Err(PluginError::NotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::search_path::TEST_LOCK;
    use std::path::Path;
    use std::sync::PoisonError;
    use tempfile::{tempdir, TempDir};

    fn serialize() -> std::sync::MutexGuard<'static, ()> {
        TEST_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn install_plugin(dir: &Path, name: &str, manifest: &str) {
        let root = dir.join(name);
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join(MANIFEST_FILE), manifest).unwrap();
    }

    fn namespace_stub(dir: &Path, name: &str) {
        fs::create_dir_all(dir.join(name)).unwrap();
    }

    fn two_dirs() -> (TempDir, TempDir, Vec<PathBuf>) {
        let p1 = tempdir().unwrap();
        let p2 = tempdir().unwrap();
        let dirs = vec![p1.path().to_path_buf(), p2.path().to_path_buf()];
        (p1, p2, dirs)
    }

    #[test]
    fn skips_namespace_stub_and_finds_real_plugin() {
        let _serial = serialize();
        let (p1, p2, dirs) = two_dirs();
        namespace_stub(p1.path(), "refine");
        install_plugin(p2.path(), "refine", "name = \"refine\"\nversion = \"1.0\"\n");

        let plugin = locate("refine", &dirs).unwrap();
        assert_eq!(plugin.root, p2.path().join("refine"));
        assert_eq!(plugin.manifest.version.as_deref(), Some("1.0"));
        assert!(search_path::snapshot().is_empty());
    }

    #[test]
    fn missing_everywhere_is_not_found() {
        let _serial = serialize();
        let (_p1, _p2, dirs) = two_dirs();
        let err = locate("refine", &dirs).unwrap_err();
        assert!(matches!(err, PluginError::NotFound(name) if name == "refine"));
        assert!(search_path::snapshot().is_empty());
    }

    #[test]
    fn namespace_stub_alone_is_not_found() {
        let _serial = serialize();
        let (p1, _p2, dirs) = two_dirs();
        namespace_stub(p1.path(), "refine");
        assert!(matches!(
            locate("refine", &dirs),
            Err(PluginError::NotFound(_))
        ));
    }

    #[test]
    fn broken_manifest_aborts_without_trying_later_paths() {
        let _serial = serialize();
        let (p1, p2, dirs) = two_dirs();
        install_plugin(p1.path(), "refine", "version = \"1.0");
        install_plugin(p2.path(), "refine", "version = \"2.0\"\n");

        let err = locate("refine", &dirs).unwrap_err();
        assert!(matches!(
            err,
            PluginError::Load {
                source: ImportError::ManifestParse { .. },
                ..
            }
        ));
        assert!(search_path::snapshot().is_empty());
    }

    #[test]
    fn declared_entry_must_exist() {
        let _serial = serialize();
        let (p1, _p2, dirs) = two_dirs();
        install_plugin(p1.path(), "refine", "entry = \"init.lua\"\n");

        assert!(matches!(
            locate("refine", &dirs),
            Err(PluginError::Load {
                source: ImportError::MissingEntry { .. },
                ..
            })
        ));
    }

    #[test]
    fn entry_resolves_relative_to_the_plugin_root() {
        let _serial = serialize();
        let (p1, _p2, dirs) = two_dirs();
        install_plugin(p1.path(), "refine", "entry = \"init.lua\"\n");
        fs::write(p1.path().join("refine/init.lua"), "-- entry\n").unwrap();

        let plugin = locate("refine", &dirs).unwrap();
        assert_eq!(plugin.entry, Some(p1.path().join("refine/init.lua")));
    }

    #[test]
    fn requirement_from_the_same_directory_is_satisfied() {
        let _serial = serialize();
        let (p1, _p2, dirs) = two_dirs();
        install_plugin(p1.path(), "refine", "requires = [\"fitcore\"]\n");
        install_plugin(p1.path(), "fitcore", "name = \"fitcore\"\n");

        let plugin = locate("refine", &dirs).unwrap();
        assert_eq!(plugin.manifest.requires, vec!["fitcore"]);
    }

    #[test]
    fn missing_requirement_is_a_load_failure_not_absence() {
        let _serial = serialize();
        let (p1, _p2, dirs) = two_dirs();
        install_plugin(p1.path(), "refine", "requires = [\"fitcore\"]\n");

        let err = locate("refine", &dirs).unwrap_err();
        assert!(matches!(
            err,
            PluginError::Load {
                source: ImportError::NotFound(ref missing),
                ..
            } if missing == "fitcore"
        ));
        assert!(search_path::snapshot().is_empty());
    }

    #[test]
    fn mutually_requiring_plugins_terminate() {
        let _serial = serialize();
        let (p1, _p2, dirs) = two_dirs();
        install_plugin(p1.path(), "refine", "requires = [\"fitcore\"]\n");
        install_plugin(p1.path(), "fitcore", "requires = [\"refine\"]\n");

        assert!(locate("refine", &dirs).is_ok());
    }

    #[test]
    fn search_list_is_restored_after_a_failed_locate() {
        let _serial = serialize();
        let (p1, _p2, dirs) = two_dirs();
        install_plugin(p1.path(), "refine", "not toml at all [");

        let before = search_path::snapshot();
        let _ = locate("refine", &dirs);
        assert_eq!(search_path::snapshot(), before);
    }
}
