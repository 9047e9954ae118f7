use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

// Process-wide module-resolution list. Only ever mutated through
// `SearchPathGuard`, so every entry is removed again on scope exit.
static SEARCH_PATHS: Mutex<Vec<PathBuf>> = Mutex::new(Vec::new());

fn list() -> MutexGuard<'static, Vec<PathBuf>> {
    SEARCH_PATHS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Scoped prepend onto the plugin search list.
///
/// Dropping the guard removes one occurrence of the path again, so a
/// failed import attempt never leaks its entry into later lookups.
pub struct SearchPathGuard {
    path: PathBuf,
}

impl SearchPathGuard {
    pub fn push(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        list().insert(0, path.clone());
        SearchPathGuard { path }
    }
}

impl Drop for SearchPathGuard {
    fn drop(&mut self) {
        let mut paths = list();
        if let Some(pos) = paths.iter().position(|p| p == &self.path) {
            paths.remove(pos);
        }
    }
}

/// Current search list, front first.
pub fn snapshot() -> Vec<PathBuf> {
    list().clone()
}

#[cfg(test)]
pub(crate) static TEST_LOCK: Mutex<()> = Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    fn serialize() -> MutexGuard<'static, ()> {
        TEST_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[test]
    fn guard_prepends_and_reverts() {
        let _serial = serialize();
        assert!(snapshot().is_empty());
        {
            let _outer = SearchPathGuard::push("/a");
            let _inner = SearchPathGuard::push("/b");
            assert_eq!(snapshot(), vec![PathBuf::from("/b"), PathBuf::from("/a")]);
        }
        assert!(snapshot().is_empty());
    }

    #[test]
    fn nested_scopes_over_the_same_path_unwind() {
        let _serial = serialize();
        {
            let _outer = SearchPathGuard::push("/same");
            {
                let _inner = SearchPathGuard::push("/same");
                assert_eq!(snapshot().len(), 2);
            }
            assert_eq!(snapshot(), vec![PathBuf::from("/same")]);
        }
        assert!(snapshot().is_empty());
    }
}
