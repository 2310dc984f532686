use std::sync::{PoisonError, RwLock};

/// Client-side routing seam used by the 401 handler.
pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;
    /// Change route without reloading anything.
    fn navigate(&self, path: &str);
}

/// Navigator that just remembers where it has been.
#[derive(Debug)]
pub struct MemoryNavigator {
    history: RwLock<Vec<String>>,
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::starting_at("/")
    }
}

impl MemoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(path: impl Into<String>) -> Self {
        Self {
            history: RwLock::new(vec![path.into()]),
        }
    }

    pub fn history(&self) -> Vec<String> {
        self.history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
            .unwrap_or_else(|| "/".to_string())
    }

    fn navigate(&self, path: &str) {
        self.history
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
    }
}
