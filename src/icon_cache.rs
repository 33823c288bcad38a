//! Executable icon lookup for display next to path matchers
//!
//! The cache is a plain value owned by whoever drives the editor and lent
//! to the session; there is no process-wide instance.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Opaque image handle (encoded bytes as produced by the loader)
///
/// Cheap to clone; never inspected by the settings core.
#[derive(Clone, PartialEq, Eq)]
pub struct Icon(Arc<[u8]>);

impl Icon {
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self(bytes.into())
    }
}

impl fmt::Debug for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Icon({} bytes)", self.0.len())
    }
}

/// Extracts the icon of an executable; platform specific, supplied by the driver
pub trait IconLoader {
    fn load(&self, executable_path: &str) -> anyhow::Result<Icon>;
}

impl<F> IconLoader for F
where
    F: Fn(&str) -> anyhow::Result<Icon>,
{
    fn load(&self, executable_path: &str) -> anyhow::Result<Icon> {
        self(executable_path)
    }
}

/// Path → icon cache, filled lazily, never evicted
///
/// Failed loads are not remembered, so a later lookup retries.
pub struct IconCache<L> {
    loader: L,
    icons: HashMap<String, Icon>,
}

impl<L: IconLoader> IconCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            icons: HashMap::new(),
        }
    }

    pub fn get(&mut self, executable_path: &str) -> Option<Icon> {
        if executable_path.is_empty() {
            return None;
        }
        if let Some(icon) = self.icons.get(executable_path) {
            return Some(icon.clone());
        }

        match self.loader.load(executable_path) {
            Ok(icon) => {
                debug!(path = %executable_path, "Cached executable icon");
                self.icons.insert(executable_path.to_string(), icon.clone());
                Some(icon)
            }
            Err(e) => {
                warn!(path = %executable_path, error = %e, "Failed to load executable icon");
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}
