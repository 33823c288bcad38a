//! Working list of process/window matchers for automatic mode
//!
//! The settings file keeps paths, names and window titles in three arrays.
//! While editing they live in one ordered list tagged by kind, so the user
//! sees (and dedups against) a single list.

use std::fmt;
use tracing::debug;

use crate::icon_cache::Icon;

/// What a matcher value is compared against by the monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatcherKind {
    /// Full executable path
    Path,
    /// Executable file name
    Name,
    /// Substring of a window title
    Window,
}

impl MatcherKind {
    pub fn label(self) -> &'static str {
        match self {
            MatcherKind::Path => "Process path",
            MatcherKind::Name => "Process name",
            MatcherKind::Window => "Window title",
        }
    }
}

impl fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry of the working list
///
/// `icon` is display-only and ignored by equality.
#[derive(Debug, Clone)]
pub struct Matcher {
    pub value: String,
    pub kind: MatcherKind,
    pub icon: Option<Icon>,
}

impl Matcher {
    pub fn new(value: impl Into<String>, kind: MatcherKind) -> Self {
        Self {
            value: value.into(),
            kind,
            icon: None,
        }
    }

    pub fn path(value: impl Into<String>) -> Self {
        Self::new(value, MatcherKind::Path)
    }

    pub fn name(value: impl Into<String>) -> Self {
        Self::new(value, MatcherKind::Name)
    }

    pub fn window(value: impl Into<String>) -> Self {
        Self::new(value, MatcherKind::Window)
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.value == other.value
    }
}

impl Eq for Matcher {}

/// Matcher values split back into their persisted arrays
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partitions {
    pub paths: Vec<String>,
    pub names: Vec<String>,
    pub titles: Vec<String>,
}

/// Ordered matcher list with value-unique inserts
///
/// Uniqueness on [`add`](Self::add) is by value across all kinds, while
/// [`remove`](Self::remove) needs the exact (kind, value) pair. A list
/// rebuilt from disk is not re-validated, so a value can appear under two
/// kinds if the file already had it that way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatcherSet {
    items: Vec<Matcher>,
}

impl MatcherSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild in the fixed order paths, names, titles
    pub fn from_partitions(paths: &[String], names: &[String], titles: &[String]) -> Self {
        let items = paths
            .iter()
            .map(|v| Matcher::path(v.as_str()))
            .chain(names.iter().map(|v| Matcher::name(v.as_str())))
            .chain(titles.iter().map(|v| Matcher::window(v.as_str())))
            .collect();
        Self { items }
    }

    /// Append a matcher; false if `value` is empty or already present under any kind
    pub fn add(&mut self, value: &str, kind: MatcherKind) -> bool {
        if value.is_empty() {
            debug!(kind = %kind, "Rejected empty matcher value");
            return false;
        }
        if self.contains(value) {
            debug!(value = %value, kind = %kind, "Rejected duplicate matcher value");
            return false;
        }

        self.items.push(Matcher::new(value, kind));
        debug!(value = %value, kind = %kind, count = self.items.len(), "Added matcher");
        true
    }

    /// Remove the first matcher with this exact kind and value
    pub fn remove(&mut self, value: &str, kind: MatcherKind) -> bool {
        match self
            .items
            .iter()
            .position(|m| m.kind == kind && m.value == value)
        {
            Some(idx) => {
                self.items.remove(idx);
                debug!(value = %value, kind = %kind, count = self.items.len(), "Removed matcher");
                true
            }
            None => {
                debug!(value = %value, kind = %kind, "No matcher to remove");
                false
            }
        }
    }

    /// Whether any matcher, of any kind, has this value
    pub fn contains(&self, value: &str) -> bool {
        self.items.iter().any(|m| m.value == value)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Matcher> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Matcher> {
        self.items.iter_mut()
    }

    pub fn to_partitions(&self) -> Partitions {
        let mut partitions = Partitions::default();
        for matcher in &self.items {
            let target = match matcher.kind {
                MatcherKind::Path => &mut partitions.paths,
                MatcherKind::Name => &mut partitions.names,
                MatcherKind::Window => &mut partitions.titles,
            };
            target.push(matcher.value.clone());
        }
        partitions
    }
}

impl<'a> IntoIterator for &'a MatcherSet {
    type Item = &'a Matcher;
    type IntoIter = std::slice::Iter<'a, Matcher>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
