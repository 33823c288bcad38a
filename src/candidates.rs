//! Candidate matcher values taken from running processes
//!
//! Enumerating processes is platform work done elsewhere; this module only
//! defines what such an enumerator hands over and how the list is cleaned
//! before it is offered to the user.

use std::collections::HashSet;
use tracing::debug;

use crate::matcher::MatcherKind;

/// One running process as reported by a [`ProcessSource`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessCandidate {
    pub display_name: String,
    /// Absent when the process image could not be queried (e.g. access denied)
    pub executable_path: Option<String>,
    /// Main window title, empty if the process has none
    pub window_title: String,
}

impl ProcessCandidate {
    pub fn new(
        display_name: impl Into<String>,
        executable_path: Option<String>,
        window_title: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            executable_path,
            window_title: window_title.into(),
        }
    }

    /// Candidate for an executable picked from disk rather than a running process
    pub fn from_executable(path: &str) -> Self {
        Self {
            display_name: file_name(path).to_string(),
            executable_path: Some(path.to_string()),
            window_title: String::new(),
        }
    }

    /// The field a matcher of `kind` would use
    pub fn value_for(&self, kind: MatcherKind) -> Option<&str> {
        match kind {
            MatcherKind::Path => self.executable_path.as_deref(),
            MatcherKind::Name => Some(&self.display_name),
            MatcherKind::Window => Some(&self.window_title),
        }
    }

    fn dedup_key(&self) -> &str {
        match self.executable_path.as_deref() {
            Some(path) if !path.is_empty() => path,
            _ => &self.display_name,
        }
    }
}

/// Supplies the currently running processes
pub trait ProcessSource {
    fn running_processes(&self) -> Vec<ProcessCandidate>;
}

/// Keep the first candidate per executable path (or name when the path is unknown)
pub fn dedup_candidates<I>(candidates: I) -> Vec<ProcessCandidate>
where
    I: IntoIterator<Item = ProcessCandidate>,
{
    let mut seen = HashSet::new();
    let candidates: Vec<_> = candidates
        .into_iter()
        .filter(|c| seen.insert(c.dedup_key().to_string()))
        .collect();
    debug!(count = candidates.len(), "Deduplicated process candidates");
    candidates
}

/// Last component of a Windows or Unix style path
fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(Vec<ProcessCandidate>);

    impl ProcessSource for FixedSource {
        fn running_processes(&self) -> Vec<ProcessCandidate> {
            self.0.clone()
        }
    }

    #[test]
    fn test_from_executable_windows_path() {
        let c = ProcessCandidate::from_executable("C:\\Program Files\\VLC\\vlc.exe");
        assert_eq!(c.display_name, "vlc.exe");
        assert_eq!(c.executable_path.as_deref(), Some("C:\\Program Files\\VLC\\vlc.exe"));
        assert_eq!(c.window_title, "");
    }

    #[test]
    fn test_from_executable_unix_path() {
        let c = ProcessCandidate::from_executable("/usr/bin/mpv");
        assert_eq!(c.display_name, "mpv");
    }

    #[test]
    fn test_value_for_each_kind() {
        let c = ProcessCandidate::new("obs64.exe", Some("D:\\obs\\obs64.exe".to_string()), "OBS 30.0");
        assert_eq!(c.value_for(MatcherKind::Path), Some("D:\\obs\\obs64.exe"));
        assert_eq!(c.value_for(MatcherKind::Name), Some("obs64.exe"));
        assert_eq!(c.value_for(MatcherKind::Window), Some("OBS 30.0"));

        let no_path = ProcessCandidate::new("System", None, "");
        assert_eq!(no_path.value_for(MatcherKind::Path), None);
    }

    #[test]
    fn test_dedup_by_path_then_name() {
        let source = FixedSource(vec![
            ProcessCandidate::new("chrome.exe", Some("C:\\chrome.exe".to_string()), "Inbox"),
            ProcessCandidate::new("chrome.exe", Some("C:\\chrome.exe".to_string()), ""),
            ProcessCandidate::new("chrome.exe", Some("D:\\portable\\chrome.exe".to_string()), ""),
            ProcessCandidate::new("svchost.exe", None, ""),
            ProcessCandidate::new("svchost.exe", None, ""),
            ProcessCandidate::new("svchost.exe", Some(String::new()), ""),
        ]);

        let candidates = dedup_candidates(source.running_processes());
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].window_title, "Inbox");
        assert_eq!(candidates[1].executable_path.as_deref(), Some("D:\\portable\\chrome.exe"));
        assert_eq!(candidates[2].display_name, "svchost.exe");
    }
}
