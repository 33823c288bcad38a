//! Editable working copy of the settings
//!
//! A session is seeded from a [`ConfigDocument`] once, mutated by the
//! driver, and turned back into a fresh document by [`ConfigSession::commit`].
//! Nothing is shared with the document it came from.

use tracing::debug;

use crate::candidates::ProcessCandidate;
use crate::config::{AutoMode, ConfigDocument, Mode, StandardMode};
use crate::icon_cache::{IconCache, IconLoader};
use crate::matcher::{Matcher, MatcherKind, MatcherSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSession {
    mode: Mode,
    standard_keep_display_on: bool,
    auto_keep_display_on: bool,
    scan_interval_ms: i32,
    matchers: MatcherSet,
}

impl ConfigSession {
    pub fn new(document: &ConfigDocument) -> Self {
        let auto = &document.auto;
        let matchers =
            MatcherSet::from_partitions(&auto.process_paths, &auto.process_names, &auto.window_titles);
        debug!(mode = %document.mode, matchers = matchers.len(), "Opened settings session");

        Self {
            mode: document.mode,
            standard_keep_display_on: document.standard.keep_display_on,
            auto_keep_display_on: auto.keep_display_on,
            scan_interval_ms: auto.scan_interval_ms,
            matchers,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn standard_keep_display_on(&self) -> bool {
        self.standard_keep_display_on
    }

    pub fn set_standard_keep_display_on(&mut self, keep: bool) {
        self.standard_keep_display_on = keep;
    }

    pub fn auto_keep_display_on(&self) -> bool {
        self.auto_keep_display_on
    }

    pub fn set_auto_keep_display_on(&mut self, keep: bool) {
        self.auto_keep_display_on = keep;
    }

    pub fn scan_interval_ms(&self) -> i32 {
        self.scan_interval_ms
    }

    /// Stored as given; the monitor owns the meaning of odd values
    pub fn set_scan_interval_ms(&mut self, interval_ms: i32) {
        self.scan_interval_ms = interval_ms;
    }

    pub fn matchers(&self) -> &MatcherSet {
        &self.matchers
    }

    /// `None` stands for "no value" and is rejected like an empty string
    pub fn add_path<'a>(&mut self, path: impl Into<Option<&'a str>>) -> bool {
        self.add(path.into(), MatcherKind::Path)
    }

    pub fn add_name<'a>(&mut self, name: impl Into<Option<&'a str>>) -> bool {
        self.add(name.into(), MatcherKind::Name)
    }

    pub fn add_window<'a>(&mut self, title: impl Into<Option<&'a str>>) -> bool {
        self.add(title.into(), MatcherKind::Window)
    }

    /// Add the candidate's field for `kind`; false if it has none
    pub fn add_candidate(&mut self, candidate: &ProcessCandidate, kind: MatcherKind) -> bool {
        self.add(candidate.value_for(kind), kind)
    }

    pub fn remove_matcher(&mut self, matcher: &Matcher) -> bool {
        self.matchers.remove(&matcher.value, matcher.kind)
    }

    /// Fill in icons for path matchers from a driver-owned cache
    pub fn attach_icons<L: IconLoader>(&mut self, cache: &mut IconCache<L>) {
        for matcher in self.matchers.iter_mut() {
            if matcher.kind == MatcherKind::Path && matcher.icon.is_none() {
                matcher.icon = cache.get(&matcher.value);
            }
        }
    }

    /// Snapshot the session as a new document
    pub fn commit(&self) -> ConfigDocument {
        let partitions = self.matchers.to_partitions();
        ConfigDocument {
            mode: self.mode,
            standard: StandardMode {
                keep_display_on: self.standard_keep_display_on,
            },
            auto: AutoMode {
                keep_display_on: self.auto_keep_display_on,
                scan_interval_ms: self.scan_interval_ms,
                process_paths: partitions.paths,
                process_names: partitions.names,
                window_titles: partitions.titles,
            },
        }
    }

    fn add(&mut self, value: Option<&str>, kind: MatcherKind) -> bool {
        match value {
            Some(value) => self.matchers.add(value, kind),
            None => {
                debug!(kind = %kind, "Rejected missing matcher value");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon_cache::Icon;

    fn loaded_document() -> ConfigDocument {
        ConfigDocument {
            mode: Mode::AutoInactive,
            standard: StandardMode { keep_display_on: true },
            auto: AutoMode {
                keep_display_on: false,
                scan_interval_ms: 1500,
                process_paths: vec!["C:\\Games\\game.exe".to_string()],
                process_names: vec!["vlc.exe".to_string(), "mpv".to_string()],
                window_titles: vec!["Zoom".to_string()],
            },
        }
    }

    #[test]
    fn test_commit_without_changes_equals_source() {
        let doc = loaded_document();
        let session = ConfigSession::new(&doc);
        assert_eq!(session.commit(), doc);
        assert_eq!(session.commit(), session.commit());
    }

    #[test]
    fn test_new_seeds_working_order() {
        let session = ConfigSession::new(&loaded_document());
        let values: Vec<_> = session.matchers().iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, vec!["C:\\Games\\game.exe", "vlc.exe", "mpv", "Zoom"]);
    }

    #[test]
    fn test_order_preserved_per_kind() {
        let mut session = ConfigSession::new(&ConfigDocument::default());
        assert!(session.add_path("a"));
        assert!(session.add_name("b"));
        assert!(session.add_path("c"));

        let doc = session.commit();
        assert_eq!(doc.auto.process_paths, vec!["a", "c"]);
        assert_eq!(doc.auto.process_names, vec!["b"]);
        assert!(doc.auto.window_titles.is_empty());
    }

    #[test]
    fn test_cross_kind_add_rejected() {
        let mut session = ConfigSession::new(&ConfigDocument::default());
        assert!(session.add_path("x"));
        assert!(!session.add_name("x"));
        assert_eq!(session.matchers().len(), 1);
    }

    #[test]
    fn test_empty_and_missing_values_rejected() {
        let mut session = ConfigSession::new(&ConfigDocument::default());
        assert!(!session.add_name(""));
        assert!(!session.add_name(None::<&str>));
        assert!(!session.add_path(None::<&str>));
        assert!(!session.add_window(""));
        assert!(session.matchers().is_empty());
    }

    #[test]
    fn test_remove_scoped_to_kind() {
        let mut doc = ConfigDocument::default();
        doc.auto.process_paths = vec!["x".to_string()];
        doc.auto.process_names = vec!["x".to_string()];
        let mut session = ConfigSession::new(&doc);

        assert!(session.remove_matcher(&Matcher::path("x")));

        let committed = session.commit();
        assert!(committed.auto.process_paths.is_empty());
        assert_eq!(committed.auto.process_names, vec!["x"]);
    }

    #[test]
    fn test_remove_missing_matcher() {
        let mut session = ConfigSession::new(&loaded_document());
        assert!(!session.remove_matcher(&Matcher::window("vlc.exe")));
        assert_eq!(session.matchers().len(), 4);
    }

    #[test]
    fn test_scalar_fields_round_trip_through_commit() {
        let mut session = ConfigSession::new(&ConfigDocument::default());
        session.set_mode(Mode::AutoActive);
        session.set_standard_keep_display_on(true);
        session.set_auto_keep_display_on(true);
        session.set_scan_interval_ms(0);

        let doc = session.commit();
        assert_eq!(doc.mode, Mode::AutoActive);
        assert!(doc.standard.keep_display_on);
        assert!(doc.auto.keep_display_on);
        assert_eq!(doc.auto.scan_interval_ms, 0);
    }

    #[test]
    fn test_session_does_not_alias_document() {
        let mut doc = loaded_document();
        let session = ConfigSession::new(&doc);
        doc.auto.process_names.clear();
        assert_eq!(session.commit().auto.process_names, vec!["vlc.exe", "mpv"]);
    }

    #[test]
    fn test_add_candidate_by_kind() {
        let mut session = ConfigSession::new(&ConfigDocument::default());
        let candidate = ProcessCandidate::new("obs64.exe", Some("D:\\obs\\obs64.exe".to_string()), "");

        assert!(session.add_candidate(&candidate, MatcherKind::Path));
        assert!(session.add_candidate(&candidate, MatcherKind::Name));
        assert!(!session.add_candidate(&candidate, MatcherKind::Window));

        let no_path = ProcessCandidate::new("System", None, "");
        assert!(!session.add_candidate(&no_path, MatcherKind::Path));

        let doc = session.commit();
        assert_eq!(doc.auto.process_paths, vec!["D:\\obs\\obs64.exe"]);
        assert_eq!(doc.auto.process_names, vec!["obs64.exe"]);
    }

    #[test]
    fn test_attach_icons_only_for_paths() {
        let mut session = ConfigSession::new(&loaded_document());
        let mut cache = IconCache::new(|path: &str| -> anyhow::Result<Icon> {
            Ok(Icon::from_bytes(path.as_bytes().to_vec()))
        });

        session.attach_icons(&mut cache);

        for matcher in session.matchers() {
            assert_eq!(matcher.icon.is_some(), matcher.kind == MatcherKind::Path);
        }
        assert_eq!(cache.len(), 1);
        // Icons never leak into the persisted form
        assert_eq!(session.commit(), loaded_document());
    }
}
