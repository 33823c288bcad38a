//! Open / apply / cancel flow around one settings session
//!
//! Load failures fall back to defaults with a notice for the user. Save
//! failures go back to the caller and suppress the reload event.

use tracing::{info, warn};

use crate::config::{ConfigDocument, ConfigError, ConfigStore};
use crate::reload::ReloadNotifier;
use crate::session::ConfigSession;

/// Outcome of a successful [`SettingsEditor::apply`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub document: ConfigDocument,
    /// False when the reload event could not be delivered; the file is saved either way
    pub monitor_notified: bool,
}

pub struct SettingsEditor {
    store: ConfigStore,
    session: ConfigSession,
    load_notice: Option<String>,
}

impl SettingsEditor {
    /// Load settings into a new session, falling back to defaults on failure
    pub fn open(store: ConfigStore) -> Self {
        let (document, load_notice) = match store.load() {
            Ok(document) => (document, None),
            Err(e) => {
                warn!(path = %store.path().display(), error = ?e, "Failed to load settings, using defaults");
                let notice = format!("Failed to load settings: {:#}", anyhow::Error::from(e));
                (ConfigDocument::default(), Some(notice))
            }
        };

        Self {
            session: ConfigSession::new(&document),
            store,
            load_notice,
        }
    }

    /// Message for the user if loading failed and defaults are in use
    pub fn load_notice(&self) -> Option<&str> {
        self.load_notice.as_deref()
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn session(&self) -> &ConfigSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ConfigSession {
        &mut self.session
    }

    /// Commit, save, then tell the monitor to reload
    pub fn apply(&self, notifier: &dyn ReloadNotifier) -> Result<Applied, ConfigError> {
        let document = self.session.commit();
        self.store.save(&document)?;

        let monitor_notified = match notifier.settings_saved() {
            Ok(()) => true,
            Err(e) => {
                warn!(error = ?e, "Settings saved but monitor reload notification failed");
                false
            }
        };

        info!(mode = %document.mode, monitor_notified, "Applied settings");
        Ok(Applied {
            document,
            monitor_notified,
        })
    }

    /// Drop the session without writing anything
    pub fn cancel(self) {
        info!(path = %self.store.path().display(), "Discarded settings changes");
    }
}
