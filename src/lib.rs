#![forbid(unsafe_code)]

//! Settings editor core for the caffeine wake utility
//!
//! Loads the shared JSON settings file, edits it through a [`session::ConfigSession`],
//! and saves it back before telling the monitor process to reload.

pub mod candidates;
pub mod config;
pub mod constants;
pub mod editor;
pub mod icon_cache;
pub mod matcher;
pub mod reload;
pub mod session;

pub use config::{ConfigDocument, ConfigError, ConfigStore, Mode};
pub use editor::{Applied, SettingsEditor};
pub use matcher::{Matcher, MatcherKind, MatcherSet};
pub use session::ConfigSession;
