//! Settings document and its on-disk persistence
//!
//! - **document**: the typed JSON document shared with the monitor process
//! - **store**: load/save of that document to one file

pub mod document;
pub mod store;

// Re-export commonly used types
pub use document::{AutoMode, ConfigDocument, DecodeError, Mode, StandardMode};
pub use store::{ConfigError, ConfigStore};
