//! Application-wide constants
//!
//! File names, defaults and other literals shared between the settings
//! core and the driver binary.

/// Settings file location constants
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "caffeine";

    /// Settings file name (shared with the monitor process)
    pub const FILENAME: &str = "Caffeine.json";

    /// Suffix for the temporary file written before the rename on save
    pub const TEMP_SUFFIX: &str = ".tmp";
}

/// Automatic mode defaults
pub mod auto {
    /// Interval between process scans in the monitor, in milliseconds
    pub const DEFAULT_SCAN_INTERVAL_MS: i32 = 2000;
}

/// Reload notification constants
pub mod reload {
    /// Directory under the runtime (or cache) dir holding the monitor pid file
    pub const RUNTIME_DIR: &str = "caffeine";

    /// Pid file written by the monitor process
    pub const PID_FILENAME: &str = "monitor.pid";
}

/// Log level environment variable read by the driver
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";
