//! "Settings saved" notification to the monitor process
//!
//! The editor fires [`ReloadNotifier::settings_saved`] after each successful
//! save. How that reaches the monitor is up to the notifier.

use anyhow::Result;
use std::path::PathBuf;
#[cfg(unix)]
use std::path::Path;
#[cfg(unix)]
use tracing::debug;

use crate::constants;

/// Receives the payload-free "committed and saved" event
pub trait ReloadNotifier {
    fn settings_saved(&self) -> Result<()>;
}

/// Drops the event; for drivers with no monitor to tell
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl ReloadNotifier for NoopNotifier {
    fn settings_saved(&self) -> Result<()> {
        Ok(())
    }
}

/// Default pid file location (XDG_RUNTIME_DIR with fallback to cache)
pub fn default_pid_file() -> PathBuf {
    let mut path = dirs::runtime_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(std::env::temp_dir);
    path.push(constants::reload::RUNTIME_DIR);
    path.push(constants::reload::PID_FILENAME);
    path
}

/// Sends SIGUSR1 to the pid recorded by a running monitor
///
/// No pid file means no monitor is running, which is not an error.
#[cfg(unix)]
#[derive(Debug, Clone)]
pub struct PidFileNotifier {
    pid_file: PathBuf,
}

#[cfg(unix)]
impl PidFileNotifier {
    pub fn new(pid_file: impl Into<PathBuf>) -> Self {
        Self {
            pid_file: pid_file.into(),
        }
    }

    pub fn pid_file(&self) -> &Path {
        &self.pid_file
    }

    fn read_pid(&self) -> Result<Option<i32>> {
        use anyhow::Context;

        let contents = match std::fs::read_to_string(&self.pid_file) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read monitor pid file {}", self.pid_file.display())
                });
            }
        };

        let pid = contents.trim().parse::<i32>().with_context(|| {
            format!(
                "Invalid pid '{}' in {}",
                contents.trim(),
                self.pid_file.display()
            )
        })?;
        if pid <= 0 {
            anyhow::bail!("Invalid pid {} in {}", pid, self.pid_file.display());
        }
        Ok(Some(pid))
    }
}

#[cfg(unix)]
impl ReloadNotifier for PidFileNotifier {
    fn settings_saved(&self) -> Result<()> {
        use anyhow::Context;
        use nix::sys::signal::{Signal, kill};
        use nix::unistd::Pid;

        let Some(pid) = self.read_pid()? else {
            debug!(pid_file = %self.pid_file.display(), "No monitor pid file, skipping reload signal");
            return Ok(());
        };

        kill(Pid::from_raw(pid), Signal::SIGUSR1)
            .with_context(|| format!("Failed to signal monitor process {pid}"))?;
        debug!(pid, "Sent reload signal to monitor");
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_pid_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let notifier = PidFileNotifier::new(dir.path().join("monitor.pid"));
        assert!(notifier.settings_saved().is_ok());
    }

    #[test]
    fn test_garbled_pid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let pid_file = dir.path().join("monitor.pid");
        std::fs::write(&pid_file, "not-a-pid\n").unwrap();

        assert!(PidFileNotifier::new(&pid_file).settings_saved().is_err());
    }

    #[test]
    fn test_non_positive_pid_rejected() {
        let dir = TempDir::new().unwrap();
        let pid_file = dir.path().join("monitor.pid");
        std::fs::write(&pid_file, "0").unwrap();

        assert!(PidFileNotifier::new(&pid_file).read_pid().is_err());
    }

    #[test]
    fn test_read_pid_trims_whitespace() {
        let dir = TempDir::new().unwrap();
        let pid_file = dir.path().join("monitor.pid");
        std::fs::write(&pid_file, " 4242\n").unwrap();

        assert_eq!(PidFileNotifier::new(&pid_file).read_pid().unwrap(), Some(4242));
    }

    #[test]
    fn test_default_pid_file_name() {
        assert!(default_pid_file().ends_with("caffeine/monitor.pid"));
    }

    #[test]
    fn test_noop_notifier() {
        assert!(NoopNotifier.settings_saved().is_ok());
    }
}
