#![forbid(unsafe_code)]

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{Level as TraceLevel, info, warn};
use tracing_subscriber::FmtSubscriber;

use caffeine_settings::candidates::ProcessCandidate;
use caffeine_settings::constants::LOG_LEVEL_ENV;
use caffeine_settings::reload::{self, ReloadNotifier};
use caffeine_settings::{ConfigStore, Matcher, MatcherKind, Mode, SettingsEditor};

#[derive(Debug, Parser)]
#[command(name = "caffeine-settings", version, about = "Edit caffeine wake settings")]
struct Cli {
    /// Settings file (defaults to the per-user config location)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pid file of the running monitor to signal after saving
    #[arg(long, global = true, value_name = "FILE")]
    notify_pid_file: Option<PathBuf>,

    /// Enable debug logging (overrides LOG_LEVEL)
    #[arg(long, global = true)]
    debug: bool,

    /// Save even if the existing settings file could not be loaded (its contents are lost)
    #[arg(long, global = true)]
    force: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the current settings as JSON
    Show,
    /// Switch the operating mode
    Mode {
        #[arg(value_enum)]
        mode: ModeArg,
    },
    /// Change always-on mode settings
    Standard {
        #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
        keep_display_on: bool,
    },
    /// Change automatic mode settings
    Auto(AutoArgs),
    /// Add a matcher to the automatic mode list
    Add {
        #[arg(value_enum)]
        kind: KindArg,
        value: String,
    },
    /// Add an executable picked from disk, by full path or by file name
    AddExe {
        path: String,
        #[arg(long)]
        by_name: bool,
    },
    /// Remove a matcher from the automatic mode list
    Remove {
        #[arg(value_enum)]
        kind: KindArg,
        value: String,
    },
}

#[derive(Debug, Args)]
struct AutoArgs {
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    keep_display_on: Option<bool>,

    /// Milliseconds between process scans in the monitor
    #[arg(long, value_name = "MS", allow_negative_numbers = true)]
    scan_interval: Option<i32>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Disabled,
    Enabled,
    AutoInactive,
    AutoActive,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Disabled => Mode::Disabled,
            ModeArg::Enabled => Mode::Enabled,
            ModeArg::AutoInactive => Mode::AutoInactive,
            ModeArg::AutoActive => Mode::AutoActive,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Path,
    Name,
    Window,
}

impl From<KindArg> for MatcherKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Path => MatcherKind::Path,
            KindArg::Name => MatcherKind::Name,
            KindArg::Window => MatcherKind::Window,
        }
    }
}

fn init_logging(debug: bool) -> Result<()> {
    let log_level = if debug {
        TraceLevel::DEBUG
    } else {
        match std::env::var(LOG_LEVEL_ENV)
            .unwrap_or_else(|_| "info".to_string())
            .to_lowercase()
            .as_str()
        {
            "trace" => TraceLevel::TRACE,
            "debug" => TraceLevel::DEBUG,
            "warn" => TraceLevel::WARN,
            "error" => TraceLevel::ERROR,
            _ => TraceLevel::INFO,
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

#[cfg(unix)]
fn notifier(pid_file: Option<PathBuf>) -> Box<dyn ReloadNotifier> {
    let pid_file = pid_file.unwrap_or_else(reload::default_pid_file);
    Box::new(reload::PidFileNotifier::new(pid_file))
}

#[cfg(not(unix))]
fn notifier(_pid_file: Option<PathBuf>) -> Box<dyn ReloadNotifier> {
    Box::new(reload::NoopNotifier)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug)?;
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let store = match cli.config {
        Some(path) => ConfigStore::new(path),
        None => ConfigStore::default(),
    };
    info!(path = %store.path().display(), "Using settings file");

    let mut editor = SettingsEditor::open(store);
    if let Some(notice) = editor.load_notice() {
        eprintln!("{notice}");
        // Saving now would replace the unreadable file with defaults
        if !matches!(cli.command, Command::Show) && !cli.force {
            bail!(
                "Refusing to overwrite {} after a failed load; fix the file or pass --force",
                editor.store().path().display()
            );
        }
    }

    let session = editor.session_mut();
    match cli.command {
        Command::Show => {
            let document = session.commit();
            let text = String::from_utf8(document.encode())
                .context("Settings document is not valid UTF-8")?;
            println!("{text}");
            return Ok(());
        }
        Command::Mode { mode } => session.set_mode(mode.into()),
        Command::Standard { keep_display_on } => session.set_standard_keep_display_on(keep_display_on),
        Command::Auto(args) => {
            if args.keep_display_on.is_none() && args.scan_interval.is_none() {
                bail!("Nothing to change: pass --keep-display-on and/or --scan-interval");
            }
            if let Some(keep) = args.keep_display_on {
                session.set_auto_keep_display_on(keep);
            }
            if let Some(interval) = args.scan_interval {
                session.set_scan_interval_ms(interval);
            }
        }
        Command::Add { kind, value } => {
            let kind = MatcherKind::from(kind);
            let added = match kind {
                MatcherKind::Path => session.add_path(value.as_str()),
                MatcherKind::Name => session.add_name(value.as_str()),
                MatcherKind::Window => session.add_window(value.as_str()),
            };
            if !added {
                bail!("{kind} '{value}' was not added: empty or already in the list");
            }
        }
        Command::AddExe { path, by_name } => {
            let candidate = ProcessCandidate::from_executable(&path);
            let kind = if by_name { MatcherKind::Name } else { MatcherKind::Path };
            if !session.add_candidate(&candidate, kind) {
                bail!("'{path}' was not added: empty or already in the list");
            }
        }
        Command::Remove { kind, value } => {
            let matcher = Matcher::new(value, kind.into());
            if !session.remove_matcher(&matcher) {
                bail!("{} '{}' is not in the list", matcher.kind, matcher.value);
            }
        }
    }

    let notifier = notifier(cli.notify_pid_file);
    let applied = editor
        .apply(notifier.as_ref())
        .context("Failed to save settings")?;

    if !applied.monitor_notified {
        warn!("Settings saved, but the monitor could not be told to reload");
    }
    println!("Mode: {}", applied.document.mode);
    Ok(())
}
