//! File watcher: runs `check` on startup, then re-runs on input changes.

use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use notify::{RecursiveMode, Watcher as _};

use crate::commands;
use crate::config;
use crate::error;

/// Debounce delay between filesystem events and re-check.
const DEBOUNCE_MS: u64 = 100;

/// Parent directories of the curated file and the catalog dump.
fn collect_watch_dirs(config: &config::Config) -> HashSet<PathBuf> {
    let mut dirs = HashSet::new();
    for input in [&config.identifiers, &config.catalog] {
        match input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                dirs.insert(PathBuf::from(".").join(parent));
            },
            _ => {
                dirs.insert(PathBuf::from("."));
            },
        }
    }
    return dirs;
}

/// Create a filesystem watcher that sends events on the given channel.
///
/// # Errors
///
/// Returns an error if the watcher cannot be created.
fn create_watcher(
    tx: crossbeam_channel::Sender<()>,
) -> Result<notify::RecommendedWatcher, error::Error> {
    return notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res
            && matches!(
                event.kind,
                notify::EventKind::Create(_)
                    | notify::EventKind::Modify(_)
                    | notify::EventKind::Remove(_)
            )
        {
            let _ = tx.send(());
        }
    })
    .map_err(|e| {
        return error::Error::CatalogCorrupt {
            reason: format!("watcher setup failed: {e}"),
        };
    });
}

/// Entry point for the watch command.
///
/// Runs an initial check, then watches the curated file and catalog
/// directories and re-checks on changes.
///
/// # Errors
///
/// Returns errors from config loading or watcher setup.
pub fn run() -> Result<ExitCode, error::Error> {
    eprintln!("watch: initial check");
    let mut last_code = run_check();

    let root = PathBuf::from(".");
    let config = config::Config::load(&root)?;
    let watch_dirs = collect_watch_dirs(&config);

    let (tx, rx) = crossbeam_channel::unbounded();
    let mut watcher = create_watcher(tx)?;

    for dir in &watch_dirs {
        if dir.exists() {
            let _ = watcher.watch(dir, RecursiveMode::NonRecursive);
        }
    }

    let dir_count = watch_dirs.len();
    eprintln!("watch: monitoring {dir_count} directories, press Ctrl+C to stop");

    while rx.recv().is_ok() {
        let debounce = Duration::from_millis(DEBOUNCE_MS);
        while rx.recv_timeout(debounce).is_ok() {}
        eprintln!("watch: change detected, re-checking...");
        last_code = run_check();
    }

    return Ok(last_code);
}

/// Run check once and print result. Returns the exit code from check.
fn run_check() -> ExitCode {
    return match commands::check() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(3_u8)
        },
    };
}
