//! File Launcher
//!
//! Opens a resolved path with the host's default handler. Fire-and-forget:
//! the spawned process is not waited on and its exit status is not
//! consumed; only a failure to spawn is reported.

use crate::error::FindError;
use std::path::Path;
use std::process::Command;
use tracing::debug;

pub fn open_path(path: &Path) -> Result<(), FindError> {
    debug!(path = %path.display(), "launching system handler");
    let mut command = opener_command();
    command.arg(path);
    command.spawn().map_err(|source| FindError::Launch {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(target_os = "macos")]
fn opener_command() -> Command {
    Command::new("open")
}

#[cfg(target_os = "windows")]
fn opener_command() -> Command {
    let mut command = Command::new("cmd");
    // The empty string fills the window-title slot of `start`.
    command.args(["/C", "start", ""]);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command() -> Command {
    Command::new("xdg-open")
}
