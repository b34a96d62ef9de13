//! Utility functions for Augur

use log::{debug, log_enabled, Level};
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use std::process::Command;

/// Log a command that is about to be executed
pub fn log_command(command: &Command) {
    // Only log if debug level is enabled (which corresponds to verbose mode)
    if log_enabled!(Level::Debug) {
        let program = command.get_program().to_string_lossy();

        let args: Vec<String> = command
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();

        let working_dir = command
            .get_current_dir()
            .map(|p| format!(" (in {})", p.display()))
            .unwrap_or_default();

        debug!("🔮 Executing: {} {}{}", program, args.join(" "), working_dir);
    }
}

/// Resolve a command on PATH (or as a direct path)
pub fn resolve_command<S: AsRef<OsStr>>(command: S) -> Option<PathBuf> {
    let cmd = command.as_ref();
    let resolved = which::which(cmd).ok();
    debug!("Command {:?} resolves to {:?}", cmd, resolved);
    resolved
}

/// Render `path` relative to `base` with `/` separators
pub fn relative_path(base: &Path, path: &Path) -> String {
    let relative = path
        .strip_prefix(base)
        .map(Path::to_path_buf)
        .ok()
        .or_else(|| {
            if path.is_absolute() == base.is_absolute() {
                pathdiff::diff_paths(path, base)
            } else {
                None
            }
        })
        .unwrap_or_else(|| path.to_path_buf());

    to_slash(&relative)
}

/// Rewrite a path reported by an external tool to be scenario-relative.
/// Relative paths are kept as reported; absolute paths outside the root are kept verbatim.
pub fn relativize_tool_path(scenario_root: &Path, reported: &str) -> String {
    let path = Path::new(reported);
    if !path.is_absolute() {
        return to_slash(path);
    }

    match path.strip_prefix(scenario_root) {
        Ok(relative) => to_slash(relative),
        Err(_) => reported.to_string(),
    }
}

/// Join path components with `/`, dropping `.` components
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::CurDir => None,
            Component::RootDir => Some(String::new()),
            other => Some(other.as_os_str().to_string_lossy().into_owned()),
        })
        .collect::<Vec<_>>()
        .join("/")
}
