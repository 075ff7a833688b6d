//! Runtime platform detection and executable lookup

use std::env;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Desktop platform family, decides which native tools are used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    /// Linux and every other Unix-like system
    Linux,
}

impl Platform {
    /// Platform of the running process
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Linux
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MacOs => f.write_str("macos"),
            Self::Windows => f.write_str("windows"),
            Self::Linux => f.write_str("linux"),
        }
    }
}

/// Locate `program` on the search path
///
/// A program given with a directory component is checked as-is.
pub fn find_program(program: &str) -> Option<PathBuf> {
    find_program_in(program, env::var_os("PATH"))
}

/// Same as [`find_program`] with an explicit search path
pub fn find_program_in(program: &str, search_path: Option<OsString>) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }

    let direct = Path::new(program);
    if direct.components().count() > 1 {
        return candidates(direct).into_iter().find(|p| is_executable(p));
    }

    let search_path = search_path?;
    env::split_paths(&search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| candidates(&dir.join(program)))
        .find(|p| is_executable(p))
}

#[cfg(windows)]
fn candidates(base: &Path) -> Vec<PathBuf> {
    if base.extension().is_some() {
        return vec![base.to_path_buf()];
    }
    let exts = env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
    exts.split(';')
        .filter(|ext| !ext.is_empty())
        .map(|ext| {
            let mut name = base.as_os_str().to_owned();
            name.push(ext);
            PathBuf::from(name)
        })
        .collect()
}

#[cfg(not(windows))]
fn candidates(base: &Path) -> Vec<PathBuf> {
    vec![base.to_path_buf()]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
