//! Process bootstrap - make sure the backing store file exists
//!
//! Runs before the store is opened: creates the containing directory and an
//! empty database file, then tries to set `0o755` on a directory it created
//! and `0o644` on the file.
//! Containers running as non-root often forbid chmod while still being able
//! to use the file, so permission failures are logged and otherwise ignored.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::db::DatabaseLocation;

/// Mode applied to the directory holding the database
pub const DIR_MODE: u32 = 0o755;

/// Mode applied to the database file
pub const FILE_MODE: u32 = 0o644;

/// Whether bootstrap created the file or found it in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    AlreadyExists,
}

/// Result of a bootstrap run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    pub path: PathBuf,
    pub outcome: InitOutcome,
    /// False when the environment refused the chmod on the file
    pub permissions_applied: bool,
}

/// Bootstrap error type. Only filesystem creation failures are fatal.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("failed to create directory {path:?}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to create database file {path:?}: {source}")]
    CreateFile { path: PathBuf, source: io::Error },
}

/// Bootstrap a [`DatabaseLocation`]; in-memory locations need nothing.
pub fn init_location(location: &DatabaseLocation) -> Result<Option<InitReport>, BootstrapError> {
    location.path().map(init_database).transpose()
}

/// Ensure the database file at `path` exists, applying permissions.
pub fn init_database(path: &Path) -> Result<InitReport, BootstrapError> {
    init_database_with(path, set_mode)
}

/// [`init_database`] with an explicit permission setter.
pub fn init_database_with<F>(path: &Path, chmod: F) -> Result<InitReport, BootstrapError>
where
    F: Fn(&Path, u32) -> io::Result<()>,
{
    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        // Only a directory this run creates gets DIR_MODE; shared parents keep theirs
        if !dir.is_dir() {
            fs::create_dir_all(dir).map_err(|source| BootstrapError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
            apply_mode(&chmod, dir, DIR_MODE);
        }
    }

    // create_new makes the existence check and the creation one step
    let outcome = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => {
            info!("Created database file: {}", path.display());
            InitOutcome::Created
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            info!("Database file already exists: {}", path.display());
            InitOutcome::AlreadyExists
        }
        Err(source) => {
            return Err(BootstrapError::CreateFile {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let permissions_applied = apply_mode(&chmod, path, FILE_MODE);

    Ok(InitReport {
        path: path.to_path_buf(),
        outcome,
        permissions_applied,
    })
}

fn apply_mode<F>(chmod: &F, path: &Path, mode: u32) -> bool
where
    F: Fn(&Path, u32) -> io::Result<()>,
{
    match chmod(path, mode) {
        Ok(()) => true,
        Err(e) => {
            warn!(
                path = %path.display(),
                mode = format!("{:o}", mode),
                error = %e,
                "Could not set permissions, continuing"
            );
            false
        }
    }
}

/// Set unix permission bits on `path`.
#[cfg(unix)]
pub fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

/// No permission bits to set off unix.
#[cfg(not(unix))]
pub fn set_mode(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}
