use std::path::Path;

use thiserror::Error;

use crate::config::Credentials;

#[cfg(test)]
pub mod mock;
pub mod sftp;

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("remote path not found: {path}")]
    NotFound { path: String },

    #[error("connection failed: {message}")]
    Connection { message: String },

    #[error("{message}")]
    Request { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TransferError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TransferError::NotFound { .. })
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UploadStats {
    pub directories: u64,
    pub files: u64,
    pub bytes: u64,
}

/// Remote file-transfer session used by the deploy command.
pub trait Transfer {
    fn connect(&mut self, credentials: &Credentials) -> Result<(), TransferError>;

    /// Removes `remote` and everything below it.
    /// Fails with [`TransferError::NotFound`] when it does not exist.
    fn remove_dir_all(&mut self, remote: &Path) -> Result<(), TransferError>;

    /// Creates `remote` and any missing parents.
    fn create_dir_all(&mut self, remote: &Path) -> Result<(), TransferError>;

    /// Copies the local tree below `local` into the existing `remote` directory.
    fn upload_dir(&mut self, local: &Path, remote: &Path) -> Result<UploadStats, TransferError>;

    /// Releases the session. Safe to call when never connected.
    fn close(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Path relative to the tree root.
    pub relative: std::path::PathBuf,
    pub is_dir: bool,
    pub len: u64,
}

/// Every entry below `local`, parents before children. The root itself is
/// not included.
pub fn walk_tree(local: &Path) -> Result<Vec<TreeEntry>, TransferError> {
    let mut entries = Vec::new();

    for entry in walkdir::WalkDir::new(local).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|err| TransferError::Request {
            message: format!("failed to walk: {}, {}", local.display(), err),
        })?;

        let relative = entry
            .path()
            .strip_prefix(local)
            .map_err(|err| TransferError::Request {
                message: format!("failed to relativize: {}, {}", entry.path().display(), err),
            })?
            .to_path_buf();

        let metadata = entry.metadata().map_err(|err| TransferError::Request {
            message: format!("failed to stat: {}, {}", entry.path().display(), err),
        })?;

        entries.push(TreeEntry {
            relative,
            is_dir: metadata.is_dir(),
            len: if metadata.is_dir() { 0 } else { metadata.len() },
        });
    }

    Ok(entries)
}
