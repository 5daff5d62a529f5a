use std::path::Path;

use crate::{
    config::Credentials,
    transfer::{self, Transfer, TransferError, UploadStats},
};

/// Records every call; each step can be made to fail.
#[derive(Default)]
pub struct MockTransfer {
    pub calls: Vec<String>,
    pub remote_exists: bool,
    pub fail_connect: bool,
    pub fail_remove: bool,
    pub fail_create: bool,
    pub fail_upload: bool,
}

impl Transfer for MockTransfer {
    fn connect(&mut self, credentials: &Credentials) -> Result<(), TransferError> {
        self.calls.push(format!("connect {}", credentials.host));
        if self.fail_connect {
            return Err(TransferError::Connection {
                message: "connection refused".to_string(),
            });
        }

        Ok(())
    }

    fn remove_dir_all(&mut self, remote: &Path) -> Result<(), TransferError> {
        self.calls.push(format!("remove {}", remote.display()));
        if self.fail_remove {
            return Err(TransferError::Request {
                message: "permission denied".to_string(),
            });
        }

        if !self.remote_exists {
            return Err(TransferError::NotFound {
                path: remote.display().to_string(),
            });
        }

        self.remote_exists = false;
        Ok(())
    }

    fn create_dir_all(&mut self, remote: &Path) -> Result<(), TransferError> {
        self.calls.push(format!("create {}", remote.display()));
        if self.fail_create {
            return Err(TransferError::Request {
                message: "permission denied".to_string(),
            });
        }

        self.remote_exists = true;
        Ok(())
    }

    fn upload_dir(&mut self, local: &Path, remote: &Path) -> Result<UploadStats, TransferError> {
        self.calls.push(format!("upload {}", remote.display()));
        if self.fail_upload {
            return Err(TransferError::Request {
                message: "disk quota exceeded".to_string(),
            });
        }

        let mut stats = UploadStats::default();
        for entry in transfer::walk_tree(local)? {
            if entry.is_dir {
                stats.directories += 1;
            } else {
                stats.files += 1;
                stats.bytes += entry.len;
            }
        }

        Ok(stats)
    }

    fn close(&mut self) {
        self.calls.push("close".to_string());
    }
}
