use std::{
    fs::File,
    io,
    net::TcpStream,
    path::{Path, PathBuf},
};

use ssh2::{ErrorCode, Session, Sftp};
use tracing::{debug, warn};

use crate::{
    config::Credentials,
    transfer::{self, Transfer, TransferError, UploadStats},
};

const FX_NO_SUCH_FILE: i32 = 2;
const DIR_MODE: i32 = 0o755;

#[derive(Default)]
pub struct SftpClient {
    session: Option<Session>,
    sftp: Option<Sftp>,
}

impl SftpClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn sftp(&self) -> Result<&Sftp, TransferError> {
        self.sftp.as_ref().ok_or_else(|| TransferError::Connection {
            message: "not connected".to_string(),
        })
    }

    fn remove_tree(sftp: &Sftp, remote: &Path) -> Result<(), TransferError> {
        let entries = sftp.readdir(remote).map_err(|err| map_err("readdir", remote, err))?;

        for (path, stat) in entries {
            if stat.is_dir() {
                Self::remove_tree(sftp, &path)?;
            } else {
                sftp.unlink(&path).map_err(|err| map_err("unlink", &path, err))?;
            }
        }

        sftp.rmdir(remote).map_err(|err| map_err("rmdir", remote, err))
    }

    fn ensure_dir(sftp: &Sftp, remote: &Path) -> Result<bool, TransferError> {
        match sftp.stat(remote) {
            Ok(stat) if stat.is_dir() => Ok(false),
            Ok(_) => Err(TransferError::Request {
                message: format!("not a directory: {}", remote.display()),
            }),
            Err(err) if is_missing(&err) => {
                sftp.mkdir(remote, DIR_MODE)
                    .map_err(|err| map_err("mkdir", remote, err))?;
                Ok(true)
            }
            Err(err) => Err(map_err("stat", remote, err)),
        }
    }
}

impl Transfer for SftpClient {
    fn connect(&mut self, credentials: &Credentials) -> Result<(), TransferError> {
        let connection_err = |err: &dyn std::fmt::Display| TransferError::Connection {
            message: format!("{}:{}, {}", credentials.host, credentials.port, err),
        };

        let tcp = TcpStream::connect((credentials.host.as_str(), credentials.port))
            .map_err(|err| connection_err(&err))?;

        let mut session = Session::new().map_err(|err| connection_err(&err))?;
        session.set_tcp_stream(tcp);
        session.handshake().map_err(|err| connection_err(&err))?;
        session
            .userauth_password(&credentials.username, &credentials.password)
            .map_err(|err| connection_err(&err))?;

        if !session.authenticated() {
            return Err(connection_err(&"authentication rejected"));
        }

        let sftp = session.sftp().map_err(|err| connection_err(&err))?;

        self.session = Some(session);
        self.sftp = Some(sftp);
        Ok(())
    }

    fn remove_dir_all(&mut self, remote: &Path) -> Result<(), TransferError> {
        Self::remove_tree(self.sftp()?, remote)
    }

    fn create_dir_all(&mut self, remote: &Path) -> Result<(), TransferError> {
        let sftp = self.sftp()?;

        let mut current = PathBuf::new();
        for component in remote.components() {
            current.push(component);
            if matches!(
                component,
                std::path::Component::CurDir | std::path::Component::RootDir
            ) {
                continue;
            }

            Self::ensure_dir(sftp, &current)?;
        }

        Ok(())
    }

    fn upload_dir(&mut self, local: &Path, remote: &Path) -> Result<UploadStats, TransferError> {
        let sftp = self.sftp()?;
        let mut stats = UploadStats::default();

        for entry in transfer::walk_tree(local)? {
            let target = remote.join(&entry.relative);

            if entry.is_dir {
                Self::ensure_dir(sftp, &target)?;
                stats.directories += 1;
                continue;
            }

            let mut source = File::open(local.join(&entry.relative))?;
            let mut dest = sftp.create(&target).map_err(|err| map_err("create", &target, err))?;
            let copied = io::copy(&mut source, &mut dest)?;

            if copied != entry.len {
                warn!(file = %target.display(), expected = entry.len, bytes = copied, "file changed during upload");
            }
            debug!(file = %target.display(), bytes = copied, "uploaded");
            stats.files += 1;
            stats.bytes += copied;
        }

        Ok(stats)
    }

    fn close(&mut self) {
        self.sftp = None;

        if let Some(session) = self.session.take() {
            if let Err(err) = session.disconnect(None, "deploy finished", None) {
                warn!(error_message=%err, error_group="disconnect");
            }
        }
    }
}

fn is_missing(err: &ssh2::Error) -> bool {
    matches!(err.code(), ErrorCode::SFTP(FX_NO_SUCH_FILE))
}

fn map_err(op: &str, path: &Path, err: ssh2::Error) -> TransferError {
    if is_missing(&err) {
        return TransferError::NotFound {
            path: path.display().to_string(),
        };
    }

    TransferError::Request {
        message: format!("failed to {}: {}, {}", op, path.display(), err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconnected() {
        let mut client = SftpClient::new();

        assert!(matches!(
            client.create_dir_all(Path::new("./website/")),
            Err(TransferError::Connection { .. })
        ));
        assert!(matches!(
            client.remove_dir_all(Path::new("./website/")),
            Err(TransferError::Connection { .. })
        ));

        client.close();
    }
}
