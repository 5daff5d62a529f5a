use std::path::Path;

use tracing::{error, info, span, Level};

use crate::{
    config::Credentials,
    transfer::{Transfer, TransferError, UploadStats},
};

pub const DEFAULT_LOCAL_DIR: &str = "dist";
pub const DEFAULT_REMOTE_DIR: &str = "./website/";

/// Replaces the remote directory with the local build tree.
///
/// Connect, remove the old remote tree, recreate it, upload. A failed
/// removal is expected on first deploy and is only logged. The session is
/// closed whatever the outcome. No retries.
pub fn run(
    client: &mut dyn Transfer,
    credentials: &Credentials,
    local: &Path,
    remote: &Path,
) -> Result<UploadStats, TransferError> {
    let span = span!(Level::INFO, "deploy", context = "deploy");
    let _e = span.enter();
    info!(host = %credentials.host, local = %local.display(), remote = %remote.display(), "called");

    if !local.is_dir() {
        let err = TransferError::Request {
            message: format!("local build directory missing: {}", local.display()),
        };
        error!(error_message=%err, error_group="local_dir");
        return Err(err);
    }

    let res = replace_remote(client, credentials, local, remote);
    client.close();
    info!("connection closed");

    match &res {
        Err(err) => error!(error_message=%err, error_group="upload"),
        Ok(stats) => info!(
            directories = stats.directories,
            files = stats.files,
            bytes = stats.bytes,
            "upload finished"
        ),
    }

    res
}

fn replace_remote(
    client: &mut dyn Transfer,
    credentials: &Credentials,
    local: &Path,
    remote: &Path,
) -> Result<UploadStats, TransferError> {
    client.connect(credentials)?;
    info!("connected");

    match client.remove_dir_all(remote) {
        Ok(()) => info!("removed previous remote directory"),
        Err(err) if err.is_not_found() => info!("no previous remote directory to remove"),
        Err(err) => info!(error_message=%err, "could not remove previous remote directory"),
    }

    client.create_dir_all(remote)?;
    info!("created remote directory");

    client.upload_dir(local, remote)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::transfer::mock::MockTransfer;

    fn credentials() -> Credentials {
        Credentials {
            host: "ftp.example.test".to_string(),
            port: 22,
            username: "club".to_string(),
            password: "secret".to_string(),
        }
    }

    fn build_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        fs::write(dir.path().join("assets/app.js"), "let a;").unwrap();
        dir
    }

    #[test]
    fn test_first_deploy() {
        let dir = build_dir();
        let mut client = MockTransfer::default();

        let stats = run(&mut client, &credentials(), dir.path(), Path::new("./website/")).unwrap();

        assert_eq!(
            client.calls,
            vec![
                "connect ftp.example.test",
                "remove ./website/",
                "create ./website/",
                "upload ./website/",
                "close",
            ]
        );
        assert_eq!(stats.directories, 1);
        assert_eq!(stats.files, 2);
        assert_eq!(stats.bytes, 19);
    }

    #[test]
    fn test_redeploy() {
        let dir = build_dir();
        let mut client = MockTransfer {
            remote_exists: true,
            ..Default::default()
        };

        assert!(run(&mut client, &credentials(), dir.path(), Path::new("web")).is_ok());
        assert!(client.remote_exists);
    }

    #[test]
    fn test_failures_close() {
        let dir = build_dir();

        let cases = vec![
            (
                MockTransfer {
                    fail_connect: true,
                    ..Default::default()
                },
                vec!["connect ftp.example.test", "close"],
            ),
            (
                MockTransfer {
                    fail_create: true,
                    ..Default::default()
                },
                vec!["connect ftp.example.test", "remove web", "create web", "close"],
            ),
            (
                MockTransfer {
                    fail_upload: true,
                    ..Default::default()
                },
                vec![
                    "connect ftp.example.test",
                    "remove web",
                    "create web",
                    "upload web",
                    "close",
                ],
            ),
        ];

        for (mut client, expected) in cases {
            let res = run(&mut client, &credentials(), dir.path(), Path::new("web"));
            assert!(res.is_err());
            assert_eq!(client.calls, expected);
        }
    }

    #[test]
    fn test_remove_error_continues() {
        let dir = build_dir();
        let mut client = MockTransfer {
            remote_exists: true,
            fail_remove: true,
            ..Default::default()
        };

        let stats = run(&mut client, &credentials(), dir.path(), Path::new("web")).unwrap();

        assert_eq!(
            client.calls,
            vec![
                "connect ftp.example.test",
                "remove web",
                "create web",
                "upload web",
                "close",
            ]
        );
        assert_eq!(stats.files, 2);
    }

    #[test]
    fn test_missing_local_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut client = MockTransfer::default();

        let res = run(&mut client, &credentials(), &dir.path().join("dist"), Path::new("web"));

        assert!(res.is_err());
        assert!(client.calls.is_empty());
    }
}
