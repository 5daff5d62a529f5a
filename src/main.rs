use std::{path::PathBuf, process::ExitCode};

use tracing::{error, info, span, Level};
use tracing_subscriber::EnvFilter;

mod adapters;
mod archive;
mod cache;
mod config;
mod deploy;
mod issues;
mod model;
mod search;
mod site;
mod transfer;
mod util;

fn cli() -> clap::Command {
    clap::Command::new("rundschau")
        .version(clap::crate_version!())
        .about("MTV-Rundschau newsletter website and deploy tool")
        .subcommand_required(true)
        .subcommand(
            clap::Command::new("serve")
                .about("Serve the website")
                .arg(
                    clap::Arg::new("PORT")
                        .long("port")
                        .value_parser(clap::value_parser!(u16))
                        .help("Overrides SITE_PORT"),
                ),
        )
        .subcommand(
            clap::Command::new("deploy")
                .about("Replace the remote website directory with a local build over SFTP")
                .arg(
                    clap::Arg::new("LOCAL")
                        .long("local")
                        .default_value(deploy::DEFAULT_LOCAL_DIR),
                )
                .arg(
                    clap::Arg::new("REMOTE")
                        .long("remote")
                        .default_value(deploy::DEFAULT_REMOTE_DIR),
                ),
        )
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let span = span!(Level::INFO, "main", context = "main");
    span.in_scope(|| info!("called"));

    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("serve", args)) => serve(args.get_one::<u16>("PORT").copied()).await,
        Some(("deploy", args)) => {
            let local = args
                .get_one::<String>("LOCAL")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(deploy::DEFAULT_LOCAL_DIR));
            let remote = args
                .get_one::<String>("REMOTE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(deploy::DEFAULT_REMOTE_DIR));

            run_deploy(local, remote).await
        }
        _ => ExitCode::FAILURE,
    }
}

async fn serve(port: Option<u16>) -> ExitCode {
    let mut config = match config::SiteConfig::load() {
        Err(err) => {
            error!(error_message=%err, error_group="config");
            return ExitCode::FAILURE;
        }
        Ok(config) => config,
    };

    if let Some(port) = port {
        config.port = port;
    }

    match site::start_server(config).await {
        Err(err) => {
            error!(error_message=%err, error_group="serve");
            ExitCode::FAILURE
        }
        Ok(()) => ExitCode::SUCCESS,
    }
}

async fn run_deploy(local: PathBuf, remote: PathBuf) -> ExitCode {
    let credentials = match config::Credentials::load() {
        Err(err) => {
            error!(error_message=%err, error_group="config");
            return ExitCode::FAILURE;
        }
        Ok(credentials) => credentials,
    };

    let res = tokio::task::spawn_blocking(move || {
        let mut client = transfer::sftp::SftpClient::new();
        deploy::run(&mut client, &credentials, &local, &remote)
    })
    .await;

    match res {
        Ok(Ok(_)) => ExitCode::SUCCESS,
        // already logged by the deploy run
        Ok(Err(_)) => ExitCode::FAILURE,
        Err(err) => {
            error!(error_message=%err, error_group="join");
            ExitCode::FAILURE
        }
    }
}
