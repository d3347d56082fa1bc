//! Reviewdesk Web Server
//!
//! Back-office API with bearer authentication and role-based capabilities.

use anyhow::Context;
use clap::{Parser, Subcommand};
use reviewdesk_core::{init_logging, ReviewdeskConfig};
use reviewdesk_web::auth::jwt::JwtService;
use reviewdesk_web::server::ReviewdeskServerBuilder;
use reviewdesk_web::WebError;
use std::path::PathBuf;

/// Reviewdesk Web Server
#[derive(Parser)]
#[command(name = "reviewdesk-web")]
#[command(about = "Back-office API for Reviewdesk")]
#[command(version)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Server host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Server port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Log level (error, warn, info, debug, trace)
        #[arg(long)]
        log_level: Option<String>,
    },
    /// Print a signed access token for a user id
    IssueToken {
        /// Identity the token is issued for
        #[arg(long)]
        user_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    let mut config =
        ReviewdeskConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    match args.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
        log_level: None,
    }) {
        Command::Serve {
            host,
            port,
            log_level,
        } => {
            if let Some(level) = log_level {
                config.logging.level = level;
            }
            init_logging(&config.logging).context("Failed to initialise logging")?;

            let mut builder = ReviewdeskServerBuilder::new(config);
            if let Some(host) = host {
                builder = builder.host(host);
            }
            if let Some(port) = port {
                builder = builder.port(port);
            }

            let server = builder.build().inspect_err(|err| {
                if let WebError::Config(err) = err {
                    err.log();
                }
            })?;
            server.start().await?;
        }
        Command::IssueToken { user_id } => {
            if !config.users.iter().any(|u| u.id == user_id) {
                eprintln!(
                    "warning: '{}' is not a configured user; the token will authenticate nobody",
                    user_id
                );
            }

            let token = JwtService::new(&config.auth).issue_access_token(&user_id)?;
            println!("{}", token);
        }
    }

    Ok(())
}
