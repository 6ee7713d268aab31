//! # blog-admin
//!
//! Console front end for the blog admin stores. Wires configuration, the
//! signed HTTP transport, file-backed session storage and a terminal
//! notifier into [`AppStores`], guards the command's route, then runs it.

mod cli;
mod commands;
mod console;
mod telemetry;

use anyhow::{bail, Context, Result};
use api_adapters::{HttpGraphqlTransport, TransportConfig};
use auth_adapters::HmacRequestSigner;
use clap::Parser;
use services::{AppStores, GuardDecision};
use std::sync::Arc;
use storage_adapters::JsonFileStorage;
use tracing::{debug, info};

use crate::cli::{Cli, Command};
use crate::console::ConsoleNotifier;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = configs::load(&cli.config_dir).context("loading configuration")?;

    telemetry::init(&settings.log, cli.log_level.as_deref());
    info!(
        environment = ?settings.environment,
        endpoint = %settings.api.endpoint,
        "blog-admin starting"
    );

    let signer = Arc::new(HmacRequestSigner::new(
        settings.api.client_id.clone(),
        settings.api.client_secret,
    ));
    let transport = HttpGraphqlTransport::new(
        TransportConfig {
            endpoint: settings.api.endpoint.clone(),
            timeout: std::time::Duration::from_secs(settings.api.timeout_secs),
            from_admin: settings.environment != configs::Environment::Production,
        },
        signer,
    )
    .context("building HTTP client")?;
    let storage = JsonFileStorage::new(settings.storage.path.clone());
    debug!(path = %storage.path().display(), "using session file");

    let stores = AppStores::new(
        Arc::new(transport),
        Arc::new(storage),
        Arc::new(ConsoleNotifier::new()),
    );

    if let GuardDecision::Redirect { to, from } = stores.guard.check(cli.command.route()) {
        bail!("not signed in: `{from}` requires `{to}`; run `blog-admin login` first");
    }

    match cli.command {
        Command::Login { user, password } => commands::login(&stores, user, password).await,
        Command::Logout => {
            commands::logout(&stores);
            Ok(())
        }
        Command::Whoami => {
            commands::whoami(&stores);
            Ok(())
        }
        Command::List(args) => commands::list(&stores, args).await,
        Command::Show { id } => commands::show(&stores, &id).await,
        Command::Publish { id } => commands::toggle_publish(&stores, &id).await,
        Command::Delete { id } => commands::toggle_delete(&stores, &id).await,
        Command::Add(args) => commands::add(&stores, args).await,
        Command::Update(args) => commands::update(&stores, args).await,
    }
}
