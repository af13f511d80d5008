//! Headless driver for the users screen: runs one operation and prints the
//! resulting view-model state as JSON.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;

use clap::{Parser, Subcommand};
use ortho_config::OrthoConfig;
use serde_json::json;
use shared::config::SharedSettings;
use shared::inbound::{UserViewModel, UsersScreenModel};
use shared::telemetry;
use tokio::runtime::Builder;
use tracing::info;

/// `users-console` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "users-console",
    about = "Drive the shared users view-model from the terminal",
    version
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Load and validate the full user list.
    Load,
    /// Look up a single user by identifier.
    Find {
        /// User identifier; must be greater than zero.
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// Create a user from a name and an email address.
    Create {
        /// Display name.
        name: String,
        /// Contact email.
        email: String,
    },
}

fn main() -> io::Result<()> {
    // Help, version and usage errors are printed and exited by clap.
    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main(args))
}

async fn async_main(args: CliArgs) -> io::Result<()> {
    // Subcommands belong to clap; settings come from the environment only.
    let settings = SharedSettings::load_from_iter([OsString::from("users-console")])
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    telemetry::init(settings.log_json);

    let repository = settings
        .build_repository()
        .map_err(|error| io::Error::other(format!("configure repository: {error}")))?;
    info!(backend = ?settings.repository_backend().ok(), "users console starting");

    let view_model = UserViewModel::with_repository(repository);
    run(&view_model, args.command).await;

    let snapshot = json!({
        "uiState": view_model.current_ui_state(),
        "users": view_model.current_users(),
        "selectedUser": view_model.current_selected_user(),
    });
    let rendered = serde_json::to_string_pretty(&snapshot)
        .map_err(|error| io::Error::other(format!("render state: {error}")))?;
    println!("{rendered}");
    Ok(())
}

async fn run(screen: &dyn UsersScreenModel, command: Command) {
    match command {
        Command::Load => screen.load_users().await,
        Command::Find { id } => screen.find_user(id).await,
        Command::Create { name, email } => screen.create_user(&name, &email).await,
    }
}
