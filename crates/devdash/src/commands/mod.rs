//! Command dispatch: bridges CLI args -> core App -> output formatting.

pub mod access;
pub mod config_cmd;
pub mod devices;
pub mod groups;
pub mod navigate;
pub mod session;
pub mod util;

use devdash_core::App;

use crate::cli::{Command, GlobalOpts};
use crate::config;
use crate::error::CliError;

/// Build an `App` for the active profile and establish a session:
/// a login when credentials resolve, a plain session check otherwise.
pub async fn connect(global: &GlobalOpts) -> Result<App, CliError> {
    let (app_config, _) = config::resolve_app_config(global)?;
    let app = App::new(app_config)?;
    util::with_spinner(global, "Connecting…", app.connect()).await?;
    Ok(app)
}

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Session(args) => session::handle(args, global).await,
        Command::Login => session::login(global).await,
        Command::Logout => session::logout(global).await,
        Command::Access(args) => access::handle(args, global).await,
        Command::Groups(args) => groups::handle(args, global).await,
        Command::Navigate { path } => navigate::handle(&path, global).await,
        // Local commands are handled before dispatch
        Command::Devices(_) | Command::Routes | Command::Config(_) | Command::Completions(_) => {
            unreachable!()
        }
    }
}
