//! Access check handlers.
//!
//! Each check prints its verdict and maps a redirect to the `AUTH` exit
//! code and a denial to `PERMISSION`.

use secrecy::SecretString;

use devdash_core::AccessDecision;

use crate::cli::{AccessArgs, AccessCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

fn describe(decision: &AccessDecision) -> String {
    match decision {
        AccessDecision::Granted => "granted".into(),
        AccessDecision::Redirect { to } => format!("redirect to {}", to.path()),
        AccessDecision::Denied { reason } => format!("denied: {reason}"),
    }
}

pub async fn handle(args: AccessArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let app = super::connect(global).await?;
    let auth = app.auth();

    let decision = match args.command {
        AccessCommand::Auth => auth.require_auth(),
        AccessCommand::Admin => auth.require_admin(),
        AccessCommand::Role { role } => auth.require_role(&role),
        AccessCommand::Group { group, passphrase } => {
            let passphrase = match passphrase {
                None => None,
                Some(p) if p.is_empty() => {
                    Some(util::prompt_secret("Group passphrase: ", "passphrase")?)
                }
                Some(p) => Some(SecretString::from(p)),
            };
            util::with_spinner(
                global,
                "Checking group access…",
                auth.require_group(&group, passphrase.as_ref()),
            )
            .await
        }
    };

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &decision,
        |d| output::verdict(d.is_granted(), &describe(d), color),
        describe,
    )?;
    output::print_output(&out, global.quiet);

    util::decision_to_result(&app, decision)
}
