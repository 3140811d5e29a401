//! Group passphrase handlers.

use secrecy::ExposeSecret;
use serde::Serialize;

use crate::cli::{GlobalOpts, GroupsArgs, GroupsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct GeneratedView<'a> {
    group: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

pub async fn handle(args: GroupsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        GroupsCommand::Check { name } => {
            let passphrase = util::prompt_secret("Group passphrase: ", "passphrase")?;
            let app = super::connect(global).await?;
            let check = util::with_spinner(
                global,
                "Checking passphrase…",
                app.auth().check_group_password(&name, &passphrase),
            )
            .await;

            let out = output::render_single(
                &global.output,
                &check,
                |c| output::verdict(c.success, &c.message, color),
                |c| c.message.clone(),
            )?;
            output::print_output(&out, global.quiet);

            if check.success {
                Ok(())
            } else {
                Err(util::refusal(&app, check.message))
            }
        }

        GroupsCommand::GeneratePassword { name } => {
            let app = super::connect(global).await?;
            let generated = util::with_spinner(
                global,
                "Generating passphrase…",
                app.auth().generate_group_password(&name),
            )
            .await;

            match (generated.success, generated.password.as_ref()) {
                (true, Some(password)) => {
                    let view = GeneratedView {
                        group: &name,
                        password: password.expose_secret(),
                        message: generated.message.as_deref(),
                    };
                    let out = output::render_single(
                        &global.output,
                        &view,
                        |v| format!("Group:    {}\nPassword: {}", v.group, v.password),
                        |v| v.password.to_owned(),
                    )?;
                    output::print_output(&out, global.quiet);
                    Ok(())
                }
                _ => Err(util::refusal(
                    &app,
                    generated
                        .message
                        .unwrap_or_else(|| "password generation failed".into()),
                )),
            }
        }
    }
}
