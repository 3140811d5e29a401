//! Session, login, and logout handlers.

use dialoguer::Input;
use secrecy::SecretString;
use serde::Serialize;

use devdash_core::{App, LoginOutcome, LogoutOutcome, Session, User};

use crate::cli::{GlobalOpts, SessionArgs, SessionCommand};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Detail views ────────────────────────────────────────────────────

fn group_names(user: &User) -> String {
    if user.groups.is_empty() {
        "-".into()
    } else {
        user.groups
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn user_detail(user: &User) -> String {
    let mut lines = Vec::new();
    if let Some(email) = user.attribute("email") {
        lines.push(format!("Email:  {email}"));
    }
    if let Some(name) = user.attribute("username") {
        lines.push(format!("User:   {name}"));
    }
    lines.push(format!("Role:   {}", user.role.as_deref().unwrap_or("-")));
    lines.push(format!("Groups: {}", group_names(user)));
    lines.join("\n")
}

#[derive(Serialize)]
struct SessionView<'a> {
    #[serde(flatten)]
    session: &'a Session,
    last_checked: Option<String>,
}

fn session_detail(view: &SessionView<'_>, color: bool) -> String {
    let session = view.session;
    let mut lines = vec![output::verdict(
        session.authenticated,
        if session.authenticated {
            "authenticated"
        } else {
            "not authenticated"
        },
        color,
    )];
    if let Some(ref user) = session.user {
        lines.push(user_detail(user));
    }
    if let Some(ref at) = view.last_checked {
        lines.push(format!("Checked: {at}"));
    }
    lines.join("\n")
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn handle(args: SessionArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        SessionCommand::Check => {
            let app = super::connect(global).await?;
            util::with_spinner(global, "Checking session…", app.auth().check_session()).await;

            let session = app.session().snapshot();
            let view = SessionView {
                session: &session,
                last_checked: app.session().last_checked().map(|t| t.to_rfc3339()),
            };
            let out = output::render_single(
                &global.output,
                &view,
                |v| session_detail(v, color),
                |v| v.session.authenticated.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SessionCommand::Whoami => {
            let app = super::connect(global).await?;
            let Some(user) = app.session().user() else {
                return util::decision_to_result(&app, app.auth().require_auth());
            };
            let out = output::render_single(&global.output, &user, user_detail, |u| {
                u.role.clone().unwrap_or_default()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SessionCommand::Status => {
            let (app_config, _) = config::resolve_app_config(global)?;
            let app = App::new(app_config)?;
            let up = util::with_spinner(
                global,
                "Probing auth service…",
                app.auth().check_auth_status(),
            )
            .await;

            let out = output::render_single(
                &global.output,
                &serde_json::json!({ "dashboard_reachable": up }),
                |_| output::verdict(up, "auth dashboard reachable", color),
                |_| up.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            if up {
                Ok(())
            } else {
                Err(CliError::ConnectionFailed {
                    url: app.config().base_url.to_string(),
                    source: "dashboard probe did not return 200".into(),
                })
            }
        }
    }
}

/// Log in with configured credentials, prompting for whatever is missing.
pub async fn login(global: &GlobalOpts) -> Result<(), CliError> {
    let (mut app_config, profile_name) = config::resolve_app_config(global)?;

    if app_config.credentials.is_none() {
        let (profile, _) = config::resolve_profile(global)?;
        let email = match profile.email {
            Some(email) => email,
            None => Input::<String>::new()
                .with_prompt("Email")
                .interact_text()
                .map_err(util::prompt_err)?,
        };
        let password: SecretString = util::prompt_secret("Password: ", "password")?;
        app_config = config::interactive_app_config(global, email, password)?;
    }

    let Some(creds) = app_config.credentials.clone() else {
        return Err(CliError::NoCredentials {
            profile: profile_name,
        });
    };

    let app = App::new(app_config)?;
    let outcome = util::with_spinner(
        global,
        "Logging in…",
        app.auth().login(&creds.email, &creds.password),
    )
    .await;

    match outcome {
        LoginOutcome::Success { ref user } => {
            let out = output::render_single(&global.output, &outcome, |_| user_detail(user), |_| {
                user.role.clone().unwrap_or_default()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
        LoginOutcome::Failure { error } => Err(CliError::AuthFailed {
            profile: profile_name,
            message: error.unwrap_or_else(|| "no reason given".into()),
        }),
    }
}

/// Log in with profile credentials, then end the session.
pub async fn logout(global: &GlobalOpts) -> Result<(), CliError> {
    let (app_config, _) = config::resolve_app_config_with_credentials(global)?;
    let app = App::new(app_config)?;
    util::with_spinner(global, "Logging in…", app.connect()).await?;

    match util::with_spinner(global, "Logging out…", app.auth().logout()).await {
        LogoutOutcome::Success => {
            if !global.quiet {
                eprintln!("✓ Logged out");
            }
            Ok(())
        }
        LogoutOutcome::Failure { error } => Err(CliError::ApiError {
            code: "logout_rejected".into(),
            message: error.unwrap_or_else(|| "no reason given".into()),
        }),
    }
}
