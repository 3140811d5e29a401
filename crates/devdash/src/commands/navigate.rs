//! Route listing and route-guard navigation.

use serde::Serialize;
use strum::IntoEnumIterator;
use tabled::Tabled;

use devdash_core::{App, ExternalRoute, Navigation, Route};

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Route listing ───────────────────────────────────────────────────

#[derive(Serialize, Tabled)]
struct RouteRow {
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Path")]
    path: String,
}

pub fn list_routes(global: &GlobalOpts) -> Result<(), CliError> {
    let base = config::resolve_profile(global)
        .ok()
        .and_then(|(p, _)| devdash_config::parse_server_url(&p.server).ok());

    let mut rows: Vec<RouteRow> = [
        Route::Home,
        Route::Devices,
        Route::Device { id: ":id".into() },
    ]
    .iter()
    .map(|r| RouteRow {
        kind: "dashboard",
        name: r.name(),
        path: r.path(),
    })
    .collect();

    rows.extend(ExternalRoute::iter().map(|r| RouteRow {
        kind: "auth",
        name: r.name(),
        path: base
            .as_ref()
            .and_then(|b| r.url(b).ok())
            .map_or_else(|| r.path().to_owned(), |u| u.to_string()),
    }));

    let out = output::render_list(
        &global.output,
        &rows,
        |r| RouteRow {
            kind: r.kind,
            name: r.name,
            path: r.path.clone(),
        },
        |r| r.path.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Navigation ──────────────────────────────────────────────────────

#[derive(Serialize)]
struct NavigationView {
    #[serde(flatten)]
    navigation: Navigation,
    url: String,
}

fn detail(view: &NavigationView, color: bool) -> String {
    match &view.navigation {
        Navigation::Proceed { route } => output::verdict(
            true,
            &format!("{} ({})", route.path(), route.name()),
            color,
        ),
        Navigation::Redirect { .. } => {
            output::verdict(false, &format!("redirect to {}", view.url), color)
        }
    }
}

pub async fn handle(path: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let (app_config, _) = config::resolve_app_config(global)?;
    let app = App::new(app_config)?;
    if app.config().credentials.is_some() {
        util::with_spinner(global, "Logging in…", app.connect()).await?;
    }

    let navigation = util::with_spinner(global, "Checking session…", app.navigate(path)).await;
    let url = match &navigation {
        Navigation::Proceed { route } => route.path(),
        Navigation::Redirect { to } => to
            .url(&app.config().base_url)
            .map_or_else(|_| to.path().to_owned(), |u| u.to_string()),
    };

    if let Navigation::Proceed {
        route: Route::NotFound { path },
    } = &navigation
    {
        return Err(CliError::NotFound {
            resource_type: "route".into(),
            identifier: path.clone(),
            list_command: "routes".into(),
        });
    }

    let view = NavigationView { navigation, url };
    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &view,
        |v| detail(v, color),
        |v| v.url.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
