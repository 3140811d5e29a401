// ── Dashboard application context ──
//
// Wires the transport, session store, auth client, and device store
// together for one dashboard instance. UI surfaces (the CLI) build an
// `App` from an `AppConfig` and drive everything through it.

use std::sync::Arc;

use tracing::{debug, info};

use devdash_api::{AuthApiClient, TlsMode, TransportConfig};

use crate::auth::{AuthClient, LoginOutcome};
use crate::config::{AppConfig, TlsVerification};
use crate::device::{DeviceSource, DeviceStore};
use crate::error::CoreError;
use crate::model::User;
use crate::router::{Navigation, RouteGuard, Router};
use crate::session::SessionStore;

pub struct App {
    config: AppConfig,
    auth: AuthClient,
    devices: DeviceStore,
}

impl App {
    /// Build the HTTP client and load device data. Makes no requests.
    pub fn new(config: AppConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let api = AuthApiClient::new(config.base_url.clone(), &transport)?;
        let session = Arc::new(SessionStore::new());
        let auth = AuthClient::new(api, session).with_logout_policy(config.logout_policy);
        let devices = DeviceStore::from_source(DeviceSource::load(&config.devices)?);

        Ok(Self {
            config,
            auth,
            devices,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        self.auth.session()
    }

    pub fn devices(&self) -> &DeviceStore {
        &self.devices
    }

    pub fn devices_mut(&mut self) -> &mut DeviceStore {
        &mut self.devices
    }

    /// Establish a session.
    ///
    /// With credentials configured this logs in; otherwise it asks the
    /// service whether the (fresh) cookie jar already holds a session.
    pub async fn connect(&self) -> Result<Option<User>, CoreError> {
        let Some(creds) = &self.config.credentials else {
            debug!("no credentials configured, checking existing session");
            return Ok(self.auth.check_session().await);
        };

        match self.auth.login(&creds.email, &creds.password).await {
            LoginOutcome::Success { user } => {
                info!(email = %creds.email, "session established");
                Ok(Some(user))
            }
            LoginOutcome::Failure { error } => Err(CoreError::LoginRejected {
                message: error.unwrap_or_else(|| "no reason given".into()),
            }),
        }
    }

    /// Resolve `path` and run it through the route guard.
    pub async fn navigate(&self, path: &str) -> Navigation {
        RouteGuard::new(&self.auth)
            .before_each(Router::resolve(path))
            .await
    }

    // ── One-shot convenience ─────────────────────────────────────

    /// Build, connect, run `f`.
    ///
    /// For CLI invocations: every process starts with an empty cookie jar,
    /// so the session only lives as long as the closure.
    pub async fn oneshot<F, Fut, T>(config: AppConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(App) -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let app = App::new(config)?;
        app.connect().await?;
        f(app).await
    }
}

fn build_transport(config: &AppConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
        cookie_jar: None, // AuthApiClient::new adds one
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
