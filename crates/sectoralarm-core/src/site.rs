// ── Site orchestrator ──
//
// One `Site` per alarm panel. Owns the HTTP client, the runtime settings,
// and the session store. Every public read runs execute -> map -> format;
// every mutation runs validate -> execute-with-retry -> map -> format.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info};

use sectoralarm_api::{SectorAlarmClient, Session};

use crate::command::{LockCommand, PanelCommand, validate};
use crate::config::{Settings, SiteConfig};
use crate::convert::{self, CodeLabel, MapOptions};
use crate::error::CoreError;
use crate::model::{
    ActionResult, HistoryEvent, Info, Lock, LockActionResult, Status, TemperatureSensor,
};
use crate::output::{Formatted, format};

/// Events returned by `history()` when no `top` is given.
pub const DEFAULT_HISTORY_TOP: usize = 10;

/// Handle to one alarm site. Cheaply cloneable; clones share the session.
///
/// Mutations against one site must not overlap: a 401 retry reissues the
/// same command, so concurrent retries could duplicate it. Reads may run
/// concurrently.
#[derive(Clone)]
pub struct Site {
    inner: Arc<SiteInner>,
}

struct SiteInner {
    client: SectorAlarmClient,
    config: SiteConfig,
    settings: Settings,
    /// Written only by `login`; replaced wholesale, never patched.
    session: Mutex<Option<Session>>,
}

impl Site {
    /// Build a site handle. Does NOT log in; call [`login()`](Self::login)
    /// or use [`connect()`](Self::connect).
    pub fn new(config: SiteConfig, settings: Settings) -> Result<Self, CoreError> {
        let client = SectorAlarmClient::new(&config.transport())?;
        Ok(Self {
            inner: Arc::new(SiteInner {
                client,
                config,
                settings,
                session: Mutex::new(None),
            }),
        })
    }

    /// Build a site handle and log in.
    pub async fn connect(config: SiteConfig, settings: Settings) -> Result<Self, CoreError> {
        let site = Self::new(config, settings)?;
        site.login().await?;
        Ok(site)
    }

    pub fn site_id(&self) -> &str {
        &self.inner.config.site_id
    }

    pub fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub async fn is_logged_in(&self) -> bool {
        self.inner.session.lock().await.is_some()
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Probe the login page, post credentials, and store a fresh session.
    ///
    /// Also the recovery path for `InvalidSession` and `InvalidVersion`:
    /// the new session carries a freshly scraped API version.
    pub async fn login(&self) -> Result<(), CoreError> {
        let inner = &self.inner;
        let metadata = inner.client.fetch_metadata().await?;
        let cookie = inner
            .client
            .login(&inner.config.email, &inner.config.password, &metadata)
            .await?;

        let session = Session::new(&inner.config.site_id, cookie, &metadata.api_version);
        *inner.session.lock().await = Some(session);
        info!(
            site_id = %inner.config.site_id,
            api_version = %metadata.api_version,
            "logged in"
        );
        Ok(())
    }

    async fn session(&self) -> Result<Session, CoreError> {
        self.inner
            .session
            .lock()
            .await
            .clone()
            .ok_or(CoreError::InvalidSession { attempts: 0 })
    }

    fn client(&self) -> &SectorAlarmClient {
        &self.inner.client
    }

    fn format<T: serde::Serialize>(&self, record: T) -> Result<Formatted<T>, CoreError> {
        format(record, self.inner.settings.json_output)
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub async fn info(&self) -> Result<Formatted<Info>, CoreError> {
        let session = self.session().await?;
        let policy = self.inner.settings.retry_policy();
        let raw = self.client().get_overview(&session, policy).await?;
        self.format(convert::map_info(&raw)?)
    }

    pub async fn status(&self) -> Result<Formatted<Status>, CoreError> {
        self.format(self.status_record().await?)
    }

    /// The composed status, always structured.
    ///
    /// Overview and the latest history event are fetched concurrently;
    /// the lock listing is fetched only when the overview reports locks.
    pub async fn status_record(&self) -> Result<Status, CoreError> {
        let session = self.session().await?;
        let policy = self.inner.settings.retry_policy();

        let (overview, history) = tokio::join!(
            self.client().get_overview(&session, policy),
            self.client().get_history(&session),
        );
        let status = convert::map_status(&overview?)?;
        let latest = convert::map_history(
            &history?,
            &MapOptions::default().top(1).code_label(CodeLabel::Lowercase),
        )?
        .into_iter()
        .next();
        let status = status.with_last_interaction(latest);

        if !status.locks_available {
            return Ok(status);
        }

        debug!(site_id = %session.site_id(), "resolving lock details");
        let locks = convert::map_locks(
            &self.client().get_locks(&session).await?,
            &MapOptions::default(),
        )?;
        if locks.is_empty() {
            debug!(
                site_id = %session.site_id(),
                "lock listing empty, keeping overview lock summary"
            );
            return Ok(status);
        }
        Ok(status.with_locks(locks))
    }

    /// Most recent events first; `top` defaults to [`DEFAULT_HISTORY_TOP`].
    pub async fn history(
        &self,
        top: Option<usize>,
    ) -> Result<Formatted<Vec<HistoryEvent>>, CoreError> {
        let session = self.session().await?;
        let raw = self.client().get_history(&session).await?;
        let opts = MapOptions::default().top(top.unwrap_or(DEFAULT_HISTORY_TOP));
        self.format(convert::map_history(&raw, &opts)?)
    }

    pub async fn temperatures(
        &self,
        sensor_id: Option<&str>,
    ) -> Result<Formatted<Vec<TemperatureSensor>>, CoreError> {
        let session = self.session().await?;
        let policy = self.inner.settings.retry_policy();
        let raw = self.client().get_temperatures(&session, policy).await?;
        self.format(convert::map_temperatures(&raw, &filter(sensor_id))?)
    }

    pub async fn locks(&self, lock_id: Option<&str>) -> Result<Formatted<Vec<Lock>>, CoreError> {
        let session = self.session().await?;
        let raw = self.client().get_locks(&session).await?;
        self.format(convert::map_locks(&raw, &filter(lock_id))?)
    }

    /// Always empty; the vendor endpoints for cameras are not supported.
    pub fn cameras(&self) -> Result<Formatted<Vec<Value>>, CoreError> {
        self.format(Vec::new())
    }

    /// Always empty; the vendor endpoints for smart plugs are not supported.
    pub fn smart_plugs(&self) -> Result<Formatted<Vec<Value>>, CoreError> {
        self.format(Vec::new())
    }

    // ── Panel commands ───────────────────────────────────────────────

    pub async fn arm(&self, code: &str) -> Result<Formatted<ActionResult>, CoreError> {
        self.panel_command(PanelCommand::Total, code).await
    }

    pub async fn partial_arm(&self, code: &str) -> Result<Formatted<ActionResult>, CoreError> {
        self.panel_command(PanelCommand::Partial, code).await
    }

    pub async fn annex_arm(&self, code: &str) -> Result<Formatted<ActionResult>, CoreError> {
        self.panel_command(PanelCommand::ArmAnnex, code).await
    }

    pub async fn disarm(&self, code: &str) -> Result<Formatted<ActionResult>, CoreError> {
        self.panel_command(PanelCommand::Disarm, code).await
    }

    pub async fn annex_disarm(&self, code: &str) -> Result<Formatted<ActionResult>, CoreError> {
        self.panel_command(PanelCommand::DisarmAnnex, code).await
    }

    /// Send a panel command given as its raw keyword (`Total`, `Partial`,
    /// `ArmAnnex`, `Disarm`, `DisarmAnnex`).
    pub async fn act(&self, command: &str, code: &str) -> Result<Formatted<ActionResult>, CoreError> {
        let command: PanelCommand = validate(command)?;
        self.panel_command(command, code).await
    }

    async fn panel_command(
        &self,
        command: PanelCommand,
        code: &str,
    ) -> Result<Formatted<ActionResult>, CoreError> {
        let session = self.session().await?;
        let policy = self.inner.settings.retry_policy();
        let raw = self
            .client()
            .arm_panel(&session, code, command, policy)
            .await?;
        self.format(convert::map_action(&raw)?)
    }

    // ── Lock commands ────────────────────────────────────────────────

    pub async fn lock(
        &self,
        lock_id: &str,
        code: &str,
    ) -> Result<Formatted<LockActionResult>, CoreError> {
        self.lock_command(lock_id, code, LockCommand::Lock).await
    }

    pub async fn unlock(
        &self,
        lock_id: &str,
        code: &str,
    ) -> Result<Formatted<LockActionResult>, CoreError> {
        self.lock_command(lock_id, code, LockCommand::Unlock).await
    }

    /// Send a lock command given as its raw keyword (`Lock`, `Unlock`).
    pub async fn act_on_lock(
        &self,
        lock_id: &str,
        code: &str,
        command: &str,
    ) -> Result<Formatted<LockActionResult>, CoreError> {
        let command: LockCommand = validate(command)?;
        self.lock_command(lock_id, code, command).await
    }

    async fn lock_command(
        &self,
        lock_id: &str,
        code: &str,
        command: LockCommand,
    ) -> Result<Formatted<LockActionResult>, CoreError> {
        let session = self.session().await?;
        let policy = self.inner.settings.retry_policy();
        let raw = self
            .client()
            .act_on_lock(&session, lock_id, code, command, policy)
            .await?;
        self.format(convert::map_lock_action(&raw)?)
    }
}

impl std::fmt::Debug for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Site")
            .field("site_id", &self.inner.config.site_id)
            .field("base_url", &self.inner.config.base_url.as_str())
            .finish_non_exhaustive()
    }
}

fn filter(id: Option<&str>) -> MapOptions {
    let opts = MapOptions::default();
    match id {
        Some(id) => opts.id(id),
        None => opts,
    }
}
