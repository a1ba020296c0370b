// Panel, history, temperature and lock endpoints
//
// Thin wrappers: build the request from the session, run it through the
// executor, return the raw body. Mapping happens in `sectoralarm-core`.

use tracing::debug;

use crate::client::SectorAlarmClient;
use crate::command::{LockCommand, PanelCommand};
use crate::endpoint::ApiRequest;
use crate::error::Error;
use crate::session::{RawResponse, RetryPolicy, Session};

impl SectorAlarmClient {
    /// `POST /Panel/GetOverview/` (retried on 401)
    pub async fn get_overview(
        &self,
        session: &Session,
        policy: RetryPolicy,
    ) -> Result<RawResponse, Error> {
        debug!(site_id = session.site_id(), "fetching overview");
        self.run(&ApiRequest::overview(session), session, policy).await
    }

    /// `GET /Panel/GetPanelHistory/{siteId}`
    pub async fn get_history(&self, session: &Session) -> Result<RawResponse, Error> {
        debug!(site_id = session.site_id(), "fetching history");
        self.run(&ApiRequest::history(session), session, RetryPolicy::none())
            .await
    }

    /// `POST /Panel/GetTempratures/` (retried on 401)
    pub async fn get_temperatures(
        &self,
        session: &Session,
        policy: RetryPolicy,
    ) -> Result<RawResponse, Error> {
        debug!(site_id = session.site_id(), "fetching temperatures");
        self.run(&ApiRequest::temperatures(session), session, policy)
            .await
    }

    /// `GET /Locks/GetLocks/` -- an HTTP 500 comes back as an empty list.
    pub async fn get_locks(&self, session: &Session) -> Result<RawResponse, Error> {
        debug!(site_id = session.site_id(), "fetching locks");
        self.run(&ApiRequest::locks(session), session, RetryPolicy::none())
            .await
    }

    /// `POST /Panel/ArmPanel/` (retried on 401)
    pub async fn arm_panel(
        &self,
        session: &Session,
        code: &str,
        command: PanelCommand,
        policy: RetryPolicy,
    ) -> Result<RawResponse, Error> {
        debug!(site_id = session.site_id(), %command, "sending panel command");
        self.run(&ApiRequest::arm_panel(session, code, command), session, policy)
            .await
    }

    /// `POST /Locks/Lock` or `POST /Locks/Unlock` (retried on 401)
    pub async fn act_on_lock(
        &self,
        session: &Session,
        lock_id: &str,
        code: &str,
        command: LockCommand,
        policy: RetryPolicy,
    ) -> Result<RawResponse, Error> {
        debug!(site_id = session.site_id(), lock_id, %command, "sending lock command");
        let request = ApiRequest::act_on_lock(session, lock_id, code, command);
        self.run(&request, session, policy).await
    }
}
