#![allow(clippy::unwrap_used)]
// Integration tests for `Site` against a wiremock vendor.

use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sectoralarm_core::{
    CoreError, ErrorKind, Formatted, Settings, Site, SiteConfig, watch_status,
};

// ── Helpers ─────────────────────────────────────────────────────────

const SESSION_COOKIE: &str = "ASP.NET_SessionId=pre; .ASPXAUTH=session";

fn settings(json_output: bool) -> Settings {
    Settings {
        number_of_retries: 2,
        retry_delay_in_ms: 5,
        json_output,
    }
}

fn site(server: &MockServer, settings: Settings) -> Site {
    let config = SiteConfig::new(
        "user@example.com",
        SecretString::from("hunter2".to_string()),
        "1000",
    )
    .with_base_url(Url::parse(&server.uri()).unwrap());
    Site::new(config, settings).unwrap()
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/User/Login"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("set-cookie", "ASP.NET_SessionId=pre; path=/")
                .set_body_string(r#"<script src="/Scripts/main.js?v1_2_M03"></script>"#),
        )
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/User/Login"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", "/")
                .append_header("set-cookie", ".ASPXAUTH=session; path=/; HttpOnly"),
        )
        .mount(server)
        .await;
}

async fn logged_in(server: &MockServer, settings: Settings) -> Site {
    mount_login(server).await;
    let site = site(server, settings);
    site.login().await.unwrap();
    site
}

async fn requests_to(server: &MockServer, route: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == route)
        .count()
}

fn overview(armed: &str, locks: Value) -> Value {
    json!({
        "Panel": {
            "PanelId": 1000,
            "PanelDisplayName": "Home",
            "ArmedStatus": armed,
            "PartialAvalible": true,
            "AnnexAvalible": false
        },
        "Locks": locks,
        "Temperatures": [],
        "Smartplugs": [],
        "Videos": []
    })
}

fn history() -> Value {
    json!({
        "LogDetails": [
            {"Time": "2017-06-18T16:17:00", "EventType": "armed", "User": "Kod"},
            {"Time": "2017-06-17T08:00:00", "EventType": "disarmed", "User": "a person"}
        ]
    })
}

async fn mount_overview(server: &MockServer, body: &Value) {
    Mock::given(method("POST"))
        .and(path("/Panel/GetOverview/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_history(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/Panel/GetPanelHistory/1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(history()))
        .mount(server)
        .await;
}

// ── Session ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_stores_session_used_by_later_calls() {
    let server = MockServer::start().await;
    let site = logged_in(&server, settings(false)).await;
    assert!(site.is_logged_in().await);

    Mock::given(method("POST"))
        .and(path("/Panel/GetOverview/"))
        .and(header("cookie", SESSION_COOKIE))
        .and(body_partial_json(json!({"PanelId": "1000", "Version": "v1_2_M03"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(overview("armed", json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let info = site.info().await.unwrap().into_structured().unwrap();
    assert_eq!(info.site_id, "1000");
    assert!(info.partial_arming_available);
    assert!(!info.locks_available);
}

#[tokio::test]
async fn test_rejected_login_is_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/User/Login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"main.js?v1""#))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/User/Login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>wrong</html>"))
        .mount(&server)
        .await;

    let site = site(&server, settings(true));
    let err = site.login().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidCredentials);
    assert!(!site.is_logged_in().await);
}

#[tokio::test]
async fn test_calls_before_login_are_invalid_session() {
    let server = MockServer::start().await;
    let site = site(&server, settings(true));

    let err = site.status().await.unwrap_err();

    assert!(matches!(err, CoreError::InvalidSession { attempts: 0 }), "got: {err:?}");
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Command whitelist ───────────────────────────────────────────────

#[tokio::test]
async fn test_unknown_commands_never_reach_the_network() {
    let server = MockServer::start().await;
    let site = logged_in(&server, settings(true)).await;
    let before = server.received_requests().await.unwrap().len();

    for command in ["Arm", "total", "Lock", ""] {
        let err = site.act(command, "1234").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCommand, "{command:?}");
    }
    for command in ["Open", "lock", "Disarm"] {
        let err = site.act_on_lock("123", "0000", command).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCommand, "{command:?}");
    }

    assert_eq!(server.received_requests().await.unwrap().len(), before);
}

#[tokio::test]
async fn test_validation_precedes_session_lookup() {
    let server = MockServer::start().await;
    let site = site(&server, settings(true));

    let err = site.act("Everything", "1234").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidCommand);
}

// ── Retry ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_expired_session_retries_configured_times() {
    let server = MockServer::start().await;
    let site = logged_in(&server, settings(true)).await;

    Mock::given(method("POST"))
        .and(path("/Panel/ArmPanel/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = site.arm("1234").await.unwrap_err();

    assert!(matches!(err, CoreError::InvalidSession { attempts: 3 }), "got: {err:?}");
    assert_eq!(requests_to(&server, "/Panel/ArmPanel/").await, 3);
}

#[tokio::test]
async fn test_zero_retries_is_one_attempt() {
    let server = MockServer::start().await;
    let settings = Settings {
        number_of_retries: 0,
        ..settings(true)
    };
    let site = logged_in(&server, settings).await;

    Mock::given(method("POST"))
        .and(path("/Locks/Lock"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = site.lock("123", "0000").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidSession);
    assert_eq!(requests_to(&server, "/Locks/Lock").await, 1);
}

// ── Status composition ──────────────────────────────────────────────

#[tokio::test]
async fn test_status_merges_latest_event_and_lock_listing() {
    let server = MockServer::start().await;
    let site = logged_in(&server, settings(false)).await;

    let summary = json!([{"Label": "front", "Serial": "123", "Status": "lock",
                          "SoundLevel": 2, "AutoLockEnabled": false}]);
    mount_overview(&server, &overview("partialarmed", summary)).await;
    mount_history(&server).await;
    Mock::given(method("GET"))
        .and(path("/Locks/GetLocks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Label": "front", "Serial": "123", "Status": "unlock", "SoundLevel": 1, "AutoLockEnabled": true},
            {"Label": "back", "Serial": "124", "Status": "lock", "SoundLevel": 1, "AutoLockEnabled": false}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let status = site.status().await.unwrap().into_structured().unwrap();

    assert_eq!(status.armed_status, "partialArmed");
    assert_eq!(status.last_interaction_by.as_deref(), Some("code"));
    assert_eq!(status.last_interaction_time.as_deref(), Some("2017-06-18 16:17:00"));
    assert!(status.locks_available);
    assert_eq!(status.locks.len(), 2);
    assert_eq!(status.locks[0].status.as_deref(), Some("unlocked"));
    assert!(status.locks[0].auto_lock_enabled);
}

#[tokio::test]
async fn test_status_keeps_overview_locks_when_listing_is_empty() {
    let server = MockServer::start().await;
    let site = logged_in(&server, settings(false)).await;

    let summary = json!([{"Label": "front", "Serial": "123", "Status": "lock",
                          "SoundLevel": 2, "AutoLockEnabled": false}]);
    mount_overview(&server, &overview("armed", summary)).await;
    mount_history(&server).await;
    Mock::given(method("GET"))
        .and(path("/Locks/GetLocks/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let status = site.status().await.unwrap().into_structured().unwrap();

    assert!(status.locks_available);
    assert_eq!(status.locks.len(), 1);
    assert_eq!(status.locks[0].lock_id, "123");
    assert_eq!(status.locks[0].status.as_deref(), Some("locked"));
}

#[tokio::test]
async fn test_status_tolerates_latest_event_without_user() {
    let server = MockServer::start().await;
    let site = logged_in(&server, settings(false)).await;

    mount_overview(&server, &overview("armed", json!([]))).await;
    Mock::given(method("GET"))
        .and(path("/Panel/GetPanelHistory/1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "LogDetails": [
                {"Time": "2017-06-18T16:17:00", "EventType": "armed", "User": null},
                {"Time": "2017-06-17T08:00:00", "EventType": "disarmed", "User": "a person"}
            ]
        })))
        .mount(&server)
        .await;

    let status = site.status().await.unwrap().into_structured().unwrap();

    assert_eq!(status.armed_status, "armed");
    assert_eq!(status.last_interaction_by, None);
    assert_eq!(status.last_interaction_time.as_deref(), Some("2017-06-18 16:17:00"));
}

#[tokio::test]
async fn test_status_without_locks_skips_lock_listing() {
    let server = MockServer::start().await;
    let site = logged_in(&server, settings(true)).await;

    mount_overview(&server, &overview("armed", json!([]))).await;
    mount_history(&server).await;
    Mock::given(method("GET"))
        .and(path("/Locks/GetLocks/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(0)
        .mount(&server)
        .await;

    let out = site.status().await.unwrap();
    let json: Value = serde_json::from_str(out.as_json().unwrap()).unwrap();

    assert_eq!(json["siteId"], "1000");
    assert_eq!(json["armedStatus"], "armed");
    assert_eq!(json["locksAvailable"], false);
    assert_eq!(json["locks"], json!([]));
    assert_eq!(json["lastInteractionBy"], "code");
}

// ── Reads ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_history_defaults_to_capitalized_code_label() {
    let server = MockServer::start().await;
    let site = logged_in(&server, settings(false)).await;
    mount_history(&server).await;

    let events = site.history(None).await.unwrap().into_structured().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].user.as_deref(), Some("Code"));
    assert_eq!(events[1].action.as_deref(), Some("disarmed"));

    let top = site.history(Some(1)).await.unwrap().into_structured().unwrap();
    assert_eq!(top.len(), 1);
}

#[tokio::test]
async fn test_history_json_output_is_a_string() {
    let server = MockServer::start().await;
    let site = logged_in(&server, settings(true)).await;
    mount_history(&server).await;

    let out = site.history(Some(1)).await.unwrap();

    assert_eq!(
        out,
        Formatted::Json(
            r#"[{"time":"2017-06-18 16:17:00","action":"armed","user":"Code"}]"#.to_string()
        )
    );
}

#[tokio::test]
async fn test_missing_lock_listing_is_empty_not_an_error() {
    let server = MockServer::start().await;
    let site = logged_in(&server, settings(true)).await;

    Mock::given(method("GET"))
        .and(path("/Locks/GetLocks/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let out = site.locks(None).await.unwrap();

    assert_eq!(out.as_json(), Some("[]"));
}

#[tokio::test]
async fn test_temperatures_filter_by_sensor() {
    let server = MockServer::start().await;
    let site = logged_in(&server, settings(false)).await;

    Mock::given(method("POST"))
        .and(path("/Panel/GetTempratures/"))
        .and(body_partial_json(json!({"id": "1000"})))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"Label":"hall","SerialNo":"A1","Temprature":"21"},{"Label":"garage","SerialNo":"B2","Temprature":"9"}]"#,
        ))
        .mount(&server)
        .await;

    let all = site.temperatures(None).await.unwrap().into_structured().unwrap();
    assert_eq!(all.len(), 2);

    let garage = site.temperatures(Some("B2")).await.unwrap().into_structured().unwrap();
    assert_eq!(garage.len(), 1);
    assert_eq!(garage[0].temperature, "9");
}

#[tokio::test]
async fn test_cameras_and_smart_plugs_are_empty() {
    let server = MockServer::start().await;
    let site = site(&server, settings(true));

    assert_eq!(site.cameras().unwrap().as_json(), Some("[]"));
    assert_eq!(site.smart_plugs().unwrap().as_json(), Some("[]"));
}

#[tokio::test]
async fn test_html_error_page_is_a_communication_error() {
    let server = MockServer::start().await;
    let site = logged_in(&server, settings(true)).await;

    Mock::given(method("GET"))
        .and(path("/Panel/GetPanelHistory/1000"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<!DOCTYPE html><html></html>"))
        .mount(&server)
        .await;

    let err = site.history(None).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Communication);
}

// ── Actions ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_arm_maps_panel_state() {
    let server = MockServer::start().await;
    let site = logged_in(&server, settings(false)).await;

    Mock::given(method("POST"))
        .and(path("/Panel/ArmPanel/"))
        .and(body_partial_json(json!({"ArmCmd": "Partial", "PanelCode": "1234"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "panelData": {"PanelDisplayName": "Home", "ArmedStatus": "partialarmed"},
            "status": "success"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = site.partial_arm("1234").await.unwrap().into_structured().unwrap();

    assert_eq!(result.status, "success");
    assert_eq!(result.armed_status, "partialArmed");
}

#[tokio::test]
async fn test_refused_action_is_invalid_code() {
    let server = MockServer::start().await;
    let site = logged_in(&server, settings(true)).await;

    Mock::given(method("POST"))
        .and(path("/Panel/ArmPanel/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "failed"})))
        .mount(&server)
        .await;

    let err = site.act("Disarm", "0000").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidCode);
}

#[tokio::test]
async fn test_unlock_by_keyword() {
    let server = MockServer::start().await;
    let site = logged_in(&server, settings(true)).await;

    Mock::given(method("POST"))
        .and(path("/Locks/Unlock"))
        .and(body_partial_json(json!({"LockSerial": "123", "DisarmCode": "0000"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"panelData":null,"Message":null,"Status":"success"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let out = site.act_on_lock("123", "0000", "Unlock").await.unwrap();

    assert_eq!(out.as_json(), Some(r#"{"status":"success"}"#));
}

#[tokio::test]
async fn test_version_sentinel_surfaces_invalid_version() {
    let server = MockServer::start().await;
    let site = logged_in(&server, settings(true)).await;

    Mock::given(method("POST"))
        .and(path("/Panel/GetOverview/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("\"Invalid version\""))
        .mount(&server)
        .await;

    let err = site.info().await.unwrap_err();

    assert_eq!(err.kind().code(), "ERR_INVALID_VERSION");
}

// ── Watcher ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_watcher_reports_changes_after_first_observation() {
    let server = MockServer::start().await;
    let site = logged_in(&server, settings(false)).await;

    Mock::given(method("POST"))
        .and(path("/Panel/GetOverview/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(overview("armed", json!([]))))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/Panel/GetOverview/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(overview("disarmed", json!([]))))
        .with_priority(2)
        .mount(&server)
        .await;
    mount_history(&server).await;

    let cancel = CancellationToken::new();
    let (mut changes, handle) =
        watch_status(site, Duration::from_millis(10), cancel.clone());

    let change = tokio::time::timeout(Duration::from_secs(5), changes.recv())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(change.previous, "armed");
    assert_eq!(change.current.armed_status, "disarmed");

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_watcher_stops_when_receiver_dropped() {
    let server = MockServer::start().await;
    let site = logged_in(&server, settings(false)).await;
    mount_overview(&server, &overview("armed", json!([]))).await;
    mount_history(&server).await;

    let (changes, handle) =
        watch_status(site, Duration::from_millis(10), CancellationToken::new());
    drop(changes);

    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();
}
