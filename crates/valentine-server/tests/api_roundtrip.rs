//! Drives the real HTTP API through the client-side store, over TCP.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use valentine_api::state::AppStateInner;
use valentine_core::config::ClientConfig;
use valentine_core::error::{FetchError, PersistenceError};
use valentine_core::flow::{BurstKind, InviteContext, ProposalState, SaveStatus};
use valentine_core::session::{ProposalSession, Renderer};
use valentine_core::store::{HttpSelectionStore, SelectionStore};
use valentine_core::viewer::ActivityLogViewer;
use valentine_db::Database;
use valentine_types::api::SelectionDraft;
use valentine_types::models::find_activity;

/// Serve the full app on an ephemeral port and return its `/api` base URL.
async fn spawn_server(admin_key: &str) -> String {
    let db = Database::open_in_memory().unwrap();
    let state = AppStateInner::new(db, admin_key.into(), None);
    let app = valentine_server::app(state, &["*".to_string()]);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api", addr)
}

fn draft(activity_id: i64, recipient: &str) -> SelectionDraft {
    SelectionDraft::from_activity(
        find_activity(activity_id).unwrap(),
        "fp@test".into(),
        Some(recipient.into()),
        Some("host@example.com".into()),
    )
}

#[tokio::test]
async fn append_then_list_with_admin_key() {
    let base = spawn_server("s3cret").await;
    let store = HttpSelectionStore::new(&ClientConfig::new(&base, "s3cret"));

    assert!(store.list().await.unwrap().is_empty());

    let first = store.append(&draft(1, "Robin")).await.unwrap();
    let second = store.append(&draft(5, "Sam")).await.unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(second.activity_title, find_activity(5).unwrap().title);

    let list = store.list().await.unwrap();
    let ids: Vec<_> = list.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
    assert_eq!(list[1].recipient_name.as_deref(), Some("Robin"));
    assert_eq!(list[1].client_hint.as_deref(), Some("fp@test"));
}

#[tokio::test]
async fn list_without_key_is_unauthorized() {
    let base = spawn_server("s3cret").await;
    let writer = HttpSelectionStore::new(&ClientConfig::new(&base, ""));

    // Writes stay open.
    writer.append(&draft(2, "Robin")).await.unwrap();

    let err = writer.list().await.unwrap_err();
    assert_eq!(err, FetchError::Status(401));
    assert_eq!(err.to_string(), "Unable to load dashboard (401)");

    let wrong = HttpSelectionStore::new(&ClientConfig::new(&base, "guess"));
    assert_eq!(wrong.list().await.unwrap_err(), FetchError::Status(401));
}

#[tokio::test]
async fn invalid_host_email_is_rejected() {
    let base = spawn_server("").await;
    let store = HttpSelectionStore::new(&ClientConfig::new(&base, ""));

    let mut bad = draft(3, "Robin");
    bad.host_email = Some("nope".into());
    assert_eq!(store.append(&bad).await.unwrap_err(), PersistenceError::Status(422));
}

#[tokio::test]
async fn unreachable_server_is_reported() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = HttpSelectionStore::new(&ClientConfig::new(format!("http://{}/api", addr), ""));
    assert!(matches!(
        store.append(&draft(1, "Robin")).await,
        Err(PersistenceError::Unreachable(_))
    ));
    assert!(matches!(store.list().await, Err(FetchError::Unreachable(_))));
}

#[tokio::test]
async fn viewer_sees_new_selections() {
    let base = spawn_server("s3cret").await;
    let store = Arc::new(HttpSelectionStore::new(&ClientConfig::new(&base, "s3cret")));
    let viewer = ActivityLogViewer::new(store.clone(), true);

    viewer.refresh().await;
    assert!(viewer.snapshot().is_empty_log());

    store.append(&draft(6, "Robin")).await.unwrap();
    viewer.refresh().await;

    let snap = viewer.snapshot();
    assert!(snap.error.is_none());
    assert_eq!(snap.selections.len(), 1);
    assert!(snap.render().iter().any(|l| l == "Recipient: Robin"));
}

#[derive(Default)]
struct NullRenderer {
    bursts: Mutex<Vec<BurstKind>>,
}

impl Renderer for NullRenderer {
    fn render(&self, _state: &ProposalState) {}

    fn burst(&self, kind: BurstKind) {
        self.bursts.lock().unwrap().push(kind);
    }
}

#[tokio::test]
async fn proposal_session_saves_pick() {
    let base = spawn_server("").await;
    let store = Arc::new(HttpSelectionStore::new(&ClientConfig::new(&base, "")));
    let renderer = Arc::new(NullRenderer::default());
    let context = InviteContext {
        recipient_name: Some("Robin".into()),
        host_email: Some("host@example.com".into()),
        client_hint: "fp@test".into(),
    };
    let session = ProposalSession::new(context, store.clone(), renderer.clone());

    session.accept().await;
    assert_eq!(session.state(), ProposalState::Accepted);

    // Auto-advance runs on a real timer here.
    for _ in 0..100 {
        if session.state() == ProposalState::ChoosingActivity {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(session.state(), ProposalState::ChoosingActivity);

    session.pick(4).await;
    match session.state() {
        ProposalState::Confirmed { activity, save_status } => {
            assert_eq!(activity.id, 4);
            assert_eq!(save_status, SaveStatus::Saved);
        }
        other => panic!("unexpected state {:?}", other),
    }

    let list = store.list().await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].activity_id, 4);
    assert_eq!(list[0].recipient_name.as_deref(), Some("Robin"));
    assert!(renderer.bursts.lock().unwrap().contains(&BurstKind::Selection));
}
