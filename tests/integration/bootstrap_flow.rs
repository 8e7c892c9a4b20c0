//! Integration tests for the bootstrap sequence against a mock IPFS API

use super::test_utils::{mount_version, SphereFixture, SPHERE_DID, SPHERE_VERSION};
use httpmock::prelude::*;
use sphere_viewer::actions::Action;
use sphere_viewer::bootstrap::{bootstrap, BootstrapOptions};
use sphere_viewer::gateway::GatewayClient;
use sphere_viewer::noosphere::NoosphereClient;
use sphere_viewer::state::ViewerState;
use sphere_viewer::store::Store;
use std::sync::{Arc, Mutex};
use url::Url;

fn gateway() -> Arc<dyn NoosphereClient> {
    Arc::new(GatewayClient::default())
}

fn recording_store() -> (Store, Arc<Mutex<Vec<&'static str>>>) {
    let store = Store::new();
    let kinds = Arc::new(Mutex::new(Vec::new()));
    let sink = kinds.clone();
    store.subscribe(Arc::new(move |action: &Action, _: &ViewerState| {
        sink.lock().unwrap().push(action.kind());
    }));
    (store, kinds)
}

#[tokio::test]
async fn test_location_origin_serves_sphere_and_file() {
    let fixture = SphereFixture::start();
    let (store, kinds) = recording_store();
    let location = Url::parse(&fixture.sphere_location(Some("notes"))).unwrap();

    let state = bootstrap(&store, gateway(), &location, &BootstrapOptions::default())
        .await
        .unwrap();
    let viewer = state.sphere_viewer;

    assert!(viewer.last_error.is_none(), "{:?}", viewer.last_error);
    assert_eq!(viewer.key.as_deref(), Some("anonymous"));
    assert_eq!(viewer.sphere_id.unwrap().as_str(), SPHERE_DID);
    assert_eq!(viewer.sphere_version.unwrap().as_str(), SPHERE_VERSION);
    assert_eq!(viewer.file.unwrap().text(), "# Notes\n\nSome subtext.");
    assert_eq!(
        *kinds.lock().unwrap(),
        vec![
            "sphereViewer/connectToNoosphere/pending",
            "sphereViewer/connectToNoosphere/fulfilled",
            "sphereViewer/openSphere/pending",
            "sphereViewer/openSphere/fulfilled",
            "sphereViewer/openFile/pending",
            "sphereViewer/openFile/fulfilled",
        ]
    );
}

#[tokio::test]
async fn test_location_without_sphere_only_connects() {
    let fixture = SphereFixture::start();
    let (store, kinds) = recording_store();
    let location = Url::parse(&fixture.location("?slug=intro")).unwrap();

    let state = bootstrap(&store, gateway(), &location, &BootstrapOptions::default())
        .await
        .unwrap();

    assert!(state.sphere_viewer.is_connected());
    assert!(state.sphere_viewer.fs.is_none());
    assert!(state.sphere_viewer.file.is_none());
    assert_eq!(kinds.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unknown_slug_recorded_as_error() {
    let fixture = SphereFixture::start();
    let (store, _) = recording_store();
    let location = Url::parse(&fixture.sphere_location(Some("missing"))).unwrap();

    let state = bootstrap(&store, gateway(), &location, &BootstrapOptions::default())
        .await
        .unwrap();

    assert!(state.sphere_viewer.fs.is_some());
    assert!(state.sphere_viewer.file.is_none());
    assert_eq!(
        state.sphere_viewer.last_error.as_deref(),
        Some("File not found: missing")
    );
}

#[tokio::test]
async fn test_invalid_version_never_reaches_gateway() {
    let server = MockServer::start();
    mount_version(&server);
    let any_dag = server.mock(|when, then| {
        when.method(POST).path("/api/v0/dag/get");
        then.status(500);
    });
    let (store, kinds) = recording_store();
    let location = Url::parse(&format!(
        "{}/?id={}&version=latest&slug=intro",
        server.base_url(),
        SPHERE_DID
    ))
    .unwrap();

    let state = bootstrap(&store, gateway(), &location, &BootstrapOptions::default())
        .await
        .unwrap();

    assert_eq!(any_dag.hits(), 0);
    assert!(state
        .sphere_viewer
        .last_error
        .unwrap()
        .contains("Invalid sphere version"));
    assert!(!kinds
        .lock()
        .unwrap()
        .iter()
        .any(|kind| kind.contains("openFile")));
}

#[tokio::test]
async fn test_unreachable_gateway_records_connect_failure() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let (store, kinds) = recording_store();
    let location = Url::parse(&format!(
        "http://127.0.0.1:{}/?id={}&version={}&slug=intro",
        port, SPHERE_DID, SPHERE_VERSION
    ))
    .unwrap();

    let state = bootstrap(&store, gateway(), &location, &BootstrapOptions::default())
        .await
        .unwrap();

    assert!(!state.sphere_viewer.is_connected());
    assert!(state.sphere_viewer.last_error.is_some());
    assert_eq!(
        *kinds.lock().unwrap(),
        vec![
            "sphereViewer/connectToNoosphere/pending",
            "sphereViewer/connectToNoosphere/rejected",
        ]
    );
}

#[tokio::test]
async fn test_configured_gateway_overrides_location_origin() {
    let fixture = SphereFixture::start();
    let (store, _) = recording_store();
    // The location points somewhere else entirely; the configured API wins
    let location = Url::parse(&format!(
        "https://viewer.invalid/?id={}&version={}&slug=intro",
        SPHERE_DID, SPHERE_VERSION
    ))
    .unwrap();
    let options = BootstrapOptions {
        ipfs_api: Some(Url::parse(&fixture.server.base_url()).unwrap()),
        ..Default::default()
    };

    let state = bootstrap(&store, gateway(), &location, &options)
        .await
        .unwrap();

    assert_eq!(
        state.sphere_viewer.file.unwrap().text(),
        "Welcome to my sphere."
    );
}
