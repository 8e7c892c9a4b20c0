//! Shared test utilities for integration tests
//!
//! Provides an IPFS API fixture serving one sphere over httpmock, and
//! isolated XDG config directories for configuration tests.

use httpmock::prelude::*;
use serde_json::json;
use std::sync::Mutex;
use tempfile::TempDir;

pub const SPHERE_DID: &str = "did:key:z6MkgYGF3thn8k1Fv4p4dWXKtsXCnLH7q9yw4QgNPULDmDKB";
pub const SPHERE_VERSION: &str = "bafyreihm3hvgwmgfd2lrwhgwpnanjsvdyr3vzw7bbkxbqdrv5nrzv6ueva";
const SPHERE_BODY: &str = "bafyreidspherebody";
const SPHERE_LINKS: &str = "bafyreidspherelinks";

/// Files served by [`SphereFixture`]: slug and content
pub const FIXTURE_FILES: &[(&str, &str)] = &[
    ("intro", "Welcome to my sphere."),
    ("notes", "# Notes\n\nSome subtext."),
];

/// Mock IPFS API serving a single sphere revision
pub struct SphereFixture {
    pub server: MockServer,
}

impl SphereFixture {
    pub fn start() -> Self {
        let fixture = Self {
            server: MockServer::start(),
        };
        mount_version(&fixture.server);
        fixture.mount_dag_node(
            SPHERE_VERSION,
            json!({
                "parent": null,
                "headers": [["Content-Type", "noosphere/sphere"]],
                "body": { "/": SPHERE_BODY }
            }),
        );
        fixture.mount_dag_node(
            SPHERE_BODY,
            json!({
                "identity": SPHERE_DID,
                "links": { "/": SPHERE_LINKS }
            }),
        );

        let mut entries = serde_json::Map::new();
        for (i, (slug, content)) in FIXTURE_FILES.iter().enumerate() {
            let memo = format!("bafyreifilememo{}", i);
            let body = format!("bafkreifilebody{}", i);
            entries.insert(slug.to_string(), json!({ "/": memo }));
            fixture.mount_dag_node(
                &memo,
                json!({
                    "parent": null,
                    "headers": [["Content-Type", "text/subtext"], ["Title", slug]],
                    "body": { "/": body }
                }),
            );
            fixture.mount_block(&body, content.as_bytes());
        }
        fixture.mount_dag_node(SPHERE_LINKS, json!({ "entries": entries }));

        fixture
    }

    pub fn mount_dag_node(&self, cid: &str, node: serde_json::Value) -> httpmock::Mock<'_> {
        self.server.mock(|when, then| {
            when.method(POST)
                .path("/api/v0/dag/get")
                .query_param("arg", cid)
                .query_param("output-codec", "dag-json");
            then.status(200).json_body(node);
        })
    }

    pub fn mount_block(&self, cid: &str, content: &[u8]) -> httpmock::Mock<'_> {
        let content = content.to_vec();
        self.server.mock(|when, then| {
            when.method(POST)
                .path("/api/v0/block/get")
                .query_param("arg", cid);
            then.status(200)
                .header("content-type", "application/octet-stream")
                .body(content);
        })
    }

    /// Viewer location on the fixture's origin with the given query
    pub fn location(&self, query: &str) -> String {
        format!("{}/{}", self.server.base_url(), query)
    }

    /// Location naming the fixture sphere and, optionally, a slug
    pub fn sphere_location(&self, slug: Option<&str>) -> String {
        let mut query = format!("?id={}&version={}", SPHERE_DID, SPHERE_VERSION);
        if let Some(slug) = slug {
            query.push_str(&format!("&slug={}", slug));
        }
        self.location(&query)
    }
}

/// Answer `api/v0/version` so that connecting to `server` succeeds
pub fn mount_version(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(POST).path("/api/v0/version");
        then.status(200)
            .json_body(json!({ "Version": "0.22.0", "Commit": "", "Repo": "15" }));
    })
}

/// Global mutex to serialize XDG environment variable access across all tests
static XDG_ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Run `f` with XDG_CONFIG_HOME and HOME pointing into `test_dir`, restoring
/// the original environment afterwards.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = XDG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let original_home = std::env::var("HOME").ok();
    let original_config_home = std::env::var("XDG_CONFIG_HOME").ok();

    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_home).unwrap();
    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", test_dir.path().to_str().unwrap());

    let result = f();

    match original_home {
        Some(home) => std::env::set_var("HOME", home),
        None => std::env::remove_var("HOME"),
    }
    match original_config_home {
        Some(dir) => std::env::set_var("XDG_CONFIG_HOME", dir),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }

    result
}
