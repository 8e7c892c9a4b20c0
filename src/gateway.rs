//! IPFS API gateway
//!
//! [`NoosphereClient`] implementation that reads sphere content from the IPFS
//! HTTP API hosted at the service origin. Connecting asks the API for its
//! `version`, structured nodes are fetched with `dag/get` (dag-json
//! encoding), and file content with `block/get`.
//!
//! Layout of the nodes this module reads (links are `{"/": "<cid>"}`):
//!
//! - memo: `{"parent": link | null, "headers": [[name, value], ...], "body": link}`
//! - sphere body: `{"identity": "<did>", "links": link}`
//! - links node: `{"entries": {"<slug>": link-to-file-memo}}`

use crate::error::ViewerError;
use crate::noosphere::{ConnectOptions, Noosphere, NoosphereClient, SphereFile, SphereFs};
use crate::types::{Did, Slug, Version};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};
use url::Url;

/// Memo header carrying the content type of the memo body
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
/// Content type of a sphere revision memo
pub const SPHERE_CONTENT_TYPE: &str = "noosphere/sphere";

const DAG_GET_PATH: &str = "api/v0/dag/get";
const BLOCK_GET_PATH: &str = "api/v0/block/get";
const VERSION_PATH: &str = "api/v0/version";

/// Timeouts applied to every gateway request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayTimeouts {
    pub connect: Duration,
    pub request: Duration,
}

impl Default for GatewayTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            request: Duration::from_secs(30),
        }
    }
}

/// dag-json link
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
struct Link {
    #[serde(rename = "/")]
    cid: String,
}

#[derive(Debug, Deserialize)]
struct Memo {
    #[serde(default)]
    #[allow(dead_code)]
    parent: Option<Link>,
    #[serde(default)]
    headers: Vec<(String, String)>,
    body: Link,
}

impl Memo {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct SphereBody {
    identity: String,
    links: Link,
}

/// Response of `api/v0/version`
#[derive(Debug, Deserialize)]
struct ApiVersion {
    #[serde(rename = "Version", default)]
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LinksNode {
    #[serde(default)]
    entries: BTreeMap<String, Link>,
}

fn map_http_error(error: reqwest::Error) -> ViewerError {
    if error.is_timeout() {
        ViewerError::GatewayRequestFailed(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        ViewerError::GatewayRequestFailed(format!("Connection error: {}", error))
    } else {
        ViewerError::GatewayError(format!("HTTP error: {}", error))
    }
}

async fn map_status(target: &str, response: Response) -> Result<Response, ViewerError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(match status {
        StatusCode::NOT_FOUND => ViewerError::NotFound(target.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ViewerError::GatewayUnauthorized(format!("{}: {}", status, error_text))
        }
        // Kubo reports unknown blocks as a 500 with a JSON message
        StatusCode::INTERNAL_SERVER_ERROR if error_text.contains("not found") => {
            ViewerError::NotFound(target.to_string())
        }
        _ => ViewerError::GatewayRequestFailed(format!(
            "Request for {} failed with status {}: {}",
            target, status, error_text
        )),
    })
}

/// Shared HTTP plumbing for a session and every filesystem opened from it
struct GatewayTransport {
    client: Client,
    ipfs_api: Url,
    key: String,
}

impl GatewayTransport {
    fn endpoint(&self, path: &str) -> Result<Url, ViewerError> {
        Ok(self.ipfs_api.join(path)?)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.key)
    }

    /// Ask the API which version it runs. Fails when the API is unreachable
    /// or refuses the key.
    async fn api_version(&self) -> Result<Option<String>, ViewerError> {
        let url = self.endpoint(VERSION_PATH)?;
        let response = self
            .authorize(self.client.post(url))
            .send()
            .await
            .map_err(map_http_error)?;
        let response = map_status("gateway version", response).await?;

        let bytes = response.bytes().await.map_err(map_http_error)?;
        let version: ApiVersion = serde_json::from_slice(&bytes).map_err(|e| {
            ViewerError::GatewayError(format!("Unexpected version response: {}", e))
        })?;
        Ok(version.version)
    }

    async fn dag_get<T: DeserializeOwned>(&self, cid: &str) -> Result<T, ViewerError> {
        debug!(cid, "Fetching dag node");
        let url = self.endpoint(DAG_GET_PATH)?;
        let response = self
            .authorize(
                self.client
                    .post(url)
                    .query(&[("arg", cid), ("output-codec", "dag-json")]),
            )
            .send()
            .await
            .map_err(map_http_error)?;
        let response = map_status(&format!("block {}", cid), response).await?;

        let bytes = response.bytes().await.map_err(map_http_error)?;
        serde_json::from_slice(&bytes).map_err(|e| ViewerError::MalformedBlock {
            cid: cid.to_string(),
            reason: e.to_string(),
        })
    }

    async fn block_get(&self, cid: &str) -> Result<Vec<u8>, ViewerError> {
        debug!(cid, "Fetching raw block");
        let url = self.endpoint(BLOCK_GET_PATH)?;
        let response = self
            .authorize(self.client.post(url).query(&[("arg", cid)]))
            .send()
            .await
            .map_err(map_http_error)?;
        let response = map_status(&format!("block {}", cid), response).await?;
        Ok(response.bytes().await.map_err(map_http_error)?.to_vec())
    }
}

/// Connects to the IPFS API at a given origin
pub struct GatewayClient {
    timeouts: GatewayTimeouts,
}

impl GatewayClient {
    pub fn new(timeouts: GatewayTimeouts) -> Self {
        Self { timeouts }
    }

    fn build_http_client(&self) -> Result<Client, ViewerError> {
        Client::builder()
            .connect_timeout(self.timeouts.connect)
            .timeout(self.timeouts.request)
            .build()
            .map_err(|e| ViewerError::GatewayError(format!("Failed to create HTTP client: {}", e)))
    }
}

impl Default for GatewayClient {
    fn default() -> Self {
        Self::new(GatewayTimeouts::default())
    }
}

#[async_trait]
impl NoosphereClient for GatewayClient {
    async fn connect(&self, options: ConnectOptions) -> Result<Arc<dyn Noosphere>, ViewerError> {
        match options.ipfs_api.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ViewerError::InvalidLocation(format!(
                    "unsupported gateway scheme '{}'",
                    scheme
                )))
            }
        }

        // Relative joins must resolve below the API base, not beside it
        let mut ipfs_api = options.ipfs_api;
        if !ipfs_api.path().ends_with('/') {
            let path = format!("{}/", ipfs_api.path());
            ipfs_api.set_path(&path);
        }

        info!(ipfs_api = %ipfs_api, "Connecting to noosphere gateway");
        let transport = GatewayTransport {
            client: self.build_http_client()?,
            ipfs_api,
            key: options.key,
        };
        let version = transport.api_version().await?;
        debug!(
            ipfs_api = %transport.ipfs_api,
            version = version.as_deref().unwrap_or("unknown"),
            "Gateway reachable"
        );

        Ok(Arc::new(GatewaySession {
            transport: Arc::new(transport),
        }))
    }
}

struct GatewaySession {
    transport: Arc<GatewayTransport>,
}

#[async_trait]
impl Noosphere for GatewaySession {
    fn ipfs_api(&self) -> &Url {
        &self.transport.ipfs_api
    }

    async fn sphere_fs_at(
        &self,
        id: &Did,
        version: &Version,
        key: &str,
    ) -> Result<Arc<dyn SphereFs>, ViewerError> {
        let transport = if key == self.transport.key {
            self.transport.clone()
        } else {
            Arc::new(GatewayTransport {
                client: self.transport.client.clone(),
                ipfs_api: self.transport.ipfs_api.clone(),
                key: key.to_string(),
            })
        };

        let memo: Memo = transport.dag_get(version.as_str()).await?;
        match memo.header(HEADER_CONTENT_TYPE) {
            None | Some(SPHERE_CONTENT_TYPE) => {}
            Some(other) => {
                return Err(ViewerError::NotASphere(format!(
                    "{} has content type '{}'",
                    version, other
                )))
            }
        }

        let body: SphereBody = transport.dag_get(&memo.body.cid).await?;
        if body.identity != id.as_str() {
            warn!(expected = %id, actual = %body.identity, "Sphere identity mismatch");
            return Err(ViewerError::SphereMismatch {
                expected: id.to_string(),
                actual: body.identity,
            });
        }

        info!(sphere = %id, version = %version, "Opened sphere revision");
        Ok(Arc::new(GatewaySphereFs {
            transport,
            identity: id.clone(),
            version: version.clone(),
            links_cid: body.links.cid,
            links: OnceCell::new(),
        }))
    }
}

struct GatewaySphereFs {
    transport: Arc<GatewayTransport>,
    identity: Did,
    version: Version,
    links_cid: String,
    links: OnceCell<BTreeMap<String, Link>>,
}

impl GatewaySphereFs {
    async fn links(&self) -> Result<&BTreeMap<String, Link>, ViewerError> {
        self.links
            .get_or_try_init(|| async {
                let node: LinksNode = self.transport.dag_get(&self.links_cid).await?;
                Ok::<_, ViewerError>(node.entries)
            })
            .await
    }
}

#[async_trait]
impl SphereFs for GatewaySphereFs {
    fn identity(&self) -> &Did {
        &self.identity
    }

    fn version(&self) -> &Version {
        &self.version
    }

    async fn read(&self, slug: &Slug) -> Result<Option<SphereFile>, ViewerError> {
        let Some(link) = self.links().await?.get(slug.as_str()).cloned() else {
            debug!(slug = %slug, "Slug not present in sphere");
            return Ok(None);
        };

        let memo: Memo = self.transport.dag_get(&link.cid).await?;
        let body = self.transport.block_get(&memo.body.cid).await?;

        Ok(Some(SphereFile {
            slug: slug.clone(),
            memo: link.cid,
            content_type: memo.header(HEADER_CONTENT_TYPE).map(str::to_string),
            headers: memo.headers.into_iter().collect(),
            body,
        }))
    }

    async fn list(&self) -> Result<Vec<Slug>, ViewerError> {
        let slugs = self
            .links()
            .await?
            .keys()
            .filter_map(|entry| match entry.parse::<Slug>() {
                Ok(slug) => Some(slug),
                Err(e) => {
                    warn!(entry = %entry, error = %e, "Skipping links entry that is not a slug");
                    None
                }
            })
            .collect();
        Ok(slugs)
    }
}
