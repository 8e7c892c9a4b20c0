//! Noosphere collaborator contract
//!
//! The viewer never talks to the network directly. It connects through a
//! [`NoosphereClient`], receives a [`Noosphere`] session handle, and reads
//! sphere content through a [`SphereFs`] scoped to one sphere revision.

use crate::error::ViewerError;
use crate::types::{Did, Slug, Version};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Placeholder credential used when the viewer has no key of its own.
///
/// Earlier viewers sent the misspelled `anonyous`. Set `gateway.key` to
/// present that literal instead.
pub const ANONYMOUS_KEY: &str = "anonymous";

/// Options for establishing a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Base URL of the IPFS API serving sphere blocks
    pub ipfs_api: Url,
    /// Credential presented to the service
    pub key: String,
}

/// Establishes sessions with a Noosphere service
#[async_trait]
pub trait NoosphereClient: Send + Sync {
    async fn connect(&self, options: ConnectOptions) -> Result<Arc<dyn Noosphere>, ViewerError>;
}

/// A live session with a Noosphere service
#[async_trait]
pub trait Noosphere: Send + Sync {
    /// Endpoint this session reads from
    fn ipfs_api(&self) -> &Url;

    /// Open a filesystem view of sphere `id` at revision `version`.
    async fn sphere_fs_at(
        &self,
        id: &Did,
        version: &Version,
        key: &str,
    ) -> Result<Arc<dyn SphereFs>, ViewerError>;
}

/// Read access to the content of one sphere revision
#[async_trait]
pub trait SphereFs: Send + Sync {
    fn identity(&self) -> &Did;

    fn version(&self) -> &Version;

    /// Read a file by slug. `Ok(None)` when the sphere has no such slug.
    async fn read(&self, slug: &Slug) -> Result<Option<SphereFile>, ViewerError>;

    /// All slugs in this revision, sorted.
    async fn list(&self) -> Result<Vec<Slug>, ViewerError>;
}

/// A file read out of a sphere
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SphereFile {
    pub slug: Slug,
    /// CID of the file's memo
    pub memo: String,
    pub content_type: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl SphereFile {
    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Shared session handle stored in viewer state
#[derive(Clone)]
pub struct NoosphereHandle(pub Arc<dyn Noosphere>);

impl fmt::Debug for NoosphereHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoosphereHandle")
            .field("ipfs_api", &self.0.ipfs_api().as_str())
            .finish()
    }
}

/// Shared filesystem handle stored in viewer state
#[derive(Clone)]
pub struct SphereFsHandle(pub Arc<dyn SphereFs>);

impl fmt::Debug for SphereFsHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SphereFsHandle")
            .field("identity", &self.0.identity().as_str())
            .field("version", &self.0.version().as_str())
            .finish()
    }
}
