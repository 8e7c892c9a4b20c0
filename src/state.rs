//! Viewer state held by the [`Store`](crate::store::Store).

use crate::noosphere::{NoosphereHandle, SphereFile, SphereFsHandle};
use crate::types::{Did, Version};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Root state snapshot
#[derive(Debug, Clone, Default)]
pub struct ViewerState {
    pub sphere_viewer: SphereViewerState,
}

/// In-flight work, one flag per thunk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadingFlags {
    pub connecting: bool,
    pub opening_sphere: bool,
    pub opening_file: bool,
}

impl LoadingFlags {
    pub fn any(&self) -> bool {
        self.connecting || self.opening_sphere || self.opening_file
    }
}

/// Session, sphere and file the viewer is showing
#[derive(Debug, Clone, Default)]
pub struct SphereViewerState {
    /// Session handle, set once the connection succeeds
    pub noosphere: Option<NoosphereHandle>,
    /// Credential the session was established with
    pub key: Option<String>,
    pub connected_at: Option<DateTime<Utc>>,

    pub sphere_id: Option<Did>,
    pub sphere_version: Option<Version>,
    /// Filesystem of the opened sphere revision
    pub fs: Option<SphereFsHandle>,

    pub file: Option<SphereFile>,

    pub loading: LoadingFlags,
    pub last_error: Option<String>,
}

impl SphereViewerState {
    pub fn is_connected(&self) -> bool {
        self.noosphere.is_some() && self.key.is_some()
    }
}

/// Serializable summary of a [`SphereViewerState`], used for output
#[derive(Debug, Clone, Serialize)]
pub struct ViewSummary {
    pub ipfs_api: Option<String>,
    pub connected: bool,
    pub connected_at: Option<DateTime<Utc>>,
    pub sphere_id: Option<String>,
    pub sphere_version: Option<String>,
    pub file: Option<FileSummary>,
    pub loading: LoadingFlags,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub slug: String,
    pub memo: String,
    pub content_type: Option<String>,
    pub content: String,
}

impl From<&SphereViewerState> for ViewSummary {
    fn from(state: &SphereViewerState) -> Self {
        Self {
            ipfs_api: state
                .noosphere
                .as_ref()
                .map(|handle| handle.0.ipfs_api().to_string()),
            connected: state.is_connected(),
            connected_at: state.connected_at,
            sphere_id: state.sphere_id.as_ref().map(|did| did.to_string()),
            sphere_version: state.sphere_version.as_ref().map(|v| v.to_string()),
            file: state.file.as_ref().map(|file| FileSummary {
                slug: file.slug.to_string(),
                memo: file.memo.clone(),
                content_type: file.content_type.clone(),
                content: file.text(),
            }),
            loading: state.loading,
            error: state.last_error.clone(),
        }
    }
}
