//! Viewer bootstrap
//!
//! Turns a viewer location into store state in three awaited steps:
//! connect, then open the sphere named by `id` and `version`, then open the
//! file named by `slug`. Each step reads a fresh snapshot after the previous
//! one finished, and a step only runs when the handles it needs are present.

use crate::actions::{
    connect_to_noosphere, open_file, open_sphere, ConnectArgs, OpenFileArgs, OpenSphereArgs,
};
use crate::error::ViewerError;
use crate::noosphere::{NoosphereClient, ANONYMOUS_KEY};
use crate::query::{self, QueryState};
use crate::state::ViewerState;
use crate::store::Store;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// Overrides applied on top of what the location implies
#[derive(Debug, Clone)]
pub struct BootstrapOptions {
    /// Service endpoint; the location's origin when unset
    pub ipfs_api: Option<Url>,
    /// Credential presented when connecting
    pub key: String,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            ipfs_api: None,
            key: ANONYMOUS_KEY.to_string(),
        }
    }
}

/// Load `location` into `store` and return the final state.
///
/// Only an unusable location is an error. Failures of the individual steps
/// are recorded in the returned state.
pub async fn bootstrap(
    store: &Store,
    client: Arc<dyn NoosphereClient>,
    location: &Url,
    options: &BootstrapOptions,
) -> Result<ViewerState, ViewerError> {
    let query_state = QueryState::from_url(location);
    if query_state.is_empty() {
        debug!(location = %location, "Location has no query; connecting only");
    }
    let ipfs_api = match &options.ipfs_api {
        Some(ipfs_api) => ipfs_api.clone(),
        None => query::origin(location)?,
    };
    info!(location = %location, ipfs_api = %ipfs_api, "Bootstrapping sphere viewer");

    store
        .dispatch_thunk(connect_to_noosphere(
            client,
            ConnectArgs {
                ipfs_api,
                key: options.key.clone(),
            },
        ))
        .await;

    let state = store.get_state();
    let viewer = &state.sphere_viewer;

    // An empty key counts as no key at all
    let key = viewer.key.as_deref().filter(|key| !key.is_empty());
    if let (Some(id), Some(version), Some(noosphere), Some(key)) = (
        query_state.sphere_id(),
        query_state.version(),
        &viewer.noosphere,
        key,
    ) {
        store
            .dispatch_thunk(open_sphere(OpenSphereArgs {
                id: id.to_string(),
                version: version.to_string(),
                noosphere: noosphere.clone(),
                key: key.to_string(),
            }))
            .await;
    } else {
        debug!("Skipping sphere open");
    }

    let state = store.get_state();

    if let (Some(slug), Some(fs)) = (query_state.slug(), &state.sphere_viewer.fs) {
        store
            .dispatch_thunk(open_file(OpenFileArgs {
                fs: fs.clone(),
                slug: slug.to_string(),
            }))
            .await;
    } else {
        debug!("Skipping file open");
    }

    Ok(store.get_state())
}
