//! Actions and async thunks
//!
//! Each thunk dispatches a `pending` action, awaits its collaborator, then
//! dispatches either `fulfilled` or `rejected`. Failures end up in state;
//! they are never returned to the caller of [`Store::dispatch_thunk`].

use crate::noosphere::{
    ConnectOptions, NoosphereClient, NoosphereHandle, SphereFile, SphereFsHandle,
};
use crate::store::Store;
use crate::types::{Slug, SphereReference, Version};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

/// State transitions understood by the reducer
#[derive(Debug, Clone)]
pub enum Action {
    ConnectPending {
        ipfs_api: Url,
    },
    ConnectFulfilled {
        noosphere: NoosphereHandle,
        key: String,
    },
    ConnectRejected {
        error: String,
    },
    OpenSpherePending {
        id: String,
        version: String,
    },
    OpenSphereFulfilled {
        fs: SphereFsHandle,
    },
    OpenSphereRejected {
        error: String,
    },
    OpenFilePending {
        slug: String,
    },
    OpenFileFulfilled {
        file: SphereFile,
    },
    OpenFileRejected {
        error: String,
    },
}

impl Action {
    /// Stable type string, `sphereViewer/<thunk>/<phase>`
    pub fn kind(&self) -> &'static str {
        match self {
            Action::ConnectPending { .. } => "sphereViewer/connectToNoosphere/pending",
            Action::ConnectFulfilled { .. } => "sphereViewer/connectToNoosphere/fulfilled",
            Action::ConnectRejected { .. } => "sphereViewer/connectToNoosphere/rejected",
            Action::OpenSpherePending { .. } => "sphereViewer/openSphere/pending",
            Action::OpenSphereFulfilled { .. } => "sphereViewer/openSphere/fulfilled",
            Action::OpenSphereRejected { .. } => "sphereViewer/openSphere/rejected",
            Action::OpenFilePending { .. } => "sphereViewer/openFile/pending",
            Action::OpenFileFulfilled { .. } => "sphereViewer/openFile/fulfilled",
            Action::OpenFileRejected { .. } => "sphereViewer/openFile/rejected",
        }
    }
}

/// Asynchronous unit of work dispatched through the store
#[async_trait]
pub trait Thunk: Send + Sync {
    async fn run(&self, store: &Store);
}

/// Arguments of [`connect_to_noosphere`]
#[derive(Debug, Clone)]
pub struct ConnectArgs {
    pub ipfs_api: Url,
    pub key: String,
}

/// Arguments of [`open_sphere`]
#[derive(Debug, Clone)]
pub struct OpenSphereArgs {
    pub id: String,
    pub version: String,
    pub noosphere: NoosphereHandle,
    pub key: String,
}

/// Arguments of [`open_file`]
#[derive(Debug, Clone)]
pub struct OpenFileArgs {
    pub fs: SphereFsHandle,
    pub slug: String,
}

pub struct ConnectToNoosphere {
    client: Arc<dyn NoosphereClient>,
    args: ConnectArgs,
}

pub struct OpenSphere {
    args: OpenSphereArgs,
}

pub struct OpenFile {
    args: OpenFileArgs,
}

/// Establish a session with the service at `args.ipfs_api`.
pub fn connect_to_noosphere(
    client: Arc<dyn NoosphereClient>,
    args: ConnectArgs,
) -> ConnectToNoosphere {
    ConnectToNoosphere { client, args }
}

/// Open sphere `args.id` at revision `args.version`.
pub fn open_sphere(args: OpenSphereArgs) -> OpenSphere {
    OpenSphere { args }
}

/// Open the file named `args.slug` in an opened sphere.
pub fn open_file(args: OpenFileArgs) -> OpenFile {
    OpenFile { args }
}

#[async_trait]
impl Thunk for ConnectToNoosphere {
    async fn run(&self, store: &Store) {
        let ConnectArgs { ipfs_api, key } = &self.args;
        store.dispatch(Action::ConnectPending {
            ipfs_api: ipfs_api.clone(),
        });

        let options = ConnectOptions {
            ipfs_api: ipfs_api.clone(),
            key: key.clone(),
        };
        match self.client.connect(options).await {
            Ok(noosphere) => {
                info!(ipfs_api = %ipfs_api, "Connected to noosphere");
                store.dispatch(Action::ConnectFulfilled {
                    noosphere: NoosphereHandle(noosphere),
                    key: key.clone(),
                });
            }
            Err(e) => {
                warn!(ipfs_api = %ipfs_api, error = %e, "Connection failed");
                store.dispatch(Action::ConnectRejected {
                    error: e.to_string(),
                });
            }
        }
    }
}

#[async_trait]
impl Thunk for OpenSphere {
    async fn run(&self, store: &Store) {
        let OpenSphereArgs {
            id,
            version,
            noosphere,
            key,
        } = &self.args;
        store.dispatch(Action::OpenSpherePending {
            id: id.clone(),
            version: version.clone(),
        });

        let result = async {
            let reference: SphereReference = id.parse()?;
            let version: Version = version.parse()?;
            noosphere
                .0
                .sphere_fs_at(&reference.did, &version, key)
                .await
        }
        .await;

        match result {
            Ok(fs) => store.dispatch(Action::OpenSphereFulfilled {
                fs: SphereFsHandle(fs),
            }),
            Err(e) => {
                warn!(sphere = %id, version = %version, error = %e, "Failed to open sphere");
                store.dispatch(Action::OpenSphereRejected {
                    error: e.to_string(),
                });
            }
        }
    }
}

#[async_trait]
impl Thunk for OpenFile {
    async fn run(&self, store: &Store) {
        let OpenFileArgs { fs, slug } = &self.args;
        store.dispatch(Action::OpenFilePending { slug: slug.clone() });

        let result = async {
            let slug: Slug = slug.parse()?;
            fs.0.read(&slug).await
        }
        .await;

        match result {
            Ok(Some(file)) => {
                info!(slug = %file.slug, bytes = file.body.len(), "Opened file");
                store.dispatch(Action::OpenFileFulfilled { file });
            }
            Ok(None) => {
                warn!(slug = %slug, "File not found in sphere");
                store.dispatch(Action::OpenFileRejected {
                    error: format!("File not found: {}", slug),
                });
            }
            Err(e) => {
                warn!(slug = %slug, error = %e, "Failed to open file");
                store.dispatch(Action::OpenFileRejected {
                    error: e.to_string(),
                });
            }
        }
    }
}
