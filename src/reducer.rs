//! Pure state transitions for [`Action`].

use crate::actions::Action;
use crate::state::SphereViewerState;
use chrono::Utc;

/// Apply `action` to `state`.
pub fn reduce(state: &mut SphereViewerState, action: &Action) {
    match action {
        Action::ConnectPending { .. } => {
            state.loading.connecting = true;
            state.last_error = None;
        }
        Action::ConnectFulfilled { noosphere, key } => {
            state.loading.connecting = false;
            // Session is set once; a second connection keeps the first
            if state.noosphere.is_none() {
                state.noosphere = Some(noosphere.clone());
                state.key = Some(key.clone());
                state.connected_at = Some(Utc::now());
            }
        }
        Action::ConnectRejected { error } => {
            state.loading.connecting = false;
            state.last_error = Some(error.clone());
        }
        Action::OpenSpherePending { .. } => {
            state.loading.opening_sphere = true;
            state.last_error = None;
        }
        Action::OpenSphereFulfilled { fs } => {
            state.loading.opening_sphere = false;
            state.sphere_id = Some(fs.0.identity().clone());
            state.sphere_version = Some(fs.0.version().clone());
            state.fs = Some(fs.clone());
            // A file belongs to the sphere it was read from
            state.file = None;
        }
        Action::OpenSphereRejected { error } => {
            state.loading.opening_sphere = false;
            state.last_error = Some(error.clone());
        }
        Action::OpenFilePending { .. } => {
            state.loading.opening_file = true;
            state.last_error = None;
        }
        Action::OpenFileFulfilled { file } => {
            state.loading.opening_file = false;
            state.file = Some(file.clone());
        }
        Action::OpenFileRejected { error } => {
            state.loading.opening_file = false;
            state.last_error = Some(error.clone());
        }
    }
}
