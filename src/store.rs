//! Client-side state store
//!
//! Holds the current [`ViewerState`], applies actions through the reducer and
//! notifies listeners after every dispatch. Readers always get a snapshot.

use crate::actions::{Action, Thunk};
use crate::reducer::reduce;
use crate::state::ViewerState;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::debug;

/// Callback invoked after each dispatched action with the resulting state
pub type Listener = Arc<dyn Fn(&Action, &ViewerState) + Send + Sync>;

/// Viewer state store
#[derive(Default)]
pub struct Store {
    state: RwLock<ViewerState>,
    listeners: Mutex<Vec<Listener>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current state
    pub fn get_state(&self) -> ViewerState {
        self.state.read().clone()
    }

    /// Apply `action` and notify listeners.
    pub fn dispatch(&self, action: Action) {
        debug!(action = action.kind(), "Dispatching action");
        let snapshot = {
            let mut state = self.state.write();
            reduce(&mut state.sphere_viewer, &action);
            state.clone()
        };

        // Listeners run outside the state lock so they may read the store
        let listeners = self.listeners.lock().clone();
        for listener in listeners {
            listener(&action, &snapshot);
        }
    }

    /// Run `thunk` to completion.
    pub async fn dispatch_thunk<T: Thunk>(&self, thunk: T) {
        thunk.run(self).await;
    }

    pub fn subscribe(&self, listener: Listener) {
        self.listeners.lock().push(listener);
    }
}
