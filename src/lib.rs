//! Sphere Viewer: open Noosphere spheres from a viewer location
//!
//! A viewer location is a URL whose origin names the Noosphere service and
//! whose query names a sphere (`id`, `version`) and a file (`slug`). The
//! [`bootstrap`](bootstrap::bootstrap) sequence connects, opens the sphere and
//! opens the file through a client-side [`Store`](store::Store).

pub mod actions;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod noosphere;
pub mod query;
pub mod reducer;
pub mod state;
pub mod store;
pub mod types;
