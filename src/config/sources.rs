//! Configuration file sources, in precedence order.

pub mod global_file;
pub mod project_file;
