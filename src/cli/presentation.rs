//! CLI presentation: text and JSON renderings of viewer results.

mod view;

pub use view::{format_config, format_slug_list, format_view};
