//! Config loading facade: assembles sources in precedence order.

use super::merge::merge_policy;
use super::sources::{global_file, project_file};
use super::ViewerConfig;
use config::{ConfigError, File};
use std::path::Path;

/// Loads [`ViewerConfig`] from layered sources
#[derive(Debug, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a run started in `dir`.
    ///
    /// Precedence (lowest to highest): defaults, global file, project files
    /// in `dir`, `explicit` file, environment.
    pub fn load(dir: &Path, explicit: Option<&Path>) -> Result<ViewerConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let mut builder = project_file::add_to_builder(builder, dir)?;

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        builder
            .add_source(merge_policy::environment())
            .build()?
            .try_deserialize()
    }

    /// Load a single file on top of the defaults, ignoring every other source.
    pub fn load_from_file(path: &Path) -> Result<ViewerConfig, ConfigError> {
        merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true))
            .build()?
            .try_deserialize()
    }
}
