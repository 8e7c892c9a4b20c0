//! Viewer location parsing
//!
//! A viewer location is the URL a sphere view is opened from. Its query string
//! selects what to show and its origin names the service to connect to.

use crate::error::ViewerError;
use std::collections::BTreeMap;
use url::Url;

/// Query parameter naming the sphere to open
pub const QUERY_SPHERE_ID: &str = "id";
/// Query parameter naming the sphere revision to open
pub const QUERY_VERSION: &str = "version";
/// Query parameter naming the file to open within the sphere
pub const QUERY_SLUG: &str = "slug";

/// Flat key/value view of a location's query string.
///
/// Repeated keys keep the last value seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    params: BTreeMap<String, String>,
}

impl QueryState {
    pub fn from_url(location: &Url) -> Self {
        Self {
            params: location.query_pairs().into_owned().collect(),
        }
    }

    /// Parse a raw query string, with or without its leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            params: url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// Value for `key`, treating empty values as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn sphere_id(&self) -> Option<&str> {
        self.get(QUERY_SPHERE_ID)
    }

    pub fn version(&self) -> Option<&str> {
        self.get(QUERY_VERSION)
    }

    pub fn slug(&self) -> Option<&str> {
        self.get(QUERY_SLUG)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Origin (scheme, host and port) of a viewer location.
pub fn origin(location: &Url) -> Result<Url, ViewerError> {
    let origin = location.origin();
    if !origin.is_tuple() {
        return Err(ViewerError::InvalidLocation(format!(
            "{} has an opaque origin",
            location
        )));
    }
    Ok(Url::parse(&origin.ascii_serialization())?)
}
