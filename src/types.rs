//! Identifier types shared across the viewer.
//!
//! Every identifier that arrives from a viewer location is validated here
//! before anything is sent to the gateway.

use crate::error::ViewerError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::ops::Deref;
use std::str::FromStr;
use url::Url;

/// A DID (Decentralized Identifier) naming a sphere or an author.
#[repr(transparent)]
#[derive(Default, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Did(pub String);

impl Deref for Did {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&str> for Did {
    fn from(value: &str) -> Self {
        Did(value.to_owned())
    }
}

impl From<String> for Did {
    fn from(value: String) -> Self {
        Did(value)
    }
}

impl From<Did> for String {
    fn from(value: Did) -> Self {
        value.0
    }
}

impl Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Reference to a sphere, written either as a bare DID or as `sphere:<did>`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SphereReference {
    pub did: Did,
}

impl Display for SphereReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sphere:{}", self.did)
    }
}

impl TryFrom<Url> for SphereReference {
    type Error = ViewerError;

    fn try_from(value: Url) -> Result<Self, Self::Error> {
        match value.scheme() {
            "sphere" if !value.path().is_empty() => Ok(SphereReference {
                did: Did::from(value.path()),
            }),
            _ => Err(ViewerError::InvalidSphereReference(format!(
                "Could not interpret URI as a sphere reference: {}",
                value
            ))),
        }
    }
}

impl FromStr for SphereReference {
    type Err = ViewerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ViewerError::InvalidSphereReference(
                "sphere id is empty".to_string(),
            ));
        }

        if value.starts_with("did:") {
            return Ok(SphereReference {
                did: Did::from(value),
            });
        }

        let url = Url::parse(value)
            .map_err(|e| ViewerError::InvalidSphereReference(format!("{}: {}", value, e)))?;
        SphereReference::try_from(url)
    }
}

const BASE32_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz234567";
const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
const CID_V0_LEN: usize = 46;
// Shortest CIDv1 we accept: multibase prefix plus a version, codec and a
// minimal multihash.
const CID_V1_MIN_LEN: usize = 8;

/// A sphere revision, expressed as a CID string.
#[repr(transparent)]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version(String);

impl Version {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Version {
    type Err = ViewerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        let is_v0 = value.len() == CID_V0_LEN
            && value.starts_with("Qm")
            && value.chars().all(|c| BASE58_ALPHABET.contains(c));
        let is_v1 = value.len() >= CID_V1_MIN_LEN
            && value.starts_with('b')
            && value[1..].chars().all(|c| BASE32_ALPHABET.contains(c));

        if is_v0 || is_v1 {
            Ok(Version(value.to_string()))
        } else {
            Err(ViewerError::InvalidVersion(format!(
                "'{}' is not a base32 CIDv1 or base58 CIDv0 string",
                value
            )))
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Human-readable name of a file within a sphere.
#[repr(transparent)]
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slug(String);

impl Slug {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Slug {
    type Err = ViewerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.is_empty() {
            return Err(ViewerError::InvalidSlug("slug is empty".to_string()));
        }
        if value.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(ViewerError::InvalidSlug(format!(
                "'{}' contains whitespace or '/'",
                value
            )));
        }
        Ok(Slug(value.to_string()))
    }
}

impl Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}
