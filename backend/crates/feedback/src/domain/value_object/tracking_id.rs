//! Tracking ID Value Object
//!
//! The only handle an anonymous submitter gets. 128 bits from the OS CSPRNG,
//! rendered in the 8-4-4-4-12 hex layout. Unrelated to the internal row id.

use platform::crypto::random_array;
use serde::{Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Hyphenated length: 32 hex digits and 4 hyphens
const TRACKING_ID_LEN: usize = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackingId(Uuid);

impl TrackingId {
    pub fn generate() -> Self {
        Self(Uuid::from_bytes(random_array::<16>()))
    }

    /// Parse the canonical hyphenated form. Anything else is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() != TRACKING_ID_LEN {
            return None;
        }
        Uuid::try_parse(s).ok().map(Self)
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl Serialize for TrackingId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
