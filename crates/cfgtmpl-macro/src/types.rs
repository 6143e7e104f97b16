//! Identifier types shared by the engine

use serde::{Deserialize, Serialize};

/// Identifier of a configuration object (service or service template)
///
/// Services and service templates share one id space, so a macro owner is
/// always an `ObjectId` regardless of which kind of object owns the row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ObjectId(pub i64);

impl ObjectId {
    /// Raw numeric value
    #[inline]
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for ObjectId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
