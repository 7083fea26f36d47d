//! Tagged reference to a node in the facility hierarchy.

use std::fmt;

use serde::{Deserialize, Serialize};

use deskhub_core::types::FacilityId;

/// A reference to the entity an authorization check targets.
///
/// The hierarchy is building → floor → coworking space → desk. One enum
/// covers all four levels so the responsibility walk is written once
/// instead of per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum FacilityRef {
    /// A building, the root of the hierarchy.
    Building(FacilityId),
    /// A floor within a building.
    Floor(FacilityId),
    /// A coworking or meeting space on a floor.
    Space(FacilityId),
    /// A desk within a coworking space.
    Desk(FacilityId),
}

impl FacilityRef {
    /// The id of the referenced entity.
    pub fn id(&self) -> FacilityId {
        match self {
            Self::Building(id) | Self::Floor(id) | Self::Space(id) | Self::Desk(id) => *id,
        }
    }

    /// The kind of the referenced entity as a lowercase noun.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Building(_) => "building",
            Self::Floor(_) => "floor",
            Self::Space(_) => "space",
            Self::Desk(_) => "desk",
        }
    }
}

impl fmt::Display for FacilityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.id())
    }
}
