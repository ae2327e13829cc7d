//! Faction identifiers and their derivation from unit ids.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Faction a unit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Faction {
    /// Units whose id starts with `arm`.
    Armada,
    /// Units whose id starts with `cor`.
    Cortex,
    /// Units whose id starts with `leg`.
    Legion,
    /// Anything without a recognised prefix.
    Unknown,
}

impl Faction {
    /// All factions, in declaration order.
    pub const ALL: [Self; 4] = [Self::Armada, Self::Cortex, Self::Legion, Self::Unknown];

    /// Derive the faction from a unit id prefix.
    ///
    /// The match is case-sensitive against the id as stored.
    ///
    /// # Example
    ///
    /// ```
    /// use catalog_core::factions::Faction;
    ///
    /// assert_eq!(Faction::from_unit_id("armcom"), Faction::Armada);
    /// assert_eq!(Faction::from_unit_id("raptor_land"), Faction::Unknown);
    /// ```
    #[must_use]
    pub fn from_unit_id(id: &str) -> Self {
        if id.starts_with("arm") {
            Self::Armada
        } else if id.starts_with("cor") {
            Self::Cortex
        } else if id.starts_with("leg") {
            Self::Legion
        } else {
            Self::Unknown
        }
    }

    /// Get the display name for this faction.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Armada => "Armada",
            Self::Cortex => "Cortex",
            Self::Legion => "Legion",
            Self::Unknown => "Unknown",
        }
    }

    /// Lowercase slug used for asset file names.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Armada => "armada",
            Self::Cortex => "cortex",
            Self::Legion => "legion",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(Faction::from_unit_id("armpw"), Faction::Armada);
        assert_eq!(Faction::from_unit_id("corak"), Faction::Cortex);
        assert_eq!(Faction::from_unit_id("legcom"), Faction::Legion);
        assert_eq!(Faction::from_unit_id("chicken"), Faction::Unknown);
        assert_eq!(Faction::from_unit_id(""), Faction::Unknown);
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        assert_eq!(Faction::from_unit_id("ARMpw"), Faction::Unknown);
    }

    #[test]
    fn test_display_matches_display_name() {
        for faction in Faction::ALL {
            assert_eq!(faction.to_string(), faction.display_name());
            assert_eq!(faction.slug(), faction.display_name().to_lowercase());
        }
    }
}
