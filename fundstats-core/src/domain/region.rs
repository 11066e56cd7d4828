//! Closed six-region lookup used to place Geo chart labels.
//!
//! Geo rows name their region by free text. Anything that does not parse into a
//! [`Region`] cannot be placed on the map and is reported as an
//! [`UnmappedRegionFault`].

use serde::Serialize;
use std::fmt;

/// Map position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// The regions the geo chart knows how to place.
///
/// Declaration order is the rendering order of map labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Region {
    NorthAmerica,
    Europe,
    Asia,
    SouthAmerica,
    /// Source data calls this "World"; it is displayed as "Global".
    Global,
    Africa,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::NorthAmerica,
        Region::Europe,
        Region::Asia,
        Region::SouthAmerica,
        Region::Global,
        Region::Africa,
    ];

    /// Parse a Geo `Label`. Matching ignores case and surrounding whitespace;
    /// both "World" and "Global" map to [`Region::Global`].
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "north america" => Some(Region::NorthAmerica),
            "europe" => Some(Region::Europe),
            "asia" => Some(Region::Asia),
            "south america" => Some(Region::SouthAmerica),
            "world" | "global" => Some(Region::Global),
            "africa" => Some(Region::Africa),
            _ => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Region::NorthAmerica => "North America",
            Region::Europe => "Europe",
            Region::Asia => "Asia",
            Region::SouthAmerica => "South America",
            Region::Global => "Global",
            Region::Africa => "Africa",
        }
    }

    pub fn coordinates(self) -> GeoPoint {
        let (lat, lon) = match self {
            Region::NorthAmerica => (40.0, -100.0),
            Region::Europe => (54.0, 15.0),
            Region::Asia => (30.0, 95.0),
            Region::SouthAmerica => (-15.0, -60.0),
            Region::Global => (25.0, -45.0),
            Region::Africa => (5.0, 25.0),
        };
        GeoPoint { lat, lon }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// True when an `Investment Area` value names a continent or the world rather
/// than a single country.
pub fn is_area_sentinel(area: &str) -> bool {
    matches!(
        area.trim().to_ascii_lowercase().as_str(),
        "world" | "global" | "asia" | "europe" | "north america" | "south america" | "africa"
    )
}

/// A Geo row whose region label has no entry in the lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UnmappedRegionFault {
    pub country: String,
    pub label: String,
}

impl fmt::Display for UnmappedRegionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "region label '{}' for {} has no map position",
            self.label, self.country
        )
    }
}
