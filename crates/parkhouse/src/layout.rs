//! Declarative garage layout: zones, then floors, then spot positions.

use std::collections::BTreeSet;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::kind::SpotKind;

/// Layout of one zone. Every floor of the zone repeats the same positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneLayout {
    pub floors: u32,
    pub spots_per_floor: usize,
    /// Kind of each position on a floor; length must equal `spots_per_floor`.
    pub spot_kinds: Vec<SpotKind>,
    /// Positions (0-based) flagged for priority-first matching.
    #[serde(default)]
    pub reserved_spots: BTreeSet<usize>,
}

impl ZoneLayout {
    pub fn new(floors: u32, spot_kinds: Vec<SpotKind>) -> Self {
        Self {
            floors,
            spots_per_floor: spot_kinds.len(),
            spot_kinds,
            reserved_spots: BTreeSet::new(),
        }
    }

    pub fn with_reserved(mut self, positions: impl IntoIterator<Item = usize>) -> Self {
        self.reserved_spots.extend(positions);
        self
    }

    pub fn spot_count(&self) -> usize {
        self.floors as usize * self.spots_per_floor
    }

    fn validate(&self, zone: &str) -> Result<(), ConfigError> {
        if self.spot_kinds.len() != self.spots_per_floor {
            return Err(ConfigError::KindCountMismatch {
                zone: zone.to_string(),
                expected: self.spots_per_floor,
                actual: self.spot_kinds.len(),
            });
        }
        if let Some(&index) = self
            .reserved_spots
            .iter()
            .find(|&&i| i >= self.spots_per_floor)
        {
            return Err(ConfigError::ReservedOutOfRange {
                zone: zone.to_string(),
                index,
                spots_per_floor: self.spots_per_floor,
            });
        }
        Ok(())
    }
}

/// Zone name to zone layout, in the order spots get numbered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GarageLayout {
    zones: IndexMap<String, ZoneLayout>,
}

impl GarageLayout {
    pub fn new() -> Self {
        Self {
            zones: IndexMap::new(),
        }
    }

    /// Append a zone. Re-adding a name replaces it in place.
    pub fn with_zone(mut self, name: impl Into<String>, zone: ZoneLayout) -> Self {
        self.zones.insert(name.into(), zone);
        self
    }

    pub fn zones(&self) -> impl Iterator<Item = (&str, &ZoneLayout)> {
        self.zones.iter().map(|(name, zone)| (name.as_str(), zone))
    }

    pub fn spot_count(&self) -> usize {
        self.zones.values().map(ZoneLayout::spot_count).sum()
    }

    /// Check every zone. Returns the first inconsistency found, in zone order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, zone) in &self.zones {
            zone.validate(name)?;
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let layout: Self = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

impl Default for GarageLayout {
    /// The city garage: two zones, first and last North positions reserved.
    fn default() -> Self {
        use SpotKind::{Bike, Car, Truck};

        GarageLayout::new()
            .with_zone(
                "North",
                ZoneLayout::new(2, vec![Car, Car, Truck, Bike, Car]).with_reserved([0, 4]),
            )
            .with_zone(
                "South",
                ZoneLayout::new(1, vec![Car, Truck, Bike]).with_reserved([0]),
            )
    }
}
