//! Spots and the records describing who occupies them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::kind::SpotKind;

/// Spot number, unique across the whole garage. Numbering starts at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpotId(pub u32);

impl fmt::Display for SpotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who holds a spot. Not an owning link to the request: only the claim key
/// and the priority flag survive the claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occupant {
    pub plate: String,
    pub priority: bool,
    pub parked_at: DateTime<Utc>,
}

/// One allocatable spot.
///
/// `kind` and `reserved` are fixed at layout time. Occupancy is derived from
/// `occupant` so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Spot {
    pub id: SpotId,
    pub zone: String,
    pub floor: u32,
    pub kind: SpotKind,
    pub reserved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupant: Option<Occupant>,
}

impl Spot {
    pub(crate) fn new(id: SpotId, zone: &str, floor: u32, kind: SpotKind, reserved: bool) -> Self {
        Self {
            id,
            zone: zone.to_string(),
            floor,
            kind,
            reserved,
            occupant: None,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// `Area North, Floor 1, Spot 3` - the wording the console driver prints.
    pub fn location(&self) -> String {
        format!("Area {}, Floor {}, Spot {}", self.zone, self.floor, self.id)
    }
}

/// Row of an occupancy listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupiedSpot {
    pub zone: String,
    pub floor: u32,
    pub spot: SpotId,
    pub plate: String,
    pub priority: bool,
    pub parked_at: DateTime<Utc>,
}

impl OccupiedSpot {
    pub(crate) fn from_spot(spot: &Spot) -> Option<Self> {
        let occupant = spot.occupant.as_ref()?;
        Some(Self {
            zone: spot.zone.clone(),
            floor: spot.floor,
            spot: spot.id,
            plate: occupant.plate.clone(),
            priority: occupant.priority,
            parked_at: occupant.parked_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_spot_serializes_without_occupant() {
        let spot = Spot::new(SpotId(7), "South", 1, SpotKind::Truck, false);
        insta::assert_json_snapshot!(spot, @r#"
        {
          "id": 7,
          "zone": "South",
          "floor": 1,
          "kind": "truck",
          "reserved": false
        }
        "#);
    }

    #[test]
    fn location_matches_console_wording() {
        let spot = Spot::new(SpotId(11), "South", 1, SpotKind::Car, true);
        assert_eq!(spot.location(), "Area South, Floor 1, Spot 11");
    }

    #[test]
    fn occupied_row_requires_occupant() {
        let mut spot = Spot::new(SpotId(1), "North", 2, SpotKind::Car, false);
        assert!(OccupiedSpot::from_spot(&spot).is_none());

        spot.occupant = Some(Occupant {
            plate: "KA-77".to_string(),
            priority: true,
            parked_at: Utc::now(),
        });
        let row = OccupiedSpot::from_spot(&spot).unwrap();
        assert_eq!(row.spot, SpotId(1));
        assert_eq!(row.plate, "KA-77");
        assert_eq!(row.floor, 2);
        assert!(row.priority);
    }
}
