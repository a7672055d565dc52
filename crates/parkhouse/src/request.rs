use serde::Deserialize;

use crate::kind::SpotKind;

/// A vehicle asking for a spot. Consumed by
/// [`ParkingManager::claim`](crate::ParkingManager::claim); only the plate
/// outlives the call, as the claim key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParkingRequest {
    pub plate: String,
    pub kind: SpotKind,
    /// Priority vehicles (EV, VIP, ...) are matched to reserved spots first.
    #[serde(default)]
    pub priority: bool,
}

impl ParkingRequest {
    pub fn new(plate: impl Into<String>, kind: SpotKind) -> Self {
        Self {
            plate: plate.into(),
            kind,
            priority: false,
        }
    }

    pub fn priority(mut self) -> Self {
        self.priority = true;
        self
    }
}
