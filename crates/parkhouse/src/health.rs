//! Health status reported by transports.

use serde::{Deserialize, Serialize};

use crate::manager::ParkingStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Health {
    /// At least one spot of some kind is free
    Ready,
    /// Every spot is taken
    Full,
}

impl Health {
    pub fn from_status(status: &ParkingStatus) -> Self {
        if status.occupied < status.total {
            Health::Ready
        } else {
            Health::Full
        }
    }
}
