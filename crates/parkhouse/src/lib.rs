//! parkhouse: spot allocation for multi-zone parking garages.

mod error;
mod health;
mod kind;
mod layout;
mod manager;
mod request;
mod spot;
mod version;

pub mod service;
pub mod transport;

pub use error::{ClaimError, ConfigError, UnknownKind};
pub use health::Health;
pub use kind::SpotKind;
pub use layout::{GarageLayout, ZoneLayout};
pub use manager::{ParkingManager, ParkingStatus, ReservationPolicy};
pub use request::ParkingRequest;
pub use service::{ParkOutcome, ParkingService};
pub use spot::{OccupiedSpot, Occupant, Spot, SpotId};
pub use version::{PARKHOUSE_VERSION, VersionInfo};
