use thiserror::Error;

use crate::spot::SpotId;

/// Layout descriptor problems. Raised before any spot is created.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("zone '{zone}': {actual} spot kinds given for {expected} spots per floor")]
    KindCountMismatch {
        zone: String,
        expected: usize,
        actual: usize,
    },

    #[error("zone '{zone}': reserved spot index {index} is out of range (spots per floor: {spots_per_floor})")]
    ReservedOutOfRange {
        zone: String,
        index: usize,
        spots_per_floor: usize,
    },

    #[error("failed to read layout file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid layout JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    #[error("vehicle {plate} is already parked at spot {spot}")]
    AlreadyParked { plate: String, spot: SpotId },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown spot kind '{0}', expected bike, car or truck")]
pub struct UnknownKind(pub String);
