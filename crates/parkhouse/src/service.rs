//! ParkingService: transport-agnostic, thread-safe front for the manager.
//!
//! One mutex guards the whole manager. Pool and claim table change
//! together under it, so callers on different threads never see a spot
//! in both places or in neither.
//!
//! Transports (console, HTTP) share the service as `Arc<ParkingService>`.

use std::sync::{Mutex, MutexGuard};

use tokio::sync::watch;

use crate::error::ClaimError;
use crate::kind::SpotKind;
use crate::manager::{ParkingManager, ParkingStatus, ReservationPolicy};
use crate::request::ParkingRequest;
use crate::spot::{OccupiedSpot, Spot};
use crate::version::VersionInfo;

/// Result of a park command that did not hit a duplicate plate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParkOutcome {
    Parked(Spot),
    /// No free spot of the requested kind.
    Unavailable,
}

pub struct ParkingService {
    manager: Mutex<ParkingManager>,
    version: VersionInfo,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl ParkingService {
    pub fn new(manager: ParkingManager) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            manager: Mutex::new(manager),
            version: VersionInfo::new(),
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Lock the manager. A panic while holding the lock cannot leave the
    /// manager half-updated (every mutation is a single step), so a
    /// poisoned lock is recovered rather than propagated.
    fn lock(&self) -> MutexGuard<'_, ParkingManager> {
        match self.manager.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::error!("Parking manager mutex poisoned - recovering");
                poisoned.into_inner()
            }
        }
    }

    pub fn park(&self, request: ParkingRequest) -> Result<ParkOutcome, ClaimError> {
        let mut manager = self.lock();
        let outcome = match manager.claim(request)? {
            Some(spot) => ParkOutcome::Parked(spot.clone()),
            None => ParkOutcome::Unavailable,
        };
        Ok(outcome)
    }

    /// Release the spot held by `plate`. `None` if the plate is not parked.
    pub fn remove(&self, plate: &str) -> Option<Spot> {
        self.lock().release(plate).cloned()
    }

    pub fn status(&self) -> ParkingStatus {
        self.lock().status()
    }

    pub fn reserved(&self, kind: SpotKind) -> Vec<Spot> {
        self.lock()
            .available_reserved(kind)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn priority_occupied(&self) -> Vec<OccupiedSpot> {
        self.lock().priority_occupied()
    }

    pub fn locate(&self, plate: &str) -> Option<Spot> {
        self.lock().spot_for(plate).cloned()
    }

    pub fn policy(&self) -> ReservationPolicy {
        self.lock().policy()
    }

    pub fn version(&self) -> &VersionInfo {
        &self.version
    }

    /// Ask every transport to stop.
    pub fn trigger_shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    pub fn shutdown_rx(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }
}
