//! Allocation manager - owns every spot and decides who parks where.
//!
//! Each spot is always in exactly one place:
//! - the FIFO pool of its kind (free), or
//! - the claim table, keyed by plate (occupied).
//!
//! `claim` and `release` move a spot between the two in one step.

use std::collections::{BTreeMap, VecDeque};

use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ClaimError, ConfigError};
use crate::kind::SpotKind;
use crate::layout::GarageLayout;
use crate::request::ParkingRequest;
use crate::spot::{OccupiedSpot, Occupant, Spot, SpotId};

/// How reserved spots are shared with ordinary vehicles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationPolicy {
    /// Reserved spots sit in the general pool. Priority vehicles look for
    /// them first, but an ordinary vehicle at the front of the line takes
    /// whatever spot is there, reserved or not.
    #[default]
    Shared,
    /// Ordinary vehicles never take reserved spots. Priority vehicles still
    /// fall back to ordinary spots when no reserved one is free.
    Isolated,
}

impl ReservationPolicy {
    /// Position in `pool` of the spot to hand out, if any.
    fn pick(self, pool: &VecDeque<SpotId>, spots: &[Spot], priority: bool) -> Option<usize> {
        let is_reserved = |id: &SpotId| spots[index_of(*id)].reserved;

        if priority && let Some(pos) = pool.iter().position(is_reserved) {
            return Some(pos);
        }

        match self {
            ReservationPolicy::Isolated if !priority => {
                pool.iter().position(|id| !is_reserved(id))
            }
            _ => (!pool.is_empty()).then_some(0),
        }
    }
}

/// Occupancy summary for status displays.
#[derive(Debug, Clone, Serialize)]
pub struct ParkingStatus {
    pub total: usize,
    pub occupied: usize,
    pub available: BTreeMap<SpotKind, usize>,
    pub vehicles: Vec<OccupiedSpot>,
}

#[derive(Debug)]
pub struct ParkingManager {
    /// All spots in creation order; `spots[i].id == SpotId(i + 1)`.
    spots: Vec<Spot>,
    open: BTreeMap<SpotKind, VecDeque<SpotId>>,
    claims: IndexMap<String, SpotId>,
    policy: ReservationPolicy,
}

impl ParkingManager {
    /// Build every spot the layout describes.
    ///
    /// The layout is validated as a whole first, so an inconsistent zone
    /// anywhere means no manager at all.
    pub fn new(layout: &GarageLayout) -> Result<Self, ConfigError> {
        layout.validate()?;

        let mut spots = Vec::with_capacity(layout.spot_count());
        let mut open: BTreeMap<SpotKind, VecDeque<SpotId>> = SpotKind::ALL
            .into_iter()
            .map(|kind| (kind, VecDeque::new()))
            .collect();

        let mut next_id = 1u32;
        for (zone_name, zone) in layout.zones() {
            for floor in 1..=zone.floors {
                for (position, &kind) in zone.spot_kinds.iter().enumerate() {
                    let id = SpotId(next_id);
                    let reserved = zone.reserved_spots.contains(&position);
                    spots.push(Spot::new(id, zone_name, floor, kind, reserved));
                    open.entry(kind).or_default().push_back(id);
                    next_id += 1;
                }
            }
        }

        tracing::info!(spots = spots.len(), "Parking layout initialized");

        Ok(Self {
            spots,
            open,
            claims: IndexMap::new(),
            policy: ReservationPolicy::default(),
        })
    }

    pub fn with_policy(mut self, policy: ReservationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ReservationPolicy {
        self.policy
    }

    /// Find a spot for `request`.
    ///
    /// Priority vehicles get the first reserved spot in their kind's pool.
    /// Everyone else, and priority vehicles when no reserved spot is free,
    /// get the front of the pool. Under [`ReservationPolicy::Shared`] that
    /// front may be a reserved spot; under [`ReservationPolicy::Isolated`]
    /// ordinary vehicles skip reserved spots.
    ///
    /// `Ok(None)` means no free spot of that kind; nothing changes.
    pub fn claim(&mut self, request: ParkingRequest) -> Result<Option<&Spot>, ClaimError> {
        if let Some(&spot) = self.claims.get(&request.plate) {
            tracing::warn!(plate = %request.plate, spot = %spot, "Vehicle already parked");
            return Err(ClaimError::AlreadyParked {
                plate: request.plate,
                spot,
            });
        }

        let Some(pool) = self.open.get_mut(&request.kind) else {
            return Ok(None);
        };

        let Some(position) = self.policy.pick(pool, &self.spots, request.priority) else {
            tracing::debug!(plate = %request.plate, kind = %request.kind, "No spot available");
            return Ok(None);
        };

        let Some(id) = pool.remove(position) else {
            return Ok(None);
        };

        let spot = &mut self.spots[index_of(id)];
        spot.occupant = Some(Occupant {
            plate: request.plate.clone(),
            priority: request.priority,
            parked_at: Utc::now(),
        });

        tracing::info!(
            plate = %request.plate,
            spot = %id,
            zone = %spot.zone,
            floor = spot.floor,
            reserved = spot.reserved,
            "Vehicle parked"
        );

        self.claims.insert(request.plate, id);
        Ok(Some(&self.spots[index_of(id)]))
    }

    /// Free the spot held by `plate`. The spot queues at the back of its pool.
    ///
    /// Returns the freed spot, or `None` if the plate holds no claim.
    pub fn release(&mut self, plate: &str) -> Option<&Spot> {
        let Some(id) = self.claims.shift_remove(plate) else {
            tracing::debug!(plate = %plate, "Release for unknown vehicle");
            return None;
        };

        let spot = &mut self.spots[index_of(id)];
        spot.occupant = None;
        self.open.entry(spot.kind).or_default().push_back(id);

        tracing::info!(plate = %plate, spot = %id, "Vehicle removed");
        Some(&self.spots[index_of(id)])
    }

    pub fn total_spots(&self) -> usize {
        self.spots.len()
    }

    pub fn occupied_count(&self) -> usize {
        self.claims.len()
    }

    pub fn available_count(&self, kind: SpotKind) -> usize {
        self.open.get(&kind).map_or(0, VecDeque::len)
    }

    /// Free spots per kind, every kind listed.
    pub fn availability(&self) -> BTreeMap<SpotKind, usize> {
        self.open
            .iter()
            .map(|(&kind, pool)| (kind, pool.len()))
            .collect()
    }

    /// Occupied spots in the order their vehicles arrived.
    pub fn occupied(&self) -> Vec<OccupiedSpot> {
        self.claimed_spots()
            .filter_map(OccupiedSpot::from_spot)
            .collect()
    }

    /// Free reserved spots of `kind`, in the order a priority claim would
    /// try them.
    pub fn available_reserved(&self, kind: SpotKind) -> Vec<&Spot> {
        self.open
            .get(&kind)
            .into_iter()
            .flatten()
            .map(|&id| &self.spots[index_of(id)])
            .filter(|spot| spot.reserved)
            .collect()
    }

    /// Occupied spots whose vehicle came in as a priority request.
    pub fn priority_occupied(&self) -> Vec<OccupiedSpot> {
        self.claimed_spots()
            .filter(|spot| spot.occupant.as_ref().is_some_and(|o| o.priority))
            .filter_map(OccupiedSpot::from_spot)
            .collect()
    }

    pub fn status(&self) -> ParkingStatus {
        ParkingStatus {
            total: self.total_spots(),
            occupied: self.occupied_count(),
            available: self.availability(),
            vehicles: self.occupied(),
        }
    }

    pub fn spot(&self, id: SpotId) -> Option<&Spot> {
        let index = (id.0 as usize).checked_sub(1)?;
        self.spots.get(index)
    }

    pub fn spot_for(&self, plate: &str) -> Option<&Spot> {
        self.claims.get(plate).map(|&id| &self.spots[index_of(id)])
    }

    pub fn spots(&self) -> &[Spot] {
        &self.spots
    }

    fn claimed_spots(&self) -> impl Iterator<Item = &Spot> {
        self.claims.values().map(|&id| &self.spots[index_of(id)])
    }
}

/// Ids are handed out densely from 1, so an id is its own index.
fn index_of(id: SpotId) -> usize {
    id.0 as usize - 1
}
