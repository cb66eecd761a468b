/***************************************/
/*        3rd party libraries          */
/***************************************/
use parking_lot::Mutex;
use std::sync::Arc;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::structs::{Direction, ElevatorSnapshot};

/// Shared table holding the most recently published snapshot of every
/// elevator, indexed by id. Controllers publish after each state change;
/// the dispatch policy copies the whole table so it never reads a torn
/// floor/fault pair while the owning controller keeps mutating its state.
#[derive(Clone)]
pub struct StatusBoard {
    inner: Arc<Mutex<Vec<ElevatorSnapshot>>>,
}

impl StatusBoard {
    /// All cars start at floor 1, idle and in service.
    pub fn new(n_elevators: u8) -> StatusBoard {
        let snapshots = (1..=n_elevators)
            .map(|id| ElevatorSnapshot {
                id,
                floor: 1,
                direction: Direction::Idle,
                faulted: false,
            })
            .collect();

        StatusBoard {
            inner: Arc::new(Mutex::new(snapshots)),
        }
    }

    pub fn publish(&self, snapshot: ElevatorSnapshot) {
        let mut table = self.inner.lock();
        table[(snapshot.id - 1) as usize] = snapshot;
    }

    /// Consistent copy of the table, in ascending id order.
    pub fn snapshot(&self) -> Vec<ElevatorSnapshot> {
        self.inner.lock().clone()
    }
}
