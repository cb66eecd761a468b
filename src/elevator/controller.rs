/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::BankConfig;
use crate::demand::DemandRegistry;
use crate::dispatch::policy;
use crate::shared::{
    BankEvent, CommitOrigin, Direction, ElevatorId, ElevatorSnapshot, Floor, HallDirection,
    StatusBoard,
};

/// Commands routed to one controller's thread by the dispatch center.
///
/// `Terminate` exists for shutdown and tests; a fault is a logical pause
/// and never tears a controller down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerCommand {
    CallCar(Floor),
    ToggleFault,
    Terminate,
}

/**
 * State machine for one car of the bank.
 *
 * Each controller runs on its own thread: a fixed-period ticker drives the
 * movement/door cycle while a command channel carries car calls and fault
 * toggles from the dispatch center. All car-local state (`floor`,
 * `direction`, `faulted`, door flags) is owned by this single writer; the
 * rest of the system observes it through snapshots published to the
 * [`StatusBoard`]. Committed floors live in the shared [`DemandRegistry`].
 */
pub struct ElevatorController {
    // Car-local state
    id: ElevatorId,
    floor: Floor,
    direction: Direction,
    faulted: bool,
    door_pending_up: bool,
    door_pending_down: bool,

    // Fixed parameters
    n_floors: u8,
    tick_period: Duration,
    door_open_time: Duration,

    // Shared state and channels
    registry: Arc<Mutex<DemandRegistry>>,
    statuses: StatusBoard,
    event_tx: cbc::Sender<BankEvent>,
    cmd_rx: cbc::Receiver<ControllerCommand>,
}

impl ElevatorController {
    pub fn new(
        id: ElevatorId,
        config: &BankConfig,
        registry: Arc<Mutex<DemandRegistry>>,
        statuses: StatusBoard,
        event_tx: cbc::Sender<BankEvent>,
        cmd_rx: cbc::Receiver<ControllerCommand>,
    ) -> ElevatorController {
        ElevatorController {
            id,
            floor: 1,
            direction: Direction::Idle,
            faulted: false,
            door_pending_up: false,
            door_pending_down: false,
            n_floors: config.n_floors,
            tick_period: Duration::from_millis(config.tick_period_ms),
            door_open_time: Duration::from_millis(config.door_open_ms),
            registry,
            statuses,
            event_tx,
            cmd_rx,
        }
    }

    pub fn run(mut self) {
        let ticker = cbc::tick(self.tick_period);

        loop {
            cbc::select! {
                recv(self.cmd_rx) -> command => {
                    match command {
                        Ok(ControllerCommand::CallCar(floor)) => self.handle_car_call(floor),
                        Ok(ControllerCommand::ToggleFault) => self.handle_toggle_fault(),
                        Ok(ControllerCommand::Terminate) => return,
                        Err(e) => {
                            error!("elevator {}: command channel closed: {}", self.id, e);
                            return;
                        }
                    }
                }
                recv(ticker) -> _ => self.tick(),
            }
        }
    }

    /// Car call from inside this elevator. Ignored while faulted; otherwise
    /// the floor joins the commit set with `Internal` origin and the travel
    /// direction is recomputed right away.
    pub(crate) fn handle_car_call(&mut self, floor: Floor) {
        if self.faulted {
            debug!(
                "elevator {}: ignoring car call for floor {} while faulted",
                self.id, floor
            );
            return;
        }

        {
            let mut registry = self.registry.lock();
            registry.add_commit(self.id, floor, CommitOrigin::Internal);
            self.direction = next_direction(registry.commits_of(self.id), self.floor, self.direction);
        }

        // Publish before the event so anyone reacting to it sees fresh state
        self.publish();
        let _ = self.event_tx.send(BankEvent::CarCallRegistered(self.id, floor));
    }

    /// Flips the fault flag. Turning the fault on freezes the car in place
    /// with its commits attached but dormant. Turning it off redistributes
    /// the externally assigned commits and drops the internal ones.
    pub(crate) fn handle_toggle_fault(&mut self) {
        self.faulted = !self.faulted;

        if self.faulted {
            info!("elevator {}: out of service at floor {}", self.id, self.floor);
        } else {
            info!("elevator {}: back in service, handing off assigned work", self.id);
            self.recover();
        }

        self.publish();
        let _ = self
            .event_tx
            .send(BankEvent::FaultStateChanged(self.id, self.faulted));
    }

    /// Recovery after a fault clears: every `External` commit is offered to
    /// the nearest other in-service car; `Internal` commits are dropped
    /// outright, since a passenger's own request has no meaning on another
    /// car. The commit set is then emptied and the car goes idle.
    fn recover(&mut self) {
        let snapshots = self.statuses.snapshot();
        let mut registry = self.registry.lock();

        let commits = registry.commits_of(self.id).clone();
        for (&floor, &origin) in &commits {
            if origin != CommitOrigin::External {
                continue;
            }
            match policy::select_eligible(&snapshots, Some(self.id), floor) {
                Some(target) => {
                    info!(
                        "elevator {}: floor {} handed over to elevator {}",
                        self.id, floor, target
                    );
                    registry.add_commit(target, floor, CommitOrigin::External);
                }
                None => {
                    warn!(
                        "elevator {}: no elevator available to take over floor {}",
                        self.id, floor
                    );
                }
            }
        }

        registry.clear_commits(self.id);
        drop(registry);

        self.direction = Direction::Idle;
    }

    /// One movement/decision cycle. Entirely a no-op while faulted.
    ///
    /// Door obligations booked on the previous tick are honoured first, then
    /// the car moves one floor in its current direction. The stop condition
    /// is evaluated against the demand present on arrival, after which all
    /// demand at the reached floor is cleared and the direction recomputed
    /// from the commits that remain.
    pub(crate) fn tick(&mut self) {
        if self.faulted {
            return;
        }

        if self.door_pending_up {
            self.hold_door_open();
            self.door_pending_up = false;
        }
        if self.door_pending_down {
            self.hold_door_open();
            self.door_pending_down = false;
        }

        match self.direction {
            Direction::Up => self.floor += 1,
            Direction::Down => self.floor -= 1,
            Direction::Idle => {}
        }
        debug_assert!(self.floor >= 1 && self.floor <= self.n_floors);

        let _ = self.event_tx.send(BankEvent::FloorChanged(self.id, self.floor));

        let mut registry = self.registry.lock();

        let should_stop = registry.commits_of(self.id).contains_key(&self.floor)
            || (self.direction == Direction::Up
                && registry.has_hall_call(HallDirection::Up, self.floor))
            || (self.direction == Direction::Down
                && registry.has_hall_call(HallDirection::Down, self.floor));

        if should_stop {
            // Door opens on the next tick, one tick after arrival.
            if self.direction == Direction::Down {
                self.door_pending_down = true;
            } else {
                self.door_pending_up = true;
            }
        }

        registry.clear_at_floor(self.id, self.floor);
        self.direction = next_direction(registry.commits_of(self.id), self.floor, self.direction);
        drop(registry);

        self.publish();
        let _ = self.event_tx.send(BankEvent::DemandCleared(self.floor));
    }

    /// Blocks only this controller's own thread for the door-open duration.
    fn hold_door_open(&self) {
        let _ = self.event_tx.send(BankEvent::DoorOpened(self.id));
        thread::sleep(self.door_open_time);
        let _ = self.event_tx.send(BankEvent::DoorClosed(self.id));
    }

    fn publish(&self) {
        self.statuses.publish(ElevatorSnapshot {
            id: self.id,
            floor: self.floor,
            direction: self.direction,
            faulted: self.faulted,
        });
    }
}

/// Direction update rule, applied to the commits remaining after clearing:
/// no commits means idle; a car that ran past all its commits turns around;
/// an idle car starts up if any commit lies above it, otherwise down;
/// in every other case the current direction still points at remaining
/// work and is kept.
pub(crate) fn next_direction(
    commits: &HashMap<Floor, CommitOrigin>,
    floor: Floor,
    prior: Direction,
) -> Direction {
    let (min, max) = match (commits.keys().min(), commits.keys().max()) {
        (Some(&min), Some(&max)) => (min, max),
        _ => return Direction::Idle,
    };

    match prior {
        Direction::Down if min > floor => Direction::Up,
        Direction::Up if max < floor => Direction::Down,
        Direction::Idle if max > floor => Direction::Up,
        Direction::Idle if min < floor => Direction::Down,
        _ => prior,
    }
}

/***************************************/
/*            Test helpers             */
/***************************************/
#[cfg(test)]
impl ElevatorController {
    pub fn test_floor(&self) -> Floor {
        self.floor
    }

    pub fn test_direction(&self) -> Direction {
        self.direction
    }

    pub fn test_faulted(&self) -> bool {
        self.faulted
    }

    pub fn test_door_pending(&self) -> (bool, bool) {
        (self.door_pending_up, self.door_pending_down)
    }

    pub fn test_set_floor(&mut self, floor: Floor) {
        self.floor = floor;
        self.publish();
    }

    pub fn test_set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.publish();
    }
}
