/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/
pub type ElevatorId = u8;
pub type Floor = u8;

/// Travel state of a single car. `Idle` means the car has no committed
/// floors and is parked where it last stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Idle,
}

/// Direction of a hall call. The landing panels only offer up/down, so this
/// is deliberately narrower than [`Direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HallDirection {
    Up,
    Down,
}

impl fmt::Display for HallDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HallDirection::Up => write!(f, "up"),
            HallDirection::Down => write!(f, "down"),
        }
    }
}

/// Where a committed floor came from: a button inside the car, or a hall
/// call assigned to the car by the dispatch policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOrigin {
    Internal,
    External,
}

/// Published state of one elevator, read by the dispatch policy while the
/// owning controller keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElevatorSnapshot {
    pub id: ElevatorId,
    pub floor: Floor,
    pub direction: Direction,
    pub faulted: bool,
}

/// Commands accepted from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankCommand {
    CallHall(HallDirection, Floor),
    CallCar(ElevatorId, Floor),
    ToggleFault(ElevatorId),
}

/// Events emitted by the core for the presentation layer to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankEvent {
    FloorChanged(ElevatorId, Floor),
    DoorOpened(ElevatorId),
    DoorClosed(ElevatorId),
    DemandCleared(Floor),
    FaultStateChanged(ElevatorId, bool),
    HallCallRegistered(HallDirection, Floor),
    CarCallRegistered(ElevatorId, Floor),
}
