pub mod macros;
pub mod status;
pub mod structs;

pub use status::StatusBoard;

pub use structs::BankCommand;
pub use structs::BankEvent;
pub use structs::CommitOrigin;
pub use structs::Direction;
pub use structs::ElevatorId;
pub use structs::ElevatorSnapshot;
pub use structs::Floor;
pub use structs::HallDirection;
