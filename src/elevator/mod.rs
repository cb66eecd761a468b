pub mod controller;

pub use controller::ControllerCommand;
pub use controller::ElevatorController;
