pub mod center;
pub mod policy;

pub use center::DispatchCenter;
