pub mod registry;
pub mod registry_tests;

pub use registry::DemandRegistry;
