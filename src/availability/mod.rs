pub mod handlers;
pub mod resolver;

pub use resolver::{resolve, AvailabilityError, AvailabilityReport};
