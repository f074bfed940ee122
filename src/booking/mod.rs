pub mod error;
pub mod handlers;
pub mod lifecycle;
pub mod models;
pub mod orchestrator;

pub use error::*;
pub use handlers::*;
pub use lifecycle::*;
pub use models::*;
pub use orchestrator::*;
