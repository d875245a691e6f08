pub mod calculations;
pub mod error;
pub mod models;
pub mod tables;

pub use calculations::{estimate, estimate_form};
pub use error::SequestrationError;
pub use models::*;
