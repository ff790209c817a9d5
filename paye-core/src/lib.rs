pub mod calculations;
pub mod models;
pub mod period;

pub use models::*;
pub use period::Period;
