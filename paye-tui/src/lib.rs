pub mod app;
pub mod logging;
pub mod utils;
pub mod views;
