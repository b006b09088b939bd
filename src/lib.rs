pub mod core;
pub mod gui;
pub mod models;
pub mod utils;
