mod app;
mod battery;
mod commands;
mod effects;
pub mod logging;
mod render;
mod source;

pub use app::run_app;
