pub mod app;
pub mod booking;
pub mod cli;
pub mod config;

pub use app::*;
pub use booking::*;
pub use cli::*;
pub use config::*;
