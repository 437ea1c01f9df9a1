pub mod commands;
pub mod params;

pub use commands::Cli;
pub use params::build_config;
