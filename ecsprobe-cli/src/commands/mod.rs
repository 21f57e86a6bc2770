//! Command handlers -- one module per subcommand

pub mod checks;
pub mod config;
pub mod verify;
