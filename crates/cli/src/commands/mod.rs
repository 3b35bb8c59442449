pub mod classify;
pub mod config;
pub mod utils;

pub use classify::handle_classify_command;
pub use config::{handle_config_command, ConfigCommands};
