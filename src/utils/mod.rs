pub mod config;
pub mod fromscan_toml;
pub mod logger;
pub mod tempfiles;
pub mod token;

pub use config::*;
pub use logger::{Colors, setup_logging};
pub use tempfiles::{temp_path_for, write_atomic};
pub use token::resolve_token;
