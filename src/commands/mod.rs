mod page;
mod replay;

pub use page::cmd_page;
pub use replay::{ReplayOptions, cmd_replay};

use std::path::Path;

use crate::config::Config;
use crate::error::Result;

/// Load the board configuration, falling back to defaults when no file is given
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

/// Print a value as pretty JSON
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
