//! Initial page command (`order-board page`)

use crate::config::Config;
use crate::controller::OrderBoard;
use crate::error::Result;

/// Print the markup of an empty board
pub fn cmd_page(config: Config) -> Result<()> {
    let board = OrderBoard::new(config)?;
    println!("{}", board.to_html());
    Ok(())
}
