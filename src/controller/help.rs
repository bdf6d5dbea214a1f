//! Help overlay handlers

use crate::error::Result;
use crate::state::Overlay;

use super::{HandleResult, OrderBoard};

pub(super) fn handle_open(board: &mut OrderBoard) -> Result<HandleResult> {
    board.show_overlay(Overlay::Help)?;
    Ok(HandleResult::Handled)
}

pub(super) fn handle_cancel(board: &mut OrderBoard) -> Result<HandleResult> {
    board.hide_overlay(Overlay::Help)?;
    board.focus(board.handles.other.add);
    Ok(HandleResult::Handled)
}

#[cfg(test)]
mod tests {
    use super::super::BoardEvent;
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_help_toggle() {
        let mut board = OrderBoard::new(Config::default()).unwrap();
        board.dispatch(BoardEvent::HelpOpen).unwrap();
        assert!(board.is_open(Overlay::Help));
        assert!(board.document().has_attr(board.handles().help.overlay, "open"));

        board.dispatch(BoardEvent::HelpCancel).unwrap();
        assert!(!board.is_open(Overlay::Help));
        assert!(!board.document().has_attr(board.handles().help.overlay, "open"));
        assert_eq!(board.focused(), Some(board.handles().other.add));
    }
}
