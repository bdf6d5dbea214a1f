//! Add overlay handlers

use crate::error::Result;
use crate::order::create_order_data;
use crate::state::Overlay;

use super::{HandleResult, OrderBoard};

pub(super) fn handle_open(board: &mut OrderBoard) -> Result<HandleResult> {
    board.show_overlay(Overlay::Add)?;
    let focus = if board.config.legacy.focus_opener_on_add {
        board.handles.other.add
    } else {
        board.handles.add.title
    };
    board.focus(focus);
    Ok(HandleResult::Handled)
}

/// Create an order from the add form and append it to the intake column.
///
/// Any `column` field on the form is ignored.
pub(super) fn handle_submit(board: &mut OrderBoard) -> Result<HandleResult> {
    let form = board.handles.add.form;
    let fields = board.doc.form_data(form);
    let intake = board.config.intake_column.clone();

    let mut order = create_order_data(&fields, &intake)?;
    order.column = intake;
    let id = order.id.clone();
    board.place_order(order)?;
    tracing::debug!(order = %id, "order added");

    board.doc.reset_form(form)?;
    board.hide_overlay(Overlay::Add)?;
    board.focus(board.handles.other.add);
    Ok(HandleResult::Handled)
}

pub(super) fn handle_cancel(board: &mut OrderBoard) -> Result<HandleResult> {
    board.hide_overlay(Overlay::Add)?;
    board.focus(board.handles.other.add);
    Ok(HandleResult::Handled)
}
