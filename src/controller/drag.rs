//! Drag-and-drop handlers
//!
//! idle -> dragging (dragstart) -> hovering(column) (dragover, once per
//! column crossed) -> dropped (drop) -> idle (dragend)

use crate::dom::NodeId;
use crate::error::{BoardError, Result};
use crate::order::OrderId;
use crate::render;
use crate::state::DragPhase;

use super::{HandleResult, OrderBoard};

/// Remember the card being dragged
pub(super) fn handle_drag_start(board: &mut OrderBoard, target: NodeId) -> Result<HandleResult> {
    if board.enclosing_area(target).is_none() {
        return Ok(HandleResult::Ignored);
    }
    let Some(card) = board.doc.closest_with_data(target, "id") else {
        return Ok(HandleResult::Ignored);
    };

    board.session.drag.start(card);
    Ok(HandleResult::Handled)
}

/// Highlight the column under the pointer.
///
/// Walks the bubble path outward from the deepest target until an element
/// with `data-area` turns up. No such element means nothing changes.
pub(super) fn handle_drag_over(
    board: &mut OrderBoard,
    target: NodeId,
    path: Option<Vec<NodeId>>,
) -> Result<HandleResult> {
    let path = path.unwrap_or_else(|| board.doc.bubble_path(target));
    let column = path
        .iter()
        .find_map(|&node| board.doc.data(node, "area"))
        .map(str::to_string);

    let Some(column) = column else {
        return Ok(HandleResult::Ignored);
    };

    render::update_dragging_html(&mut board.doc, &board.handles, &column)?;
    board.session.drag.update_dragging(&column);
    Ok(HandleResult::Handled)
}

/// Reparent the dragged card
pub(super) fn handle_drop(board: &mut OrderBoard, target: NodeId) -> Result<HandleResult> {
    let Some(card) = board.session.drag.dragged else {
        return Ok(HandleResult::Ignored);
    };
    let Some(area) = board.enclosing_area(target) else {
        return Ok(HandleResult::Ignored);
    };

    let id = match board.doc.data(card, "id") {
        Some(id) if board.doc.is_connected(card) => OrderId::from(id),
        _ => {
            board.session.drag.clear();
            return Err(BoardError::NodeNotFound(card.index()));
        }
    };
    board.store.get(&id)?;

    let column = board
        .doc
        .data(area, "area")
        .map(str::to_string)
        .ok_or(BoardError::NodeNotFound(area.index()))?;
    if board.config.legacy.drop_into_event_target {
        // Cards never nest: a drop on a card lands beside it
        let destination = board
            .doc
            .closest_with_data(target, "id")
            .and_then(|over| board.doc.parent(over))
            .unwrap_or(target);
        board.doc.append_child(destination, card)?;
    } else {
        render::move_to_column(&mut board.doc, &board.handles, &id, &column)?;
    }
    board.store.set_column(&id, &column)?;
    board.session.drag.mark_dropped();
    Ok(HandleResult::Handled)
}

/// Clear the highlight and the drag slot.
///
/// A drag in progress is always cleaned up, even when the card was detached
/// while it was moving.
pub(super) fn handle_drag_end(board: &mut OrderBoard, target: NodeId) -> Result<HandleResult> {
    if board.enclosing_area(target).is_none() && board.session.drag.phase() == DragPhase::Idle {
        return Ok(HandleResult::Ignored);
    }

    if board.config.legacy.drag_end_clears_closest_section {
        if let Some(section) = board.doc.closest_tag(target, "section") {
            render::clear_background(&mut board.doc, section)?;
        }
    } else {
        render::clear_dragging_html(&mut board.doc, &board.handles)?;
    }

    board.session.drag.clear();
    Ok(HandleResult::Handled)
}
