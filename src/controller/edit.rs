//! Edit overlay handlers (open, submit, cancel, delete)

use crate::dom::NodeId;
use crate::error::Result;
use crate::order::{FormFields, OrderId, create_order_data};
use crate::render;
use crate::state::Overlay;

use super::{HandleResult, OrderBoard};

/// Open the edit overlay for the card that was clicked.
///
/// Fields are filled from the stored order, not from the card's text.
pub(super) fn handle_grid_click(board: &mut OrderBoard, target: NodeId) -> Result<HandleResult> {
    if !board.doc.contains(board.handles.other.grid, target) {
        return Ok(HandleResult::Ignored);
    }
    let Some(id) = board
        .doc
        .closest_with_data(target, "id")
        .and_then(|card| board.doc.data(card, "id"))
        .map(OrderId::from)
    else {
        return Ok(HandleResult::Ignored);
    };

    let order = board.store.get(&id)?.clone();
    let edit = board.handles.edit;
    board.doc.set_value(edit.title, &order.title)?;
    board.doc.set_value(edit.table, &order.table)?;
    board.doc.set_value(edit.column, &order.column)?;
    board.doc.set_data(edit.delete, "editing", id.as_str())?;

    board.session.editing = Some(id);
    board.show_overlay(Overlay::Edit)?;
    board.focus(edit.title);
    Ok(HandleResult::Handled)
}

/// Replace the order being edited with the form's values.
///
/// The old card is removed and a new one is appended to the submitted
/// column; the order keeps its id and creation time.
pub(super) fn handle_submit(board: &mut OrderBoard) -> Result<HandleResult> {
    let Some(id) = board.session.editing.clone() else {
        return Ok(HandleResult::Ignored);
    };

    let previous = board.store.get(&id)?.clone();
    let card = render::find_card(&board.doc, &id)?;

    let mut fields = board.doc.form_data(board.handles.edit.form);
    fields.insert(FormFields::ID, id.as_str());
    let mut order = create_order_data(&fields, &previous.column)?;
    board.handles.area(&order.column)?;
    order.created = previous.created;

    board.doc.remove(card)?;
    board.store.remove(&id)?;
    board.place_order(order)?;
    tracing::debug!(order = %id, "order updated");

    board.doc.reset_form(board.handles.edit.form)?;
    close(board)?;
    Ok(HandleResult::Handled)
}

pub(super) fn handle_cancel(board: &mut OrderBoard) -> Result<HandleResult> {
    close(board)?;
    Ok(HandleResult::Handled)
}

/// Remove the order being edited
pub(super) fn handle_delete(board: &mut OrderBoard) -> Result<HandleResult> {
    let Some(id) = board.session.editing.clone() else {
        return Ok(HandleResult::Ignored);
    };

    let card = render::find_card(&board.doc, &id)?;
    board.store.get(&id)?;

    board.doc.remove(card)?;
    board.store.remove(&id)?;
    tracing::debug!(order = %id, "order deleted");

    close(board)?;
    Ok(HandleResult::Handled)
}

fn close(board: &mut OrderBoard) -> Result<()> {
    board.session.editing = None;
    board.doc.remove_attr(board.handles.edit.delete, "data-editing")?;
    board.hide_overlay(Overlay::Edit)
}

#[cfg(test)]
mod tests {
    use super::super::BoardEvent;
    use super::super::tests::order;
    use super::*;
    use crate::config::Config;
    use crate::error::BoardError;

    fn board() -> OrderBoard {
        let mut board = OrderBoard::new(Config::default()).unwrap();
        board.seed(order("abc123", "Table 4", "preparing")).unwrap();
        board.seed(order("def456", "Table 8", "ordered")).unwrap();
        board
    }

    fn open_edit(board: &mut OrderBoard, id: &str) {
        let card = board.card(&OrderId::from(id)).unwrap();
        let result = board.dispatch(BoardEvent::GridClick { target: card }).unwrap();
        assert!(result.is_handled());
    }

    #[test]
    fn test_click_card_populates_edit_form() {
        let mut board = board();
        open_edit(&mut board, "abc123");

        assert!(board.is_open(Overlay::Edit));
        let fields = board.document().form_data(board.handles().edit.form);
        assert_eq!(fields.get("title"), Some("Table 4"));
        assert_eq!(fields.get("table"), Some("2"));
        assert_eq!(fields.get("column"), Some("preparing"));
        assert_eq!(
            board.document().data(board.handles().edit.delete, "editing"),
            Some("abc123")
        );
        assert_eq!(board.session().editing, Some(OrderId::from("abc123")));
    }

    #[test]
    fn test_click_card_child_opens_edit() {
        let mut board = board();
        let card = board.card(&OrderId::from("def456")).unwrap();
        let title = board.document().children(card)[0];
        board.dispatch(BoardEvent::GridClick { target: title }).unwrap();
        assert_eq!(board.session().editing, Some(OrderId::from("def456")));
    }

    #[test]
    fn test_click_without_id_ignored() {
        let mut board = board();
        let served = board.handles().area("served").unwrap();
        let result = board.dispatch(BoardEvent::GridClick { target: served }).unwrap();
        assert_eq!(result, HandleResult::Ignored);
        assert!(!board.is_open(Overlay::Edit));
        assert_eq!(board.session().editing, None);
    }

    #[test]
    fn test_click_outside_grid_ignored() {
        let mut board = board();
        let help = board.handles().other.help;
        let result = board.dispatch(BoardEvent::GridClick { target: help }).unwrap();
        assert_eq!(result, HandleResult::Ignored);
    }

    #[test]
    fn test_edit_submit_moves_and_updates() {
        let mut board = board();
        open_edit(&mut board, "abc123");
        let created = board.store().get(&OrderId::from("abc123")).unwrap().created;

        let edit = board.handles().edit;
        board.document_mut().set_value(edit.title, "Table 5").unwrap();
        board.document_mut().set_value(edit.column, "served").unwrap();
        board.dispatch(BoardEvent::EditSubmit).unwrap();

        assert_eq!(board.card_count(), 2);
        assert!(board.cards_in("preparing").unwrap().is_empty());
        assert_eq!(board.cards_in("served").unwrap(), vec![OrderId::from("abc123")]);

        let order = board.store().get(&OrderId::from("abc123")).unwrap();
        assert_eq!(order.title, "Table 5");
        assert_eq!(order.table, "2");
        assert_eq!(order.created, created);

        let card = board.card(&OrderId::from("abc123")).unwrap();
        assert!(board.document().text_content(card).contains("Table 5"));
        assert!(!board.is_open(Overlay::Edit));
        assert!(board.is_consistent());
    }

    #[test]
    fn test_edit_submit_unknown_column_leaves_board() {
        let mut board = board();
        open_edit(&mut board, "abc123");
        let edit = board.handles().edit;
        board.document_mut().set_value(edit.column, "archived").unwrap();

        let err = board.dispatch(BoardEvent::EditSubmit).unwrap_err();
        assert!(matches!(err, BoardError::UnknownColumn(_)));
        assert_eq!(board.cards_in("preparing").unwrap(), vec![OrderId::from("abc123")]);
        assert!(board.is_open(Overlay::Edit));
    }

    #[test]
    fn test_edit_submit_blank_title() {
        let mut board = board();
        open_edit(&mut board, "abc123");
        let edit = board.handles().edit;
        board.document_mut().set_value(edit.title, " ").unwrap();

        let err = board.dispatch(BoardEvent::EditSubmit).unwrap_err();
        assert!(matches!(err, BoardError::MissingField(_)));
        assert_eq!(board.card_count(), 2);
    }

    #[test]
    fn test_edit_submit_without_open_edit_ignored() {
        let mut board = board();
        let result = board.dispatch(BoardEvent::EditSubmit).unwrap();
        assert_eq!(result, HandleResult::Ignored);
        assert_eq!(board.card_count(), 2);
    }

    #[test]
    fn test_delete_removes_only_that_card() {
        let mut board = board();
        open_edit(&mut board, "abc123");
        board.dispatch(BoardEvent::Delete).unwrap();

        assert_eq!(board.card_count(), 1);
        assert!(board.card(&OrderId::from("abc123")).is_err());
        assert_eq!(board.cards_in("ordered").unwrap(), vec![OrderId::from("def456")]);
        assert!(!board.is_open(Overlay::Edit));
        assert!(board.is_consistent());
    }

    #[test]
    fn test_delete_stale_id_is_not_found() {
        let mut board = board();
        open_edit(&mut board, "abc123");
        board.dispatch(BoardEvent::Delete).unwrap();

        // Reopen against a card removed behind the board's back
        open_edit(&mut board, "def456");
        let card = board.card(&OrderId::from("def456")).unwrap();
        board.document_mut().remove(card).unwrap();

        let err = board.dispatch(BoardEvent::Delete).unwrap_err();
        assert!(matches!(err, BoardError::OrderNotFound(ref id) if id == "def456"));
        assert_eq!(board.store().len(), 1);
        assert!(board.is_open(Overlay::Edit));
    }

    #[test]
    fn test_edit_cancel() {
        let mut board = board();
        open_edit(&mut board, "def456");
        board.dispatch(BoardEvent::EditCancel).unwrap();

        assert!(!board.is_open(Overlay::Edit));
        assert_eq!(board.session().editing, None);
        assert_eq!(board.document().data(board.handles().edit.delete, "editing"), None);

        let result = board.dispatch(BoardEvent::Delete).unwrap();
        assert_eq!(result, HandleResult::Ignored);
        assert_eq!(board.card_count(), 2);
    }
}
