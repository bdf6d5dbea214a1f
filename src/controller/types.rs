//! Event and result types for the board controller

use serde::Serialize;

use crate::dom::NodeId;
use crate::order::Order;

/// Result from handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleResult {
    /// Event changed the board
    Handled,
    /// Event had nothing to act on; the board is unchanged
    #[default]
    Ignored,
}

impl HandleResult {
    pub fn is_handled(self) -> bool {
        matches!(self, HandleResult::Handled)
    }
}

/// Page events the board listens for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// `dragstart` on a card inside a column
    DragStart { target: NodeId },
    /// `dragover` inside a column.
    ///
    /// `path` is the event's bubble path when the environment provides one;
    /// otherwise it is computed from `target`.
    DragOver {
        target: NodeId,
        path: Option<Vec<NodeId>>,
    },
    /// `drop` inside a column
    Drop { target: NodeId },
    /// `dragend` fired on the dragged card
    DragEnd { target: NodeId },

    /// Add button clicked
    AddOpen,
    /// Add form submitted
    AddSubmit,
    /// Add overlay cancel clicked
    AddCancel,

    /// Click anywhere inside the order grid
    GridClick { target: NodeId },
    /// Edit form submitted
    EditSubmit,
    /// Edit overlay cancel clicked
    EditCancel,
    /// Edit overlay delete clicked
    Delete,

    /// Help button clicked
    HelpOpen,
    /// Help overlay close clicked
    HelpCancel,
}

impl BoardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            BoardEvent::DragStart { .. } => "dragstart",
            BoardEvent::DragOver { .. } => "dragover",
            BoardEvent::Drop { .. } => "drop",
            BoardEvent::DragEnd { .. } => "dragend",
            BoardEvent::AddOpen => "add-open",
            BoardEvent::AddSubmit => "add-submit",
            BoardEvent::AddCancel => "add-cancel",
            BoardEvent::GridClick { .. } => "grid-click",
            BoardEvent::EditSubmit => "edit-submit",
            BoardEvent::EditCancel => "edit-cancel",
            BoardEvent::Delete => "delete",
            BoardEvent::HelpOpen => "help-open",
            BoardEvent::HelpCancel => "help-cancel",
        }
    }
}

/// Serializable view of the board, columns in configured order
#[derive(Debug, Clone, Serialize)]
pub struct BoardSnapshot {
    pub columns: Vec<ColumnSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnSnapshot {
    pub name: String,
    pub highlighted: bool,
    /// Orders in the order their cards appear
    pub orders: Vec<Order>,
}

impl BoardSnapshot {
    pub fn total_orders(&self) -> usize {
        self.columns.iter().map(|c| c.orders.len()).sum()
    }
}
