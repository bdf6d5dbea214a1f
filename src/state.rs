//! Per-session interaction state
//!
//! One `SessionState` exists per board. It replaces the page-level globals
//! for the dragged card and overlay visibility.

use crate::dom::NodeId;
use crate::order::OrderId;

/// Where a drag currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
    Hovering(String),
    Dropped,
}

/// The single drag slot: which card is moving and which column it is over
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    pub dragged: Option<NodeId>,
    pub over: Option<String>,
    dropped: bool,
}

impl DragState {
    pub fn start(&mut self, card: NodeId) {
        *self = DragState {
            dragged: Some(card),
            over: None,
            dropped: false,
        };
    }

    /// Record the column under the pointer, overwriting any previous one
    pub fn update_dragging(&mut self, over: &str) {
        self.over = Some(over.to_string());
    }

    pub fn mark_dropped(&mut self) {
        self.dropped = true;
    }

    pub fn clear(&mut self) {
        *self = DragState::default();
    }

    pub fn phase(&self) -> DragPhase {
        match (&self.dragged, &self.over, self.dropped) {
            (None, _, _) => DragPhase::Idle,
            (Some(_), _, true) => DragPhase::Dropped,
            (Some(_), Some(column), false) => DragPhase::Hovering(column.clone()),
            (Some(_), None, false) => DragPhase::Dragging,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Add,
    Edit,
    Help,
}

/// Overlay visibility
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayState {
    add: bool,
    edit: bool,
    help: bool,
}

impl OverlayState {
    fn slot(&mut self, overlay: Overlay) -> &mut bool {
        match overlay {
            Overlay::Add => &mut self.add,
            Overlay::Edit => &mut self.edit,
            Overlay::Help => &mut self.help,
        }
    }

    pub fn show(&mut self, overlay: Overlay) {
        *self.slot(overlay) = true;
    }

    pub fn hide(&mut self, overlay: Overlay) {
        *self.slot(overlay) = false;
    }

    pub fn is_open(&self, overlay: Overlay) -> bool {
        match overlay {
            Overlay::Add => self.add,
            Overlay::Edit => self.edit,
            Overlay::Help => self.help,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub drag: DragState,
    pub overlays: OverlayState,
    /// Order whose edit overlay is open
    pub editing: Option<OrderId>,
    /// Element holding keyboard focus
    pub focus: Option<NodeId>,
}
