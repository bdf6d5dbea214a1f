//! Event controller for the order board
//!
//! `OrderBoard` owns the page, the order store, and the session state.
//! Every event runs to completion on `&mut self`; handlers for each flow
//! live in their own module.

mod add;
mod drag;
mod edit;
mod help;
mod types;

pub use types::{BoardEvent, BoardSnapshot, ColumnSnapshot, HandleResult};

use crate::config::Config;
use crate::dom::{Document, NodeId};
use crate::error::{BoardError, Result};
use crate::order::{Order, OrderId};
use crate::page::{PageHandles, build_page};
use crate::render;
use crate::state::{Overlay, SessionState};
use crate::store::OrderStore;

#[derive(Debug, Clone)]
pub struct OrderBoard {
    config: Config,
    doc: Document,
    handles: PageHandles,
    store: OrderStore,
    session: SessionState,
}

impl OrderBoard {
    /// Build an empty board for a validated configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let (doc, handles) = build_page(&config)?;
        Ok(Self {
            config,
            doc,
            handles,
            store: OrderStore::new(),
            session: SessionState::default(),
        })
    }

    /// Place an order that is already on the board when the page loads
    pub fn seed(&mut self, order: Order) -> Result<NodeId> {
        self.place_order(order)
    }

    /// Route an event to its handler.
    ///
    /// Errors leave the board unchanged.
    pub fn dispatch(&mut self, event: BoardEvent) -> Result<HandleResult> {
        let name = event.name();
        let result = match event {
            BoardEvent::DragStart { target } => drag::handle_drag_start(self, target),
            BoardEvent::DragOver { target, path } => drag::handle_drag_over(self, target, path),
            BoardEvent::Drop { target } => drag::handle_drop(self, target),
            BoardEvent::DragEnd { target } => drag::handle_drag_end(self, target),
            BoardEvent::AddOpen => add::handle_open(self),
            BoardEvent::AddSubmit => add::handle_submit(self),
            BoardEvent::AddCancel => add::handle_cancel(self),
            BoardEvent::GridClick { target } => edit::handle_grid_click(self, target),
            BoardEvent::EditSubmit => edit::handle_submit(self),
            BoardEvent::EditCancel => edit::handle_cancel(self),
            BoardEvent::Delete => edit::handle_delete(self),
            BoardEvent::HelpOpen => help::handle_open(self),
            BoardEvent::HelpCancel => help::handle_cancel(self),
        };

        match &result {
            Ok(HandleResult::Handled) => tracing::debug!(event = name, "event handled"),
            Ok(HandleResult::Ignored) => tracing::debug!(event = name, "event ignored"),
            Err(e) if e.is_not_found() => tracing::debug!(event = name, "stale reference: {e}"),
            Err(e) => tracing::warn!(event = name, "event failed: {e}"),
        }
        result
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Mutable page access, e.g. for typing into form fields
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn handles(&self) -> &PageHandles {
        &self.handles
    }

    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn is_open(&self, overlay: Overlay) -> bool {
        self.session.overlays.is_open(overlay)
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.session.focus
    }

    /// Rendered card for an order
    pub fn card(&self, id: &OrderId) -> Result<NodeId> {
        render::find_card(&self.doc, id)
    }

    /// Ids of the cards in a column, in page order
    pub fn cards_in(&self, column: &str) -> Result<Vec<OrderId>> {
        let area = self.handles.area(column)?;
        let ids = self
            .doc
            .descendants(area)
            .into_iter()
            .filter_map(|node| self.doc.data(node, "id"))
            .map(OrderId::from)
            .collect();
        Ok(ids)
    }

    /// Number of rendered cards on the page
    pub fn card_count(&self) -> usize {
        self.doc.query_data_all("id").len()
    }

    /// Name of the column whose container holds the order's card
    pub fn column_of(&self, id: &OrderId) -> Result<String> {
        let card = self.card(id)?;
        self.area_name(card)
            .ok_or_else(|| BoardError::OrderNotFound(id.to_string()))
    }

    /// Check that store and page agree on every order
    pub fn is_consistent(&self) -> bool {
        let cards = self.doc.query_data_all("id");
        cards.len() == self.store.len()
            && self.store.iter().all(|order| {
                self.column_of(&order.id).ok().as_deref() == Some(order.column.as_str())
            })
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let highlighted = render::highlighted_columns(&self.doc, &self.handles);
        let columns = self
            .config
            .columns
            .iter()
            .map(|name| ColumnSnapshot {
                name: name.clone(),
                highlighted: highlighted.contains(name),
                orders: self
                    .cards_in(name)
                    .unwrap_or_default()
                    .iter()
                    .filter_map(|id| self.store.get(id).ok().cloned())
                    .collect(),
            })
            .collect();
        BoardSnapshot { columns }
    }

    /// Serialize the whole page
    pub fn to_html(&self) -> String {
        self.doc.to_html(self.doc.root())
    }

    /// Configured column container enclosing a node
    fn enclosing_area(&self, node: NodeId) -> Option<NodeId> {
        self.doc
            .closest_with_data(node, "area")
            .filter(|area| self.handles.areas().any(|a| a == *area))
    }

    fn area_name(&self, node: NodeId) -> Option<String> {
        self.enclosing_area(node)
            .and_then(|area| self.doc.data(area, "area"))
            .map(str::to_string)
    }

    /// Store an order and append its card to the order's column
    fn place_order(&mut self, order: Order) -> Result<NodeId> {
        let area = self.handles.area(&order.column)?;
        if self.store.contains(&order.id) {
            return Err(BoardError::DuplicateOrder(order.id.to_string()));
        }

        let card = render::create_order_html(&mut self.doc, &order)?;
        self.doc.append_child(area, card)?;
        self.store.insert(order);
        Ok(card)
    }

    fn overlay_node(&self, overlay: Overlay) -> NodeId {
        match overlay {
            Overlay::Add => self.handles.add.overlay,
            Overlay::Edit => self.handles.edit.overlay,
            Overlay::Help => self.handles.help.overlay,
        }
    }

    fn show_overlay(&mut self, overlay: Overlay) -> Result<()> {
        let node = self.overlay_node(overlay);
        self.doc.set_attr(node, "open", "")?;
        self.session.overlays.show(overlay);
        Ok(())
    }

    fn hide_overlay(&mut self, overlay: Overlay) -> Result<()> {
        let node = self.overlay_node(overlay);
        self.doc.remove_attr(node, "open")?;
        self.session.overlays.hide(overlay);
        Ok(())
    }

    fn focus(&mut self, node: NodeId) {
        self.session.focus = Some(node);
    }
}
