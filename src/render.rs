//! Projection of orders and drag state onto the page.

use crate::dom::{Document, NodeId};
use crate::error::{BoardError, Result};
use crate::order::{Order, OrderId};
use crate::page::PageHandles;

/// Background applied to the column under the pointer during a drag
pub const DRAGGING_BACKGROUND: &str = "rgba(0, 160, 70, 0.2)";

const BACKGROUND: &str = "background-color";

/// Build a detached card element for an order.
///
/// The card carries the order id as `data-id`; the returned node still has
/// to be appended to a column.
pub fn create_order_html(doc: &mut Document, order: &Order) -> Result<NodeId> {
    let card = doc.create_element("div");
    doc.set_attr(card, "class", "order")?;
    doc.set_attr(card, "draggable", "true")?;
    doc.set_data(card, "id", order.id.as_str())?;

    let title = doc.create_element("div");
    doc.set_attr(title, "class", "order__title")?;
    doc.set_text(title, &order.title)?;
    doc.append_child(card, title)?;

    let details = doc.create_element("dl");
    doc.set_attr(details, "class", "order__details")?;
    doc.append_child(card, details)?;

    let time = order.created.strftime("%H:%M").to_string();
    for (label, value) in [("Table", order.table.as_str()), ("Ordered at", time.as_str())] {
        let row = doc.create_element("div");
        doc.set_attr(row, "class", "order__row")?;

        let dt = doc.create_element("dt");
        doc.set_attr(dt, "class", "order__label")?;
        doc.set_text(dt, label)?;

        let dd = doc.create_element("dd");
        doc.set_attr(dd, "class", "order__value")?;
        doc.set_text(dd, value)?;

        doc.append_child(row, dt)?;
        doc.append_child(row, dd)?;
        doc.append_child(details, row)?;
    }

    Ok(card)
}

/// Locate the rendered card for an order
pub fn find_card(doc: &Document, id: &OrderId) -> Result<NodeId> {
    doc.query_data("id", id.as_str())
        .ok_or_else(|| BoardError::OrderNotFound(id.to_string()))
}

/// Highlight exactly the `over` column and clear every other one
pub fn update_dragging_html(doc: &mut Document, handles: &PageHandles, over: &str) -> Result<()> {
    let target = handles.area(over)?;
    for area in handles.areas() {
        let value = if area == target { DRAGGING_BACKGROUND } else { "" };
        doc.set_style(area, BACKGROUND, value)?;
    }
    Ok(())
}

/// Remove the drag highlight from every column
pub fn clear_dragging_html(doc: &mut Document, handles: &PageHandles) -> Result<()> {
    for area in handles.areas() {
        doc.set_style(area, BACKGROUND, "")?;
    }
    Ok(())
}

/// Remove the drag highlight from one element only
pub fn clear_background(doc: &mut Document, node: NodeId) -> Result<()> {
    doc.set_style(node, BACKGROUND, "")
}

/// Columns currently carrying the drag highlight
pub fn highlighted_columns(doc: &Document, handles: &PageHandles) -> Vec<String> {
    handles
        .area
        .iter()
        .filter(|&(_, &node)| doc.style(node, BACKGROUND).is_some())
        .map(|(name, _)| name.clone())
        .collect()
}

/// Reparent the card for `id` into the named column
pub fn move_to_column(
    doc: &mut Document,
    handles: &PageHandles,
    id: &OrderId,
    column: &str,
) -> Result<()> {
    let area = handles.area(column)?;
    let card = find_card(doc, id)?;
    doc.append_child(area, card)
}
