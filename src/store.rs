//! Keyed order store.
//!
//! The store is the logical record of which orders exist. The page only
//! projects it.

use std::collections::HashMap;

use crate::error::{BoardError, Result};
use crate::order::{Order, OrderId};

#[derive(Debug, Clone, Default)]
pub struct OrderStore {
    orders: HashMap<OrderId, Order>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn contains(&self, id: &OrderId) -> bool {
        self.orders.contains_key(id)
    }

    /// Insert or replace an order, returning the previous record
    pub fn insert(&mut self, order: Order) -> Option<Order> {
        self.orders.insert(order.id.clone(), order)
    }

    pub fn get(&self, id: &OrderId) -> Result<&Order> {
        self.orders
            .get(id)
            .ok_or_else(|| BoardError::OrderNotFound(id.to_string()))
    }

    pub fn remove(&mut self, id: &OrderId) -> Result<Order> {
        self.orders
            .remove(id)
            .ok_or_else(|| BoardError::OrderNotFound(id.to_string()))
    }

    /// Record that an order now sits in `column`
    pub fn set_column(&mut self, id: &OrderId, column: &str) -> Result<()> {
        let order = self
            .orders
            .get_mut(id)
            .ok_or_else(|| BoardError::OrderNotFound(id.to_string()))?;
        order.column = column.to_string();
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }
}
