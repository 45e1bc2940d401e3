//! Order line types

use crate::models::MenuItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of an order: a menu item and how many were requested
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderLine {
    /// Menu item id
    pub id: String,
    /// Menu item name
    pub name: String,
    /// Unit price copied at add-time
    pub price: Decimal,
    /// Quantity (always >= 1)
    pub quantity: u32,
}

impl OrderLine {
    /// First line for a menu item (quantity 1)
    pub fn from_menu_item(item: &MenuItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            quantity: 1,
        }
    }

    /// price × quantity
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}
