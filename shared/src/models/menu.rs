//! Menu Model (cardápio)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuItem {
    /// Unique item id
    pub id: String,
    pub name: String,
    /// Flat unit price in R$
    pub price: Decimal,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}

/// Menu loading errors
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate menu item id: {0}")]
    DuplicateId(String),

    #[error("Invalid menu item {id}: {reason}")]
    InvalidItem { id: String, reason: String },
}

pub type MenuResult<T> = Result<T, MenuError>;

/// Static catalog, loaded once at startup and never mutated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    items: Vec<MenuItem>,
}

/// (id, name, price in whole reais)
const DEFAULT_CATALOG: &[(&str, &str, i64)] = &[
    ("1", "Hamburguer Tradicional", 11),
    ("2", "Hamburguer de Calabresa", 15),
    ("3", "Hamburguer de Bacon", 17),
    ("4", "Hamburguer Caseiro", 15),
    ("5", "Cheddar", 16),
    ("6", "X BACON", 19),
    ("7", "Pastel Tradicional", 4),
    ("8", "Hot Dog Simples", 10),
    ("9", "Hot Dog a Moda da Casa", 14),
    ("10", "BATATA FRITA COM CHEDDAR", 23),
    ("11", "BATATA FRITA COM CHEDDAR E BACON", 26),
    ("12", "REFRIGERANTE 2 L", 12),
    ("13", "REFRIGERANTE 1 L", 8),
    ("14", "Copo de suco", 3),
];

impl Menu {
    /// Build a menu, rejecting duplicate ids, blank names and negative prices
    pub fn new(items: Vec<MenuItem>) -> MenuResult<Self> {
        validate_items(&items)?;
        Ok(Self { items })
    }

    /// Parse a JSON array of menu items
    pub fn from_json(json: &str) -> MenuResult<Self> {
        let items: Vec<MenuItem> = serde_json::from_str(json)?;
        Self::new(items)
    }

    /// Load a JSON catalog file
    pub fn load(path: impl AsRef<Path>) -> MenuResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let menu = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), items = menu.len(), "Menu loaded");
        Ok(menu)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn validate_items(items: &[MenuItem]) -> MenuResult<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if item.name.trim().is_empty() {
            return Err(MenuError::InvalidItem {
                id: item.id.clone(),
                reason: "name must not be empty".to_string(),
            });
        }
        if item.price < Decimal::ZERO {
            return Err(MenuError::InvalidItem {
                id: item.id.clone(),
                reason: format!("price must be non-negative, got {}", item.price),
            });
        }
        if !seen.insert(item.id.as_str()) {
            return Err(MenuError::DuplicateId(item.id.clone()));
        }
    }
    Ok(())
}

impl Default for Menu {
    fn default() -> Self {
        let items = DEFAULT_CATALOG
            .iter()
            .map(|&(id, name, price)| MenuItem::new(id, name, Decimal::from(price)))
            .collect();
        Self { items }
    }
}
