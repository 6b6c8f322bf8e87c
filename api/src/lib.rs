//! Menu API stub for the Stride site.
//!
//! The site is statically exported, so there is no live backend: the menu is
//! a fixed object. Labels are message IDs resolved by the UI's translation
//! catalog, not display text.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub label_key: String,
    pub href: String,
}

impl MenuItem {
    fn new(id: &str, label_key: &str, href: &str) -> Self {
        Self {
            id: id.to_string(),
            label_key: label_key.to_string(),
            href: href.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub items: Vec<MenuItem>,
}

/// The site navigation menu.
pub fn menu() -> Menu {
    Menu {
        items: vec![
            MenuItem::new("home", "nav-home", "/"),
            MenuItem::new("products", "nav-products", "/#showcase"),
            MenuItem::new("story", "nav-story", "/story"),
            MenuItem::new("stores", "nav-stores", "/#stores"),
        ],
    }
}

/// [`menu`] as the JSON object a remote endpoint would return.
pub fn menu_value() -> serde_json::Value {
    serde_json::to_value(menu()).unwrap_or(serde_json::Value::Null)
}
