//! Product cards built from the embedded catalogue JSON.
//!
//! The catalogue is untyped on purpose: it mirrors what a CMS export hands
//! the site. Every field goes through [`RenderGuard`] before it is shown.

use dioxus::prelude::*;
use serde_json::Value;

use crate::core::format::format_number;
use crate::core::locale::Locale;
use crate::core::render_guard::{extract_display_text, log_unsafe, RenderGuard, RenderValue};
use crate::components::SafeText;
use crate::i18n::use_locale;
use crate::t;

const PRODUCTS_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/products.json"));

/// Display-ready product card.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    /// Raw series value; rendered through [`SafeText`].
    pub series: Value,
    pub price: String,
    pub badge: Option<String>,
    pub colors: Vec<String>,
}

impl ProductCard {
    pub fn colors_label(&self) -> String {
        self.colors.join(" / ")
    }
}

/// Parse the embedded catalogue. A malformed file yields no products.
pub fn catalogue() -> Vec<Value> {
    match serde_json::from_str::<Value>(PRODUCTS_JSON) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            tracing::warn!("product catalogue is not an array");
            Vec::new()
        }
        Err(err) => {
            tracing::warn!(error = %err, "product catalogue failed to parse");
            Vec::new()
        }
    }
}

/// Text of a `{ "zh": .., "en": .. }` field for `locale`, or the guarded
/// text of the value when it is not localized.
pub fn localized_text(value: &Value, locale: Locale, guard: &RenderGuard, context: &str) -> String {
    if let Some(text) = value.get(locale.as_str()).and_then(Value::as_str) {
        return text.to_string();
    }
    guard.text::<()>(RenderValue::from(value.clone()), context, None)
}

pub fn product_card(product: &Value, locale: Locale, guard: &RenderGuard) -> ProductCard {
    let id = guard.text::<()>(RenderValue::from(product["id"].clone()), "showcase.id", None);
    let name = localized_text(&product["name"], locale, guard, "showcase.name");
    let series = product["series"].clone();
    let price = match product["price"].as_f64() {
        Some(price) => format!("¥{}", format_number(price)),
        None => guard.text::<()>(RenderValue::from(product["price"].clone()), "showcase.price", Some("—")),
    };
    let badge = Some(localized_text(&product["badge"], locale, guard, "showcase.badge"))
        .filter(|badge| !badge.is_empty());
    let colors = match guard.guard::<(), _>(
        RenderValue::from(product["colors"].clone()),
        "showcase.colors",
        log_unsafe,
    ) {
        RenderValue::Sequence(items) => items
            .iter()
            .map(|item| extract_display_text(Some(item), None))
            .collect(),
        RenderValue::Empty => Vec::new(),
        other => vec![extract_display_text(Some(&other), None)],
    };

    ProductCard {
        id,
        name,
        series,
        price,
        badge,
        colors,
    }
}

#[component]
pub fn ProductShowcase() -> Element {
    let locale = use_locale();
    let guard = RenderGuard::default();
    let cards: Vec<ProductCard> = catalogue()
        .iter()
        .map(|product| product_card(product, locale, &guard))
        .collect();

    rsx! {
        section { id: "showcase", class: "showcase",
            h2 { {t!("showcase-title")} }
            if cards.is_empty() {
                p { class: "showcase__empty", {t!("showcase-empty")} }
            }
            div { class: "showcase__grid",
                for card in cards {
                    article { key: "{card.id}", class: "product-card",
                        if let Some(badge) = card.badge.clone() {
                            span { class: "product-card__badge", "{badge}" }
                        }
                        h3 { class: "product-card__name", "{card.name}" }
                        dl { class: "product-card__facts",
                            dt { {t!("showcase-series")} }
                            dd {
                                SafeText {
                                    value: card.series.clone(),
                                    context: "showcase.series".to_string(),
                                    fallback: "—".to_string(),
                                }
                            }
                            dt { {t!("showcase-price")} }
                            dd { "{card.price}" }
                            if !card.colors.is_empty() {
                                dt { {t!("showcase-colors")} }
                                dd { "{card.colors_label()}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
