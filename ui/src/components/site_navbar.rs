use dioxus::prelude::*;
use once_cell::sync::OnceCell;
use serde_json::Value;

use crate::core::locale::LocalePreference;
use crate::core::render_guard::{RenderGuard, RenderValue, OBJECT_PLACEHOLDER};
use crate::i18n::use_locale;
use crate::t;

/// Platforms register a `NavBuilder` so menu entries become router links
/// without `ui` knowing each platform's `Route` enum.
///
/// ```ignore
/// use ui::components::site_navbar::{register_nav, NavBuilder};
/// fn nav_link(href: &str, label: &str) -> Element {
///     rsx!(Link { class: "navbar__link", to: href.to_string(), "{label}" })
/// }
/// register_nav(NavBuilder { link: nav_link });
/// ```
///
/// Without a builder, entries render as plain anchors.
pub struct NavBuilder {
    // Must return an element whose only child is `label`.
    pub link: fn(href: &str, label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

/// A navigation entry ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct NavEntry {
    pub id: String,
    pub label_key: String,
    pub href: String,
}

/// Entries of a menu object as returned by the menu API. Every field passes
/// the render guard; entries without a usable `href` or `label_key` are
/// dropped.
pub fn nav_entries(menu: &Value, guard: &RenderGuard) -> Vec<NavEntry> {
    let Some(items) = menu.get("items").and_then(Value::as_array) else {
        tracing::warn!("menu object has no items");
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let field = |name: &str| {
                guard.text::<()>(
                    RenderValue::from(item[name].clone()),
                    &format!("menu.{name}"),
                    Some(""),
                )
            };
            let usable = |text: &str| !text.is_empty() && text != OBJECT_PLACEHOLDER;
            let entry = NavEntry {
                id: field("id"),
                label_key: field("label_key"),
                href: field("href"),
            };
            (usable(&entry.href) && usable(&entry.label_key)).then_some(entry)
        })
        .collect()
}

/// Wraps a menu link so the list stays keyed by entry id, whatever the
/// registered builder returns.
fn keyed_item(id: &str, link: Element) -> Element {
    rsx! {
        span { key: "{id}", class: "navbar__item", {link} }
    }
}

#[component]
pub fn SiteNavbar() -> Element {
    let prefs = use_context::<LocalePreference>();
    let current = use_locale();
    let supported = prefs.supported();

    let on_change = move |evt: dioxus::events::FormEvent| {
        // Unsupported values are logged inside `change`.
        let _ = prefs.change(&evt.value());
    };

    let builder = NAV_BUILDER.get();
    let links: Vec<Element> = nav_entries(&api::menu_value(), &RenderGuard::default())
        .into_iter()
        .map(|entry| {
            let label = crate::i18n::tr(&entry.label_key);
            let link = match builder {
                Some(b) => (b.link)(&entry.href, &label),
                None => rsx! {
                    a { class: "navbar__link", href: "{entry.href}", "{label}" }
                },
            };
            keyed_item(&entry.id, link)
        })
        .collect();
    let tagline = t!("tagline");

    rsx! {
        header {
            id: "navbar",
            class: "navbar",
            div { class: "navbar__inner",
                // Brand
                div { class: "navbar__brand",
                    span { class: "navbar__brand-mark", "STRIDE" }
                    span { class: "navbar__brand-subtitle", "{tagline}" }
                }

                nav { class: "navbar__links",
                    for link in links {
                        {link}
                    }
                }

                // Locale switcher
                div { class: "navbar__locale",
                    label {
                        class: "visually-hidden",
                        r#for: "locale-select",
                        {t!("nav-language-label")}
                    }
                    select {
                        id: "locale-select",
                        value: "{current}",
                        oninput: on_change,
                        for locale in supported.iter().copied() {
                            option {
                                key: "{locale}",
                                value: "{locale}",
                                selected: locale == current,
                                "{locale.native_name()}"
                            }
                        }
                    }
                }
            }
        }
    }
}
