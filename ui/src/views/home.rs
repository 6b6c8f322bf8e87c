use dioxus::prelude::*;

use crate::components::ProductShowcase;
use crate::i18n::use_locale;

#[cfg(debug_assertions)]
fn log_home_render(locale: crate::core::Locale) {
    // Lightweight render trace for diagnosing i18n refresh issues.
    tracing::debug!(%locale, "home render");
}

#[component]
pub fn Home() -> Element {
    // Subscribe to the locale signal so we re-render on change.
    let locale = use_locale();

    #[cfg(debug_assertions)]
    {
        log_home_render(locale);
    }

    rsx! {
        section { class: "page page-home", lang: "{locale}",
            div { class: "hero",
                h1 { class: "hero__title", {crate::t!("home-hero-title")} }
                p { class: "hero__subtitle", {crate::t!("home-hero-subtitle")} }
                a { class: "button button--primary", href: "#showcase",
                    {crate::t!("home-hero-cta")}
                }
            }

            ProductShowcase {}

            section { id: "stores", class: "page-home__story",
                h2 { {crate::t!("story-origin-title")} }
                p { {crate::t!("story-origin-body")} }
            }
        }
    }
}
