use dioxus::prelude::*;

use ui::components::site_navbar::{register_nav, NavBuilder};
use ui::components::{SiteFooter, SiteNavbar};
use ui::i18n;
use ui::views::{Home, Story};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebLayout)]
    #[route("/")]
    Home {},
    #[route("/story")]
    Story {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn nav_link(href: &str, label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: href.to_string(),
        "{label}"
    })
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // Locale preference + reactive locale signal for every page below.
    let prefs = i18n::use_locale_provider();
    let locale = i18n::use_locale();

    // Register router-aware menu links
    register_nav(NavBuilder { link: nav_link });

    tracing::debug!(%locale, persistent = prefs.is_persistent(), "app render");

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        // Keyed wrapper forces a full remount on locale change.
        div {
            key: "{locale}",
            lang: "{locale}",
            Router::<Route> {}
        }
    }
}

/// Shared header and footer around every routed page.
#[component]
fn WebLayout() -> Element {
    rsx! {
        SiteNavbar {}
        main { class: "page-container",
            Outlet::<Route> {}
        }
        SiteFooter {}
    }
}
