use dioxus::prelude::*;

use crate::i18n::use_locale;

#[component]
pub fn SiteFooter() -> Element {
    let _locale = use_locale();

    rsx! {
        footer { class: "footer",
            p { class: "footer__rights", {crate::t!("footer-rights")} }
        }
    }
}
