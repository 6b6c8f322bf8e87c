//! Shared UI crate for the Stride site. Render safety, locale handling and
//! every page section live here; platform crates only add routing.

pub mod core;
pub mod i18n;
pub mod views;

pub mod components {
    // Header with menu links and the locale switcher (components/site_navbar.rs)
    pub mod site_navbar;
    pub use site_navbar::register_nav;
    pub use site_navbar::NavBuilder;
    pub use site_navbar::SiteNavbar;

    mod site_footer;
    pub use site_footer::SiteFooter;

    pub mod product_showcase;
    pub use product_showcase::ProductShowcase;

    mod safe_text;
    pub use safe_text::{render_value, SafeText};
}

#[cfg(test)]
mod tests {
    mod i18n_completeness;
}
