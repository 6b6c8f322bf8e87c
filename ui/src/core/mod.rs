//! Platform-agnostic core: render safety, locale preference and their
//! storage/environment collaborators. Nothing here depends on Dioxus.

pub mod format;
pub mod locale;
pub mod platform;
pub mod render_guard;
pub mod storage;

pub use locale::{Locale, LocaleError, LocalePreference, Subscription, TranslationTable};
pub use render_guard::{Diagnostics, RenderGuard, RenderValue};
