//! Internationalization (i18n) support for `stride-ui`.
//!
//! This module wires together:
//! - `fluent` (message formatting)
//! - `rust-embed` (compile-time embedding of `.ftl` files)
//! - [`LocalePreference`] (which locale is active, persisted per visitor)
//!
//! Folder layout (relative to this crate root):
//! ```text
//! i18n/
//!   zh/stride-ui.ftl   (default locale)
//!   en/stride-ui.ftl
//! ```
//!
//! Usage in a component (below a `use_locale_provider()` call in the app root):
//! ```ignore
//! use crate::t;
//! let _locale = use_locale(); // re-render on change
//! let home_label = t!("nav-home");
//! ```
//!
//! To add a new locale:
//! 1. Add a variant to `core::locale::Locale`.
//! 2. Copy `zh/stride-ui.ftl` to `i18n/<tag>/stride-ui.ftl` and translate
//!    each message value (keep IDs identical).
//! 3. Run the tests; `tests/translations.rs` lists any message the new
//!    locale is missing.
//!
//! NOTE: Lookups never fall back across locales. A key missing from the
//! active locale resolves to the caller's fallback (or the key itself).
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::rc::Rc;

use dioxus::prelude::*;
use fluent::{FluentBundle, FluentResource};
use rust_embed::Embed;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::locale::{Locale, LocalePreference, TranslationTable, DEFAULT_LOCALE};
use crate::core::platform::{self, Platform, SystemLanguage};

/// Translate a message ID through the active [`LocalePreference`].
/// Examples:
///     t!("nav-home")
///     t!("showcase-price", "Price")
///
/// Expands to [`tr`] / [`tr_or`]; keep the first argument a string literal
/// so the completeness test can find it.
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::tr($key)
    };
    ($key:literal, $fallback:expr) => {
        $crate::i18n::tr_or($key, $fallback)
    };
}

/// Fluent "domain" (matches the crate and the per-locale FTL filename).
pub const DOMAIN: &str = "stride-ui";

/// Embed all locale folders under `i18n/`.
#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no translation file for `{0}`")]
    Missing(Locale),
    #[error("translation file for `{0}` is not valid UTF-8")]
    Encoding(Locale),
    #[error("translation file for `{locale}` has {count} syntax error(s)")]
    Syntax { locale: Locale, count: usize },
    #[error("translation file for `{locale}` defines {count} message(s) twice")]
    Duplicate { locale: Locale, count: usize },
}

/// Fluent bundles for every locale that loaded cleanly.
pub struct FluentCatalog {
    bundles: HashMap<Locale, FluentBundle<FluentResource>>,
    ids: HashMap<Locale, BTreeSet<String>>,
}

impl fmt::Debug for FluentCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FluentCatalog")
            .field("locales", &self.locales())
            .finish()
    }
}

impl FluentCatalog {
    /// Load every supported locale from the embedded `.ftl` files. A locale
    /// that fails to load is logged and left out.
    pub fn embedded() -> Self {
        let mut catalog = Self::empty();
        for locale in Locale::ALL {
            if let Err(err) = embedded_source(locale).and_then(|source| catalog.insert(locale, source)) {
                warn!(error = %err, "skipping locale");
            }
        }
        for locale in catalog.locales() {
            let missing = catalog.missing_messages(locale);
            if !missing.is_empty() {
                warn!(%locale, ?missing, "locale lacks messages of the default locale");
            }
        }
        catalog
    }

    /// Build a catalog from in-memory FTL sources.
    pub fn from_sources<'a>(
        sources: impl IntoIterator<Item = (Locale, &'a str)>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::empty();
        for (locale, source) in sources {
            catalog.insert(locale, source.to_string())?;
        }
        Ok(catalog)
    }

    fn empty() -> Self {
        Self {
            bundles: HashMap::new(),
            ids: HashMap::new(),
        }
    }

    fn insert(&mut self, locale: Locale, source: String) -> Result<(), CatalogError> {
        let ids = message_ids(&source);
        self.bundles.insert(locale, bundle(locale, source)?);
        self.ids.insert(locale, ids);
        Ok(())
    }

    pub fn locales(&self) -> Vec<Locale> {
        let mut locales: Vec<Locale> = self.bundles.keys().copied().collect();
        locales.sort_by_key(|l| l.as_str());
        locales
    }

    /// IDs of the messages `locale` defines (empty when it is not loaded).
    pub fn message_ids(&self, locale: Locale) -> BTreeSet<String> {
        self.ids.get(&locale).cloned().unwrap_or_default()
    }

    /// Messages of [`DEFAULT_LOCALE`] that `locale` cannot resolve.
    pub fn missing_messages(&self, locale: Locale) -> Vec<String> {
        self.message_ids(DEFAULT_LOCALE)
            .into_iter()
            .filter(|id| self.lookup(locale, id).is_none())
            .collect()
    }
}

impl TranslationTable for FluentCatalog {
    fn lookup(&self, locale: Locale, key: &str) -> Option<String> {
        let bundle = self.bundles.get(&locale)?;
        let pattern = bundle.get_message(key)?.value()?;
        let mut errors = Vec::new();
        let value = bundle.format_pattern(pattern, None, &mut errors);
        if errors.is_empty() {
            Some(value.into_owned())
        } else {
            debug!(%locale, key, ?errors, "message failed to format");
            None
        }
    }
}

/// Raw FTL text embedded for `locale`.
pub fn embedded_source(locale: Locale) -> Result<String, CatalogError> {
    let file = Localizations::get(&format!("{locale}/{DOMAIN}.ftl"))
        .ok_or(CatalogError::Missing(locale))?;
    String::from_utf8(file.data.into_owned()).map_err(|_| CatalogError::Encoding(locale))
}

/// Message entries start in column 0 with an identifier; terms (`-id`),
/// comments and indented attribute or continuation lines are skipped.
fn message_ids(source: &str) -> BTreeSet<String> {
    source
        .lines()
        .filter(|line| line.starts_with(|c: char| c.is_ascii_alphabetic()))
        .filter_map(|line| line.split_once('='))
        .map(|(id, _)| id.trim_end())
        .filter(|id| {
            id.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        })
        .map(str::to_string)
        .collect()
}

fn bundle(locale: Locale, source: String) -> Result<FluentBundle<FluentResource>, CatalogError> {
    let resource = FluentResource::try_new(source).map_err(|(_, errors)| CatalogError::Syntax {
        locale,
        count: errors.len(),
    })?;
    let mut bundle = FluentBundle::new(vec![locale.langid()]);
    bundle.set_use_isolating(false);
    bundle
        .add_resource(resource)
        .map_err(|errors| CatalogError::Duplicate {
            locale,
            count: errors.len(),
        })?;
    Ok(bundle)
}

thread_local! {
    static CATALOG: Rc<FluentCatalog> = Rc::new(FluentCatalog::embedded());
}

/// Shared embedded catalog (built on first use, per thread).
pub fn catalog() -> Rc<FluentCatalog> {
    CATALOG.with(Rc::clone)
}

/// The site's locale preference: platform storage, platform language, and
/// the embedded catalog.
pub fn preference() -> LocalePreference {
    debug!(platform = ?Platform::current(), "creating locale preference");
    let table: Rc<dyn TranslationTable> = catalog();
    LocalePreference::new(platform::default_store(), SystemLanguage, table)
}

/// Translate `key` with the [`LocalePreference`] from context.
///
/// Outside a component tree (or before a provider exists) the default
/// locale's catalog answers.
pub fn tr(key: &str) -> String {
    lookup(key, None)
}

/// Like [`tr`], with an explicit fallback for missing keys.
pub fn tr_or(key: &str, fallback: &str) -> String {
    lookup(key, Some(fallback))
}

fn lookup(key: &str, fallback: Option<&str>) -> String {
    lookup_in(try_consume_context::<LocalePreference>(), key, fallback)
}

fn lookup_in(prefs: Option<LocalePreference>, key: &str, fallback: Option<&str>) -> String {
    match prefs {
        Some(prefs) => prefs.translate(key, fallback),
        None => catalog()
            .lookup(DEFAULT_LOCALE, key)
            .unwrap_or_else(|| fallback.unwrap_or(key).to_string()),
    }
}

/// Install the app-wide [`LocalePreference`] and a `Signal<Locale>` that
/// mirrors it, so components re-render when the locale changes.
///
/// Call once, at the top of the root component.
pub fn use_locale_provider() -> LocalePreference {
    let prefs = use_context_provider(preference);
    let locale = use_context_provider(|| Signal::new(prefs.current()));

    let subscription = use_hook(|| {
        prefs.subscribe(move |next| {
            let mut locale = locale;
            locale.set(next);
        })
    });
    use_drop(move || subscription.unsubscribe());

    prefs
}

/// Current locale, subscribing the calling component to changes.
pub fn use_locale() -> Locale {
    let signal: Option<Signal<Locale>> = try_use_context::<Signal<Locale>>();
    signal.map(|s| s()).unwrap_or(DEFAULT_LOCALE)
}
