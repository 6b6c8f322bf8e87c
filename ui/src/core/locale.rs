//! The visitor's display language.
//!
//! [`LocalePreference`] owns the selected [`Locale`] for one browsing
//! session. It is resolved lazily on first read:
//!
//! 1. a valid value persisted under [`STORAGE_KEY`] wins;
//! 2. otherwise the ambient language tag (`navigator.language`) picks the
//!    first supported locale it starts with;
//! 3. otherwise [`DEFAULT_LOCALE`].
//!
//! A locale chosen by steps 2 or 3 is written back immediately. Explicit
//! changes are persisted and then broadcast synchronously to every
//! subscriber before [`LocalePreference::change`] returns.
//!
//! The handle is `Rc`-based and meant for the single UI thread; clones share
//! state and subscribers.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;

use super::platform::AmbientLanguage;
use super::storage::{PreferenceStore, StorageError};

/// Storage key holding the persisted locale tag.
pub const STORAGE_KEY: &str = "stride.locale";

/// Locale used when neither storage nor the environment yields one.
pub const DEFAULT_LOCALE: Locale = Locale::Zh;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Zh,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Zh, Locale::En];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
        }
    }

    /// Exact match against a supported tag, as persisted or requested.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|locale| locale.as_str() == tag)
    }

    /// Supported locale an environment language tag starts with
    /// (`"zh-CN"` -> `Zh`, `"en-US"` -> `En`).
    pub fn detect(language_tag: &str) -> Option<Self> {
        let tag = language_tag.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|locale| tag.starts_with(locale.as_str()))
    }

    pub fn langid(self) -> LanguageIdentifier {
        self.as_str().parse().unwrap_or_default()
    }

    /// Name shown in the language switcher.
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::Zh => "中文",
            Self::En => "English",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| LocaleError::Unsupported(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    #[error("unsupported locale `{0}`")]
    Unsupported(String),
}

/// Precomputed `(locale, key) -> text` data.
pub trait TranslationTable {
    fn lookup(&self, locale: Locale, key: &str) -> Option<String>;
}

impl TranslationTable for HashMap<(Locale, String), String> {
    fn lookup(&self, locale: Locale, key: &str) -> Option<String> {
        self.get(&(locale, key.to_string())).cloned()
    }
}

impl<T: TranslationTable + ?Sized> TranslationTable for Rc<T> {
    fn lookup(&self, locale: Locale, key: &str) -> Option<String> {
        (**self).lookup(locale, key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Uninitialized,
    Ready(Locale),
}

struct Subscriber {
    active: Cell<bool>,
    handler: Box<dyn Fn(Locale)>,
}

type Registry = RefCell<Vec<Rc<Subscriber>>>;

struct Inner {
    state: Cell<State>,
    store: Box<dyn PreferenceStore>,
    persistent: Cell<bool>,
    ambient: Box<dyn AmbientLanguage>,
    table: Rc<dyn TranslationTable>,
    subscribers: Rc<Registry>,
}

/// Session-scoped locale selection with persistence and change broadcast.
#[derive(Clone)]
pub struct LocalePreference {
    inner: Rc<Inner>,
}

impl fmt::Debug for LocalePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalePreference")
            .field("state", &self.inner.state.get())
            .field("persistent", &self.inner.persistent.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl LocalePreference {
    pub fn new(
        store: impl PreferenceStore + 'static,
        ambient: impl AmbientLanguage + 'static,
        table: Rc<dyn TranslationTable>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: Cell::new(State::Uninitialized),
                store: Box::new(store),
                persistent: Cell::new(true),
                ambient: Box::new(ambient),
                table,
                subscribers: Rc::default(),
            }),
        }
    }

    pub fn supported(&self) -> &'static [Locale] {
        &Locale::ALL
    }

    /// Resolve the locale once; later calls return the held value.
    pub fn initialize(&self) -> Locale {
        if let State::Ready(locale) = self.inner.state.get() {
            return locale;
        }

        let persisted = self.read_persisted();
        let locale = match persisted.as_deref().and_then(Locale::from_tag) {
            Some(locale) => locale,
            None => {
                let ambient = self.inner.ambient.language_tag();
                let locale = ambient
                    .as_deref()
                    .and_then(Locale::detect)
                    .unwrap_or(DEFAULT_LOCALE);
                debug!(?persisted, ?ambient, %locale, "locale resolved without a stored preference");
                self.persist(locale);
                locale
            }
        };

        self.inner.state.set(State::Ready(locale));
        locale
    }

    pub fn current(&self) -> Locale {
        match self.inner.state.get() {
            State::Ready(locale) => locale,
            State::Uninitialized => self.initialize(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.inner.state.get(), State::Ready(_))
    }

    /// Switch to the locale tagged `tag`.
    ///
    /// Unsupported tags are logged and ignored: nothing is stored and no
    /// subscriber is called. The error is informational only.
    pub fn change(&self, tag: &str) -> Result<(), LocaleError> {
        match tag.parse::<Locale>() {
            Ok(locale) => {
                self.set(locale);
                Ok(())
            }
            Err(err) => {
                warn!(locale = tag, "ignoring request for unsupported locale");
                Err(err)
            }
        }
    }

    /// Store `locale`, persist it and notify every subscriber in line.
    pub fn set(&self, locale: Locale) {
        self.inner.state.set(State::Ready(locale));
        self.persist(locale);
        self.notify(locale);
    }

    /// Register `handler` for every future change.
    pub fn subscribe(&self, handler: impl Fn(Locale) + 'static) -> Subscription {
        let entry = Rc::new(Subscriber {
            active: Cell::new(true),
            handler: Box::new(handler),
        });
        self.inner.subscribers.borrow_mut().push(Rc::clone(&entry));
        Subscription {
            entry: Rc::downgrade(&entry),
            registry: Rc::downgrade(&self.inner.subscribers),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    /// Text for `key` in the current locale, else `fallback`, else `key`.
    pub fn translate(&self, key: &str, fallback: Option<&str>) -> String {
        self.inner
            .table
            .lookup(self.current(), key)
            .unwrap_or_else(|| fallback.unwrap_or(key).to_string())
    }

    /// Whether changes still reach persistent storage this session.
    pub fn is_persistent(&self) -> bool {
        self.inner.persistent.get()
    }

    fn notify(&self, locale: Locale) {
        // Snapshot so handlers may subscribe or unsubscribe while running.
        let subscribers: Vec<Rc<Subscriber>> = self.inner.subscribers.borrow().clone();
        for subscriber in subscribers {
            // A handler changed the locale again; its own broadcast already
            // reached everyone with the newer value.
            if self.inner.state.get() != State::Ready(locale) {
                break;
            }
            if subscriber.active.get() {
                (subscriber.handler)(locale);
            }
        }
    }

    fn read_persisted(&self) -> Option<String> {
        if !self.inner.persistent.get() {
            return None;
        }
        match self.inner.store.get(STORAGE_KEY) {
            Ok(value) => value,
            Err(err) => {
                self.storage_failed(err);
                None
            }
        }
    }

    fn persist(&self, locale: Locale) {
        if !self.inner.persistent.get() {
            return;
        }
        if let Err(err) = self.inner.store.set(STORAGE_KEY, locale.as_str()) {
            self.storage_failed(err);
        }
    }

    fn storage_failed(&self, err: StorageError) {
        if self.inner.persistent.replace(false) {
            warn!(error = %err, "locale storage unavailable; keeping the preference in memory");
        }
    }
}

/// Handle returned by [`LocalePreference::subscribe`].
///
/// Dropping it does nothing; call [`Subscription::unsubscribe`].
#[derive(Clone)]
pub struct Subscription {
    entry: Weak<Subscriber>,
    registry: Weak<Registry>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

impl Subscription {
    /// Remove the handler. Safe to call more than once, and from inside a
    /// broadcast: the handler is skipped for the rest of it.
    pub fn unsubscribe(&self) {
        let Some(entry) = self.entry.upgrade() else {
            return;
        };
        entry.active.set(false);
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .retain(|subscriber| !Rc::ptr_eq(subscriber, &entry));
        }
    }

    pub fn is_active(&self) -> bool {
        self.entry
            .upgrade()
            .is_some_and(|entry| entry.active.get())
    }
}
