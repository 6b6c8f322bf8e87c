//! Locale preference scenarios: persistence, detection, broadcast.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use ui::core::locale::{Locale, LocaleError, LocalePreference, TranslationTable, STORAGE_KEY};
use ui::core::platform::{AmbientLanguage, FixedLanguage};
use ui::core::storage::{MemoryStore, PreferenceStore, StorageError};

/// Ambient source that counts how often it is consulted.
struct CountingLanguage {
    tag: Option<String>,
    reads: Rc<Cell<u32>>,
}

impl AmbientLanguage for CountingLanguage {
    fn language_tag(&self) -> Option<String> {
        self.reads.set(self.reads.get() + 1);
        self.tag.clone()
    }
}

/// Store whose backend is gone.
struct BrokenStore {
    writes: Rc<Cell<u32>>,
}

impl PreferenceStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("quota exceeded".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        self.writes.set(self.writes.get() + 1);
        Err(StorageError::Unavailable("quota exceeded".into()))
    }
}

fn table() -> Rc<dyn TranslationTable> {
    let mut table: HashMap<(Locale, String), String> = HashMap::new();
    table.insert((Locale::En, "nav-home".into()), "Home".into());
    table.insert((Locale::Zh, "nav-home".into()), "首页".into());
    Rc::new(table)
}

#[test]
fn persisted_value_wins_without_consulting_environment() {
    let reads = Rc::new(Cell::new(0));
    let store = Rc::new(MemoryStore::with_entry(STORAGE_KEY, "en"));
    let prefs = LocalePreference::new(
        Rc::clone(&store),
        CountingLanguage {
            tag: Some("zh-CN".into()),
            reads: Rc::clone(&reads),
        },
        table(),
    );

    assert_eq!(prefs.initialize(), Locale::En);
    assert_eq!(reads.get(), 0);
}

#[test]
fn detected_locale_is_persisted() {
    let store = Rc::new(MemoryStore::new());
    let prefs = LocalePreference::new(Rc::clone(&store), FixedLanguage::new("zh-CN"), table());

    assert_eq!(prefs.initialize(), Locale::Zh);
    assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some("zh"));
}

#[test]
fn initialize_is_idempotent() {
    let reads = Rc::new(Cell::new(0));
    let prefs = LocalePreference::new(
        MemoryStore::new(),
        CountingLanguage {
            tag: Some("en-US".into()),
            reads: Rc::clone(&reads),
        },
        table(),
    );

    let first = prefs.initialize();
    let second = prefs.initialize();
    assert_eq!(first, second);
    assert_eq!(prefs.current(), first);
    assert_eq!(reads.get(), 1);
}

#[test]
fn current_initializes_lazily() {
    let prefs = LocalePreference::new(MemoryStore::new(), FixedLanguage::new("en-AU"), table());
    assert!(!prefs.is_initialized());
    assert_eq!(prefs.current(), Locale::En);
    assert!(prefs.is_initialized());
}

#[test]
fn unsupported_change_is_a_silent_no_op() {
    let store = Rc::new(MemoryStore::new());
    let prefs = LocalePreference::new(Rc::clone(&store), FixedLanguage::new("en-US"), table());
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let _sub = prefs.subscribe(move |_| counter.set(counter.get() + 1));

    let before = prefs.current();
    assert_eq!(prefs.change("fr"), Err(LocaleError::Unsupported("fr".into())));
    assert_eq!(prefs.current(), before);
    assert_eq!(calls.get(), 0);
    assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some("en"));
}

#[test]
fn unsubscribed_handler_misses_change_others_see_it_once() {
    let prefs = LocalePreference::new(MemoryStore::new(), FixedLanguage::new("zh-CN"), table());

    let gone = Rc::new(RefCell::new(Vec::new()));
    let gone_ref = Rc::clone(&gone);
    let first = prefs.subscribe(move |l| gone_ref.borrow_mut().push(l));

    let kept = Rc::new(RefCell::new(Vec::new()));
    let kept_ref = Rc::clone(&kept);
    let _second = prefs.subscribe(move |l| kept_ref.borrow_mut().push(l));

    first.unsubscribe();
    prefs.change("en").unwrap();

    assert!(gone.borrow().is_empty());
    assert_eq!(*kept.borrow(), vec![Locale::En]);
}

#[test]
fn change_persists_and_notifies_before_returning() {
    let store = Rc::new(MemoryStore::new());
    let prefs = LocalePreference::new(Rc::clone(&store), FixedLanguage::new("zh-CN"), table());
    prefs.initialize();

    let observed = Rc::new(Cell::new(None));
    let observed_ref = Rc::clone(&observed);
    let store_ref = Rc::clone(&store);
    let _sub = prefs.subscribe(move |l| {
        // Storage is already updated when handlers run.
        let stored = store_ref.get(STORAGE_KEY).unwrap();
        observed_ref.set(Some((l, stored == Some(l.as_str().to_string()))));
    });

    prefs.change("en").unwrap();
    assert_eq!(observed.get(), Some((Locale::En, true)));
}

#[test]
fn change_from_inside_a_handler_wins_for_later_subscribers() {
    let prefs = LocalePreference::new(MemoryStore::new(), FixedLanguage::new("zh-CN"), table());
    prefs.initialize();

    let redirect = prefs.clone();
    let _first = prefs.subscribe(move |l| {
        if l == Locale::En {
            redirect.change("zh").unwrap();
        }
    });

    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_ref = Rc::clone(&seen);
    let _second = prefs.subscribe(move |l| seen_ref.borrow_mut().push(l));

    prefs.change("en").unwrap();

    assert_eq!(prefs.current(), Locale::Zh);
    assert_eq!(*seen.borrow(), vec![Locale::Zh]);
    assert_eq!(seen.borrow().last().copied(), Some(prefs.current()));
}

#[test]
fn clones_share_state_and_subscribers() {
    let prefs = LocalePreference::new(MemoryStore::new(), FixedLanguage::new("zh"), table());
    let other = prefs.clone();
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let _sub = prefs.subscribe(move |_| counter.set(counter.get() + 1));

    other.change("en").unwrap();
    assert_eq!(prefs.current(), Locale::En);
    assert_eq!(calls.get(), 1);
}

#[test]
fn broken_storage_degrades_to_memory() {
    let writes = Rc::new(Cell::new(0));
    let prefs = LocalePreference::new(
        BrokenStore {
            writes: Rc::clone(&writes),
        },
        FixedLanguage::new("en-US"),
        table(),
    );

    assert_eq!(prefs.current(), Locale::En);
    assert!(!prefs.is_persistent());
    prefs.change("zh").unwrap();
    assert_eq!(prefs.current(), Locale::Zh);
    // The failed read switched to memory mode; nothing was written.
    assert_eq!(writes.get(), 0);
}

#[test]
fn translate_follows_current_locale() {
    let prefs = LocalePreference::new(MemoryStore::new(), FixedLanguage::new("en-US"), table());
    assert_eq!(prefs.translate("nav-home", None), "Home");
    prefs.change("zh").unwrap();
    assert_eq!(prefs.translate("nav-home", None), "首页");
    assert_eq!(prefs.translate("missing", Some("fallback")), "fallback");
    assert_eq!(prefs.translate("missing", None), "missing");
}
