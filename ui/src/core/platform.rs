//! Platform glue: where the ambient language and preference storage come from.

use super::storage::PreferenceStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Native,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Native
        }
    }
}

/// Read-only language tag of the hosting environment (e.g. `"en-US"`).
pub trait AmbientLanguage {
    fn language_tag(&self) -> Option<String>;
}

/// `navigator.language` in the browser, the OS locale elsewhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLanguage;

impl AmbientLanguage for SystemLanguage {
    #[cfg(target_arch = "wasm32")]
    fn language_tag(&self) -> Option<String> {
        web_sys::window().and_then(|w| w.navigator().language())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn language_tag(&self) -> Option<String> {
        sys_locale::get_locale()
    }
}

/// A fixed tag, for tests and prerendering.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FixedLanguage(pub Option<String>);

impl FixedLanguage {
    pub fn new(tag: &str) -> Self {
        Self(Some(tag.to_string()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl AmbientLanguage for FixedLanguage {
    fn language_tag(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Persistent store for the current platform, or a session-only one when
/// the platform store cannot be opened.
pub fn default_store() -> Box<dyn PreferenceStore> {
    #[cfg(target_arch = "wasm32")]
    {
        Box::new(super::storage::BrowserStore)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        match super::storage::FileStore::in_project_dirs() {
            Ok(store) => Box::new(store),
            Err(err) => {
                tracing::warn!(error = %err, "preference file unavailable; keeping preferences in memory");
                Box::new(super::storage::MemoryStore::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_language_reports_its_tag() {
        assert_eq!(FixedLanguage::new("zh-CN").language_tag().as_deref(), Some("zh-CN"));
        assert_eq!(FixedLanguage::none().language_tag(), None);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_tests_run_on_native_platform() {
        assert_eq!(Platform::current(), Platform::Native);
    }
}
