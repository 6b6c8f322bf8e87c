//! Render-safety guard for dynamic values reaching a text surface.
//!
//! Product data, menu entries and other JSON arriving at runtime may contain
//! nested objects where a component expects text. Rendering such an object
//! directly breaks the page, so every value crossing that boundary is first
//! converted into a [`RenderValue`] and then either checked ([`is_safe`]),
//! reduced to text ([`extract_display_text`]) or replaced by a placeholder
//! ([`RenderGuard::guard`]).
//!
//! Policy
//! ------
//! - Scalars, text, absent values and pre-built nodes are always safe.
//! - A sequence is safe iff every element is safe (an empty one is safe).
//! - A plain record is never safe; it must be reduced to text via its
//!   `name`, `title` or `label` field (in that order).
//! - Nothing here fails: unsafe input degrades to a fallback string.
//!
//! Diagnostics
//! -----------
//! The placeholder substitution in [`RenderGuard::guard`] only runs when
//! diagnostics are enabled (debug builds, or the `render-diagnostics`
//! feature). Release builds pass values through untouched.

use serde_json::{Map, Value};

use super::format::{format_bool, format_number};

/// Text substituted for a record that offers no usable field.
pub const OBJECT_PLACEHOLDER: &str = "[Object]";

/// Record fields consulted by [`extract_display_text`], highest priority first.
pub const DISPLAY_FIELDS: [&str; 3] = ["name", "title", "label"];

/// A value on its way to a rendering surface.
///
/// `N` is the renderable node type of the host (a Dioxus `VNode` in the
/// site); the core never inspects it.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderValue<N> {
    Empty,
    Text(String),
    Number(f64),
    Boolean(bool),
    Node(N),
    Sequence(Vec<RenderValue<N>>),
    PlainRecord(Map<String, Value>),
}

impl<N> RenderValue<N> {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl<N> Default for RenderValue<N> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<N> From<Value> for RenderValue<N> {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::Bool(b) => Self::Boolean(b),
            Value::Number(n) => match n.as_f64() {
                Some(f) => Self::Number(f),
                None => Self::Text(n.to_string()),
            },
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::PlainRecord(map),
        }
    }
}

/// Whether `value` can be handed to a text-rendering surface as is.
pub fn is_safe<N>(value: &RenderValue<N>) -> bool {
    match value {
        RenderValue::Empty
        | RenderValue::Text(_)
        | RenderValue::Number(_)
        | RenderValue::Boolean(_)
        | RenderValue::Node(_) => true,
        RenderValue::Sequence(items) => items.iter().all(is_safe),
        RenderValue::PlainRecord(_) => false,
    }
}

/// Best-effort display text for `value`.
///
/// An absent value yields `fallback` (or `""`). A record yields its first
/// string-valued `name`/`title`/`label` field, else `fallback` (or
/// [`OBJECT_PLACEHOLDER`]). Sequences and nodes are not flattened; callers
/// map those element-wise.
pub fn extract_display_text<N>(value: Option<&RenderValue<N>>, fallback: Option<&str>) -> String {
    let value = match value {
        None | Some(RenderValue::Empty) => return fallback.unwrap_or_default().to_string(),
        Some(value) => value,
    };
    match value {
        RenderValue::Text(text) => text.clone(),
        RenderValue::Number(n) => format_number(*n),
        RenderValue::Boolean(b) => format_bool(*b),
        RenderValue::PlainRecord(fields) => record_display_field(fields)
            .map(str::to_string)
            .unwrap_or_else(|| fallback.unwrap_or(OBJECT_PLACEHOLDER).to_string()),
        RenderValue::Empty | RenderValue::Node(_) | RenderValue::Sequence(_) => {
            fallback.unwrap_or_default().to_string()
        }
    }
}

fn record_display_field(fields: &Map<String, Value>) -> Option<&str> {
    DISPLAY_FIELDS
        .iter()
        .find_map(|field| fields.get(*field).and_then(Value::as_str))
}

/// Paths of every record inside `value`, for diagnostics only.
///
/// The root is `$`; sequence elements append `[index]`. Records are leaves:
/// their fields are not walked.
pub fn unsafe_paths<N>(value: &RenderValue<N>) -> Vec<String> {
    let mut paths = Vec::new();
    collect_unsafe_paths(value, &mut String::from("$"), &mut paths);
    paths
}

fn collect_unsafe_paths<N>(value: &RenderValue<N>, path: &mut String, out: &mut Vec<String>) {
    match value {
        RenderValue::PlainRecord(_) => out.push(path.clone()),
        RenderValue::Sequence(items) => {
            for (index, item) in items.iter().enumerate() {
                let len = path.len();
                path.push_str(&format!("[{index}]"));
                collect_unsafe_paths(item, path, out);
                path.truncate(len);
            }
        }
        _ => {}
    }
}

/// Whether the guard inspects values or lets them through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostics {
    Enabled,
    Disabled,
}

impl Diagnostics {
    /// Enabled in debug builds and whenever `render-diagnostics` is on.
    pub fn from_build() -> Self {
        if cfg!(any(debug_assertions, feature = "render-diagnostics")) {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::from_build()
    }
}

/// Checkpoint placed wherever dynamic data becomes renderable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderGuard {
    pub mode: Diagnostics,
}

impl RenderGuard {
    pub fn new(mode: Diagnostics) -> Self {
        Self { mode }
    }

    /// Returns `value`, or the placeholder text if diagnostics are on and
    /// `value` is unsafe. `on_unsafe` receives `context` and the rejected
    /// value before it is dropped.
    pub fn guard<N, F>(&self, value: RenderValue<N>, context: &str, on_unsafe: F) -> RenderValue<N>
    where
        F: FnOnce(&str, &RenderValue<N>),
    {
        if self.mode == Diagnostics::Disabled || is_safe(&value) {
            return value;
        }
        on_unsafe(context, &value);
        RenderValue::text(OBJECT_PLACEHOLDER)
    }

    /// Display text for `value`, reporting unsafe input through
    /// [`log_unsafe`] when diagnostics are on.
    ///
    /// Records are reduced via their display field first, so only records
    /// without one are reported. The text itself is the same in every mode:
    /// reporting never replaces the caller's `fallback`.
    pub fn text<N>(&self, value: RenderValue<N>, context: &str, fallback: Option<&str>) -> String {
        if let RenderValue::PlainRecord(fields) = &value {
            if let Some(text) = record_display_field(fields) {
                return text.to_string();
            }
        }
        if self.mode == Diagnostics::Enabled && !is_safe(&value) {
            log_unsafe(context, &value);
        }
        extract_display_text(Some(&value), fallback)
    }
}

/// Default diagnostics hook: one `warn!` event per rejected value.
pub fn log_unsafe<N>(context: &str, value: &RenderValue<N>) {
    let fields: Vec<&str> = match value {
        RenderValue::PlainRecord(map) => map.keys().map(String::as_str).collect(),
        _ => Vec::new(),
    };
    tracing::warn!(
        target: "render_guard",
        context,
        paths = ?unsafe_paths(value),
        ?fields,
        "structured value reached a text surface"
    );
}
