//! Guarded rendering of dynamic JSON values.

use dioxus::prelude::*;
use serde_json::Value;

use crate::core::render_guard::{extract_display_text, log_unsafe, RenderGuard, RenderValue};

/// Text for a JSON value, passed through the render guard first.
///
/// Records render as their `name`/`title`/`label`; records without one
/// render as `fallback`, or the placeholder when there is none. Diagnostic
/// builds additionally log them.
#[component]
pub fn SafeText(value: Value, context: String, fallback: Option<String>) -> Element {
    let text = RenderGuard::default().text::<VNode>(
        RenderValue::from(value),
        &context,
        fallback.as_deref(),
    );
    rsx! { "{text}" }
}

/// Render an arbitrary [`RenderValue`], mapping sequences element-wise.
pub fn render_value(value: RenderValue<Element>, context: &str) -> Element {
    match RenderGuard::default().guard(value, context, log_unsafe) {
        RenderValue::Node(node) => node,
        RenderValue::Sequence(items) => rsx! {
            for item in items {
                {render_value(item, context)}
            }
        },
        other => {
            let text = extract_display_text(Some(&other), None);
            rsx! { "{text}" }
        }
    }
}
