use dioxus::prelude::*;

use crate::components::render_value;
use crate::core::RenderValue;
use crate::i18n::use_locale;

fn story_section(title: String, body: String) -> RenderValue<Element> {
    RenderValue::Node(rsx! {
        article { class: "story__section",
            h2 { "{title}" }
            p { "{body}" }
        }
    })
}

#[component]
pub fn Story() -> Element {
    let locale = use_locale();

    let sections = RenderValue::Sequence(vec![
        story_section(crate::t!("story-origin-title"), crate::t!("story-origin-body")),
        story_section(crate::t!("story-craft-title"), crate::t!("story-craft-body")),
        story_section(
            crate::t!("story-community-title"),
            crate::t!("story-community-body"),
        ),
    ]);

    rsx! {
        section { class: "page page-story", lang: "{locale}",
            h1 { {crate::t!("story-title")} }
            {render_value(sections, "story.sections")}
        }
    }
}
