use dioxus::prelude::*;

use super::NodeView;
use crate::ui::services::Services;

/// Lexes and renders a markdown string with the configured renderer.
#[component]
pub fn ChatMarkdown(source: String, #[props(default)] nested: bool) -> Element {
    let services = use_context::<Services>();
    let node = services.config.renderer().render(&source, nested);

    rsx! {
        div {
            class: "chat-markdown",
            NodeView { node }
        }
    }
}
