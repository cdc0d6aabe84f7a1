use chat_markdown_config::Config;
use dioxus::prelude::*;

use super::components::{AppliedPanel, ChatMarkdown, LoadError};
use super::services::Services;

const APP_CSS: &str = include_str!("assets/chat-markdown.css");

/// Where the initial editor content came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Loaded(String),
    Failed { path: String, message: String },
}

#[component]
pub fn App(config: Config, document: Document) -> Element {
    let applied = use_signal(Vec::new);
    use_context_provider(|| Services {
        config: config.clone(),
        applied,
    });

    let initial = match &document {
        Document::Loaded(text) => text.clone(),
        Document::Failed { .. } => String::new(),
    };
    let mut source = use_signal(|| initial);

    rsx! {
        style { {APP_CSS} }
        div {
            class: "app-container",
            div {
                class: "editor-pane",
                if let Document::Failed { path, message } = document {
                    LoadError { path, message }
                }
                textarea {
                    class: "markdown-input",
                    value: "{source}",
                    oninput: move |evt: FormEvent| source.set(evt.value()),
                }
            }
            div {
                class: "preview-pane",
                ChatMarkdown { source: source() }
            }
            AppliedPanel { requests: applied() }
        }
    }
}
