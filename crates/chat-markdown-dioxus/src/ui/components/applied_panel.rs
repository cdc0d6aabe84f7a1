use chat_markdown_engine::ApplyRequest;
use dioxus::prelude::*;

/// Lists the requests forwarded by code-block apply buttons.
#[component]
pub fn AppliedPanel(requests: Vec<ApplyRequest>) -> Element {
    rsx! {
        div {
            class: "applied-panel",
            h2 { "Applied" }
            if requests.is_empty() {
                p { class: "applied-empty", "Nothing applied yet" }
            }
            for request in requests.into_iter().rev() {
                div {
                    class: "applied-request",
                    span { class: "applied-source", "{request.source_label}" }
                    pre { "{request.text}" }
                }
            }
        }
    }
}
