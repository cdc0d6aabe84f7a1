use dioxus::prelude::*;

/// Visible placeholder for content the renderer has no element for.
#[component]
pub fn UnknownToken(kind: String, raw: String) -> Element {
    rsx! {
        div {
            class: "unknown-token",
            span {
                class: "unknown-token-label",
                "Unknown type: {kind}"
            }
            "{raw}"
        }
    }
}
