use chat_markdown_engine::{CodeBlockController, CodeBlockNode, CopyFeedback, TokioTimer};
use dioxus::prelude::*;

use crate::ui::services::{Services, SignalApplier, SignalCell, WebviewClipboard};

/// A code block with copy and apply buttons.
///
/// Each instance keeps its own copy feedback, so identical blocks on the
/// same page do not share button state.
#[component]
pub fn CodeBlock(block: CodeBlockNode) -> Element {
    let services = use_context::<Services>();
    let feedback = use_signal(CopyFeedback::default);

    let controller = CodeBlockController::for_block(&block, services.config.actions.clone());
    let copy_controller = controller.clone();
    let applier = SignalApplier(services.applied);

    let state = feedback.read().state();
    let label = state.label();
    let layout = if block.is_single_line() {
        "code-block single-line"
    } else {
        "code-block"
    };
    let copy_class = if state.is_idle() {
        "copy-button"
    } else {
        "copy-button active"
    };

    rsx! {
        div {
            class: "{layout}",
            pre {
                code { "{block.code}" }
            }
            div {
                class: "code-actions",
                button {
                    class: "{copy_class}",
                    onclick: move |_| {
                        let controller = copy_controller.clone();
                        let mut cell = SignalCell(feedback);
                        spawn(async move {
                            controller.copy(&WebviewClipboard, &TokioTimer, &mut cell).await;
                        });
                    },
                    "{label}"
                }
                button {
                    class: "apply-button",
                    onclick: move |_| controller.apply(&applier),
                    "Apply"
                }
            }
        }
    }
}
