//! Host-side implementations of the code-block collaborators.

use chat_markdown_config::Config;
use chat_markdown_engine::{
    Applier, ApplyRequest, Clipboard, ClipboardError, CopyFeedback, FeedbackCell,
};
use dioxus::prelude::*;

/// Shared state handed to every rendered block through context.
#[derive(Clone, PartialEq)]
pub struct Services {
    pub config: Config,
    /// Requests received by the apply action, oldest first.
    pub applied: Signal<Vec<ApplyRequest>>,
}

/// Writes to the system clipboard through the webview.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebviewClipboard;

const WRITE_CLIPBOARD_JS: &str = r#"
const text = await dioxus.recv();
try {
    await navigator.clipboard.writeText(text);
    dioxus.send(null);
} catch (e) {
    dioxus.send(String(e));
}
"#;

impl Clipboard for WebviewClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut eval = document::eval(WRITE_CLIPBOARD_JS);
        eval.send(text)
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        match eval.recv::<Option<String>>().await {
            Ok(None) => Ok(()),
            Ok(Some(reason)) => Err(ClipboardError::Rejected(reason)),
            Err(e) => Err(ClipboardError::Unavailable(e.to_string())),
        }
    }
}

/// Copy feedback stored in a component signal.
#[derive(Clone, Copy)]
pub struct SignalCell(pub Signal<CopyFeedback>);

impl FeedbackCell for SignalCell {
    fn get(&self) -> CopyFeedback {
        *self.0.peek()
    }

    fn set(&mut self, feedback: CopyFeedback) {
        self.0.set(feedback);
    }
}

/// Appends apply requests to the applied-requests signal.
#[derive(Clone, Copy)]
pub struct SignalApplier(pub Signal<Vec<ApplyRequest>>);

impl Applier for SignalApplier {
    fn start_applying(&self, request: ApplyRequest) {
        let mut applied = self.0;
        applied.write().push(request);
    }
}
