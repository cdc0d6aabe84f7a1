//! Copy and apply actions attached to rendered code blocks.
//!
//! Each displayed code block owns one [`CodeBlockController`]. The
//! controller holds no UI state itself: the host keeps a [`CopyFeedback`]
//! value wherever its framework keeps component state and hands it in
//! through [`FeedbackCell`]. Clipboard, timer and apply services are
//! injected so hosts and tests can substitute their own.

use std::future::Future;
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rendering::CodeBlockNode;

pub const DEFAULT_COPY_FEEDBACK_MS: u64 = 1000;
pub const DEFAULT_APPLY_SOURCE_LABEL: &str = "Ctrl+L";

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}

/// Asynchronous clipboard writer.
pub trait Clipboard {
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>>;
}

/// Source of delays for the copy feedback.
pub trait Timer {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// [`Timer`] backed by the tokio clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

impl Timer for TokioTimer {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        tokio::time::sleep(duration)
    }
}

/// What gets forwarded when a code block's apply action is triggered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyRequest {
    pub source_label: String,
    pub text: String,
}

/// Receiver of apply requests. Fire-and-forget: nothing is reported back.
pub trait Applier {
    fn start_applying(&self, request: ApplyRequest);
}

impl<F> Applier for F
where
    F: Fn(ApplyRequest),
{
    fn start_applying(&self, request: ApplyRequest) {
        self(request)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionSettings {
    /// How long the copied/failed feedback stays visible.
    pub copy_feedback_ms: u64,
    /// Label attached to every apply request.
    pub apply_source_label: String,
}

impl Default for ActionSettings {
    fn default() -> Self {
        Self {
            copy_feedback_ms: DEFAULT_COPY_FEEDBACK_MS,
            apply_source_label: DEFAULT_APPLY_SOURCE_LABEL.to_string(),
        }
    }
}

impl ActionSettings {
    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }
}

/// Visible state of a code block's copy button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyState {
    #[default]
    Idle,
    Confirmed,
    Failed,
}

impl CopyState {
    pub fn label(&self) -> &'static str {
        match self {
            CopyState::Idle => "Copy",
            CopyState::Confirmed => "Copied!",
            CopyState::Failed => "Could not copy",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, CopyState::Idle)
    }
}

/// Copy state plus the generation of the feedback currently shown.
///
/// Every entry into a non-idle state starts a new generation; a scheduled
/// reversion only applies to the generation it was scheduled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CopyFeedback {
    state: CopyState,
    generation: u64,
}

impl CopyFeedback {
    pub fn state(&self) -> CopyState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Show `state` and return the generation its reversion must match.
    pub fn enter(&mut self, state: CopyState) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.state = state;
        self.generation
    }

    /// Return to idle if `generation` is still the one on display.
    /// Returns whether anything changed.
    pub fn revert(&mut self, generation: u64) -> bool {
        if self.generation != generation || self.state.is_idle() {
            return false;
        }
        self.state = CopyState::Idle;
        true
    }
}

/// Host-owned storage for a code block's [`CopyFeedback`].
pub trait FeedbackCell {
    fn get(&self) -> CopyFeedback;
    fn set(&mut self, feedback: CopyFeedback);
}

impl FeedbackCell for CopyFeedback {
    fn get(&self) -> CopyFeedback {
        *self
    }

    fn set(&mut self, feedback: CopyFeedback) {
        *self = feedback;
    }
}

/// Copy/apply behaviour for one displayed code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlockController {
    code: String,
    settings: ActionSettings,
}

impl CodeBlockController {
    pub fn new(code: impl Into<String>, settings: ActionSettings) -> Self {
        Self {
            code: code.into(),
            settings,
        }
    }

    pub fn for_block(block: &CodeBlockNode, settings: ActionSettings) -> Self {
        Self::new(block.code.as_str(), settings)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn settings(&self) -> &ActionSettings {
        &self.settings
    }

    /// Write the code to the clipboard and show the outcome until the
    /// feedback delay has passed.
    ///
    /// Clipboard failures never propagate; they show as [`CopyState::Failed`].
    /// Returns the state that was entered.
    pub async fn copy(
        &self,
        clipboard: &impl Clipboard,
        timer: &impl Timer,
        cell: &mut impl FeedbackCell,
    ) -> CopyState {
        let state = match clipboard.write_text(&self.code).await {
            Ok(()) => CopyState::Confirmed,
            Err(e) => {
                warn!("Failed to copy code block to clipboard: {e}");
                CopyState::Failed
            }
        };

        let mut feedback = cell.get();
        let generation = feedback.enter(state);
        cell.set(feedback);

        timer.sleep(self.settings.copy_feedback()).await;

        let mut feedback = cell.get();
        if feedback.revert(generation) {
            cell.set(feedback);
        }
        state
    }

    /// Forward the code, unmodified, to the apply service.
    pub fn apply(&self, applier: &impl Applier) {
        info!(
            "Forwarding {} bytes of code to apply ({})",
            self.code.len(),
            self.settings.apply_source_label
        );
        applier.start_applying(ApplyRequest {
            source_label: self.settings.apply_source_label.clone(),
            text: self.code.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Feedback cell that records every state it is set to.
    #[derive(Clone, Default)]
    struct RecordingCell {
        current: Rc<Cell<CopyFeedback>>,
        history: Rc<RefCell<Vec<CopyState>>>,
    }

    impl RecordingCell {
        fn state(&self) -> CopyState {
            self.current.get().state()
        }

        fn history(&self) -> Vec<CopyState> {
            self.history.borrow().clone()
        }
    }

    impl FeedbackCell for RecordingCell {
        fn get(&self) -> CopyFeedback {
            self.current.get()
        }

        fn set(&mut self, feedback: CopyFeedback) {
            self.current.set(feedback);
            self.history.borrow_mut().push(feedback.state());
        }
    }

    #[derive(Default)]
    struct FakeClipboard {
        fail: bool,
        written: RefCell<Vec<String>>,
    }

    impl FakeClipboard {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }
    }

    impl Clipboard for FakeClipboard {
        async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            self.written.borrow_mut().push(text.to_string());
            if self.fail {
                Err(ClipboardError::Rejected("permission denied".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn controller(code: &str) -> CodeBlockController {
        CodeBlockController::new(code, ActionSettings::default())
    }

    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[test]
    fn labels_match_each_state() {
        assert_eq!(CopyState::Idle.label(), "Copy");
        assert_eq!(CopyState::Confirmed.label(), "Copied!");
        assert_eq!(CopyState::Failed.label(), "Could not copy");
    }

    #[test]
    fn stale_reversion_is_a_no_op() {
        let mut feedback = CopyFeedback::default();
        let first = feedback.enter(CopyState::Confirmed);
        let second = feedback.enter(CopyState::Failed);

        assert!(!feedback.revert(first));
        assert_eq!(feedback.state(), CopyState::Failed);
        assert!(feedback.revert(second));
        assert_eq!(feedback.state(), CopyState::Idle);
        assert!(!feedback.revert(second));
    }

    #[tokio::test(start_paused = true)]
    async fn successful_copy_confirms_then_reverts_after_delay() {
        let clipboard = FakeClipboard::default();
        let cell = RecordingCell::default();
        let mut copy_cell = cell.clone();
        let controller = controller("let x = 1;");

        let copy = controller.copy(&clipboard, &TokioTimer, &mut copy_cell);
        let observe = async {
            advance(1).await;
            assert_eq!(cell.state(), CopyState::Confirmed);
            advance(998).await;
            assert_eq!(cell.state(), CopyState::Confirmed);
            advance(2).await;
            assert_eq!(cell.state(), CopyState::Idle);
        };
        let (entered, ()) = tokio::join!(copy, observe);

        assert_eq!(entered, CopyState::Confirmed);
        assert_eq!(cell.history(), vec![CopyState::Confirmed, CopyState::Idle]);
        assert_eq!(*clipboard.written.borrow(), vec!["let x = 1;".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_copy_shows_error_then_reverts_after_delay() {
        let clipboard = FakeClipboard::failing();
        let cell = RecordingCell::default();
        let mut copy_cell = cell.clone();
        let controller = controller("rm -rf target");

        let copy = controller.copy(&clipboard, &TokioTimer, &mut copy_cell);
        let observe = async {
            advance(1).await;
            assert_eq!(cell.state(), CopyState::Failed);
            advance(1000).await;
            assert_eq!(cell.state(), CopyState::Idle);
        };
        let (entered, ()) = tokio::join!(copy, observe);

        assert_eq!(entered, CopyState::Failed);
        assert_eq!(cell.history(), vec![CopyState::Failed, CopyState::Idle]);
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_copy_extends_feedback_to_latest_press() {
        let clipboard = FakeClipboard::default();
        let cell = RecordingCell::default();
        let mut first_cell = cell.clone();
        let mut second_cell = cell.clone();
        let controller = controller("cargo test");

        let first = controller.copy(&clipboard, &TokioTimer, &mut first_cell);
        let second = async {
            advance(500).await;
            controller
                .copy(&clipboard, &TokioTimer, &mut second_cell)
                .await
        };
        let observe = async {
            advance(1200).await;
            assert_eq!(cell.state(), CopyState::Confirmed);
            advance(301).await;
            assert_eq!(cell.state(), CopyState::Idle);
        };
        tokio::join!(first, second, observe);

        assert_eq!(
            cell.history(),
            vec![CopyState::Confirmed, CopyState::Confirmed, CopyState::Idle]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn feedback_delay_is_configurable() {
        let clipboard = FakeClipboard::default();
        let mut cell = CopyFeedback::default();
        let controller = CodeBlockController::new(
            "x",
            ActionSettings {
                copy_feedback_ms: 250,
                ..ActionSettings::default()
            },
        );

        let started = tokio::time::Instant::now();
        controller.copy(&clipboard, &TokioTimer, &mut cell).await;

        assert_eq!(started.elapsed(), Duration::from_millis(250));
        assert_eq!(cell.state(), CopyState::Idle);
    }

    #[test]
    fn apply_forwards_exact_code_with_source_label() {
        let code = "fn main() {\n    println!(\"hi\");\n}\n";
        let received = RefCell::new(Vec::new());
        let applier = |request: ApplyRequest| received.borrow_mut().push(request);

        controller(code).apply(&applier);

        assert_eq!(
            *received.borrow(),
            vec![ApplyRequest {
                source_label: "Ctrl+L".to_string(),
                text: code.to_string(),
            }]
        );
    }

    #[test]
    fn controller_takes_code_from_rendered_block() {
        let block = CodeBlockNode::new("echo hi");
        let controller = CodeBlockController::for_block(&block, ActionSettings::default());
        assert_eq!(controller.code(), "echo hi");
    }
}
