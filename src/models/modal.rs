use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Delay between starting the close animation and unmounting the modal.
pub const CLOSE_ANIMATION_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModalPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModalEvent {
    Mount,
    AnimationDone,
    CloseButton,
    BackdropClick,
    EscapeKey,
    Submitted,
    CloseDelayElapsed,
}

impl ModalPhase {
    /// Returns the next phase, or `None` when `event` has no effect here.
    pub fn on(self, event: ModalEvent) -> Option<ModalPhase> {
        use ModalEvent::*;
        use ModalPhase::*;

        match (self, event) {
            (Closed, Mount) => Some(Opening),
            (Opening, AnimationDone) => Some(Open),
            (Open, CloseButton | BackdropClick | EscapeKey | Submitted) => Some(Closing),
            (Closing, CloseDelayElapsed) => Some(Closed),
            _ => None,
        }
    }
}
