use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

/// Delay between raising a toast and it sliding into view.
pub const APPEAR_DELAY: Duration = Duration::from_millis(10);
/// How long a toast stays fully visible.
pub const DISPLAY_DURATION: Duration = Duration::from_secs(3);
/// Fade-out before the toast is removed.
pub const LEAVE_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Visible,
    Leaving,
}

#[derive(Debug, Clone)]
struct Toast {
    id: u64,
    message: String,
    kind: ToastKind,
    raised_at: Instant,
}

impl Toast {
    fn phase_at(&self, now: Instant) -> Option<ToastPhase> {
        let age = now.saturating_duration_since(self.raised_at);
        if age < APPEAR_DELAY {
            Some(ToastPhase::Entering)
        } else if age < APPEAR_DELAY + DISPLAY_DURATION {
            Some(ToastPhase::Visible)
        } else if age < APPEAR_DELAY + DISPLAY_DURATION + LEAVE_DURATION {
            Some(ToastPhase::Leaving)
        } else {
            None
        }
    }
}

/// A toast as seen at a given instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveToast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    pub phase: ToastPhase,
    /// Time left until the fade-out starts.
    pub remaining: Duration,
}

#[derive(Debug, Default)]
struct ToastBoard {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl ToastBoard {
    fn prune(&mut self, now: Instant) {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.phase_at(now).is_some());
        let dropped = before - self.toasts.len();
        if dropped > 0 {
            debug!("dismissed {} toast(s)", dropped);
        }
    }
}

/// Transient notifications. Clones share the same board.
#[derive(Debug, Clone, Default)]
pub struct Toaster {
    board: Arc<Mutex<ToastBoard>>,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises a toast and returns its id. Toasts stack; duplicates are kept.
    pub fn notify(&self, message: impl Into<String>, kind: ToastKind) -> u64 {
        let now = Instant::now();
        let mut board = self.board.lock().unwrap_or_else(PoisonError::into_inner);
        board.prune(now);

        board.next_id += 1;
        let id = board.next_id;
        board.toasts.push(Toast {
            id,
            message: message.into(),
            kind,
            raised_at: now,
        });
        id
    }

    /// Toasts not yet dismissed, oldest first.
    pub fn active(&self) -> Vec<ActiveToast> {
        let now = Instant::now();
        let mut board = self.board.lock().unwrap_or_else(PoisonError::into_inner);
        board.prune(now);

        board
            .toasts
            .iter()
            .filter_map(|t| {
                let phase = t.phase_at(now)?;
                let fade_at = t.raised_at + APPEAR_DELAY + DISPLAY_DURATION;
                Some(ActiveToast {
                    id: t.id,
                    message: t.message.clone(),
                    kind: t.kind,
                    phase,
                    remaining: fade_at.saturating_duration_since(now),
                })
            })
            .collect()
    }
}
