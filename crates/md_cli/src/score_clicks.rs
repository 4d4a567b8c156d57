//! Score-tap intent resolution.
//!
//! The score display doubles as two controls: one tap opens the goal-entry
//! flow, a quick second tap opens the cancel flow. This machine decides
//! which intent fires. Timestamps are caller-supplied millis, so the
//! command loop and the tests drive it the same way.

/// How long a first tap waits for a second one.
pub const DOUBLE_TAP_WINDOW_MS: u64 = 250;

/// What a resolved tap sequence asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapIntent {
    /// Open the goal-entry flow.
    RecordGoal,
    /// Open the cancel-goal flow.
    CancelGoal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum TapState {
    #[default]
    Idle,
    PendingSingle {
        since: u64,
    },
}

/// Debouncer for one side's score display.
#[derive(Debug, Clone, Copy, Default)]
pub struct TapTracker {
    state: TapState,
}

impl TapTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one tap at `now`. A second tap inside the window resolves
    /// immediately as a double. A tap landing on a stale pending resolves
    /// the stale one as a single and stays pending itself.
    pub fn tap(&mut self, now: u64) -> Option<TapIntent> {
        match self.state {
            TapState::Idle => {
                self.state = TapState::PendingSingle { since: now };
                None
            }
            TapState::PendingSingle { since }
                if now.saturating_sub(since) <= DOUBLE_TAP_WINDOW_MS =>
            {
                self.state = TapState::Idle;
                Some(TapIntent::CancelGoal)
            }
            TapState::PendingSingle { .. } => {
                self.state = TapState::PendingSingle { since: now };
                Some(TapIntent::RecordGoal)
            }
        }
    }

    /// Resolve an expired pending tap. Call on a timer tick or before the
    /// next input.
    pub fn poll(&mut self, now: u64) -> Option<TapIntent> {
        match self.state {
            TapState::PendingSingle { since }
                if now.saturating_sub(since) > DOUBLE_TAP_WINDOW_MS =>
            {
                self.state = TapState::Idle;
                Some(TapIntent::RecordGoal)
            }
            _ => None,
        }
    }
}
