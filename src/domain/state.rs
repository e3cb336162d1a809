//! Polling loop state.

/// Whether the polling loop is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Stopped,
    Running,
}

impl LoopState {
    /// The state a toggle moves to
    pub fn toggled(self) -> Self {
        match self {
            LoopState::Stopped => LoopState::Running,
            LoopState::Running => LoopState::Stopped,
        }
    }

    /// Label for the start/stop control: the action a press will perform
    pub fn button_label(self) -> &'static str {
        match self {
            LoopState::Stopped => "START",
            LoopState::Running => "STOP",
        }
    }

    pub fn is_running(self) -> bool {
        self == LoopState::Running
    }
}
