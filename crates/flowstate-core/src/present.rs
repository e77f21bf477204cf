//! Display lookups for states and priorities.
//!
//! Pure tables with no layout or terminal logic. Consumers map a [`Tone`] to
//! whatever their medium supports; [`Tone::ansi_code`] covers terminals.

use crate::extract::Priority;
use crate::infer::WorkflowState;
use serde::Serialize;

/// Semantic color for a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Blue,
    Amber,
    Green,
    Red,
    Orange,
    Gray,
}

impl Tone {
    /// SGR foreground sequence for this tone.
    #[must_use]
    pub const fn ansi_code(self) -> &'static str {
        match self {
            Self::Blue => "\x1b[34m",
            Self::Amber => "\x1b[33m",
            Self::Green => "\x1b[32m",
            Self::Red => "\x1b[31m",
            Self::Orange => "\x1b[38;5;208m",
            Self::Gray => "\x1b[90m",
        }
    }

    /// SGR reset.
    pub const RESET: &'static str = "\x1b[0m";

    /// Wrap `text` in this tone's escape codes.
    #[must_use]
    pub fn paint(self, text: &str) -> String {
        format!("{}{text}{}", self.ansi_code(), Self::RESET)
    }
}

#[must_use]
pub const fn state_label(state: WorkflowState) -> &'static str {
    match state {
        WorkflowState::AutomationWorking => "Agent Working",
        WorkflowState::NeedsUserInput => "Needs Your Input",
        WorkflowState::Completed => "Completed",
    }
}

#[must_use]
pub const fn state_tooltip(state: WorkflowState) -> &'static str {
    match state {
        WorkflowState::AutomationWorking => "The agent is actively developing these features",
        WorkflowState::NeedsUserInput => {
            "Workflows requiring your attention - either ready for review or the agent needs help"
        }
        WorkflowState::Completed => "Finished workflows - merged and closed",
    }
}

#[must_use]
pub const fn state_tone(state: WorkflowState) -> Tone {
    match state {
        WorkflowState::AutomationWorking => Tone::Blue,
        WorkflowState::NeedsUserInput => Tone::Amber,
        WorkflowState::Completed => Tone::Green,
    }
}

/// Badge tone; no priority renders gray.
#[must_use]
pub const fn priority_tone(priority: Option<Priority>) -> Tone {
    match priority {
        Some(Priority::P1) => Tone::Red,
        Some(Priority::P2) => Tone::Orange,
        Some(Priority::P3) | None => Tone::Gray,
    }
}

#[must_use]
pub const fn state_icon(state: WorkflowState) -> &'static str {
    match state {
        WorkflowState::AutomationWorking => "◐",
        WorkflowState::NeedsUserInput => "●",
        WorkflowState::Completed => "✓",
    }
}
