//! Relay session state machine

use std::fmt;
use thiserror::Error;

/// Relay states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RelayState {
    #[default]
    Inactive,
    Active,
}

impl RelayState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Active => "active",
        }
    }
}

impl fmt::Display for RelayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: RelayState,
    pub action: String,
}

/// Relay session entity.
///
/// State machine:
///   INACTIVE -> ACTIVE (activate)
///
/// There is no way back to INACTIVE. Suspension and resumption belong to the
/// host and are invisible here.
#[derive(Debug, Default)]
pub struct RelaySession {
    state: RelayState,
}

impl RelaySession {
    /// Create a new session in inactive state
    pub fn new() -> Self {
        Self {
            state: RelayState::Inactive,
        }
    }

    /// Get the current state
    pub fn state(&self) -> RelayState {
        self.state
    }

    /// Check if currently active
    pub fn is_active(&self) -> bool {
        self.state == RelayState::Active
    }

    /// Transition from INACTIVE to ACTIVE
    pub fn activate(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != RelayState::Inactive {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "activate".to_string(),
            });
        }
        self.state = RelayState::Active;
        Ok(())
    }

    /// Guard for activation side effects that must happen before the transition
    pub fn ensure_inactive(&self) -> Result<(), InvalidStateTransition> {
        if self.state != RelayState::Inactive {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "activate".to_string(),
            });
        }
        Ok(())
    }

    /// Guard for message delivery: only an active session accepts payloads
    pub fn ensure_active(&self) -> Result<(), InvalidStateTransition> {
        if self.state != RelayState::Active {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "deliver a message".to_string(),
            });
        }
        Ok(())
    }
}
