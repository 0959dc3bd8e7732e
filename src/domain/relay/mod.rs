//! Relay lifecycle domain module

mod session;

pub use session::{InvalidStateTransition, RelaySession, RelayState};
