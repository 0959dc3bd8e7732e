//! Push Relay - push-provider messages as desktop notifications
//!
//! This crate runs a background relay that connects to a push-messaging
//! provider with a fixed project configuration and turns every inbound
//! payload into a system notification.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Payloads, notifications, relay state machine, configuration
//! - **Application**: The relay use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (notify-rust, sockets, config file)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
