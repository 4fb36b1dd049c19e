//! CloudTune Player
//!
//! Terminal front-end over the CloudTune player state machine: configuration
//! loading, a simulated audio sink driven by the wall clock, and the
//! interactive shell.
//!
//! This library exposes the components for testing purposes.

pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod render;
pub mod shell;

pub use clock::{ClockHandle, ClockSink};
pub use command::Command;
pub use config::AppConfig;
pub use error::{AppError, Result};
pub use shell::Shell;
