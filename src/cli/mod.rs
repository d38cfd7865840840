//! Line-oriented task console
//!
//! Parses commands, renders output and drives the read loop.

pub mod command;
pub mod console;
pub mod display;

pub use command::Command;
pub use console::{Console, Outcome, PROMPT};
