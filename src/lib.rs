//! Small desktop stopwatch for tracking how much time goes into each project. Sessions are kept
//! in memory and can be exported as CSV or copied to the clipboard, only the project list is
//! stored on disk.
//!

pub mod args;
pub mod fs;
pub mod tracker;
pub mod utils;

#[cfg(feature = "gui")]
pub mod gui;
