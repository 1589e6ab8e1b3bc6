//! Utility functions and helpers for the gem2gpt adapter.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and credential redaction.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
