//! cloudphoto CLI library
//!
//! This module exports the CLI components for use in tests and by the binary.

pub mod commands;
pub mod exit_code;
pub mod output;
