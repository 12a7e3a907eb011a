//! CLI module for the nanopost command-line interface
//!
//! Argument parsing and the handlers that bridge CLI operations to library
//! functions.

pub mod args;
pub mod commands;
