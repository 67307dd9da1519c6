//! CLI command handlers
//!
//! This module contains handlers for the various CLI subcommands.

pub mod profile;
