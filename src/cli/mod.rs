//! CLI infrastructure for the boardwalk game.
//!
//! This module provides the command-line interface: subcommands for
//! starting, resuming, and inspecting games, plus the interactive prompt
//! helpers and output formatting the play loop is built from.

pub mod commands;
pub mod output;
pub mod prompt;
