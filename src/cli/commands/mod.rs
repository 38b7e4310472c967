//! CLI subcommands.

pub mod init;
pub mod new;
pub mod play;
pub mod resume;
pub mod rules;
pub mod status;
