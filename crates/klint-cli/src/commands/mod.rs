//! Subcommand implementations.

pub mod init;
pub mod lint;
pub mod list_rules;
