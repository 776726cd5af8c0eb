//! Inbound adapters: the command-line surface consumed by both binaries.

pub mod cli;
