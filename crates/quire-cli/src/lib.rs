//! Quire CLI library
//!
//! Command implementations behind the `quire` binary. This is the only crate
//! that touches the filesystem; the libraries work on content strings.

pub mod cli;
pub mod commands;
pub mod config;
pub mod vault;
