//! # reqtree
//!
//! Library half of the reqtree binary: CLI definitions, command
//! implementations, input loading and name-table configuration.

pub mod cli;
pub mod config;
pub mod input;
