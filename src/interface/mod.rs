//! the outer surfaces of the tool: command line argument handling.

pub mod cli;
