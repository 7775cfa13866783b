//! the sequential class file decode pipeline: one forward pass over the
//! buffer, constant pool first, then the structural sections.

pub mod parse;
pub mod parse_helper;
