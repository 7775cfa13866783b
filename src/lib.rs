//! cafedump parses the binary layout of JVM class files and renders a
//! structural dump of every section: header, constant pool, access flags,
//! superclass and interface links, fields, methods and attributes.
//!
//! The parse is a single forward pass over an immutable buffer. It either
//! completes with a full [`structs::raw::classfile::ClassFile`] or fails
//! with one fatal [`error::ParseError`] naming the stage and byte offset.

pub mod classfile;
pub mod cursor;
pub mod dump;
pub mod error;
pub mod interface;
pub mod structs;
