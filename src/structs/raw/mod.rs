//! the `raw` module is for the raw types, which have no resolution performed and
//! contain minimal abstraction over the data itself.
//! pool indices are stored as read, never dereferenced into their targets.

pub mod attribute;
pub mod classfile;
pub mod constant_pool;
pub mod field;
pub mod method;
