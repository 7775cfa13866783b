//! provides the various structs that the class file parser will deserialize to.
//! this also provides the bitflag types used when rendering access flags.

pub mod bitflag;
pub mod raw;
