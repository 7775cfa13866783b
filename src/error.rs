use thiserror::Error;

use crate::cursor::Stage;

/// Fatal parse failures. Every variant leaves the cursor misaligned with
/// record boundaries, so none of them are recoverable: the first one found
/// aborts the whole dump.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("input truncated at offset {offset} while reading {stage}, wanted {wanted} more byte(s)")]
    TruncatedInput {
        stage: Stage,
        offset: usize,
        wanted: usize,
    },

    #[error("magic value {found:#010x} does not match 0xcafebabe")]
    InvalidMagic { found: u32 },

    #[error("unknown constant pool tag {tag} for entry #{index} at offset {offset}")]
    UnknownConstantPoolTag { tag: u8, index: u16, offset: usize },

    #[error("unknown method handle kind {kind} at offset {offset}, expected 1..=9")]
    UnknownMethodHandleKind { kind: u8, offset: usize },

    #[error("constant pool entry #{index} at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { index: u16, offset: usize },
}
