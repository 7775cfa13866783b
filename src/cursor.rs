//! sequential big-endian reader over an immutable byte buffer
//! all multi-byte reads compose big-endian, matching the class file format

use std::fmt;

use bytes::{Buf, Bytes};
use tracing::trace;

use crate::error::ParseError;

/// Which section of the class file is currently being consumed.
/// Carried on the cursor so truncation errors can name it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    Magic,
    Version,
    ConstantPool,
    ClassInfo,
    Interfaces,
    Fields,
    Methods,
    Attributes,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Magic => "the magic value",
            Stage::Version => "the version numbers",
            Stage::ConstantPool => "the constant pool",
            Stage::ClassInfo => "the class info section",
            Stage::Interfaces => "the interface table",
            Stage::Fields => "the field table",
            Stage::Methods => "the method table",
            Stage::Attributes => "the attribute table",
        };
        write!(f, "{}", name)
    }
}

/// Forward-only cursor over class file bytes. The position increases
/// monotonically, is never rewound, and always equals the number of bytes
/// consumed so far.
pub struct ByteCursor {
    bytes: Bytes,
    pos: usize,
    stage: Stage,
}

impl ByteCursor {
    pub fn new(bytes: Bytes) -> Self {
        Self {
            bytes,
            pos: 0,
            stage: Stage::Magic,
        }
    }

    /// Byte offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.remaining()
    }

    pub fn is_empty(&self) -> bool {
        !self.bytes.has_remaining()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn enter(&mut self, stage: Stage) {
        trace!("cursor entering {:?} at offset {}", stage, self.pos);
        self.stage = stage;
    }

    /// Reads exactly `n` bytes and advances the position by `n`.
    pub fn read(&mut self, n: usize) -> Result<Bytes, ParseError> {
        if self.bytes.remaining() < n {
            return Err(ParseError::TruncatedInput {
                stage: self.stage,
                offset: self.pos,
                wanted: n - self.bytes.remaining(),
            });
        }

        self.pos += n;
        Ok(self.bytes.copy_to_bytes(n))
    }
}

/**
This macro builds the set of `try_get_{number_type}` readers. Each reads the
type big-endian, returning Result<T> instead of panicking when the buffer
runs dry.
 */
macro_rules! impl_fixed_reads {
    ( $($type:ty),* ) => {
        impl ByteCursor {
            paste::paste! {
                $(
                pub fn [<try_get_ $type>](&mut self) -> Result<$type, ParseError> {
                    let width = std::mem::size_of::<$type>();

                    if self.bytes.remaining() < width {
                        return Err(ParseError::TruncatedInput {
                            stage: self.stage,
                            offset: self.pos,
                            wanted: width - self.bytes.remaining(),
                        });
                    }

                    self.pos += width;
                    Ok(self.bytes.[<get_ $type>]())
                }
                )*
            }
        }
    }
}

impl_fixed_reads!(u8, u16, u32, i32, i64, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(bytes: &[u8]) -> ByteCursor {
        ByteCursor::new(Bytes::copy_from_slice(bytes))
    }

    #[test]
    fn fixed_width_reads_are_big_endian() {
        let mut c = cursor(&[0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x34]);

        assert_eq!(c.try_get_u32().unwrap(), 0xCAFEBABE);
        assert_eq!(c.try_get_u16().unwrap(), 0x0034);
        assert_eq!(c.position(), 6);
        assert!(c.is_empty());
    }

    #[test]
    fn read_returns_exact_span_and_advances() {
        let mut c = cursor(b"Foobar");

        let span = c.read(3).unwrap();
        assert_eq!(&span[..], b"Foo");
        assert_eq!(c.position(), 3);
        assert_eq!(c.remaining(), 3);
    }

    #[test]
    fn truncation_reports_stage_and_offset() {
        let mut c = cursor(&[0x00, 0x01]);
        c.enter(Stage::Fields);

        assert_eq!(c.try_get_u16().unwrap(), 1);

        let err = c.try_get_u32().unwrap_err();
        assert_eq!(
            err,
            ParseError::TruncatedInput {
                stage: Stage::Fields,
                offset: 2,
                wanted: 4,
            }
        );
    }

    #[test]
    fn failed_read_does_not_advance() {
        let mut c = cursor(&[0xAB]);

        assert!(c.read(2).is_err());
        assert_eq!(c.position(), 0);
        assert_eq!(c.try_get_u8().unwrap(), 0xAB);
    }

    #[test]
    fn float_reads_are_ieee754() {
        let mut c = cursor(&3.5f32.to_be_bytes());
        assert_eq!(c.try_get_f32().unwrap(), 3.5);

        let mut c = cursor(&(-2.25f64).to_be_bytes());
        assert_eq!(c.try_get_f64().unwrap(), -2.25);
    }
}
