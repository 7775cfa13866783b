//! defines the bitflags found in class file access_flags words
//! these flags describe access levels and features of the class, its fields
//! and its methods; a private macro generates the wrapper for each flag set

use std::fmt;

use bitflags::bitflags;
use tracing::warn;

macro_rules! impl_flags {
    ( $flag_type:ident, $impl_type:ident ) => {
        #[derive(Clone, Debug)]
        pub struct $impl_type {
            pub flags: $flag_type,
        }

        impl $impl_type {
            pub fn from_bits(raw: u16) -> Self {
                let flags = <$flag_type>::from_bits(raw).unwrap_or_else(|| {
                    warn!("unrecognised bits {:b} for {}", raw, stringify!($flag_type));
                    <$flag_type>::from_bits_truncate(raw)
                });

                Self { flags }
            }

            pub fn has(&self, other: $flag_type) -> bool {
                self.flags.contains(other)
            }
        }

        impl fmt::Display for $impl_type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                // bitflags renders its Debug as "A | B | C"
                write!(f, "{:?}", self.flags)
            }
        }
    };
}

bitflags! {
    pub struct ClassFileAccessFlag: u16 {
         const PUBLIC = 0x0001;
         const FINAL = 0x0010;
         const SUPER = 0x0020;
         const INTERFACE = 0x0200;
         const ABSTRACT = 0x0400;
         const SYNTHETIC = 0x1000;
         const ANNOTATION = 0x2000;
         const ENUM = 0x4000;
         const MODULE = 0x8000;
    }
}

bitflags! {
    pub struct MethodAccessFlag: u16 {
         const PUBLIC = 0x0001;
         const PRIVATE = 0x0002;
         const PROTECTED = 0x0004;
         const STATIC = 0x0008;
         const FINAL = 0x0010;
         const SYNCHRONIZED = 0x0020;
         const BRIDGE = 0x0040;
         const VARARGS = 0x0080;
         const NATIVE = 0x0100;
         const ABSTRACT = 0x0400;
         const STRICT_FP = 0x0800;
         const SYNTHETIC = 0x1000;
    }
}

bitflags! {
    pub struct FieldAccessFlag: u16 {
         const PUBLIC = 0x0001;
         const PRIVATE = 0x0002;
         const PROTECTED = 0x0004;
         const STATIC = 0x0008;
         const FINAL = 0x0010;
         const VOLATILE = 0x0040;
         const TRANSIENT = 0x0080;
         const SYNTHETIC = 0x1000;
         const ENUM = 0x4000;
    }
}

impl_flags!(ClassFileAccessFlag, ClassFileAccessFlags);
impl_flags!(MethodAccessFlag, MethodAccessFlags);
impl_flags!(FieldAccessFlag, FieldAccessFlags);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_flag_names() {
        let flags = MethodAccessFlags::from_bits(0x0009);

        assert!(flags.has(MethodAccessFlag::PUBLIC));
        assert!(flags.has(MethodAccessFlag::STATIC));
        assert_eq!(flags.to_string(), "PUBLIC | STATIC");
    }

    #[test]
    fn unrecognised_bits_are_truncated() {
        let flags = FieldAccessFlags::from_bits(0x0201);

        assert!(flags.has(FieldAccessFlag::PUBLIC));
        assert_eq!(flags.flags.bits(), 0x0001);
    }
}
