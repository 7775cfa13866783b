use std::fs::File;
use std::io::{ErrorKind, Read};

use anyhow::{anyhow, Result};
use bytes::Bytes;
use tracing::{debug, info, warn};

use crate::classfile::parse_helper::{
    parse_attribute_info, parse_const_pool, parse_field_info, parse_interface_info,
    parse_method_info,
};
use crate::cursor::{ByteCursor, Stage};
use crate::error::ParseError;
use crate::structs::raw::classfile::{ClassFile, MAGIC};

pub struct ClassFileParser {
    pub name: String,
    cursor: ByteCursor,
}

impl ClassFileParser {
    /// Opens and reads the file at `path`. I/O concerns (existence, read
    /// failures) are reported here, before any parsing happens.
    pub fn from_path(path: &str) -> Result<Self> {
        info!("opening classfile '{}' for parsing from path", path);

        let mut handle = File::open(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => anyhow!("classfile '{}' does not exist", path),
            _ => anyhow!("failed to open classfile '{}' because of error {}", path, err),
        })?;

        let mut buffer = Vec::new();
        handle
            .read_to_end(&mut buffer)
            .map_err(|err| anyhow!("failed to read classfile '{}' because of error {}", path, err))?;

        Ok(ClassFileParser::from_bytes(path.to_string(), buffer))
    }

    pub fn from_bytes(name: String, bytes: Vec<u8>) -> Self {
        debug!("creating parser from bytes for class '{}'", name);

        Self {
            name,
            cursor: ByteCursor::new(Bytes::from(bytes)),
        }
    }

    /// Walks the whole layout in declaration order. One linear pass, no
    /// backtracking; the first error aborts with no partial result.
    pub fn parse(mut self) -> Result<ClassFile, ParseError> {
        debug!("parsing bytes for class '{}'", self.name);

        self.cursor.enter(Stage::Magic);
        let magic = self.cursor.try_get_u32()?;
        debug!("got {magic:#010x} as the magic value");

        if magic != MAGIC {
            return Err(ParseError::InvalidMagic { found: magic });
        }

        self.cursor.enter(Stage::Version);
        let minor_version = self.cursor.try_get_u16()?;
        let major_version = self.cursor.try_get_u16()?;
        debug!("got version {major_version}.{minor_version}");

        self.cursor.enter(Stage::ConstantPool);
        let const_pool_count = self.cursor.try_get_u16()?;
        debug!("const pool has {const_pool_count} entries listed");

        let const_pool = parse_const_pool(&mut self.cursor, const_pool_count)?;
        debug!(
            "successfully parsed constant pool, {} logical entries",
            const_pool.len()
        );

        self.cursor.enter(Stage::ClassInfo);
        let access_flags = self.cursor.try_get_u16()?;
        debug!("got access flags {:b}", access_flags);

        let this_class = self.cursor.try_get_u16()?;
        debug!("got this_class index {this_class}");

        let super_class = self.cursor.try_get_u16()?;
        debug!("got super_class index {super_class}");

        self.cursor.enter(Stage::Interfaces);
        let interface_count = self.cursor.try_get_u16()?;
        debug!("class has {interface_count} interfaces");
        let interfaces = parse_interface_info(&mut self.cursor, interface_count)?;

        self.cursor.enter(Stage::Fields);
        let field_count = self.cursor.try_get_u16()?;
        debug!("class has {field_count} fields");
        let fields = parse_field_info(&mut self.cursor, field_count)?;

        self.cursor.enter(Stage::Methods);
        let method_count = self.cursor.try_get_u16()?;
        debug!("class has {method_count} methods");
        let methods = parse_method_info(&mut self.cursor, method_count)?;

        self.cursor.enter(Stage::Attributes);
        let attribute_count = self.cursor.try_get_u16()?;
        debug!("class has {attribute_count} attributes");
        let attributes = parse_attribute_info(&mut self.cursor, attribute_count)?;

        if !self.cursor.is_empty() {
            // the declared counts are the only end-of-structure contract,
            // so trailing bytes are reported but do not fail the dump
            warn!(
                "classfile '{}' has {} trailing byte(s) after the last attribute",
                self.name,
                self.cursor.remaining()
            );
        }

        Ok(ClassFile {
            magic,
            minor_version,
            major_version,
            const_pool,
            access_flags,
            this_class,
            super_class,
            interfaces,
            fields,
            methods,
            attributes,
        })
    }
}
