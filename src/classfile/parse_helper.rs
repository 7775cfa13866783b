use tracing::trace;

use crate::cursor::ByteCursor;
use crate::error::ParseError;
use crate::structs::raw::attribute::AttributeEntry;
use crate::structs::raw::constant_pool::{ConstantPool, Entry, MethodHandleKind, Tag};
use crate::structs::raw::field::FieldEntry;
use crate::structs::raw::method::MethodEntry;

/// Decodes one tag-length-value record. `index` is the logical pool index
/// the entry will occupy, carried for error reporting only.
pub fn parse_pool_entry(cursor: &mut ByteCursor, index: u16) -> Result<Entry, ParseError> {
    let tag_offset = cursor.position();
    let tag_byte = cursor.try_get_u8()?;

    let tag = Tag::from_byte(tag_byte).ok_or(ParseError::UnknownConstantPoolTag {
        tag: tag_byte,
        index,
        offset: tag_offset,
    })?;

    trace!("const pool entry {index} has tag {:?}", tag);

    let entry = match tag {
        Tag::Utf8 => {
            let length = cursor.try_get_u16()?;
            let offset = cursor.position();
            let bytes = cursor.read(length as usize)?;

            let text = String::from_utf8(bytes.to_vec())
                .map_err(|_| ParseError::InvalidUtf8 { index, offset })?;

            Entry::Utf8(text)
        }
        Tag::Integer => Entry::Integer(cursor.try_get_i32()?),
        Tag::Float => Entry::Float(cursor.try_get_f32()?),
        Tag::Long => Entry::Long(cursor.try_get_i64()?),
        Tag::Double => Entry::Double(cursor.try_get_f64()?),
        Tag::ClassRef => Entry::ClassRef(cursor.try_get_u16()?),
        Tag::StringRef => Entry::StringRef(cursor.try_get_u16()?),
        Tag::FieldRef => Entry::FieldRef(cursor.try_get_u16()?, cursor.try_get_u16()?),
        Tag::MethodRef => Entry::MethodRef(cursor.try_get_u16()?, cursor.try_get_u16()?),
        Tag::InterfaceMethodRef => {
            Entry::InterfaceMethodRef(cursor.try_get_u16()?, cursor.try_get_u16()?)
        }
        Tag::NameAndType => Entry::NameAndType(cursor.try_get_u16()?, cursor.try_get_u16()?),
        Tag::MethodHandle => {
            let kind_offset = cursor.position();
            let kind_byte = cursor.try_get_u8()?;

            let kind = MethodHandleKind::from_byte(kind_byte).ok_or(
                ParseError::UnknownMethodHandleKind {
                    kind: kind_byte,
                    offset: kind_offset,
                },
            )?;

            Entry::MethodHandle(kind, cursor.try_get_u16()?)
        }
        Tag::MethodType => Entry::MethodType(cursor.try_get_u16()?),
        Tag::InvokeDynamic => Entry::InvokeDynamic(cursor.try_get_u16()?, cursor.try_get_u16()?),
    };

    Ok(entry)
}

pub fn parse_const_pool(cursor: &mut ByteCursor, pool_count: u16) -> Result<ConstantPool, ParseError> {
    let mut entries: Vec<Option<Entry>> = Vec::with_capacity(pool_count as usize);

    entries.push(None);

    // pool is indexed from 1 -> count - 1
    // we add "None" at the start to account for this
    // while loop because Long/Double entries take up 2 slots
    // thus, a ranged loop would not work

    while entries.len() < pool_count as usize {
        let index = entries.len() as u16;
        trace!("parsing const pool entry {index}");

        let entry = parse_pool_entry(cursor, index)?;
        let wide = entry.is_wide();

        trace!("pushing entry {:?}", entry);
        entries.push(Some(entry));

        if wide {
            trace!("entry is wide, reserving the following slot");
            entries.push(None);
        }
    }

    Ok(ConstantPool::new(pool_count, entries))
}

pub fn parse_interface_info(cursor: &mut ByteCursor, length: u16) -> Result<Vec<u16>, ParseError> {
    let mut out = Vec::with_capacity(length as usize);

    for _ in 0..length {
        out.push(cursor.try_get_u16()?);
    }

    Ok(out)
}

pub fn parse_attribute_info(
    cursor: &mut ByteCursor,
    length: u16,
) -> Result<Vec<AttributeEntry>, ParseError> {
    let mut out: Vec<AttributeEntry> = Vec::with_capacity(length as usize);

    for _ in 0..length {
        let name_index = cursor.try_get_u16()?;
        let attribute_length = cursor.try_get_u32()?;

        // the payload is opaque, consumed byte-for-byte per the declared length
        let data = cursor.read(attribute_length as usize)?;

        out.push(AttributeEntry {
            name_index,
            length: attribute_length,
            data: data.to_vec(),
        });
    }

    Ok(out)
}

pub fn parse_field_info(
    cursor: &mut ByteCursor,
    length: u16,
) -> Result<Vec<FieldEntry>, ParseError> {
    let mut out = Vec::with_capacity(length as usize);

    for _ in 0..length {
        let access_flags = cursor.try_get_u16()?;
        let name_index = cursor.try_get_u16()?;
        let descriptor_index = cursor.try_get_u16()?;
        let attributes_count = cursor.try_get_u16()?;
        let attributes = parse_attribute_info(cursor, attributes_count)?;

        out.push(FieldEntry {
            access_flags,
            name_index,
            descriptor_index,
            attributes,
        });
    }

    Ok(out)
}

pub fn parse_method_info(
    cursor: &mut ByteCursor,
    length: u16,
) -> Result<Vec<MethodEntry>, ParseError> {
    let mut out = Vec::with_capacity(length as usize);

    for _ in 0..length {
        let access_flags = cursor.try_get_u16()?;
        let name_index = cursor.try_get_u16()?;
        let descriptor_index = cursor.try_get_u16()?;
        let attributes_count = cursor.try_get_u16()?;
        let attributes = parse_attribute_info(cursor, attributes_count)?;

        out.push(MethodEntry {
            access_flags,
            name_index,
            descriptor_index,
            attributes,
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::cursor::Stage;

    fn cursor(bytes: Vec<u8>) -> ByteCursor {
        let mut cursor = ByteCursor::new(Bytes::from(bytes));
        cursor.enter(Stage::ConstantPool);
        cursor
    }

    #[test]
    fn utf8_entry_decodes_text() {
        let mut c = cursor(vec![1, 0, 3, b'F', b'o', b'o']);

        let pool = parse_const_pool(&mut c, 2).unwrap();

        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get(1), Some(&Entry::Utf8("Foo".to_string())));
        assert!(c.is_empty());
    }

    #[test]
    fn utf8_entry_rejects_invalid_bytes() {
        let mut c = cursor(vec![1, 0, 2, 0xC3, 0x28]);

        let err = parse_const_pool(&mut c, 2).unwrap_err();

        assert_eq!(err, ParseError::InvalidUtf8 { index: 1, offset: 3 });
    }

    #[test]
    fn numeric_entries_decode_fixed_widths() {
        let mut bytes = vec![3];
        bytes.extend_from_slice(&(-7i32).to_be_bytes());
        bytes.push(4);
        bytes.extend_from_slice(&2.5f32.to_be_bytes());

        let mut c = cursor(bytes);
        let pool = parse_const_pool(&mut c, 3).unwrap();

        assert_eq!(pool.get(1), Some(&Entry::Integer(-7)));
        assert_eq!(pool.get(2), Some(&Entry::Float(2.5)));
    }

    #[test]
    fn long_reserves_the_following_slot() {
        let mut bytes = vec![5];
        bytes.extend_from_slice(&0x1_0000_0001i64.to_be_bytes());
        bytes.extend_from_slice(&[7, 0, 9]);

        let mut c = cursor(bytes);
        let pool = parse_const_pool(&mut c, 4).unwrap();

        assert_eq!(pool.len(), 3);
        assert_eq!(pool.get(1), Some(&Entry::Long(0x1_0000_0001)));
        assert_eq!(pool.get(2), None);
        assert_eq!(pool.get(3), Some(&Entry::ClassRef(9)));
    }

    #[test]
    fn double_in_the_last_two_slots_terminates_cleanly() {
        let mut bytes = vec![6];
        bytes.extend_from_slice(&1.5f64.to_be_bytes());
        // trailing bytes belong to the next section, not the pool
        bytes.extend_from_slice(&[0xAA, 0xBB]);

        let mut c = cursor(bytes);
        let pool = parse_const_pool(&mut c, 3).unwrap();

        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get(1), Some(&Entry::Double(1.5)));
        assert_eq!(pool.get(2), None);
        assert_eq!(c.remaining(), 2);
    }

    #[test]
    fn empty_pool_reads_nothing() {
        let mut c = cursor(vec![0xFF, 0xFF]);

        let pool = parse_const_pool(&mut c, 1).unwrap();

        assert!(pool.is_empty());
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn unknown_tag_halts_immediately() {
        let mut bytes = vec![7, 0, 2];
        bytes.extend_from_slice(&[0xFF, 1, 2, 3]);

        let mut c = cursor(bytes);
        let err = parse_const_pool(&mut c, 4).unwrap_err();

        assert_eq!(
            err,
            ParseError::UnknownConstantPoolTag {
                tag: 255,
                index: 2,
                offset: 3,
            }
        );
        // only the offending tag byte was consumed from that record
        assert_eq!(c.position(), 4);
    }

    #[test]
    fn method_handle_decodes_kind_and_index() {
        let mut c = cursor(vec![15, 5, 0, 10]);

        let entry = parse_pool_entry(&mut c, 1).unwrap();

        assert_eq!(
            entry,
            Entry::MethodHandle(MethodHandleKind::InvokeVirtual, 10)
        );
    }

    #[test]
    fn method_handle_rejects_kind_outside_range() {
        let mut c = cursor(vec![15, 10, 0, 3]);

        let err = parse_pool_entry(&mut c, 1).unwrap_err();

        assert_eq!(err, ParseError::UnknownMethodHandleKind { kind: 10, offset: 1 });
    }

    #[test]
    fn consumed_span_matches_prescribed_widths() {
        // tag + payload widths: Utf8 1+2+3, Integer 1+4, Long 1+8,
        // MethodHandle 1+1+2, InvokeDynamic 1+2+2
        let mut bytes = vec![1, 0, 3, b'F', b'o', b'o'];
        bytes.push(3);
        bytes.extend_from_slice(&42i32.to_be_bytes());
        bytes.push(5);
        bytes.extend_from_slice(&9i64.to_be_bytes());
        bytes.extend_from_slice(&[15, 6, 0, 2]);
        bytes.extend_from_slice(&[18, 0, 1, 0, 4]);

        let expected_span = bytes.len();
        let mut c = cursor(bytes);

        // 5 real entries + 1 reserved slot for the Long
        let pool = parse_const_pool(&mut c, 7).unwrap();

        assert_eq!(pool.len(), 6);
        assert_eq!(c.position(), expected_span);
    }

    #[test]
    fn attribute_payload_is_consumed_byte_for_byte() {
        let mut c = cursor(vec![0, 7, 0, 0, 0, 2, 0xDE, 0xAD, 0x55]);

        let attributes = parse_attribute_info(&mut c, 1).unwrap();

        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes[0].name_index, 7);
        assert_eq!(attributes[0].length, 2);
        assert_eq!(attributes[0].data, vec![0xDE, 0xAD]);
        assert_eq!(c.remaining(), 1);
    }

    #[test]
    fn truncated_attribute_payload_is_fatal() {
        let mut c = cursor(vec![0, 7, 0, 0, 0, 9, 0xDE]);

        let err = parse_attribute_info(&mut c, 1).unwrap_err();

        assert!(matches!(err, ParseError::TruncatedInput { .. }));
    }
}
