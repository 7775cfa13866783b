//! renders a parsed class file as a structural text dump.
//! one generic formatter per section; pool lines all share a single
//! per-variant value formatter rather than one routine per tag.

use std::fmt;

use crate::structs::bitflag::{ClassFileAccessFlags, FieldAccessFlags, MethodAccessFlags};
use crate::structs::raw::attribute::AttributeEntry;
use crate::structs::raw::classfile::ClassFile;
use crate::structs::raw::constant_pool::Entry;

/// Display adapter over a parsed class file.
pub struct Dump<'a> {
    class: &'a ClassFile,
    source: &'a str,
}

impl<'a> Dump<'a> {
    pub fn new(class: &'a ClassFile, source: &'a str) -> Self {
        Self { class, source }
    }
}

/// The value column of one constant pool line. Index pairs render as
/// `[a : b]`, method handles as `[kind_name -> index]`.
pub fn entry_value(entry: &Entry) -> String {
    match entry {
        Entry::Utf8(text) => text.clone(),
        Entry::Integer(value) => value.to_string(),
        Entry::Float(value) => value.to_string(),
        Entry::Long(value) => value.to_string(),
        Entry::Double(value) => value.to_string(),
        Entry::ClassRef(index)
        | Entry::StringRef(index)
        | Entry::MethodType(index) => index.to_string(),
        Entry::FieldRef(a, b)
        | Entry::MethodRef(a, b)
        | Entry::InterfaceMethodRef(a, b)
        | Entry::NameAndType(a, b)
        | Entry::InvokeDynamic(a, b) => format!("[{} : {}]", a, b),
        Entry::MethodHandle(kind, index) => format!("[{} -> {}]", kind.name(), index),
    }
}

fn write_attributes(f: &mut fmt::Formatter<'_>, attributes: &[AttributeEntry]) -> fmt::Result {
    for attribute in attributes {
        writeln!(f, " - {} ( {} )", attribute.name_index, attribute.length)?;
    }
    Ok(())
}

fn write_member(
    f: &mut fmt::Formatter<'_>,
    access_flags: u16,
    flag_names: impl fmt::Display,
    name_index: u16,
    descriptor_index: u16,
    attributes: &[AttributeEntry],
) -> fmt::Result {
    writeln!(
        f,
        "{:#06x} ({}) | [{}, {}] ( {} ):",
        access_flags,
        flag_names,
        name_index,
        descriptor_index,
        attributes.len()
    )?;

    if !attributes.is_empty() {
        writeln!(f, " > Attributes:")?;
        write_attributes(f, attributes)?;
        writeln!(f, " > ---")?;
    }

    Ok(())
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class = self.class;

        writeln!(f, "Decoding java class file: {}\n", self.source)?;
        writeln!(f, "Magic: {:#010x}", class.magic)?;
        writeln!(f, "Version: {}.{}", class.major_version, class.minor_version)?;

        writeln!(f, "Constant_pool_count: {}", class.const_pool.declared_count())?;
        writeln!(f, "cp_info:\n---")?;
        for (index, entry) in class.const_pool.iter() {
            writeln!(
                f,
                "#{:>5}: {:<18} = {}",
                index,
                entry.tag().name(),
                entry_value(entry)
            )?;
        }
        writeln!(f, "---")?;

        let class_flags = ClassFileAccessFlags::from_bits(class.access_flags);
        writeln!(f, "Access flags: {:#06x} ({})", class.access_flags, class_flags)?;
        writeln!(f, "This_class: {}", class.this_class)?;
        writeln!(f, "Superclass: {}", class.super_class)?;

        writeln!(f, "Interface count: {}", class.interfaces.len())?;
        writeln!(f, "Interfaces:")?;
        for (position, index) in class.interfaces.iter().enumerate() {
            writeln!(f, "#{:>5}: {}", position, index)?;
        }
        writeln!(f, "---\n")?;

        writeln!(f, "Fields count: {}", class.fields.len())?;
        writeln!(f, "Fields:")?;
        for field in &class.fields {
            write_member(
                f,
                field.access_flags,
                FieldAccessFlags::from_bits(field.access_flags),
                field.name_index,
                field.descriptor_index,
                &field.attributes,
            )?;
        }
        writeln!(f, "---\n")?;

        writeln!(f, "Methods count: {}", class.methods.len())?;
        writeln!(f, "Methods:")?;
        for method in &class.methods {
            write_member(
                f,
                method.access_flags,
                MethodAccessFlags::from_bits(method.access_flags),
                method.name_index,
                method.descriptor_index,
                &method.attributes,
            )?;
        }
        writeln!(f, "---\n")?;

        writeln!(f, "Attributes count: {}", class.attributes.len())?;
        writeln!(f, "Attributes:")?;
        write_attributes(f, &class.attributes)?;
        writeln!(f, "---")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::raw::constant_pool::MethodHandleKind;

    #[test]
    fn method_handle_renders_kind_by_name() {
        let entry = Entry::MethodHandle(MethodHandleKind::InvokeVirtual, 10);
        assert_eq!(entry_value(&entry), "[invoke_virtual -> 10]");
    }

    #[test]
    fn index_pairs_render_bracketed() {
        assert_eq!(entry_value(&Entry::FieldRef(3, 14)), "[3 : 14]");
        assert_eq!(entry_value(&Entry::NameAndType(2, 5)), "[2 : 5]");
    }

    #[test]
    fn numeric_entries_render_decoded_values() {
        assert_eq!(entry_value(&Entry::Integer(-1)), "-1");
        assert_eq!(entry_value(&Entry::Float(2.5)), "2.5");
        assert_eq!(entry_value(&Entry::Long(1 << 40)), "1099511627776");
        assert_eq!(entry_value(&Entry::Double(-0.125)), "-0.125");
    }
}
