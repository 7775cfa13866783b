use enum_as_inner::EnumAsInner;

/// 1-byte discriminator identifying a constant pool entry's shape.
/// Only the tags the dump understands are listed; anything else aborts the
/// parse because the record width, and so the cursor alignment, is unknown.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tag {
    Utf8,
    Integer,
    Float,
    Long,
    Double,
    ClassRef,
    StringRef,
    FieldRef,
    MethodRef,
    InterfaceMethodRef,
    NameAndType,
    MethodHandle,
    MethodType,
    InvokeDynamic,
}

impl Tag {
    pub fn from_byte(tag: u8) -> Option<Self> {
        Some(match tag {
            1 => Tag::Utf8,
            3 => Tag::Integer,
            4 => Tag::Float,
            5 => Tag::Long,
            6 => Tag::Double,
            7 => Tag::ClassRef,
            8 => Tag::StringRef,
            9 => Tag::FieldRef,
            10 => Tag::MethodRef,
            11 => Tag::InterfaceMethodRef,
            12 => Tag::NameAndType,
            15 => Tag::MethodHandle,
            16 => Tag::MethodType,
            18 => Tag::InvokeDynamic,
            _ => return None,
        })
    }

    /// The name used in the rendered dump.
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Utf8 => "UTF-8",
            Tag::Integer => "Integer",
            Tag::Float => "Float",
            Tag::Long => "Long",
            Tag::Double => "Double",
            Tag::ClassRef => "Class",
            Tag::StringRef => "String",
            Tag::FieldRef => "Fieldref",
            Tag::MethodRef => "Methodref",
            Tag::InterfaceMethodRef => "InterfaceMethodref",
            Tag::NameAndType => "NameAndType",
            Tag::MethodHandle => "MethodHandle",
            Tag::MethodType => "MethodType",
            Tag::InvokeDynamic => "InvokeDynamic",
        }
    }
}

/// Category of a method handle's target operation. Kinds outside 1..=9 are
/// rejected at decode time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MethodHandleKind {
    GetField,
    GetStatic,
    PutField,
    PutStatic,
    InvokeVirtual,
    InvokeStatic,
    InvokeSpecial,
    NewInvokeSpecial,
    InvokeInterface,
}

impl MethodHandleKind {
    pub fn from_byte(kind: u8) -> Option<Self> {
        Some(match kind {
            1 => MethodHandleKind::GetField,
            2 => MethodHandleKind::GetStatic,
            3 => MethodHandleKind::PutField,
            4 => MethodHandleKind::PutStatic,
            5 => MethodHandleKind::InvokeVirtual,
            6 => MethodHandleKind::InvokeStatic,
            7 => MethodHandleKind::InvokeSpecial,
            8 => MethodHandleKind::NewInvokeSpecial,
            9 => MethodHandleKind::InvokeInterface,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            MethodHandleKind::GetField => "get_field",
            MethodHandleKind::GetStatic => "get_static",
            MethodHandleKind::PutField => "put_field",
            MethodHandleKind::PutStatic => "put_static",
            MethodHandleKind::InvokeVirtual => "invoke_virtual",
            MethodHandleKind::InvokeStatic => "invoke_static",
            MethodHandleKind::InvokeSpecial => "invoke_special",
            MethodHandleKind::NewInvokeSpecial => "new_invoke_special",
            MethodHandleKind::InvokeInterface => "invoke_interface",
        }
    }
}

/// A decoded constant pool entry. Numeric entries carry their decoded values
/// (Integer as two's complement, Float/Double as IEEE-754 from the raw
/// bytes); reference entries carry pool indices, which are stored but never
/// dereferenced here. Index pairs are (class_index, name_and_type_index)
/// for the *Ref variants, (name_index, descriptor_index) for NameAndType
/// and (bootstrap_method_attr_index, name_and_type_index) for InvokeDynamic.
#[derive(Clone, Debug, PartialEq, EnumAsInner)]
pub enum Entry {
    Utf8(String),
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    ClassRef(u16),
    StringRef(u16),
    FieldRef(u16, u16),
    MethodRef(u16, u16),
    InterfaceMethodRef(u16, u16),
    NameAndType(u16, u16),
    MethodHandle(MethodHandleKind, u16),
    MethodType(u16),
    InvokeDynamic(u16, u16),
}

impl Entry {
    pub fn tag(&self) -> Tag {
        match self {
            Entry::Utf8(..) => Tag::Utf8,
            Entry::Integer(..) => Tag::Integer,
            Entry::Float(..) => Tag::Float,
            Entry::Long(..) => Tag::Long,
            Entry::Double(..) => Tag::Double,
            Entry::ClassRef(..) => Tag::ClassRef,
            Entry::StringRef(..) => Tag::StringRef,
            Entry::FieldRef(..) => Tag::FieldRef,
            Entry::MethodRef(..) => Tag::MethodRef,
            Entry::InterfaceMethodRef(..) => Tag::InterfaceMethodRef,
            Entry::NameAndType(..) => Tag::NameAndType,
            Entry::MethodHandle(..) => Tag::MethodHandle,
            Entry::MethodType(..) => Tag::MethodType,
            Entry::InvokeDynamic(..) => Tag::InvokeDynamic,
        }
    }

    /// Long and Double entries occupy two logical indices; the slot after
    /// them is reserved and holds no entry.
    pub fn is_wide(&self) -> bool {
        matches!(self, Entry::Long(..) | Entry::Double(..))
    }
}

/// The constant pool, indexed from 1 to `declared_count - 1`. Slot 0 is
/// unused, and the slot following each Long/Double is reserved (`None`).
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantPool {
    declared_count: u16,
    entries: Vec<Option<Entry>>,
}

impl ConstantPool {
    pub fn new(declared_count: u16, entries: Vec<Option<Entry>>) -> Self {
        Self {
            declared_count,
            entries,
        }
    }

    /// The count as declared in the file header: logical entries (reserved
    /// slots included) plus one.
    pub fn declared_count(&self) -> u16 {
        self.declared_count
    }

    /// Number of logical indices assigned, reserved slots included.
    pub fn len(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: u16) -> Option<&Entry> {
        self.entries.get(index as usize).and_then(Option::as_ref)
    }

    /// Iterates the occupied slots in index order, skipping slot 0 and the
    /// reserved slots.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &Entry)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| entry.as_ref().map(|e| (index as u16, e)))
    }
}
