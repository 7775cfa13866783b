use crate::structs::raw::attribute::AttributeEntry;
use crate::structs::raw::constant_pool::ConstantPool;
use crate::structs::raw::field::FieldEntry;
use crate::structs::raw::method::MethodEntry;

pub const MAGIC: u32 = 0xCAFEBABE;

/// The fully parsed class file. Built once in a single forward pass,
/// immutable afterwards, and discarded after the dump completes.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassFile {
    pub magic: u32,

    pub minor_version: u16,
    pub major_version: u16,

    pub const_pool: ConstantPool,

    pub access_flags: u16,
    pub this_class: u16,
    pub super_class: u16,

    pub interfaces: Vec<u16>,
    pub fields: Vec<FieldEntry>,
    pub methods: Vec<MethodEntry>,
    pub attributes: Vec<AttributeEntry>,
}
