use crate::structs::raw::attribute::AttributeEntry;

#[derive(Clone, Debug, PartialEq)]
pub struct FieldEntry {
    pub access_flags: u16,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub attributes: Vec<AttributeEntry>,
}
