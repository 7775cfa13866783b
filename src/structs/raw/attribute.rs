/// A named, length-prefixed extension record. The payload is kept opaque;
/// per-attribute internals are a separate format this dump does not decode.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeEntry {
    pub name_index: u16,
    pub length: u32,
    pub data: Vec<u8>,
}
