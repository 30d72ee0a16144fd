/// Wire bytes per full group (bitmap + data).
pub const PACKED_GROUP_LEN: usize = 8;
/// Natural bytes carried by a full group.
pub const NATURAL_GROUP_LEN: usize = 7;

pub const HIGH_BIT: u8 = 0x80;
pub const LOW_BITS_MASK: u8 = 0x7F;
