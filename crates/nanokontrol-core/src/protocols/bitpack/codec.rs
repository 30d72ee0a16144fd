use super::layout;

/// Restore natural bytes from the 7-bit-clean wire form.
///
/// Every group of up to eight bytes starts with a bitmap whose bit `k` is
/// OR-ed back as bit 7 of the `k`-th data byte of the group.
///
/// # Examples
/// ```
/// use nanokontrol_core::protocols::bitpack::unpack;
///
/// let natural = unpack(&[0x01, 0x01, 0x02, 0x03]);
/// assert_eq!(natural, vec![0x81, 0x02, 0x03]);
/// ```
pub fn unpack(packed: &[u8]) -> Vec<u8> {
    let mut natural = Vec::with_capacity(unpacked_len(packed.len()));
    for group in packed.chunks(layout::PACKED_GROUP_LEN) {
        let (bitmap, data) = match group.split_first() {
            Some(split) => split,
            None => continue,
        };
        for (k, byte) in data.iter().enumerate() {
            let high = ((bitmap >> k) & 1) << 7;
            natural.push(byte | high);
        }
    }
    natural
}

/// Spread natural bytes over the 7-bit-clean wire form.
///
/// Unused bitmap bits of a trailing partial group stay zero, so
/// `pack(&unpack(p)) == p` for every validly packed `p`.
///
/// # Examples
/// ```
/// use nanokontrol_core::protocols::bitpack::pack;
///
/// let packed = pack(&[0x81, 0x02, 0x03]);
/// assert_eq!(packed, vec![0x01, 0x01, 0x02, 0x03]);
/// ```
pub fn pack(natural: &[u8]) -> Vec<u8> {
    let mut packed = Vec::with_capacity(packed_len(natural.len()));
    for group in natural.chunks(layout::NATURAL_GROUP_LEN) {
        let bitmap = group
            .iter()
            .enumerate()
            .fold(0u8, |bitmap, (k, byte)| {
                bitmap | (((byte & layout::HIGH_BIT) >> 7) << k)
            });
        packed.push(bitmap);
        packed.extend(group.iter().map(|byte| byte & layout::LOW_BITS_MASK));
    }
    packed
}

/// Number of natural bytes `unpack` yields for `packed_len` wire bytes.
pub const fn unpacked_len(packed_len: usize) -> usize {
    let full = packed_len / layout::PACKED_GROUP_LEN;
    let rest = packed_len % layout::PACKED_GROUP_LEN;
    full * layout::NATURAL_GROUP_LEN + rest.saturating_sub(1)
}

/// Number of wire bytes `pack` yields for `natural_len` natural bytes.
pub const fn packed_len(natural_len: usize) -> usize {
    let full = natural_len / layout::NATURAL_GROUP_LEN;
    let rest = natural_len % layout::NATURAL_GROUP_LEN;
    let tail = if rest == 0 { 0 } else { rest + 1 };
    full * layout::PACKED_GROUP_LEN + tail
}

pub fn is_seven_bit_clean(bytes: &[u8]) -> bool {
    bytes.iter().all(|byte| byte & layout::HIGH_BIT == 0)
}
