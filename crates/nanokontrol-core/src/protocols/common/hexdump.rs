use std::fmt::Write;

/// Render bytes as offset-prefixed rows of `stride` hex bytes.
///
/// # Examples
/// ```
/// use nanokontrol_core::protocols::common::hexdump::hexdump;
///
/// let dump = hexdump(&[0xF0, 0x42, 0x40], 2);
/// assert_eq!(dump, "0000 f0 42\n0002 40\n");
/// ```
pub fn hexdump(data: &[u8], stride: usize) -> String {
    let stride = stride.max(1);
    let mut out = String::with_capacity(data.len() * 3 + (data.len() / stride + 1) * 6);
    for (row, chunk) in data.chunks(stride).enumerate() {
        let _ = write!(out, "{:04x}", row * stride);
        for byte in chunk {
            let _ = write!(out, " {byte:02x}");
        }
        out.push('\n');
    }
    out
}

/// Format bytes as upper-case space-separated hex, the form `amidi -S` takes.
pub fn format_hex_bytes(data: &[u8]) -> String {
    data.iter()
        .map(|byte| format!("{byte:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
