//! 8-bit/7-bit transcoding for SysEx payloads.
//!
//! SysEx data bytes must stay 7-bit clean, so the device spreads every run of
//! seven full-range bytes over eight wire bytes: a leading bitmap byte holds
//! the high bit of each following byte (bit `k` for data byte `k`), and the
//! data bytes carry the low seven bits.
//!
//! `unpack` restores the natural bytes from the wire form, `pack` is its
//! exact inverse. A trailing partial group is legal in both directions: a
//! group of `1 + m` wire bytes carries `m` natural bytes. Both functions are
//! total and allocation is the only side effect.

pub mod codec;
pub mod layout;

pub use codec::{is_seven_bit_clean, pack, packed_len, unpack, unpacked_len};
