//! Protocol decoding modules.
//!
//! Each layer follows the same structure:
//! - `layout`: byte offsets and constants (source of truth)
//! - `reader`: safe byte access with offset tracking
//! - `parser`: domain-level decoding and encoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! `bitpack` is the 7-bit transcoder, `record` the scene schema and `frame`
//! the SysEx wrapper tying both together. Everything here is pure and
//! contains no I/O; `source` handles file access.

pub mod bitpack;
pub mod common;
pub mod frame;
pub mod record;
