//! Wire framing for the tether serial link.
//!
//! Packets travel over the UART as escaped, delimited byte sequences:
//!
//! ```text
//! ┌──────────────────────────────┬──────┐
//! │ escaped payload bytes        │ STOP │
//! │ 0–2N bytes                   │ 1B   │
//! └──────────────────────────────┴──────┘
//! ```
//!
//! Every payload byte equal to [`STOP_BYTE`] or [`ESCAPE_BYTE`] is sent
//! as the two-byte sequence `ESCAPE_BYTE, byte ^ ESCAPE_XOR`, so a
//! correctly framed stream contains the stop byte only as a frame
//! delimiter. The codec is pure: no I/O, no allocation, fixed-capacity
//! staging buffers injected as const generics.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;

pub use frame::{FrameDecoder, FrameEncoder, ESCAPE_BYTE, ESCAPE_XOR, STOP_BYTE};
