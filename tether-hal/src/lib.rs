//! Tether Hardware Abstraction Layer
//!
//! This crate defines the seam between the transport driver and a
//! chip-specific UART implementation. The driver never touches
//! hardware registers; a board crate implements these traits and the
//! same transport code runs on any platform.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Transport driver (tether-link)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tether-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  Board crate (chip UART + interrupts)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The contracts encode the interrupt discipline: completion and
//! data-ready handlers run in interrupt context and may only release a
//! [`uart::ReadySignal`] or push into a lock-free queue, never block.

#![no_std]
#![deny(unsafe_code)]

pub mod uart;

pub use uart::{
    DataBits, Parity, PortConfig, ReadTrigger, ReadySignal, SerialPort, SerialRx, SerialTx,
    StopBits,
};
