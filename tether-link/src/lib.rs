//! UART packet transport for a partitioned embedded runtime
//!
//! Moves framed application packets between a partition's message
//! broker and a physical UART. Payloads are byte-stuffed into
//! delimited wire frames ([`tether_protocol`]); received bytes flow
//! from the UART interrupt through a lock-free queue into a polling
//! task that decodes them and hands packets to the [`Broker`].
//!
//! # Data flow
//!
//! ```text
//! application ──▶ TxPath::send ──▶ encoder ──▶ SerialTx::write_async ──▶ wire
//! wire ──▶ RX interrupt ──▶ spsc queue ──▶ RxPath::run ──▶ decoder ──▶ Broker
//! ```
//!
//! Each direction is paced by one binary [`ReadySignal`]: the transmit
//! completion interrupt releases the transmit token (at most one write
//! in flight), and the receive interrupt releases the receive token
//! (the polling task drains everything available per wake). Blocking
//! is unbounded by design; a hung peripheral stalls its path, and no
//! timeout exists at this layer.
//!
//! # Usage
//!
//! ```ignore
//! static RX_READY: ReadySignal = ReadySignal::new();
//! static TX_DONE: ReadySignal = ReadySignal::new();
//! static RX_FIFO: StaticCell<Queue<u8, 256>> = StaticCell::new();
//!
//! let (mut tx, mut rx) = tether_link::init::<_, _, 256, 256, 251>(
//!     port,
//!     &config,
//!     BusId(0),
//!     broker,
//!     RX_FIFO.init(Queue::new()),
//!     &RX_READY,
//!     &TX_DONE,
//! )?;
//!
//! spawner.spawn(poll_task(rx))?;   // wraps rx.run().await
//! tx.send(&packet).await?;
//! ```
//!
//! [`ReadySignal`]: tether_hal::ReadySignal
//! [`Broker`]: broker::Broker

#![no_std]
#![deny(unsafe_code)]

pub mod broker;
pub mod config;
pub mod link;
pub mod rx;
pub mod tx;

pub use broker::{Broker, BusId};
pub use config::{Baud, ConfigError, Device, LinkConfig, Parity};
pub use link::{init, InitError};
pub use rx::RxPath;
pub use tx::TxPath;
