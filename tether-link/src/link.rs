//! Driver lifecycle: wiring buffers, tokens, and the UART together.

use heapless::spsc::Queue;
use tether_hal::uart::{ReadTrigger, ReadySignal, SerialPort, SerialRx};
use tether_protocol::STOP_BYTE;

use crate::broker::{Broker, BusId};
use crate::config::{ConfigError, LinkConfig};
use crate::rx::RxPath;
use crate::tx::TxPath;

/// Failure to bring a link up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError<E> {
    /// Rejected configuration; nothing was touched
    Config(ConfigError),
    /// The UART refused configuration or arming
    Port(E),
}

/// Bring up one serial link.
///
/// Validates and applies `config`, starts the UART, arms continuous
/// reception into `fifo` (waking on [`STOP_BYTE`] or half a queue of
/// pending bytes, whichever first), and primes the transmit token so
/// the first [`send`] proceeds without an external completion. The
/// receive token starts empty; the polling task sleeps until the first
/// receive interrupt.
///
/// Consumes the port, so a link can only be initialized once. The
/// returned paths own all mutable state; no globals, and multiple
/// links on different ports coexist.
///
/// Capacities: `RAW` is the interrupt-to-task byte queue, `ENC` the
/// escaped-chunk staging buffer (worst case two wire bytes per raw
/// byte plus the delimiter), `DEC` the maximum decoded packet size.
///
/// [`send`]: TxPath::send
#[allow(clippy::type_complexity)]
pub fn init<P, B, const RAW: usize, const ENC: usize, const DEC: usize>(
    mut port: P,
    config: &LinkConfig,
    bus: BusId,
    broker: B,
    fifo: &'static mut Queue<u8, RAW>,
    rx_ready: &'static ReadySignal,
    tx_done: &'static ReadySignal,
) -> Result<(TxPath<P::Tx, ENC>, RxPath<P::Rx, B, RAW, DEC>), InitError<P::Error>>
where
    P: SerialPort<RAW>,
    B: Broker,
{
    let line = config.port_config().map_err(InitError::Config)?;

    port.configure(&line).map_err(InitError::Port)?;
    port.startup();

    let (tx, mut rx) = port.split();
    let (producer, consumer) = fifo.split();

    rx.read_async(
        producer,
        ReadTrigger {
            delimiter: STOP_BYTE,
            length: RAW / 2,
        },
        rx_ready,
    )
    .map_err(InitError::Port)?;

    // One free transmit slot: the first send must not block.
    tx_done.signal(());

    #[cfg(feature = "defmt")]
    defmt::info!("link up: {} @ {} baud", config.device, config.baud.bits_per_second());

    Ok((
        TxPath::new(tx, tx_done),
        RxPath::new(rx, consumer, broker, bus, rx_ready),
    ))
}
