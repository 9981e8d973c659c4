//! UART serial communication abstractions
//!
//! Asynchronous, interrupt-driven contracts for the transport driver.
//! The transmit side hands the device a chunk and a completion signal;
//! the receive side is armed once with a byte sink and a data-ready
//! signal. Both signals are released from interrupt context, so
//! implementations must keep that work O(1) and non-blocking.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use heapless::spsc::Producer;

/// Binary handoff token released from interrupt context.
///
/// Extra releases collapse into a single pending wake, matching
/// simple-binary-semaphore semantics: permits never accumulate.
pub type ReadySignal = Signal<CriticalSectionRawMutex, ()>;

/// Condition on which an armed receiver releases its ready signal.
///
/// The signal fires when either the delimiter byte is seen or the
/// accumulated byte count reaches `length`, whichever comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReadTrigger {
    /// Byte that marks a complete unit of work for the consumer.
    pub delimiter: u8,
    /// Byte count that forces a wake even without a delimiter.
    pub length: usize,
}

/// UART transmitter half.
pub trait SerialTx {
    /// Error type for transmit operations
    type Error;

    /// Begin an asynchronous write of `data`.
    ///
    /// The device stages the bytes itself; `data` is only borrowed for
    /// the duration of the call. When the physical transfer completes,
    /// the device releases `done` from interrupt context. At most one
    /// write may be in flight; callers guarantee this by waiting on
    /// `done` before issuing the next write.
    fn write_async(&mut self, data: &[u8], done: &'static ReadySignal) -> Result<(), Self::Error>;
}

/// UART receiver half.
///
/// `DEPTH` is the capacity of the lock-free byte queue shared between
/// the receive interrupt (producer) and the polling task (consumer).
pub trait SerialRx<const DEPTH: usize> {
    /// Error type for receive operations
    type Error;

    /// Arm continuous reception.
    ///
    /// From this point on, the receive interrupt pushes each incoming
    /// byte into `sink` and releases `ready` whenever `trigger` is
    /// met. Arming is persistent; the driver drains the consumer side
    /// in task context and never re-arms.
    fn read_async(
        &mut self,
        sink: Producer<'static, u8, DEPTH>,
        trigger: ReadTrigger,
        ready: &'static ReadySignal,
    ) -> Result<(), Self::Error>;
}

/// A full UART device: configuration, startup, and the two halves.
pub trait SerialPort<const RX_DEPTH: usize> {
    /// Error type shared by both halves
    type Error;
    /// Transmitter half
    type Tx: SerialTx<Error = Self::Error>;
    /// Receiver half
    type Rx: SerialRx<RX_DEPTH, Error = Self::Error>;

    /// Apply line configuration. Called once, before [`startup`].
    ///
    /// [`startup`]: SerialPort::startup
    fn configure(&mut self, config: &PortConfig) -> Result<(), Self::Error>;

    /// Enable the peripheral for transmit and receive (not loopback).
    fn startup(&mut self);

    /// Split into independently owned transmit and receive halves.
    fn split(self) -> (Self::Tx, Self::Rx);
}

/// UART line configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits per character
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            baudrate: 115_200,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
