//! Link configuration and its mapping onto the UART line settings.
//!
//! The configuration surface mirrors what the partition runtime hands
//! the driver: a device selector, a baud rate from a closed set, an
//! optional parity mode, and a numeric data-bit count. Anything the
//! hardware cannot honor fails [`init`] fast instead of silently
//! substituting a default.
//!
//! [`init`]: crate::link::init

use tether_hal::uart::{DataBits, Parity as LineParity, PortConfig, StopBits};

/// UART instance selector.
///
/// Identifies which of the fixed on-chip UARTs this link is bound to.
/// The board crate maps it to a concrete peripheral when constructing
/// the [`SerialPort`] handed to [`init`].
///
/// [`SerialPort`]: tether_hal::SerialPort
/// [`init`]: crate::link::init
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Device {
    Uart0,
    Uart1,
    Uart2,
    Uart3,
    Uart4,
    Uart5,
}

/// Supported baud rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Baud {
    B9600,
    B19200,
    B38400,
    B57600,
    B115200,
    B230400,
}

impl Baud {
    /// Rate in bits per second.
    pub fn bits_per_second(self) -> u32 {
        match self {
            Baud::B9600 => 9_600,
            Baud::B19200 => 19_200,
            Baud::B38400 => 38_400,
            Baud::B57600 => 57_600,
            Baud::B115200 => 115_200,
            Baud::B230400 => 230_400,
        }
    }
}

/// Parity selection when parity is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    Even,
    Odd,
}

/// Configuration for one serial link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    /// UART instance this link is bound to
    pub device: Device,
    /// Line speed
    pub baud: Baud,
    /// Parity mode; `None` disables the parity bit
    pub parity: Option<Parity>,
    /// Data bits per character (7, 8, or 9)
    pub data_bits: u8,
}

impl LinkConfig {
    /// Conventional 8N1 configuration on the given device.
    pub fn new(device: Device, baud: Baud) -> Self {
        Self {
            device,
            baud,
            parity: None,
            data_bits: 8,
        }
    }

    /// Map onto the UART line settings, rejecting unsupported values.
    pub fn port_config(&self) -> Result<PortConfig, ConfigError> {
        let data_bits = match self.data_bits {
            7 => DataBits::Seven,
            8 => DataBits::Eight,
            9 => DataBits::Nine,
            other => return Err(ConfigError::UnsupportedDataBits(other)),
        };

        let parity = match self.parity {
            None => LineParity::None,
            Some(Parity::Even) => LineParity::Even,
            Some(Parity::Odd) => LineParity::Odd,
        };

        Ok(PortConfig {
            baudrate: self.baud.bits_per_second(),
            data_bits,
            parity,
            stop_bits: StopBits::One,
        })
    }
}

/// Rejected link configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Data-bit count outside the supported 7..=9 range
    UnsupportedDataBits(u8),
}
