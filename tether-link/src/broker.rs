//! Delivery seam toward the system message router.

/// Logical channel tag attached to decoded packets.
///
/// The runtime assigns one bus identifier per link at initialization;
/// the broker uses it to route packets to the right partition queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusId(pub u8);

/// System-wide message router receiving decoded packets.
///
/// Called synchronously from the polling task, one call per completed
/// packet. The packet slice borrows the driver's decode buffer and is
/// reused immediately after the call returns, so implementations must
/// copy what they keep. Implementations must not block indefinitely;
/// that would stall the receive loop.
pub trait Broker {
    /// Deliver one decoded packet arriving on `bus`.
    fn receive_packet(&mut self, bus: BusId, packet: &[u8]);
}
