//! Receive path: interrupt-fed byte queue to decoded broker packets.
//!
//! The receive interrupt pushes raw bytes into the producer side of a
//! lock-free SPSC queue and releases the receive token when the read
//! trigger is met. The polling task owns the consumer side: it wakes
//! on the token, drains whatever accumulated, feeds the decoder, and
//! delivers completed packets to the broker. All buffer work happens
//! in task context; the interrupt does none.

use heapless::spsc::Consumer;
use tether_hal::uart::ReadySignal;
use tether_protocol::FrameDecoder;

use crate::broker::{Broker, BusId};

/// Bytes moved from the queue to the decoder per batch.
const DRAIN_CHUNK: usize = 64;

/// The receive half of a link.
///
/// Constructed by [`init`]; the caller spawns [`run`] on its executor
/// as the link's polling task.
///
/// [`init`]: crate::link::init
/// [`run`]: RxPath::run
pub struct RxPath<R, B, const RAW: usize, const DEC: usize> {
    // Armed receiver half. Held so the hardware side stays alive for
    // the lifetime of the path.
    _rx: R,
    fifo: Consumer<'static, u8, RAW>,
    decoder: FrameDecoder<DEC>,
    broker: B,
    bus: BusId,
    ready: &'static ReadySignal,
}

impl<R, B, const RAW: usize, const DEC: usize> RxPath<R, B, RAW, DEC>
where
    B: Broker,
{
    pub(crate) fn new(
        rx: R,
        fifo: Consumer<'static, u8, RAW>,
        broker: B,
        bus: BusId,
        ready: &'static ReadySignal,
    ) -> Self {
        Self {
            _rx: rx,
            fifo,
            decoder: FrameDecoder::new(),
            broker,
            bus,
            ready,
        }
    }

    /// Polling loop. Runs for the lifetime of the link.
    ///
    /// Blocks on the receive token between drains. If the token is
    /// never released there is no data and the task parks forever;
    /// that is the intended idle state, not an error.
    pub async fn run(&mut self) -> ! {
        self.decoder.start();
        loop {
            self.ready.wait().await;
            self.drain();
        }
    }

    /// Drain and decode every byte currently buffered.
    ///
    /// Packets complete synchronously into the broker. A malformed or
    /// oversized frame is absorbed by the decoder (dropped) and
    /// decoding continues at the next delimiter; nothing propagates
    /// upward because there is no transport-level retransmission.
    pub fn drain(&mut self) {
        let Self {
            fifo,
            decoder,
            broker,
            bus,
            ..
        } = self;

        loop {
            let mut batch = [0u8; DRAIN_CHUNK];
            let mut count = 0;
            while count < batch.len() {
                match fifo.dequeue() {
                    Some(byte) => {
                        batch[count] = byte;
                        count += 1;
                    }
                    None => break,
                }
            }
            if count == 0 {
                break;
            }

            #[cfg(feature = "defmt")]
            defmt::trace!("rx: draining {} bytes", count);

            decoder.feed(&batch[..count], &mut |packet| {
                broker.receive_packet(*bus, packet);
            });
        }
    }
}
