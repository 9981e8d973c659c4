//! Transmit path: caller payload to in-order escaped wire chunks.

use tether_hal::uart::{ReadySignal, SerialTx};
use tether_protocol::FrameEncoder;

/// The transmit half of a link.
///
/// `ENC` is the staging capacity for one escaped chunk; payloads whose
/// escaped form exceeds it are segmented into multiple frames, each
/// delivered to the peer's broker as its own packet in order.
pub struct TxPath<T, const ENC: usize> {
    tx: T,
    encoder: FrameEncoder<ENC>,
    done: &'static ReadySignal,
}

impl<T, const ENC: usize> TxPath<T, ENC>
where
    T: SerialTx,
{
    pub(crate) fn new(tx: T, done: &'static ReadySignal) -> Self {
        Self {
            tx,
            encoder: FrameEncoder::new(),
            done,
        }
    }

    /// Send one payload, segmenting as needed.
    ///
    /// For each chunk the call waits for the previous asynchronous
    /// write to complete (transmit token), then hands the chunk to the
    /// hardware. At most one write is ever in flight, which is what
    /// keeps chunks strictly in order. Returns once the final chunk is
    /// queued; it does not wait for its physical completion. A write
    /// rejected by the hardware returns its error with the transmit
    /// token restored, so a later send can retry.
    ///
    /// A zero-length payload goes out as a single stop-only frame,
    /// which the receiving side treats as a frame separator and does
    /// not deliver.
    pub async fn send(&mut self, payload: &[u8]) -> Result<(), T::Error> {
        self.encoder.start();
        let mut cursor = 0;

        loop {
            let chunk = self.encoder.encode_chunk(payload, &mut cursor);

            self.done.wait().await;
            if let Err(e) = self.tx.write_async(chunk, self.done) {
                // Nothing was queued, so no completion will fire.
                // Hand the token back or the link wedges.
                self.done.signal(());
                return Err(e);
            }

            #[cfg(feature = "defmt")]
            defmt::trace!("tx: queued {} wire bytes, {} raw consumed", chunk.len(), cursor);

            if cursor >= payload.len() {
                return Ok(());
            }
        }
    }
}
