//! Escaping state machines for frame encoding and decoding.
//!
//! The encoder and decoder are separate types with separate state so a
//! full-duplex link can run both directions concurrently without one
//! session corrupting the other.

/// Frame delimiter. Appears on the wire only at the end of a frame.
pub const STOP_BYTE: u8 = 0xC0;

/// Escape marker introducing a transformed payload byte.
pub const ESCAPE_BYTE: u8 = 0x7D;

/// XOR constant applied to escaped payload bytes.
pub const ESCAPE_XOR: u8 = 0x20;

/// Returns true for bytes that must be escaped on the wire.
#[inline]
fn is_reserved(byte: u8) -> bool {
    byte == STOP_BYTE || byte == ESCAPE_BYTE
}

/// Frame encoder with an internal staging buffer of `N` bytes.
///
/// One encoder session covers one payload, possibly split over several
/// chunks when the escaped form does not fit the staging buffer. The
/// caller owns the payload and a cursor; [`encode_chunk`] advances the
/// cursor by the number of raw bytes consumed, so the payload is done
/// when `cursor == payload.len()`.
///
/// `N` must be at least 3: an escaped byte plus the terminator.
///
/// [`encode_chunk`]: FrameEncoder::encode_chunk
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameEncoder<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> Default for FrameEncoder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FrameEncoder<N> {
    /// Create a new encoder.
    pub const fn new() -> Self {
        const {
            assert!(N >= 3, "staging buffer must hold an escape pair and the stop byte");
        }
        Self { buf: [0; N], len: 0 }
    }

    /// Reset staging state for a new payload.
    pub fn start(&mut self) {
        self.len = 0;
    }

    /// Encode the next chunk of `payload` starting at `*cursor`.
    ///
    /// Consumes payload bytes until the staging buffer cannot hold the
    /// next byte's worst case plus the terminator, or the payload is
    /// exhausted, then appends [`STOP_BYTE`]. An escape pair is never
    /// split across chunks. Returns the encoded chunk; a fully consumed
    /// payload leaves `*cursor == payload.len()`.
    ///
    /// A zero-length payload yields a single stop-only frame.
    pub fn encode_chunk(&mut self, payload: &[u8], cursor: &mut usize) -> &[u8] {
        self.len = 0;

        while *cursor < payload.len() {
            let byte = payload[*cursor];
            let needed = if is_reserved(byte) { 2 } else { 1 };

            // Keep room for the terminating stop byte.
            if self.len + needed + 1 > N {
                break;
            }

            if needed == 2 {
                self.buf[self.len] = ESCAPE_BYTE;
                self.buf[self.len + 1] = byte ^ ESCAPE_XOR;
            } else {
                self.buf[self.len] = byte;
            }
            self.len += needed;
            *cursor += 1;
        }

        self.buf[self.len] = STOP_BYTE;
        self.len += 1;

        &self.buf[..self.len]
    }
}

/// Frame decoder with an output buffer of `N` bytes.
///
/// Feed it raw wire bytes in arbitrary slices; each completed frame is
/// handed to the sink as an unescaped packet. Decoder state survives
/// across calls, so an escape sequence may straddle two deliveries.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameDecoder<const N: usize> {
    buf: [u8; N],
    len: usize,
    /// Previous byte was the escape marker.
    escape: bool,
    /// Current packet overran the output buffer; discard until the
    /// next stop byte.
    overflow: bool,
}

impl<const N: usize> Default for FrameDecoder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FrameDecoder<N> {
    /// Create a new decoder.
    pub const fn new() -> Self {
        Self {
            buf: [0; N],
            len: 0,
            escape: false,
            overflow: false,
        }
    }

    /// Reset cursor and flags for a new decode session.
    pub fn start(&mut self) {
        self.len = 0;
        self.escape = false;
        self.overflow = false;
    }

    /// Decode `raw` wire bytes, invoking `sink` once per completed
    /// packet.
    ///
    /// An oversized packet (no stop byte before the output buffer
    /// fills) is dropped without delivery and decoding resumes at the
    /// next stop byte. Stop-only frames are treated as frame separators
    /// and not delivered.
    pub fn feed<S: FnMut(&[u8])>(&mut self, raw: &[u8], sink: &mut S) {
        for &byte in raw {
            if self.escape {
                self.escape = false;
                self.emit(byte ^ ESCAPE_XOR);
            } else if byte == ESCAPE_BYTE {
                self.escape = true;
            } else if byte == STOP_BYTE {
                if !self.overflow && self.len > 0 {
                    sink(&self.buf[..self.len]);
                }
                self.len = 0;
                self.overflow = false;
            } else {
                self.emit(byte);
            }
        }
    }

    fn emit(&mut self, byte: u8) {
        if self.overflow {
            return;
        }
        if self.len == N {
            self.overflow = true;
            return;
        }
        self.buf[self.len] = byte;
        self.len += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use heapless::Vec;

    const ENC: usize = 16;
    const DEC: usize = 32;

    fn decode_all(stream: &[u8]) -> Vec<Vec<u8, DEC>, 8> {
        let mut decoder = FrameDecoder::<DEC>::new();
        decoder.start();
        let mut packets: Vec<Vec<u8, DEC>, 8> = Vec::new();
        decoder.feed(stream, &mut |packet| {
            let mut copy = Vec::new();
            copy.extend_from_slice(packet).unwrap();
            packets.push(copy).unwrap();
        });
        packets
    }

    #[test]
    fn encode_plain_payload() {
        let mut encoder = FrameEncoder::<ENC>::new();
        encoder.start();
        let mut cursor = 0;
        let chunk = encoder.encode_chunk(&[0x01, 0x02, 0x03], &mut cursor);

        assert_eq!(chunk, &[0x01, 0x02, 0x03, STOP_BYTE]);
        assert_eq!(cursor, 3);
    }

    #[test]
    fn encode_escapes_reserved_bytes() {
        let mut encoder = FrameEncoder::<ENC>::new();
        encoder.start();
        let mut cursor = 0;
        let chunk = encoder.encode_chunk(&[0x10, 0x20, STOP_BYTE, 0x30], &mut cursor);

        assert_eq!(chunk, &[0x10, 0x20, ESCAPE_BYTE, STOP_BYTE ^ ESCAPE_XOR, 0x30, STOP_BYTE]);
        assert_eq!(cursor, 4);
    }

    #[test]
    fn encode_empty_payload_is_stop_only() {
        let mut encoder = FrameEncoder::<ENC>::new();
        encoder.start();
        let mut cursor = 0;
        let chunk = encoder.encode_chunk(&[], &mut cursor);

        assert_eq!(chunk, &[STOP_BYTE]);
        assert_eq!(cursor, 0);
    }

    #[test]
    fn encode_never_splits_escape_pair() {
        // Staging holds 4 bytes: three plain bytes fit with the stop
        // byte, but an escape pair after two plain bytes does not.
        let mut encoder = FrameEncoder::<4>::new();
        encoder.start();
        let mut cursor = 0;

        let chunk = encoder.encode_chunk(&[0x01, 0x02, STOP_BYTE], &mut cursor);
        assert_eq!(chunk, &[0x01, 0x02, STOP_BYTE]);
        assert_eq!(cursor, 2);

        let chunk = encoder.encode_chunk(&[0x01, 0x02, STOP_BYTE], &mut cursor);
        assert_eq!(chunk, &[ESCAPE_BYTE, STOP_BYTE ^ ESCAPE_XOR, STOP_BYTE]);
        assert_eq!(cursor, 3);
    }

    #[test]
    fn reserved_only_payload_has_single_unescaped_stop() {
        for len in 0..DEC {
            let mut payload: Vec<u8, DEC> = Vec::new();
            for i in 0..len {
                let byte = if i % 2 == 0 { STOP_BYTE } else { ESCAPE_BYTE };
                payload.push(byte).unwrap();
            }

            let mut encoder = FrameEncoder::<128>::new();
            encoder.start();
            let mut cursor = 0;
            let chunk = encoder.encode_chunk(&payload, &mut cursor);
            assert_eq!(cursor, len);

            let mut unescaped_stops = 0;
            let mut escape = false;
            for &b in chunk {
                if escape {
                    escape = false;
                } else if b == ESCAPE_BYTE {
                    escape = true;
                } else if b == STOP_BYTE {
                    unescaped_stops += 1;
                }
            }
            assert_eq!(unescaped_stops, 1);
            assert_eq!(chunk[chunk.len() - 1], STOP_BYTE);
        }
    }

    #[test]
    fn decode_unescapes_and_delivers() {
        let packets = decode_all(&[0x10, 0x20, ESCAPE_BYTE, 0xE0, 0x30, STOP_BYTE]);
        assert_eq!(packets.len(), 1);
        assert_eq!(&packets[0][..], &[0x10, 0x20, 0xC0, 0x30]);
    }

    #[test]
    fn decode_suppresses_stop_only_frames() {
        let packets = decode_all(&[STOP_BYTE, STOP_BYTE, 0x01, STOP_BYTE, STOP_BYTE]);
        assert_eq!(packets.len(), 1);
        assert_eq!(&packets[0][..], &[0x01]);
    }

    #[test]
    fn decode_escape_straddles_calls() {
        let mut decoder = FrameDecoder::<DEC>::new();
        decoder.start();
        let mut packets: Vec<Vec<u8, DEC>, 4> = Vec::new();
        let mut sink = |packet: &[u8]| {
            let mut copy = Vec::new();
            copy.extend_from_slice(packet).unwrap();
            packets.push(copy).unwrap();
        };

        decoder.feed(&[0x01, ESCAPE_BYTE], &mut sink);
        decoder.feed(&[STOP_BYTE ^ ESCAPE_XOR, STOP_BYTE], &mut sink);

        assert_eq!(packets.len(), 1);
        assert_eq!(&packets[0][..], &[0x01, STOP_BYTE]);
    }

    #[test]
    fn decode_drops_oversized_packet_and_recovers() {
        let mut stream: Vec<u8, 64> = Vec::new();
        // More payload bytes than the decoder can hold, no stop byte.
        for _ in 0..DEC + 4 {
            stream.push(0x11).unwrap();
        }
        stream.push(STOP_BYTE).unwrap();
        // A well-formed frame right after.
        stream.extend_from_slice(&[0x42, 0x43, STOP_BYTE]).unwrap();

        let packets = decode_all(&stream);
        assert_eq!(packets.len(), 1);
        assert_eq!(&packets[0][..], &[0x42, 0x43]);
    }

    #[test]
    fn chunked_encode_concatenates_through_decode() {
        let mut payload: Vec<u8, 64> = Vec::new();
        for i in 0..40u8 {
            // Sprinkle reserved bytes through the payload.
            let byte = if i % 5 == 0 { STOP_BYTE } else { i };
            payload.push(byte).unwrap();
        }

        let mut encoder = FrameEncoder::<ENC>::new();
        encoder.start();
        let mut cursor = 0;
        let mut stream: Vec<u8, 256> = Vec::new();
        let mut chunks = 0;
        while cursor < payload.len() {
            let chunk = encoder.encode_chunk(&payload, &mut cursor);
            stream.extend_from_slice(chunk).unwrap();
            chunks += 1;
        }
        assert!(chunks > 1, "payload must span multiple chunks");

        let packets = decode_all(&stream);
        assert_eq!(packets.len(), chunks);
        let mut reassembled: Vec<u8, 64> = Vec::new();
        for packet in &packets {
            reassembled.extend_from_slice(packet).unwrap();
        }
        assert_eq!(reassembled, payload);
    }
}
