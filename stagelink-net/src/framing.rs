//! Length-prefixed framing for the TCP channels.
//!
//! Wire format: `[u32 length (big-endian)][payload bytes]`. Payloads are
//! opaque: requests are UTF-8 keywords, replies are snapshot blobs, and
//! subscriber frames are binary update messages.

use std::io::{self, Read, Write};

/// Reject frames larger than this; nothing in the protocol comes close.
const MAX_FRAME_LEN: usize = 100_000_000;

/// Write one length-prefixed frame to a stream.
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> io::Result<()> {
    let len = payload.len() as u32;
    writer.write_all(&len.to_be_bytes())?;
    writer.write_all(payload)?;
    writer.flush()?;
    Ok(())
}

/// Append one length-prefixed frame to an outgoing byte queue.
///
/// Used where the socket is non-blocking and a frame may need several
/// partial writes to go out: queue it whole, then flush what the socket
/// accepts each poll.
pub fn encode_frame(buf: &mut Vec<u8>, payload: &[u8]) {
    buf.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    buf.extend_from_slice(payload);
}

/// Reassembles complete frames from a non-blocking byte stream.
///
/// Non-blocking reads deliver arbitrary partial chunks, so incoming bytes
/// are accumulated here and handed out one complete frame at a time.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buf: Vec<u8>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pull whatever bytes the stream currently has.
    ///
    /// Returns `Ok(true)` if the peer closed the connection. A would-block
    /// read is a normal empty poll, not an error.
    pub fn fill_from<R: Read>(&mut self, reader: &mut R) -> io::Result<bool> {
        let mut chunk = [0u8; 4096];
        loop {
            match reader.read(&mut chunk) {
                Ok(0) => return Ok(true),
                Ok(n) => self.buf.extend_from_slice(&chunk[..n]),
                Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(false),
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Extract the next complete frame, if one has fully arrived.
    pub fn next_frame(&mut self) -> io::Result<Option<Vec<u8>>> {
        if self.buf.len() < 4 {
            return Ok(None);
        }
        let len = u32::from_be_bytes([self.buf[0], self.buf[1], self.buf[2], self.buf[3]]) as usize;
        if len > MAX_FRAME_LEN {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("frame too large: {} bytes", len),
            ));
        }
        if self.buf.len() < 4 + len {
            return Ok(None);
        }
        let payload = self.buf[4..4 + len].to_vec();
        self.buf.drain(..4 + len);
        Ok(Some(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn roundtrip_single_frame() {
        let mut wire = Vec::new();
        write_frame(&mut wire, b"header").unwrap();

        let mut inbox = FrameBuffer::new();
        let closed = inbox.fill_from(&mut Cursor::new(wire)).unwrap();
        assert!(closed); // Cursor reports EOF once drained
        assert_eq!(inbox.next_frame().unwrap().as_deref(), Some(&b"header"[..]));
        assert_eq!(inbox.next_frame().unwrap(), None);
    }

    #[test]
    fn partial_delivery_reassembles() {
        let mut wire = Vec::new();
        write_frame(&mut wire, &[1, 2, 3, 4, 5]).unwrap();

        let mut inbox = FrameBuffer::new();
        let (first, rest) = wire.split_at(6);
        inbox.fill_from(&mut Cursor::new(first.to_vec())).unwrap();
        assert_eq!(inbox.next_frame().unwrap(), None);
        inbox.fill_from(&mut Cursor::new(rest.to_vec())).unwrap();
        assert_eq!(inbox.next_frame().unwrap(), Some(vec![1, 2, 3, 4, 5]));
    }

    #[test]
    fn multiple_frames_come_out_in_order() {
        let mut wire = Vec::new();
        write_frame(&mut wire, b"first").unwrap();
        write_frame(&mut wire, b"").unwrap();
        write_frame(&mut wire, b"third").unwrap();

        let mut inbox = FrameBuffer::new();
        inbox.fill_from(&mut Cursor::new(wire)).unwrap();
        assert_eq!(inbox.next_frame().unwrap().as_deref(), Some(&b"first"[..]));
        assert_eq!(inbox.next_frame().unwrap().as_deref(), Some(&b""[..]));
        assert_eq!(inbox.next_frame().unwrap().as_deref(), Some(&b"third"[..]));
        assert_eq!(inbox.next_frame().unwrap(), None);
    }

    #[test]
    fn encode_frame_matches_write_frame() {
        let mut written = Vec::new();
        write_frame(&mut written, b"payload").unwrap();

        let mut queued = Vec::new();
        encode_frame(&mut queued, b"payload");
        assert_eq!(queued, written);
    }

    #[test]
    fn oversized_length_is_rejected() {
        let mut inbox = FrameBuffer::new();
        inbox
            .fill_from(&mut Cursor::new(u32::MAX.to_be_bytes().to_vec()))
            .unwrap();
        assert!(inbox.next_frame().is_err());
    }
}
