//! The fire-and-forget update stream from remote consumers.
//!
//! One connection per session, no reply path. Each frame is a raw binary
//! update message; frames are handed to the dispatcher in arrival order.

use std::io;
use std::net::{SocketAddr, TcpStream};

use log::{info, warn};

use crate::error::Result;
use crate::framing::FrameBuffer;

/// Non-blocking subscriber channel connected once per session.
pub struct Subscriber {
    stream: TcpStream,
    inbox: FrameBuffer,
    closed: bool,
}

impl Subscriber {
    /// Connect to the update publisher. A connect failure is fatal to
    /// session start.
    pub fn connect(addr: &str) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nonblocking(true)?;
        info!("subscriber connected to {}", addr);
        Ok(Self {
            stream,
            inbox: FrameBuffer::new(),
            closed: false,
        })
    }

    pub fn peer_addr(&self) -> io::Result<SocketAddr> {
        self.stream.peer_addr()
    }

    /// Whether the publisher has closed the connection.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// One poll cycle: pull available bytes and return every complete
    /// update message, in arrival order. An empty result is the normal
    /// idle case, not an error.
    ///
    /// A corrupt frame desyncs the stream past recovery: the channel is
    /// marked closed, but messages that arrived ahead of the corruption
    /// are still returned so in-order valid updates are never lost.
    pub fn poll(&mut self) -> Result<Vec<Vec<u8>>> {
        if !self.closed {
            match self.inbox.fill_from(&mut self.stream) {
                Ok(false) => {}
                Ok(true) => {
                    info!("update publisher closed the connection");
                    self.closed = true;
                }
                Err(e) => {
                    warn!("subscriber read error: {}", e);
                    self.closed = true;
                }
            }
        }

        let mut messages = Vec::new();
        loop {
            match self.inbox.next_frame() {
                Ok(Some(msg)) => messages.push(msg),
                Ok(None) => break,
                Err(e) => {
                    warn!("subscriber stream desynced, closing channel: {}", e);
                    self.inbox = FrameBuffer::new();
                    self.closed = true;
                    break;
                }
            }
        }
        Ok(messages)
    }
}
