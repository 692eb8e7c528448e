//! The request/reply channel serving snapshot buffers.
//!
//! Consumers send a UTF-8 keyword and get back the matching snapshot blob,
//! or an empty reply for anything unrecognized. Exactly one reply goes out
//! per request; the reply is empty rather than withheld when a buffer is
//! unpopulated, so the request/reply discipline is never violated.
//!
//! Replies can be far larger than the kernel send buffer (geometry blobs
//! run to tens of megabytes), so outgoing data is queued per consumer and
//! flushed with partial writes across as many polls as the socket needs.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};

use log::{debug, info, warn};

use stagelink_types::SnapshotSet;

use crate::error::Result;
use crate::framing::{encode_frame, FrameBuffer};

/// Snapshot request keywords.
pub const REQUEST_HEADER: &str = "header";
pub const REQUEST_NODES: &str = "nodes";
pub const REQUEST_OBJECTS: &str = "objects";
pub const REQUEST_TEXTURES: &str = "textures";

struct Consumer {
    stream: TcpStream,
    inbox: FrameBuffer,
    /// Queued reply bytes not yet accepted by the socket.
    outbox: Vec<u8>,
    /// Bytes remaining per queued reply, front is the oldest. A reply only
    /// counts as sent once its last byte is flushed.
    reply_bytes: VecDeque<usize>,
    peer: SocketAddr,
}

impl Consumer {
    fn new(stream: TcpStream, peer: SocketAddr) -> Self {
        Self {
            stream,
            inbox: FrameBuffer::new(),
            outbox: Vec::new(),
            reply_bytes: VecDeque::new(),
            peer,
        }
    }

    fn queue_reply(&mut self, payload: &[u8]) {
        encode_frame(&mut self.outbox, payload);
        self.reply_bytes.push_back(4 + payload.len());
    }

    /// Write as much queued reply data as the socket accepts right now.
    /// Returns the number of replies that finished flushing.
    fn flush(&mut self) -> io::Result<usize> {
        let mut completed = 0;
        while !self.outbox.is_empty() {
            match self.stream.write(&self.outbox) {
                Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
                Ok(mut n) => {
                    self.outbox.drain(..n);
                    while let Some(remaining) = self.reply_bytes.front_mut() {
                        if n < *remaining {
                            *remaining -= n;
                            break;
                        }
                        n -= *remaining;
                        self.reply_bytes.pop_front();
                        completed += 1;
                    }
                }
                Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(completed)
    }

    fn has_pending_replies(&self) -> bool {
        !self.outbox.is_empty()
    }
}

/// Non-blocking request/reply channel bound once per session.
pub struct Responder {
    listener: TcpListener,
    consumer: Option<Consumer>,
}

impl Responder {
    /// Bind the responder. A bind failure is fatal to session start.
    pub fn bind(addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;
        info!("responder listening on {}", listener.local_addr()?);
        Ok(Self {
            listener,
            consumer: None,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// One poll cycle: accept a pending consumer, resume any partially
    /// flushed reply, drain complete requests and queue one reply each,
    /// then flush again. Returns the number of replies fully delivered to
    /// the socket this cycle.
    pub fn poll(&mut self, snapshots: &SnapshotSet) -> Result<usize> {
        self.accept_consumer();

        // Take the consumer out; it goes back unless its socket died.
        let Some(mut consumer) = self.consumer.take() else {
            return Ok(0);
        };

        // Replies left over from earlier ticks go out first.
        let mut replies = match consumer.flush() {
            Ok(n) => n,
            Err(e) => {
                warn!("consumer {} write error: {}", consumer.peer, e);
                return Ok(0);
            }
        };

        let closed = match consumer.inbox.fill_from(&mut consumer.stream) {
            Ok(closed) => closed,
            Err(e) => {
                warn!("consumer {} read error: {}", consumer.peer, e);
                return Ok(replies);
            }
        };

        loop {
            match consumer.inbox.next_frame() {
                Ok(Some(request)) => {
                    let keyword = String::from_utf8_lossy(&request);
                    let reply = reply_for(&keyword, snapshots);
                    debug!(
                        "request '{}' from {}, queueing {} bytes",
                        keyword,
                        consumer.peer,
                        reply.len()
                    );
                    consumer.queue_reply(reply);
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("consumer {} sent a corrupt frame: {}", consumer.peer, e);
                    return Ok(replies);
                }
            }
        }

        match consumer.flush() {
            Ok(n) => replies += n,
            Err(e) => {
                warn!("consumer {} write error: {}", consumer.peer, e);
                return Ok(replies);
            }
        }

        // A consumer that closed its sending side may still be reading;
        // keep it until every queued reply has gone out.
        if closed && !consumer.has_pending_replies() {
            info!("consumer {} disconnected", consumer.peer);
        } else {
            self.consumer = Some(consumer);
        }
        Ok(replies)
    }

    /// Accept a newly connecting consumer. The protocol has one consumer
    /// binding per session, so a new connection replaces the old one.
    fn accept_consumer(&mut self) {
        loop {
            match self.listener.accept() {
                Ok((stream, peer)) => {
                    if let Err(e) = stream.set_nonblocking(true) {
                        warn!("could not configure consumer socket: {}", e);
                        continue;
                    }
                    if let Some(old) = self.consumer.take() {
                        info!("consumer {} replaced by {}", old.peer, peer);
                    } else {
                        info!("consumer connected from {}", peer);
                    }
                    self.consumer = Some(Consumer::new(stream, peer));
                }
                Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) => {
                    warn!("accept error: {}", e);
                    break;
                }
            }
        }
    }
}

fn reply_for<'a>(keyword: &str, snapshots: &'a SnapshotSet) -> &'a [u8] {
    match keyword {
        REQUEST_HEADER => &snapshots.header,
        REQUEST_NODES => &snapshots.nodes,
        REQUEST_OBJECTS => &snapshots.geometry,
        REQUEST_TEXTURES => &snapshots.textures,
        _ => &[],
    }
}
