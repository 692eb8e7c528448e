//! Network layer for Stagelink scene distribution.
//!
//! This crate is the protocol engine between a content-authoring host and
//! its remote scene consumers. It serves pre-serialized scene snapshots
//! over a request/reply channel and applies parameter updates streamed
//! back over a subscriber channel onto named scene nodes, converting
//! between the wire coordinate convention and the host's.
//!
//! The engine is strictly single-threaded: the host main loop drives a
//! [`Session`] by calling [`Session::tick`], and every socket operation is
//! non-blocking.

pub mod config;
pub mod convert;
pub mod dispatch;
pub mod error;
pub mod framing;
pub mod responder;
pub mod session;
pub mod subscriber;
pub mod wire;

pub use config::DistributionConfig;
pub use dispatch::{apply_update, Outcome};
pub use error::{Error, Result};
pub use responder::Responder;
pub use session::{Session, RESPONDER_INTERVAL, SUBSCRIBER_INTERVAL};
pub use subscriber::Subscriber;
