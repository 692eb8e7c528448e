//! # stagelink-types
//!
//! Shared type definitions for the Stagelink scene distribution system.
//! This crate holds the data model that the protocol engine
//! (`stagelink-net`) and the host application both depend on: node
//! references, the parameter-type enumeration, snapshot buffers, and the
//! narrow scene-graph traits the host implements.

mod node;
mod param;
mod scene;
mod snapshot;

pub use node::{NodeKind, NodeRef, NodeTable};
pub use param::ParameterType;
pub use scene::{SceneGraph, SceneObject};
pub use snapshot::SnapshotSet;
