//! Node references shared between the snapshot builder and the dispatcher.
//!
//! The node table is built once per distribution session by the scene
//! serializer and stays immutable until the session is reset. Update
//! messages address nodes by their index into this table.

use serde::{Deserialize, Serialize};

/// Kind tag carried by every node in the distributed scene.
///
/// Variants are in wire order: the node-type byte in the serialized scene
/// is an index into this enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Group,
    Geo,
    Light,
    Camera,
    SkinnedMesh,
}

impl NodeKind {
    /// Resolve a wire node-type index, `None` if out of range.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(NodeKind::Group),
            1 => Some(NodeKind::Geo),
            2 => Some(NodeKind::Light),
            3 => Some(NodeKind::Camera),
            4 => Some(NodeKind::SkinnedMesh),
            _ => None,
        }
    }
}

/// One entry of the session node table: the scene object's name plus its
/// kind. The name is the lookup key into the live scene graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRef {
    pub name: String,
    pub kind: NodeKind,
}

impl NodeRef {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Session-scoped mapping from wire node index to node reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeTable {
    nodes: Vec<NodeRef>,
}

impl NodeTable {
    pub fn new(nodes: Vec<NodeRef>) -> Self {
        Self { nodes }
    }

    /// Look up a node by its wire index.
    pub fn get(&self, index: u32) -> Option<&NodeRef> {
        self.nodes.get(index as usize)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
