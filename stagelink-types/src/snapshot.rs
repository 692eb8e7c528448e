//! Pre-serialized scene snapshot buffers.

/// The four opaque byte blobs served to consumers on request, plus the
/// object count reported by the serializer.
///
/// Built by the external scene serializer before a session starts; the
/// protocol engine serves them verbatim and never inspects their contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotSet {
    pub header: Vec<u8>,
    pub nodes: Vec<u8>,
    pub geometry: Vec<u8>,
    pub textures: Vec<u8>,
    pub object_count: u32,
}

impl SnapshotSet {
    /// Whether the set is complete enough to start a session: a header, a
    /// node list, and at least one serialized object. Geometry and texture
    /// buffers may legitimately be empty.
    pub fn is_populated(&self) -> bool {
        self.object_count > 0 && !self.header.is_empty() && !self.nodes.is_empty()
    }
}
