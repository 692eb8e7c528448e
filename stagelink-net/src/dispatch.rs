//! Applies decoded update messages to the host scene graph.
//!
//! Stateless per message: resolve the node, resolve the parameter type,
//! decode the payload, convert coordinates, write through the scene-graph
//! trait. Failures here are per-message; the transport loop logs them and
//! moves on.

use log::{debug, warn};

use stagelink_types::{NodeTable, ParameterType, SceneGraph};

use crate::convert;
use crate::error::{Error, Result};
use crate::wire;

/// Wire intensity is normalized; the host wants absolute units.
pub const INTENSITY_SCALE: f32 = 100.0;

/// What the dispatcher did with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Payload written to the scene object.
    Applied(ParameterType),
    /// The named object no longer exists in the scene graph; the update
    /// was skipped. Not an error: the snapshot is older than the scene.
    MissingObject,
    /// Recognized type with no host-side equivalent; intentionally a no-op.
    Ignored(ParameterType),
    /// Decoded and logged for diagnostics only, not wired to a property.
    Observed(ParameterType),
}

/// Decode one raw update message and apply it to the scene.
pub fn apply_update(
    raw: &[u8],
    nodes: &NodeTable,
    scene: &mut dyn SceneGraph,
) -> Result<Outcome> {
    let header = wire::decode_header(raw)?;

    let node = nodes.get(header.node_index).ok_or(Error::UnknownNode {
        index: header.node_index,
        count: nodes.len(),
    })?;

    let param = ParameterType::from_index(header.param_index)
        .ok_or(Error::UnknownParameterType(header.param_index))?;

    let Some(object) = scene.object_mut(&node.name) else {
        warn!(
            "scene object '{}' not found, skipping {:?} update",
            node.name, param
        );
        return Ok(Outcome::MissingObject);
    };

    use ParameterType::*;
    match param {
        Position => {
            let v = wire::decode_vec3(raw)?;
            object.set_position(convert::to_host_position(v));
        }
        Rotation => {
            let q = wire::decode_quat(raw)?;
            object.set_rotation(convert::to_host_rotation(q, node.kind));
        }
        Scale => {
            let v = wire::decode_vec3(raw)?;
            object.set_scale(convert::to_host_scale(v));
        }
        Color => {
            // Written as-is, color channels have no axis convention.
            let v = wire::decode_vec3(raw)?;
            object.set_color([v.x, v.y, v.z]);
        }
        Intensity => {
            let v = wire::decode_f32(raw, 6)?;
            object.set_intensity(v * INTENSITY_SCALE);
        }
        Angle => {
            let degrees = wire::decode_f32(raw, 6)?;
            object.set_spot_angle(degrees.to_radians());
        }
        Lock | HiddenLock | Kinematic | Exposure | Range | BoneAnimation => {
            // No host-side equivalent; recognized so the stream keeps flowing.
            return Ok(Outcome::Ignored(param));
        }
        Fov | Aspect | FocusDistance | FocusSize | Aperture => {
            let v = wire::decode_f32(raw, 6)?;
            debug!("{param:?} = {v} for '{}' (not applied)", node.name);
            return Ok(Outcome::Observed(param));
        }
    }

    debug!("applied {param:?} to '{}'", node.name);
    Ok(Outcome::Applied(param))
}
