//! Coordinate conversion between the wire convention and the host scene.
//!
//! The wire format is Y-up left-handed; the host is Z-up right-handed.
//! Positions and scales swap their Y and Z components. Rotations swap
//! axes the same way, then invert (opposite handedness), then remap
//! components with sign flips. Light and camera nodes get one extra fixed
//! 90 degree rotation about their local X axis because those node kinds
//! define a different forward axis in the host application.
//!
//! The order is fixed: axis swap, then inversion, then remap, then the
//! light/camera correction.

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};

use stagelink_types::NodeKind;

/// Convert a wire-space position to the host convention.
///
/// The Y/Z swap is its own inverse.
pub fn to_host_position(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.z, v.y)
}

/// Convert a wire-space scale to the host convention. Same axis swap as
/// positions, no inversion.
pub fn to_host_scale(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.z, v.y)
}

/// Convert a wire-space unit quaternion to the host convention.
///
/// `kind` selects the extra forward-axis correction for lights and
/// cameras.
pub fn to_host_rotation(q: Quat, kind: NodeKind) -> Quat {
    let swapped = Quat::from_xyzw(q.x, q.z, q.y, q.w);
    let inv = swapped.inverse();
    let host = Quat::from_xyzw(inv.x, -inv.y, -inv.z, inv.w);

    match kind {
        NodeKind::Light | NodeKind::Camera => host * Quat::from_rotation_x(FRAC_PI_2),
        _ => host,
    }
}
