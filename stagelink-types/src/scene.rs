//! The seam between the protocol engine and the host scene graph.
//!
//! The host application implements these traits; the dispatcher only ever
//! mutates the scene through them. Lookups are by node name, the same name
//! recorded in the session node table.

use glam::{Quat, Vec3};

/// A live scene object the dispatcher can write to.
///
/// Transform setters receive values already converted to the host
/// coordinate convention. `set_spot_angle` receives radians,
/// `set_intensity` absolute host units.
pub trait SceneObject {
    fn set_position(&mut self, position: Vec3);
    fn set_rotation(&mut self, rotation: Quat);
    fn set_scale(&mut self, scale: Vec3);
    fn set_color(&mut self, rgb: [f32; 3]);
    fn set_intensity(&mut self, intensity: f32);
    fn set_spot_angle(&mut self, radians: f32);
}

/// Name-based lookup into the host scene graph.
pub trait SceneGraph {
    /// Find a live object by name. Returns `None` if the object has been
    /// renamed or deleted since the snapshot was built.
    fn object_mut(&mut self, name: &str) -> Option<&mut dyn SceneObject>;
}
