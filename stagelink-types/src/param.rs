//! The parameter-type enumeration of the update protocol.

use serde::{Deserialize, Serialize};

/// Which scene property an update message targets.
///
/// This is a closed enumeration in wire order: the type byte of an update
/// message is an index into it. Every variant has a fixed payload layout,
/// exposed through [`ParameterType::field_offsets`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterType {
    Position,
    Rotation,
    Scale,
    Lock,
    HiddenLock,
    Kinematic,
    Fov,
    Aspect,
    FocusDistance,
    FocusSize,
    Aperture,
    Color,
    Intensity,
    Exposure,
    Range,
    Angle,
    BoneAnimation,
}

/// Byte offset of the first payload field, directly after the header.
pub const PAYLOAD_START: usize = 6;

const OFFSETS_VEC3: [usize; 3] = [6, 10, 14];
const OFFSETS_QUAT: [usize; 4] = [6, 10, 14, 18];
const OFFSETS_SCALAR: [usize; 1] = [6];

impl ParameterType {
    /// Resolve a wire type index, `None` if unrecognized.
    pub fn from_index(index: u8) -> Option<Self> {
        use ParameterType::*;
        match index {
            0 => Some(Position),
            1 => Some(Rotation),
            2 => Some(Scale),
            3 => Some(Lock),
            4 => Some(HiddenLock),
            5 => Some(Kinematic),
            6 => Some(Fov),
            7 => Some(Aspect),
            8 => Some(FocusDistance),
            9 => Some(FocusSize),
            10 => Some(Aperture),
            11 => Some(Color),
            12 => Some(Intensity),
            13 => Some(Exposure),
            14 => Some(Range),
            15 => Some(Angle),
            16 => Some(BoneAnimation),
            _ => None,
        }
    }

    /// Byte offsets of the 4-byte float payload fields this type consumes.
    ///
    /// Types the dispatcher does not decode (locks, kinematic flags, bone
    /// animation and the unwired light extras) report no fields.
    pub fn field_offsets(self) -> &'static [usize] {
        use ParameterType::*;
        match self {
            Position | Scale | Color => &OFFSETS_VEC3,
            Rotation => &OFFSETS_QUAT,
            Fov | Aspect | FocusDistance | FocusSize | Aperture | Intensity | Angle => {
                &OFFSETS_SCALAR
            }
            Lock | HiddenLock | Kinematic | Exposure | Range | BoneAnimation => &[],
        }
    }

    /// Minimum message length required to decode this type's payload.
    pub fn min_message_len(self) -> usize {
        self.field_offsets()
            .last()
            .map(|off| off + 4)
            .unwrap_or(PAYLOAD_START)
    }
}
