//! Property kinds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of property kinds a behavior can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PropertyKind {
    Integer,
    Boolean,
    Float,
    String,
    Color,
    ObjectReference,
    LayerMask,
    Enum,
    Vector2,
    Vector3,
    Vector4,
    Rect,
    ArraySize,
    Character,
    AnimationCurve,
    Bounds,
    Gradient,
    Quaternion,
    Vector2Int,
    Vector3Int,
    RectInt,
    BoundsInt,
}

impl PropertyKind {
    /// Every kind, in declaration order
    pub const ALL: [PropertyKind; 22] = [
        Self::Integer,
        Self::Boolean,
        Self::Float,
        Self::String,
        Self::Color,
        Self::ObjectReference,
        Self::LayerMask,
        Self::Enum,
        Self::Vector2,
        Self::Vector3,
        Self::Vector4,
        Self::Rect,
        Self::ArraySize,
        Self::Character,
        Self::AnimationCurve,
        Self::Bounds,
        Self::Gradient,
        Self::Quaternion,
        Self::Vector2Int,
        Self::Vector3Int,
        Self::RectInt,
        Self::BoundsInt,
    ];

    /// Kind name as reported to remote callers
    pub fn name(&self) -> &'static str {
        match self {
            Self::Integer => "Integer",
            Self::Boolean => "Boolean",
            Self::Float => "Float",
            Self::String => "String",
            Self::Color => "Color",
            Self::ObjectReference => "ObjectReference",
            Self::LayerMask => "LayerMask",
            Self::Enum => "Enum",
            Self::Vector2 => "Vector2",
            Self::Vector3 => "Vector3",
            Self::Vector4 => "Vector4",
            Self::Rect => "Rect",
            Self::ArraySize => "ArraySize",
            Self::Character => "Character",
            Self::AnimationCurve => "AnimationCurve",
            Self::Bounds => "Bounds",
            Self::Gradient => "Gradient",
            Self::Quaternion => "Quaternion",
            Self::Vector2Int => "Vector2Int",
            Self::Vector3Int => "Vector3Int",
            Self::RectInt => "RectInt",
            Self::BoundsInt => "BoundsInt",
        }
    }

    /// Whether values of this kind can be written through the codec
    pub fn is_writable(&self) -> bool {
        !matches!(
            self,
            Self::ObjectReference | Self::AnimationCurve | Self::Gradient
        )
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PropertyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("Unknown property kind: {}", s))
    }
}
