//! Native property values

use crate::kind::PropertyKind;
use crate::types::*;

/// A property value in its native form. The variant determines the kind.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Integer(i32),
    Boolean(bool),
    Float(f32),
    String(String),
    Color(Color),
    ObjectReference(Option<ObjectRef>),
    LayerMask(i32),
    /// Index into the owning descriptor's member list
    Enum(i32),
    Vector2(Vector2),
    Vector3(Vector3),
    Vector4(Vector4),
    Rect(Rect),
    ArraySize(i32),
    Character(char),
    AnimationCurve(Option<AnimationCurve>),
    Bounds(Bounds),
    Gradient(Gradient),
    Quaternion(Quaternion),
    Vector2Int(Vector2Int),
    Vector3Int(Vector3Int),
    RectInt(RectInt),
    BoundsInt(BoundsInt),
}

impl PropertyValue {
    /// Kind of this value
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Integer(_) => PropertyKind::Integer,
            Self::Boolean(_) => PropertyKind::Boolean,
            Self::Float(_) => PropertyKind::Float,
            Self::String(_) => PropertyKind::String,
            Self::Color(_) => PropertyKind::Color,
            Self::ObjectReference(_) => PropertyKind::ObjectReference,
            Self::LayerMask(_) => PropertyKind::LayerMask,
            Self::Enum(_) => PropertyKind::Enum,
            Self::Vector2(_) => PropertyKind::Vector2,
            Self::Vector3(_) => PropertyKind::Vector3,
            Self::Vector4(_) => PropertyKind::Vector4,
            Self::Rect(_) => PropertyKind::Rect,
            Self::ArraySize(_) => PropertyKind::ArraySize,
            Self::Character(_) => PropertyKind::Character,
            Self::AnimationCurve(_) => PropertyKind::AnimationCurve,
            Self::Bounds(_) => PropertyKind::Bounds,
            Self::Gradient(_) => PropertyKind::Gradient,
            Self::Quaternion(_) => PropertyKind::Quaternion,
            Self::Vector2Int(_) => PropertyKind::Vector2Int,
            Self::Vector3Int(_) => PropertyKind::Vector3Int,
            Self::RectInt(_) => PropertyKind::RectInt,
            Self::BoundsInt(_) => PropertyKind::BoundsInt,
        }
    }

    /// Zero value for a kind
    pub fn default_for(kind: PropertyKind) -> Self {
        match kind {
            PropertyKind::Integer => Self::Integer(0),
            PropertyKind::Boolean => Self::Boolean(false),
            PropertyKind::Float => Self::Float(0.0),
            PropertyKind::String => Self::String(String::new()),
            PropertyKind::Color => Self::Color(Color::WHITE),
            PropertyKind::ObjectReference => Self::ObjectReference(None),
            PropertyKind::LayerMask => Self::LayerMask(0),
            PropertyKind::Enum => Self::Enum(0),
            PropertyKind::Vector2 => Self::Vector2(Vector2::default()),
            PropertyKind::Vector3 => Self::Vector3(Vector3::ZERO),
            PropertyKind::Vector4 => Self::Vector4(Vector4::default()),
            PropertyKind::Rect => Self::Rect(Rect::default()),
            PropertyKind::ArraySize => Self::ArraySize(0),
            PropertyKind::Character => Self::Character('\0'),
            PropertyKind::AnimationCurve => Self::AnimationCurve(None),
            PropertyKind::Bounds => Self::Bounds(Bounds::default()),
            PropertyKind::Gradient => Self::Gradient(Gradient::default()),
            PropertyKind::Quaternion => Self::Quaternion(Quaternion::IDENTITY),
            PropertyKind::Vector2Int => Self::Vector2Int(Vector2Int::default()),
            PropertyKind::Vector3Int => Self::Vector3Int(Vector3Int::default()),
            PropertyKind::RectInt => Self::RectInt(RectInt::default()),
            PropertyKind::BoundsInt => Self::BoundsInt(BoundsInt::default()),
        }
    }

    /// Try to get as Vector3
    pub fn as_vector3(&self) -> Option<Vector3> {
        match self {
            Self::Vector3(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as Quaternion
    pub fn as_quaternion(&self) -> Option<Quaternion> {
        match self {
            Self::Quaternion(q) => Some(*q),
            _ => None,
        }
    }

    /// Try to get as f32
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Whether every float component is finite.
    ///
    /// Integral, text and reference kinds are always finite.
    pub fn is_finite(&self) -> bool {
        fn all(components: &[f32]) -> bool {
            components.iter().all(|c| c.is_finite())
        }
        match self {
            Self::Float(f) => f.is_finite(),
            Self::Color(c) => all(&[c.r, c.g, c.b, c.a]),
            Self::Vector2(v) => all(&[v.x, v.y]),
            Self::Vector3(v) => all(&v.to_array()),
            Self::Vector4(v) => all(&[v.x, v.y, v.z, v.w]),
            Self::Quaternion(q) => all(&q.to_array()),
            Self::Rect(r) => all(&[r.x, r.y, r.width, r.height]),
            Self::Bounds(b) => all(&b.center.to_array()) && all(&b.size.to_array()),
            Self::AnimationCurve(Some(curve)) => curve
                .keys
                .iter()
                .all(|k| all(&[k.time, k.value, k.in_tangent, k.out_tangent])),
            Self::Gradient(g) => g
                .keys
                .iter()
                .all(|k| all(&[k.time, k.color.r, k.color.g, k.color.b, k.color.a])),
            _ => true,
        }
    }

    /// Try to get as an i32 for the integral kinds
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Integer(i) | Self::LayerMask(i) | Self::Enum(i) | Self::ArraySize(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<i32> for PropertyValue {
    fn from(v: i32) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f32> for PropertyValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Color> for PropertyValue {
    fn from(v: Color) -> Self {
        Self::Color(v)
    }
}

impl From<Vector2> for PropertyValue {
    fn from(v: Vector2) -> Self {
        Self::Vector2(v)
    }
}

impl From<Vector3> for PropertyValue {
    fn from(v: Vector3) -> Self {
        Self::Vector3(v)
    }
}

impl From<Vector4> for PropertyValue {
    fn from(v: Vector4) -> Self {
        Self::Vector4(v)
    }
}

impl From<Quaternion> for PropertyValue {
    fn from(v: Quaternion) -> Self {
        Self::Quaternion(v)
    }
}

impl From<Rect> for PropertyValue {
    fn from(v: Rect) -> Self {
        Self::Rect(v)
    }
}

impl From<Bounds> for PropertyValue {
    fn from(v: Bounds) -> Self {
        Self::Bounds(v)
    }
}
