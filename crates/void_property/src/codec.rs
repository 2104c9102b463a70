//! Property codec
//!
//! `decode` turns a transport [`Value`] into a [`PropertyValue`] of a known
//! kind, checking the value's shape. `encode` goes the other way and never
//! fails.
//!
//! Shapes per kind:
//!
//! ```text
//! Integer, LayerMask, ArraySize    number
//! Enum                             number (index) or string (member name)
//! Boolean                          bool
//! Float                            number
//! String, Character                string
//! Color                            {r, g, b, a}
//! Vector2/3/4, Vector2Int/3Int     {x, y[, z][, w]}
//! Rect, RectInt                    {x, y, width, height}
//! Bounds                           {center: {x,y,z}, size: {x,y,z}}
//! BoundsInt                        {position: {x,y,z}, size: {x,y,z}}
//! Quaternion                       {x, y, z, w}
//! ObjectReference                  name or null         (encode only)
//! AnimationCurve, Gradient         marker string        (encode only)
//! ```
//!
//! Extra map fields are ignored. Values are never coerced between shapes.

use crate::error::{CodecError, CodecResult};
use crate::kind::PropertyKind;
use crate::property::PropertyValue;
use crate::types::*;
use crate::value::Value;

/// Marker string for animation curves
pub const ANIMATION_CURVE_MARKER: &str = "AnimationCurve";
/// Marker string for gradients
pub const GRADIENT_MARKER: &str = "Gradient";

/// Convert a transport number to `i32`.
///
/// Truncates toward zero and saturates at `i32::MIN`/`i32::MAX`.
#[inline]
pub fn truncate_to_i32(n: f64) -> i32 {
    n as i32
}

/// Decode a transport value as a property of `kind`.
///
/// `members` is the declared member list of an Enum property and is ignored
/// for every other kind.
pub fn decode(kind: PropertyKind, value: &Value, members: &[String]) -> CodecResult<PropertyValue> {
    let decoded = match kind {
        PropertyKind::Integer => PropertyValue::Integer(int(kind, value)?),
        PropertyKind::LayerMask => PropertyValue::LayerMask(int(kind, value)?),
        PropertyKind::ArraySize => {
            let size = int(kind, value)?;
            if size < 0 {
                return Err(CodecError::malformed(kind, format!("array size {} is negative", size)));
            }
            PropertyValue::ArraySize(size)
        }
        PropertyKind::Enum => PropertyValue::Enum(enum_index(value, members)?),
        PropertyKind::Boolean => match value {
            Value::Bool(b) => PropertyValue::Boolean(*b),
            other => return Err(expected(kind, "bool", other)),
        },
        PropertyKind::Float => PropertyValue::Float(float(kind, number(kind, value)?)?),
        PropertyKind::String => match value {
            Value::String(s) => PropertyValue::String(s.clone()),
            other => return Err(expected(kind, "string", other)),
        },
        PropertyKind::Character => match value {
            Value::String(s) => match s.chars().next() {
                Some(c) => PropertyValue::Character(c),
                None => return Err(CodecError::malformed(kind, "empty string")),
            },
            other => return Err(expected(kind, "string", other)),
        },
        PropertyKind::Color => PropertyValue::Color(Color {
            r: float_field(kind, value, "", "r")?,
            g: float_field(kind, value, "", "g")?,
            b: float_field(kind, value, "", "b")?,
            a: float_field(kind, value, "", "a")?,
        }),
        PropertyKind::Vector2 => PropertyValue::Vector2(Vector2 {
            x: float_field(kind, value, "", "x")?,
            y: float_field(kind, value, "", "y")?,
        }),
        PropertyKind::Vector3 => PropertyValue::Vector3(vector3(kind, value, "")?),
        PropertyKind::Vector4 => PropertyValue::Vector4(Vector4 {
            x: float_field(kind, value, "", "x")?,
            y: float_field(kind, value, "", "y")?,
            z: float_field(kind, value, "", "z")?,
            w: float_field(kind, value, "", "w")?,
        }),
        PropertyKind::Vector2Int => PropertyValue::Vector2Int(Vector2Int {
            x: int_field(kind, value, "", "x")?,
            y: int_field(kind, value, "", "y")?,
        }),
        PropertyKind::Vector3Int => PropertyValue::Vector3Int(vector3_int(kind, value, "")?),
        PropertyKind::Rect => PropertyValue::Rect(Rect {
            x: float_field(kind, value, "", "x")?,
            y: float_field(kind, value, "", "y")?,
            width: float_field(kind, value, "", "width")?,
            height: float_field(kind, value, "", "height")?,
        }),
        PropertyKind::RectInt => PropertyValue::RectInt(RectInt {
            x: int_field(kind, value, "", "x")?,
            y: int_field(kind, value, "", "y")?,
            width: int_field(kind, value, "", "width")?,
            height: int_field(kind, value, "", "height")?,
        }),
        PropertyKind::Bounds => PropertyValue::Bounds(Bounds {
            center: vector3(kind, nested(kind, value, "center")?, "center.")?,
            size: vector3(kind, nested(kind, value, "size")?, "size.")?,
        }),
        PropertyKind::BoundsInt => PropertyValue::BoundsInt(BoundsInt {
            position: vector3_int(kind, nested(kind, value, "position")?, "position.")?,
            size: vector3_int(kind, nested(kind, value, "size")?, "size.")?,
        }),
        PropertyKind::Quaternion => PropertyValue::Quaternion(Quaternion {
            x: float_field(kind, value, "", "x")?,
            y: float_field(kind, value, "", "y")?,
            z: float_field(kind, value, "", "z")?,
            w: float_field(kind, value, "", "w")?,
        }),
        PropertyKind::ObjectReference | PropertyKind::AnimationCurve | PropertyKind::Gradient => {
            return Err(CodecError::Unsupported(kind))
        }
    };
    Ok(decoded)
}

/// Encode a property value for transport
pub fn encode(value: &PropertyValue) -> Value {
    match value {
        PropertyValue::Integer(i)
        | PropertyValue::LayerMask(i)
        | PropertyValue::Enum(i)
        | PropertyValue::ArraySize(i) => Value::from(*i),
        PropertyValue::Boolean(b) => Value::Bool(*b),
        PropertyValue::Float(f) => Value::from(*f),
        PropertyValue::String(s) => Value::String(s.clone()),
        PropertyValue::Character(c) => Value::String(c.to_string()),
        PropertyValue::Color(c) => [("r", c.r), ("g", c.g), ("b", c.b), ("a", c.a)]
            .into_iter()
            .collect(),
        PropertyValue::Vector2(v) => [("x", v.x), ("y", v.y)].into_iter().collect(),
        PropertyValue::Vector3(v) => encode_vector3(v),
        PropertyValue::Vector4(v) => [("x", v.x), ("y", v.y), ("z", v.z), ("w", v.w)]
            .into_iter()
            .collect(),
        PropertyValue::Vector2Int(v) => [("x", v.x), ("y", v.y)].into_iter().collect(),
        PropertyValue::Vector3Int(v) => encode_vector3_int(v),
        PropertyValue::Rect(r) => [("x", r.x), ("y", r.y), ("width", r.width), ("height", r.height)]
            .into_iter()
            .collect(),
        PropertyValue::RectInt(r) => [("x", r.x), ("y", r.y), ("width", r.width), ("height", r.height)]
            .into_iter()
            .collect(),
        PropertyValue::Bounds(b) => [("center", encode_vector3(&b.center)), ("size", encode_vector3(&b.size))]
            .into_iter()
            .collect(),
        PropertyValue::BoundsInt(b) => [
            ("position", encode_vector3_int(&b.position)),
            ("size", encode_vector3_int(&b.size)),
        ]
        .into_iter()
        .collect(),
        PropertyValue::Quaternion(q) => [("x", q.x), ("y", q.y), ("z", q.z), ("w", q.w)]
            .into_iter()
            .collect(),
        PropertyValue::ObjectReference(reference) => {
            Value::from(reference.as_ref().map(|r| r.name.clone()))
        }
        PropertyValue::AnimationCurve(curve) => {
            Value::from(curve.as_ref().map(|_| ANIMATION_CURVE_MARKER))
        }
        PropertyValue::Gradient(_) => Value::from(GRADIENT_MARKER),
    }
}

fn encode_vector3(v: &Vector3) -> Value {
    [("x", v.x), ("y", v.y), ("z", v.z)].into_iter().collect()
}

fn encode_vector3_int(v: &Vector3Int) -> Value {
    [("x", v.x), ("y", v.y), ("z", v.z)].into_iter().collect()
}

fn expected(kind: PropertyKind, shape: &str, got: &Value) -> CodecError {
    CodecError::malformed(kind, format!("expected {}, got {}", shape, got.shape_name()))
}

fn number(kind: PropertyKind, value: &Value) -> CodecResult<f64> {
    value.as_number().ok_or_else(|| expected(kind, "number", value))
}

fn float(kind: PropertyKind, n: f64) -> CodecResult<f32> {
    let f = n as f32;
    if f.is_finite() {
        Ok(f)
    } else {
        Err(CodecError::malformed(kind, format!("{} is out of range", n)))
    }
}

fn int(kind: PropertyKind, value: &Value) -> CodecResult<i32> {
    number(kind, value).map(truncate_to_i32)
}

fn enum_index(value: &Value, members: &[String]) -> CodecResult<i32> {
    let kind = PropertyKind::Enum;
    match value {
        Value::Number(n) => {
            let index = truncate_to_i32(*n);
            let in_range = index >= 0 && (members.is_empty() || (index as usize) < members.len());
            if in_range {
                Ok(index)
            } else {
                Err(CodecError::malformed(
                    kind,
                    format!("index {} is outside 0..{}", index, members.len()),
                ))
            }
        }
        Value::String(name) => members
            .iter()
            .position(|member| member == name)
            .map(|index| index as i32)
            .ok_or_else(|| CodecError::EnumMemberNotFound {
                member: name.clone(),
            }),
        other => Err(expected(kind, "number or string", other)),
    }
}

fn nested<'a>(kind: PropertyKind, value: &'a Value, name: &str) -> CodecResult<&'a Value> {
    let map = value.as_map().ok_or_else(|| expected(kind, "map", value))?;
    match map.get(name) {
        Some(inner @ Value::Map(_)) => Ok(inner),
        Some(other) => Err(CodecError::malformed(
            kind,
            format!("field `{}` must be a map, got {}", name, other.shape_name()),
        )),
        None => Err(CodecError::malformed(kind, format!("missing field `{}`", name))),
    }
}

fn number_field(kind: PropertyKind, value: &Value, prefix: &str, name: &str) -> CodecResult<f64> {
    let map = value.as_map().ok_or_else(|| expected(kind, "map", value))?;
    match map.get(name) {
        Some(Value::Number(n)) => Ok(*n),
        Some(other) => Err(CodecError::malformed(
            kind,
            format!("field `{}{}` must be a number, got {}", prefix, name, other.shape_name()),
        )),
        None => Err(CodecError::malformed(
            kind,
            format!("missing field `{}{}`", prefix, name),
        )),
    }
}

fn float_field(kind: PropertyKind, value: &Value, prefix: &str, name: &str) -> CodecResult<f32> {
    float(kind, number_field(kind, value, prefix, name)?)
}

fn int_field(kind: PropertyKind, value: &Value, prefix: &str, name: &str) -> CodecResult<i32> {
    number_field(kind, value, prefix, name).map(truncate_to_i32)
}

fn vector3(kind: PropertyKind, value: &Value, prefix: &str) -> CodecResult<Vector3> {
    Ok(Vector3 {
        x: float_field(kind, value, prefix, "x")?,
        y: float_field(kind, value, prefix, "y")?,
        z: float_field(kind, value, prefix, "z")?,
    })
}

fn vector3_int(kind: PropertyKind, value: &Value, prefix: &str) -> CodecResult<Vector3Int> {
    Ok(Vector3Int {
        x: int_field(kind, value, prefix, "x")?,
        y: int_field(kind, value, prefix, "y")?,
        z: int_field(kind, value, prefix, "z")?,
    })
}
