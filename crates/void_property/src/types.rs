//! Native value types carried by properties

/// RGBA color, components nominally in 0..1 but not clamped
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Vector2Int {
    pub x: i32,
    pub y: i32,
}

impl Vector2Int {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Vector3Int {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vector3Int {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Rotation quaternion. Stored as given, never normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[f32; 4]> for Quaternion {
    fn from([x, y, z, w]: [f32; 4]) -> Self {
        Self { x, y, z, w }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectInt {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl RectInt {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
}

/// Axis-aligned box given by its center and full size
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub center: Vector3,
    pub size: Vector3,
}

impl Bounds {
    pub const fn new(center: Vector3, size: Vector3) -> Self {
        Self { center, size }
    }
}

/// Integer box given by its minimum corner and size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundsInt {
    pub position: Vector3Int,
    pub size: Vector3Int,
}

impl BoundsInt {
    pub const fn new(position: Vector3Int, size: Vector3Int) -> Self {
        Self { position, size }
    }
}

/// Reference to another scene object or asset.
///
/// Only the display name crosses the remote boundary; names are not stable
/// identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub id: u64,
    pub name: String,
}

impl ObjectRef {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    pub in_tangent: f32,
    pub out_tangent: f32,
}

/// Keyframed curve, opaque to remote callers
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnimationCurve {
    pub keys: Vec<Keyframe>,
}

impl AnimationCurve {
    /// Straight line from (0, start) to (1, end)
    pub fn linear(start: f32, end: f32) -> Self {
        let slope = end - start;
        Self {
            keys: vec![
                Keyframe { time: 0.0, value: start, in_tangent: slope, out_tangent: slope },
                Keyframe { time: 1.0, value: end, in_tangent: slope, out_tangent: slope },
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientKey {
    pub time: f32,
    pub color: Color,
}

/// Color gradient, opaque to remote callers
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub keys: Vec<GradientKey>,
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            keys: vec![
                GradientKey { time: 0.0, color: Color::WHITE },
                GradientKey { time: 1.0, color: Color::WHITE },
            ],
        }
    }
}
