//! # Void Property - Typed Property Values & Transport Codec
//!
//! Behaviors attached to scene nodes expose their state as a flat list of
//! named, kind-tagged properties. This crate defines the closed set of
//! property kinds, their native Rust representation, and the codec that
//! moves them across the remote boundary.
//!
//! ## Architecture
//!
//! ```text
//! JSON body ──► Value (transport algebra) ──► decode(kind) ──► PropertyValue
//!                                                                  │
//! JSON reply ◄── Value ◄──────────────── encode ◄─────────────────┘
//! ```
//!
//! ## Key Concepts
//!
//! - **Value**: null, bool, number, string, or a map of named fields
//! - **PropertyKind**: one of the fixed property kinds (Integer, Vector3, Enum, ...)
//! - **PropertyValue**: a native value carrying its kind
//! - **Codec**: `decode` is the single gate from transport to native values;
//!   `encode` is total
//!
//! ## Rounding
//!
//! Integer kinds (Integer, LayerMask, ArraySize, Enum indices and the `*Int`
//! vector, rect and bounds kinds) truncate toward zero and saturate at the
//! `i32` bounds. `2.9` decodes to `2`, `-2.9` to `-2`, `1e12` to `i32::MAX`.
//!
//! ## Enums
//!
//! Enum values encode as their member index. Property listings carry the
//! declared `members` next to the value so clients can map the index back to
//! a name. Decoding accepts either the index or the member name.
//!
//! ## Finite floats
//!
//! Float components must be finite. `decode` rejects numbers that overflow
//! `f32`, and [`PropertyValue::is_finite`] lets writers of native values
//! apply the same rule.

pub mod codec;
pub mod error;
pub mod kind;
pub mod property;
pub mod types;
pub mod value;

pub use codec::{decode, encode, truncate_to_i32};
pub use error::{CodecError, CodecResult};
pub use kind::PropertyKind;
pub use property::PropertyValue;
pub use types::{
    AnimationCurve, Bounds, BoundsInt, Color, Gradient, GradientKey, Keyframe, ObjectRef,
    Quaternion, Rect, RectInt, Vector2, Vector2Int, Vector3, Vector3Int, Vector4,
};
pub use value::Value;
