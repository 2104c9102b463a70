//! Built-in behavior types

use crate::schema::BehaviorSchema;
use void_property::*;

/// Name of the pinned transform behavior every node carries
pub const TRANSFORM: &str = "Transform";

/// Schemas registered by [`BehaviorRegistry::with_builtin`](crate::BehaviorRegistry::with_builtin)
pub fn builtin_schemas() -> Vec<BehaviorSchema> {
    vec![
        BehaviorSchema::builder(TRANSFORM)
            .property("position", Vector3::ZERO)
            .property("rotation", Quaternion::IDENTITY)
            .property("scale", Vector3::ONE)
            .pinned()
            .build(),
        BehaviorSchema::builder("Light")
            .enumeration("kind", &["Directional", "Point", "Spot", "Area"], 1)
            .property("color", Color::WHITE)
            .property("intensity", 1.0f32)
            .property("range", 10.0f32)
            .property("spot_angle", 30.0f32)
            .property("shadows", false)
            .property("culling_mask", PropertyValue::LayerMask(-1))
            .build(),
        BehaviorSchema::builder("Camera")
            .enumeration("projection", &["Perspective", "Orthographic"], 0)
            .property("field_of_view", 60.0f32)
            .property("near_clip", 0.3f32)
            .property("far_clip", 1000.0f32)
            .property("viewport", Rect::new(0.0, 0.0, 1.0, 1.0))
            .property("background", Color::new(0.19, 0.3, 0.47, 1.0))
            .property("depth", 0)
            .build(),
        BehaviorSchema::builder("MeshRenderer")
            .property("mesh", PropertyValue::ObjectReference(None))
            .property("material", PropertyValue::ObjectReference(None))
            .property("cast_shadows", true)
            .property("receive_shadows", true)
            .property("bounds", Bounds::new(Vector3::ZERO, Vector3::ONE))
            .build(),
        BehaviorSchema::builder("RigidBody")
            .property("mass", 1.0f32)
            .property("drag", 0.0f32)
            .property("use_gravity", true)
            .property("is_kinematic", false)
            .property("velocity", Vector3::ZERO)
            .build(),
        BehaviorSchema::builder("Collider")
            .enumeration("shape", &["Box", "Sphere", "Capsule"], 0)
            .property("center", Vector3::ZERO)
            .property("size", Vector3::ONE)
            .property("is_trigger", false)
            .build(),
        BehaviorSchema::builder("AudioSource")
            .property("clip", PropertyValue::ObjectReference(None))
            .property("volume", 1.0f32)
            .property("pitch", 1.0f32)
            .property("looping", false)
            .build(),
        BehaviorSchema::builder("Animator")
            .property("controller", PropertyValue::ObjectReference(None))
            .property("speed", 1.0f32)
            .property(
                "curve",
                PropertyValue::AnimationCurve(Some(AnimationCurve::linear(0.0, 1.0))),
            )
            .build(),
        BehaviorSchema::builder("ParticleSystem")
            .property("max_particles", 1000)
            .property("start_color", Color::WHITE)
            .property("color_over_lifetime", PropertyValue::Gradient(Gradient::default()))
            .property("emission_rate", 10.0f32)
            .build(),
        BehaviorSchema::builder("Tilemap")
            .property("origin", PropertyValue::Vector3Int(Vector3Int::default()))
            .property("size", PropertyValue::Vector3Int(Vector3Int::new(16, 16, 1)))
            .property(
                "cell_bounds",
                PropertyValue::BoundsInt(BoundsInt::new(
                    Vector3Int::default(),
                    Vector3Int::new(16, 16, 1),
                )),
            )
            .property("tile_anchor", Vector2::new(0.5, 0.5))
            .property("area", PropertyValue::RectInt(RectInt::new(0, 0, 16, 16)))
            .build(),
        BehaviorSchema::builder("Label")
            .property("text", "")
            .property("glyph", PropertyValue::Character('#'))
            .property("padding", Vector4::default())
            .property("offset", PropertyValue::Vector2Int(Vector2Int::default()))
            .build(),
        BehaviorSchema::builder("Attachment")
            .property("offset", Vector3::ZERO)
            .property("socket", "")
            .property("slots", PropertyValue::ArraySize(0))
            .build(),
    ]
}
