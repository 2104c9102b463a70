//! Scene nodes

use crate::behavior::Behavior;
use crate::builtin::TRANSFORM;
use crate::error::{SceneError, SceneResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use void_property::{PropertyValue, Quaternion, Vector3};

/// Stable node identifier, assigned by the graph and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Local position, rotation and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3,
    pub rotation: Quaternion,
    pub scale: Vector3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::ZERO,
            rotation: Quaternion::IDENTITY,
            scale: Vector3::ONE,
        }
    }
}

/// A node in the scene graph
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) behaviors: Vec<Behavior>,
    active: bool,
    tag: String,
    layer: i32,
}

impl Node {
    pub(crate) fn new(id: NodeId, name: String, parent: Option<NodeId>) -> Self {
        Self {
            id,
            name,
            parent,
            children: Vec::new(),
            behaviors: Vec::new(),
            active: true,
            tag: "Untagged".to_string(),
            layer: 0,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Attached behaviors in attach order
    pub fn behaviors(&self) -> &[Behavior] {
        &self.behaviors
    }

    /// Find a behavior by type name
    pub fn behavior(&self, type_name: &str) -> Option<&Behavior> {
        self.behaviors.iter().find(|b| b.type_name() == type_name)
    }

    /// Find a behavior by type name for writing
    pub fn behavior_mut(&mut self, type_name: &str) -> Option<&mut Behavior> {
        self.behaviors.iter_mut().find(|b| b.type_name() == type_name)
    }

    pub fn has_behavior(&self, type_name: &str) -> bool {
        self.behavior(type_name).is_some()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    pub fn layer(&self) -> i32 {
        self.layer
    }

    pub fn set_layer(&mut self, layer: i32) {
        self.layer = layer;
    }

    /// Transform read from the pinned transform behavior
    pub fn transform(&self) -> Transform {
        let mut transform = Transform::default();
        if let Some(behavior) = self.behavior(TRANSFORM) {
            if let Some(position) = behavior.get("position").and_then(PropertyValue::as_vector3) {
                transform.position = position;
            }
            if let Some(rotation) = behavior.get("rotation").and_then(PropertyValue::as_quaternion) {
                transform.rotation = rotation;
            }
            if let Some(scale) = behavior.get("scale").and_then(PropertyValue::as_vector3) {
                transform.scale = scale;
            }
        }
        transform
    }

    /// Write the transform through the pinned transform behavior.
    ///
    /// All three components are written or none are.
    pub fn set_transform(&mut self, transform: Transform) -> SceneResult<()> {
        let node = self.name.clone();
        let behavior = self
            .behavior_mut(TRANSFORM)
            .ok_or_else(|| SceneError::BehaviorNotFound {
                node,
                behavior: TRANSFORM.to_string(),
            })?;

        let mut staged = behavior.clone();
        staged.set("position", transform.position.into())?;
        staged.set("rotation", transform.rotation.into())?;
        staged.set("scale", transform.scale.into())?;
        *behavior = staged;
        Ok(())
    }
}
