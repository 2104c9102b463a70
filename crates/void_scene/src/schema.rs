//! Behavior schemas and the registry
//!
//! A schema is the descriptor table for one behavior type: the ordered list
//! of properties with their kinds, defaults and (for enums) member names.
//! Schemas are built once at registration and shared by every instance.

use std::collections::BTreeMap;
use std::sync::Arc;
use void_property::{codec, CodecResult, PropertyKind, PropertyValue, Value};

/// One declared property of a behavior type
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    /// Property name
    pub name: String,
    /// Property kind
    pub kind: PropertyKind,
    /// Value a fresh instance starts with
    pub default: PropertyValue,
    /// Ordered member names (Enum kind only)
    pub members: Vec<String>,
}

impl PropertyDescriptor {
    /// Create a descriptor whose kind is taken from its default value
    pub fn new(name: impl Into<String>, default: impl Into<PropertyValue>) -> Self {
        let default = default.into();
        Self {
            name: name.into(),
            kind: default.kind(),
            default,
            members: Vec::new(),
        }
    }

    /// Create an Enum descriptor
    pub fn enumeration(name: impl Into<String>, members: &[&str], default_index: i32) -> Self {
        Self {
            name: name.into(),
            kind: PropertyKind::Enum,
            default: PropertyValue::Enum(default_index),
            members: members.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Decode a transport value against this descriptor
    pub fn decode(&self, value: &Value) -> CodecResult<PropertyValue> {
        codec::decode(self.kind, value, &self.members)
    }
}

/// Descriptor table for a behavior type
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorSchema {
    name: String,
    properties: Vec<PropertyDescriptor>,
    pinned: bool,
}

impl BehaviorSchema {
    /// Start building a schema
    pub fn builder(name: impl Into<String>) -> BehaviorSchemaBuilder {
        BehaviorSchemaBuilder {
            schema: BehaviorSchema {
                name: name.into(),
                properties: Vec::new(),
                pinned: false,
            },
        }
    }

    /// Behavior type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared properties, in declaration order
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// Index of a property by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.properties.iter().position(|p| p.name == name)
    }

    /// Look up a property by name
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Pinned behaviors are attached to every node and cannot be removed
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }
}

/// Builder for [`BehaviorSchema`]
#[derive(Debug)]
pub struct BehaviorSchemaBuilder {
    schema: BehaviorSchema,
}

impl BehaviorSchemaBuilder {
    /// Declare a property. Redeclaring a name replaces the earlier entry.
    pub fn property(self, name: impl Into<String>, default: impl Into<PropertyValue>) -> Self {
        self.descriptor(PropertyDescriptor::new(name, default))
    }

    /// Declare an Enum property
    pub fn enumeration(self, name: impl Into<String>, members: &[&str], default_index: i32) -> Self {
        self.descriptor(PropertyDescriptor::enumeration(name, members, default_index))
    }

    /// Declare a property from a full descriptor
    pub fn descriptor(mut self, descriptor: PropertyDescriptor) -> Self {
        match self.schema.index_of(&descriptor.name) {
            Some(index) => self.schema.properties[index] = descriptor,
            None => self.schema.properties.push(descriptor),
        }
        self
    }

    /// Mark the behavior as pinned
    pub fn pinned(mut self) -> Self {
        self.schema.pinned = true;
        self
    }

    pub fn build(self) -> BehaviorSchema {
        self.schema
    }
}

/// Registry of behavior types by name
#[derive(Debug, Clone, Default)]
pub struct BehaviorRegistry {
    schemas: BTreeMap<String, Arc<BehaviorSchema>>,
}

impl BehaviorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in behavior types
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for schema in crate::builtin::builtin_schemas() {
            registry.register(schema);
        }
        registry
    }

    /// Register a schema, replacing any schema with the same name
    pub fn register(&mut self, schema: BehaviorSchema) -> Arc<BehaviorSchema> {
        let schema = Arc::new(schema);
        if self
            .schemas
            .insert(schema.name.clone(), schema.clone())
            .is_some()
        {
            log::debug!("BehaviorRegistry: replaced schema '{}'", schema.name);
        }
        schema
    }

    /// Get a schema by name
    pub fn get(&self, name: &str) -> Option<Arc<BehaviorSchema>> {
        self.schemas.get(name).cloned()
    }

    /// Check if a type is registered
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Registered type names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Schemas every node receives on creation
    pub fn pinned(&self) -> impl Iterator<Item = &Arc<BehaviorSchema>> {
        self.schemas.values().filter(|s| s.pinned)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use void_property::Vector3;

    #[test]
    fn test_builder_declares_in_order() {
        let schema = BehaviorSchema::builder("Thruster")
            .property("power", 10.0f32)
            .property("direction", Vector3::new(0.0, 0.0, 1.0))
            .enumeration("mode", &["Idle", "Burn"], 0)
            .build();

        let names: Vec<_> = schema.properties().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["power", "direction", "mode"]);
        assert_eq!(schema.property("direction").unwrap().kind, PropertyKind::Vector3);
        assert_eq!(schema.property("mode").unwrap().members, vec!["Idle", "Burn"]);
        assert!(!schema.is_pinned());
    }

    #[test]
    fn test_redeclare_replaces() {
        let schema = BehaviorSchema::builder("Thruster")
            .property("power", 10.0f32)
            .property("power", 3)
            .build();
        assert_eq!(schema.properties().len(), 1);
        assert_eq!(schema.property("power").unwrap().kind, PropertyKind::Integer);
    }

    #[test]
    fn test_descriptor_decode_uses_members() {
        let descriptor = PropertyDescriptor::enumeration("mode", &["Idle", "Burn"], 0);
        assert_eq!(descriptor.decode(&Value::from("Burn")), Ok(PropertyValue::Enum(1)));
    }

    #[test]
    fn test_registry() {
        let mut registry = BehaviorRegistry::new();
        assert!(registry.is_empty());

        registry.register(BehaviorSchema::builder("B").build());
        registry.register(BehaviorSchema::builder("A").pinned().build());

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert!(registry.contains("A"));
        assert!(registry.get("C").is_none());
        assert_eq!(registry.pinned().count(), 1);
    }

    #[test]
    fn test_builtin_registry_has_transform() {
        let registry = BehaviorRegistry::with_builtin();
        let transform = registry.get(crate::builtin::TRANSFORM).unwrap();
        assert!(transform.is_pinned());
        assert!(registry.contains("Light"));
    }
}
