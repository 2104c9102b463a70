//! Behavior instances

use crate::error::{SceneError, SceneResult};
use crate::schema::{BehaviorSchema, PropertyDescriptor};
use std::sync::Arc;
use void_property::{CodecError, PropertyValue, Value};

/// A behavior attached to a node: a schema plus one value slot per property
#[derive(Debug, Clone, PartialEq)]
pub struct Behavior {
    schema: Arc<BehaviorSchema>,
    values: Vec<PropertyValue>,
}

impl Behavior {
    /// Create an instance with every property at its default
    pub fn new(schema: Arc<BehaviorSchema>) -> Self {
        let values = schema
            .properties()
            .iter()
            .map(|p| p.default.clone())
            .collect();
        Self { schema, values }
    }

    /// Behavior type name
    pub fn type_name(&self) -> &str {
        self.schema.name()
    }

    pub fn schema(&self) -> &BehaviorSchema {
        &self.schema
    }

    /// Current value of a property
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.schema.index_of(name).map(|index| &self.values[index])
    }

    /// Write a native value.
    ///
    /// The value's kind must match the declared kind, float components must
    /// be finite, and enum indices must name a declared member.
    pub fn set(&mut self, name: &str, value: PropertyValue) -> SceneResult<()> {
        let index = self.index(name)?;
        let descriptor = &self.schema.properties()[index];

        if value.kind() != descriptor.kind {
            return Err(SceneError::KindMismatch {
                property: name.to_string(),
                expected: descriptor.kind,
                actual: value.kind(),
            });
        }
        if !value.is_finite() {
            return Err(CodecError::malformed(descriptor.kind, "non-finite component").into());
        }
        if let PropertyValue::Enum(member) = value {
            let members = descriptor.members.len();
            if members > 0 && (member < 0 || member as usize >= members) {
                return Err(CodecError::malformed(
                    descriptor.kind,
                    format!("index {} is outside 0..{}", member, members),
                )
                .into());
            }
        }

        self.values[index] = value;
        Ok(())
    }

    /// Decode a transport value and write it
    pub fn set_encoded(&mut self, name: &str, value: &Value) -> SceneResult<()> {
        let index = self.index(name)?;
        let decoded = self.schema.properties()[index].decode(value)?;
        self.values[index] = decoded;
        Ok(())
    }

    /// Declared properties with their current values, in declaration order
    pub fn properties(&self) -> impl Iterator<Item = (&PropertyDescriptor, &PropertyValue)> {
        self.schema.properties().iter().zip(self.values.iter())
    }

    fn index(&self, name: &str) -> SceneResult<usize> {
        self.schema
            .index_of(name)
            .ok_or_else(|| SceneError::PropertyNotFound {
                behavior: self.schema.name().to_string(),
                property: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use void_property::{PropertyKind, Vector3};

    fn thruster() -> Behavior {
        Behavior::new(Arc::new(
            BehaviorSchema::builder("Thruster")
                .property("power", 10.0f32)
                .property("offset", Vector3::ZERO)
                .enumeration("mode", &["Idle", "Burn"], 0)
                .build(),
        ))
    }

    #[test]
    fn test_defaults() {
        let behavior = thruster();
        assert_eq!(behavior.type_name(), "Thruster");
        assert_eq!(behavior.get("power"), Some(&PropertyValue::Float(10.0)));
        assert_eq!(behavior.get("missing"), None);
    }

    #[test]
    fn test_set_checks_kind() {
        let mut behavior = thruster();
        behavior.set("power", PropertyValue::Float(2.0)).unwrap();
        assert_eq!(behavior.get("power"), Some(&PropertyValue::Float(2.0)));

        let err = behavior.set("power", PropertyValue::Integer(2)).unwrap_err();
        assert!(matches!(
            err,
            SceneError::KindMismatch { expected: PropertyKind::Float, actual: PropertyKind::Integer, .. }
        ));
    }

    #[test]
    fn test_set_rejects_enum_out_of_range() {
        let mut behavior = thruster();
        assert!(behavior.set("mode", PropertyValue::Enum(1)).is_ok());
        assert!(matches!(
            behavior.set("mode", PropertyValue::Enum(2)),
            Err(SceneError::Codec(_))
        ));
    }

    #[test]
    fn test_set_rejects_non_finite() {
        let mut behavior = thruster();
        let err = behavior
            .set("offset", Vector3::new(f32::INFINITY, 0.0, 0.0).into())
            .unwrap_err();
        assert!(matches!(err, SceneError::Codec(CodecError::MalformedValue { .. })));
        assert!(behavior.set("power", PropertyValue::Float(f32::NAN)).is_err());
        assert_eq!(behavior.get("offset"), Some(&PropertyValue::Vector3(Vector3::ZERO)));
        assert_eq!(behavior.get("power"), Some(&PropertyValue::Float(10.0)));
    }

    #[test]
    fn test_set_encoded() {
        let mut behavior = thruster();
        let value: Value = [("x", 1.0), ("y", 2.0), ("z", 3.0)].into_iter().collect();
        behavior.set_encoded("offset", &value).unwrap();
        assert_eq!(
            behavior.get("offset"),
            Some(&PropertyValue::Vector3(Vector3::new(1.0, 2.0, 3.0)))
        );

        let err = behavior.set_encoded("offset", &Value::from("oops")).unwrap_err();
        assert!(matches!(err, SceneError::Codec(_)));
        assert_eq!(
            behavior.get("offset"),
            Some(&PropertyValue::Vector3(Vector3::new(1.0, 2.0, 3.0)))
        );

        let err = behavior.set_encoded("nope", &Value::Null).unwrap_err();
        assert!(matches!(err, SceneError::PropertyNotFound { .. }));
    }
}
