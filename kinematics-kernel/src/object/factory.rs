// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Object factories keyed by [`ObjectKind`]
//!
//! Interactive creation and document loading share the same factory, so a
//! loaded object starts from exactly the properties a new one would have
//! before its saved base values are applied.

use super::{ObjectJson, ObjectKind, PhysicsObject};
use crate::error::{KernelError, KernelResult};
use crate::math::{TrackingVector, Vector2};
use crate::properties::{
    ObjectAcceleration, ObjectArea, ObjectCentripetalAcceleration, ObjectDisplacement, ObjectMass,
    ObjectMomentum, ObjectNetForce, ObjectPosition, ObjectSize, ObjectVelocity,
};
use crate::property::Property;
use std::collections::HashMap;

/// Builds the property set of one object kind
///
/// # Example
///
/// ```rust
/// use kinematics_kernel::object::{FactoryRegistry, ObjectFactory, ObjectKind};
/// use kinematics_kernel::math::Vector2;
/// use kinematics_kernel::properties::{ObjectPosition, ObjectVelocity};
/// use kinematics_kernel::property::Property;
///
/// struct Tracer;
///
/// impl ObjectFactory for Tracer {
///     fn kind(&self) -> ObjectKind {
///         ObjectKind(7)
///     }
///
///     fn default_name(&self) -> &str {
///         "Tracer"
///     }
///
///     fn build_properties(&self) -> Vec<Box<dyn Property>> {
///         vec![
///             Box::new(ObjectVelocity::new(Vector2::new(1.0, 0.0))),
///             Box::new(ObjectPosition::new(Vector2::zero())),
///         ]
///     }
/// }
///
/// let mut registry = FactoryRegistry::with_builtin();
/// registry.register(Box::new(Tracer)).unwrap();
/// let tracer = registry.create(ObjectKind(7), "t").unwrap();
/// assert_eq!(tracer.properties().len(), 2);
/// ```
pub trait ObjectFactory: Send + Sync {
    /// Kind this factory builds
    fn kind(&self) -> ObjectKind;

    /// Name prefix for new objects
    fn default_name(&self) -> &str;

    /// Fresh properties with their default base values, in display order
    fn build_properties(&self) -> Vec<Box<dyn Property>>;
}

/// Default size of a new solid
const DEFAULT_SIZE: Vector2 = Vector2::new(1.0, 1.0);

/// Body with every property
#[derive(Debug, Clone, Copy, Default)]
pub struct SolidFactory;

impl ObjectFactory for SolidFactory {
    fn kind(&self) -> ObjectKind {
        ObjectKind::SOLID
    }

    fn default_name(&self) -> &str {
        "Solid"
    }

    fn build_properties(&self) -> Vec<Box<dyn Property>> {
        vec![
            Box::new(ObjectPosition::new(Vector2::zero())),
            Box::new(ObjectSize::new(DEFAULT_SIZE)),
            Box::new(ObjectArea::new()),
            Box::new(ObjectVelocity::new(Vector2::zero())),
            Box::new(ObjectDisplacement::new()),
            Box::new(ObjectAcceleration::new(Vector2::zero())),
            Box::new(ObjectCentripetalAcceleration::new(TrackingVector::zero())),
            Box::new(ObjectNetForce::new()),
            Box::new(ObjectMass::default()),
            Box::new(ObjectMomentum::new()),
        ]
    }
}

/// Point mass: no extent and no centripetal pull
#[derive(Debug, Clone, Copy, Default)]
pub struct ParticleFactory;

impl ObjectFactory for ParticleFactory {
    fn kind(&self) -> ObjectKind {
        ObjectKind::PARTICLE
    }

    fn default_name(&self) -> &str {
        "Particle"
    }

    fn build_properties(&self) -> Vec<Box<dyn Property>> {
        vec![
            Box::new(ObjectPosition::new(Vector2::zero())),
            Box::new(ObjectVelocity::new(Vector2::zero())),
            Box::new(ObjectDisplacement::new()),
            Box::new(ObjectAcceleration::new(Vector2::zero())),
            Box::new(ObjectNetForce::new()),
            Box::new(ObjectMass::default()),
            Box::new(ObjectMomentum::new()),
        ]
    }
}

/// Factories by object kind
pub struct FactoryRegistry {
    factories: HashMap<ObjectKind, Box<dyn ObjectFactory>>,
}

impl FactoryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        FactoryRegistry {
            factories: HashMap::new(),
        }
    }

    /// Create a registry holding the solid and particle factories
    pub fn with_builtin() -> Self {
        let mut factories: HashMap<ObjectKind, Box<dyn ObjectFactory>> = HashMap::new();
        factories.insert(ObjectKind::SOLID, Box::new(SolidFactory));
        factories.insert(ObjectKind::PARTICLE, Box::new(ParticleFactory));
        FactoryRegistry { factories }
    }

    /// Register a factory
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::DuplicateFactory`] if its kind is taken.
    pub fn register(&mut self, factory: Box<dyn ObjectFactory>) -> KernelResult<()> {
        let kind = factory.kind();
        if self.factories.contains_key(&kind) {
            return Err(KernelError::DuplicateFactory(kind));
        }
        self.factories.insert(kind, factory);
        Ok(())
    }

    /// Whether a factory is registered for `kind`
    pub fn contains(&self, kind: ObjectKind) -> bool {
        self.factories.contains_key(&kind)
    }

    /// Name prefix of a kind
    pub fn default_name(&self, kind: ObjectKind) -> Option<&str> {
        self.factories.get(&kind).map(|factory| factory.default_name())
    }

    /// Build a new object with default base values
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::UnknownObjectKind`] if no factory is
    /// registered for `kind`, or the wiring error of a faulty factory.
    pub fn create(&self, kind: ObjectKind, name: impl Into<String>) -> KernelResult<PhysicsObject> {
        let factory = self
            .factories
            .get(&kind)
            .ok_or(KernelError::UnknownObjectKind(kind))?;
        let object = PhysicsObject::new(kind, name, factory.build_properties())?;
        tracing::debug!(kind = %kind, name = object.name(), "created object");
        Ok(object)
    }

    /// Rebuild a serialized object through its factory
    ///
    /// `fallback_name` is used when the document carries no name.
    pub fn object_from_json(
        &self,
        json: &ObjectJson,
        fallback_name: impl FnOnce() -> String,
    ) -> KernelResult<PhysicsObject> {
        let name = json.name.clone().unwrap_or_else(fallback_name);
        let mut object = self.create(json.kind, name)?;
        object.apply_json(json)?;
        Ok(object)
    }
}

impl Default for FactoryRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl std::fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.factories.keys().collect();
        kinds.sort();
        f.debug_struct("FactoryRegistry").field("kinds", &kinds).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyKind;

    #[test]
    fn test_solid_has_every_property_in_order() {
        let registry = FactoryRegistry::with_builtin();
        let solid = registry.create(ObjectKind::SOLID, "Solid 1").unwrap();
        let kinds: Vec<_> = solid.properties().kinds().collect();
        assert_eq!(kinds, PropertyKind::ALL.to_vec());
        assert_eq!(solid.name(), "Solid 1");
        assert_eq!(solid.sprite().draw_size, DEFAULT_SIZE);
        assert_eq!(
            solid.property::<ObjectArea>().unwrap().initial_value(),
            DEFAULT_SIZE.x * DEFAULT_SIZE.y
        );
    }

    #[test]
    fn test_particle_has_no_extent() {
        let registry = FactoryRegistry::with_builtin();
        let particle = registry.create(ObjectKind::PARTICLE, "p").unwrap();
        assert!(particle.get_property(PropertyKind::Size).is_none());
        assert!(particle.get_property(PropertyKind::Area).is_none());
        assert!(particle.get_property(PropertyKind::CentripetalAcceleration).is_none());
        assert_eq!(registry.default_name(ObjectKind::PARTICLE), Some("Particle"));
    }

    #[test]
    fn test_unknown_kind() {
        let registry = FactoryRegistry::new();
        let err = registry.create(ObjectKind::SOLID, "x").unwrap_err();
        assert!(matches!(err, KernelError::UnknownObjectKind(ObjectKind::SOLID)));
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = FactoryRegistry::with_builtin();
        let err = registry.register(Box::new(SolidFactory)).unwrap_err();
        assert!(matches!(err, KernelError::DuplicateFactory(ObjectKind::SOLID)));

        let mut empty = FactoryRegistry::new();
        assert!(empty.register(Box::new(ParticleFactory)).is_ok());
        assert!(empty.contains(ObjectKind::PARTICLE));
    }

    #[test]
    fn test_object_from_json_uses_fallback_name() {
        let registry = FactoryRegistry::with_builtin();
        let mut original = registry.create(ObjectKind::SOLID, "kept").unwrap();
        original.edit::<ObjectMass, _>(|mass| mass.set_initial_value(2500.0));

        let mut json = original.to_json();
        let restored = registry
            .object_from_json(&json, || unreachable!("name is present"))
            .unwrap();
        assert_eq!(restored.name(), "kept");
        assert_eq!(restored.property::<ObjectMass>().unwrap().initial_value(), 2500.0);

        json.name = None;
        let renamed = registry
            .object_from_json(&json, || "Solid 9".to_string())
            .unwrap();
        assert_eq!(renamed.name(), "Solid 9");
    }
}
