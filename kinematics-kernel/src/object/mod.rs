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
//! Physics objects and their factories
//!
//! A [`PhysicsObject`] owns a [`PropertyMap`] and keeps its [`Sprite`] in
//! sync with the position and size properties. All edits go through the
//! object so that derived properties and the sprite are refreshed
//! immediately, without a time step.

mod factory;

pub use factory::{FactoryRegistry, ObjectFactory, ParticleFactory, SolidFactory};

use crate::error::{KernelError, KernelResult};
use crate::gizmo::GizmoRenderer;
use crate::math::Vector2;
use crate::properties::{ObjectPosition, ObjectSize};
use crate::property::{FormData, Property, PropertyJson, PropertyKind, PropertyMap, PropertySelector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer object kind, the factory key in saved documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectKind(pub u32);

impl ObjectKind {
    /// Body with every kinematic and dynamic property
    pub const SOLID: ObjectKind = ObjectKind(0);
    /// Point mass without size, area or centripetal acceleration
    pub const PARTICLE: ObjectKind = ObjectKind(1);
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Draw state pushed to the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sprite {
    /// Live position of the object
    pub draw_position: Vector2,
    /// Live size of the object
    pub draw_size: Vector2,
}

/// Serialized object: `{kind, name, properties: [{kind, iValue}, ...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectJson {
    /// Factory key
    pub kind: ObjectKind,
    /// Display name; generated on load when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Base values in registration order
    pub properties: Vec<PropertyJson>,
}

/// A body in the scene
#[derive(Debug)]
pub struct PhysicsObject {
    kind: ObjectKind,
    name: String,
    sprite: Sprite,
    properties: PropertyMap,
}

impl PhysicsObject {
    /// Build an object from its properties
    ///
    /// Properties may be given in any order; they are wired once all of
    /// them are present.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::CircularDependency`] if the properties depend
    /// on each other in a cycle.
    pub fn new(
        kind: ObjectKind,
        name: impl Into<String>,
        properties: Vec<Box<dyn Property>>,
    ) -> KernelResult<Self> {
        let mut map = PropertyMap::new();
        for property in properties {
            map.insert(property);
        }
        map.wire()?;

        let mut object = PhysicsObject {
            kind,
            name: name.into(),
            sprite: Sprite::default(),
            properties: map,
        };
        object.sync_sprite();
        Ok(object)
    }

    /// Factory key
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the object
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Current draw state
    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    /// Read-only view of the properties
    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    /// Property by kind
    pub fn get_property(&self, kind: PropertyKind) -> Option<&dyn Property> {
        self.properties.get_dyn(kind)
    }

    /// Property by concrete type
    pub fn property<T: Property>(&self) -> Option<&T> {
        self.properties.get::<T>()
    }

    /// Properties matching a selector
    pub fn select(&self, selector: impl Into<PropertySelector>) -> Vec<&dyn Property> {
        self.properties.select(selector.into())
    }

    /// Edit a property by concrete type
    ///
    /// Base value changes reach dependent properties and the sprite before
    /// this returns. Returns `None` if the object has no such property.
    pub fn edit<T: Property, R>(&mut self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let result = self.properties.get_mut::<T>().map(f);
        self.settle();
        result
    }

    /// Edit a property by kind
    pub fn edit_dyn<R>(
        &mut self,
        kind: PropertyKind,
        f: impl FnOnce(&mut dyn Property) -> R,
    ) -> Option<R> {
        let result = self.properties.get_dyn_mut(kind).map(|property| f(property));
        self.settle();
        result
    }

    /// Route a user edit to a property
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::MissingProperty`] if the object has no such
    /// property, or the property's own rejection of the input.
    pub fn apply_user_input(&mut self, kind: PropertyKind, form: &FormData) -> KernelResult<()> {
        match self.edit_dyn(kind, |property| property.on_user_input(form)) {
            Some(result) => result,
            None => Err(self.missing(kind)),
        }
    }

    /// Enable or disable the selected properties
    pub fn set_active(&mut self, selector: impl Into<PropertySelector>, active: bool) {
        for kind in self.selected_kinds(selector.into()) {
            if let Some(property) = self.properties.get_dyn_mut(kind) {
                property.core_mut().set_active(active);
            }
        }
    }

    /// Toggle hover gizmos of the selected properties
    pub fn set_draw_gizmos(&mut self, selector: impl Into<PropertySelector>, draw: bool) {
        for kind in self.selected_kinds(selector.into()) {
            if let Some(property) = self.properties.get_dyn_mut(kind) {
                property.core_mut().set_draw_gizmos(draw);
            }
        }
    }

    fn selected_kinds(&self, selector: PropertySelector) -> Vec<PropertyKind> {
        self.properties
            .select(selector)
            .into_iter()
            .map(|property| property.kind())
            .collect()
    }

    /// Advance every property by `step` seconds
    pub fn simulate(&mut self, step: f64) {
        self.properties.simulate(step);
        self.sync_sprite();
    }

    /// Return every property to its base value
    pub fn reset(&mut self) {
        self.properties.reset();
        self.sync_sprite();
    }

    /// Inclusive bounding-box hit test against the live position and size
    ///
    /// An object without a position is never hit; one without a size is
    /// hit only at its exact position.
    pub fn is_position_inside_object(&self, point: Vector2) -> bool {
        let Some(position) = self.property::<ObjectPosition>() else {
            return false;
        };
        let half = self
            .property::<ObjectSize>()
            .map(|size| size.value() / 2.0)
            .unwrap_or_default();
        let center = position.value();
        (point.x - center.x).abs() <= half.x.abs() && (point.y - center.y).abs() <= half.y.abs()
    }

    /// Draw gizmos of every property that has them enabled
    pub fn draw_gizmos(&self, renderer: &mut dyn GizmoRenderer) {
        self.properties.draw_gizmos(renderer);
    }

    /// Serialize the object's base values
    pub fn to_json(&self) -> ObjectJson {
        ObjectJson {
            kind: self.kind,
            name: Some(self.name.clone()),
            properties: self.properties.iter().map(|property| property.to_json()).collect(),
        }
    }

    /// Apply serialized base values in document order
    ///
    /// Entries naming an unknown property, or one this object does not
    /// have, are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns the first value that does not fit its property. Entries
    /// before it stay applied.
    pub fn apply_json(&mut self, json: &ObjectJson) -> KernelResult<()> {
        for entry in &json.properties {
            let Some(kind) = entry.kind.resolve() else {
                tracing::warn!(object = %self.name, kind = %entry.kind, "skipping unknown property");
                continue;
            };
            match self.edit_dyn(kind, |property| property.value_from_json(&entry.i_value)) {
                Some(result) => result?,
                None => {
                    tracing::warn!(object = %self.name, %kind, "object has no such property; skipping")
                }
            }
        }
        Ok(())
    }

    fn missing(&self, kind: PropertyKind) -> KernelError {
        KernelError::MissingProperty {
            object: self.name.clone(),
            kind,
        }
    }

    fn settle(&mut self) {
        self.properties.propagate_changes();
        self.sync_sprite();
    }

    fn sync_sprite(&mut self) {
        if let Some(position) = self.properties.get::<ObjectPosition>() {
            self.sprite.draw_position = position.value();
        }
        if let Some(size) = self.properties.get::<ObjectSize>() {
            self.sprite.draw_size = size.value();
        }
    }
}
