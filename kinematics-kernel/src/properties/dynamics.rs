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
//! Mass, forces and momentum

use super::{gizmo_origin, priority, ObjectVelocity, GRAMS_PER_KILOGRAM};
use crate::calculator::{Calculator, NumberCalculator, Vector2Calculator};
use crate::error::{KernelError, KernelResult};
use crate::gizmo::{GizmoRenderer, GizmoStyle};
use crate::math::Vector2;
use crate::property::{
    FormData, PhysicsProperty, Property, PropertyJson, PropertyKind, PropertyMap,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Default mass of a new object, in grams
pub const DEFAULT_MASS_GRAMS: f64 = 1000.0;

/// Object mass in grams
#[derive(Debug)]
pub struct ObjectMass {
    property: PhysicsProperty<NumberCalculator>,
}

impl ObjectMass {
    /// Create a mass property
    pub fn new(grams: f64) -> Self {
        ObjectMass {
            property: PhysicsProperty::new(PropertyKind::Mass, true, grams),
        }
    }

    /// Live mass in kilograms
    pub fn kilograms(&self) -> f64 {
        self.value() / GRAMS_PER_KILOGRAM
    }
}

impl Default for ObjectMass {
    fn default() -> Self {
        Self::new(DEFAULT_MASS_GRAMS)
    }
}

property_wrapper!(ObjectMass, NumberCalculator);

impl Property for ObjectMass {
    property_plumbing!();
}

/// One user-named sub-force, the serialized form of a net force entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedForce {
    /// Sub-force name, unique within its net force
    pub key: String,
    /// Force in newtons
    pub force: Vector2,
}

impl NamedForce {
    /// Create a named force
    pub fn new(key: impl Into<String>, force: Vector2) -> Self {
        NamedForce {
            key: key.into(),
            force,
        }
    }
}

/// Sum of named sub-forces
///
/// Never stepped. Its base value is the sum of the sub-forces and is
/// refreshed by every add or remove. Serialization keeps the full
/// `{key, force}` list so every sub-force survives a reload.
#[derive(Debug)]
pub struct ObjectNetForce {
    property: PhysicsProperty<Vector2Calculator>,
    forces: Vec<NamedForce>,
}

impl ObjectNetForce {
    /// Create a net force with no sub-forces
    pub fn new() -> Self {
        ObjectNetForce {
            property: PhysicsProperty::new(PropertyKind::NetForce, true, Vector2::zero()),
            forces: Vec::new(),
        }
    }

    /// Add a sub-force, replacing one with the same key
    pub fn add_force(&mut self, key: impl Into<String>, force: Vector2) {
        let key = key.into();
        match self.forces.iter_mut().find(|named| named.key == key) {
            Some(named) => named.force = force,
            None => self.forces.push(NamedForce { key, force }),
        }
        self.refresh();
    }

    /// Remove a sub-force, returning it if it existed
    pub fn remove_force(&mut self, key: &str) -> Option<Vector2> {
        let index = self.forces.iter().position(|named| named.key == key)?;
        let removed = self.forces.remove(index);
        self.refresh();
        Some(removed.force)
    }

    /// Sub-force by key
    pub fn force(&self, key: &str) -> Option<Vector2> {
        self.forces
            .iter()
            .find(|named| named.key == key)
            .map(|named| named.force)
    }

    /// Sub-forces in insertion order
    pub fn forces(&self) -> &[NamedForce] {
        &self.forces
    }

    /// Sum of every sub-force
    pub fn calculate(&self) -> Vector2 {
        let calculator = self.property.calculator();
        self.forces
            .iter()
            .fold(calculator.zero(), |sum, named| calculator.sum(sum, named.force))
    }

    /// First unused key of the form `F<n>`
    pub fn next_force_key(&self) -> String {
        (0..)
            .map(|n| format!("F{n}"))
            .find(|key| self.force(key).is_none())
            .unwrap_or_default()
    }

    fn clear_forces(&mut self) {
        self.forces.clear();
        self.refresh();
    }

    fn refresh(&mut self) {
        let total = self.calculate();
        self.property.set_initial_value(total);
    }

    fn parse_force(&self, json: &JsonValue) -> KernelResult<Vector2> {
        self.property
            .calculator()
            .from_json(json)
            .map_err(|e| KernelError::invalid_value(PropertyKind::NetForce, e.to_string()))
    }
}

impl Default for ObjectNetForce {
    fn default() -> Self {
        Self::new()
    }
}

property_wrapper!(ObjectNetForce, Vector2Calculator);

impl Property for ObjectNetForce {
    property_plumbing!();

    fn draw_gizmos(&self, renderer: &mut dyn GizmoRenderer, siblings: &PropertyMap) {
        let origin = gizmo_origin(siblings);
        renderer.draw_vector(origin, origin + self.value(), &GizmoStyle::FORCE);
    }

    fn to_json(&self) -> PropertyJson {
        let forces = serde_json::to_value(&self.forces).unwrap_or(JsonValue::Array(Vec::new()));
        PropertyJson::new(PropertyKind::NetForce, forces)
    }

    /// Rebuild the sub-forces from `[{key, force}, ...]`
    ///
    /// A bare `{x, y}` aggregate is accepted as a single `F0` sub-force.
    fn value_from_json(&mut self, json: &JsonValue) -> KernelResult<()> {
        match json {
            JsonValue::Array(_) => {
                let forces: Vec<NamedForce> = serde_json::from_value(json.clone())
                    .map_err(|e| KernelError::invalid_value(PropertyKind::NetForce, e.to_string()))?;
                self.clear_forces();
                for named in forces {
                    self.add_force(named.key, named.force);
                }
                Ok(())
            }
            JsonValue::Object(_) => {
                let force = self.parse_force(json)?;
                self.clear_forces();
                self.add_force("F0", force);
                Ok(())
            }
            other => Err(KernelError::invalid_value(
                PropertyKind::NetForce,
                format!("expected a list of named forces, got {other}"),
            )),
        }
    }

    /// Each form entry adds or replaces the sub-force named by its key
    fn on_user_input(&mut self, form: &FormData) -> KernelResult<()> {
        if form.is_empty() {
            return Err(KernelError::EmptyInput(PropertyKind::NetForce));
        }
        let parsed = form
            .entries()
            .map(|(key, json)| -> KernelResult<(String, Vector2)> {
                Ok((key.to_string(), self.parse_force(json)?))
            })
            .collect::<KernelResult<Vec<_>>>()?;
        for (key, force) in parsed {
            self.add_force(key, force);
        }
        Ok(())
    }
}

/// Derived `mass * velocity`, with mass converted to kilograms
#[derive(Debug)]
pub struct ObjectMomentum {
    property: PhysicsProperty<Vector2Calculator>,
}

impl ObjectMomentum {
    /// Create a momentum property; its base is filled in when wired
    pub fn new() -> Self {
        ObjectMomentum {
            property: PhysicsProperty::new(PropertyKind::Momentum, false, Vector2::zero())
                .with_priority(priority::DERIVED),
        }
    }

    fn recompute_base(&mut self, siblings: &PropertyMap) {
        let mass = siblings.get::<ObjectMass>();
        let velocity = siblings.get::<ObjectVelocity>();
        if let (Some(mass), Some(velocity)) = (mass, velocity) {
            let kilograms = mass.initial_value() / GRAMS_PER_KILOGRAM;
            self.property.set_initial_value(velocity.initial_value() * kilograms);
        }
    }
}

impl Default for ObjectMomentum {
    fn default() -> Self {
        Self::new()
    }
}

property_wrapper!(ObjectMomentum, Vector2Calculator);

impl Property for ObjectMomentum {
    property_plumbing!();

    fn dependencies(&self) -> &'static [PropertyKind] {
        &[PropertyKind::Mass, PropertyKind::Velocity]
    }

    fn wire(&mut self, siblings: &PropertyMap) {
        self.recompute_base(siblings);
    }

    fn on_sibling_changed(&mut self, _changed: PropertyKind, siblings: &PropertyMap) {
        self.recompute_base(siblings);
    }

    fn simulate(&mut self, _step: f64, siblings: &mut PropertyMap) {
        let mass = siblings.get::<ObjectMass>();
        let velocity = siblings.get::<ObjectVelocity>();
        if let (Some(mass), Some(velocity)) = (mass, velocity) {
            let momentum = velocity.value() * mass.kilograms();
            self.set_value(momentum);
        }
    }

    fn draw_gizmos(&self, renderer: &mut dyn GizmoRenderer, siblings: &PropertyMap) {
        let origin = gizmo_origin(siblings);
        renderer.draw_vector(origin, origin + self.value(), &GizmoStyle::MOMENTUM);
    }
}
