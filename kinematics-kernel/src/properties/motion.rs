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
//! Motion properties and the velocity Verlet step
//!
//! Within one object step, acceleration is refreshed first, then velocity
//! integrates position and itself:
//!
//! ```text
//! p(t + dt) = p(t) + v(t)*dt + 0.5*a(t)*dt²
//! a(t + dt) = acceleration evaluated at p(t + dt)
//! v(t + dt) = v(t) + 0.5*(a(t) + a(t + dt))*dt
//! ```
//!
//! Re-evaluating the acceleration at the new position keeps a
//! position-dependent (centripetal) pull stable without sub-stepping.
//! Displacement is read afterwards.

use super::{gizmo_origin, priority, ObjectMass, ObjectNetForce, ObjectPosition, GRAMS_PER_KILOGRAM};
use crate::calculator::{TrackingVectorCalculator, Vector2Calculator};
use crate::gizmo::{GizmoRenderer, GizmoStyle};
use crate::math::{TrackingVector, Vector2};
use crate::property::{PhysicsProperty, Property, PropertyKind, PropertyMap};

/// Velocity in world units per second; owns the integration step
#[derive(Debug)]
pub struct ObjectVelocity {
    property: PhysicsProperty<Vector2Calculator>,
}

impl ObjectVelocity {
    /// Create a velocity property
    pub fn new(initial: Vector2) -> Self {
        ObjectVelocity {
            property: PhysicsProperty::new(PropertyKind::Velocity, true, initial)
                .with_priority(priority::VELOCITY),
        }
    }
}

property_wrapper!(ObjectVelocity, Vector2Calculator);

impl Property for ObjectVelocity {
    property_plumbing!();

    fn dependencies(&self) -> &'static [PropertyKind] {
        &[PropertyKind::Position, PropertyKind::Acceleration]
    }

    fn simulate(&mut self, step: f64, siblings: &mut PropertyMap) {
        let velocity = self.value();
        let acceleration = siblings
            .get::<ObjectAcceleration>()
            .map(|a| a.value())
            .unwrap_or_default();

        // Position update: p(t + dt) = p(t) + v(t)*dt + 0.5*a(t)*dt²
        match siblings.get_mut::<ObjectPosition>() {
            Some(position) => {
                let next = position.value() + velocity * step + acceleration * (step * step / 2.0);
                position.set_value(next);
            }
            None => tracing::trace!("velocity step without position; position left unchanged"),
        }

        // a(t + dt) at the new position
        let next_acceleration = match siblings.get::<ObjectAcceleration>() {
            Some(a) => Some(a.evaluate(siblings)),
            None => None,
        };
        let next_acceleration = match next_acceleration {
            Some(next) => {
                if let Some(a) = siblings.get_mut::<ObjectAcceleration>() {
                    a.set_value(next);
                }
                next
            }
            None => Vector2::zero(),
        };

        // v(t + dt) = v(t) + 0.5*(a(t) + a(t + dt))*dt
        let average = (acceleration + next_acceleration) / 2.0;
        self.set_value(velocity + average * step);
    }

    fn draw_gizmos(&self, renderer: &mut dyn GizmoRenderer, siblings: &PropertyMap) {
        let origin = gizmo_origin(siblings);
        renderer.draw_vector(origin, origin + self.value(), &GizmoStyle::VELOCITY);
    }
}

/// Acceleration in world units per second squared
///
/// The base value is the user's constant acceleration. Each step the live
/// value becomes base plus the centripetal pull toward its target plus the
/// net force divided by mass.
#[derive(Debug)]
pub struct ObjectAcceleration {
    property: PhysicsProperty<Vector2Calculator>,
}

impl ObjectAcceleration {
    /// Create an acceleration property
    pub fn new(initial: Vector2) -> Self {
        ObjectAcceleration {
            property: PhysicsProperty::new(PropertyKind::Acceleration, true, initial)
                .with_priority(priority::ACCELERATION),
        }
    }

    /// Acceleration implied by the current sibling state
    ///
    /// Absent siblings contribute nothing. The force term is skipped unless
    /// mass is strictly positive.
    pub fn evaluate(&self, siblings: &PropertyMap) -> Vector2 {
        let mut acceleration = self.initial_value();

        let centripetal = siblings.get::<ObjectCentripetalAcceleration>();
        let position = siblings.get::<ObjectPosition>();
        if let (Some(centripetal), Some(position)) = (centripetal, position) {
            acceleration = acceleration + centripetal.acceleration_at(position.value());
        }

        let force = siblings.get::<ObjectNetForce>();
        let mass = siblings.get::<ObjectMass>();
        if let (Some(force), Some(mass)) = (force, mass) {
            let grams = mass.value();
            if grams > 0.0 {
                acceleration = acceleration + force.value() / (grams / GRAMS_PER_KILOGRAM);
            }
        }

        acceleration
    }
}

property_wrapper!(ObjectAcceleration, Vector2Calculator);

impl Property for ObjectAcceleration {
    property_plumbing!();

    fn dependencies(&self) -> &'static [PropertyKind] {
        &[
            PropertyKind::CentripetalAcceleration,
            PropertyKind::Position,
            PropertyKind::NetForce,
            PropertyKind::Mass,
        ]
    }

    fn simulate(&mut self, _step: f64, siblings: &mut PropertyMap) {
        let next = self.evaluate(siblings);
        self.set_value(next);
    }

    fn draw_gizmos(&self, renderer: &mut dyn GizmoRenderer, siblings: &PropertyMap) {
        let origin = gizmo_origin(siblings);
        renderer.draw_vector(origin, origin + self.value(), &GizmoStyle::ACCELERATION);
    }
}

/// Strength and orbit center of a centripetal pull
#[derive(Debug)]
pub struct ObjectCentripetalAcceleration {
    property: PhysicsProperty<TrackingVectorCalculator>,
}

impl ObjectCentripetalAcceleration {
    /// Create a centripetal acceleration property
    pub fn new(initial: TrackingVector) -> Self {
        ObjectCentripetalAcceleration {
            property: PhysicsProperty::new(PropertyKind::CentripetalAcceleration, true, initial),
        }
    }

    /// Pull felt at `position`; zero on the target itself
    pub fn acceleration_at(&self, position: Vector2) -> Vector2 {
        self.value().acceleration_at(position)
    }
}

property_wrapper!(ObjectCentripetalAcceleration, TrackingVectorCalculator);

impl Property for ObjectCentripetalAcceleration {
    property_plumbing!();

    fn draw_gizmos(&self, renderer: &mut dyn GizmoRenderer, siblings: &PropertyMap) {
        let origin = gizmo_origin(siblings);
        renderer.draw_vector(
            origin,
            origin + self.acceleration_at(origin),
            &GizmoStyle::CENTRIPETAL,
        );
    }
}

/// Vector from the base position to the live position
#[derive(Debug)]
pub struct ObjectDisplacement {
    property: PhysicsProperty<Vector2Calculator>,
}

impl ObjectDisplacement {
    /// Create a displacement property, zero until the first step
    pub fn new() -> Self {
        ObjectDisplacement {
            property: PhysicsProperty::new(PropertyKind::Displacement, false, Vector2::zero())
                .with_priority(priority::DERIVED),
        }
    }
}

impl Default for ObjectDisplacement {
    fn default() -> Self {
        Self::new()
    }
}

property_wrapper!(ObjectDisplacement, Vector2Calculator);

impl Property for ObjectDisplacement {
    property_plumbing!();

    fn dependencies(&self) -> &'static [PropertyKind] {
        &[PropertyKind::Position]
    }

    fn simulate(&mut self, _step: f64, siblings: &mut PropertyMap) {
        if let Some(position) = siblings.get::<ObjectPosition>() {
            let moved = position.value() - position.initial_value();
            self.set_value(moved);
        }
    }

    fn draw_gizmos(&self, renderer: &mut dyn GizmoRenderer, siblings: &PropertyMap) {
        if let Some(position) = siblings.get::<ObjectPosition>() {
            renderer.draw_vector(
                position.initial_value(),
                position.value(),
                &GizmoStyle::DISPLACEMENT,
            );
        }
    }
}
