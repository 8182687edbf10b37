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
//! Concrete physics properties
//!
//! Each property wraps a [`PhysicsProperty`](crate::property::PhysicsProperty)
//! and dereferences to it, so `velocity.value()` and
//! `size.set_initial_value(..)` work directly on the concrete type.
//!
//! - [`spatial`]: position, size and the derived area
//! - [`motion`]: velocity (the integrator), acceleration, centripetal
//!   acceleration and displacement
//! - [`dynamics`]: mass, named forces and momentum

/// Deref a property wrapper to its `PhysicsProperty`
macro_rules! property_wrapper {
    ($ty:ident, $calc:ty) => {
        impl std::ops::Deref for $ty {
            type Target = $crate::property::PhysicsProperty<$calc>;

            fn deref(&self) -> &Self::Target {
                &self.property
            }
        }

        impl std::ops::DerefMut for $ty {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.property
            }
        }
    };
}

/// Plumbing methods of [`Property`](crate::property::Property) for a wrapper
macro_rules! property_plumbing {
    () => {
        fn core(&self) -> &dyn $crate::property::PropertyCore {
            &self.property
        }

        fn core_mut(&mut self) -> &mut dyn $crate::property::PropertyCore {
            &mut self.property
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    };
}

pub mod dynamics;
pub mod motion;
pub mod spatial;

pub use dynamics::{NamedForce, ObjectMass, ObjectMomentum, ObjectNetForce, DEFAULT_MASS_GRAMS};
pub use motion::{
    ObjectAcceleration, ObjectCentripetalAcceleration, ObjectDisplacement, ObjectVelocity,
};
pub use spatial::{ObjectArea, ObjectPosition, ObjectSize};

use crate::math::Vector2;
use crate::property::PropertyMap;

/// Simulation priorities of the stepped properties
///
/// Acceleration is refreshed before velocity integrates; every derived
/// read runs after both.
pub mod priority {
    /// Acceleration tier
    pub const ACCELERATION: i32 = 2;
    /// Velocity tier (moves position)
    pub const VELOCITY: i32 = 1;
    /// Derived reads: displacement, momentum
    pub const DERIVED: i32 = 0;
}

/// Grams per kilogram; mass is edited in grams
pub const GRAMS_PER_KILOGRAM: f64 = 1000.0;

/// Live position of the owning object, the origin of vector gizmos
fn gizmo_origin(siblings: &PropertyMap) -> Vector2 {
    siblings
        .get::<ObjectPosition>()
        .map(|position| position.value())
        .unwrap_or_default()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::gizmo::{GizmoRenderer, GizmoStyle};
    use crate::math::Vector2;

    /// Renderer that records every primitive
    #[derive(Default)]
    pub struct RecordingRenderer {
        pub vectors: Vec<(Vector2, Vector2, GizmoStyle)>,
        pub rects: Vec<(Vector2, Vector2)>,
    }

    impl GizmoRenderer for RecordingRenderer {
        fn draw_vector(&mut self, from: Vector2, to: Vector2, style: &GizmoStyle) {
            self.vectors.push((from, to, *style));
        }

        fn draw_rect(&mut self, center: Vector2, size: Vector2, _style: &GizmoStyle) {
            self.rects.push((center, size));
        }
    }
}
