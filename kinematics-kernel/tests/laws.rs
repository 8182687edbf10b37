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
//! Property-based checks of the base/offset laws, JSON round trips and
//! integrator determinism

use kinematics_kernel::calculator::{Calculator, NumberCalculator, Vector2Calculator};
use kinematics_kernel::math::{TrackingVector, Vector2};
use kinematics_kernel::object::{FactoryRegistry, ObjectKind, PhysicsObject};
use kinematics_kernel::properties::{
    ObjectAcceleration, ObjectCentripetalAcceleration, ObjectMass, ObjectNetForce,
    ObjectPosition, ObjectSize, ObjectVelocity,
};
use kinematics_kernel::property::{PhysicsProperty, PropertyKind};
use proptest::prelude::*;

fn vector() -> impl Strategy<Value = Vector2> {
    (-1.0e3..1.0e3f64, -1.0e3..1.0e3f64).prop_map(|(x, y)| Vector2::new(x, y))
}

#[derive(Debug, Clone)]
struct Setup {
    position: Vector2,
    size: Vector2,
    velocity: Vector2,
    acceleration: Vector2,
    centripetal: TrackingVector,
    forces: Vec<Vector2>,
    grams: f64,
}

fn setup() -> impl Strategy<Value = Setup> {
    (
        vector(),
        vector(),
        vector(),
        vector(),
        (0.0..50.0f64, vector()),
        prop::collection::vec(vector(), 0..4),
        -10.0..5.0e3f64,
    )
        .prop_map(
            |(position, size, velocity, acceleration, (magnitude, target), forces, grams)| Setup {
                position,
                size,
                velocity,
                acceleration,
                centripetal: TrackingVector::new(magnitude, target),
                forces,
                grams,
            },
        )
}

fn build(setup: &Setup) -> PhysicsObject {
    let mut object = FactoryRegistry::with_builtin()
        .create(ObjectKind::SOLID, "body")
        .unwrap();
    object.edit::<ObjectPosition, _>(|p| p.set_initial_value(setup.position));
    object.edit::<ObjectSize, _>(|s| s.set_initial_value(setup.size));
    object.edit::<ObjectVelocity, _>(|v| v.set_initial_value(setup.velocity));
    object.edit::<ObjectAcceleration, _>(|a| a.set_initial_value(setup.acceleration));
    object.edit::<ObjectCentripetalAcceleration, _>(|c| c.set_initial_value(setup.centripetal));
    object.edit::<ObjectMass, _>(|m| m.set_initial_value(setup.grams));
    object.edit::<ObjectNetForce, _>(|net| {
        for (i, force) in setup.forces.iter().enumerate() {
            net.add_force(format!("F{i}"), *force);
        }
    });
    object
}

fn position_of(object: &PhysicsObject) -> Vector2 {
    object.property::<ObjectPosition>().unwrap().value()
}

proptest! {
    /// Reset returns the live value to exactly the base
    #[test]
    fn prop_reset_law(base in vector(), writes in prop::collection::vec(vector(), 0..8)) {
        let mut property = PhysicsProperty::<Vector2Calculator>::new(PropertyKind::Velocity, true, base);
        for value in writes {
            property.set_value(value);
        }
        property.reset();
        prop_assert_eq!(property.value(), property.initial_value());
        prop_assert_eq!(property.offset(), Vector2::zero());
    }

    /// A base edit keeps the accumulated offset
    #[test]
    fn prop_base_edit_keeps_offset(base in vector(), live in vector(), next in vector()) {
        let mut property = PhysicsProperty::<Vector2Calculator>::new(PropertyKind::Position, true, base);
        property.set_value(live);
        let offset = property.offset();

        property.set_initial_value(next);
        prop_assert_eq!(property.value(), Vector2Calculator.sum(next, offset));
        prop_assert_eq!(property.offset(), offset);
    }

    /// `sub(sum(a, b), b) == a` and `zero` is the identity, exactly for
    /// dyadic inputs
    #[test]
    fn prop_calculator_inverse(
        (ax, ay, bx, by) in (-4096i32..4096, -4096i32..4096, -4096i32..4096, -4096i32..4096),
        scale in 0u32..8,
    ) {
        let dyadic = |n: i32| f64::from(n) / f64::from(1u32 << scale);
        let a = Vector2::new(dyadic(ax), dyadic(ay));
        let b = Vector2::new(dyadic(bx), dyadic(by));

        let vectors = Vector2Calculator;
        prop_assert_eq!(vectors.sub(vectors.sum(a, b), b), a);
        prop_assert_eq!(vectors.sum(a, vectors.zero()), a);

        let numbers = NumberCalculator;
        prop_assert_eq!(numbers.sub(numbers.sum(a.x, b.y), b.y), a.x);
        prop_assert_eq!(numbers.sum(a.y, numbers.zero()), a.y);
    }

    /// Saving and loading an object reproduces every base value
    #[test]
    fn prop_json_round_trip(setup in setup()) {
        let original = build(&setup);
        let mut restored = FactoryRegistry::with_builtin()
            .create(ObjectKind::SOLID, "copy")
            .unwrap();
        restored.apply_json(&original.to_json()).unwrap();

        for kind in PropertyKind::ALL {
            let before = original.get_property(kind).unwrap().core().initial_value();
            let after = restored.get_property(kind).unwrap().core().initial_value();
            prop_assert_eq!(before, after, "{}", kind);
        }
    }

    /// Identical inputs and steps give bitwise identical trajectories
    #[test]
    fn prop_stepping_is_deterministic(
        setup in setup(),
        steps in prop::collection::vec(0.0..0.1f64, 1..50),
    ) {
        let mut a = build(&setup);
        let mut b = build(&setup);
        for step in steps {
            a.simulate(step);
            b.simulate(step);
            prop_assert_eq!(position_of(&a), position_of(&b));
        }

        a.reset();
        prop_assert_eq!(position_of(&a), setup.position);
    }
}
