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
//! End-to-end kinematics scenarios driven through the simulator

use kinematics_kernel::ambient::Ambient;
use kinematics_kernel::math::{TrackingVector, Vector2};
use kinematics_kernel::object::{FactoryRegistry, ObjectKind, PhysicsObject};
use kinematics_kernel::properties::{
    ObjectAcceleration, ObjectArea, ObjectCentripetalAcceleration, ObjectDisplacement,
    ObjectMass, ObjectMomentum, ObjectNetForce, ObjectPosition, ObjectSize, ObjectVelocity,
};
use kinematics_kernel::simulator::{SimulatableId, Simulator, SimulatorState};

fn solid() -> PhysicsObject {
    FactoryRegistry::with_builtin()
        .create(ObjectKind::SOLID, "body")
        .unwrap()
}

fn scene_with(object: PhysicsObject) -> (Simulator, SimulatableId) {
    let mut ambient = Ambient::default();
    ambient.insert_object(object).unwrap();
    let mut simulator = Simulator::default();
    let id = simulator.add(Box::new(ambient));
    (simulator, id)
}

fn body(simulator: &Simulator, id: SimulatableId) -> &PhysicsObject {
    simulator
        .get::<Ambient>(id)
        .and_then(|ambient| ambient.object("body"))
        .unwrap()
}

fn position(object: &PhysicsObject) -> Vector2 {
    object.property::<ObjectPosition>().unwrap().value()
}

#[test]
fn test_free_motion_one_step() {
    let mut object = solid();
    object.edit::<ObjectVelocity, _>(|v| v.set_initial_value(Vector2::new(1.0, 0.0)));
    let (mut simulator, id) = scene_with(object);

    simulator.pass_time(1.0).unwrap();

    let object = body(&simulator, id);
    assert_eq!(position(object), Vector2::new(1.0, 0.0));
    assert_eq!(
        object.property::<ObjectDisplacement>().unwrap().value(),
        Vector2::new(1.0, 0.0)
    );
}

#[test]
fn test_uniform_acceleration() {
    let mut object = solid();
    object.edit::<ObjectAcceleration, _>(|a| a.set_initial_value(Vector2::new(0.0, -10.0)));
    let (mut simulator, id) = scene_with(object);

    simulator.pass_time(1.0).unwrap();
    {
        let object = body(&simulator, id);
        assert_eq!(position(object).y, -5.0);
        assert_eq!(object.property::<ObjectVelocity>().unwrap().value().y, -10.0);
    }

    for _ in 0..3 {
        simulator.pass_time(1.0).unwrap();
    }
    let object = body(&simulator, id);
    // y = -10 * t² / 2 at t = 4
    assert_eq!(position(object).y, -80.0);
    assert_eq!(object.property::<ObjectVelocity>().unwrap().value().y, -40.0);
}

#[test]
fn test_area_updates_without_stepping() {
    let mut object = solid();
    object.edit::<ObjectSize, _>(|s| s.set_initial_value(Vector2::new(2.0, 3.0)));
    assert_eq!(object.property::<ObjectArea>().unwrap().initial_value(), 6.0);
}

#[test]
fn test_force_drives_acceleration_and_momentum() {
    let mut object = solid();
    object.edit::<ObjectMass, _>(|m| m.set_initial_value(2000.0));
    object.edit::<ObjectNetForce, _>(|f| f.add_force("F0", Vector2::new(4.0, 0.0)));
    let (mut simulator, id) = scene_with(object);

    simulator.pass_time(1.0).unwrap();
    let object = body(&simulator, id);
    // a = 4 N / 2 kg
    assert_eq!(
        object.property::<ObjectAcceleration>().unwrap().value(),
        Vector2::new(2.0, 0.0)
    );
    assert_eq!(position(object), Vector2::new(1.0, 0.0));
    assert_eq!(
        object.property::<ObjectMomentum>().unwrap().value(),
        Vector2::new(4.0, 0.0)
    );
}

#[test]
fn test_playback_then_reset_restores_base() {
    let mut object = solid();
    object.edit::<ObjectVelocity, _>(|v| v.set_initial_value(Vector2::new(3.0, 1.0)));
    object.edit::<ObjectCentripetalAcceleration, _>(|c| {
        c.set_initial_value(TrackingVector::new(2.0, Vector2::new(5.0, 5.0)))
    });
    let (mut simulator, id) = scene_with(object);

    simulator.start();
    for _ in 0..120 {
        assert!(simulator.on_animation_frame());
    }
    simulator.stop();
    assert_eq!(simulator.state(), SimulatorState::Paused);
    assert_ne!(position(body(&simulator, id)), Vector2::zero());

    assert!(simulator.reset());
    let object = body(&simulator, id);
    assert_eq!(position(object), Vector2::zero());
    assert_eq!(
        object.property::<ObjectVelocity>().unwrap().value(),
        Vector2::new(3.0, 1.0)
    );
    assert_eq!(object.sprite().draw_position, Vector2::zero());
}

#[test]
fn test_fast_forward_is_reproducible() {
    let mut object = solid();
    object.edit::<ObjectVelocity, _>(|v| v.set_initial_value(Vector2::new(0.0, 1.0)));
    object.edit::<ObjectCentripetalAcceleration, _>(|c| {
        c.set_initial_value(TrackingVector::new(1.0, Vector2::new(-1.0, 0.0)))
    });
    let (mut simulator, id) = scene_with(object);

    simulator.fast_forward_to(0.5).unwrap();
    let first = position(body(&simulator, id));

    simulator.pass_time(0.25).unwrap();
    simulator.fast_forward_to(0.5).unwrap();
    assert_eq!(position(body(&simulator, id)), first);
    assert_eq!(simulator.time(), 0.5);
}

#[test]
fn test_fast_forward_single_step_matches_one_pass() {
    let mut a = solid();
    a.edit::<ObjectCentripetalAcceleration, _>(|c| {
        c.set_initial_value(TrackingVector::new(1.0, Vector2::new(3.0, 0.0)))
    });
    let mut b = solid();
    b.edit::<ObjectCentripetalAcceleration, _>(|c| {
        c.set_initial_value(TrackingVector::new(1.0, Vector2::new(3.0, 0.0)))
    });

    let (mut simulator, id) = scene_with(a);
    simulator.fast_forward_to(2.0).unwrap();
    b.simulate(2.0);
    assert_eq!(position(body(&simulator, id)), position(&b));
}

#[test]
fn test_particle_steps_without_extent() {
    let mut particle = FactoryRegistry::with_builtin()
        .create(ObjectKind::PARTICLE, "body")
        .unwrap();
    particle.edit::<ObjectVelocity, _>(|v| v.set_initial_value(Vector2::new(-2.0, 0.0)));
    let (mut simulator, id) = scene_with(particle);

    simulator.pass_time(0.5).unwrap();
    let particle = body(&simulator, id);
    assert_eq!(position(particle), Vector2::new(-1.0, 0.0));
    assert_eq!(particle.sprite().draw_size, Vector2::zero());
    assert!(particle.is_position_inside_object(Vector2::new(-1.0, 0.0)));
}

#[test]
fn test_hit_test() {
    let mut object = solid();
    object.edit::<ObjectSize, _>(|s| s.set_initial_value(Vector2::new(2.0, 2.0)));
    assert!(object.is_position_inside_object(Vector2::new(0.9, 0.9)));
    assert!(!object.is_position_inside_object(Vector2::new(1.1, 0.0)));
}

#[test]
fn test_zero_step_offsets_are_reset() {
    let mut object = solid();
    object.edit::<ObjectNetForce, _>(|f| f.add_force("F0", Vector2::new(3.0, 0.0)));
    let (mut simulator, id) = scene_with(object);

    simulator.pass_time(0.0).unwrap();
    assert_eq!(
        body(&simulator, id).property::<ObjectAcceleration>().unwrap().offset(),
        Vector2::new(3.0, 0.0)
    );

    assert!(simulator.reset());
    let object = body(&simulator, id);
    assert_eq!(object.property::<ObjectAcceleration>().unwrap().offset(), Vector2::zero());
    assert_eq!(object.property::<ObjectMomentum>().unwrap().offset(), Vector2::zero());
}

#[test]
fn test_duplicate_names_rejected_in_scene() {
    let mut ambient = Ambient::default();
    ambient.add_object(ObjectKind::SOLID, Some("ball")).unwrap();
    assert!(ambient.add_object(ObjectKind::SOLID, Some("ball")).is_err());
    assert!(ambient.insert_object(solid()).is_ok());
    assert!(ambient.insert_object(solid()).is_err());
    let names: Vec<_> = ambient.objects().iter().map(|o| o.name()).collect();
    assert_eq!(names, ["ball", "body"]);
}
