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
//! The scene: every physics object plus the graphs sampling them
//!
//! Objects never read each other, so one step of the scene steps them
//! independently. With the `parallel` feature they are stepped on the
//! rayon pool; the result is identical to the sequential order because
//! no state is shared between objects.

use crate::error::{KernelError, KernelResult};
use crate::gizmo::GizmoRenderer;
use crate::graph::Graph;
use crate::math::Vector2;
use crate::object::{FactoryRegistry, ObjectKind, PhysicsObject};
use crate::simulator::Simulatable;
use std::any::Any;
use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Scene of physics objects and graphs
#[derive(Debug, Default)]
pub struct Ambient {
    factories: FactoryRegistry,
    objects: Vec<PhysicsObject>,
    name_counters: HashMap<ObjectKind, u32>,
    graphs: Vec<Graph>,
    elapsed: f64,
}

impl Ambient {
    /// Create an empty scene that builds objects with `factories`
    pub fn new(factories: FactoryRegistry) -> Self {
        Ambient {
            factories,
            objects: Vec::new(),
            name_counters: HashMap::new(),
            graphs: Vec::new(),
            elapsed: 0.0,
        }
    }

    /// Factories used for creation and loading
    pub fn factories(&self) -> &FactoryRegistry {
        &self.factories
    }

    /// Factories, for registering custom kinds
    pub fn factories_mut(&mut self) -> &mut FactoryRegistry {
        &mut self.factories
    }

    /// Seconds stepped since the last reset
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Create an object through its factory and add it on top
    ///
    /// Without a name, the object is called `"<default name> <n>"` with the
    /// first `n` not already in use.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::DuplicateName`] if `name` is taken and
    /// [`KernelError::UnknownObjectKind`] if no factory builds `kind`.
    pub fn add_object(&mut self, kind: ObjectKind, name: Option<&str>) -> KernelResult<&mut PhysicsObject> {
        let name = match name {
            Some(name) => {
                self.check_name_free(name)?;
                name.to_string()
            }
            None => self.next_name(kind),
        };
        let object = self.factories.create(kind, name)?;
        Ok(self.push_object(object))
    }

    /// Add an already built object on top
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::DuplicateName`] if an object with the same
    /// name is already in the scene.
    pub fn insert_object(&mut self, object: PhysicsObject) -> KernelResult<&mut PhysicsObject> {
        self.check_name_free(object.name())?;
        Ok(self.push_object(object))
    }

    fn check_name_free(&self, name: &str) -> KernelResult<()> {
        match self.object(name) {
            Some(_) => Err(KernelError::DuplicateName(name.to_string())),
            None => Ok(()),
        }
    }

    /// Append without the name check; callers guarantee uniqueness
    pub(crate) fn push_object(&mut self, object: PhysicsObject) -> &mut PhysicsObject {
        tracing::debug!(name = object.name(), kind = %object.kind(), "object added");
        let index = self.objects.len();
        self.objects.push(object);
        &mut self.objects[index]
    }

    /// Next free generated name for `kind`
    pub fn next_name(&mut self, kind: ObjectKind) -> String {
        let prefix = self.factories.default_name(kind).unwrap_or("Object").to_string();
        loop {
            let counter = self.name_counters.entry(kind).or_insert(0);
            *counter += 1;
            let candidate = format!("{prefix} {counter}");
            if self.object(&candidate).is_none() {
                return candidate;
            }
        }
    }

    /// Remove an object by name
    pub fn remove_object(&mut self, name: &str) -> Option<PhysicsObject> {
        let index = self.objects.iter().position(|object| object.name() == name)?;
        let object = self.objects.remove(index);
        tracing::debug!(name, "object removed");
        Some(object)
    }

    /// Remove every object and graph and restart name numbering
    pub fn clear(&mut self) {
        self.objects.clear();
        self.graphs.clear();
        self.name_counters.clear();
        self.elapsed = 0.0;
    }

    /// Object by name
    pub fn object(&self, name: &str) -> Option<&PhysicsObject> {
        self.objects.iter().find(|object| object.name() == name)
    }

    /// Object by name, mutably
    pub fn object_mut(&mut self, name: &str) -> Option<&mut PhysicsObject> {
        self.objects.iter_mut().find(|object| object.name() == name)
    }

    /// Objects from bottom to top
    pub fn objects(&self) -> &[PhysicsObject] {
        &self.objects
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene has no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Topmost object under a world point
    pub fn object_at(&self, point: Vector2) -> Option<&PhysicsObject> {
        self.objects
            .iter()
            .rev()
            .find(|object| object.is_position_inside_object(point))
    }

    /// Add a graph and take its first sample
    pub fn add_graph(&mut self, mut graph: Graph) -> usize {
        graph.sample(self.elapsed, &self.objects);
        self.graphs.push(graph);
        self.graphs.len() - 1
    }

    /// Remove a graph by index
    pub fn remove_graph(&mut self, index: usize) -> Option<Graph> {
        (index < self.graphs.len()).then(|| self.graphs.remove(index))
    }

    /// Graphs in creation order
    pub fn graphs(&self) -> &[Graph] {
        &self.graphs
    }

    /// Draw gizmos of every object
    pub fn draw_gizmos(&self, renderer: &mut dyn GizmoRenderer) {
        for object in &self.objects {
            object.draw_gizmos(renderer);
        }
    }

    fn step_objects(&mut self, step: f64) {
        #[cfg(feature = "parallel")]
        {
            self.objects
                .par_iter_mut()
                .for_each(|object| object.simulate(step));
        }

        #[cfg(not(feature = "parallel"))]
        {
            for object in self.objects.iter_mut() {
                object.simulate(step);
            }
        }
    }

    fn sample_graphs(&mut self) {
        for graph in self.graphs.iter_mut() {
            graph.sample(self.elapsed, &self.objects);
        }
    }
}

impl Simulatable for Ambient {
    fn simulate(&mut self, step: f64) {
        self.elapsed += step;
        self.step_objects(step);
        self.sample_graphs();
    }

    fn reset(&mut self) {
        self.elapsed = 0.0;
        for object in self.objects.iter_mut() {
            object.reset();
        }
        for graph in self.graphs.iter_mut() {
            graph.reset();
        }
        self.sample_graphs();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphAxis;
    use crate::properties::{ObjectPosition, ObjectSize, ObjectVelocity};
    use crate::property::PropertyKind;

    #[test]
    fn test_generated_names() {
        let mut ambient = Ambient::default();
        let first = ambient.add_object(ObjectKind::SOLID, None).unwrap().name().to_string();
        let second = ambient.add_object(ObjectKind::SOLID, None).unwrap().name().to_string();
        let particle = ambient.add_object(ObjectKind::PARTICLE, None).unwrap().name().to_string();
        assert_eq!(first, "Solid 1");
        assert_eq!(second, "Solid 2");
        assert_eq!(particle, "Particle 1");

        ambient.add_object(ObjectKind::SOLID, Some("Solid 3")).unwrap();
        let next = ambient.add_object(ObjectKind::SOLID, None).unwrap().name().to_string();
        assert_eq!(next, "Solid 4");
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let mut ambient = Ambient::default();
        ambient.add_object(ObjectKind::SOLID, Some("ball")).unwrap();
        let err = ambient.add_object(ObjectKind::PARTICLE, Some("ball")).unwrap_err();
        assert!(matches!(err, KernelError::DuplicateName(ref name) if name == "ball"));

        let twin = ambient.factories().create(ObjectKind::SOLID, "ball").unwrap();
        assert!(matches!(
            ambient.insert_object(twin),
            Err(KernelError::DuplicateName(_))
        ));
        assert_eq!(ambient.len(), 1);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let mut ambient = Ambient::default();
        assert!(ambient.add_object(ObjectKind(42), None).is_err());
        assert!(ambient.is_empty());
    }

    #[test]
    fn test_object_at_prefers_topmost() {
        let mut ambient = Ambient::default();
        ambient.add_object(ObjectKind::SOLID, Some("bottom")).unwrap();
        ambient.add_object(ObjectKind::SOLID, Some("top")).unwrap();
        ambient
            .object_mut("bottom")
            .unwrap()
            .edit::<ObjectSize, _>(|size| size.set_initial_value(Vector2::new(10.0, 10.0)));

        assert_eq!(ambient.object_at(Vector2::zero()).unwrap().name(), "top");
        assert_eq!(ambient.object_at(Vector2::new(3.0, 3.0)).unwrap().name(), "bottom");
        assert!(ambient.object_at(Vector2::new(30.0, 0.0)).is_none());
    }

    #[test]
    fn test_simulate_and_reset_objects() {
        let mut ambient = Ambient::default();
        for _ in 0..8 {
            ambient
                .add_object(ObjectKind::SOLID, None)
                .unwrap()
                .edit::<ObjectVelocity, _>(|v| v.set_initial_value(Vector2::new(1.0, 0.0)));
        }
        ambient.simulate(2.0);
        for object in ambient.objects() {
            assert_eq!(
                object.property::<ObjectPosition>().unwrap().value(),
                Vector2::new(2.0, 0.0)
            );
        }

        ambient.reset();
        assert_eq!(ambient.elapsed(), 0.0);
        for object in ambient.objects() {
            assert_eq!(object.sprite().draw_position, Vector2::zero());
        }
    }

    #[test]
    fn test_graphs_follow_steps_and_reset() {
        let mut ambient = Ambient::default();
        ambient
            .add_object(ObjectKind::SOLID, Some("ball"))
            .unwrap()
            .edit::<ObjectVelocity, _>(|v| v.set_initial_value(Vector2::new(3.0, 0.0)));
        let index = ambient.add_graph(Graph::new("ball", PropertyKind::Position, GraphAxis::X));

        ambient.simulate(1.0);
        ambient.simulate(1.0);
        // Straight line: the middle sample is pruned
        assert_eq!(
            ambient.graphs()[index].points(),
            &[Vector2::new(0.0, 0.0), Vector2::new(2.0, 6.0)]
        );

        ambient.reset();
        assert_eq!(ambient.graphs()[index].points(), &[Vector2::zero()]);

        assert!(ambient.remove_graph(index).is_some());
        assert!(ambient.remove_graph(index).is_none());
    }

    #[test]
    fn test_remove_object() {
        let mut ambient = Ambient::default();
        ambient.add_object(ObjectKind::SOLID, None).unwrap();
        assert!(ambient.remove_object("Solid 1").is_some());
        assert!(ambient.remove_object("Solid 1").is_none());
        assert!(ambient.is_empty());
    }
}
