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
//! Time series of one property component
//!
//! Graphs sample instead of integrating. Each sample is a `(time, value)`
//! point; when three consecutive points are colinear the middle one is
//! dropped, so straight stretches cost two points however long they run.

use crate::math::Vector2;
use crate::object::PhysicsObject;
use crate::property::{PropertyKind, PropertyValue};

/// Scalar read from a property value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphAxis {
    /// Horizontal component (target x for a tracking vector)
    X,
    /// Vertical component (target y for a tracking vector)
    Y,
    /// Length of the vector (stored magnitude for a tracking vector)
    Magnitude,
}

impl GraphAxis {
    /// Read this axis from a property value; numbers ignore the axis
    pub fn read(&self, value: PropertyValue) -> f64 {
        match value {
            PropertyValue::Number(n) => n,
            PropertyValue::Vector(v) => match self {
                GraphAxis::X => v.x,
                GraphAxis::Y => v.y,
                GraphAxis::Magnitude => v.magnitude(),
            },
            PropertyValue::Tracking(t) => match self {
                GraphAxis::X => t.target.x,
                GraphAxis::Y => t.target.y,
                GraphAxis::Magnitude => t.magnitude,
            },
        }
    }
}

/// Sampled history of one property of one named object
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    object: String,
    property: PropertyKind,
    axis: GraphAxis,
    points: Vec<Vector2>,
}

impl Graph {
    /// Create an empty graph
    pub fn new(object: impl Into<String>, property: PropertyKind, axis: GraphAxis) -> Self {
        Graph {
            object: object.into(),
            property,
            axis,
            points: Vec::new(),
        }
    }

    /// Name of the sampled object
    pub fn object(&self) -> &str {
        &self.object
    }

    /// Sampled property
    pub fn property(&self) -> PropertyKind {
        self.property
    }

    /// Sampled component
    pub fn axis(&self) -> GraphAxis {
        self.axis
    }

    /// Points as `(time, value)` vectors
    pub fn points(&self) -> &[Vector2] {
        &self.points
    }

    /// Sample the live value from the matching object
    ///
    /// Does nothing if the object or its property is gone.
    pub fn sample(&mut self, time: f64, objects: &[PhysicsObject]) {
        let value = objects
            .iter()
            .find(|object| object.name() == self.object)
            .and_then(|object| object.get_property(self.property))
            .map(|property| property.core().value());
        match value {
            Some(value) => self.push(Vector2::new(time, self.axis.read(value))),
            None => tracing::trace!(object = %self.object, property = %self.property, "graph source missing"),
        }
    }

    /// Append a point, dropping the previous one if it became redundant
    pub fn push(&mut self, point: Vector2) {
        if let [.., a, b] = self.points.as_slice() {
            if Vector2::colinear(*a, *b, point) {
                self.points.pop();
            }
        }
        self.points.push(point);
    }

    /// Drop every point
    pub fn reset(&mut self) {
        self.points.clear();
    }
}
