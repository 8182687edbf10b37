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
//! Position, size and area
//!
//! Area is derived from size whenever size's base value changes; it never
//! takes part in stepping.

use crate::calculator::{NumberCalculator, Vector2Calculator};
use crate::gizmo::{GizmoRenderer, GizmoStyle};
use crate::math::Vector2;
use crate::property::{PhysicsProperty, Property, PropertyKind, PropertyMap};

/// Object center in world units
#[derive(Debug)]
pub struct ObjectPosition {
    property: PhysicsProperty<Vector2Calculator>,
}

impl ObjectPosition {
    /// Create a position property
    pub fn new(initial: Vector2) -> Self {
        ObjectPosition {
            property: PhysicsProperty::new(PropertyKind::Position, true, initial),
        }
    }
}

property_wrapper!(ObjectPosition, Vector2Calculator);

impl Property for ObjectPosition {
    property_plumbing!();

    fn draw_gizmos(&self, renderer: &mut dyn GizmoRenderer, siblings: &PropertyMap) {
        let size = siblings
            .get::<ObjectSize>()
            .map(|size| size.value())
            .unwrap_or_default();
        renderer.draw_rect(self.value(), size, &GizmoStyle::SELECTION);
    }
}

/// Width and height of the object's bounding box
#[derive(Debug)]
pub struct ObjectSize {
    property: PhysicsProperty<Vector2Calculator>,
}

impl ObjectSize {
    /// Create a size property
    pub fn new(initial: Vector2) -> Self {
        ObjectSize {
            property: PhysicsProperty::new(PropertyKind::Size, true, initial),
        }
    }
}

property_wrapper!(ObjectSize, Vector2Calculator);

impl Property for ObjectSize {
    property_plumbing!();

    fn draw_gizmos(&self, renderer: &mut dyn GizmoRenderer, siblings: &PropertyMap) {
        let center = siblings
            .get::<ObjectPosition>()
            .map(|position| position.value())
            .unwrap_or_default();
        renderer.draw_rect(center, self.value(), &GizmoStyle::SELECTION);
    }
}

/// Derived `size.x * size.y`
#[derive(Debug)]
pub struct ObjectArea {
    property: PhysicsProperty<NumberCalculator>,
}

impl ObjectArea {
    /// Create an area property; its value is filled in when wired
    pub fn new() -> Self {
        ObjectArea {
            property: PhysicsProperty::new(PropertyKind::Area, false, 0.0),
        }
    }

    fn recompute(&mut self, siblings: &PropertyMap) {
        if let Some(size) = siblings.get::<ObjectSize>() {
            let size = size.initial_value();
            self.property.set_initial_value(size.x * size.y);
        }
    }
}

impl Default for ObjectArea {
    fn default() -> Self {
        Self::new()
    }
}

property_wrapper!(ObjectArea, NumberCalculator);

impl Property for ObjectArea {
    property_plumbing!();

    fn dependencies(&self) -> &'static [PropertyKind] {
        &[PropertyKind::Size]
    }

    fn wire(&mut self, siblings: &PropertyMap) {
        self.recompute(siblings);
    }

    fn on_sibling_changed(&mut self, changed: PropertyKind, siblings: &PropertyMap) {
        if changed == PropertyKind::Size {
            self.recompute(siblings);
        }
    }
}
