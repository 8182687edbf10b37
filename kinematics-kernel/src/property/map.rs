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
//! Ordered per-object property registry
//!
//! The map owns an object's properties in registration order and provides:
//! - Lookup by kind or by concrete type
//! - Two-phase construction: properties are inserted in any order, then
//!   [`PropertyMap::wire`] runs each property's wiring hook in dependency
//!   order, rejecting circular dependencies
//! - Change propagation: base value edits reach dependent siblings without
//!   a time step
//! - Stepping in descending simulation priority
//!
//! Hooks receive the map itself as their sibling view. The property being
//! driven is detached from its slot for the duration of the call, which is
//! what allows a property to mutate siblings while it is itself borrowed
//! mutably.

use crate::error::{KernelError, KernelResult};
use crate::gizmo::GizmoRenderer;
use crate::property::{Property, PropertyKind, PropertySelector};
use std::cmp::Reverse;
use std::collections::VecDeque;

struct Slot {
    kind: PropertyKind,
    property: Option<Box<dyn Property>>,
}

/// Ordered registry of an object's properties
#[derive(Default)]
pub struct PropertyMap {
    slots: Vec<Slot>,
}

impl PropertyMap {
    /// Create an empty map
    pub fn new() -> Self {
        PropertyMap { slots: Vec::new() }
    }

    /// Insert a property, replacing any existing property of the same kind
    ///
    /// Returns the replaced property. The map must be rewired afterwards.
    pub fn insert(&mut self, property: Box<dyn Property>) -> Option<Box<dyn Property>> {
        let kind = property.kind();
        match self.slots.iter_mut().find(|slot| slot.kind == kind) {
            Some(slot) => slot.property.replace(property),
            None => {
                self.slots.push(Slot {
                    kind,
                    property: Some(property),
                });
                None
            }
        }
    }

    /// Remove a property by kind
    pub fn remove(&mut self, kind: PropertyKind) -> Option<Box<dyn Property>> {
        let index = self.index_of(kind)?;
        self.slots.remove(index).property
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the map holds no properties
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether a property of this kind is present and attached
    pub fn contains(&self, kind: PropertyKind) -> bool {
        self.get_dyn(kind).is_some()
    }

    /// Kinds in registration order
    pub fn kinds(&self) -> impl Iterator<Item = PropertyKind> + '_ {
        self.slots.iter().map(|slot| slot.kind)
    }

    fn index_of(&self, kind: PropertyKind) -> Option<usize> {
        self.slots.iter().position(|slot| slot.kind == kind)
    }

    /// Look a property up by kind
    pub fn get_dyn(&self, kind: PropertyKind) -> Option<&dyn Property> {
        self.slots
            .iter()
            .find(|slot| slot.kind == kind)
            .and_then(|slot| slot.property.as_deref())
    }

    /// Look a property up by kind, mutably
    pub fn get_dyn_mut(&mut self, kind: PropertyKind) -> Option<&mut (dyn Property + 'static)> {
        self.slots
            .iter_mut()
            .find(|slot| slot.kind == kind)
            .and_then(|slot| slot.property.as_deref_mut())
    }

    /// Look a property up by concrete type
    pub fn get<T: Property>(&self) -> Option<&T> {
        self.iter().find_map(|property| property.as_any().downcast_ref::<T>())
    }

    /// Look a property up by concrete type, mutably
    pub fn get_mut<T: Property>(&mut self) -> Option<&mut T> {
        self.slots
            .iter_mut()
            .filter_map(|slot| slot.property.as_deref_mut())
            .find_map(|property| property.as_any_mut().downcast_mut::<T>())
    }

    /// Attached properties in registration order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Property> {
        self.slots.iter().filter_map(|slot| slot.property.as_deref())
    }

    /// Attached properties in registration order, mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut (dyn Property + 'static)> {
        self.slots
            .iter_mut()
            .filter_map(|slot| slot.property.as_deref_mut())
    }

    /// Properties matching a selector
    pub fn select(&self, selector: PropertySelector) -> Vec<&dyn Property> {
        match selector {
            PropertySelector::All => self.iter().collect(),
            PropertySelector::Kind(kind) => self.get_dyn(kind).into_iter().collect(),
        }
    }

    /// Run `f` on the property at `index` with the property detached
    fn with_detached<R>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut dyn Property, &mut PropertyMap) -> R,
    ) -> Option<R> {
        let mut property = self.slots.get_mut(index)?.property.take()?;
        let result = f(property.as_mut(), self);
        self.slots[index].property = Some(property);
        Some(result)
    }

    /// Second construction phase
    ///
    /// Runs every property's `wire` hook so that each one sees its
    /// dependencies already wired. Registration order does not matter.
    /// Change flags raised while wiring are cleared afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::CircularDependency`] if present properties
    /// depend on each other in a cycle.
    pub fn wire(&mut self) -> KernelResult<()> {
        let order = self.dependency_order()?;
        for index in order {
            self.with_detached(index, |property, siblings| property.wire(siblings));
        }
        for property in self.iter_mut() {
            property.core_mut().take_changed();
        }
        Ok(())
    }

    /// Topological order of slot indices, ties kept in registration order
    fn dependency_order(&self) -> KernelResult<Vec<usize>> {
        let count = self.slots.len();
        let mut in_degree = vec![0usize; count];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); count];

        for (index, slot) in self.slots.iter().enumerate() {
            let Some(property) = slot.property.as_deref() else {
                continue;
            };
            for dependency in property.dependencies() {
                if let Some(dep_index) = self.index_of(*dependency) {
                    dependents[dep_index].push(index);
                    in_degree[index] += 1;
                }
            }
        }

        let mut queue: VecDeque<usize> = (0..count).filter(|&i| in_degree[i] == 0).collect();
        let mut sorted = Vec::with_capacity(count);

        while let Some(index) = queue.pop_front() {
            sorted.push(index);
            for &dependent in &dependents[index] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    queue.push_back(dependent);
                }
            }
        }

        if sorted.len() != count {
            let stuck: Vec<String> = (0..count)
                .filter(|&i| in_degree[i] > 0)
                .map(|i| self.slots[i].kind.to_string())
                .collect();
            return Err(KernelError::CircularDependency(stuck.join(", ")));
        }

        Ok(sorted)
    }

    /// Deliver pending base value changes to dependent siblings
    ///
    /// A dependent whose own base changes in response is queued in turn,
    /// so derived chains settle in one call.
    pub fn propagate_changes(&mut self) {
        let mut pending: VecDeque<PropertyKind> = self
            .iter_mut()
            .filter_map(|property| {
                let kind = property.kind();
                property.core_mut().take_changed().then_some(kind)
            })
            .collect();

        while let Some(changed) = pending.pop_front() {
            for index in 0..self.slots.len() {
                let depends = self.slots[index]
                    .property
                    .as_deref()
                    .map_or(false, |property| property.dependencies().contains(&changed));
                if !depends {
                    continue;
                }
                let now_changed = self.with_detached(index, |property, siblings| {
                    property.on_sibling_changed(changed, siblings);
                    property.core_mut().take_changed()
                });
                if now_changed == Some(true) {
                    pending.push_back(self.slots[index].kind);
                }
            }
        }
    }

    /// Step every property once, highest simulation priority first
    ///
    /// Equal priorities run in registration order.
    pub fn simulate(&mut self, step: f64) {
        let mut order: Vec<(usize, i32)> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let priority = slot.property.as_deref()?.core().simulation_priority();
                Some((index, priority))
            })
            .collect();
        order.sort_by_key(|&(_, priority)| Reverse(priority));

        for (index, _) in order {
            self.with_detached(index, |property, siblings| property.simulate(step, siblings));
        }
    }

    /// Reset every property unconditionally
    pub fn reset(&mut self) {
        for property in self.iter_mut() {
            property.reset();
        }
    }

    /// Draw gizmos of every property that has them enabled
    pub fn draw_gizmos(&self, renderer: &mut dyn GizmoRenderer) {
        for property in self.iter() {
            if property.core().draws_gizmos() {
                property.draw_gizmos(renderer, self);
            }
        }
    }
}

impl std::fmt::Debug for PropertyMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.slots.iter().map(|slot| slot.kind)).finish()
    }
}
