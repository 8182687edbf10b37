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
//! Property kernel
//!
//! This module provides the pieces every physics property is built from:
//! - [`PhysicsProperty`]: base/offset value holder with listeners and UI binding
//! - [`Property`]: object-safe trait the owning object drives
//! - [`PropertyMap`]: ordered per-object registry with two-phase wiring,
//!   change propagation and priority-ordered stepping

mod base;
mod kind;
mod map;

pub use base::{
    FormData, ListenerId, PhysicsProperty, PropertyCore, PropertyEditorInput, PropertyValue,
};
pub use kind::{PropertyKey, PropertyKind};
pub use map::PropertyMap;

use crate::error::KernelResult;
use crate::gizmo::GizmoRenderer;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::any::Any;

/// Serialized property: `{kind, iValue}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyJson {
    /// Property identifier
    pub kind: PropertyKey,
    /// Base value in the calculator's JSON shape
    #[serde(rename = "iValue")]
    pub i_value: JsonValue,
}

impl PropertyJson {
    /// Create a serialized property
    pub fn new(kind: PropertyKind, i_value: JsonValue) -> Self {
        PropertyJson {
            kind: kind.into(),
            i_value,
        }
    }
}

/// Query over an object's properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertySelector {
    /// Every property, in registration order
    All,
    /// The property of one kind
    Kind(PropertyKind),
}

impl From<PropertyKind> for PropertySelector {
    fn from(kind: PropertyKind) -> Self {
        PropertySelector::Kind(kind)
    }
}

/// A property as seen by its owning object
///
/// Sibling access goes through the [`PropertyMap`] passed to each hook;
/// properties never hold references to each other. While a hook runs, the
/// property itself is detached from the map, so looking up its own kind
/// returns `None`.
///
/// Implementors provide the four plumbing methods; every other method has
/// a default that defers to [`PropertyCore`].
pub trait Property: Any + Send {
    /// Domain-independent core
    fn core(&self) -> &dyn PropertyCore;

    /// Mutable domain-independent core
    fn core_mut(&mut self) -> &mut dyn PropertyCore;

    /// Allow downcasting to the concrete property type
    fn as_any(&self) -> &dyn Any;

    /// Allow mutable downcasting to the concrete property type
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Identifier
    fn kind(&self) -> PropertyKind {
        self.core().kind()
    }

    /// Sibling kinds this property reads
    ///
    /// Used to order wiring and to route change notifications. Siblings
    /// that are absent from the object are ignored.
    fn dependencies(&self) -> &'static [PropertyKind] {
        &[]
    }

    /// Second construction phase, run once every property exists
    fn wire(&mut self, _siblings: &PropertyMap) {}

    /// React to a sibling's base value change
    fn on_sibling_changed(&mut self, _changed: PropertyKind, _siblings: &PropertyMap) {}

    /// Advance by `step` seconds
    fn simulate(&mut self, _step: f64, _siblings: &mut PropertyMap) {}

    /// Return the live value to the base
    fn reset(&mut self) {
        self.core_mut().reset();
    }

    /// Draw hover gizmos
    fn draw_gizmos(&self, _renderer: &mut dyn GizmoRenderer, _siblings: &PropertyMap) {}

    /// Serialize `{kind, iValue}`
    fn to_json(&self) -> PropertyJson {
        self.core().to_json()
    }

    /// Apply a serialized base value
    fn value_from_json(&mut self, json: &JsonValue) -> KernelResult<()> {
        self.core_mut().value_from_json(json)
    }

    /// Apply a user edit
    fn on_user_input(&mut self, form: &FormData) -> KernelResult<()> {
        self.core_mut().on_user_input(form)
    }
}
