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
//! Base/offset value holder shared by every property
//!
//! A [`PhysicsProperty`] stores two values of its calculator's domain:
//!
//! - the **base** (`initial_value`), edited by the user and never touched
//!   by stepping
//! - the **offset**, accumulated by simulation
//!
//! The live value is always `sum(base, offset)`. Writing the live value
//! rewrites only the offset; writing the base keeps the offset, so the live
//! value moves by the same delta. Resetting writes the base back as the live
//! value, which leaves the offset at `zero()`.

use crate::calculator::Calculator;
use crate::error::{KernelError, KernelResult};
use crate::math::{TrackingVector, Vector2};
use crate::property::{PropertyJson, PropertyKind};
use serde_json::Value as JsonValue;
use std::fmt;

/// Handle returned when registering a change listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// UI widget bound to a property
///
/// The kernel pushes every base and live value write to the bound input
/// and never reads from it. Edits come back through
/// [`PropertyCore::on_user_input`].
pub trait PropertyEditorInput<T>: Send {
    /// Display a new value
    fn update_value(&mut self, value: &T);
}

/// Values submitted by a property editor form, in field order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    entries: Vec<(String, JsonValue)>,
}

impl FormData {
    /// Create an empty form
    pub fn new() -> Self {
        FormData::default()
    }

    /// Append a field, builder style
    pub fn with(mut self, name: impl Into<String>, value: JsonValue) -> Self {
        self.append(name, value);
        self
    }

    /// Append a field
    pub fn append(&mut self, name: impl Into<String>, value: JsonValue) {
        self.entries.push((name.into(), value));
    }

    /// Field values in order
    pub fn values(&self) -> impl Iterator<Item = &JsonValue> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Named fields in order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Look a field up by name
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.entries
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Whether the form has no fields
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Calculator-independent view of a property value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    /// Scalar value
    Number(f64),
    /// Vector value
    Vector(Vector2),
    /// Centripetal specification
    Tracking(TrackingVector),
}

impl PropertyValue {
    /// Scalar reading, if the value is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Vector reading, if the value is a vector
    pub fn as_vector(&self) -> Option<Vector2> {
        match self {
            PropertyValue::Vector(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<Vector2> for PropertyValue {
    fn from(value: Vector2) -> Self {
        PropertyValue::Vector(value)
    }
}

impl From<TrackingVector> for PropertyValue {
    fn from(value: TrackingVector) -> Self {
        PropertyValue::Tracking(value)
    }
}

type ChangeListener<T> = Box<dyn FnMut(&T) + Send>;

/// Base/offset value holder for one property
///
/// # Examples
///
/// ```
/// use kinematics_kernel::calculator::Vector2Calculator;
/// use kinematics_kernel::math::Vector2;
/// use kinematics_kernel::property::{PhysicsProperty, PropertyKind};
///
/// let mut velocity = PhysicsProperty::<Vector2Calculator>::new(
///     PropertyKind::Velocity,
///     true,
///     Vector2::new(1.0, 0.0),
/// );
/// velocity.set_value(Vector2::new(3.0, 0.0));
/// assert_eq!(velocity.initial_value(), Vector2::new(1.0, 0.0));
///
/// velocity.reset();
/// assert_eq!(velocity.value(), Vector2::new(1.0, 0.0));
/// ```
pub struct PhysicsProperty<C: Calculator> {
    kind: PropertyKind,
    changeable: bool,
    calculator: C,
    i_value: C::Value,
    o_value: C::Value,
    active: bool,
    simulation_priority: i32,
    draw_gizmos: bool,
    changed: bool,
    listeners: Vec<(ListenerId, ChangeListener<C::Value>)>,
    next_listener: u64,
    input: Option<Box<dyn PropertyEditorInput<C::Value>>>,
}

impl<C: Calculator> PhysicsProperty<C> {
    /// Create a property with a zero offset
    pub fn new(kind: PropertyKind, changeable: bool, initial: C::Value) -> Self {
        let calculator = C::default();
        let o_value = calculator.zero();
        PhysicsProperty {
            kind,
            changeable,
            calculator,
            i_value: initial,
            o_value,
            active: true,
            simulation_priority: 0,
            draw_gizmos: false,
            changed: false,
            listeners: Vec::new(),
            next_listener: 0,
            input: None,
        }
    }

    /// Set the simulation priority, builder style
    ///
    /// Higher priorities are stepped first within one object step.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.simulation_priority = priority;
        self
    }

    /// The calculator for this property's domain
    pub fn calculator(&self) -> &C {
        &self.calculator
    }

    /// Base value
    pub fn initial_value(&self) -> C::Value {
        self.i_value
    }

    /// Replace the base value
    ///
    /// The offset is kept. Bound inputs receive the new live value and
    /// change listeners receive the new base.
    pub fn set_initial_value(&mut self, value: C::Value) {
        self.i_value = value;
        self.changed = true;
        self.push_to_input();
        for (_, listener) in self.listeners.iter_mut() {
            listener(&value);
        }
    }

    /// Live value: `sum(base, offset)`
    pub fn value(&self) -> C::Value {
        self.calculator.sum(self.i_value, self.o_value)
    }

    /// Set the live value by rewriting the offset
    pub fn set_value(&mut self, value: C::Value) {
        self.o_value = self.calculator.sub(value, self.i_value);
        self.push_to_input();
    }

    /// Accumulated simulation offset
    pub fn offset(&self) -> C::Value {
        self.o_value
    }

    /// Return the live value to the base
    pub fn reset(&mut self) {
        self.set_value(self.i_value);
        // sub(i, i) can leave -0.0 behind; the offset is exactly zero by definition
        self.o_value = self.calculator.zero();
    }

    /// Register a listener for base value changes
    pub fn on_initial_value_changed<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&C::Value) + Send + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener, returning whether it was registered
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Bind an editor input and show it the current value
    pub fn bind_input(&mut self, input: Box<dyn PropertyEditorInput<C::Value>>) {
        self.input = Some(input);
        self.push_to_input();
    }

    /// Detach the editor input
    pub fn unbind_input(&mut self) -> Option<Box<dyn PropertyEditorInput<C::Value>>> {
        self.input.take()
    }

    fn push_to_input(&mut self) {
        let value = self.value();
        if let Some(input) = self.input.as_mut() {
            input.update_value(&value);
        }
    }

    /// Parse a serialized base value and apply it
    pub fn parse_initial_value(&mut self, json: &JsonValue) -> KernelResult<()> {
        let value = self
            .calculator
            .from_json(json)
            .map_err(|e| KernelError::invalid_value(self.kind, e.to_string()))?;
        self.set_initial_value(value);
        Ok(())
    }
}

impl<C: Calculator> fmt::Debug for PhysicsProperty<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicsProperty")
            .field("kind", &self.kind)
            .field("i_value", &self.i_value)
            .field("o_value", &self.o_value)
            .field("active", &self.active)
            .field("simulation_priority", &self.simulation_priority)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Object-safe operations every property supports regardless of domain
pub trait PropertyCore: Send {
    /// Identifier
    fn kind(&self) -> PropertyKind;

    /// Whether the user may edit the base value
    fn is_changeable(&self) -> bool;

    /// Whether the property's editor is enabled
    fn is_active(&self) -> bool;

    /// Enable or disable the property's editor
    fn set_active(&mut self, active: bool);

    /// Ordering key within one object step, higher first
    fn simulation_priority(&self) -> i32;

    /// Whether gizmos are drawn for this property
    fn draws_gizmos(&self) -> bool;

    /// Toggle gizmo drawing (hover state)
    fn set_draw_gizmos(&mut self, draw: bool);

    /// Return the live value to the base
    fn reset(&mut self);

    /// Live value
    fn value(&self) -> PropertyValue;

    /// Base value
    fn initial_value(&self) -> PropertyValue;

    /// Serialize `{kind, iValue}`
    fn to_json(&self) -> PropertyJson;

    /// Apply a serialized base value
    fn value_from_json(&mut self, json: &JsonValue) -> KernelResult<()>;

    /// Apply a user edit: the first form value becomes the base value
    fn on_user_input(&mut self, form: &FormData) -> KernelResult<()>;

    /// Whether the base changed since the last call, clearing the flag
    fn take_changed(&mut self) -> bool;

    /// Drop every change listener
    fn clear_listeners(&mut self);
}

impl<C: Calculator> PropertyCore for PhysicsProperty<C> {
    fn kind(&self) -> PropertyKind {
        self.kind
    }

    fn is_changeable(&self) -> bool {
        self.changeable
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn simulation_priority(&self) -> i32 {
        self.simulation_priority
    }

    fn draws_gizmos(&self) -> bool {
        self.draw_gizmos
    }

    fn set_draw_gizmos(&mut self, draw: bool) {
        self.draw_gizmos = draw;
    }

    fn reset(&mut self) {
        PhysicsProperty::reset(self);
    }

    fn value(&self) -> PropertyValue {
        PhysicsProperty::value(self).into()
    }

    fn initial_value(&self) -> PropertyValue {
        self.i_value.into()
    }

    fn to_json(&self) -> PropertyJson {
        PropertyJson::new(self.kind, self.calculator.to_json(self.i_value))
    }

    fn value_from_json(&mut self, json: &JsonValue) -> KernelResult<()> {
        self.parse_initial_value(json)
    }

    fn on_user_input(&mut self, form: &FormData) -> KernelResult<()> {
        if !self.changeable {
            return Err(KernelError::NotEditable(self.kind));
        }
        let first = form.values().next().ok_or(KernelError::EmptyInput(self.kind))?;
        self.parse_initial_value(first)
    }

    fn take_changed(&mut self) -> bool {
        std::mem::replace(&mut self.changed, false)
    }

    fn clear_listeners(&mut self) {
        self.listeners.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{NumberCalculator, Vector2Calculator};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn velocity(initial: Vector2) -> PhysicsProperty<Vector2Calculator> {
        PhysicsProperty::new(PropertyKind::Velocity, true, initial)
    }

    struct RecordingInput(Arc<Mutex<Vec<Vector2>>>);

    impl PropertyEditorInput<Vector2> for RecordingInput {
        fn update_value(&mut self, value: &Vector2) {
            self.0.lock().unwrap().push(*value);
        }
    }

    #[test]
    fn test_value_is_base_plus_offset() {
        let mut p = velocity(Vector2::new(1.0, 1.0));
        p.set_value(Vector2::new(4.0, -1.0));
        assert_eq!(p.initial_value(), Vector2::new(1.0, 1.0));
        assert_eq!(p.offset(), Vector2::new(3.0, -2.0));
        assert_eq!(p.value(), Vector2::new(4.0, -1.0));
    }

    #[test]
    fn test_base_edit_keeps_offset() {
        let mut p = velocity(Vector2::new(1.0, 0.0));
        p.set_value(Vector2::new(3.0, 0.0));
        p.set_initial_value(Vector2::new(10.0, 0.0));
        assert_eq!(p.value(), Vector2::new(12.0, 0.0));
    }

    #[test]
    fn test_reset_zeroes_offset() {
        let mut p = PhysicsProperty::<NumberCalculator>::new(PropertyKind::Mass, true, 5.0);
        p.set_value(8.25);
        p.reset();
        assert_eq!(p.value(), 5.0);
        assert_eq!(p.offset(), 0.0);
    }

    #[test]
    fn test_listeners_fire_and_can_be_removed() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut p = velocity(Vector2::zero());
        let id = p.on_initial_value_changed(move |v| sink.lock().unwrap().push(*v));

        p.set_initial_value(Vector2::new(1.0, 2.0));
        p.set_value(Vector2::new(5.0, 5.0));
        assert_eq!(*seen.lock().unwrap(), vec![Vector2::new(1.0, 2.0)]);

        assert!(p.remove_listener(id));
        assert!(!p.remove_listener(id));
        p.set_initial_value(Vector2::new(9.0, 9.0));
        assert_eq!(seen.lock().unwrap().len(), 1);

        p.on_initial_value_changed(|_| {});
        p.on_initial_value_changed(|_| {});
        assert_eq!(p.listener_count(), 2);
        p.clear_listeners();
        assert_eq!(p.listener_count(), 0);
    }

    #[test]
    fn test_bound_input_receives_every_write() {
        let shown = Arc::new(Mutex::new(Vec::new()));
        let mut p = velocity(Vector2::new(1.0, 0.0));
        p.bind_input(Box::new(RecordingInput(Arc::clone(&shown))));
        p.set_value(Vector2::new(2.0, 0.0));
        p.set_initial_value(Vector2::new(3.0, 0.0));
        assert_eq!(
            *shown.lock().unwrap(),
            vec![
                Vector2::new(1.0, 0.0),
                Vector2::new(2.0, 0.0),
                Vector2::new(4.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_changed_flag() {
        let mut p = velocity(Vector2::zero());
        assert!(!p.take_changed());
        p.set_initial_value(Vector2::new(1.0, 0.0));
        assert!(p.take_changed());
        assert!(!p.take_changed());
        p.set_value(Vector2::new(2.0, 0.0));
        assert!(!p.take_changed());
    }

    #[test]
    fn test_user_input() {
        let mut p = velocity(Vector2::zero());
        let form = FormData::new().with("velocity", json!({ "x": 2.0, "y": 1.0 }));
        p.on_user_input(&form).unwrap();
        assert_eq!(p.initial_value(), Vector2::new(2.0, 1.0));

        assert!(matches!(
            p.on_user_input(&FormData::new()),
            Err(KernelError::EmptyInput(PropertyKind::Velocity))
        ));
        assert!(matches!(
            p.on_user_input(&FormData::new().with("velocity", json!("fast"))),
            Err(KernelError::InvalidValue { .. })
        ));

        let mut area = PhysicsProperty::<NumberCalculator>::new(PropertyKind::Area, false, 1.0);
        assert!(matches!(
            area.on_user_input(&FormData::new().with("area", json!(4.0))),
            Err(KernelError::NotEditable(PropertyKind::Area))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let mut p = velocity(Vector2::new(1.5, -2.0));
        p.set_value(Vector2::new(100.0, 100.0));
        let json = PropertyCore::to_json(&p);
        assert_eq!(json.kind.resolve(), Some(PropertyKind::Velocity));

        let mut restored = velocity(Vector2::zero());
        restored.value_from_json(&json.i_value).unwrap();
        assert_eq!(restored.initial_value(), Vector2::new(1.5, -2.0));
    }
}
