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
//! Arithmetic over property value domains
//!
//! A [`Calculator`] supplies the handful of operations the property kernel
//! needs (identity, sum, difference, product, quotient and JSON conversion)
//! for one value type. `PhysicsProperty` is written once against this trait
//! and instantiated with one of the three calculators below.
//!
//! # Laws
//!
//! Every implementation must satisfy:
//!
//! - `sum(a, zero()) == a`
//! - `sub(sum(a, b), b) == a` (up to floating-point rounding)
//!
//! The base/offset split of a property relies on both: resetting a property
//! stores `zero()` as its offset, and writing a value stores
//! `sub(value, base)` so that `sum(base, offset)` reads it back.

use crate::math::{TrackingVector, Vector2};
use crate::property::PropertyValue;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::fmt::Debug;

/// Arithmetic for one property value domain
///
/// Calculators are stateless values. Properties own their calculator, so
/// no module-level instance is shared.
pub trait Calculator: Default + Debug + Send + Sync + 'static {
    /// The value domain
    type Value: Copy + PartialEq + Debug + Send + Sync + Into<PropertyValue> + 'static;

    /// Additive identity
    fn zero(&self) -> Self::Value;

    /// `a + b`
    fn sum(&self, a: Self::Value, b: Self::Value) -> Self::Value;

    /// `a - b`
    fn sub(&self, a: Self::Value, b: Self::Value) -> Self::Value;

    /// `a * b`, componentwise for compound values
    fn mult(&self, a: Self::Value, b: Self::Value) -> Self::Value;

    /// `a / b`, componentwise for compound values
    fn div(&self, a: Self::Value, b: Self::Value) -> Self::Value;

    /// Rebuild a value from its serialized shape
    fn from_json(&self, json: &JsonValue) -> Result<Self::Value, serde_json::Error>;

    /// Serialize a value
    fn to_json(&self, value: Self::Value) -> JsonValue;
}

/// Plain scalar arithmetic
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberCalculator;

impl Calculator for NumberCalculator {
    type Value = f64;

    fn zero(&self) -> f64 {
        0.0
    }

    fn sum(&self, a: f64, b: f64) -> f64 {
        a + b
    }

    fn sub(&self, a: f64, b: f64) -> f64 {
        a - b
    }

    fn mult(&self, a: f64, b: f64) -> f64 {
        a * b
    }

    fn div(&self, a: f64, b: f64) -> f64 {
        a / b
    }

    fn from_json(&self, json: &JsonValue) -> Result<f64, serde_json::Error> {
        f64::deserialize(json)
    }

    fn to_json(&self, value: f64) -> JsonValue {
        JsonValue::from(value)
    }
}

/// Vector arithmetic, componentwise for products and quotients
///
/// Scaling by a plain scalar is not routed through the calculator; the
/// integrator uses `Vector2`'s scalar operators directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vector2Calculator;

impl Calculator for Vector2Calculator {
    type Value = Vector2;

    fn zero(&self) -> Vector2 {
        Vector2::zero()
    }

    fn sum(&self, a: Vector2, b: Vector2) -> Vector2 {
        a + b
    }

    fn sub(&self, a: Vector2, b: Vector2) -> Vector2 {
        a - b
    }

    fn mult(&self, a: Vector2, b: Vector2) -> Vector2 {
        a.mult_components(b)
    }

    fn div(&self, a: Vector2, b: Vector2) -> Vector2 {
        a.div_components(b)
    }

    fn from_json(&self, json: &JsonValue) -> Result<Vector2, serde_json::Error> {
        Vector2::deserialize(json)
    }

    fn to_json(&self, value: Vector2) -> JsonValue {
        serde_json::json!({ "x": value.x, "y": value.y })
    }
}

/// Fieldwise arithmetic over [`TrackingVector`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackingVectorCalculator;

impl Calculator for TrackingVectorCalculator {
    type Value = TrackingVector;

    fn zero(&self) -> TrackingVector {
        TrackingVector::zero()
    }

    fn sum(&self, a: TrackingVector, b: TrackingVector) -> TrackingVector {
        TrackingVector::new(a.magnitude + b.magnitude, a.target + b.target)
    }

    fn sub(&self, a: TrackingVector, b: TrackingVector) -> TrackingVector {
        TrackingVector::new(a.magnitude - b.magnitude, a.target - b.target)
    }

    fn mult(&self, a: TrackingVector, b: TrackingVector) -> TrackingVector {
        TrackingVector::new(a.magnitude * b.magnitude, a.target.mult_components(b.target))
    }

    fn div(&self, a: TrackingVector, b: TrackingVector) -> TrackingVector {
        TrackingVector::new(a.magnitude / b.magnitude, a.target.div_components(b.target))
    }

    fn from_json(&self, json: &JsonValue) -> Result<TrackingVector, serde_json::Error> {
        TrackingVector::deserialize(json)
    }

    fn to_json(&self, value: TrackingVector) -> JsonValue {
        serde_json::json!({
            "magnitude": value.magnitude,
            "target": { "x": value.target.x, "y": value.target.y },
        })
    }
}
