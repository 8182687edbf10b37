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
//! Tracking vector: a strength paired with the point it pulls toward

use crate::math::Vector2;
use serde::{Deserialize, Serialize};

/// Magnitude and target point of a centripetal acceleration
///
/// The direction is not stored; it is recomputed every step from the
/// owner's current position toward `target`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackingVector {
    /// Strength of the pull in world units per second squared
    pub magnitude: f64,
    /// Point the pull is directed at
    pub target: Vector2,
}

impl TrackingVector {
    /// Create a new tracking vector
    pub const fn new(magnitude: f64, target: Vector2) -> Self {
        TrackingVector { magnitude, target }
    }

    /// Zero magnitude aimed at the origin
    pub const fn zero() -> Self {
        TrackingVector::new(0.0, Vector2::zero())
    }

    /// Acceleration felt by a body at `position`
    ///
    /// Zero when the body sits exactly on the target.
    pub fn acceleration_at(&self, position: Vector2) -> Vector2 {
        match (self.target - position).unit() {
            Some(direction) => direction * self.magnitude,
            None => Vector2::zero(),
        }
    }
}
