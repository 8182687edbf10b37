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
//! Two-dimensional vector value type
//!
//! `Vector2` is a plain `Copy` value. Every operation returns a new vector,
//! so values can be freely shared between properties without aliasing.
//! Equality is exact componentwise comparison; only [`Vector2::colinear`]
//! applies a tolerance.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Tolerance used by [`Vector2::colinear`] when pruning graph points
pub const COLINEAR_EPSILON: f64 = 1e-5;

/// 2D vector with double-precision components
///
/// # Examples
///
/// ```
/// use kinematics_kernel::math::Vector2;
///
/// let a = Vector2::new(3.0, 4.0);
/// assert_eq!(a.magnitude(), 5.0);
/// assert_eq!(a + Vector2::new(1.0, 1.0), Vector2::new(4.0, 5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    /// Horizontal component
    pub x: f64,
    /// Vertical component
    pub y: f64,
}

impl Vector2 {
    /// Create a new vector
    pub const fn new(x: f64, y: f64) -> Self {
        Vector2 { x, y }
    }

    /// The zero vector
    pub const fn zero() -> Self {
        Vector2::new(0.0, 0.0)
    }

    /// Euclidean length
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction
    ///
    /// Returns `None` for the zero vector, which has no direction.
    pub fn unit(&self) -> Option<Vector2> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return None;
        }
        Some(*self / magnitude)
    }

    /// Negate both components
    pub fn inverse(&self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }

    /// Negate the x component only
    pub fn inverse_x(&self) -> Vector2 {
        Vector2::new(-self.x, self.y)
    }

    /// Negate the y component only
    pub fn inverse_y(&self) -> Vector2 {
        Vector2::new(self.x, -self.y)
    }

    /// Componentwise product
    pub fn mult_components(&self, other: Vector2) -> Vector2 {
        Vector2::new(self.x * other.x, self.y * other.y)
    }

    /// Componentwise quotient
    pub fn div_components(&self, other: Vector2) -> Vector2 {
        Vector2::new(self.x / other.x, self.y / other.y)
    }

    /// Dot product
    pub fn dot(a: Vector2, b: Vector2) -> f64 {
        a.x * b.x + a.y * b.y
    }

    /// Distance between two points
    pub fn distance(a: Vector2, b: Vector2) -> f64 {
        Vector2::distance_squared(a, b).sqrt()
    }

    /// Squared distance between two points
    pub fn distance_squared(a: Vector2, b: Vector2) -> f64 {
        let dx = a.x - b.x;
        let dy = a.y - b.y;
        dx * dx + dy * dy
    }

    /// Exact componentwise equality
    pub fn equals(a: Vector2, b: Vector2) -> bool {
        a.x == b.x && a.y == b.y
    }

    /// Twice the signed area of the triangle `abc`
    ///
    /// Zero when the three points lie on one line.
    pub fn determinant(a: Vector2, b: Vector2, c: Vector2) -> f64 {
        (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
    }

    /// Whether three points are colinear within [`COLINEAR_EPSILON`]
    pub fn colinear(a: Vector2, b: Vector2, c: Vector2) -> bool {
        Vector2::determinant(a, b, c).abs() < COLINEAR_EPSILON
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vector2> for f64 {
    type Output = Vector2;

    fn mul(self, rhs: Vector2) -> Vector2 {
        rhs * self
    }
}

impl Div<f64> for Vector2 {
    type Output = Vector2;

    fn div(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        self.inverse()
    }
}
