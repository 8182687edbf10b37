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
//! Rendering collaborator interface for hover gizmos
//!
//! The kernel does not draw. Properties describe arrows and selection
//! rectangles in world coordinates and hand them to a [`GizmoRenderer`],
//! which owns the world-to-canvas transform.

use crate::math::Vector2;

/// Stroke description passed through to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoStyle {
    /// CSS-style color string
    pub color: &'static str,
    /// Stroke width in canvas pixels
    pub width: f64,
}

impl GizmoStyle {
    /// Position selection rectangle
    pub const SELECTION: GizmoStyle = GizmoStyle { color: "#ffffff", width: 1.0 };
    /// Velocity arrow
    pub const VELOCITY: GizmoStyle = GizmoStyle { color: "#00c853", width: 2.0 };
    /// Acceleration arrow
    pub const ACCELERATION: GizmoStyle = GizmoStyle { color: "#ff1744", width: 2.0 };
    /// Centripetal arrow
    pub const CENTRIPETAL: GizmoStyle = GizmoStyle { color: "#ff9100", width: 2.0 };
    /// Net force arrow
    pub const FORCE: GizmoStyle = GizmoStyle { color: "#2979ff", width: 2.0 };
    /// Momentum arrow
    pub const MOMENTUM: GizmoStyle = GizmoStyle { color: "#d500f9", width: 2.0 };
    /// Displacement arrow
    pub const DISPLACEMENT: GizmoStyle = GizmoStyle { color: "#ffea00", width: 1.0 };
}

/// Drawing surface for gizmos
pub trait GizmoRenderer {
    /// Draw an arrow between two world points
    fn draw_vector(&mut self, from: Vector2, to: Vector2, style: &GizmoStyle);

    /// Draw an axis-aligned rectangle centered on `center`
    fn draw_rect(&mut self, center: Vector2, size: Vector2, style: &GizmoStyle);
}
