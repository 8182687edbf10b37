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
//! # Kinematics Kernel
//!
//! Property-network simulation kernel for an interactive 2D kinematics
//! sandbox. Every body in a scene owns a small network of typed physics
//! properties; each property keeps a user-edited base value apart from the
//! offset accumulated by simulation, so a reset is exact and a saved scene
//! holds only base values.
//!
//! ## Features
//!
//! - **Base/offset properties**: `value = base + offset` for numbers,
//!   vectors and centripetal tracking vectors
//! - **Derived properties**: area from size, net force from named
//!   sub-forces, acceleration from force, mass and a centripetal target,
//!   momentum from mass and velocity
//! - **Velocity Verlet stepping**: priority-ordered per object, stable for
//!   position-dependent acceleration
//! - **Deterministic playback**: fixed frame step, reset and fast-forward
//! - **Scene documents**: versioned JSON with `serde` and `semver`
//! - **Parallelization**: optional Rayon stepping of independent objects
//!
//! ## Example
//!
//! ```rust
//! use kinematics_kernel::ambient::Ambient;
//! use kinematics_kernel::math::Vector2;
//! use kinematics_kernel::object::ObjectKind;
//! use kinematics_kernel::properties::{ObjectAcceleration, ObjectPosition};
//! use kinematics_kernel::simulator::Simulator;
//!
//! let mut ambient = Ambient::default();
//! ambient
//!     .add_object(ObjectKind::SOLID, Some("ball"))
//!     .unwrap()
//!     .edit::<ObjectAcceleration, _>(|a| a.set_initial_value(Vector2::new(0.0, -10.0)));
//!
//! let mut simulator = Simulator::default();
//! let scene = simulator.add(Box::new(ambient));
//! simulator.pass_time(1.0).unwrap();
//!
//! let ambient = simulator.get::<Ambient>(scene).unwrap();
//! let ball = ambient.object("ball").unwrap();
//! assert_eq!(ball.property::<ObjectPosition>().unwrap().value(), Vector2::new(0.0, -5.0));
//! ```

#![warn(missing_docs)]

/// Vector value types
pub mod math;

/// Arithmetic over property value domains
pub mod calculator;

/// Property kernel: base/offset values, wiring and stepping
pub mod property;

/// Concrete physics properties
pub mod properties;

/// Hover gizmo rendering interface
pub mod gizmo;

/// Physics objects and their factories
pub mod object;

/// Scene of objects and graphs
pub mod ambient;

/// Sampled property graphs
pub mod graph;

/// Simulation clock
pub mod simulator;

/// Scene documents
pub mod persistence;

/// Simulator configuration
pub mod config;

/// Error types
pub mod error;

pub use ambient::Ambient;
pub use config::SimulatorConfig;
pub use error::{KernelError, KernelResult};
pub use math::{TrackingVector, Vector2};
pub use object::{FactoryRegistry, ObjectKind, PhysicsObject};
pub use property::{PropertyKind, PropertyMap};
pub use simulator::{Simulatable, Simulator, SimulatorState};
