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
//! Simulation clock and playback state machine
//!
//! ```text
//!            start()                  stop()
//! Stopped ───────────▶ Playing ───────────────▶ Paused
//!  (t = 0)  ◀────────┐    ▲                      (t > 0)
//!                    │    └───────── start() ──────┘
//!                    └──────── reset() ────────────┘
//! ```
//!
//! The host calls [`Simulator::on_animation_frame`] once per frame. While
//! playing, each call advances the clock by the configured fixed step and
//! returns `true` so the host schedules the next frame; once stopped it
//! returns `false` and the host simply stops rescheduling.

use crate::config::SimulatorConfig;
use crate::error::{KernelError, KernelResult};
use std::any::Any;

/// Anything the simulator drives
pub trait Simulatable: Any {
    /// Advance by `step` seconds
    fn simulate(&mut self, step: f64);

    /// Return to the state at t = 0
    fn reset(&mut self);

    /// Allow downcasting to the concrete type
    fn as_any(&self) -> &dyn Any;

    /// Allow mutable downcasting to the concrete type
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Handle of a registered [`Simulatable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimulatableId(u64);

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatorState {
    /// Not playing, clock at zero
    Stopped,
    /// Not playing, clock past zero
    Paused,
    /// Advancing once per animation frame
    Playing,
}

/// Owns the clock and steps every registered [`Simulatable`]
pub struct Simulator {
    config: SimulatorConfig,
    time: f64,
    playing: bool,
    stepped: bool,
    entries: Vec<(SimulatableId, Box<dyn Simulatable>)>,
    next_id: u64,
}

impl Simulator {
    /// Create a stopped simulator with nothing registered
    pub fn new(config: SimulatorConfig) -> Self {
        Simulator {
            config,
            time: 0.0,
            playing: false,
            stepped: false,
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Register a simulatable; it is stepped after those already present
    pub fn add(&mut self, simulatable: Box<dyn Simulatable>) -> SimulatableId {
        let id = SimulatableId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, simulatable));
        id
    }

    /// Unregister a simulatable
    pub fn remove(&mut self, id: SimulatableId) -> Option<Box<dyn Simulatable>> {
        let index = self.entries.iter().position(|(entry, _)| *entry == id)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of registered simulatables
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered simulatable by id and concrete type
    pub fn get<T: Simulatable>(&self, id: SimulatableId) -> Option<&T> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == id)
            .and_then(|(_, simulatable)| simulatable.as_any().downcast_ref::<T>())
    }

    /// Registered simulatable by id and concrete type, mutably
    pub fn get_mut<T: Simulatable>(&mut self, id: SimulatableId) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|(entry, _)| *entry == id)
            .and_then(|(_, simulatable)| simulatable.as_any_mut().downcast_mut::<T>())
    }

    /// Simulated seconds since the last reset
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Whether playback is running
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Current playback state
    pub fn state(&self) -> SimulatorState {
        if self.playing {
            SimulatorState::Playing
        } else if self.time == 0.0 {
            SimulatorState::Stopped
        } else {
            SimulatorState::Paused
        }
    }

    /// Whether objects may be created, destroyed or have their base
    /// values edited; only while stopped at t = 0
    pub fn can_edit(&self) -> bool {
        self.state() == SimulatorState::Stopped
    }

    /// Begin playback
    pub fn start(&mut self) {
        if self.playing {
            return;
        }
        self.playing = true;
        tracing::debug!(time = self.time, "simulator playing");
    }

    /// Pause playback, keeping the clock
    pub fn stop(&mut self) {
        if !self.playing {
            return;
        }
        self.playing = false;
        tracing::debug!(time = self.time, "simulator paused");
    }

    /// Return the clock and every simulatable to t = 0
    ///
    /// Refused while playing and a no-op when nothing was stepped since the
    /// last reset. A zero-length step still counts, since it refreshes
    /// derived offsets. Returns whether a reset happened.
    pub fn reset(&mut self) -> bool {
        if self.playing || !self.stepped {
            return false;
        }
        self.time = 0.0;
        self.stepped = false;
        for (_, simulatable) in self.entries.iter_mut() {
            simulatable.reset();
        }
        tracing::debug!("simulator reset");
        true
    }

    /// Jump to `target` seconds
    ///
    /// Resets, then advances in a single step of `target` seconds. With a
    /// position-dependent acceleration this differs from playing up to the
    /// same time frame by frame.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::SimulatorBusy`] while playing and
    /// [`KernelError::InvalidTime`] for a negative or non-finite target.
    pub fn fast_forward_to(&mut self, target: f64) -> KernelResult<()> {
        if self.playing {
            return Err(KernelError::SimulatorBusy);
        }
        validate_step(target)?;
        self.reset();
        if target > 0.0 {
            self.pass_time(target)?;
        }
        tracing::debug!(time = self.time, "simulator fast-forwarded");
        Ok(())
    }

    /// Advance the clock and every simulatable by `step` seconds
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::InvalidTime`] for a negative or non-finite
    /// step; nothing is advanced in that case.
    pub fn pass_time(&mut self, step: f64) -> KernelResult<()> {
        validate_step(step)?;
        self.time += step;
        self.stepped = true;
        for (_, simulatable) in self.entries.iter_mut() {
            simulatable.simulate(step);
        }
        Ok(())
    }

    /// Host animation-frame callback
    ///
    /// Advances one frame while playing. Returns whether the host should
    /// schedule another frame.
    pub fn on_animation_frame(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        let step = self.config.frame_delta();
        if let Err(e) = self.pass_time(step) {
            tracing::warn!(error = %e, "frame step rejected; stopping playback");
            self.stop();
            return false;
        }
        true
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(SimulatorConfig::default())
    }
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("time", &self.time)
            .field("state", &self.state())
            .field("simulatables", &self.entries.len())
            .finish()
    }
}

fn validate_step(step: f64) -> KernelResult<()> {
    if step.is_finite() && step >= 0.0 {
        Ok(())
    } else {
        Err(KernelError::InvalidTime(step))
    }
}
