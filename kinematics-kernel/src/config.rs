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
//! Simulator configuration
//!
//! # Environment Configuration
//!
//! Set `KINEMATICS_FRAME_DELTA` to override the nominal frame step:
//! ```bash
//! export KINEMATICS_FRAME_DELTA=0.008
//! ```

use crate::error::{KernelError, KernelResult};

/// Environment variable read by [`SimulatorConfig::from_env`]
pub const FRAME_DELTA_ENV: &str = "KINEMATICS_FRAME_DELTA";

/// Nominal step per animation frame, in seconds
pub const DEFAULT_FRAME_DELTA: f64 = 0.016;

/// Simulator settings
///
/// Playback advances by the fixed `frame_delta` on every animation frame,
/// never by measured wall-clock time, so a replay is deterministic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatorConfig {
    frame_delta: f64,
}

impl SimulatorConfig {
    /// Default configuration
    pub fn new() -> Self {
        SimulatorConfig {
            frame_delta: DEFAULT_FRAME_DELTA,
        }
    }

    /// Set the step taken per animation frame
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::InvalidTime`] unless the step is finite and
    /// strictly positive.
    pub fn with_frame_delta(mut self, frame_delta: f64) -> KernelResult<Self> {
        if !frame_delta.is_finite() || frame_delta <= 0.0 {
            return Err(KernelError::InvalidTime(frame_delta));
        }
        self.frame_delta = frame_delta;
        Ok(self)
    }

    /// Default configuration with environment overrides applied
    ///
    /// Values that do not parse or are rejected fall back to the default
    /// with a warning.
    pub fn from_env() -> Self {
        let config = Self::new();
        let Ok(raw) = std::env::var(FRAME_DELTA_ENV) else {
            return config;
        };
        match raw.trim().parse::<f64>() {
            Ok(delta) => config.with_frame_delta(delta).unwrap_or_else(|e| {
                tracing::warn!(variable = FRAME_DELTA_ENV, error = %e, "ignoring frame delta override");
                config
            }),
            Err(e) => {
                tracing::warn!(variable = FRAME_DELTA_ENV, value = %raw, error = %e, "frame delta is not a number");
                config
            }
        }
    }

    /// Step taken per animation frame, in seconds
    pub fn frame_delta(&self) -> f64 {
        self.frame_delta
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_frame_delta() {
        assert_eq!(SimulatorConfig::default().frame_delta(), 0.016);
    }

    #[test]
    fn test_frame_delta_validation() {
        let config = SimulatorConfig::new().with_frame_delta(0.01).unwrap();
        assert_eq!(config.frame_delta(), 0.01);

        for bad in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            assert!(SimulatorConfig::new().with_frame_delta(bad).is_err());
        }
    }

    #[test]
    fn test_from_env() {
        // Single test touches the variable to avoid races between tests
        std::env::set_var(FRAME_DELTA_ENV, "0.02");
        assert_eq!(SimulatorConfig::from_env().frame_delta(), 0.02);

        std::env::set_var(FRAME_DELTA_ENV, "fast");
        assert_eq!(SimulatorConfig::from_env().frame_delta(), DEFAULT_FRAME_DELTA);

        std::env::set_var(FRAME_DELTA_ENV, "-1");
        assert_eq!(SimulatorConfig::from_env().frame_delta(), DEFAULT_FRAME_DELTA);

        std::env::remove_var(FRAME_DELTA_ENV);
        assert_eq!(SimulatorConfig::from_env().frame_delta(), DEFAULT_FRAME_DELTA);
    }
}
