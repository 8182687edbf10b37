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
//! Error types for the kinematics kernel
//!
//! Numeric paths (stepping, derived values) never fail: missing siblings
//! contribute nothing and division by zero is guarded. Errors are only
//! produced at the boundaries: loading documents, user input and
//! simulator commands.

use crate::object::ObjectKind;
use crate::property::PropertyKind;
use crate::simulator::SimulatableId;
use thiserror::Error;

/// Result alias used throughout the kernel
pub type KernelResult<T> = Result<T, KernelError>;

/// Errors raised at the kernel boundaries
#[derive(Debug, Error)]
pub enum KernelError {
    /// Malformed JSON or a JSON value of the wrong shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Document version string could not be parsed
    #[error("invalid document version: {0}")]
    Version(#[from] semver::Error),

    /// Document was written by an incompatible format version
    #[error("document version {found} is incompatible with supported version {supported}")]
    IncompatibleVersion {
        /// Version found in the document
        found: String,
        /// Version this kernel writes
        supported: String,
    },

    /// No factory is registered for the object kind
    #[error("no factory registered for object kind {0}")]
    UnknownObjectKind(ObjectKind),

    /// A factory for the kind is already registered
    #[error("a factory for object kind {0} is already registered")]
    DuplicateFactory(ObjectKind),

    /// Another object in the scene already has this name
    #[error("an object named {0:?} already exists")]
    DuplicateName(String),

    /// A serialized or user-supplied value did not match the property's value type
    #[error("invalid value for property {kind}: {message}")]
    InvalidValue {
        /// Property that rejected the value
        kind: PropertyKind,
        /// What was wrong with it
        message: String,
    },

    /// The property is derived and cannot be edited directly
    #[error("property {0} is not editable")]
    NotEditable(PropertyKind),

    /// User input carried no values
    #[error("no input values supplied for property {0}")]
    EmptyInput(PropertyKind),

    /// The object has no property of this kind
    #[error("object '{object}' has no property {kind}")]
    MissingProperty {
        /// Object name
        object: String,
        /// Requested property
        kind: PropertyKind,
    },

    /// Property dependencies form a cycle
    #[error("circular dependency between properties: {0}")]
    CircularDependency(String),

    /// A time value was negative, NaN or infinite
    #[error("invalid time value {0}: must be finite and non-negative")]
    InvalidTime(f64),

    /// The command is refused while the simulator is playing
    #[error("simulator is playing; stop it first")]
    SimulatorBusy,

    /// No scene of the expected type is registered under the id
    #[error("no scene registered as {0:?}")]
    UnknownSimulatable(SimulatableId),
}

impl KernelError {
    /// Create an invalid-value error for a property
    pub fn invalid_value(kind: PropertyKind, message: impl Into<String>) -> Self {
        KernelError::InvalidValue {
            kind,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = KernelError::NotEditable(PropertyKind::Area);
        assert_eq!(err.to_string(), "property area is not editable");

        let err = KernelError::DuplicateName("ball".to_string());
        assert_eq!(err.to_string(), "an object named \"ball\" already exists");

        let err = KernelError::invalid_value(PropertyKind::Mass, "expected a number");
        assert!(err.to_string().contains("expected a number"));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: KernelError = parse.unwrap_err().into();
        assert!(matches!(err, KernelError::Json(_)));
    }
}
