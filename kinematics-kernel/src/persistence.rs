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
//! Scene documents
//!
//! ```json
//! {
//!   "version": "1.0.0",
//!   "objects": [
//!     {
//!       "kind": 0,
//!       "name": "Solid 1",
//!       "properties": [
//!         { "kind": "position", "iValue": { "x": 0.0, "y": 0.0 } },
//!         { "kind": "netForce", "iValue": [ { "key": "F0", "force": { "x": 1.0, "y": 0.0 } } ] }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Only base values are stored. Property kinds are written as names and
//! read as names or integer indices. Documents without a version are
//! read as the current format.
//!
//! # Version compatibility
//!
//! - Major versions must match
//! - For 0.x.y, minor versions must match
//! - For 1.x.y and later, the document minor must not exceed ours
//! - Patch versions are ignored

use crate::ambient::Ambient;
use crate::error::{KernelError, KernelResult};
use crate::object::{ObjectJson, ObjectKind};
use crate::simulator::{SimulatableId, Simulator};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Version written into every saved document
pub const FORMAT_VERSION: &str = "1.0.0";

/// Serialized scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Format version; absent in legacy documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Objects from bottom to top
    pub objects: Vec<ObjectJson>,
}

impl SceneDocument {
    /// Capture the base values of every object in a scene
    pub fn from_ambient(ambient: &Ambient) -> Self {
        SceneDocument {
            version: Some(FORMAT_VERSION.to_string()),
            objects: ambient.objects().iter().map(|object| object.to_json()).collect(),
        }
    }

    /// Parse a document without checking its version
    pub fn from_json_str(json: &str) -> KernelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pretty-printed JSON
    pub fn to_json_string(&self) -> KernelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that this kernel can read the document
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::Version`] if the version does not parse and
    /// [`KernelError::IncompatibleVersion`] if it is not compatible.
    pub fn check_version(&self) -> KernelResult<()> {
        let Some(found) = self.version.as_deref() else {
            tracing::warn!(assumed = FORMAT_VERSION, "document has no version");
            return Ok(());
        };
        let document = Version::parse(found)?;
        let supported = Version::parse(FORMAT_VERSION)?;
        if is_version_compatible(&document, &supported) {
            Ok(())
        } else {
            Err(KernelError::IncompatibleVersion {
                found: found.to_string(),
                supported: FORMAT_VERSION.to_string(),
            })
        }
    }
}

/// Whether a document written at `document` can be read at `supported`
pub fn is_version_compatible(document: &Version, supported: &Version) -> bool {
    if document.major != supported.major {
        return false;
    }
    if document.major != 0 {
        document.minor <= supported.minor
    } else {
        document.minor == supported.minor
    }
}

/// Serialize a scene
pub fn save(ambient: &Ambient) -> KernelResult<String> {
    SceneDocument::from_ambient(ambient).to_json_string()
}

/// Replace a scene's objects with those of a document
///
/// Every object is rebuilt through the factory of its kind before the scene
/// is touched, so a failed load leaves the scene as it was. Unnamed objects
/// get `"<default name> <n>"` names that skip every name in the document.
/// Graphs are dropped and the scene clock restarts; use [`load_scene`] to
/// rewind the simulator clock together with it.
///
/// # Errors
///
/// Returns parse, version, unknown-kind or value errors, and
/// [`KernelError::DuplicateName`] if two objects carry the same name.
pub fn load(ambient: &mut Ambient, json: &str) -> KernelResult<()> {
    let document = SceneDocument::from_json_str(json)?;
    document.check_version()?;

    let mut taken = HashSet::new();
    for name in document.objects.iter().filter_map(|object| object.name.as_deref()) {
        if !taken.insert(name.to_string()) {
            return Err(KernelError::DuplicateName(name.to_string()));
        }
    }

    let mut per_kind: HashMap<ObjectKind, u32> = HashMap::new();
    let factories = ambient.factories();
    let objects = document
        .objects
        .iter()
        .map(|object| {
            factories.object_from_json(object, || {
                let prefix = factories.default_name(object.kind).unwrap_or("Object");
                let count = per_kind.entry(object.kind).or_insert(0);
                loop {
                    *count += 1;
                    let candidate = format!("{prefix} {count}");
                    if taken.insert(candidate.clone()) {
                        return candidate;
                    }
                }
            })
        })
        .collect::<KernelResult<Vec<_>>>()?;

    ambient.clear();
    for object in objects {
        ambient.push_object(object);
    }
    tracing::debug!(objects = ambient.len(), "scene loaded");
    Ok(())
}

/// Load a document into a scene registered with `simulator` and rewind the
/// simulator to t = 0
///
/// # Errors
///
/// Returns [`KernelError::SimulatorBusy`] while playing,
/// [`KernelError::UnknownSimulatable`] if `scene` is not an [`Ambient`]
/// registered with `simulator`, or any error of [`load`]. On error nothing
/// changes.
pub fn load_scene(simulator: &mut Simulator, scene: SimulatableId, json: &str) -> KernelResult<()> {
    if simulator.is_playing() {
        return Err(KernelError::SimulatorBusy);
    }
    let ambient = simulator
        .get_mut::<Ambient>(scene)
        .ok_or(KernelError::UnknownSimulatable(scene))?;
    load(ambient, json)?;
    simulator.reset();
    Ok(())
}
