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
//! Stable property identifiers
//!
//! A [`PropertyKind`] names a property inside its object and in saved
//! documents. Documents write the camelCase name; older documents that
//! stored a numeric index are still accepted through [`PropertyKey`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a physics property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyKind {
    /// Object center in world units
    Position,
    /// Width and height of the object's bounding box
    Size,
    /// Derived `size.x * size.y`
    Area,
    /// Velocity in world units per second
    Velocity,
    /// Distance moved since the base position, as a vector
    Displacement,
    /// Acceleration in world units per second squared
    Acceleration,
    /// Magnitude and target of a centripetal pull
    CentripetalAcceleration,
    /// Sum of the named user forces, in newtons
    NetForce,
    /// Mass in grams
    Mass,
    /// Derived `mass * velocity`, in kg·units/s
    Momentum,
}

impl PropertyKind {
    /// Every kind, in index order
    pub const ALL: [PropertyKind; 10] = [
        PropertyKind::Position,
        PropertyKind::Size,
        PropertyKind::Area,
        PropertyKind::Velocity,
        PropertyKind::Displacement,
        PropertyKind::Acceleration,
        PropertyKind::CentripetalAcceleration,
        PropertyKind::NetForce,
        PropertyKind::Mass,
        PropertyKind::Momentum,
    ];

    /// Name used in documents and lookups
    pub fn name(&self) -> &'static str {
        match self {
            PropertyKind::Position => "position",
            PropertyKind::Size => "size",
            PropertyKind::Area => "area",
            PropertyKind::Velocity => "velocity",
            PropertyKind::Displacement => "displacement",
            PropertyKind::Acceleration => "acceleration",
            PropertyKind::CentripetalAcceleration => "centripetalAcceleration",
            PropertyKind::NetForce => "netForce",
            PropertyKind::Mass => "mass",
            PropertyKind::Momentum => "momentum",
        }
    }

    /// Numeric index, stable across versions
    pub fn index(&self) -> u32 {
        *self as u32
    }

    /// Look a kind up by name
    pub fn from_name(name: &str) -> Option<PropertyKind> {
        PropertyKind::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// Look a kind up by numeric index
    pub fn from_index(index: u32) -> Option<PropertyKind> {
        PropertyKind::ALL.get(index as usize).copied()
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Property identifier as it appears in a document
///
/// Unknown names or indices deserialize successfully and resolve to `None`,
/// so a document written by a newer kernel can still be partially loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyKey {
    /// camelCase name
    Name(String),
    /// Numeric index
    Index(u32),
}

impl PropertyKey {
    /// Resolve to a known kind
    pub fn resolve(&self) -> Option<PropertyKind> {
        match self {
            PropertyKey::Name(name) => PropertyKind::from_name(name),
            PropertyKey::Index(index) => PropertyKind::from_index(*index),
        }
    }
}

impl From<PropertyKind> for PropertyKey {
    fn from(kind: PropertyKind) -> Self {
        PropertyKey::Name(kind.name().to_string())
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::Name(name) => f.write_str(name),
            PropertyKey::Index(index) => write!(f, "#{}", index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_and_index_lookup() {
        for kind in PropertyKind::ALL {
            assert_eq!(PropertyKind::from_name(kind.name()), Some(kind));
            assert_eq!(PropertyKind::from_index(kind.index()), Some(kind));
        }
        assert_eq!(PropertyKind::from_name("spin"), None);
        assert_eq!(PropertyKind::from_index(99), None);
    }

    #[test]
    fn test_key_accepts_name_or_index() {
        let by_name: PropertyKey = serde_json::from_str("\"netForce\"").unwrap();
        assert_eq!(by_name.resolve(), Some(PropertyKind::NetForce));

        let by_index: PropertyKey = serde_json::from_str("8").unwrap();
        assert_eq!(by_index.resolve(), Some(PropertyKind::Mass));

        let unknown: PropertyKey = serde_json::from_str("\"torque\"").unwrap();
        assert_eq!(unknown.resolve(), None);
    }
}
