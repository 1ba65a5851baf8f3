// MinIO Rust Library for Amazon S3 Compatible Cloud Storage
// Copyright 2025 MinIO, Inc.
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

//! Joins listed objects against asset identifiers.

use std::collections::{HashMap, HashSet};

use crate::finder::key::derive_key;
use crate::finder::types::{EnrichedObject, StoredObject};

/// Objects grouped by asset identifier.
///
/// Identifiers iterate in the order they were first added, objects within a
/// group in the order they were pushed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchGroup {
    groups: Vec<(String, Vec<EnrichedObject>)>,
    index: HashMap<String, usize>,
}

impl MatchGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: &str, object: impl Into<EnrichedObject>) {
        let pos = match self.index.get(id) {
            Some(pos) => *pos,
            None => {
                self.groups.push((id.to_string(), Vec::new()));
                self.index.insert(id.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[pos].1.push(object.into());
    }

    pub fn get(&self, id: &str) -> Option<&[EnrichedObject]> {
        self.index.get(id).map(|pos| self.groups[*pos].1.as_slice())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of identifiers.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of objects across all groups.
    pub fn object_count(&self) -> usize {
        self.groups.iter().map(|(_, objects)| objects.len()).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(id, _)| id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[EnrichedObject])> {
        self.groups
            .iter()
            .map(|(id, objects)| (id.as_str(), objects.as_slice()))
    }

    pub fn objects_mut(&mut self) -> impl Iterator<Item = &mut EnrichedObject> {
        self.groups.iter_mut().flat_map(|(_, objects)| objects.iter_mut())
    }
}

/// Groups the objects whose derived key equals one of `ids`.
///
/// Groups follow the first occurrence of each identifier in `ids`;
/// identifiers without a match are left out.
pub fn match_filtered(ids: &[String], objects: &[StoredObject]) -> MatchGroup {
    let mut by_key: HashMap<&str, Vec<&StoredObject>> = HashMap::new();
    for object in objects {
        by_key.entry(derive_key(&object.key)).or_default().push(object);
    }

    let mut groups = MatchGroup::new();
    for id in ids {
        if groups.contains(id) {
            continue;
        }
        if let Some(found) = by_key.get(id.as_str()) {
            for object in found {
                groups.push(id, (*object).clone());
            }
        }
    }

    log::info!(
        "{} of {} identifiers matched {} objects",
        groups.len(),
        ids.len(),
        groups.object_count()
    );
    groups
}

/// Groups every object by its own derived key.
pub fn group_all(objects: Vec<StoredObject>) -> MatchGroup {
    let mut groups = MatchGroup::new();
    for object in objects {
        let key = derive_key(&object.key).to_string();
        groups.push(&key, object);
    }
    groups
}

/// Distinct identifiers of `ids` that have no group, in input order.
pub fn missing_identifiers<'a>(ids: &'a [String], groups: &MatchGroup) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    ids.iter()
        .map(String::as_str)
        .filter(|id| !groups.contains(id) && seen.insert(*id))
        .collect()
}
