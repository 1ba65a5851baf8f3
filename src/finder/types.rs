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

//! Data carried between the finder stages.

use crate::s3::response::ListEntry;
use crate::s3::utils::UtcTime;

/// Storage class reported when the service omits one.
pub const DEFAULT_STORAGE_CLASS: &str = "STANDARD";

/// An object as listed by the storage service.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredObject {
    pub key: String,
    pub last_modified: UtcTime,
    pub size: u64,
    pub storage_class: String,
}

impl From<ListEntry> for StoredObject {
    fn from(entry: ListEntry) -> Self {
        StoredObject {
            key: entry.name,
            last_modified: entry.last_modified,
            size: entry.size,
            storage_class: entry
                .storage_class
                .unwrap_or_else(|| DEFAULT_STORAGE_CLASS.to_string()),
        }
    }
}

/// A matched object plus the URLs the enricher attached to it.
#[derive(Clone, Debug, PartialEq)]
pub struct EnrichedObject {
    pub object: StoredObject,
    pub signed_url: Option<String>,
    pub signed_url_escaped: Option<String>,
}

impl From<StoredObject> for EnrichedObject {
    fn from(object: StoredObject) -> Self {
        EnrichedObject {
            object,
            signed_url: None,
            signed_url_escaped: None,
        }
    }
}

/// One page of a listing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectPage {
    pub objects: Vec<StoredObject>,
    /// Token to request the following page with, `None` on the last page.
    pub next_token: Option<String>,
}
