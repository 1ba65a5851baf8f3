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

use crate::s3::error::Error as S3Error;
use thiserror::Error;

/// Fatal errors of a finder run. None of them is retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read asset identifiers from {path}: {reason}")]
    InputParse { path: String, reason: String },

    #[error("listing objects under prefix '{prefix}' failed: {source}")]
    StorageList {
        prefix: String,
        #[source]
        source: S3Error,
    },

    #[error("presigning '{key}' failed: {source}")]
    Signing {
        key: String,
        #[source]
        source: S3Error,
    },

    #[error("{0}")]
    Usage(String),
}

impl Error {
    pub fn usage(msg: impl Into<String>) -> Self {
        Error::Usage(msg.into())
    }
}
