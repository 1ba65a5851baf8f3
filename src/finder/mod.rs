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

//! Asset finder: reconciles a list of asset identifiers against the objects
//! stored under one or more bucket prefixes.
//!
//! The run is sequential: identifiers are read, the prefixes are listed,
//! listed objects are grouped by their derived key, the groups are
//! optionally presigned and finally rendered as comma separated lines.

pub mod enrich;
pub mod error;
pub mod key;
pub mod lister;
pub mod matcher;
pub mod output;
pub mod source;
pub mod types;

use std::path::PathBuf;

pub use enrich::{Presign, PresignGet};
pub use error::Error;
pub use lister::ListObjectPages;
pub use matcher::MatchGroup;
pub use output::{OutputField, OutputSpec};
pub use types::{EnrichedObject, ObjectPage, StoredObject};

use crate::s3::builders::DEFAULT_EXPIRY_SECONDS;

/// Parameters of one finder run.
#[derive(Clone, Debug)]
pub struct FinderOptions {
    pub bucket: String,
    /// Identifier list. `None` groups every listed object by its own key.
    pub input: Option<PathBuf>,
    /// Prefixes to list; `None` lists the whole bucket.
    pub prefixes: Vec<Option<String>>,
    pub output: OutputSpec,
    pub expiry_seconds: i64,
    /// Log identifiers that matched nothing.
    pub report_missing: bool,
}

impl FinderOptions {
    pub fn new(bucket: &str, output: OutputSpec) -> Self {
        FinderOptions {
            bucket: bucket.to_string(),
            input: None,
            prefixes: vec![None],
            output,
            expiry_seconds: DEFAULT_EXPIRY_SECONDS as i64,
            report_missing: false,
        }
    }
}

/// Checks a presign expiry. Values above the signature limit are accepted
/// here and clamped when signing.
pub fn validate_expiry(expiry_seconds: i64) -> Result<u32, Error> {
    if expiry_seconds <= 0 {
        return Err(Error::usage(format!(
            "expiry must be a positive number of seconds, got {expiry_seconds}"
        )));
    }
    Ok(u32::try_from(expiry_seconds).unwrap_or(u32::MAX))
}

/// Lists the configured prefixes and groups the objects, filtered by the
/// identifier list when one is given.
pub async fn find_assets<L>(
    lister: &L,
    opts: &FinderOptions,
    ids: Option<&[String]>,
) -> Result<MatchGroup, Error>
where
    L: ListObjectPages + ?Sized,
{
    match ids {
        Some([]) => {
            log::info!("no asset identifiers given; nothing to match");
            Ok(MatchGroup::new())
        }
        Some(ids) => {
            let objects = lister::collect_objects(lister, &opts.bucket, &opts.prefixes).await?;
            Ok(matcher::match_filtered(ids, &objects))
        }
        None => {
            let objects = lister::collect_objects(lister, &opts.bucket, &opts.prefixes).await?;
            Ok(matcher::group_all(objects))
        }
    }
}

/// Runs the whole pipeline and returns the result lines.
///
/// Usage errors (bad expiry, unreadable input) are raised before the first
/// listing request.
pub async fn run<C>(client: &C, opts: &FinderOptions) -> Result<Vec<String>, Error>
where
    C: ListObjectPages + PresignGet + ?Sized,
{
    let presign = opts.output.presign();
    let expiry_seconds = if presign.any() {
        validate_expiry(opts.expiry_seconds)?
    } else {
        0
    };

    let ids = match &opts.input {
        Some(path) => Some(source::read_identifiers(path)?),
        None => None,
    };

    let mut groups = find_assets(client, opts, ids.as_deref()).await?;

    if opts.report_missing {
        if let Some(ids) = &ids {
            for id in matcher::missing_identifiers(ids, &groups) {
                log::warn!("asset {id} not found in {}", opts.bucket);
            }
        }
    }

    enrich::enrich(client, &mut groups, &opts.bucket, expiry_seconds, presign).await?;
    opts.output.render(&groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_expiry() {
        assert_eq!(validate_expiry(1).unwrap(), 1);
        assert_eq!(validate_expiry(604_800).unwrap(), 604_800);
        assert_eq!(validate_expiry(i64::MAX).unwrap(), u32::MAX);
        assert!(matches!(validate_expiry(0), Err(Error::Usage(_))));
        assert!(matches!(validate_expiry(-5), Err(Error::Usage(_))));
    }
}
