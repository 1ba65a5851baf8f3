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

//! Paginated object listing across one or more prefixes.

use async_stream::try_stream;
use async_trait::async_trait;
use futures_util::{Stream, TryStreamExt};

use crate::finder::error::Error;
use crate::finder::key::derive_key;
use crate::finder::types::{ObjectPage, StoredObject};
use crate::s3::client::S3Client;
use crate::s3::error::{Error as S3Error, ValidationErr};

/// Source of listing pages.
#[async_trait]
pub trait ListObjectPages: Send + Sync {
    /// Fetches one page of the objects of `bucket` under `prefix`, starting
    /// at `continuation_token` if given.
    async fn list_page(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        continuation_token: Option<String>,
    ) -> Result<ObjectPage, S3Error>;
}

#[async_trait]
impl ListObjectPages for S3Client {
    async fn list_page(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        continuation_token: Option<String>,
    ) -> Result<ObjectPage, S3Error> {
        let resp = self
            .list_objects_v2(bucket)
            .prefix(prefix.map(str::to_string))
            .continuation_token(continuation_token)
            .send()
            .await?;

        log::debug!(
            "listed {} keys from {}/{}",
            resp.key_count,
            bucket,
            prefix.unwrap_or_default()
        );

        Ok(ObjectPage {
            objects: resp.contents.into_iter().map(StoredObject::from).collect(),
            next_token: if resp.is_truncated {
                resp.next_continuation_token
            } else {
                None
            },
        })
    }
}

/// Splits a comma separated prefix list. Entries are trimmed and an empty
/// entry stands for the whole bucket, as does an absent or empty list.
pub fn parse_prefixes(paths: Option<&str>) -> Vec<Option<String>> {
    match paths {
        None | Some("") => vec![None],
        Some(paths) => paths
            .split(',')
            .map(str::trim)
            .map(|p| (!p.is_empty()).then(|| p.to_string()))
            .collect(),
    }
}

/// Streams every object of `bucket` under each of `prefixes`, in prefix
/// order and page order. Objects under overlapping prefixes are yielded
/// once per prefix.
///
/// Directory placeholder keys (ending in `/`) are skipped.
pub fn list_objects<'a, L>(
    lister: &'a L,
    bucket: &'a str,
    prefixes: &'a [Option<String>],
) -> impl Stream<Item = Result<StoredObject, Error>> + 'a
where
    L: ListObjectPages + ?Sized,
{
    try_stream! {
        for prefix in prefixes {
            let label = prefix.clone().unwrap_or_default();
            let mut token: Option<String> = None;
            let mut pages = 0usize;
            let mut found = 0usize;

            loop {
                let sent = token.take();
                let page = lister
                    .list_page(bucket, prefix.as_deref(), sent.clone())
                    .await
                    .map_err(|source| Error::StorageList {
                        prefix: label.clone(),
                        source,
                    })?;
                pages += 1;

                for object in page.objects {
                    if derive_key(&object.key).is_empty() {
                        log::debug!("skipping directory placeholder {}", object.key);
                        continue;
                    }
                    found += 1;
                    yield object;
                }

                match page.next_token {
                    None => break,
                    Some(next) if sent.as_deref() == Some(next.as_str()) => {
                        Err::<(), Error>(Error::StorageList {
                            prefix: label.clone(),
                            source: ValidationErr::RepeatedContinuationToken(next).into(),
                        })?;
                    }
                    Some(next) => token = Some(next),
                }
            }

            log::info!("{bucket}/{label}: {found} objects in {pages} pages");
        }
    }
}

/// Drains [`list_objects`] into a vector. The first failure discards
/// everything listed so far.
pub async fn collect_objects<L>(
    lister: &L,
    bucket: &str,
    prefixes: &[Option<String>],
) -> Result<Vec<StoredObject>, Error>
where
    L: ListObjectPages + ?Sized,
{
    list_objects(lister, bucket, prefixes).try_collect().await
}
