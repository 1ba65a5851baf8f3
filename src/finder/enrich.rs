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

//! Attaches presigned URLs to matched objects.

use async_trait::async_trait;

use crate::finder::error::Error;
use crate::finder::matcher::MatchGroup;
use crate::s3::client::S3Client;
use crate::s3::error::Error as S3Error;

/// Signer of time limited `GET` URLs.
#[async_trait]
pub trait PresignGet: Send + Sync {
    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expiry_seconds: u32,
    ) -> Result<String, S3Error>;
}

#[async_trait]
impl PresignGet for S3Client {
    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expiry_seconds: u32,
    ) -> Result<String, S3Error> {
        let resp = self
            .get_presigned_object_url(bucket, key)
            .expiry_seconds(expiry_seconds)
            .send()
            .await?;
        Ok(resp.url)
    }
}

/// Which URL variants to attach.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Presign {
    pub raw: bool,
    pub escaped: bool,
}

impl Presign {
    pub fn any(&self) -> bool {
        self.raw || self.escaped
    }
}

/// Escapes a URL for embedding in HTML/XML attribute values. Only `&` is
/// rewritten.
pub fn escape_url(url: &str) -> String {
    url.replace('&', "&amp;")
}

/// Presigns every object of `groups` once and stores the requested variants
/// on it. The first signing failure aborts the run.
pub async fn enrich<S>(
    signer: &S,
    groups: &mut MatchGroup,
    bucket: &str,
    expiry_seconds: u32,
    wanted: Presign,
) -> Result<(), Error>
where
    S: PresignGet + ?Sized,
{
    if !wanted.any() {
        return Ok(());
    }

    let mut signed = 0usize;
    for item in groups.objects_mut() {
        let url = signer
            .presign_get(bucket, &item.object.key, expiry_seconds)
            .await
            .map_err(|source| Error::Signing {
                key: item.object.key.clone(),
                source,
            })?;

        if wanted.escaped {
            item.signed_url_escaped = Some(escape_url(&url));
        }
        if wanted.raw {
            item.signed_url = Some(url);
        }
        signed += 1;
    }

    log::info!("presigned {signed} objects for {expiry_seconds}s");
    Ok(())
}
