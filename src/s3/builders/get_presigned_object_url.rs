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

use http::Method;

use crate::s3::{
    client::S3Client,
    error::{Error, ValidationErr},
    multimap_ext::{Multimap, MultimapExt},
    response::GetPresignedObjectUrlResponse,
    signer::{MAX_PRESIGN_EXPIRY_SECONDS, presign_v4},
    utils::{UtcTime, check_bucket_name, check_object_name, utc_now},
};

/// Seven days, the longest validity a SigV4 presigned URL can carry.
pub const DEFAULT_EXPIRY_SECONDS: u32 = 604_800;

/// Argument builder for a presigned `GET` object URL, created by
/// [get_presigned_object_url()](crate::s3::client::S3Client::get_presigned_object_url).
///
/// No request is sent to the object itself; a network round trip only
/// happens when the bucket region has to be discovered.
#[derive(Clone, Debug)]
pub struct GetPresignedObjectUrl {
    client: S3Client,

    bucket: String,
    object: String,
    expiry_seconds: u32,
    request_time: Option<UtcTime>,
}

impl GetPresignedObjectUrl {
    pub fn new(client: S3Client, bucket: &str, object: &str) -> Self {
        Self {
            client,
            bucket: bucket.to_owned(),
            object: object.to_owned(),
            expiry_seconds: DEFAULT_EXPIRY_SECONDS,
            request_time: None,
        }
    }

    pub fn expiry_seconds(mut self, seconds: u32) -> Self {
        self.expiry_seconds = seconds;
        self
    }

    /// Pins the signing time, otherwise the current time is used.
    pub fn request_time(mut self, time: Option<UtcTime>) -> Self {
        self.request_time = time;
        self
    }

    pub async fn send(&self) -> Result<GetPresignedObjectUrlResponse, Error> {
        check_bucket_name(&self.bucket, false)?;
        check_object_name(&self.object)?;
        if self.expiry_seconds == 0 {
            return Err(ValidationErr::InvalidExpiry(self.expiry_seconds).into());
        }
        if self.expiry_seconds > MAX_PRESIGN_EXPIRY_SECONDS {
            log::warn!(
                "expiry of {}s exceeds the signature limit; clamping to {}s",
                self.expiry_seconds,
                MAX_PRESIGN_EXPIRY_SECONDS
            );
        }

        let region = self.client.get_region(&self.bucket, None).await?;

        let mut query_params = Multimap::new();
        let mut url = self.client.base_url().build_url(
            &region,
            &query_params,
            Some(&self.bucket),
            Some(&self.object),
        );

        if let Some(creds) = self.client.credentials() {
            if let Some(t) = creds.session_token {
                query_params.add("X-Amz-Security-Token", t);
            }

            presign_v4(
                &Method::GET,
                &url.host_header_value(),
                &url.path,
                &region,
                &mut query_params,
                &creds.access_key,
                &creds.secret_key,
                self.request_time.unwrap_or_else(utc_now),
                self.expiry_seconds,
            );

            url.query = query_params;
        }

        Ok(GetPresignedObjectUrlResponse {
            region,
            bucket: self.bucket.clone(),
            object: self.object.clone(),
            url: url.to_string(),
        })
    }
}
