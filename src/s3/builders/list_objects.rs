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

//! Argument builder for the ListObjectsV2 API.

use http::Method;

use crate::s3::{
    client::S3Client,
    error::Error,
    multimap_ext::{Multimap, MultimapExt},
    response::ListObjectsV2Response,
    utils::check_bucket_name,
};

/// Argument builder for ListObjectsV2 S3 API, created by
/// [list_objects_v2()](crate::s3::client::S3Client::list_objects_v2).
///
/// A single call to [`send`](ListObjectsV2::send) fetches one page; callers
/// feed `next_continuation_token` of the response back through
/// [`continuation_token`](ListObjectsV2::continuation_token) to walk the
/// listing.
#[derive(Clone, Debug)]
pub struct ListObjectsV2 {
    client: S3Client,

    bucket: String,
    prefix: Option<String>,
    continuation_token: Option<String>,
}

impl ListObjectsV2 {
    pub fn new(client: S3Client, bucket: &str) -> Self {
        Self {
            client,
            bucket: bucket.to_owned(),
            prefix: None,
            continuation_token: None,
        }
    }

    pub fn prefix(mut self, prefix: Option<String>) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn continuation_token(mut self, continuation_token: Option<String>) -> Self {
        self.continuation_token = continuation_token;
        self
    }

    fn query_params(&self) -> Multimap {
        let mut query_params = Multimap::new();
        query_params.add("list-type", "2");
        query_params.add("max-keys", "1000");
        query_params.add("prefix", self.prefix.as_deref().unwrap_or(""));
        // keys come back percent-encoded; the response decodes them
        query_params.add("encoding-type", "url");
        query_params.add_opt("continuation-token", self.continuation_token.as_deref());
        query_params
    }

    /// Sends the request and decodes one page of the listing.
    pub async fn send(&self) -> Result<ListObjectsV2Response, Error> {
        check_bucket_name(&self.bucket, false)?;

        let region = self.client.get_region(&self.bucket, None).await?;
        let resp = self
            .client
            .execute(
                Method::GET,
                &region,
                &mut Multimap::new(),
                &self.query_params(),
                Some(&self.bucket),
                None,
            )
            .await?;
        let body = resp.bytes().await?;
        Ok(ListObjectsV2Response::parse(body)?)
    }
}
