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

//! S3 client to perform bucket and object operations

use std::sync::Arc;
use std::time::Duration;

use bytes::Buf;
use dashmap::DashMap;
use http::Method;
use xmltree::Element;

use crate::s3::builders::{GetPresignedObjectUrl, ListObjectsV2};
use crate::s3::creds::{Credentials, Provider};
use crate::s3::error::{Error, ErrorResponse, ValidationErr};
use crate::s3::http::{BaseUrl, DEFAULT_REGION};
use crate::s3::multimap_ext::{Multimap, MultimapExt};
use crate::s3::signer::sign_v4_s3;
use crate::s3::utils::{EMPTY_SHA256, to_amz_date, utc_now};

const USER_AGENT: &str = concat!("s3-asset-finder/", env!("CARGO_PKG_VERSION"));

/// Builder for [`S3Client`].
#[derive(Debug)]
pub struct S3ClientBuilder {
    base_url: BaseUrl,
    provider: Option<Arc<dyn Provider>>,
    timeout: Option<Duration>,
}

impl S3ClientBuilder {
    pub fn new(base_url: BaseUrl) -> Self {
        Self {
            base_url,
            provider: None,
            timeout: None,
        }
    }

    /// Set the credential provider. If not set, requests are sent anonymously.
    pub fn provider(mut self, provider: Option<Arc<dyn Provider>>) -> Self {
        self.provider = provider;
        self
    }

    /// Per-request timeout enforced by the HTTP client. `None` waits
    /// indefinitely.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<S3Client, Error> {
        let mut builder = reqwest::Client::builder()
            .no_gzip()
            .user_agent(USER_AGENT);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(S3Client {
            http_client: builder.build()?,
            shared: Arc::new(SharedClientItems {
                base_url: self.base_url,
                provider: self.provider,
                region_map: DashMap::new(),
            }),
        })
    }
}

#[derive(Debug)]
struct SharedClientItems {
    base_url: BaseUrl,
    provider: Option<Arc<dyn Provider>>,
    region_map: DashMap<String, String>,
}

/// Simple Storage Service (aka S3) client limited to listing and URL
/// presigning. Cheap to clone; clones share the connection pool and the
/// bucket region cache.
#[derive(Clone, Debug)]
pub struct S3Client {
    http_client: reqwest::Client,
    shared: Arc<SharedClientItems>,
}

impl S3Client {
    pub fn builder(base_url: BaseUrl) -> S3ClientBuilder {
        S3ClientBuilder::new(base_url)
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.shared.base_url
    }

    /// Current credentials, or `None` for anonymous access.
    pub fn credentials(&self) -> Option<Credentials> {
        self.shared.provider.as_ref().map(|p| p.fetch())
    }

    /// Creates a builder for one page of the
    /// [ListObjectsV2](https://docs.aws.amazon.com/AmazonS3/latest/API/API_ListObjectsV2.html)
    /// S3 API.
    pub fn list_objects_v2(&self, bucket: &str) -> ListObjectsV2 {
        ListObjectsV2::new(self.clone(), bucket)
    }

    /// Creates a builder for a presigned `GET` URL of an object.
    pub fn get_presigned_object_url(&self, bucket: &str, object: &str) -> GetPresignedObjectUrl {
        GetPresignedObjectUrl::new(self.clone(), bucket, object)
    }

    /// Resolves the region to sign requests for `bucket` with.
    ///
    /// An explicit region wins, then the region of the endpoint, then the
    /// cached or discovered bucket location.
    pub async fn get_region(&self, bucket: &str, region: Option<&str>) -> Result<String, Error> {
        let base_region = &self.shared.base_url.region;

        if let Some(r) = region.filter(|r| !r.is_empty()) {
            if !base_region.is_empty() && base_region != r {
                return Err(ValidationErr::RegionMismatch {
                    bucket_region: base_region.clone(),
                    region: r.to_string(),
                }
                .into());
            }
            return Ok(r.to_string());
        }

        if !base_region.is_empty() {
            return Ok(base_region.clone());
        }

        if bucket.is_empty() || self.shared.provider.is_none() {
            return Ok(DEFAULT_REGION.to_string());
        }

        if let Some(v) = self.shared.region_map.get(bucket) {
            return Ok(v.clone());
        }

        let mut query_params = Multimap::new();
        query_params.add("location", "");
        let resp = self
            .execute(
                Method::GET,
                DEFAULT_REGION,
                &mut Multimap::new(),
                &query_params,
                Some(bucket),
                None,
            )
            .await?;
        let body = resp.bytes().await?;
        let root = Element::parse(body.reader()).map_err(ValidationErr::from)?;

        let location = match root.get_text().unwrap_or_default().trim() {
            "" => DEFAULT_REGION.to_string(),
            "EU" => "eu-west-1".to_string(),
            v => v.to_string(),
        };

        log::debug!("bucket {bucket} is located in {location}");
        self.shared
            .region_map
            .insert(bucket.to_string(), location.clone());
        Ok(location)
    }

    /// Signs and sends a body-less request, mapping non-2xx responses to
    /// [`Error::S3Error`] when the service returned an error document.
    pub async fn execute(
        &self,
        method: Method,
        region: &str,
        headers: &mut Multimap,
        query_params: &Multimap,
        bucket_name: Option<&str>,
        object_name: Option<&str>,
    ) -> Result<reqwest::Response, Error> {
        let url = self
            .shared
            .base_url
            .build_url(region, query_params, bucket_name, object_name);

        let date = utc_now();
        headers.add("Host", url.host_header_value());
        headers.add("x-amz-date", to_amz_date(date));

        if let Some(creds) = self.credentials() {
            headers.add("x-amz-content-sha256", EMPTY_SHA256);
            if let Some(token) = creds.session_token {
                headers.add("X-Amz-Security-Token", token);
            }
            sign_v4_s3(
                &method,
                &url.path,
                region,
                headers,
                query_params,
                &creds.access_key,
                &creds.secret_key,
                EMPTY_SHA256,
                date,
            );
        }

        log::debug!("{method} {url}");

        let mut req = self.http_client.request(method, url.to_string());
        for (key, values) in headers.iter_all() {
            for value in values {
                req = req.header(key, value);
            }
        }

        let resp = req.send().await?;
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = resp.bytes().await?;

        if body.is_empty() {
            return Err(Error::ServerError(status));
        }

        match ErrorResponse::parse(body) {
            Ok(er) => {
                if er.code == "NoSuchBucket" {
                    if let Some(v) = bucket_name {
                        self.shared.region_map.remove(v);
                    }
                }
                Err(Error::S3Error(er))
            }
            Err(_) => Err(Error::InvalidResponse(status, content_type)),
        }
    }
}
