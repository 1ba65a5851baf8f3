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

//! Endpoint and request URL handling

use crate::s3::error::ValidationErr;
use crate::s3::multimap_ext::{Multimap, MultimapExt};
use crate::s3::utils::{match_hostname, urlencode_object_key};
use http::Uri;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Region used when neither the endpoint nor the caller names one.
pub const DEFAULT_REGION: &str = "us-east-1";

lazy_static! {
    static ref AWS_S3_ENDPOINT_REGEX: Regex =
        Regex::new(r"^s3([.-](?P<region>[a-z]{2}(-gov)?-[a-z]+-\d))?\.amazonaws\.com(\.cn)?$")
            .unwrap();
}

#[derive(Clone, Debug, PartialEq)]
/// Represents HTTP URL
pub struct Url {
    pub https: bool,
    pub host: String,
    pub port: u16,
    pub path: String,
    pub query: Multimap,
}

impl Url {
    pub fn host_header_value(&self) -> String {
        if self.port > 0 {
            return format!("{}:{}", self.host, self.port);
        }
        self.host.clone()
    }
}

impl Default for Url {
    fn default() -> Self {
        Self {
            https: true,
            host: String::default(),
            port: u16::default(),
            path: String::default(),
            query: Multimap::default(),
        }
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(if self.https { "https://" } else { "http://" })?;
        f.write_str(&self.host_header_value())?;

        if !self.path.starts_with('/') {
            f.write_str("/")?;
        }
        f.write_str(&self.path)?;

        if !self.query.is_empty() {
            f.write_str("?")?;
            f.write_str(&self.query.to_query_string())?;
        }

        Ok(())
    }
}

/// Returns the region embedded in an Amazon S3 endpoint host, `Some("")`
/// for the global endpoint, or `None` when `host` is not an S3 endpoint.
pub fn match_aws_s3_endpoint(host: &str) -> Option<String> {
    AWS_S3_ENDPOINT_REGEX
        .captures(&host.to_lowercase())
        .map(|c| {
            c.name("region")
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        })
}

#[derive(Clone, Debug, PartialEq)]
/// Represents Base URL of S3 endpoint
pub struct BaseUrl {
    pub https: bool,
    host: String,
    port: u16,
    pub region: String,
    aws: bool,
    pub virtual_style: bool,
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self {
            https: true,
            host: "s3.amazonaws.com".to_string(),
            port: 0,
            region: String::new(),
            aws: true,
            virtual_style: true,
        }
    }
}

impl FromStr for BaseUrl {
    type Err = ValidationErr;

    /// Convert a string to a BaseUrl.
    ///
    /// Accepts `scheme://host[:port]` or a bare `host[:port]` (HTTPS is
    /// assumed). Amazon S3 hosts switch on virtual-host style addressing and
    /// the region is taken from the host when it carries one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let url = s
            .parse::<Uri>()
            .map_err(|e| ValidationErr::InvalidBaseUrl(format!("{s}: {e}")))?;

        let https = match url.scheme_str() {
            None | Some("https") => true,
            Some("http") => false,
            Some(other) => {
                return Err(ValidationErr::InvalidBaseUrl(format!(
                    "scheme {other} is not supported"
                )));
            }
        };

        let host = url
            .host()
            .ok_or_else(|| ValidationErr::InvalidBaseUrl(format!("{s}: missing host")))?
            .to_string();
        if !match_hostname(&host) && host.parse::<std::net::IpAddr>().is_err() {
            return Err(ValidationErr::InvalidBaseUrl(format!(
                "{host} is not a valid host"
            )));
        }

        let mut port = url.port_u16().unwrap_or(0);
        if (https && port == 443) || (!https && port == 80) {
            port = 0;
        }

        if !matches!(url.path(), "" | "/") {
            return Err(ValidationErr::InvalidBaseUrl(format!(
                "{s}: path in endpoint is not supported"
            )));
        }
        if url.query().is_some() {
            return Err(ValidationErr::InvalidBaseUrl(format!(
                "{s}: query in endpoint is not supported"
            )));
        }

        let (aws, region) = match match_aws_s3_endpoint(&host) {
            Some(region) => (true, region),
            None => (false, String::new()),
        };

        Ok(BaseUrl {
            https,
            host,
            port,
            region,
            aws,
            virtual_style: aws,
        })
    }
}

impl BaseUrl {
    /// Amazon S3 endpoint for the given region (global endpoint when `None`).
    pub fn aws(region: Option<&str>) -> Self {
        let region = region.unwrap_or_default().to_string();
        Self {
            host: if region.is_empty() {
                "s3.amazonaws.com".to_string()
            } else {
                format!("s3.{region}.amazonaws.com")
            },
            region,
            ..Default::default()
        }
    }

    pub fn is_aws_host(&self) -> bool {
        self.aws
    }

    pub fn host_with_port(&self) -> String {
        if self.port > 0 {
            return format!("{}:{}", self.host, self.port);
        }
        self.host.clone()
    }

    /// Builds URL for given parameters.
    pub fn build_url(
        &self,
        region: &str,
        query: &Multimap,
        bucket_name: Option<&str>,
        object_name: Option<&str>,
    ) -> Url {
        let mut url = Url {
            https: self.https,
            host: self.host.clone(),
            port: self.port,
            path: String::from("/"),
            query: query.clone(),
        };

        if self.aws && !region.is_empty() {
            url.host = format!("s3.{region}.amazonaws.com");
        }

        let bucket = match bucket_name {
            None => return url,
            Some(v) => v,
        };

        // GetBucketLocation requires path style in Amazon AWS S3, and bucket
        // names containing '.' break TLS certificate validation.
        let enforce_path_style =
            query.contains_key("location") || (bucket.contains('.') && self.https);

        let mut path = String::new();
        if enforce_path_style || !self.virtual_style {
            path.push('/');
            path.push_str(bucket);
        } else {
            url.host = format!("{bucket}.{}", url.host);
        }

        if let Some(v) = object_name {
            if !v.starts_with('/') {
                path.push('/');
            }
            path.push_str(&urlencode_object_key(v));
        }

        if path.is_empty() {
            path.push('/');
        }
        url.path = path;
        url
    }
}
