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

//! Error definitions for S3 operations

use crate::s3::utils::{get_text_default, get_text_option};
use bytes::{Buf, Bytes};
use thiserror::Error;
use xmltree::Element;

/// Errors raised while validating arguments before any request is sent.
#[derive(Debug, Error)]
pub enum ValidationErr {
    #[error("invalid bucket name: {0}")]
    InvalidBucketName(String),

    #[error("invalid object name: {0}")]
    InvalidObjectName(String),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("region must be {bucket_region}, but passed {region}")]
    RegionMismatch {
        bucket_region: String,
        region: String,
    },

    #[error("expiry must be at least one second, got {0}")]
    InvalidExpiry(u32),

    #[error("listing returned the continuation token it was given: {0}")]
    RepeatedContinuationToken(String),

    #[error("time parse error: {0}")]
    TimeParseError(#[from] chrono::ParseError),

    #[error("integer parse error: {0}")]
    IntError(#[from] std::num::ParseIntError),

    #[error("invalid UTF-8 in url-encoded value: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    #[error("XML error: {0}")]
    XmlError(String),

    #[error("XML parse error: {0}")]
    XmlParseError(#[from] xmltree::ParseError),
}

/// Error document returned by the S3 service.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub resource: String,
    pub request_id: String,
    pub host_id: String,
    pub bucket_name: String,
    pub object_name: String,
}

impl ErrorResponse {
    pub fn parse(body: Bytes) -> Result<ErrorResponse, ValidationErr> {
        let root = Element::parse(body.reader())?;

        Ok(ErrorResponse {
            code: get_text_default(&root, "Code"),
            message: get_text_default(&root, "Message"),
            resource: get_text_default(&root, "Resource"),
            request_id: get_text_default(&root, "RequestId"),
            host_id: get_text_default(&root, "HostId"),
            bucket_name: get_text_option(&root, "BucketName").unwrap_or_default(),
            object_name: get_text_option(&root, "Key").unwrap_or_default(),
        })
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "code: {}, message: {}, resource: {}, request_id: {}, host_id: {}, bucket_name: {}, object_name: {}",
            self.code,
            self.message,
            self.resource,
            self.request_id,
            self.host_id,
            self.bucket_name,
            self.object_name,
        )
    }
}

/// Top level error of the S3 client.
#[derive(Debug, Error)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationErr),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("s3 operation failed; {0}")]
    S3Error(ErrorResponse),

    #[error("server failed with HTTP status code {0}")]
    ServerError(u16),

    #[error("invalid response received; status code: {0}; content-type: {1}")]
    InvalidResponse(u16, String),
}

impl Error {
    /// Service-side error code, if the failure came with an S3 error document.
    pub fn s3_code(&self) -> Option<&str> {
        match self {
            Error::S3Error(er) => Some(er.code.as_str()),
            _ => None,
        }
    }
}
