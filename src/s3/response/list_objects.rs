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

//! Response types for the ListObjectsV2 API

use bytes::{Buf, Bytes};
use xmltree::Element;

use crate::s3::{
    error::ValidationErr,
    utils::{UtcTime, from_iso8601utc, get_text, get_text_option, url_decode},
};

/// One object of a listing page.
#[derive(Clone, Debug, PartialEq)]
pub struct ListEntry {
    pub name: String,
    pub last_modified: UtcTime,
    pub etag: Option<String>,
    pub size: u64,
    pub storage_class: Option<String>,
}

/// Response of [list_objects_v2()](crate::s3::client::S3Client::list_objects_v2) S3 API
#[derive(Clone, Debug, PartialEq)]
pub struct ListObjectsV2Response {
    pub name: String,
    pub encoding_type: Option<String>,
    pub prefix: Option<String>,
    pub key_count: u32,
    pub is_truncated: bool,
    pub continuation_token: Option<String>,
    pub next_continuation_token: Option<String>,
    pub contents: Vec<ListEntry>,
    pub common_prefixes: Vec<String>,
}

fn decode(url_encoded: bool, value: String) -> Result<String, ValidationErr> {
    if url_encoded {
        url_decode(&value)
    } else {
        Ok(value)
    }
}

fn parse_entry(content: &Element, url_encoded: bool) -> Result<ListEntry, ValidationErr> {
    Ok(ListEntry {
        name: decode(url_encoded, get_text(content, "Key")?)?,
        last_modified: from_iso8601utc(&get_text(content, "LastModified")?)?,
        etag: get_text_option(content, "ETag").map(|v| v.trim_matches('"').to_string()),
        size: get_text_option(content, "Size")
            .map(|v| v.parse::<u64>())
            .transpose()?
            .unwrap_or_default(),
        storage_class: get_text_option(content, "StorageClass").filter(|v| !v.is_empty()),
    })
}

impl ListObjectsV2Response {
    /// Decodes a `ListBucketResult` document.
    pub fn parse(body: Bytes) -> Result<Self, ValidationErr> {
        let root = Element::parse(body.reader())?;
        if root.name != "ListBucketResult" {
            return Err(ValidationErr::XmlError(format!(
                "expected <ListBucketResult>, got <{}>",
                root.name
            )));
        }

        let encoding_type = get_text_option(&root, "EncodingType");
        let url_encoded = encoding_type.as_deref() == Some("url");

        let mut contents = Vec::new();
        let mut common_prefixes = Vec::new();
        for child in root.children.iter().filter_map(|n| n.as_element()) {
            match child.name.as_str() {
                "Contents" => contents.push(parse_entry(child, url_encoded)?),
                "CommonPrefixes" => {
                    common_prefixes.push(decode(url_encoded, get_text(child, "Prefix")?)?)
                }
                _ => {}
            }
        }

        let key_count = match get_text_option(&root, "KeyCount") {
            Some(v) => v.parse::<u32>()?,
            None => (contents.len() + common_prefixes.len()) as u32,
        };
        let is_truncated = get_text_option(&root, "IsTruncated")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(ListObjectsV2Response {
            name: get_text(&root, "Name")?,
            prefix: get_text_option(&root, "Prefix")
                .map(|v| decode(url_encoded, v))
                .transpose()?,
            encoding_type,
            key_count,
            is_truncated,
            continuation_token: get_text_option(&root, "ContinuationToken"),
            next_continuation_token: get_text_option(&root, "NextContinuationToken")
                .filter(|v| !v.is_empty()),
            contents,
            common_prefixes,
        })
    }
}
