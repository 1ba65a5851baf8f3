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

use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tempfile::NamedTempFile;

use asset_finder::finder::{ListObjectPages, ObjectPage, PresignGet, StoredObject};
use asset_finder::s3::error::Error as S3Error;

pub fn object(key: &str) -> StoredObject {
    StoredObject {
        key: key.to_string(),
        last_modified: Utc.with_ymd_and_hms(2023, 11, 2, 9, 15, 0).unwrap(),
        size: 1024,
        storage_class: "STANDARD".to_string(),
    }
}

/// In-memory bucket. Each prefix maps to a fixed list of pages; page `n`
/// is requested with the token `page-n`.
#[derive(Debug, Default)]
pub struct FakeStore {
    pages: HashMap<String, Vec<Vec<StoredObject>>>,
    failing_prefix: Option<String>,
    failing_key: Option<String>,
    repeat_token: bool,
    list_calls: Mutex<Vec<(String, Option<String>)>>,
    sign_calls: AtomicUsize,
}

#[allow(dead_code)]
impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the pages served for `prefix`; `""` is the whole bucket.
    pub fn with_pages(mut self, prefix: &str, pages: &[&[&str]]) -> Self {
        let pages = pages
            .iter()
            .map(|keys| keys.iter().map(|k| object(k)).collect())
            .collect();
        self.pages.insert(prefix.to_string(), pages);
        self
    }

    pub fn failing_prefix(mut self, prefix: &str) -> Self {
        self.failing_prefix = Some(prefix.to_string());
        self
    }

    pub fn failing_key(mut self, key: &str) -> Self {
        self.failing_key = Some(key.to_string());
        self
    }

    /// Answers every request with the token it was sent.
    pub fn repeat_token(mut self) -> Self {
        self.repeat_token = true;
        self
    }

    pub fn list_calls(&self) -> Vec<(String, Option<String>)> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn sign_calls(&self) -> usize {
        self.sign_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListObjectPages for FakeStore {
    async fn list_page(
        &self,
        _bucket: &str,
        prefix: Option<&str>,
        continuation_token: Option<String>,
    ) -> Result<ObjectPage, S3Error> {
        let prefix = prefix.unwrap_or_default().to_string();
        self.list_calls
            .lock()
            .unwrap()
            .push((prefix.clone(), continuation_token.clone()));

        if self.failing_prefix.as_deref() == Some(prefix.as_str()) {
            return Err(S3Error::ServerError(503));
        }

        let index = match &continuation_token {
            None => 0,
            Some(token) => token.trim_start_matches("page-").parse::<usize>().unwrap(),
        };
        let pages = self.pages.get(&prefix).cloned().unwrap_or_default();
        let objects = pages.get(index).cloned().unwrap_or_default();

        let next_token = if self.repeat_token {
            Some(continuation_token.unwrap_or_else(|| "page-0".to_string()))
        } else if index + 1 < pages.len() {
            Some(format!("page-{}", index + 1))
        } else {
            None
        };

        Ok(ObjectPage {
            objects,
            next_token,
        })
    }
}

#[async_trait]
impl PresignGet for FakeStore {
    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expiry_seconds: u32,
    ) -> Result<String, S3Error> {
        self.sign_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_key.as_deref() == Some(key) {
            return Err(S3Error::ServerError(403));
        }
        Ok(format!(
            "https://{bucket}.s3.amazonaws.com/{key}?X-Amz-Expires={expiry_seconds}&X-Amz-Signature=abc"
        ))
    }
}

#[allow(dead_code)]
pub fn input_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}
