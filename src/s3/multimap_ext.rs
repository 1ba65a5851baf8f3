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

use crate::s3::utils::url_encode;
use std::collections::BTreeMap;

/// Multimap for string key and string value
pub type Multimap = multimap::MultiMap<String, String>;

const SIGNATURE_PARAM: &str = "X-Amz-Signature";

pub trait MultimapExt {
    /// Adds a key-value pair to the multimap
    fn add<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V);

    /// Adds an optional value, skipping `None`
    fn add_opt<K: Into<String>>(&mut self, key: K, value: Option<&str>);

    /// Converts multimap to HTTP query string, sorted by key with
    /// `X-Amz-Signature` last
    fn to_query_string(&self) -> String;

    /// Converts multimap to canonical query string
    fn get_canonical_query_string(&self) -> String;

    /// Converts multimap to signed headers and canonical headers
    fn get_canonical_headers(&self) -> (String, String);
}

fn collapse_spaces(s: &str) -> String {
    s.split(' ')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn encode_pairs<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    let mut query = String::new();
    for (key, value) in pairs {
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(&url_encode(key));
        query.push('=');
        query.push_str(&url_encode(value));
    }
    query
}

/// Key/value pairs ordered by key, then by value.
fn sorted_pairs(map: &Multimap) -> Vec<(&str, &str)> {
    let mut pairs: Vec<(&str, &str)> = map
        .iter_all()
        .flat_map(|(k, vs)| vs.iter().map(move |v| (k.as_str(), v.as_str())))
        .collect();
    pairs.sort_unstable();
    pairs
}

impl MultimapExt for Multimap {
    fn add<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.insert(key.into(), value.into());
    }

    fn add_opt<K: Into<String>>(&mut self, key: K, value: Option<&str>) {
        if let Some(v) = value {
            self.insert(key.into(), v.to_string());
        }
    }

    fn to_query_string(&self) -> String {
        let mut pairs = sorted_pairs(self);
        // stable sort: the signature moves last, the rest keep key order
        pairs.sort_by_key(|(k, _)| *k == SIGNATURE_PARAM);
        encode_pairs(pairs.into_iter())
    }

    fn get_canonical_query_string(&self) -> String {
        encode_pairs(sorted_pairs(self).into_iter())
    }

    fn get_canonical_headers(&self) -> (String, String) {
        let mut btmap: BTreeMap<String, String> = BTreeMap::new();

        for (k, values) in self.iter_all() {
            let key = k.to_lowercase();
            if key == "authorization" || key == "user-agent" {
                continue;
            }

            let mut vs: Vec<&String> = values.iter().collect();
            vs.sort();
            let value = vs
                .into_iter()
                .map(|v| collapse_spaces(v.trim()))
                .collect::<Vec<_>>()
                .join(",");
            btmap.insert(key, value);
        }

        let signed_headers = btmap.keys().cloned().collect::<Vec<_>>().join(";");
        let canonical_headers = btmap
            .iter()
            .map(|(k, v)| format!("{k}:{v}"))
            .collect::<Vec<_>>()
            .join("\n");

        (signed_headers, canonical_headers)
    }
}
