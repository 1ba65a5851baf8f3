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

//! Asset identifier lists read from delimited text.

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::finder::error::Error;

lazy_static! {
    static ref ASSET_ID_HEADER: Regex = Regex::new(r"(?i)asset.?id").unwrap();
}

/// Returns true if `line` looks like the header row of an identifier list,
/// e.g. `Asset ID`, `asset_id` or `AssetId`.
pub fn is_header_line(line: &str) -> bool {
    ASSET_ID_HEADER.is_match(line)
}

/// Reads the identifier list at `path`. See [`parse_identifiers`].
pub fn read_identifiers<P: AsRef<Path>>(path: P) -> Result<Vec<String>, Error> {
    let path = path.as_ref();
    let origin = path.display().to_string();
    let file = File::open(path).map_err(|e| Error::InputParse {
        path: origin.clone(),
        reason: e.to_string(),
    })?;
    parse_identifiers(BufReader::new(file), &origin)
}

/// Parses asset identifiers from CSV text.
///
/// The first line is skipped when it is a header. Only the first column is
/// kept and rows whose first column is empty are dropped. Order and
/// duplicates are preserved.
pub fn parse_identifiers<'a, R: BufRead + 'a>(
    mut reader: R,
    origin: &str,
) -> Result<Vec<String>, Error> {
    let input_err = |reason: String| Error::InputParse {
        path: origin.to_string(),
        reason,
    };

    let mut first_line = String::new();
    reader
        .read_line(&mut first_line)
        .map_err(|e| input_err(e.to_string()))?;

    let body: Box<dyn Read + 'a> = if is_header_line(&first_line) {
        log::debug!("{origin}: skipping header line {:?}", first_line.trim_end());
        Box::new(reader)
    } else {
        Box::new(Cursor::new(first_line.into_bytes()).chain(reader))
    };

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body);

    let mut ids = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|e| input_err(e.to_string()))?;
        match record.get(0) {
            Some(id) if !id.is_empty() => ids.push(id.to_string()),
            _ => {}
        }
    }

    log::info!("{origin}: read {} asset identifiers", ids.len());
    Ok(ids)
}
