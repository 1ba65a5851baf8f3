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

//! Result field selection and line rendering.

use std::fmt;
use std::str::FromStr;

use crate::finder::enrich::Presign;
use crate::finder::error::Error;
use crate::finder::matcher::MatchGroup;
use crate::finder::types::EnrichedObject;

/// A column of the result lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputField {
    AssetId,
    Path,
    Date,
    Size,
    StorageClass,
    Presign,
    PresignEscaped,
}

impl OutputField {
    pub const ALL: [OutputField; 7] = [
        OutputField::AssetId,
        OutputField::Path,
        OutputField::Date,
        OutputField::Size,
        OutputField::StorageClass,
        OutputField::Presign,
        OutputField::PresignEscaped,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OutputField::AssetId => "asset_id",
            OutputField::Path => "path",
            OutputField::Date => "date",
            OutputField::Size => "size",
            OutputField::StorageClass => "storageclass",
            OutputField::Presign => "presign",
            OutputField::PresignEscaped => "presign-esc",
        }
    }
}

impl fmt::Display for OutputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = OutputField::ALL.iter().map(|f| f.name()).collect();
                Error::usage(format!(
                    "unknown result field '{s}'; expected one of {}",
                    known.join(", ")
                ))
            })
    }
}

/// Ordered list of result fields, parsed from a comma separated string such
/// as `asset_id,path,presign`. Repeated fields are rendered every time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputSpec {
    fields: Vec<OutputField>,
}

impl FromStr for OutputSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(Error::usage("no result fields requested"));
        }
        let fields = s
            .split(',')
            .map(|name| name.trim().parse())
            .collect::<Result<Vec<OutputField>, Error>>()?;
        Ok(OutputSpec { fields })
    }
}

impl OutputSpec {
    pub fn new(fields: Vec<OutputField>) -> Self {
        OutputSpec { fields }
    }

    pub fn fields(&self) -> &[OutputField] {
        &self.fields
    }

    /// URL variants the fields need.
    pub fn presign(&self) -> Presign {
        Presign {
            raw: self.fields.contains(&OutputField::Presign),
            escaped: self.fields.contains(&OutputField::PresignEscaped),
        }
    }

    fn render_field(
        &self,
        field: OutputField,
        id: &str,
        item: &EnrichedObject,
    ) -> Result<String, Error> {
        let missing_url = || {
            Error::usage(format!(
                "'{field}' requested but {} was not presigned",
                item.object.key
            ))
        };
        Ok(match field {
            OutputField::AssetId => id.to_string(),
            OutputField::Path => item.object.key.clone(),
            OutputField::Date => item
                .object
                .last_modified
                .format("%Y-%m-%d %H:%M:%S%:z")
                .to_string(),
            OutputField::Size => item.object.size.to_string(),
            OutputField::StorageClass => item.object.storage_class.clone(),
            OutputField::Presign => item.signed_url.clone().ok_or_else(missing_url)?,
            OutputField::PresignEscaped => {
                item.signed_url_escaped.clone().ok_or_else(missing_url)?
            }
        })
    }

    /// Renders one object of group `id` as a comma joined line.
    pub fn render_line(&self, id: &str, item: &EnrichedObject) -> Result<String, Error> {
        let values = self
            .fields
            .iter()
            .map(|field| self.render_field(*field, id, item))
            .collect::<Result<Vec<String>, Error>>()?;
        Ok(values.join(","))
    }

    /// Renders one line per (identifier, object) pair in group order.
    pub fn render(&self, groups: &MatchGroup) -> Result<Vec<String>, Error> {
        let mut lines = Vec::with_capacity(groups.object_count());
        for (id, objects) in groups.iter() {
            for item in objects {
                lines.push(self.render_line(id, item)?);
            }
        }
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finder::types::StoredObject;
    use chrono::{TimeZone, Utc};

    fn item() -> EnrichedObject {
        EnrichedObject {
            object: StoredObject {
                key: "Media/A100.mp4".to_string(),
                last_modified: Utc.with_ymd_and_hms(2023, 11, 2, 9, 15, 0).unwrap(),
                size: 1_048_576,
                storage_class: "GLACIER".to_string(),
            },
            signed_url: Some("https://x/A100.mp4?a=1&b=2".to_string()),
            signed_url_escaped: Some("https://x/A100.mp4?a=1&amp;b=2".to_string()),
        }
    }

    #[test]
    fn test_parse_spec() {
        let spec: OutputSpec = " asset_id, path ,path,presign-esc".parse().unwrap();
        assert_eq!(
            spec.fields(),
            [
                OutputField::AssetId,
                OutputField::Path,
                OutputField::Path,
                OutputField::PresignEscaped
            ]
        );
        assert_eq!(
            spec.presign(),
            Presign {
                raw: false,
                escaped: true
            }
        );
    }

    #[test]
    fn test_parse_spec_rejects_unknown_and_empty() {
        assert!(matches!("path,title".parse::<OutputSpec>(), Err(Error::Usage(_))));
        assert!(matches!("".parse::<OutputSpec>(), Err(Error::Usage(_))));
        assert!(matches!("path,".parse::<OutputSpec>(), Err(Error::Usage(_))));
    }

    #[test]
    fn test_render_every_field() {
        let spec: OutputSpec = "asset_id,path,date,size,storageclass,presign,presign-esc"
            .parse()
            .unwrap();
        assert_eq!(
            spec.render_line("A100", &item()).unwrap(),
            "A100,Media/A100.mp4,2023-11-02 09:15:00+00:00,1048576,GLACIER,\
             https://x/A100.mp4?a=1&b=2,https://x/A100.mp4?a=1&amp;b=2"
        );
    }

    #[test]
    fn test_render_without_presign_data_is_usage_error() {
        let mut unsigned = item();
        unsigned.signed_url = None;
        let spec: OutputSpec = "path,presign".parse().unwrap();
        assert!(matches!(
            spec.render_line("A100", &unsigned),
            Err(Error::Usage(_))
        ));
    }

    #[test]
    fn test_render_groups_in_order() {
        let mut groups = MatchGroup::new();
        groups.push("A100", item());
        let mut other = item();
        other.object.key = "Archive/A200.mov".to_string();
        groups.push("A200", other);

        let spec: OutputSpec = "asset_id,path".parse().unwrap();
        assert_eq!(
            spec.render(&groups).unwrap(),
            ["A100,Media/A100.mp4", "A200,Archive/A200.mov"]
        );
    }
}
