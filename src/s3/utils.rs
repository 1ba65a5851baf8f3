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

//! Various utility and helper functions

use chrono::{DateTime, NaiveDateTime, ParseError, Utc};
use lazy_static::lazy_static;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use sha2::{Digest, Sha256};
use xmltree::Element;

use crate::s3::error::ValidationErr;

/// Date and time with UTC timezone
pub type UtcTime = DateTime<Utc>;

/// SHA256 of an empty payload, sent with every body-less request.
pub const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Gets hex encoded SHA256 hash of given data
pub fn sha256_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Gets current UTC time
pub fn utc_now() -> UtcTime {
    chrono::offset::Utc::now()
}

/// Gets signer date value of given time
pub fn to_signer_date(time: UtcTime) -> String {
    time.format("%Y%m%d").to_string()
}

/// Gets AMZ date value of given time
pub fn to_amz_date(time: UtcTime) -> String {
    time.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Parses ISO8601 UTC formatted value to time
pub fn from_iso8601utc(s: &str) -> Result<UtcTime, ParseError> {
    Ok(DateTime::<Utc>::from_naive_utc_and_offset(
        match NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S.%3fZ") {
            Ok(d) => d,
            _ => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%SZ")?,
        },
        Utc,
    ))
}

/// Percent-encodes everything except the RFC 3986 unreserved characters.
pub fn url_encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// Decodes a value returned with `encoding-type=url`. Amazon S3 sends
/// spaces as `+` and a literal `+` as `%2B`.
pub fn url_decode(s: &str) -> Result<String, ValidationErr> {
    Ok(urlencoding::decode(&s.replace('+', " "))?.into_owned())
}

const OBJECT_KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Encodes an object key for use as a URL path, keeping `/` separators.
pub fn urlencode_object_key(key: &str) -> String {
    utf8_percent_encode(key, OBJECT_KEY_ENCODE_SET).collect()
}

/// Checks if given hostname is valid or not
pub fn match_hostname(value: &str) -> bool {
    lazy_static! {
        static ref HOSTNAME_REGEX: Regex =
            Regex::new(r"^([a-z_\d-]{1,63}\.)*([a-z_\d-]{1,63})$").unwrap();
    }

    if !HOSTNAME_REGEX.is_match(value.to_lowercase().as_str()) {
        return false;
    }

    value.split('.').all(|token| {
        !(token.starts_with('-')
            || token.starts_with('_')
            || token.ends_with('-')
            || token.ends_with('_'))
    })
}

/// Validates given bucket name
pub fn check_bucket_name(bucket_name: &str, strict: bool) -> Result<(), ValidationErr> {
    lazy_static! {
        static ref IPV4_REGEX: Regex = Regex::new(
            r"^((25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9][0-9]|[0-9])\.){3}(25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9][0-9]|[0-9])$"
        )
        .unwrap();
        static ref VALID_BUCKET_NAME_REGEX: Regex =
            Regex::new(r"^[A-Za-z0-9][A-Za-z0-9\.\-_:]{1,61}[A-Za-z0-9]$").unwrap();
        static ref VALID_BUCKET_NAME_STRICT_REGEX: Regex =
            Regex::new(r"^[a-z0-9][a-z0-9\.\-]{1,61}[a-z0-9]$").unwrap();
    }

    let fail = |msg: &str| Err(ValidationErr::InvalidBucketName(msg.to_string()));

    if bucket_name.trim().is_empty() {
        return fail("bucket name cannot be empty");
    }
    if bucket_name.len() < 3 {
        return fail("bucket name cannot be less than 3 characters");
    }
    if bucket_name.len() > 63 {
        return fail("bucket name cannot be greater than 63 characters");
    }
    if IPV4_REGEX.is_match(bucket_name) {
        return fail("bucket name cannot be an IP address");
    }
    if bucket_name.contains("..") || bucket_name.contains(".-") || bucket_name.contains("-.") {
        return fail("bucket name contains invalid successive characters '..', '.-' or '-.'");
    }

    if strict {
        if !VALID_BUCKET_NAME_STRICT_REGEX.is_match(bucket_name) {
            return fail("bucket name does not follow S3 standards strictly");
        }
    } else if !VALID_BUCKET_NAME_REGEX.is_match(bucket_name) {
        return fail("bucket name does not follow S3 standards");
    }

    Ok(())
}

/// Validates given object name
pub fn check_object_name(object_name: &str) -> Result<(), ValidationErr> {
    if object_name.is_empty() {
        return Err(ValidationErr::InvalidObjectName(
            "object name cannot be empty".to_string(),
        ));
    }
    if object_name.len() > 1024 {
        return Err(ValidationErr::InvalidObjectName(
            "object name cannot be greater than 1024 bytes".to_string(),
        ));
    }
    Ok(())
}

/// Gets text value of given XML element for given tag.
pub fn get_text(element: &Element, tag: &str) -> Result<String, ValidationErr> {
    Ok(element
        .get_child(tag)
        .ok_or(ValidationErr::XmlError(format!("<{tag}> tag not found")))?
        .get_text()
        .ok_or(ValidationErr::XmlError(format!("text of <{tag}> tag not found")))?
        .to_string())
}

/// Gets optional text value of given XML element for given tag.
pub fn get_text_option(element: &Element, tag: &str) -> Option<String> {
    element
        .get_child(tag)
        .map(|v| v.get_text().unwrap_or_default().to_string())
}

/// Gets default text value of given XML element for given tag.
pub fn get_text_default(element: &Element, tag: &str) -> String {
    get_text_option(element, tag).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    #[test]
    fn test_from_iso8601utc_with_and_without_millis() {
        let t = from_iso8601utc("2024-03-09T17:04:05.123Z").unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (2024, 3, 9));
        assert_eq!((t.hour(), t.minute(), t.second()), (17, 4, 5));

        let t = from_iso8601utc("2024-03-09T17:04:05Z").unwrap();
        assert_eq!(t.second(), 5);

        assert!(from_iso8601utc("yesterday").is_err());
    }

    #[test]
    fn test_signer_and_amz_dates() {
        let t = Utc.with_ymd_and_hms(2013, 5, 24, 0, 0, 0).unwrap();
        assert_eq!(to_signer_date(t), "20130524");
        assert_eq!(to_amz_date(t), "20130524T000000Z");
    }

    #[test]
    fn test_sha256_of_empty_payload() {
        assert_eq!(sha256_hash(b""), EMPTY_SHA256);
    }

    #[test]
    fn test_url_encode_unreserved() {
        assert_eq!(url_encode("abc-_.~XYZ019"), "abc-_.~XYZ019");
        assert_eq!(url_encode("a b/c&d=e"), "a%20b%2Fc%26d%3De");
    }

    #[test]
    fn test_url_decode() {
        assert_eq!(url_decode("Media%2FA%20100.mp4").unwrap(), "Media/A 100.mp4");
        assert_eq!(url_decode("TBN0119+GENERIC%2B1.mxf").unwrap(), "TBN0119 GENERIC+1.mxf");
        assert!(url_decode("%FF").is_err());
    }

    #[test]
    fn test_urlencode_object_key_keeps_slashes() {
        assert_eq!(
            urlencode_object_key("Media/S3/clip 01+v2.mxf"),
            "Media/S3/clip%2001%2Bv2.mxf"
        );
    }

    #[test]
    fn test_match_hostname() {
        assert!(match_hostname("s3.us-east-2.amazonaws.com"));
        assert!(match_hostname("localhost"));
        assert!(!match_hostname("-bad.example.com"));
        assert!(!match_hostname("bad_.example.com"));
    }

    #[test]
    fn test_check_bucket_name() {
        assert!(check_bucket_name("media-archive", true).is_ok());
        assert!(check_bucket_name("my.media.bucket", true).is_ok());
        assert!(check_bucket_name("", true).is_err());
        assert!(check_bucket_name("ab", true).is_err());
        assert!(check_bucket_name(&"a".repeat(64), true).is_err());
        assert!(check_bucket_name("192.168.1.1", true).is_err());
        assert!(check_bucket_name("media..archive", true).is_err());
        assert!(check_bucket_name("Media_Archive", true).is_err());
        assert!(check_bucket_name("Media_Archive", false).is_ok());
    }

    #[test]
    fn test_check_object_name() {
        assert!(check_object_name("Media/A100.mp4").is_ok());
        assert!(check_object_name("").is_err());
        assert!(check_object_name(&"k".repeat(1025)).is_err());
    }
}
