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

use super::http::{BaseUrl, Url, match_aws_s3_endpoint};
use super::multimap_ext::{Multimap, MultimapExt};

// ===========================
// Url Tests
// ===========================

#[test]
fn test_url_default() {
    let url = Url::default();
    assert!(url.https);
    assert!(url.host.is_empty());
    assert_eq!(url.port, 0);
    assert!(url.path.is_empty());
    assert!(url.query.is_empty());
}

#[test]
fn test_url_host_header_value_with_port() {
    let url = Url {
        host: "localhost".to_string(),
        port: 9000,
        ..Default::default()
    };
    assert_eq!(url.host_header_value(), "localhost:9000");
}

#[test]
fn test_url_display_with_query() {
    let mut query = Multimap::new();
    query.add("X-Amz-Expires", "3600");
    let url = Url {
        https: false,
        host: "localhost".to_string(),
        port: 9000,
        path: "/media/Media/A100.mp4".to_string(),
        query,
    };
    assert_eq!(
        url.to_string(),
        "http://localhost:9000/media/Media/A100.mp4?X-Amz-Expires=3600"
    );
}

#[test]
fn test_url_display_adds_leading_slash() {
    let url = Url {
        host: "example.com".to_string(),
        path: "key".to_string(),
        ..Default::default()
    };
    assert_eq!(url.to_string(), "https://example.com/key");
}

// ===========================
// Endpoint matching
// ===========================

#[test]
fn test_match_aws_s3_endpoint() {
    assert_eq!(match_aws_s3_endpoint("s3.amazonaws.com"), Some(String::new()));
    assert_eq!(
        match_aws_s3_endpoint("s3.us-east-2.amazonaws.com"),
        Some("us-east-2".to_string())
    );
    assert_eq!(
        match_aws_s3_endpoint("s3-us-gov-west-1.amazonaws.com"),
        Some("us-gov-west-1".to_string())
    );
    assert_eq!(match_aws_s3_endpoint("play.min.io"), None);
    assert_eq!(match_aws_s3_endpoint("ec2.amazonaws.com"), None);
}

// ===========================
// BaseUrl Tests
// ===========================

#[test]
fn test_base_url_from_str_custom_endpoint() {
    let base: BaseUrl = "http://localhost:9000".parse().unwrap();
    assert!(!base.https);
    assert!(!base.is_aws_host());
    assert!(!base.virtual_style);
    assert_eq!(base.host_with_port(), "localhost:9000");
    assert!(base.region.is_empty());
}

#[test]
fn test_base_url_from_str_default_port_dropped() {
    let base: BaseUrl = "https://minio.example.com:443".parse().unwrap();
    assert_eq!(base.host_with_port(), "minio.example.com");
}

#[test]
fn test_base_url_from_str_aws_with_region() {
    let base: BaseUrl = "https://s3.eu-west-1.amazonaws.com".parse().unwrap();
    assert!(base.is_aws_host());
    assert!(base.virtual_style);
    assert_eq!(base.region, "eu-west-1");
}

#[test]
fn test_base_url_from_str_rejects_bad_input() {
    assert!("ftp://example.com".parse::<BaseUrl>().is_err());
    assert!("https://example.com/some/path".parse::<BaseUrl>().is_err());
    assert!("https://example.com/?a=b".parse::<BaseUrl>().is_err());
}

#[test]
fn test_build_url_aws_virtual_style() {
    let base = BaseUrl::aws(Some("us-east-2"));
    let url = base.build_url("us-east-2", &Multimap::new(), Some("media"), Some("Media/A 100.mp4"));
    assert_eq!(url.host, "media.s3.us-east-2.amazonaws.com");
    assert_eq!(url.path, "/Media/A%20100.mp4");
}

#[test]
fn test_build_url_aws_bucket_listing_path_is_root() {
    let base = BaseUrl::aws(None);
    let url = base.build_url("eu-west-1", &Multimap::new(), Some("media"), None);
    assert_eq!(url.host, "media.s3.eu-west-1.amazonaws.com");
    assert_eq!(url.path, "/");
}

#[test]
fn test_build_url_dotted_bucket_uses_path_style() {
    let base = BaseUrl::aws(Some("us-east-1"));
    let url = base.build_url("us-east-1", &Multimap::new(), Some("my.media"), Some("a.mp4"));
    assert_eq!(url.host, "s3.us-east-1.amazonaws.com");
    assert_eq!(url.path, "/my.media/a.mp4");
}

#[test]
fn test_build_url_location_uses_path_style() {
    let base = BaseUrl::aws(None);
    let mut query = Multimap::new();
    query.add("location", "");
    let url = base.build_url("us-east-1", &query, Some("media"), None);
    assert_eq!(url.host, "s3.us-east-1.amazonaws.com");
    assert_eq!(url.path, "/media");
}

#[test]
fn test_build_url_custom_endpoint_path_style() {
    let base: BaseUrl = "http://localhost:9000".parse().unwrap();
    let url = base.build_url("us-east-1", &Multimap::new(), Some("media"), Some("Media/A100.mp4"));
    assert_eq!(url.host, "localhost");
    assert_eq!(url.port, 9000);
    assert_eq!(url.path, "/media/Media/A100.mp4");
    assert_eq!(url.to_string(), "http://localhost:9000/media/Media/A100.mp4");
}
