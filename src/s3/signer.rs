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

//! Signature V4 for S3 API

use crate::s3::multimap_ext::{Multimap, MultimapExt};
use crate::s3::utils::{UtcTime, sha256_hash, to_amz_date, to_signer_date};
use hmac::{Hmac, Mac};
use http::Method;
use sha2::Sha256;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Longest validity SigV4 accepts for a presigned request (7 days).
pub const MAX_PRESIGN_EXPIRY_SECONDS: u32 = 604_800;

fn hmac_hash(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut hasher =
        Hmac::<Sha256>::new_from_slice(key).expect("HMAC can take key of any size");
    hasher.update(data);
    hasher.finalize().into_bytes().to_vec()
}

fn hmac_hash_hex(key: &[u8], data: &[u8]) -> String {
    let mut hasher =
        Hmac::<Sha256>::new_from_slice(key).expect("HMAC can take key of any size");
    hasher.update(data);
    format!("{:x}", hasher.finalize().into_bytes())
}

fn get_scope(date: UtcTime, region: &str, service_name: &str) -> String {
    format!(
        "{}/{region}/{service_name}/aws4_request",
        to_signer_date(date)
    )
}

fn get_canonical_request_hash(
    method: &Method,
    uri: &str,
    query_string: &str,
    headers: &str,
    signed_headers: &str,
    content_sha256: &str,
) -> String {
    // CanonicalRequest =
    //   HTTPRequestMethod + '\n' +
    //   CanonicalURI + '\n' +
    //   CanonicalQueryString + '\n' +
    //   CanonicalHeaders + '\n\n' +
    //   SignedHeaders + '\n' +
    //   HexEncode(Hash(RequestPayload))
    let canonical_request = format!(
        "{method}\n{uri}\n{query_string}\n{headers}\n\n{signed_headers}\n{content_sha256}"
    );
    sha256_hash(canonical_request.as_bytes())
}

fn get_string_to_sign(date: UtcTime, scope: &str, canonical_request_hash: &str) -> String {
    format!(
        "{ALGORITHM}\n{}\n{scope}\n{canonical_request_hash}",
        to_amz_date(date)
    )
}

fn get_signing_key(secret_key: &str, date: UtcTime, region: &str, service_name: &str) -> Vec<u8> {
    let key = format!("AWS4{secret_key}");
    let date_key = hmac_hash(key.as_bytes(), to_signer_date(date).as_bytes());
    let date_region_key = hmac_hash(&date_key, region.as_bytes());
    let date_region_service_key = hmac_hash(&date_region_key, service_name.as_bytes());
    hmac_hash(&date_region_service_key, b"aws4_request")
}

/// Signs and updates headers for given parameters for S3 request.
///
/// `headers` must already carry `Host`, `x-amz-date` and
/// `x-amz-content-sha256`; an `Authorization` header is added.
pub fn sign_v4_s3(
    method: &Method,
    uri: &str,
    region: &str,
    headers: &mut Multimap,
    query_params: &Multimap,
    access_key: &str,
    secret_key: &str,
    content_sha256: &str,
    date: UtcTime,
) {
    let scope = get_scope(date, region, "s3");
    let (signed_headers, canonical_headers) = headers.get_canonical_headers();
    let canonical_request_hash = get_canonical_request_hash(
        method,
        uri,
        &query_params.get_canonical_query_string(),
        &canonical_headers,
        &signed_headers,
        content_sha256,
    );
    let string_to_sign = get_string_to_sign(date, &scope, &canonical_request_hash);
    let signing_key = get_signing_key(secret_key, date, region, "s3");
    let signature = hmac_hash_hex(&signing_key, string_to_sign.as_bytes());

    headers.add(
        "Authorization",
        format!(
            "{ALGORITHM} Credential={access_key}/{scope}, SignedHeaders={signed_headers}, Signature={signature}"
        ),
    );
}

/// Adds the SigV4 query-string authentication parameters for a presigned
/// request. Expiry values above [`MAX_PRESIGN_EXPIRY_SECONDS`] are clamped.
pub fn presign_v4(
    method: &Method,
    host: &str,
    uri: &str,
    region: &str,
    query_params: &mut Multimap,
    access_key: &str,
    secret_key: &str,
    date: UtcTime,
    expires: u32,
) {
    let scope = get_scope(date, region, "s3");
    let canonical_headers = format!("host:{host}");
    let signed_headers = "host";

    query_params.add("X-Amz-Algorithm", ALGORITHM);
    query_params.add("X-Amz-Credential", format!("{access_key}/{scope}"));
    query_params.add("X-Amz-Date", to_amz_date(date));
    query_params.add(
        "X-Amz-Expires",
        expires.min(MAX_PRESIGN_EXPIRY_SECONDS).to_string(),
    );
    query_params.add("X-Amz-SignedHeaders", signed_headers);

    let canonical_request_hash = get_canonical_request_hash(
        method,
        uri,
        &query_params.get_canonical_query_string(),
        &canonical_headers,
        signed_headers,
        "UNSIGNED-PAYLOAD",
    );
    let string_to_sign = get_string_to_sign(date, &scope, &canonical_request_hash);
    let signing_key = get_signing_key(secret_key, date, region, "s3");
    let signature = hmac_hash_hex(&signing_key, string_to_sign.as_bytes());

    query_params.add("X-Amz-Signature", signature);
}
