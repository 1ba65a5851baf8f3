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

//! # S3 asset finder
//!
//! Reconciles a list of externally supplied asset identifiers against the
//! objects stored in an Amazon S3 (or S3 compatible) bucket. Objects are
//! joined on their file name without extension, grouped per identifier and
//! optionally enriched with presigned `GET` URLs.
//!
//! The crate carries a small S3 client in [`s3`] (object listing and URL
//! presigning with AWS Signature V4), the matching pipeline in [`finder`]
//! and the profile store in [`config`].
//!
//! ## Basic Usage
//!
//! ```no_run
//! use asset_finder::finder::{self, FinderOptions, OutputSpec};
//! use asset_finder::s3::S3Client;
//! use asset_finder::s3::http::BaseUrl;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = S3Client::builder(BaseUrl::aws(Some("eu-west-1")))
//!         .build()
//!         .unwrap();
//!
//!     let output: OutputSpec = "asset_id,path,size".parse().unwrap();
//!     let opts = FinderOptions::new("media-archive", output);
//!
//!     for line in finder::run(&client, &opts).await.expect("run failed") {
//!         println!("{line}");
//!     }
//! }
//! ```

#![allow(clippy::result_large_err)]
#![allow(clippy::too_many_arguments)]
pub mod config;
pub mod finder;
pub mod s3;

#[cfg(test)]
#[macro_use]
extern crate quickcheck;
