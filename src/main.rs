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

//! `s3-asset-finder`: prints the stored objects matching a list of asset
//! identifiers, one comma separated line per object.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use asset_finder::config::{Config, DEFAULT_CONFIG_FILE};
use asset_finder::finder::{self, Error, FinderOptions, OutputSpec};
use asset_finder::finder::lister::parse_prefixes;
use asset_finder::s3::S3Client;
use asset_finder::s3::builders::DEFAULT_EXPIRY_SECONDS;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "s3-asset-finder", version)]
#[command(
    about = "S3 Asset Finder. Searches the bucket for assets (file name without extension) listed in an input CSV and prints information about them."
)]
struct Args {
    /// Profile name in the configuration file
    #[arg(short = 'c', long = "config")]
    profile: String,

    /// S3 bucket; defaults to the profile's aws_bucket
    #[arg(short, long)]
    bucket: Option<String>,

    /// CSV file whose first column holds the asset ids to search for; all
    /// objects are printed when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Prefixes separated by comma, e.g. Media/S3,VOD/Media
    #[arg(short, long)]
    paths: Option<String>,

    /// Result fields separated by comma
    /// [asset_id,path,date,size,storageclass,presign,presign-esc]
    #[arg(short, long, default_value = "path")]
    results: String,

    /// Presigned URL expiry in seconds
    #[arg(short, long, default_value_t = DEFAULT_EXPIRY_SECONDS as i64, allow_negative_numbers = true)]
    expiry: i64,

    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config_file: PathBuf,

    /// S3 endpoint, e.g. http://localhost:9000; defaults to Amazon S3
    #[arg(long)]
    endpoint: Option<String>,

    /// Region of the bucket; discovered when omitted
    #[arg(long)]
    region: Option<String>,

    /// Log the input ids that matched no object
    #[arg(long)]
    report_missing: bool,

    /// Timeout of each S3 request in seconds; no timeout when omitted
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,
}

async fn run(args: Args) -> Result<Vec<String>, Error> {
    let output: OutputSpec = args.results.parse()?;

    let config = Config::load(&args.config_file)?;
    let profile = config.profile(&args.profile)?;

    let bucket = args
        .bucket
        .or_else(|| profile.aws_bucket.clone())
        .ok_or_else(|| {
            Error::usage(format!(
                "no bucket given and profile '{}' has no aws_bucket",
                args.profile
            ))
        })?;

    let base_url = profile.base_url(args.endpoint.as_deref(), args.region.as_deref())?;
    let client = S3Client::builder(base_url)
        .provider(profile.provider())
        .timeout(args.timeout.map(Duration::from_secs))
        .build()
        .map_err(|e| Error::usage(format!("cannot create S3 client: {e}")))?;

    let opts = FinderOptions {
        bucket,
        input: args.input,
        prefixes: parse_prefixes(args.paths.as_deref()),
        output,
        expiry_seconds: args.expiry,
        report_missing: args.report_missing,
    };

    finder::run(&client, &opts).await
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init(); // Note: set environment variable RUST_LOG="INFO" to log info and higher

    let lines = match run(Args::parse()).await {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut out = BufWriter::new(io::stdout().lock());
    for line in &lines {
        if let Err(e) = writeln!(out, "{line}") {
            eprintln!("error: cannot write results: {e}");
            return ExitCode::FAILURE;
        }
    }
    if let Err(e) = out.flush() {
        eprintln!("error: cannot write results: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
