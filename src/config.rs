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

//! Profile store read from `config.json`.
//!
//! The file is a JSON object keyed by profile name:
//!
//! ```json
//! {
//!   "media": {
//!     "aws_bucket": "media-archive",
//!     "aws_region": "eu-west-1",
//!     "aws_access_key_id": "AKIA...",
//!     "aws_secret_access_key": "..."
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::finder::Error;
use crate::s3::creds::{EnvProvider, Provider, StaticProvider};
use crate::s3::http::BaseUrl;

/// Default location of the profile store.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// One named profile. Unknown keys are ignored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub aws_bucket: Option<String>,
    pub aws_region: Option<String>,
    pub aws_endpoint: Option<String>,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub aws_session_token: Option<String>,
}

/// Explicit credentials of a profile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CredentialsConfig {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
}

impl Profile {
    pub fn credentials(&self) -> CredentialsConfig {
        let non_empty = |v: &Option<String>| v.clone().filter(|v| !v.is_empty());
        CredentialsConfig {
            access_key_id: non_empty(&self.aws_access_key_id),
            secret_access_key: non_empty(&self.aws_secret_access_key),
            session_token: non_empty(&self.aws_session_token),
        }
    }

    /// Credential provider for this profile: the profile keys when both are
    /// set, else the `AWS_*` environment variables, else anonymous.
    pub fn provider(&self) -> Option<Arc<dyn Provider>> {
        match self.credentials() {
            CredentialsConfig {
                access_key_id: Some(access_key),
                secret_access_key: Some(secret_key),
                session_token,
            } => {
                let provider: Arc<dyn Provider> = Arc::new(StaticProvider::new(
                    &access_key,
                    &secret_key,
                    session_token.as_deref(),
                ));
                Some(provider)
            }
            _ => match EnvProvider::from_env() {
                Some(provider) => {
                    log::debug!("using credentials from the environment");
                    let provider: Arc<dyn Provider> = Arc::new(provider);
                    Some(provider)
                }
                None => {
                    log::warn!("no credentials configured; sending anonymous requests");
                    None
                }
            },
        }
    }

    /// Endpoint to talk to. Arguments override the profile values.
    pub fn base_url(&self, endpoint: Option<&str>, region: Option<&str>) -> Result<BaseUrl, Error> {
        let region = region.or(self.aws_region.as_deref()).filter(|r| !r.is_empty());
        match endpoint.or(self.aws_endpoint.as_deref()) {
            Some(endpoint) => {
                let mut base_url: BaseUrl = endpoint
                    .parse()
                    .map_err(|e| Error::usage(format!("bad endpoint: {e}")))?;
                if let Some(region) = region {
                    base_url.region = region.to_string();
                }
                Ok(base_url)
            }
            None => Ok(BaseUrl::aws(region)),
        }
    }
}

/// All profiles of a configuration file.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Config {
    profiles: HashMap<String, Profile>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, Error> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::usage(format!("cannot read {}: {e}", path.display())))?;
        Config::parse(&content, &path.display().to_string())
    }

    pub fn parse(json: &str, origin: &str) -> Result<Config, Error> {
        serde_json::from_str(json).map_err(|e| Error::usage(format!("malformed {origin}: {e}")))
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, Error> {
        self.profiles
            .get(name)
            .ok_or_else(|| Error::usage(format!("profile '{name}' not found in configuration")))
    }
}
