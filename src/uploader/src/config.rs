// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;
use humantime::parse_duration;
use std::path::PathBuf;
use std::time::Duration;

const DESCRIPTION: &str = concat!(
    "Uploads a single local file to Google Drive, authenticating with a",
    " service account key file. On success it prints the id assigned to the",
    " new file. Invoked without arguments it uploads `output.wav` from the",
    " current directory as `audio/wav`."
);

/// Configuration options for the uploader.
#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = DESCRIPTION)]
pub struct Config {
    /// The service account key file.
    #[arg(long, env = "DRIVE_UPLOAD_CREDENTIALS", default_value = "service_account.json")]
    pub credentials: PathBuf,

    /// The local file to upload.
    #[arg(long, env = "DRIVE_UPLOAD_FILE", default_value = "output.wav")]
    pub file: PathBuf,

    /// The name of the new file in Google Drive.
    #[arg(long, default_value = "output.wav")]
    pub name: String,

    /// The MIME type of the uploaded contents.
    #[arg(long, default_value = "audio/wav")]
    pub content_type: String,

    /// The id of a folder containing the new file. May be repeated.
    ///
    /// Files created by a service account without a parent are only visible
    /// to the service account.
    #[arg(long = "parent")]
    pub parents: Vec<String>,

    /// The OAuth2 scopes requested for the access token, comma separated.
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "https://www.googleapis.com/auth/drive"
    )]
    pub scopes: Vec<String>,

    /// The maximum time for the upload request.
    #[arg(long, value_parser = parse_duration, default_value = "5m")]
    pub timeout: Duration,

    /// The Google Drive endpoint.
    #[arg(long, hide = true, default_value = "https://www.googleapis.com")]
    pub endpoint: String,

    /// The most verbose level logged to stderr.
    #[arg(long, default_value = "warn")]
    pub log_level: tracing::Level,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn defaults() -> anyhow::Result<()> {
        let config = Config::try_parse_from(["drive-upload"])?;
        assert_eq!(config.name, "output.wav");
        assert_eq!(config.content_type, "audio/wav");
        assert!(config.parents.is_empty(), "{config:?}");
        assert_eq!(config.scopes, vec!["https://www.googleapis.com/auth/drive"]);
        assert_eq!(config.timeout, Duration::from_secs(300));
        assert_eq!(config.endpoint, "https://www.googleapis.com");
        assert_eq!(config.log_level, tracing::Level::WARN);
        Ok(())
    }

    #[test]
    fn overrides() -> anyhow::Result<()> {
        let config = Config::try_parse_from([
            "drive-upload",
            "--credentials=/secrets/key.json",
            "--file=/tmp/recording.wav",
            "--name=meeting.wav",
            "--content-type=audio/x-wav",
            "--parent=folder-1",
            "--parent=folder-2",
            "--scopes=scope-1,scope-2",
            "--timeout=30s",
            "--endpoint=http://localhost:8080",
            "--log-level=debug",
        ])?;
        assert_eq!(config.credentials, PathBuf::from("/secrets/key.json"));
        assert_eq!(config.file, PathBuf::from("/tmp/recording.wav"));
        assert_eq!(config.name, "meeting.wav");
        assert_eq!(config.content_type, "audio/x-wav");
        assert_eq!(config.parents, vec!["folder-1", "folder-2"]);
        assert_eq!(config.scopes, vec!["scope-1", "scope-2"]);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.endpoint, "http://localhost:8080");
        assert_eq!(config.log_level, tracing::Level::DEBUG);
        Ok(())
    }

    #[test_case(&["drive-upload", "--timeout=forever"])]
    #[test_case(&["drive-upload", "--log-level=chatty"])]
    #[test_case(&["drive-upload", "--unknown-flag"])]
    fn invalid(input: &[&str]) {
        let got = Config::try_parse_from(input);
        assert!(got.is_err(), "{got:?}");
    }
}
