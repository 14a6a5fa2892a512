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

//! Uploads a local file to Google Drive using a service account.
//!
//! The upload is a single linear flow: load the service account key, read
//! the local file, exchange the key for an access token, create the file in
//! Drive, and print the id of the new file.

pub mod config;
mod error;

pub use config::Config;
pub use error::Error;

use drive_upload_auth::credentials::{Credentials, service_account};
use drive_upload_files::client::Drive;
use std::io::Write;

/// Runs one upload and writes the result line to `out`.
///
/// On success `out` receives exactly one line:
/// `Uploaded to Drive, File ID: <id>`. If the service does not return an id
/// the line ends in `None`.
///
/// Nothing is written to `out` on failure. The media file is read before any
/// network request, a missing file fails without contacting the service.
///
/// Only credentials that the token endpoint or Drive reject result in
/// [Error::Authentication]. An unreachable or unavailable token endpoint is
/// reported as [Error::Upload], like any other network failure.
pub async fn run<W: Write>(config: &Config, out: &mut W) -> Result<(), Error> {
    let credentials = load_credentials(config).await?;
    tracing::info!("loaded credentials from {}", config.credentials.display());

    let contents = tokio::fs::read(&config.file)
        .await
        .map_err(|e| Error::upload(&config.file, e))?;
    tracing::info!(
        "read {} bytes from {}",
        contents.len(),
        config.file.display()
    );

    let client = Drive::builder()
        .with_credentials(credentials)
        .with_endpoint(&config.endpoint)
        .with_timeout(config.timeout)
        .build()
        .map_err(Error::Authentication)?;
    let file = client
        .create_file(&config.name, contents)
        .with_mime_type(&config.content_type)
        .with_parents(&config.parents)
        .send()
        .await
        .map_err(|e| {
            if e.is_credentials_rejected() {
                Error::Authentication(e)
            } else {
                Error::upload(&config.file, e)
            }
        })?;

    let id = file.id.as_deref().unwrap_or("None");
    writeln!(out, "Uploaded to Drive, File ID: {id}").map_err(Error::Output)?;
    Ok(())
}

async fn load_credentials(config: &Config) -> Result<Credentials, Error> {
    let to_error = |source| Error::CredentialLoad {
        path: config.credentials.clone(),
        source,
    };
    let key = service_account::load_key(&config.credentials)
        .await
        .map_err(to_error)?;
    service_account::Builder::new(key)
        .with_scopes(&config.scopes)
        .build()
        .map_err(to_error)
}
