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

use crate::Error;
use super::create_file::CreateFile;
use drive_upload_auth::credentials::Credentials;
use drive_upload_auth::errors::CredentialsError;
use std::sync::Arc;
use std::time::Duration;

/// Implements a client for the Google Drive API `files` resource.
///
/// # Example
/// ```
/// # use drive_upload_files::client::Drive;
/// # async fn sample(credentials: drive_upload_auth::credentials::Credentials) -> anyhow::Result<()> {
/// let client = Drive::builder().with_credentials(credentials).build()?;
/// let file = client
///     .create_file("output.wav", "RIFF....WAVE")
///     .with_mime_type("audio/wav")
///     .send()
///     .await?;
/// println!("file id={:?}", file.id);
/// # Ok(()) }
/// ```
///
/// # Pooling and Cloning
///
/// `Drive` holds a connection pool internally, it is advised to
/// create one and then reuse it. You do not need to wrap `Drive` in
/// an [Rc](std::rc::Rc) or [Arc] to reuse it, because it already uses an `Arc`
/// internally.
#[derive(Clone, Debug)]
pub struct Drive {
    inner: Arc<DriveInner>,
}

#[derive(Debug)]
pub(crate) struct DriveInner {
    pub client: reqwest::Client,
    pub cred: Credentials,
    pub endpoint: String,
}

impl Drive {
    /// Returns a builder for [Drive].
    ///
    /// # Example
    /// ```
    /// # use drive_upload_files::client::Drive;
    /// # fn sample(credentials: drive_upload_auth::credentials::Credentials) -> anyhow::Result<()> {
    /// let client = Drive::builder().with_credentials(credentials).build()?;
    /// # Ok(()) }
    /// ```
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a new file with the given name and contents.
    ///
    /// The request is not sent until the application calls
    /// [send()][CreateFile::send].
    ///
    /// # Parameters
    /// * `name` - the name of the new file. Drive allows duplicate names, each
    ///   successful call creates a new file with a new id.
    /// * `payload` - the file contents.
    pub fn create_file<N, P>(&self, name: N, payload: P) -> CreateFile
    where
        N: Into<String>,
        P: Into<bytes::Bytes>,
    {
        CreateFile::new(self.inner.clone(), name, payload)
    }

    pub(crate) fn new(builder: ClientBuilder) -> crate::Result<Self> {
        tracing::info!("builder={builder:?}");
        let cred = builder.credentials.ok_or_else(|| {
            Error::authentication(CredentialsError::from_msg(
                false,
                "no credentials configured, use `with_credentials()`",
            ))
        })?;
        let client = reqwest::Client::builder()
            .timeout(builder.timeout)
            .build()
            .map_err(Error::io)?;
        let endpoint = builder
            .endpoint
            .unwrap_or_else(|| self::DEFAULT_HOST.to_string());
        let inner = Arc::new(DriveInner {
            client,
            cred,
            endpoint,
        });
        Ok(Self { inner })
    }
}

impl DriveInner {
    // Helper method to apply authentication headers to the request builder.
    pub async fn apply_auth_headers(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> crate::Result<reqwest::RequestBuilder> {
        let auth_headers = self
            .cred
            .headers()
            .await
            .map_err(Error::authentication)?;
        Ok(builder.headers(auth_headers))
    }
}

/// A builder for [Drive].
///
/// ```
/// # use drive_upload_files::client::Drive;
/// # fn sample(credentials: drive_upload_auth::credentials::Credentials) -> anyhow::Result<()> {
/// let builder = Drive::builder();
/// let client = builder
///     .with_credentials(credentials)
///     .with_endpoint("https://www.googleapis.com")
///     .build()?;
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct ClientBuilder {
    pub(crate) endpoint: Option<String>,
    pub(crate) credentials: Option<Credentials>,
    pub(crate) timeout: Duration,
}

impl ClientBuilder {
    pub(crate) fn new() -> Self {
        Self {
            endpoint: None,
            credentials: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Creates a new client.
    ///
    /// # Errors
    /// Returns an error reporting [is_authentication()][Error::is_authentication]
    /// if no credentials were configured.
    pub fn build(self) -> crate::Result<Drive> {
        Drive::new(self)
    }

    /// Sets the endpoint.
    ///
    /// Uploads are sent to `{endpoint}/upload/drive/v3/files`.
    pub fn with_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.endpoint = Some(v.into());
        self
    }

    /// Configures the authentication credentials.
    ///
    /// Google Drive requires authentication for all requests. The credentials
    /// need a scope granting write access to Drive, such as
    /// `https://www.googleapis.com/auth/drive`.
    pub fn with_credentials<V: Into<Credentials>>(mut self, v: V) -> Self {
        self.credentials = Some(v.into());
        self
    }

    /// Sets the timeout for each request.
    ///
    /// The timeout covers the full request, from connecting to reading the
    /// response. The default is 5 minutes.
    pub fn with_timeout(mut self, v: Duration) -> Self {
        self.timeout = v;
        self
    }
}

/// The default host used by the service.
const DEFAULT_HOST: &str = "https://www.googleapis.com";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
